use std::cmp::Ordering;

use crate::engine::index::IntervalIndex;
use crate::models::Segment;

/// Pick the single segment to highlight as "Now" at playback time `t`.
///
/// Among segments containing `t`, the shortest wins (most specific match),
/// and a duration tie goes to the most recently created. The tie-break is a
/// deliberate local choice, not recovered product behavior; revisiting it
/// does not change this function's signature.
pub fn locate_active_segment(snapshot: &[Segment], t: f64) -> Option<&Segment> {
    IntervalIndex::new(snapshot)
        .containing(t)
        .into_iter()
        .min_by(|a, b| {
            a.duration_secs()
                .partial_cmp(&b.duration_secs())
                .unwrap_or(Ordering::Equal)
                .then_with(|| b.created_at.cmp(&a.created_at))
        })
}

/// Highlighting state for one media asset's playback session.
#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackState {
    /// No time update received yet.
    Idle,
    /// Playhead known but outside every segment.
    Seeking,
    /// Playhead inside the named segment.
    Located(String),
}

/// Drives `Idle -> Seeking -> Located` purely from repeated time updates.
/// The engine has no notion of play or pause, only of "given this timestamp,
/// what's active"; no internal timer exists.
#[derive(Debug)]
pub struct PlaybackSession {
    state: PlaybackState,
}

impl PlaybackSession {
    pub fn new() -> Self {
        Self {
            state: PlaybackState::Idle,
        }
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    /// Feed the current playback time; returns the active segment id, if any.
    pub fn on_time_update(&mut self, snapshot: &[Segment], t: f64) -> Option<&str> {
        self.state = match locate_active_segment(snapshot, t) {
            Some(segment) => PlaybackState::Located(segment.id.clone()),
            None => PlaybackState::Seeking,
        };
        match &self.state {
            PlaybackState::Located(id) => Some(id.as_str()),
            _ => None,
        }
    }
}

impl Default for PlaybackSession {
    fn default() -> Self {
        Self::new()
    }
}
