use crate::engine::config::EngineConfig;
use crate::models::{Recording, Segment};

/// New end boundary for a segment whose attaching recording runs past its
/// current end, or `None` when no growth applies.
///
/// Growth is capped at 6 seconds per attach event and clamped to the media
/// duration; an over-long trailing recording is simply not fully covered. The
/// returned end is never below the segment's current end.
pub fn extended_end(
    segment: &Segment,
    recording: &Recording,
    media_duration: Option<f64>,
    config: &EngineConfig,
) -> Option<f64> {
    let desired = (recording.end_secs() - segment.end_secs).max(0.0);
    let actual = desired.min(config.max_extension_secs);

    let mut new_end = segment.end_secs + actual;
    if let Some(d) = media_duration {
        new_end = new_end.min(d);
    }
    new_end = new_end.max(segment.end_secs);

    (new_end > segment.end_secs).then_some(new_end)
}
