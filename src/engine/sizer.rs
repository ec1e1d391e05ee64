use serde::{Deserialize, Serialize};

use crate::engine::config::EngineConfig;
use crate::models::Recording;

/// Bounds for a segment that does not exist yet. Returned to the caller to
/// persist; the engine never creates rows itself.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentBounds {
    pub start_secs: f64,
    pub end_secs: f64,
}

/// Compute the buffered, clamped bounds of a brand-new segment.
///
/// The segment opens `pre_buffer` early and runs at least `post_buffer` past
/// the recording, stretched to a target length of 1.8x the recording duration
/// clamped to [10, 60] seconds. A known media duration caps the end; the
/// result is zero-length only when the recording starts at or past the media
/// end and the start itself gets clamped.
pub fn size_new_segment(
    recording: &Recording,
    media_duration: Option<f64>,
    config: &EngineConfig,
) -> SegmentBounds {
    let target_len = (recording.duration_secs * config.target_scale)
        .clamp(config.min_target_secs, config.max_target_secs);

    let mut start = (recording.start_secs - config.pre_buffer_secs).max(0.0);
    let raw_end = recording.end_secs() + config.post_buffer_secs;
    let mut end = raw_end.max(start + target_len);

    if let Some(d) = media_duration {
        start = start.min(d);
        end = end.min(d);
    }
    if end < start {
        end = start;
    }

    SegmentBounds {
        start_secs: start,
        end_secs: end,
    }
}
