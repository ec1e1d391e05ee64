//! The segment timeline engine: pure, synchronous decisions over a snapshot
//! of one media asset's segments. Persistence, capture, and transcription are
//! external collaborators; nothing here blocks, locks, or mutates shared
//! state.

mod config;
mod error;
mod extend;
mod index;
mod locate;
mod resolve;
mod sizer;

pub use config::EngineConfig;
pub use error::EngineError;
pub use extend::extended_end;
pub use index::IntervalIndex;
pub use locate::{locate_active_segment, PlaybackSession, PlaybackState};
pub use resolve::{resolve_attachment, AttachmentDecision, AttachmentTarget, ResolveWarning};
pub use sizer::{size_new_segment, SegmentBounds};

use log::warn;

/// A declared media duration that is not a positive number is treated as
/// unknown: bounds computation runs uncapped instead of failing the whole
/// operation.
pub fn usable_media_duration(declared: Option<f64>) -> Option<f64> {
    match declared {
        Some(d) if d.is_finite() && d > 0.0 => Some(d),
        Some(d) => {
            warn!("{}", EngineError::InvalidMediaDuration(d));
            None
        }
        None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_declared_durations_fall_back_to_unknown() {
        assert_eq!(usable_media_duration(Some(90.0)), Some(90.0));
        assert_eq!(usable_media_duration(Some(0.0)), None);
        assert_eq!(usable_media_duration(Some(-3.0)), None);
        assert_eq!(usable_media_duration(Some(f64::NAN)), None);
        assert_eq!(usable_media_duration(None), None);
    }
}
