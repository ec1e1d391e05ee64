use std::cmp::Ordering;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::engine::config::EngineConfig;
use crate::engine::extend::extended_end;
use crate::engine::index::IntervalIndex;
use crate::engine::sizer::{size_new_segment, SegmentBounds};
use crate::engine::{usable_media_duration, EngineError};
use crate::models::{Recording, Segment};

/// Advisory signal for the UI, decoupled from the attach decision itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolveWarning {
    /// The best candidate covered >= 80% of the recording yet still failed
    /// the dual threshold. Surfaced so the UI can hint at fragmentation.
    HighOverlapNoAttach,
}

/// Where the narration should land. Creation and extension are returned as
/// values for the caller to persist; the snapshot is never mutated in place.
#[derive(Debug, Clone, PartialEq)]
pub enum AttachmentTarget {
    Existing {
        segment_id: String,
        /// Set when the recording runs past the segment's current end and the
        /// segment should grow to `new_end_secs` before the narration lands.
        new_end_secs: Option<f64>,
    },
    New { bounds: SegmentBounds },
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttachmentDecision {
    pub target: AttachmentTarget,
    pub warning: Option<ResolveWarning>,
}

impl AttachmentDecision {
    pub fn created(&self) -> bool {
        matches!(self.target, AttachmentTarget::New { .. })
    }

    pub fn extended(&self) -> bool {
        matches!(
            self.target,
            AttachmentTarget::Existing {
                new_end_secs: Some(_),
                ..
            }
        )
    }
}

/// Minimum overlap a recording needs against `segment` to attach: half the
/// shorter of the two intervals, floored at the absolute minimum.
fn required_overlap(segment: &Segment, recording: &Recording, config: &EngineConfig) -> f64 {
    config
        .min_overlap_secs
        .max((0.5 * recording.duration_secs).min(0.5 * segment.duration_secs()))
}

struct Candidate<'a> {
    segment: &'a Segment,
    overlap: f64,
}

/// Ordered tie-break among qualifying candidates: greatest overlap, then most
/// narrations (hotspot preference), then highest source rank. A full tie keeps
/// the earlier snapshot entry so resolution stays deterministic.
fn beats(challenger: &Candidate<'_>, incumbent: &Candidate<'_>) -> bool {
    match challenger
        .overlap
        .partial_cmp(&incumbent.overlap)
        .unwrap_or(Ordering::Equal)
    {
        Ordering::Greater => true,
        Ordering::Less => false,
        Ordering::Equal => match challenger
            .segment
            .narration_count
            .cmp(&incumbent.segment.narration_count)
        {
            Ordering::Greater => true,
            Ordering::Less => false,
            Ordering::Equal => {
                challenger.segment.top_source.rank() > incumbent.segment.top_source.rank()
            }
        },
    }
}

/// Decide whether `recording` attaches to an existing segment or spawns a new
/// one. Pure function of the snapshot plus constants; idempotent for the same
/// inputs.
///
/// With `explicit_segment_id` set (the "Add to this segment" action) the
/// threshold and tie-break are skipped entirely and the narration attaches
/// unconditionally, still growing the segment if the recording runs past it.
pub fn resolve_attachment(
    recording: &Recording,
    snapshot: &[Segment],
    media_duration: Option<f64>,
    explicit_segment_id: Option<&str>,
    config: &EngineConfig,
) -> Result<AttachmentDecision, EngineError> {
    recording.validate()?;
    let media_duration = usable_media_duration(media_duration);

    if let Some(target_id) = explicit_segment_id {
        let segment = snapshot
            .iter()
            .find(|seg| seg.id == target_id)
            .ok_or_else(|| EngineError::AmbiguousExplicitTarget(target_id.to_string()))?;
        return Ok(AttachmentDecision {
            target: AttachmentTarget::Existing {
                segment_id: segment.id.clone(),
                new_end_secs: extended_end(segment, recording, media_duration, config),
            },
            warning: None,
        });
    }

    let index = IntervalIndex::new(snapshot);
    let candidates = index.overlapping(recording.start_secs, recording.end_secs());

    let mut winner: Option<Candidate<'_>> = None;
    let mut best_ratio = 0.0_f64;

    for segment in candidates {
        let overlap = segment.overlap_seconds(recording.start_secs, recording.end_secs());
        let required = required_overlap(segment, recording, config);
        best_ratio = best_ratio.max(overlap / recording.duration_secs);

        if overlap < required {
            debug!(
                "segment {} rejected: overlap {overlap:.2}s < required {required:.2}s",
                segment.id
            );
            continue;
        }

        let candidate = Candidate { segment, overlap };
        match &winner {
            Some(current) if !beats(&candidate, current) => {}
            _ => winner = Some(candidate),
        }
    }

    if let Some(best) = winner {
        debug!(
            "attaching to segment {} with overlap {:.2}s",
            best.segment.id, best.overlap
        );
        return Ok(AttachmentDecision {
            target: AttachmentTarget::Existing {
                segment_id: best.segment.id.clone(),
                new_end_secs: extended_end(best.segment, recording, media_duration, config),
            },
            warning: None,
        });
    }

    let warning =
        (best_ratio >= config.warn_overlap_ratio).then_some(ResolveWarning::HighOverlapNoAttach);
    let bounds = size_new_segment(recording, media_duration, config);
    debug!(
        "no qualifying segment; creating [{:.2}, {:.2})",
        bounds.start_secs, bounds.end_secs
    );

    Ok(AttachmentDecision {
        target: AttachmentTarget::New { bounds },
        warning,
    })
}
