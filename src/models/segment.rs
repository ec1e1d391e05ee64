use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who produced a narration, ordered by editorial weight.
/// Coach commentary outranks staff, staff outranks members, and
/// AI-generated commentary ranks last.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    Coach,
    Staff,
    Member,
    Ai,
}

impl SourceType {
    /// Fixed rank table used for tie-breaks: coach=3, staff=2, member=1, ai=0.
    pub fn rank(&self) -> u8 {
        match self {
            SourceType::Coach => 3,
            SourceType::Staff => 2,
            SourceType::Member => 1,
            SourceType::Ai => 0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceType::Coach => "coach",
            SourceType::Staff => "staff",
            SourceType::Member => "member",
            SourceType::Ai => "ai",
        }
    }
}

/// A persisted time interval `[start, end)` over a media asset that
/// narrations attach to. Segments for the same asset are not required to be
/// disjoint: concurrent contributors may legitimately produce overlaps.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub id: String,
    pub media_asset_id: String,
    pub start_secs: f64,
    pub end_secs: f64,
    pub narration_count: i64,
    /// Highest-ranked source among attached narrations. Never lowered.
    pub top_source: SourceType,
    pub created_at: DateTime<Utc>,
}

impl Segment {
    pub fn duration_secs(&self) -> f64 {
        self.end_secs - self.start_secs
    }

    /// Half-open containment: `start <= t < end`.
    pub fn contains(&self, t: f64) -> bool {
        self.start_secs <= t && t < self.end_secs
    }

    /// Intersection length in seconds with the range `[rs, re)`.
    pub fn overlap_seconds(&self, rs: f64, re: f64) -> f64 {
        (re.min(self.end_secs) - rs.max(self.start_secs)).max(0.0)
    }
}

/// A single piece of commentary attached to exactly one segment. Narrations
/// are never time-ranged on their own; their effective range is the segment's.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Narration {
    pub id: String,
    pub segment_id: String,
    pub source: SourceType,
    pub transcript: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(start: f64, end: f64) -> Segment {
        Segment {
            id: "s1".into(),
            media_asset_id: "m1".into(),
            start_secs: start,
            end_secs: end,
            narration_count: 0,
            top_source: SourceType::Member,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn containment_is_half_open() {
        let seg = segment(10.0, 20.0);
        assert!(seg.contains(10.0));
        assert!(seg.contains(19.999));
        assert!(!seg.contains(20.0));
        assert!(!seg.contains(9.999));
    }

    #[test]
    fn overlap_clamps_to_zero() {
        let seg = segment(10.0, 20.0);
        assert_eq!(seg.overlap_seconds(0.0, 5.0), 0.0);
        assert_eq!(seg.overlap_seconds(15.0, 25.0), 5.0);
        assert_eq!(seg.overlap_seconds(0.0, 100.0), 10.0);
    }

    #[test]
    fn source_ranks_are_ordered() {
        assert!(SourceType::Coach.rank() > SourceType::Staff.rank());
        assert!(SourceType::Staff.rank() > SourceType::Member.rank());
        assert!(SourceType::Member.rank() > SourceType::Ai.rank());
    }
}
