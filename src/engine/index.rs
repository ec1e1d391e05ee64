use crate::models::Segment;

/// Pure range queries over a snapshot of one media asset's segments.
///
/// The snapshot must be captured immediately before a resolution call and not
/// mutated underneath it mid-decision. The engine is snapshot-consistent, not
/// globally serialized: two contributors resolving against stale snapshots may
/// produce overlapping segments, which is accepted and cleaned up manually.
pub struct IntervalIndex<'a> {
    segments: &'a [Segment],
}

impl<'a> IntervalIndex<'a> {
    pub fn new(segments: &'a [Segment]) -> Self {
        Self { segments }
    }

    /// Every segment with strictly positive overlap against `[rs, re)`.
    pub fn overlapping(&self, rs: f64, re: f64) -> Vec<&'a Segment> {
        self.segments
            .iter()
            .filter(|seg| seg.overlap_seconds(rs, re) > 0.0)
            .collect()
    }

    /// Every segment with `start <= t < end`.
    pub fn containing(&self, t: f64) -> Vec<&'a Segment> {
        self.segments.iter().filter(|seg| seg.contains(t)).collect()
    }
}
