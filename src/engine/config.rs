/// Tunable constants for the timeline engine. Defaults match the product
/// contract; tests and experiments may override individual knobs.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Seconds of lead-in added before a new segment's first recording.
    pub pre_buffer_secs: f64,

    /// Seconds of tail added after a new segment's first recording.
    pub post_buffer_secs: f64,

    /// New-segment target length as a multiple of the recording duration.
    pub target_scale: f64,

    /// Target length clamp for new segments, in seconds.
    pub min_target_secs: f64,
    pub max_target_secs: f64,

    /// Absolute floor on the overlap needed to attach to an existing segment.
    pub min_overlap_secs: f64,

    /// Hard cap on how far one attach event may extend a segment's end.
    pub max_extension_secs: f64,

    /// Overlap ratio (overlap / recording duration) at or above which a
    /// failed attach surfaces an advisory warning.
    pub warn_overlap_ratio: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            pre_buffer_secs: 3.0,
            post_buffer_secs: 5.0,
            target_scale: 1.8,
            min_target_secs: 10.0,
            max_target_secs: 60.0,
            min_overlap_secs: 2.0,
            max_extension_secs: 6.0,
            warn_overlap_ratio: 0.8,
        }
    }
}
