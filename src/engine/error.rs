use thiserror::Error;

/// Errors raised synchronously by the engine's pure functions. None are
/// retried internally; retry policy belongs to the persistence layer around
/// the commit step.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Non-positive duration or negative start. The 0.5 s capture floor is an
    /// upstream concern; this only rejects inputs that would break the math.
    #[error("invalid recording: {0}")]
    InvalidRecording(String),

    /// Declared media duration is not a positive number. Callers fall back to
    /// treating the duration as unknown rather than failing the operation.
    #[error("declared media duration {0} is not positive; treating as unknown")]
    InvalidMediaDuration(f64),

    /// Explicit "add to this segment" target is absent from the snapshot, so
    /// the UI can fall back to normal resolution or report failure.
    #[error("explicit target segment {0} is not in the snapshot")]
    AmbiguousExplicitTarget(String),
}
