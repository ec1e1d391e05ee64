use serde::{Deserialize, Serialize};

use crate::engine::EngineError;

/// An ephemeral capture event handed to the resolver. Not persisted by this
/// crate; the capture collaborator owns its lifecycle. Times are video-relative
/// seconds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recording {
    pub start_secs: f64,
    pub duration_secs: f64,
}

impl Recording {
    pub fn new(start_secs: f64, duration_secs: f64) -> Self {
        Self {
            start_secs,
            duration_secs,
        }
    }

    pub fn end_secs(&self) -> f64 {
        self.start_secs + self.duration_secs
    }

    /// Upstream capture enforces a 0.5 s minimum duration; the engine only
    /// guards against inputs that would break its math.
    pub fn validate(&self) -> Result<(), EngineError> {
        if !self.duration_secs.is_finite() || self.duration_secs <= 0.0 {
            return Err(EngineError::InvalidRecording(format!(
                "duration {} must be a positive number of seconds",
                self.duration_secs
            )));
        }
        if !self.start_secs.is_finite() || self.start_secs < 0.0 {
            return Err(EngineError::InvalidRecording(format!(
                "start {} must be a non-negative number of seconds",
                self.start_secs
            )));
        }
        Ok(())
    }
}
