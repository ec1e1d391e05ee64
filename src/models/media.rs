use serde::{Deserialize, Serialize};

/// Metadata for one match video. Duration may be unknown while the upload
/// pipeline is still probing the file; bounds computation then runs uncapped.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaAssetInfo {
    pub id: String,
    pub duration_secs: Option<f64>,
}

impl MediaAssetInfo {
    pub fn new(id: impl Into<String>, duration_secs: Option<f64>) -> Self {
        Self {
            id: id.into(),
            duration_secs,
        }
    }
}
