use anyhow::Result;
use chrono::Utc;
use log::info;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::Database;
use crate::engine::{
    locate_active_segment, resolve_attachment, AttachmentTarget, EngineConfig, ResolveWarning,
};
use crate::models::{MediaAssetInfo, Narration, Recording, Segment, SourceType};

/// Outcome of one committed narration, shaped for the UI layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveReport {
    pub segment_id: String,
    pub created: bool,
    pub extended: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<ResolveWarning>,
}

/// Binds the pure engine to the persistence collaborator: captures a fresh
/// snapshot, resolves, then commits the decision. The engine itself never
/// touches the database.
pub struct NarrationService {
    db: Database,
    config: EngineConfig,
}

impl NarrationService {
    pub fn new(db: Database) -> Self {
        Self::with_config(db, EngineConfig::default())
    }

    pub fn with_config(db: Database, config: EngineConfig) -> Self {
        Self { db, config }
    }

    /// Resolve where `recording`'s narration lands and commit the decision:
    /// either a new sized segment or an attach to (and possibly extension of)
    /// an existing one. `explicit_segment_id` is the "Add to this segment"
    /// action and bypasses the thresholds.
    pub async fn record_narration(
        &self,
        media: &MediaAssetInfo,
        recording: Recording,
        source: SourceType,
        transcript: Option<String>,
        explicit_segment_id: Option<&str>,
    ) -> Result<ResolveReport> {
        self.db.upsert_media_asset(media).await?;
        let snapshot = self.db.get_segments_for_media_asset(&media.id).await?;

        let decision = resolve_attachment(
            &recording,
            &snapshot,
            media.duration_secs,
            explicit_segment_id,
            &self.config,
        )?;

        let (segment_id, created, extended) = match &decision.target {
            AttachmentTarget::Existing {
                segment_id,
                new_end_secs,
            } => {
                if let Some(new_end) = new_end_secs {
                    self.db.extend_segment_end(segment_id, *new_end).await?;
                }
                (segment_id.clone(), false, new_end_secs.is_some())
            }
            AttachmentTarget::New { bounds } => {
                let segment = Segment {
                    id: Uuid::new_v4().to_string(),
                    media_asset_id: media.id.clone(),
                    start_secs: bounds.start_secs,
                    end_secs: bounds.end_secs,
                    narration_count: 0,
                    top_source: source,
                    created_at: Utc::now(),
                };
                self.db.insert_segment(&segment).await?;
                (segment.id, true, false)
            }
        };

        let narration = Narration {
            id: Uuid::new_v4().to_string(),
            segment_id: segment_id.clone(),
            source,
            transcript,
            created_at: Utc::now(),
        };
        self.db.attach_narration(&narration).await?;

        info!(
            "narration {} on media {}: segment {} (created={created}, extended={extended})",
            narration.id, media.id, segment_id
        );

        Ok(ResolveReport {
            segment_id,
            created,
            extended,
            warning: decision.warning,
        })
    }

    /// The segment to highlight as "Now" at playback time `t`, if any.
    pub async fn active_segment(&self, media_asset_id: &str, t: f64) -> Result<Option<Segment>> {
        let snapshot = self.db.get_segments_for_media_asset(media_asset_id).await?;
        Ok(locate_active_segment(&snapshot, t).cloned())
    }

    /// Privileged cleanup of a narration-free segment.
    pub async fn delete_segment(&self, segment_id: &str) -> Result<()> {
        self.db.delete_segment(segment_id).await
    }
}
