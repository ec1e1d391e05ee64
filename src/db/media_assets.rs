use anyhow::Result;
use rusqlite::{params, OptionalExtension};

use crate::db::Database;
use crate::models::MediaAssetInfo;

impl Database {
    /// Register a media asset or refresh its known duration, e.g. once the
    /// upload pipeline finishes probing the file.
    pub async fn upsert_media_asset(&self, info: &MediaAssetInfo) -> Result<()> {
        let record = info.clone();
        self.execute(move |conn| {
            conn.execute(
                "INSERT INTO media_assets (id, duration_secs)
                 VALUES (?1, ?2)
                 ON CONFLICT(id) DO UPDATE SET duration_secs = excluded.duration_secs",
                params![record.id, record.duration_secs],
            )?;
            Ok(())
        })
        .await
    }

    pub async fn get_media_asset(&self, media_asset_id: &str) -> Result<Option<MediaAssetInfo>> {
        let media_asset_id = media_asset_id.to_string();
        self.execute(move |conn| {
            let info = conn
                .query_row(
                    "SELECT id, duration_secs FROM media_assets WHERE id = ?1",
                    params![media_asset_id],
                    |row| {
                        Ok(MediaAssetInfo {
                            id: row.get(0)?,
                            duration_secs: row.get(1)?,
                        })
                    },
                )
                .optional()?;
            Ok(info)
        })
        .await
    }
}
