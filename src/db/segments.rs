use anyhow::{bail, Context, Result};
use rusqlite::{params, OptionalExtension, Row};

use crate::db::{parse_datetime, parse_source, Database};
use crate::models::Segment;

fn row_to_segment(row: &Row) -> Result<Segment> {
    let created_at_str: String = row.get("created_at")?;
    let source_str: String = row.get("top_source")?;

    Ok(Segment {
        id: row.get("id")?,
        media_asset_id: row.get("media_asset_id")?,
        start_secs: row.get("start_secs")?,
        end_secs: row.get("end_secs")?,
        narration_count: row.get("narration_count")?,
        top_source: parse_source(&source_str)?,
        created_at: parse_datetime(&created_at_str, "created_at")?,
    })
}

impl Database {
    pub async fn insert_segment(&self, segment: &Segment) -> Result<()> {
        let record = segment.clone();
        self.execute(move |conn| {
            conn.execute(
                "INSERT INTO segments (
                    id,
                    media_asset_id,
                    start_secs,
                    end_secs,
                    narration_count,
                    top_source,
                    created_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    record.id,
                    record.media_asset_id,
                    record.start_secs,
                    record.end_secs,
                    record.narration_count,
                    record.top_source.as_str(),
                    record.created_at.to_rfc3339(),
                ],
            )
            .with_context(|| "failed to insert segment")?;
            Ok(())
        })
        .await
    }

    /// Snapshot of every segment for one media asset, ordered by start time.
    /// Callers capture this immediately before a resolution and treat it as
    /// immutable for the duration of the decision.
    pub async fn get_segments_for_media_asset(&self, media_asset_id: &str) -> Result<Vec<Segment>> {
        let media_asset_id = media_asset_id.to_string();
        self.execute(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT
                    id,
                    media_asset_id,
                    start_secs,
                    end_secs,
                    narration_count,
                    top_source,
                    created_at
                FROM segments
                WHERE media_asset_id = ?1
                ORDER BY start_secs ASC",
            )?;

            let mut rows = stmt.query(params![media_asset_id])?;
            let mut segments = Vec::new();
            while let Some(row) = rows.next()? {
                segments.push(row_to_segment(row)?);
            }

            Ok(segments)
        })
        .await
    }

    /// Grow a segment's end boundary. The guard in SQL means a stale caller
    /// can never shrink a segment.
    pub async fn extend_segment_end(&self, segment_id: &str, new_end_secs: f64) -> Result<()> {
        let segment_id = segment_id.to_string();
        self.execute(move |conn| {
            let updated = conn
                .execute(
                    "UPDATE segments
                     SET end_secs = MAX(end_secs, ?1)
                     WHERE id = ?2",
                    params![new_end_secs, segment_id],
                )
                .with_context(|| "failed to extend segment")?;
            if updated == 0 {
                bail!("segment {segment_id} not found");
            }
            Ok(())
        })
        .await
    }

    /// Privileged manual cleanup. Segments with narrations are protected;
    /// the delete is refused rather than cascading.
    pub async fn delete_segment(&self, segment_id: &str) -> Result<()> {
        let segment_id = segment_id.to_string();
        self.execute(move |conn| {
            let tx = conn.transaction()?;

            let narration_count: Option<i64> = tx
                .query_row(
                    "SELECT narration_count FROM segments WHERE id = ?1",
                    params![segment_id],
                    |row| row.get(0),
                )
                .optional()?;

            match narration_count {
                None => bail!("segment {segment_id} not found"),
                Some(count) if count > 0 => {
                    bail!("segment {segment_id} still has {count} narrations")
                }
                Some(_) => {
                    tx.execute("DELETE FROM segments WHERE id = ?1", params![segment_id])?;
                }
            }

            tx.commit()?;
            Ok(())
        })
        .await
    }
}
