use anyhow::{bail, Context, Result};
use rusqlite::{params, OptionalExtension, Row};

use crate::db::{parse_datetime, parse_source, Database};
use crate::models::Narration;

fn row_to_narration(row: &Row) -> Result<Narration> {
    let created_at_str: String = row.get("created_at")?;
    let source_str: String = row.get("source")?;

    Ok(Narration {
        id: row.get("id")?,
        segment_id: row.get("segment_id")?,
        source: parse_source(&source_str)?,
        transcript: row.get("transcript")?,
        created_at: parse_datetime(&created_at_str, "created_at")?,
    })
}

impl Database {
    /// Attach a narration to its segment in one transaction: insert the row,
    /// bump the segment's narration count, and raise its top source when the
    /// newcomer outranks it. The top source is never lowered.
    pub async fn attach_narration(&self, narration: &Narration) -> Result<()> {
        let record = narration.clone();
        self.execute(move |conn| {
            let tx = conn.transaction()?;

            let current_source: Option<String> = tx
                .query_row(
                    "SELECT top_source FROM segments WHERE id = ?1",
                    params![record.segment_id],
                    |row| row.get(0),
                )
                .optional()?;
            let Some(current_source) = current_source else {
                bail!("segment {} not found", record.segment_id);
            };

            let current = parse_source(&current_source)?;
            let top_source = if record.source.rank() > current.rank() {
                record.source
            } else {
                current
            };

            tx.execute(
                "INSERT INTO narrations (id, segment_id, source, transcript, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    record.id,
                    record.segment_id,
                    record.source.as_str(),
                    record.transcript,
                    record.created_at.to_rfc3339(),
                ],
            )
            .with_context(|| "failed to insert narration")?;

            tx.execute(
                "UPDATE segments
                 SET narration_count = narration_count + 1,
                     top_source = ?1
                 WHERE id = ?2",
                params![top_source.as_str(), record.segment_id],
            )
            .with_context(|| "failed to update segment narration aggregates")?;

            tx.commit()?;
            Ok(())
        })
        .await
    }

    pub async fn get_narrations_for_segment(&self, segment_id: &str) -> Result<Vec<Narration>> {
        let segment_id = segment_id.to_string();
        self.execute(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, segment_id, source, transcript, created_at
                 FROM narrations
                 WHERE segment_id = ?1
                 ORDER BY created_at ASC",
            )?;

            let mut rows = stmt.query(params![segment_id])?;
            let mut narrations = Vec::new();
            while let Some(row) = rows.next()? {
                narrations.push(row_to_narration(row)?);
            }

            Ok(narrations)
        })
        .await
    }
}
