use chrono::Utc;
use tempfile::TempDir;
use uuid::Uuid;

use sideline::{
    Database, MediaAssetInfo, NarrationService, Recording, ResolveWarning, Segment, SourceType,
};

struct Harness {
    // Held so the database file outlives the service.
    _dir: TempDir,
    db: Database,
    service: NarrationService,
}

fn harness() -> Harness {
    let _ = env_logger::builder().is_test(true).try_init();
    let dir = tempfile::tempdir().expect("create temp dir");
    let db = Database::new(dir.path().join("sideline.db")).expect("open database");
    let service = NarrationService::new(db.clone());
    Harness {
        _dir: dir,
        db,
        service,
    }
}

async fn seed_segment(
    h: &Harness,
    media: &MediaAssetInfo,
    start: f64,
    end: f64,
    source: SourceType,
) -> Segment {
    h.db.upsert_media_asset(media).await.expect("upsert media");
    let segment = Segment {
        id: Uuid::new_v4().to_string(),
        media_asset_id: media.id.clone(),
        start_secs: start,
        end_secs: end,
        narration_count: 0,
        top_source: source,
        created_at: Utc::now(),
    };
    h.db.insert_segment(&segment).await.expect("insert segment");
    segment
}

#[tokio::test]
async fn thin_overlap_spawns_a_buffered_segment() {
    let h = harness();
    let media = MediaAssetInfo::new("match-1", Some(600.0));
    let existing = seed_segment(&h, &media, 100.0, 130.0, SourceType::Member).await;

    // Overlap [128, 130) = 2s < required 5s, so a new segment is sized from
    // (128, 138) with buffers to [125, 143).
    let report = h
        .service
        .record_narration(
            &media,
            Recording::new(128.0, 10.0),
            SourceType::Member,
            Some("great counterattack".into()),
            None,
        )
        .await
        .expect("record narration");

    assert!(report.created);
    assert!(!report.extended);
    assert_eq!(report.warning, None);
    assert_ne!(report.segment_id, existing.id);

    let segments = h
        .db
        .get_segments_for_media_asset(&media.id)
        .await
        .expect("list segments");
    assert_eq!(segments.len(), 2);

    let created = segments
        .iter()
        .find(|s| s.id == report.segment_id)
        .expect("created segment persisted");
    assert_eq!(created.start_secs, 125.0);
    assert_eq!(created.end_secs, 143.0);
    assert_eq!(created.narration_count, 1);

    let narrations = h
        .db
        .get_narrations_for_segment(&created.id)
        .await
        .expect("list narrations");
    assert_eq!(narrations.len(), 1);
    assert_eq!(
        narrations[0].transcript.as_deref(),
        Some("great counterattack")
    );
}

#[tokio::test]
async fn attach_bumps_count_and_raises_top_source() {
    let h = harness();
    let media = MediaAssetInfo::new("match-2", Some(600.0));
    let segment = seed_segment(&h, &media, 100.0, 130.0, SourceType::Member).await;

    let report = h
        .service
        .record_narration(
            &media,
            Recording::new(110.0, 8.0),
            SourceType::Coach,
            None,
            None,
        )
        .await
        .expect("coach narration");
    assert!(!report.created);
    assert_eq!(report.segment_id, segment.id);

    // A lower-ranked follow-up never lowers the top source.
    h.service
        .record_narration(
            &media,
            Recording::new(112.0, 8.0),
            SourceType::Ai,
            None,
            None,
        )
        .await
        .expect("ai narration");

    let segments = h
        .db
        .get_segments_for_media_asset(&media.id)
        .await
        .expect("list segments");
    assert_eq!(segments.len(), 1);
    assert_eq!(segments[0].narration_count, 2);
    assert_eq!(segments[0].top_source, SourceType::Coach);
}

#[tokio::test]
async fn trailing_recording_extends_within_the_cap() {
    let h = harness();
    let media = MediaAssetInfo::new("match-3", Some(600.0));
    let segment = seed_segment(&h, &media, 100.0, 130.0, SourceType::Staff).await;

    // Overlap 8s qualifies; the recording runs 2s past the end.
    let report = h
        .service
        .record_narration(
            &media,
            Recording::new(122.0, 10.0),
            SourceType::Staff,
            None,
            None,
        )
        .await
        .expect("record narration");

    assert!(!report.created);
    assert!(report.extended);
    assert_eq!(report.segment_id, segment.id);

    let segments = h
        .db
        .get_segments_for_media_asset(&media.id)
        .await
        .expect("list segments");
    assert_eq!(segments[0].end_secs, 132.0);

    // A stale extension request can never shrink the segment.
    h.db.extend_segment_end(&segment.id, 110.0)
        .await
        .expect("extend with stale end");
    let segments = h
        .db
        .get_segments_for_media_asset(&media.id)
        .await
        .expect("list segments");
    assert_eq!(segments[0].end_secs, 132.0);
}

#[tokio::test]
async fn explicit_target_attaches_unconditionally() {
    let h = harness();
    let media = MediaAssetInfo::new("match-4", Some(600.0));
    let segment = seed_segment(&h, &media, 100.0, 130.0, SourceType::Member).await;

    // Zero overlap with the target, but the explicit add wins and extends.
    let report = h
        .service
        .record_narration(
            &media,
            Recording::new(135.0, 4.0),
            SourceType::Member,
            None,
            Some(&segment.id),
        )
        .await
        .expect("explicit narration");
    assert!(!report.created);
    assert!(report.extended);
    assert_eq!(report.segment_id, segment.id);

    let err = h
        .service
        .record_narration(
            &media,
            Recording::new(135.0, 4.0),
            SourceType::Member,
            None,
            Some("no-such-segment"),
        )
        .await
        .expect_err("unknown target must fail");
    assert!(err.to_string().contains("no-such-segment"));
}

#[tokio::test]
async fn delete_is_refused_while_narrations_remain() {
    let h = harness();
    let media = MediaAssetInfo::new("match-5", None);
    let empty = seed_segment(&h, &media, 0.0, 20.0, SourceType::Member).await;
    let occupied = seed_segment(&h, &media, 40.0, 60.0, SourceType::Member).await;

    h.service
        .record_narration(
            &media,
            Recording::new(45.0, 10.0),
            SourceType::Member,
            None,
            None,
        )
        .await
        .expect("record narration");

    let err = h
        .service
        .delete_segment(&occupied.id)
        .await
        .expect_err("protected segment");
    assert!(err.to_string().contains("narrations"));

    h.service
        .delete_segment(&empty.id)
        .await
        .expect("delete empty segment");
    let segments = h
        .db
        .get_segments_for_media_asset(&media.id)
        .await
        .expect("list segments");
    assert_eq!(segments.len(), 1);
    assert_eq!(segments[0].id, occupied.id);
}

#[tokio::test]
async fn playback_highlights_the_tightest_segment() {
    let h = harness();
    let media = MediaAssetInfo::new("match-6", Some(600.0));
    let wide = seed_segment(&h, &media, 0.0, 60.0, SourceType::Member).await;
    let tight = seed_segment(&h, &media, 10.0, 20.0, SourceType::Member).await;

    let active = h
        .service
        .active_segment(&media.id, 15.0)
        .await
        .expect("locate");
    assert_eq!(active.expect("active segment").id, tight.id);

    let active = h
        .service
        .active_segment(&media.id, 30.0)
        .await
        .expect("locate");
    assert_eq!(active.expect("active segment").id, wide.id);

    let active = h
        .service
        .active_segment(&media.id, 300.0)
        .await
        .expect("locate");
    assert!(active.is_none());
}

#[tokio::test]
async fn report_serializes_for_the_ui_contract() {
    let h = harness();
    let media = MediaAssetInfo::new("match-7", Some(600.0));
    seed_segment(&h, &media, 100.0, 130.0, SourceType::Member).await;

    // Short recording mostly covered but under the absolute floor: the attach
    // fails and the advisory warning rides along in the report.
    let report = h
        .service
        .record_narration(
            &media,
            Recording::new(128.2, 2.0),
            SourceType::Member,
            None,
            None,
        )
        .await
        .expect("record narration");
    assert_eq!(report.warning, Some(ResolveWarning::HighOverlapNoAttach));

    let json = serde_json::to_value(&report).expect("serialize report");
    assert_eq!(json["created"], true);
    assert_eq!(json["extended"], false);
    assert_eq!(json["warning"], "high_overlap_no_attach");
    assert!(json["segmentId"].is_string());
}
