//! History-log derivation over real passes
//!
//! The ledger file stays authoritative for version timestamps; these
//! tests confirm the complementary git log records exactly one entry
//! per changing pass and that per-entity timelines derive correctly.

use std::sync::Arc;

use mirror_core::{MirrorConfig, SnapshotRunner};
use mirror_history::HistoryLog;
use mirror_test_utils::{ScriptedCatalog, TempMirror};
use serde_json::json;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

#[tokio::test]
async fn one_entry_per_changing_pass() {
    init_tracing();
    let mirror = TempMirror::new();
    let catalog = Arc::new(ScriptedCatalog::new());
    catalog.put("AWS::S3::Bucket", json!({"v": 1}));
    catalog.put("AWS::SQS::Queue", json!({"v": 1}));

    let runner = SnapshotRunner::new(
        mirror.layout().clone(),
        MirrorConfig::default(),
        catalog.clone(),
    );
    let mut ledger = runner.load_ledger().unwrap();

    let pass1 = runner.run_pass(&mut ledger).await.unwrap();
    let pass2 = runner.run_pass(&mut ledger).await.unwrap();
    catalog.put("AWS::S3::Bucket", json!({"v": 2}));
    let pass3 = runner.run_pass(&mut ledger).await.unwrap();

    assert!(pass1.commit.is_some());
    assert_eq!(pass2.commit, None);
    assert!(pass3.commit.is_some());

    let log = runner.history_log().unwrap();
    let bucket = mirror.layout().blob_rel_path("AWS::S3::Bucket");
    let queue = mirror.layout().blob_rel_path("AWS::SQS::Queue");

    // Bucket changed in pass 1 and pass 3; queue only in pass 1
    let bucket_timeline = log.timeline(&bucket).unwrap();
    assert_eq!(bucket_timeline.len(), 2);
    assert_eq!(bucket_timeline[0].commit, pass1.commit.clone().unwrap());
    assert_eq!(bucket_timeline[1].commit, pass3.commit.clone().unwrap());

    assert_eq!(log.count(&queue).unwrap(), 1);
    assert_eq!(log.first_seen(&bucket).unwrap(), Some(bucket_timeline[0].timestamp));
    assert_eq!(log.latest(&bucket).unwrap(), Some(bucket_timeline[1].timestamp));
}

#[tokio::test]
async fn path_history_summarizes_an_entity() {
    init_tracing();
    let mirror = TempMirror::new();
    let catalog = Arc::new(ScriptedCatalog::new());
    catalog.put("AWS::S3::Bucket", json!({"v": 0}));

    let runner = SnapshotRunner::new(
        mirror.layout().clone(),
        MirrorConfig::default(),
        catalog.clone(),
    );
    let mut ledger = runner.load_ledger().unwrap();
    runner.run_pass(&mut ledger).await.unwrap();

    for version in 1..=6 {
        catalog.put("AWS::S3::Bucket", json!({"v": version}));
        runner.run_pass(&mut ledger).await.unwrap();
    }

    let log = runner.history_log().unwrap();
    let rel = mirror.layout().blob_rel_path("AWS::S3::Bucket");
    let history = log.path_history(&rel).unwrap();

    assert_eq!(history.total_updates, 7);
    assert_eq!(history.recent.len(), 5, "summary keeps the five most recent");
    assert_eq!(history.latest_update, log.latest(&rel).unwrap());
}

#[tokio::test]
async fn timelines_survive_reopening_the_log() {
    init_tracing();
    let mirror = TempMirror::new();
    let catalog = Arc::new(ScriptedCatalog::new());
    catalog.put("AWS::S3::Bucket", json!({"v": 1}));

    let runner = SnapshotRunner::new(
        mirror.layout().clone(),
        MirrorConfig::default(),
        catalog.clone(),
    );
    let mut ledger = runner.load_ledger().unwrap();
    runner.run_pass(&mut ledger).await.unwrap();
    catalog.put("AWS::S3::Bucket", json!({"v": 2}));
    runner.run_pass(&mut ledger).await.unwrap();

    let rel = mirror.layout().blob_rel_path("AWS::S3::Bucket");
    let before = runner.history_log().unwrap().timeline(&rel).unwrap();

    let reopened = HistoryLog::init(mirror.layout().root()).unwrap();
    let after = reopened.timeline(&rel).unwrap();

    assert_eq!(before, after);
    assert_eq!(after.len(), 2);
}

#[tokio::test]
async fn disabled_history_appends_nothing() {
    init_tracing();
    let mirror = TempMirror::new();
    let catalog = Arc::new(ScriptedCatalog::new());
    catalog.put("AWS::S3::Bucket", json!({"v": 1}));

    let config = MirrorConfig {
        history: false,
        ..MirrorConfig::default()
    };
    let runner = SnapshotRunner::new(
        mirror.layout().clone(),
        config,
        catalog.clone(),
    );
    let mut ledger = runner.load_ledger().unwrap();
    let report = runner.run_pass(&mut ledger).await.unwrap();

    assert_eq!(report.commit, None);
    assert!(!mirror.layout().root().join(".git").exists());
}
