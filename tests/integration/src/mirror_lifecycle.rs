//! End-to-end mirror lifecycle across simulated process restarts
//!
//! Each pass constructs a fresh runner and reloads the ledger from
//! disk, so these tests exercise the durable state rather than
//! anything held in memory.

use std::sync::Arc;

use mirror_core::{Ledger, MirrorConfig, SnapshotRunner, check_drift};
use mirror_remote::EntityId;
use mirror_store::DocumentStore;
use mirror_test_utils::{ScriptedCatalog, TempMirror};
use serde_json::json;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn id(raw: &str) -> EntityId {
    EntityId::new(raw).unwrap()
}

fn runner_for(mirror: &TempMirror, catalog: &Arc<ScriptedCatalog>) -> SnapshotRunner {
    let config = MirrorConfig {
        history: false,
        ..MirrorConfig::default()
    };
    SnapshotRunner::new(mirror.layout().clone(), config, catalog.clone())
}

async fn run_fresh_pass(
    mirror: &TempMirror,
    catalog: &Arc<ScriptedCatalog>,
) -> (mirror_core::PassReport, Ledger) {
    let runner = runner_for(mirror, catalog);
    let mut ledger = runner.load_ledger().unwrap();
    let report = runner.run_pass(&mut ledger).await.unwrap();
    (report, ledger)
}

#[tokio::test]
async fn versioning_survives_restarts() {
    init_tracing();
    let mirror = TempMirror::new();
    let catalog = Arc::new(ScriptedCatalog::new());
    catalog.put("AWS::A::A", json!({"v": 1}));
    catalog.put("AWS::B::B", json!({"v": 1}));

    let (pass1, _) = run_fresh_pass(&mirror, &catalog).await;

    // B disappears, A changes; a brand-new runner picks up the ledger
    catalog.put("AWS::A::A", json!({"v": 2}));
    catalog.remove("AWS::B::B");
    let (pass2, ledger) = run_fresh_pass(&mirror, &catalog).await;

    assert_eq!(ledger.records().len(), 1);
    let a = ledger.get(&id("AWS::A::A")).unwrap();
    assert_eq!(a.first_seen, pass1.started_at);
    assert_eq!(a.last_updated, pass2.started_at);

    let b = &ledger.removed()[&id("AWS::B::B")];
    assert_eq!(b[0].record.first_seen, pass1.started_at);
    assert_eq!(b[0].record.last_updated, pass1.started_at);
    assert_eq!(b[0].removed_date, pass2.started_at);

    // A third restart sees the same durable state
    let reloaded = runner_for(&mirror, &catalog).load_ledger().unwrap();
    assert_eq!(reloaded.records(), ledger.records());
    assert_eq!(reloaded.removed(), ledger.removed());
}

#[tokio::test]
async fn blobs_on_disk_are_canonical_and_consistent_with_the_ledger() {
    init_tracing();
    let mirror = TempMirror::new();
    let catalog = Arc::new(ScriptedCatalog::new());
    catalog.put("AWS::S3::Bucket", json!({"b": 1, "a": {"z": 1, "y": 2}}));

    let (_, ledger) = run_fresh_pass(&mirror, &catalog).await;

    let text = std::fs::read_to_string(
        mirror
            .layout()
            .root()
            .join("schemas/AWS--S3--Bucket.json"),
    )
    .unwrap();
    assert_eq!(
        text,
        "{\n  \"a\": {\n    \"y\": 2,\n    \"z\": 1\n  },\n  \"b\": 1\n}\n"
    );

    let store = DocumentStore::new(mirror.layout().schemas_dir());
    assert!(check_drift(&ledger, &store).is_healthy());
}

#[tokio::test]
async fn flapping_entity_accumulates_removal_archive() {
    init_tracing();
    let mirror = TempMirror::new();
    let catalog = Arc::new(ScriptedCatalog::new());

    catalog.put("AWS::S3::Bucket", json!({"v": 1}));
    run_fresh_pass(&mirror, &catalog).await;

    catalog.remove("AWS::S3::Bucket");
    run_fresh_pass(&mirror, &catalog).await;

    catalog.put("AWS::S3::Bucket", json!({"v": 2}));
    run_fresh_pass(&mirror, &catalog).await;

    catalog.remove("AWS::S3::Bucket");
    let (_, ledger) = run_fresh_pass(&mirror, &catalog).await;

    let archive = &ledger.removed()[&id("AWS::S3::Bucket")];
    assert_eq!(archive.len(), 2, "every removal is archived, none replaced");
    assert!(archive[0].removed_date < archive[1].removed_date);
    assert!(ledger.get(&id("AWS::S3::Bucket")).is_none());
}

#[tokio::test]
async fn failed_entities_are_excluded_from_reconciliation_across_restarts() {
    init_tracing();
    let mirror = TempMirror::new();
    let catalog = Arc::new(ScriptedCatalog::new());
    catalog.put("AWS::A::A", json!({"v": 1}));
    catalog.put("AWS::B::B", json!({"v": 1}));

    run_fresh_pass(&mirror, &catalog).await;

    catalog.fail_fetch("AWS::B::B");
    let (report, ledger) = run_fresh_pass(&mirror, &catalog).await;
    assert_eq!(report.errors.len(), 1);
    assert!(ledger.get(&id("AWS::B::B")).is_some());

    // Once the failure clears, the entity is simply unchanged
    catalog.clear_fetch_failures();
    let (recovered, ledger) = run_fresh_pass(&mirror, &catalog).await;
    assert_eq!(recovered.unchanged, 2);
    assert!(ledger.removed().is_empty());
}
