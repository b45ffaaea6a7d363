//! Persistence tests for the Ledger

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use mirror_core::{Ledger, MetadataPolicy};
use mirror_fs::MirrorLayout;
use mirror_remote::{EntityId, ProviderMetadata};
use pretty_assertions::assert_eq;
use tempfile::tempdir;

fn id(raw: &str) -> EntityId {
    EntityId::new(raw).unwrap()
}

fn t(raw: &str) -> DateTime<Utc> {
    raw.parse().unwrap()
}

#[test]
fn load_on_first_run_is_empty() {
    let dir = tempdir().unwrap();
    let layout = MirrorLayout::new(dir.path());

    let ledger = Ledger::load(&layout, MetadataPolicy::AlwaysOverwrite).unwrap();

    assert!(ledger.records().is_empty());
    assert!(ledger.removed().is_empty());
}

#[test]
fn full_state_survives_save_and_load() {
    let dir = tempdir().unwrap();
    let layout = MirrorLayout::new(dir.path());
    layout.ensure().unwrap();

    let mut ledger = Ledger::new(MetadataPolicy::AlwaysOverwrite);
    let metadata = ProviderMetadata {
        time_created: Some(t("2020-05-01T00:00:00Z")),
        deprecation_status: Some("LIVE".to_string()),
    };
    ledger.record_observation(
        &id("AWS::S3::Bucket"),
        true,
        "sha256:v1".into(),
        t("2026-03-01T00:00:00Z"),
        &metadata,
    );
    ledger.record_observation(
        &id("AWS::SQS::Queue"),
        true,
        "sha256:v1".into(),
        t("2026-03-01T00:00:00Z"),
        &ProviderMetadata::default(),
    );
    let current: BTreeSet<EntityId> = [id("AWS::S3::Bucket")].into_iter().collect();
    ledger.reconcile_removals(&current, t("2026-03-02T00:00:00Z"));

    ledger.save(&layout).unwrap();
    let loaded = Ledger::load(&layout, MetadataPolicy::AlwaysOverwrite).unwrap();

    assert_eq!(loaded.records(), ledger.records());
    assert_eq!(loaded.removed(), ledger.removed());

    let record = loaded.get(&id("AWS::S3::Bucket")).unwrap();
    assert_eq!(record.time_created, metadata.time_created);
    assert_eq!(record.deprecation_status.as_deref(), Some("LIVE"));
}

#[test]
fn ledger_file_keys_are_sorted() {
    let dir = tempdir().unwrap();
    let layout = MirrorLayout::new(dir.path());
    layout.ensure().unwrap();

    let mut ledger = Ledger::new(MetadataPolicy::AlwaysOverwrite);
    for raw in ["AWS::Z::Z", "AWS::A::A", "AWS::M::M"] {
        ledger.record_observation(
            &id(raw),
            true,
            "sha256:x".into(),
            t("2026-03-01T00:00:00Z"),
            &ProviderMetadata::default(),
        );
    }
    ledger.save(&layout).unwrap();

    let raw = std::fs::read_to_string(layout.version_file()).unwrap();
    let a = raw.find("AWS::A::A").unwrap();
    let m = raw.find("AWS::M::M").unwrap();
    let z = raw.find("AWS::Z::Z").unwrap();
    assert!(a < m && m < z, "serialized ids must be in stable sorted order");
}

#[test]
fn absent_metadata_is_not_serialized_as_null() {
    let dir = tempdir().unwrap();
    let layout = MirrorLayout::new(dir.path());
    layout.ensure().unwrap();

    let mut ledger = Ledger::new(MetadataPolicy::AlwaysOverwrite);
    ledger.record_observation(
        &id("AWS::S3::Bucket"),
        true,
        "sha256:x".into(),
        t("2026-03-01T00:00:00Z"),
        &ProviderMetadata::default(),
    );
    ledger.save(&layout).unwrap();

    let raw = std::fs::read_to_string(layout.version_file()).unwrap();
    assert!(!raw.contains("time_created"));
    assert!(!raw.contains("deprecation_status"));
    assert!(!raw.contains("null"));
}
