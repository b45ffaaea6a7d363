//! SnapshotRunner implementation

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::task::JoinSet;
use uuid::Uuid;

use mirror_fs::MirrorLayout;
use mirror_history::HistoryLog;
use mirror_remote::{CatalogClient, EntityId, FetchedEntity};
use mirror_store::{DiffStats, Document, DocumentStore};

use crate::config::MirrorConfig;
use crate::ledger::Ledger;
use crate::{Error, Result};

use super::report::PassReport;

/// Runs full synchronization passes against one mirror root.
///
/// Single-writer: one pass runs to completion before another may
/// begin. Within a pass, fetches run on a bounded worker pool; ledger
/// mutation happens only on the join side, a single-threaded
/// aggregation step.
pub struct SnapshotRunner {
    layout: MirrorLayout,
    config: MirrorConfig,
    store: DocumentStore,
    client: Arc<dyn CatalogClient>,
}

/// Working state of one pass.
struct PassState {
    report: PassReport,
    /// Entities fetched, stored, and recorded this pass
    observed: BTreeSet<EntityId>,
    /// Entities that failed transiently: their presence is
    /// indeterminate this pass, so they must not be archived
    skipped: BTreeSet<EntityId>,
}

impl PassState {
    fn new(pass_id: Uuid, started_at: DateTime<Utc>) -> Self {
        Self {
            report: PassReport::new(pass_id, started_at),
            observed: BTreeSet::new(),
            skipped: BTreeSet::new(),
        }
    }

    /// The ids whose presence this pass established; records outside
    /// this set are removal candidates.
    fn retained(self) -> (PassReport, BTreeSet<EntityId>) {
        let mut retained = self.observed;
        retained.extend(self.skipped);
        (self.report, retained)
    }
}

impl SnapshotRunner {
    pub fn new(layout: MirrorLayout, config: MirrorConfig, client: Arc<dyn CatalogClient>) -> Self {
        let store = DocumentStore::new(layout.schemas_dir());
        Self {
            layout,
            config,
            store,
            client,
        }
    }

    pub fn layout(&self) -> &MirrorLayout {
        &self.layout
    }

    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    /// Load the mirror's ledger, or start empty on first run.
    pub fn load_ledger(&self) -> Result<Ledger> {
        Ledger::load(&self.layout, self.config.metadata_policy)
    }

    /// Open the mirror's history log.
    ///
    /// Only meaningful when `history` is enabled in the configuration;
    /// callers use it to derive per-entity change timelines.
    pub fn history_log(&self) -> Result<HistoryLog> {
        Ok(HistoryLog::init(self.layout.root())?)
    }

    /// Run one full synchronization pass.
    ///
    /// Enumerates the catalog, fetches every entity with a bounded
    /// worker pool, stores blobs and folds observations into `ledger`,
    /// reconciles removals, persists the ledger, and appends one
    /// history entry when content changed. Removal detection runs only
    /// after the full fetch loop and never touches entities that
    /// failed transiently.
    ///
    /// # Errors
    ///
    /// Fatal errors are enumeration failure (nothing is touched) and
    /// ledger persist failure (durable state stays at the previous
    /// pass). Per-entity failures are recorded in the report and never
    /// abort the pass.
    pub async fn run_pass(&self, ledger: &mut Ledger) -> Result<PassReport> {
        let pass_id = Uuid::new_v4();
        let started_at = Utc::now();

        self.layout.ensure()?;

        let mut summaries =
            self.client
                .list_entities()
                .await
                .map_err(|e| Error::EnumerationFailed {
                    message: e.to_string(),
                })?;

        if let Some(prefix) = &self.config.prefix_filter {
            summaries.retain(|summary| summary.id.as_str().starts_with(prefix));
        }

        tracing::info!(
            %pass_id,
            entities = summaries.len(),
            "Starting synchronization pass"
        );

        let mut state = PassState::new(pass_id, started_at);

        let timeout = self.config.fetch_timeout();
        let workers = self.config.fetch_workers.max(1);
        let mut pending = summaries.into_iter();
        let mut inflight: JoinSet<(EntityId, mirror_remote::Result<FetchedEntity>)> =
            JoinSet::new();

        loop {
            // Keep the pool full without ever exceeding the bound
            while inflight.len() < workers {
                let Some(summary) = pending.next() else { break };
                let client = Arc::clone(&self.client);
                inflight.spawn(async move {
                    let result = match tokio::time::timeout(
                        timeout,
                        client.fetch_entity(&summary.id),
                    )
                    .await
                    {
                        Ok(result) => result,
                        Err(_) => Err(mirror_remote::Error::Fetch {
                            id: summary.id.to_string(),
                            message: format!("timed out after {}s", timeout.as_secs()),
                        }),
                    };
                    (summary.id, result)
                });
            }

            let Some(joined) = inflight.join_next().await else {
                break;
            };

            let (id, result) = match joined {
                Ok(pair) => pair,
                Err(e) => {
                    state.report.errors.push(format!("fetch task failed: {e}"));
                    continue;
                }
            };

            match result {
                Ok(fetched) => self.observe(ledger, &id, fetched, started_at, &mut state),
                Err(e) => {
                    tracing::warn!(entity = %id, error = %e, "Fetch failed, skipping entity");
                    state.report.errors.push(e.to_string());
                    state.skipped.insert(id);
                }
            }
        }

        // Removal detection runs only now, against the complete set of
        // ids this pass accounted for
        let (mut report, retained) = state.retained();
        let removed_ids = ledger.reconcile_removals(&retained, started_at);
        report.removed = removed_ids.len();
        for id in &removed_ids {
            tracing::info!(entity = %id, "Entity removed from catalog");
        }

        ledger
            .save(&self.layout)
            .map_err(|e| Error::LedgerPersist {
                message: e.to_string(),
            })?;

        if self.config.history && (report.content_changed() || report.removed > 0) {
            let log = HistoryLog::init(self.layout.root())?;
            let message = format!("Schema update: {}", started_at.to_rfc3339());
            report.commit = log.commit_pass(&message)?;
        }

        tracing::info!(
            %pass_id,
            processed = report.processed,
            added = report.added,
            changed = report.changed,
            removed = report.removed,
            errored = report.errors.len(),
            "Pass complete"
        );

        Ok(report)
    }

    /// Store one fetched document and fold the observation into the
    /// ledger. A store failure skips the entity like a fetch failure.
    fn observe(
        &self,
        ledger: &mut Ledger,
        id: &EntityId,
        fetched: FetchedEntity,
        started_at: DateTime<Utc>,
        state: &mut PassState,
    ) {
        let document = Document::new(fetched.document);

        let outcome = match self.store.write(id, &document) {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::warn!(entity = %id, error = %e, "Store write failed, skipping entity");
                state.report.errors.push(format!("{id}: {e}"));
                state.skipped.insert(id.clone());
                return;
            }
        };

        let existed = ledger.get(id).is_some();
        ledger.record_observation(
            id,
            outcome.changed,
            outcome.checksum,
            started_at,
            &fetched.metadata,
        );
        state.observed.insert(id.clone());

        state.report.processed += 1;
        if !existed {
            state.report.added += 1;
        } else if outcome.changed {
            state.report.changed += 1;
            if let Some(previous) = &outcome.previous {
                let stats =
                    DiffStats::compute(&previous.canonical_text(), &document.canonical_text());
                tracing::debug!(
                    entity = %id,
                    lines_added = stats.lines_added,
                    lines_removed = stats.lines_removed,
                    "Schema content changed"
                );
            }
        } else {
            state.report.unchanged += 1;
        }
    }
}
