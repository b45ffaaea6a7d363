//! Append-only history log over a git repository

use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone, Utc};
use git2::{Commit, IndexAddOption, Oid, Repository, Sort};

use crate::Result;

/// Number of entries retained in a [`PathHistory`] summary
const RECENT_LIMIT: usize = 5;

/// One recorded change to a tracked path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    /// Short commit hash (7 characters)
    pub commit: String,
    /// When the change was recorded
    pub timestamp: DateTime<Utc>,
}

/// Derived summary of one path's change history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathHistory {
    /// Timestamp of the most recent change, if any
    pub latest_update: Option<DateTime<Utc>>,
    /// Total number of recorded changes
    pub total_updates: usize,
    /// Up to five most recent changes, newest first
    pub recent: Vec<ChangeEvent>,
}

/// The history log: a git repository rooted at the mirror directory.
///
/// Entries are only ever appended; nothing rewrites or removes a prior
/// commit. All queries are derived from the commit graph and are
/// repeatable — identical results absent new appends.
pub struct HistoryLog {
    repo: Repository,
    root: PathBuf,
}

impl HistoryLog {
    /// Open the repository at `root`, initializing it on first use.
    ///
    /// A local commit identity is configured so appends work in
    /// environments without a global git identity.
    pub fn init(root: &Path) -> Result<Self> {
        let repo = match Repository::open(root) {
            Ok(repo) => repo,
            Err(_) => Repository::init(root)?,
        };

        {
            let mut config = repo.config()?;
            if config.get_string("user.name").is_err() {
                config.set_str("user.name", "schema-mirror")?;
            }
            if config.get_string("user.email").is_err() {
                config.set_str("user.email", "schema-mirror@localhost")?;
            }
        }

        Ok(Self {
            repo,
            root: root.to_path_buf(),
        })
    }

    /// The mirror root this log tracks.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Stage everything under the root and append one commit, if and
    /// only if the staged tree differs from the last appended one.
    ///
    /// Returns the short hash of the new entry, or `None` when there
    /// was nothing to record — an empty pass never creates a no-op
    /// entry.
    pub fn commit_pass(&self, message: &str) -> Result<Option<String>> {
        let mut index = self.repo.index()?;
        index.add_all(["*"], IndexAddOption::DEFAULT, None)?;
        // add_all does not drop entries whose workdir file vanished
        index.update_all(["*"], None)?;
        index.write()?;
        let tree_id = index.write_tree()?;

        let parent = match self.repo.head() {
            Ok(head) => Some(head.peel_to_commit()?),
            Err(_) => None,
        };

        if let Some(parent) = &parent {
            if parent.tree_id() == tree_id {
                return Ok(None);
            }
        } else if self.repo.find_tree(tree_id)?.is_empty() {
            return Ok(None);
        }

        let signature = self.repo.signature()?;
        let tree = self.repo.find_tree(tree_id)?;
        let parents: Vec<&Commit> = parent.iter().collect();
        let oid = self
            .repo
            .commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)?;

        let hash = short_hash(oid);
        tracing::debug!(commit = %hash, "Appended history entry");
        Ok(Some(hash))
    }

    /// Ordered list of changes to `rel_path`, oldest first.
    ///
    /// A path the log has never seen yields an empty timeline, not an
    /// error. A blob counts as changed in a commit when it is absent
    /// from the parent tree or carries a different blob id there.
    pub fn timeline(&self, rel_path: &str) -> Result<Vec<ChangeEvent>> {
        if self.repo.head().is_err() {
            // Unborn branch: nothing has ever been appended
            return Ok(Vec::new());
        }

        let mut revwalk = self.repo.revwalk()?;
        revwalk.push_head()?;
        revwalk.set_sorting(Sort::TIME | Sort::REVERSE)?;

        let path = Path::new(rel_path);
        let mut events = Vec::new();

        for oid_result in revwalk {
            let oid = oid_result?;
            let commit = self.repo.find_commit(oid)?;

            let Some(blob_id) = tree_blob_id(&commit, path)? else {
                continue;
            };

            let parent_blob_id = match commit.parent(0) {
                Ok(parent) => tree_blob_id(&parent, path)?,
                Err(_) => None,
            };

            if parent_blob_id != Some(blob_id) {
                events.push(ChangeEvent {
                    commit: short_hash(oid),
                    timestamp: commit_time(&commit),
                });
            }
        }

        Ok(events)
    }

    /// Timestamp of the most recent change to `rel_path`.
    pub fn latest(&self, rel_path: &str) -> Result<Option<DateTime<Utc>>> {
        Ok(self.timeline(rel_path)?.last().map(|e| e.timestamp))
    }

    /// Number of recorded changes to `rel_path`.
    pub fn count(&self, rel_path: &str) -> Result<usize> {
        Ok(self.timeline(rel_path)?.len())
    }

    /// Timestamp of the first recorded change to `rel_path`.
    pub fn first_seen(&self, rel_path: &str) -> Result<Option<DateTime<Utc>>> {
        Ok(self.timeline(rel_path)?.first().map(|e| e.timestamp))
    }

    /// Summary of one path's history: latest update, total count, and
    /// the most recent entries newest first.
    pub fn path_history(&self, rel_path: &str) -> Result<PathHistory> {
        let timeline = self.timeline(rel_path)?;

        let latest_update = timeline.last().map(|e| e.timestamp);
        let total_updates = timeline.len();
        let recent: Vec<ChangeEvent> = timeline.into_iter().rev().take(RECENT_LIMIT).collect();

        Ok(PathHistory {
            latest_update,
            total_updates,
            recent,
        })
    }
}

fn short_hash(oid: Oid) -> String {
    format!("{:.7}", oid)
}

fn commit_time(commit: &Commit<'_>) -> DateTime<Utc> {
    Utc.timestamp_opt(commit.time().seconds(), 0)
        .single()
        .unwrap_or_default()
}

/// Blob id of `path` in the commit's tree, or `None` when absent.
fn tree_blob_id(commit: &Commit<'_>, path: &Path) -> Result<Option<Oid>> {
    let tree = commit.tree()?;
    Ok(tree.get_path(path).ok().map(|entry| entry.id()))
}
