//! Per-chapter completion tracking.
//!
//! The tracker owns the set of completed slugs and the registry's slug
//! universe. Membership is mutated only by explicit [`ProgressTracker::toggle`]
//! calls, each persisted synchronously before the call returns (write-through,
//! call order preserved). There is exactly one writer — the running reader —
//! so no conflict resolution exists.
//!
//! Storage failures never surface: an absent, corrupt, or unreadable store
//! loads as an empty set, and a failed save is logged and dropped.

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::Mutex;

use lyfr_core::{Error, Result};

/// Capability for persisting the completion set.
///
/// The persisted form is a JSON array of slugs.
pub trait ProgressStore: Send + Sync {
    /// Load the persisted completion set. Absence is an empty set, not an
    /// error; errors are reserved for unreadable or corrupt storage.
    fn load(&self) -> Result<Vec<String>>;

    /// Persist the completion set, replacing any previous value.
    fn save(&self, completed: &[String]) -> Result<()>;
}

/// File-backed store: one JSON array in one file.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store at the given path. Parent directories are created on
    /// first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ProgressStore for JsonFileStore {
    fn load(&self) -> Result<Vec<String>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let raw = std::fs::read_to_string(&self.path)?;
        serde_json::from_str(&raw).map_err(|e| Error::Storage(e.to_string()))
    }

    fn save(&self, completed: &[String]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string(completed).map_err(|e| Error::Storage(e.to_string()))?;
        std::fs::write(&self.path, raw)?;
        Ok(())
    }
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: Mutex<Vec<String>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with completed slugs.
    pub fn seeded(completed: &[&str]) -> Self {
        Self {
            slots: Mutex::new(completed.iter().map(|s| s.to_string()).collect()),
        }
    }
}

impl ProgressStore for MemoryStore {
    fn load(&self) -> Result<Vec<String>> {
        Ok(self.slots.lock().expect("progress store poisoned").clone())
    }

    fn save(&self, completed: &[String]) -> Result<()> {
        *self.slots.lock().expect("progress store poisoned") = completed.to_vec();
        Ok(())
    }
}

/// The completion tracker.
///
/// Counts and the percentage are derived against the registry universe:
/// slugs in storage that the registry does not know are retained on save but
/// never counted.
pub struct ProgressTracker {
    universe: Vec<String>,
    completed: BTreeSet<String>,
    store: Box<dyn ProgressStore>,
}

impl ProgressTracker {
    /// Load the persisted set, degrading to empty on any storage failure.
    pub fn load(universe: Vec<String>, store: Box<dyn ProgressStore>) -> Self {
        let completed = match store.load() {
            Ok(slugs) => slugs.into_iter().collect(),
            Err(err) => {
                log::warn!("progress storage unreadable, starting empty: {err}");
                BTreeSet::new()
            }
        };
        Self {
            universe,
            completed,
            store,
        }
    }

    /// Flip completion for a slug and persist the updated set.
    ///
    /// Returns the new membership. A failed save is logged and dropped; the
    /// in-memory set keeps the new value.
    pub fn toggle(&mut self, slug: &str) -> bool {
        let now_complete = if self.completed.remove(slug) {
            false
        } else {
            self.completed.insert(slug.to_string());
            true
        };
        self.persist();
        now_complete
    }

    /// Clear all completion state and persist the empty set.
    pub fn reset(&mut self) {
        self.completed.clear();
        self.persist();
    }

    /// Whether a slug is currently marked complete.
    pub fn is_completed(&self, slug: &str) -> bool {
        self.completed.contains(slug)
    }

    /// Size of the registry universe.
    pub fn total_count(&self) -> usize {
        self.universe.len()
    }

    /// Number of completed slugs that the registry knows.
    pub fn completed_count(&self) -> usize {
        self.universe
            .iter()
            .filter(|slug| self.completed.contains(*slug))
            .count()
    }

    /// Completion percentage, rounded to the nearest integer; 0 when the
    /// universe is empty.
    pub fn percent(&self) -> u8 {
        let total = self.total_count();
        if total == 0 {
            return 0;
        }
        ((self.completed_count() as f64 / total as f64) * 100.0).round() as u8
    }

    /// Universe slugs currently marked complete, in universe order.
    pub fn completed_slugs(&self) -> Vec<&str> {
        self.universe
            .iter()
            .filter(|slug| self.completed.contains(*slug))
            .map(|s| s.as_str())
            .collect()
    }

    fn persist(&self) {
        let slugs: Vec<String> = self.completed.iter().cloned().collect();
        if let Err(err) = self.store.save(&slugs) {
            log::warn!("progress save failed, keeping in-memory state: {err}");
        }
    }
}
