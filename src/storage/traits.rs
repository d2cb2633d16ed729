//! Storage traits and error types (§4.2 Frontier store, §4.3 Run-log store).
//!
//! These traits are defined independent of any SQL backend so an in-memory
//! implementation can back unit tests without touching disk (§10.5).

use crate::state::{FrontierStatus, RunStatus, UrlType};
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use thiserror::Error;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("frontier entry not found: {0}")]
    EntryNotFound(String),

    #[error("run log not found: {0}")]
    RunLogNotFound(i64),

    #[error("invalid state transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: FrontierStatus,
        to: FrontierStatus,
    },

    #[error("run log is not in a terminal-eligible state: {0:?}")]
    InvalidRunLogStatus(RunStatus),

    #[error("serialization error: {0}")]
    Serialization(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// One row per distinct URL ever admitted (§3 FrontierEntry).
#[derive(Debug, Clone, PartialEq)]
pub struct FrontierEntry {
    pub id: i64,
    pub url: String,
    pub category: String,
    pub url_type: UrlType,
    pub depth: u32,
    pub max_depth: u32,
    pub main_domain: String,
    pub target_patterns: Vec<String>,
    pub seed_pattern: Option<String>,
    pub is_target: bool,
    pub parent_url: Option<String>,
    pub status: FrontierStatus,
    pub error_message: Option<String>,
    pub insert_date: DateTime<Utc>,
    pub last_update: DateTime<Utc>,
}

/// The fields the caller supplies when admitting a new frontier entry; `id`,
/// `status`, and the timestamps are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewFrontierEntry {
    pub url: String,
    pub category: String,
    pub url_type: UrlType,
    pub depth: u32,
    pub max_depth: u32,
    pub main_domain: String,
    pub target_patterns: Vec<String>,
    pub seed_pattern: Option<String>,
    pub is_target: bool,
    pub parent_url: Option<String>,
}

/// Aggregate counts returned by `Frontier::statistics` (§4.2).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrontierStatistics {
    pub total: u64,
    pub targets: u64,
    pub pending: u64,
    pub processing: u64,
    pub processed: u64,
    pub failed: u64,
    pub skipped: u64,
    pub unique_domains: u64,
    pub max_reached_depth: u32,
    pub first_insert: Option<DateTime<Utc>>,
    pub last_update: Option<DateTime<Utc>>,
}

impl FrontierStatistics {
    /// `processed / (processed + failed)`, or `0.0` if neither has occurred.
    pub fn success_rate(&self) -> f64 {
        let denom = self.processed + self.failed;
        if denom == 0 {
            0.0
        } else {
            self.processed as f64 / denom as f64
        }
    }
}

/// Durable queue of frontier entries with idempotent admission and guarded
/// status transitions (§4.2).
pub trait Frontier {
    /// Atomic: if no row with `entry.url` exists, inserts with
    /// `status=PENDING` and returns `admitted=true`. Otherwise returns the
    /// existing id with `admitted=false` — unless `force` is set, in which
    /// case a new row is always inserted (used to record a target reached
    /// via a different parent; see §9's force-admission decision).
    fn admit(&mut self, entry: NewFrontierEntry, force: bool) -> StorageResult<(i64, bool)>;

    /// Canonical lookup by URL.
    fn get_by_url(&self, url: &str) -> StorageResult<Option<FrontierEntry>>;

    /// Equivalent to `get_by_url(url).is_some()`.
    fn exists(&self, url: &str) -> StorageResult<bool> {
        Ok(self.get_by_url(url)?.is_some())
    }

    /// Transitions `id` to `new_status`, guarded by
    /// `FrontierStatus::can_transition_to`. Updates `last_update`.
    fn set_status(
        &mut self,
        id: i64,
        new_status: FrontierStatus,
        error: Option<&str>,
    ) -> StorageResult<()>;

    /// Marks `id` as a verified target (Type 0's "mark the entry is_target=true
    /// on success", §4.6). Updates `last_update`.
    fn set_is_target(&mut self, id: i64, is_target: bool) -> StorageResult<()>;

    /// Up to `limit` entries with `status=PENDING` and `is_target=false`,
    /// oldest `insert_date` first, optionally filtered by category and/or
    /// url_type. Target entries are terminal inventory the moment they're
    /// admitted (§1: document download is out of scope) and are never
    /// dispatched, so they're excluded here rather than being flipped to
    /// PROCESSING and stranded.
    fn take_pending(
        &mut self,
        category: Option<&str>,
        url_type: Option<UrlType>,
        limit: u32,
    ) -> StorageResult<Vec<FrontierEntry>>;

    /// Canonical URLs of entries with `is_target=false` and
    /// `status=PROCESSED` in `category` — the replay-safety set (§4.6).
    fn get_processed_seeds(&self, category: &str) -> StorageResult<HashSet<String>>;

    /// Aggregate counts, optionally scoped to one category.
    fn statistics(&self, category: Option<&str>) -> StorageResult<FrontierStatistics>;
}

/// The fields the caller supplies when creating a run log; the rest are
/// assigned by `start`/`finish`/`add_counters`/etc.
#[derive(Debug, Clone)]
pub struct NewRunLog {
    pub url: String,
    pub category: String,
    pub url_type: UrlType,
    pub max_depth: u32,
    pub target_patterns: Vec<String>,
    pub seed_pattern: Option<String>,
}

/// One row per root-URL processing run (§3 RunLog).
#[derive(Debug, Clone, PartialEq)]
pub struct RunLog {
    pub id: i64,
    pub url: String,
    pub category: String,
    pub url_type: UrlType,
    pub max_depth: u32,
    pub target_patterns: Vec<String>,
    pub seed_pattern: Option<String>,
    pub status: RunStatus,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub processing_duration: Option<i64>,
    pub total_urls_found: u64,
    pub target_urls_found: u64,
    pub seed_urls_found: u64,
    pub failed_urls: u64,
    pub reached_depth: u32,
    pub error_message: Option<String>,
    pub warning_messages: Vec<String>,
}

/// Per-root-URL run records with counters, warnings, duration, and terminal
/// status (§4.3).
pub trait RunLogStore {
    fn create(&mut self, log: NewRunLog) -> StorageResult<i64>;

    /// Sets `status=RUNNING`, `start_time=now`.
    fn start(&mut self, id: i64) -> StorageResult<()>;

    /// Sets `end_time=now`, computes `processing_duration`; rejects
    /// non-terminal `terminal_status` values.
    fn finish(
        &mut self,
        id: i64,
        terminal_status: RunStatus,
        error: Option<&str>,
    ) -> StorageResult<()>;

    /// Atomic increment of `target_urls_found`/`seed_urls_found`/`failed_urls`
    /// and of `total_urls_found = targets + seeds`.
    fn add_counters(&mut self, id: i64, targets: u64, seeds: u64, failed: u64) -> StorageResult<()>;

    /// Appends `message` to `warning_messages`.
    fn add_warning(&mut self, id: i64, message: &str) -> StorageResult<()>;

    /// Monotone max update of `reached_depth`.
    fn set_reached_depth(&mut self, id: i64, depth: u32) -> StorageResult<()>;

    fn get(&self, id: i64) -> StorageResult<RunLog>;

    /// Every run-log id on record, oldest first. Used to rebuild a summary
    /// from a database left over from a previous invocation (§6
    /// `--export-summary`/`--stats`), when the caller has no in-memory list
    /// of the ids a just-finished crawl produced.
    fn list_ids(&self) -> StorageResult<Vec<i64>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_rate_with_no_activity() {
        let stats = FrontierStatistics::default();
        assert_eq!(stats.success_rate(), 0.0);
    }

    #[test]
    fn test_success_rate_computed() {
        let stats = FrontierStatistics {
            processed: 3,
            failed: 1,
            ..Default::default()
        };
        assert_eq!(stats.success_rate(), 0.75);
    }
}
