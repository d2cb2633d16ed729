//! SQLite implementation of the frontier store and run-log store (§10.5).
//!
//! Both tables live in one database, opened in WAL mode to match this
//! crate's established persistence idiom. The `Frontier`/`RunLogStore`
//! traits stay backend-independent; everything SQL-specific is contained
//! here.

use crate::state::{FrontierStatus, RunStatus, UrlType};
use crate::storage::schema::initialize_schema;
use crate::storage::traits::{
    Frontier, FrontierEntry, FrontierStatistics, NewFrontierEntry, NewRunLog, RunLog,
    RunLogStore, StorageError, StorageResult,
};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::collections::HashSet;
use std::path::Path;

pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Opens (or creates) the database at `path` and initializes the schema.
    pub fn new(path: &Path) -> StorageResult<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;
             PRAGMA foreign_keys = ON;",
        )?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }

    /// In-memory database, used by unit and integration tests.
    pub fn new_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }

    fn encode_patterns(patterns: &[String]) -> StorageResult<String> {
        serde_json::to_string(patterns).map_err(|e| StorageError::Serialization(e.to_string()))
    }

    fn decode_patterns(raw: &str) -> StorageResult<Vec<String>> {
        serde_json::from_str(raw).map_err(|e| StorageError::Serialization(e.to_string()))
    }

    fn encode_warnings(warnings: &[String]) -> StorageResult<String> {
        serde_json::to_string(warnings).map_err(|e| StorageError::Serialization(e.to_string()))
    }

    fn decode_warnings(raw: &str) -> StorageResult<Vec<String>> {
        serde_json::from_str(raw).map_err(|e| StorageError::Serialization(e.to_string()))
    }
}

fn row_to_entry(row: &Row) -> rusqlite::Result<(FrontierEntry, String, String)> {
    let url_type_str: String = row.get(3)?;
    let status_str: String = row.get(11)?;
    let insert_date_str: String = row.get(13)?;
    let last_update_str: String = row.get(14)?;
    let target_patterns_raw: String = row.get(7)?;

    let entry = FrontierEntry {
        id: row.get(0)?,
        url: row.get(1)?,
        category: row.get(2)?,
        url_type: UrlType::from_db_string(&url_type_str).unwrap_or(UrlType::DirectTarget),
        depth: row.get::<_, i64>(4)? as u32,
        max_depth: row.get::<_, i64>(5)? as u32,
        main_domain: row.get(6)?,
        target_patterns: Vec::new(), // filled in by caller (needs fallible JSON decode)
        seed_pattern: row.get(8)?,
        is_target: row.get::<_, i64>(9)? != 0,
        parent_url: row.get(10)?,
        status: FrontierStatus::from_db_string(&status_str).unwrap_or(FrontierStatus::Pending),
        error_message: row.get(12)?,
        insert_date: insert_date_str
            .parse::<DateTime<Utc>>()
            .unwrap_or_else(|_| Utc::now()),
        last_update: last_update_str
            .parse::<DateTime<Utc>>()
            .unwrap_or_else(|_| Utc::now()),
    };

    Ok((entry, target_patterns_raw, status_str))
}

const FRONTIER_COLUMNS: &str = "id, url, category, url_type, depth, max_depth, main_domain, \
     target_patterns, seed_pattern, is_target, parent_url, status, error_message, \
     insert_date, last_update";

impl Frontier for SqliteStorage {
    fn admit(&mut self, entry: NewFrontierEntry, force: bool) -> StorageResult<(i64, bool)> {
        let now = Utc::now().to_rfc3339();
        let patterns_json = Self::encode_patterns(&entry.target_patterns)?;

        if force {
            self.conn.execute(
                "INSERT INTO url_frontier
                 (url, forced, category, url_type, depth, max_depth, main_domain,
                  target_patterns, seed_pattern, is_target, parent_url, status,
                  insert_date, last_update)
                 VALUES (?1, 1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?12)",
                params![
                    entry.url,
                    entry.category,
                    entry.url_type.to_db_string(),
                    entry.depth,
                    entry.max_depth,
                    entry.main_domain,
                    patterns_json,
                    entry.seed_pattern,
                    entry.is_target as i64,
                    entry.parent_url,
                    FrontierStatus::Pending.to_db_string(),
                    now,
                ],
            )?;
            return Ok((self.conn.last_insert_rowid(), true));
        }

        let changed = self.conn.execute(
            "INSERT INTO url_frontier
             (url, forced, category, url_type, depth, max_depth, main_domain,
              target_patterns, seed_pattern, is_target, parent_url, status,
              insert_date, last_update)
             VALUES (?1, 0, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?12)
             ON CONFLICT(url) WHERE forced = 0 DO NOTHING",
            params![
                entry.url,
                entry.category,
                entry.url_type.to_db_string(),
                entry.depth,
                entry.max_depth,
                entry.main_domain,
                patterns_json,
                entry.seed_pattern,
                entry.is_target as i64,
                entry.parent_url,
                FrontierStatus::Pending.to_db_string(),
                now,
            ],
        )?;

        if changed == 1 {
            Ok((self.conn.last_insert_rowid(), true))
        } else {
            let id: i64 = self.conn.query_row(
                "SELECT id FROM url_frontier WHERE url = ?1 AND forced = 0",
                params![entry.url],
                |row| row.get(0),
            )?;
            Ok((id, false))
        }
    }

    fn get_by_url(&self, url: &str) -> StorageResult<Option<FrontierEntry>> {
        let sql = format!(
            "SELECT {} FROM url_frontier WHERE url = ?1 AND forced = 0",
            FRONTIER_COLUMNS
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let row = stmt
            .query_row(params![url], |row| row_to_entry(row))
            .optional()?;

        match row {
            Some((mut entry, patterns_raw, _)) => {
                entry.target_patterns = Self::decode_patterns(&patterns_raw)?;
                Ok(Some(entry))
            }
            None => Ok(None),
        }
    }

    fn set_status(
        &mut self,
        id: i64,
        new_status: FrontierStatus,
        error: Option<&str>,
    ) -> StorageResult<()> {
        let current_str: String = self
            .conn
            .query_row(
                "SELECT status FROM url_frontier WHERE id = ?1",
                params![id],
                |row| row.get(0),
            )
            .map_err(|_| StorageError::EntryNotFound(id.to_string()))?;

        let current =
            FrontierStatus::from_db_string(&current_str).unwrap_or(FrontierStatus::Pending);

        if !current.can_transition_to(new_status) {
            return Err(StorageError::InvalidTransition {
                from: current,
                to: new_status,
            });
        }

        let now = Utc::now().to_rfc3339();
        self.conn.execute(
            "UPDATE url_frontier SET status = ?1, error_message = ?2, last_update = ?3 WHERE id = ?4",
            params![new_status.to_db_string(), error, now, id],
        )?;
        Ok(())
    }

    fn set_is_target(&mut self, id: i64, is_target: bool) -> StorageResult<()> {
        let now = Utc::now().to_rfc3339();
        let changed = self.conn.execute(
            "UPDATE url_frontier SET is_target = ?1, last_update = ?2 WHERE id = ?3",
            params![is_target, now, id],
        )?;
        if changed == 0 {
            return Err(StorageError::EntryNotFound(id.to_string()));
        }
        Ok(())
    }

    fn take_pending(
        &mut self,
        category: Option<&str>,
        url_type: Option<UrlType>,
        limit: u32,
    ) -> StorageResult<Vec<FrontierEntry>> {
        let tx = self.conn.transaction()?;

        let ids: Vec<i64> = {
            let mut stmt_sql =
                "SELECT id FROM url_frontier WHERE status = 'PENDING' AND is_target = 0".to_string();
            let mut idx = 1;
            let cat_idx;
            let type_idx;
            if let Some(_) = category {
                stmt_sql.push_str(&format!(" AND category = ?{}", idx));
                cat_idx = Some(idx);
                idx += 1;
            } else {
                cat_idx = None;
            }
            if let Some(_) = url_type {
                stmt_sql.push_str(&format!(" AND url_type = ?{}", idx));
                type_idx = Some(idx);
                idx += 1;
            } else {
                type_idx = None;
            }
            stmt_sql.push_str(&format!(" ORDER BY insert_date ASC LIMIT ?{}", idx));

            let mut stmt = tx.prepare(&stmt_sql)?;
            let mut collected = Vec::new();

            match (cat_idx, type_idx) {
                (Some(_), Some(_)) => {
                    let rows = stmt.query_map(
                        params![category.unwrap(), url_type.unwrap().to_db_string(), limit],
                        |row| row.get::<_, i64>(0),
                    )?;
                    for r in rows {
                        collected.push(r?);
                    }
                }
                (Some(_), None) => {
                    let rows = stmt
                        .query_map(params![category.unwrap(), limit], |row| row.get::<_, i64>(0))?;
                    for r in rows {
                        collected.push(r?);
                    }
                }
                (None, Some(_)) => {
                    let rows = stmt.query_map(
                        params![url_type.unwrap().to_db_string(), limit],
                        |row| row.get::<_, i64>(0),
                    )?;
                    for r in rows {
                        collected.push(r?);
                    }
                }
                (None, None) => {
                    let rows = stmt.query_map(params![limit], |row| row.get::<_, i64>(0))?;
                    for r in rows {
                        collected.push(r?);
                    }
                }
            }

            collected
        };

        let now = Utc::now().to_rfc3339();
        for id in &ids {
            tx.execute(
                "UPDATE url_frontier SET status = 'PROCESSING', last_update = ?1 WHERE id = ?2",
                params![now, id],
            )?;
        }

        let sql = format!("SELECT {} FROM url_frontier WHERE id = ?1", FRONTIER_COLUMNS);
        let mut entries = Vec::with_capacity(ids.len());
        {
            let mut stmt = tx.prepare(&sql)?;
            for id in &ids {
                let (mut entry, patterns_raw, _) =
                    stmt.query_row(params![id], |row| row_to_entry(row))?;
                entry.target_patterns = Self::decode_patterns(&patterns_raw)?;
                entries.push(entry);
            }
        }

        tx.commit()?;
        Ok(entries)
    }

    fn get_processed_seeds(&self, category: &str) -> StorageResult<HashSet<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT url FROM url_frontier
             WHERE category = ?1 AND is_target = 0 AND status = 'PROCESSED' AND forced = 0",
        )?;
        let urls = stmt
            .query_map(params![category], |row| row.get::<_, String>(0))?
            .collect::<Result<HashSet<_>, _>>()?;
        Ok(urls)
    }

    fn statistics(&self, category: Option<&str>) -> StorageResult<FrontierStatistics> {
        let where_clause = if category.is_some() { "WHERE category = ?1" } else { "" };

        let count_query = |extra_predicate: &str| -> StorageResult<u64> {
            let joiner = if category.is_some() { "AND" } else { "WHERE" };
            let sql = if extra_predicate.is_empty() {
                format!("SELECT COUNT(*) FROM url_frontier {}", where_clause)
            } else {
                format!(
                    "SELECT COUNT(*) FROM url_frontier {} {} {}",
                    where_clause, joiner, extra_predicate
                )
            };
            let count: i64 = if let Some(cat) = category {
                self.conn.query_row(&sql, params![cat], |r| r.get(0))?
            } else {
                self.conn.query_row(&sql, [], |r| r.get(0))?
            };
            Ok(count as u64)
        };

        let status_count = |status: FrontierStatus| -> StorageResult<u64> {
            let sql = if category.is_some() {
                "SELECT COUNT(*) FROM url_frontier WHERE category = ?1 AND status = ?2"
            } else {
                "SELECT COUNT(*) FROM url_frontier WHERE status = ?1"
            };
            let count: i64 = if let Some(cat) = category {
                self.conn
                    .query_row(sql, params![cat, status.to_db_string()], |r| r.get(0))?
            } else {
                self.conn
                    .query_row(sql, params![status.to_db_string()], |r| r.get(0))?
            };
            Ok(count as u64)
        };

        let total = count_query("")?;
        let targets = count_query("is_target = 1")?;
        let pending = status_count(FrontierStatus::Pending)?;
        let processing = status_count(FrontierStatus::Processing)?;
        let processed = status_count(FrontierStatus::Processed)?;
        let failed = status_count(FrontierStatus::Failed)?;
        let skipped = status_count(FrontierStatus::Skipped)?;

        let unique_domains_sql = format!(
            "SELECT COUNT(DISTINCT main_domain) FROM url_frontier {}",
            where_clause
        );
        let unique_domains: i64 = if let Some(cat) = category {
            self.conn.query_row(&unique_domains_sql, params![cat], |r| r.get(0))?
        } else {
            self.conn.query_row(&unique_domains_sql, [], |r| r.get(0))?
        };

        let max_depth_sql = format!(
            "SELECT COALESCE(MAX(depth), 0) FROM url_frontier {}",
            where_clause
        );
        let max_reached_depth: i64 = if let Some(cat) = category {
            self.conn.query_row(&max_depth_sql, params![cat], |r| r.get(0))?
        } else {
            self.conn.query_row(&max_depth_sql, [], |r| r.get(0))?
        };

        let first_insert_sql = format!(
            "SELECT MIN(insert_date) FROM url_frontier {}",
            where_clause
        );
        let first_insert: Option<String> = if let Some(cat) = category {
            self.conn
                .query_row(&first_insert_sql, params![cat], |r| r.get(0))
                .optional()?
                .flatten()
        } else {
            self.conn
                .query_row(&first_insert_sql, [], |r| r.get(0))
                .optional()?
                .flatten()
        };

        let last_update_sql = format!(
            "SELECT MAX(last_update) FROM url_frontier {}",
            where_clause
        );
        let last_update: Option<String> = if let Some(cat) = category {
            self.conn
                .query_row(&last_update_sql, params![cat], |r| r.get(0))
                .optional()?
                .flatten()
        } else {
            self.conn
                .query_row(&last_update_sql, [], |r| r.get(0))
                .optional()?
                .flatten()
        };

        Ok(FrontierStatistics {
            total,
            targets,
            pending,
            processing,
            processed,
            failed,
            skipped,
            unique_domains: unique_domains as u64,
            max_reached_depth: max_reached_depth as u32,
            first_insert: first_insert.and_then(|s| s.parse().ok()),
            last_update: last_update.and_then(|s| s.parse().ok()),
        })
    }
}

/// Column order `get` selects in, shared with [`row_to_run_log`]'s indices.
const RUN_LOG_COLUMNS: &str = "id, url, category, url_type, max_depth, target_patterns, \
     seed_pattern, status, start_time, end_time, processing_duration, \
     total_urls_found, target_urls_found, seed_urls_found, failed_urls, warning_messages, \
     reached_depth, error_message";

fn row_to_run_log(row: &Row) -> rusqlite::Result<(RunLog, String, String, String)> {
    let url_type_str: String = row.get(3)?;
    let status_str: String = row.get(7)?;
    let target_patterns_raw: String = row.get(5)?;
    let warnings_raw: String = row.get(15)?;

    let log = RunLog {
        id: row.get(0)?,
        url: row.get(1)?,
        category: row.get(2)?,
        url_type: UrlType::from_db_string(&url_type_str).unwrap_or(UrlType::DirectTarget),
        max_depth: row.get::<_, i64>(4)? as u32,
        target_patterns: Vec::new(),
        seed_pattern: row.get(6)?,
        status: RunStatus::from_db_string(&status_str).unwrap_or(RunStatus::Pending),
        start_time: row
            .get::<_, Option<String>>(8)?
            .and_then(|s| s.parse().ok()),
        end_time: row
            .get::<_, Option<String>>(9)?
            .and_then(|s| s.parse().ok()),
        processing_duration: row.get(10)?,
        total_urls_found: row.get::<_, i64>(11)? as u64,
        target_urls_found: row.get::<_, i64>(12)? as u64,
        seed_urls_found: row.get::<_, i64>(13)? as u64,
        failed_urls: row.get::<_, i64>(14)? as u64,
        reached_depth: row.get::<_, i64>(16)? as u32,
        error_message: row.get(17)?,
        warning_messages: Vec::new(),
    };

    Ok((log, target_patterns_raw, warnings_raw, status_str))
}

impl RunLogStore for SqliteStorage {
    fn create(&mut self, log: NewRunLog) -> StorageResult<i64> {
        let patterns_json = Self::encode_patterns(&log.target_patterns)?;
        self.conn.execute(
            "INSERT INTO config_url_logs
             (url, category, url_type, max_depth, target_patterns, seed_pattern, status,
              total_urls_found, target_urls_found, seed_urls_found, failed_urls,
              reached_depth, warning_messages)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, 0, 0, 0, 0, 0, '[]')",
            params![
                log.url,
                log.category,
                log.url_type.to_db_string(),
                log.max_depth,
                patterns_json,
                log.seed_pattern,
                RunStatus::Pending.to_db_string(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn start(&mut self, id: i64) -> StorageResult<()> {
        let now = Utc::now().to_rfc3339();
        self.conn.execute(
            "UPDATE config_url_logs SET status = ?1, start_time = ?2 WHERE id = ?3",
            params![RunStatus::Running.to_db_string(), now, id],
        )?;
        Ok(())
    }

    fn finish(
        &mut self,
        id: i64,
        terminal_status: RunStatus,
        error: Option<&str>,
    ) -> StorageResult<()> {
        if !terminal_status.is_terminal() {
            return Err(StorageError::InvalidRunLogStatus(terminal_status));
        }

        let start_time: Option<String> = self
            .conn
            .query_row(
                "SELECT start_time FROM config_url_logs WHERE id = ?1",
                params![id],
                |row| row.get(0),
            )
            .map_err(|_| StorageError::RunLogNotFound(id))?;

        let now = Utc::now();
        let duration = start_time
            .and_then(|s| s.parse::<DateTime<Utc>>().ok())
            .map(|start| (now - start).num_seconds());

        self.conn.execute(
            "UPDATE config_url_logs
             SET status = ?1, end_time = ?2, processing_duration = ?3, error_message = ?4
             WHERE id = ?5",
            params![
                terminal_status.to_db_string(),
                now.to_rfc3339(),
                duration,
                error,
                id
            ],
        )?;
        Ok(())
    }

    fn add_counters(&mut self, id: i64, targets: u64, seeds: u64, failed: u64) -> StorageResult<()> {
        self.conn.execute(
            "UPDATE config_url_logs
             SET target_urls_found = target_urls_found + ?1,
                 seed_urls_found = seed_urls_found + ?2,
                 failed_urls = failed_urls + ?3,
                 total_urls_found = total_urls_found + ?1 + ?2
             WHERE id = ?4",
            params![targets, seeds, failed, id],
        )?;
        Ok(())
    }

    fn add_warning(&mut self, id: i64, message: &str) -> StorageResult<()> {
        let existing: String = self
            .conn
            .query_row(
                "SELECT warning_messages FROM config_url_logs WHERE id = ?1",
                params![id],
                |row| row.get(0),
            )
            .map_err(|_| StorageError::RunLogNotFound(id))?;

        let mut warnings = Self::decode_warnings(&existing)?;
        warnings.push(message.to_string());
        let encoded = Self::encode_warnings(&warnings)?;

        self.conn.execute(
            "UPDATE config_url_logs SET warning_messages = ?1 WHERE id = ?2",
            params![encoded, id],
        )?;
        Ok(())
    }

    fn set_reached_depth(&mut self, id: i64, depth: u32) -> StorageResult<()> {
        self.conn.execute(
            "UPDATE config_url_logs SET reached_depth = MAX(reached_depth, ?1) WHERE id = ?2",
            params![depth, id],
        )?;
        Ok(())
    }

    fn get(&self, id: i64) -> StorageResult<RunLog> {
        let sql = format!(
            "SELECT {} FROM config_url_logs WHERE id = ?1",
            RUN_LOG_COLUMNS
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let (mut log, patterns_raw, warnings_raw, _) = stmt
            .query_row(params![id], |row| row_to_run_log(row))
            .map_err(|_| StorageError::RunLogNotFound(id))?;

        log.target_patterns = Self::decode_patterns(&patterns_raw)?;
        log.warning_messages = Self::decode_warnings(&warnings_raw)?;
        Ok(log)
    }

    fn list_ids(&self) -> StorageResult<Vec<i64>> {
        let mut stmt = self.conn.prepare("SELECT id FROM config_url_logs ORDER BY id ASC")?;
        let ids = stmt
            .query_map([], |row| row.get::<_, i64>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_entry(url: &str) -> NewFrontierEntry {
        NewFrontierEntry {
            url: url.to_string(),
            category: "grants".to_string(),
            url_type: UrlType::DirectTarget,
            depth: 0,
            max_depth: 0,
            main_domain: "example.org".to_string(),
            target_patterns: vec![r"\.pdf$".to_string()],
            seed_pattern: None,
            is_target: false,
            parent_url: None,
        }
    }

    #[test]
    fn test_admit_new_url() {
        let mut storage = SqliteStorage::new_in_memory().unwrap();
        let (id, admitted) = storage.admit(new_entry("https://example.org/doc.pdf"), false).unwrap();
        assert!(admitted);
        assert!(id > 0);
    }

    #[test]
    fn test_admit_duplicate_is_noop() {
        let mut storage = SqliteStorage::new_in_memory().unwrap();
        let (id1, admitted1) = storage.admit(new_entry("https://example.org/doc.pdf"), false).unwrap();
        let (id2, admitted2) = storage.admit(new_entry("https://example.org/doc.pdf"), false).unwrap();
        assert!(admitted1);
        assert!(!admitted2);
        assert_eq!(id1, id2);
    }

    #[test]
    fn test_force_admit_always_inserts() {
        let mut storage = SqliteStorage::new_in_memory().unwrap();
        let (id1, admitted1) = storage.admit(new_entry("https://example.org/doc.pdf"), true).unwrap();
        let (id2, admitted2) = storage.admit(new_entry("https://example.org/doc.pdf"), true).unwrap();
        assert!(admitted1);
        assert!(admitted2);
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_get_by_url_roundtrip() {
        let mut storage = SqliteStorage::new_in_memory().unwrap();
        storage.admit(new_entry("https://example.org/doc.pdf"), false).unwrap();
        let entry = storage.get_by_url("https://example.org/doc.pdf").unwrap().unwrap();
        assert_eq!(entry.category, "grants");
        assert_eq!(entry.target_patterns, vec![r"\.pdf$".to_string()]);
        assert_eq!(entry.status, FrontierStatus::Pending);
    }

    #[test]
    fn test_exists() {
        let mut storage = SqliteStorage::new_in_memory().unwrap();
        assert!(!storage.exists("https://example.org/doc.pdf").unwrap());
        storage.admit(new_entry("https://example.org/doc.pdf"), false).unwrap();
        assert!(storage.exists("https://example.org/doc.pdf").unwrap());
    }

    #[test]
    fn test_set_status_legal_transition() {
        let mut storage = SqliteStorage::new_in_memory().unwrap();
        let (id, _) = storage.admit(new_entry("https://example.org/doc.pdf"), false).unwrap();
        storage.set_status(id, FrontierStatus::Processing, None).unwrap();
        storage.set_status(id, FrontierStatus::Processed, None).unwrap();
        let entry = storage.get_by_url("https://example.org/doc.pdf").unwrap().unwrap();
        assert_eq!(entry.status, FrontierStatus::Processed);
    }

    #[test]
    fn test_set_status_illegal_transition_rejected() {
        let mut storage = SqliteStorage::new_in_memory().unwrap();
        let (id, _) = storage.admit(new_entry("https://example.org/doc.pdf"), false).unwrap();
        let result = storage.set_status(id, FrontierStatus::Processed, None);
        assert!(result.is_err());
    }

    #[test]
    fn test_take_pending_flips_to_processing() {
        let mut storage = SqliteStorage::new_in_memory().unwrap();
        storage.admit(new_entry("https://example.org/a.pdf"), false).unwrap();
        storage.admit(new_entry("https://example.org/b.pdf"), false).unwrap();

        let taken = storage.take_pending(None, None, 10).unwrap();
        assert_eq!(taken.len(), 2);
        for entry in &taken {
            assert_eq!(entry.status, FrontierStatus::Processing);
        }

        let taken_again = storage.take_pending(None, None, 10).unwrap();
        assert!(taken_again.is_empty());
    }

    #[test]
    fn test_take_pending_respects_limit_and_order() {
        let mut storage = SqliteStorage::new_in_memory().unwrap();
        storage.admit(new_entry("https://example.org/a.pdf"), false).unwrap();
        storage.admit(new_entry("https://example.org/b.pdf"), false).unwrap();
        storage.admit(new_entry("https://example.org/c.pdf"), false).unwrap();

        let taken = storage.take_pending(None, None, 2).unwrap();
        assert_eq!(taken.len(), 2);
        assert_eq!(taken[0].url, "https://example.org/a.pdf");
        assert_eq!(taken[1].url, "https://example.org/b.pdf");
    }

    #[test]
    fn test_get_processed_seeds() {
        let mut storage = SqliteStorage::new_in_memory().unwrap();
        let mut seed = new_entry("https://r/year/2024/");
        seed.is_target = false;
        seed.url_type = UrlType::SeedTarget;
        let (id, _) = storage.admit(seed, false).unwrap();

        assert!(storage.get_processed_seeds("grants").unwrap().is_empty());

        storage.set_status(id, FrontierStatus::Processing, None).unwrap();
        storage.set_status(id, FrontierStatus::Processed, None).unwrap();

        let seeds = storage.get_processed_seeds("grants").unwrap();
        assert!(seeds.contains("https://r/year/2024/"));
    }

    #[test]
    fn test_statistics_counts() {
        let mut storage = SqliteStorage::new_in_memory().unwrap();
        let (id1, _) = storage.admit(new_entry("https://example.org/a.pdf"), false).unwrap();
        storage.admit(new_entry("https://example.org/b.pdf"), false).unwrap();

        storage.set_status(id1, FrontierStatus::Processing, None).unwrap();
        storage.set_status(id1, FrontierStatus::Failed, Some("boom")).unwrap();

        let stats = storage.statistics(Some("grants")).unwrap();
        assert_eq!(stats.total, 2);
        assert_eq!(stats.pending, 1);
        assert_eq!(stats.failed, 1);
        assert_eq!(stats.unique_domains, 1);
    }

    fn new_run_log(url: &str) -> NewRunLog {
        NewRunLog {
            url: url.to_string(),
            category: "grants".to_string(),
            url_type: UrlType::DirectTarget,
            max_depth: 0,
            target_patterns: vec![r"\.pdf$".to_string()],
            seed_pattern: None,
        }
    }

    #[test]
    fn test_run_log_lifecycle() {
        let mut storage = SqliteStorage::new_in_memory().unwrap();
        let id = storage.create(new_run_log("https://example.org/doc.pdf")).unwrap();

        storage.start(id).unwrap();
        let log = storage.get(id).unwrap();
        assert_eq!(log.status, RunStatus::Running);
        assert!(log.start_time.is_some());

        storage.add_counters(id, 1, 0, 0).unwrap();
        storage.set_reached_depth(id, 0).unwrap();
        storage.add_warning(id, "something odd").unwrap();

        storage.finish(id, RunStatus::Completed, None).unwrap();
        let log = storage.get(id).unwrap();
        assert_eq!(log.status, RunStatus::Completed);
        assert_eq!(log.target_urls_found, 1);
        assert_eq!(log.total_urls_found, 1);
        assert_eq!(log.warning_messages, vec!["something odd".to_string()]);
        assert!(log.end_time.is_some());
        assert!(log.processing_duration.is_some());
    }

    #[test]
    fn test_finish_rejects_non_terminal_status() {
        let mut storage = SqliteStorage::new_in_memory().unwrap();
        let id = storage.create(new_run_log("https://example.org/doc.pdf")).unwrap();
        storage.start(id).unwrap();
        let result = storage.finish(id, RunStatus::Running, None);
        assert!(result.is_err());
    }

    #[test]
    fn test_list_ids_returns_oldest_first() {
        let mut storage = SqliteStorage::new_in_memory().unwrap();
        let id1 = storage.create(new_run_log("https://r/a")).unwrap();
        let id2 = storage.create(new_run_log("https://r/b")).unwrap();
        assert_eq!(storage.list_ids().unwrap(), vec![id1, id2]);
    }

    #[test]
    fn test_add_counters_accumulates_total() {
        let mut storage = SqliteStorage::new_in_memory().unwrap();
        let id = storage.create(new_run_log("https://r/")).unwrap();
        storage.add_counters(id, 2, 3, 1).unwrap();
        storage.add_counters(id, 1, 0, 0).unwrap();

        let log = storage.get(id).unwrap();
        assert_eq!(log.target_urls_found, 3);
        assert_eq!(log.seed_urls_found, 3);
        assert_eq!(log.failed_urls, 1);
        assert_eq!(log.total_urls_found, 6);
    }

    #[test]
    fn test_set_reached_depth_is_monotone() {
        let mut storage = SqliteStorage::new_in_memory().unwrap();
        let id = storage.create(new_run_log("https://r/")).unwrap();
        storage.set_reached_depth(id, 2).unwrap();
        storage.set_reached_depth(id, 1).unwrap();
        let log = storage.get(id).unwrap();
        assert_eq!(log.reached_depth, 2);
    }
}
