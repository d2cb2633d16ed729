//! Database schema definitions for the frontier and run-log tables (§6).

/// SQL schema for the frontier database.
pub const SCHEMA_SQL: &str = r#"
-- One row per distinct URL ever admitted (§3 FrontierEntry).
--
-- `forced` distinguishes the at-most-one canonical row per URL (forced=0,
-- the normal admission path) from additional provenance rows recorded by
-- force-admission (forced=1; see Frontier::admit). The partial unique index
-- below is the ON CONFLICT target that makes non-forced admission
-- linearizable on `url` per §4.2's concurrency contract.
CREATE TABLE IF NOT EXISTS url_frontier (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    url TEXT NOT NULL,
    forced INTEGER NOT NULL DEFAULT 0,
    category TEXT NOT NULL,
    url_type TEXT NOT NULL,
    depth INTEGER NOT NULL,
    max_depth INTEGER NOT NULL,
    main_domain TEXT NOT NULL,
    target_patterns TEXT NOT NULL,
    seed_pattern TEXT,
    is_target INTEGER NOT NULL DEFAULT 0,
    parent_url TEXT,
    status TEXT NOT NULL,
    error_message TEXT,
    insert_date TEXT NOT NULL,
    last_update TEXT NOT NULL
);

CREATE UNIQUE INDEX IF NOT EXISTS idx_url_frontier_url_canonical
    ON url_frontier(url) WHERE forced = 0;
CREATE INDEX IF NOT EXISTS idx_url_frontier_status ON url_frontier(status);
CREATE INDEX IF NOT EXISTS idx_url_frontier_category ON url_frontier(category);

-- One row per root-URL processing run (§3 RunLog).
CREATE TABLE IF NOT EXISTS config_url_logs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    url TEXT NOT NULL,
    category TEXT NOT NULL,
    url_type TEXT NOT NULL,
    max_depth INTEGER NOT NULL,
    target_patterns TEXT NOT NULL,
    seed_pattern TEXT,
    status TEXT NOT NULL,
    start_time TEXT,
    end_time TEXT,
    processing_duration INTEGER,
    total_urls_found INTEGER NOT NULL DEFAULT 0,
    target_urls_found INTEGER NOT NULL DEFAULT 0,
    seed_urls_found INTEGER NOT NULL DEFAULT 0,
    failed_urls INTEGER NOT NULL DEFAULT 0,
    reached_depth INTEGER NOT NULL DEFAULT 0,
    error_message TEXT,
    warning_messages TEXT NOT NULL DEFAULT '[]'
);

CREATE INDEX IF NOT EXISTS idx_config_url_logs_url ON config_url_logs(url);
CREATE INDEX IF NOT EXISTS idx_config_url_logs_status ON config_url_logs(status);
"#;

/// Initializes the database schema. Safe to call against an already
/// initialized database (`CREATE TABLE IF NOT EXISTS`).
pub fn initialize_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}

/// Current schema version, for future migrations.
pub fn get_schema_version() -> u32 {
    1
}
