//! Read-side reporting: summaries and statistics built from whatever the
//! frontier and run-log stores already recorded (§10.2). There is no
//! separate write-time event log — the frontier and run-log stores are
//! themselves the record, and this module only reads them back.

mod markdown;
mod stats;
mod traits;

pub use markdown::{format_markdown_summary, write_markdown_summary};
pub use stats::print_statistics;
pub use traits::{CrawlSummary, OutputError, OutputResult, RunSummaryEntry};

use crate::storage::Store;

/// Builds a [`CrawlSummary`] from the run logs created by this invocation
/// (`run_ids`) plus overall frontier statistics, for `--export-summary` and
/// `--stats` (§10.2).
pub fn build_summary(store: &dyn Store, config_hash: &str, run_ids: &[i64]) -> OutputResult<CrawlSummary> {
    let mut runs = Vec::with_capacity(run_ids.len());

    for &id in run_ids {
        let run = store.get(id)?;
        let category_statistics = store.statistics(Some(&run.category))?;
        runs.push(RunSummaryEntry {
            run,
            category_statistics,
        });
    }

    let overall_statistics = store.statistics(None)?;

    Ok(CrawlSummary {
        config_hash: config_hash.to_string(),
        runs,
        overall_statistics,
    })
}

/// [`build_summary`] over every run log on record, for `--export-summary`
/// and `--stats` invocations that operate on a database from a previous
/// process rather than a list of ids a live crawl just produced.
pub fn build_full_summary(store: &dyn Store, config_hash: &str) -> OutputResult<CrawlSummary> {
    let run_ids = store.list_ids()?;
    build_summary(store, config_hash, &run_ids)
}
