//! Summary/report types built from the frontier and run-log stores (§10.2
//! export surface). These are read-side: assembled once, on demand, from
//! whatever the stores already recorded — there is no separate event log to
//! keep in sync with frontier/run-log state.

use crate::storage::{FrontierStatistics, RunLog, StorageError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

pub type OutputResult<T> = Result<T, OutputError>;

/// One root's run log, paired with the frontier statistics scoped to its
/// category at summary-build time.
#[derive(Debug, Clone)]
pub struct RunSummaryEntry {
    pub run: RunLog,
    pub category_statistics: FrontierStatistics,
}

/// The full summary exported at the end of a crawl (`--export-summary`,
/// §10.2) or printed via `--stats`.
#[derive(Debug, Clone, Default)]
pub struct CrawlSummary {
    pub config_hash: String,
    pub runs: Vec<RunSummaryEntry>,
    pub overall_statistics: FrontierStatistics,
}

impl CrawlSummary {
    pub fn total_targets(&self) -> u64 {
        self.runs.iter().map(|r| r.run.target_urls_found).sum()
    }

    pub fn total_seeds(&self) -> u64 {
        self.runs.iter().map(|r| r.run.seed_urls_found).sum()
    }

    pub fn total_failed(&self) -> u64 {
        self.runs.iter().map(|r| r.run.failed_urls).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{RunStatus, UrlType};
    use chrono::Utc;

    fn sample_run(targets: u64, seeds: u64, failed: u64) -> RunLog {
        RunLog {
            id: 1,
            url: "https://example.org/".to_string(),
            category: "grants".to_string(),
            url_type: UrlType::SeedTarget,
            max_depth: 1,
            target_patterns: vec![r"\.pdf$".to_string()],
            seed_pattern: Some("/year/".to_string()),
            status: RunStatus::Completed,
            start_time: Some(Utc::now()),
            end_time: Some(Utc::now()),
            processing_duration: Some(10),
            total_urls_found: targets + seeds,
            target_urls_found: targets,
            seed_urls_found: seeds,
            failed_urls: failed,
            reached_depth: 1,
            error_message: None,
            warning_messages: vec![],
        }
    }

    #[test]
    fn test_totals_sum_across_runs() {
        let summary = CrawlSummary {
            config_hash: "abc".to_string(),
            runs: vec![
                RunSummaryEntry {
                    run: sample_run(3, 1, 0),
                    category_statistics: FrontierStatistics::default(),
                },
                RunSummaryEntry {
                    run: sample_run(2, 0, 1),
                    category_statistics: FrontierStatistics::default(),
                },
            ],
            overall_statistics: FrontierStatistics::default(),
        };

        assert_eq!(summary.total_targets(), 5);
        assert_eq!(summary.total_seeds(), 1);
        assert_eq!(summary.total_failed(), 1);
    }

    #[test]
    fn test_empty_summary_has_zero_totals() {
        let summary = CrawlSummary::default();
        assert_eq!(summary.total_targets(), 0);
        assert_eq!(summary.total_seeds(), 0);
        assert_eq!(summary.total_failed(), 0);
    }
}
