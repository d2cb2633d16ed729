//! Strategy dispatch (§4.6): five depth-specific traversal policies keyed by
//! [`UrlType`], sharing one admission preamble/postamble. Each `typeN` module
//! implements one policy's per-depth logic; this module owns the transition
//! bookkeeping around them.

mod admission;
mod classify;
mod partition;
mod type0;
mod type1;
mod type2;
mod type3;
mod type4;

pub use admission::{admit_target, SeedAdmission};
pub use partition::partition_by_patterns;

use crate::browser::PageFetcher;
use crate::classifier::Classifier;
use crate::config::UserAgentConfig;
use crate::rate_limiter::RateLimiter;
use crate::state::{FrontierStatus, UrlType};
use crate::storage::{FrontierEntry, Store};
use std::collections::HashSet;
use std::time::Duration;
use tracing::{error, info, warn};

/// Everything a single entry's dispatch needs that isn't carried on the
/// entry itself (§9 "interface seams" — every collaborator is a trait
/// object so a test can swap in a stub).
pub struct ExecutionContext<'a> {
    pub store: &'a mut dyn Store,
    pub page_fetcher: &'a dyn PageFetcher,
    pub classifier: &'a dyn Classifier,
    pub rate_limiter: &'a RateLimiter,
    pub user_agent: &'a UserAgentConfig,
    pub navigation_timeout: Duration,
    pub run_log_id: i64,
    /// In-run seed dedupe for the AI-driven depths of Types 3/4 (§9); the
    /// run controller clears this once per root.
    pub visited_seeds: &'a mut HashSet<String>,
}

/// What one `dispatch` call discovered, reported back to the run controller
/// so it can recurse into freshly admitted seeds and roll up run-log
/// counters.
#[derive(Debug, Default)]
pub struct DispatchOutcome {
    pub targets_found: u64,
    pub seeds_found: u64,
    pub failed: u64,
    /// Newly admitted seed entries (status PENDING) ready for recursion.
    pub child_seeds: Vec<FrontierEntry>,
}

/// Processes one frontier entry: marks it PROCESSING, runs the per-type
/// policy, then marks PROCESSED or FAILED. Never returns an `Err` — per-entry
/// faults are caught here and folded into the returned outcome (§7
/// "per-URL errors are trapped at the strategy boundary").
pub async fn dispatch(entry: &FrontierEntry, ctx: &mut ExecutionContext<'_>) -> DispatchOutcome {
    if entry.status.is_terminal() {
        warn!(url = %entry.url, status = %entry.status, "refusing to re-process a terminal frontier entry");
        return DispatchOutcome::default();
    }

    if let Err(e) = ctx.store.set_status(entry.id, FrontierStatus::Processing, None) {
        error!(url = %entry.url, error = %e, "failed to mark entry processing, abandoning it this run");
        return DispatchOutcome::default();
    }

    let _permit = ctx.rate_limiter.acquire(&entry.main_domain).await;

    let result = match entry.url_type {
        UrlType::DirectTarget => type0::execute(entry, ctx).await,
        UrlType::SinglePage => type1::execute(entry, ctx).await,
        UrlType::SeedTarget => type2::execute(entry, ctx).await,
        UrlType::ComplexAi => type3::execute(entry, ctx).await,
        UrlType::FullAi => type4::execute(entry, ctx).await,
    };

    match result {
        Ok(outcome) => {
            if let Err(e) = ctx.store.set_status(entry.id, FrontierStatus::Processed, None) {
                error!(url = %entry.url, error = %e, "failed to mark entry processed");
            }
            info!(
                url = %entry.url,
                targets = outcome.targets_found,
                seeds = outcome.seeds_found,
                "entry processed"
            );
            outcome
        }
        Err(e) => {
            let message = e.to_string();
            error!(url = %entry.url, error = %message, "entry failed");
            if let Err(set_err) = ctx.store.set_status(entry.id, FrontierStatus::Failed, Some(&message)) {
                error!(url = %entry.url, error = %set_err, "failed to mark entry failed");
            }
            if let Err(log_err) = ctx
                .store
                .add_warning(ctx.run_log_id, &format!("{}: {}", entry.url, message))
            {
                error!(error = %log_err, "failed to record warning on run log");
            }
            DispatchOutcome {
                targets_found: 0,
                seeds_found: 0,
                failed: 1,
                child_seeds: Vec::new(),
            }
        }
    }
}
