use crate::browser::PageFetcher;
use crate::classifier::Classifier;
use crate::config::{CategoryConfig, Config, RootUrlConfig, UserAgentConfig};
use crate::rate_limiter::RateLimiter;
use crate::state::RunStatus;
use crate::storage::{NewFrontierEntry, NewRunLog, Store};
use crate::strategy::{dispatch, DispatchOutcome, ExecutionContext};
use crate::url::{extract_domain, normalize_url};
use crate::ConfigError;
use std::collections::{HashSet, VecDeque};
use std::time::Duration;
use tracing::{error, info};
use url::Url;

/// How many leftover PENDING entries to pull per `take_pending` round when
/// resuming a category's backlog from a previous interrupted run.
const RESUME_BATCH_SIZE: u32 = 50;

/// Collaborators the run controller needs beyond the configuration itself,
/// assembled once per process invocation (§9 "interface seams").
pub struct RunnerDeps<'a> {
    pub store: &'a mut dyn Store,
    pub page_fetcher: &'a dyn PageFetcher,
    pub classifier: &'a dyn Classifier,
    pub rate_limiter: &'a RateLimiter,
    pub user_agent: &'a UserAgentConfig,
    pub navigation_timeout: Duration,
}

/// Aggregate result of one `run` call across every configured root;
/// `any_failed` is what main.rs maps to the process exit code (§6).
#[derive(Debug, Default)]
pub struct RunSummary {
    pub roots_completed: u64,
    pub roots_partially_completed: u64,
    pub roots_failed: u64,
}

impl RunSummary {
    pub fn any_failed(&self) -> bool {
        self.roots_failed > 0
    }

    pub fn any_partial(&self) -> bool {
        self.roots_partially_completed > 0
    }
}

/// Drives every category/root in `config` to completion, sequentially.
/// Concurrency happens within a root's traversal (via the rate limiter's
/// bounded semaphore), not across roots — §5 scopes one run log per root.
pub async fn run(config: &Config, deps: &mut RunnerDeps<'_>) -> RunSummary {
    let mut summary = RunSummary::default();

    for category in &config.categories {
        for root in &category.roots {
            match run_root(category, root, deps).await {
                Ok(RunStatus::PartiallyCompleted) => summary.roots_partially_completed += 1,
                Ok(RunStatus::Failed) => summary.roots_failed += 1,
                Ok(_) => summary.roots_completed += 1,
                Err(e) => {
                    error!(url = %root.url, error = %e, "root could not be started");
                    summary.roots_failed += 1;
                }
            }
        }
    }

    summary
}

async fn run_root(category: &CategoryConfig, root: &RootUrlConfig, deps: &mut RunnerDeps<'_>) -> crate::Result<RunStatus> {
    let url_type = root
        .url_type()
        .ok_or_else(|| ConfigError::Validation(format!("root {} has an invalid type ordinal", root.url)))?;

    // §4.7 step 1: canonicalize before admitting, so the root dedups against
    // its own canonical form on replay and self-reference checks against
    // `entry.url` downstream compare like-for-like (§8 property 1).
    let canonical = normalize_url(&root.url, None)?.to_string();

    let main_domain = Url::parse(&canonical)
        .ok()
        .and_then(|u| extract_domain(&u))
        .unwrap_or_default();

    let (_root_id, _admitted) = deps.store.admit(
        NewFrontierEntry {
            url: canonical.clone(),
            category: category.name.clone(),
            url_type,
            depth: 0,
            max_depth: root.max_depth,
            main_domain,
            target_patterns: root.target_patterns.clone(),
            seed_pattern: root.seed_pattern.clone(),
            is_target: false,
            parent_url: None,
        },
        false,
    )?;

    let root_entry = deps
        .store
        .get_by_url(&canonical)?
        .expect("just-admitted root must be retrievable");

    let run_log_id = deps.store.create(NewRunLog {
        url: canonical.clone(),
        category: category.name.clone(),
        url_type,
        max_depth: root.max_depth,
        target_patterns: root.target_patterns.clone(),
        seed_pattern: root.seed_pattern.clone(),
    })?;
    deps.store.start(run_log_id)?;

    info!(url = %canonical, category = %category.name, url_type = %url_type, "starting run");

    if root_entry.status.is_terminal() {
        info!(url = %canonical, status = %root_entry.status, "root already terminal, replay admits nothing new");
        deps.store.finish(run_log_id, RunStatus::Completed, None)?;
        return Ok(RunStatus::Completed);
    }

    let outcome = drive_traversal(run_log_id, root_entry, category, url_type, deps).await;

    match outcome {
        Ok(status) => {
            deps.store.finish(run_log_id, status, None)?;
            info!(url = %canonical, status = %status, "run finished");
            Ok(status)
        }
        Err(e) => {
            let message = e.to_string();
            error!(url = %canonical, error = %message, "unrecoverable fault, failing run");
            deps.store.finish(run_log_id, RunStatus::Failed, Some(&message))?;
            Ok(RunStatus::Failed)
        }
    }
}

/// Walks the frontier breadth-first from `root_entry`, then drains any
/// category-scoped PENDING backlog left over from a previous interrupted run
/// (§5 "resumable on next run" — `take_pending` is the resumption
/// primitive). Returns the terminal `RunStatus` per §4.7 point 4:
/// PARTIALLY_COMPLETED iff at least one failure AND at least one target were
/// seen, COMPLETED otherwise (unrecoverable faults propagate as `Err`).
async fn drive_traversal(
    run_log_id: i64,
    root_entry: crate::storage::FrontierEntry,
    category: &CategoryConfig,
    url_type: crate::state::UrlType,
    deps: &mut RunnerDeps<'_>,
) -> crate::Result<RunStatus> {
    let mut visited_seeds = HashSet::new();
    let mut queue = VecDeque::new();
    queue.push_back(root_entry);

    let mut total_targets = 0u64;
    let mut total_seeds = 0u64;
    let mut total_failed = 0u64;
    let mut max_reached_depth = 0u32;

    loop {
        while let Some(entry) = queue.pop_front() {
            max_reached_depth = max_reached_depth.max(entry.depth);

            let mut ctx = ExecutionContext {
                store: deps.store,
                page_fetcher: deps.page_fetcher,
                classifier: deps.classifier,
                rate_limiter: deps.rate_limiter,
                user_agent: deps.user_agent,
                navigation_timeout: deps.navigation_timeout,
                run_log_id,
                visited_seeds: &mut visited_seeds,
            };

            let outcome: DispatchOutcome = dispatch(&entry, &mut ctx).await;

            total_targets += outcome.targets_found;
            total_seeds += outcome.seeds_found;
            total_failed += outcome.failed;

            deps.store
                .add_counters(run_log_id, outcome.targets_found, outcome.seeds_found, outcome.failed)?;

            queue.extend(outcome.child_seeds);
        }

        let backlog = deps
            .store
            .take_pending(Some(&category.name), Some(url_type), RESUME_BATCH_SIZE)?;
        if backlog.is_empty() {
            break;
        }
        queue.extend(backlog);
    }

    deps.store.set_reached_depth(run_log_id, max_reached_depth)?;

    let status = if total_failed > 0 && total_targets > 0 {
        RunStatus::PartiallyCompleted
    } else {
        RunStatus::Completed
    };

    Ok(status)
}
