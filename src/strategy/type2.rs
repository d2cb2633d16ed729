//! Type 2 — SEED_TARGET (§4.6): root page yields targets and seeds by regex
//! partition; each seed is fetched exactly once, one level deeper, and its
//! own target matches are admitted. `max_depth` MUST be 1, so a single
//! `entry.depth < entry.max_depth` guard both admits depth-0 seeds and stops
//! admitting any from the depth-1 seed visit.

use crate::storage::FrontierEntry;
use crate::strategy::partition::partition_by_patterns;
use crate::strategy::{admission, DispatchOutcome, ExecutionContext};
use url::Url;

pub async fn execute(entry: &FrontierEntry, ctx: &mut ExecutionContext<'_>) -> crate::Result<DispatchOutcome> {
    let page_url = Url::parse(&entry.url)?;
    let page = ctx.page_fetcher.fetch(&page_url, ctx.navigation_timeout).await?;

    let (targets, seeds) = partition_by_patterns(
        &page.links,
        &entry.url,
        &entry.target_patterns,
        entry.seed_pattern.as_deref(),
    );

    let mut outcome = DispatchOutcome::default();

    for target in &targets {
        admission::admit_target(ctx.store, entry, target, false)?;
        outcome.targets_found += 1;
    }

    if entry.depth < entry.max_depth {
        for seed in &seeds {
            if let admission::SeedAdmission::Admitted(child) = admission::admit_seed(ctx.store, entry, seed)? {
                outcome.seeds_found += 1;
                outcome.child_seeds.push(child);
            }
        }
    }

    Ok(outcome)
}
