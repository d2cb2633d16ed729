//! Type 3 — COMPLEX_AI (§4.6): `max_depth` MUST be 2, both patterns
//! required.
//!
//! - Depth 0: regex-based partition, as in Type 2.
//! - Depth 1: the AI classifier provides (target, seed) sets.
//! - Depth 2 (terminal): regex-only target collection, no seeds.

use crate::storage::FrontierEntry;
use crate::strategy::classify::classify_or_fallback;
use crate::strategy::partition::partition_by_patterns;
use crate::strategy::{admission, DispatchOutcome, ExecutionContext};
use url::Url;

pub async fn execute(entry: &FrontierEntry, ctx: &mut ExecutionContext<'_>) -> crate::Result<DispatchOutcome> {
    let page_url = Url::parse(&entry.url)?;
    let page = ctx.page_fetcher.fetch(&page_url, ctx.navigation_timeout).await?;

    let (targets, seeds) = if entry.depth == 0 {
        partition_by_patterns(&page.links, &entry.url, &entry.target_patterns, entry.seed_pattern.as_deref())
    } else if entry.depth >= entry.max_depth {
        let (t, _) = partition_by_patterns(&page.links, &entry.url, &entry.target_patterns, entry.seed_pattern.as_deref());
        (t, Vec::new())
    } else {
        classify_or_fallback(ctx, entry, &page_url, &page).await?
    };

    let mut outcome = DispatchOutcome::default();

    for target in &targets {
        admission::admit_target(ctx.store, entry, target, false)?;
        outcome.targets_found += 1;
    }

    if entry.depth < entry.max_depth {
        for seed in &seeds {
            if !ctx.visited_seeds.insert(seed.clone()) {
                continue;
            }
            if let admission::SeedAdmission::Admitted(child) = admission::admit_seed(ctx.store, entry, seed)? {
                outcome.seeds_found += 1;
                outcome.child_seeds.push(child);
            }
        }
    }

    Ok(outcome)
}
