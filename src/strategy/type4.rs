//! Type 4 — FULL_AI (§4.6): `max_depth` MUST be >= 2, target patterns
//! required. AI-driven classification at every depth up to the second-to-last;
//! the last depth (`entry.depth + 1 == entry.max_depth`) is a regex-only
//! target collection with no further seeds, which is what keeps the
//! recursion from ever reaching a `depth == max_depth` node at all.

use crate::storage::FrontierEntry;
use crate::strategy::classify::classify_or_fallback;
use crate::strategy::partition::partition_by_patterns;
use crate::strategy::{admission, DispatchOutcome, ExecutionContext};
use url::Url;

pub async fn execute(entry: &FrontierEntry, ctx: &mut ExecutionContext<'_>) -> crate::Result<DispatchOutcome> {
    let page_url = Url::parse(&entry.url)?;
    let page = ctx.page_fetcher.fetch(&page_url, ctx.navigation_timeout).await?;

    let is_last_ai_depth = entry.depth + 1 == entry.max_depth;

    let (targets, seeds) = if is_last_ai_depth {
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

    for seed in &seeds {
        if !ctx.visited_seeds.insert(seed.clone()) {
            continue;
        }
        if let admission::SeedAdmission::Admitted(child) = admission::admit_seed(ctx.store, entry, seed)? {
            outcome.seeds_found += 1;
            outcome.child_seeds.push(child);
        }
    }

    Ok(outcome)
}
