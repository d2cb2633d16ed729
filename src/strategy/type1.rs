//! Type 1 — SINGLE_PAGE (§4.6): one listing page; every link on it matching
//! `target_patterns` is a target. `max_depth` MUST be 0, so no seeds are ever
//! produced.

use crate::storage::FrontierEntry;
use crate::strategy::{admission, DispatchOutcome, ExecutionContext};
use crate::url::is_target;
use url::Url;

pub async fn execute(entry: &FrontierEntry, ctx: &mut ExecutionContext<'_>) -> crate::Result<DispatchOutcome> {
    let page_url = Url::parse(&entry.url)?;
    let page = ctx.page_fetcher.fetch(&page_url, ctx.navigation_timeout).await?;

    let mut outcome = DispatchOutcome::default();

    for link in &page.links {
        if link == &entry.url {
            continue;
        }
        if !is_target(link, &entry.target_patterns) {
            continue;
        }
        admission::admit_target(ctx.store, entry, link, false)?;
        outcome.targets_found += 1;
    }

    Ok(outcome)
}
