//! Shared admission rules used by every strategy (§4.6 "shared admission
//! rules"): children always inherit the parent's category, patterns, and
//! `max_depth`, and a discovered seed is never re-queued once it has already
//! been processed in this category (replay safety, §8 S4).

use crate::storage::{FrontierEntry, NewFrontierEntry, StorageResult, Store};
use crate::url::extract_domain;
use tracing::info;
use url::Url;

/// Result of attempting to admit a discovered seed URL.
pub enum SeedAdmission {
    /// Newly admitted; ready for recursive processing by the caller.
    Admitted(FrontierEntry),
    /// Already present in the frontier, under any status.
    AlreadyInFrontier,
    /// Already PROCESSED as a seed in this category on a prior run
    /// (replay-safety skip, §4.6).
    AlreadyProcessed,
}

fn main_domain_of(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|u| extract_domain(&u))
        .unwrap_or_default()
}

/// Admits `target_url` as a child of `parent` with `is_target=true`. `force`
/// records a second provenance edge when the same document is reached
/// through a different parent (§9's force-admission decision, default
/// `false` — see DESIGN.md).
pub fn admit_target(
    store: &mut dyn Store,
    parent: &FrontierEntry,
    target_url: &str,
    force: bool,
) -> StorageResult<()> {
    let entry = NewFrontierEntry {
        url: target_url.to_string(),
        category: parent.category.clone(),
        url_type: parent.url_type,
        depth: parent.depth + 1,
        max_depth: parent.max_depth,
        main_domain: main_domain_of(target_url),
        target_patterns: parent.target_patterns.clone(),
        seed_pattern: parent.seed_pattern.clone(),
        is_target: true,
        parent_url: Some(parent.url.clone()),
    };
    store.admit(entry, force)?;
    Ok(())
}

/// Admits `seed_url` as a child of `parent`, unless it's already in the
/// frontier or already PROCESSED as a seed in this category.
pub fn admit_seed(
    store: &mut dyn Store,
    parent: &FrontierEntry,
    seed_url: &str,
) -> StorageResult<SeedAdmission> {
    let processed = store.get_processed_seeds(&parent.category)?;
    if processed.contains(seed_url) {
        info!(url = seed_url, "seed already processed in this category, skipping");
        return Ok(SeedAdmission::AlreadyProcessed);
    }

    if store.exists(seed_url)? {
        return Ok(SeedAdmission::AlreadyInFrontier);
    }

    let entry = NewFrontierEntry {
        url: seed_url.to_string(),
        category: parent.category.clone(),
        url_type: parent.url_type,
        depth: parent.depth + 1,
        max_depth: parent.max_depth,
        main_domain: main_domain_of(seed_url),
        target_patterns: parent.target_patterns.clone(),
        seed_pattern: parent.seed_pattern.clone(),
        is_target: false,
        parent_url: Some(parent.url.clone()),
    };

    let (_id, admitted) = store.admit(entry, false)?;
    if !admitted {
        return Ok(SeedAdmission::AlreadyInFrontier);
    }

    let fresh = store
        .get_by_url(seed_url)?
        .expect("just-admitted entry must be retrievable");
    Ok(SeedAdmission::Admitted(fresh))
}
