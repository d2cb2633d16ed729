//! AI-classification-with-regex-fallback, shared by Type 3's depth-1 and
//! Type 4's AI-driven depths (§4.6, §9 "graceful degradation").

use crate::browser::FetchedPage;
use crate::classifier::PageMetadata;
use crate::storage::{FrontierEntry, StorageResult};
use crate::strategy::partition::partition_by_patterns;
use crate::strategy::ExecutionContext;
use tracing::warn;
use url::Url;

/// Classifies `page` at an AI-dependent depth. An empty result from a
/// genuinely unconfigured adapter (§4.5: "if unconfigured, both sets are
/// empty") is logged and returned as-is; an empty result from a configured
/// adapter is treated as an internal fault and falls back to the regex
/// partition, per §9's "AI-classifier failures fall back to regex where
/// regex is defined for that depth".
pub async fn classify_or_fallback(
    ctx: &mut ExecutionContext<'_>,
    entry: &FrontierEntry,
    page_url: &Url,
    page: &FetchedPage,
) -> StorageResult<(Vec<String>, Vec<String>)> {
    let metadata = PageMetadata {
        title: None,
        category: entry.category.clone(),
    };

    let classified = ctx.classifier.classify(page_url, &page.content, &metadata).await;

    if !classified.targets.is_empty() || !classified.seeds.is_empty() {
        return Ok((classified.targets, classified.seeds));
    }

    if ctx.classifier.is_noop() {
        warn!(url = %entry.url, "no classifier configured, no results at this depth");
        return Ok((Vec::new(), Vec::new()));
    }

    warn!(url = %entry.url, "classifier returned no results, falling back to regex partition");
    ctx.store.add_warning(
        ctx.run_log_id,
        &format!("{}: classifier returned no results, fell back to regex", entry.url),
    )?;

    Ok(partition_by_patterns(
        &page.links,
        &entry.url,
        &entry.target_patterns,
        entry.seed_pattern.as_deref(),
    ))
}
