//! AI classifier adapter (§4.5): an optional pluggable interface that turns
//! stabilized page content into (target, seed) URL sets.
//!
//! The adapter never drives navigation; it only looks at content already
//! extracted by the page session. Absent credentials or an internal fault
//! both degrade to the [`NoopClassifier`] behavior: empty sets, never fatal.

mod types;

pub use types::{ClassifiedItem, ClassifiedUrls, UrlCategory};

use crate::url::normalize_url;
use async_trait::async_trait;
use tracing::warn;
use url::Url;

/// Metadata passed to the classifier alongside page content; kept small and
/// serializable so adapters can forward it to a remote service verbatim.
#[derive(Debug, Clone, Default)]
pub struct PageMetadata {
    pub title: Option<String>,
    pub category: String,
}

/// The single operation a classifier adapter must provide (§4.5).
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Classifies the page at `page_url` given its stabilized `page_content`.
    /// MUST NOT fail the caller: internal errors are caught and reported as
    /// an empty [`ClassifiedUrls`] by implementations, consistent with the
    /// adapter's graceful-degradation contract.
    async fn classify(
        &self,
        page_url: &Url,
        page_content: &str,
        metadata: &PageMetadata,
    ) -> ClassifiedUrls;

    /// Whether this adapter is the degrade-to-empty default rather than a
    /// configured backend. Types 3/4 use this to tell "nothing configured"
    /// (log and move on) apart from "configured adapter found nothing"
    /// (fall back to regex where one is defined for that depth).
    fn is_noop(&self) -> bool {
        false
    }
}

/// The default classifier when none is configured: always returns empty
/// sets, matching an absent or failed credential per §4.5/§9.
#[derive(Debug, Clone, Default)]
pub struct NoopClassifier;

#[async_trait]
impl Classifier for NoopClassifier {
    async fn classify(&self, _page_url: &Url, _page_content: &str, _metadata: &PageMetadata) -> ClassifiedUrls {
        ClassifiedUrls::default()
    }

    fn is_noop(&self) -> bool {
        true
    }
}

/// Normalizes and partitions raw classifier items into target/seed sets,
/// dropping pagination items per the wire contract (§6) and any item that
/// fails normalization.
pub fn partition_items(items: Vec<ClassifiedItem>, page_url: &Url) -> ClassifiedUrls {
    let mut result = ClassifiedUrls::default();

    for item in items {
        if item.pagination {
            continue;
        }

        let normalized = match normalize_url(&item.url, Some(page_url)) {
            Ok(u) => u.to_string(),
            Err(e) => {
                warn!(url = %item.url, error = %e, "classifier returned unnormalizable URL, skipping");
                continue;
            }
        };

        match item.url_category {
            UrlCategory::Target => result.targets.push(normalized),
            UrlCategory::Seed => result.seeds.push(normalized),
        }
    }

    result
}
