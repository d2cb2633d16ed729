use crate::state::UrlType;
use serde::Deserialize;

/// Root configuration document: crawler/user-agent/output ambient settings
/// plus the operator-configured categories and root URLs (§3 "Configuration
/// (read-only input)").
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
    pub categories: Vec<CategoryConfig>,
}

/// Crawler behavior configuration: concurrency bound and per-domain spacing
/// used by the rate limiter (§4.8).
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Maximum number of page sessions open concurrently across the run.
    #[serde(rename = "max-concurrent-pages")]
    pub max_concurrent_pages: u32,

    /// Minimum spacing, in milliseconds, between two fetches against the
    /// same registrable domain.
    #[serde(rename = "domain-min-interval-ms")]
    pub domain_min_interval_ms: u64,

    /// Navigation timeout, in seconds, for a single page open (§4.4/§5).
    #[serde(rename = "navigation-timeout-secs")]
    pub navigation_timeout_secs: u64,
}

/// User agent identification sent with every page session / HTTP probe.
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    #[serde(rename = "contact-url")]
    pub contact_url: String,

    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

/// Output configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(rename = "database-path")]
    pub database_path: String,

    #[serde(rename = "summary-path")]
    pub summary_path: String,
}

/// An operator-defined label grouping one or more root URLs (§3).
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryConfig {
    pub name: String,
    pub roots: Vec<RootUrlConfig>,
}

/// A single root URL configuration, inherited verbatim by every descendant
/// FrontierEntry admitted under it (§3 invariant 3).
#[derive(Debug, Clone, Deserialize)]
pub struct RootUrlConfig {
    pub url: String,

    /// Raw `type∈{0..4}` ordinal from the configuration document (§6); use
    /// [`RootUrlConfig::url_type`] to get the validated [`UrlType`].
    #[serde(rename = "type")]
    pub type_ordinal: u8,

    #[serde(rename = "target-patterns", default)]
    pub target_patterns: Vec<String>,

    #[serde(rename = "seed-pattern", default)]
    pub seed_pattern: Option<String>,

    #[serde(rename = "max-depth")]
    pub max_depth: u32,
}

impl RootUrlConfig {
    /// The validated `UrlType` for this root, or `None` if `type_ordinal`
    /// is outside `0..=4`. Configuration validation (§10.4) rejects roots
    /// for which this returns `None` before any run starts.
    pub fn url_type(&self) -> Option<UrlType> {
        UrlType::from_ordinal(self.type_ordinal)
    }
}
