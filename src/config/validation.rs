use crate::config::types::{CategoryConfig, Config, CrawlerConfig, RootUrlConfig, UserAgentConfig};
use crate::state::UrlType;
use crate::ConfigError;
use regex::Regex;
use url::Url;

/// Validates the entire configuration document.
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_output_config(&config.output)?;

    if config.categories.is_empty() {
        return Err(ConfigError::Validation(
            "configuration must declare at least one category".to_string(),
        ));
    }

    for category in &config.categories {
        validate_category(category)?;
    }

    Ok(())
}

fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.max_concurrent_pages < 1 || config.max_concurrent_pages > 100 {
        return Err(ConfigError::Validation(format!(
            "max-concurrent-pages must be between 1 and 100, got {}",
            config.max_concurrent_pages
        )));
    }

    if config.domain_min_interval_ms < 1 {
        return Err(ConfigError::Validation(
            "domain-min-interval-ms must be >= 1".to_string(),
        ));
    }

    if config.navigation_timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "navigation-timeout-secs must be >= 1".to_string(),
        ));
    }

    Ok(())
}

fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler-name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler-name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("invalid contact-url: {}", e)))?;

    validate_email(&config.contact_email)?;

    Ok(())
}

fn validate_output_config(config: &crate::config::types::OutputConfig) -> Result<(), ConfigError> {
    if config.database_path.is_empty() {
        return Err(ConfigError::Validation(
            "database-path cannot be empty".to_string(),
        ));
    }

    if config.summary_path.is_empty() {
        return Err(ConfigError::Validation(
            "summary-path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

fn validate_category(category: &CategoryConfig) -> Result<(), ConfigError> {
    if category.name.is_empty() {
        return Err(ConfigError::Validation(
            "category name cannot be empty".to_string(),
        ));
    }

    if category.roots.is_empty() {
        return Err(ConfigError::Validation(format!(
            "category '{}' must declare at least one root URL",
            category.name
        )));
    }

    for root in &category.roots {
        validate_root(category, root)?;
    }

    Ok(())
}

/// Validates a single root against its `UrlType`'s `max_depth` constraint
/// (§4.6), pattern compilability, and the Type 2-4 `seed_pattern` requirement.
fn validate_root(category: &CategoryConfig, root: &RootUrlConfig) -> Result<(), ConfigError> {
    let url_type = root.url_type().ok_or_else(|| {
        ConfigError::Validation(format!(
            "category '{}', root '{}': type {} is not in 0..=4",
            category.name, root.url, root.type_ordinal
        ))
    })?;

    Url::parse(&root.url)
        .map_err(|e| ConfigError::InvalidUrl(format!("invalid root url '{}': {}", root.url, e)))?;

    if !url_type.max_depth_is_valid(root.max_depth) {
        return Err(ConfigError::Validation(format!(
            "category '{}', root '{}': max-depth {} is invalid for {:?}",
            category.name, root.url, root.max_depth, url_type
        )));
    }

    if root.target_patterns.is_empty() {
        return Err(ConfigError::Validation(format!(
            "category '{}', root '{}': target-patterns must not be empty",
            category.name, root.url
        )));
    }

    for pattern in &root.target_patterns {
        validate_regex(category, root, "target-patterns", pattern)?;
    }

    let seed_required = matches!(
        url_type,
        UrlType::SeedTarget | UrlType::ComplexAi | UrlType::FullAi
    );

    match &root.seed_pattern {
        Some(pattern) => validate_regex(category, root, "seed-pattern", pattern)?,
        None if seed_required => {
            return Err(ConfigError::Validation(format!(
                "category '{}', root '{}': seed-pattern is required for {:?}",
                category.name, root.url, url_type
            )))
        }
        None => {}
    }

    Ok(())
}

fn validate_regex(
    category: &CategoryConfig,
    root: &RootUrlConfig,
    field: &str,
    pattern: &str,
) -> Result<(), ConfigError> {
    Regex::new(pattern).map_err(|e| {
        ConfigError::InvalidPattern(format!(
            "category '{}', root '{}': {} pattern '{}' does not compile: {}",
            category.name, root.url, field, pattern, e
        ))
    })?;
    Ok(())
}

fn validate_email(email: &str) -> Result<(), ConfigError> {
    if email.is_empty() {
        return Err(ConfigError::Validation(
            "contact-email cannot be empty".to_string(),
        ));
    }

    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 {
        return Err(ConfigError::Validation(format!(
            "invalid email format: '{}'",
            email
        )));
    }

    let (local, domain) = (parts[0], parts[1]);
    if local.is_empty() || domain.is_empty() || !domain.contains('.') {
        return Err(ConfigError::Validation(format!(
            "invalid email format: '{}'",
            email
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::{OutputConfig, RootUrlConfig};

    fn base_crawler() -> CrawlerConfig {
        CrawlerConfig {
            max_concurrent_pages: 5,
            domain_min_interval_ms: 2000,
            navigation_timeout_secs: 30,
        }
    }

    fn base_user_agent() -> UserAgentConfig {
        UserAgentConfig {
            crawler_name: "TestCrawler".to_string(),
            crawler_version: "1.0".to_string(),
            contact_url: "https://example.com/about".to_string(),
            contact_email: "admin@example.com".to_string(),
        }
    }

    fn base_output() -> OutputConfig {
        OutputConfig {
            database_path: "./test.db".to_string(),
            summary_path: "./summary.md".to_string(),
        }
    }

    fn direct_target_root() -> RootUrlConfig {
        RootUrlConfig {
            url: "https://example.org/doc.pdf".to_string(),
            type_ordinal: 0,
            target_patterns: vec![r"\.pdf$".to_string()],
            seed_pattern: None,
            max_depth: 0,
        }
    }

    fn valid_config() -> Config {
        Config {
            crawler: base_crawler(),
            user_agent: base_user_agent(),
            output: base_output(),
            categories: vec![CategoryConfig {
                name: "grants".to_string(),
                roots: vec![direct_target_root()],
            }],
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(validate(&valid_config()).is_ok());
    }

    #[test]
    fn test_empty_categories_rejected() {
        let mut config = valid_config();
        config.categories.clear();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_bad_type_ordinal_rejected() {
        let mut config = valid_config();
        config.categories[0].roots[0].type_ordinal = 9;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_max_depth_mismatch_rejected() {
        let mut config = valid_config();
        config.categories[0].roots[0].max_depth = 1;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_empty_target_patterns_rejected() {
        let mut config = valid_config();
        config.categories[0].roots[0].target_patterns.clear();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_invalid_regex_rejected() {
        let mut config = valid_config();
        config.categories[0].roots[0].target_patterns = vec!["(unterminated".to_string()];
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_seed_pattern_required_for_seed_target() {
        let mut config = valid_config();
        config.categories[0].roots[0] = RootUrlConfig {
            url: "https://r/".to_string(),
            type_ordinal: 2,
            target_patterns: vec![r"\.pdf$".to_string()],
            seed_pattern: None,
            max_depth: 1,
        };
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_seed_pattern_present_for_seed_target_passes() {
        let mut config = valid_config();
        config.categories[0].roots[0] = RootUrlConfig {
            url: "https://r/".to_string(),
            type_ordinal: 2,
            target_patterns: vec![r"\.pdf$".to_string()],
            seed_pattern: Some("/year/".to_string()),
            max_depth: 1,
        };
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_invalid_email_rejected() {
        let mut config = valid_config();
        config.user_agent.contact_email = "not-an-email".to_string();
        assert!(validate(&config).is_err());
    }
}
