use crate::UrlError;
use url::Url;

/// Schemes the frontier will ever admit. Anything else (`javascript:`,
/// `mailto:`, `tel:`, `data:`, ...) is rejected at normalization time.
const ALLOWED_SCHEMES: &[&str] = &["http", "https"];

/// Normalizes a URL, optionally resolving it against a base URL first.
///
/// # Normalization steps
///
/// 1. Resolve `url_str` against `base` if it isn't already absolute; reject
///    if it can't be parsed even then.
/// 2. Reject any scheme other than `http`/`https` (`javascript:`, `mailto:`,
///    `tel:`, and friends never enter the frontier).
/// 3. Reject a missing host, or one starting with `.`.
/// 4. Lowercase scheme and host. Path case is preserved.
/// 5. Strip the default port for the scheme (80 for http, 443 for https).
/// 6. Drop the fragment entirely.
/// 7. Sort query parameters lexicographically by key; the query string
///    itself is otherwise left untouched (no parameter is ever removed).
/// 8. Apply the trailing-slash rule: a path whose last segment carries a
///    `.`-extension is left as-is; a path with no extension on its last
///    segment is canonicalized to end in `/`.
pub fn normalize_url(url_str: &str, base: Option<&Url>) -> Result<Url, UrlError> {
    let mut url = match base {
        Some(base) => base
            .join(url_str)
            .map_err(|e| UrlError::Parse(e.to_string()))?,
        None => Url::parse(url_str).map_err(|e| UrlError::Parse(e.to_string()))?,
    };

    if !ALLOWED_SCHEMES.contains(&url.scheme()) {
        return Err(UrlError::InvalidScheme(format!(
            "scheme '{}' is not http or https",
            url.scheme()
        )));
    }

    let host = url.host_str().ok_or(UrlError::MissingDomain)?;
    if host.starts_with('.') {
        return Err(UrlError::Malformed(format!(
            "host '{}' starts with a dot",
            host
        )));
    }
    let lowercase_host = host.to_lowercase();
    url.set_host(Some(&lowercase_host))
        .map_err(|e| UrlError::Malformed(format!("failed to set host: {}", e)))?;

    strip_default_port(&mut url);

    url.set_fragment(None);

    if url.query().is_some() {
        let sorted = sort_query_params(&url);
        let query_string = sorted
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&");
        url.set_query(Some(&query_string));
    }

    let normalized_path = apply_trailing_slash_rule(url.path());
    url.set_path(&normalized_path);

    Ok(url)
}

fn strip_default_port(url: &mut Url) {
    let default_port = match url.scheme() {
        "http" => Some(80),
        "https" => Some(443),
        _ => None,
    };
    if url.port() == default_port {
        let _ = url.set_port(None);
    }
}

/// Sorts query parameters by key; no parameter is ever removed.
fn sort_query_params(url: &Url) -> Vec<(String, String)> {
    let mut params: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    params.sort_by(|a, b| a.0.cmp(&b.0));
    params
}

/// A path whose last segment has a `.`-extension is a file: leave it alone.
/// A path with no extension on its last segment is a directory: canonicalize
/// it to end in `/`.
fn apply_trailing_slash_rule(path: &str) -> String {
    if path.is_empty() {
        return "/".to_string();
    }

    let last_segment = path.rsplit('/').next().unwrap_or("");
    let has_extension = last_segment.contains('.');

    if has_extension {
        path.to_string()
    } else if path.ends_with('/') {
        path.to_string()
    } else {
        format!("{}/", path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercase_scheme_and_host_preserves_path_case() {
        let result = normalize_url("HTTPS://EXAMPLE.COM/Page", None).unwrap();
        assert_eq!(result.as_str(), "https://example.com/Page/");
    }

    #[test]
    fn test_strip_default_https_port() {
        let result = normalize_url("https://example.com:443/page", None).unwrap();
        assert!(result.port().is_none());
    }

    #[test]
    fn test_strip_default_http_port() {
        let result = normalize_url("http://example.com:80/page", None).unwrap();
        assert!(result.port().is_none());
    }

    #[test]
    fn test_keep_nondefault_port() {
        let result = normalize_url("https://example.com:8443/page", None).unwrap();
        assert_eq!(result.port(), Some(8443));
    }

    #[test]
    fn test_drop_fragment() {
        let result = normalize_url("https://example.com/page#section", None).unwrap();
        assert_eq!(result.fragment(), None);
    }

    #[test]
    fn test_sort_query_params_without_removing_any() {
        let result = normalize_url(
            "https://example.com/report.pdf?b=2&a=1&utm_source=twitter",
            None,
        )
        .unwrap();
        assert_eq!(
            result.as_str(),
            "https://example.com/report.pdf?a=1&b=2&utm_source=twitter"
        );
    }

    #[test]
    fn test_trailing_slash_added_for_directory_path() {
        let result = normalize_url("https://example.com/docs", None).unwrap();
        assert_eq!(result.as_str(), "https://example.com/docs/");
    }

    #[test]
    fn test_trailing_slash_preserved_for_file_path() {
        let result = normalize_url("https://example.com/report.pdf", None).unwrap();
        assert_eq!(result.as_str(), "https://example.com/report.pdf");
    }

    #[test]
    fn test_empty_path_becomes_root() {
        let result = normalize_url("https://example.com", None).unwrap();
        assert_eq!(result.as_str(), "https://example.com/");
    }

    #[test]
    fn test_reject_javascript_scheme() {
        let result = normalize_url("javascript:void(0)", None);
        assert!(matches!(result, Err(UrlError::InvalidScheme(_))));
    }

    #[test]
    fn test_reject_mailto_scheme() {
        let result = normalize_url("mailto:info@example.com", None);
        assert!(matches!(result, Err(UrlError::InvalidScheme(_))));
    }

    #[test]
    fn test_reject_tel_scheme() {
        let result = normalize_url("tel:+15551234567", None);
        assert!(matches!(result, Err(UrlError::InvalidScheme(_))));
    }

    #[test]
    fn test_reject_host_starting_with_dot() {
        // url's parser rejects this outright as a malformed authority, which
        // satisfies the same requirement as our explicit leading-dot check.
        let result = normalize_url("https://.example.com/page", None);
        assert!(result.is_err());
    }

    #[test]
    fn test_malformed_url_without_base() {
        let result = normalize_url("/relative/path", None);
        assert!(result.is_err());
    }

    #[test]
    fn test_resolve_relative_against_base() {
        let base = Url::parse("https://example.com/docs/index.html").unwrap();
        let result = normalize_url("../report.pdf", Some(&base)).unwrap();
        assert_eq!(result.as_str(), "https://example.com/report.pdf");
    }

    #[test]
    fn test_resolve_root_relative_against_base() {
        let base = Url::parse("https://example.com/docs/index.html").unwrap();
        let result = normalize_url("/reports/q1", Some(&base)).unwrap();
        assert_eq!(result.as_str(), "https://example.com/reports/q1/");
    }

    #[test]
    fn test_absolute_url_ignores_base() {
        let base = Url::parse("https://example.com/docs/index.html").unwrap();
        let result = normalize_url("https://other.com/page", Some(&base)).unwrap();
        assert_eq!(result.as_str(), "https://other.com/page/");
    }
}
