use regex::RegexBuilder;
use tracing::warn;

/// Compiles `pattern` case-insensitively and reports whether `candidate`
/// matches anywhere in the string (a `search`, not a full-string `match`).
///
/// An invalid pattern is not an error here: the caller is expected to have
/// already warned about it at config-validation time (§10.4); at match time
/// an invalid pattern simply never matches.
fn pattern_matches(pattern: &str, candidate: &str) -> bool {
    match RegexBuilder::new(pattern).case_insensitive(true).build() {
        Ok(re) => re.is_match(candidate),
        Err(e) => {
            warn!(pattern, error = %e, "skipping invalid regex pattern");
            false
        }
    }
}

/// Whether `url` matches at least one pattern in `target_patterns`.
pub fn is_target(url: &str, target_patterns: &[String]) -> bool {
    target_patterns.iter().any(|p| pattern_matches(p, url))
}

/// Whether `url` matches the single `seed_pattern`, if configured.
pub fn is_seed(url: &str, seed_pattern: Option<&str>) -> bool {
    match seed_pattern {
        Some(pattern) => pattern_matches(pattern, url),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_target_single_pattern() {
        let patterns = vec![r"\.pdf$".to_string()];
        assert!(is_target("https://example.com/report.pdf", &patterns));
        assert!(!is_target("https://example.com/page.html", &patterns));
    }

    #[test]
    fn test_is_target_multiple_patterns() {
        let patterns = vec![r"\.pdf$".to_string(), r"\.docx?$".to_string()];
        assert!(is_target("https://example.com/a.pdf", &patterns));
        assert!(is_target("https://example.com/b.doc", &patterns));
        assert!(is_target("https://example.com/c.docx", &patterns));
        assert!(!is_target("https://example.com/d.txt", &patterns));
    }

    #[test]
    fn test_is_target_case_insensitive() {
        let patterns = vec![r"\.PDF$".to_string()];
        assert!(is_target("https://example.com/report.pdf", &patterns));
    }

    #[test]
    fn test_is_target_empty_patterns() {
        let patterns: Vec<String> = vec![];
        assert!(!is_target("https://example.com/report.pdf", &patterns));
    }

    #[test]
    fn test_is_target_invalid_regex_skipped() {
        let patterns = vec!["(unterminated".to_string(), r"\.pdf$".to_string()];
        assert!(is_target("https://example.com/report.pdf", &patterns));
    }

    #[test]
    fn test_is_seed_matches() {
        assert!(is_seed("https://example.com/year/2024", Some(r"/year/")));
        assert!(!is_seed("https://example.com/about", Some(r"/year/")));
    }

    #[test]
    fn test_is_seed_absent_pattern() {
        assert!(!is_seed("https://example.com/year/2024", None));
    }

    #[test]
    fn test_is_seed_invalid_regex() {
        assert!(!is_seed("https://example.com/year/2024", Some("(unterminated")));
    }
}
