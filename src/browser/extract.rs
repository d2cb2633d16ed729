//! Raw link discovery from a stabilized page's HTML (§4.4 extract_links).
//!
//! Four sources are scanned: `<a href>`, `onclick` navigation handlers,
//! `data-href`/`data-url` attributes, and dedicated file-URL selectors for
//! common document extensions. Every candidate is later pushed through the
//! §4.1 normalizer by the caller.

use crate::url::normalize_url;
use regex::Regex;
use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

/// `window.location = '...'` / `window.location.href = '...'` inside an
/// `onclick` attribute.
const ONCLICK_LOCATION_PATTERN: &str = r#"window\.location(?:\.href)?\s*=\s*['"]([^'"]+)['"]"#;

/// Document-ish extensions recognized by the dedicated file-URL scan,
/// mirroring the Type-0 content-type check (§4.6).
const DOCUMENT_EXTENSION_PATTERN: &str = r"(?i)\.(pdf|docx?|xlsx?|txt|csv|zip|rar)(?:[?#]|$)";

/// Extracts every raw (not yet normalized) candidate link from `html`.
pub fn extract_raw_links(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut links = Vec::new();

    if let Ok(selector) = Selector::parse("a[href]") {
        for element in document.select(&selector) {
            if let Some(href) = element.value().attr("href") {
                links.push(href.to_string());
            }
        }
    }

    let onclick_location_re = Regex::new(ONCLICK_LOCATION_PATTERN).expect("valid pattern");
    if let Ok(selector) = Selector::parse("[onclick]") {
        for element in document.select(&selector) {
            if let Some(onclick) = element.value().attr("onclick") {
                if let Some(captures) = onclick_location_re.captures(onclick) {
                    links.push(captures[1].to_string());
                }
            }
        }
    }

    if let Ok(selector) = Selector::parse("[data-href], [data-url]") {
        for element in document.select(&selector) {
            if let Some(href) = element
                .value()
                .attr("data-href")
                .or_else(|| element.value().attr("data-url"))
            {
                links.push(href.to_string());
            }
        }
    }

    // Dedicated file-URL pass: any href or onclick-embedded URL carrying a
    // document extension, even outside the selectors above.
    let document_extension_re = Regex::new(DOCUMENT_EXTENSION_PATTERN).expect("valid pattern");
    if let Ok(selector) = Selector::parse("a[href], [onclick]") {
        for element in document.select(&selector) {
            let candidates = [
                element.value().attr("href"),
                element.value().attr("onclick"),
            ];
            for candidate in candidates.into_iter().flatten() {
                for m in document_extension_re.find_iter(candidate) {
                    // The match only anchors the extension; recover the
                    // surrounding URL-looking token it sits inside.
                    let start = candidate[..m.start()]
                        .rfind(|c: char| c == '\'' || c == '"' || c.is_whitespace())
                        .map(|i| i + 1)
                        .unwrap_or(0);
                    let end = candidate[m.end()..]
                        .find(|c: char| c == '\'' || c == '"' || c.is_whitespace())
                        .map(|i| m.end() + i)
                        .unwrap_or(candidate.len());
                    links.push(candidate[start..end].to_string());
                }
            }
        }
    }

    links
}

/// Normalizes each candidate against `page_url` and deduplicates while
/// preserving first-seen order.
pub fn normalize_and_dedupe(raw_links: Vec<String>, page_url: &Url) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut result = Vec::new();

    for raw in raw_links {
        if let Ok(normalized) = normalize_url(&raw, Some(page_url)) {
            let s = normalized.to_string();
            if seen.insert(s.clone()) {
                result.push(s);
            }
        }
    }

    result
}
