//! Lightweight HTTP content-type probe used by Type 0 / DIRECT_TARGET
//! (§4.6): a single root URL is either a target document or it isn't, which
//! doesn't need a full headless-browser session to answer.

use crate::config::UserAgentConfig;
use crate::FrontierError;
use reqwest::Client;
use std::time::Duration;

/// Content-type substrings accepted as "document-ish" (§4.6, §9 open
/// question resolved: a missing content-type with a document extension in
/// the path is also accepted).
const DOCUMENT_CONTENT_TYPES: &[&str] =
    &["pdf", "msword", "openxmlformats", "ms-excel"];

/// Path extensions accepted when the content-type header is absent.
pub const HAS_DOCUMENT_EXTENSION_PATTERN: &str = r"(?i)\.(pdf|docx?|xlsx?)$";

/// Result of probing a single URL with HEAD/GET.
#[derive(Debug, Clone)]
pub struct ProbeResult {
    pub status_code: u16,
    pub content_type: Option<String>,
}

fn build_client(user_agent: &UserAgentConfig) -> Result<Client, reqwest::Error> {
    let ua = format!(
        "{}/{} (+{}; {})",
        user_agent.crawler_name,
        user_agent.crawler_version,
        user_agent.contact_url,
        user_agent.contact_email
    );

    Client::builder()
        .user_agent(ua)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .https_only(false)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Issues a GET (servers frequently mishandle bare HEAD for document
/// downloads) and reports status and content-type without reading the body.
pub async fn probe_content_type(url: &str, user_agent: &UserAgentConfig) -> crate::Result<ProbeResult> {
    let client = build_client(user_agent).map_err(FrontierError::Reqwest)?;

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| FrontierError::Http {
            url: url.to_string(),
            source: e,
        })?;

    let status_code = response.status().as_u16();
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string());

    Ok(ProbeResult {
        status_code,
        content_type,
    })
}

/// Whether `content_type` indicates a document-ish response (§4.6).
pub fn is_document_content_type(content_type: &str) -> bool {
    let lower = content_type.to_lowercase();
    DOCUMENT_CONTENT_TYPES.iter().any(|needle| lower.contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_document_content_type_pdf() {
        assert!(is_document_content_type("application/pdf"));
    }

    #[test]
    fn test_is_document_content_type_docx() {
        assert!(is_document_content_type(
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        ));
    }

    #[test]
    fn test_is_document_content_type_excel() {
        assert!(is_document_content_type("application/vnd.ms-excel"));
    }

    #[test]
    fn test_is_document_content_type_rejects_html() {
        assert!(!is_document_content_type("text/html; charset=utf-8"));
    }

    #[test]
    fn test_extension_pattern_matches_pdf_path() {
        let re = regex::Regex::new(HAS_DOCUMENT_EXTENSION_PATTERN).unwrap();
        assert!(re.is_match("/reports/annual.pdf"));
        assert!(!re.is_match("/reports/annual.html"));
    }
}
