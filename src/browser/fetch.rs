//! The [`PageFetcher`] seam (§9): the strategy dispatcher talks to this trait
//! and never touches `chromiumoxide` or [`PageSession`] directly, which is
//! what makes the dispatcher's per-type logic testable against a stub.

use crate::browser::context::BrowserContext;
use crate::browser::session::{PageResponse, PageSession};
use async_trait::async_trait;
use std::time::Duration;
use url::Url;

/// Everything a strategy needs out of one page visit: the navigation
/// response, the links collected by [`PageSession::extract_links`], and the
/// rendered content handed to the classifier (§4.5). The page itself is
/// already closed by the time this is returned.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub response: PageResponse,
    pub links: Vec<String>,
    pub content: String,
}

/// Opens, stabilizes, extracts, and closes one page (§4.4's full sequence),
/// returning the three things a strategy operates on. Implementations own
/// the entire suspension-point sequence named in §5 for a single visit.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &Url, navigation_timeout: Duration) -> crate::Result<FetchedPage>;
}

#[async_trait]
impl PageFetcher for BrowserContext {
    async fn fetch(&self, url: &Url, navigation_timeout: Duration) -> crate::Result<FetchedPage> {
        let (session, response) = PageSession::open(self, url, navigation_timeout).await?;
        session.stabilize().await?;
        let links = session.extract_links(url).await?;
        let content = session.content().await?;
        session.close().await?;
        Ok(FetchedPage {
            response,
            links,
            content,
        })
    }
}
