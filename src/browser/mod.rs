//! Page session: headless-browser page acquisition, navigation, dynamic-page
//! stabilization, and link extraction from the DOM (§4.4).
//!
//! The headless-browser dependency lives exclusively inside this module, per
//! the interface-seam guidance (§9): every other component talks to a
//! [`PageSession`] and never touches `chromiumoxide` directly.

mod context;
mod extract;
mod fetch;
mod probe;
mod session;

pub use context::BrowserContext;
pub use extract::{extract_raw_links, normalize_and_dedupe};
pub use fetch::{FetchedPage, PageFetcher};
pub use probe::{is_document_content_type, probe_content_type, ProbeResult, HAS_DOCUMENT_EXTENSION_PATTERN};
pub use session::{PageResponse, PageSession};
