//! Endpoint handlers that turn content into generated documents.
//!
//! - **Feed**: RSS 2.0 document for blog readers (`rss.xml`)
//!
//! Handlers read posts through a [`ContentStore`](crate::content::ContentStore)
//! and never touch the filesystem themselves; the CLI decides where the
//! result ends up.

pub mod feed;

use url::Url;

/// What the hosting layer hands to an endpoint on each request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    /// Canonical site root, e.g. `https://dontknow.dev/`.
    pub site: Url,
}

impl RequestContext {
    pub fn new(site: Url) -> Self {
        Self { site }
    }
}
