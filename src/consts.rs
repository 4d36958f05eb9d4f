//! Site-wide constants shared by the feed and page templates.

/// Short site name shown in headers.
pub const SITE_TITLE: &str = "DONTKNOW.DEV";

/// Title used for SEO tags and as the feed channel title.
pub const SITE_SEO_TITLE: &str = "Learn with me! - dontknow.dev";

/// Description used for SEO tags and as the feed channel description.
pub const SITE_SEO_DESCRIPTION: &str = "Join dontknow.dev to read about computers, software, and web development. Explore posts where I write about topics I'm learning about, so we can learn together!";

pub const TWITTER_URL: &str = "https://twitter.com/miguelo0098";
pub const GITHUB_URL: &str = "https://github.com/miguelo0098";
