//! `[site]` section configuration.
//!
//! ```toml
//! [site]
//! url = "https://dontknow.dev"   # canonical domain, used for absolute feed links
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};
use url::Url;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSection {
    /// Canonical site URL (e.g., "https://example.com").
    pub url: Option<String>,
}

pub struct SiteSectionFields {
    pub url: FieldPath,
}

impl SiteSection {
    pub const FIELDS: SiteSectionFields = SiteSectionFields {
        url: FieldPath::new("site.url"),
    };

    /// Validate site configuration.
    ///
    /// # Checks
    /// - If `url_required`, `url` must be set
    /// - `url` must parse, use http(s) and have a host
    pub fn validate(&self, url_required: bool, diag: &mut ConfigDiagnostics) {
        let Some(url_str) = &self.url else {
            if url_required {
                diag.error_with_hint(
                    Self::FIELDS.url,
                    format!("{} is required to build the feed", Self::FIELDS.url),
                    format!(
                        "set {}, e.g.: \"https://example.com\", or pass --site-url",
                        Self::FIELDS.url
                    ),
                );
            }
            return;
        };

        match Url::parse(url_str) {
            Ok(parsed) => {
                if !matches!(parsed.scheme(), "http" | "https") {
                    diag.error_with_hint(
                        Self::FIELDS.url,
                        format!(
                            "scheme '{}' not supported, must be http or https",
                            parsed.scheme()
                        ),
                        "use format like https://example.com",
                    );
                }
                if parsed.host_str().is_none() {
                    diag.error_with_hint(
                        Self::FIELDS.url,
                        "URL must have a valid host",
                        "use format like https://example.com",
                    );
                }
            }
            Err(e) => {
                diag.error_with_hint(
                    Self::FIELDS.url,
                    format!("invalid URL: {}", e),
                    "use format like https://example.com",
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diagnose(url: Option<&str>, required: bool) -> ConfigDiagnostics {
        let section = SiteSection {
            url: url.map(str::to_string),
        };
        let mut diag = ConfigDiagnostics::new();
        section.validate(required, &mut diag);
        diag
    }

    #[test]
    fn test_valid_url() {
        assert!(diagnose(Some("https://dontknow.dev"), true).is_empty());
        assert!(diagnose(Some("http://localhost:4321/"), true).is_empty());
    }

    #[test]
    fn test_missing_url() {
        assert_eq!(diagnose(None, true).len(), 1);
        assert!(diagnose(None, false).is_empty());
    }

    #[test]
    fn test_invalid_urls() {
        assert_eq!(diagnose(Some("dontknow.dev"), false).len(), 1);
        assert_eq!(diagnose(Some("ftp://dontknow.dev"), false).len(), 1);
        // `mailto:` parses but has neither http scheme nor host
        assert_eq!(diagnose(Some("mailto:me@dontknow.dev"), false).len(), 2);
    }
}
