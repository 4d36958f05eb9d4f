//! `[feed]` section configuration.
//!
//! ```toml
//! [feed]
//! path = "rss.xml"   # Output path of the feed, relative to `build.output`
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};
use std::path::{Component, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedSection {
    /// Output path for the feed file.
    pub path: PathBuf,
}

impl Default for FeedSection {
    fn default() -> Self {
        Self {
            path: "rss.xml".into(),
        }
    }
}

pub struct FeedSectionFields {
    pub path: FieldPath,
}

impl FeedSection {
    pub const FIELDS: FeedSectionFields = FeedSectionFields {
        path: FieldPath::new("feed.path"),
    };

    /// Validate the raw (not yet normalized) feed path.
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.path.as_os_str().is_empty() || self.path.file_name().is_none() {
            diag.error_with_hint(
                Self::FIELDS.path,
                "must name a file",
                "e.g.: \"rss.xml\"",
            );
        } else if self.path.is_absolute() || self.path.has_root() {
            diag.error_with_hint(
                Self::FIELDS.path,
                format!("{} must be relative to the output directory", self.path.display()),
                "e.g.: \"rss.xml\"",
            );
        } else if self
            .path
            .components()
            .any(|c| matches!(c, Component::ParentDir))
        {
            diag.error_with_hint(
                Self::FIELDS.path,
                format!("{} escapes the output directory", self.path.display()),
                "remove `..` components",
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    fn diagnose(path: &str) -> ConfigDiagnostics {
        let mut diag = ConfigDiagnostics::new();
        FeedSection { path: path.into() }.validate(&mut diag);
        diag
    }

    #[test]
    fn test_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.feed.path, PathBuf::from("rss.xml"));
    }

    #[test]
    fn test_custom_config() {
        let config = test_parse_config("[feed]\npath = \"feeds/blog.xml\"");
        assert_eq!(config.feed.path, PathBuf::from("feeds/blog.xml"));
    }

    #[test]
    fn test_validate_path() {
        assert!(diagnose("rss.xml").is_empty());
        assert!(diagnose("feeds/blog.xml").is_empty());
        assert_eq!(diagnose("").len(), 1);
        assert_eq!(diagnose("/rss.xml").len(), 1);
        assert_eq!(diagnose("../rss.xml").len(), 1);
    }
}
