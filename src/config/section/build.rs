//! `[build]` section configuration.
//!
//! ```toml
//! [build]
//! content = "src/content"   # Content collections root (relative to site root)
//! output = "dist"           # Output directory for prerendered files
//! drafts = false            # Syndicate draft posts too
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildSection {
    /// Root of the content collections.
    pub content: PathBuf,
    /// Output directory.
    pub output: PathBuf,
    /// Include drafts when building.
    pub drafts: bool,
}

impl Default for BuildSection {
    fn default() -> Self {
        Self {
            content: "src/content".into(),
            output: "dist".into(),
            drafts: false,
        }
    }
}

pub struct BuildSectionFields {
    pub content: FieldPath,
    pub output: FieldPath,
    pub drafts: FieldPath,
}

impl BuildSection {
    pub const FIELDS: BuildSectionFields = BuildSectionFields {
        content: FieldPath::new("build.content"),
        output: FieldPath::new("build.output"),
        drafts: FieldPath::new("build.drafts"),
    };

    /// Validate normalized build paths.
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if !self.content.is_dir() {
            diag.warn(
                Self::FIELDS.content,
                format!("{} does not exist, the feed will be empty", self.content.display()),
            );
        }
        if self.output.is_file() {
            diag.error_with_hint(
                Self::FIELDS.output,
                format!("{} is a file", self.output.display()),
                "point it to a directory, e.g.: \"dist\"",
            );
        }
        if self.drafts {
            diag.warn(Self::FIELDS.drafts, "draft posts will be included in the feed");
        }
    }
}
