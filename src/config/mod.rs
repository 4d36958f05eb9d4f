//! Site configuration management for `site.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # [site], [build], [feed]
//! ├── types/         # ConfigError, ConfigDiagnostics, FieldPath
//! ├── util.rs        # config file discovery
//! └── mod.rs         # SiteConfig (this file)
//! ```
//!
//! # Sections
//!
//! | Section   | Purpose                                         |
//! |-----------|-------------------------------------------------|
//! | `[site]`  | Canonical site URL                              |
//! | `[build]` | Content root, output directory, drafts          |
//! | `[feed]`  | Feed output path                                |

pub mod section;
pub mod types;
mod util;

use util::find_config_file;

pub use section::{BuildSection, FeedSection, SiteSection};
pub use types::{ConfigDiagnostics, ConfigError, FieldPath};

use crate::{
    cli::{Cli, Commands},
    log,
    utils::path::normalize_path,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use url::Url;

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing site.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    #[serde(default)]
    pub site: SiteSection,

    #[serde(default)]
    pub build: BuildSection,

    #[serde(default)]
    pub feed: FeedSection,
}

impl SiteConfig {
    /// Load configuration for a CLI invocation.
    ///
    /// Searches upward from cwd for the config file; the project root is the
    /// directory containing it.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;
        let config_path = find_config_file(&cwd, &cli.config)
            .ok_or_else(|| ConfigError::NotFound(cli.config.clone()))?;
        Self::load_from(&config_path, cli)
    }

    /// Load, apply CLI overrides, normalize and validate.
    fn load_from(config_path: &Path, cli: &Cli) -> Result<Self> {
        let mut config = Self::from_path(config_path)?;

        // Must run before normalization turns relative paths absolute
        config.validate_paths()?;

        config.config_path = normalize_path(config_path);
        let root = config
            .config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        config.apply_command_options(cli);
        config.normalize_paths(&root);
        config.validate(cli.is_build())?;

        Ok(config)
    }

    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::from)?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })
        .map_err(ConfigError::from)?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    /// Root of the content collections.
    pub fn content_dir(&self) -> &Path {
        &self.build.content
    }

    /// Output directory.
    pub fn output_dir(&self) -> &Path {
        &self.build.output
    }

    /// Where the prerendered feed is written.
    pub fn feed_output_path(&self) -> PathBuf {
        self.build.output.join(&self.feed.path)
    }

    /// Canonical site URL.
    pub fn site_url(&self) -> Result<Url> {
        let raw = self.site.url.as_deref().ok_or_else(|| {
            ConfigError::Validation(format!("{} is not configured", SiteSection::FIELDS.url))
        })?;
        Url::parse(raw).with_context(|| format!("invalid site URL `{raw}`"))
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    /// Apply global and command-specific CLI options.
    fn apply_command_options(&mut self, cli: &Cli) {
        Self::update_option(&mut self.build.content, cli.content.as_ref());
        Self::update_option(&mut self.build.output, cli.output.as_ref());

        match &cli.command {
            Commands::Build { build_args } => {
                if let Some(ref url) = build_args.site_url {
                    self.site.url = Some(url.clone());
                }
                self.build.drafts |= build_args.drafts;
            }
            Commands::Query { args } => {
                self.build.drafts |= args.drafts;
            }
        }
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    // ========================================================================
    // path normalization
    // ========================================================================

    /// Resolve build directories against the project root.
    ///
    /// `feed.path` stays relative; it is joined onto the output directory
    /// at write time.
    fn normalize_paths(&mut self, root: &Path) {
        let root = normalize_path(root);
        self.build.content = normalize_path(&root.join(&self.build.content));
        self.build.output = normalize_path(&root.join(&self.build.output));
        self.root = root;
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate raw paths before normalization.
    fn validate_paths(&self) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();
        self.feed.validate(&mut diag);
        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }

    /// Validate configuration, collecting all errors before returning.
    ///
    /// `url_required` is set for commands that emit absolute links.
    pub fn validate(&self, url_required: bool) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();

        self.site.validate(url_required, &mut diag);
        self.build.validate(&mut diag);

        diag.print_warnings();
        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config with the required `[site]` url.
/// Panics if there are unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(extra: &str) -> SiteConfig {
    let config = format!("[site]\nurl = \"https://example.com\"\n{extra}");
    let (parsed, ignored) = SiteConfig::parse_with_ignored(&config).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================
