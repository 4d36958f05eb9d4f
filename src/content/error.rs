//! Content store error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while locating, reading or parsing posts.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("`{0}` has no front matter (expected `---` or `+++` block)")]
    MissingFrontmatter(PathBuf),

    #[error("invalid front matter in `{path}`: {message}")]
    Frontmatter { path: PathBuf, message: String },

    #[error("no usable slug for `{0}`")]
    InvalidSlug(PathBuf),

    #[error("duplicate slug `{slug}` in `{first}` and `{second}`")]
    DuplicateSlug {
        slug: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("content scan of collection `{collection}` failed: {message}")]
    Scan { collection: String, message: String },
}
