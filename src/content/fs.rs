//! File-backed content store.
//!
//! A collection is a directory under the content root:
//!
//! ```text
//! src/content/
//! └── blog/                  # collection "blog"
//!     ├── hello-world.md     # slug "hello-world"
//!     ├── _template.md       # ignored (leading underscore)
//!     └── rust/
//!         └── Ownership.mdx  # slug "rust/ownership"
//! ```
//!
//! Posts come back sorted by publication date, newest first, with the slug
//! as tie-breaker, so the enumeration order does not depend on the
//! filesystem.

use super::{ContentError, ContentStore, Post, PostMeta, frontmatter::extract_frontmatter};
use crate::{
    debug, log,
    utils::path::{normalize_slug, slugify_path},
};
use jwalk::WalkDir;
use rustc_hash::FxHashMap;
use std::{
    fs,
    future::Future,
    path::{Path, PathBuf},
};

const CONTENT_EXTENSIONS: &[&str] = &["md", "mdx"];

/// Content store reading Markdown files from disk.
#[derive(Debug, Clone)]
pub struct FsContentStore {
    root: PathBuf,
    include_drafts: bool,
}

impl FsContentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            include_drafts: false,
        }
    }

    /// Treat drafts as published (local previews).
    pub fn with_drafts(mut self, include_drafts: bool) -> Self {
        self.include_drafts = include_drafts;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ContentStore for FsContentStore {
    fn list(
        &self,
        collection: &str,
    ) -> impl Future<Output = Result<Vec<Post>, ContentError>> + Send {
        let dir = self.root.join(collection);
        let collection = collection.to_string();
        async move {
            // Directory walk and file reads are blocking; keep them off the runtime.
            let name = collection.clone();
            tokio::task::spawn_blocking(move || scan_collection(&name, &dir))
                .await
                .map_err(|e| ContentError::Scan {
                    collection,
                    message: e.to_string(),
                })?
        }
    }

    fn list_published(
        &self,
        collection: &str,
    ) -> impl Future<Output = Result<Vec<Post>, ContentError>> + Send {
        let include_drafts = self.include_drafts;
        let posts = self.list(collection);
        async move {
            let posts = posts.await?;
            Ok(posts
                .into_iter()
                .filter(|post| include_drafts || !post.is_draft())
                .collect())
        }
    }
}

/// Read every post of one collection directory.
fn scan_collection(collection: &str, dir: &Path) -> Result<Vec<Post>, ContentError> {
    if !dir.is_dir() {
        log!("warning"; "collection `{}` does not exist at {}", collection, dir.display());
        return Ok(Vec::new());
    }

    debug!("content"; "scanning {}", dir.display());

    let files = collect_content_files(collection, dir)?;

    let mut seen: FxHashMap<String, PathBuf> = FxHashMap::default();
    let mut posts = Vec::with_capacity(files.len());

    for path in files {
        let post = read_post(dir, &path)?;
        if let Some(first) = seen.get(&post.slug) {
            return Err(ContentError::DuplicateSlug {
                slug: post.slug,
                first: first.clone(),
                second: path,
            });
        }
        seen.insert(post.slug.clone(), path);
        posts.push(post);
    }

    sort_posts(&mut posts);
    debug!("content"; "collection `{}`: {} posts", collection, posts.len());
    Ok(posts)
}

/// Collect Markdown files, skipping anything under a `_`-prefixed name.
///
/// An entry the walk cannot read fails the scan instead of silently
/// shrinking the collection.
fn collect_content_files(collection: &str, dir: &Path) -> Result<Vec<PathBuf>, ContentError> {
    let entries = WalkDir::new(dir).into_iter().map(|entry| {
        entry
            .map(|e| (e.path(), e.file_type().is_file()))
            .map_err(|e| e.to_string())
    });
    filter_content_files(collection, dir, entries)
}

/// Keep the content files of a walk, sorted by path.
fn filter_content_files(
    collection: &str,
    dir: &Path,
    entries: impl IntoIterator<Item = Result<(PathBuf, bool), String>>,
) -> Result<Vec<PathBuf>, ContentError> {
    let mut files = Vec::new();
    for entry in entries {
        let (path, is_file) = entry.map_err(|message| ContentError::Scan {
            collection: collection.to_string(),
            message,
        })?;
        if is_file && is_content_file(&path) && !is_ignored(dir, &path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn is_content_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| CONTENT_EXTENSIONS.contains(&ext))
}

fn is_ignored(dir: &Path, path: &Path) -> bool {
    path.strip_prefix(dir)
        .unwrap_or(path)
        .components()
        .any(|c| c.as_os_str().to_string_lossy().starts_with('_'))
}

/// Parse a single post file.
fn read_post(dir: &Path, path: &Path) -> Result<Post, ContentError> {
    let source =
        fs::read_to_string(path).map_err(|err| ContentError::Io(path.to_path_buf(), err))?;

    let (mut map, body) = extract_frontmatter(&source)
        .map_err(|e| ContentError::Frontmatter {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .ok_or_else(|| ContentError::MissingFrontmatter(path.to_path_buf()))?;

    // A front matter `slug` overrides the file-derived one.
    let slug = match map.remove("slug") {
        Some(serde_json::Value::String(slug)) => normalize_slug(&slug),
        Some(_) => None,
        None => slugify_path(path.strip_prefix(dir).unwrap_or(path)),
    }
    .ok_or_else(|| ContentError::InvalidSlug(path.to_path_buf()))?;

    let data: PostMeta = serde_json::from_value(serde_json::Value::Object(map)).map_err(|e| {
        ContentError::Frontmatter {
            path: path.to_path_buf(),
            message: e.to_string(),
        }
    })?;

    Ok(Post {
        slug,
        data,
        body: body.to_string(),
    })
}

/// Newest first; equal dates fall back to slug order.
fn sort_posts(posts: &mut [Post]) {
    posts.sort_by(|a, b| {
        b.data
            .pub_date
            .cmp(&a.data.pub_date)
            .then_with(|| a.slug.cmp(&b.slug))
    });
}
