//! Path normalization and slug utilities.
//!
//! Pure functions for path manipulation. No side effects.

use std::path::{Component, Path, PathBuf};

/// Normalize a file system path to absolute form.
///
/// Tries `canonicalize()` first (resolves symlinks, `.`, `..`).
/// Falls back to:
/// - Return as-is if already absolute
/// - Join with current directory if relative
#[inline]
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
        }
    })
}

/// Slugify a single path segment.
///
/// Lowercases, turns whitespace into `-`, keeps letters, digits, `-` and `_`,
/// and drops everything else. Unicode letters are preserved.
///
/// ```ignore
/// assert_eq!(slugify_segment("Hello World!"), "hello-world");
/// ```
pub fn slugify_segment(segment: &str) -> String {
    segment
        .trim()
        .chars()
        .flat_map(char::to_lowercase)
        .filter_map(|c| match c {
            c if c.is_whitespace() => Some('-'),
            c if c.is_alphanumeric() || c == '-' || c == '_' => Some(c),
            _ => None,
        })
        .collect()
}

/// Build a slug from a content file path relative to its collection root.
///
/// The extension is dropped and every directory segment is slugified, so
/// `Rust/Hello World.md` becomes `rust/hello-world`. Returns `None` when
/// nothing usable is left.
pub fn slugify_path(relative: &Path) -> Option<String> {
    let stem = relative.with_extension("");
    let segments: Vec<String> = stem
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => s.to_str().map(slugify_segment),
            _ => None,
        })
        .filter(|s| !s.is_empty())
        .collect();

    if segments.is_empty() {
        None
    } else {
        Some(segments.join("/"))
    }
}

/// Normalize a slug given explicitly, e.g. in front matter.
///
/// Leading and trailing `/` are dropped and every segment is slugified.
/// Returns `None` for an empty slug or when any segment is empty, `.`, `..`
/// or has nothing URL-safe left after slugifying.
///
/// ```ignore
/// assert_eq!(normalize_slug("/Hello World/"), Some("hello-world".into()));
/// assert_eq!(normalize_slug("../about"), None);
/// ```
pub fn normalize_slug(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        return None;
    }

    let segments = trimmed
        .split('/')
        .map(|segment| match segment {
            "" | "." | ".." => None,
            segment => Some(slugify_segment(segment)).filter(|s| !s.is_empty()),
        })
        .collect::<Option<Vec<_>>>()?;

    Some(segments.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path_absolute() {
        let normalized = normalize_path(Path::new("/absolute/path/file.txt"));
        assert!(normalized.is_absolute());
    }

    #[test]
    fn test_normalize_path_relative() {
        let normalized = normalize_path(Path::new("relative/path/file.txt"));
        assert!(normalized.is_absolute());
    }

    #[test]
    fn test_slugify_segment() {
        assert_eq!(slugify_segment("hello-world"), "hello-world");
        assert_eq!(slugify_segment("Hello World!"), "hello-world");
        assert_eq!(slugify_segment("Rust & Tokio"), "rust--tokio");
        assert_eq!(slugify_segment("snake_case"), "snake_case");
        assert_eq!(slugify_segment("Café"), "café");
    }

    #[test]
    fn test_slugify_path() {
        assert_eq!(
            slugify_path(Path::new("hello-world.md")),
            Some("hello-world".to_string())
        );
        assert_eq!(
            slugify_path(Path::new("Rust/Hello World.mdx")),
            Some("rust/hello-world".to_string())
        );
        assert_eq!(slugify_path(Path::new("!!!.md")), None);
    }

    #[test]
    fn test_normalize_slug() {
        assert_eq!(normalize_slug("/custom-slug/"), Some("custom-slug".to_string()));
        assert_eq!(normalize_slug("notes/Hello World"), Some("notes/hello-world".to_string()));
        assert_eq!(normalize_slug("a//b"), None);
        assert_eq!(normalize_slug("../about"), None);
        assert_eq!(normalize_slug("./x"), None);
        assert_eq!(normalize_slug("/"), None);
        assert_eq!(normalize_slug("a/???"), None);
    }
}
