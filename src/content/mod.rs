//! Blog content: post records and the stores that serve them.
//!
//! | Module        | Purpose                                          |
//! |---------------|--------------------------------------------------|
//! | `error`       | `ContentError`                                   |
//! | `frontmatter` | `---` / `+++` front matter extraction            |
//! | `fs`          | `FsContentStore` (Markdown files on disk)        |
//! | `memory`      | `MemoryContentStore` (in-memory collections)     |
//!
//! Consumers only see the [`ContentStore`] capability, so the feed endpoint
//! works the same against either backing.

mod error;
mod frontmatter;
mod fs;
mod memory;

pub use error::ContentError;
pub use fs::FsContentStore;
pub use memory::MemoryContentStore;

use crate::utils::date::DateTimeUtc;
use serde::{Deserialize, Serialize};
use std::future::Future;

/// A JSON object map for storing arbitrary metadata fields.
pub type JsonMap = serde_json::Map<String, serde_json::Value>;

/// Deserialize tags, treating `null` as empty vec
fn deserialize_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value: Option<Vec<String>> = Option::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}

/// Post metadata from front matter.
///
/// # Standard Fields
///
/// | Field         | Type            | Description                   |
/// |---------------|-----------------|-------------------------------|
/// | `title`       | `String`        | Post title (required)         |
/// | `description` | `String`        | Short summary (required)      |
/// | `pubDate`     | `DateTimeUtc`   | Publication date (required)   |
/// | `updatedDate` | `DateTimeUtc`   | Last update date              |
/// | `heroImage`   | `String`        | Cover image path              |
/// | `tags`        | `Vec<String>`   | Categorization tags           |
/// | `draft`       | `bool`          | Draft status (default: false) |
///
/// Snake-case spellings (`pub_date`, ...) are accepted as aliases. Anything
/// else is kept in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostMeta {
    pub title: String,
    pub description: String,
    #[serde(alias = "pub_date", alias = "date")]
    pub pub_date: DateTimeUtc,
    #[serde(default, alias = "updated_date", skip_serializing_if = "Option::is_none")]
    pub updated_date: Option<DateTimeUtc>,
    #[serde(default, alias = "hero_image", skip_serializing_if = "Option::is_none")]
    pub hero_image: Option<String>,
    #[serde(default, deserialize_with = "deserialize_tags")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub draft: bool,
    /// Additional user-defined fields.
    #[serde(flatten, default)]
    pub extra: JsonMap,
}

impl PostMeta {
    /// Minimal metadata with the three required fields.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        pub_date: DateTimeUtc,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            pub_date,
            updated_date: None,
            hero_image: None,
            tags: Vec::new(),
            draft: false,
            extra: JsonMap::new(),
        }
    }
}

/// A single blog entry as returned by a [`ContentStore`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Post {
    /// Unique, URL-safe identifier within its collection.
    pub slug: String,
    /// Front matter.
    pub data: PostMeta,
    /// Markdown body after the front matter block.
    #[serde(skip)]
    pub body: String,
}

impl Post {
    pub fn new(slug: impl Into<String>, data: PostMeta) -> Self {
        Self {
            slug: slug.into(),
            data,
            body: String::new(),
        }
    }

    #[inline]
    pub fn is_draft(&self) -> bool {
        self.data.draft
    }
}

/// Read access to named post collections.
///
/// Implementations decide where posts live; callers only rely on the
/// returned order being the order the store enumerates them in.
pub trait ContentStore: Send + Sync {
    /// Every post in `collection`, drafts included.
    fn list(
        &self,
        collection: &str,
    ) -> impl Future<Output = Result<Vec<Post>, ContentError>> + Send;

    /// Posts in `collection` that are not drafts, in store order.
    fn list_published(
        &self,
        collection: &str,
    ) -> impl Future<Output = Result<Vec<Post>, ContentError>> + Send {
        async move {
            let posts = self.list(collection).await?;
            Ok(posts.into_iter().filter(|post| !post.is_draft()).collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_meta_camel_case() {
        let json = r#"{"title": "Hello", "description": "First post", "pubDate": "2023-01-01",
            "heroImage": "/hero.png", "tags": ["rust"]}"#;
        let meta: PostMeta = serde_json::from_str(json).unwrap();
        assert_eq!(meta.title, "Hello");
        assert_eq!(meta.pub_date, DateTimeUtc::from_ymd(2023, 1, 1));
        assert_eq!(meta.hero_image.as_deref(), Some("/hero.png"));
        assert_eq!(meta.tags, vec!["rust"]);
        assert!(!meta.draft);
        assert!(meta.extra.is_empty());
    }

    #[test]
    fn test_post_meta_snake_case_aliases() {
        let json = r#"{"title": "T", "description": "D", "pub_date": "2023-01-01",
            "updated_date": "2023-02-01"}"#;
        let meta: PostMeta = serde_json::from_str(json).unwrap();
        assert_eq!(meta.updated_date, Some(DateTimeUtc::from_ymd(2023, 2, 1)));
    }

    #[test]
    fn test_post_meta_missing_required_field() {
        let json = r#"{"title": "T", "pubDate": "2023-01-01"}"#;
        let err = serde_json::from_str::<PostMeta>(json).unwrap_err();
        assert!(err.to_string().contains("description"));
    }

    #[test]
    fn test_post_meta_null_tags_and_extra() {
        let json = r#"{"title": "T", "description": "D", "pubDate": "2023-01-01",
            "tags": null, "series": "intro"}"#;
        let meta: PostMeta = serde_json::from_str(json).unwrap();
        assert!(meta.tags.is_empty());
        assert_eq!(
            meta.extra.get("series").and_then(|v| v.as_str()),
            Some("intro")
        );
    }

    #[test]
    fn test_post_meta_serialize_skips_empty_optionals() {
        let meta = PostMeta::new("T", "D", DateTimeUtc::from_ymd(2023, 1, 1));
        let json = serde_json::to_value(&meta).unwrap();
        assert_eq!(json["pubDate"], "2023-01-01T00:00:00Z");
        assert!(json.get("heroImage").is_none());
        assert!(json.get("updatedDate").is_none());
    }

    #[test]
    fn test_post_body_not_serialized() {
        let mut post = Post::new("hello", PostMeta::new("T", "D", DateTimeUtc::from_ymd(2023, 1, 1)));
        post.body = "# secret body".into();
        let json = serde_json::to_string(&post).unwrap();
        assert!(!json.contains("secret body"));
        assert!(json.contains("\"slug\":\"hello\""));
    }
}
