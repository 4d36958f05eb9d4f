//! In-memory content store.

use super::{ContentError, ContentStore, Post};
use rustc_hash::FxHashMap;
use std::future::Future;

/// Collections held in memory, each in insertion order.
#[derive(Debug, Clone, Default)]
pub struct MemoryContentStore {
    collections: FxHashMap<String, Vec<Post>>,
}

impl MemoryContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a post to `collection`.
    pub fn insert(&mut self, collection: &str, post: Post) {
        self.collections
            .entry(collection.to_string())
            .or_default()
            .push(post);
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with_post(mut self, collection: &str, post: Post) -> Self {
        self.insert(collection, post);
        self
    }
}

impl ContentStore for MemoryContentStore {
    fn list(
        &self,
        collection: &str,
    ) -> impl Future<Output = Result<Vec<Post>, ContentError>> + Send {
        let posts = self.collections.get(collection).cloned().unwrap_or_default();
        async move { Ok(posts) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{content::PostMeta, utils::date::DateTimeUtc};

    fn post(slug: &str, draft: bool) -> Post {
        let mut meta = PostMeta::new(slug, "desc", DateTimeUtc::from_ymd(2023, 1, 1));
        meta.draft = draft;
        Post::new(slug, meta)
    }

    #[tokio::test]
    async fn test_keeps_insertion_order() {
        let store = MemoryContentStore::new()
            .with_post("blog", post("b", false))
            .with_post("blog", post("a", false))
            .with_post("blog", post("c", false));

        let slugs: Vec<_> = store
            .list("blog")
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.slug)
            .collect();
        assert_eq!(slugs, vec!["b", "a", "c"]);
    }

    #[tokio::test]
    async fn test_unknown_collection_is_empty() {
        let store = MemoryContentStore::new().with_post("blog", post("a", false));
        assert!(store.list("notes").await.unwrap().is_empty());
        assert!(store.list_published("notes").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_published_filters_drafts() {
        let store = MemoryContentStore::new()
            .with_post("blog", post("live", false))
            .with_post("blog", post("wip", true));

        assert_eq!(store.list("blog").await.unwrap().len(), 2);
        let published = store.list_published("blog").await.unwrap();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].slug, "live");
    }
}
