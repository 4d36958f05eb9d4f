//! Blog feed endpoint (`GET /rss.xml`).
//!
//! Reads the published posts of the `blog` collection and serializes them as
//! an RSS 2.0 channel:
//!
//! ```text
//! ContentStore ──list_published("blog")──▶ [Post] ──▶ FeedDocument ──▶ rss.xml
//! ```
//!
//! Items keep the order the store returned them in. Any store or
//! serialization failure is returned as-is, so a broken collection never
//! produces a partial document.

mod rss;

use crate::{
    consts::{SITE_SEO_DESCRIPTION, SITE_SEO_TITLE},
    content::{ContentStore, Post, PostMeta},
    debug,
};
use anyhow::Result;
use serde::Serialize;
use url::Url;

use super::RequestContext;

/// Collection the feed is built from.
pub const BLOG_COLLECTION: &str = "blog";

/// MIME type of the rendered feed.
pub const CONTENT_TYPE: &str = "application/xml";

/// Site-relative link of a blog post.
#[inline]
pub fn post_link(slug: &str) -> String {
    format!("/blog/{slug}/")
}

/// One feed entry: the post's front matter plus its link.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedItem {
    #[serde(flatten)]
    pub data: PostMeta,
    /// Site-relative, always `/blog/<slug>/`.
    pub link: String,
}

impl From<Post> for FeedItem {
    fn from(post: Post) -> Self {
        Self {
            link: post_link(&post.slug),
            data: post.data,
        }
    }
}

/// The feed before serialization.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedDocument {
    pub title: String,
    pub description: String,
    pub site: Url,
    pub items: Vec<FeedItem>,
}

impl FeedDocument {
    /// Build the document for `site` from posts in store order.
    pub fn from_posts(site: Url, posts: Vec<Post>) -> Self {
        Self {
            title: SITE_SEO_TITLE.to_string(),
            description: SITE_SEO_DESCRIPTION.to_string(),
            site,
            items: posts.into_iter().map(FeedItem::from).collect(),
        }
    }

    /// Serialize as an RSS 2.0 document.
    pub fn to_xml(&self) -> Result<String> {
        rss::render(self)
    }
}

/// Rendered endpoint output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedResponse {
    pub body: String,
    pub content_type: &'static str,
}

/// Handle `GET /rss.xml`.
pub async fn get<S: ContentStore>(context: &RequestContext, store: &S) -> Result<FeedResponse> {
    let posts = store.list_published(BLOG_COLLECTION).await?;
    let document = FeedDocument::from_posts(context.site.clone(), posts);
    debug!("feed"; "{} items for {}", document.items.len(), document.site);

    Ok(FeedResponse {
        body: document.to_xml()?,
        content_type: CONTENT_TYPE,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        content::{ContentError, MemoryContentStore},
        utils::date::DateTimeUtc,
    };
    use ::rss::Channel;
    use std::future::Future;

    struct FailingStore;

    impl ContentStore for FailingStore {
        fn list(
            &self,
            collection: &str,
        ) -> impl Future<Output = Result<Vec<Post>, ContentError>> + Send {
            let collection = collection.to_string();
            async move {
                Err(ContentError::Scan {
                    collection,
                    message: "disk unplugged".into(),
                })
            }
        }
    }

    fn context() -> RequestContext {
        RequestContext::new(Url::parse("https://dontknow.dev").unwrap())
    }

    fn post(slug: &str, title: &str, day: u8) -> Post {
        Post::new(
            slug,
            PostMeta::new(title, format!("About {title}"), DateTimeUtc::from_ymd(2023, 1, day)),
        )
    }

    fn store_with(posts: Vec<Post>) -> MemoryContentStore {
        posts
            .into_iter()
            .fold(MemoryContentStore::new(), |store, p| store.with_post(BLOG_COLLECTION, p))
    }

    fn parse(body: &str) -> Channel {
        Channel::read_from(body.as_bytes()).unwrap()
    }

    #[test]
    fn test_post_link() {
        assert_eq!(post_link("hello-world"), "/blog/hello-world/");
        assert_eq!(post_link("rust/ownership"), "/blog/rust/ownership/");
    }

    #[tokio::test]
    async fn test_hello_world() {
        let mut hello = Post::new(
            "hello-world",
            PostMeta::new("Hello", "First post", DateTimeUtc::from_ymd(2023, 1, 1)),
        );
        hello.body = "# Hello".into();
        let store = store_with(vec![hello]);

        let response = get(&context(), &store).await.unwrap();
        assert_eq!(response.content_type, "application/xml");

        let channel = parse(&response.body);
        assert_eq!(channel.items().len(), 1);
        let item = &channel.items()[0];
        assert_eq!(item.title(), Some("Hello"));
        assert_eq!(item.description(), Some("First post"));
        assert_eq!(item.link(), Some("https://dontknow.dev/blog/hello-world/"));
        assert_eq!(item.pub_date(), Some("Sun, 01 Jan 2023 00:00:00 GMT"));
    }

    #[tokio::test]
    async fn test_channel_uses_site_constants() {
        let response = get(&context(), &store_with(vec![post("a", "A", 1)]))
            .await
            .unwrap();
        let channel = parse(&response.body);

        assert_eq!(channel.title(), SITE_SEO_TITLE);
        assert_eq!(channel.description(), SITE_SEO_DESCRIPTION);
        assert_eq!(channel.link(), "https://dontknow.dev/");
    }

    #[tokio::test]
    async fn test_items_follow_store_order() {
        let posts = vec![post("b", "B", 1), post("c", "C", 3), post("a", "A", 2)];
        let response = get(&context(), &store_with(posts)).await.unwrap();

        let links: Vec<_> = parse(&response.body)
            .items()
            .iter()
            .filter_map(|item| item.link().map(str::to_string))
            .collect();
        assert_eq!(
            links,
            vec![
                "https://dontknow.dev/blog/b/",
                "https://dontknow.dev/blog/c/",
                "https://dontknow.dev/blog/a/",
            ]
        );
    }

    #[tokio::test]
    async fn test_drafts_are_not_syndicated() {
        let mut draft = post("wip", "WIP", 2);
        draft.data.draft = true;
        let store = store_with(vec![post("live", "Live", 1), draft]);

        let response = get(&context(), &store).await.unwrap();
        assert_eq!(parse(&response.body).items().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_store_gives_empty_channel() {
        let response = get(&context(), &MemoryContentStore::new()).await.unwrap();
        let channel = parse(&response.body);

        assert!(channel.items().is_empty());
        assert_eq!(channel.title(), SITE_SEO_TITLE);
    }

    #[tokio::test]
    async fn test_output_is_deterministic() {
        let store = store_with(vec![post("a", "A", 1), post("b", "B", 2)]);
        let first = get(&context(), &store).await.unwrap();
        let second = get(&context(), &store).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let err = get(&context(), &FailingStore).await.unwrap_err();
        let content_err = err.downcast_ref::<ContentError>().unwrap();
        assert!(matches!(content_err, ContentError::Scan { collection, .. } if collection == "blog"));
    }

    #[test]
    fn test_document_keeps_relative_links_and_metadata() {
        let mut hello = post("hello-world", "Hello", 1);
        hello.data.tags = vec!["intro".into()];
        let document = FeedDocument::from_posts(context().site, vec![hello.clone()]);

        assert_eq!(document.items.len(), 1);
        assert_eq!(document.items[0].link, "/blog/hello-world/");
        assert_eq!(document.items[0].data, hello.data);

        let json = serde_json::to_value(&document.items[0]).unwrap();
        assert_eq!(json["title"], "Hello");
        assert_eq!(json["link"], "/blog/hello-world/");
        assert_eq!(json["tags"][0], "intro");
    }
}
