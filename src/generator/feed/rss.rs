//! RSS 2.0 serialization of a [`FeedDocument`].

use super::{FeedDocument, FeedItem};
use anyhow::{Context, Result, anyhow};
use rss::{ChannelBuilder, GuidBuilder, Item, ItemBuilder, validation::Validate};
use url::Url;

/// Render `document` as RSS 2.0 XML.
///
/// The channel is validated before writing; an invalid channel is an error,
/// never a partially written document.
pub fn render(document: &FeedDocument) -> Result<String> {
    let items = document
        .items
        .iter()
        .map(|item| feed_item_to_rss(item, &document.site))
        .collect::<Result<Vec<_>>>()?;

    let channel = ChannelBuilder::default()
        .title(&document.title)
        .link(document.site.as_str())
        .description(&document.description)
        .items(items)
        .build();

    channel
        .validate()
        .map_err(|e| anyhow!("RSS validation failed: {e}"))?;

    let buf = channel
        .write_to(Vec::new())
        .context("failed to write RSS channel")?;
    String::from_utf8(buf).context("RSS output is not valid UTF-8")
}

/// Convert a feed item, resolving its site-relative link against `site`.
fn feed_item_to_rss(item: &FeedItem, site: &Url) -> Result<Item> {
    let link = site
        .join(&item.link)
        .with_context(|| format!("invalid item link `{}`", item.link))?
        .to_string();

    Ok(ItemBuilder::default()
        .title(item.data.title.clone())
        .link(Some(link.clone()))
        .guid(GuidBuilder::default().permalink(true).value(link).build())
        .description(item.data.description.clone())
        .pub_date(item.data.pub_date.to_rfc2822())
        .build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{content::PostMeta, utils::date::DateTimeUtc};

    fn document(site: &str, items: Vec<FeedItem>) -> FeedDocument {
        FeedDocument {
            title: "Title".into(),
            description: "Description".into(),
            site: Url::parse(site).unwrap(),
            items,
        }
    }

    fn item(link: &str) -> FeedItem {
        FeedItem {
            data: PostMeta::new(
                "Test Post",
                "A test summary",
                DateTimeUtc::new(2024, 1, 15, 9, 30, 0),
            ),
            link: link.into(),
        }
    }

    #[test]
    fn test_feed_item_to_rss_basic() {
        let site = Url::parse("https://example.com").unwrap();
        let rss_item = feed_item_to_rss(&item("/blog/test/"), &site).unwrap();

        assert_eq!(rss_item.title(), Some("Test Post"));
        assert_eq!(rss_item.link(), Some("https://example.com/blog/test/"));
        assert_eq!(rss_item.description(), Some("A test summary"));
        assert_eq!(rss_item.pub_date(), Some("Mon, 15 Jan 2024 09:30:00 GMT"));

        let guid = rss_item.guid().unwrap();
        assert!(guid.is_permalink());
        assert_eq!(guid.value(), "https://example.com/blog/test/");
    }

    #[test]
    fn test_link_resolves_against_site_root() {
        let site = Url::parse("https://example.com/some/page").unwrap();
        let rss_item = feed_item_to_rss(&item("/blog/test/"), &site).unwrap();
        assert_eq!(rss_item.link(), Some("https://example.com/blog/test/"));
    }

    #[test]
    fn test_render_escapes_markup() {
        let mut it = item("/blog/x/");
        it.data.title = "Rust & <Tokio>".into();
        let xml = render(&document("https://example.com", vec![it])).unwrap();

        assert!(xml.contains("Rust &amp; &lt;Tokio&gt;"));
        assert!(xml.contains("<rss version=\"2.0\">"));
    }

    #[test]
    fn test_render_empty_channel() {
        let xml = render(&document("https://example.com", Vec::new())).unwrap();
        assert!(xml.contains("<link>https://example.com/</link>"));
        assert!(!xml.contains("<item>"));
    }
}
