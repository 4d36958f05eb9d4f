//! `dontknow query`: dump blog posts and site constants as JSON.
//!
//! Output shape:
//!
//! ```json
//! {
//!   "site": { "title": "DONTKNOW.DEV", "seoTitle": "...", "url": "https://dontknow.dev/", ... },
//!   "posts": [ { "slug": "hello-world", "link": "/blog/hello-world/", "title": "Hello", ... } ]
//! }
//! ```

use crate::{
    cli::QueryArgs,
    config::SiteConfig,
    consts::{GITHUB_URL, SITE_SEO_DESCRIPTION, SITE_SEO_TITLE, SITE_TITLE, TWITTER_URL},
    content::{ContentStore, FsContentStore},
    generator::feed::{BLOG_COLLECTION, FeedItem},
    debug, log,
    utils::plural_count,
};
use anyhow::{Context, Result};
use serde::Serialize;
use std::{fs, io::Write};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SiteInfo {
    title: &'static str,
    seo_title: &'static str,
    seo_description: &'static str,
    twitter_url: &'static str,
    github_url: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<String>,
}

#[derive(Debug, Serialize)]
struct QueryPost {
    slug: String,
    #[serde(flatten)]
    item: FeedItem,
}

#[derive(Debug, Serialize)]
struct QueryResult {
    site: SiteInfo,
    posts: Vec<QueryPost>,
}

/// Execute query command, returning the number of posts written.
pub fn run_query(args: &QueryArgs, config: &SiteConfig) -> Result<usize> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;
    let result = runtime.block_on(collect(config))?;
    debug!("query"; "found {}", plural_count(result.posts.len(), "post"));

    let formatted = if args.pretty {
        serde_json::to_string_pretty(&result)?
    } else {
        serde_json::to_string(&result)?
    };

    if let Some(ref output_path) = args.output {
        let mut file = fs::File::create(output_path)
            .with_context(|| format!("Failed to create {}", output_path.display()))?;
        writeln!(file, "{}", formatted)?;
        log!("query"; "wrote output to {}", output_path.display());
    } else {
        println!("{}", formatted);
    }

    Ok(result.posts.len())
}

async fn collect(config: &SiteConfig) -> Result<QueryResult> {
    let store = FsContentStore::new(config.content_dir()).with_drafts(config.build.drafts);
    let posts = store.list_published(BLOG_COLLECTION).await?;

    Ok(QueryResult {
        site: SiteInfo {
            title: SITE_TITLE,
            seo_title: SITE_SEO_TITLE,
            seo_description: SITE_SEO_DESCRIPTION,
            twitter_url: TWITTER_URL,
            github_url: GITHUB_URL,
            url: config.site_url().ok().map(String::from),
        },
        posts: posts
            .into_iter()
            .map(|post| QueryPost {
                slug: post.slug.clone(),
                item: FeedItem::from(post),
            })
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config_in(tmp: &TempDir) -> SiteConfig {
        let mut config = SiteConfig::default();
        config.build.content = tmp.path().join("content");
        config
    }

    #[tokio::test]
    async fn test_collect_json_shape() {
        let tmp = TempDir::new().unwrap();
        let blog = tmp.path().join("content/blog");
        fs::create_dir_all(&blog).unwrap();
        fs::write(
            blog.join("hello-world.md"),
            "---\ntitle: Hello\ndescription: First post\npubDate: 2023-01-01\ntags: [intro]\n---\n",
        )
        .unwrap();

        let mut config = config_in(&tmp);
        config.site.url = Some("https://dontknow.dev".into());

        let result = collect(&config).await.unwrap();
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["site"]["title"], SITE_TITLE);
        assert_eq!(json["site"]["githubUrl"], GITHUB_URL);
        assert_eq!(json["site"]["url"], "https://dontknow.dev/");

        let post = &json["posts"][0];
        assert_eq!(post["slug"], "hello-world");
        assert_eq!(post["link"], "/blog/hello-world/");
        assert_eq!(post["title"], "Hello");
        assert_eq!(post["pubDate"], "2023-01-01T00:00:00Z");
        assert_eq!(post["tags"][0], "intro");
    }

    #[tokio::test]
    async fn test_collect_without_url_or_posts() {
        let tmp = TempDir::new().unwrap();
        let result = collect(&config_in(&tmp)).await.unwrap();
        let json = serde_json::to_value(&result).unwrap();

        assert!(json["site"].get("url").is_none());
        assert_eq!(json["posts"], serde_json::json!([]));
    }

    #[test]
    fn test_run_query_writes_file() {
        let tmp = TempDir::new().unwrap();
        let output = tmp.path().join("posts.json");
        let args = QueryArgs {
            drafts: false,
            pretty: true,
            output: Some(output.clone()),
        };

        assert_eq!(run_query(&args, &config_in(&tmp)).unwrap(), 0);
        let written = fs::read_to_string(output).unwrap();
        assert!(written.contains("\"seoTitle\""));
    }
}
