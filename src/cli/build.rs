//! `dontknow build`: prerender the feed endpoint.
//!
//! Runs `GET /rss.xml` once against the file-backed content store and writes
//! the response body to `<build.output>/<feed.path>`.

use crate::{
    config::SiteConfig,
    content::FsContentStore,
    debug,
    generator::{RequestContext, feed},
    log,
};
use anyhow::{Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Build the site outputs. Returns the path of the written feed.
pub fn build_site(config: &SiteConfig) -> Result<PathBuf> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;
    runtime.block_on(prerender_feed(config))
}

/// Render the feed endpoint and write its body to disk.
///
/// Nothing is written when the endpoint fails.
pub async fn prerender_feed(config: &SiteConfig) -> Result<PathBuf> {
    let context = RequestContext::new(config.site_url()?);
    let store = FsContentStore::new(config.content_dir()).with_drafts(config.build.drafts);

    debug!("build"; "content root {}", store.root().display());
    let response = feed::get(&context, &store).await?;
    debug!("build"; "{} ({} bytes)", response.content_type, response.body.len());

    let path = config.feed_output_path();
    write_output(&path, response.body.as_bytes())?;

    log!("rss"; "{}", display_name(&path, config.output_dir()));
    Ok(path)
}

/// Write a file, creating parent directories as needed.
fn write_output(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}

fn display_name(path: &Path, output_dir: &Path) -> String {
    path.strip_prefix(output_dir)
        .unwrap_or(path)
        .display()
        .to_string()
}
