//! Utility modules shared across the crate.
//!
//! - [`date`]: UTC dates for post metadata and RSS `pubDate`
//! - [`path`]: path normalization and slugification

pub mod date;
pub mod path;

/// `"1 post"`, `"3 posts"`.
#[inline]
pub fn plural_count(count: usize, noun: &str) -> String {
    let suffix = if count == 1 { "" } else { "s" };
    format!("{count} {noun}{suffix}")
}
