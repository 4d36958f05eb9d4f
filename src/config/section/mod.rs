//! Configuration section definitions.
//!
//! Each module corresponds to a section in `site.toml`:
//!
//! | Module  | TOML Section | Purpose                               |
//! |---------|--------------|---------------------------------------|
//! | `build` | `[build]`    | Content and output directories        |
//! | `feed`  | `[feed]`     | Feed output path                      |
//! | `site`  | `[site]`     | Canonical site URL                    |

mod build;
mod feed;
mod site;

pub use build::BuildSection;
pub use feed::FeedSection;
pub use site::SiteSection;
