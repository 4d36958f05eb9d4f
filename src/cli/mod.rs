//! Command-line interface module.
//!
//! The CLI is the hosting layer for the endpoints: it builds the request
//! context from `site.toml`, picks the content store and decides where the
//! response goes.

mod args;
pub mod build;
pub mod query;

pub use args::{BuildArgs, Cli, Commands, QueryArgs};
