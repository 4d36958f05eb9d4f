//! dontknow - site config, shared constants and the RSS feed of dontknow.dev.

#![allow(dead_code)]

mod cli;
mod config;
mod consts;
mod content;
mod generator;
mod logger;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::SiteConfig;
use std::time::Instant;
use utils::plural_count;

fn main() {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    if let Commands::Build { build_args } = &cli.command {
        logger::set_verbose(build_args.verbose);
    }

    let start = Instant::now();
    let result = SiteConfig::load(&cli).and_then(|config| run(&cli.command, &config));

    if !logger::finish(command_name(&cli.command), &result, start.elapsed()) {
        std::process::exit(1);
    }
}

/// Run a command, returning the summary for its status line.
fn run(command: &Commands, config: &SiteConfig) -> Result<String> {
    match command {
        Commands::Build { .. } => {
            cli::build::build_site(config).map(|path| format!("built {}", path.display()))
        }
        Commands::Query { args } => cli::query::run_query(args, config)
            .map(|count| format!("queried {}", plural_count(count, "post"))),
    }
}

const fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Build { .. } => "build",
        Commands::Query { .. } => "query",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::TempDir;

    #[test]
    fn test_query_failure_is_reported() {
        let tmp = TempDir::new().unwrap();
        let output = tmp.path().join("missing/posts.json");
        let cli = Cli::parse_from(["dontknow", "query", "-o", output.to_str().unwrap()]);

        let mut config = SiteConfig::default();
        config.build.content = tmp.path().join("content");

        let result = run(&cli.command, &config);
        assert!(result.is_err());
        assert!(!logger::finish(command_name(&cli.command), &result, Duration::ZERO));
    }

    #[test]
    fn test_query_success_summary() {
        let tmp = TempDir::new().unwrap();
        let output = tmp.path().join("posts.json");
        let cli = Cli::parse_from(["dontknow", "query", "-o", output.to_str().unwrap()]);

        let mut config = SiteConfig::default();
        config.build.content = tmp.path().join("content");

        let result = run(&cli.command, &config);
        assert_eq!(result.as_deref().ok(), Some("queried 0 posts"));
        assert!(logger::finish("query", &result, Duration::ZERO));
    }
}
