//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// dontknow.dev site tool
#[derive(Parser, Debug, Clone)]
#[command(name = "dontknow", version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Output directory path (relative to project root)
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    /// Content directory path (relative to project root)
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub content: Option<PathBuf>,

    /// Config file path (default: site.toml)
    #[arg(short = 'C', long, default_value = "site.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Prerender the RSS feed into the output directory
    #[command(visible_alias = "b")]
    Build {
        #[command(flatten)]
        build_args: BuildArgs,
    },

    /// Print blog posts and site constants as JSON
    #[command(visible_alias = "q")]
    Query {
        #[command(flatten)]
        args: QueryArgs,
    },
}

/// Build command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct BuildArgs {
    /// Override site URL for deployment.
    ///
    /// Useful for preview deployments where the public URL differs from the
    /// production domain, without editing site.toml.
    ///
    /// Example: dontknow build --site-url "https://deploy-preview-42--dontknow.netlify.app"
    #[arg(short = 'U', long = "site-url", value_hint = clap::ValueHint::Url)]
    pub site_url: Option<String>,

    /// Include draft posts in the feed
    #[arg(short, long)]
    pub drafts: bool,

    /// Enable verbose output for debugging
    #[arg(short = 'V', long)]
    pub verbose: bool,
}

/// Query command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct QueryArgs {
    /// Include draft posts in results
    #[arg(short, long)]
    pub drafts: bool,

    /// Pretty-print JSON output
    #[arg(short, long)]
    pub pretty: bool,

    /// Write output to file instead of stdout
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,
}

impl Cli {
    pub const fn is_build(&self) -> bool {
        matches!(self.command, Commands::Build { .. })
    }
}
