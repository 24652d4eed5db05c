//! # CLI Structure and Argument Parsing
//!
//! ```bash
//! # Print a page, fetching it only if it is not cached yet
//! docfetch fetch System.String --pack netcore --framework net6.0
//!
//! # Refresh a cached page
//! docfetch fetch System.String -p netcore -f net6.0 --ignore-cache
//!
//! # Where would this page live, and is it cached?
//! docfetch info System.String -p netcore -f net6.0
//!
//! # Show the effective configuration
//! docfetch --locale zh-cn config
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Main CLI structure for the `docfetch` command
#[derive(Parser, Debug, Clone)]
#[command(name = "docfetch", version, about = "Fetch and cache .NET API documentation pages")]
pub struct Cli {
    /// Enable verbose (debug) logging on stderr
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Locale to request pages in (e.g. en-us); overrides the config file
    #[arg(long, global = true, value_name = "LOCALE")]
    pub locale: Option<String>,

    /// Cache root directory; overrides the config file
    #[arg(long, global = true, value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Identifies one documentation page on the command line
#[derive(Args, Debug, Clone)]
pub struct ItemArgs {
    /// Documentation query key, e.g. `System.String`
    pub query_key: String,

    /// Reference pack the item belongs to, e.g. `netcore`
    #[arg(short, long)]
    pub pack: String,

    /// Target framework moniker, e.g. `net6.0`
    #[arg(short, long)]
    pub framework: String,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Print a documentation page, using the cache when possible
    Fetch {
        #[command(flatten)]
        item: ItemArgs,

        /// Skip the cache lookup; the result still replaces the cache entry
        #[arg(long)]
        ignore_cache: bool,

        /// Write the page to a file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Show the URL, cache path and cache state of a page
    Info {
        #[command(flatten)]
        item: ItemArgs,
    },

    /// Print the effective configuration as TOML
    Config,
}
