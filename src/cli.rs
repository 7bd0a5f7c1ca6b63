//! Command-line interface definitions for Finance News Search.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Most options can also come from environment variables or the YAML config
//! file; see [`crate::config`] for how they are merged.

use crate::outputs::OutputFormat;
use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for the Finance News Search application.
///
/// # Examples
///
/// ```sh
/// # One search, printed as terminal cards
/// finance_news_search -q "oil prices"
///
/// # Interactive: one search per line read from stdin
/// finance_news_search --endpoint http://news.internal:8000
///
/// # Raw JSON, for piping elsewhere
/// finance_news_search -q rbi -f json
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Run a single search for this query and exit; omit to read queries from stdin
    #[arg(short, long)]
    pub query: Option<String>,

    /// Base URL of the search endpoint
    #[arg(short, long, env = "FINANCE_NEWS_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Optional path to a config.yaml file
    #[arg(short, long, env = "FINANCE_NEWS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Per-request timeout in seconds
    #[arg(long, env = "FINANCE_NEWS_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// Disable coloured terminal output
    #[arg(long)]
    pub no_color: bool,

    /// Log filter (e.g. `debug`, `finance_news_search=trace`); overrides RUST_LOG
    #[arg(long)]
    pub log_level: Option<String>,
}
