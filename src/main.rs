//! # Finance News Search
//!
//! A command-line client for a finance-news search endpoint. It sends a
//! query to `GET {endpoint}/search?query=` and renders the returned articles
//! as cards: title, link, publish date, source, a cleaned-up summary preview,
//! tag and entity chips, and a banded sentiment score.
//!
//! ## Usage
//!
//! ```sh
//! # One search
//! finance_news_search -q "oil prices"
//!
//! # Interactive: every line typed on stdin is a new search
//! finance_news_search -e http://localhost:8000
//! ```
//!
//! ## Architecture
//!
//! 1. **Config**: CLI flags, env vars and an optional YAML file become [`config::Settings`]
//! 2. **View**: [`view::SearchView`] holds the query and the latest results
//! 3. **Search**: [`api::HttpSearchClient`] performs each request; stale responses are dropped
//! 4. **Output**: [`outputs::Renderer`] prints text, Markdown or JSON to stdout
//!
//! Logs go to stderr so stdout carries only results.

use chrono::Local;
use clap::Parser;
use std::error::Error;
use std::io::IsTerminal;
use tokio::io::BufReader;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod api;
mod cli;
mod config;
mod driver;
mod models;
mod outputs;
mod utils;
mod view;

use api::HttpSearchClient;
use cli::Cli;
use config::Settings;
use outputs::Renderer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Cli::parse();

    // --- Tracing init ---
    let filter = match args.log_level.as_deref() {
        Some(level) => EnvFilter::try_new(level)?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    tfmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("finance_news_search starting up");
    debug!(?args, "Parsed CLI arguments");

    let settings = Settings::resolve(&args).await?;
    let client = HttpSearchClient::new(settings.endpoint.clone(), settings.timeout)?;
    let color = settings.color && std::io::stdout().is_terminal();
    let renderer = Renderer::new(settings.format, color);
    info!(endpoint = %client.endpoint(), ?renderer, "Search client ready");

    let mut stdout = std::io::stdout().lock();
    let view = match args.query.as_deref() {
        Some(query) => driver::run_once(query, &client, &renderer, &Local, &mut stdout).await?,
        None => {
            let stdin = BufReader::new(tokio::io::stdin());
            driver::run_interactive(stdin, client, &renderer, &Local, &mut stdout).await?
        }
    };

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        query = view.query(),
        shown = view.articles().len(),
        "Execution complete"
    );
    Ok(())
}
