//! Output generation for search results.
//!
//! # Submodules
//!
//! - [`card`]: Pure projection of an article into what its card shows
//! - [`text`]: Coloured terminal cards
//! - [`markdown`]: Markdown cards
//! - [`json`]: The raw article list as JSON
//!
//! [`Renderer`] picks one of these according to the configured [`OutputFormat`].

pub mod card;
pub mod json;
pub mod markdown;
pub mod text;

use crate::models::Article;
use chrono::TimeZone;
use clap::ValueEnum;
use serde::Deserialize;
use std::fmt::Display;

/// How results are written to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Cards for the terminal
    #[default]
    Text,
    /// Cards as Markdown
    Markdown,
    /// The article list as returned by the endpoint
    Json,
}

/// Renders a result list in one output format.
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    pub format: OutputFormat,
    pub color: bool,
}

impl Renderer {
    pub fn new(format: OutputFormat, color: bool) -> Self {
        Self { format, color }
    }

    /// Render `articles`, formatting publish dates in `tz`.
    pub fn render<Tz>(&self, articles: &[Article], tz: &Tz) -> Result<String, serde_json::Error>
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        match self.format {
            OutputFormat::Json => json::articles_to_json(articles),
            OutputFormat::Markdown => {
                Ok(markdown::cards_to_markdown(&card::render_results(articles, tz)))
            }
            OutputFormat::Text => Ok(text::cards_to_text(
                &card::render_results(articles, tz),
                self.color,
            )),
        }
    }
}
