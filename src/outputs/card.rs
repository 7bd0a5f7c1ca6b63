//! Projection of an [`Article`] into what a result card displays.
//!
//! Rendering is split in two: this module decides *what* a card shows
//! (stripped summary, chips, placeholders, sentiment band), and the format
//! modules ([`super::text`], [`super::markdown`]) decide *how* it looks.

use crate::models::Article;
use crate::utils::{split_chips, summary_preview};
use chrono::TimeZone;
use std::fmt::Display;
use tracing::warn;

/// Shown instead of any cards when the result list is empty.
pub const NO_ARTICLES: &str = "No articles yet. Try searching!";
pub const NO_TAGS: &str = "No tags available";
pub const NO_ENTITIES: &str = "No entities extracted";
pub const NOT_ANALYZED: &str = "Not analyzed";
pub const UNKNOWN_DATE: &str = "Unknown date";

/// Locale-style timestamp, e.g. `1/1/2024, 12:00:00 AM`.
const DATE_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// Everything one result card displays, already cleaned up.
#[derive(Debug, Clone, PartialEq)]
pub struct ArticleCard {
    // left column
    pub title: String,
    pub link: String,
    pub published: DateLabel,
    pub source: String,
    // right column
    pub summary: String,
    pub tags: ChipList,
    pub entities: ChipList,
    pub sentiment: SentimentBadge,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateLabel {
    Formatted(String),
    Unknown,
}

impl DateLabel {
    pub fn as_str(&self) -> &str {
        match self {
            DateLabel::Formatted(s) => s,
            DateLabel::Unknown => UNKNOWN_DATE,
        }
    }
}

/// Either a muted placeholder or a row of chips.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChipList {
    Placeholder(&'static str),
    Chips(Vec<String>),
}

impl ChipList {
    fn from_field(field: Option<&str>, placeholder: &'static str) -> Self {
        match split_chips(field) {
            Some(chips) => ChipList::Chips(chips),
            None => ChipList::Placeholder(placeholder),
        }
    }
}

/// Colour band of a sentiment score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentimentBand {
    Positive,
    Neutral,
    Negative,
}

impl SentimentBand {
    /// `>= 4` is positive, `<= 2` is negative, anything between is neutral.
    pub fn from_score(score: f64) -> Self {
        if score >= 4.0 {
            SentimentBand::Positive
        } else if score <= 2.0 {
            SentimentBand::Negative
        } else {
            SentimentBand::Neutral
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SentimentBand::Positive => "positive",
            SentimentBand::Neutral => "neutral",
            SentimentBand::Negative => "negative",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SentimentBadge {
    NotAnalyzed,
    Scored { label: String, band: SentimentBand },
}

impl SentimentBadge {
    fn from_score(score: Option<f64>) -> Self {
        match score {
            None => SentimentBadge::NotAnalyzed,
            Some(score) => SentimentBadge::Scored {
                label: format!("{} / 5", score),
                band: SentimentBand::from_score(score),
            },
        }
    }

    pub fn label(&self) -> &str {
        match self {
            SentimentBadge::NotAnalyzed => NOT_ANALYZED,
            SentimentBadge::Scored { label, .. } => label,
        }
    }
}

/// Format a publish time in `tz`, or `None` if it cannot be parsed.
pub fn format_published<Tz>(article: &Article, tz: &Tz) -> Option<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    article
        .published
        .to_utc()
        .map(|instant| instant.with_timezone(tz).format(DATE_FORMAT).to_string())
}

/// Project an article into its card, formatting dates in `tz`.
pub fn render_article<Tz>(article: &Article, tz: &Tz) -> ArticleCard
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let published = match format_published(article, tz) {
        Some(formatted) => DateLabel::Formatted(formatted),
        None => {
            warn!(link = %article.link, published = ?article.published, "Unparseable publish date");
            DateLabel::Unknown
        }
    };

    ArticleCard {
        title: article.title.clone(),
        link: article.link.clone(),
        published,
        source: article.source.clone(),
        summary: summary_preview(article.summary.as_deref().unwrap_or_default()),
        tags: ChipList::from_field(article.tags.as_deref(), NO_TAGS),
        entities: ChipList::from_field(article.entities.as_deref(), NO_ENTITIES),
        sentiment: SentimentBadge::from_score(article.sentiment_score),
    }
}

/// Project a whole result list, keeping server order.
pub fn render_results<Tz>(articles: &[Article], tz: &Tz) -> Vec<ArticleCard>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    articles.iter().map(|a| render_article(a, tz)).collect()
}
