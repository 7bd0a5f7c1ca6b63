//! Markdown rendering of result cards.
//!
//! Each card becomes a level-3 heading linking to the article, followed by
//! its date and source, the summary preview, and a metadata block. Chips are
//! inline code spans; placeholders are italic.

use super::card::{ArticleCard, ChipList, NO_ARTICLES, SentimentBadge};
use std::fmt::Write;

/// Convert a result list to Markdown.
pub fn cards_to_markdown(cards: &[ArticleCard]) -> String {
    let mut md = String::new();
    if cards.is_empty() {
        writeln!(md, "_{}_", NO_ARTICLES).unwrap();
        return md;
    }

    for card in cards {
        writeln!(md, "### [{}]({})\n", card.title, card.link).unwrap();
        writeln!(md, "*{}*  ", card.published.as_str()).unwrap();
        writeln!(md, "**Source:** {}\n", card.source).unwrap();
        writeln!(md, "{}\n", card.summary).unwrap();
        writeln!(md, "**Tags:** {}  ", chips(&card.tags)).unwrap();
        writeln!(md, "**Sentiment Score:** {}  ", sentiment(&card.sentiment)).unwrap();
        writeln!(md, "**Entities:** {}\n", chips(&card.entities)).unwrap();
        writeln!(md, "---\n").unwrap();
    }
    md
}

fn chips(list: &ChipList) -> String {
    match list {
        ChipList::Placeholder(text) => format!("_{}_", text),
        ChipList::Chips(tokens) => tokens
            .iter()
            .map(|t| format!("`{}`", t))
            .collect::<Vec<_>>()
            .join(" "),
    }
}

fn sentiment(badge: &SentimentBadge) -> String {
    match badge {
        SentimentBadge::NotAnalyzed => format!("_{}_", badge.label()),
        SentimentBadge::Scored { label, band } => format!("**{}** ({})", label, band.name()),
    }
}
