//! Terminal rendering of result cards.
//!
//! Cards are printed one after another with the left column (title, link,
//! date, source) first and the right column (summary, tags, sentiment,
//! entities) indented below it. Colours come from `crossterm` and are only
//! emitted when `color` is set.

use super::card::{ArticleCard, ChipList, NO_ARTICLES, SentimentBadge, SentimentBand};
use crossterm::style::{Attribute, Color, Stylize, style};
use std::fmt::{Display, Write};

/// Render a result list for the terminal.
pub fn cards_to_text(cards: &[ArticleCard], color: bool) -> String {
    let mut out = String::new();
    if cards.is_empty() {
        writeln!(out, "{}", paint(NO_ARTICLES, Color::DarkGrey, color)).unwrap();
        return out;
    }

    for (i, card) in cards.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        write_card(&mut out, card, color);
    }
    out
}

fn write_card(out: &mut String, card: &ArticleCard, color: bool) {
    let title = if color {
        style(&card.title)
            .with(Color::Blue)
            .attribute(Attribute::Bold)
            .to_string()
    } else {
        card.title.clone()
    };
    writeln!(out, "{}", title).unwrap();
    writeln!(out, "  {}", card.link).unwrap();
    writeln!(out, "  {}", paint(card.published.as_str(), Color::DarkGrey, color)).unwrap();
    writeln!(out, "  Source: {}", card.source).unwrap();
    writeln!(out).unwrap();
    writeln!(out, "  {}", card.summary).unwrap();
    writeln!(out, "  Tags: {}", chips(&card.tags, color)).unwrap();
    writeln!(out, "  Sentiment Score: {}", sentiment(&card.sentiment, color)).unwrap();
    writeln!(out, "  Entities: {}", chips(&card.entities, color)).unwrap();
}

fn chips(list: &ChipList, color: bool) -> String {
    match list {
        ChipList::Placeholder(text) => paint(text, Color::DarkGrey, color),
        ChipList::Chips(tokens) => tokens
            .iter()
            .map(|t| paint(format!("[{}]", t), Color::Cyan, color))
            .collect::<Vec<_>>()
            .join(" "),
    }
}

fn sentiment(badge: &SentimentBadge, color: bool) -> String {
    match badge {
        SentimentBadge::NotAnalyzed => paint(badge.label(), Color::DarkGrey, color),
        SentimentBadge::Scored { label, band } => {
            let hue = match band {
                SentimentBand::Positive => Color::Green,
                SentimentBand::Neutral => Color::DarkYellow,
                SentimentBand::Negative => Color::Red,
            };
            if color {
                style(label).with(hue).attribute(Attribute::Bold).to_string()
            } else {
                label.clone()
            }
        }
    }
}

fn paint<D: Display>(value: D, hue: Color, color: bool) -> String {
    if color {
        style(value).with(hue).to_string()
    } else {
        value.to_string()
    }
}
