//! Text helpers for turning search results into displayable strings.
//!
//! This module provides the small amount of string cleanup the result view
//! needs:
//! - Markup stripping for HTML summaries (images and tags removed, text kept)
//! - Bounded summary previews with a truncation marker
//! - Splitting comma-delimited tag/entity strings into chips
//! - Log-friendly truncation of response bodies and serde error classification

use scraper::Html;

/// Number of characters of stripped summary text shown in a card.
pub const SUMMARY_PREVIEW_CHARS: usize = 400;

/// Marker appended to every summary preview.
pub const TRUNCATION_MARKER: &str = "...";

/// Elements whose contents never reach the rendered text.
const SKIPPED_ELEMENTS: [&str; 2] = ["img", "template"];

/// Extract the text content of an HTML fragment.
///
/// The fragment is parsed with html5ever (through `scraper`), so malformed
/// markup, unquoted attributes and character references are handled the way a
/// browser would handle them. Every text node is kept in document order,
/// including script and style bodies, except those inside image or template
/// elements.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(strip_markup("<img src=a.jpg>Oil prices rose today."), "Oil prices rose today.");
/// assert_eq!(strip_markup("<p>AT&amp;T <b>up</b></p>"), "AT&T up");
/// ```
pub fn strip_markup(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    let root = fragment.root_element();

    let mut text = String::new();
    for node in root.descendants() {
        let Some(chunk) = node.value().as_text() else {
            continue;
        };
        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|el| SKIPPED_ELEMENTS.contains(&el.name()))
        });
        if !hidden {
            text.push_str(chunk);
        }
    }
    text
}

/// Build the summary preview shown in a card.
///
/// Takes the first `max_chars` characters (not bytes) of `text` and always
/// appends [`TRUNCATION_MARKER`], whether or not anything was cut.
pub fn preview(text: &str, max_chars: usize) -> String {
    let mut out: String = text.chars().take(max_chars).collect();
    out.push_str(TRUNCATION_MARKER);
    out
}

/// Clean an article summary for display: strip markup, then cut a preview.
pub fn summary_preview(summary: &str) -> String {
    preview(&strip_markup(summary), SUMMARY_PREVIEW_CHARS)
}

/// Split a comma-delimited field into chip labels.
///
/// Returns `None` when the field is absent or blank after trimming, so the
/// caller can show its placeholder. Otherwise every comma-separated token is
/// trimmed and the non-empty ones are returned in their original order.
pub fn split_chips(field: Option<&str>) -> Option<Vec<String>> {
    let field = field?;
    if field.trim().is_empty() {
        return None;
    }
    Some(
        field
            .split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(str::to_string)
            .collect(),
    )
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut to `max` characters with an ellipsis and a count of
/// the dropped bytes appended.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log(&"a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        None => s.to_string(),
        Some((cut, _)) => format!("{}…(+{} bytes)", &s[..cut], s.len() - cut),
    }
}

/// Detect if a serde_json error indicates truncated/incomplete JSON.
///
/// A body cut off mid-stream fails with an EOF error; that is worth telling
/// apart from a body of the wrong shape when reading the logs.
pub fn looks_truncated(e: &serde_json::Error) -> bool {
    use serde_json::error::Category;
    matches!(e.classify(), Category::Eof)
}
