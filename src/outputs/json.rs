//! JSON output of the current result list.
//!
//! Unlike the card formats, JSON output carries the articles exactly as the
//! search endpoint returned them (summary markup and comma-delimited tags
//! included), so it can be piped into other tools.

use crate::models::Article;

/// Serialize the result list as a pretty-printed JSON array.
pub fn articles_to_json(articles: &[Article]) -> Result<String, serde_json::Error> {
    let mut json = serde_json::to_string_pretty(articles)?;
    json.push('\n');
    Ok(json)
}
