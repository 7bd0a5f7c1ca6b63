//! Data models for search results.
//!
//! This module defines the records returned by the finance-news search endpoint:
//! - [`Article`]: One search result, deserialized verbatim from the response
//! - [`Published`]: The publish timestamp, which arrives as a string or an epoch number
//!
//! Field names are snake_case on the wire, matching the endpoint's JSON.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// A search result as returned by the search endpoint.
///
/// The view never mutates an `Article`; all cleanup (markup stripping,
/// chip splitting, date formatting) happens at render time.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Article {
    /// The article headline.
    pub title: String,
    /// Absolute URL of the full article.
    pub link: String,
    /// When the article was published.
    pub published: Published,
    /// Display name of the outlet.
    pub source: String,
    /// Summary text, possibly containing HTML.
    #[serde(default)]
    pub summary: Option<String>,
    /// Comma-delimited topic tags.
    #[serde(default)]
    pub tags: Option<String>,
    /// Comma-delimited named entities.
    #[serde(default)]
    pub entities: Option<String>,
    /// Sentiment on a 0 to 5 scale; `None` means not analyzed.
    #[serde(default)]
    pub sentiment_score: Option<f64>,
}

/// Publication timestamp of an [`Article`].
///
/// The endpoint serializes database timestamps as strings, but a numeric
/// epoch (milliseconds, integral or not) is accepted too.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Published {
    /// Milliseconds since the Unix epoch.
    Epoch(i64),
    /// Milliseconds since the Unix epoch, sent as a JSON float.
    FractionalEpoch(f64),
    /// A textual timestamp, usually ISO-8601.
    Text(String),
}

impl Published {
    /// Interpret the timestamp as an instant.
    ///
    /// Strings are tried as RFC 3339, then as offset-less date-times and
    /// bare dates (taken as UTC), then as an integer epoch in milliseconds.
    /// Returns `None` when nothing matches.
    pub fn to_utc(&self) -> Option<DateTime<Utc>> {
        match self {
            Published::Epoch(millis) => DateTime::from_timestamp_millis(*millis),
            Published::FractionalEpoch(millis) => fractional_millis(*millis),
            Published::Text(raw) => parse_timestamp(raw.trim()),
        }
    }
}

fn fractional_millis(millis: f64) -> Option<DateTime<Utc>> {
    // Outside this range the cast to i64 would saturate.
    if !millis.is_finite() || millis.abs() >= i64::MAX as f64 {
        return None;
    }
    DateTime::from_timestamp_millis(millis.trunc() as i64)
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }
    raw.parse::<i64>()
        .ok()
        .and_then(DateTime::from_timestamp_millis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    #[test]
    fn test_article_deserialization_full() {
        let json = r#"{
            "title": "Oil surges",
            "link": "https://x.test/1",
            "published": "2024-01-01T00:00:00Z",
            "source": "Reuters",
            "summary": "<img src=a.jpg>Oil prices rose today.",
            "tags": "oil, energy",
            "entities": "OPEC",
            "sentiment_score": 4
        }"#;

        let article: Article = serde_json::from_str(json).unwrap();
        assert_eq!(article.title, "Oil surges");
        assert_eq!(article.published, Published::Text("2024-01-01T00:00:00Z".to_string()));
        assert_eq!(article.tags.as_deref(), Some("oil, energy"));
        assert_eq!(article.sentiment_score, Some(4.0));
    }

    #[test]
    fn test_article_deserialization_optional_fields() {
        let json = r#"{
            "title": "Quiet day",
            "link": "https://x.test/2",
            "published": 1704067200000,
            "source": "Mint",
            "summary": null,
            "sentiment_score": null,
            "actions": "ignored"
        }"#;

        let article: Article = serde_json::from_str(json).unwrap();
        assert_eq!(article.published, Published::Epoch(1_704_067_200_000));
        assert_eq!(article.summary, None);
        assert_eq!(article.tags, None);
        assert_eq!(article.entities, None);
        assert_eq!(article.sentiment_score, None);
    }

    #[test]
    fn test_article_missing_required_field() {
        let json = r#"{"title": "No link", "published": "2024-01-01", "source": "X"}"#;
        assert!(serde_json::from_str::<Article>(json).is_err());
    }

    #[test]
    fn test_published_rfc3339() {
        let published = Published::Text("2024-01-01T05:30:00+05:30".to_string());
        assert_eq!(published.to_utc(), Some(utc(2024, 1, 1, 0, 0, 0)));
    }

    #[test]
    fn test_published_naive_timestamps_are_utc() {
        let iso = Published::Text("2025-06-30T14:05:09".to_string());
        assert_eq!(iso.to_utc(), Some(utc(2025, 6, 30, 14, 5, 9)));

        let spaced = Published::Text("2025-06-30 14:05:09.250".to_string());
        assert_eq!(
            spaced.to_utc().map(|dt| dt.timestamp_millis()),
            Some(utc(2025, 6, 30, 14, 5, 9).timestamp_millis() + 250)
        );

        let date_only = Published::Text("2025-06-30".to_string());
        assert_eq!(date_only.to_utc(), Some(utc(2025, 6, 30, 0, 0, 0)));
    }

    #[test]
    fn test_published_epoch_millis() {
        assert_eq!(
            Published::Epoch(1_704_067_200_000).to_utc(),
            Some(utc(2024, 1, 1, 0, 0, 0))
        );
        assert_eq!(
            Published::Text("1704067200000".to_string()).to_utc(),
            Some(utc(2024, 1, 1, 0, 0, 0))
        );
    }

    #[test]
    fn test_article_with_fractional_epoch() {
        let json = r#"[{
            "title": "Float epoch",
            "link": "https://x.test/4",
            "published": 1704067200000.0,
            "source": "Mint"
        }]"#;

        let articles: Vec<Article> = serde_json::from_str(json).unwrap();
        assert_eq!(articles[0].published, Published::FractionalEpoch(1_704_067_200_000.0));
        assert_eq!(articles[0].published.to_utc(), Some(utc(2024, 1, 1, 0, 0, 0)));
    }

    #[test]
    fn test_fractional_epoch_drops_sub_millisecond_part() {
        let published = Published::FractionalEpoch(1_704_067_200_000.75);
        assert_eq!(
            published.to_utc().map(|dt| dt.timestamp_millis()),
            Some(1_704_067_200_000)
        );
    }

    #[test]
    fn test_fractional_epoch_out_of_range() {
        assert_eq!(Published::FractionalEpoch(1e300).to_utc(), None);
        assert_eq!(Published::FractionalEpoch(-1e300).to_utc(), None);
    }

    #[test]
    fn test_published_unparseable() {
        assert_eq!(Published::Text("yesterday-ish".to_string()).to_utc(), None);
        assert_eq!(Published::Text(String::new()).to_utc(), None);
    }

    #[test]
    fn test_article_serialization_keeps_fields() {
        let article = Article {
            title: "Rates".to_string(),
            link: "https://x.test/3".to_string(),
            published: Published::Text("2024-02-02T00:00:00Z".to_string()),
            source: "ET".to_string(),
            summary: Some("Held steady".to_string()),
            tags: None,
            entities: Some("RBI".to_string()),
            sentiment_score: Some(3.5),
        };

        let json = serde_json::to_string(&article).unwrap();
        assert!(json.contains(r#""published":"2024-02-02T00:00:00Z""#));
        assert!(json.contains(r#""sentiment_score":3.5"#));
        let back: Article = serde_json::from_str(&json).unwrap();
        assert_eq!(back, article);
    }
}
