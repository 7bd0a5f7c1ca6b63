//! Search endpoint client.
//!
//! This module talks to the external finance-news search service over HTTP.
//!
//! # Architecture
//!
//! The module uses a trait-based design so the view never depends on a
//! concrete transport:
//! - [`SearchBackend`]: Core trait defining one async search call
//! - [`HttpSearchClient`]: `reqwest` implementation against `GET {endpoint}/search?query=`
//! - [`SearchError`]: The failure taxonomy (transport, status, payload)
//!
//! Failed searches are not retried; the caller keeps whatever results it
//! already had.

use crate::models::Article;
use crate::utils::{looks_truncated, truncate_for_log};
use std::future::Future;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info, instrument, warn};
use url::Url;

/// Longest slice of an error body that makes it into a log line.
const BODY_PREVIEW_CHARS: usize = 300;

/// Everything that can go wrong while performing a search.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The endpoint could not be reached, or the request timed out.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("search endpoint returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The body was not a sequence of articles.
    #[error("malformed search response: {0}")]
    Payload(#[from] serde_json::Error),

    /// The configured endpoint base is not a usable URL.
    #[error("invalid search endpoint {endpoint:?}: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },
}

/// Trait for something that can answer a search query.
///
/// Implementors return the articles in the order the service produced them.
/// The returned future is `Send` so searches can run on spawned tasks.
pub trait SearchBackend {
    /// Run one search for `query`.
    fn search(&self, query: &str) -> impl Future<Output = Result<Vec<Article>, SearchError>> + Send;
}

/// HTTP client for the search endpoint.
///
/// Cloning is cheap: the underlying `reqwest::Client` shares its
/// connection pool between clones.
#[derive(Debug, Clone)]
pub struct HttpSearchClient {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpSearchClient {
    /// Create a client for `endpoint` with a per-request `timeout`.
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self, SearchError> {
        if endpoint.cannot_be_a_base() || !matches!(endpoint.scheme(), "http" | "https") {
            return Err(SearchError::InvalidEndpoint {
                endpoint: endpoint.to_string(),
                reason: "expected an http(s) base URL".to_string(),
            });
        }
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint })
    }

    /// The endpoint base this client sends requests to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Build the request URL for `query`.
    ///
    /// The query is percent-encoded (spaces become `%20`); an empty query is
    /// sent as `query=` and left to the service to interpret.
    pub fn search_url(&self, query: &str) -> String {
        let base = self.endpoint.as_str().trim_end_matches('/');
        format!("{}/search?query={}", base, urlencoding::encode(query))
    }
}

impl SearchBackend for HttpSearchClient {
    #[instrument(level = "info", skip_all, fields(%query))]
    async fn search(&self, query: &str) -> Result<Vec<Article>, SearchError> {
        let t0 = Instant::now();
        let url = self.search_url(query);
        debug!(%url, "Sending search request");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        let body = response.text().await?;
        let elapsed_ms = t0.elapsed().as_millis();

        if !status.is_success() {
            warn!(status = status.as_u16(), elapsed_ms, "Search endpoint returned an error status");
            return Err(SearchError::Status {
                status: status.as_u16(),
                body: truncate_for_log(&body, BODY_PREVIEW_CHARS),
            });
        }

        match serde_json::from_str::<Vec<Article>>(&body) {
            Ok(articles) => {
                info!(count = articles.len(), elapsed_ms, "Search succeeded");
                Ok(articles)
            }
            Err(e) => {
                warn!(
                    error = %e,
                    truncated = looks_truncated(&e),
                    body_preview = %truncate_for_log(&body, BODY_PREVIEW_CHARS),
                    "Search response is not an article list"
                );
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve exactly one canned HTTP response and record the request line.
    async fn serve_once(status_line: &str, body: &str) -> (Url, Arc<Mutex<Option<String>>>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let seen = Arc::new(Mutex::new(None));
        let seen_in_task = Arc::clone(&seen);
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = Vec::new();
            let mut chunk = [0u8; 1024];
            while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);
            }
            let request = String::from_utf8_lossy(&buf);
            let request_line = request.lines().next().unwrap_or_default().to_string();
            *seen_in_task.lock().unwrap() = Some(request_line);
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        });

        let endpoint = Url::parse(&format!("http://{}", addr)).unwrap();
        (endpoint, seen)
    }

    fn client(endpoint: Url) -> HttpSearchClient {
        HttpSearchClient::new(endpoint, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_search_url_percent_encodes_query() {
        let c = client(Url::parse("http://localhost:8000").unwrap());
        assert_eq!(
            c.search_url("oil prices"),
            "http://localhost:8000/search?query=oil%20prices"
        );
        assert_eq!(
            c.search_url("S&P 500?"),
            "http://localhost:8000/search?query=S%26P%20500%3F"
        );
    }

    #[test]
    fn test_search_url_empty_query() {
        let c = client(Url::parse("http://localhost:8000").unwrap());
        assert_eq!(c.search_url(""), "http://localhost:8000/search?query=");
    }

    #[test]
    fn test_search_url_keeps_base_path() {
        let c = client(Url::parse("https://news.test/api/").unwrap());
        assert_eq!(c.search_url("rbi"), "https://news.test/api/search?query=rbi");
    }

    #[test]
    fn test_rejects_non_http_endpoint() {
        let err = HttpSearchClient::new(
            Url::parse("mailto:news@x.test").unwrap(),
            Duration::from_secs(1),
        )
        .unwrap_err();
        assert!(matches!(err, SearchError::InvalidEndpoint { .. }));
    }

    #[tokio::test]
    async fn test_search_success_preserves_order() {
        let body = r#"[
            {"title":"B","link":"https://x.test/b","published":"2024-01-02T00:00:00Z","source":"Mint"},
            {"title":"A","link":"https://x.test/a","published":"2024-01-01T00:00:00Z","source":"ET"}
        ]"#;
        let (endpoint, seen) = serve_once("200 OK", body).await;

        let articles = client(endpoint).search("oil prices").await.unwrap();
        let titles: Vec<_> = articles.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["B", "A"]);

        let request_line = seen.lock().unwrap().clone().unwrap();
        assert_eq!(request_line, "GET /search?query=oil%20prices HTTP/1.1");
    }

    #[tokio::test]
    async fn test_search_non_success_status() {
        let (endpoint, _) = serve_once("422 Unprocessable Entity", r#"{"detail":"too short"}"#).await;

        let err = client(endpoint).search("x").await.unwrap_err();
        match err {
            SearchError::Status { status, body } => {
                assert_eq!(status, 422);
                assert!(body.contains("too short"));
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_search_malformed_payload() {
        let (endpoint, _) = serve_once("200 OK", r#"{"articles": []}"#).await;

        let err = client(endpoint).search("oil").await.unwrap_err();
        assert!(matches!(err, SearchError::Payload(_)));
    }

    #[tokio::test]
    async fn test_search_unreachable_endpoint() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let endpoint = Url::parse(&format!("http://{}", addr)).unwrap();
        let err = client(endpoint).search("oil").await.unwrap_err();
        assert!(matches!(err, SearchError::Transport(_)));
    }
}
