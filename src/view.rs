//! The search view: query text, current results, and the submit cycle.
//!
//! [`SearchView`] owns exactly two pieces of observable state, the query being
//! typed and the articles currently on screen. A submission is split in three
//! steps so that requests can run on other tasks without borrowing the view:
//!
//! 1. [`SearchView::begin_submit`] stamps the current query with a fresh
//!    sequence number and hands back a [`PendingSearch`].
//! 2. [`PendingSearch::run`] performs the request against any [`SearchBackend`].
//! 3. [`SearchView::apply`] folds the resulting [`SearchOutcome`] back in.
//!
//! Only the outcome of the most recently issued request can change the view.
//! Out-of-order responses from older requests are dropped, so the results on
//! screen always belong to the latest submission that succeeded.

use crate::api::{SearchBackend, SearchError};
use crate::models::Article;
use tracing::{debug, info, instrument, warn};

/// Query text and result list for one search session.
#[derive(Debug, Default)]
pub struct SearchView {
    query: String,
    articles: Vec<Article>,
    latest_seq: u64,
}

/// A submitted query waiting to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSearch {
    /// Sequence number assigned at submission.
    pub seq: u64,
    /// The query as it was when submitted.
    pub query: String,
}

/// The result of running a [`PendingSearch`].
#[derive(Debug)]
pub struct SearchOutcome {
    pub seq: u64,
    pub query: String,
    pub result: Result<Vec<Article>, SearchError>,
}

/// What [`SearchView::apply`] did with an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// The result list was replaced with this many articles.
    Replaced(usize),
    /// The latest request failed; the previous results were kept.
    Failed,
    /// A newer request was issued since; the outcome was ignored.
    Stale,
}

impl SearchView {
    pub fn new() -> Self {
        Self::default()
    }

    /// The current query text.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// The articles from the latest successful search, in server order.
    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    /// Sequence number of the most recently issued request (0 before any).
    pub fn latest_seq(&self) -> u64 {
        self.latest_seq
    }

    /// Replace the query text. No validation or debouncing is applied.
    pub fn on_query_change(&mut self, text: impl Into<String>) {
        self.query = text.into();
    }

    /// Issue a new request for the current query.
    ///
    /// Any request issued earlier becomes stale. An empty query is a valid
    /// submission.
    pub fn begin_submit(&mut self) -> PendingSearch {
        self.latest_seq += 1;
        debug!(seq = self.latest_seq, query = %self.query, "Search submitted");
        PendingSearch {
            seq: self.latest_seq,
            query: self.query.clone(),
        }
    }

    /// Fold a finished request into the view.
    ///
    /// A success for the latest request replaces the articles verbatim. A
    /// failure for the latest request is logged and leaves the articles as
    /// they were. Outcomes of older requests change nothing.
    pub fn apply(&mut self, outcome: SearchOutcome) -> Applied {
        let SearchOutcome { seq, query, result } = outcome;

        if seq != self.latest_seq {
            debug!(seq, latest = self.latest_seq, %query, "Discarding stale search response");
            return Applied::Stale;
        }

        match result {
            Ok(articles) => {
                let count = articles.len();
                self.articles = articles;
                info!(seq, %query, count, "Search results updated");
                Applied::Replaced(count)
            }
            Err(e) => {
                warn!(
                    seq,
                    %query,
                    error = %e,
                    kept = self.articles.len(),
                    "Search failed; keeping previous results"
                );
                Applied::Failed
            }
        }
    }

    /// Submit the current query and wait for it, start to finish.
    #[instrument(level = "info", skip_all, fields(query = %self.query))]
    pub async fn on_submit<B: SearchBackend>(&mut self, backend: &B) -> Applied {
        let pending = self.begin_submit();
        let outcome = pending.run(backend).await;
        self.apply(outcome)
    }
}

impl PendingSearch {
    /// Send the request and wrap whatever comes back.
    pub async fn run<B: SearchBackend>(self, backend: &B) -> SearchOutcome {
        let result = backend.search(&self.query).await;
        SearchOutcome {
            seq: self.seq,
            query: self.query,
            result,
        }
    }
}
