//! Event loops that drive a [`SearchView`].
//!
//! - [`run_once`]: submit one query, wait, print the result list
//! - [`run_interactive`]: treat every stdin line as a query edit followed by a
//!   submit, running searches concurrently and printing results as they land
//!
//! In interactive mode the loop owns the view outright. Each search runs on
//! its own task in a `JoinSet`; the view's sequence guard decides which
//! finished searches are allowed to change what is shown.

use crate::api::SearchBackend;
use crate::outputs::Renderer;
use crate::view::{Applied, SearchOutcome, SearchView};
use chrono::TimeZone;
use std::error::Error;
use std::fmt::Display;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::task::JoinSet;
use tracing::{debug, error, info, instrument, warn};

/// Run a single search for `query` and write the rendered results to `out`.
///
/// A failed search still prints the (unchanged, here empty) result list.
#[instrument(level = "info", skip_all, fields(%query))]
pub async fn run_once<B, W, Tz>(
    query: &str,
    backend: &B,
    renderer: &Renderer,
    tz: &Tz,
    out: &mut W,
) -> Result<SearchView, Box<dyn Error>>
where
    B: SearchBackend,
    W: Write,
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut view = SearchView::new();
    view.on_query_change(query);
    let applied = view.on_submit(backend).await;
    debug!(?applied, "One-shot search finished");

    out.write_all(renderer.render(view.articles(), tz)?.as_bytes())?;
    out.flush()?;
    Ok(view)
}

/// Read queries line by line from `input` until EOF, searching each one.
///
/// The initial (empty) result list is printed first. After that the list is
/// reprinted whenever a response replaces it. Lines that are not valid UTF-8
/// are logged and skipped. Returns once input is exhausted and every search
/// task has finished, including any that panicked.
#[instrument(level = "info", skip_all)]
pub async fn run_interactive<R, B, W, Tz>(
    input: R,
    backend: B,
    renderer: &Renderer,
    tz: &Tz,
    out: &mut W,
) -> Result<SearchView, Box<dyn Error>>
where
    R: AsyncBufRead + Unpin,
    B: SearchBackend + Clone + Send + Sync + 'static,
    W: Write,
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut view = SearchView::new();
    let mut searches: JoinSet<SearchOutcome> = JoinSet::new();
    let mut lines = input.split(b'\n');
    let mut input_open = true;

    out.write_all(renderer.render(view.articles(), tz)?.as_bytes())?;
    out.flush()?;

    while input_open || !searches.is_empty() {
        tokio::select! {
            segment = lines.next_segment(), if input_open => {
                match segment? {
                    Some(bytes) => {
                        let Some(text) = decode_line(bytes) else {
                            continue;
                        };
                        view.on_query_change(text);
                        let pending = view.begin_submit();
                        let backend = backend.clone();
                        searches.spawn(async move { pending.run(&backend).await });
                    }
                    None => {
                        debug!(in_flight = searches.len(), "Input closed; draining searches");
                        input_open = false;
                    }
                }
            }
            Some(joined) = searches.join_next(), if !searches.is_empty() => {
                match joined {
                    Ok(outcome) => {
                        if let Applied::Replaced(_) = view.apply(outcome) {
                            out.write_all(renderer.render(view.articles(), tz)?.as_bytes())?;
                            out.flush()?;
                        }
                    }
                    Err(e) => error!(error = %e, "Search task did not complete"),
                }
            }
        }
    }

    info!(searches = view.latest_seq(), "Interactive session ended");
    Ok(view)
}

/// Turn one raw input line into query text, dropping a trailing `\r`.
fn decode_line(mut bytes: Vec<u8>) -> Option<String> {
    if bytes.last() == Some(&b'\r') {
        bytes.pop();
    }
    match String::from_utf8(bytes) {
        Ok(text) => Some(text),
        Err(e) => {
            warn!(error = %e, "Skipping input line that is not valid UTF-8");
            None
        }
    }
}
