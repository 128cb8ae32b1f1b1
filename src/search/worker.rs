//! Fetch worker: one task per request record
//!
//! A worker acquires the admission gate, fetches its target, releases the
//! gate, scans the body and sends the completed record to the collector.
//! Failures are written into the record; a worker never drops its record.

use crate::record::RequestRecord;
use crate::search::fetcher::fetch_body;
use crate::search::gate::AdmissionGate;
use crate::search::matcher::Matcher;
use reqwest::Client;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;

/// Shared, read-only state handed to every worker at spawn time
#[derive(Debug, Clone)]
pub struct WorkerContext {
    /// HTTP client carrying the per-request timeout
    pub client: Client,

    /// Compiled pattern
    pub matcher: Matcher,

    /// Bound on simultaneous fetches
    pub gate: AdmissionGate,
}

impl WorkerContext {
    pub fn new(client: Client, matcher: Matcher, gate: AdmissionGate) -> Self {
        Self {
            client,
            matcher,
            gate,
        }
    }
}

/// Runs one worker to completion and emits its record
///
/// The record is sent exactly once. If the collector is gone the record is
/// dropped with a warning.
pub async fn run_worker(
    record: RequestRecord,
    context: Arc<WorkerContext>,
    results: mpsc::Sender<RequestRecord>,
) {
    let started = Instant::now();
    tracing::debug!("{} is up", record.target());

    let completed = search_record(record, &context).await;

    tracing::debug!(
        "{}: done ({}), {:.2}s elapsed",
        completed.target(),
        completed.status(),
        started.elapsed().as_secs_f64()
    );

    if let Err(err) = results.send(completed).await {
        tracing::warn!(
            "Collector is gone, dropping result for rank {}",
            err.0.rank()
        );
    }
}

/// Fetches and scans one record without emitting it
///
/// The gate slot is held only while the request is in flight and the body
/// is being read; matching happens after the slot is returned.
pub async fn search_record(record: RequestRecord, context: &WorkerContext) -> RequestRecord {
    let fetched = {
        let permit = match context.gate.acquire().await {
            Ok(permit) => permit,
            Err(e) => {
                let message = format!("{}: {}", record.target(), e);
                return record.with_error(message);
            }
        };
        tracing::debug!("{} got a token", record.target());

        let fetched = fetch_body(&context.client, record.target()).await;

        permit.release();
        tracing::debug!("{} released a token", record.target());

        fetched
    };

    match fetched {
        Ok(page) => {
            let matches = context.matcher.find_all(&page.body);
            tracing::trace!(
                "{}: HTTP {}, {} bytes, matches: {:?}",
                page.url,
                page.status_code,
                page.body.len(),
                matches
            );
            record.with_matches(&matches)
        }
        Err(e) => {
            tracing::debug!("{}", e);
            record.with_error(e)
        }
    }
}
