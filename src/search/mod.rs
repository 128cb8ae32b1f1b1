//! Search module: the bounded-concurrency fetch-and-collect engine
//!
//! This module contains the core search logic, including:
//! - The admission gate bounding simultaneous requests
//! - The HTTP fetcher and the pattern matcher
//! - One worker task per ranked target
//! - Result collection and block orchestration

mod collector;
mod coordinator;
mod fetcher;
mod gate;
mod matcher;
mod worker;

pub use collector::Collector;
pub use coordinator::{Coordinator, SearchOptions, DEFAULT_BLOCK_FACTOR};
pub use fetcher::{
    build_http_client, fetch_body, FetchError, FetchedPage, DEFAULT_REQUEST_TIMEOUT,
    DEFAULT_USER_AGENT,
};
pub use gate::{AdmissionGate, GatePermit, DEFAULT_MAX_CONCURRENT_REQUESTS};
pub use matcher::{Matcher, DEFAULT_PATTERN};
pub use worker::{run_worker, search_record, WorkerContext};

use crate::output::{ReportSink, SearchSummary};
use crate::record::RequestRecord;
use crate::Result;

/// Runs a complete search
///
/// This is the main entry point for a search. It will:
/// 1. Build the HTTP client and admission gate
/// 2. Split the records into rank-ordered blocks
/// 3. Fetch and scan every block concurrently
/// 4. Hand each collected block to the sink
///
/// # Arguments
///
/// * `matcher` - The compiled pattern
/// * `options` - Concurrency, batching and HTTP settings
/// * `records` - The ranked targets
/// * `sink` - Where collected blocks are written
///
/// # Returns
///
/// * `Ok(SearchSummary)` - Search completed; individual sites may have failed
/// * `Err(SearchError)` - Search could not be completed
pub async fn search(
    matcher: Matcher,
    options: SearchOptions,
    records: Vec<RequestRecord>,
    sink: &mut dyn ReportSink,
) -> Result<SearchSummary> {
    let coordinator = Coordinator::new(matcher, options)?;
    coordinator.run(records, sink).await
}
