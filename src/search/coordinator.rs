//! Search coordinator - block orchestration logic
//!
//! This module contains the main search loop:
//! - Sorting records by rank and splitting them into blocks
//! - Launching one worker per record of a block
//! - Collecting exactly as many results as were launched
//! - Handing each collected block to the report sink
//!
//! Blocks run one after the other. Within a block, workers run concurrently
//! and only the admission gate limits how many fetch at once.

use crate::output::{ReportSink, SearchSummary};
use crate::record::RequestRecord;
use crate::search::collector::Collector;
use crate::search::fetcher::{build_http_client, DEFAULT_REQUEST_TIMEOUT, DEFAULT_USER_AGENT};
use crate::search::gate::{AdmissionGate, DEFAULT_MAX_CONCURRENT_REQUESTS};
use crate::search::matcher::Matcher;
use crate::search::worker::{run_worker, WorkerContext};
use crate::SearchError;
use reqwest::Client;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// Default number of gate-sized batches launched per block
pub const DEFAULT_BLOCK_FACTOR: usize = 5;

/// Tuning for a search run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
    /// Ceiling on simultaneous HTTP requests
    pub max_concurrent_requests: usize,

    /// Block size as a multiple of `max_concurrent_requests`
    pub block_factor: usize,

    /// Per-request timeout
    pub request_timeout: Duration,

    /// User-Agent header value
    pub user_agent: String,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            max_concurrent_requests: DEFAULT_MAX_CONCURRENT_REQUESTS,
            block_factor: DEFAULT_BLOCK_FACTOR,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl SearchOptions {
    /// Number of workers launched per block
    pub fn block_size(&self) -> usize {
        self.block_factor
            .saturating_mul(self.max_concurrent_requests)
            .max(1)
    }
}

/// Main search coordinator structure
pub struct Coordinator {
    context: Arc<WorkerContext>,
    options: SearchOptions,
}

impl Coordinator {
    /// Creates a coordinator with its own HTTP client
    ///
    /// # Arguments
    ///
    /// * `matcher` - The compiled pattern
    /// * `options` - Concurrency, batching and HTTP settings
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to run
    /// * `Err(SearchError)` - The HTTP client could not be built
    pub fn new(matcher: Matcher, options: SearchOptions) -> Result<Self, SearchError> {
        let client = build_http_client(&options.user_agent, options.request_timeout)?;
        Ok(Self::with_client(client, matcher, options))
    }

    /// Creates a coordinator around an existing HTTP client
    pub fn with_client(client: Client, matcher: Matcher, options: SearchOptions) -> Self {
        let gate = AdmissionGate::new(options.max_concurrent_requests);
        Self {
            context: Arc::new(WorkerContext::new(client, matcher, gate)),
            options,
        }
    }

    /// The gate shared by this coordinator's workers
    pub fn gate(&self) -> &AdmissionGate {
        &self.context.gate
    }

    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    /// Runs the search over all records
    ///
    /// Records are sorted by rank (stable) before being split into blocks, so
    /// each block covers a contiguous rank range and the sink receives blocks
    /// in ascending order.
    ///
    /// # Arguments
    ///
    /// * `records` - Pending records, in any order
    /// * `sink` - Receives every collected block
    ///
    /// # Returns
    ///
    /// * `Ok(SearchSummary)` - Every record was reported
    /// * `Err(SearchError)` - A block could not be collected or written
    pub async fn run(
        &self,
        mut records: Vec<RequestRecord>,
        sink: &mut dyn ReportSink,
    ) -> Result<SearchSummary, SearchError> {
        let start_time = Instant::now();
        let total = records.len();
        let block_size = self.options.block_size();

        records.sort_by_key(|r| r.rank());

        tracing::info!(
            "Searching {} sites, {} at a time, {} per block",
            total,
            self.context.gate.capacity(),
            block_size
        );

        let mut collector = Collector::new();
        let mut pending = records.into_iter();
        let mut blocks = 0;
        let mut start_index = 0;

        while start_index < total {
            let block: Vec<RequestRecord> = pending.by_ref().take(block_size).collect();
            let end_index = start_index + block.len();

            tracing::info!("Processing {} to {}", start_index, end_index - 1);

            let collected = self.search_block(block, &mut collector).await?;
            sink.write_block(collected)?;

            blocks += 1;
            start_index = end_index;
        }

        sink.finish()?;

        let elapsed = start_time.elapsed();
        tracing::info!("{:.2}s elapsed overall", elapsed.as_secs_f64());

        Ok(SearchSummary::from_records(
            collector.records(),
            blocks,
            elapsed,
        ))
    }

    /// Launches one worker per record and collects the block
    async fn search_block<'c>(
        &self,
        block: Vec<RequestRecord>,
        collector: &'c mut Collector,
    ) -> Result<&'c mut [RequestRecord], SearchError> {
        let expected = block.len();
        let (tx, mut rx) = mpsc::channel(self.context.gate.capacity());

        for record in block {
            tokio::spawn(run_worker(record, Arc::clone(&self.context), tx.clone()));
        }
        // Only workers hold senders now; a lost worker shows up as a closed channel
        drop(tx);

        collector.collect_block(&mut rx, expected).await
    }
}
