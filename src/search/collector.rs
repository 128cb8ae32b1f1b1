//! Result collector
//!
//! Workers finish in whatever order the network dictates. The collector
//! receives exactly as many records as were launched for a block and keeps
//! every record of the run. It never sorts; ordering is the report's job.

use crate::record::RequestRecord;
use crate::SearchError;
use tokio::sync::mpsc;

/// Accumulates completed records across blocks
#[derive(Debug, Default)]
pub struct Collector {
    records: Vec<RequestRecord>,
}

impl Collector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Receives the results of one launched block
    ///
    /// # Arguments
    ///
    /// * `results` - Receiving end of the block's result channel
    /// * `expected` - Number of workers launched for the block
    ///
    /// # Returns
    ///
    /// * `Ok(&mut [RequestRecord])` - The block's records, in arrival order
    /// * `Err(SearchError::IncompleteBlock)` - Every sender was dropped before
    ///   `expected` records arrived
    pub async fn collect_block(
        &mut self,
        results: &mut mpsc::Receiver<RequestRecord>,
        expected: usize,
    ) -> Result<&mut [RequestRecord], SearchError> {
        let start = self.records.len();
        self.records.reserve(expected);

        let mut received = 0;
        while received < expected {
            let Some(record) = results.recv().await else {
                return Err(SearchError::IncompleteBlock { expected, received });
            };

            tracing::debug!("Got output from {}", record.target());
            tracing::trace!("Got output from {}, output is {:?}", record.target(), record);

            self.records.push(record);
            received += 1;
        }

        Ok(&mut self.records[start..])
    }

    /// Every record collected so far
    pub fn records(&self) -> &[RequestRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<RequestRecord> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
