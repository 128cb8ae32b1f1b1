//! Report sink trait and error types

use crate::record::RequestRecord;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to create report {path}: {source}")]
    Create {
        path: String,
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Destination for collected records
///
/// The coordinator hands each collected block to the sink once. Blocks arrive
/// in ascending rank order; records within a block arrive in completion order
/// and must be ordered by the sink.
pub trait ReportSink {
    /// Sorts a block by rank and writes it
    fn write_block(&mut self, records: &mut [RequestRecord]) -> OutputResult<()>;

    /// Called once after the last block
    fn finish(&mut self) -> OutputResult<()> {
        Ok(())
    }
}

/// Sorts records ascending by rank
///
/// The sort is stable, so records sharing a rank keep their relative order.
pub fn sort_by_rank(records: &mut [RequestRecord]) {
    records.sort_by_key(|r| r.rank());
}
