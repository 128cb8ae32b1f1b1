//! Output module for writing search reports
//!
//! This module handles:
//! - Writing the rank-ordered text report
//! - Summarising and printing run statistics

mod report;
pub mod stats;
mod traits;

pub use report::{format_record_line, TextReport};
pub use stats::{print_summary, SearchSummary};
pub use traits::{sort_by_rank, OutputError, OutputResult, ReportSink};
