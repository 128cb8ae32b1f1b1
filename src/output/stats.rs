//! Run statistics
//!
//! This module summarises the outcome of a search run and prints it.

use crate::record::RequestRecord;
use std::time::Duration;

/// Summary of a completed search run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchSummary {
    /// Number of records reported
    pub total_records: usize,

    /// Number of blocks processed
    pub blocks: usize,

    /// Records whose body was fetched and scanned
    pub fetched: usize,

    /// Records whose fetch or body read failed
    pub failed: usize,

    /// Fetched records with at least one match
    pub with_matches: usize,

    /// Matches found across all records
    pub total_matches: usize,

    /// Wall-clock duration of the run
    pub elapsed: Duration,
}

impl SearchSummary {
    /// Tallies completed records
    pub fn from_records(records: &[RequestRecord], blocks: usize, elapsed: Duration) -> Self {
        let mut summary = Self {
            total_records: records.len(),
            blocks,
            elapsed,
            ..Self::default()
        };

        for record in records {
            let status = record.status();
            if status.is_failed() {
                summary.failed += 1;
            } else if status.is_complete() {
                summary.fetched += 1;
                let matches = status.match_count();
                if matches > 0 {
                    summary.with_matches += 1;
                    summary.total_matches += matches;
                }
            }
        }

        summary
    }

    /// Percentage of records that were fetched
    pub fn success_rate(&self) -> f64 {
        if self.total_records == 0 {
            0.0
        } else {
            (self.fetched as f64 / self.total_records as f64) * 100.0
        }
    }
}

/// Prints the summary to stdout in a formatted manner
///
/// # Arguments
///
/// * `summary` - The summary to display
pub fn print_summary(summary: &SearchSummary) {
    println!("=== Search Summary ===\n");

    println!("Overview:");
    println!("  Sites searched: {}", summary.total_records);
    println!("  Blocks processed: {}", summary.blocks);
    println!("  Elapsed: {:.2}s", summary.elapsed.as_secs_f64());
    println!();

    println!("Results:");
    println!("  Fetched: {}", summary.fetched);
    println!("  Failed: {}", summary.failed);
    println!("  Sites with matches: {}", summary.with_matches);
    println!("  Total matches: {}", summary.total_matches);
    println!();

    println!(
        "Success Rate: {:.1}% ({} / {} sites fetched)",
        summary.success_rate(),
        summary.fetched,
        summary.total_records
    );
}
