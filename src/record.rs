//! Request record definitions
//!
//! A [`RequestRecord`] is the unit of work: one ranked target, and the text
//! that a worker produced for it.

use std::fmt;

/// Completion status of a request record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RecordStatus {
    /// Not yet handled by a worker
    #[default]
    Pending,

    /// The page was fetched and scanned
    Fetched {
        /// Number of matches found in the body
        matches: usize,
    },

    /// The fetch or body read failed; the result holds the error text
    Failed,
}

impl RecordStatus {
    /// Returns true once a worker has written the result
    pub fn is_complete(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// Returns true if the result holds an error description
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed)
    }

    /// Number of matches, zero for anything but a fetched record
    pub fn match_count(&self) -> usize {
        match self {
            Self::Fetched { matches } => *matches,
            _ => 0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Fetched { .. } => "fetched",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One ranked target and its search result
///
/// `rank` and `target` are fixed at construction. The result is written once,
/// by consuming the record through [`RequestRecord::with_matches`] or
/// [`RequestRecord::with_error`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestRecord {
    rank: u64,
    target: String,
    result: String,
    status: RecordStatus,
}

impl RequestRecord {
    /// Creates a pending record
    pub fn new(rank: u64, target: impl Into<String>) -> Self {
        Self {
            rank,
            target: target.into(),
            result: String::new(),
            status: RecordStatus::Pending,
        }
    }

    pub fn rank(&self) -> u64 {
        self.rank
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// Matched substrings joined by single spaces, or an error description
    pub fn result(&self) -> &str {
        &self.result
    }

    pub fn status(&self) -> RecordStatus {
        self.status
    }

    /// Completes the record with the matches found in the fetched body
    pub fn with_matches<S: AsRef<str>>(mut self, matches: &[S]) -> Self {
        debug_assert!(!self.status.is_complete(), "record completed twice");
        let mut result = String::new();
        for (i, m) in matches.iter().enumerate() {
            if i > 0 {
                result.push(' ');
            }
            result.push_str(m.as_ref());
        }
        self.result = result;
        self.status = RecordStatus::Fetched {
            matches: matches.len(),
        };
        self
    }

    /// Completes the record with an error description
    pub fn with_error(mut self, error: impl fmt::Display) -> Self {
        debug_assert!(!self.status.is_complete(), "record completed twice");
        self.result = error.to_string();
        self.status = RecordStatus::Failed;
        self
    }
}
