//! Pattern matching over fetched page bodies
//!
//! The pattern is compiled once and shared read-only by every worker.

use crate::{Result, SearchError};
use regex::{Regex, RegexBuilder};

/// Pattern used when none is configured
pub const DEFAULT_PATTERN: &str = "new.?";

/// Case-insensitive pattern matcher shared by all workers
///
/// The regex is compiled once at startup. `Regex` is `Send + Sync`, so a
/// single matcher is used concurrently without locking.
#[derive(Debug, Clone)]
pub struct Matcher {
    regex: Regex,
}

impl Matcher {
    /// Compiles `pattern` case-insensitively
    ///
    /// The pattern is matched case-insensitively whatever the case of its
    /// literals.
    ///
    /// # Returns
    ///
    /// * `Ok(Matcher)` - The compiled matcher
    /// * `Err(SearchError::InvalidPattern)` - The pattern is malformed
    ///
    /// # Example
    ///
    /// ```
    /// use site_searcher::search::Matcher;
    ///
    /// let matcher = Matcher::new("new.?").unwrap();
    /// assert_eq!(matcher.find_all("NEWS and renewal"), vec!["NEWS", "newa"]);
    /// ```
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|source| SearchError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })?;

        Ok(Self { regex })
    }

    /// Returns all non-overlapping matches in order of occurrence
    pub fn find_all<'h>(&self, haystack: &'h str) -> Vec<&'h str> {
        self.regex.find_iter(haystack).map(|m| m.as_str()).collect()
    }
}
