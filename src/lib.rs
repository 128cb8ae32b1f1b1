//! Site-Searcher: a bounded-concurrency home page searcher
//!
//! This crate fetches the home pages of a ranked list of websites, scans each
//! response body for a case-insensitive regular expression, and writes a
//! rank-ordered report of the matches found per site.

pub mod config;
pub mod input;
pub mod output;
pub mod record;
pub mod search;
pub mod url;

use thiserror::Error;

/// Main error type for Site-Searcher operations
///
/// Only startup and infrastructure failures surface as a `SearchError`.
/// Per-site fetch failures are recorded in the report instead.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },

    #[error("Input error: {0}")]
    Input(#[from] input::InputError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Admission gate is closed")]
    GateClosed,

    #[error("Block ended early: expected {expected} results, received {received}")]
    IncompleteBlock { expected: usize, received: usize },
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Target URL errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UrlError {
    #[error("Target is empty")]
    Empty,

    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingHost,
}

/// Result type alias for Site-Searcher operations
pub type Result<T> = std::result::Result<T, SearchError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use record::{RecordStatus, RequestRecord};
pub use search::{AdmissionGate, Coordinator, Matcher, SearchOptions};
pub use url::request_url;
