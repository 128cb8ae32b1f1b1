use crate::search::{
    SearchOptions, DEFAULT_BLOCK_FACTOR, DEFAULT_MAX_CONCURRENT_REQUESTS, DEFAULT_PATTERN,
    DEFAULT_REQUEST_TIMEOUT, DEFAULT_USER_AGENT,
};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration structure for Site-Searcher
///
/// Every section and key is optional in the TOML file.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub search: SearchSettings,
    pub input: InputConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

/// Search behavior configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct SearchSettings {
    /// Regular expression, always matched case-insensitively
    pub pattern: String,

    /// Maximum number of simultaneous HTTP requests
    #[serde(rename = "max-concurrent-requests")]
    pub max_concurrent_requests: usize,

    /// Block size as a multiple of max-concurrent-requests
    #[serde(rename = "block-factor")]
    pub block_factor: usize,

    /// Per-request timeout (seconds)
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,

    /// User-Agent header sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_PATTERN.to_string(),
            max_concurrent_requests: DEFAULT_MAX_CONCURRENT_REQUESTS,
            block_factor: DEFAULT_BLOCK_FACTOR,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT.as_secs(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl From<&SearchSettings> for SearchOptions {
    fn from(settings: &SearchSettings) -> Self {
        Self {
            max_concurrent_requests: settings.max_concurrent_requests,
            block_factor: settings.block_factor,
            request_timeout: Duration::from_secs(settings.request_timeout_secs),
            user_agent: settings.user_agent.clone(),
        }
    }
}

/// Ranked list location
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct InputConfig {
    /// Path to the ranked URL list
    pub path: PathBuf,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("urls.txt"),
        }
    }
}

/// Report location
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Path to the text report
    pub path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("out.txt"),
        }
    }
}

/// Diagnostic output configuration
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// 0 = progress only, 1 = per-event summary, 2 = per-event detail
    #[serde(rename = "debug-level")]
    pub debug_level: u8,
}

/// Values given on the command line, applied on top of the file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub input_path: Option<PathBuf>,
    pub output_path: Option<PathBuf>,
    pub pattern: Option<String>,
    pub max_concurrent_requests: Option<usize>,
    pub block_factor: Option<usize>,
    pub request_timeout_secs: Option<u64>,
    pub debug_level: Option<u8>,
}

impl Config {
    /// Replaces every value for which an override is present
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(path) = &overrides.input_path {
            self.input.path = path.clone();
        }
        if let Some(path) = &overrides.output_path {
            self.output.path = path.clone();
        }
        if let Some(pattern) = &overrides.pattern {
            self.search.pattern = pattern.clone();
        }
        if let Some(n) = overrides.max_concurrent_requests {
            self.search.max_concurrent_requests = n;
        }
        if let Some(n) = overrides.block_factor {
            self.search.block_factor = n;
        }
        if let Some(secs) = overrides.request_timeout_secs {
            self.search.request_timeout_secs = secs;
        }
        if let Some(level) = overrides.debug_level {
            self.logging.debug_level = level;
        }
    }

    /// Options handed to the search engine
    pub fn search_options(&self) -> SearchOptions {
        SearchOptions::from(&self.search)
    }
}
