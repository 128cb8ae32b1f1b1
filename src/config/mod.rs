//! Configuration module for Site-Searcher
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files, and merging them with command-line overrides.
//!
//! # Example
//!
//! ```no_run
//! use site_searcher::config::{resolve_config, ConfigOverrides};
//! use std::path::Path;
//!
//! let overrides = ConfigOverrides::default();
//! let (config, _) = resolve_config(Some(Path::new("searcher.toml")), &overrides).unwrap();
//! println!("At most {} requests in flight", config.search.max_concurrent_requests);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, ConfigOverrides, InputConfig, LoggingConfig, OutputConfig, SearchSettings};

// Re-export parser functions
pub use parser::{parse_config, resolve_config};
pub use validation::validate;
