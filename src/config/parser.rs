use crate::config::types::{Config, ConfigOverrides};
use crate::config::validation::validate;
use crate::ConfigResult;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Parses configuration from TOML text without validating it
pub fn parse_config(content: &str) -> ConfigResult<Config> {
    let config: Config = toml::from_str(content)?;
    Ok(config)
}

/// Hex-encoded SHA-256 of the configuration file content
///
/// This is logged at startup so a report can be traced back to the
/// configuration that produced it.
fn hash_content(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    hex::encode(hasher.finalize())
}

/// Builds the effective configuration for a run
///
/// Starts from the file when one is given (defaults otherwise), applies the
/// command-line overrides, then validates the result. The file hash is
/// returned alongside when a file was read.
///
/// # Arguments
///
/// * `path` - Optional TOML configuration file
/// * `overrides` - Values given on the command line
///
/// # Returns
///
/// * `Ok((Config, Option<String>))` - Effective configuration and file hash
/// * `Err(ConfigError)` - The file could not be read or parsed, or the merged
///   configuration is invalid
///
/// # Example
///
/// ```no_run
/// use site_searcher::config::{resolve_config, ConfigOverrides};
/// use std::path::Path;
///
/// let (config, hash) =
///     resolve_config(Some(Path::new("searcher.toml")), &ConfigOverrides::default()).unwrap();
/// println!("Pattern: {} (config {:?})", config.search.pattern, hash);
/// ```
pub fn resolve_config(
    path: Option<&Path>,
    overrides: &ConfigOverrides,
) -> ConfigResult<(Config, Option<String>)> {
    let (mut config, hash) = match path {
        Some(path) => {
            let content = std::fs::read(path)?;
            let text = String::from_utf8_lossy(&content);
            (parse_config(&text)?, Some(hash_content(&content)))
        }
        None => (Config::default(), None),
    };

    config.apply_overrides(overrides);
    validate(&config)?;

    Ok((config, hash))
}
