use crate::config::types::{Config, InputConfig, LoggingConfig, OutputConfig, SearchSettings};
use crate::ConfigError;

/// Upper bound on simultaneous requests
const MAX_CONCURRENT_REQUESTS: usize = 1000;

/// Upper bound on the block factor
const MAX_BLOCK_FACTOR: usize = 1000;

/// Upper bound on the per-request timeout (seconds)
const MAX_REQUEST_TIMEOUT_SECS: u64 = 600;

/// Highest supported debug level
const MAX_DEBUG_LEVEL: u8 = 2;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_search_settings(&config.search)?;
    validate_input_config(&config.input)?;
    validate_output_config(&config.output)?;
    validate_logging_config(&config.logging)?;
    Ok(())
}

/// Validates search configuration
///
/// Only emptiness is checked for the pattern; compiling it is the matcher's
/// job and reports a more precise error.
fn validate_search_settings(settings: &SearchSettings) -> Result<(), ConfigError> {
    if settings.pattern.is_empty() {
        return Err(ConfigError::Validation("pattern cannot be empty".to_string()));
    }

    if settings.max_concurrent_requests < 1
        || settings.max_concurrent_requests > MAX_CONCURRENT_REQUESTS
    {
        return Err(ConfigError::Validation(format!(
            "max_concurrent_requests must be between 1 and {}, got {}",
            MAX_CONCURRENT_REQUESTS, settings.max_concurrent_requests
        )));
    }

    if settings.block_factor < 1 || settings.block_factor > MAX_BLOCK_FACTOR {
        return Err(ConfigError::Validation(format!(
            "block_factor must be between 1 and {}, got {}",
            MAX_BLOCK_FACTOR, settings.block_factor
        )));
    }

    if settings.request_timeout_secs < 1
        || settings.request_timeout_secs > MAX_REQUEST_TIMEOUT_SECS
    {
        return Err(ConfigError::Validation(format!(
            "request_timeout_secs must be between 1 and {}, got {}",
            MAX_REQUEST_TIMEOUT_SECS, settings.request_timeout_secs
        )));
    }

    if settings.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation("user_agent cannot be empty".to_string()));
    }

    Ok(())
}

/// Validates input configuration
fn validate_input_config(config: &InputConfig) -> Result<(), ConfigError> {
    if config.path.as_os_str().is_empty() {
        return Err(ConfigError::Validation("input path cannot be empty".to_string()));
    }
    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.path.as_os_str().is_empty() {
        return Err(ConfigError::Validation("output path cannot be empty".to_string()));
    }
    Ok(())
}

fn validate_logging_config(config: &LoggingConfig) -> Result<(), ConfigError> {
    if config.debug_level > MAX_DEBUG_LEVEL {
        return Err(ConfigError::Validation(format!(
            "debug_level must be between 0 and {}, got {}",
            MAX_DEBUG_LEVEL, config.debug_level
        )));
    }
    Ok(())
}
