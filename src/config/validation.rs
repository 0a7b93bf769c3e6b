//! Configuration validation

use super::*;
use crate::error::{SearchError, Result};

/// Validate complete configuration
pub fn validate_config(config: &Config) -> Result<()> {
    validate_cluster_config(&config.cluster)?;
    validate_query_config(&config.query)?;
    validate_logging_config(&config.logging)?;
    Ok(())
}

/// Validate cluster connection settings
fn validate_cluster_config(config: &ClusterConfig) -> Result<()> {
    if config.hosts.is_empty() {
        return Err(SearchError::Config(
            "At least one cluster host is required".to_string()
        ));
    }

    if config.hosts.iter().any(|h| h.trim().is_empty()) {
        return Err(SearchError::Config(
            "Cluster host addresses cannot be empty".to_string()
        ));
    }

    if config.timeout_secs == 0 {
        return Err(SearchError::Config(
            "Cluster timeout must be greater than 0".to_string()
        ));
    }

    if config.timeout_secs > 300 {
        return Err(SearchError::Config(
            "Cluster timeout too large (max: 300 seconds)".to_string()
        ));
    }

    match (&config.username, &config.password) {
        (Some(username), _) if username.is_empty() => {
            return Err(SearchError::Config(
                "Cluster username cannot be empty".to_string()
            ));
        }
        (None, Some(_)) => {
            return Err(SearchError::Config(
                "Cluster password is set without a username".to_string()
            ));
        }
        _ => {}
    }

    Ok(())
}

/// Validate query defaults
fn validate_query_config(config: &QueryConfig) -> Result<()> {
    if config.default_size == 0 {
        return Err(SearchError::Config(
            "Default result size must be greater than 0".to_string()
        ));
    }

    if matches!(&config.index, Some(index) if index.is_empty()) {
        return Err(SearchError::Config(
            "Default index cannot be empty".to_string()
        ));
    }

    if matches!(&config.doc_type, Some(doc_type) if doc_type.is_empty()) {
        return Err(SearchError::Config(
            "Default type cannot be empty".to_string()
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &LoggingConfig) -> Result<()> {
    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.to_lowercase().as_str()) {
        return Err(SearchError::Config(
            format!("Invalid log level: {} (valid: {:?})", config.level, valid_levels)
        ));
    }

    let valid_formats = ["pretty", "json", "compact"];
    if !valid_formats.contains(&config.format.as_str()) {
        return Err(SearchError::Config(
            format!("Invalid log format: {} (valid: {:?})", config.format, valid_formats)
        ));
    }

    Ok(())
}
