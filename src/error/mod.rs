//! Error types for the query builder and search client

use thiserror::Error;

/// Result type alias for query builder operations
pub type Result<T> = std::result::Result<T, SearchError>;

/// Main error type for building and submitting search requests
///
/// The builder never produces these itself while accumulating clauses. They
/// come from configuration, from connecting, or from the client during
/// `search()`, and are handed back to the caller untouched.
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Cluster returned status {status}: {body}")]
    Cluster {
        status: u16,
        body: serde_json::Value,
    },

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid host address: {0}")]
    InvalidHost(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl SearchError {
    /// HTTP status of a cluster-side rejection, if this is one
    pub fn status(&self) -> Option<u16> {
        match self {
            SearchError::Cluster { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<config::ConfigError> for SearchError {
    fn from(err: config::ConfigError) -> Self {
        SearchError::Config(err.to_string())
    }
}
