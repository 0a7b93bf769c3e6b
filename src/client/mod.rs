//! Search cluster clients

pub mod http;

pub use http::{ElasticClient, HttpConnector};

use crate::error::Result;
use crate::query::SearchRequest;
use async_trait::async_trait;
use std::sync::Arc;

/// Trait for clients that can run a search against a cluster
#[async_trait]
pub trait SearchClient: Send + Sync {
    /// Send the request and return the decoded response as received
    async fn execute(&self, request: &SearchRequest) -> Result<serde_json::Value>;
}

/// Trait for materializing a client from a list of host addresses
pub trait Connector: Send + Sync {
    /// Build a client for `hosts`; called at most once per builder
    fn connect(&self, hosts: &[String]) -> Result<Arc<dyn SearchClient>>;
}
