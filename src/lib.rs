//! Elastic Query - fluent query builder for Elasticsearch
//!
//! Chain filters, ranges, aggregations, sorting and a result size onto a
//! [`QueryBuilder`], then call `search()` to submit the request and get the
//! raw cluster response back.
//!
//! The builder is a thin layer: it does not validate fields or values, does
//! not retry, and does not cache. Transport, authentication and cluster-side
//! errors reach the caller exactly as the client reported them.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use elastic_query::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let mut query = QueryBuilder::new(vec!["localhost:9200"])?
//!         .index("orders")
//!         .where_equals([("status", "paid")])
//!         .where_any_of("country", ["DE", "FR"])
//!         .range_filter("amount", [("gte", 10), ("lte", 500)])
//!         .take(20)
//!         .group_by("country")
//!         .sum_agg("amount")
//!         .order_by("created_at", SortOrder::Desc);
//!
//!     let response = query.search().await?;
//!     println!("{}", response["hits"]["total"]);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod observability;
pub mod query;

pub use config::Config;
pub use error::{Result, SearchError};
pub use query::QueryBuilder;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::client::{Connector, ElasticClient, HttpConnector, SearchClient};
    pub use crate::config::Config;
    pub use crate::error::{Result, SearchError};
    pub use crate::query::{Aggregation, QueryBuilder, SearchRequest, SortOrder, TargetSelector};
}
