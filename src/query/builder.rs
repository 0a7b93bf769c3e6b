//! Fluent builder that accumulates clauses and submits one search

use super::models::*;
use crate::client::{Connector, HttpConnector, SearchClient};
use crate::config::Config;
use crate::error::{Result, SearchError};
use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, info};

/// Builder for a single search against a cluster.
///
/// Configuration methods consume and return the builder so calls can be
/// chained. The client is created on the first [`search`](Self::search) (or
/// [`connect`](Self::connect)) and reused afterwards. `search` takes
/// `&mut self`, so one builder cannot be driven from two tasks at once; use one
/// builder per logical query.
///
/// Nothing is validated locally: unknown fields, malformed bounds and bad sort
/// tokens are only reported by the cluster when the request is submitted.
pub struct QueryBuilder {
    hosts: Vec<String>,
    connector: Arc<dyn Connector>,
    client: Option<Arc<dyn SearchClient>>,
    target: TargetSelector,
    root: Vec<Query>,
    clauses: BoolQuery,
    aggregations: IndexMap<String, Aggregation>,
    sort: Vec<FieldSort>,
    size: usize,
}

impl QueryBuilder {
    /// Create a builder that talks HTTP to the given hosts
    pub fn new<I, S>(hosts: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_connector(hosts, Arc::new(HttpConnector::default()))
    }

    /// Create a builder that obtains its client from `connector`
    pub fn with_connector<I, S>(hosts: I, connector: Arc<dyn Connector>) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let hosts: Vec<String> = hosts.into_iter().map(Into::into).collect();
        if hosts.is_empty() {
            return Err(SearchError::Config(
                "At least one host address is required".to_string(),
            ));
        }

        Ok(Self {
            hosts,
            connector,
            client: None,
            target: TargetSelector::default(),
            root: Vec::new(),
            clauses: BoolQuery::new(),
            aggregations: IndexMap::new(),
            sort: Vec::new(),
            size: DEFAULT_SIZE,
        })
    }

    /// Create a builder from validated configuration, applying its query defaults
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;

        let connector = HttpConnector::from_config(&config.cluster);
        let mut builder = Self::with_connector(config.cluster.hosts.clone(), Arc::new(connector))?;

        builder.size = config.query.default_size;
        builder.target.index = config.query.index.clone();
        builder.target.doc_type = config.query.doc_type.clone();

        Ok(builder)
    }

    /// Set the index to search, replacing any earlier value
    pub fn index(mut self, index: impl Into<String>) -> Self {
        self.target.index = Some(index.into());
        self
    }

    /// Set the document type to search, replacing any earlier value
    pub fn doc_type(mut self, doc_type: impl Into<String>) -> Self {
        self.target.doc_type = Some(doc_type.into());
        self
    }

    /// Add one match clause per entry directly to the root query.
    ///
    /// These clauses sit next to the bool container rather than inside it.
    pub fn where_equals<I, K, V>(mut self, conditions: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        for (field, value) in conditions {
            self.root.push(Query::matches(field, value));
        }
        self
    }

    /// Require `field` to match at least one of `values`.
    ///
    /// An empty `values` adds a branch that matches nothing, so the whole
    /// search returns no hits.
    pub fn where_any_of<I, V>(mut self, field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let field = field.into();
        let any_of = values
            .into_iter()
            .fold(BoolQuery::new(), |group, value| {
                group.should(Query::matches(field.clone(), value))
            });

        let branch = if any_of.is_empty() {
            Query::MatchNone
        } else {
            Query::Bool(any_of)
        };

        self.clauses.must.push(branch);
        self
    }

    /// Filter on a range of `field` without affecting scoring.
    ///
    /// `bounds` maps comparators such as `gte` or `lt` to values and is sent
    /// as given.
    pub fn range_filter<I, K, V>(mut self, field: impl Into<String>, bounds: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let bounds: Map<String, Value> = bounds
            .into_iter()
            .map(|(op, value)| (op.into(), value.into()))
            .collect();

        self.clauses.filter.push(Query::range(field, bounds));
        self
    }

    /// Count values of `field`, reported under the name `count`
    pub fn count_agg(self, field: impl Into<String>) -> Self {
        self.aggregate(Aggregation::Count { field: field.into() })
    }

    pub fn sum_agg(self, field: impl Into<String>) -> Self {
        self.aggregate(Aggregation::Sum { field: field.into() })
    }

    pub fn min_agg(self, field: impl Into<String>) -> Self {
        self.aggregate(Aggregation::Min { field: field.into() })
    }

    pub fn max_agg(self, field: impl Into<String>) -> Self {
        self.aggregate(Aggregation::Max { field: field.into() })
    }

    pub fn avg_agg(self, field: impl Into<String>) -> Self {
        self.aggregate(Aggregation::Avg { field: field.into() })
    }

    /// Set the number of hits to return.
    ///
    /// Also becomes the bucket size of every later `group_by`; earlier ones
    /// keep the size they were created with.
    pub fn take(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    /// Bucket documents by the distinct values of `field`
    pub fn group_by(self, field: impl Into<String>) -> Self {
        let size = self.size;
        self.aggregate(Aggregation::Terms {
            field: field.into(),
            size,
        })
    }

    /// Append a sort on `field`
    pub fn order_by(mut self, field: impl Into<String>, order: impl Into<SortOrder>) -> Self {
        self.sort.push(FieldSort::new(field, order));
        self
    }

    fn aggregate(mut self, aggregation: Aggregation) -> Self {
        self.aggregations
            .insert(aggregation.name().to_string(), aggregation);
        self
    }

    pub fn target(&self) -> &TargetSelector {
        &self.target
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Match clauses added at the root by `where_equals`
    pub fn root_clauses(&self) -> &[Query] {
        &self.root
    }

    /// The bool container holding any-of groups and range filters
    pub fn clause_set(&self) -> &BoolQuery {
        &self.clauses
    }

    pub fn aggregations(&self) -> &IndexMap<String, Aggregation> {
        &self.aggregations
    }

    pub fn sort(&self) -> &[FieldSort] {
        &self.sort
    }

    pub fn is_connected(&self) -> bool {
        self.client.is_some()
    }

    /// Assemble the request `search` would submit
    pub fn build_request(&self) -> SearchRequest {
        let mut root = BoolQuery {
            must: self.root.clone(),
            ..BoolQuery::default()
        };

        if !self.clauses.is_empty() {
            root.must.push(Query::Bool(self.clauses.clone()));
        }

        let query = if root.is_empty() {
            None
        } else {
            Some(Query::Bool(root))
        };

        SearchRequest {
            target: self.target.clone(),
            body: SearchBody {
                query,
                aggregations: self.aggregations.clone(),
                sort: self.sort.clone(),
                size: self.size,
            },
        }
    }

    /// Establish the client if it does not exist yet
    pub async fn connect(&mut self) -> Result<&mut Self> {
        self.client()?;
        Ok(self)
    }

    fn client(&mut self) -> Result<Arc<dyn SearchClient>> {
        if let Some(client) = &self.client {
            return Ok(client.clone());
        }

        info!("Connecting to search cluster at {:?}", self.hosts);
        let client = self.connector.connect(&self.hosts)?;
        self.client = Some(client.clone());

        Ok(client)
    }

    /// Submit the accumulated query and return the raw response.
    ///
    /// Errors from the client are returned exactly as the client produced
    /// them. There is no retry and no timeout at this layer.
    pub async fn search(&mut self) -> Result<Value> {
        let client = self.client()?;
        let request = self.build_request();

        debug!(
            "Submitting search to {} with {} aggregations",
            request.target.search_path(),
            self.aggregations.len()
        );

        client.execute(&request).await
    }
}
