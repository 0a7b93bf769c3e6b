//! Data models for search requests
//!
//! Each type serializes to the Elasticsearch query DSL, so the builder only
//! has to collect them.

use indexmap::IndexMap;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Default number of hits requested, also the default terms bucket size
pub const DEFAULT_SIZE: usize = 10_000;

/// Serializes as a map with a single `key: value` entry
struct Keyed<'a, T: ?Sized>(&'a str, &'a T);

impl<T: Serialize + ?Sized> Serialize for Keyed<'_, T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.0, self.1)?;
        map.end()
    }
}

#[derive(Serialize)]
struct MatchText<'a> {
    query: &'a Value,
}

#[derive(Serialize)]
struct Empty {}

/// A single query clause
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    /// Full-text match of `value` against `field`
    Match { field: String, value: Value },

    /// Range over `field`, bounds keyed by comparator (`gt`, `gte`, `lt`, `lte`, ...)
    Range { field: String, bounds: Map<String, Value> },

    /// Compound clause
    Bool(BoolQuery),

    /// Matches no documents
    MatchNone,
}

impl Query {
    pub fn matches(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Query::Match {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn range(field: impl Into<String>, bounds: Map<String, Value>) -> Self {
        Query::Range {
            field: field.into(),
            bounds,
        }
    }
}

impl Serialize for Query {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Query::Match { field, value } => {
                Keyed("match", &Keyed(field, &MatchText { query: value })).serialize(serializer)
            }
            Query::Range { field, bounds } => {
                Keyed("range", &Keyed(field, bounds)).serialize(serializer)
            }
            Query::Bool(bool_query) => bool_query.serialize(serializer),
            Query::MatchNone => Keyed("match_none", &Empty {}).serialize(serializer),
        }
    }
}

/// Compound clause combining sub-clauses by occurrence type
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoolQuery {
    /// All must match, contributes to score
    pub must: Vec<Query>,

    /// At least one should match when there is no must or filter
    pub should: Vec<Query>,

    /// All must match, does not contribute to score
    pub filter: Vec<Query>,
}

fn no_clauses(clauses: &&[Query]) -> bool {
    clauses.is_empty()
}

#[derive(Serialize)]
struct BoolClauses<'a> {
    #[serde(skip_serializing_if = "no_clauses")]
    must: &'a [Query],

    #[serde(skip_serializing_if = "no_clauses")]
    should: &'a [Query],

    #[serde(skip_serializing_if = "no_clauses")]
    filter: &'a [Query],
}

impl BoolQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn must(mut self, query: Query) -> Self {
        self.must.push(query);
        self
    }

    pub fn should(mut self, query: Query) -> Self {
        self.should.push(query);
        self
    }

    pub fn filter(mut self, query: Query) -> Self {
        self.filter.push(query);
        self
    }

    /// Number of clauses across all occurrence types
    pub fn len(&self) -> usize {
        self.must.len() + self.should.len() + self.filter.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Serialize for BoolQuery {
    /// A bool holding exactly one must clause and nothing else serializes as
    /// that clause alone.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.must.len() == 1 && self.should.is_empty() && self.filter.is_empty() {
            return self.must[0].serialize(serializer);
        }

        let clauses = BoolClauses {
            must: &self.must,
            should: &self.should,
            filter: &self.filter,
        };
        Keyed("bool", &clauses).serialize(serializer)
    }
}

/// Named aggregation over a single field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Aggregation {
    Count { field: String },
    Sum { field: String },
    Min { field: String },
    Max { field: String },
    Avg { field: String },
    Terms { field: String, size: usize },
}

#[derive(Serialize)]
struct AggregationBody<'a> {
    field: &'a str,

    #[serde(skip_serializing_if = "Option::is_none")]
    size: Option<usize>,
}

impl Aggregation {
    /// Name the aggregation is registered under in the request
    pub fn name(&self) -> &str {
        match self {
            Aggregation::Count { .. } => "count",
            _ => self.field(),
        }
    }

    pub fn field(&self) -> &str {
        match self {
            Aggregation::Count { field }
            | Aggregation::Sum { field }
            | Aggregation::Min { field }
            | Aggregation::Max { field }
            | Aggregation::Avg { field }
            | Aggregation::Terms { field, .. } => field,
        }
    }

    /// DSL keyword of the aggregation type
    pub fn kind(&self) -> &'static str {
        match self {
            Aggregation::Count { .. } => "value_count",
            Aggregation::Sum { .. } => "sum",
            Aggregation::Min { .. } => "min",
            Aggregation::Max { .. } => "max",
            Aggregation::Avg { .. } => "avg",
            Aggregation::Terms { .. } => "terms",
        }
    }
}

impl Serialize for Aggregation {
    /// Serializes the aggregation body without its name
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let size = match self {
            Aggregation::Terms { size, .. } => Some(*size),
            _ => None,
        };
        let body = AggregationBody {
            field: self.field(),
            size,
        };
        Keyed(self.kind(), &body).serialize(serializer)
    }
}

/// Sort direction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
    /// Any other token, forwarded to the cluster as-is
    Other(String),
}

impl SortOrder {
    pub fn as_str(&self) -> &str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
            SortOrder::Other(token) => token,
        }
    }
}

impl Serialize for SortOrder {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl From<&str> for SortOrder {
    fn from(token: &str) -> Self {
        match token.to_ascii_lowercase().as_str() {
            "asc" => SortOrder::Asc,
            "desc" => SortOrder::Desc,
            _ => SortOrder::Other(token.to_string()),
        }
    }
}

impl From<String> for SortOrder {
    fn from(token: String) -> Self {
        SortOrder::from(token.as_str())
    }
}

/// Sort entry on a single field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSort {
    pub field: String,
    pub order: SortOrder,
}

#[derive(Serialize)]
struct SortSpec<'a> {
    order: &'a SortOrder,
}

impl FieldSort {
    pub fn new(field: impl Into<String>, order: impl Into<SortOrder>) -> Self {
        Self {
            field: field.into(),
            order: order.into(),
        }
    }
}

impl Serialize for FieldSort {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Keyed(&self.field, &SortSpec { order: &self.order }).serialize(serializer)
    }
}

/// Index and optional type a search is addressed to
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetSelector {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<String>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub doc_type: Option<String>,
}

impl TargetSelector {
    /// Unencoded path segments of the search endpoint for this target
    pub fn path_segments(&self) -> Vec<&str> {
        let mut segments = Vec::with_capacity(3);
        match (&self.index, &self.doc_type) {
            (Some(index), Some(doc_type)) => {
                segments.push(index.as_str());
                segments.push(doc_type.as_str());
            }
            (Some(index), None) => segments.push(index.as_str()),
            (None, Some(doc_type)) => {
                segments.push("_all");
                segments.push(doc_type.as_str());
            }
            (None, None) => {}
        }
        segments.push("_search");
        segments
    }

    /// Human readable path of the search endpoint, for logging
    pub fn search_path(&self) -> String {
        format!("/{}", self.path_segments().join("/"))
    }
}

/// Accumulated request body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchBody {
    /// Root query, `None` when no clause was added
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<Query>,

    /// Aggregations keyed by name, in insertion order
    #[serde(rename = "aggs", skip_serializing_if = "IndexMap::is_empty")]
    pub aggregations: IndexMap<String, Aggregation>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sort: Vec<FieldSort>,

    pub size: usize,
}

/// Everything the client needs to run one search
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchRequest {
    pub target: TargetSelector,
    pub body: SearchBody,
}
