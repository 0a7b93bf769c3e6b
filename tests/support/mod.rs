//! Test doubles shared by the integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use elastic_query::client::{Connector, SearchClient};
use elastic_query::query::SearchRequest;
use elastic_query::{Result, SearchError};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// In-memory stand-in for a cluster.
///
/// Evaluates the subset of the query DSL the builder emits. Every scoring
/// clause that matches adds 1.0, filter clauses add nothing.
pub struct FixtureCluster {
    docs: Vec<Value>,
    pub requests: Mutex<Vec<SearchRequest>>,
}

impl FixtureCluster {
    pub fn new(docs: Vec<Value>) -> Self {
        Self {
            docs,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Run a raw request body, bypassing the builder
    pub fn run(&self, body: &Value) -> Value {
        let size = body["size"].as_u64().unwrap_or(10) as usize;

        let matched: Vec<(f64, &Value)> = self
            .docs
            .iter()
            .filter_map(|doc| match body.get("query") {
                Some(query) => score(query, doc).map(|s| (s, doc)),
                None => Some((1.0, doc)),
            })
            .collect();

        let hits: Vec<Value> = matched
            .iter()
            .take(size)
            .map(|(score, doc)| json!({ "_score": score, "_source": doc }))
            .collect();

        json!({
            "hits": {
                "total": { "value": matched.len() },
                "hits": hits
            }
        })
    }
}

#[async_trait]
impl SearchClient for FixtureCluster {
    async fn execute(&self, request: &SearchRequest) -> Result<Value> {
        self.requests.lock().unwrap().push(request.clone());
        let body = serde_json::to_value(&request.body)?;
        Ok(self.run(&body))
    }
}

fn clauses<'a>(body: &'a Value, occur: &str) -> &'a [Value] {
    body.get(occur)
        .and_then(Value::as_array)
        .map(|a| a.as_slice())
        .unwrap_or(&[])
}

/// Score of `doc` under `query`, `None` when it does not match
pub fn score(query: &Value, doc: &Value) -> Option<f64> {
    let (kind, body) = query.as_object()?.iter().next()?;

    match kind.as_str() {
        "match" => {
            let (field, spec) = body.as_object()?.iter().next()?;
            (doc.get(field)? == &spec["query"]).then_some(1.0)
        }
        "range" => {
            let (field, bounds) = body.as_object()?.iter().next()?;
            let value = doc.get(field)?.as_f64()?;
            for (op, bound) in bounds.as_object()? {
                let bound = bound.as_f64()?;
                let ok = match op.as_str() {
                    "gt" => value > bound,
                    "gte" => value >= bound,
                    "lt" => value < bound,
                    "lte" => value <= bound,
                    _ => false,
                };
                if !ok {
                    return None;
                }
            }
            Some(1.0)
        }
        "match_all" => Some(1.0),
        "match_none" => None,
        "bool" => {
            let must = clauses(body, "must");
            let filter = clauses(body, "filter");
            let should = clauses(body, "should");

            let mut total = 0.0;
            for clause in must {
                total += score(clause, doc)?;
            }
            for clause in filter {
                score(clause, doc)?;
            }

            let mut matched_should = 0;
            for clause in should {
                if let Some(s) = score(clause, doc) {
                    matched_should += 1;
                    total += s;
                }
            }

            if !should.is_empty() && must.is_empty() && filter.is_empty() && matched_should == 0 {
                return None;
            }

            Some(total)
        }
        _ => None,
    }
}

/// Connector handing out one shared client and counting how often it is asked
pub struct CountingConnector {
    pub connects: AtomicUsize,
    client: Arc<dyn SearchClient>,
}

impl CountingConnector {
    pub fn new(client: Arc<dyn SearchClient>) -> Self {
        Self {
            connects: AtomicUsize::new(0),
            client,
        }
    }

    pub fn count(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }
}

impl Connector for CountingConnector {
    fn connect(&self, _hosts: &[String]) -> Result<Arc<dyn SearchClient>> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        Ok(self.client.clone())
    }
}

/// Client that fails every request with a fresh transport error
pub struct BrokenTransport;

impl BrokenTransport {
    pub fn error() -> reqwest::Error {
        reqwest::Client::new()
            .get("not a url")
            .build()
            .unwrap_err()
    }
}

#[async_trait]
impl SearchClient for BrokenTransport {
    async fn execute(&self, _request: &SearchRequest) -> Result<Value> {
        Err(SearchError::Transport(Self::error()))
    }
}

/// Client that always answers with the same cluster-side rejection
pub struct RejectingCluster {
    pub status: u16,
    pub body: Value,
}

#[async_trait]
impl SearchClient for RejectingCluster {
    async fn execute(&self, _request: &SearchRequest) -> Result<Value> {
        Err(SearchError::Cluster {
            status: self.status,
            body: self.body.clone(),
        })
    }
}

/// Product catalogue used across tests
pub fn products() -> Vec<Value> {
    vec![
        json!({ "name": "shirt", "color": "red", "status": "active", "age": 25, "price": 20 }),
        json!({ "name": "scarf", "color": "blue", "status": "active", "age": 70, "price": 15 }),
        json!({ "name": "hat", "color": "green", "status": "active", "age": 40, "price": 30 }),
        json!({ "name": "sock", "color": "red", "status": "archived", "age": 16, "price": 5 }),
        json!({ "name": "coat", "color": "blue", "status": "active", "age": 18, "price": 120 }),
    ]
}
