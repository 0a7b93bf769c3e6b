//! Basic usage example for the query builder
//!
//! Expects a cluster at `ELASTIC_HOST` (default `localhost:9200`) with an
//! `orders` index.

use elastic_query::observability::init_observability;
use elastic_query::prelude::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_observability("debug", "pretty");

    let host = std::env::var("ELASTIC_HOST").unwrap_or_else(|_| "localhost:9200".to_string());

    let mut query = QueryBuilder::new(vec![host])?
        .index("orders")
        .where_equals([("status", "paid")])
        .where_any_of("country", ["DE", "FR", "NL"])
        .range_filter("amount", [("gte", 10), ("lte", 500)])
        .count_agg("order_id")
        .sum_agg("amount")
        .take(20)
        .group_by("country")
        .order_by("created_at", SortOrder::Desc);

    println!("Request body:\n{}", serde_json::to_string_pretty(&query.build_request().body)?);

    let response = query.search().await?;

    println!("Total hits: {}", response["hits"]["total"]);
    println!("Revenue: {}", response["aggregations"]["amount"]["value"]);

    if let Some(buckets) = response["aggregations"]["country"]["buckets"].as_array() {
        for bucket in buckets {
            println!("  {}: {}", bucket["key"], bucket["doc_count"]);
        }
    }

    Ok(())
}
