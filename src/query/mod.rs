//! Query construction: DSL models and the fluent builder

pub mod builder;
pub mod models;

pub use builder::QueryBuilder;
pub use models::{
    Aggregation, BoolQuery, FieldSort, Query, SearchBody, SearchRequest, SortOrder,
    TargetSelector, DEFAULT_SIZE,
};
