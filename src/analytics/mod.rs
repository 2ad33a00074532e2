//! Aggregation of extracted term counts into monthly time series

pub mod aggregate;
pub mod schema;

pub use aggregate::{
    aggregate_posts_by_time, aggregate_terms_proportion, aggregate_terms_raw, distinct_entities,
    AggregateError, AggregateResult,
};
pub use schema::{proportion_column_name, ResolvedTerm, TermSchema};
