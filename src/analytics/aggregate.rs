//! Monthly aggregation of extracted term counts
//!
//! This module provides functionality for:
//! - Counting records per month, optionally per entity
//! - Summing raw term counts per month
//! - Normalizing term counts by the monthly word count
//!
//! Grouping is an ordered map from group key to running sums, so every
//! output table comes out sorted by its group key without a separate sort.
//! Sums saturate at `u64::MAX`.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use thiserror::Error;

use super::schema::TermSchema;
use crate::models::{
    MonthBucket, Record, RecordBatch, Table, Value, COUNT_COLUMN, ENTITY_COLUMN, MONTH_COLUMN,
    WORD_COUNT_COLUMN,
};

/// Errors that can occur during aggregation
#[derive(Debug, Error)]
pub enum AggregateError {
    #[error("Unknown term column: {0}")]
    UnknownColumn(String),

    #[error("No term columns requested")]
    NoTerms,

    #[error("Term column uses a reserved name: {0}")]
    ReservedColumn(String),

    #[error("Entity filter matched no records: {}", .0.join(", "))]
    InvalidFilter(Vec<String>),
}

/// Result type for aggregation operations
pub type AggregateResult<T> = Result<T, AggregateError>;

/// Running sums for one month
#[derive(Debug, Clone)]
struct MonthSums {
    word_count: u64,
    terms: Vec<u64>,
}

impl MonthSums {
    fn new(width: usize) -> Self {
        Self {
            word_count: 0,
            terms: vec![0; width],
        }
    }

    fn add(&mut self, record: &Record, schema: &TermSchema) {
        self.word_count = self.word_count.saturating_add(record.word_count);
        for (sum, term) in self.terms.iter_mut().zip(schema.terms()) {
            *sum = sum.saturating_add(record.term_counts[term.index]);
        }
    }
}

fn sum_by_month<'a, I>(records: I, schema: &TermSchema) -> BTreeMap<MonthBucket, MonthSums>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut groups: BTreeMap<MonthBucket, MonthSums> = BTreeMap::new();
    for record in records {
        groups
            .entry(record.year_month_dt)
            .or_insert_with(|| MonthSums::new(schema.len()))
            .add(record, schema);
    }
    groups
}

/// Count records per month, or per entity and month
///
/// Without entity grouping the columns are `[year_month_dt, count]`, sorted
/// by month. With it they are `[year_month_dt, company_name, count]`, sorted
/// by entity name first and month second, which is the legend order of the
/// resulting chart.
#[must_use]
pub fn aggregate_posts_by_time(batch: &RecordBatch, group_by_entity: bool) -> Table {
    if group_by_entity {
        let mut groups: BTreeMap<(&str, MonthBucket), u64> = BTreeMap::new();
        for record in batch.records() {
            let count = groups
                .entry((record.company_name.as_str(), record.year_month_dt))
                .or_default();
            *count = count.saturating_add(1);
        }

        let mut table = Table::new(vec![
            MONTH_COLUMN.to_string(),
            ENTITY_COLUMN.to_string(),
            COUNT_COLUMN.to_string(),
        ]);
        for ((entity, month), count) in groups {
            table.push_row(vec![
                Value::Month(month),
                Value::Text(entity.to_string()),
                Value::Int(count),
            ]);
        }
        tracing::debug!(rows = table.len(), "Aggregated posts by entity and month");
        table
    } else {
        let mut groups: BTreeMap<MonthBucket, u64> = BTreeMap::new();
        for record in batch.records() {
            let count = groups.entry(record.year_month_dt).or_default();
            *count = count.saturating_add(1);
        }

        let mut table = Table::new(vec![MONTH_COLUMN.to_string(), COUNT_COLUMN.to_string()]);
        for (month, count) in groups {
            table.push_row(vec![Value::Month(month), Value::Int(count)]);
        }
        tracing::debug!(rows = table.len(), "Aggregated posts by month");
        table
    }
}

/// Sum raw term counts per month
///
/// Columns are `[year_month_dt, <term_names...>]` in request order.
///
/// # Errors
/// - [`AggregateError::NoTerms`] if `term_names` is empty
/// - [`AggregateError::UnknownColumn`] if a name is not a term column of the batch
pub fn aggregate_terms_raw(batch: &RecordBatch, term_names: &[String]) -> AggregateResult<Table> {
    let schema = TermSchema::resolve(batch.term_columns(), term_names)?;

    let mut columns = vec![MONTH_COLUMN.to_string()];
    columns.extend(schema.names());
    let mut table = Table::new(columns);

    for (month, sums) in sum_by_month(batch.records(), &schema) {
        let mut row = Vec::with_capacity(schema.len() + 1);
        row.push(Value::Month(month));
        row.extend(sums.terms.into_iter().map(Value::Int));
        table.push_row(row);
    }

    tracing::debug!(
        terms = ?schema.names(),
        input_rows = batch.len(),
        rows = table.len(),
        "Aggregated raw term counts"
    );
    Ok(table)
}

/// Sum term counts per month and normalize them by the month's word count
///
/// When `entity_filter` holds at least one name, only records whose
/// `company_name` is in it take part. Columns are
/// `[year_month_dt, <term_names...>, word_count, <prop columns...>]`. A month
/// whose summed word count is zero gets `NaN` proportions.
///
/// # Errors
/// - [`AggregateError::NoTerms`] if `term_names` is empty
/// - [`AggregateError::UnknownColumn`] if a name is not a term column of the batch
/// - [`AggregateError::InvalidFilter`] if the batch is non-empty but no record
///   belongs to any filtered entity
pub fn aggregate_terms_proportion(
    batch: &RecordBatch,
    term_names: &[String],
    entity_filter: Option<&[String]>,
) -> AggregateResult<Table> {
    let schema = TermSchema::resolve(batch.term_columns(), term_names)?;

    let filter: Option<HashSet<&str>> = entity_filter
        .filter(|entities| !entities.is_empty())
        .map(|entities| entities.iter().map(String::as_str).collect());

    let selected: Vec<&Record> = match &filter {
        Some(entities) => batch
            .records()
            .iter()
            .filter(|r| entities.contains(r.company_name.as_str()))
            .collect(),
        None => batch.records().iter().collect(),
    };

    if let Some(entities) = entity_filter {
        if filter.is_some() && selected.is_empty() && !batch.is_empty() {
            return Err(AggregateError::InvalidFilter(entities.to_vec()));
        }
    }

    let mut columns = vec![MONTH_COLUMN.to_string()];
    columns.extend(schema.names());
    columns.push(WORD_COUNT_COLUMN.to_string());
    columns.extend(schema.proportion_names());
    let mut table = Table::new(columns);

    for (month, sums) in sum_by_month(selected.iter().copied(), &schema) {
        let mut row = Vec::with_capacity(schema.len() * 2 + 2);
        row.push(Value::Month(month));
        row.extend(sums.terms.iter().map(|&count| Value::Int(count)));
        row.push(Value::Int(sums.word_count));
        let denominator = sums.word_count as f64;
        row.extend(sums.terms.iter().map(|&count| {
            if sums.word_count == 0 {
                Value::Float(f64::NAN)
            } else {
                Value::Float(count as f64 / denominator)
            }
        }));
        table.push_row(row);
    }

    tracing::debug!(
        terms = ?schema.names(),
        filter = ?entity_filter,
        input_rows = batch.len(),
        selected_rows = selected.len(),
        rows = table.len(),
        "Aggregated term proportions"
    );
    Ok(table)
}

/// Sorted, de-duplicated entity names present in a batch
#[must_use]
pub fn distinct_entities(batch: &RecordBatch) -> Vec<String> {
    batch
        .records()
        .iter()
        .map(|r| r.company_name.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
