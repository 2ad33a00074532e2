// Core data structures for corpus-trends

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::extract::ExtractError;

/// Name of the time-bucket column in every aggregated table
pub const MONTH_COLUMN: &str = "year_month_dt";

/// Name of the entity column
pub const ENTITY_COLUMN: &str = "company_name";

/// Name of the per-document word count column
pub const WORD_COUNT_COLUMN: &str = "word_count";

/// Name of the record count column produced by post aggregation
pub const COUNT_COLUMN: &str = "count";

/// Fixed column names that a generated term column must not take
pub const RESERVED_COLUMNS: [&str; 4] = [
    MONTH_COLUMN,
    ENTITY_COLUMN,
    WORD_COUNT_COLUMN,
    COUNT_COLUMN,
];

/// Whether `name` is one of the fixed table columns
#[must_use]
pub fn is_reserved_column(name: &str) -> bool {
    RESERVED_COLUMNS.contains(&name)
}

/// Calendar month bucket, stored as the first day of the month
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MonthBucket(NaiveDate);

impl MonthBucket {
    /// Truncate a date to its month
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date.with_day(1).unwrap_or(date))
    }

    /// Create from a year and a 1-based month
    #[must_use]
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(Self)
    }

    /// First day of the bucket
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.0
    }

    #[must_use]
    pub fn year(&self) -> i32 {
        self.0.year()
    }
}

impl fmt::Display for MonthBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// A dated source document as loaded from the corpus
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub company_name: String,
    pub date: NaiveDate,
    pub text: String,
}

impl Document {
    pub fn new(company_name: impl Into<String>, date: NaiveDate, text: impl Into<String>) -> Self {
        Self {
            company_name: company_name.into(),
            date,
            text: text.into(),
        }
    }
}

/// One document-derived row
///
/// `term_counts` is positional: index `i` holds the count for the batch's
/// `i`-th term column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub year_month_dt: MonthBucket,
    pub company_name: String,
    pub word_count: u64,
    pub term_counts: Vec<u64>,
}

impl Record {
    pub fn new(
        year_month_dt: MonthBucket,
        company_name: impl Into<String>,
        word_count: u64,
        term_counts: Vec<u64>,
    ) -> Self {
        Self {
            year_month_dt,
            company_name: company_name.into(),
            word_count,
            term_counts,
        }
    }
}

/// Records plus the ordered names of their term count columns
///
/// Every record in a batch carries exactly one count per term column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordBatch {
    term_columns: Vec<String>,
    records: Vec<Record>,
}

impl RecordBatch {
    /// Create an empty batch with the given term columns
    #[must_use]
    pub fn new(term_columns: Vec<String>) -> Self {
        Self {
            term_columns,
            records: Vec::new(),
        }
    }

    /// Build a batch from existing records, checking count arity
    pub fn from_records(
        term_columns: Vec<String>,
        records: Vec<Record>,
    ) -> Result<Self, ExtractError> {
        let mut batch = Self::new(term_columns);
        for record in records {
            batch.push(record)?;
        }
        Ok(batch)
    }

    /// Append a record
    pub fn push(&mut self, record: Record) -> Result<(), ExtractError> {
        if record.term_counts.len() != self.term_columns.len() {
            return Err(ExtractError::ArityMismatch {
                expected: self.term_columns.len(),
                actual: record.term_counts.len(),
            });
        }
        self.records.push(record);
        Ok(())
    }

    #[must_use]
    pub fn term_columns(&self) -> &[String] {
        &self.term_columns
    }

    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// A single cell in an aggregated table
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Month(MonthBucket),
    Text(String),
    Int(u64),
    Float(f64),
}

impl Value {
    /// Numeric view of the cell, if it has one
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(v) => Some(*v as f64),
            Self::Float(v) => Some(*v),
            Self::Month(_) | Self::Text(_) => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Month(m) => write!(f, "{m}"),
            Self::Text(s) => write!(f, "{s}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) if v.is_nan() => write!(f, "NaN"),
            Self::Float(v) => write!(f, "{v:.6}"),
        }
    }
}

/// Column-named table produced by aggregation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    /// Create an empty table with the given schema
    #[must_use]
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Append a row; its width must match the schema
    pub fn push_row(&mut self, row: Vec<Value>) {
        debug_assert_eq!(row.len(), self.columns.len(), "row width must match schema");
        self.rows.push(row);
    }

    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// `(rows, columns)`
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), self.columns.len())
    }

    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// All cells of a column, top to bottom
    #[must_use]
    pub fn column(&self, name: &str) -> Option<Vec<&Value>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(|row| &row[idx]).collect())
    }

    /// Render as a Markdown table
    #[must_use]
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("| {} |\n", self.columns.join(" | ")));
        out.push_str(&format!(
            "|{}\n",
            self.columns.iter().map(|_| "---|").collect::<String>()
        ));
        for row in &self.rows {
            let cells: Vec<String> = row.iter().map(ToString::to_string).collect();
            out.push_str(&format!("| {} |\n", cells.join(" | ")));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_bucket_truncates() {
        let date = NaiveDate::from_ymd_opt(2023, 5, 17).unwrap();
        let bucket = MonthBucket::from_date(date);
        assert_eq!(bucket, MonthBucket::new(2023, 5).unwrap());
        assert_eq!(bucket.to_string(), "2023-05-01");
    }

    #[test]
    fn test_month_bucket_ordering() {
        let jan = MonthBucket::new(2023, 1).unwrap();
        let dec = MonthBucket::new(2022, 12).unwrap();
        assert!(dec < jan);
    }

    #[test]
    fn test_batch_rejects_wrong_arity() {
        let mut batch = RecordBatch::new(vec!["a_count".to_string()]);
        let record = Record::new(MonthBucket::new(2023, 1).unwrap(), "A", 10, vec![1, 2]);
        let err = batch.push(record).unwrap_err();
        assert!(matches!(
            err,
            ExtractError::ArityMismatch {
                expected: 1,
                actual: 2
            }
        ));
        assert!(batch.is_empty());
    }

    #[test]
    fn test_table_shape_and_markdown() {
        let mut table = Table::new(vec!["year_month_dt".to_string(), "x_prop".to_string()]);
        table.push_row(vec![
            Value::Month(MonthBucket::new(2023, 1).unwrap()),
            Value::Float(f64::NAN),
        ]);
        assert_eq!(table.shape(), (1, 2));

        let md = table.to_markdown();
        assert!(md.starts_with("| year_month_dt | x_prop |"));
        assert!(md.contains("| 2023-01-01 | NaN |"));
    }

    #[test]
    fn test_value_as_f64() {
        assert_eq!(Value::Int(3).as_f64(), Some(3.0));
        assert_eq!(Value::Text("A".into()).as_f64(), None);
    }
}
