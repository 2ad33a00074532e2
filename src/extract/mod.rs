//! Term extraction: documents in, per-record term counts out
//!
//! A term expression is a comma-separated list of terms. Each term is a
//! case-insensitive regular expression, so `scope 1|scope 2` is a single term
//! whose count covers both alternatives. Each term becomes one count column
//! named `<term>_count`, metacharacters included.

use regex::{Regex, RegexBuilder};
use thiserror::Error;

use crate::models::{is_reserved_column, Document, MonthBucket, Record, RecordBatch};

/// Term expression used when none is supplied
pub const DEFAULT_TERM_EXPRESSION: &str = "scope 1,scope 2,scope 3";

const TERM_SEPARATOR: char = ',';
const COUNT_SUFFIX: &str = "_count";

/// Errors that can occur during term extraction
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Term expression contains no terms")]
    EmptyExpression,

    #[error("Invalid term pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Term '{term}' would produce the reserved column '{column}'")]
    ReservedColumn { term: String, column: String },

    #[error("Record has {actual} term counts, batch expects {expected}")]
    ArityMismatch { expected: usize, actual: usize },
}

/// Result type for extraction operations
pub type ExtractResult<T> = Result<T, ExtractError>;

/// Split a term expression into its terms
///
/// Surrounding whitespace is trimmed and empty segments are dropped.
#[must_use]
pub fn split_term_expression(expression: &str) -> Vec<String> {
    expression
        .split(TERM_SEPARATOR)
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .map(str::to_string)
        .collect()
}

/// Number of whitespace-separated tokens
#[must_use]
pub fn word_count(text: &str) -> u64 {
    text.split_whitespace().count() as u64
}

/// A compiled term and the column it feeds
#[derive(Debug, Clone)]
pub struct TermPattern {
    term: String,
    column: String,
    regex: Regex,
}

impl TermPattern {
    /// Compile a single term
    ///
    /// # Errors
    /// - [`ExtractError::ReservedColumn`] if `<term>_count` names a fixed column
    /// - [`ExtractError::InvalidPattern`] if the term is not a valid regex
    pub fn new(term: &str) -> ExtractResult<Self> {
        let column = format!("{term}{COUNT_SUFFIX}");
        if is_reserved_column(&column) {
            return Err(ExtractError::ReservedColumn {
                term: term.to_string(),
                column,
            });
        }

        let regex = RegexBuilder::new(term)
            .case_insensitive(true)
            .build()
            .map_err(|source| ExtractError::InvalidPattern {
                pattern: term.to_string(),
                source,
            })?;

        Ok(Self {
            term: term.to_string(),
            column,
            regex,
        })
    }

    #[must_use]
    pub fn term(&self) -> &str {
        &self.term
    }

    #[must_use]
    pub fn column(&self) -> &str {
        &self.column
    }

    /// Non-overlapping matches in `text`
    #[must_use]
    pub fn count(&self, text: &str) -> u64 {
        self.regex.find_iter(text).count() as u64
    }
}

/// Turns documents into a [`RecordBatch`] for one term expression
#[derive(Debug, Clone)]
pub struct TermExtractor {
    patterns: Vec<TermPattern>,
}

impl TermExtractor {
    /// Parse and compile a term expression
    ///
    /// # Errors
    /// - [`ExtractError::EmptyExpression`] if the expression has no terms
    /// - [`ExtractError::ReservedColumn`] if a term would shadow a fixed column
    /// - [`ExtractError::InvalidPattern`] if a term is not a valid regex
    pub fn parse(expression: &str) -> ExtractResult<Self> {
        let terms = split_term_expression(expression);
        if terms.is_empty() {
            return Err(ExtractError::EmptyExpression);
        }

        let mut patterns: Vec<TermPattern> = Vec::with_capacity(terms.len());
        for term in &terms {
            if patterns.iter().any(|p| p.term == *term) {
                continue;
            }
            patterns.push(TermPattern::new(term)?);
        }

        tracing::debug!(terms = ?terms, "Compiled term expression");
        Ok(Self { patterns })
    }

    /// Extractor with no terms, for record counting only
    #[must_use]
    pub fn empty() -> Self {
        Self {
            patterns: Vec::new(),
        }
    }

    #[must_use]
    pub fn patterns(&self) -> &[TermPattern] {
        &self.patterns
    }

    /// Generated count column names, in expression order
    #[must_use]
    pub fn column_names(&self) -> Vec<String> {
        self.patterns.iter().map(|p| p.column.clone()).collect()
    }

    /// Build one record for a document
    #[must_use]
    pub fn record(&self, document: &Document) -> Record {
        Record::new(
            MonthBucket::from_date(document.date),
            document.company_name.clone(),
            word_count(&document.text),
            self.patterns.iter().map(|p| p.count(&document.text)).collect(),
        )
    }

    /// Build the batch for a set of documents
    pub fn extract(&self, documents: &[Document]) -> ExtractResult<RecordBatch> {
        let mut batch = RecordBatch::new(self.column_names());
        for document in documents {
            batch.push(self.record(document))?;
        }

        tracing::info!(
            documents = documents.len(),
            terms = self.patterns.len(),
            "Extracted term counts"
        );
        Ok(batch)
    }
}
