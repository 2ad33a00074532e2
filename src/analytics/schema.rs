//! Term column resolution
//!
//! Term count columns are generated at request time, so they are addressed by
//! name. [`TermSchema`] resolves the requested names against a batch's column
//! list once, before any aggregation runs, and the aggregator then works with
//! positional indices only.

use serde::Serialize;

use super::aggregate::{AggregateError, AggregateResult};
use crate::models::is_reserved_column;

const COUNT_SUFFIX: &str = "_count";
const PROP_SUFFIX: &str = "_prop";

/// A requested term bound to its column position in a batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedTerm {
    /// Column name exactly as the extractor produced it
    pub name: String,

    /// Position of the count in `Record::term_counts`
    pub index: usize,
}

/// Ordered, validated set of term columns for one request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TermSchema {
    terms: Vec<ResolvedTerm>,
}

impl TermSchema {
    /// Resolve `requested` names against the `available` column list
    ///
    /// Request order is preserved and repeated names are kept once.
    ///
    /// # Errors
    /// - [`AggregateError::NoTerms`] if nothing was requested
    /// - [`AggregateError::ReservedColumn`] if a name is one of the fixed columns
    /// - [`AggregateError::UnknownColumn`] for the first name with no column
    pub fn resolve(available: &[String], requested: &[String]) -> AggregateResult<Self> {
        if requested.is_empty() {
            return Err(AggregateError::NoTerms);
        }

        let mut terms: Vec<ResolvedTerm> = Vec::with_capacity(requested.len());
        for name in requested {
            if terms.iter().any(|t| &t.name == name) {
                continue;
            }
            if is_reserved_column(name) {
                return Err(AggregateError::ReservedColumn(name.clone()));
            }
            let index = available
                .iter()
                .position(|c| c == name)
                .ok_or_else(|| AggregateError::UnknownColumn(name.clone()))?;
            terms.push(ResolvedTerm {
                name: name.clone(),
                index,
            });
        }

        Ok(Self { terms })
    }

    #[must_use]
    pub fn terms(&self) -> &[ResolvedTerm] {
        &self.terms
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Count column names in request order
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.terms.iter().map(|t| t.name.clone()).collect()
    }

    /// Proportion column names in request order
    #[must_use]
    pub fn proportion_names(&self) -> Vec<String> {
        self.terms
            .iter()
            .map(|t| proportion_column_name(&t.name))
            .collect()
    }
}

/// Derive the proportion column name for a count column
///
/// `scope 1_count` becomes `scope 1_prop`; a name without the `_count`
/// suffix gets `_prop` appended.
#[must_use]
pub fn proportion_column_name(count_column: &str) -> String {
    let stem = count_column
        .strip_suffix(COUNT_SUFFIX)
        .unwrap_or(count_column);
    format!("{stem}{PROP_SUFFIX}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_resolve_preserves_request_order() {
        let available = cols(&["a_count", "b_count", "c_count"]);
        let schema = TermSchema::resolve(&available, &cols(&["c_count", "a_count"])).unwrap();

        assert_eq!(schema.names(), cols(&["c_count", "a_count"]));
        assert_eq!(schema.terms()[0].index, 2);
        assert_eq!(schema.terms()[1].index, 0);
    }

    #[test]
    fn test_resolve_unknown_column() {
        let available = cols(&["a_count"]);
        let err = TermSchema::resolve(&available, &cols(&["a_count", "zzz_count"])).unwrap_err();
        assert!(matches!(err, AggregateError::UnknownColumn(name) if name == "zzz_count"));
    }

    #[test]
    fn test_resolve_rejects_reserved_names() {
        let available = cols(&["scope 1_count", "word_count"]);
        let err = TermSchema::resolve(&available, &cols(&["scope 1_count", "word_count"]))
            .unwrap_err();
        assert!(matches!(err, AggregateError::ReservedColumn(name) if name == "word_count"));

        let err = TermSchema::resolve(&available, &cols(&["year_month_dt"])).unwrap_err();
        assert!(matches!(err, AggregateError::ReservedColumn(_)));
    }

    #[test]
    fn test_resolve_requires_terms() {
        let err = TermSchema::resolve(&cols(&["a_count"]), &[]).unwrap_err();
        assert!(matches!(err, AggregateError::NoTerms));
    }

    #[test]
    fn test_resolve_dedups() {
        let available = cols(&["a_count"]);
        let schema = TermSchema::resolve(&available, &cols(&["a_count", "a_count"])).unwrap();
        assert_eq!(schema.len(), 1);
    }

    #[test]
    fn test_metacharacters_are_plain_names() {
        let available = cols(&["scope 1|scope 2_count"]);
        let schema = TermSchema::resolve(&available, &available).unwrap();
        assert_eq!(schema.proportion_names(), cols(&["scope 1|scope 2_prop"]));
    }

    #[test]
    fn test_proportion_column_name() {
        assert_eq!(proportion_column_name("scope 1_count"), "scope 1_prop");
        assert_eq!(proportion_column_name("emissions"), "emissions_prop");
        assert_eq!(proportion_column_name("count_count"), "count_prop");
    }
}
