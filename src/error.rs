//! Unified error handling for the corpus-trends crate
//!
//! This module provides a unified error type that consolidates all domain-specific
//! errors into a single `Error` enum, while maintaining the ability to use
//! domain-specific errors when needed.
//!
//! # Architecture
//!
//! - [`TrendsErrorTrait`] - Common interface implemented by the unified error
//! - [`ErrorCategory`] - Classification of errors for handling strategies
//! - [`Error`] - Unified error enum wrapping all domain-specific errors
//!
//! # Usage
//!
//! ```rust,ignore
//! use corpus_trends::error::{Error, ErrorCategory, TrendsErrorTrait};
//!
//! fn handle_error(err: Error) {
//!     match err.category() {
//!         ErrorCategory::Schema => eprintln!("Check the term list: {err}"),
//!         _ => eprintln!("Fatal error: {err}"),
//!     }
//! }
//! ```

use thiserror::Error;

// Re-export domain-specific errors for convenience
pub use crate::analytics::AggregateError;
pub use crate::chart::ChartError;
pub use crate::extract::ExtractError;
pub use crate::storage::CorpusError;

/// Common trait for corpus-trends error types
pub trait TrendsErrorTrait: std::error::Error {
    /// Check if retrying with different user input can succeed
    fn is_recoverable(&self) -> bool;

    /// Get the error category for handling strategies
    fn category(&self) -> ErrorCategory;
}

/// Classification of errors for handling strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Requested columns or fields that do not exist
    Schema,
    /// Entity selections that match nothing
    Filter,
    /// Term expressions and corpus lines that cannot be parsed
    Parsing,
    /// Storage and I/O errors
    Storage,
    /// Configuration and validation errors
    Config,
}

impl ErrorCategory {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Schema => "schema",
            Self::Filter => "filter",
            Self::Parsing => "parsing",
            Self::Storage => "storage",
            Self::Config => "config",
        }
    }
}

/// Unified error type for the corpus-trends crate
#[derive(Error, Debug)]
pub enum Error {
    /// Aggregation errors
    #[error("Aggregation error: {0}")]
    Aggregate(#[from] AggregateError),

    /// Chart building errors
    #[error("Chart error: {0}")]
    Chart(#[from] ChartError),

    /// Term extraction errors
    #[error("Extraction error: {0}")]
    Extract(#[from] ExtractError),

    /// Corpus loading errors
    #[error("Corpus error: {0}")]
    Corpus(#[from] CorpusError),
}

impl TrendsErrorTrait for Error {
    fn is_recoverable(&self) -> bool {
        match self {
            Self::Aggregate(_) | Self::Extract(_) => true,
            Self::Chart(_) => false,
            Self::Corpus(CorpusError::InvalidYearRange { .. }) => true,
            Self::Corpus(_) => false,
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::Aggregate(e) => match e {
                AggregateError::InvalidFilter(_) => ErrorCategory::Filter,
                AggregateError::UnknownColumn(_)
                | AggregateError::NoTerms
                | AggregateError::ReservedColumn(_) => ErrorCategory::Schema,
            },
            Self::Chart(_) => ErrorCategory::Schema,
            Self::Extract(e) => match e {
                ExtractError::ArityMismatch { .. } | ExtractError::ReservedColumn { .. } => {
                    ErrorCategory::Schema
                }
                ExtractError::EmptyExpression | ExtractError::InvalidPattern { .. } => {
                    ErrorCategory::Parsing
                }
            },
            Self::Corpus(e) => match e {
                CorpusError::Read { .. } => ErrorCategory::Storage,
                CorpusError::MalformedLine { .. } => ErrorCategory::Parsing,
                CorpusError::InvalidYearRange { .. } => ErrorCategory::Config,
            },
        }
    }
}

/// Result type alias using the unified Error type
pub type Result<T> = std::result::Result<T, Error>;
