//! corpus-trends - Term frequency trends over dated document corpora
//!
//! Counts user-supplied terms in dated documents (for example corporate
//! disclosures), aggregates the counts by calendar month, optionally per
//! company, and describes the result as line charts.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - [`config`] - Configuration management and settings
//! - [`storage`] - JSON Lines corpus loading and year filtering
//! - [`extract`] - Term expression parsing and per-document counting
//! - [`analytics`] - Monthly aggregation of counts and proportions
//! - [`chart`] - Line chart specifications and named figures
//! - [`models`] - Core data structures and types
//!
//! # Example
//!
//! ```no_run
//! use corpus_trends::chart::figures;
//! use corpus_trends::extract::TermExtractor;
//! use corpus_trends::storage::{load_corpus, YearRange};
//!
//! fn main() -> anyhow::Result<()> {
//!     let documents = load_corpus("data/corpus.jsonl".as_ref(), YearRange::default())?;
//!     let extractor = TermExtractor::parse("scope 1,scope 2,scope 3")?;
//!     let batch = extractor.extract(&documents)?;
//!     let figure = figures::terms_proportion(&batch, &extractor.column_names())?;
//!     println!("{}", serde_json::to_string_pretty(&figure.chart)?);
//!     Ok(())
//! }
//! ```

pub mod analytics;
pub mod chart;
pub mod config;
pub mod error;
pub mod extract;
pub mod models;
pub mod storage;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::analytics::{
        aggregate_posts_by_time, aggregate_terms_proportion, aggregate_terms_raw, TermSchema,
    };
    pub use crate::chart::{build_line_chart, ChartSpec, Figure};
    pub use crate::config::Config;
    pub use crate::error::{Error, ErrorCategory, Result, TrendsErrorTrait};
    pub use crate::extract::TermExtractor;
    pub use crate::models::{Document, MonthBucket, Record, RecordBatch, Table, Value};
}

// Direct re-exports for convenience
pub use models::{Document, MonthBucket, Record, RecordBatch, Table, Value};
