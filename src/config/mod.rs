//! Configuration management for corpus-trends
//!
//! This module handles loading and validating configuration from environment variables,
//! files, and command-line arguments.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::extract::{split_term_expression, DEFAULT_TERM_EXPRESSION};
use crate::storage::YearRange;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Corpus configuration
    pub corpus: CorpusConfig,

    /// Term defaults
    pub terms: TermsConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Corpus location and date filtering
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusConfig {
    /// JSON Lines corpus file
    pub path: PathBuf,

    /// First year to include
    pub from_year: Option<i32>,

    /// Last year to include
    pub to_year: Option<i32>,
}

/// Term defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TermsConfig {
    /// Comma-separated term expression used when none is given
    pub default_expression: String,

    /// Chart proportions instead of raw counts
    pub proportion: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let path = std::env::var("CORPUS_TRENDS_CORPUS_PATH")
            .unwrap_or_else(|_| String::from("data/corpus.jsonl"))
            .into();

        let from_year = std::env::var("CORPUS_TRENDS_FROM_YEAR")
            .ok()
            .and_then(|v| v.parse::<i32>().ok());

        let to_year = std::env::var("CORPUS_TRENDS_TO_YEAR")
            .ok()
            .and_then(|v| v.parse::<i32>().ok());

        let default_expression = std::env::var("CORPUS_TRENDS_TERMS")
            .unwrap_or_else(|_| String::from(DEFAULT_TERM_EXPRESSION));

        let proportion = std::env::var("CORPUS_TRENDS_PROPORTION")
            .ok()
            .and_then(|v| v.parse::<bool>().ok())
            .unwrap_or(true);

        let log_level =
            std::env::var("CORPUS_TRENDS_LOG_LEVEL").unwrap_or_else(|_| String::from("info"));

        let log_format =
            std::env::var("CORPUS_TRENDS_LOG_FORMAT").unwrap_or_else(|_| String::from("text"));

        Ok(Self {
            corpus: CorpusConfig {
                path,
                from_year,
                to_year,
            },
            terms: TermsConfig {
                default_expression,
                proportion,
            },
            logging: LoggingConfig {
                level: log_level,
                format: log_format,
            },
        })
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if split_term_expression(&self.terms.default_expression).is_empty() {
            anyhow::bail!("terms.default_expression must contain at least one term");
        }

        self.year_range()?;

        if !matches!(self.logging.format.as_str(), "text" | "json") {
            anyhow::bail!(
                "logging.format must be 'text' or 'json', got '{}'",
                self.logging.format
            );
        }

        Ok(())
    }

    /// Year filter for corpus loading
    pub fn year_range(&self) -> Result<YearRange> {
        YearRange::new(self.corpus.from_year, self.corpus.to_year)
            .context("Invalid corpus year range")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            corpus: CorpusConfig {
                path: PathBuf::from("data/corpus.jsonl"),
                from_year: None,
                to_year: None,
            },
            terms: TermsConfig {
                default_expression: String::from(DEFAULT_TERM_EXPRESSION),
                proportion: true,
            },
            logging: LoggingConfig {
                level: String::from("info"),
                format: String::from("text"),
            },
        }
    }
}
