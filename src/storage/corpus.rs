//! JSON Lines corpus loading
//!
//! Each non-blank line is an object with `company_name`, `date` and `text`.
//! Documents whose date cannot be parsed are skipped with a warning, so every
//! loaded [`Document`] has a usable month bucket.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::models::Document;

/// Errors that can occur while loading a corpus
#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("Failed to read corpus {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Malformed corpus line {line}: {source}")]
    MalformedLine {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid year range: {from} is after {to}")]
    InvalidYearRange { from: i32, to: i32 },
}

/// Result type for corpus operations
pub type CorpusResult<T> = Result<T, CorpusError>;

/// One corpus line before date parsing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawDocument {
    pub company_name: String,
    pub date: String,
    pub text: String,
}

/// Inclusive range of publication years; open ends match everything
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    pub from: Option<i32>,
    pub to: Option<i32>,
}

impl YearRange {
    /// Create a range, rejecting `from > to`
    pub fn new(from: Option<i32>, to: Option<i32>) -> CorpusResult<Self> {
        if let (Some(from), Some(to)) = (from, to) {
            if from > to {
                return Err(CorpusError::InvalidYearRange { from, to });
            }
        }
        Ok(Self { from, to })
    }

    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        let year = date.year();
        self.from.map_or(true, |from| year >= from) && self.to.map_or(true, |to| year <= to)
    }

    #[must_use]
    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }
}

/// Parse a document date
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps, `YYYY-MM-DD HH:MM:SS` and
/// `YYYY-MM` (anchored to day 1).
#[must_use]
pub fn parse_document_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.date());
    }
    NaiveDate::parse_from_str(&format!("{value}-01"), "%Y-%m-%d").ok()
}

/// Read documents from any JSON Lines source
pub fn read_documents<R: BufRead>(reader: R, years: YearRange) -> CorpusResult<Vec<Document>> {
    let mut documents = Vec::new();
    let mut skipped = 0usize;

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.map_err(|source| CorpusError::Read {
            path: PathBuf::from("<reader>"),
            source,
        })?;
        if line.trim().is_empty() {
            continue;
        }

        let raw: RawDocument = serde_json::from_str(&line)
            .map_err(|source| CorpusError::MalformedLine {
                line: line_no,
                source,
            })?;

        let Some(date) = parse_document_date(&raw.date) else {
            tracing::warn!(line = line_no, date = %raw.date, "Skipping document with unparseable date");
            skipped += 1;
            continue;
        };

        if !years.contains(date) {
            continue;
        }

        documents.push(Document::new(raw.company_name, date, raw.text));
    }

    tracing::debug!(
        loaded = documents.len(),
        skipped = skipped,
        "Read corpus documents"
    );
    Ok(documents)
}

/// Load a JSON Lines corpus file
pub fn load_corpus(path: &Path, years: YearRange) -> CorpusResult<Vec<Document>> {
    let file = File::open(path).map_err(|source| CorpusError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let documents = read_documents(BufReader::new(file), years).map_err(|err| match err {
        CorpusError::Read { source, .. } => CorpusError::Read {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    })?;

    tracing::info!(
        path = %path.display(),
        documents = documents.len(),
        "Loaded corpus"
    );
    Ok(documents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_document_date_formats() {
        assert_eq!(parse_document_date("2023-04-05"), Some(date(2023, 4, 5)));
        assert_eq!(
            parse_document_date("2023-04-05T10:00:00+09:00"),
            Some(date(2023, 4, 5))
        );
        assert_eq!(
            parse_document_date("2023-04-05 23:59:59"),
            Some(date(2023, 4, 5))
        );
        assert_eq!(parse_document_date("2023-04"), Some(date(2023, 4, 1)));
        assert_eq!(parse_document_date("April 2023"), None);
    }

    #[test]
    fn test_read_skips_bad_dates_and_blank_lines() {
        let input = concat!(
            r#"{"company_name":"Acme","date":"2023-01-10","text":"scope 1"}"#,
            "\n\n",
            r#"{"company_name":"Acme","date":"someday","text":"scope 2"}"#,
            "\n"
        );
        let docs = read_documents(Cursor::new(input), YearRange::default()).unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].date, date(2023, 1, 10));
    }

    #[test]
    fn test_read_reports_malformed_line() {
        let input = concat!(
            r#"{"company_name":"Acme","date":"2023-01-10","text":"ok"}"#,
            "\n",
            "{not json}\n"
        );
        let err = read_documents(Cursor::new(input), YearRange::default()).unwrap_err();
        assert!(matches!(err, CorpusError::MalformedLine { line: 2, .. }));
    }

    #[test]
    fn test_year_range_filters() {
        let range = YearRange::new(Some(2022), Some(2023)).unwrap();
        assert!(range.contains(date(2022, 1, 1)));
        assert!(range.contains(date(2023, 12, 31)));
        assert!(!range.contains(date(2021, 12, 31)));
        assert!(!range.contains(date(2024, 1, 1)));
    }

    #[test]
    fn test_year_range_rejects_inverted() {
        assert!(matches!(
            YearRange::new(Some(2024), Some(2020)),
            Err(CorpusError::InvalidYearRange { from: 2024, to: 2020 })
        ));
    }
}
