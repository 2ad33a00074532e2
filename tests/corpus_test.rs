//! Corpus loading and end-to-end pipeline tests

mod common;

use common::{sample_documents, to_jsonl};
use corpus_trends::chart::figures;
use corpus_trends::extract::TermExtractor;
use corpus_trends::storage::{load_corpus, CorpusError, YearRange};
use std::io::Write;
use tempfile::NamedTempFile;

fn corpus_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(content.as_bytes()).expect("write corpus");
    file
}

#[test]
fn test_load_round_trips_documents() {
    let docs = sample_documents();
    let file = corpus_file(&to_jsonl(&docs));

    let loaded = load_corpus(file.path(), YearRange::default()).unwrap();
    assert_eq!(loaded, docs);
}

#[test]
fn test_load_applies_year_range() {
    let content = [
        r#"{"company_name":"Acme","date":"2021-06-01","text":"scope 1"}"#,
        r#"{"company_name":"Acme","date":"2022-06-01","text":"scope 1"}"#,
        r#"{"company_name":"Acme","date":"2023-06-01T08:00:00Z","text":"scope 1"}"#,
    ]
    .join("\n");
    let file = corpus_file(&content);

    let years = YearRange::new(Some(2022), None).unwrap();
    let loaded = load_corpus(file.path(), years).unwrap();
    assert_eq!(loaded.len(), 2);
}

#[test]
fn test_missing_file_is_read_error() {
    let err = load_corpus("does/not/exist.jsonl".as_ref(), YearRange::default()).unwrap_err();
    assert!(matches!(err, CorpusError::Read { ref path, .. } if path.ends_with("exist.jsonl")));
}

#[test]
fn test_unparseable_dates_are_excluded() {
    let content = [
        r#"{"company_name":"Acme","date":"Q1 2023","text":"scope 1"}"#,
        r#"{"company_name":"Acme","date":"2023-02-01","text":"scope 1"}"#,
    ]
    .join("\n");
    let file = corpus_file(&content);

    let loaded = load_corpus(file.path(), YearRange::default()).unwrap();
    assert_eq!(loaded.len(), 1);
}

#[test]
fn test_pipeline_produces_chart_json() {
    let file = corpus_file(&to_jsonl(&sample_documents()));
    let documents = load_corpus(file.path(), YearRange::default()).unwrap();

    let extractor = TermExtractor::parse("scope 1|scope 2,scope 3").unwrap();
    let batch = extractor.extract(&documents).unwrap();
    let figure = figures::terms_proportion(&batch, &extractor.column_names()).unwrap();

    assert_eq!(
        figure.chart.labels(),
        ["scope 1|scope 2_prop", "scope 3_prop"]
    );

    let json = serde_json::to_value(&figure).unwrap();
    assert_eq!(json["chart"]["x_field"], "year_month_dt");
    assert_eq!(json["chart"]["series"][0]["points"][0]["x"], "2023-01-01");
    assert_eq!(json["table"]["columns"][0], "year_month_dt");
}
