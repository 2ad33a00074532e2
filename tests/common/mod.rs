//! Common test utilities

use chrono::NaiveDate;
use corpus_trends::models::{Document, MonthBucket, Record, RecordBatch};

/// Term column used by the single-term fixtures
#[allow(dead_code)]
pub const SCOPE1: &str = "scope1_count";

#[allow(dead_code)]
pub fn month(year: i32, month: u32) -> MonthBucket {
    MonthBucket::new(year, month).expect("valid month")
}

/// Single-term batch from `(month, company, word_count, scope1_count)` rows
#[allow(dead_code)]
pub fn scope1_batch(rows: &[(MonthBucket, &str, u64, u64)]) -> RecordBatch {
    let records = rows
        .iter()
        .map(|&(m, company, words, count)| Record::new(m, company, words, vec![count]))
        .collect();
    RecordBatch::from_records(vec![SCOPE1.to_string()], records).expect("consistent arity")
}

/// Small disclosure corpus spanning two companies and three months
#[allow(dead_code)]
pub fn sample_documents() -> Vec<Document> {
    let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).expect("valid date");
    vec![
        Document::new(
            "Acme",
            date(2023, 1, 5),
            "Scope 1 emissions fell while scope 2 emissions rose",
        ),
        Document::new("Acme", date(2023, 1, 20), "No emissions data reported"),
        Document::new(
            "Globex",
            date(2023, 1, 11),
            "Scope 3 covers the supply chain and scope 3 dominates",
        ),
        Document::new("Globex", date(2023, 2, 2), "Scope 1 targets scope 1 sites"),
        Document::new("Acme", date(2023, 3, 30), "SCOPE 2 market based accounting"),
    ]
}

/// JSON Lines rendering of documents
#[allow(dead_code)]
pub fn to_jsonl(documents: &[Document]) -> String {
    documents
        .iter()
        .map(|d| {
            serde_json::json!({
                "company_name": d.company_name,
                "date": d.date.format("%Y-%m-%d").to_string(),
                "text": d.text,
            })
            .to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}
