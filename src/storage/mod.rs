//! Corpus storage
//!
//! Documents are read from JSON Lines files and handed to the extractor as
//! an immutable slice; nothing is cached between requests.

pub mod corpus;

pub use corpus::{
    load_corpus, parse_document_date, read_documents, CorpusError, CorpusResult, RawDocument,
    YearRange,
};
