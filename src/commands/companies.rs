use anyhow::Result;

use corpus_trends::analytics::distinct_entities;
use corpus_trends::extract::TermExtractor;

use super::{load_documents, CorpusParams};

pub fn companies(params: &CorpusParams) -> Result<()> {
    let documents = load_documents(params)?;
    let batch = TermExtractor::empty().extract(&documents)?;

    let names = distinct_entities(&batch);
    if names.is_empty() {
        println!("No companies found in {}", params.input.display());
        return Ok(());
    }

    println!("Companies ({}):", names.len());
    for name in names {
        println!("  {name}");
    }
    Ok(())
}
