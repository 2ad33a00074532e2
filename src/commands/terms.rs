use anyhow::{Context, Result};
use std::path::PathBuf;

use corpus_trends::chart::figures;
use corpus_trends::extract::TermExtractor;

use super::{emit, load_documents, CorpusParams};

pub struct TermsParams {
    pub corpus: CorpusParams,
    pub expression: String,
    pub raw: bool,
    pub companies: Vec<String>,
    pub output: Option<PathBuf>,
    pub show_table: bool,
}

pub fn terms(params: TermsParams) -> Result<()> {
    let extractor = TermExtractor::parse(&params.expression)
        .with_context(|| format!("Invalid term expression: {}", params.expression))?;

    let documents = load_documents(&params.corpus)?;
    let batch = extractor.extract(&documents)?;
    let term_names = extractor.column_names();

    let mut result = Vec::with_capacity(2);
    if params.raw {
        result.push(figures::terms_raw(&batch, &term_names)?);
    } else {
        result.push(figures::terms_proportion(&batch, &term_names)?);
    }

    if !params.companies.is_empty() {
        let figure = figures::terms_proportion_for_companies(&batch, &term_names, &params.companies)
            .with_context(|| {
                format!(
                    "Failed to chart selected companies: {}",
                    params.companies.join(", ")
                )
            })?;
        result.push(figure);
    }

    emit(&result, params.output.as_deref(), params.show_table)
}
