use anyhow::Result;
use std::path::PathBuf;

use corpus_trends::chart::figures;
use corpus_trends::extract::TermExtractor;

use super::{emit, load_documents, CorpusParams};

pub struct PostsParams {
    pub corpus: CorpusParams,
    pub by_company: bool,
    pub output: Option<PathBuf>,
    pub show_table: bool,
}

pub fn posts(params: PostsParams) -> Result<()> {
    let documents = load_documents(&params.corpus)?;
    let batch = TermExtractor::empty().extract(&documents)?;

    let figure = if params.by_company {
        figures::posts_by_company_by_date(&batch)?
    } else {
        figures::posts_by_date(&batch)?
    };

    emit(&[figure], params.output.as_deref(), params.show_table)
}
