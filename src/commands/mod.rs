pub mod companies;
pub mod posts;
pub mod terms;

use anyhow::{Context, Result};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use corpus_trends::chart::Figure;
use corpus_trends::models::Document;
use corpus_trends::storage::{load_corpus, YearRange};

// Re-export command functions for convenience
pub use companies::companies;
pub use posts::{posts, PostsParams};
pub use terms::{terms, TermsParams};

/// Corpus file and year filter resolved from flags and config
pub struct CorpusParams {
    pub input: PathBuf,
    pub years: YearRange,
}

pub(crate) fn load_documents(params: &CorpusParams) -> Result<Vec<Document>> {
    let documents = load_corpus(&params.input, params.years)
        .with_context(|| format!("Failed to load corpus: {}", params.input.display()))?;

    if documents.is_empty() {
        tracing::warn!(
            input = %params.input.display(),
            years = ?params.years,
            "No documents matched; charts will be empty"
        );
    }
    Ok(documents)
}

/// Print tables if requested, then write figures as JSON
///
/// Tables go to stderr so stdout carries nothing but the JSON document.
pub(crate) fn emit(figures: &[Figure], output: Option<&Path>, show_table: bool) -> Result<()> {
    let stdout = io::stdout();
    let stderr = io::stderr();
    write_figures(
        figures,
        output,
        show_table,
        &mut stdout.lock(),
        &mut stderr.lock(),
    )?;

    for figure in figures {
        tracing::info!(
            title = %figure.title,
            series = figure.chart.series.len(),
            rows = figure.table.len(),
            "Figure ready"
        );
    }
    Ok(())
}

fn write_figures(
    figures: &[Figure],
    output: Option<&Path>,
    show_table: bool,
    out: &mut impl Write,
    tables: &mut impl Write,
) -> Result<()> {
    if show_table {
        for figure in figures {
            writeln!(tables, "{}", figure.table_markdown())?;
        }
    }

    let json = serde_json::to_string_pretty(figures).context("Failed to serialize figures")?;
    match output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("Failed to write output file: {}", path.display()))?;
            writeln!(
                tables,
                "Wrote {} figure(s) to {}",
                figures.len(),
                path.display()
            )?;
        }
        None => writeln!(out, "{json}")?,
    }
    Ok(())
}
