//! Named figures: an aggregation, its chart, and the table behind it

use serde::Serialize;

use super::{build_line_chart, ChartSpec};
use crate::analytics::{aggregate_posts_by_time, aggregate_terms_proportion, aggregate_terms_raw};
use crate::error::Result;
use crate::models::{
    RecordBatch, Table, COUNT_COLUMN, ENTITY_COLUMN, MONTH_COLUMN, WORD_COUNT_COLUMN,
};

pub const POSTS_BY_DATE_TITLE: &str = "Posts by Date";
pub const POSTS_BY_COMPANY_TITLE: &str = "Posts by Company by Date";
pub const TERMS_RAW_TITLE: &str = "Terms by Date Raw Count";
pub const TERMS_PROPORTION_TITLE: &str = "Terms by Date Proportion of Words";

/// A rendered figure with the table it was drawn from
#[derive(Debug, Clone, Serialize)]
pub struct Figure {
    pub title: String,
    pub chart: ChartSpec,
    pub table: Table,
}

impl Figure {
    fn new(title: impl Into<String>, chart: ChartSpec, table: Table) -> Self {
        Self {
            title: title.into(),
            chart,
            table,
        }
    }

    /// Markdown block with the table and its shape
    #[must_use]
    pub fn table_markdown(&self) -> String {
        let (rows, cols) = self.table.shape();
        format!(
            "#### {} Table\n\n{}\nTable shape: ({rows}, {cols})\n",
            self.title,
            self.table.to_markdown()
        )
    }
}

/// Column names that follow `anchor` in the table header
///
/// Term columns never take a fixed name, so the anchor is unique.
fn columns_after(table: &Table, anchor: &str) -> Vec<String> {
    table
        .column_index(anchor)
        .map(|idx| table.columns()[idx + 1..].to_vec())
        .unwrap_or_default()
}

/// Record counts per month
pub fn posts_by_date(batch: &RecordBatch) -> Result<Figure> {
    let table = aggregate_posts_by_time(batch, false);
    let chart = build_line_chart(
        &table,
        MONTH_COLUMN,
        &[COUNT_COLUMN.to_string()],
        POSTS_BY_DATE_TITLE,
        None,
    )?;
    Ok(Figure::new(POSTS_BY_DATE_TITLE, chart, table))
}

/// Record counts per month, one line per company
pub fn posts_by_company_by_date(batch: &RecordBatch) -> Result<Figure> {
    let table = aggregate_posts_by_time(batch, true);
    let chart = build_line_chart(
        &table,
        MONTH_COLUMN,
        &[COUNT_COLUMN.to_string()],
        POSTS_BY_COMPANY_TITLE,
        Some(ENTITY_COLUMN),
    )?;
    Ok(Figure::new(POSTS_BY_COMPANY_TITLE, chart, table))
}

/// Raw monthly term counts, one line per term
pub fn terms_raw(batch: &RecordBatch, term_names: &[String]) -> Result<Figure> {
    let table = aggregate_terms_raw(batch, term_names)?;
    let chart = build_line_chart(
        &table,
        MONTH_COLUMN,
        &columns_after(&table, MONTH_COLUMN),
        TERMS_RAW_TITLE,
        None,
    )?;
    Ok(Figure::new(TERMS_RAW_TITLE, chart, table))
}

/// Monthly term proportions of all words, one line per term
pub fn terms_proportion(batch: &RecordBatch, term_names: &[String]) -> Result<Figure> {
    proportion_figure(batch, term_names, None, TERMS_PROPORTION_TITLE.to_string())
}

/// Monthly term proportions restricted to the selected companies
///
/// The title lists the selection, e.g.
/// `Terms by Date Proportion of Words (Acme, Globex)`.
pub fn terms_proportion_for_companies(
    batch: &RecordBatch,
    term_names: &[String],
    companies: &[String],
) -> Result<Figure> {
    let title = format!("{TERMS_PROPORTION_TITLE} ({})", companies.join(", "));
    proportion_figure(batch, term_names, Some(companies), title)
}

fn proportion_figure(
    batch: &RecordBatch,
    term_names: &[String],
    companies: Option<&[String]>,
    title: String,
) -> Result<Figure> {
    let table = aggregate_terms_proportion(batch, term_names, companies)?;
    let chart = build_line_chart(
        &table,
        MONTH_COLUMN,
        &columns_after(&table, WORD_COUNT_COLUMN),
        &title,
        None,
    )?;
    Ok(Figure::new(title, chart, table))
}
