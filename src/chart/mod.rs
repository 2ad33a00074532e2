//! Line chart specifications built from aggregated tables
//!
//! The chart builder performs no aggregation: it reads an already-grouped
//! [`Table`] and describes the lines a renderer should draw.

pub mod figures;

use serde::Serialize;
use thiserror::Error;

use crate::models::{Table, Value};

pub use figures::Figure;

/// Errors that can occur while building a chart
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("Field not found in table: {0}")]
    UnknownField(String),

    #[error("Field {field} has a non-numeric value in row {row}")]
    NonNumericField { field: String, row: usize },

    #[error("A series field needs exactly one y field, got {0}")]
    SeriesRequiresSingleY(usize),
}

/// Result type for chart operations
pub type ChartResult<T> = Result<T, ChartError>;

/// One point on a line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub x: Value,

    /// `NaN` for undefined proportions, serialized as `null`
    pub y: f64,
}

/// One line of a chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    /// Legend label
    pub label: String,

    pub points: Vec<ChartPoint>,
}

/// Declarative line chart description for a renderer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub title: String,
    pub x_field: String,
    pub series: Vec<Series>,
}

impl ChartSpec {
    /// Total number of points over all series
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).sum()
    }

    #[must_use]
    pub fn labels(&self) -> Vec<&str> {
        self.series.iter().map(|s| s.label.as_str()).collect()
    }
}

fn field_index(table: &Table, field: &str) -> ChartResult<usize> {
    table
        .column_index(field)
        .ok_or_else(|| ChartError::UnknownField(field.to_string()))
}

fn numeric(value: &Value, field: &str, row: usize) -> ChartResult<f64> {
    value.as_f64().ok_or_else(|| ChartError::NonNumericField {
        field: field.to_string(),
        row,
    })
}

/// Build a line chart from an aggregated table
///
/// Without `series_field` there is one line per entry of `y_fields`, labelled
/// with the column name. With `series_field` there is one line per distinct
/// value of that column, in order of first appearance, each plotting the
/// single y field.
///
/// # Errors
/// - [`ChartError::UnknownField`] if a named field is not a column
/// - [`ChartError::NonNumericField`] if a y cell is not a number
/// - [`ChartError::SeriesRequiresSingleY`] if `series_field` is given with
///   other than one y field
pub fn build_line_chart(
    table: &Table,
    x_field: &str,
    y_fields: &[String],
    title: &str,
    series_field: Option<&str>,
) -> ChartResult<ChartSpec> {
    let x_idx = field_index(table, x_field)?;

    let series = match series_field {
        None => {
            let mut series = Vec::with_capacity(y_fields.len());
            for y_field in y_fields {
                let y_idx = field_index(table, y_field)?;
                let points = table
                    .rows()
                    .iter()
                    .enumerate()
                    .map(|(i, row)| -> ChartResult<ChartPoint> {
                        Ok(ChartPoint {
                            x: row[x_idx].clone(),
                            y: numeric(&row[y_idx], y_field, i)?,
                        })
                    })
                    .collect::<ChartResult<Vec<_>>>()?;
                series.push(Series {
                    label: y_field.clone(),
                    points,
                });
            }
            series
        }
        Some(series_field) => {
            let [y_field] = y_fields else {
                return Err(ChartError::SeriesRequiresSingleY(y_fields.len()));
            };
            let s_idx = field_index(table, series_field)?;
            let y_idx = field_index(table, y_field)?;

            let mut series: Vec<Series> = Vec::new();
            for (i, row) in table.rows().iter().enumerate() {
                let label = row[s_idx].to_string();
                let point = ChartPoint {
                    x: row[x_idx].clone(),
                    y: numeric(&row[y_idx], y_field, i)?,
                };
                match series.iter_mut().find(|s| s.label == label) {
                    Some(existing) => existing.points.push(point),
                    None => series.push(Series {
                        label,
                        points: vec![point],
                    }),
                }
            }
            series
        }
    };

    tracing::debug!(
        title = %title,
        x_field = %x_field,
        series = series.len(),
        "Built line chart"
    );

    Ok(ChartSpec {
        title: title.to_string(),
        x_field: x_field.to_string(),
        series,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MonthBucket;

    fn sample_table() -> Table {
        let mut table = Table::new(vec![
            "year_month_dt".to_string(),
            "company_name".to_string(),
            "count".to_string(),
        ]);
        for (m, company, count) in [(1, "A", 3), (2, "A", 4), (1, "B", 1)] {
            table.push_row(vec![
                Value::Month(MonthBucket::new(2023, m).unwrap()),
                Value::Text(company.to_string()),
                Value::Int(count),
            ]);
        }
        table
    }

    #[test]
    fn test_one_series_per_y_field() {
        let table = sample_table();
        let chart = build_line_chart(
            &table,
            "year_month_dt",
            &["count".to_string()],
            "Posts",
            None,
        )
        .unwrap();

        assert_eq!(chart.labels(), ["count"]);
        assert_eq!(chart.point_count(), 3);
    }

    #[test]
    fn test_series_field_splits_lines() {
        let table = sample_table();
        let chart = build_line_chart(
            &table,
            "year_month_dt",
            &["count".to_string()],
            "Posts",
            Some("company_name"),
        )
        .unwrap();

        assert_eq!(chart.labels(), ["A", "B"]);
        assert_eq!(chart.series[0].points.len(), 2);
        assert_eq!(chart.series[1].points[0].y, 1.0);
    }

    #[test]
    fn test_unknown_field() {
        let table = sample_table();
        let err = build_line_chart(&table, "month", &["count".to_string()], "t", None)
            .unwrap_err();
        assert!(matches!(err, ChartError::UnknownField(f) if f == "month"));
    }

    #[test]
    fn test_non_numeric_y() {
        let table = sample_table();
        let err = build_line_chart(
            &table,
            "year_month_dt",
            &["company_name".to_string()],
            "t",
            None,
        )
        .unwrap_err();
        assert!(matches!(err, ChartError::NonNumericField { row: 0, .. }));
    }

    #[test]
    fn test_series_field_needs_single_y() {
        let table = sample_table();
        let err = build_line_chart(&table, "year_month_dt", &[], "t", Some("company_name"))
            .unwrap_err();
        assert!(matches!(err, ChartError::SeriesRequiresSingleY(0)));
    }

    #[test]
    fn test_nan_serializes_as_null() {
        let chart = ChartSpec {
            title: "t".to_string(),
            x_field: "x".to_string(),
            series: vec![Series {
                label: "a".to_string(),
                points: vec![ChartPoint {
                    x: Value::Int(1),
                    y: f64::NAN,
                }],
            }],
        };
        let json = serde_json::to_string(&chart).unwrap();
        assert!(json.contains(r#""y":null"#));
    }
}
