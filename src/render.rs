//! Tabular rendering of engine results
//!
//! One generic, markup-agnostic `Table` value built declaratively per
//! result family, replacing bespoke string assembly per table type. The
//! contract is the content and ordering of cells, captions, and
//! footnotes; the presentation markup (LaTeX or otherwise) is an external
//! concern.

use crate::stats::correlation::CorrelationResult;
use crate::stats::descriptive::SeriesSummary;
use crate::stats::granger::{CausalityResult, LagOutcome};
use crate::stats::lagged::LaggedAssociation;
use serde::{Deserialize, Serialize};

/// Placeholder for missing or failed cells
pub const MISSING: &str = "—";

/// Significance stars for a p-value at the fixed 0.01/0.05/0.10 thresholds
///
/// Every consumer of p-values goes through this one function; a
/// non-finite p-value earns no mark.
pub fn stars(p_value: f64) -> &'static str {
    if !p_value.is_finite() {
        ""
    } else if p_value < 0.01 {
        "***"
    } else if p_value < 0.05 {
        "**"
    } else if p_value < 0.10 {
        "*"
    } else {
        ""
    }
}

/// A captioned table with a fixed column layout and footnotes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub caption: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub notes: Vec<String>,
}

impl Table {
    pub fn builder(caption: impl Into<String>) -> TableBuilder {
        TableBuilder {
            caption: caption.into(),
            headers: Vec::new(),
            rows: Vec::new(),
            notes: Vec::new(),
        }
    }

    /// Render as fixed-layout, line-oriented text
    ///
    /// Column widths are computed from content; the first column is
    /// left-aligned, all others right-aligned.
    pub fn render(&self) -> String {
        let n_columns = self.headers.len();
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }

        let format_row = |cells: &[String]| -> String {
            let mut parts = Vec::with_capacity(n_columns);
            for (i, cell) in cells.iter().enumerate() {
                let pad = widths[i] - cell.chars().count();
                if i == 0 {
                    parts.push(format!("{}{}", cell, " ".repeat(pad)));
                } else {
                    parts.push(format!("{}{}", " ".repeat(pad), cell));
                }
            }
            parts.join("  ").trim_end().to_string()
        };

        let table_width = widths.iter().sum::<usize>() + 2 * (n_columns.saturating_sub(1));
        let mut lines = Vec::new();
        lines.push(self.caption.clone());
        lines.push("=".repeat(table_width));
        lines.push(format_row(&self.headers));
        lines.push("-".repeat(table_width));
        for row in &self.rows {
            lines.push(format_row(row));
        }
        lines.push("-".repeat(table_width));
        for note in &self.notes {
            lines.push(format!("Note: {}", note));
        }
        lines.join("\n")
    }
}

/// Incremental construction of a `Table`
pub struct TableBuilder {
    caption: String,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    notes: Vec<String>,
}

impl TableBuilder {
    pub fn headers<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.headers = headers.into_iter().map(Into::into).collect();
        self
    }

    pub fn row<I, S>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
        self
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn build(self) -> Table {
        Table {
            caption: self.caption,
            headers: self.headers,
            rows: self.rows,
            notes: self.notes,
        }
    }
}

const STAR_LEGEND: &str = "Significance levels: *** p<0.01, ** p<0.05, * p<0.10.";

/// Format a statistic with significance stars, or the missing marker
fn starred(value: f64, p_value: f64, precision: usize) -> String {
    if !value.is_finite() {
        return MISSING.to_string();
    }
    format!("{:.*}{}", precision, value, stars(p_value))
}

/// Correlation matrix table: upper triangle plus diagonal, lower blank
pub fn correlation_table(result: &CorrelationResult) -> Table {
    let mut headers = vec![String::new()];
    headers.extend(result.series.iter().cloned());

    let mut builder = Table::builder("Correlation Matrix of Economic Indicators").headers(headers);
    for (i, name) in result.series.iter().enumerate() {
        let mut row = vec![name.clone()];
        for j in 0..result.series.len() {
            let cell = if i == j {
                "1.000".to_string()
            } else if i < j {
                starred(result.matrix[i][j], result.p_values[i][j], 3)
            } else {
                String::new()
            };
            row.push(cell);
        }
        builder = builder.row(row);
    }

    builder
        .note(format!(
            "Based on {} quarterly observations. Pearson correlations with two-sided t-tests.",
            result.n_observations
        ))
        .note(STAR_LEGEND)
        .build()
}

/// Granger causality table: one row per ordered pair, one column per lag
pub fn granger_table(result: &CausalityResult) -> Table {
    let mut headers = vec!["Cause".to_string(), "Effect".to_string()];
    headers.extend((1..=result.max_lag).map(|lag| format!("Lag {}", lag)));

    let mut builder = Table::builder("Granger Causality Test Results").headers(headers);
    for pair in &result.tests {
        let mut row = vec![pair.cause.clone(), pair.effect.clone()];
        for outcome in &pair.lags {
            let cell = match outcome {
                LagOutcome::Ok {
                    f_statistic,
                    p_value,
                    ..
                } => starred(*f_statistic, *p_value, 2),
                _ => MISSING.to_string(),
            };
            row.push(cell);
        }
        builder = builder.row(row);
    }

    builder
        .note("F-statistics from Granger causality tests. H0: Cause does not Granger-cause Effect.")
        .note(STAR_LEGEND)
        .build()
}

/// Descriptive statistics table, one row per series
pub fn descriptive_table(summaries: &[SeriesSummary]) -> Table {
    let mut builder = Table::builder("Descriptive Statistics")
        .headers(["Variable", "N", "Mean", "Std Dev", "Min", "Median", "Max"]);

    for summary in summaries {
        builder = builder.row([
            summary.name.clone(),
            summary.count.to_string(),
            format!("{:.2}", summary.mean),
            summary
                .std
                .map(|s| format!("{:.2}", s))
                .unwrap_or_else(|| MISSING.to_string()),
            format!("{:.2}", summary.min),
            format!("{:.2}", summary.median),
            format!("{:.2}", summary.max),
        ]);
    }

    builder
        .note("Descriptive statistics over each full raw series (sample standard deviation).")
        .build()
}

/// Lagged opinion-economy table: economic rows, opinion metric columns
///
/// An unavailable result renders as a captioned table with no data rows
/// and the reason in the footnote.
pub fn lagged_table(result: &LaggedAssociation) -> Table {
    let caption = "Prior Quarter Economic Indicators and Public Opinion";
    match result {
        LaggedAssociation::Unavailable { reason } => Table::builder(caption)
            .headers(["Economic Indicator (t-1)"])
            .note(format!("Analysis unavailable: {}.", reason))
            .build(),
        LaggedAssociation::Available {
            lag_quarters,
            n_observations,
            correlations,
        } => {
            // Preserve first-seen ordering of both axes
            let mut economic: Vec<&str> = Vec::new();
            let mut opinion: Vec<&str> = Vec::new();
            for pair in correlations {
                if !economic.contains(&pair.economic.as_str()) {
                    economic.push(&pair.economic);
                }
                if !opinion.contains(&pair.opinion.as_str()) {
                    opinion.push(&pair.opinion);
                }
            }

            let mut headers = vec!["Economic Indicator (t-1)".to_string()];
            headers.extend(opinion.iter().map(|s| s.to_string()));

            let mut builder = Table::builder(caption).headers(headers);
            for econ in &economic {
                let mut row = vec![econ.to_string()];
                for metric in &opinion {
                    let cell = result
                        .get(econ, metric)
                        .map(|pair| starred(pair.correlation, pair.p_value, 3))
                        .unwrap_or_else(|| MISSING.to_string());
                    row.push(cell);
                }
                builder = builder.row(row);
            }

            builder
                .note(format!(
                    "Based on {} quarterly observations. Economic indicators lagged by {} quarter(s) relative to opinion data.",
                    n_observations, lag_quarters
                ))
                .note(STAR_LEGEND)
                .build()
        }
    }
}
