//! Pairwise correlation engine
//!
//! Computes the symmetric Pearson correlation matrix with two-sided
//! significance values over an aligned quarterly table. Each unordered
//! pair is computed once and mirrored into both cells.

use crate::align::AlignedTable;
use crate::error::{EconError, Result};
use crate::stats::{correlation_pvalue, pearson};
use serde::{Deserialize, Serialize};

/// Minimum aligned rows for a defined t-test (N-2 degrees of freedom > 0)
const MIN_OBSERVATIONS: usize = 3;

/// Symmetric correlation matrix with parallel p-values
///
/// `matrix[i][j]` is the correlation of `series[i]` with `series[j]`;
/// the diagonal is exactly 1 and both matrices are symmetric. A degenerate
/// pair (zero variance) carries NaN, which serializes as null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationResult {
    pub series: Vec<String>,
    pub matrix: Vec<Vec<f64>>,
    pub p_values: Vec<Vec<f64>>,
    pub n_observations: usize,
}

impl CorrelationResult {
    /// Correlation for a named pair, in either order
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.series.iter().position(|s| s.as_str() == a)?;
        let j = self.series.iter().position(|s| s.as_str() == b)?;
        Some(self.matrix[i][j])
    }

    /// P-value for a named pair, in either order
    pub fn p_value(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.series.iter().position(|s| s.as_str() == a)?;
        let j = self.series.iter().position(|s| s.as_str() == b)?;
        Some(self.p_values[i][j])
    }
}

/// Compute the pairwise correlation matrix over an aligned table
///
/// Requires at least two columns and three rows; fails with
/// `InsufficientData` otherwise.
pub fn correlation_matrix(table: &AlignedTable) -> Result<CorrelationResult> {
    let names = table.columns();
    if names.len() < 2 {
        return Err(EconError::InsufficientData {
            required: 2,
            actual: names.len(),
        });
    }

    let n = table.n_rows();
    if n < MIN_OBSERVATIONS {
        return Err(EconError::InsufficientData {
            required: MIN_OBSERVATIONS,
            actual: n,
        });
    }

    let columns: Vec<Vec<f64>> = names
        .iter()
        .map(|name| table.column(name).expect("column listed in table"))
        .collect();

    let p = names.len();
    let mut matrix = vec![vec![0.0; p]; p];
    let mut p_values = vec![vec![0.0; p]; p];

    for i in 0..p {
        matrix[i][i] = 1.0;
        for j in (i + 1)..p {
            let r = pearson(&columns[i], &columns[j]);
            let p_val = correlation_pvalue(r, n);
            matrix[i][j] = r;
            matrix[j][i] = r;
            p_values[i][j] = p_val;
            p_values[j][i] = p_val;
        }
    }

    Ok(CorrelationResult {
        series: names.to_vec(),
        matrix,
        p_values,
        n_observations: n,
    })
}
