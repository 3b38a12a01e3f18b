//! Significance-aware statistics engines
//!
//! Shared scalar helpers plus the four engines: pairwise correlation,
//! Granger causality, descriptive moments, and lagged cross-series
//! association.

pub mod correlation;
pub mod descriptive;
pub mod granger;
pub mod lagged;

use statrs::distribution::{ContinuousCDF, StudentsT};

/// Arithmetic mean
pub(crate) fn mean(data: &[f64]) -> f64 {
    data.iter().sum::<f64>() / data.len() as f64
}

/// Pearson correlation coefficient; NaN when either input is degenerate
pub(crate) fn pearson(x: &[f64], y: &[f64]) -> f64 {
    if x.len() != y.len() || x.len() < 2 {
        return f64::NAN;
    }

    let mx = mean(x);
    let my = mean(y);

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (&xi, &yi) in x.iter().zip(y.iter()) {
        cov += (xi - mx) * (yi - my);
        var_x += (xi - mx).powi(2);
        var_y += (yi - my).powi(2);
    }

    let denom = (var_x * var_y).sqrt();
    if denom < 1e-12 {
        return f64::NAN;
    }
    cov / denom
}

/// Two-sided p-value of a t-statistic under Student-t with `df` degrees
/// of freedom
pub(crate) fn two_sided_t_pvalue(t: f64, df: f64) -> f64 {
    let dist = match StudentsT::new(0.0, 1.0, df) {
        Ok(d) => d,
        Err(_) => return f64::NAN,
    };
    2.0 * (1.0 - dist.cdf(t.abs()))
}

/// Two-sided significance of a Pearson correlation over `n` observations
///
/// Uses t = r * sqrt(n-2) / sqrt(1 - r^2) with n-2 degrees of freedom.
/// A perfect correlation is defined as p = 0 rather than computed, which
/// sidesteps the division by zero.
pub(crate) fn correlation_pvalue(r: f64, n: usize) -> f64 {
    if !r.is_finite() || n < 3 {
        return f64::NAN;
    }
    if r.abs() >= 1.0 {
        return 0.0;
    }
    let df = (n - 2) as f64;
    let t = r * df.sqrt() / (1.0 - r * r).sqrt();
    two_sided_t_pvalue(t, df)
}
