//! Granger causality engine
//!
//! For every ordered pair (cause, effect) and each lag up to `max_lag`,
//! fits two nested autoregressive OLS models of the effect series (one on
//! its own lagged history, one adding the cause's lagged history) and
//! reports the F-test comparing their residual sums of squares. Direction
//! matters: (A, B) and (B, A) are independent tests.
//!
//! A failure for one pair at one lag is recorded inline and never aborts
//! the sibling tests.

use crate::align::AlignedTable;
use crate::error::{EconError, Result};
use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, FisherSnedecor};

/// Relative singular-value cutoff for declaring a design matrix singular
const RANK_TOLERANCE: f64 = 1e-12;

/// Outcome of one Granger test at one lag
///
/// Failure subkinds are distinguished so a caller can tell a too-short
/// sample from a degenerate regression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LagOutcome {
    Ok {
        lag: usize,
        f_statistic: f64,
        p_value: f64,
        df_num: usize,
        df_denom: usize,
    },
    InsufficientObservations {
        lag: usize,
        required: usize,
        actual: usize,
    },
    Numerical {
        lag: usize,
        reason: String,
    },
}

impl LagOutcome {
    pub fn lag(&self) -> usize {
        match self {
            LagOutcome::Ok { lag, .. }
            | LagOutcome::InsufficientObservations { lag, .. }
            | LagOutcome::Numerical { lag, .. } => *lag,
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, LagOutcome::Ok { .. })
    }
}

/// All lag outcomes for one ordered (cause, effect) pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairCausality {
    pub cause: String,
    pub effect: String,
    pub lags: Vec<LagOutcome>,
}

/// Granger causality results for every ordered pair of series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CausalityResult {
    pub max_lag: usize,
    pub tests: Vec<PairCausality>,
}

impl CausalityResult {
    /// Outcomes for one directed pair
    pub fn get(&self, cause: &str, effect: &str) -> Option<&PairCausality> {
        self.tests
            .iter()
            .find(|t| t.cause == cause && t.effect == effect)
    }
}

/// Run Granger causality tests over every ordered pair in the table
///
/// Requires `max_lag >= 1`, at least two columns, and more rows than
/// `max_lag + 1` overall; lags that remain individually infeasible are
/// reported per pair as `InsufficientObservations`.
pub fn granger_causality(table: &AlignedTable, max_lag: usize) -> Result<CausalityResult> {
    if max_lag == 0 {
        return Err(EconError::InvalidParameter {
            name: "max_lag".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    let names = table.columns();
    if names.len() < 2 {
        return Err(EconError::InsufficientData {
            required: 2,
            actual: names.len(),
        });
    }

    let n = table.n_rows();
    if n < max_lag + 2 {
        return Err(EconError::InsufficientData {
            required: max_lag + 2,
            actual: n,
        });
    }

    let columns: Vec<(String, Vec<f64>)> = names
        .iter()
        .map(|name| {
            let values = table.column(name).expect("column listed in table");
            (name.clone(), values)
        })
        .collect();

    let mut tests = Vec::new();
    for (cause_name, cause) in &columns {
        for (effect_name, effect) in &columns {
            if cause_name == effect_name {
                continue;
            }
            let lags = (1..=max_lag)
                .map(|lag| test_at_lag(effect, cause, lag))
                .collect();
            tests.push(PairCausality {
                cause: cause_name.clone(),
                effect: effect_name.clone(),
                lags,
            });
        }
    }

    Ok(CausalityResult { max_lag, tests })
}

/// One F-test of whether `cause` Granger-causes `effect` at a single lag
fn test_at_lag(effect: &[f64], cause: &[f64], lag: usize) -> LagOutcome {
    let n = effect.len();
    // Smallest N leaving at least one denominator degree of freedom:
    // nobs - 2*lag - 1 >= 1 with nobs = N - lag.
    let required = 3 * lag + 2;
    if n < required {
        return LagOutcome::InsufficientObservations {
            lag,
            required,
            actual: n,
        };
    }

    let nobs = n - lag;
    let df_num = lag;
    let df_denom = nobs - 2 * lag - 1;

    let y = DVector::from_iterator(nobs, effect[lag..].iter().copied());

    // Restricted model: intercept + own lags
    let restricted = design_matrix(effect, None, lag);
    // Unrestricted model: intercept + own lags + cause lags
    let unrestricted = design_matrix(effect, Some(cause), lag);

    let ssr_restricted = match ols_ssr(restricted, &y) {
        Ok(ssr) => ssr,
        Err(reason) => return LagOutcome::Numerical { lag, reason },
    };
    let ssr_unrestricted = match ols_ssr(unrestricted, &y) {
        Ok(ssr) => ssr,
        Err(reason) => return LagOutcome::Numerical { lag, reason },
    };

    if ssr_unrestricted < 1e-10 {
        return LagOutcome::Numerical {
            lag,
            reason: "zero residual variance in unrestricted model".to_string(),
        };
    }

    let f_statistic = ((ssr_restricted - ssr_unrestricted) / df_num as f64)
        / (ssr_unrestricted / df_denom as f64);
    // Nested models guarantee a non-negative statistic up to rounding
    let f_statistic = f_statistic.max(0.0);

    let dist = match FisherSnedecor::new(df_num as f64, df_denom as f64) {
        Ok(d) => d,
        Err(e) => {
            return LagOutcome::Numerical {
                lag,
                reason: format!("F distribution: {}", e),
            }
        }
    };
    let p_value = 1.0 - dist.cdf(f_statistic);

    LagOutcome::Ok {
        lag,
        f_statistic,
        p_value,
        df_num,
        df_denom,
    }
}

/// Build the lagged design matrix for rows t = lag..n
///
/// Columns: intercept, effect[t-1..t-lag], then (if present)
/// cause[t-1..t-lag].
fn design_matrix(effect: &[f64], cause: Option<&[f64]>, lag: usize) -> DMatrix<f64> {
    let nobs = effect.len() - lag;
    let k = 1 + lag + if cause.is_some() { lag } else { 0 };

    let mut data = Vec::with_capacity(nobs * k);
    for t in lag..effect.len() {
        data.push(1.0);
        for j in 1..=lag {
            data.push(effect[t - j]);
        }
        if let Some(cause) = cause {
            for j in 1..=lag {
                data.push(cause[t - j]);
            }
        }
    }

    DMatrix::from_row_slice(nobs, k, &data)
}

/// Least-squares fit returning the sum of squared residuals
///
/// Rejects rank-deficient design matrices instead of silently using a
/// pseudo-inverse solution.
fn ols_ssr(x: DMatrix<f64>, y: &DVector<f64>) -> std::result::Result<f64, String> {
    let svd = x.clone().svd(true, true);
    let max_sv = svd.singular_values.max();
    let min_sv = svd.singular_values.min();
    if !max_sv.is_finite() || max_sv <= 0.0 || min_sv / max_sv < RANK_TOLERANCE {
        return Err("singular design matrix".to_string());
    }

    let beta = svd.solve(y, RANK_TOLERANCE).map_err(str::to_string)?;
    let residuals = y - &x * beta;
    Ok(residuals.norm_squared())
}
