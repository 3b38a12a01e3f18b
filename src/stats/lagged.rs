//! Lagged cross-series association engine
//!
//! Tests whether the prior quarter's economic conditions predict the
//! current quarter's public sentiment: economic quarter keys are shifted
//! forward by the lag offset, then inner-joined against the opinion
//! table's native keys, so the economic observation at q-1 pairs with the
//! opinion observation at q.
//!
//! This analysis is optional by data availability; its absence degrades
//! the result to an explicit marker, never a runtime failure.

use crate::align::AlignedTable;
use crate::stats::{correlation_pvalue, pearson};
use serde::{Deserialize, Serialize};

/// Minimum joined rows for a defined correlation p-value
const MIN_JOINED_ROWS: usize = 3;

/// Association between one lagged economic series and one opinion metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaggedPair {
    pub economic: String,
    pub opinion: String,
    pub correlation: f64,
    pub p_value: f64,
    pub n_observations: usize,
}

/// Result of the lagged opinion-economy analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LaggedAssociation {
    Available {
        lag_quarters: usize,
        n_observations: usize,
        correlations: Vec<LaggedPair>,
    },
    Unavailable {
        reason: String,
    },
}

impl LaggedAssociation {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        LaggedAssociation::Unavailable {
            reason: reason.into(),
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, LaggedAssociation::Available { .. })
    }

    /// Association for one (economic, opinion) pair, if available
    pub fn get(&self, economic: &str, opinion: &str) -> Option<&LaggedPair> {
        match self {
            LaggedAssociation::Available { correlations, .. } => correlations
                .iter()
                .find(|p| p.economic == economic && p.opinion == opinion),
            LaggedAssociation::Unavailable { .. } => None,
        }
    }
}

/// Correlate lagged economic series against current opinion metrics
///
/// Infallible by design: a join that is empty or below the minimum for a
/// defined p-value produces `Unavailable` and leaves the rest of the
/// pipeline untouched.
pub fn lagged_association(
    economic: &AlignedTable,
    opinion: &AlignedTable,
    lag_quarters: usize,
) -> LaggedAssociation {
    let joined = economic.shift_forward(lag_quarters).inner_join(opinion);

    let n = joined.n_rows();
    if n == 0 {
        return LaggedAssociation::unavailable(
            "no overlapping quarters between shifted economic data and opinion data",
        );
    }
    if n < MIN_JOINED_ROWS {
        return LaggedAssociation::unavailable(format!(
            "only {} joined observations; at least {} required",
            n, MIN_JOINED_ROWS
        ));
    }

    // The joined table holds the economic columns first, then the opinion
    // columns; address both by position so a shared name cannot alias an
    // economic column
    let mut correlations = Vec::new();
    for (i, econ_name) in economic.columns().iter().enumerate() {
        let econ_values = joined.column_at(i).expect("joined economic column");
        for (j, opinion_name) in opinion.columns().iter().enumerate() {
            let opinion_values = joined
                .column_at(economic.columns().len() + j)
                .expect("joined opinion column");
            let r = pearson(&econ_values, &opinion_values);
            correlations.push(LaggedPair {
                economic: econ_name.clone(),
                opinion: opinion_name.clone(),
                correlation: r,
                p_value: correlation_pvalue(r, n),
                n_observations: n,
            });
        }
    }

    LaggedAssociation::Available {
        lag_quarters,
        n_observations: n,
        correlations,
    }
}
