//! Analysis orchestration
//!
//! Wires the engines together per the pipeline control flow: alignment
//! feeds correlation and causality, descriptive statistics run over the
//! raw series, and the optional opinion table feeds the lagged
//! association engine. Fatal preconditions raise before any partial
//! result store escapes; per-pair failures and missing optional input
//! appear as inline markers in an otherwise complete store.

use crate::align::{align, AlignedTable};
use crate::error::{EconError, Result};
use crate::results::ResultsStore;
use crate::series::SeriesStore;
use crate::stats::correlation::correlation_matrix;
use crate::stats::descriptive::describe;
use crate::stats::granger::granger_causality;
use crate::stats::lagged::{lagged_association, LaggedAssociation};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Analysis parameters, constructed once per run and never mutated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Maximum Granger causality lag
    pub max_lag: usize,
    /// Quarters the economic series are lagged against opinion data
    pub opinion_lag: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            max_lag: 4,
            opinion_lag: 1,
        }
    }
}

impl AnalysisConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_lag == 0 {
            return Err(EconError::InvalidParameter {
                name: "max_lag".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if self.opinion_lag == 0 {
            return Err(EconError::InvalidParameter {
                name: "opinion_lag".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// Run the full analysis over the store, with an optional opinion table
///
/// Returns a complete `ResultsStore` or the first fatal precondition
/// failure. Rerunning with identical inputs produces identical results.
pub fn analyze(
    store: &SeriesStore,
    opinion: Option<&AlignedTable>,
    config: &AnalysisConfig,
) -> Result<ResultsStore> {
    config.validate()?;

    for series in store.iter() {
        if series.is_empty() {
            return Err(EconError::EmptySeries {
                name: series.name().to_string(),
            });
        }
    }

    info!(series = store.len(), "aligning series onto quarterly index");
    let aligned = align(store);
    if aligned.is_empty() {
        return Err(EconError::AlignmentEmpty);
    }
    debug!(rows = aligned.n_rows(), "alignment complete");

    info!("computing correlation matrix");
    let correlations = correlation_matrix(&aligned)?;

    info!(max_lag = config.max_lag, "running Granger causality tests");
    let granger = granger_causality(&aligned, config.max_lag)?;

    info!("computing descriptive statistics");
    let descriptive = store.iter().map(describe).collect::<Result<Vec<_>>>()?;

    let opinion_economy = match opinion {
        Some(table) => {
            info!(lag = config.opinion_lag, "running lagged opinion analysis");
            lagged_association(&aligned, table, config.opinion_lag)
        }
        None => {
            info!("opinion data not supplied, skipping lagged analysis");
            LaggedAssociation::unavailable("opinion data not supplied")
        }
    };

    Ok(ResultsStore {
        correlations,
        granger_causality: granger,
        descriptive_stats: descriptive,
        opinion_economy,
    })
}
