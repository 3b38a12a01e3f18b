//! # econostat
//!
//! Significance-aware econometric analysis over a small set of aligned
//! quarterly macroeconomic time series.
//!
//! ## What it computes
//!
//! - **Correlation** - symmetric Pearson matrix with two-sided p-values
//! - **Granger causality** - ordered-pair F-tests across multiple lags
//! - **Descriptive statistics** - full-history moments per raw series
//! - **Lagged association** - prior-quarter economic indicators against
//!   current-quarter opinion metrics (optional by data availability)
//!
//! Results aggregate into a single [`results::ResultsStore`] artifact and
//! render into captioned, significance-annotated text tables.
//!
//! ## Example
//!
//! ```rust
//! use econostat::prelude::*;
//! use chrono::NaiveDate;
//!
//! let mut store = SeriesStore::new();
//! for (name, values) in [("gdp", [100.0, 102.0, 101.0, 104.0, 106.0, 105.0]),
//!                        ("unemployment", [5.0, 4.8, 5.1, 4.5, 4.2, 4.4])] {
//!     let pairs = values
//!         .iter()
//!         .enumerate()
//!         .map(|(i, &v)| {
//!             let date = NaiveDate::from_ymd_opt(2020 + (i / 4) as i32, (i % 4) as u32 * 3 + 1, 1).unwrap();
//!             (date, v)
//!         })
//!         .collect();
//!     store.insert(Series::from_pairs(name, pairs).unwrap()).unwrap();
//! }
//!
//! let config = AnalysisConfig { max_lag: 1, ..AnalysisConfig::default() };
//! let results = analyze(&store, None, &config).unwrap();
//! assert_eq!(results.correlations.n_observations, 6);
//! ```

pub mod align;
pub mod analysis;
mod error;
pub mod io;
pub mod render;
pub mod results;
pub mod series;
pub mod stats;

pub use error::{EconError, Result};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::align::{align, AlignedTable};
    pub use crate::analysis::{analyze, AnalysisConfig};
    pub use crate::error::{EconError, Result};
    pub use crate::render::{
        correlation_table, descriptive_table, granger_table, lagged_table, stars, Table,
    };
    pub use crate::results::ResultsStore;
    pub use crate::series::{Observation, QuarterKey, Series, SeriesStore};
    pub use crate::stats::correlation::{correlation_matrix, CorrelationResult};
    pub use crate::stats::descriptive::{describe, SeriesSummary};
    pub use crate::stats::granger::{granger_causality, CausalityResult, LagOutcome};
    pub use crate::stats::lagged::{lagged_association, LaggedAssociation, LaggedPair};
}
