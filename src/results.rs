//! Aggregated analysis results
//!
//! `ResultsStore` is the single artifact handed downstream: four fixed
//! sections, written once by the orchestrator and read-only thereafter.
//! Serialization is JSON-compatible throughout; undefined statistics
//! appear as null and partial failures as tagged inline markers.

use crate::stats::correlation::CorrelationResult;
use crate::stats::descriptive::SeriesSummary;
use crate::stats::granger::CausalityResult;
use crate::stats::lagged::LaggedAssociation;
use serde::{Deserialize, Serialize};

/// The structured aggregate of all engine outputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultsStore {
    pub correlations: CorrelationResult,
    pub granger_causality: CausalityResult,
    pub descriptive_stats: Vec<SeriesSummary>,
    pub opinion_economy: LaggedAssociation,
}

impl ResultsStore {
    /// Serialize the full artifact as pretty-printed JSON
    pub fn to_json(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::granger::{LagOutcome, PairCausality};

    fn sample_store() -> ResultsStore {
        ResultsStore {
            correlations: CorrelationResult {
                series: vec!["a".to_string(), "b".to_string()],
                matrix: vec![vec![1.0, 0.5], vec![0.5, 1.0]],
                p_values: vec![vec![0.0, 0.04], vec![0.04, 0.0]],
                n_observations: 10,
            },
            granger_causality: CausalityResult {
                max_lag: 1,
                tests: vec![PairCausality {
                    cause: "a".to_string(),
                    effect: "b".to_string(),
                    lags: vec![LagOutcome::Numerical {
                        lag: 1,
                        reason: "singular design matrix".to_string(),
                    }],
                }],
            },
            descriptive_stats: vec![SeriesSummary {
                name: "a".to_string(),
                count: 1,
                mean: 1.0,
                std: None,
                min: 1.0,
                q25: 1.0,
                median: 1.0,
                q75: 1.0,
                max: 1.0,
                skewness: None,
                kurtosis: None,
            }],
            opinion_economy: LaggedAssociation::unavailable("opinion data not supplied"),
        }
    }

    #[test]
    fn test_four_top_level_keys() {
        let json = sample_store().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let object = value.as_object().unwrap();

        assert_eq!(object.len(), 4);
        for key in [
            "correlations",
            "granger_causality",
            "descriptive_stats",
            "opinion_economy",
        ] {
            assert!(object.contains_key(key), "missing key {}", key);
        }
    }

    #[test]
    fn test_undefined_statistics_serialize_as_null() {
        let json = sample_store().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value["descriptive_stats"][0]["std"].is_null());
    }

    #[test]
    fn test_inline_markers_are_tagged() {
        let json = sample_store().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(
            value["granger_causality"]["tests"][0]["lags"][0]["status"],
            "numerical"
        );
        assert_eq!(value["opinion_economy"]["status"], "unavailable");
    }

    #[test]
    fn test_round_trip() {
        let store = sample_store();
        let json = store.to_json().unwrap();
        let back: ResultsStore = serde_json::from_str(&json).unwrap();
        assert_eq!(store, back);
    }
}
