//! End-to-end test: CSV inputs to results artifact and rendered tables

use econostat::analysis::{analyze, AnalysisConfig};
use econostat::io::{load_quarter_table_csv, load_series_csv, write_results_json, write_table};
use econostat::render::{correlation_table, descriptive_table, granger_table, lagged_table};
use econostat::results::ResultsStore;
use econostat::series::SeriesStore;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn write_csv(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn quarterly_csv(values: &[f64]) -> String {
    let mut out = String::from("date,value\n");
    for (i, v) in values.iter().enumerate() {
        let year = 2019 + i / 4;
        let month = (i % 4) * 3 + 1;
        out.push_str(&format!("{}-{:02}-01,{}\n", year, month, v));
    }
    out
}

#[test]
fn test_csv_to_artifact() {
    let dir = TempDir::new().unwrap();

    let gdp_values: Vec<f64> = (0..12).map(|t| 100.0 + (0.8 * t as f64).sin() * 5.0 + t as f64).collect();
    let rate_values: Vec<f64> = (0..12).map(|t| 5.0 - (0.6 * t as f64).cos()).collect();
    let gdp_path = write_csv(&dir, "gdp.csv", &quarterly_csv(&gdp_values));
    let rate_path = write_csv(&dir, "rate.csv", &quarterly_csv(&rate_values));

    let opinion_csv = "date,getting_better_pct,net_sentiment\n\
                       2019-04-01,40.0,5.0\n\
                       2019-07-01,38.0,2.0\n\
                       2019-10-01,41.0,6.0\n\
                       2020-01-01,37.0,1.0\n\
                       2020-04-01,35.0,-2.0\n";
    let opinion_path = write_csv(&dir, "opinion.csv", opinion_csv);

    let mut store = SeriesStore::new();
    store
        .insert(load_series_csv("gdp", &gdp_path).unwrap())
        .unwrap();
    store
        .insert(load_series_csv("rate", &rate_path).unwrap())
        .unwrap();
    let opinion = load_quarter_table_csv(&opinion_path).unwrap();

    let config = AnalysisConfig { max_lag: 2, ..AnalysisConfig::default() };
    let results = analyze(&store, Some(&opinion), &config).unwrap();

    // Artifact round trip; exact equality relies on serde_json's
    // float_roundtrip feature for lossless f64 parsing
    let json_path = dir.path().join("statistical_analysis.json");
    write_results_json(&results, &json_path).unwrap();
    let raw = fs::read_to_string(&json_path).unwrap();
    let back: ResultsStore = serde_json::from_str(&raw).unwrap();
    assert_eq!(results, back);

    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value.as_object().unwrap().len(), 4);
    assert!(value["opinion_economy"]["status"] == "available");

    // One rendered table per engine result
    for (table, name) in [
        (correlation_table(&results.correlations), "correlation_matrix.txt"),
        (granger_table(&results.granger_causality), "granger_causality.txt"),
        (descriptive_table(&results.descriptive_stats), "descriptive_stats.txt"),
        (lagged_table(&results.opinion_economy), "opinion_economy.txt"),
    ] {
        let path = dir.path().join(name);
        write_table(&table, &path).unwrap();
        let rendered = fs::read_to_string(&path).unwrap();
        assert!(rendered.lines().count() > 3, "{} too short", name);
        assert!(rendered.contains("Note:"), "{} missing footnote", name);
    }
}

#[test]
fn test_missing_opinion_file_degrades() {
    let dir = TempDir::new().unwrap();
    let a_path = write_csv(&dir, "a.csv", &quarterly_csv(&[1.0, 2.5, 2.0, 4.0, 3.5, 5.0]));
    let b_path = write_csv(&dir, "b.csv", &quarterly_csv(&[9.0, 7.5, 8.0, 6.0, 7.0, 5.5]));

    let mut store = SeriesStore::new();
    store.insert(load_series_csv("a", &a_path).unwrap()).unwrap();
    store.insert(load_series_csv("b", &b_path).unwrap()).unwrap();

    let config = AnalysisConfig { max_lag: 1, ..AnalysisConfig::default() };
    let results = analyze(&store, None, &config).unwrap();

    assert!(!results.opinion_economy.is_available());
    assert_eq!(results.correlations.n_observations, 6);
    assert_eq!(results.descriptive_stats.len(), 2);
}
