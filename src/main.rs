//! # econostat CLI
//!
//! Command-line entry point: loads validated CSV series, runs the full
//! analysis, and writes the JSON artifact plus one rendered table per
//! engine result.

use clap::Parser;
use econostat::analysis::{analyze, AnalysisConfig};
use econostat::io::{load_quarter_table_csv, load_series_csv, write_results_json, write_table};
use econostat::render::{correlation_table, descriptive_table, granger_table, lagged_table};
use econostat::series::SeriesStore;
use econostat::{EconError, Result};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "econostat")]
#[command(about = "Econometric analysis of quarterly time series", long_about = None)]
struct Cli {
    /// Economic series as NAME=PATH (repeatable, analyzed in order)
    #[arg(short, long = "series", value_name = "NAME=PATH", required = true)]
    series: Vec<String>,

    /// Optional quarterly opinion CSV (a date column plus metric columns)
    #[arg(long, value_name = "PATH")]
    opinion: Option<PathBuf>,

    /// Output directory for the JSON artifact and rendered tables
    #[arg(short, long, default_value = "outputs")]
    output: PathBuf,

    /// Maximum Granger causality lag
    #[arg(long, default_value_t = 4)]
    max_lag: usize,
}

fn parse_series_arg(arg: &str) -> Result<(&str, PathBuf)> {
    let (name, path) = arg.split_once('=').ok_or_else(|| EconError::InvalidParameter {
        name: "series".to_string(),
        reason: format!("expected NAME=PATH, got '{}'", arg),
    })?;
    Ok((name, PathBuf::from(path)))
}

fn run(cli: &Cli) -> Result<()> {
    let mut store = SeriesStore::new();
    for arg in &cli.series {
        let (name, path) = parse_series_arg(arg)?;
        info!(name, path = %path.display(), "loading series");
        store.insert(load_series_csv(name, &path)?)?;
    }

    let opinion = match &cli.opinion {
        Some(path) => {
            info!(path = %path.display(), "loading opinion data");
            Some(load_quarter_table_csv(path)?)
        }
        None => None,
    };

    let config = AnalysisConfig {
        max_lag: cli.max_lag,
        ..AnalysisConfig::default()
    };
    let results = analyze(&store, opinion.as_ref(), &config)?;

    std::fs::create_dir_all(&cli.output)?;
    write_results_json(&results, &cli.output.join("statistical_analysis.json"))?;
    write_table(
        &correlation_table(&results.correlations),
        &cli.output.join("correlation_matrix.txt"),
    )?;
    write_table(
        &granger_table(&results.granger_causality),
        &cli.output.join("granger_causality.txt"),
    )?;
    write_table(
        &descriptive_table(&results.descriptive_stats),
        &cli.output.join("descriptive_stats.txt"),
    )?;
    write_table(
        &lagged_table(&results.opinion_economy),
        &cli.output.join("opinion_economy.txt"),
    )?;

    info!(output = %cli.output.display(), "analysis complete");
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        error!("analysis failed: {}", e);
        std::process::exit(1);
    }
}
