//! Descriptive statistics engine
//!
//! Operates on each raw series independently rather than the aligned
//! table, so series with different native lengths keep their full history.
//! Moment conventions follow the usual sample definitions: N-1 standard
//! deviation, adjusted Fisher-Pearson skewness, and excess kurtosis
//! (a normal distribution scores 0).

use crate::error::{EconError, Result};
use crate::series::Series;
use crate::stats::mean;
use serde::{Deserialize, Serialize};

/// Summary statistics for one series
///
/// Statistics that are undefined at the sample size in hand (std below 2
/// observations, skewness below 3, kurtosis below 4, or zero variance)
/// are `None` and serialize as null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSummary {
    pub name: String,
    pub count: usize,
    pub mean: f64,
    pub std: Option<f64>,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
    pub skewness: Option<f64>,
    pub kurtosis: Option<f64>,
}

/// Compute summary statistics over a raw series
///
/// Fails with `EmptySeries` for zero observations; a single observation
/// yields defined location statistics and `None` for the rest.
pub fn describe(series: &Series) -> Result<SeriesSummary> {
    let values = series.values();
    if values.is_empty() {
        return Err(EconError::EmptySeries {
            name: series.name().to_string(),
        });
    }

    let n = values.len();
    let m = mean(&values);

    let mut sorted = values.clone();
    sorted.sort_by(|a, b| a.partial_cmp(b).expect("finite series values"));

    Ok(SeriesSummary {
        name: series.name().to_string(),
        count: n,
        mean: m,
        std: sample_std(&values, m),
        min: sorted[0],
        q25: quantile(&sorted, 0.25),
        median: quantile(&sorted, 0.5),
        q75: quantile(&sorted, 0.75),
        max: sorted[n - 1],
        skewness: skewness(&values, m),
        kurtosis: excess_kurtosis(&values, m),
    })
}

/// Sample standard deviation (N-1 denominator); None below 2 observations
fn sample_std(values: &[f64], mean: f64) -> Option<f64> {
    let n = values.len();
    if n < 2 {
        return None;
    }
    let ss: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    Some((ss / (n - 1) as f64).sqrt())
}

/// Linear-interpolation quantile over pre-sorted values
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }
    let position = q * (n - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    if lower == upper {
        sorted[lower]
    } else {
        let fraction = position - lower as f64;
        sorted[lower] + fraction * (sorted[upper] - sorted[lower])
    }
}

/// Adjusted Fisher-Pearson skewness; None below 3 observations or for a
/// zero-variance sample
fn skewness(values: &[f64], mean: f64) -> Option<f64> {
    let n = values.len();
    if n < 3 {
        return None;
    }
    let nf = n as f64;
    let m2: f64 = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / nf;
    let m3: f64 = values.iter().map(|v| (v - mean).powi(3)).sum::<f64>() / nf;
    if m2 < 1e-12 {
        return None;
    }
    let g1 = m3 / m2.powf(1.5);
    Some((nf * (nf - 1.0)).sqrt() / (nf - 2.0) * g1)
}

/// Sample excess kurtosis (normal = 0); None below 4 observations or for
/// a zero-variance sample
fn excess_kurtosis(values: &[f64], mean: f64) -> Option<f64> {
    let n = values.len();
    if n < 4 {
        return None;
    }
    let nf = n as f64;
    let s = sample_std(values, mean)?;
    if s < 1e-12 {
        return None;
    }
    let sum4: f64 = values.iter().map(|v| ((v - mean) / s).powi(4)).sum();
    let term = nf * (nf + 1.0) / ((nf - 1.0) * (nf - 2.0) * (nf - 3.0)) * sum4;
    let adjustment = 3.0 * (nf - 1.0).powi(2) / ((nf - 2.0) * (nf - 3.0));
    Some(term - adjustment)
}
