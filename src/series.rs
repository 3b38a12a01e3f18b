//! Time series and quarterly key types
//!
//! A `Series` is an immutable, chronologically ordered sequence of dated
//! observations. `SeriesStore` holds the named series for one analysis run
//! and preserves insertion order, which drives column ordering in every
//! downstream table and result matrix.

use crate::error::{EconError, Result};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single dated observation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub date: NaiveDate,
    pub value: f64,
}

/// Calendar-quarter identifier derived from a date by truncation
///
/// Two dates map to the same key iff they fall in the same (year, quarter).
/// Ordering is chronological: by year, then by quarter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QuarterKey {
    pub year: i32,
    pub quarter: u8,
}

impl QuarterKey {
    /// Create a quarter key; the quarter number must be in 1..=4
    pub fn new(year: i32, quarter: u8) -> Result<Self> {
        if !(1..=4).contains(&quarter) {
            return Err(EconError::InvalidParameter {
                name: "quarter".to_string(),
                reason: format!("must be in 1..=4, got {}", quarter),
            });
        }
        Ok(Self { year, quarter })
    }

    /// Derive the quarter key from a date by truncation
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            quarter: ((date.month0() / 3) + 1) as u8,
        }
    }

    /// The following quarter, carrying into the next year after Q4
    pub fn next(self) -> Self {
        if self.quarter == 4 {
            Self {
                year: self.year + 1,
                quarter: 1,
            }
        } else {
            Self {
                year: self.year,
                quarter: self.quarter + 1,
            }
        }
    }

    /// Shift forward by `quarters` periods
    pub fn shift(self, quarters: usize) -> Self {
        (0..quarters).fold(self, |key, _| key.next())
    }
}

impl fmt::Display for QuarterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}Q{}", self.year, self.quarter)
    }
}

/// A named, chronologically ordered time series
///
/// Immutable once constructed: the constructor validates ordering and the
/// type exposes accessors only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    name: String,
    observations: Vec<Observation>,
}

impl Series {
    /// Create a series, validating strictly increasing dates
    pub fn new(name: impl Into<String>, observations: Vec<Observation>) -> Result<Self> {
        let name = name.into();
        for window in observations.windows(2) {
            if window[1].date <= window[0].date {
                return Err(EconError::InvalidData(format!(
                    "series '{}' is not strictly increasing by date at {}",
                    name, window[1].date
                )));
            }
        }
        Ok(Self { name, observations })
    }

    /// Create a series from (date, value) pairs
    pub fn from_pairs(name: impl Into<String>, pairs: Vec<(NaiveDate, f64)>) -> Result<Self> {
        let observations = pairs
            .into_iter()
            .map(|(date, value)| Observation { date, value })
            .collect();
        Self::new(name, observations)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// Raw values in chronological order
    pub fn values(&self) -> Vec<f64> {
        self.observations.iter().map(|o| o.value).collect()
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}

/// Insertion-ordered collection of named series for one analysis run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeriesStore {
    series: Vec<Series>,
}

impl SeriesStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a series; names must be unique within the store
    pub fn insert(&mut self, series: Series) -> Result<()> {
        if self.get(series.name()).is_some() {
            return Err(EconError::InvalidData(format!(
                "duplicate series name '{}'",
                series.name()
            )));
        }
        self.series.push(series);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Series> {
        self.series.iter().find(|s| s.name() == name)
    }

    /// Series names in insertion order
    pub fn names(&self) -> Vec<&str> {
        self.series.iter().map(|s| s.name()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Series> {
        self.series.iter()
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}
