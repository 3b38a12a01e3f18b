//! Quarterly alignment engine
//!
//! Reconciles series sampled with inconsistent date anchors onto a common
//! quarterly index via successive inner joins on `QuarterKey`. Only quarters
//! present in every participating series survive; a disjoint pair yields an
//! empty table, which the orchestrator treats as fatal.

use crate::series::{QuarterKey, SeriesStore};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{EconError, Result};

/// A quarter-keyed table with one value per column in every row
///
/// Rows are sorted by key. The inner-join invariant holds by construction:
/// a row exists only for quarters covered by every column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignedTable {
    columns: Vec<String>,
    rows: Vec<(QuarterKey, Vec<f64>)>,
}

impl AlignedTable {
    /// Build a table from explicit rows, validating widths and key uniqueness
    pub fn from_rows(columns: Vec<String>, mut rows: Vec<(QuarterKey, Vec<f64>)>) -> Result<Self> {
        for (key, values) in &rows {
            if values.len() != columns.len() {
                return Err(EconError::InvalidData(format!(
                    "row {} has {} values for {} columns",
                    key,
                    values.len(),
                    columns.len()
                )));
            }
        }
        rows.sort_by_key(|(key, _)| *key);
        for window in rows.windows(2) {
            if window[0].0 == window[1].0 {
                return Err(EconError::InvalidData(format!(
                    "duplicate quarter key {}",
                    window[0].0
                )));
            }
        }
        Ok(Self { columns, rows })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[(QuarterKey, Vec<f64>)] {
        &self.rows
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = QuarterKey> + '_ {
        self.rows.iter().map(|(key, _)| *key)
    }

    /// All values of one column, in key order
    pub fn column(&self, name: &str) -> Option<Vec<f64>> {
        let index = self.columns.iter().position(|c| c.as_str() == name)?;
        self.column_at(index)
    }

    /// All values of the column at `index`, in key order
    pub fn column_at(&self, index: usize) -> Option<Vec<f64>> {
        if index >= self.columns.len() {
            return None;
        }
        Some(self.rows.iter().map(|(_, values)| values[index]).collect())
    }

    /// Re-key every row forward by `quarters` periods
    pub fn shift_forward(&self, quarters: usize) -> AlignedTable {
        AlignedTable {
            columns: self.columns.clone(),
            rows: self
                .rows
                .iter()
                .map(|(key, values)| (key.shift(quarters), values.clone()))
                .collect(),
        }
    }

    /// Inner join with another table on quarter key
    ///
    /// The result carries this table's columns followed by the other's,
    /// restricted to the keys both tables cover. A column name already
    /// taken by the left side is suffixed until unique, so positional
    /// access stays unambiguous after the join.
    pub fn inner_join(&self, other: &AlignedTable) -> AlignedTable {
        let other_by_key: BTreeMap<QuarterKey, &Vec<f64>> =
            other.rows.iter().map(|(key, values)| (*key, values)).collect();

        let mut columns = self.columns.clone();
        for name in &other.columns {
            let mut unique = name.clone();
            let mut counter = 2;
            while columns.contains(&unique) {
                unique = format!("{}_{}", name, counter);
                counter += 1;
            }
            columns.push(unique);
        }

        let rows = self
            .rows
            .iter()
            .filter_map(|(key, values)| {
                other_by_key.get(key).map(|other_values| {
                    let mut joined = values.clone();
                    joined.extend(other_values.iter().copied());
                    (*key, joined)
                })
            })
            .collect();

        AlignedTable { columns, rows }
    }
}

/// Merge every series in the store onto a shared quarterly index
///
/// Each series contributes one key per date by truncation; the join keeps
/// quarters common to all series, in input series order for columns.
pub fn align(store: &SeriesStore) -> AlignedTable {
    let mut columns = Vec::with_capacity(store.len());
    let mut merged: Option<BTreeMap<QuarterKey, Vec<f64>>> = None;

    for series in store.iter() {
        columns.push(series.name().to_string());

        let by_quarter: BTreeMap<QuarterKey, f64> = series
            .observations()
            .iter()
            .map(|o| (QuarterKey::from_date(o.date), o.value))
            .collect();

        merged = Some(match merged {
            None => by_quarter
                .into_iter()
                .map(|(key, value)| (key, vec![value]))
                .collect(),
            Some(accumulated) => accumulated
                .into_iter()
                .filter_map(|(key, mut values)| {
                    by_quarter.get(&key).map(|value| {
                        values.push(*value);
                        (key, values)
                    })
                })
                .collect(),
        });
    }

    AlignedTable {
        columns,
        rows: merged.unwrap_or_default().into_iter().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::Series;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn key(year: i32, quarter: u8) -> QuarterKey {
        QuarterKey::new(year, quarter).unwrap()
    }

    fn store_of(series: Vec<Series>) -> SeriesStore {
        let mut store = SeriesStore::new();
        for s in series {
            store.insert(s).unwrap();
        }
        store
    }

    #[test]
    fn test_align_inner_join_overlap() {
        // A covers 2020Q1-Q3, B covers 2020Q2-Q4: only Q2 and Q3 survive
        let a = Series::from_pairs(
            "a",
            vec![
                (date(2020, 1, 1), 1.0),
                (date(2020, 4, 1), 2.0),
                (date(2020, 7, 1), 3.0),
            ],
        )
        .unwrap();
        let b = Series::from_pairs(
            "b",
            vec![
                (date(2020, 6, 30), 20.0),
                (date(2020, 9, 30), 30.0),
                (date(2020, 12, 31), 40.0),
            ],
        )
        .unwrap();

        let table = align(&store_of(vec![a, b]));
        assert_eq!(table.columns(), &["a".to_string(), "b".to_string()]);
        assert_eq!(table.n_rows(), 2);
        assert_eq!(
            table.keys().collect::<Vec<_>>(),
            vec![key(2020, 2), key(2020, 3)]
        );
        assert_eq!(table.column("a").unwrap(), vec![2.0, 3.0]);
        assert_eq!(table.column("b").unwrap(), vec![20.0, 30.0]);
    }

    #[test]
    fn test_align_mismatched_anchors() {
        // Quarter-start vs quarter-end dated series still align
        let a = Series::from_pairs("a", vec![(date(2020, 1, 1), 1.0)]).unwrap();
        let b = Series::from_pairs("b", vec![(date(2020, 3, 31), 2.0)]).unwrap();
        let table = align(&store_of(vec![a, b]));
        assert_eq!(table.n_rows(), 1);
    }

    #[test]
    fn test_align_disjoint_is_empty() {
        let a = Series::from_pairs("a", vec![(date(2019, 1, 1), 1.0)]).unwrap();
        let b = Series::from_pairs("b", vec![(date(2021, 1, 1), 2.0)]).unwrap();
        let table = align(&store_of(vec![a, b]));
        assert!(table.is_empty());
        assert_eq!(table.columns().len(), 2);
    }

    #[test]
    fn test_shift_forward() {
        let table = AlignedTable::from_rows(
            vec!["a".to_string()],
            vec![(key(2020, 4), vec![1.0]), (key(2020, 3), vec![2.0])],
        )
        .unwrap();
        let shifted = table.shift_forward(1);
        assert_eq!(
            shifted.keys().collect::<Vec<_>>(),
            vec![key(2020, 4), key(2021, 1)]
        );
    }

    #[test]
    fn test_inner_join_pairs_values() {
        let left = AlignedTable::from_rows(
            vec!["econ".to_string()],
            vec![(key(2020, 2), vec![100.0]), (key(2020, 3), vec![110.0])],
        )
        .unwrap();
        let right = AlignedTable::from_rows(
            vec!["sentiment".to_string()],
            vec![(key(2020, 2), vec![5.0]), (key(2020, 4), vec![6.0])],
        )
        .unwrap();

        let joined = left.inner_join(&right);
        assert_eq!(joined.n_rows(), 1);
        assert_eq!(joined.rows()[0], (key(2020, 2), vec![100.0, 5.0]));
        assert_eq!(
            joined.columns(),
            &["econ".to_string(), "sentiment".to_string()]
        );
    }

    #[test]
    fn test_inner_join_suffixes_colliding_names() {
        let left = AlignedTable::from_rows(
            vec!["gdp".to_string()],
            vec![(key(2020, 1), vec![1.0]), (key(2020, 2), vec![2.0])],
        )
        .unwrap();
        let right = AlignedTable::from_rows(
            vec!["gdp".to_string()],
            vec![(key(2020, 1), vec![10.0]), (key(2020, 2), vec![20.0])],
        )
        .unwrap();

        let joined = left.inner_join(&right);
        assert_eq!(joined.columns(), &["gdp".to_string(), "gdp_2".to_string()]);
        assert_eq!(joined.column("gdp").unwrap(), vec![1.0, 2.0]);
        assert_eq!(joined.column("gdp_2").unwrap(), vec![10.0, 20.0]);
        assert_eq!(joined.column_at(1).unwrap(), vec![10.0, 20.0]);
    }

    #[test]
    fn test_column_at_out_of_range() {
        let table = AlignedTable::from_rows(
            vec!["a".to_string()],
            vec![(key(2020, 1), vec![1.0])],
        )
        .unwrap();
        assert_eq!(table.column_at(0).unwrap(), vec![1.0]);
        assert!(table.column_at(1).is_none());
    }

    #[test]
    fn test_from_rows_rejects_ragged_rows() {
        let result = AlignedTable::from_rows(
            vec!["a".to_string(), "b".to_string()],
            vec![(key(2020, 1), vec![1.0])],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_from_rows_rejects_duplicate_keys() {
        let result = AlignedTable::from_rows(
            vec!["a".to_string()],
            vec![(key(2020, 1), vec![1.0]), (key(2020, 1), vec![2.0])],
        );
        assert!(result.is_err());
    }
}
