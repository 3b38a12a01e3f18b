//! Boundary I/O
//!
//! Loading already-validated CSV inputs and writing the results artifact
//! and rendered tables. All file handling lives here; the engines
//! themselves never touch the filesystem.

use crate::align::AlignedTable;
use crate::error::{EconError, Result};
use crate::render::Table;
use crate::results::ResultsStore;
use crate::series::{QuarterKey, Series};
use chrono::NaiveDate;
use std::fs;
use std::path::Path;

const DATE_FORMAT: &str = "%Y-%m-%d";

fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|e| EconError::InvalidData(format!("bad date '{}': {}", raw.trim(), e)))
}

fn parse_value(raw: &str) -> Result<f64> {
    raw.trim()
        .parse::<f64>()
        .map_err(|e| EconError::InvalidData(format!("bad value '{}': {}", raw.trim(), e)))
}

fn field<'r>(record: &'r csv::StringRecord, index: usize, path: &Path) -> Result<&'r str> {
    record.get(index).ok_or_else(|| {
        EconError::InvalidData(format!("{}: short record", path.display()))
    })
}

/// Load one economic series from a `date,value` CSV file
pub fn load_series_csv(name: &str, path: &Path) -> Result<Series> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();
    let date_index = headers
        .iter()
        .position(|h| h.trim() == "date")
        .ok_or_else(|| EconError::InvalidData(format!("{}: missing 'date' column", path.display())))?;
    let value_index = headers
        .iter()
        .position(|h| h.trim() == "value")
        .ok_or_else(|| EconError::InvalidData(format!("{}: missing 'value' column", path.display())))?;

    let mut pairs = Vec::new();
    for record in reader.records() {
        let record = record?;
        let date = field(&record, date_index, path)?;
        let value = field(&record, value_index, path)?;
        pairs.push((parse_date(date)?, parse_value(value)?));
    }

    Series::from_pairs(name, pairs)
}

/// Load a quarter-keyed table from a CSV with a `date` column plus one
/// column per metric
///
/// Schema-driven: every non-date column becomes a table column, in file
/// order. Dates are truncated to quarter keys; the input is expected to
/// be already quarterly, so a duplicated quarter is rejected.
pub fn load_quarter_table_csv(path: &Path) -> Result<AlignedTable> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();
    let date_index = headers
        .iter()
        .position(|h| h.trim() == "date")
        .ok_or_else(|| EconError::InvalidData(format!("{}: missing 'date' column", path.display())))?;

    let columns: Vec<String> = headers
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != date_index)
        .map(|(_, h)| h.trim().to_string())
        .collect();
    if columns.is_empty() {
        return Err(EconError::InvalidData(format!(
            "{}: no metric columns besides 'date'",
            path.display()
        )));
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let key = QuarterKey::from_date(parse_date(field(&record, date_index, path)?)?);
        let values = record
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != date_index)
            .map(|(_, raw)| parse_value(raw))
            .collect::<Result<Vec<f64>>>()?;
        rows.push((key, values));
    }

    AlignedTable::from_rows(columns, rows)
}

/// Write the results artifact as pretty-printed JSON
pub fn write_results_json(results: &ResultsStore, path: &Path) -> Result<()> {
    let file = fs::File::create(path)?;
    serde_json::to_writer_pretty(file, results)?;
    Ok(())
}

/// Write one rendered table as line-oriented text
pub fn write_table(table: &Table, path: &Path) -> Result<()> {
    fs::write(path, format!("{}\n", table.render()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn csv_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_series_csv() {
        let file = csv_file("date,value\n2020-01-01,100.5\n2020-04-01,101.25\n");
        let series = load_series_csv("gdp", file.path()).unwrap();
        assert_eq!(series.name(), "gdp");
        assert_eq!(series.values(), vec![100.5, 101.25]);
    }

    #[test]
    fn test_load_series_missing_column() {
        let file = csv_file("date,price\n2020-01-01,100.5\n");
        assert!(matches!(
            load_series_csv("gdp", file.path()),
            Err(EconError::InvalidData(_))
        ));
    }

    #[test]
    fn test_load_series_bad_date() {
        let file = csv_file("date,value\n01/02/2020,100.5\n");
        assert!(load_series_csv("gdp", file.path()).is_err());
    }

    #[test]
    fn test_load_quarter_table() {
        let file = csv_file(
            "date,getting_better_pct,net_sentiment\n2020-03-31,40.0,5.0\n2020-06-30,38.5,2.5\n",
        );
        let table = load_quarter_table_csv(file.path()).unwrap();
        assert_eq!(
            table.columns(),
            &["getting_better_pct".to_string(), "net_sentiment".to_string()]
        );
        assert_eq!(table.n_rows(), 2);
        assert_eq!(table.column("net_sentiment").unwrap(), vec![5.0, 2.5]);
    }

    #[test]
    fn test_load_quarter_table_duplicate_quarter_rejected() {
        let file = csv_file("date,net_sentiment\n2020-01-01,5.0\n2020-02-01,6.0\n");
        assert!(load_quarter_table_csv(file.path()).is_err());
    }

    #[test]
    fn test_write_table_round_trip() {
        let table = Table::builder("Sample")
            .headers(["Name", "Value"])
            .row(["a", "1.0"])
            .build();
        let file = NamedTempFile::new().unwrap();
        write_table(&table, file.path()).unwrap();
        let written = fs::read_to_string(file.path()).unwrap();
        assert!(written.starts_with("Sample\n"));
        assert!(written.ends_with('\n'));
    }
}
