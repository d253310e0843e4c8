//! Transaction CSV loading and item normalization using Polars

use crate::mining::{Itemset, TransactionTable};
use anyhow::{Context, Result};
use polars::prelude::*;
use serde::Deserialize;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DatasetConfig {
    #[serde(default = "default_path")]
    pub path: String,
    /// Leading bookkeeping columns (row index, date, transaction number).
    #[serde(default = "default_skip_columns")]
    pub skip_columns: usize,
    #[serde(default = "default_true")]
    pub dedup_rows: bool,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            skip_columns: default_skip_columns(),
            dedup_rows: true,
        }
    }
}

fn default_path() -> String {
    "data/transactions.csv".to_string()
}

fn default_skip_columns() -> usize {
    3
}

fn default_true() -> bool {
    true
}

/// Uppercase, trim and strip every space from a raw label.
pub fn normalize_item(raw: &str) -> String {
    raw.to_uppercase().trim().replace(' ', "")
}

/// Load the CSV at `config.path` into a normalized transaction table.
pub fn load_transactions(config: &DatasetConfig) -> Result<TransactionTable> {
    let path = Path::new(&config.path);
    if !path.exists() {
        anyhow::bail!("Transactions file not found: {:?}", path);
    }

    let df = read_item_frame(path, config)?;
    let table = frame_to_table(&df)?;
    info!(
        "Loaded {} transactions over {} item columns from {:?}",
        table.len(),
        df.width(),
        path
    );
    Ok(table)
}

/// Read every column as a string, drop duplicate rows and the leading
/// bookkeeping columns.
pub fn read_item_frame(path: &Path, config: &DatasetConfig) -> Result<DataFrame> {
    let mut lf = LazyCsvReader::new(path)
        .with_infer_schema_length(Some(0))
        .finish()
        .with_context(|| format!("Failed to read CSV {:?}", path))?;

    // Duplicates are judged on the raw row, bookkeeping columns included.
    if config.dedup_rows {
        lf = lf.unique_stable(None, UniqueKeepStrategy::First);
    }

    let df = lf
        .collect()
        .with_context(|| format!("Failed to collect CSV {:?}", path))?;

    let item_columns: Vec<String> = df
        .get_column_names()
        .iter()
        .skip(config.skip_columns)
        .map(|name| name.to_string())
        .collect();

    if item_columns.is_empty() {
        anyhow::bail!(
            "No item columns left in {:?} after skipping {} columns",
            path,
            config.skip_columns
        );
    }

    df.select(item_columns)
        .context("Failed to select item columns")
}

/// One transaction per row; null and blank cells are not items.
pub fn frame_to_table(df: &DataFrame) -> Result<TransactionTable> {
    let columns = df
        .get_columns()
        .iter()
        .map(|series| series.str())
        .collect::<PolarsResult<Vec<_>>>()
        .context("Item columns must be string typed")?;

    let transactions = (0..df.height())
        .map(|row_idx| {
            Itemset::new(
                columns
                    .iter()
                    .filter_map(|column| column.get(row_idx))
                    .map(normalize_item),
            )
        })
        .collect();

    Ok(TransactionTable::new(transactions))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_test_csv() -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "Index,Date,Transaction,Item 1,Item 2,Item 3").unwrap();
        writeln!(file, "1,2024-03-01,1001, bread ,Milk,").unwrap();
        writeln!(file, "1,2024-03-01,1001, bread ,Milk,").unwrap();
        writeln!(file, "2,2024-03-01,1002,hot chocolate,COOKIES,milk").unwrap();
        writeln!(file, "3,2024-03-02,1003,Coffee,,").unwrap();
        file
    }

    fn config_for(file: &NamedTempFile) -> DatasetConfig {
        DatasetConfig {
            path: file.path().to_string_lossy().to_string(),
            ..DatasetConfig::default()
        }
    }

    #[test]
    fn test_normalize_item() {
        assert_eq!(normalize_item("  hot chocolate "), "HOTCHOCOLATE");
        assert_eq!(normalize_item("Milk"), "MILK");
        assert_eq!(normalize_item("   "), "");
    }

    #[test]
    fn test_load_transactions() {
        let file = create_test_csv();
        let table = load_transactions(&config_for(&file)).unwrap();

        // The repeated first row is dropped.
        assert_eq!(table.len(), 3);
        assert_eq!(
            table.unique_items(),
            vec!["BREAD", "COFFEE", "COOKIES", "HOTCHOCOLATE", "MILK"]
        );
        assert_eq!(table.support(&Itemset::singleton("MILK")), 2);
        assert_eq!(table.support(&Itemset::singleton("COFFEE")), 1);
    }

    #[test]
    fn test_load_without_dedup() {
        let file = create_test_csv();
        let config = DatasetConfig {
            dedup_rows: false,
            ..config_for(&file)
        };
        let table = load_transactions(&config).unwrap();
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn test_missing_file() {
        let config = DatasetConfig {
            path: "does/not/exist.csv".to_string(),
            ..DatasetConfig::default()
        };
        assert!(load_transactions(&config).is_err());
    }

    #[test]
    fn test_too_many_skipped_columns() {
        let file = create_test_csv();
        let config = DatasetConfig {
            skip_columns: 6,
            ..config_for(&file)
        };
        assert!(load_transactions(&config).is_err());
    }
}
