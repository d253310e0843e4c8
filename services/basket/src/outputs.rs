//! Result exports (JSONL rules, Parquet itemsets)

use crate::mining::{FrequentLevel, Rule};
use anyhow::Result;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};

/// One exported rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleRecord {
    pub source: Vec<String>,
    pub source_support: usize,
    pub antecedent: Vec<String>,
    pub consequent: Vec<String>,
    pub confidence: f64,
    pub run_ts: i64, // epoch ms
}

impl RuleRecord {
    pub fn from_rule(rule: &Rule, run_ts: i64) -> Self {
        Self {
            source: rule.source.items().to_vec(),
            source_support: rule.source_support,
            antecedent: rule.antecedent.items().to_vec(),
            consequent: rule.consequent.items().to_vec(),
            confidence: rule.confidence,
            run_ts,
        }
    }
}

fn partition_dir(output_dir: &str, kind: &str, date: &str) -> PathBuf {
    Path::new(output_dir)
        .join(kind)
        .join(format!("date={}", date))
}

/// Write rules as JSON lines, replacing any earlier file for the date.
pub fn write_rules_jsonl(
    output_dir: &str,
    date: &str,
    rules: &[Rule],
    run_ts: i64,
) -> Result<PathBuf> {
    let dir = partition_dir(output_dir, "rules", date);
    std::fs::create_dir_all(&dir)?;

    let path = dir.join("rules.jsonl");
    let mut file = std::fs::File::create(&path)?;

    for rule in rules {
        let json = serde_json::to_string(&RuleRecord::from_rule(rule, run_ts))?;
        writeln!(file, "{}", json)?;
    }

    tracing::info!("Wrote {} rules to {:?}", rules.len(), path);
    Ok(path)
}

/// Write frequent itemsets of every level to Parquet.
pub fn write_itemsets_parquet(
    output_dir: &str,
    date: &str,
    levels: &[FrequentLevel],
) -> Result<Option<PathBuf>> {
    let rows: Vec<(usize, String, usize, usize)> = levels
        .iter()
        .flat_map(|level| {
            level.iter().map(move |(itemset, support)| {
                (level.level, itemset.items().join(","), itemset.len(), support)
            })
        })
        .collect();

    if rows.is_empty() {
        tracing::info!("No frequent itemsets to write");
        return Ok(None);
    }

    let dir = partition_dir(output_dir, "itemsets", date);
    std::fs::create_dir_all(&dir)?;
    let path = dir.join("itemsets.parquet");

    let level_col: Vec<u64> = rows.iter().map(|r| r.0 as u64).collect();
    let items_col: Vec<&str> = rows.iter().map(|r| r.1.as_str()).collect();
    let size_col: Vec<u64> = rows.iter().map(|r| r.2 as u64).collect();
    let support_col: Vec<u64> = rows.iter().map(|r| r.3 as u64).collect();

    let mut df = DataFrame::new(vec![
        Series::new("level", level_col),
        Series::new("items", items_col),
        Series::new("size", size_col),
        Series::new("support", support_col),
    ])?;

    let file = std::fs::File::create(&path)?;
    ParquetWriter::new(file).finish(&mut df)?;

    tracing::info!("Wrote {} itemsets to {:?}", rows.len(), path);
    Ok(Some(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mining::{Itemset, SupportTable};
    use tempfile::TempDir;

    fn make_rule() -> Rule {
        Rule {
            source: Itemset::new(["COFFEE", "CROISSANT"]),
            source_support: 5,
            antecedent: Itemset::singleton("CROISSANT"),
            consequent: Itemset::singleton("COFFEE"),
            confidence: 83.5,
        }
    }

    #[test]
    fn test_write_rules_jsonl() {
        let temp_dir = TempDir::new().unwrap();
        let output_dir = temp_dir.path().to_string_lossy().to_string();

        let path = write_rules_jsonl(&output_dir, "2026-01-19", &[make_rule()], 1_700_000_000_000).unwrap();
        assert!(path.ends_with("rules/date=2026-01-19/rules.jsonl"));

        let content = std::fs::read_to_string(&path).unwrap();
        let records: Vec<RuleRecord> = content
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].antecedent, vec!["CROISSANT"]);
        assert_eq!(records[0].source, vec!["COFFEE", "CROISSANT"]);
        assert_eq!(records[0].run_ts, 1_700_000_000_000);
    }

    #[test]
    fn test_write_itemsets_parquet() {
        let temp_dir = TempDir::new().unwrap();
        let output_dir = temp_dir.path().to_string_lossy().to_string();

        let mut singles = SupportTable::new();
        singles.insert(Itemset::singleton("COFFEE"), 6);
        singles.insert(Itemset::singleton("CROISSANT"), 5);
        let mut pairs = SupportTable::new();
        pairs.insert(Itemset::new(["COFFEE", "CROISSANT"]), 5);
        let levels = vec![FrequentLevel::new(1, singles), FrequentLevel::new(2, pairs)];

        let path = write_itemsets_parquet(&output_dir, "2026-01-19", &levels)
            .unwrap()
            .unwrap();

        let file = std::fs::File::open(&path).unwrap();
        let df = ParquetReader::new(file).finish().unwrap();
        assert_eq!(df.height(), 3);
        let items = df.column("items").unwrap().str().unwrap();
        assert_eq!(items.get(2), Some("COFFEE,CROISSANT"));
    }

    #[test]
    fn test_empty_itemsets_not_written() {
        let temp_dir = TempDir::new().unwrap();
        let output_dir = temp_dir.path().to_string_lossy().to_string();
        let result = write_itemsets_parquet(&output_dir, "2026-01-19", &[FrequentLevel::empty(1)]).unwrap();
        assert!(result.is_none());
    }
}
