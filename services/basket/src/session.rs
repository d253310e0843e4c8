//! Threshold rounds over a loaded transaction table
//!
//! A session owns the table and the miner configuration. Every round takes
//! its thresholds as plain parameters, so a failed round leaves nothing behind
//! and the next one starts clean.

use crate::error::{MiningError, MiningResult};
use crate::mining::{
    rules_for_itemset, validate_confidence, Apriori, AprioriConfig, FrequentLevel, Rule,
    RuleSource, TransactionTable,
};
use crate::report;
use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use tracing::{info, warn};

/// Everything a completed round produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundSummary {
    pub min_support_count: usize,
    /// Non-empty levels, smallest itemsets first.
    pub levels: Vec<FrequentLevel>,
    /// Last non-empty level, or an empty level 1.
    pub result: FrequentLevel,
    pub rules: Vec<Rule>,
    /// Directions dropped because their antecedent had zero support.
    pub skipped: usize,
}

pub struct Session {
    table: TransactionTable,
    apriori: Apriori,
    rule_source: RuleSource,
}

impl Session {
    pub fn new(table: TransactionTable, mining: AprioriConfig, rule_source: RuleSource) -> Self {
        Self {
            table,
            apriori: Apriori::new(mining),
            rule_source,
        }
    }

    pub fn table(&self) -> &TransactionTable {
        &self.table
    }

    /// `floor(transaction_count * fraction)`.
    pub fn min_support_count(&self, fraction: f64) -> MiningResult<usize> {
        if !(0.0..=1.0).contains(&fraction) {
            return Err(MiningError::InvalidSupportFraction { fraction });
        }
        Ok((self.table.len() as f64 * fraction).floor() as usize)
    }

    /// Mine, derive rules and print both.
    pub fn run_round<W: Write>(
        &self,
        min_support: f64,
        min_confidence: f64,
        out: &mut W,
    ) -> Result<RoundSummary> {
        let min_support_count = self.min_support_count(min_support)?;
        writeln!(out, "Minimum support count : {}", min_support_count)?;
        validate_confidence(min_confidence)?;

        let mut observed = Vec::new();
        let result = self
            .apriori
            .mine_with(&self.table, min_support_count, |level| observed.push(level.clone()))?;
        for level in &observed {
            report::write_level(out, level)?;
        }

        writeln!(out, "# Result :")?;
        report::write_level(out, &result)?;
        report::write_confidence_banner(out, min_confidence)?;

        let levels: Vec<FrequentLevel> = observed.into_iter().filter(|l| !l.is_empty()).collect();
        let sources: Vec<&FrequentLevel> = match self.rule_source {
            RuleSource::MaximalLevel => vec![&result],
            RuleSource::AllLevels => levels.iter().filter(|l| l.level >= 2).collect(),
        };

        let mut rules = Vec::new();
        let mut skipped = 0;
        for level in sources {
            for (itemset, support) in level.iter() {
                // Single items have no splits and get no header.
                if itemset.len() < 2 {
                    continue;
                }
                let results = rules_for_itemset(itemset, support, &self.table, min_confidence);
                report::write_itemset_rules(out, itemset, support, &results)?;
                for r in results {
                    match r {
                        Ok(rule) => rules.push(rule),
                        Err(e) => {
                            warn!("Skipping rule: {}", e);
                            skipped += 1;
                        }
                    }
                }
            }
        }

        info!(
            "Round finished: level {} with {} itemsets, {} rules ({} skipped)",
            result.level,
            result.len(),
            rules.len(),
            skipped
        );

        Ok(RoundSummary {
            min_support_count,
            levels,
            result,
            rules,
            skipped,
        })
    }

    /// Prompt for thresholds until `input` is exhausted. Returns the number of
    /// rounds that completed.
    pub fn run_interactive<R: BufRead, W: Write>(&self, input: &mut R, out: &mut W) -> Result<usize> {
        report::write_items(out, &self.table.unique_items())?;

        let mut completed = 0;
        loop {
            let Some(min_support) = prompt(input, out, "Enter minimum support [0 -> 1] : ")? else {
                break;
            };
            let Some(min_confidence) = prompt(input, out, "Enter minimum confidence [0 -> 1] : ")?
            else {
                break;
            };

            let round = parse_fraction(&min_support, "minimum support").and_then(|support| {
                let confidence = parse_fraction(&min_confidence, "minimum confidence")?;
                self.run_round(support, confidence, out)
            });

            match round {
                Ok(_) => completed += 1,
                Err(e) => report::write_error(out, &e)?,
            }
        }
        Ok(completed)
    }
}

fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, message: &str) -> Result<Option<String>> {
    write!(out, "{}", message)?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line).context("Failed to read from input")? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn parse_fraction(raw: &str, name: &str) -> Result<f64> {
    raw.parse::<f64>()
        .with_context(|| format!("Invalid {} value: {:?}", name, raw))
}
