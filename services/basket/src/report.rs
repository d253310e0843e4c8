//! Console formatting of frequent levels and rules

use crate::error::MiningResult;
use crate::mining::{FrequentLevel, Itemset, Rule};
use std::io::{self, Write};

const RULE_LINE: &str = "/*************************/";
const ERROR_LINE: &str = "############################";

pub fn write_items<W: Write>(out: &mut W, items: &[String]) -> io::Result<()> {
    writeln!(out, "Items ({}): [{}]", items.len(), items.join(", "))
}

pub fn write_level<W: Write>(out: &mut W, level: &FrequentLevel) -> io::Result<()> {
    writeln!(out, "{}", RULE_LINE)?;
    writeln!(out, "=> level {} :", level.level)?;
    for (itemset, count) in level.iter() {
        writeln!(out, "{} : {}", itemset, count)?;
    }
    writeln!(out, "{}", RULE_LINE)
}

pub fn write_confidence_banner<W: Write>(out: &mut W, min_confidence: f64) -> io::Result<()> {
    writeln!(out, "{}", RULE_LINE)?;
    writeln!(out, "Minimum Confidence : {}%", min_confidence * 100.0)?;
    writeln!(out, "{}", RULE_LINE)
}

pub fn format_rule(rule: &Rule) -> String {
    format!(
        "{} -> {} = {:.2}%",
        rule.antecedent, rule.consequent, rule.confidence
    )
}

/// Header for one source itemset followed by its rules.
pub fn write_itemset_rules<W: Write>(
    out: &mut W,
    itemset: &Itemset,
    support: usize,
    rules: &[MiningResult<Rule>],
) -> io::Result<()> {
    writeln!(out, "Frequent Item Set: {}: {}", itemset, support)?;
    writeln!(out, "Association Rules:")?;
    for rule in rules {
        match rule {
            Ok(rule) => writeln!(out, "{}", format_rule(rule))?,
            Err(e) => writeln!(out, "skipped: {}", e)?,
        }
    }
    writeln!(out)?;
    writeln!(out)
}

pub fn write_error<W: Write>(out: &mut W, error: &anyhow::Error) -> io::Result<()> {
    writeln!(out, "{}", ERROR_LINE)?;
    writeln!(out, "Error : {:#}", error)?;
    writeln!(out, "{}", ERROR_LINE)
}
