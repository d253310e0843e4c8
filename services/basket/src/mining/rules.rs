//! Association rule derivation from frequent itemsets

use crate::error::{MiningError, MiningResult};
use crate::mining::apriori::FrequentLevel;
use crate::mining::itemset::Itemset;
use crate::mining::table::TransactionTable;
use serde::Deserialize;
use std::collections::VecDeque;

/// Directional rule `antecedent -> consequent` drawn from one frequent itemset.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub source: Itemset,
    pub source_support: usize,
    pub antecedent: Itemset,
    pub consequent: Itemset,
    /// Percentage in (0, 100].
    pub confidence: f64,
}

/// Which frequent levels feed the rule generator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum RuleSource {
    /// Only the last non-empty level found by the search.
    #[default]
    MaximalLevel,
    /// Every non-empty level with itemsets of two or more items.
    AllLevels,
}

impl RuleSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleSource::MaximalLevel => "maximal_level",
            RuleSource::AllLevels => "all_levels",
        }
    }
}

pub fn validate_confidence(min_confidence: f64) -> MiningResult<()> {
    if min_confidence > 0.0 && min_confidence <= 1.0 {
        Ok(())
    } else {
        Err(MiningError::InvalidConfidence {
            fraction: min_confidence,
        })
    }
}

/// Antecedents checked for `itemset`: each one-item-out subset.
///
/// The two splits of a pair mirror each other, so pairs only use the first.
pub fn antecedent_splits(itemset: &Itemset) -> Vec<Itemset> {
    let splits = itemset.one_item_out_subsets();
    if itemset.len() == 2 {
        splits.take(1).collect()
    } else {
        splits.collect()
    }
}

/// Evaluate both directions of every split of one itemset.
///
/// Supports are recounted from the table for each split. A direction whose
/// antecedent has zero support yields `UndefinedConfidence` instead of a rule.
pub fn rules_for_itemset(
    itemset: &Itemset,
    source_support: usize,
    table: &TransactionTable,
    min_confidence: f64,
) -> Vec<MiningResult<Rule>> {
    let mut rules = Vec::new();
    if itemset.len() < 2 {
        return rules;
    }

    let threshold = min_confidence * 100.0;
    for a in antecedent_splits(itemset) {
        let b = itemset.difference(&a);
        let support_a = table.support(&a);
        let support_b = table.support(&b);
        let support_ab = table.support(itemset);

        let forward = evaluate(itemset, source_support, &a, &b, support_a, support_ab, threshold);
        let backward = evaluate(itemset, source_support, &b, &a, support_b, support_ab, threshold);
        rules.extend(forward);
        rules.extend(backward);
    }
    rules
}

fn evaluate(
    source: &Itemset,
    source_support: usize,
    antecedent: &Itemset,
    consequent: &Itemset,
    support_antecedent: usize,
    support_union: usize,
    threshold: f64,
) -> Option<MiningResult<Rule>> {
    if support_antecedent == 0 {
        return Some(Err(MiningError::UndefinedConfidence {
            antecedent: antecedent.to_string(),
        }));
    }

    let confidence = (support_union as f64 / support_antecedent as f64) * 100.0;
    if confidence >= threshold {
        Some(Ok(Rule {
            source: source.clone(),
            source_support,
            antecedent: antecedent.clone(),
            consequent: consequent.clone(),
            confidence,
        }))
    } else {
        None
    }
}

/// Lazily yields rules grouped by source itemset, in level iteration order.
pub struct RuleGenerator<'a> {
    table: &'a TransactionTable,
    min_confidence: f64,
    itemsets: Box<dyn Iterator<Item = (&'a Itemset, usize)> + 'a>,
    pending: VecDeque<MiningResult<Rule>>,
}

impl<'a> RuleGenerator<'a> {
    pub fn new(
        levels: &'a [FrequentLevel],
        table: &'a TransactionTable,
        min_confidence: f64,
    ) -> MiningResult<Self> {
        validate_confidence(min_confidence)?;
        Ok(Self {
            table,
            min_confidence,
            itemsets: Box::new(levels.iter().flat_map(FrequentLevel::iter)),
            pending: VecDeque::new(),
        })
    }
}

impl Iterator for RuleGenerator<'_> {
    type Item = MiningResult<Rule>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(rule) = self.pending.pop_front() {
                return Some(rule);
            }
            let (itemset, support) = self.itemsets.next()?;
            self.pending
                .extend(rules_for_itemset(itemset, support, self.table, self.min_confidence));
        }
    }
}

/// Rules for a single frequent level.
pub fn generate_rules<'a>(
    level: &'a FrequentLevel,
    table: &'a TransactionTable,
    min_confidence: f64,
) -> MiningResult<RuleGenerator<'a>> {
    RuleGenerator::new(std::slice::from_ref(level), table, min_confidence)
}
