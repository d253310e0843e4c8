//! Level-wise frequent itemset search

use crate::error::{MiningError, MiningResult};
use crate::mining::itemset::{Itemset, SupportTable};
use crate::mining::table::TransactionTable;
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info, warn};

/// Upper bound on join rounds. Item universes are finite, so the search
/// always terminates well before this.
pub const DEFAULT_MAX_ROUNDS: usize = 1000;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AprioriConfig {
    #[serde(default = "default_max_rounds")]
    pub max_rounds: usize,
    /// Drop candidates with an infrequent (k-1)-subset before counting.
    #[serde(default = "default_prune_candidates")]
    pub prune_candidates: bool,
}

impl Default for AprioriConfig {
    fn default() -> Self {
        Self {
            max_rounds: DEFAULT_MAX_ROUNDS,
            prune_candidates: true,
        }
    }
}

fn default_max_rounds() -> usize {
    DEFAULT_MAX_ROUNDS
}

fn default_prune_candidates() -> bool {
    true
}

/// Frequent itemsets of one size together with their support counts.
#[derive(Debug, Clone, PartialEq)]
pub struct FrequentLevel {
    pub level: usize,
    pub itemsets: SupportTable,
}

impl FrequentLevel {
    pub fn new(level: usize, itemsets: SupportTable) -> Self {
        Self { level, itemsets }
    }

    pub fn empty(level: usize) -> Self {
        Self::new(level, SupportTable::new())
    }

    pub fn len(&self) -> usize {
        self.itemsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.itemsets.is_empty()
    }

    pub fn contains(&self, itemset: &Itemset) -> bool {
        self.itemsets.contains_key(itemset)
    }

    pub fn support(&self, itemset: &Itemset) -> Option<usize> {
        self.itemsets.get(itemset).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Itemset, usize)> {
        self.itemsets.iter().map(|(itemset, count)| (itemset, *count))
    }
}

/// Apriori miner. Holds only configuration; every call is independent.
#[derive(Debug, Clone, Default)]
pub struct Apriori {
    config: AprioriConfig,
}

impl Apriori {
    pub fn new(config: AprioriConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AprioriConfig {
        &self.config
    }

    /// Return the last non-empty frequent level.
    pub fn mine(
        &self,
        table: &TransactionTable,
        min_support_count: usize,
    ) -> MiningResult<FrequentLevel> {
        self.mine_with(table, min_support_count, |_| {})
    }

    /// Return every non-empty frequent level, smallest itemsets first.
    pub fn mine_levels(
        &self,
        table: &TransactionTable,
        min_support_count: usize,
    ) -> MiningResult<Vec<FrequentLevel>> {
        let mut levels = Vec::new();
        self.mine_with(table, min_support_count, |level| {
            if !level.is_empty() {
                levels.push(level.clone());
            }
        })?;
        Ok(levels)
    }

    /// Run the search, handing each level to `observer` as soon as it is known.
    ///
    /// Level 1 is always observed, even when empty. Later levels are observed
    /// only when at least one candidate survives. The returned level is the
    /// last one observed.
    pub fn mine_with<F>(
        &self,
        table: &TransactionTable,
        min_support_count: usize,
        mut observer: F,
    ) -> MiningResult<FrequentLevel>
    where
        F: FnMut(&FrequentLevel),
    {
        if min_support_count == 0 {
            return Err(MiningError::InvalidSupportCount {
                count: min_support_count,
            });
        }

        let mut previous = count_singletons(table, min_support_count);
        observer(&previous);
        debug!(
            "Level 1: {} frequent items (min_support_count={})",
            previous.len(),
            min_support_count
        );

        for _ in 0..self.config.max_rounds {
            if previous.is_empty() {
                return Ok(previous);
            }

            let mut candidates = generate_candidates(&previous);
            let generated = candidates.len();
            if self.config.prune_candidates {
                candidates = prune_candidates(candidates, &previous);
            }
            debug!(
                "Level {}: {} candidates ({} after subset pruning)",
                previous.level + 1,
                generated,
                candidates.len()
            );

            let counts = count_candidates(&candidates, table);
            let frequent = filter_frequent(counts, min_support_count);
            if frequent.is_empty() {
                info!(
                    "Search finished at level {} with {} itemsets",
                    previous.level,
                    previous.len()
                );
                return Ok(previous);
            }

            let level = FrequentLevel::new(previous.level + 1, frequent);
            observer(&level);
            previous = level;
        }

        warn!(
            "Stopped after {} rounds at level {}",
            self.config.max_rounds, previous.level
        );
        Ok(previous)
    }
}

/// Mine with the default configuration.
pub fn mine(table: &TransactionTable, min_support_count: usize) -> MiningResult<FrequentLevel> {
    Apriori::default().mine(table, min_support_count)
}

/// Count every distinct item in a single scan and keep the frequent ones.
pub fn count_singletons(table: &TransactionTable, min_support_count: usize) -> FrequentLevel {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for transaction in table.iter() {
        for item in transaction.iter() {
            *counts.entry(item).or_insert(0) += 1;
        }
    }

    let itemsets = counts
        .into_iter()
        .filter(|(_, count)| *count >= min_support_count)
        .map(|(item, count)| (Itemset::singleton(item), count))
        .collect();
    FrequentLevel::new(1, itemsets)
}

/// Join step: union every unordered pair of previous-level itemsets and keep
/// the unions that are exactly one item larger.
pub fn generate_candidates(previous: &FrequentLevel) -> BTreeSet<Itemset> {
    let target = previous.level + 1;
    let itemsets: Vec<&Itemset> = previous.itemsets.keys().collect();

    let mut candidates = BTreeSet::new();
    for (i, left) in itemsets.iter().enumerate() {
        for right in &itemsets[i + 1..] {
            let union = left.union(right);
            if union.len() == target {
                candidates.insert(union);
            }
        }
    }
    candidates
}

/// Keep only candidates whose one-item-out subsets are all frequent.
pub fn prune_candidates(
    candidates: BTreeSet<Itemset>,
    previous: &FrequentLevel,
) -> BTreeSet<Itemset> {
    candidates
        .into_iter()
        .filter(|candidate| {
            candidate
                .one_item_out_subsets()
                .all(|subset| previous.contains(&subset))
        })
        .collect()
}

/// Support of each candidate by full table scan.
pub fn count_candidates(candidates: &BTreeSet<Itemset>, table: &TransactionTable) -> SupportTable {
    candidates
        .iter()
        .map(|candidate| (candidate.clone(), table.support(candidate)))
        .collect()
}

pub fn filter_frequent(counts: SupportTable, min_support_count: usize) -> SupportTable {
    counts
        .into_iter()
        .filter(|(_, count)| *count >= min_support_count)
        .collect()
}
