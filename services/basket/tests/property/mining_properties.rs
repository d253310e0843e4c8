use basket::mining::{
    Apriori, AprioriConfig, FrequentLevel, Itemset, RuleGenerator, TransactionTable,
};
use proptest::prelude::*;

const ALPHABET: &[&str] = &["BREAD", "BUTTER", "COFFEE", "EGGS", "MILK", "TEA"];

fn table_strategy() -> impl Strategy<Value = TransactionTable> {
    prop::collection::vec(
        prop::collection::vec(prop::sample::select(ALPHABET), 0..5),
        0..14,
    )
    .prop_map(|rows| TransactionTable::new(rows.into_iter().map(Itemset::new).collect()))
}

/// Every non-empty proper subset of `itemset`.
fn proper_subsets(itemset: &Itemset) -> Vec<Itemset> {
    let items = itemset.items();
    let full = (1u32 << items.len()) - 1;
    (1..full)
        .map(|mask| {
            Itemset::new(
                items
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| mask & (1 << i) != 0)
                    .map(|(_, item)| item.clone()),
            )
        })
        .collect()
}

fn level_sizes(levels: &[FrequentLevel]) -> Vec<usize> {
    levels.iter().map(FrequentLevel::len).collect()
}

proptest! {
    #[test]
    fn subsets_of_frequent_itemsets_are_frequent(table in table_strategy(), min in 1usize..4) {
        let levels = Apriori::default().mine_levels(&table, min).unwrap();
        for level in &levels {
            for (itemset, count) in level.iter() {
                prop_assert!(count >= min);
                prop_assert_eq!(table.support(itemset), count);
                for subset in proper_subsets(itemset) {
                    prop_assert!(
                        table.support(&subset) >= min,
                        "{} is frequent but {} is not", itemset, subset
                    );
                }
            }
        }
    }

    #[test]
    fn level_k_holds_k_items(table in table_strategy(), min in 1usize..4) {
        let levels = Apriori::default().mine_levels(&table, min).unwrap();
        for (index, level) in levels.iter().enumerate() {
            prop_assert_eq!(level.level, index + 1);
            prop_assert!(level.iter().all(|(itemset, _)| itemset.len() == level.level));
        }
    }

    #[test]
    fn raising_support_never_grows_levels(table in table_strategy(), min in 1usize..4) {
        let miner = Apriori::default();
        let low = level_sizes(&miner.mine_levels(&table, min).unwrap());
        let high = level_sizes(&miner.mine_levels(&table, min + 1).unwrap());
        prop_assert!(high.len() <= low.len());
        for (h, l) in high.iter().zip(low.iter()) {
            prop_assert!(h <= l);
        }
    }

    #[test]
    fn subset_pruning_does_not_change_results(table in table_strategy(), min in 1usize..4) {
        let pruned = Apriori::default().mine_levels(&table, min).unwrap();
        let unpruned = Apriori::new(AprioriConfig {
            prune_candidates: false,
            ..AprioriConfig::default()
        })
        .mine_levels(&table, min)
        .unwrap();
        prop_assert_eq!(pruned, unpruned);
    }

    #[test]
    fn result_is_last_non_empty_level(table in table_strategy(), min in 1usize..4) {
        let miner = Apriori::default();
        let result = miner.mine(&table, min).unwrap();
        let levels = miner.mine_levels(&table, min).unwrap();
        match levels.last() {
            Some(last) => prop_assert_eq!(&result, last),
            None => prop_assert_eq!(result, FrequentLevel::empty(1)),
        }
    }

    #[test]
    fn rules_are_bounded_and_partition_their_source(
        table in table_strategy(),
        min in 1usize..4,
        min_confidence in 0.01f64..=1.0,
    ) {
        let levels = Apriori::default().mine_levels(&table, min).unwrap();
        for result in RuleGenerator::new(&levels, &table, min_confidence).unwrap() {
            let rule = result.unwrap();
            prop_assert!(rule.confidence > 0.0 && rule.confidence <= 100.0);
            prop_assert!(rule.confidence >= min_confidence * 100.0);
            prop_assert!(!rule.antecedent.is_empty() && !rule.consequent.is_empty());
            prop_assert!(rule.antecedent.iter().all(|item| !rule.consequent.contains(item)));
            prop_assert_eq!(rule.antecedent.union(&rule.consequent), rule.source.clone());
        }
    }
}
