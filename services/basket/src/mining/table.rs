use crate::mining::itemset::{Itemset, Transaction};
use std::collections::BTreeSet;

/// Read-only, ordered collection of transactions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionTable {
    transactions: Vec<Transaction>,
}

impl TransactionTable {
    pub fn new(transactions: Vec<Transaction>) -> Self {
        Self { transactions }
    }

    /// Build a table from ragged rows. Missing and empty cells are skipped.
    pub fn from_rows<R, C, S>(rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        let transactions = rows
            .into_iter()
            .map(|row| Itemset::new(row.into_iter().flatten()))
            .collect();
        Self { transactions }
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions.iter()
    }

    /// Number of transactions containing every item of `itemset`.
    pub fn support(&self, itemset: &Itemset) -> usize {
        self.transactions
            .iter()
            .filter(|transaction| itemset.is_subset_of(transaction))
            .count()
    }

    /// Sorted universe of distinct items.
    pub fn unique_items(&self) -> Vec<String> {
        self.transactions
            .iter()
            .flat_map(|transaction| transaction.iter())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_table() -> TransactionTable {
        TransactionTable::from_rows(vec![
            vec![Some("A"), Some("B"), None],
            vec![Some("A"), Some("B"), Some("")],
            vec![Some("A"), Some("C"), None],
            vec![Some("B"), Some("C"), None],
        ])
    }

    #[test]
    fn test_from_rows_skips_missing_cells() {
        let table = make_table();
        assert_eq!(table.len(), 4);
        assert!(table.iter().all(|t| t.len() == 2));
    }

    #[test]
    fn test_support() {
        let table = make_table();
        assert_eq!(table.support(&Itemset::singleton("A")), 3);
        assert_eq!(table.support(&Itemset::new(["A", "B"])), 2);
        assert_eq!(table.support(&Itemset::new(["A", "B", "C"])), 0);
        assert_eq!(table.support(&Itemset::default()), 4);
    }

    #[test]
    fn test_unique_items() {
        assert_eq!(make_table().unique_items(), vec!["A", "B", "C"]);
        assert!(TransactionTable::default().unique_items().is_empty());
    }
}
