//! Canonical itemset type shared by transactions, candidates and support tables

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

/// A set of item labels backed by a sorted, de-duplicated vector.
///
/// Equality, ordering and hashing only depend on the contained items, never on
/// the order they were supplied in, so itemsets can key support tables directly.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Itemset {
    items: Vec<String>,
}

/// One purchase event. Identity is positional within its table.
pub type Transaction = Itemset;

/// Itemset -> occurrence count, iterated in canonical itemset order.
pub type SupportTable = BTreeMap<Itemset, usize>;

impl Itemset {
    /// Build an itemset from labels. Empty labels are ignored.
    pub fn new<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut items: Vec<String> = items
            .into_iter()
            .map(Into::into)
            .filter(|item| !item.is_empty())
            .collect();
        items.sort();
        items.dedup();
        Self { items }
    }

    pub fn singleton(item: impl Into<String>) -> Self {
        Self::new([item.into()])
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }

    pub fn contains(&self, item: &str) -> bool {
        self.items
            .binary_search_by(|probe| probe.as_str().cmp(item))
            .is_ok()
    }

    /// Set union, merging the two sorted vectors.
    pub fn union(&self, other: &Itemset) -> Itemset {
        let mut merged = Vec::with_capacity(self.len() + other.len());
        let (mut i, mut j) = (0, 0);
        while i < self.items.len() && j < other.items.len() {
            match self.items[i].cmp(&other.items[j]) {
                Ordering::Less => {
                    merged.push(self.items[i].clone());
                    i += 1;
                }
                Ordering::Greater => {
                    merged.push(other.items[j].clone());
                    j += 1;
                }
                Ordering::Equal => {
                    merged.push(self.items[i].clone());
                    i += 1;
                    j += 1;
                }
            }
        }
        merged.extend_from_slice(&self.items[i..]);
        merged.extend_from_slice(&other.items[j..]);
        Itemset { items: merged }
    }

    /// Items of `self` that are not in `other`.
    pub fn difference(&self, other: &Itemset) -> Itemset {
        let items = self
            .items
            .iter()
            .filter(|item| !other.contains(item))
            .cloned()
            .collect();
        Itemset { items }
    }

    /// True when every item of `self` is also in `other`.
    pub fn is_subset_of(&self, other: &Itemset) -> bool {
        if self.len() > other.len() {
            return false;
        }
        let mut theirs = other.items.iter();
        'outer: for mine in &self.items {
            for candidate in theirs.by_ref() {
                match candidate.cmp(mine) {
                    Ordering::Less => continue,
                    Ordering::Equal => continue 'outer,
                    Ordering::Greater => return false,
                }
            }
            return false;
        }
        true
    }

    /// The itemset with the item at `index` removed.
    pub fn without(&self, index: usize) -> Itemset {
        let items = self
            .items
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .map(|(_, item)| item.clone())
            .collect();
        Itemset { items }
    }

    /// All subsets with exactly one item left out, in lexicographic
    /// combination order (the dropped item walks from last to first).
    pub fn one_item_out_subsets(&self) -> impl Iterator<Item = Itemset> + '_ {
        (0..self.len()).rev().map(move |index| self.without(index))
    }
}

impl fmt::Display for Itemset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.items.join(", "))
    }
}

impl<S: Into<String>> FromIterator<S> for Itemset {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Itemset::new(iter)
    }
}
