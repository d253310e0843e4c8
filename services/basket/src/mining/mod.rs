//! Frequent itemset search and association rule derivation
//!
//! Both stages are pure functions of their inputs:
//! 1. `apriori` walks the itemset lattice level by level
//! 2. `rules` splits frequent itemsets into directional rules

pub mod itemset;
pub mod table;
pub mod apriori;
pub mod rules;

pub use itemset::*;
pub use table::*;
pub use apriori::*;
pub use rules::*;
