//! Market-basket analysis: frequent itemsets and association rules over a
//! transaction log.

pub mod config;
pub mod dataset;
pub mod error;
pub mod mining;
pub mod outputs;
pub mod report;
pub mod session;

pub use error::{MiningError, MiningResult};
