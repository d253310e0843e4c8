/// Errors raised by the miner and the rule generator.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MiningError {
    #[error("minimum support count must be at least 1, got {count}")]
    InvalidSupportCount { count: usize },

    #[error("minimum support must be within [0, 1], got {fraction}")]
    InvalidSupportFraction { fraction: f64 },

    #[error("minimum confidence must be within (0, 1], got {fraction}")]
    InvalidConfidence { fraction: f64 },

    #[error("undefined confidence: antecedent {antecedent} has zero support")]
    UndefinedConfidence { antecedent: String },
}

pub type MiningResult<T> = std::result::Result<T, MiningError>;
