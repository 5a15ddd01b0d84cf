//! Error types for contestant records

use thiserror::Error;

use super::models::Stat;

/// Result type for contestant operations
pub type ContestantResult<T> = Result<T, ContestantError>;

/// Data-integrity errors on a contestant record
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ContestantError {
    /// Contestant IDs are positive
    #[error("Contestant {0} has an invalid ID of 0")]
    InvalidId(String),

    /// A stat the active rule needs is absent
    #[error("Contestant {contestant} is missing required stat {stat}")]
    MissingStat { contestant: String, stat: Stat },

    /// A stat the active rule needs is zero or negative
    #[error("Contestant {contestant} has non-positive {stat}: {value}")]
    NonPositiveStat {
        contestant: String,
        stat: Stat,
        value: i64,
    },

    /// Summing stats left the `i64` range
    #[error("Stat total for {contestant} is out of range")]
    StatOverflow { contestant: String },

    /// Stat name not recognized
    #[error("Unknown stat: {0}")]
    UnknownStat(String),
}
