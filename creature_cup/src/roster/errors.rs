//! Error types for roster loading and selection

use thiserror::Error;

use crate::contestant::{ContestantError, ContestantId};

/// Result type for roster operations
pub type RosterResult<T> = Result<T, RosterError>;

/// Roster errors
#[derive(Debug, Error)]
pub enum RosterError {
    /// More contestants requested than the roster holds
    #[error("Cannot select {requested} contestants from a roster of {available}")]
    NotEnoughContestants { requested: usize, available: usize },

    /// The same contestant appears twice
    #[error("Duplicate contestant ID in roster: {0}")]
    DuplicateId(ContestantId),

    /// Invalid contestant record
    #[error("Invalid contestant: {0}")]
    Contestant(#[from] ContestantError),

    /// Roster file or payload could not be parsed
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Provider-specific failure
    #[error("Roster provider error: {0}")]
    Provider(String),
}
