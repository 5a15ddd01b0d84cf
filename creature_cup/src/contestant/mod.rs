//! Contestant records held by a tournament.
//!
//! A [`Contestant`] is created once by a roster provider and never mutated.
//! Stat lookups fail fast with [`ContestantError::MissingStat`] rather than
//! defaulting to zero.

pub mod errors;
pub mod models;

pub use errors::{ContestantError, ContestantResult};
pub use models::{Contestant, ContestantId, Stat, Stats};
