//! Roster loading and contestant selection.
//!
//! A [`RosterProvider`] produces a [`Roster`]; the tournament field is then
//! sampled from it with [`Roster::select`]. Asking for more contestants than
//! the roster holds is a usage error, never a silent truncation.

pub mod errors;
pub mod models;
pub mod provider;

pub use errors::{RosterError, RosterResult};
pub use models::{Roster, RosterTable};
pub use provider::{RosterProvider, StaticRoster};
