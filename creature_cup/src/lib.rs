//! # Creature Cup
//!
//! A single-elimination tournament among creatures fetched from a public
//! REST API, with the engine kept free of any I/O.
//!
//! ## Architecture
//!
//! A tournament moves through two states:
//!
//! - **RoundInProgress**: the current field is paired `(2i, 2i + 1)`, each
//!   pair is resolved, and the winners (plus any bye) become the next field
//! - **ChampionDecided**: exactly one contestant remains
//!
//! ## Core Modules
//!
//! - [`contestant`]: Immutable contestant records and stat lookup
//! - [`roster`]: Roster providers and field selection
//! - [`draw`]: Injectable, seedable randomness
//! - [`tournament`]: Pairing, resolution rules, round progression, events
//!
//! ## Example
//!
//! ```
//! use creature_cup::{Draw, Roster, TournamentConfig, TournamentEngine, NullSink};
//! use creature_cup::contestant::{Contestant, Stat, Stats};
//! use creature_cup::tournament::ScoreComparison;
//!
//! let roster = Roster::new(
//!     (1..=16)
//!         .map(|id| {
//!             let stats = Stats::new()
//!                 .with(Stat::Hp, id)
//!                 .with(Stat::Attack, 50)
//!                 .with(Stat::Defense, 50)
//!                 .with(Stat::SpecialAttack, 50)
//!                 .with(Stat::SpecialDefense, 50)
//!                 .with(Stat::Speed, 50);
//!             Contestant::new(id as u32, format!("creature-{id}"), stats).unwrap()
//!         })
//!         .collect(),
//! )
//! .unwrap();
//!
//! let mut draw = Draw::seeded(1);
//! let field = roster.select(8, &mut draw).unwrap();
//! let engine = TournamentEngine::new(TournamentConfig::new(ScoreComparison.into()));
//! let outcome = engine.run(field, &mut draw, &mut NullSink).unwrap();
//!
//! assert_eq!(outcome.round_count(), 3);
//! ```

/// Contestant records.
pub mod contestant;

/// Seedable randomness source.
pub mod draw;

/// Roster loading and selection.
pub mod roster;

/// Tournament engine.
pub mod tournament;

pub use contestant::{Contestant, ContestantError, ContestantId, Stat, Stats};
pub use draw::Draw;
pub use roster::{Roster, RosterError, RosterProvider, RosterTable, StaticRoster};
pub use tournament::{
    EventSink, LogSink, NullSink, ResolutionRule, Tournament, TournamentConfig, TournamentEngine,
    TournamentError, TournamentEvent, TournamentOutcome, TournamentState,
};
