//! Single-elimination tournaments.
//!
//! This module provides the tournament engine:
//! - Pairing consecutive contestants, with a bye for an odd field
//! - Pluggable match resolution (score comparison or HP depletion)
//! - Round progression until one champion remains
//! - Progress events for any display surface
//!
//! ## Example
//!
//! ```
//! use creature_cup::contestant::{Contestant, Stat, Stats};
//! use creature_cup::draw::Draw;
//! use creature_cup::tournament::{HpDepletion, LogSink, TournamentConfig, TournamentEngine};
//! use std::sync::Arc;
//!
//! let field: Vec<_> = (1..=4)
//!     .map(|id| {
//!         let stats = Stats::new().with(Stat::Hp, 40 + id).with(Stat::Attack, 10 * id);
//!         Arc::new(Contestant::new(id as u32, format!("creature-{id}"), stats).unwrap())
//!     })
//!     .collect();
//!
//! let engine = TournamentEngine::new(TournamentConfig::new(HpDepletion.into()));
//! let outcome = engine.run(field, &mut Draw::seeded(7), &mut LogSink).unwrap();
//!
//! assert_eq!(outcome.round_count(), 2);
//! ```

pub mod engine;
pub mod events;
pub mod models;
pub mod rules;

pub use engine::{Tournament, TournamentEngine, TournamentError, TournamentResult};
pub use events::{EventSink, LogSink, NullSink, TournamentEvent};
pub use models::{
    MatchRecord, Pairing, RoundNumber, RoundRecord, TournamentConfig, TournamentOutcome,
    TournamentState,
};
pub use rules::{
    HpDepletion, MatchDetail, MatchOutcome, Resolve, ResolutionRule, SCORED_STATS,
    STRIKE_LOG_LIMIT, ScoreComparison, Side, Strike, UnknownRule,
};
