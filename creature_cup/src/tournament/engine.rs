//! Single-elimination tournament engine.

use log::{debug, info};
use rand::Rng;
use std::sync::Arc;
use thiserror::Error;

use super::events::{EventSink, TournamentEvent};
use super::models::{
    MatchRecord, Pairing, RoundNumber, RoundRecord, TournamentConfig, TournamentOutcome,
    TournamentState,
};
use super::rules::Resolve;
use crate::{
    contestant::{Contestant, ContestantError},
    draw::Draw,
};

/// Tournament errors
#[derive(Debug, Error)]
pub enum TournamentError {
    #[error("Tournament needs at least one contestant")]
    EmptyField,

    #[error("Tournament already decided: {0} is the champion")]
    AlreadyDecided(String),

    #[error("Invalid contestant: {0}")]
    Contestant(#[from] ContestantError),
}

pub type TournamentResult<T> = Result<T, TournamentError>;

/// A tournament in progress.
///
/// Each call to [`Tournament::step`] replaces the field with the round's
/// winners; the previous field is never mutated.
#[derive(Debug, Clone)]
pub struct Tournament {
    config: TournamentConfig,
    field: Vec<Arc<Contestant>>,
    state: TournamentState,
    rounds: Vec<RoundRecord>,
}

impl Tournament {
    /// Create a tournament over `entrants`
    ///
    /// # Errors
    ///
    /// Returns [`TournamentError::EmptyField`] for no entrants, or a
    /// contestant error if any entrant lacks a stat the rule reads.
    pub fn new(config: TournamentConfig, entrants: Vec<Arc<Contestant>>) -> TournamentResult<Self> {
        if entrants.is_empty() {
            return Err(TournamentError::EmptyField);
        }

        for contestant in &entrants {
            config.rule.validate(contestant)?;
        }

        let state = match entrants.as_slice() {
            [champion] => TournamentState::ChampionDecided {
                champion: champion.clone(),
            },
            _ => TournamentState::RoundInProgress { round: 1 },
        };

        Ok(Self {
            config,
            field: entrants,
            state,
            rounds: Vec::new(),
        })
    }

    #[must_use]
    pub fn config(&self) -> &TournamentConfig {
        &self.config
    }

    #[must_use]
    pub fn state(&self) -> &TournamentState {
        &self.state
    }

    /// Contestants still in the tournament
    #[must_use]
    pub fn field(&self) -> &[Arc<Contestant>] {
        &self.field
    }

    /// Rounds played so far
    #[must_use]
    pub fn rounds(&self) -> &[RoundRecord] {
        &self.rounds
    }

    /// Play the next round
    ///
    /// # Errors
    ///
    /// Returns [`TournamentError::AlreadyDecided`] once a champion exists.
    pub fn step<R, S>(&mut self, draw: &mut Draw<R>, sink: &mut S) -> TournamentResult<&RoundRecord>
    where
        R: Rng,
        S: EventSink + ?Sized,
    {
        let round = match &self.state {
            TournamentState::RoundInProgress { round } => *round,
            TournamentState::ChampionDecided { champion } => {
                return Err(TournamentError::AlreadyDecided(champion.name.clone()));
            }
        };

        let record = play_round(round, &self.field, &self.config, draw, sink)?;
        self.field = record.advancing.clone();
        self.rounds.push(record);

        self.state = match self.field.as_slice() {
            [champion] => {
                info!(
                    "{} wins the tournament after {} round(s)",
                    champion.name,
                    self.rounds.len()
                );
                sink.record(TournamentEvent::ChampionDecided {
                    champion: champion.clone(),
                    rounds: self.rounds.len(),
                });
                TournamentState::ChampionDecided {
                    champion: champion.clone(),
                }
            }
            _ => TournamentState::RoundInProgress { round: round + 1 },
        };

        // Safe: pushed above.
        Ok(&self.rounds[self.rounds.len() - 1])
    }

    /// Play rounds until one contestant remains
    pub fn run<R, S>(mut self, draw: &mut Draw<R>, sink: &mut S) -> TournamentResult<TournamentOutcome>
    where
        R: Rng,
        S: EventSink + ?Sized,
    {
        if let TournamentState::ChampionDecided { champion } = &self.state {
            if self.rounds.is_empty() {
                sink.record(TournamentEvent::ChampionDecided {
                    champion: champion.clone(),
                    rounds: 0,
                });
            }
        }

        loop {
            match self.state {
                TournamentState::RoundInProgress { .. } => {
                    self.step(draw, sink)?;
                }
                TournamentState::ChampionDecided { champion } => {
                    return Ok(TournamentOutcome {
                        champion,
                        rounds: self.rounds,
                    });
                }
            }
        }
    }
}

/// Resolve one round: `next_field = f(field)`
fn play_round<R, S>(
    round: RoundNumber,
    field: &[Arc<Contestant>],
    config: &TournamentConfig,
    draw: &mut Draw<R>,
    sink: &mut S,
) -> TournamentResult<RoundRecord>
where
    R: Rng,
    S: EventSink + ?Sized,
{
    let mut entrants = field.to_vec();
    if config.shuffle {
        draw.shuffle(&mut entrants);
    }

    debug!("Round {} with {} contestants", round, entrants.len());
    sink.record(TournamentEvent::RoundStarted {
        round,
        entrants: entrants.len(),
    });

    let pairing = Pairing::for_field(entrants.len());
    let mut matches = Vec::with_capacity(pairing.pairs.len());
    let mut advancing = Vec::with_capacity(pairing.pairs.len() + 1);

    for (a, b) in pairing.pairs {
        let first = entrants[a].clone();
        let second = entrants[b].clone();
        let outcome = config.rule.resolve(&first, &second)?;

        let record = MatchRecord {
            round,
            first,
            second,
            outcome,
        };
        debug!("{} beat {}", record.winner().name, record.loser().name);
        advancing.push(record.winner().clone());
        sink.record(TournamentEvent::MatchResolved(record.clone()));
        matches.push(record);
    }

    let bye = pairing.bye.map(|idx| entrants[idx].clone());
    if let Some(contestant) = &bye {
        sink.record(TournamentEvent::Bye {
            round,
            contestant: contestant.clone(),
        });
        advancing.push(contestant.clone());
    }

    Ok(RoundRecord {
        number: round,
        entrants,
        matches,
        bye,
        advancing,
    })
}

/// Runs complete tournaments with a fixed configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct TournamentEngine {
    config: TournamentConfig,
}

impl TournamentEngine {
    pub fn new(config: TournamentConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &TournamentConfig {
        &self.config
    }

    /// Start a tournament that can be stepped round by round
    pub fn start(&self, entrants: Vec<Arc<Contestant>>) -> TournamentResult<Tournament> {
        Tournament::new(self.config, entrants)
    }

    /// Run a tournament to completion
    pub fn run<R, S>(
        &self,
        entrants: Vec<Arc<Contestant>>,
        draw: &mut Draw<R>,
        sink: &mut S,
    ) -> TournamentResult<TournamentOutcome>
    where
        R: Rng,
        S: EventSink + ?Sized,
    {
        self.start(entrants)?.run(draw, sink)
    }
}
