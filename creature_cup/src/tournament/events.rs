//! Tournament progress events and the sinks that consume them.
//!
//! The engine never renders anything itself. Console output, the dashboard
//! history pane and plain log lines are interchangeable [`EventSink`]s.

use log::info;
use std::{fmt, sync::Arc};

use super::models::{MatchRecord, RoundNumber};
use super::rules::MatchDetail;
use crate::contestant::Contestant;

/// Events emitted while a tournament runs
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TournamentEvent {
    RoundStarted {
        round: RoundNumber,
        entrants: usize,
    },
    MatchResolved(MatchRecord),
    Bye {
        round: RoundNumber,
        contestant: Arc<Contestant>,
    },
    ChampionDecided {
        champion: Arc<Contestant>,
        rounds: usize,
    },
}

impl fmt::Display for TournamentEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::RoundStarted { round, entrants } => {
                format!("--- Round {round} --- ({entrants} contestants)")
            }
            Self::MatchResolved(record) => {
                let (first, second) = (&record.first.name, &record.second.name);
                let winner = &record.winner().name;
                match &record.outcome.detail {
                    MatchDetail::Score {
                        first: a,
                        second: b,
                        speed: None,
                    } => format!("{first} vs {second}: {a} vs {b}, {winner} advances"),
                    MatchDetail::Score {
                        first: a,
                        second: b,
                        speed: Some((sa, sb)),
                    } => format!(
                        "{first} vs {second}: {a} vs {b}, tied; speed {sa} vs {sb}, {winner} advances"
                    ),
                    MatchDetail::Hp {
                        strike_count,
                        remaining_hp,
                        ..
                    } => format!(
                        "{first} vs {second}: {winner} wins with {remaining_hp} HP left after {strike_count} strikes"
                    ),
                }
            }
            Self::Bye { contestant, .. } => format!("{} advances on a bye", contestant.name),
            Self::ChampionDecided { champion, rounds } => {
                format!("{} is the champion after {rounds} round(s)!", champion.name)
            }
        };
        write!(f, "{repr}")
    }
}

/// Consumer of tournament events
pub trait EventSink {
    fn record(&mut self, event: TournamentEvent);
}

impl EventSink for Vec<TournamentEvent> {
    fn record(&mut self, event: TournamentEvent) {
        self.push(event);
    }
}

/// Sink that writes each event through the `log` facade
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl EventSink for LogSink {
    fn record(&mut self, event: TournamentEvent) {
        info!("{event}");
    }
}

/// Sink that drops every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn record(&mut self, _event: TournamentEvent) {}
}
