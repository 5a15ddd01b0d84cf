//! Tournament data models for single-elimination brackets.

use std::sync::Arc;

use super::rules::{MatchDetail, MatchOutcome, ResolutionRule, Side};
use crate::contestant::Contestant;

/// Round number (1-indexed)
pub type RoundNumber = u32;

/// Tournament configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TournamentConfig {
    /// Rule deciding each match
    pub rule: ResolutionRule,
    /// Shuffle the field before pairing each round
    pub shuffle: bool,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            rule: ResolutionRule::default(),
            shuffle: true,
        }
    }
}

impl TournamentConfig {
    /// Create a configuration with the given rule and per-round shuffling
    pub fn new(rule: ResolutionRule) -> Self {
        Self {
            rule,
            shuffle: true,
        }
    }

    /// Keep the field in its given order every round
    #[must_use]
    pub fn without_shuffle(mut self) -> Self {
        self.shuffle = false;
        self
    }
}

/// Index pairs `(2i, 2i + 1)` for a round, plus the unpaired last index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pairing {
    pub pairs: Vec<(usize, usize)>,
    pub bye: Option<usize>,
}

impl Pairing {
    /// Pair a field of `len` contestants in order
    pub fn for_field(len: usize) -> Self {
        let pairs = (0..len / 2).map(|i| (2 * i, 2 * i + 1)).collect();
        let bye = (len % 2 == 1).then(|| len - 1);
        Self { pairs, bye }
    }
}

/// One resolved match
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRecord {
    pub round: RoundNumber,
    pub first: Arc<Contestant>,
    pub second: Arc<Contestant>,
    pub outcome: MatchOutcome,
}

impl MatchRecord {
    fn side(&self, side: Side) -> &Arc<Contestant> {
        match side {
            Side::First => &self.first,
            Side::Second => &self.second,
        }
    }

    #[must_use]
    pub fn winner(&self) -> &Arc<Contestant> {
        self.side(self.outcome.winner)
    }

    #[must_use]
    pub fn loser(&self) -> &Arc<Contestant> {
        self.side(self.outcome.winner.other())
    }

    /// Play-by-play lines for an HP-depletion match (empty for score matches)
    pub fn strike_log(&self) -> Vec<String> {
        let MatchDetail::Hp {
            strikes,
            strike_count,
            ..
        } = &self.outcome.detail
        else {
            return Vec::new();
        };

        let mut lines: Vec<String> = strikes
            .iter()
            .map(|strike| {
                let attacker = self.side(strike.attacker);
                let defender = self.side(strike.attacker.other());
                format!(
                    "{} attacks {} for {} damage. {} has {} HP left.",
                    attacker.name, defender.name, strike.damage, defender.name, strike.defender_hp
                )
            })
            .collect();

        // A cut log keeps the final strike after the opening ones.
        let omitted = strike_count.saturating_sub(strikes.len() as u64);
        if omitted > 0 && !lines.is_empty() {
            lines.insert(lines.len() - 1, format!("... {omitted} more strikes ..."));
        }
        lines.push(format!(
            "{} fainted! {} wins!",
            self.loser().name,
            self.winner().name
        ));
        lines
    }
}

/// Everything that happened in one round
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundRecord {
    pub number: RoundNumber,
    /// Field in pairing order (after any shuffle)
    pub entrants: Vec<Arc<Contestant>>,
    pub matches: Vec<MatchRecord>,
    pub bye: Option<Arc<Contestant>>,
    /// Next round's field: match winners in pairing order, then the bye
    pub advancing: Vec<Arc<Contestant>>,
}

/// Tournament state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TournamentState {
    /// Rounds remain; `round` is the next one to play
    RoundInProgress { round: RoundNumber },
    /// One contestant left
    ChampionDecided { champion: Arc<Contestant> },
}

impl TournamentState {
    #[must_use]
    pub fn is_decided(&self) -> bool {
        matches!(self, Self::ChampionDecided { .. })
    }
}

/// Final result of a completed tournament
#[derive(Debug, Clone)]
pub struct TournamentOutcome {
    pub champion: Arc<Contestant>,
    pub rounds: Vec<RoundRecord>,
}

impl TournamentOutcome {
    #[must_use]
    pub fn round_count(&self) -> usize {
        self.rounds.len()
    }
}
