//! Match resolution rules.
//!
//! Both rules read stats through [`Contestant::stat`], so a record missing a
//! stat the rule needs fails the match instead of scoring as zero.

use enum_dispatch::enum_dispatch;
use std::{fmt, str::FromStr};

use crate::contestant::{Contestant, ContestantResult, Stat};

/// Stats summed by [`ScoreComparison`].
pub const SCORED_STATS: [Stat; 5] = [
    Stat::Attack,
    Stat::Defense,
    Stat::Hp,
    Stat::SpecialAttack,
    Stat::SpecialDefense,
];

/// Most strikes an HP-depletion match keeps in its log.
pub const STRIKE_LOG_LIMIT: usize = 64;

/// Position of a contestant within a pair.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Side {
    /// Earlier-indexed contestant of the pair
    First,
    /// Later-indexed contestant of the pair
    Second,
}

impl Side {
    #[must_use]
    pub fn other(self) -> Self {
        match self {
            Self::First => Self::Second,
            Self::Second => Self::First,
        }
    }
}

/// One attack in an HP-depletion match.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Strike {
    pub attacker: Side,
    pub damage: i64,
    /// Defender's HP after the strike
    pub defender_hp: i64,
}

/// Rule-specific account of how a match was decided.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum MatchDetail {
    Score {
        first: i64,
        second: i64,
        /// Speeds compared when the scores tied
        speed: Option<(i64, i64)>,
    },
    Hp {
        /// Strikes in order, cut to the first `STRIKE_LOG_LIMIT - 1` plus
        /// the final one when the match ran longer
        strikes: Vec<Strike>,
        /// Strikes actually exchanged
        strike_count: u64,
        /// Winner's HP when the match ended
        remaining_hp: i64,
    },
}

/// Result of resolving one pair.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MatchOutcome {
    pub winner: Side,
    pub detail: MatchDetail,
}

/// Decides the winner of a pair.
#[enum_dispatch]
pub trait Resolve {
    /// Resolve a match between the earlier-indexed `first` and `second`
    fn resolve(&self, first: &Contestant, second: &Contestant) -> ContestantResult<MatchOutcome>;

    /// Check a contestant carries every stat this rule reads
    fn validate(&self, contestant: &Contestant) -> ContestantResult<()>;
}

/// Higher stat total wins, then higher speed, then the first of the pair.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ScoreComparison;

impl Resolve for ScoreComparison {
    fn resolve(&self, first: &Contestant, second: &Contestant) -> ContestantResult<MatchOutcome> {
        let first_score = first.stat_total(&SCORED_STATS)?;
        let second_score = second.stat_total(&SCORED_STATS)?;

        if first_score != second_score {
            let winner = if first_score > second_score {
                Side::First
            } else {
                Side::Second
            };
            return Ok(MatchOutcome {
                winner,
                detail: MatchDetail::Score {
                    first: first_score,
                    second: second_score,
                    speed: None,
                },
            });
        }

        let first_speed = first.stat(Stat::Speed)?;
        let second_speed = second.stat(Stat::Speed)?;

        // Equal speed keeps index order.
        let winner = if second_speed > first_speed {
            Side::Second
        } else {
            Side::First
        };

        Ok(MatchOutcome {
            winner,
            detail: MatchDetail::Score {
                first: first_score,
                second: second_score,
                speed: Some((first_speed, second_speed)),
            },
        })
    }

    fn validate(&self, contestant: &Contestant) -> ContestantResult<()> {
        contestant.stat_total(&SCORED_STATS)?;
        contestant.stat(Stat::Speed)?;
        Ok(())
    }
}

/// Strikes of `attack` needed to bring `hp` to zero or below.
fn strikes_to_faint(hp: i64, attack: i64) -> i64 {
    hp / attack + i64::from(hp % attack != 0)
}

/// Alternating attacks until one side's HP reaches zero.
///
/// The first of the pair strikes first in every exchange. Both `hp` and
/// `attack` must be positive, otherwise the exchange could never end.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct HpDepletion;

impl Resolve for HpDepletion {
    fn resolve(&self, first: &Contestant, second: &Contestant) -> ContestantResult<MatchOutcome> {
        let first_attack = first.positive_stat(Stat::Attack)?;
        let second_attack = second.positive_stat(Stat::Attack)?;
        let first_hp = first.positive_stat(Stat::Hp)?;
        let second_hp = second.positive_stat(Stat::Hp)?;

        let first_needs = strikes_to_faint(second_hp, first_attack);
        let second_needs = strikes_to_faint(first_hp, second_attack);

        // Equal strikes-needed goes to First, which strikes first.
        let (winner, winner_needs, strike_count, remaining_hp) = if first_needs <= second_needs {
            (
                Side::First,
                first_needs,
                2 * first_needs.unsigned_abs() - 1,
                first_hp - (first_needs - 1) * second_attack,
            )
        } else {
            (
                Side::Second,
                second_needs,
                2 * second_needs.unsigned_abs(),
                second_hp - second_needs * first_attack,
            )
        };

        // `landed` is how many strikes the attacker has already made.
        let strike = |attacker: Side, landed: i64| {
            let (damage, defender_hp) = match attacker {
                Side::First => (first_attack, second_hp),
                Side::Second => (second_attack, first_hp),
            };
            Strike {
                attacker,
                damage,
                defender_hp: defender_hp - landed * damage - damage,
            }
        };

        let truncated = strike_count > STRIKE_LOG_LIMIT as u64;
        let opening = if truncated {
            STRIKE_LOG_LIMIT - 1
        } else {
            strike_count as usize
        };
        let mut strikes: Vec<Strike> = (0..opening)
            .map(|idx| {
                let attacker = if idx % 2 == 0 { Side::First } else { Side::Second };
                strike(attacker, (idx / 2) as i64)
            })
            .collect();
        if truncated {
            strikes.push(strike(winner, winner_needs - 1));
        }

        Ok(MatchOutcome {
            winner,
            detail: MatchDetail::Hp {
                strikes,
                strike_count,
                remaining_hp,
            },
        })
    }

    fn validate(&self, contestant: &Contestant) -> ContestantResult<()> {
        contestant.positive_stat(Stat::Hp)?;
        contestant.positive_stat(Stat::Attack)?;
        Ok(())
    }
}

/// Pluggable resolution rule.
#[enum_dispatch(Resolve)]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ResolutionRule {
    ScoreComparison,
    HpDepletion,
}

impl Default for ResolutionRule {
    fn default() -> Self {
        Self::HpDepletion(HpDepletion)
    }
}

impl fmt::Display for ResolutionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::ScoreComparison(_) => "score",
            Self::HpDepletion(_) => "hp",
        };
        write!(f, "{repr}")
    }
}

/// Error returned when a rule name isn't recognized.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("unknown resolution rule '{0}' (expected 'score' or 'hp')")]
pub struct UnknownRule(pub String);

impl FromStr for ResolutionRule {
    type Err = UnknownRule;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "score" | "score-comparison" => Ok(ScoreComparison.into()),
            "hp" | "hp-depletion" | "battle" => Ok(HpDepletion.into()),
            other => Err(UnknownRule(other.to_string())),
        }
    }
}
