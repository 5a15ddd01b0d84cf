//! Contestant data models.

use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt, str::FromStr};

use super::errors::{ContestantError, ContestantResult};

/// Contestant ID type
pub type ContestantId = u32;

/// Stats the resolution rules know how to read.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Stat {
    Hp,
    Attack,
    Defense,
    SpecialAttack,
    SpecialDefense,
    Speed,
}

impl Stat {
    /// All known stats, in the order the API lists them.
    pub const ALL: [Stat; 6] = [
        Stat::Hp,
        Stat::Attack,
        Stat::Defense,
        Stat::SpecialAttack,
        Stat::SpecialDefense,
        Stat::Speed,
    ];

    /// Name used by the upstream API for this stat.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hp => "hp",
            Self::Attack => "attack",
            Self::Defense => "defense",
            Self::SpecialAttack => "special-attack",
            Self::SpecialDefense => "special-defense",
            Self::Speed => "speed",
        }
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Stat {
    type Err = ContestantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|stat| stat.as_str() == s)
            .ok_or_else(|| ContestantError::UnknownStat(s.to_string()))
    }
}

/// Named stat values. Unknown stat names are kept verbatim.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Stats(BTreeMap<String, i64>);

impl Stats {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert of a known stat.
    #[must_use]
    pub fn with(mut self, stat: Stat, value: i64) -> Self {
        self.0.insert(stat.as_str().to_string(), value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: i64) {
        self.0.insert(name.into(), value);
    }

    #[must_use]
    pub fn get(&self, stat: Stat) -> Option<i64> {
        self.0.get(stat.as_str()).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.0.iter().map(|(name, value)| (name.as_str(), *value))
    }
}

impl<S: Into<String>> FromIterator<(S, i64)> for Stats {
    fn from_iter<I: IntoIterator<Item = (S, i64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// An immutable tournament entrant.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Contestant {
    pub id: ContestantId,
    pub name: String,
    pub stats: Stats,
    #[serde(default)]
    pub abilities: Vec<String>,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub base_experience: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub weight: Option<u32>,
}

impl Contestant {
    /// Create a contestant with only the required attributes.
    ///
    /// # Errors
    ///
    /// Returns [`ContestantError::InvalidId`] when `id` is zero.
    pub fn new(id: ContestantId, name: impl Into<String>, stats: Stats) -> ContestantResult<Self> {
        let name = name.into();
        if id == 0 {
            return Err(ContestantError::InvalidId(name));
        }

        Ok(Self {
            id,
            name,
            stats,
            abilities: Vec::new(),
            types: Vec::new(),
            image_url: None,
            base_experience: None,
            height: None,
            weight: None,
        })
    }

    #[must_use]
    pub fn with_abilities(mut self, abilities: Vec<String>) -> Self {
        self.abilities = abilities;
        self
    }

    #[must_use]
    pub fn with_types(mut self, types: Vec<String>) -> Self {
        self.types = types;
        self
    }

    #[must_use]
    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    /// Look up a stat, failing instead of defaulting when it's absent.
    pub fn stat(&self, stat: Stat) -> ContestantResult<i64> {
        self.stats
            .get(stat)
            .ok_or_else(|| ContestantError::MissingStat {
                contestant: self.name.clone(),
                stat,
            })
    }

    /// Like [`Contestant::stat`] but also requires the value to be > 0.
    pub fn positive_stat(&self, stat: Stat) -> ContestantResult<i64> {
        let value = self.stat(stat)?;
        if value <= 0 {
            return Err(ContestantError::NonPositiveStat {
                contestant: self.name.clone(),
                stat,
                value,
            });
        }
        Ok(value)
    }

    /// Sum of the given stats.
    pub fn stat_total(&self, stats: &[Stat]) -> ContestantResult<i64> {
        stats.iter().try_fold(0i64, |acc, &stat| {
            acc.checked_add(self.stat(stat)?)
                .ok_or_else(|| ContestantError::StatOverflow {
                    contestant: self.name.clone(),
                })
        })
    }
}

impl fmt::Display for Contestant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (#{})", self.name, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pikachu() -> Contestant {
        let stats = Stats::new()
            .with(Stat::Hp, 35)
            .with(Stat::Attack, 55)
            .with(Stat::Defense, 40)
            .with(Stat::SpecialAttack, 50)
            .with(Stat::SpecialDefense, 50)
            .with(Stat::Speed, 90);
        Contestant::new(25, "pikachu", stats).unwrap()
    }

    #[test]
    fn test_zero_id_rejected() {
        let err = Contestant::new(0, "missingno", Stats::new()).unwrap_err();
        assert_eq!(err, ContestantError::InvalidId("missingno".to_string()));
    }

    #[test]
    fn test_stat_lookup() {
        let pikachu = pikachu();
        assert_eq!(pikachu.stat(Stat::Speed).unwrap(), 90);
        assert_eq!(pikachu.stat_total(&[Stat::Hp, Stat::Attack]).unwrap(), 90);
    }

    #[test]
    fn test_stat_total_out_of_range_is_an_error() {
        let stats = Stats::new()
            .with(Stat::Hp, i64::MAX)
            .with(Stat::Attack, 1);
        let contestant = Contestant::new(143, "snorlax", stats).unwrap();

        assert_eq!(
            contestant.stat_total(&[Stat::Hp, Stat::Attack]),
            Err(ContestantError::StatOverflow {
                contestant: "snorlax".to_string()
            })
        );
        assert_eq!(contestant.stat_total(&[Stat::Hp]).unwrap(), i64::MAX);
    }

    #[test]
    fn test_missing_stat_is_an_error() {
        let contestant =
            Contestant::new(1, "bulbasaur", Stats::new().with(Stat::Hp, 45)).unwrap();
        let err = contestant.stat(Stat::Attack).unwrap_err();
        assert!(matches!(
            err,
            ContestantError::MissingStat {
                stat: Stat::Attack,
                ..
            }
        ));
        assert!(err.to_string().contains("bulbasaur"));
    }

    #[test]
    fn test_positive_stat_rejects_zero() {
        let contestant = Contestant::new(
            2,
            "ivysaur",
            Stats::new().with(Stat::Hp, 60).with(Stat::Attack, 0),
        )
        .unwrap();
        assert!(matches!(
            contestant.positive_stat(Stat::Attack),
            Err(ContestantError::NonPositiveStat { value: 0, .. })
        ));
    }

    #[test]
    fn test_stat_names_round_trip_through_from_str() {
        for stat in Stat::ALL {
            assert_eq!(stat.as_str().parse::<Stat>().unwrap(), stat);
        }
        assert!("luck".parse::<Stat>().is_err());
    }

    #[test]
    fn test_stats_keep_unknown_names() {
        let stats: Stats = [("hp", 10), ("luck", 7)].into_iter().collect();
        assert_eq!(stats.len(), 2);
        assert_eq!(stats.get(Stat::Hp), Some(10));
        assert!(stats.iter().any(|(name, value)| name == "luck" && value == 7));
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(pikachu().with_abilities(vec!["static".into()])).unwrap();
        assert_eq!(json["stats"]["special-attack"], 50);
        assert_eq!(json["abilities"][0], "static");

        let back: Contestant = serde_json::from_value(json).unwrap();
        assert_eq!(back.id, 25);
        assert!(back.types.is_empty());
    }
}
