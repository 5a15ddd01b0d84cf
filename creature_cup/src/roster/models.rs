//! Roster data models.

use rand::Rng;
use std::{collections::HashSet, sync::Arc};

use super::errors::{RosterError, RosterResult};
use crate::{
    contestant::{Contestant, ContestantError, Stat},
    draw::Draw,
};

/// Contestants available for a tournament, in fetch order.
#[derive(Clone, Debug, Default)]
pub struct Roster {
    contestants: Vec<Arc<Contestant>>,
}

impl Roster {
    /// Build a roster, rejecting zero and duplicate IDs
    pub fn new(contestants: Vec<Contestant>) -> RosterResult<Self> {
        let mut seen = HashSet::with_capacity(contestants.len());
        for contestant in &contestants {
            if contestant.id == 0 {
                return Err(ContestantError::InvalidId(contestant.name.clone()).into());
            }
            if !seen.insert(contestant.id) {
                return Err(RosterError::DuplicateId(contestant.id));
            }
        }

        Ok(Self {
            contestants: contestants.into_iter().map(Arc::new).collect(),
        })
    }

    /// Parse a JSON array of contestant records
    pub fn from_json(json: &str) -> RosterResult<Self> {
        Self::new(serde_json::from_str(json)?)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.contestants.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.contestants.is_empty()
    }

    #[must_use]
    pub fn contestants(&self) -> &[Arc<Contestant>] {
        &self.contestants
    }

    /// Sample `count` distinct contestants for a tournament field
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::NotEnoughContestants`] when `count` exceeds the
    /// roster size.
    pub fn select<R: Rng>(
        &self,
        count: usize,
        draw: &mut Draw<R>,
    ) -> RosterResult<Vec<Arc<Contestant>>> {
        draw.sample(&self.contestants, count)
            .ok_or(RosterError::NotEnoughContestants {
                requested: count,
                available: self.contestants.len(),
            })
    }
}

/// Flattened, column-oriented view of a roster.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RosterTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RosterTable {
    /// Flatten contestants into one row each
    ///
    /// Columns are `id`, `name`, `types`, `abilities`, then one column per
    /// known stat. Missing stats render as `-`.
    pub fn from_contestants(contestants: &[Arc<Contestant>]) -> Self {
        let columns = ["id", "name", "types", "abilities"]
            .into_iter()
            .map(str::to_string)
            .chain(Stat::ALL.iter().map(|stat| stat.as_str().to_string()))
            .collect();

        let rows = contestants
            .iter()
            .map(|contestant| {
                let mut row = vec![
                    contestant.id.to_string(),
                    contestant.name.clone(),
                    contestant.types.join("/"),
                    contestant.abilities.join(", "),
                ];
                row.extend(Stat::ALL.iter().map(|&stat| {
                    contestant
                        .stats
                        .get(stat)
                        .map_or_else(|| "-".to_string(), |v| v.to_string())
                }));
                row
            })
            .collect();

        Self { columns, rows }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
