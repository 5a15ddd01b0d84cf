//! Roster providers.

use async_trait::async_trait;

use super::{errors::RosterResult, models::Roster};
use crate::contestant::Contestant;

/// Source of contestant records.
///
/// Providers may skip entries they fail to retrieve. Records come back in
/// fetch order.
#[async_trait]
pub trait RosterProvider: Send + Sync {
    /// Fetch up to `limit` contestants
    async fn fetch(&self, limit: usize) -> RosterResult<Roster>;
}

/// In-memory provider, also used for offline runs from a roster file.
#[derive(Clone, Debug, Default)]
pub struct StaticRoster {
    contestants: Vec<Contestant>,
}

impl StaticRoster {
    pub fn new(contestants: Vec<Contestant>) -> Self {
        Self { contestants }
    }

    /// Load a JSON array of contestant records
    pub fn from_json(json: &str) -> RosterResult<Self> {
        let roster = Roster::from_json(json)?;
        Ok(Self {
            contestants: roster
                .contestants()
                .iter()
                .map(|c| c.as_ref().clone())
                .collect(),
        })
    }
}

#[async_trait]
impl RosterProvider for StaticRoster {
    async fn fetch(&self, limit: usize) -> RosterResult<Roster> {
        Roster::new(self.contestants.iter().take(limit).cloned().collect())
    }
}
