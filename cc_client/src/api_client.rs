//! HTTP roster provider backed by PokeAPI.

use anyhow::{Context, Result};
use async_trait::async_trait;
use creature_cup::{
    Contestant, ContestantError, Draw, Roster, RosterError, RosterProvider, Stats,
    roster::RosterResult,
};
use log::{debug, info, warn};
use rand::Rng;
use serde::Deserialize;
use std::time::Duration;

/// Default PokeAPI creature endpoint
pub const DEFAULT_API_URL: &str = "https://pokeapi.co/api/v2/pokemon";

/// Random-id draws give up after this many attempts per wanted creature
const ATTEMPTS_PER_CREATURE: usize = 4;

#[derive(Debug, Deserialize)]
struct NamedResource {
    name: String,
}

#[derive(Debug, Deserialize)]
struct AbilitySlot {
    ability: NamedResource,
}

#[derive(Debug, Deserialize)]
struct TypeSlot {
    #[serde(rename = "type")]
    kind: NamedResource,
}

#[derive(Debug, Deserialize)]
struct StatEntry {
    base_stat: i64,
    stat: NamedResource,
}

#[derive(Debug, Default, Deserialize)]
struct Sprites {
    front_default: Option<String>,
}

/// Subset of the PokeAPI creature payload the tournament uses
#[derive(Debug, Deserialize)]
pub struct CreatureResponse {
    id: u32,
    name: String,
    base_experience: Option<u32>,
    height: Option<u32>,
    weight: Option<u32>,
    #[serde(default)]
    abilities: Vec<AbilitySlot>,
    #[serde(default)]
    types: Vec<TypeSlot>,
    #[serde(default)]
    stats: Vec<StatEntry>,
    #[serde(default)]
    sprites: Sprites,
}

impl CreatureResponse {
    /// Convert the payload into a contestant record
    pub fn into_contestant(self) -> Result<Contestant, ContestantError> {
        let stats: Stats = self
            .stats
            .into_iter()
            .map(|entry| (entry.stat.name, entry.base_stat))
            .collect();

        let mut contestant = Contestant::new(self.id, self.name, stats)?
            .with_abilities(self.abilities.into_iter().map(|a| a.ability.name).collect())
            .with_types(self.types.into_iter().map(|t| t.kind.name).collect());
        contestant.image_url = self.sprites.front_default;
        contestant.base_experience = self.base_experience;
        contestant.height = self.height;
        contestant.weight = self.weight;

        Ok(contestant)
    }
}

/// Parse a raw PokeAPI creature payload
pub fn parse_contestant(json: &str) -> Result<Contestant> {
    let response: CreatureResponse =
        serde_json::from_str(json).context("Failed to parse creature payload")?;
    Ok(response.into_contestant()?)
}

/// API client for fetching creatures
pub struct PokeApiClient {
    base_url: String,
    client: reqwest::Client,
    delay: Duration,
}

impl PokeApiClient {
    /// Create a new API client
    pub fn new(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
            delay: Duration::ZERO,
        }
    }

    /// Pause between consecutive requests
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch a single creature by ID
    pub async fn fetch_contestant(&self, id: u32) -> Result<Contestant> {
        let response = self
            .client
            .get(format!("{}/{}", self.base_url, id))
            .send()
            .await
            .with_context(|| format!("Failed to send request for creature {id}"))?;

        if !response.status().is_success() {
            anyhow::bail!("Request for creature {} failed: {}", id, response.status());
        }

        let payload: CreatureResponse = response
            .json()
            .await
            .with_context(|| format!("Failed to parse creature {id}"))?;

        Ok(payload.into_contestant()?)
    }

    /// Fetch creatures with IDs `1..=limit`, skipping any that fail
    pub async fn fetch_range(&self, limit: usize) -> Result<Roster> {
        let ids = (1..=limit).map(|id| id as u32);
        let contestants = self.fetch_each(ids, limit).await;
        info!("Fetched {} of {} creatures", contestants.len(), limit);
        Ok(Roster::new(contestants)?)
    }

    /// Fetch `count` creatures with distinct random IDs in `1..=max_id`
    ///
    /// Failed IDs are skipped and replaced by new draws, up to a fixed number
    /// of attempts.
    pub async fn fetch_random<R: Rng>(
        &self,
        count: usize,
        max_id: u32,
        draw: &mut Draw<R>,
    ) -> Result<Roster> {
        let candidates = draw.random_ids(count * ATTEMPTS_PER_CREATURE, max_id);
        let attempts = candidates.len();
        let contestants = self.fetch_each(candidates, count).await;

        if contestants.len() < count {
            anyhow::bail!(
                "Only fetched {} of {} creatures after {} attempts",
                contestants.len(),
                count,
                attempts
            );
        }

        Ok(Roster::new(contestants)?)
    }

    async fn fetch_each(
        &self,
        ids: impl IntoIterator<Item = u32>,
        wanted: usize,
    ) -> Vec<Contestant> {
        let mut contestants = Vec::with_capacity(wanted);

        for (attempt, id) in ids.into_iter().enumerate() {
            if contestants.len() >= wanted {
                break;
            }
            if attempt > 0 && !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }

            match self.fetch_contestant(id).await {
                Ok(contestant) => {
                    debug!("Added {} to the roster", contestant.name);
                    contestants.push(contestant);
                }
                Err(e) => warn!("Skipping creature {}: {:#}", id, e),
            }
        }

        contestants
    }
}

#[async_trait]
impl RosterProvider for PokeApiClient {
    async fn fetch(&self, limit: usize) -> RosterResult<Roster> {
        self.fetch_range(limit)
            .await
            .map_err(|e| RosterError::Provider(format!("{e:#}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use creature_cup::Stat;

    const BULBASAUR: &str = r#"{
        "id": 1,
        "name": "bulbasaur",
        "base_experience": 64,
        "height": 7,
        "weight": 69,
        "abilities": [
            {"ability": {"name": "overgrow", "url": "https://pokeapi.co/api/v2/ability/65/"}, "is_hidden": false, "slot": 1},
            {"ability": {"name": "chlorophyll", "url": "https://pokeapi.co/api/v2/ability/34/"}, "is_hidden": true, "slot": 3}
        ],
        "types": [
            {"slot": 1, "type": {"name": "grass", "url": "https://pokeapi.co/api/v2/type/12/"}},
            {"slot": 2, "type": {"name": "poison", "url": "https://pokeapi.co/api/v2/type/4/"}}
        ],
        "stats": [
            {"base_stat": 45, "effort": 0, "stat": {"name": "hp", "url": ""}},
            {"base_stat": 49, "effort": 0, "stat": {"name": "attack", "url": ""}},
            {"base_stat": 49, "effort": 0, "stat": {"name": "defense", "url": ""}},
            {"base_stat": 65, "effort": 1, "stat": {"name": "special-attack", "url": ""}},
            {"base_stat": 65, "effort": 0, "stat": {"name": "special-defense", "url": ""}},
            {"base_stat": 45, "effort": 0, "stat": {"name": "speed", "url": ""}}
        ],
        "sprites": {"front_default": "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/1.png"}
    }"#;

    #[test]
    fn test_parse_full_payload() {
        let contestant = parse_contestant(BULBASAUR).unwrap();

        assert_eq!(contestant.id, 1);
        assert_eq!(contestant.name, "bulbasaur");
        assert_eq!(contestant.abilities, vec!["overgrow", "chlorophyll"]);
        assert_eq!(contestant.types, vec!["grass", "poison"]);
        assert_eq!(contestant.stat(Stat::SpecialAttack).unwrap(), 65);
        assert_eq!(contestant.stats.len(), 6);
        assert_eq!(contestant.base_experience, Some(64));
        assert!(contestant.image_url.unwrap().ends_with("/1.png"));
    }

    #[test]
    fn test_parse_sparse_payload() {
        let json = r#"{"id": 10001, "name": "deoxys-attack", "base_experience": null,
                       "height": 17, "weight": 608, "sprites": {"front_default": null}}"#;
        let contestant = parse_contestant(json).unwrap();

        assert!(contestant.stats.is_empty());
        assert!(contestant.image_url.is_none());
        assert!(contestant.base_experience.is_none());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_contestant("{\"name\": \"no-id\"}").is_err());
        assert!(parse_contestant(r#"{"id": 0, "name": "zero"}"#).is_err());
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = PokeApiClient::new("https://pokeapi.co/api/v2/pokemon/".to_string());
        assert_eq!(client.base_url(), DEFAULT_API_URL);
    }
}
