//! Client configuration management.
//!
//! Consolidates all environment variable reads and provides validated configuration.

use crate::api_client::DEFAULT_API_URL;
use creature_cup::{Draw, ResolutionRule, TournamentConfig};
use std::path::PathBuf;
use std::time::Duration;

/// Upper bound on the number of creatures fetched in range mode
pub const MAX_FETCH_LIMIT: usize = 200;

/// How the HTTP provider chooses creature IDs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    /// IDs `1..=limit` in order
    Range,
    /// Distinct random IDs in `1..=max_id`
    RandomIds,
}

/// Complete client configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Creature endpoint base URL
    pub api_url: String,
    /// Creatures fetched in range mode
    pub fetch_limit: usize,
    /// Contestants entering the tournament
    pub contestants: usize,
    /// Match resolution rule
    pub rule: ResolutionRule,
    /// Fixed seed for reproducible draws
    pub seed: Option<u64>,
    /// Pause between HTTP requests
    pub fetch_delay: Duration,
    /// Highest creature ID considered in random mode
    pub max_id: u32,
    pub fetch_mode: FetchMode,
    /// Reshuffle the field before each round
    pub shuffle: bool,
    /// Load the roster from a JSON file instead of HTTP
    pub roster_file: Option<PathBuf>,
    /// Run the terminal dashboard instead of console output
    pub tui: bool,
    /// Print the strike log of HP-depletion matches
    pub verbose: bool,
}

/// Values given on the command line; these win over the environment
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub api_url: Option<String>,
    pub fetch_limit: Option<usize>,
    pub contestants: Option<usize>,
    pub rule: Option<ResolutionRule>,
    pub seed: Option<u64>,
    pub fetch_delay_ms: Option<u64>,
    pub max_id: Option<u32>,
    pub random_ids: bool,
    pub no_shuffle: bool,
    pub roster_file: Option<PathBuf>,
    pub tui: bool,
    pub verbose: bool,
}

impl ClientConfig {
    /// Load configuration from environment variables
    ///
    /// # Arguments
    ///
    /// * `overrides` - Values from CLI args
    ///
    /// # Errors
    ///
    /// Returns error if a variable is set but cannot be parsed
    pub fn from_env(overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        Self::from_lookup(overrides, |key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source
    pub fn from_lookup<F>(overrides: ConfigOverrides, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let rule = match overrides.rule {
            Some(rule) => rule,
            None => match lookup("CC_RULE") {
                Some(value) => value.parse().map_err(|e| ConfigError::Invalid {
                    var: "CC_RULE".to_string(),
                    reason: format!("{e}"),
                })?,
                None => ResolutionRule::default(),
            },
        };

        let seed = match overrides.seed {
            Some(seed) => Some(seed),
            None => lookup("CC_SEED")
                .map(|value| {
                    value.parse().map_err(|_| ConfigError::Invalid {
                        var: "CC_SEED".to_string(),
                        reason: format!("Not an unsigned integer: {value}"),
                    })
                })
                .transpose()?,
        };

        let fetch_delay_ms = overrides
            .fetch_delay_ms
            .unwrap_or_else(|| parse_or(&lookup, "CC_FETCH_DELAY_MS", 100));

        let fetch_mode = if overrides.random_ids {
            FetchMode::RandomIds
        } else {
            FetchMode::Range
        };

        Ok(ClientConfig {
            api_url: overrides
                .api_url
                .or_else(|| lookup("CC_API_URL"))
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            fetch_limit: overrides
                .fetch_limit
                .unwrap_or_else(|| parse_or(&lookup, "CC_FETCH_LIMIT", 100)),
            contestants: overrides
                .contestants
                .unwrap_or_else(|| parse_or(&lookup, "CC_CONTESTANTS", 16)),
            rule,
            seed,
            fetch_delay: Duration::from_millis(fetch_delay_ms),
            max_id: overrides
                .max_id
                .unwrap_or_else(|| parse_or(&lookup, "CC_MAX_ID", 898)),
            fetch_mode,
            shuffle: !overrides.no_shuffle && parse_or(&lookup, "CC_SHUFFLE", true),
            roster_file: overrides.roster_file,
            tui: overrides.tui,
            verbose: overrides.verbose,
        })
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.contestants == 0 {
            return Err(ConfigError::Invalid {
                var: "CC_CONTESTANTS".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        if self.roster_file.is_some() {
            return Ok(());
        }

        if self.api_url.trim().is_empty() {
            return Err(ConfigError::MissingRequired {
                var: "CC_API_URL".to_string(),
                hint: format!("Use {DEFAULT_API_URL} or pass --roster-file"),
            });
        }

        match self.fetch_mode {
            FetchMode::Range => {
                if !(1..=MAX_FETCH_LIMIT).contains(&self.fetch_limit) {
                    return Err(ConfigError::Invalid {
                        var: "CC_FETCH_LIMIT".to_string(),
                        reason: format!("Must be between 1 and {MAX_FETCH_LIMIT}"),
                    });
                }

                if self.contestants > self.fetch_limit {
                    return Err(ConfigError::Invalid {
                        var: "CC_CONTESTANTS".to_string(),
                        reason: format!(
                            "Cannot exceed the fetch limit ({})",
                            self.fetch_limit
                        ),
                    });
                }
            }
            FetchMode::RandomIds => {
                if self.max_id == 0 {
                    return Err(ConfigError::Invalid {
                        var: "CC_MAX_ID".to_string(),
                        reason: "Must be greater than 0".to_string(),
                    });
                }

                if self.contestants > self.max_id as usize {
                    return Err(ConfigError::Invalid {
                        var: "CC_CONTESTANTS".to_string(),
                        reason: format!("Cannot exceed the highest ID ({})", self.max_id),
                    });
                }
            }
        }

        Ok(())
    }

    #[must_use]
    pub fn tournament_config(&self) -> TournamentConfig {
        let config = TournamentConfig::new(self.rule);
        if self.shuffle {
            config
        } else {
            config.without_shuffle()
        }
    }

    /// Randomness source: seeded when a seed is configured
    #[must_use]
    pub fn draw(&self) -> Draw {
        match self.seed {
            Some(seed) => Draw::seeded(seed),
            None => Draw::from_entropy(),
        }
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {var}\nHint: {hint}")]
    MissingRequired { var: String, hint: String },

    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

/// Helper to parse a variable with default fallback
fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> T
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
