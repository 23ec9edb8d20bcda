//! Application configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use domino_match::{DEFAULT_ACTOR_NAMES, MatchConfig, MatchMode};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

use crate::runner::Pacing;

/// Tunable settings for matches started from the command line.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct AppConfig {
    /// Name shown for the local player.
    #[serde(default = "default_player_name")]
    player_name: String,

    /// Names for automated seats, in seat order.
    #[serde(default = "default_opponent_names")]
    opponent_names: Vec<String>,

    /// Seed for move resolution; unset draws from OS entropy.
    #[serde(default)]
    seed: Option<u64>,

    /// Shortest automated think time in milliseconds.
    #[serde(default = "default_delay_min_ms")]
    automated_delay_min_ms: u64,

    /// Longest automated think time in milliseconds.
    #[serde(default = "default_delay_max_ms")]
    automated_delay_max_ms: u64,

    /// Wall-clock length of one match second, in milliseconds.
    #[serde(default = "default_tick_interval_ms")]
    tick_interval_ms: u64,

    /// Clock budget for one-on-one matches.
    #[serde(default = "default_one_on_one_seconds")]
    one_on_one_seconds: u32,

    /// Clock budget for four-player matches.
    #[serde(default = "default_four_player_seconds")]
    four_player_seconds: u32,
}

fn default_player_name() -> String {
    DEFAULT_ACTOR_NAMES[0].to_string()
}

fn default_opponent_names() -> Vec<String> {
    DEFAULT_ACTOR_NAMES[1..]
        .iter()
        .map(|name| name.to_string())
        .collect()
}

fn default_delay_min_ms() -> u64 {
    2000
}

fn default_delay_max_ms() -> u64 {
    4000
}

fn default_tick_interval_ms() -> u64 {
    1000
}

fn default_one_on_one_seconds() -> u32 {
    MatchMode::OneOnOne.time_budget()
}

fn default_four_player_seconds() -> u32 {
    MatchMode::FourPlayer.time_budget()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            player_name: default_player_name(),
            opponent_names: default_opponent_names(),
            seed: None,
            automated_delay_min_ms: default_delay_min_ms(),
            automated_delay_max_ms: default_delay_max_ms(),
            tick_interval_ms: default_tick_interval_ms(),
            one_on_one_seconds: default_one_on_one_seconds(),
            four_player_seconds: default_four_player_seconds(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(player_name = %config.player_name, "Config loaded successfully");
        Ok(config)
    }

    /// Parses configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        if config.tick_interval_ms == 0 {
            return Err(ConfigError::new("tick_interval_ms must be greater than zero"));
        }
        if config.automated_delay_min_ms > config.automated_delay_max_ms {
            return Err(ConfigError::new(format!(
                "automated_delay_min_ms ({}) exceeds automated_delay_max_ms ({})",
                config.automated_delay_min_ms, config.automated_delay_max_ms
            )));
        }
        Ok(config)
    }

    /// Loads the file when given, defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                debug!("No config file given, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Overrides the configured seed.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        if seed.is_some() {
            self.seed = seed;
        }
        self
    }

    /// Builds the core match configuration for `mode`.
    #[instrument(skip(self))]
    pub fn match_config(&self, mode: MatchMode) -> MatchConfig {
        let time_budget = match mode {
            MatchMode::OneOnOne => self.one_on_one_seconds,
            MatchMode::FourPlayer => self.four_player_seconds,
        };

        let mut names = vec![self.player_name.clone()];
        names.extend(
            self.opponent_names
                .iter()
                .cloned()
                .chain(default_opponent_names())
                .take(mode.actor_count() - 1),
        );

        MatchConfig::new(mode)
            .with_actor_names(names)
            .with_time_budget(time_budget)
            .with_automated_delay_min_ms(self.automated_delay_min_ms)
            .with_automated_delay_max_ms(self.automated_delay_max_ms)
            .with_seed(self.seed)
    }

    /// Timer pacing, sped up by `speed`.
    pub fn pacing(&self, speed: u32) -> Pacing {
        Pacing::new(Duration::from_millis(self.tick_interval_ms), speed)
    }
}

/// Rejected configuration, tagged with where it was raised.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Invalid match config: {} ({}:{})", message, file, line)]
pub struct ConfigError {
    /// What was wrong.
    pub message: String,
    /// Line that raised the error.
    pub line: u32,
    /// File that raised the error.
    pub file: &'static str,
}

impl ConfigError {
    /// Records `message` with the caller's location.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
