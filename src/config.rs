use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::ai::{Agent, GreedyAgent, RandomAgent};
use crate::error::ConfigError;
use crate::game::Player;

/// Longest allowed pause before a bot move.
pub const MAX_THINK_DELAY_MS: u64 = 10_000;

/// Which opponent to play against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BotKind {
    Greedy,
    Random,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BotConfig {
    pub kind: BotKind,
    pub think_delay_ms: u64,
    /// Seed for the random bot; unseeded when absent
    pub seed: Option<u64>,
}

impl Default for BotConfig {
    fn default() -> Self {
        BotConfig {
            kind: BotKind::Greedy,
            think_delay_ms: 1000,
            seed: None,
        }
    }
}

impl BotConfig {
    pub fn think_delay(&self) -> Duration {
        Duration::from_millis(self.think_delay_ms)
    }

    /// Build the configured opponent
    pub fn build(&self) -> Box<dyn Agent> {
        match (self.kind, self.seed) {
            (BotKind::Greedy, _) => Box::new(GreedyAgent::new()),
            (BotKind::Random, Some(seed)) => Box::new(RandomAgent::with_seed(seed)),
            (BotKind::Random, None) => Box::new(RandomAgent::new()),
        }
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub human: Player,
    /// Where the board is written after every action
    pub snapshot_path: Option<PathBuf>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            human: Player::Black,
            snapshot_path: Some(PathBuf::from("othello.txt")),
        }
    }
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub bot: BotConfig,
    pub session: SessionConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bot.think_delay_ms > MAX_THINK_DELAY_MS {
            return Err(ConfigError::Validation(format!(
                "bot.think_delay_ms must be <= {MAX_THINK_DELAY_MS}"
            )));
        }
        if let Some(path) = &self.session.snapshot_path {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::Validation(
                    "session.snapshot_path must not be empty".into(),
                ));
            }
        }

        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).expect("default config serializes")
    }
}
