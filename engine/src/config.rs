//! Config file schema and loader, feeding `bootstrap` and the tournament
//! driver.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::round::BlindLevel;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GameConfig {
    pub starting_chips: i64,
    pub num_decks: usize,
    pub max_table_size: usize,
    pub visual: bool,
    pub delay: f64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BotConfig {
    pub name: String,
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BlindLevelConfig {
    pub small: u32,
    pub big: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TournamentConfig {
    pub advance_per_table: usize,
    pub hands_per_match: usize,
    pub blind_step_per_round: usize,
    pub blind_step_per_tier: usize,
    pub blinds_schedule: Vec<BlindLevelConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub game: GameConfig,
    pub bots: Vec<BotConfig>,
    pub tournament: TournamentConfig,
}

impl Config {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// The internal blind schedule, each level carrying the ante field the
    /// wire schema omits (defaulted to zero).
    pub fn blinds_schedule(&self) -> Vec<BlindLevel> {
        self.tournament
            .blinds_schedule
            .iter()
            .map(|level| BlindLevel {
                small: level.small,
                big: level.big,
                ante: 0,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
    {
        "game": { "starting_chips": 1000, "num_decks": 1, "max_table_size": 6, "visual": false, "delay": 0.0 },
        "bots": [ { "name": "alice", "host": "127.0.0.1", "port": 5001 } ],
        "tournament": {
            "advance_per_table": 2,
            "hands_per_match": 10,
            "blind_step_per_round": 1,
            "blind_step_per_tier": 2,
            "blinds_schedule": [ { "small": 5, "big": 10 }, { "small": 10, "big": 20 } ]
        }
    }
    "#;

    #[test]
    fn parses_the_pinned_schema() {
        let config: Config = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(config.game.starting_chips, 1000);
        assert_eq!(config.bots[0].name, "alice");
        assert_eq!(config.tournament.blinds_schedule.len(), 2);
    }

    #[test]
    fn blinds_schedule_defaults_ante_to_zero() {
        let config: Config = serde_json::from_str(SAMPLE).unwrap();
        let schedule = config.blinds_schedule();
        assert_eq!(schedule[0].ante, 0);
        assert_eq!(schedule[1].big, 20);
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let result = Config::from_path("/nonexistent/path/config.json");
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }
}
