//! # Configuration
//!
//! TOML configuration for the game binary, with validated values and
//! sensible defaults. The configuration is organized into sections:
//!
//! - [`GameConfig`] - gameplay settings (title)
//! - [`StorageConfig`] - where seed catalogs and save files live
//! - [`LoggingConfig`] - log level and optional log file
//! - [`RngConfig`] - optional fixed seed for reproducible runs
//!
//! ```toml
//! [game]
//! title = "MindMaze"
//!
//! [storage]
//! data_dir = "./data"
//! save_file = "game_save.json"
//!
//! [logging]
//! level = "info"
//! file = "mindmaze.log"
//!
//! [rng]
//! # seed = 42
//! ```
//!
//! A fixed seed reproduces an entire run (world layout, monster draws,
//! loot). Leave it unset for a fresh labyrinth every time.

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    pub title: String,
}

/// A fixed seed reproduces an entire run (world layout, monster draws,
/// loot). Unset means entropy.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RngConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub data_dir: String,
    pub save_file: String,
}

impl StorageConfig {
    /// Seed catalogs live under `<data_dir>/seeds/`.
    pub fn seeds_dir(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join("seeds")
    }

    pub fn save_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join(&self.save_file)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub game: GameConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
    #[serde(default)]
    pub rng: RngConfig,
}

impl Config {
    /// Load and validate configuration from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path, e))?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse config file {}: {}", path, e))?;
        config.validate()?;
        Ok(config)
    }

    /// Create a default configuration file.
    pub fn create_default(path: &str) -> Result<()> {
        let config = Config::default();
        let content = toml::to_string_pretty(&config)
            .map_err(|e| anyhow!("Failed to serialize default config: {}", e))?;
        fs::write(path, content)
            .map_err(|e| anyhow!("Failed to write config file {}: {}", path, e))?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
        if !LEVELS.contains(&self.logging.level.as_str()) {
            return Err(anyhow!(
                "Invalid logging level '{}': expected one of {:?}",
                self.logging.level,
                LEVELS
            ));
        }
        if self.storage.data_dir.trim().is_empty() {
            return Err(anyhow!("storage.data_dir must not be empty"));
        }
        if self.storage.save_file.trim().is_empty() {
            return Err(anyhow!("storage.save_file must not be empty"));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            game: GameConfig {
                title: "MindMaze".to_string(),
            },
            storage: StorageConfig {
                data_dir: "./data".to_string(),
                save_file: "game_save.json".to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file: Some("mindmaze.log".to_string()),
            },
            rng: RngConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.storage.save_path().to_str().unwrap().replace('\\', "/"), "./data/game_save.json");
        assert!(config.storage.seeds_dir().ends_with("seeds"));
    }

    #[test]
    fn round_trips_through_toml() {
        let config = Config::default();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(parsed.game.title, "MindMaze");
        assert_eq!(parsed.storage.data_dir, "./data");
        assert!(parsed.rng.seed.is_none());
    }

    #[test]
    fn rejects_unknown_log_level() {
        let mut config = Config::default();
        config.logging.level = "loud".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn rng_section_is_optional_in_toml() {
        let parsed: Config = toml::from_str(
            r#"
            [game]
            title = "MindMaze"

            [storage]
            data_dir = "./data"
            save_file = "game_save.json"

            [logging]
            level = "debug"
            "#,
        )
        .unwrap();
        assert!(parsed.rng.seed.is_none());
        assert!(parsed.logging.file.is_none());

        let seeded: Config = toml::from_str(
            r#"
            [game]
            title = "MindMaze"

            [storage]
            data_dir = "./data"
            save_file = "game_save.json"

            [logging]
            level = "info"

            [rng]
            seed = 42
            "#,
        )
        .unwrap();
        assert_eq!(seeded.rng.seed, Some(42));
    }
}
