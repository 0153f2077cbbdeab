//! Configuration loading and typed config structures for the census engine.
//!
//! The canonical configuration lives in `hamlet-config.yaml` at the project
//! root. This module defines strongly-typed structs that mirror the YAML
//! structure, and provides a loader that reads and validates the file.

use std::path::Path;

use hamlet_census::CensusConfig;
use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level engine configuration.
///
/// Mirrors the structure of `hamlet-config.yaml`. All fields have
/// defaults, so a missing file or empty document yields a working
/// configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EngineConfig {
    /// Census collection parameters.
    #[serde(default)]
    pub census: CensusConfig,

    /// Seed population parameters.
    #[serde(default)]
    pub population: PopulationConfig,
}

impl EngineConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_yml::from_str(&contents)?;
        Ok(config)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yml::from_str(yaml)?;
        Ok(config)
    }
}

/// Seed population configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PopulationConfig {
    /// Random seed for reproducible population generation.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Worlds to register at startup, each with its villager count.
    #[serde(default = "default_worlds")]
    pub worlds: Vec<WorldPopulation>,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            worlds: default_worlds(),
        }
    }
}

/// One world's share of the seed population.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WorldPopulation {
    /// The world's name, used verbatim as the `world` label value.
    pub name: String,

    /// Number of villagers to spawn into this world at startup.
    #[serde(default = "default_villagers")]
    pub villagers: u32,
}

// ---------------------------------------------------------------------------
// Default value functions (serde default requires named functions)
// ---------------------------------------------------------------------------

const fn default_seed() -> u64 {
    42
}

fn default_worlds() -> Vec<WorldPopulation> {
    vec![
        WorldPopulation {
            name: String::from("overworld"),
            villagers: 24,
        },
        WorldPopulation {
            name: String::from("outpost"),
            villagers: 8,
        },
    ]
}

const fn default_villagers() -> u32 {
    16
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = EngineConfig::default();
        assert_eq!(config.population.seed, 42);
        assert_eq!(config.population.worlds.len(), 2);
        assert_eq!(config.census.read_timeout_ms, 250);
        assert_eq!(config.census.max_sweeps, 0);
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r"
census:
  read_timeout_ms: 100
  sweep_interval_ms: 5000
  max_sweeps: 12

population:
  seed: 7
  worlds:
    - name: overworld
      villagers: 40
    - name: frontier
      villagers: 3
";

        let config = EngineConfig::parse(yaml).unwrap();

        assert_eq!(config.census.read_timeout_ms, 100);
        assert_eq!(config.census.sweep_interval_ms, 5000);
        assert_eq!(config.census.max_sweeps, 12);
        assert_eq!(config.population.seed, 7);
        assert_eq!(config.population.worlds.len(), 2);
        let frontier = config.population.worlds.get(1).unwrap();
        assert_eq!(frontier.name, "frontier");
        assert_eq!(frontier.villagers, 3);
    }

    #[test]
    fn parse_minimal_yaml() {
        let yaml = "population:\n  seed: 9\n";
        let config = EngineConfig::parse(yaml).unwrap();

        // Seed is overridden
        assert_eq!(config.population.seed, 9);
        // Everything else uses defaults
        assert_eq!(config.population.worlds.len(), 2);
        assert_eq!(config.census.read_timeout_ms, 250);
    }

    #[test]
    fn parse_empty_yaml() {
        assert!(EngineConfig::parse("").is_ok());
    }

    #[test]
    fn load_project_config_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("hamlet-config.yaml");
        if path.exists() {
            let config = EngineConfig::from_file(&path);
            assert!(config.is_ok(), "Failed to load project config: {config:?}");
        }
    }
}
