//! Configuration loading and typed config structures for the Forage simulation.
//!
//! The canonical configuration lives in `forage-config.yaml` at the project
//! root. Every field has a default, so an empty or partial file is valid;
//! [`SimulationConfig::validate`] rejects combinations the engine cannot
//! run.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

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

    /// An environment override could not be parsed.
    #[error("invalid value for {var}: {value:?}")]
    EnvOverride {
        /// The environment variable.
        var: &'static str,
        /// The raw value that failed to parse.
        value: String,
    },

    /// A value is outside the range the engine supports.
    #[error("invalid config value for {field}: {reason}")]
    Invalid {
        /// Dotted path of the offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level simulation configuration.
///
/// Mirrors the structure of `forage-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Grid size and seed.
    #[serde(default)]
    pub world: WorldConfig,

    /// Agent fleet.
    #[serde(default)]
    pub population: PopulationConfig,

    /// Food budget and generation schedule.
    #[serde(default)]
    pub food: FoodConfig,

    /// Run boundaries and mode.
    #[serde(default)]
    pub simulation: SimulationBoundsConfig,

    /// HTTP polling wrapper.
    #[serde(default)]
    pub server: HttpConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SimulationConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override YAML values:
    /// - `FORAGE_SEED` overrides `world.seed`
    /// - `FORAGE_HOST` overrides `server.host`
    /// - `FORAGE_PORT` overrides `server.port`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::EnvOverride`] if an override does not parse.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::parse_yaml(&contents)?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::EnvOverride`] if an override does not parse.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config = Self::parse_yaml(yaml)?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    fn parse_yaml(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yml::from_str(yaml)?)
    }

    /// Override fields with `FORAGE_*` environment variables when set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EnvOverride`] if a numeric variable does not
    /// parse.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|var| std::env::var(var).ok())
    }

    /// Apply `FORAGE_*` overrides read through `lookup`.
    ///
    /// `lookup` maps a variable name to its value, or `None` when unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EnvOverride`] if a numeric value does not
    /// parse.
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(val) = lookup("FORAGE_SEED") {
            self.world.seed = parse_override("FORAGE_SEED", &val)?;
        }
        if let Some(val) = lookup("FORAGE_HOST") {
            self.server.host = val;
        }
        if let Some(val) = lookup("FORAGE_PORT") {
            self.server.port = parse_override("FORAGE_PORT", &val)?;
        }
        Ok(())
    }

    /// Check that the configuration describes a runnable simulation.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.world.width == 0 || self.world.height == 0 {
            return Err(ConfigError::Invalid {
                field: "world",
                reason: format!(
                    "grid must be at least 1x1, got {}x{}",
                    self.world.width, self.world.height
                ),
            });
        }
        if self.food.interval == 0 {
            return Err(ConfigError::Invalid {
                field: "food.interval",
                reason: "must be at least 1".to_owned(),
            });
        }
        if self.food.batch_min > self.food.batch_max {
            return Err(ConfigError::Invalid {
                field: "food.batch_min",
                reason: format!(
                    "batch_min {} exceeds batch_max {}",
                    self.food.batch_min, self.food.batch_max
                ),
            });
        }
        if self.food.placement_attempts == 0 {
            return Err(ConfigError::Invalid {
                field: "food.placement_attempts",
                reason: "must be at least 1".to_owned(),
            });
        }
        Ok(())
    }
}

/// World-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldConfig {
    /// Number of columns.
    #[serde(default = "default_width")]
    pub width: u32,

    /// Number of rows.
    #[serde(default = "default_height")]
    pub height: u32,

    /// Random seed for reproducibility.
    #[serde(default = "default_seed")]
    pub seed: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            seed: default_seed(),
        }
    }
}

/// Population configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulationConfig {
    /// Number of agents to spawn at simulation start.
    #[serde(default = "default_agents")]
    pub agents: u32,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            agents: default_agents(),
        }
    }
}

/// Food configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodConfig {
    /// Total food units generated over the whole run.
    #[serde(default = "default_food_budget")]
    pub budget: u32,

    /// Generate a batch every N ticks.
    #[serde(default = "default_food_interval")]
    pub interval: u64,

    /// Smallest batch size.
    #[serde(default = "default_batch_min")]
    pub batch_min: u32,

    /// Largest batch size.
    #[serde(default = "default_batch_max")]
    pub batch_max: u32,

    /// Random cells tried per unit before the unit is skipped.
    #[serde(default = "default_placement_attempts")]
    pub placement_attempts: u32,
}

impl Default for FoodConfig {
    fn default() -> Self {
        Self {
            budget: default_food_budget(),
            interval: default_food_interval(),
            batch_min: default_batch_min(),
            batch_max: default_batch_max(),
            placement_attempts: default_placement_attempts(),
        }
    }
}

/// How the engine binary drives the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunMode {
    /// Serve the polling API; each request advances one tick.
    #[default]
    Serve,
    /// Run to the end without a server and report.
    Headless,
}

/// Simulation boundary parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationBoundsConfig {
    /// Maximum number of ticks before the run stops.
    #[serde(default = "default_max_steps")]
    pub max_steps: u64,

    /// Serve or run headless.
    #[serde(default)]
    pub mode: RunMode,

    /// Where a headless run writes its per-tick history as JSON.
    #[serde(default)]
    pub history_path: Option<PathBuf>,
}

impl Default for SimulationBoundsConfig {
    fn default() -> Self {
        Self {
            max_steps: default_max_steps(),
            mode: RunMode::default(),
            history_path: None,
        }
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Interface to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions (for serde)
// ---------------------------------------------------------------------------

const fn default_width() -> u32 {
    20
}

const fn default_height() -> u32 {
    20
}

const fn default_seed() -> u64 {
    12345
}

const fn default_agents() -> u32 {
    5
}

const fn default_food_budget() -> u32 {
    47
}

const fn default_food_interval() -> u64 {
    5
}

const fn default_batch_min() -> u32 {
    2
}

const fn default_batch_max() -> u32 {
    5
}

const fn default_placement_attempts() -> u32 {
    1000
}

const fn default_max_steps() -> u64 {
    1500
}

fn default_host() -> String {
    "0.0.0.0".to_owned()
}

const fn default_port() -> u16 {
    8585
}

fn default_log_level() -> String {
    "info".to_owned()
}

fn parse_override<T: core::str::FromStr>(var: &'static str, val: &str) -> Result<T, ConfigError> {
    val.trim().parse().map_err(|_| ConfigError::EnvOverride {
        var,
        value: val.to_owned(),
    })
}
