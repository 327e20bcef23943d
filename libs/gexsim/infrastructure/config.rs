use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

use crate::domain::{MarketStatus, Timeframe};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load config file: {0}")]
    FileError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Environment variable that overrides `simulation.seed`
pub const SEED_ENV_VAR: &str = "GEX_SEED";

/// Dashboard configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Optional log file; the TUI only logs when this is set
    #[serde(default)]
    pub log_file: Option<String>,

    /// How often the headless feed logs a status summary (seconds)
    #[serde(default = "default_heartbeat_interval")]
    pub heartbeat_interval_secs: u64,

    #[serde(default)]
    pub simulation: SimulationConfig,
}

/// Parameters of the market-data random walk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Period of the tick timer in milliseconds
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    #[serde(default)]
    pub initial_timeframe: Timeframe,

    #[serde(default = "default_initial_spot_price")]
    pub initial_spot_price: f64,

    #[serde(default = "default_initial_flow_dominance")]
    pub initial_flow_dominance: u8,

    #[serde(default)]
    pub status: MarketStatus,

    /// Re-derive the regime from flow dominance on every tick.
    /// When false the initial regime is held for the life of the feed.
    #[serde(default = "default_true")]
    pub derive_regime: bool,

    /// Fixed RNG seed for reproducible runs
    #[serde(default)]
    pub seed: Option<u64>,

    #[serde(default = "default_price_floor")]
    pub price_floor: f64,

    #[serde(default = "default_price_ceiling")]
    pub price_ceiling: f64,

    /// Full width of the per-tick spot move (move is +/- half of this)
    #[serde(default = "default_price_step")]
    pub price_step: f64,

    /// Full width of the per-tick gamma move per level
    #[serde(default = "default_gamma_step")]
    pub gamma_step: f64,

    /// Full width of the per-tick flow move before flooring to an integer
    #[serde(default = "default_flow_step")]
    pub flow_step: f64,

    /// Minimum absolute gamma at generation time
    #[serde(default = "default_gamma_floor_offset")]
    pub gamma_floor_offset: f64,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_heartbeat_interval() -> u64 {
    30
}

fn default_tick_interval_ms() -> u64 {
    500
}

fn default_initial_spot_price() -> f64 {
    75.0
}

fn default_initial_flow_dominance() -> u8 {
    75
}

fn default_true() -> bool {
    true
}

fn default_price_floor() -> f64 {
    0.0
}

fn default_price_ceiling() -> f64 {
    100.0
}

fn default_price_step() -> f64 {
    1.6
}

fn default_gamma_step() -> f64 {
    0.5
}

fn default_flow_step() -> f64 {
    5.0
}

fn default_gamma_floor_offset() -> f64 {
    0.2
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
            initial_timeframe: Timeframe::default(),
            initial_spot_price: default_initial_spot_price(),
            initial_flow_dominance: default_initial_flow_dominance(),
            status: MarketStatus::default(),
            derive_regime: true,
            seed: None,
            price_floor: default_price_floor(),
            price_ceiling: default_price_ceiling(),
            price_step: default_price_step(),
            gamma_step: default_gamma_step(),
            flow_step: default_flow_step(),
            gamma_floor_offset: default_gamma_floor_offset(),
        }
    }
}

impl SimulationConfig {
    pub fn tick_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.tick_interval_ms)
    }

    /// Seeded config, mainly for tests and replays
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    fn validate(&self) -> Result<()> {
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ValidationError(
                "tick_interval_ms must be greater than 0".to_string(),
            ));
        }

        if !(self.price_floor < self.price_ceiling) {
            return Err(ConfigError::ValidationError(
                "price_floor must be below price_ceiling".to_string(),
            ));
        }

        if !self.price_floor.is_finite() || !self.price_ceiling.is_finite() {
            return Err(ConfigError::ValidationError(
                "price_floor and price_ceiling must be finite".to_string(),
            ));
        }

        if !self.initial_spot_price.is_finite()
            || self.initial_spot_price < self.price_floor || self.initial_spot_price > self.price_ceiling {
            return Err(ConfigError::ValidationError(format!(
                "initial_spot_price must be between {} and {}",
                self.price_floor, self.price_ceiling
            )));
        }

        if self.initial_flow_dominance > 100 {
            return Err(ConfigError::ValidationError(
                "initial_flow_dominance must be between 0 and 100".to_string(),
            ));
        }

        for (name, value) in [
            ("price_step", self.price_step),
            ("gamma_step", self.gamma_step),
            ("flow_step", self.flow_step),
            ("gamma_floor_offset", self.gamma_floor_offset),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::ValidationError(format!(
                    "{} must be a non-negative number",
                    name
                )));
            }
        }

        Ok(())
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_file: None,
            heartbeat_interval_secs: default_heartbeat_interval(),
            simulation: SimulationConfig::default(),
        }
    }
}

impl DashboardConfig {
    /// Load configuration from YAML file
    pub fn load(config_path: impl AsRef<Path>) -> Result<Self> {
        let yaml_content = std::fs::read_to_string(config_path)?;
        let mut config = Self::from_yaml_str(&yaml_content)?;

        // Override seed from environment if present
        config.apply_seed_override(std::env::var(SEED_ENV_VAR).ok().as_deref());

        config.validate()?;
        Ok(config)
    }

    /// Replace `simulation.seed` with `raw` when it parses as a `u64`
    fn apply_seed_override(&mut self, raw: Option<&str>) {
        let Some(raw) = raw else {
            return;
        };
        match raw.trim().parse::<u64>() {
            Ok(seed) => {
                info!("Overriding simulation seed from {}", SEED_ENV_VAR);
                self.simulation.seed = Some(seed);
            }
            Err(_) => warn!("Ignoring non-numeric {}: {}", SEED_ENV_VAR, raw),
        }
    }

    /// Read the file for logging setup only.
    ///
    /// Binaries call this before tracing exists so that the warnings from
    /// [`DashboardConfig::load_or_default`] are not lost. Falls back to
    /// defaults on any error, without logging or validating.
    pub fn peek(config_path: impl AsRef<Path>) -> Self {
        std::fs::read_to_string(config_path)
            .ok()
            .and_then(|yaml| Self::from_yaml_str(&yaml).ok())
            .unwrap_or_default()
    }

    /// Parse configuration from YAML text without touching the environment
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: DashboardConfig = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Load the file if it exists, otherwise fall back to defaults
    pub fn load_or_default(config_path: impl AsRef<Path>) -> Result<Self> {
        let path = config_path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            warn!("Config file {} not found, using defaults", path.display());
            let config = Self::default();
            config.validate()?;
            Ok(config)
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        let valid_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_levels.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "log_level must be one of: {}",
                valid_levels.join(", ")
            )));
        }

        if self.heartbeat_interval_secs == 0 {
            return Err(ConfigError::ValidationError(
                "heartbeat_interval_secs must be greater than 0".to_string(),
            ));
        }

        self.simulation.validate()
    }

    /// Log configuration summary
    pub fn log(&self) {
        let sim = &self.simulation;
        info!("Configuration loaded:");
        info!("  Log level: {}", self.log_level);
        info!("  Tick interval: {} ms", sim.tick_interval_ms);
        info!("  Initial timeframe: {}", sim.initial_timeframe);
        info!("  Initial spot: {:.2} (bounds {}..{})", sim.initial_spot_price, sim.price_floor, sim.price_ceiling);
        info!("  Initial flow dominance: {}%", sim.initial_flow_dominance);
        info!("  Regime: {}", if sim.derive_regime { "derived from flow" } else { "static" });
        match sim.seed {
            Some(seed) => info!("  Seed: {}", seed),
            None => info!("  Seed: random"),
        }
    }
}
