//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use crate::api::ApiConfig;
use crate::nutrition::{NutritionConfig, NutritionError};
use crate::storage::{expand_home, StorageConfig};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub nutrition: NutritionConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("fuelplan").join("config.toml")),
            Some(PathBuf::from("/etc/fuelplan/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Check values that serde defaults cannot guard
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.nutrition.validate()?;
        Ok(())
    }

    /// Apply environment variable overrides to an existing config
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        // Storage overrides
        if let Some(path) = lookup("FUELPLAN_LOG_PATH") {
            self.storage.log_path = expand_home(Path::new(&path));
        }
        if let Some(backend) = lookup("FUELPLAN_STORAGE_BACKEND") {
            match backend.parse() {
                Ok(b) => self.storage.backend = b,
                Err(e) => tracing::warn!("Ignoring FUELPLAN_STORAGE_BACKEND: {}", e),
            }
        }

        // API overrides
        if let Some(host) = lookup("FUELPLAN_API_HOST") {
            self.api.host = host;
        }
        if let Some(port) = lookup("FUELPLAN_API_PORT") {
            if let Ok(p) = port.parse() {
                self.api.port = p;
            }
        }

        // Nutrition overrides
        if let Some(protein) = lookup("FUELPLAN_PROTEIN_PER_KG") {
            if let Ok(p) = protein.parse() {
                self.nutrition.protein_per_kg = p;
            }
        }

        // Logging overrides
        if let Some(level) = lookup("FUELPLAN_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("FUELPLAN_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] NutritionError),
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Fuelplan Configuration
#
# Environment variables override these settings:
# - FUELPLAN_LOG_PATH
# - FUELPLAN_STORAGE_BACKEND
# - FUELPLAN_API_HOST
# - FUELPLAN_API_PORT
# - FUELPLAN_PROTEIN_PER_KG
# - FUELPLAN_LOG_LEVEL
# - FUELPLAN_LOG_FORMAT

[nutrition]
# Protein grams per kilogram of body weight
protein_per_kg = 2.2

# Energy in one kilogram of body fat, used for deadline goals
kcal_per_kg_body_fat = 7700

# Fat derivation: share of calories...
[nutrition.fat_policy]
method = "calorie_fraction"
fraction = 0.25
# ...or grams per kilogram:
# method = "per_kg"
# grams_per_kg = 0.8

# kcal added to TDEE for each fixed goal
[nutrition.calorie_offsets]
fat_loss = -500
maintenance = 0
muscle_gain = 300

[storage]
# Weight log backend: csv or memory
backend = "csv"

# Append-only weight log (Date,Weight). Defaults to the platform data
# directory, e.g. ~/.local/share/fuelplan/weight_log.csv on Linux.
# A leading ~ is expanded to the home directory.
# log_path = "/path/to/weight_log.csv"

[api]
# API server host
host = "0.0.0.0"

# API server port
port = 8086

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
