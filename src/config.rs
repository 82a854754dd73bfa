//! TOML configuration loading and validation.
//!
//! ```toml
//! [pricer]
//! target = 200
//!
//! [logging]
//! level = "info"
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::{ConfigError, Quantity};

/// Top-level configuration for one pricing run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    pub pricer: PricerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PricerConfig {
    /// Shares every valuation must fill
    pub target: Quantity,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Default `env_logger` filter; `RUST_LOG` takes precedence
    #[serde(default = "default_level")]
    pub level: String,
}

fn default_level() -> String {
    "warn".into()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

impl Config {
    /// Build a config for `target` with default logging.
    pub fn with_target(target: Quantity) -> Result<Self, ConfigError> {
        let config = Config {
            pricer: PricerConfig { target },
            logging: LoggingConfig::default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Load config from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        contents.parse()
    }

    /// Validate config invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pricer.target == 0 {
            return Err(ConfigError::Invalid("target must be > 0".into()));
        }
        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::Invalid("logging level must not be empty".into()));
        }
        Ok(())
    }

    /// Shares every valuation must fill.
    #[inline]
    pub fn target(&self) -> Quantity {
        self.pricer.target
    }
}

impl std::str::FromStr for Config {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let config: Config = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }
}
