//! # vigil-config
//!
//! Layered configuration loading for Vigil using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`VIGIL_*` prefix, `__` as separator)
//! 2. Project-level `.vigil/config.toml`
//! 3. User-level `~/.config/vigil/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `VIGIL_TOPICS__CLUSTERS` -> `topics.clusters`,
//! `VIGIL_TRENDS__CASE_THRESHOLD` -> `trends.case_threshold`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use vigil_config::VigilConfig;
//!
//! let config = VigilConfig::load_with_dotenv().expect("config");
//! config.validate().expect("valid config");
//!
//! println!("clusters: {}", config.topics.clusters);
//! ```

mod error;
mod general;
mod sources;
mod topics;
mod trends;

pub use error::ConfigError;
pub use general::GeneralConfig;
pub use sources::SourcesConfig;
pub use topics::TopicsConfig;
pub use trends::TrendsConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct VigilConfig {
    #[serde(default)]
    pub topics: TopicsConfig,
    #[serde(default)]
    pub trends: TrendsConfig,
    #[serde(default)]
    pub sources: SourcesConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl VigilConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if a source cannot be parsed or a value
    /// has the wrong type.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".vigil/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("VIGIL_").split("__"))
    }

    /// Reject values that would make an analysis run meaningless.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.topics.validate()?;
        self.general.validate()
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("vigil").join("config.toml"))
    }
}
