//! # tek-config
//!
//! Layered configuration loading for the Teknofest toolkit using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`TEKNOFEST_*` prefix, `__` as separator)
//! 2. Project-level `.teknofest/config.toml`
//! 3. User-level `~/.config/teknofest/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `TEKNOFEST_API__BASE_URL` -> `api.base_url`,
//! `TEKNOFEST_ROSTER__DEBOUNCE_MS` -> `roster.debounce_ms`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use tek_config::TekConfig;
//!
//! let config = TekConfig::load_with_dotenv().expect("config");
//! println!("API: {}", config.api.base());
//! ```

mod api;
mod error;
mod general;
mod roster;
mod store;

pub use api::ApiConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;
pub use roster::RosterConfig;
pub use store::StoreConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable prefix for every config key.
pub const ENV_PREFIX: &str = "TEKNOFEST_";

/// Project-local config file, relative to the working directory.
pub const PROJECT_CONFIG_PATH: &str = ".teknofest/config.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TekConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub roster: RosterConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl TekConfig {
    /// Load configuration from all sources (TOML files + environment variables)
    /// and validate it.
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] on malformed sources and
    /// [`ConfigError::InvalidValue`] when a value fails validation.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load `.env` from the working directory, then [`Self::load`].
    ///
    /// # Errors
    ///
    /// See [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or layer providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(PROJECT_CONFIG_PATH);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Check cross-field constraints figment cannot express.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidValue`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.api.validate()?;
        self.roster.validate()?;
        self.general.validate()
    }

    /// Path to the user-global config file.
    #[must_use]
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("teknofest").join("config.toml"))
    }
}
