//! Engine configuration.
//!
//! One TOML document carries every tunable input: the assessment policy,
//! the forecast settings, provider cache timings, and an optional
//! gazetteer override. The shipped document is embedded at compile time
//! from `config/engine.toml` and mirrors the built-in defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use health_risk_forecast::ForecastSettings;
use health_risk_geo::Gazetteer;
use health_risk_hazard::AssessmentPolicy;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

const ENGINE_TOML: &str = include_str!("../config/engine.toml");

/// Cache timings for the provider feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    /// How long a fetched feed stays fresh.
    pub ttl_secs: u64,
    /// Upper bound on a single provider call.
    pub timeout_secs: u64,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            ttl_secs: 300,
            timeout_secs: 10,
        }
    }
}

impl ProviderSettings {
    /// TTL as a [`Duration`].
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }

    /// Timeout as a [`Duration`].
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Everything an [`Engine`](crate::Engine) is built from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Gazetteer file to use instead of the embedded table.
    pub gazetteer: Option<PathBuf>,
    /// Ring policies and classification thresholds.
    pub policy: AssessmentPolicy,
    /// Forecast model settings.
    pub forecast: ForecastSettings,
    /// Provider cache timings.
    pub provider: ProviderSettings,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            gazetteer: None,
            policy: AssessmentPolicy::default(),
            forecast: ForecastSettings::default(),
            provider: ProviderSettings::default(),
        }
    }
}

impl EngineConfig {
    /// Parses the embedded `config/engine.toml`.
    ///
    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed. The file is compiled in,
    /// so this is a development error caught by the tests below.
    #[must_use]
    pub fn embedded() -> Self {
        toml::de::from_str(ENGINE_TOML)
            .unwrap_or_else(|e| panic!("Failed to parse embedded engine config: {e}"))
    }

    /// Parses and validates a configuration document.
    ///
    /// Sections left out fall back to their built-in defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the TOML is malformed or a value fails
    /// validation.
    pub fn from_toml_str(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::de::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read, parsed, or
    /// validated.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        log::info!("Loading engine config from {}", path.display());
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Checks every section.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.policy.validate()?;
        self.forecast.validate()?;
        if self.provider.timeout_secs == 0 {
            return Err(ConfigError::ZeroProviderTimeout);
        }
        Ok(())
    }

    /// The configured gazetteer, or the embedded one.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if an override file is set and cannot be
    /// loaded.
    pub fn gazetteer(&self) -> Result<Gazetteer, ConfigError> {
        match &self.gazetteer {
            Some(path) => {
                log::info!("Loading gazetteer from {}", path.display());
                Ok(Gazetteer::load(path)?)
            }
            None => Ok(Gazetteer::default()),
        }
    }
}
