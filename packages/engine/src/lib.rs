#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! The health-risk engine facade.
//!
//! [`Engine`] ties the gazetteer, the hazard assessors, and the forecast
//! model together behind the two caller operations: assess a place now,
//! and forecast it some days ahead. Both take an already-fetched
//! [`HazardSnapshot`] and never perform I/O.
//!
//! [`HealthRiskService`] is the async layer on top: it owns one cached
//! provider per feed, fetches them concurrently, and hands the snapshot
//! to the engine.
//!
//! [`HazardSnapshot`]: health_risk_hazard_models::HazardSnapshot

pub mod config;
pub mod engine;
pub mod service;

pub use config::{EngineConfig, ProviderSettings};
pub use engine::Engine;
pub use service::HealthRiskService;

use health_risk_forecast::SettingsError;
use health_risk_geo::GazetteerError;
use health_risk_hazard::PolicyError;
use thiserror::Error;

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("Config I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The TOML document could not be parsed.
    #[error("Config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// The assessment policy is inconsistent.
    #[error("Invalid assessment policy: {0}")]
    Policy(#[from] PolicyError),

    /// The forecast settings are inconsistent.
    #[error("Invalid forecast settings: {0}")]
    Settings(#[from] SettingsError),

    /// The gazetteer override could not be loaded.
    #[error("Invalid gazetteer: {0}")]
    Gazetteer(#[from] GazetteerError),

    /// Provider calls would time out immediately.
    #[error("provider.timeout_secs must be at least 1")]
    ZeroProviderTimeout,
}

/// Errors surfaced to engine callers.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The forecast horizon is outside `1..=max`.
    #[error("Forecast horizon must be between 1 and {max} days, got {days}")]
    InvalidHorizon {
        /// The requested horizon.
        days: i64,
        /// The configured maximum.
        max: u32,
    },

    /// The engine could not be configured.
    #[error(transparent)]
    Config(#[from] ConfigError),
}
