#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Short-horizon hazard forecasts.
//!
//! An explainable multiplier model, not a fitted one. Each hazard's current
//! baseline is scaled by a weekly trend, an injected [`WeatherModel`], a
//! seasonal offset from the [`SeasonCalendar`], and a hazard-specific
//! growth or crowding term. Every applied factor is reported back as text
//! so the forecast can be explained to the user.
//!
//! [`WeatherModel`]: weather::WeatherModel
//! [`SeasonCalendar`]: season::SeasonCalendar

pub mod calendar;
pub mod model;
pub mod season;
pub mod settings;
pub mod weather;

pub use model::{CurrentConditions, ForecastEngine, Scope};
pub use settings::ForecastSettings;
pub use weather::{SeasonalWeather, SeededWeather, WeatherModel};

use health_risk_hazard_models::HazardKind;
use season::Season;
use thiserror::Error;

/// Errors raised while validating forecast settings.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SettingsError {
    /// A season calendar listed a month outside 1-12.
    #[error("Month {month} is not between 1 and 12")]
    InvalidMonth {
        /// The offending month.
        month: u32,
    },

    /// A month was assigned to more than one season.
    #[error("Month {month} is assigned to more than one season")]
    DuplicateMonth {
        /// The offending month.
        month: u32,
    },

    /// A month was not assigned to any season.
    #[error("Month {month} is not assigned to any season")]
    UnmappedMonth {
        /// The missing month.
        month: u32,
    },

    /// A seasonal offset would zero or invert the projection.
    #[error("Seasonal offset {offset} for {hazard} in {season} must be finite and above -1")]
    InvalidSeasonalOffset {
        /// Which hazard.
        hazard: HazardKind,
        /// Which season.
        season: Season,
        /// The offending offset.
        offset: f64,
    },

    /// A weather range was inverted, negative, or non-finite.
    #[error("Weather range for {hazard} in {season} must satisfy 0 <= min ({min}) <= max ({max})")]
    InvalidWeatherRange {
        /// Which hazard.
        hazard: HazardKind,
        /// Which season.
        season: Season,
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
    },

    /// A holiday does not exist in any year.
    #[error("Holiday {month}/{day} is not a valid calendar date")]
    InvalidHoliday {
        /// Month.
        month: u32,
        /// Day.
        day: u32,
    },

    /// A factor or rate was negative, non-finite, or out of range.
    #[error("Setting '{name}' has invalid value {value}")]
    InvalidFactor {
        /// Dotted setting name.
        name: &'static str,
        /// The offending value.
        value: f64,
    },

    /// The maximum horizon was zero.
    #[error("max_horizon_days must be at least 1")]
    ZeroMaxHorizon,
}
