//! Forecast tuning knobs, deserialised from the `[forecast]` table of the
//! engine config.

use health_risk_hazard_models::HazardKind;
use serde::{Deserialize, Serialize};

use crate::SettingsError;
use crate::calendar::CrowdCalendar;
use crate::season::{HazardSeasonality, SeasonCalendar};
use crate::weather::WeatherRanges;

/// Per-hazard starting confidence and its decay with horizon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfidenceSettings {
    /// Base confidence for dengue (0-1).
    pub dengue: f64,
    /// Base confidence for air quality (0-1).
    pub air_quality: f64,
    /// Base confidence for hospital load (0-1).
    pub epidemic: f64,
    /// Subtracted per day beyond the first.
    pub daily_decay: f64,
    /// Base confidence never decays below this.
    pub floor: f64,
}

impl Default for ConfidenceSettings {
    fn default() -> Self {
        Self {
            dengue: 0.85,
            air_quality: 0.80,
            epidemic: 0.75,
            daily_decay: 0.02,
            floor: 0.30,
        }
    }
}

impl ConfidenceSettings {
    /// Base confidence for `kind` after decaying over `horizon_days`.
    #[must_use]
    pub fn base(&self, kind: HazardKind, horizon_days: u32) -> f64 {
        let start = match kind {
            HazardKind::Dengue => self.dengue,
            HazardKind::AirQuality => self.air_quality,
            HazardKind::Epidemic => self.epidemic,
        };
        let decayed = start - self.daily_decay * f64::from(horizon_days.saturating_sub(1));
        decayed.max(self.floor)
    }
}

/// Dengue growth tiers keyed on average cluster size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrowthTiers {
    /// Average cases per cluster above which growth is rapid.
    pub rapid_avg_cases: f64,
    /// Cluster count above which growth is rapid regardless of size.
    pub rapid_cluster_count: usize,
    /// Weekly growth when rapid.
    pub rapid_rate: f64,
    /// Average cases per cluster above which growth is accelerating.
    pub accelerating_avg_cases: f64,
    /// Weekly growth when accelerating.
    pub accelerating_rate: f64,
    /// Weekly growth otherwise.
    pub steady_rate: f64,
    /// Growth stops compounding after this many weeks.
    pub max_weeks: f64,
}

impl Default for GrowthTiers {
    fn default() -> Self {
        Self {
            rapid_avg_cases: 20.0,
            rapid_cluster_count: 50,
            rapid_rate: 0.25,
            accelerating_avg_cases: 10.0,
            accelerating_rate: 0.12,
            steady_rate: 0.05,
            max_weeks: 4.0,
        }
    }
}

/// Relative change inside which a forecast is labelled stable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendBands {
    /// Dead-band for dengue and hospital load.
    pub cases: f64,
    /// Dead-band for PSI.
    pub air_quality: f64,
}

impl Default for TrendBands {
    fn default() -> Self {
        Self {
            cases: 0.10,
            air_quality: 0.15,
        }
    }
}

impl TrendBands {
    /// Dead-band for one hazard.
    #[must_use]
    pub const fn for_hazard(&self, kind: HazardKind) -> f64 {
        match kind {
            HazardKind::AirQuality => self.air_quality,
            HazardKind::Dengue | HazardKind::Epidemic => self.cases,
        }
    }
}

/// Everything the forecast engine can be tuned with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastSettings {
    /// Longest accepted horizon, in days.
    pub max_horizon_days: u32,
    /// Month → season mapping.
    pub seasons: SeasonCalendar,
    /// Per-hazard seasonal offsets.
    pub seasonality: HazardSeasonality,
    /// Per-hazard, per-season weather ranges.
    pub weather: WeatherRanges,
    /// Holidays and day-of-week factors.
    pub crowd: CrowdCalendar,
    /// Dengue growth tiers.
    pub growth: GrowthTiers,
    /// Trend dead-bands.
    pub trend_bands: TrendBands,
    /// Base confidences.
    pub confidence: ConfidenceSettings,
}

impl Default for ForecastSettings {
    fn default() -> Self {
        Self {
            max_horizon_days: 30,
            seasons: SeasonCalendar::default(),
            seasonality: HazardSeasonality::default(),
            weather: WeatherRanges::default(),
            crowd: CrowdCalendar::default(),
            growth: GrowthTiers::default(),
            trend_bands: TrendBands::default(),
            confidence: ConfidenceSettings::default(),
        }
    }
}

impl ForecastSettings {
    /// Checks the settings that deserialisation alone cannot.
    ///
    /// # Errors
    ///
    /// Returns the first [`SettingsError`] found.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.max_horizon_days == 0 {
            return Err(SettingsError::ZeroMaxHorizon);
        }
        self.seasonality.validate()?;
        self.weather.validate()?;
        self.crowd.validate()?;

        let c = &self.confidence;
        for (name, value) in [
            ("confidence.dengue", c.dengue),
            ("confidence.air_quality", c.air_quality),
            ("confidence.epidemic", c.epidemic),
            ("confidence.floor", c.floor),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(SettingsError::InvalidFactor { name, value });
            }
        }

        let g = &self.growth;
        for (name, value) in [
            ("confidence.daily_decay", c.daily_decay),
            ("growth.rapid_rate", g.rapid_rate),
            ("growth.accelerating_rate", g.accelerating_rate),
            ("growth.steady_rate", g.steady_rate),
            ("growth.max_weeks", g.max_weeks),
            ("trend_bands.cases", self.trend_bands.cases),
            ("trend_bands.air_quality", self.trend_bands.air_quality),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(SettingsError::InvalidFactor { name, value });
            }
        }

        Ok(())
    }
}
