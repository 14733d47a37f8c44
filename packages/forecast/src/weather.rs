//! Weather multipliers.
//!
//! The forecast never draws randomness on its own. A [`WeatherModel`] is
//! passed in by the caller: [`SeasonalWeather`] is deterministic and is the
//! default, [`SeededWeather`] draws from a seeded PRNG so a fixed seed
//! always reproduces the same forecast.

use chrono::{Datelike as _, NaiveDate};
use health_risk_hazard_models::HazardKind;
use rand::{Rng as _, SeedableRng as _};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::SettingsError;
use crate::season::Season;

/// Closed multiplier interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherRange {
    /// Lower bound.
    pub min: f64,
    /// Upper bound.
    pub max: f64,
}

impl WeatherRange {
    const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Centre of the interval.
    #[must_use]
    pub fn midpoint(&self) -> f64 {
        f64::midpoint(self.min, self.max)
    }

    /// Clamps `value` into the interval.
    #[must_use]
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }
}

/// One range per season.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeasonRanges {
    /// Hot-season range.
    pub hot: WeatherRange,
    /// Wet-season range.
    pub wet: WeatherRange,
    /// Cool-season range.
    pub cool: WeatherRange,
}

impl SeasonRanges {
    /// Range for one season.
    #[must_use]
    pub const fn for_season(&self, season: Season) -> WeatherRange {
        match season {
            Season::Hot => self.hot,
            Season::Wet => self.wet,
            Season::Cool => self.cool,
        }
    }
}

/// Season-conditioned weather ranges for every hazard.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherRanges {
    /// Rain and humidity drive mosquito breeding.
    pub dengue: SeasonRanges,
    /// Wind and haze drive PSI.
    pub air_quality: SeasonRanges,
    /// Cold, wet spells drive respiratory admissions.
    pub epidemic: SeasonRanges,
}

impl Default for WeatherRanges {
    fn default() -> Self {
        Self {
            dengue: SeasonRanges {
                hot: WeatherRange::new(1.00, 1.15),
                wet: WeatherRange::new(1.10, 1.30),
                cool: WeatherRange::new(0.85, 1.00),
            },
            air_quality: SeasonRanges {
                hot: WeatherRange::new(1.05, 1.25),
                wet: WeatherRange::new(0.85, 1.00),
                cool: WeatherRange::new(0.95, 1.10),
            },
            epidemic: SeasonRanges {
                hot: WeatherRange::new(0.95, 1.05),
                wet: WeatherRange::new(0.95, 1.10),
                cool: WeatherRange::new(1.00, 1.15),
            },
        }
    }
}

impl WeatherRanges {
    /// Range for one hazard in one season.
    #[must_use]
    pub const fn range(&self, kind: HazardKind, season: Season) -> WeatherRange {
        match kind {
            HazardKind::Dengue => self.dengue.for_season(season),
            HazardKind::AirQuality => self.air_quality.for_season(season),
            HazardKind::Epidemic => self.epidemic.for_season(season),
        }
    }

    /// Checks every range is finite, non-negative, and ordered.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidWeatherRange`] for the first bad
    /// range.
    pub fn validate(&self) -> Result<(), SettingsError> {
        for kind in HazardKind::all() {
            for season in [Season::Hot, Season::Wet, Season::Cool] {
                let r = self.range(*kind, season);
                let ok = r.min.is_finite() && r.max.is_finite() && r.min >= 0.0 && r.min <= r.max;
                if !ok {
                    return Err(SettingsError::InvalidWeatherRange {
                        hazard: *kind,
                        season,
                        min: r.min,
                        max: r.max,
                    });
                }
            }
        }
        Ok(())
    }
}

/// Supplies the weather multiplier for one hazard on one date.
///
/// Implementations must return a value inside `range`.
pub trait WeatherModel: Send + Sync {
    /// Short name used in factor descriptions.
    fn name(&self) -> &'static str;

    /// Multiplier for `kind` on `date`.
    fn multiplier(&self, kind: HazardKind, date: NaiveDate, range: WeatherRange) -> f64;
}

/// Deterministic model: always the midpoint of the seasonal range.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeasonalWeather;

impl WeatherModel for SeasonalWeather {
    fn name(&self) -> &'static str {
        "seasonal midpoint"
    }

    fn multiplier(&self, _kind: HazardKind, _date: NaiveDate, range: WeatherRange) -> f64 {
        range.midpoint()
    }
}

/// Seeded stochastic model.
///
/// Each (seed, date, hazard) triple gets its own `ChaCha8` stream, so the
/// draw for one hazard does not depend on which others were forecast.
#[derive(Debug, Clone, Copy)]
pub struct SeededWeather {
    seed: u64,
}

impl SeededWeather {
    /// Creates a model from a user seed.
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self { seed }
    }

    fn stream_seed(&self, kind: HazardKind, date: NaiveDate) -> u64 {
        let day = u64::from(date.num_days_from_ce().unsigned_abs());
        let hazard = kind as u64 + 1;
        self.seed
            ^ day.wrapping_mul(0x9E37_79B9_7F4A_7C15)
            ^ hazard.wrapping_mul(0xC2B2_AE3D_27D4_EB4F)
    }
}

impl WeatherModel for SeededWeather {
    fn name(&self) -> &'static str {
        "seeded draw"
    }

    fn multiplier(&self, kind: HazardKind, date: NaiveDate, range: WeatherRange) -> f64 {
        if range.min >= range.max {
            return range.min;
        }
        let mut rng = ChaCha8Rng::seed_from_u64(self.stream_seed(kind, date));
        range.clamp(rng.gen_range(range.min..=range.max))
    }
}
