//! Three-season calendar and per-hazard seasonal offsets.

use chrono::{Datelike as _, NaiveDate};
use health_risk_hazard_models::HazardKind;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator as _;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

use crate::SettingsError;

/// Climatic season.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Season {
    /// Inter-monsoon heat.
    Hot,
    /// Southwest monsoon.
    Wet,
    /// Northeast monsoon.
    Cool,
}

impl Season {
    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Hot => "Hot season",
            Self::Wet => "Wet season",
            Self::Cool => "Cool season",
        }
    }
}

/// Months (1-12) assigned to each season, as written in config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct SeasonMonths {
    hot: Vec<u32>,
    wet: Vec<u32>,
    cool: Vec<u32>,
}

/// Month → season lookup. Every month maps to exactly one season.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SeasonMonths", into = "SeasonMonths")]
pub struct SeasonCalendar {
    months: [Season; 12],
}

impl Default for SeasonCalendar {
    /// Hot Mar-May, Wet Jun-Oct, Cool Nov-Feb.
    fn default() -> Self {
        use Season::{Cool, Hot, Wet};
        Self {
            months: [
                Cool, Cool, Hot, Hot, Hot, Wet, Wet, Wet, Wet, Wet, Cool, Cool,
            ],
        }
    }
}

impl SeasonCalendar {
    /// Season for a calendar date.
    #[must_use]
    pub fn season_for(&self, date: NaiveDate) -> Season {
        self.months[date.month0() as usize]
    }
}

impl TryFrom<SeasonMonths> for SeasonCalendar {
    type Error = SettingsError;

    fn try_from(value: SeasonMonths) -> Result<Self, Self::Error> {
        let mut months: [Option<Season>; 12] = [None; 12];

        for (season, list) in [
            (Season::Hot, &value.hot),
            (Season::Wet, &value.wet),
            (Season::Cool, &value.cool),
        ] {
            for &month in list {
                let slot = month
                    .checked_sub(1)
                    .and_then(|i| months.get_mut(i as usize))
                    .ok_or(SettingsError::InvalidMonth { month })?;
                if slot.is_some() {
                    return Err(SettingsError::DuplicateMonth { month });
                }
                *slot = Some(season);
            }
        }

        let mut resolved = [Season::Hot; 12];
        for (i, slot) in months.iter().enumerate() {
            resolved[i] = slot.ok_or(SettingsError::UnmappedMonth {
                month: u32::try_from(i + 1).unwrap_or(u32::MAX),
            })?;
        }

        Ok(Self { months: resolved })
    }
}

impl From<SeasonCalendar> for SeasonMonths {
    fn from(calendar: SeasonCalendar) -> Self {
        let collect = |season: Season| {
            (1..=12u32)
                .zip(calendar.months)
                .filter(|(_, s)| *s == season)
                .map(|(m, _)| m)
                .collect()
        };
        Self {
            hot: collect(Season::Hot),
            wet: collect(Season::Wet),
            cool: collect(Season::Cool),
        }
    }
}

/// Fractional adjustment per season (`0.3` = +30%).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeasonalOffsets {
    /// Hot-season offset.
    pub hot: f64,
    /// Wet-season offset.
    pub wet: f64,
    /// Cool-season offset.
    pub cool: f64,
}

impl SeasonalOffsets {
    /// Offset for one season.
    #[must_use]
    pub const fn for_season(&self, season: Season) -> f64 {
        match season {
            Season::Hot => self.hot,
            Season::Wet => self.wet,
            Season::Cool => self.cool,
        }
    }
}

/// Seasonal offsets for every hazard.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HazardSeasonality {
    /// Dengue peaks in the wet season.
    pub dengue: SeasonalOffsets,
    /// Haze worsens in the hot season.
    pub air_quality: SeasonalOffsets,
    /// Respiratory load peaks in the cool season.
    pub epidemic: SeasonalOffsets,
}

impl Default for HazardSeasonality {
    fn default() -> Self {
        Self {
            dengue: SeasonalOffsets {
                hot: 0.15,
                wet: 0.30,
                cool: -0.10,
            },
            air_quality: SeasonalOffsets {
                hot: 0.20,
                wet: 0.0,
                cool: -0.10,
            },
            epidemic: SeasonalOffsets {
                hot: 0.0,
                wet: 0.05,
                cool: 0.25,
            },
        }
    }
}

impl HazardSeasonality {
    /// Offset for one hazard in one season.
    #[must_use]
    pub const fn offset(&self, kind: HazardKind, season: Season) -> f64 {
        match kind {
            HazardKind::Dengue => self.dengue.for_season(season),
            HazardKind::AirQuality => self.air_quality.for_season(season),
            HazardKind::Epidemic => self.epidemic.for_season(season),
        }
    }

    /// Checks that every offset is finite and above -1.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidSeasonalOffset`] for the first bad
    /// offset.
    pub fn validate(&self) -> Result<(), SettingsError> {
        for kind in HazardKind::all() {
            for season in Season::iter() {
                let offset = self.offset(*kind, season);
                if !offset.is_finite() || offset <= -1.0 {
                    return Err(SettingsError::InvalidSeasonalOffset {
                        hazard: *kind,
                        season,
                        offset,
                    });
                }
            }
        }
        Ok(())
    }
}
