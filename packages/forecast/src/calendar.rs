//! Calendar-driven multipliers: public-holiday crowding and weekday
//! traffic.

use chrono::{Datelike as _, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::SettingsError;

/// A public holiday falling on the same date every year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedHoliday {
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Month (1-12).
    pub month: u32,
    /// Day of month.
    pub day: u32,
}

impl FixedHoliday {
    fn new(name: &str, month: u32, day: u32) -> Self {
        Self {
            name: name.to_string(),
            month,
            day,
        }
    }
}

/// New Year's Day, Labour Day, National Day, and Christmas Day.
#[must_use]
pub fn default_holidays() -> Vec<FixedHoliday> {
    vec![
        FixedHoliday::new("New Year's Day", 1, 1),
        FixedHoliday::new("Labour Day", 5, 1),
        FixedHoliday::new("National Day", 8, 9),
        FixedHoliday::new("Christmas Day", 12, 25),
    ]
}

/// Crowding and day-of-week parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrowdCalendar {
    /// Fixed-date holidays.
    pub holidays: Vec<FixedHoliday>,
    /// Days either side of a holiday that count as the holiday window.
    pub holiday_window_days: u32,
    /// Added to the epidemic crowd factor on Saturdays and Sundays.
    pub weekend_boost: f64,
    /// Added to the epidemic crowd factor inside a holiday window.
    pub holiday_boost: f64,
    /// Air-quality multiplier on weekdays (traffic).
    pub weekday_air_factor: f64,
    /// Air-quality multiplier at weekends.
    pub weekend_air_factor: f64,
}

impl Default for CrowdCalendar {
    fn default() -> Self {
        Self {
            holidays: default_holidays(),
            holiday_window_days: 3,
            weekend_boost: 0.10,
            holiday_boost: 0.20,
            weekday_air_factor: 1.05,
            weekend_air_factor: 0.95,
        }
    }
}

/// Whether `date` is a Saturday or Sunday.
#[must_use]
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

impl CrowdCalendar {
    /// The holiday whose window contains `date`, if any.
    #[must_use]
    pub fn holiday_near(&self, date: NaiveDate) -> Option<&FixedHoliday> {
        let window = i64::from(self.holiday_window_days);
        self.holidays.iter().find(|h| {
            // Check neighbouring years so windows wrap across 1 January.
            [date.year() - 1, date.year(), date.year() + 1]
                .into_iter()
                .filter_map(|year| NaiveDate::from_ymd_opt(year, h.month, h.day))
                .any(|holiday| (date - holiday).num_days().abs() <= window)
        })
    }

    /// Additive epidemic crowding factor for `date`.
    #[must_use]
    pub fn crowd_factor(&self, date: NaiveDate) -> f64 {
        let mut factor = 0.0;
        if is_weekend(date) {
            factor += self.weekend_boost;
        }
        if self.holiday_near(date).is_some() {
            factor += self.holiday_boost;
        }
        factor
    }

    /// Air-quality day-of-week multiplier for `date`.
    #[must_use]
    pub fn air_day_factor(&self, date: NaiveDate) -> f64 {
        if is_weekend(date) {
            self.weekend_air_factor
        } else {
            self.weekday_air_factor
        }
    }

    /// Checks holiday dates and factor ranges.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] for an impossible holiday date or a
    /// negative or non-finite factor.
    pub fn validate(&self) -> Result<(), SettingsError> {
        for h in &self.holidays {
            // 2024 is a leap year, so 29 February is accepted.
            if NaiveDate::from_ymd_opt(2024, h.month, h.day).is_none() {
                return Err(SettingsError::InvalidHoliday {
                    month: h.month,
                    day: h.day,
                });
            }
        }

        for (name, value) in [
            ("weekend_boost", self.weekend_boost),
            ("holiday_boost", self.holiday_boost),
            ("weekday_air_factor", self.weekday_air_factor),
            ("weekend_air_factor", self.weekend_air_factor),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(SettingsError::InvalidFactor { name, value });
            }
        }

        Ok(())
    }
}
