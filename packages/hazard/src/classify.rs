//! Threshold tables shared by the current-state and forecast paths.
//!
//! Every numeric cut-off used to turn a measurement into a [`RiskLevel`]
//! lives here so the assessors and the forecast engine classify against
//! the same numbers.

use health_risk_hazard_models::{AirQualityBand, OverallRisk, RiskLevel};
use serde::{Deserialize, Serialize};

use crate::PolicyError;

/// Confidence for an assessment scored against nearby observations.
pub const HYPERLOCAL_CONFIDENCE: u8 = 90;

/// Confidence for an island-wide fallback assessment.
pub const REGION_WIDE_CONFIDENCE: u8 = 70;

/// Confidence for a default substituted for missing provider data.
pub const UNAVAILABLE_CONFIDENCE: u8 = 25;

/// Average severity at or above which the fused risk is `High`.
pub const OVERALL_HIGH_AVERAGE: f64 = 3.5;

/// Average severity at or above which the fused risk is `Medium`.
pub const OVERALL_MEDIUM_AVERAGE: f64 = 2.5;

/// Upper PSI bound (inclusive) for each band below `Hazardous`.
pub const PSI_GOOD_MAX: f64 = 50.0;
/// Upper PSI bound for `Moderate`.
pub const PSI_MODERATE_MAX: f64 = 100.0;
/// Upper PSI bound for `Unhealthy`.
pub const PSI_UNHEALTHY_MAX: f64 = 200.0;
/// Upper PSI bound for `VeryUnhealthy`.
pub const PSI_VERY_UNHEALTHY_MAX: f64 = 300.0;

/// PSI above which N95 guidance is attached.
pub const PSI_N95_ADVISORY: f64 = 100.0;

/// PSI above which stay-indoors guidance is attached.
pub const PSI_INDOORS_ADVISORY: f64 = 200.0;

/// Cut-offs for the distance-weighted dengue score.
///
/// Applied in order, most severe first:
/// - any cluster in ring 0, or score > `very_high_score` ⇒ `VeryHigh`
/// - more than `high_ring_count` clusters in ring 1, or score >
///   `high_score` ⇒ `High`
/// - at least one cluster in ring 2, or score > `medium_score` ⇒ `Medium`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreThresholds {
    /// Score above which the level is `VeryHigh`.
    pub very_high_score: f64,
    /// Score above which the level is at least `High`.
    pub high_score: f64,
    /// Score above which the level is at least `Medium`.
    pub medium_score: f64,
    /// Ring-1 occupancy above which the level is at least `High`.
    pub high_ring_count: usize,
}

impl Default for ScoreThresholds {
    fn default() -> Self {
        Self {
            very_high_score: 100.0,
            high_score: 50.0,
            medium_score: 20.0,
            high_ring_count: 2,
        }
    }
}

impl ScoreThresholds {
    /// Classifies a weighted score together with cumulative ring counts.
    ///
    /// Rules that reference a ring the policy does not have are skipped.
    #[must_use]
    pub fn classify(&self, weighted_score: f64, ring_counts: &[usize]) -> RiskLevel {
        let within = |ring: usize| ring_counts.get(ring).copied().unwrap_or(0);

        if within(0) > 0 || weighted_score > self.very_high_score {
            RiskLevel::VeryHigh
        } else if within(1) > self.high_ring_count || weighted_score > self.high_score {
            RiskLevel::High
        } else if within(2) >= 1 || weighted_score > self.medium_score {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    /// Checks that the score cut-offs descend.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError::UnorderedThresholds`] if they do not.
    pub fn validate(&self) -> Result<(), PolicyError> {
        if self.very_high_score >= self.high_score && self.high_score >= self.medium_score {
            Ok(())
        } else {
            Err(PolicyError::UnorderedThresholds {
                name: "dengue_score",
            })
        }
    }
}

/// Three strict lower bounds mapping a quantity onto the four levels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelThresholds {
    /// Values above this are `VeryHigh`.
    pub very_high: f64,
    /// Values above this are at least `High`.
    pub high: f64,
    /// Values above this are at least `Medium`.
    pub medium: f64,
}

/// Default bands for weighted nearby hospital admissions.
pub const ADMISSION_THRESHOLDS: LevelThresholds = LevelThresholds {
    very_high: 50.0,
    high: 30.0,
    medium: 15.0,
};

/// Default bands for the island-wide dengue case total.
pub const REGION_DENGUE_THRESHOLDS: LevelThresholds = LevelThresholds {
    very_high: 1000.0,
    high: 500.0,
    medium: 100.0,
};

/// Default bands for a forecast of dengue cases near a location.
pub const HYPERLOCAL_DENGUE_CASE_THRESHOLDS: LevelThresholds = LevelThresholds {
    very_high: 100.0,
    high: 50.0,
    medium: 20.0,
};

impl LevelThresholds {
    /// Maps `value` onto a level. Non-finite values classify as `Low`.
    #[must_use]
    pub fn classify(&self, value: f64) -> RiskLevel {
        if !value.is_finite() {
            return RiskLevel::Low;
        }

        if value > self.very_high {
            RiskLevel::VeryHigh
        } else if value > self.high {
            RiskLevel::High
        } else if value > self.medium {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    /// Checks that the bounds descend.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError::UnorderedThresholds`] if they do not.
    pub fn validate(&self, name: &'static str) -> Result<(), PolicyError> {
        if self.very_high >= self.high && self.high >= self.medium {
            Ok(())
        } else {
            Err(PolicyError::UnorderedThresholds { name })
        }
    }
}

/// Classifies a PSI reading into its health band.
///
/// `NaN` falls through to `Good`; callers reject non-finite readings
/// before they get here.
#[must_use]
pub fn psi_band(psi: f64) -> AirQualityBand {
    if psi.is_nan() || psi <= PSI_GOOD_MAX {
        AirQualityBand::Good
    } else if psi <= PSI_MODERATE_MAX {
        AirQualityBand::Moderate
    } else if psi <= PSI_UNHEALTHY_MAX {
        AirQualityBand::Unhealthy
    } else if psi <= PSI_VERY_UNHEALTHY_MAX {
        AirQualityBand::VeryUnhealthy
    } else {
        AirQualityBand::Hazardous
    }
}

/// Risk level for a PSI band.
#[must_use]
pub const fn band_level(band: AirQualityBand) -> RiskLevel {
    match band {
        AirQualityBand::Good => RiskLevel::Low,
        AirQualityBand::Moderate => RiskLevel::Medium,
        AirQualityBand::Unhealthy => RiskLevel::High,
        AirQualityBand::VeryUnhealthy | AirQualityBand::Hazardous => RiskLevel::VeryHigh,
    }
}

/// Fuses per-hazard levels by averaging their severities.
///
/// Order-independent. An empty input is `Low`.
#[must_use]
pub fn overall_from_levels<I>(levels: I) -> OverallRisk
where
    I: IntoIterator<Item = RiskLevel>,
{
    let (sum, count) = levels
        .into_iter()
        .fold((0u32, 0u32), |(sum, count), level| {
            (sum + u32::from(level.severity()), count + 1)
        });

    if count == 0 {
        return OverallRisk::Low;
    }

    let average = f64::from(sum) / f64::from(count);

    if average >= OVERALL_HIGH_AVERAGE {
        OverallRisk::High
    } else if average >= OVERALL_MEDIUM_AVERAGE {
        OverallRisk::Medium
    } else {
        OverallRisk::Low
    }
}

/// Rounds and clamps a 0-100 confidence. Non-finite input is 0.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn clamp_confidence(value: f64) -> u8 {
    if value.is_finite() {
        value.round().clamp(0.0, 100.0) as u8
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn psi_bands_match_published_cut_offs() {
        assert_eq!(psi_band(0.0), AirQualityBand::Good);
        assert_eq!(psi_band(50.0), AirQualityBand::Good);
        assert_eq!(psi_band(55.0), AirQualityBand::Moderate);
        assert_eq!(psi_band(100.0), AirQualityBand::Moderate);
        assert_eq!(psi_band(150.0), AirQualityBand::Unhealthy);
        assert_eq!(psi_band(250.0), AirQualityBand::VeryUnhealthy);
        assert_eq!(psi_band(300.0), AirQualityBand::VeryUnhealthy);
        assert_eq!(psi_band(301.0), AirQualityBand::Hazardous);
    }

    #[test]
    fn band_levels_are_monotonic() {
        let bands = [
            AirQualityBand::Good,
            AirQualityBand::Moderate,
            AirQualityBand::Unhealthy,
            AirQualityBand::VeryUnhealthy,
            AirQualityBand::Hazardous,
        ];
        for pair in bands.windows(2) {
            assert!(band_level(pair[0]) <= band_level(pair[1]));
        }
    }

    #[test]
    fn overall_averages_severity() {
        use RiskLevel::{High, Low, Medium, VeryHigh};

        // {2,2,1} averages 1.67.
        assert_eq!(overall_from_levels([Medium, Medium, Low]), OverallRisk::Low);
        // {3,3,2} averages 2.67, above the 2.5 boundary.
        assert_eq!(overall_from_levels([High, High, Medium]), OverallRisk::Medium);
        // Exactly 2.5.
        assert_eq!(overall_from_levels([Medium, High]), OverallRisk::Medium);
        // Exactly 3.5.
        assert_eq!(overall_from_levels([High, VeryHigh]), OverallRisk::High);
        assert_eq!(overall_from_levels([VeryHigh, VeryHigh, High]), OverallRisk::High);
        assert_eq!(overall_from_levels([]), OverallRisk::Low);
    }

    #[test]
    fn score_thresholds_follow_rule_order() {
        let t = ScoreThresholds::default();
        assert_eq!(t.classify(5.0, &[1, 1, 1]), RiskLevel::VeryHigh);
        assert_eq!(t.classify(101.0, &[0, 0, 0]), RiskLevel::VeryHigh);
        assert_eq!(t.classify(0.0, &[0, 3, 3]), RiskLevel::High);
        assert_eq!(t.classify(51.0, &[0, 0, 0]), RiskLevel::High);
        assert_eq!(t.classify(0.0, &[0, 2, 2]), RiskLevel::Medium);
        assert_eq!(t.classify(21.0, &[0, 0, 0]), RiskLevel::Medium);
        assert_eq!(t.classify(20.0, &[0, 0, 0]), RiskLevel::Low);
    }

    #[test]
    fn score_thresholds_skip_missing_rings() {
        let t = ScoreThresholds::default();
        assert_eq!(t.classify(0.0, &[]), RiskLevel::Low);
        assert_eq!(t.classify(0.0, &[1]), RiskLevel::VeryHigh);
    }

    #[test]
    fn level_thresholds_are_strict() {
        assert_eq!(ADMISSION_THRESHOLDS.classify(51.0), RiskLevel::VeryHigh);
        assert_eq!(ADMISSION_THRESHOLDS.classify(50.0), RiskLevel::High);
        assert_eq!(ADMISSION_THRESHOLDS.classify(31.0), RiskLevel::High);
        assert_eq!(ADMISSION_THRESHOLDS.classify(16.0), RiskLevel::Medium);
        assert_eq!(ADMISSION_THRESHOLDS.classify(15.0), RiskLevel::Low);
        assert_eq!(ADMISSION_THRESHOLDS.classify(f64::NAN), RiskLevel::Low);
    }

    #[test]
    fn unordered_thresholds_are_rejected() {
        let t = LevelThresholds {
            very_high: 10.0,
            high: 20.0,
            medium: 5.0,
        };
        assert!(t.validate("test").is_err());
        assert!(ADMISSION_THRESHOLDS.validate("admissions").is_ok());
    }

    #[test]
    fn confidence_is_clamped() {
        assert_eq!(clamp_confidence(-5.0), 0);
        assert_eq!(clamp_confidence(42.4), 42);
        assert_eq!(clamp_confidence(250.0), 100);
        assert_eq!(clamp_confidence(f64::NAN), 0);
        assert_eq!(clamp_confidence(f64::INFINITY), 0);
    }
}
