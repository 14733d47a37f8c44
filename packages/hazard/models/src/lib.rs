#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Hazard observation, assessment, and forecast types.
//!
//! Defines the three monitored hazards (dengue clusters, air quality,
//! hospital/epidemic load), the qualitative risk scale they are classified
//! on, and the request-scoped result types produced by the assessors and
//! the forecast engine. Everything here is an immutable snapshot value.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use health_risk_geo_models::{Coordinate, NamedLocation, Region};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// One of the monitored risk categories.
///
/// Declaration order is the presentation order (dengue first, epidemic
/// last) and is what `Ord` sorts by.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum HazardKind {
    /// Mosquito-borne dengue clusters.
    Dengue,
    /// Pollutant Standards Index readings.
    AirQuality,
    /// Hospital admission load.
    Epidemic,
}

impl HazardKind {
    /// Returns all variants in presentation order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Dengue, Self::AirQuality, Self::Epidemic]
    }

    /// Human-readable label for rationale text.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Dengue => "Dengue",
            Self::AirQuality => "Air quality",
            Self::Epidemic => "Hospital load",
        }
    }
}

/// Per-hazard qualitative risk level.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    /// Severity 1.
    Low = 1,
    /// Severity 2.
    Medium = 2,
    /// Severity 3.
    High = 3,
    /// Severity 4.
    VeryHigh = 4,
}

impl RiskLevel {
    /// Numeric severity (1-4) used when averaging across hazards.
    #[must_use]
    pub const fn severity(self) -> u8 {
        self as u8
    }

    /// Returns all variants from least to most severe.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Low, Self::Medium, Self::High, Self::VeryHigh]
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::VeryHigh => "Very high",
        }
    }
}

/// Fused risk across all hazards for one location.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum OverallRisk {
    /// Average severity below 2.5.
    Low,
    /// Average severity 2.5 to 3.5.
    Medium,
    /// Average severity 3.5 and above.
    High,
}

impl OverallRisk {
    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

/// PSI health band.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum AirQualityBand {
    /// PSI 0-50.
    Good,
    /// PSI 51-100.
    Moderate,
    /// PSI 101-200.
    Unhealthy,
    /// PSI 201-300.
    VeryUnhealthy,
    /// PSI above 300.
    Hazardous,
}

impl AirQualityBand {
    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Moderate => "Moderate",
            Self::Unhealthy => "Unhealthy",
            Self::VeryUnhealthy => "Very unhealthy",
            Self::Hazardous => "Hazardous",
        }
    }
}

/// Direction of a forecast relative to its baseline.
///
/// Dengue and hospital load use `Increasing`/`Decreasing`; air quality
/// uses `Worsening`/`Improving`.
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
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Trend {
    /// Case counts rising beyond the dead-band.
    Increasing,
    /// Case counts falling beyond the dead-band.
    Decreasing,
    /// PSI falling beyond the dead-band.
    Improving,
    /// PSI rising beyond the dead-band.
    Worsening,
    /// Within the dead-band.
    Stable,
}

/// Where the data behind an assessment came from.
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
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum DataStatus {
    /// Scored against observations near a resolved location.
    Hyperlocal,
    /// Location unknown or no regional figure; island-wide data used.
    RegionWide,
    /// The provider had no data; a default was substituted.
    Unavailable,
}

/// A point observation: a dengue cluster centroid or a hospital node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HazardCluster {
    /// Provider identifier.
    pub id: String,
    /// Human-readable label (locality or hospital name).
    pub label: String,
    /// Cluster centroid or hospital location.
    pub coordinate: Coordinate,
    /// Case count or admission count.
    pub magnitude: u32,
}

/// A concentric distance band with its decay weight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistanceRing {
    /// Outer radius of the ring.
    #[serde(alias = "radius_km")]
    pub radius_km: f64,
    /// Multiplier applied to magnitudes that fall in this ring.
    pub weight: f64,
}

/// Current-condition assessment for one hazard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HazardAssessment {
    /// Which hazard this describes.
    pub hazard_kind: HazardKind,
    /// Classified risk level.
    pub level: RiskLevel,
    /// The headline number (weighted score, PSI, or weighted admissions).
    pub primary_metric: f64,
    /// Confidence in the assessment (0-100).
    pub confidence: u8,
    /// Where the underlying data came from.
    pub data_status: DataStatus,
    /// PSI band, for air-quality assessments only.
    pub air_quality_band: Option<AirQualityBand>,
    /// Supporting facts shown to the user.
    pub rationale: Vec<String>,
    /// Hazard-specific advice.
    pub recommendations: Vec<String>,
}

/// Fused assessment for one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationAnalysis {
    /// The resolved place, or `None` for a region-wide analysis.
    pub location: Option<NamedLocation>,
    /// Per-hazard assessments, dengue first.
    pub assessments: Vec<HazardAssessment>,
    /// Fused risk label.
    pub overall_risk: OverallRisk,
    /// Weakest per-hazard confidence.
    pub overall_confidence: u8,
    /// Hazard advice followed by the overall-tier advice.
    pub travel_advice: Vec<String>,
    /// Annotations about degraded inputs (fallbacks, missing data).
    pub notes: Vec<String>,
}

/// Forward projection for one hazard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HazardForecast {
    /// Which hazard this describes.
    pub hazard_kind: HazardKind,
    /// Current value the projection started from.
    pub baseline: f64,
    /// Projected value at the target date.
    pub predicted_value: f64,
    /// Classified level of the projected value.
    pub level: RiskLevel,
    /// Confidence in the projection (0-100).
    pub confidence: u8,
    /// Direction relative to the baseline.
    pub trend: Trend,
    /// Human-readable description of each applied factor.
    pub factors: Vec<String>,
}

/// Forecast result for one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    /// Days ahead of the reference date.
    pub horizon_days: u32,
    /// Date being forecast.
    pub target_date: NaiveDate,
    /// The resolved place, or `None` for a region-wide forecast.
    pub location: Option<NamedLocation>,
    /// Per-hazard projections, dengue first.
    pub per_hazard: Vec<HazardForecast>,
    /// Fused risk label.
    pub overall_risk: OverallRisk,
    /// Weakest per-hazard confidence.
    pub overall_confidence: u8,
    /// Horizon-tier advice plus hazard-specific mitigation.
    pub recommendations: Vec<String>,
}

/// PSI readings from the air-quality provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PsiReadings {
    /// National (island-wide) PSI.
    pub national: Option<f64>,
    /// Per-region PSI.
    #[serde(default)]
    pub regional: BTreeMap<Region, f64>,
}

fn is_valid_psi(psi: f64) -> bool {
    psi.is_finite() && psi >= 0.0
}

impl PsiReadings {
    /// Regional reading if present, else the national reading.
    ///
    /// Non-finite or negative readings count as missing, so a bad regional
    /// value falls through to the national one.
    #[must_use]
    pub fn for_region(&self, region: Option<Region>) -> Option<(f64, bool)> {
        region
            .and_then(|r| self.regional.get(&r).copied())
            .filter(|psi| is_valid_psi(*psi))
            .map(|psi| (psi, true))
            .or_else(|| {
                self.national
                    .filter(|psi| is_valid_psi(*psi))
                    .map(|psi| (psi, false))
            })
    }
}

/// Week-over-week change rates supplied alongside the snapshot.
///
/// Each value is a fraction per week (`0.1` = +10%/week).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyTrend {
    /// Dengue case trend.
    #[serde(default)]
    pub dengue: f64,
    /// PSI trend.
    #[serde(default)]
    pub air_quality: f64,
    /// Hospital admission trend.
    #[serde(default)]
    pub epidemic: f64,
}

impl WeeklyTrend {
    /// Trend rate for one hazard.
    #[must_use]
    pub const fn for_hazard(&self, kind: HazardKind) -> f64 {
        match kind {
            HazardKind::Dengue => self.dengue,
            HazardKind::AirQuality => self.air_quality,
            HazardKind::Epidemic => self.epidemic,
        }
    }
}

/// Everything the providers returned for one request.
///
/// `None` means the provider was unavailable; assessors substitute a
/// documented default instead of failing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HazardSnapshot {
    /// Dengue cluster centroids.
    pub dengue_clusters: Option<Vec<HazardCluster>>,
    /// PSI readings.
    pub psi: Option<PsiReadings>,
    /// Hospital admission nodes.
    pub hospital_admissions: Option<Vec<HazardCluster>>,
    /// Week-over-week change rates.
    #[serde(default)]
    pub weekly_trend: WeeklyTrend,
}
