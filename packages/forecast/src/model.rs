//! The forecast model.
//!
//! Every hazard is projected with the same multiplicative shape:
//!
//! ```text
//! predicted = baseline × trend × weather × (1 + seasonal) × (1 + growth | crowd) [× day-of-week]
//! ```
//!
//! Confidence starts from a per-hazard base that decays with horizon and is
//! scaled down when the model leans on multipliers far from 1.

use chrono::{Days, NaiveDate};
use health_risk_geo_models::NamedLocation;
use health_risk_hazard::AssessmentPolicy;
use health_risk_hazard::advice::{
    self, DENGUE_MITIGATION, EPIDEMIC_MITIGATION, INDOORS_ADVICE, N95_ADVICE,
};
use health_risk_hazard::classify::{
    PSI_INDOORS_ADVISORY, PSI_N95_ADVISORY, UNAVAILABLE_CONFIDENCE, band_level, clamp_confidence,
    overall_from_levels, psi_band,
};
use health_risk_hazard_models::{
    HazardForecast, HazardKind, OverallRisk, Prediction, RiskLevel, Trend, WeeklyTrend,
};
use serde::{Deserialize, Serialize};

use crate::calendar::is_weekend;
use crate::settings::{ForecastSettings, GrowthTiers};
use crate::weather::WeatherModel;

/// Whether the baselines describe one place or the whole island.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Scope {
    /// Observations near a resolved location.
    Hyperlocal,
    /// Island-wide aggregates.
    RegionWide,
}

/// Current-state baselines the forecast starts from.
///
/// `None` means the provider had no data for that hazard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentConditions {
    /// Dengue cases in scope.
    pub dengue_cases: Option<f64>,
    /// Dengue clusters in scope.
    pub dengue_clusters: usize,
    /// PSI reading.
    pub psi: Option<f64>,
    /// Hospital admissions (weighted nearby or mean per hospital).
    pub hospitalizations: Option<f64>,
    /// What the baselines describe.
    pub scope: Scope,
    /// Week-over-week change rates.
    pub weekly_trend: WeeklyTrend,
}

/// Weekly dengue growth rate and its tier label.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn growth_rate(tiers: &GrowthTiers, cases: f64, clusters: usize) -> (f64, &'static str) {
    if clusters == 0 {
        return (0.0, "no active clusters");
    }
    let average = cases / clusters as f64;
    if average > tiers.rapid_avg_cases || clusters > tiers.rapid_cluster_count {
        (tiers.rapid_rate, "rapid expansion")
    } else if average > tiers.accelerating_avg_cases {
        (tiers.accelerating_rate, "accelerating")
    } else {
        (tiers.steady_rate, "steady progression")
    }
}

/// Trend label for a projection.
#[must_use]
pub fn trend_label(kind: HazardKind, baseline: f64, predicted: f64, band: f64) -> Trend {
    let (up, down) = match kind {
        HazardKind::AirQuality => (Trend::Worsening, Trend::Improving),
        HazardKind::Dengue | HazardKind::Epidemic => (Trend::Increasing, Trend::Decreasing),
    };

    if baseline <= 0.0 {
        return if predicted > 0.0 { up } else { Trend::Stable };
    }

    let change = (predicted - baseline) / baseline;
    if change > band {
        up
    } else if change < -band {
        down
    } else {
        Trend::Stable
    }
}

/// How close a multiplier is to neutral, from 0 to 1.
#[must_use]
pub fn stability(multiplier: f64) -> f64 {
    (1.0 - (multiplier - 1.0).abs()).max(0.0)
}

/// Confidence (0-100) from a base and the two dominant multipliers.
#[must_use]
pub fn confidence(base: f64, first: f64, second: f64) -> u8 {
    let average = f64::midpoint(stability(first), stability(second));
    clamp_confidence(base * average * 100.0)
}

/// Projects current conditions forward.
#[derive(Debug, Clone, Default)]
pub struct ForecastEngine {
    settings: ForecastSettings,
    policy: AssessmentPolicy,
}

/// Multipliers shared by every hazard.
struct Common {
    trend: f64,
    weather: f64,
    seasonal: f64,
    factors: Vec<String>,
}

impl ForecastEngine {
    /// Creates an engine from validated settings and policy.
    #[must_use]
    pub const fn new(settings: ForecastSettings, policy: AssessmentPolicy) -> Self {
        Self { settings, policy }
    }

    /// The settings this engine was built with.
    #[must_use]
    pub const fn settings(&self) -> &ForecastSettings {
        &self.settings
    }

    /// Forecasts every hazard `horizon_days` after `as_of`.
    ///
    /// The horizon is assumed to be validated by the caller.
    #[must_use]
    pub fn forecast(
        &self,
        location: Option<&NamedLocation>,
        conditions: &CurrentConditions,
        horizon_days: u32,
        as_of: NaiveDate,
        weather: &dyn WeatherModel,
    ) -> Prediction {
        let target = as_of
            .checked_add_days(Days::new(u64::from(horizon_days)))
            .unwrap_or(NaiveDate::MAX);

        let per_hazard = vec![
            self.forecast_dengue(conditions, horizon_days, target, weather),
            self.forecast_air(conditions, horizon_days, target, weather),
            self.forecast_epidemic(conditions, horizon_days, target, weather),
        ];

        let overall_risk = overall_from_levels(per_hazard.iter().map(|f| f.level));
        let overall_confidence = per_hazard
            .iter()
            .map(|f| f.confidence)
            .min()
            .unwrap_or(0);

        let recommendations = recommendations(horizon_days, overall_risk, &per_hazard);

        log::info!(
            "Forecast {horizon_days}d for {} ({target}): overall={overall_risk} confidence={overall_confidence} weather={}",
            location.map_or("region-wide", |l| l.name.as_str()),
            weather.name()
        );

        Prediction {
            horizon_days,
            target_date: target,
            location: location.cloned(),
            per_hazard,
            overall_risk,
            overall_confidence,
            recommendations,
        }
    }

    fn common(
        &self,
        kind: HazardKind,
        weekly_trend: &WeeklyTrend,
        horizon_days: u32,
        target: NaiveDate,
        weather: &dyn WeatherModel,
    ) -> Common {
        let weekly_trend = weekly_trend.for_hazard(kind);
        let season = self.settings.seasons.season_for(target);
        let seasonal = self.settings.seasonality.offset(kind, season);
        let range = self.settings.weather.range(kind, season);
        let multiplier = range.clamp(weather.multiplier(kind, target, range));
        let trend = (1.0 + weekly_trend * f64::from(horizon_days) / 7.0).max(0.0);

        Common {
            trend,
            weather: multiplier,
            seasonal,
            factors: vec![
                format!("{}: {:+.0}%", season.label(), seasonal * 100.0),
                format!("Weather ({}): ×{multiplier:.2}", weather.name()),
                format!(
                    "Weekly trend {:+.0}%/week over {horizon_days} day(s): ×{trend:.2}",
                    weekly_trend * 100.0
                ),
            ],
        }
    }

    fn forecast_dengue(
        &self,
        conditions: &CurrentConditions,
        horizon_days: u32,
        target: NaiveDate,
        weather: &dyn WeatherModel,
    ) -> HazardForecast {
        let kind = HazardKind::Dengue;
        let Some(baseline) = conditions.dengue_cases else {
            return unavailable(kind);
        };

        let mut c = self.common(
            kind,
            &conditions.weekly_trend,
            horizon_days,
            target,
            weather,
        );
        let growth = &self.settings.growth;
        let (rate, tier) = growth_rate(growth, baseline, conditions.dengue_clusters);
        let weeks = (f64::from(horizon_days) / 7.0).min(growth.max_weeks);
        let growth_factor = rate * weeks;
        c.factors
            .push(format!("Cluster growth ({tier}): {:+.1}%", growth_factor * 100.0));

        let predicted = sanitize(
            baseline * c.trend * c.weather * (1.0 + c.seasonal) * (1.0 + growth_factor),
            baseline,
        );
        let thresholds = match conditions.scope {
            Scope::Hyperlocal => self.policy.hyperlocal_dengue_cases,
            Scope::RegionWide => self.policy.region_dengue_cases,
        };

        self.finish(
            kind,
            baseline,
            predicted,
            thresholds.classify(predicted),
            horizon_days,
            (c.weather, 1.0 + growth_factor),
            c.factors,
        )
    }

    fn forecast_air(
        &self,
        conditions: &CurrentConditions,
        horizon_days: u32,
        target: NaiveDate,
        weather: &dyn WeatherModel,
    ) -> HazardForecast {
        let kind = HazardKind::AirQuality;
        let Some(baseline) = conditions.psi.filter(|p| p.is_finite() && *p >= 0.0) else {
            return unavailable(kind);
        };

        let mut c = self.common(
            kind,
            &conditions.weekly_trend,
            horizon_days,
            target,
            weather,
        );
        let day_factor = self.settings.crowd.air_day_factor(target);
        let day = if is_weekend(target) { "Weekend" } else { "Weekday" };
        c.factors.push(format!("{day} traffic: ×{day_factor:.2}"));

        let predicted = sanitize(
            baseline * c.trend * c.weather * (1.0 + c.seasonal) * day_factor,
            baseline,
        );

        self.finish(
            kind,
            baseline,
            predicted,
            band_level(psi_band(predicted)),
            horizon_days,
            (c.weather, day_factor),
            c.factors,
        )
    }

    fn forecast_epidemic(
        &self,
        conditions: &CurrentConditions,
        horizon_days: u32,
        target: NaiveDate,
        weather: &dyn WeatherModel,
    ) -> HazardForecast {
        let kind = HazardKind::Epidemic;
        let Some(baseline) = conditions.hospitalizations else {
            return unavailable(kind);
        };

        let mut c = self.common(
            kind,
            &conditions.weekly_trend,
            horizon_days,
            target,
            weather,
        );
        let crowd = &self.settings.crowd;
        let crowd_factor = crowd.crowd_factor(target);
        let mut reasons = Vec::new();
        if is_weekend(target) {
            reasons.push("weekend".to_string());
        }
        if let Some(holiday) = crowd.holiday_near(target) {
            reasons.push(format!("near {}", holiday.name));
        }
        if reasons.is_empty() {
            c.factors.push("Crowding: none expected".to_string());
        } else {
            c.factors.push(format!(
                "Crowding ({}): {:+.0}%",
                reasons.join(", "),
                crowd_factor * 100.0
            ));
        }

        let predicted = sanitize(
            baseline * c.trend * c.weather * (1.0 + c.seasonal) * (1.0 + crowd_factor),
            baseline,
        );

        self.finish(
            kind,
            baseline,
            predicted,
            self.policy.admissions.classify(predicted),
            horizon_days,
            (c.weather, 1.0 + crowd_factor),
            c.factors,
        )
    }

    #[allow(clippy::too_many_arguments)]
    fn finish(
        &self,
        kind: HazardKind,
        baseline: f64,
        predicted: f64,
        level: RiskLevel,
        horizon_days: u32,
        (first, second): (f64, f64),
        factors: Vec<String>,
    ) -> HazardForecast {
        let base = self.settings.confidence.base(kind, horizon_days);
        let band = self.settings.trend_bands.for_hazard(kind);

        log::debug!("{kind}: baseline={baseline:.1} predicted={predicted:.1} level={level}");

        HazardForecast {
            hazard_kind: kind,
            baseline,
            predicted_value: predicted,
            level,
            confidence: confidence(base, first, second),
            trend: trend_label(kind, baseline, predicted, band),
            factors,
        }
    }
}

/// Non-finite projections fall back to the baseline; negatives clamp to 0.
fn sanitize(predicted: f64, baseline: f64) -> f64 {
    let value = if predicted.is_finite() {
        predicted
    } else {
        baseline
    };
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}

fn unavailable(kind: HazardKind) -> HazardForecast {
    log::warn!("{kind} baseline unavailable, forecasting default");
    HazardForecast {
        hazard_kind: kind,
        baseline: 0.0,
        predicted_value: 0.0,
        level: RiskLevel::Low,
        confidence: UNAVAILABLE_CONFIDENCE,
        trend: Trend::Stable,
        factors: vec![advice::unavailable_rationale(kind)],
    }
}

fn recommendations(
    horizon_days: u32,
    overall: OverallRisk,
    forecasts: &[HazardForecast],
) -> Vec<String> {
    let mut out = vec![advice::horizon_advice(horizon_days, overall)];
    let mut push = |line: &str| {
        if !out.iter().any(|existing| existing == line) {
            out.push(line.to_string());
        }
    };

    for f in forecasts {
        match f.hazard_kind {
            HazardKind::Dengue if f.trend == Trend::Increasing => {
                for line in DENGUE_MITIGATION {
                    push(*line);
                }
            }
            HazardKind::AirQuality => {
                if f.trend == Trend::Worsening && f.predicted_value > PSI_N95_ADVISORY {
                    push(N95_ADVICE);
                }
                if f.predicted_value > PSI_INDOORS_ADVISORY {
                    push(INDOORS_ADVICE);
                }
            }
            HazardKind::Epidemic if f.trend == Trend::Increasing => {
                for line in EPIDEMIC_MITIGATION {
                    push(*line);
                }
            }
            _ => {}
        }
    }

    out
}
