//! The synchronous engine facade.

use chrono::NaiveDate;
use health_risk_forecast::{CurrentConditions, ForecastEngine, Scope, WeatherModel};
use health_risk_geo::Gazetteer;
use health_risk_geo_models::NamedLocation;
use health_risk_hazard::air_quality::assess_air_quality;
use health_risk_hazard::dengue::{assess_dengue, total_cases};
use health_risk_hazard::epidemic::{assess_epidemic, mean_admissions, weighted_admissions};
use health_risk_hazard::{AssessmentPolicy, aggregate, cluster};
use health_risk_hazard_models::{HazardSnapshot, LocationAnalysis, Prediction};

use crate::{ConfigError, EngineConfig, EngineError};

/// Resolves places and scores them against hazard snapshots.
///
/// Read-only after construction, so one instance can serve concurrent
/// requests.
#[derive(Debug, Clone)]
pub struct Engine {
    gazetteer: Gazetteer,
    policy: AssessmentPolicy,
    forecaster: ForecastEngine,
}

impl Default for Engine {
    /// The embedded gazetteer with the built-in configuration.
    fn default() -> Self {
        let config = EngineConfig::default();
        Self::with_gazetteer(Gazetteer::default(), config)
    }
}

impl Engine {
    /// Validates `config` and builds an engine from it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the config is invalid or its gazetteer
    /// override cannot be loaded.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let gazetteer = config.gazetteer()?;
        log::info!("Engine ready with {} gazetteer entries", gazetteer.len());
        Ok(Self::with_gazetteer(gazetteer, config))
    }

    /// Builds an engine from an already-loaded gazetteer. `config` is
    /// assumed valid.
    #[must_use]
    pub fn with_gazetteer(gazetteer: Gazetteer, config: EngineConfig) -> Self {
        Self {
            gazetteer,
            forecaster: ForecastEngine::new(config.forecast, config.policy.clone()),
            policy: config.policy,
        }
    }

    /// Longest accepted forecast horizon.
    #[must_use]
    pub const fn max_horizon_days(&self) -> u32 {
        self.forecaster.settings().max_horizon_days
    }

    /// Resolves free text to a known place. `None` (or blank) text and
    /// unknown places both resolve to `None`.
    #[must_use]
    pub fn resolve(&self, query: Option<&str>) -> Option<NamedLocation> {
        let query = query?;
        match self.gazetteer.resolve(query) {
            Some(found) => {
                log::info!(
                    "Resolved {query:?} to {} ({:?} match on '{}')",
                    found.location.name,
                    found.method,
                    found.key
                );
                Some(found.location.clone())
            }
            None => {
                log::warn!("Could not resolve {query:?}, falling back to region-wide data");
                None
            }
        }
    }

    /// Assesses current conditions at the place named by `query`.
    ///
    /// Never fails: an unresolved place yields a region-wide analysis, and
    /// a missing feed yields a low-confidence default for that hazard.
    #[must_use]
    pub fn assess_location(
        &self,
        query: Option<&str>,
        snapshot: &HazardSnapshot,
    ) -> LocationAnalysis {
        let location = self.resolve(query);
        self.assess(location.as_ref(), snapshot)
    }

    /// Assesses an already-resolved location.
    #[must_use]
    pub fn assess(
        &self,
        location: Option<&NamedLocation>,
        snapshot: &HazardSnapshot,
    ) -> LocationAnalysis {
        let origin = location.map(|l| l.coordinate);
        let region = location.map(|l| l.region);

        let assessments = [
            assess_dengue(origin, snapshot.dengue_clusters.as_deref(), &self.policy),
            assess_air_quality(region, snapshot.psi.as_ref()),
            assess_epidemic(
                origin,
                snapshot.hospital_admissions.as_deref(),
                &self.policy,
            ),
        ];

        aggregate(location, &assessments)
    }

    /// Derives forecast baselines for `location` from a snapshot.
    ///
    /// A resolved location uses the dengue cases within the informational
    /// radius, its regional PSI, and distance-weighted admissions. Without
    /// one, island-wide totals, national PSI, and mean admissions per
    /// hospital are used instead.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn current_conditions(
        &self,
        location: Option<&NamedLocation>,
        snapshot: &HazardSnapshot,
    ) -> CurrentConditions {
        let clusters = snapshot.dengue_clusters.as_deref();
        let hospitals = snapshot.hospital_admissions.as_deref();
        let psi = snapshot
            .psi
            .as_ref()
            .and_then(|p| p.for_region(location.map(|l| l.region)))
            .map(|(psi, _)| psi);

        match location {
            Some(location) => {
                let origin = location.coordinate;
                let nearby = clusters.map(|c| {
                    cluster::score(
                        origin,
                        c,
                        &self.policy.dengue_rings,
                        self.policy.info_radius_km,
                    )
                });
                CurrentConditions {
                    dengue_cases: nearby.as_ref().map(|s| s.nearby_magnitude as f64),
                    dengue_clusters: nearby.as_ref().map_or(0, |s| s.nearby_count),
                    psi,
                    hospitalizations: hospitals
                        .map(|h| weighted_admissions(origin, h, &self.policy)),
                    scope: Scope::Hyperlocal,
                    weekly_trend: snapshot.weekly_trend,
                }
            }
            None => CurrentConditions {
                dengue_cases: clusters.map(|c| total_cases(c) as f64),
                dengue_clusters: clusters.map_or(0, <[_]>::len),
                psi,
                hospitalizations: hospitals.map(mean_admissions),
                scope: Scope::RegionWide,
                weekly_trend: snapshot.weekly_trend,
            },
        }
    }

    /// Forecasts the place named by `query` `horizon_days` after `as_of`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidHorizon`] if `horizon_days` is not
    /// between 1 and the configured maximum. This is the only failure.
    pub fn forecast(
        &self,
        query: Option<&str>,
        horizon_days: i64,
        snapshot: &HazardSnapshot,
        as_of: NaiveDate,
        weather: &dyn WeatherModel,
    ) -> Result<Prediction, EngineError> {
        let days = self.validate_horizon(horizon_days)?;
        let location = self.resolve(query);
        let conditions = self.current_conditions(location.as_ref(), snapshot);

        log::debug!("Forecast baselines: {conditions:?}");

        Ok(self
            .forecaster
            .forecast(location.as_ref(), &conditions, days, as_of, weather))
    }

    /// Checks a requested horizon against `1..=max_horizon_days`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidHorizon`] when out of range.
    pub fn validate_horizon(&self, horizon_days: i64) -> Result<u32, EngineError> {
        let max = self.max_horizon_days();
        u32::try_from(horizon_days)
            .ok()
            .filter(|days| (1..=max).contains(days))
            .ok_or(EngineError::InvalidHorizon {
                days: horizon_days,
                max,
            })
    }
}
