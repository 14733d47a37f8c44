//! Async orchestration over cached provider feeds.

use std::sync::Arc;

use chrono::NaiveDate;
use health_risk_forecast::WeatherModel;
use health_risk_hazard_models::{
    HazardCluster, HazardSnapshot, LocationAnalysis, Prediction, PsiReadings, WeeklyTrend,
};
use health_risk_provider::{CachedProvider, HazardSource, ProviderError};

use crate::{Engine, EngineError, ProviderSettings};

/// Fetches every feed through its own cache, then runs the engine.
///
/// Provider failures never reach the caller: a feed that cannot be
/// fetched (and has nothing cached) becomes `None` in the snapshot and the
/// engine substitutes its documented default.
#[derive(Debug)]
pub struct HealthRiskService {
    engine: Engine,
    dengue: CachedProvider<Vec<HazardCluster>>,
    psi: CachedProvider<PsiReadings>,
    hospitals: CachedProvider<Vec<HazardCluster>>,
    trend: CachedProvider<WeeklyTrend>,
}

impl HealthRiskService {
    /// Wraps each feed of `source` in a [`CachedProvider`].
    #[must_use]
    pub fn new(engine: Engine, source: Arc<dyn HazardSource>, settings: ProviderSettings) -> Self {
        let (ttl, timeout) = (settings.ttl(), settings.timeout());
        log::info!(
            "Serving hazard data from '{}' (ttl={ttl:?}, timeout={timeout:?})",
            source.name()
        );

        let s = Arc::clone(&source);
        let dengue = CachedProvider::new("dengue clusters", ttl, timeout, move || {
            let s = Arc::clone(&s);
            async move { s.fetch_dengue_clusters().await }
        });

        let s = Arc::clone(&source);
        let psi = CachedProvider::new("PSI readings", ttl, timeout, move || {
            let s = Arc::clone(&s);
            async move { s.fetch_psi().await }
        });

        let s = Arc::clone(&source);
        let hospitals = CachedProvider::new("hospital admissions", ttl, timeout, move || {
            let s = Arc::clone(&s);
            async move { s.fetch_hospital_admissions().await }
        });

        let trend = CachedProvider::new("weekly trend", ttl, timeout, move || {
            let s = Arc::clone(&source);
            async move { s.fetch_weekly_trend().await }
        });

        Self {
            engine,
            dengue,
            psi,
            hospitals,
            trend,
        }
    }

    /// The engine requests are answered with.
    #[must_use]
    pub const fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Fetches all feeds concurrently.
    pub async fn snapshot(&self) -> HazardSnapshot {
        let (dengue, psi, hospitals, trend) = tokio::join!(
            self.dengue.get(),
            self.psi.get(),
            self.hospitals.get(),
            self.trend.get(),
        );

        HazardSnapshot {
            dengue_clusters: available(self.dengue.name(), dengue),
            psi: available(self.psi.name(), psi),
            hospital_admissions: available(self.hospitals.name(), hospitals),
            weekly_trend: available(self.trend.name(), trend).unwrap_or_default(),
        }
    }

    /// Assesses the place named by `query` against fresh data.
    pub async fn assess_location(&self, query: Option<&str>) -> LocationAnalysis {
        let snapshot = self.snapshot().await;
        self.engine.assess_location(query, &snapshot)
    }

    /// Forecasts the place named by `query` against fresh data.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidHorizon`] if the horizon is out of
    /// range. Checked before any provider is called.
    pub async fn forecast(
        &self,
        query: Option<&str>,
        horizon_days: i64,
        as_of: NaiveDate,
        weather: &dyn WeatherModel,
    ) -> Result<Prediction, EngineError> {
        self.engine.validate_horizon(horizon_days)?;
        let snapshot = self.snapshot().await;
        self.engine
            .forecast(query, horizon_days, &snapshot, as_of, weather)
    }
}

fn available<T>(feed: &str, result: Result<T, ProviderError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("{feed}: {e}; continuing without it");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use health_risk_forecast::SeasonalWeather;
    use health_risk_geo_models::Coordinate;
    use health_risk_hazard_models::{DataStatus, HazardKind, RiskLevel};

    use super::*;

    /// Serves fixed dengue clusters and PSI; hospitals are always down.
    #[derive(Default)]
    struct FakeSource {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl HazardSource for FakeSource {
        fn name(&self) -> &str {
            "fake"
        }

        async fn fetch_dengue_clusters(&self) -> Result<Vec<HazardCluster>, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![HazardCluster {
                id: "wdl".to_string(),
                label: "Woodlands Ave 6".to_string(),
                coordinate: Coordinate::new(1.4409, 103.7890).unwrap(),
                magnitude: 25,
            }])
        }

        async fn fetch_psi(&self) -> Result<PsiReadings, ProviderError> {
            Ok(PsiReadings {
                national: Some(250.0),
                regional: std::collections::BTreeMap::new(),
            })
        }

        async fn fetch_hospital_admissions(&self) -> Result<Vec<HazardCluster>, ProviderError> {
            Err(ProviderError::Unavailable {
                provider: "hospital admissions".to_string(),
                reason: "offline".to_string(),
            })
        }
    }

    fn service(source: Arc<FakeSource>) -> HealthRiskService {
        HealthRiskService::new(Engine::default(), source, ProviderSettings::default())
    }

    #[tokio::test]
    async fn failed_feed_becomes_unavailable_assessment() {
        let service = service(Arc::new(FakeSource::default()));
        let analysis = service.assess_location(Some("Woodlands")).await;

        let by_kind = |kind: HazardKind| {
            analysis
                .assessments
                .iter()
                .find(|a| a.hazard_kind == kind)
                .unwrap()
        };
        assert_eq!(by_kind(HazardKind::Dengue).level, RiskLevel::VeryHigh);
        assert_eq!(by_kind(HazardKind::AirQuality).level, RiskLevel::VeryHigh);
        assert_eq!(
            by_kind(HazardKind::Epidemic).data_status,
            DataStatus::Unavailable
        );
    }

    #[tokio::test]
    async fn repeated_requests_hit_the_cache() {
        let source = Arc::new(FakeSource::default());
        let service = service(Arc::clone(&source));

        service.snapshot().await;
        service.snapshot().await;
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn invalid_horizon_skips_providers() {
        let source = Arc::new(FakeSource::default());
        let service = service(Arc::clone(&source));
        let as_of = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();

        let result = service
            .forecast(Some("Woodlands"), 0, as_of, &SeasonalWeather)
            .await;
        assert!(matches!(result, Err(EngineError::InvalidHorizon { .. })));
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);

        let prediction = service
            .forecast(Some("Woodlands"), 3, as_of, &SeasonalWeather)
            .await
            .unwrap();
        assert_eq!(prediction.per_hazard.len(), 3);
    }
}
