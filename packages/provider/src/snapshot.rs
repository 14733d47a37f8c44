//! A [`HazardSource`] backed by files on disk.

use std::path::PathBuf;

use async_trait::async_trait;
use health_risk_hazard_models::{HazardCluster, HazardSnapshot, PsiReadings, WeeklyTrend};

use crate::{HazardSource, ProviderError, clusters_from_geojson};

/// Reads a JSON [`HazardSnapshot`] file on every fetch.
///
/// Dengue clusters may instead come from a `GeoJSON` polygon file, which
/// takes precedence over the snapshot's cluster list when set. A `null`
/// feed in the snapshot is reported as [`ProviderError::Unavailable`].
#[derive(Debug, Clone)]
pub struct SnapshotFileSource {
    path: PathBuf,
    dengue_geojson: Option<PathBuf>,
}

impl SnapshotFileSource {
    /// Creates a source for the snapshot at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            dengue_geojson: None,
        }
    }

    /// Reads dengue clusters from a `GeoJSON` polygon file instead.
    #[must_use]
    pub fn with_dengue_geojson(mut self, path: impl Into<PathBuf>) -> Self {
        self.dengue_geojson = Some(path.into());
        self
    }

    async fn read(&self) -> Result<HazardSnapshot, ProviderError> {
        let text = tokio::fs::read_to_string(&self.path).await?;
        Ok(serde_json::from_str(&text)?)
    }

    fn missing(&self, feed: &str) -> ProviderError {
        ProviderError::Unavailable {
            provider: feed.to_string(),
            reason: format!("not present in {}", self.path.display()),
        }
    }
}

#[async_trait]
impl HazardSource for SnapshotFileSource {
    fn name(&self) -> &str {
        "snapshot file"
    }

    async fn fetch_dengue_clusters(&self) -> Result<Vec<HazardCluster>, ProviderError> {
        if let Some(path) = &self.dengue_geojson {
            let text = tokio::fs::read_to_string(path).await?;
            return clusters_from_geojson(&text);
        }
        self.read()
            .await?
            .dengue_clusters
            .ok_or_else(|| self.missing("dengue clusters"))
    }

    async fn fetch_psi(&self) -> Result<PsiReadings, ProviderError> {
        self.read()
            .await?
            .psi
            .ok_or_else(|| self.missing("PSI readings"))
    }

    async fn fetch_hospital_admissions(&self) -> Result<Vec<HazardCluster>, ProviderError> {
        self.read()
            .await?
            .hospital_admissions
            .ok_or_else(|| self.missing("hospital admissions"))
    }

    async fn fetch_weekly_trend(&self) -> Result<WeeklyTrend, ProviderError> {
        Ok(self.read().await?.weekly_trend)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_temp(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("health_risk_provider_{name}"));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[tokio::test]
    async fn reads_feeds_from_snapshot() {
        let path = write_temp(
            "snapshot.json",
            r#"{
                "dengueClusters": [
                    { "id": "a", "label": "Tampines St 81", "coordinate": { "lat": 1.35, "lng": 103.94 }, "magnitude": 9 }
                ],
                "psi": { "national": 48, "regional": { "EAST": 52 } },
                "hospitalAdmissions": null,
                "weeklyTrend": { "dengue": 0.1 }
            }"#,
        );
        let source = SnapshotFileSource::new(&path);

        assert_eq!(source.fetch_dengue_clusters().await.unwrap().len(), 1);
        let psi = source.fetch_psi().await.unwrap();
        assert_eq!(psi.national, Some(48.0));
        assert!(matches!(
            source.fetch_hospital_admissions().await,
            Err(ProviderError::Unavailable { .. })
        ));
        let trend = source.fetch_weekly_trend().await.unwrap();
        assert!((trend.dengue - 0.1).abs() < f64::EPSILON);

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn geojson_overrides_snapshot_clusters() {
        let snapshot = write_temp("geojson_snapshot.json", r#"{ "dengueClusters": [] }"#);
        let geojson = write_temp(
            "clusters.geojson",
            r#"{ "type": "FeatureCollection", "features": [
                { "type": "Feature", "properties": { "case_size": 3 },
                  "geometry": { "type": "Point", "coordinates": [103.8, 1.4] } }
            ] }"#,
        );
        let source = SnapshotFileSource::new(&snapshot).with_dengue_geojson(&geojson);

        let clusters = source.fetch_dengue_clusters().await.unwrap();
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].magnitude, 3);

        let _ = std::fs::remove_file(&snapshot);
        let _ = std::fs::remove_file(&geojson);
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let source = SnapshotFileSource::new("/nonexistent/health_risk_snapshot.json");
        assert!(matches!(
            source.fetch_psi().await,
            Err(ProviderError::Io(_))
        ));
    }
}
