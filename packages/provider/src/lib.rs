#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Boundary with the hazard data providers.
//!
//! The engine never fetches anything itself. Callers implement
//! [`HazardSource`] (or use [`SnapshotFileSource`]), wrap each feed in a
//! [`CachedProvider`], and hand the already-fetched values to the engine.

pub mod cache;
pub mod clusters;
pub mod snapshot;

pub use cache::CachedProvider;
pub use clusters::clusters_from_geojson;
pub use snapshot::SnapshotFileSource;

use std::time::Duration;

use async_trait::async_trait;
use health_risk_hazard_models::{HazardCluster, PsiReadings, WeeklyTrend};

/// Errors raised by hazard data providers.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// The provider has no data for this feed.
    #[error("{provider} unavailable: {reason}")]
    Unavailable {
        /// Which feed.
        provider: String,
        /// Why.
        reason: String,
    },

    /// The refresh did not finish in time.
    #[error("{provider} timed out after {timeout:?}")]
    Timeout {
        /// Which feed.
        provider: String,
        /// The configured timeout.
        timeout: Duration,
    },

    /// The payload was well-formed but not what was expected.
    #[error("Parse error: {message}")]
    Parse {
        /// Description of what went wrong.
        message: String,
    },

    /// `GeoJSON` decoding failed.
    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),

    /// I/O error (file read).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A source of hazard observations.
///
/// Implementations return already-parsed values or a typed
/// [`ProviderError`]; callers treat every error as "data unavailable".
#[async_trait]
pub trait HazardSource: Send + Sync {
    /// Human-readable name for logs.
    fn name(&self) -> &str;

    /// Dengue cluster centroids.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] if the feed cannot be read.
    async fn fetch_dengue_clusters(&self) -> Result<Vec<HazardCluster>, ProviderError>;

    /// Regional and national PSI.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] if the feed cannot be read.
    async fn fetch_psi(&self) -> Result<PsiReadings, ProviderError>;

    /// Hospital admission nodes.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] if the feed cannot be read.
    async fn fetch_hospital_admissions(&self) -> Result<Vec<HazardCluster>, ProviderError>;

    /// Week-over-week change rates. Defaults to flat.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] if the feed cannot be read.
    async fn fetch_weekly_trend(&self) -> Result<WeeklyTrend, ProviderError> {
        Ok(WeeklyTrend::default())
    }
}
