//! Reduces dengue cluster polygons to centroid observations.

use geo::Centroid as _;
use geojson::{GeoJson, JsonObject, JsonValue, feature::Id};
use health_risk_geo_models::Coordinate;
use health_risk_hazard_models::HazardCluster;

use crate::ProviderError;

/// Label used when a feature carries no name.
pub const UNNAMED_CLUSTER: &str = "Unnamed cluster";

/// Case-insensitive property lookup.
fn property<'a>(properties: &'a JsonObject, key: &str) -> Option<&'a JsonValue> {
    properties
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(key))
        .map(|(_, v)| v)
}

fn as_text(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        JsonValue::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn as_count(value: &JsonValue) -> Option<u32> {
    match value {
        JsonValue::Number(n) => n.as_u64().and_then(|v| u32::try_from(v).ok()),
        JsonValue::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Parses a `GeoJSON` `FeatureCollection` of cluster polygons into
/// centroid clusters.
///
/// Reads the `id`, `label`, and `case_size` properties (keys matched
/// case-insensitively). A missing id falls back to the feature id and
/// then to the feature index; a missing label becomes
/// [`UNNAMED_CLUSTER`]; a missing case size becomes 0. Features without a
/// usable geometry are skipped with a warning.
///
/// # Errors
///
/// Returns [`ProviderError`] if the input is not valid `GeoJSON` or is not
/// a `FeatureCollection`.
pub fn clusters_from_geojson(input: &str) -> Result<Vec<HazardCluster>, ProviderError> {
    let GeoJson::FeatureCollection(collection) = input.parse::<GeoJson>()? else {
        return Err(ProviderError::Parse {
            message: "expected a GeoJSON FeatureCollection".to_string(),
        });
    };

    let mut clusters = Vec::with_capacity(collection.features.len());

    for (index, feature) in collection.features.into_iter().enumerate() {
        let Some(geometry) = feature.geometry else {
            log::warn!("Cluster feature #{index} has no geometry, skipping");
            continue;
        };

        let geometry: geo::Geometry<f64> = match geometry.try_into() {
            Ok(g) => g,
            Err(e) => {
                log::warn!("Cluster feature #{index} has an unsupported geometry: {e}");
                continue;
            }
        };

        // geo points are (x = longitude, y = latitude).
        let Some(centroid) = geometry.centroid() else {
            log::warn!("Cluster feature #{index} has an empty geometry, skipping");
            continue;
        };
        let coordinate = match Coordinate::new(centroid.y(), centroid.x()) {
            Ok(c) => c,
            Err(e) => {
                log::warn!("Cluster feature #{index}: {e}");
                continue;
            }
        };

        let properties = feature.properties.unwrap_or_default();

        let id = property(&properties, "id")
            .and_then(as_text)
            .or_else(|| {
                feature.id.map(|id| match id {
                    Id::String(s) => s,
                    Id::Number(n) => n.to_string(),
                })
            })
            .unwrap_or_else(|| index.to_string());
        let label = property(&properties, "label")
            .and_then(as_text)
            .unwrap_or_else(|| UNNAMED_CLUSTER.to_string());
        let magnitude = property(&properties, "case_size")
            .and_then(as_count)
            .unwrap_or(0);

        clusters.push(HazardCluster {
            id,
            label,
            coordinate,
            magnitude,
        });
    }

    log::info!("Reduced {} dengue cluster polygon(s)", clusters.len());

    Ok(clusters)
}
