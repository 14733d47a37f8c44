//! Distance-ring scoring of point observations around a location.
//!
//! Ring membership is cumulative: a cluster 300 m away counts toward the
//! 500 m, 1 km, and 2 km rings alike. The weighted score, however, applies
//! each cluster's innermost ring weight exactly once, so a 25-case cluster
//! at 300 m contributes `25 × 10 = 250` under the default dengue policy.

use health_risk_geo::distance_km;
use health_risk_geo_models::Coordinate;
use health_risk_hazard_models::{HazardCluster, RiskLevel};
use serde::{Deserialize, Serialize};

use crate::classify::ScoreThresholds;
use crate::policy::RingPolicy;

/// The closest observation to the origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NearestCluster {
    /// The observation itself.
    pub cluster: HazardCluster,
    /// Great-circle distance from the origin.
    pub distance_km: f64,
}

/// Result of scoring one origin against a cluster snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterScore {
    /// Σ innermost-ring weight × magnitude.
    pub weighted_score: f64,
    /// Cumulative cluster count per ring index.
    pub bucket_counts: Vec<usize>,
    /// Cumulative magnitude sum per ring index.
    pub bucket_magnitude_sums: Vec<u64>,
    /// Closest cluster, whether or not it falls inside a ring.
    pub nearest: Option<NearestCluster>,
    /// Clusters within the informational radius.
    pub nearby_count: usize,
    /// Magnitude sum within the informational radius.
    pub nearby_magnitude: u64,
}

impl ClusterScore {
    /// Classifies this score with the given thresholds.
    #[must_use]
    pub fn classify(&self, thresholds: &ScoreThresholds) -> RiskLevel {
        thresholds.classify(self.weighted_score, &self.bucket_counts)
    }
}

/// Scores `origin` against every cluster in the snapshot.
///
/// Clusters beyond the outermost ring add nothing to the score but still
/// count as nearby when within `info_radius_km`, and may still be the
/// nearest cluster.
#[must_use]
pub fn score(
    origin: Coordinate,
    clusters: &[HazardCluster],
    policy: &RingPolicy,
    info_radius_km: f64,
) -> ClusterScore {
    let ring_count = policy.rings().len();
    let mut bucket_counts = vec![0usize; ring_count];
    let mut bucket_magnitude_sums = vec![0u64; ring_count];
    let mut weighted_score = 0.0;
    let mut nearest: Option<(&HazardCluster, f64)> = None;
    let mut nearby_count = 0;
    let mut nearby_magnitude = 0u64;

    for cluster in clusters {
        let distance = distance_km(origin, cluster.coordinate);
        let magnitude = u64::from(cluster.magnitude);

        // Strict `<` keeps the earlier cluster on ties.
        if nearest.is_none_or(|(_, best)| distance < best) {
            nearest = Some((cluster, distance));
        }

        if distance <= info_radius_km {
            nearby_count += 1;
            nearby_magnitude += magnitude;
        }

        let Some(innermost) = policy.innermost_containing(distance) else {
            continue;
        };

        weighted_score += policy.rings()[innermost].weight * f64::from(cluster.magnitude);

        for ring in innermost..ring_count {
            bucket_counts[ring] += 1;
            bucket_magnitude_sums[ring] += magnitude;
        }
    }

    log::debug!(
        "Scored {} clusters: weighted={weighted_score:.1} rings={bucket_counts:?} nearby={nearby_count}",
        clusters.len()
    );

    ClusterScore {
        weighted_score,
        bucket_counts,
        bucket_magnitude_sums,
        nearest: nearest.map(|(cluster, distance_km)| NearestCluster {
            cluster: cluster.clone(),
            distance_km,
        }),
        nearby_count,
        nearby_magnitude,
    }
}

/// Formats a ring radius for rationale text ("500 m", "2 km").
#[must_use]
pub fn format_radius(radius_km: f64) -> String {
    if radius_km < 1.0 {
        format!("{:.0} m", radius_km * 1000.0)
    } else if (radius_km - radius_km.round()).abs() < f64::EPSILON {
        format!("{radius_km:.0} km")
    } else {
        format!("{radius_km:.1} km")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use health_risk_geo::distance::EARTH_RADIUS_KM;
    use proptest::prelude::*;

    const WOODLANDS: Coordinate = Coordinate {
        lat: 1.4382,
        lng: 103.7890,
    };

    /// A coordinate `km` kilometres due north of `origin`.
    fn north_of(origin: Coordinate, km: f64) -> Coordinate {
        Coordinate {
            lat: origin.lat + (km / EARTH_RADIUS_KM).to_degrees(),
            lng: origin.lng,
        }
    }

    fn cluster(id: &str, coordinate: Coordinate, magnitude: u32) -> HazardCluster {
        HazardCluster {
            id: id.to_string(),
            label: format!("Cluster {id}"),
            coordinate,
            magnitude,
        }
    }

    #[test]
    fn single_close_cluster_scores_innermost_weight() {
        let clusters = [cluster("a", north_of(WOODLANDS, 0.3), 25)];
        let result = score(WOODLANDS, &clusters, &RingPolicy::dengue_default(), 5.0);

        assert!((result.weighted_score - 250.0).abs() < 1e-9);
        assert_eq!(result.bucket_counts, vec![1, 1, 1]);
        assert_eq!(result.bucket_magnitude_sums, vec![25, 25, 25]);
        assert_eq!(
            result.classify(&ScoreThresholds::default()),
            RiskLevel::VeryHigh
        );

        let nearest = result.nearest.unwrap();
        assert_eq!(nearest.cluster.id, "a");
        assert!((nearest.distance_km - 0.3).abs() < 1e-6);
    }

    #[test]
    fn rings_are_cumulative() {
        let clusters = [
            cluster("inner", north_of(WOODLANDS, 0.4), 4),
            cluster("middle", north_of(WOODLANDS, 0.9), 6),
            cluster("outer", north_of(WOODLANDS, 1.5), 10),
            cluster("beyond", north_of(WOODLANDS, 3.0), 50),
        ];
        let result = score(WOODLANDS, &clusters, &RingPolicy::dengue_default(), 5.0);

        assert_eq!(result.bucket_counts, vec![1, 2, 3]);
        assert_eq!(result.bucket_magnitude_sums, vec![4, 10, 20]);
        // 4×10 + 6×5 + 10×2; the 3 km cluster contributes nothing.
        assert!((result.weighted_score - 90.0).abs() < 1e-9);
        assert_eq!(result.nearby_count, 4);
        assert_eq!(result.nearby_magnitude, 70);
    }

    #[test]
    fn far_cluster_is_nearest_context_only() {
        let clusters = [cluster("far", north_of(WOODLANDS, 7.0), 40)];
        let result = score(WOODLANDS, &clusters, &RingPolicy::dengue_default(), 5.0);

        assert!(result.weighted_score.abs() < f64::EPSILON);
        assert_eq!(result.bucket_counts, vec![0, 0, 0]);
        assert_eq!(result.nearby_count, 0);
        assert_eq!(result.nearest.as_ref().unwrap().cluster.id, "far");
        assert_eq!(
            result.classify(&ScoreThresholds::default()),
            RiskLevel::Low
        );
    }

    #[test]
    fn three_clusters_in_second_ring_is_high() {
        let clusters: Vec<_> = (0..3)
            .map(|i| cluster(&i.to_string(), north_of(WOODLANDS, 0.8), 1))
            .collect();
        let result = score(WOODLANDS, &clusters, &RingPolicy::dengue_default(), 5.0);

        // Score is only 15, but ring occupancy pushes it to High.
        assert!((result.weighted_score - 15.0).abs() < 1e-9);
        assert_eq!(
            result.classify(&ScoreThresholds::default()),
            RiskLevel::High
        );
    }

    #[test]
    fn empty_snapshot_scores_zero() {
        let result = score(WOODLANDS, &[], &RingPolicy::dengue_default(), 5.0);
        assert!(result.weighted_score.abs() < f64::EPSILON);
        assert!(result.nearest.is_none());
        assert_eq!(
            result.classify(&ScoreThresholds::default()),
            RiskLevel::Low
        );
    }

    #[test]
    fn formats_radii() {
        assert_eq!(format_radius(0.5), "500 m");
        assert_eq!(format_radius(1.0), "1 km");
        assert_eq!(format_radius(2.5), "2.5 km");
    }

    proptest! {
        #[test]
        fn score_never_increases_moving_away(
            magnitudes in proptest::collection::vec(0u32..200, 1..8),
            start_km in 0.0f64..3.0,
            step_km in 0.0f64..3.0,
        ) {
            let clusters: Vec<_> = magnitudes
                .iter()
                .enumerate()
                .map(|(i, m)| cluster(&i.to_string(), WOODLANDS, *m))
                .collect();
            let policy = RingPolicy::dengue_default();

            let near = score(north_of(WOODLANDS, start_km), &clusters, &policy, 5.0);
            let far = score(north_of(WOODLANDS, start_km + step_km), &clusters, &policy, 5.0);

            prop_assert!(far.weighted_score <= near.weighted_score);
        }
    }
}
