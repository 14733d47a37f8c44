//! Dengue assessor.
//!
//! Scores a resolved location against cluster centroids when both are
//! available. Without a location it classifies the island-wide case total;
//! without cluster data it returns a low-confidence default.

use health_risk_geo_models::Coordinate;
use health_risk_hazard_models::{
    DataStatus, HazardAssessment, HazardCluster, HazardKind, RiskLevel,
};

use crate::advice;
use crate::classify::{HYPERLOCAL_CONFIDENCE, REGION_WIDE_CONFIDENCE, UNAVAILABLE_CONFIDENCE};
use crate::cluster::{self, format_radius};
use crate::policy::AssessmentPolicy;

/// Total case count across every cluster.
#[must_use]
pub fn total_cases(clusters: &[HazardCluster]) -> u64 {
    clusters.iter().map(|c| u64::from(c.magnitude)).sum()
}

/// Assesses dengue risk.
#[must_use]
pub fn assess_dengue(
    origin: Option<Coordinate>,
    clusters: Option<&[HazardCluster]>,
    policy: &AssessmentPolicy,
) -> HazardAssessment {
    let Some(clusters) = clusters else {
        log::warn!("Dengue cluster data unavailable, using default assessment");
        return unavailable();
    };

    match origin {
        Some(origin) => hyperlocal(origin, clusters, policy),
        None => region_wide(clusters, policy),
    }
}

fn hyperlocal(
    origin: Coordinate,
    clusters: &[HazardCluster],
    policy: &AssessmentPolicy,
) -> HazardAssessment {
    let result = cluster::score(
        origin,
        clusters,
        &policy.dengue_rings,
        policy.info_radius_km,
    );
    let level = result.classify(&policy.dengue_score);

    let mut rationale = Vec::new();
    match &result.nearest {
        Some(nearest) => rationale.push(format!(
            "Nearest dengue cluster: {} ({} cases) {:.1} km away.",
            nearest.cluster.label, nearest.cluster.magnitude, nearest.distance_km
        )),
        None => rationale.push("No active dengue clusters reported.".to_string()),
    }

    for (ring, (count, cases)) in policy
        .dengue_rings
        .rings()
        .iter()
        .zip(result.bucket_counts.iter().zip(&result.bucket_magnitude_sums))
    {
        rationale.push(format!(
            "Within {}: {count} cluster(s), {cases} case(s).",
            format_radius(ring.radius_km)
        ));
    }

    if result.nearby_count > 0 {
        rationale.push(format!(
            "{} cluster(s) with {} case(s) within {}.",
            result.nearby_count,
            result.nearby_magnitude,
            format_radius(policy.info_radius_km)
        ));
    }

    rationale.push(format!(
        "Distance-weighted dengue score: {:.1}.",
        result.weighted_score
    ));

    log::debug!(
        "Dengue hyperlocal: score={:.1} level={level}",
        result.weighted_score
    );

    HazardAssessment {
        hazard_kind: HazardKind::Dengue,
        level,
        primary_metric: result.weighted_score,
        confidence: HYPERLOCAL_CONFIDENCE,
        data_status: DataStatus::Hyperlocal,
        air_quality_band: None,
        rationale,
        recommendations: advice::dengue_advice(level),
    }
}

#[allow(clippy::cast_precision_loss)]
fn region_wide(clusters: &[HazardCluster], policy: &AssessmentPolicy) -> HazardAssessment {
    let total = total_cases(clusters);
    let level = policy.region_dengue_cases.classify(total as f64);

    HazardAssessment {
        hazard_kind: HazardKind::Dengue,
        level,
        primary_metric: total as f64,
        confidence: REGION_WIDE_CONFIDENCE,
        data_status: DataStatus::RegionWide,
        air_quality_band: None,
        rationale: vec![
            "Location not resolved; using island-wide dengue totals.".to_string(),
            format!(
                "{total} case(s) across {} active cluster(s) island-wide.",
                clusters.len()
            ),
        ],
        recommendations: advice::dengue_advice(level),
    }
}

fn unavailable() -> HazardAssessment {
    HazardAssessment {
        hazard_kind: HazardKind::Dengue,
        level: RiskLevel::Low,
        primary_metric: 0.0,
        confidence: UNAVAILABLE_CONFIDENCE,
        data_status: DataStatus::Unavailable,
        air_quality_band: None,
        rationale: vec![advice::unavailable_rationale(HazardKind::Dengue)],
        recommendations: advice::dengue_advice(RiskLevel::Low),
    }
}
