//! Hospital-load assessor.
//!
//! Hospital admissions are point observations like dengue clusters; the
//! assessor weights each hospital's admissions by its innermost ring and
//! classifies the weighted sum against the admission bands.

use health_risk_geo_models::Coordinate;
use health_risk_hazard_models::{
    DataStatus, HazardAssessment, HazardCluster, HazardKind, RiskLevel,
};

use crate::advice;
use crate::classify::{HYPERLOCAL_CONFIDENCE, REGION_WIDE_CONFIDENCE, UNAVAILABLE_CONFIDENCE};
use crate::cluster::{self, format_radius};
use crate::policy::AssessmentPolicy;

/// Distance-weighted admissions around `origin`.
#[must_use]
pub fn weighted_admissions(
    origin: Coordinate,
    hospitals: &[HazardCluster],
    policy: &AssessmentPolicy,
) -> f64 {
    cluster::score(origin, hospitals, &policy.hospital_rings, policy.info_radius_km).weighted_score
}

/// Mean admissions per reporting hospital, 0 when none report.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn mean_admissions(hospitals: &[HazardCluster]) -> f64 {
    if hospitals.is_empty() {
        return 0.0;
    }
    let total: u64 = hospitals.iter().map(|h| u64::from(h.magnitude)).sum();
    total as f64 / hospitals.len() as f64
}

/// Assesses hospital load.
#[must_use]
pub fn assess_epidemic(
    origin: Option<Coordinate>,
    hospitals: Option<&[HazardCluster]>,
    policy: &AssessmentPolicy,
) -> HazardAssessment {
    let Some(hospitals) = hospitals else {
        log::warn!("Hospital admission data unavailable, using default assessment");
        return unavailable();
    };

    let (metric, status, confidence, mut rationale) = match origin {
        Some(origin) => {
            let result =
                cluster::score(origin, hospitals, &policy.hospital_rings, policy.info_radius_km);
            let mut rationale = vec![format!(
                "{} hospital(s) within {} reporting {} admission(s).",
                result.bucket_counts.last().copied().unwrap_or(0),
                format_radius(policy.hospital_rings.outer_radius_km()),
                result.bucket_magnitude_sums.last().copied().unwrap_or(0)
            )];
            if let Some(nearest) = &result.nearest {
                rationale.push(format!(
                    "Nearest hospital: {} ({} admissions) {:.1} km away.",
                    nearest.cluster.label, nearest.cluster.magnitude, nearest.distance_km
                ));
            }
            (
                result.weighted_score,
                DataStatus::Hyperlocal,
                HYPERLOCAL_CONFIDENCE,
                rationale,
            )
        }
        None => (
            mean_admissions(hospitals),
            DataStatus::RegionWide,
            REGION_WIDE_CONFIDENCE,
            vec![format!(
                "Location not resolved; using mean admissions across {} hospital(s).",
                hospitals.len()
            )],
        ),
    };

    let level = policy.admissions.classify(metric);
    rationale.push(format!("Weighted admissions: {metric:.1}."));

    log::debug!("Hospital load: metric={metric:.1} level={level}");

    HazardAssessment {
        hazard_kind: HazardKind::Epidemic,
        level,
        primary_metric: metric,
        confidence,
        data_status: status,
        air_quality_band: None,
        rationale,
        recommendations: advice::epidemic_advice(level),
    }
}

fn unavailable() -> HazardAssessment {
    HazardAssessment {
        hazard_kind: HazardKind::Epidemic,
        level: RiskLevel::Low,
        primary_metric: 0.0,
        confidence: UNAVAILABLE_CONFIDENCE,
        data_status: DataStatus::Unavailable,
        air_quality_band: None,
        rationale: vec![advice::unavailable_rationale(HazardKind::Epidemic)],
        recommendations: advice::epidemic_advice(RiskLevel::Low),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use health_risk_geo::distance::EARTH_RADIUS_KM;

    const ORIGIN: Coordinate = Coordinate {
        lat: 1.3521,
        lng: 103.8198,
    };

    fn hospital(km: f64, admissions: u32) -> HazardCluster {
        HazardCluster {
            id: format!("h-{km}"),
            label: format!("Hospital {km}"),
            coordinate: Coordinate {
                lat: ORIGIN.lat + (km / EARTH_RADIUS_KM).to_degrees(),
                lng: ORIGIN.lng,
            },
            magnitude: admissions,
        }
    }

    #[test]
    fn weights_admissions_by_ring() {
        let hospitals = vec![hospital(1.0, 20), hospital(4.0, 20), hospital(8.0, 20)];
        // 20×1.0 + 20×0.6 + 20×0.3 = 38.
        let weighted = weighted_admissions(ORIGIN, &hospitals, &AssessmentPolicy::default());
        assert!((weighted - 38.0).abs() < 1e-9);

        let a = assess_epidemic(
            Some(ORIGIN),
            Some(hospitals.as_slice()),
            &AssessmentPolicy::default(),
        );
        assert_eq!(a.level, RiskLevel::High);
        assert_eq!(a.data_status, DataStatus::Hyperlocal);
        assert!(a.rationale[0].starts_with("3 hospital(s) within 10 km"));
    }

    #[test]
    fn hospitals_beyond_outer_ring_are_ignored() {
        let hospitals = vec![hospital(15.0, 500)];
        let a = assess_epidemic(
            Some(ORIGIN),
            Some(hospitals.as_slice()),
            &AssessmentPolicy::default(),
        );
        assert_eq!(a.level, RiskLevel::Low);
        assert!(a.primary_metric.abs() < f64::EPSILON);
    }

    #[test]
    fn region_wide_uses_mean() {
        let hospitals = vec![hospital(1.0, 10), hospital(30.0, 50)];
        let a = assess_epidemic(None, Some(hospitals.as_slice()), &AssessmentPolicy::default());
        assert!((a.primary_metric - 30.0).abs() < f64::EPSILON);
        // Exactly 30 is not above the High bound.
        assert_eq!(a.level, RiskLevel::Medium);
        assert_eq!(a.data_status, DataStatus::RegionWide);
        assert!((mean_admissions(&[]) - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn missing_data_degrades_to_low() {
        let a = assess_epidemic(Some(ORIGIN), None, &AssessmentPolicy::default());
        assert_eq!(a.level, RiskLevel::Low);
        assert_eq!(a.data_status, DataStatus::Unavailable);
    }
}
