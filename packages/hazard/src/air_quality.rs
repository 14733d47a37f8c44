//! Air-quality assessor.

use health_risk_geo_models::Region;
use health_risk_hazard_models::{
    AirQualityBand, DataStatus, HazardAssessment, HazardKind, PsiReadings, RiskLevel,
};

use crate::advice;
use crate::classify::{
    HYPERLOCAL_CONFIDENCE, REGION_WIDE_CONFIDENCE, UNAVAILABLE_CONFIDENCE, band_level, psi_band,
};

/// Assesses air quality from the regional PSI reading, falling back to the
/// national figure when no region is known or the region has no reading.
///
/// Non-finite or negative readings are treated as missing.
#[must_use]
pub fn assess_air_quality(
    region: Option<Region>,
    readings: Option<&PsiReadings>,
) -> HazardAssessment {
    let reading = readings.and_then(|r| r.for_region(region));

    let Some((psi, is_regional)) = reading else {
        log::warn!("PSI reading unavailable, using default assessment");
        return unavailable();
    };

    let band = psi_band(psi);
    let level = band_level(band);

    let source = match (is_regional, region) {
        (true, Some(region)) => format!("{} region", region.as_ref().to_lowercase()),
        _ => "national".to_string(),
    };

    let mut rationale = vec![format!("PSI {psi:.0} ({source} reading): {}.", band.label())];
    if !is_regional && region.is_some() {
        rationale.push("No regional PSI reading; using the national figure.".to_string());
    }

    log::debug!("Air quality: psi={psi} band={band} level={level}");

    HazardAssessment {
        hazard_kind: HazardKind::AirQuality,
        level,
        primary_metric: psi,
        confidence: if is_regional {
            HYPERLOCAL_CONFIDENCE
        } else {
            REGION_WIDE_CONFIDENCE
        },
        data_status: if is_regional {
            DataStatus::Hyperlocal
        } else {
            DataStatus::RegionWide
        },
        air_quality_band: Some(band),
        rationale,
        recommendations: advice::air_advice(band, psi),
    }
}

fn unavailable() -> HazardAssessment {
    HazardAssessment {
        hazard_kind: HazardKind::AirQuality,
        level: RiskLevel::Low,
        primary_metric: 0.0,
        confidence: UNAVAILABLE_CONFIDENCE,
        data_status: DataStatus::Unavailable,
        air_quality_band: Some(AirQualityBand::Good),
        rationale: vec![advice::unavailable_rationale(HazardKind::AirQuality)],
        recommendations: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn national(psi: f64) -> PsiReadings {
        PsiReadings {
            national: Some(psi),
            regional: BTreeMap::new(),
        }
    }

    #[test]
    fn psi_55_is_moderate() {
        let a = assess_air_quality(None, Some(&national(55.0)));
        assert_eq!(a.level, RiskLevel::Medium);
        assert_eq!(a.air_quality_band, Some(AirQualityBand::Moderate));
        assert_eq!(a.data_status, DataStatus::RegionWide);
    }

    #[test]
    fn psi_250_is_very_unhealthy_with_advisories() {
        let a = assess_air_quality(None, Some(&national(250.0)));
        assert_eq!(a.air_quality_band, Some(AirQualityBand::VeryUnhealthy));
        assert_eq!(a.level, RiskLevel::VeryHigh);
        assert!(a.recommendations.contains(&advice::N95_ADVICE.to_string()));
        assert!(a.recommendations.contains(&advice::INDOORS_ADVICE.to_string()));
    }

    #[test]
    fn negative_regional_reading_falls_back_to_national() {
        let readings = PsiReadings {
            national: Some(60.0),
            regional: BTreeMap::from([(Region::North, -1.0)]),
        };
        let a = assess_air_quality(Some(Region::North), Some(&readings));
        assert_eq!(a.data_status, DataStatus::RegionWide);
        assert!((a.primary_metric - 60.0).abs() < f64::EPSILON);
        assert_eq!(a.air_quality_band, Some(AirQualityBand::Moderate));
        assert_eq!(a.rationale.len(), 2, "{:?}", a.rationale);
    }

    #[test]
    fn prefers_regional_reading() {
        let readings = PsiReadings {
            national: Some(40.0),
            regional: BTreeMap::from([(Region::North, 120.0)]),
        };
        let a = assess_air_quality(Some(Region::North), Some(&readings));
        assert!((a.primary_metric - 120.0).abs() < f64::EPSILON);
        assert_eq!(a.data_status, DataStatus::Hyperlocal);
        assert!(a.rationale[0].contains("north region"), "{:?}", a.rationale);

        let east = assess_air_quality(Some(Region::East), Some(&readings));
        assert!((east.primary_metric - 40.0).abs() < f64::EPSILON);
        assert_eq!(east.rationale.len(), 2);
    }

    #[test]
    fn missing_or_invalid_reading_is_unavailable() {
        for readings in [None, Some(national(f64::NAN)), Some(PsiReadings::default())] {
            let a = assess_air_quality(Some(Region::West), readings.as_ref());
            assert_eq!(a.level, RiskLevel::Low);
            assert_eq!(a.data_status, DataStatus::Unavailable);
            assert_eq!(a.confidence, UNAVAILABLE_CONFIDENCE);
        }
    }
}
