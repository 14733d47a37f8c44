//! Fuses per-hazard assessments into one [`LocationAnalysis`].

use std::collections::BTreeSet;

use health_risk_geo_models::NamedLocation;
use health_risk_hazard_models::{DataStatus, HazardAssessment, LocationAnalysis};

use crate::advice::overall_advice;
use crate::classify::overall_from_levels;

/// Note attached when the location could not be resolved.
pub const UNRESOLVED_LOCATION_NOTE: &str =
    "Location not recognised; showing a region-wide analysis instead.";

/// Fuses `assessments` for `location`.
///
/// The output is independent of input order: assessments are sorted
/// dengue, air quality, epidemic before anything else is derived from
/// them.
#[must_use]
pub fn aggregate(
    location: Option<&NamedLocation>,
    assessments: &[HazardAssessment],
) -> LocationAnalysis {
    let mut assessments = assessments.to_vec();
    assessments.sort_by(|a, b| {
        a.hazard_kind
            .cmp(&b.hazard_kind)
            .then(a.level.cmp(&b.level))
            .then(a.primary_metric.total_cmp(&b.primary_metric))
    });

    let overall_risk = overall_from_levels(assessments.iter().map(|a| a.level));
    let overall_confidence = assessments
        .iter()
        .map(|a| a.confidence)
        .min()
        .unwrap_or(0);

    let mut seen = BTreeSet::new();
    let mut travel_advice: Vec<String> = assessments
        .iter()
        .flat_map(|a| &a.recommendations)
        .filter(|r| seen.insert(*r))
        .cloned()
        .collect();
    let closing = overall_advice(overall_risk);
    if !travel_advice.iter().any(|r| r == closing) {
        travel_advice.push(closing.to_string());
    }

    let mut notes = Vec::new();
    if location.is_none() {
        notes.push(UNRESOLVED_LOCATION_NOTE.to_string());
    }
    for a in &assessments {
        if a.data_status == DataStatus::Unavailable {
            notes.push(format!(
                "{} data unavailable; a low-risk default was used.",
                a.hazard_kind.label()
            ));
        }
    }

    log::info!(
        "Aggregated {} assessment(s) for {}: overall={overall_risk} confidence={overall_confidence}",
        assessments.len(),
        location.map_or("region-wide", |l| l.name.as_str())
    );

    LocationAnalysis {
        location: location.cloned(),
        assessments,
        overall_risk,
        overall_confidence,
        travel_advice,
        notes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use health_risk_geo_models::{Coordinate, Region};
    use health_risk_hazard_models::{HazardKind, OverallRisk, RiskLevel};
    use proptest::prelude::*;

    fn assessment(kind: HazardKind, level: RiskLevel, confidence: u8) -> HazardAssessment {
        HazardAssessment {
            hazard_kind: kind,
            level,
            primary_metric: f64::from(level.severity()) * 10.0,
            confidence,
            data_status: DataStatus::Hyperlocal,
            air_quality_band: None,
            rationale: vec![format!("{kind} rationale")],
            recommendations: vec![format!("{kind} advice"), "Stay hydrated.".to_string()],
        }
    }

    fn woodlands() -> NamedLocation {
        NamedLocation {
            name: "Woodlands".to_string(),
            coordinate: Coordinate {
                lat: 1.4382,
                lng: 103.7890,
            },
            region: Region::North,
        }
    }

    #[test]
    fn high_high_medium_is_medium() {
        let analysis = aggregate(
            Some(&woodlands()),
            &[
                assessment(HazardKind::Dengue, RiskLevel::High, 90),
                assessment(HazardKind::AirQuality, RiskLevel::High, 70),
                assessment(HazardKind::Epidemic, RiskLevel::Medium, 90),
            ],
        );
        assert_eq!(analysis.overall_risk, OverallRisk::Medium);
        assert_eq!(analysis.overall_confidence, 70);
        assert!(analysis.notes.is_empty());
    }

    #[test]
    fn advice_is_ordered_deduplicated_and_closed_by_overall_tier() {
        let analysis = aggregate(
            Some(&woodlands()),
            &[
                assessment(HazardKind::Epidemic, RiskLevel::VeryHigh, 90),
                assessment(HazardKind::Dengue, RiskLevel::VeryHigh, 90),
                assessment(HazardKind::AirQuality, RiskLevel::High, 90),
            ],
        );
        assert_eq!(
            analysis.travel_advice,
            vec![
                "DENGUE advice".to_string(),
                "Stay hydrated.".to_string(),
                "AIR_QUALITY advice".to_string(),
                "EPIDEMIC advice".to_string(),
                "Consider postponing non-essential travel to this area.".to_string(),
            ]
        );
    }

    #[test]
    fn unresolved_location_and_missing_data_are_noted() {
        let mut missing = assessment(HazardKind::AirQuality, RiskLevel::Low, 25);
        missing.data_status = DataStatus::Unavailable;
        let analysis = aggregate(None, &[missing]);

        assert!(analysis.location.is_none());
        assert_eq!(analysis.notes[0], UNRESOLVED_LOCATION_NOTE);
        assert!(analysis.notes[1].starts_with("Air quality data unavailable"));
    }

    #[test]
    fn empty_input_is_low_with_zero_confidence() {
        let analysis = aggregate(None, &[]);
        assert_eq!(analysis.overall_risk, OverallRisk::Low);
        assert_eq!(analysis.overall_confidence, 0);
    }

    #[test]
    fn aggregate_is_idempotent() {
        let input = [
            assessment(HazardKind::Dengue, RiskLevel::Medium, 90),
            assessment(HazardKind::Epidemic, RiskLevel::Low, 70),
        ];
        let first = serde_json::to_vec(&aggregate(Some(&woodlands()), &input)).unwrap();
        let second = serde_json::to_vec(&aggregate(Some(&woodlands()), &input)).unwrap();
        assert_eq!(first, second);
    }

    fn level_strategy() -> impl Strategy<Value = RiskLevel> {
        prop_oneof![
            Just(RiskLevel::Low),
            Just(RiskLevel::Medium),
            Just(RiskLevel::High),
            Just(RiskLevel::VeryHigh),
        ]
    }

    proptest! {
        #[test]
        fn permuting_input_does_not_change_output(
            dengue in level_strategy(),
            air in level_strategy(),
            epidemic in level_strategy(),
            rotation in 0usize..3,
        ) {
            let mut input = vec![
                assessment(HazardKind::Dengue, dengue, 90),
                assessment(HazardKind::AirQuality, air, 70),
                assessment(HazardKind::Epidemic, epidemic, 90),
            ];
            let baseline = aggregate(Some(&woodlands()), &input);

            input.rotate_left(rotation);
            input.swap(0, 2);
            let permuted = aggregate(Some(&woodlands()), &input);

            prop_assert_eq!(baseline, permuted);
        }
    }
}
