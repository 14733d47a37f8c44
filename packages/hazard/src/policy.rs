//! Tunable scoring policy: distance rings and classification tables.
//!
//! Loaded once at startup (usually from the engine's TOML config) and
//! never mutated afterwards.

use health_risk_hazard_models::DistanceRing;
use serde::{Deserialize, Serialize};

use crate::PolicyError;
use crate::classify::{
    ADMISSION_THRESHOLDS, HYPERLOCAL_DENGUE_CASE_THRESHOLDS, LevelThresholds,
    REGION_DENGUE_THRESHOLDS, ScoreThresholds,
};

/// Ordered, validated distance rings, innermost first.
///
/// Radii strictly increase and weights never increase, so a closer
/// observation never weighs less than a farther one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<DistanceRing>", into = "Vec<DistanceRing>")]
pub struct RingPolicy {
    rings: Vec<DistanceRing>,
}

impl RingPolicy {
    /// Validates and wraps a ring list.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError`] if the list is empty, a radius is not
    /// positive and strictly increasing, or a weight is negative or grows
    /// with distance.
    pub fn new(rings: Vec<DistanceRing>) -> Result<Self, PolicyError> {
        if rings.is_empty() {
            return Err(PolicyError::EmptyRings);
        }

        let mut previous: Option<DistanceRing> = None;
        for (index, ring) in rings.iter().enumerate() {
            let radius_ok = ring.radius_km.is_finite()
                && ring.radius_km > 0.0
                && previous.is_none_or(|p| ring.radius_km > p.radius_km);
            if !radius_ok {
                return Err(PolicyError::InvalidRadius {
                    index,
                    radius_km: ring.radius_km,
                });
            }

            let weight_ok = ring.weight.is_finite()
                && ring.weight >= 0.0
                && previous.is_none_or(|p| ring.weight <= p.weight);
            if !weight_ok {
                return Err(PolicyError::InvalidWeight {
                    index,
                    weight: ring.weight,
                });
            }

            previous = Some(*ring);
        }

        Ok(Self { rings })
    }

    /// Dengue policy: 500 m ×10, 1 km ×5, 2 km ×2.
    #[must_use]
    pub fn dengue_default() -> Self {
        Self {
            rings: vec![
                DistanceRing {
                    radius_km: 0.5,
                    weight: 10.0,
                },
                DistanceRing {
                    radius_km: 1.0,
                    weight: 5.0,
                },
                DistanceRing {
                    radius_km: 2.0,
                    weight: 2.0,
                },
            ],
        }
    }

    /// Hospital policy: 2 km ×1.0, 5 km ×0.6, 10 km ×0.3.
    #[must_use]
    pub fn hospital_default() -> Self {
        Self {
            rings: vec![
                DistanceRing {
                    radius_km: 2.0,
                    weight: 1.0,
                },
                DistanceRing {
                    radius_km: 5.0,
                    weight: 0.6,
                },
                DistanceRing {
                    radius_km: 10.0,
                    weight: 0.3,
                },
            ],
        }
    }

    /// The rings, innermost first.
    #[must_use]
    pub fn rings(&self) -> &[DistanceRing] {
        &self.rings
    }

    /// Radius of the outermost ring.
    #[must_use]
    pub fn outer_radius_km(&self) -> f64 {
        self.rings.last().map_or(0.0, |r| r.radius_km)
    }

    /// Index of the innermost ring whose radius covers `distance_km`.
    #[must_use]
    pub fn innermost_containing(&self, distance_km: f64) -> Option<usize> {
        self.rings.iter().position(|r| distance_km <= r.radius_km)
    }
}

impl TryFrom<Vec<DistanceRing>> for RingPolicy {
    type Error = PolicyError;

    fn try_from(rings: Vec<DistanceRing>) -> Result<Self, Self::Error> {
        Self::new(rings)
    }
}

impl From<RingPolicy> for Vec<DistanceRing> {
    fn from(policy: RingPolicy) -> Self {
        policy.rings
    }
}

/// Everything the assessors need to score and classify observations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssessmentPolicy {
    /// Rings for dengue cluster scoring.
    pub dengue_rings: RingPolicy,
    /// Rings for hospital admission weighting.
    pub hospital_rings: RingPolicy,
    /// Radius within which clusters are reported as "nearby" context.
    pub info_radius_km: f64,
    /// Cut-offs for the weighted dengue score.
    pub dengue_score: ScoreThresholds,
    /// Bands for the island-wide dengue case total.
    pub region_dengue_cases: LevelThresholds,
    /// Bands for projected dengue cases near a location.
    pub hyperlocal_dengue_cases: LevelThresholds,
    /// Bands for weighted hospital admissions.
    pub admissions: LevelThresholds,
}

impl Default for AssessmentPolicy {
    fn default() -> Self {
        Self {
            dengue_rings: RingPolicy::dengue_default(),
            hospital_rings: RingPolicy::hospital_default(),
            info_radius_km: 5.0,
            dengue_score: ScoreThresholds::default(),
            region_dengue_cases: REGION_DENGUE_THRESHOLDS,
            hyperlocal_dengue_cases: HYPERLOCAL_DENGUE_CASE_THRESHOLDS,
            admissions: ADMISSION_THRESHOLDS,
        }
    }
}

impl AssessmentPolicy {
    /// Checks the parts that deserialisation alone cannot.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError`] if the informational radius is not positive
    /// or a threshold table is out of order.
    pub fn validate(&self) -> Result<(), PolicyError> {
        if !self.info_radius_km.is_finite() || self.info_radius_km <= 0.0 {
            return Err(PolicyError::InvalidInfoRadius {
                radius_km: self.info_radius_km,
            });
        }
        self.dengue_score.validate()?;
        self.region_dengue_cases.validate("region_dengue_cases")?;
        self.hyperlocal_dengue_cases
            .validate("hyperlocal_dengue_cases")?;
        self.admissions.validate("admissions")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring(radius_km: f64, weight: f64) -> DistanceRing {
        DistanceRing { radius_km, weight }
    }

    #[test]
    fn default_policies_are_valid() {
        assert!(RingPolicy::new(RingPolicy::dengue_default().rings().to_vec()).is_ok());
        assert!(RingPolicy::new(RingPolicy::hospital_default().rings().to_vec()).is_ok());
        assert!(AssessmentPolicy::default().validate().is_ok());
    }

    #[test]
    fn rejects_empty_policy() {
        assert_eq!(RingPolicy::new(vec![]), Err(PolicyError::EmptyRings));
    }

    #[test]
    fn rejects_weight_growing_with_distance() {
        let err = RingPolicy::new(vec![ring(0.5, 2.0), ring(1.0, 5.0)]).unwrap_err();
        assert!(matches!(err, PolicyError::InvalidWeight { index: 1, .. }));
    }

    #[test]
    fn rejects_non_increasing_radius() {
        let err = RingPolicy::new(vec![ring(1.0, 5.0), ring(1.0, 2.0)]).unwrap_err();
        assert!(matches!(err, PolicyError::InvalidRadius { index: 1, .. }));
        assert!(RingPolicy::new(vec![ring(0.0, 1.0)]).is_err());
    }

    #[test]
    fn innermost_ring_lookup() {
        let policy = RingPolicy::dengue_default();
        assert_eq!(policy.innermost_containing(0.3), Some(0));
        assert_eq!(policy.innermost_containing(0.5), Some(0));
        assert_eq!(policy.innermost_containing(0.8), Some(1));
        assert_eq!(policy.innermost_containing(1.9), Some(2));
        assert_eq!(policy.innermost_containing(2.1), None);
        assert!((policy.outer_radius_km() - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn deserializes_and_validates_from_toml() {
        let toml_str = r"
            info_radius_km = 4.0
            dengue_rings = [
                { radius_km = 0.25, weight = 8.0 },
                { radius_km = 1.0, weight = 4.0 },
            ]
        ";
        let policy: AssessmentPolicy = toml::de::from_str(toml_str).unwrap();
        assert_eq!(policy.dengue_rings.rings().len(), 2);
        assert_eq!(policy.hospital_rings, RingPolicy::hospital_default());
        assert!((policy.info_radius_km - 4.0).abs() < f64::EPSILON);

        let bad = r"
            dengue_rings = [
                { radius_km = 1.0, weight = 1.0 },
                { radius_km = 2.0, weight = 3.0 },
            ]
        ";
        assert!(toml::de::from_str::<AssessmentPolicy>(bad).is_err());
    }
}
