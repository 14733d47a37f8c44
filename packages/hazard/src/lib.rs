#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Current-condition hazard assessment.
//!
//! Scores a location against immutable snapshots of hazard observations
//! and fuses the results:
//!
//! - [`cluster`] buckets point observations into cumulative distance rings
//!   and computes a distance-decayed weighted score.
//! - [`dengue`], [`air_quality`], and [`epidemic`] turn raw observations
//!   into a [`HazardAssessment`] each, degrading to a documented default
//!   when the provider had nothing.
//! - [`aggregate`] fuses the per-hazard assessments into a
//!   [`LocationAnalysis`].
//! - [`classify`] and [`advice`] hold the threshold tables and advisory
//!   text shared with the forecast path.
//!
//! Every function here is pure and synchronous.
//!
//! [`HazardAssessment`]: health_risk_hazard_models::HazardAssessment
//! [`LocationAnalysis`]: health_risk_hazard_models::LocationAnalysis

pub mod advice;
pub mod aggregate;
pub mod air_quality;
pub mod classify;
pub mod cluster;
pub mod dengue;
pub mod epidemic;
pub mod policy;

pub use aggregate::aggregate;
pub use policy::{AssessmentPolicy, RingPolicy};

use thiserror::Error;

/// Errors raised while validating an assessment policy.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PolicyError {
    /// A ring policy had no rings.
    #[error("Ring policy must contain at least one ring")]
    EmptyRings,

    /// A ring radius was not a positive finite number or did not grow.
    #[error("Ring #{index} radius {radius_km} km must be finite, positive, and larger than the previous ring")]
    InvalidRadius {
        /// Zero-based ring position.
        index: usize,
        /// The offending radius.
        radius_km: f64,
    },

    /// A ring weight was negative, non-finite, or larger than an inner ring's.
    #[error("Ring #{index} weight {weight} must be finite, non-negative, and no larger than the previous ring")]
    InvalidWeight {
        /// Zero-based ring position.
        index: usize,
        /// The offending weight.
        weight: f64,
    },

    /// A threshold table was not ordered from most to least severe.
    #[error("Threshold table '{name}' must satisfy very_high >= high >= medium")]
    UnorderedThresholds {
        /// Which table failed.
        name: &'static str,
    },

    /// The informational radius was not positive.
    #[error("Informational radius {radius_km} km must be finite and positive")]
    InvalidInfoRadius {
        /// The offending radius.
        radius_km: f64,
    },
}
