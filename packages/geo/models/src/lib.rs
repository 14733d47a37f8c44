#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Coordinate and place types shared by the gazetteer, the hazard
//! scorers, and the forecast engine.
//!
//! Every type here is an immutable value. Coordinates are WGS-84 degrees;
//! range checking happens once at the gazetteer boundary via
//! [`Coordinate::new`].

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// A WGS-84 latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coordinate {
    /// Latitude in degrees (-90 to 90).
    pub lat: f64,
    /// Longitude in degrees (-180 to 180).
    pub lng: f64,
}

impl Coordinate {
    /// Creates a coordinate, rejecting values outside the WGS-84 range.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidCoordinateError`] if either component is not
    /// finite or is out of range.
    pub fn new(lat: f64, lng: f64) -> Result<Self, InvalidCoordinateError> {
        if !lat.is_finite() || !lng.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(InvalidCoordinateError { lat, lng });
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(InvalidCoordinateError { lat, lng });
        }
        Ok(Self { lat, lng })
    }
}

/// Error returned when a [`Coordinate`] is outside the WGS-84 range.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
#[error("invalid coordinate ({lat}, {lng}): expected lat in [-90, 90] and lng in [-180, 180]")]
pub struct InvalidCoordinateError {
    /// The rejected latitude.
    pub lat: f64,
    /// The rejected longitude.
    pub lng: f64,
}

/// Reporting region used to select a regional air-quality reading.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum Region {
    /// Northern region.
    North,
    /// Southern region.
    South,
    /// Eastern region.
    East,
    /// Western region.
    West,
    /// Central region.
    Central,
}

impl Region {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::North,
            Self::South,
            Self::East,
            Self::West,
            Self::Central,
        ]
    }
}

/// A gazetteer entry: a display name plus its coordinate and region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamedLocation {
    /// Human-readable place name (e.g. "Jurong East").
    pub name: String,
    /// Representative coordinate for the place.
    pub coordinate: Coordinate,
    /// Reporting region the place belongs to.
    pub region: Region,
}
