#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Geospatial primitives for hyperlocal risk lookups.
//!
//! Two pieces live here:
//!
//! 1. [`distance`]: haversine great-circle distance between two
//!    [`Coordinate`]s.
//! 2. [`gazetteer`]: resolves free-text place names ("jurong east",
//!    "heading to tampines later") to a [`NamedLocation`] using exact,
//!    longest-substring, and preposition-scan matching against a curated
//!    table embedded from `gazetteer/`.
//!
//! [`Coordinate`]: health_risk_geo_models::Coordinate
//! [`NamedLocation`]: health_risk_geo_models::NamedLocation

pub mod distance;
pub mod gazetteer;
pub mod normalize;

pub use distance::distance_km;
pub use gazetteer::{Gazetteer, GazetteerMatch, MatchMethod};

use thiserror::Error;

/// Errors raised while loading a gazetteer table.
#[derive(Debug, Error)]
pub enum GazetteerError {
    /// The TOML document could not be parsed.
    #[error("Gazetteer parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// The gazetteer file could not be read.
    #[error("Gazetteer I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An entry has coordinates outside the WGS-84 range.
    #[error("Gazetteer entry '{key}' has an invalid coordinate: {source}")]
    InvalidCoordinate {
        /// The offending entry key.
        key: String,
        /// The underlying range error.
        source: health_risk_geo_models::InvalidCoordinateError,
    },

    /// Two entries normalise to the same key.
    #[error("Duplicate gazetteer key: {key}")]
    DuplicateKey {
        /// The duplicated key.
        key: String,
    },

    /// An entry has an empty key or name.
    #[error("Gazetteer entry #{index} is missing a key or name")]
    MissingField {
        /// Zero-based position of the entry in the file.
        index: usize,
    },
}
