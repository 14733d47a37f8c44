//! Free-text place-name resolution.
//!
//! The gazetteer is an ordered table of `key → NamedLocation` loaded once
//! at startup. Resolution runs three passes and stops at the first hit:
//!
//! 1. **Exact**: the normalised query equals a key.
//! 2. **Substring**: the query contains a key, or a key contains the
//!    query. The longest matching key wins so "jurong east" beats
//!    "jurong"; equal lengths go to the earlier entry in file order.
//! 3. **Preposition**: the word after `in`, `to`, `near`, … is matched
//!    against the keys with the same substring rule.
//!
//! A miss returns `None`. Callers fall back to a region-wide assessment.

use std::collections::BTreeMap;
use std::path::Path;

use health_risk_geo_models::{Coordinate, NamedLocation, Region};
use serde::{Deserialize, Serialize};

use crate::GazetteerError;
use crate::normalize::normalize;

/// The embedded default table.
const SINGAPORE_TOML: &str = include_str!("../gazetteer/singapore.toml");

#[cfg(test)]
const EXPECTED_ENTRY_COUNT: usize = 49;

/// Queries shorter than this never match as a fragment of a longer key.
const MIN_FRAGMENT_LEN: usize = 3;

/// Tokens that usually introduce a place in conversational text.
const PREPOSITIONS: &[&str] = &[
    "in", "to", "at", "near", "around", "visiting", "from", "towards", "by",
];

#[derive(Debug, Deserialize)]
struct GazetteerFile {
    places: Vec<GazetteerEntry>,
}

#[derive(Debug, Deserialize)]
struct GazetteerEntry {
    key: String,
    name: String,
    lat: f64,
    lng: f64,
    region: Region,
}

/// How a query was matched to a gazetteer entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchMethod {
    /// Normalised query equals the key.
    Exact,
    /// Query and key overlap as substrings.
    Substring,
    /// Found by scanning the word after a preposition.
    Preposition,
}

/// A successful gazetteer lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GazetteerMatch<'a> {
    /// The matched gazetteer key.
    pub key: &'a str,
    /// The resolved location.
    pub location: &'a NamedLocation,
    /// Which pass produced the match.
    pub method: MatchMethod,
}

/// An ordered, read-only place-name table.
#[derive(Debug, Clone)]
pub struct Gazetteer {
    keys: Vec<String>,
    locations: Vec<NamedLocation>,
    /// key → position, for the exact pass.
    index: BTreeMap<String, usize>,
}

impl Default for Gazetteer {
    /// Builds the embedded Singapore gazetteer.
    ///
    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed. The file is compiled in,
    /// so this is a development error caught by the tests below.
    fn default() -> Self {
        Self::from_toml_str(SINGAPORE_TOML)
            .unwrap_or_else(|e| panic!("Failed to parse embedded gazetteer: {e}"))
    }
}

impl Gazetteer {
    /// Parses a gazetteer from TOML (`[[places]]` tables with `key`,
    /// `name`, `lat`, `lng`, `region`).
    ///
    /// # Errors
    ///
    /// Returns [`GazetteerError`] if the TOML is malformed, an entry is
    /// missing a key or name, a coordinate is out of range, or two keys
    /// collide after normalisation.
    pub fn from_toml_str(toml_str: &str) -> Result<Self, GazetteerError> {
        let file: GazetteerFile = toml::de::from_str(toml_str)?;

        let mut keys = Vec::with_capacity(file.places.len());
        let mut locations = Vec::with_capacity(file.places.len());
        let mut index = BTreeMap::new();

        for (i, entry) in file.places.into_iter().enumerate() {
            let key = normalize(&entry.key);
            if key.is_empty() || entry.name.trim().is_empty() {
                return Err(GazetteerError::MissingField { index: i });
            }

            let coordinate = Coordinate::new(entry.lat, entry.lng).map_err(|source| {
                GazetteerError::InvalidCoordinate {
                    key: key.clone(),
                    source,
                }
            })?;

            if index.insert(key.clone(), keys.len()).is_some() {
                return Err(GazetteerError::DuplicateKey { key });
            }

            keys.push(key);
            locations.push(NamedLocation {
                name: entry.name,
                coordinate,
                region: entry.region,
            });
        }

        log::debug!("Loaded gazetteer with {} entries", keys.len());

        Ok(Self {
            keys,
            locations,
            index,
        })
    }

    /// Loads a gazetteer from a TOML file on disk.
    ///
    /// # Errors
    ///
    /// Returns [`GazetteerError`] if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, GazetteerError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Iterates `(key, location)` pairs in file order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &NamedLocation)> {
        self.keys.iter().map(String::as_str).zip(self.locations.iter())
    }

    /// Resolves free text to a known place.
    ///
    /// Returns `None` when nothing matches; that is a normal outcome, not
    /// an error.
    #[must_use]
    pub fn resolve(&self, text: &str) -> Option<GazetteerMatch<'_>> {
        let query = normalize(text);
        if query.is_empty() {
            return None;
        }

        if let Some(&idx) = self.index.get(&query) {
            return Some(self.matched(idx, MatchMethod::Exact));
        }

        if let Some(idx) = self.longest_overlap(&query) {
            return Some(self.matched(idx, MatchMethod::Substring));
        }

        if let Some(idx) = self.preposition_scan(&query) {
            return Some(self.matched(idx, MatchMethod::Preposition));
        }

        log::debug!("Gazetteer miss for '{query}'");
        None
    }

    fn matched(&self, idx: usize, method: MatchMethod) -> GazetteerMatch<'_> {
        GazetteerMatch {
            key: &self.keys[idx],
            location: &self.locations[idx],
            method,
        }
    }

    /// Longest key that overlaps `fragment` in either direction. Strict
    /// `>` keeps the earliest entry on equal lengths.
    fn longest_overlap(&self, fragment: &str) -> Option<usize> {
        let mut best: Option<usize> = None;

        for (idx, key) in self.keys.iter().enumerate() {
            let overlaps = fragment.contains(key.as_str())
                || (fragment.len() >= MIN_FRAGMENT_LEN && key.contains(fragment));
            if !overlaps {
                continue;
            }

            match best {
                Some(current) if self.keys[current].len() >= key.len() => {}
                _ => best = Some(idx),
            }
        }

        best
    }

    fn preposition_scan(&self, query: &str) -> Option<usize> {
        let tokens: Vec<&str> = query.split_whitespace().collect();

        tokens
            .windows(2)
            .filter(|pair| PREPOSITIONS.contains(&pair[0]) && pair[1].len() >= MIN_FRAGMENT_LEN)
            .find_map(|pair| self.longest_overlap(pair[1]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn resolve_name(text: &str) -> Option<String> {
        Gazetteer::default()
            .resolve(text)
            .map(|m| m.location.name.clone())
    }

    #[test]
    fn loads_all_entries() {
        let gazetteer = Gazetteer::default();
        assert_eq!(
            gazetteer.len(),
            EXPECTED_ENTRY_COUNT,
            "Expected {EXPECTED_ENTRY_COUNT} gazetteer entries, found {}. \
             Update EXPECTED_ENTRY_COUNT after adding/removing places.",
            gazetteer.len()
        );
    }

    #[test]
    fn entries_have_unique_normalised_keys() {
        let gazetteer = Gazetteer::default();
        let mut seen = BTreeSet::new();
        for (key, location) in gazetteer.entries() {
            assert!(seen.insert(key), "Duplicate key: {key}");
            assert_eq!(key, normalize(key), "Key {key} is not normalised");
            assert!(!location.name.is_empty(), "Entry {key} has empty name");
        }
    }

    #[test]
    fn exact_match() {
        let gazetteer = Gazetteer::default();
        let m = gazetteer.resolve("  Woodlands ").unwrap();
        assert_eq!(m.method, MatchMethod::Exact);
        assert_eq!(m.location.name, "Woodlands");
        assert_eq!(m.location.region, Region::North);
        assert!((m.location.coordinate.lat - 1.4382).abs() < 1e-9);
    }

    #[test]
    fn prefers_longest_key() {
        let gazetteer = Gazetteer::default();
        let m = gazetteer.resolve("visiting Jurong East tomorrow").unwrap();
        assert_eq!(m.method, MatchMethod::Substring);
        assert_eq!(m.key, "jurong east");
    }

    #[test]
    fn bare_prefix_matches_longer_key() {
        assert_eq!(resolve_name("ang mo").as_deref(), Some("Ang Mo Kio"));
    }

    #[test]
    fn equal_length_tie_goes_to_earlier_entry() {
        // "bedok" and "bugis" are both five characters; Bedok is listed first.
        assert_eq!(resolve_name("from bugis to bedok").as_deref(), Some("Bedok"));
        assert_eq!(resolve_name("from bedok to bugis").as_deref(), Some("Bedok"));
    }

    #[test]
    fn preposition_scan_matches_partial_word() {
        let gazetteer = Gazetteer::default();
        let m = gazetteer.resolve("heading to tamp later").unwrap();
        assert_eq!(m.method, MatchMethod::Preposition);
        assert_eq!(m.location.name, "Tampines");
    }

    #[test]
    fn unknown_place_is_none() {
        assert_eq!(resolve_name("Mars Colony"), None);
    }

    #[test]
    fn empty_and_tiny_queries_are_none() {
        assert_eq!(resolve_name(""), None);
        assert_eq!(resolve_name("  ?? "), None);
        assert_eq!(resolve_name("a"), None);
    }

    #[test]
    fn rejects_out_of_range_coordinates() {
        let toml = r#"
            [[places]]
            key = "nowhere"
            name = "Nowhere"
            lat = 123.0
            lng = 0.0
            region = "NORTH"
        "#;
        assert!(matches!(
            Gazetteer::from_toml_str(toml),
            Err(GazetteerError::InvalidCoordinate { .. })
        ));
    }

    #[test]
    fn rejects_duplicate_keys_after_normalisation() {
        let toml = r#"
            [[places]]
            key = "Bedok"
            name = "Bedok"
            lat = 1.3
            lng = 103.9
            region = "EAST"

            [[places]]
            key = "bedok "
            name = "Bedok Again"
            lat = 1.3
            lng = 103.9
            region = "EAST"
        "#;
        assert!(matches!(
            Gazetteer::from_toml_str(toml),
            Err(GazetteerError::DuplicateKey { .. })
        ));
    }
}
