//! Place-name normalisation.
//!
//! Applied symmetrically to gazetteer keys at load time and to queries at
//! lookup time, so "Jurong  East!" and "jurong east" compare equal.

use regex::Regex;
use std::sync::LazyLock;

/// Characters that never contribute to place-name matching. Apostrophes
/// and hyphens survive because they appear inside real names.
static PUNCTUATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9'\-\s]+").expect("valid regex"));

/// Normalises a place name or free-text query.
///
/// The pipeline:
/// 1. Lowercase
/// 2. Replace punctuation with spaces
/// 3. Collapse whitespace
/// 4. Trim
#[must_use]
pub fn normalize(input: &str) -> String {
    let lower = input.to_lowercase();
    let no_punct = PUNCTUATION_RE.replace_all(&lower, " ");
    no_punct.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_trims() {
        assert_eq!(normalize("  Jurong East "), "jurong east");
    }

    #[test]
    fn strips_punctuation() {
        assert_eq!(normalize("Is Bedok safe?!"), "is bedok safe");
        assert_eq!(normalize("tampines, tomorrow."), "tampines tomorrow");
    }

    #[test]
    fn collapses_whitespace() {
        assert_eq!(normalize("ang   mo\tkio"), "ang mo kio");
    }

    #[test]
    fn keeps_apostrophes_and_hyphens() {
        assert_eq!(normalize("St. John's Island"), "st john's island");
        assert_eq!(normalize("Pulau Ubin-East"), "pulau ubin-east");
    }

    #[test]
    fn empty_input_normalises_to_empty() {
        assert_eq!(normalize("   ?! "), "");
    }
}
