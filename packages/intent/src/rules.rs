//! The ordered rule list behind [`classify`](crate::classify).
//!
//! Each rule inspects the raw message and either claims it or passes.
//! Order matters: a forecast question about a trip ("should I go to Bedok
//! tomorrow?") is a [`Intent::Prediction`], not [`Intent::TravelAdvice`].

use std::sync::LazyLock;

use regex::Regex;

use crate::extract::{horizon_days, location_phrase};
use crate::{Intent, Topic};

/// A single classification rule.
pub type Rule = fn(&str) -> Option<Intent>;

/// Rules in evaluation order. Anything left over is
/// [`Intent::GeneralChat`].
pub const RULES: &[Rule] = &[prediction, travel_advice, explanation, location_query];

static PREDICTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(forecasts?|predict(ion)?s?|outlook|projection|tomorrow|next\s+(few\s+)?(days?|week)|this\s+week|in\s+\d+\s+(days?|weeks?)|\d+[\s-]+days?\s+ahead|will\s+(it|there)|going\s+to\s+be)\b",
    )
    .expect("valid regex")
});

static TRAVEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(travel(l?ing)?|trip|visit(ing)?|go(ing)?\s+to|head(ing)?\s+to|should\s+i\s+go|safe\s+to\s+go)\b",
    )
    .expect("valid regex")
});

static EXPLAIN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(explain|what\s+(is|are|does|do)|what's|meaning\s+of|how\s+(is|are|does|do)\b.*\b(work|calculated|measured|scored|decided))\b",
    )
    .expect("valid regex")
});

static RISK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(risk|safe|safety|dengue|psi|haze|air|hospital|situation|status|conditions?|health|outbreak)\b",
    )
    .expect("valid regex")
});

static DENGUE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(dengue|mosquito(es)?|aedes|clusters?)\b").expect("valid regex")
});

static AIR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(psi|haze|air|pollution|smog)\b").expect("valid regex")
});

static EPIDEMIC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(hospitals?|flu|influenza|epidemic|outbreaks?|admissions?|covid)\b")
        .expect("valid regex")
});

static RISK_LEVEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(risk|levels?|scores?|ratings?|confidence)\b").expect("valid regex")
});

fn location_or_message(message: &str) -> String {
    location_phrase(message).unwrap_or_else(|| message.trim().to_string())
}

/// Which subject a question is about, if any.
#[must_use]
pub fn topic(message: &str) -> Option<Topic> {
    if DENGUE_RE.is_match(message) {
        Some(Topic::Dengue)
    } else if AIR_RE.is_match(message) {
        Some(Topic::AirQuality)
    } else if EPIDEMIC_RE.is_match(message) {
        Some(Topic::Epidemic)
    } else if RISK_LEVEL_RE.is_match(message) {
        Some(Topic::RiskLevels)
    } else {
        None
    }
}

/// Forecast wording or a future time reference.
#[must_use]
pub fn prediction(message: &str) -> Option<Intent> {
    PREDICTION_RE.is_match(message).then(|| Intent::Prediction {
        location: location_or_message(message),
        horizon_days: horizon_days(message),
    })
}

/// Trip or visit wording.
#[must_use]
pub fn travel_advice(message: &str) -> Option<Intent> {
    TRAVEL_RE.is_match(message).then(|| Intent::TravelAdvice {
        location: location_or_message(message),
    })
}

/// A "what is" style question about a known topic that names no place.
#[must_use]
pub fn explanation(message: &str) -> Option<Intent> {
    if !EXPLAIN_RE.is_match(message) || location_phrase(message).is_some() {
        return None;
    }
    topic(message).map(|topic| Intent::Explanation { topic })
}

/// A place phrase or any risk wording.
#[must_use]
pub fn location_query(message: &str) -> Option<Intent> {
    if let Some(location) = location_phrase(message) {
        return Some(Intent::LocationQuery { location });
    }
    RISK_RE.is_match(message).then(|| Intent::LocationQuery {
        location: message.trim().to_string(),
    })
}
