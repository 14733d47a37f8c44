#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Chat message intent classification.
//!
//! Turns a raw chat message into a tagged [`Intent`] using an ordered list
//! of keyword rules (see [`rules`]). The first rule that fires wins. The
//! risk engine never sees raw chat text: callers classify first and pass
//! along only the extracted location phrase and horizon.

pub mod explain;
pub mod extract;
pub mod rules;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// What the user is asking for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE", rename_all_fields = "camelCase")]
pub enum Intent {
    /// Current risk at a place.
    LocationQuery {
        /// Location phrase, or the whole message when none was found.
        location: String,
    },
    /// Whether to travel to a place.
    TravelAdvice {
        /// Location phrase, or the whole message when none was found.
        location: String,
    },
    /// Forecast for a place some days ahead.
    Prediction {
        /// Location phrase, or the whole message when none was found.
        location: String,
        /// Days ahead.
        horizon_days: u32,
    },
    /// How something works.
    Explanation {
        /// The subject of the question.
        topic: Topic,
    },
    /// Anything else.
    GeneralChat,
}

/// Subjects the assistant can explain.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Topic {
    /// Dengue clusters and scoring.
    Dengue,
    /// PSI and haze.
    AirQuality,
    /// Hospital load and outbreaks.
    Epidemic,
    /// The qualitative risk scale itself.
    RiskLevels,
}

/// Classifies a chat message.
#[must_use]
pub fn classify(message: &str) -> Intent {
    let intent = rules::RULES
        .iter()
        .find_map(|rule| rule(message))
        .unwrap_or(Intent::GeneralChat);

    log::debug!("Classified {message:?} as {intent:?}");

    intent
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prediction_outranks_travel() {
        assert_eq!(
            classify("Should I travel to Bedok tomorrow? What's the forecast?"),
            Intent::Prediction {
                location: "Bedok".to_string(),
                horizon_days: 1,
            }
        );
    }

    #[test]
    fn location_query_for_plain_risk_question() {
        assert_eq!(
            classify("What's the dengue risk in Woodlands?"),
            Intent::LocationQuery {
                location: "Woodlands".to_string(),
            }
        );
    }

    #[test]
    fn greeting_is_general_chat() {
        assert_eq!(classify("hello there!"), Intent::GeneralChat);
        assert_eq!(classify(""), Intent::GeneralChat);
    }

    #[test]
    fn serializes_with_type_tag() {
        let json = serde_json::to_value(Intent::Prediction {
            location: "Tampines".to_string(),
            horizon_days: 7,
        })
        .unwrap();
        assert_eq!(json["type"], "PREDICTION");
        assert_eq!(json["horizonDays"], 7);
    }
}
