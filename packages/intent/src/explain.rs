//! Canned answers for [`Intent::Explanation`](crate::Intent::Explanation).

use crate::Topic;

/// A short explanation of how the engine treats `topic`.
#[must_use]
pub const fn explain(topic: Topic) -> &'static str {
    match topic {
        Topic::Dengue => {
            "Dengue risk is scored from the active dengue clusters around you. \
             Clusters within 500 m count ten times their case count, within 1 km \
             five times, and within 2 km twice. A weighted score above 100 or any \
             cluster within 500 m is Very High; above 50 or more than two clusters \
             within 1 km is High; above 20 or any cluster within 2 km is Medium. \
             Without a precise location, the island-wide case total is used instead."
        }
        Topic::AirQuality => {
            "Air quality follows the Pollutant Standards Index (PSI) for your region, \
             or the national reading when no regional one is available. 0-50 is Good, \
             51-100 Moderate, 101-200 Unhealthy, 201-300 Very Unhealthy and above 300 \
             Hazardous. Above 100 an N95 mask is advised outdoors; above 200, stay \
             indoors where you can."
        }
        Topic::Epidemic => {
            "Epidemic load is estimated from hospital admissions near you, weighted by \
             distance: hospitals within 2 km count fully, within 5 km at 60% and within \
             10 km at 30%. More than 50 weighted admissions is Very High, more than 30 \
             High and more than 15 Medium."
        }
        Topic::RiskLevels => {
            "Each hazard is rated Low, Medium, High or Very High. The overall risk \
             averages the three ratings (Low = 1 up to Very High = 4): an average of \
             3.5 or more is High, 2.5 or more is Medium, anything lower is Low. Every \
             rating carries a confidence that drops when data is missing or only \
             island-wide figures are available."
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_topic_has_text() {
        for topic in [
            Topic::Dengue,
            Topic::AirQuality,
            Topic::Epidemic,
            Topic::RiskLevels,
        ] {
            assert!(!explain(topic).is_empty(), "{topic} has no explanation");
        }
    }

    #[test]
    fn air_quality_mentions_n95() {
        assert!(explain(Topic::AirQuality).contains("N95"));
    }
}
