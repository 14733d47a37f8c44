//! Advisory text shared by the assessors, the aggregator, and the
//! forecast engine.

use health_risk_hazard_models::{AirQualityBand, HazardKind, OverallRisk, RiskLevel};

use crate::classify::{PSI_INDOORS_ADVISORY, PSI_N95_ADVISORY};

/// Rationale line attached to a default assessment.
pub const DATA_UNAVAILABLE: &str = "data unavailable";

/// Wear an N95 mask outdoors.
pub const N95_ADVICE: &str = "Wear an N95 mask when outdoors for extended periods.";

/// Stay indoors.
pub const INDOORS_ADVICE: &str =
    "Stay indoors where possible and keep windows closed; avoid strenuous outdoor activity.";

/// Repellent and breeding-site advice for rising dengue.
pub const DENGUE_MITIGATION: &[&str] = &[
    "Apply mosquito repellent, especially at dawn and dusk.",
    "Check for and remove stagnant water around your home.",
];

/// Crowd and hygiene advice for rising hospital load.
pub const EPIDEMIC_MITIGATION: &[&str] = &[
    "Avoid crowded indoor venues where possible.",
    "Wash hands frequently and wear a mask if you feel unwell.",
];

/// Rationale line for a hazard whose provider returned nothing.
#[must_use]
pub fn unavailable_rationale(kind: HazardKind) -> String {
    format!("{} {DATA_UNAVAILABLE}; assuming low risk.", kind.label())
}

/// Dengue advice for a classified level.
#[must_use]
pub fn dengue_advice(level: RiskLevel) -> Vec<String> {
    let lines: &[&str] = match level {
        RiskLevel::Low => &["Dengue risk is low; routine mosquito precautions are sufficient."],
        RiskLevel::Medium => &["Use mosquito repellent when outdoors near greenery."],
        RiskLevel::High => &[
            "Use mosquito repellent and wear long sleeves outdoors.",
            "Avoid lingering near drains and dense vegetation.",
        ],
        RiskLevel::VeryHigh => &[
            "Active dengue cluster nearby: apply repellent regularly and wear long sleeves.",
            "Seek medical attention promptly for fever, rash, or joint pain.",
        ],
    };
    lines.iter().map(ToString::to_string).collect()
}

/// Air-quality advice for a PSI band, plus mask or indoor guidance above
/// the advisory cut-offs.
#[must_use]
pub fn air_advice(band: AirQualityBand, psi: f64) -> Vec<String> {
    let headline = match band {
        AirQualityBand::Good => "Air quality is good; normal outdoor activities are fine.",
        AirQualityBand::Moderate => {
            "Air quality is moderate; sensitive groups should limit prolonged outdoor exertion."
        }
        AirQualityBand::Unhealthy => "Air quality is unhealthy; reduce prolonged outdoor exertion.",
        AirQualityBand::VeryUnhealthy => {
            "Air quality is very unhealthy; avoid outdoor activity where possible."
        }
        AirQualityBand::Hazardous => {
            "Air quality is hazardous; everyone should avoid all outdoor activity."
        }
    };

    let mut lines = vec![headline.to_string()];
    if psi > PSI_N95_ADVISORY {
        lines.push(N95_ADVICE.to_string());
    }
    if psi > PSI_INDOORS_ADVISORY {
        lines.push(INDOORS_ADVICE.to_string());
    }
    lines
}

/// Hospital-load advice for a classified level.
#[must_use]
pub fn epidemic_advice(level: RiskLevel) -> Vec<String> {
    let lines: &[&str] = match level {
        RiskLevel::Low => &["Hospital load is normal."],
        RiskLevel::Medium => &["Practise good hand hygiene in crowded places."],
        RiskLevel::High => &[
            "Nearby hospitals are busy; expect longer waiting times.",
            "Consider a mask in crowded indoor settings.",
        ],
        RiskLevel::VeryHigh => &[
            "Nearby hospitals are under heavy load; use polyclinics for non-urgent care.",
            "Wear a mask in crowded places and avoid contact with unwell people.",
        ],
    };
    lines.iter().map(ToString::to_string).collect()
}

/// Closing advice for the fused risk tier.
#[must_use]
pub const fn overall_advice(risk: OverallRisk) -> &'static str {
    match risk {
        OverallRisk::Low => "Overall risk is low; enjoy your visit with standard precautions.",
        OverallRisk::Medium => "Overall risk is moderate; take the precautions above.",
        OverallRisk::High => "Consider postponing non-essential travel to this area.",
    }
}

/// How far ahead a forecast looks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizonTier {
    /// Exactly one day ahead.
    Tomorrow,
    /// Two to seven days ahead.
    ShortRange,
    /// More than a week ahead.
    Extended,
}

impl HorizonTier {
    /// Tier for a horizon in days.
    #[must_use]
    pub const fn from_days(days: u32) -> Self {
        match days {
            0 | 1 => Self::Tomorrow,
            2..=7 => Self::ShortRange,
            _ => Self::Extended,
        }
    }
}

/// Opening advice for a forecast at the given horizon.
#[must_use]
pub fn horizon_advice(days: u32, risk: OverallRisk) -> String {
    match (HorizonTier::from_days(days), risk) {
        (HorizonTier::Tomorrow, OverallRisk::High) => {
            "Tomorrow looks high-risk; consider rescheduling outdoor plans.".to_string()
        }
        (HorizonTier::Tomorrow, OverallRisk::Medium) => {
            "Tomorrow looks moderately risky; pack repellent and a mask.".to_string()
        }
        (HorizonTier::Tomorrow, OverallRisk::Low) => {
            "Tomorrow looks fine for your plans.".to_string()
        }
        (HorizonTier::ShortRange, risk) => format!(
            "Over the next {days} days overall risk is expected to be {}; check again closer to the date.",
            risk.label().to_lowercase()
        ),
        (HorizonTier::Extended, risk) => format!(
            "Extended {days}-day outlook is {}; long-range projections are indicative only.",
            risk.label().to_lowercase()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn air_advice_adds_mask_and_indoor_guidance() {
        let moderate = air_advice(AirQualityBand::Moderate, 80.0);
        assert_eq!(moderate.len(), 1);

        let unhealthy = air_advice(AirQualityBand::Unhealthy, 150.0);
        assert!(unhealthy.contains(&N95_ADVICE.to_string()));
        assert!(!unhealthy.contains(&INDOORS_ADVICE.to_string()));

        let very = air_advice(AirQualityBand::VeryUnhealthy, 250.0);
        assert!(very.contains(&N95_ADVICE.to_string()));
        assert!(very.contains(&INDOORS_ADVICE.to_string()));
    }

    #[test]
    fn high_overall_advises_postponing() {
        assert_eq!(
            overall_advice(OverallRisk::High),
            "Consider postponing non-essential travel to this area."
        );
    }

    #[test]
    fn horizon_tiers() {
        assert_eq!(HorizonTier::from_days(1), HorizonTier::Tomorrow);
        assert_eq!(HorizonTier::from_days(2), HorizonTier::ShortRange);
        assert_eq!(HorizonTier::from_days(7), HorizonTier::ShortRange);
        assert_eq!(HorizonTier::from_days(8), HorizonTier::Extended);
        assert!(horizon_advice(5, OverallRisk::Medium).contains("next 5 days"));
        assert!(horizon_advice(14, OverallRisk::Low).starts_with("Extended 14-day"));
    }

    #[test]
    fn every_level_has_advice() {
        for level in RiskLevel::all() {
            assert!(!dengue_advice(*level).is_empty());
            assert!(!epidemic_advice(*level).is_empty());
        }
    }
}
