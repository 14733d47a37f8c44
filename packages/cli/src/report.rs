//! Plain-text rendering of analyses and predictions.

use std::fmt::Write as _;

use health_risk_hazard_models::{LocationAnalysis, Prediction, Trend};

fn place(location: Option<&health_risk_geo_models::NamedLocation>) -> String {
    location.map_or_else(
        || "Singapore (region-wide)".to_string(),
        |l| format!("{} ({})", l.name, l.region.as_ref().to_lowercase()),
    )
}

const fn trend_arrow(trend: Trend) -> &'static str {
    match trend {
        Trend::Increasing | Trend::Worsening => "↑",
        Trend::Decreasing | Trend::Improving => "↓",
        Trend::Stable => "→",
    }
}

/// Renders a current-conditions analysis.
#[must_use]
pub fn format_analysis(analysis: &LocationAnalysis) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Health risk for {}", place(analysis.location.as_ref()));
    let _ = writeln!(
        out,
        "Overall: {} (confidence {}%)",
        analysis.overall_risk.label(),
        analysis.overall_confidence
    );

    for a in &analysis.assessments {
        let _ = writeln!(out);
        let band = a
            .air_quality_band
            .map(|b| format!(", {}", b.label()))
            .unwrap_or_default();
        let _ = writeln!(
            out,
            "{}: {}{band} (confidence {}%)",
            a.hazard_kind.label(),
            a.level.label(),
            a.confidence
        );
        for line in &a.rationale {
            let _ = writeln!(out, "  - {line}");
        }
    }

    if !analysis.travel_advice.is_empty() {
        let _ = writeln!(out, "\nAdvice:");
        for line in &analysis.travel_advice {
            let _ = writeln!(out, "  * {line}");
        }
    }

    for note in &analysis.notes {
        let _ = writeln!(out, "\nNote: {note}");
    }

    out
}

/// Renders a forecast.
#[must_use]
pub fn format_prediction(prediction: &Prediction) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{}-day forecast for {} (to {})",
        prediction.horizon_days,
        place(prediction.location.as_ref()),
        prediction.target_date
    );
    let _ = writeln!(
        out,
        "Overall: {} (confidence {}%)",
        prediction.overall_risk.label(),
        prediction.overall_confidence
    );

    for f in &prediction.per_hazard {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "{}: {} {} {:.1} -> {:.1} (confidence {}%)",
            f.hazard_kind.label(),
            f.level.label(),
            trend_arrow(f.trend),
            f.baseline,
            f.predicted_value,
            f.confidence
        );
        for factor in &f.factors {
            let _ = writeln!(out, "  - {factor}");
        }
    }

    if !prediction.recommendations.is_empty() {
        let _ = writeln!(out, "\nAdvice:");
        for line in &prediction.recommendations {
            let _ = writeln!(out, "  * {line}");
        }
    }

    out
}
