//! Turns rule recommendations into customer-facing coverage gap records.

use tracing::warn;

use super::currency::{dollars, whole_dollars};
use super::domain::{CoverageGap, CoverageType, Severity};
use super::rules::RuleRecommendation;

const FALLBACK_EXPLANATION: &str = "{reason}. This coverage gap could leave you financially exposed.";

/// Map each recommendation to a gap, preserving input order.
///
/// Recommendations naming an unknown coverage type are logged and skipped; they never
/// abort the batch.
pub fn synthesize(recommendations: &[RuleRecommendation]) -> Vec<CoverageGap> {
    recommendations.iter().filter_map(synthesize_one).collect()
}

fn synthesize_one(recommendation: &RuleRecommendation) -> Option<CoverageGap> {
    let gap_type = match recommendation.coverage_type.parse::<CoverageType>() {
        Ok(kind) => kind,
        Err(err) => {
            warn!(
                rule_id = recommendation.rule_id.as_deref().unwrap_or("external"),
                "skipping recommendation: {err}"
            );
            return None;
        }
    };

    Some(CoverageGap {
        gap_type,
        severity: resolve_severity(recommendation.severity.as_deref()),
        title: title_for(gap_type),
        explanation: explanation_for(gap_type, &recommendation.reason),
        recommendation: recommendation_text(
            gap_type,
            recommendation.recommended_limit,
            recommendation.estimated_premium,
        ),
        estimated_annual_premium: recommendation.estimated_premium,
        risk_factors: recommendation.risk_factors.clone(),
    })
}

/// Explicit severity wins; missing or unparseable values fall back to Medium.
pub fn resolve_severity(raw: Option<&str>) -> Severity {
    raw.and_then(|value| value.parse::<Severity>().ok())
        .unwrap_or(Severity::Medium)
}

pub fn title_for(gap_type: CoverageType) -> String {
    match gap_type {
        CoverageType::Umbrella => "Missing Umbrella Liability Protection".to_string(),
        CoverageType::Flood => "Flood Insurance Coverage Gap".to_string(),
        CoverageType::Earthquake => "Earthquake Coverage Not Included".to_string(),
        CoverageType::Watercraft => "Watercraft Liability Exposure".to_string(),
        CoverageType::Jewelry => "High-Value Items Underinsured".to_string(),
        other => format!("Missing {} Coverage", other.label()),
    }
}

fn explanation_template(gap_type: CoverageType) -> &'static str {
    match gap_type {
        CoverageType::Umbrella => {
            "Your current liability coverage may not adequately protect your assets. {reason}. \
             Without umbrella coverage, you could be personally liable for damages exceeding \
             your policy limits."
        }
        CoverageType::Flood => {
            "Standard homeowner policies don't cover flood damage. {reason}. Flood insurance is \
             essential to protect your property investment."
        }
        CoverageType::Earthquake => {
            "Your home insurance policy excludes earthquake damage. {reason}. Earthquake \
             insurance protects your home's structure and contents from seismic events."
        }
        _ => FALLBACK_EXPLANATION,
    }
}

pub fn explanation_for(gap_type: CoverageType, reason: &str) -> String {
    explanation_template(gap_type).replace("{reason}", reason)
}

/// Zero limits and premiums read as absent.
pub fn recommendation_text(
    gap_type: CoverageType,
    limit: Option<u64>,
    premium: Option<f64>,
) -> String {
    let limit = limit.filter(|value| *value > 0);
    let premium = premium.filter(|value| *value > 0.0);

    match (limit, premium) {
        (Some(limit), Some(premium)) => format!(
            "We recommend adding {gap_type} coverage with a {} limit. Estimated annual premium: {}.",
            whole_dollars(limit),
            dollars(premium)
        ),
        (Some(limit), None) => format!(
            "We recommend adding {gap_type} coverage with a {} limit.",
            whole_dollars(limit)
        ),
        (None, _) => format!("We recommend adding {gap_type} coverage to your policy."),
    }
}
