//! Underwriting rule table and the evaluator that walks it.

use serde::{Deserialize, Serialize};

use super::currency::{round_cents, whole_dollars};
use super::domain::{has_coverage, Coverage, CoverageType, CustomerProfile, RiskLevel, Severity};
use super::risk::RiskData;

pub const UMBRELLA_NET_WORTH_THRESHOLD: u64 = 1_000_000;
pub const UMBRELLA_MAX_LIMIT: u64 = 5_000_000;
pub const UMBRELLA_MIN_PREMIUM: f64 = 150.0;
pub const UMBRELLA_PREMIUM_RATE: f64 = 0.0002;

pub const FLOOD_RECOMMENDED_LIMIT: u64 = 250_000;
pub const FLOOD_HIGH_RISK_PREMIUM: f64 = 2_500.0;
pub const FLOOD_MEDIUM_RISK_PREMIUM: f64 = 800.0;
/// Priced but unreachable while the flood rule only fires on Medium or High risk.
pub const FLOOD_LOW_RISK_PREMIUM: f64 = 400.0;

pub const EARTHQUAKE_DEFAULT_LIMIT: u64 = 300_000;
pub const EARTHQUAKE_VERY_HIGH_PREMIUM: f64 = 3_000.0;
pub const EARTHQUAKE_HIGH_PREMIUM: f64 = 1_800.0;
pub const EARTHQUAKE_MEDIUM_PREMIUM: f64 = 600.0;

pub const JEWELRY_COVERAGE_LIMIT: u64 = 50_000;
pub const JEWELRY_BASE_PREMIUM: f64 = 200.0;

/// Output of a single rule, tagged with the rule that produced it.
///
/// Coverage type and severity travel as text so recommendations from other sources
/// can be fed to the synthesizer, which owns the parse-or-skip policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleRecommendation {
    pub coverage_type: String,
    #[serde(default)]
    pub recommended_limit: Option<u64>,
    #[serde(default)]
    pub estimated_premium: Option<f64>,
    pub reason: String,
    #[serde(default)]
    pub risk_factors: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

type AppliesFn = fn(&CustomerProfile, &[Coverage], &RiskData) -> bool;
type RecommendFn = fn(&CustomerProfile, &RiskData) -> RuleRecommendation;

/// One underwriting policy: a side-effect-free predicate paired with its generator.
pub struct UnderwritingRule {
    pub id: &'static str,
    pub coverage_type: CoverageType,
    pub description: &'static str,
    applies: AppliesFn,
    recommend: RecommendFn,
}

impl UnderwritingRule {
    pub fn applies(
        &self,
        profile: &CustomerProfile,
        existing_coverages: &[Coverage],
        risk: &RiskData,
    ) -> bool {
        (self.applies)(profile, existing_coverages, risk)
    }

    /// Only meaningful once [`UnderwritingRule::applies`] returned true.
    pub fn recommend(&self, profile: &CustomerProfile, risk: &RiskData) -> RuleRecommendation {
        (self.recommend)(profile, risk)
    }
}

impl std::fmt::Debug for UnderwritingRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnderwritingRule")
            .field("id", &self.id)
            .field("coverage_type", &self.coverage_type)
            .finish()
    }
}

/// Declaration order is the output order of any gaps found.
pub static RULE_SET: [UnderwritingRule; 4] = [
    UnderwritingRule {
        id: "UMBRELLA_001",
        coverage_type: CoverageType::Umbrella,
        description: "Umbrella policy recommended for individuals with net worth over $1M",
        applies: umbrella_applies,
        recommend: umbrella_recommendation,
    },
    UnderwritingRule {
        id: "FLOOD_001",
        coverage_type: CoverageType::Flood,
        description: "Flood insurance required for properties in high-risk flood zones",
        applies: flood_applies,
        recommend: flood_recommendation,
    },
    UnderwritingRule {
        id: "EARTHQUAKE_001",
        coverage_type: CoverageType::Earthquake,
        description: "Earthquake insurance recommended for properties in seismic zones",
        applies: earthquake_applies,
        recommend: earthquake_recommendation,
    },
    UnderwritingRule {
        id: "JEWELRY_001",
        coverage_type: CoverageType::Jewelry,
        description: "Jewelry and valuable items coverage recommended for customers with high-value possessions",
        applies: jewelry_applies,
        recommend: jewelry_recommendation,
    },
];

/// Rules whose predicate holds, in rule-set order.
pub fn applicable_rules(
    profile: &CustomerProfile,
    existing_coverages: &[Coverage],
    risk: &RiskData,
) -> Vec<&'static UnderwritingRule> {
    RULE_SET
        .iter()
        .filter(|rule| rule.applies(profile, existing_coverages, risk))
        .collect()
}

/// Invoke each matching rule once and tag its recommendation with the rule identity.
pub fn evaluate(
    profile: &CustomerProfile,
    existing_coverages: &[Coverage],
    risk: &RiskData,
) -> Vec<RuleRecommendation> {
    applicable_rules(profile, existing_coverages, risk)
        .into_iter()
        .map(|rule| {
            let mut recommendation = rule.recommend(profile, risk);
            recommendation.rule_id = Some(rule.id.to_string());
            recommendation.description = Some(rule.description.to_string());
            recommendation
        })
        .collect()
}

fn umbrella_applies(profile: &CustomerProfile, existing: &[Coverage], _risk: &RiskData) -> bool {
    profile.net_worth.unwrap_or(0) >= UMBRELLA_NET_WORTH_THRESHOLD
        && !has_coverage(existing, CoverageType::Umbrella)
}

pub fn umbrella_premium(net_worth: u64) -> f64 {
    round_cents(UMBRELLA_MIN_PREMIUM.max(net_worth as f64 * UMBRELLA_PREMIUM_RATE))
}

fn umbrella_recommendation(profile: &CustomerProfile, _risk: &RiskData) -> RuleRecommendation {
    let net_worth = profile.net_worth.unwrap_or(0);

    RuleRecommendation {
        coverage_type: CoverageType::Umbrella.to_string(),
        recommended_limit: Some(net_worth.min(UMBRELLA_MAX_LIMIT)),
        estimated_premium: Some(umbrella_premium(net_worth)),
        reason: format!(
            "Net worth of {} requires additional liability protection",
            whole_dollars(net_worth)
        ),
        risk_factors: vec![
            "High net worth".to_string(),
            "Asset protection needed".to_string(),
        ],
        severity: Some(Severity::High.to_string()),
        rule_id: None,
        description: None,
    }
}

fn flood_applies(_profile: &CustomerProfile, existing: &[Coverage], risk: &RiskData) -> bool {
    !has_coverage(existing, CoverageType::Flood)
        && matches!(risk.flood.risk, RiskLevel::Medium | RiskLevel::High)
}

fn flood_recommendation(_profile: &CustomerProfile, risk: &RiskData) -> RuleRecommendation {
    let flood = &risk.flood;
    let (premium, severity) = match flood.risk {
        RiskLevel::VeryHigh | RiskLevel::High => (FLOOD_HIGH_RISK_PREMIUM, Severity::High),
        RiskLevel::Medium => (FLOOD_MEDIUM_RISK_PREMIUM, Severity::Medium),
        RiskLevel::Low => (FLOOD_LOW_RISK_PREMIUM, Severity::Low),
    };

    RuleRecommendation {
        coverage_type: CoverageType::Flood.to_string(),
        recommended_limit: Some(FLOOD_RECOMMENDED_LIMIT),
        estimated_premium: Some(premium),
        reason: format!(
            "Property located in FEMA flood zone {} ({})",
            flood.zone, flood.region
        ),
        risk_factors: vec![
            format!("Flood zone {}", flood.zone),
            format!("{} flood risk", flood.risk),
        ],
        severity: Some(severity.to_string()),
        rule_id: None,
        description: None,
    }
}

fn earthquake_applies(_profile: &CustomerProfile, existing: &[Coverage], risk: &RiskData) -> bool {
    !has_coverage(existing, CoverageType::Earthquake) && risk.earthquake.risk >= RiskLevel::Medium
}

fn earthquake_recommendation(profile: &CustomerProfile, risk: &RiskData) -> RuleRecommendation {
    let quake = &risk.earthquake;
    let (premium, severity) = match quake.risk {
        RiskLevel::VeryHigh => (EARTHQUAKE_VERY_HIGH_PREMIUM, Severity::High),
        RiskLevel::High => (EARTHQUAKE_HIGH_PREMIUM, Severity::High),
        RiskLevel::Medium | RiskLevel::Low => (EARTHQUAKE_MEDIUM_PREMIUM, Severity::Medium),
    };

    RuleRecommendation {
        coverage_type: CoverageType::Earthquake.to_string(),
        recommended_limit: Some(profile.home_value.unwrap_or(EARTHQUAKE_DEFAULT_LIMIT)),
        estimated_premium: Some(premium),
        reason: format!(
            "Property located in {} seismic zone ({})",
            quake.zone, quake.region
        ),
        risk_factors: vec![
            format!("{} earthquake risk", quake.risk),
            format!("{} zone", quake.zone),
        ],
        severity: Some(severity.to_string()),
        rule_id: None,
        description: None,
    }
}

fn jewelry_applies(profile: &CustomerProfile, existing: &[Coverage], _risk: &RiskData) -> bool {
    !has_coverage(existing, CoverageType::Jewelry) && profile.has_high_value_items
}

fn jewelry_recommendation(_profile: &CustomerProfile, _risk: &RiskData) -> RuleRecommendation {
    RuleRecommendation {
        coverage_type: CoverageType::Jewelry.to_string(),
        recommended_limit: Some(JEWELRY_COVERAGE_LIMIT),
        estimated_premium: Some(JEWELRY_BASE_PREMIUM),
        reason: "Customer owns high-value items (jewelry, art, collectibles, etc.)".to_string(),
        risk_factors: vec![
            "High-value items owned".to_string(),
            "Standard home policy limits insufficient".to_string(),
        ],
        severity: Some(Severity::Medium.to_string()),
        rule_id: None,
        description: None,
    }
}
