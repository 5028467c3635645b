use serde::Serialize;
use tracing::{debug, info};

use super::domain::{AnalysisResult, PolicyInput};
use super::risk::RiskProfile;
use super::rules::{self, RuleRecommendation};
use super::summary::{self, PolicySnapshot};
use super::synthesis;

/// Everything produced by one pass through the stages, kept for callers that need
/// more than the final result (narration, CLI rendering).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineOutcome {
    pub snapshot: PolicySnapshot,
    pub risk: RiskProfile,
    pub recommendations: Vec<RuleRecommendation>,
    pub result: AnalysisResult,
}

/// Stateless runner for the linear analysis stages:
/// coverage summary, risk assessment, rule evaluation, gap synthesis, finalize.
#[derive(Debug, Clone, Copy, Default)]
pub struct GapAnalysisPipeline;

impl GapAnalysisPipeline {
    pub fn new() -> Self {
        Self
    }

    pub fn run(&self, policy: &PolicyInput) -> PipelineOutcome {
        info!(policy_number = %policy.policy_number, "starting coverage gap analysis");

        let snapshot = PolicySnapshot::from_policy(policy);
        debug!(
            existing = snapshot.count,
            total_premium = snapshot.total_premium,
            "summarized existing coverage"
        );

        let risk = RiskProfile::assess(&policy.customer_profile);
        debug!(
            zip_code = %risk.location.zip_code,
            flood = %risk.location.flood.risk,
            earthquake = %risk.location.earthquake.risk,
            crime_score = risk.location.crime_score,
            factors = risk.risk_factors.len(),
            "assessed location risk"
        );

        let recommendations = rules::evaluate(
            &policy.customer_profile,
            &policy.existing_coverages,
            &risk.location,
        );
        debug!(
            recommendations = recommendations.len(),
            "evaluated underwriting rules"
        );

        let gaps = synthesis::synthesize(&recommendations);
        debug!(gaps = gaps.len(), "synthesized coverage gaps");

        let result = summary::finalize(
            &policy.policy_number,
            &policy.customer_profile.name,
            gaps,
        );
        info!(
            policy_number = %result.policy_number,
            gaps = result.total_gaps_found,
            premium_impact = result.total_estimated_premium_impact,
            "coverage gap analysis complete"
        );

        PipelineOutcome {
            snapshot,
            risk,
            recommendations,
            result,
        }
    }
}
