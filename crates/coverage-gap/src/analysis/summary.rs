use serde::{Deserialize, Serialize};

use super::currency::dollars;
use super::domain::{AnalysisResult, CoverageGap, CoverageType, PolicyInput, Severity};

pub const NO_GAPS_SUMMARY: &str =
    "No significant coverage gaps identified. Current policy provides adequate protection.";

/// Totals over the lines already in force on the policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicySnapshot {
    pub count: usize,
    pub types: Vec<CoverageType>,
    pub total_premium: f64,
}

impl PolicySnapshot {
    pub fn from_policy(policy: &PolicyInput) -> Self {
        Self {
            count: policy.existing_coverages.len(),
            types: policy
                .existing_coverages
                .iter()
                .map(|coverage| coverage.coverage_type)
                .collect(),
            total_premium: policy
                .existing_coverages
                .iter()
                .map(|coverage| coverage.premium.unwrap_or(0.0))
                .sum(),
        }
    }
}

/// Absent premiums count as zero.
pub fn total_premium_impact(gaps: &[CoverageGap]) -> f64 {
    gaps.iter()
        .map(|gap| gap.estimated_annual_premium.unwrap_or(0.0))
        .sum()
}

pub fn high_severity_count(gaps: &[CoverageGap]) -> usize {
    gaps.iter()
        .filter(|gap| gap.severity == Severity::High)
        .count()
}

pub fn summary_text(gaps: &[CoverageGap], total_impact: f64) -> String {
    if gaps.is_empty() {
        return NO_GAPS_SUMMARY.to_string();
    }

    format!(
        "Analysis identified {} coverage gap(s), including {} high-priority item(s). \
         Total estimated premium impact: {}/year. \
         Addressing these gaps will significantly improve financial protection.",
        gaps.len(),
        high_severity_count(gaps),
        dollars(total_impact)
    )
}

pub fn finalize(policy_number: &str, customer_name: &str, gaps: Vec<CoverageGap>) -> AnalysisResult {
    let total_estimated_premium_impact = total_premium_impact(&gaps);
    let analysis_summary = summary_text(&gaps, total_estimated_premium_impact);

    AnalysisResult {
        policy_number: policy_number.to_string(),
        customer_name: customer_name.to_string(),
        total_gaps_found: gaps.len(),
        coverage_gaps: gaps,
        total_estimated_premium_impact,
        analysis_summary,
    }
}
