use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::domain::{AnalysisResult, PolicyInput};
use super::narrative::{NarrativeError, NarrativeRequest, Narrator};
use super::pipeline::GapAnalysisPipeline;
use super::summary::PolicySnapshot;

/// Payload returned by the HTTP surface and the CLI.
///
/// The analysis result is flattened so its fields stay at the top level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    #[serde(flatten)]
    pub result: AnalysisResult,
    pub existing_coverage: PolicySnapshot,
    pub risk_factors: Vec<String>,
    pub analyzed_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advisor_narrative: Option<String>,
}

/// Service composing the deterministic pipeline with an optional narrator.
pub struct CoverageAnalysisService<N> {
    pipeline: GapAnalysisPipeline,
    narrator: Arc<N>,
}

impl<N> CoverageAnalysisService<N>
where
    N: Narrator + 'static,
{
    pub fn new(narrator: Arc<N>) -> Self {
        Self {
            pipeline: GapAnalysisPipeline::new(),
            narrator,
        }
    }

    /// Run the deterministic stages only.
    pub fn analyze(&self, policy: &PolicyInput) -> AnalysisResult {
        self.pipeline.run(policy).result
    }

    /// Run the pipeline and, when there is something to explain, ask the narrator for
    /// an advisor narrative. Narrator failures never fail the report.
    pub async fn report(&self, policy: &PolicyInput) -> AnalysisReport {
        let outcome = self.pipeline.run(policy);

        let advisor_narrative = if outcome.recommendations.is_empty() {
            None
        } else {
            let request = NarrativeRequest::from_outcome(&policy.customer_profile, &outcome);
            match self.narrator.narrate(request).await {
                Ok(text) if !text.trim().is_empty() => Some(text),
                Ok(_) => {
                    warn!(policy_number = %policy.policy_number, "narrator returned empty text");
                    None
                }
                Err(NarrativeError::Disabled) => {
                    debug!("narration disabled; using template explanations only");
                    None
                }
                Err(err) => {
                    warn!(
                        policy_number = %policy.policy_number,
                        "narration unavailable, continuing without it: {err}"
                    );
                    None
                }
            }
        };

        AnalysisReport {
            result: outcome.result,
            existing_coverage: outcome.snapshot,
            risk_factors: outcome.risk.risk_factors,
            analyzed_at: Utc::now(),
            advisor_narrative,
        }
    }
}
