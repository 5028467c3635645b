//! Seam for the external text-generation collaborator.
//!
//! Gap explanations are always produced by the deterministic templates; a narrator only
//! adds an optional advisor-style narrative on top of a finished analysis.

use std::future::Future;

use serde::Serialize;

use super::currency::whole_dollars;
use super::domain::CustomerProfile;
use super::pipeline::PipelineOutcome;
use super::rules::RuleRecommendation;

const NOT_SPECIFIED: &str = "Not specified";

/// Customer facts shared with the collaborator, with money pre-formatted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerDigest {
    pub name: String,
    pub zip_code: String,
    pub net_worth: String,
    pub home_value: String,
}

impl CustomerDigest {
    pub fn from_profile(profile: &CustomerProfile) -> Self {
        let money = |value: Option<u64>| {
            value
                .filter(|amount| *amount > 0)
                .map(whole_dollars)
                .unwrap_or_else(|| NOT_SPECIFIED.to_string())
        };

        Self {
            name: profile.name.clone(),
            zip_code: profile.zip_code.clone(),
            net_worth: money(profile.net_worth),
            home_value: money(profile.home_value),
        }
    }
}

/// Input handed to a [`Narrator`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NarrativeRequest {
    pub customer: CustomerDigest,
    pub risk_factors: Vec<String>,
    pub recommendations: Vec<RuleRecommendation>,
}

impl NarrativeRequest {
    pub fn from_outcome(profile: &CustomerProfile, outcome: &PipelineOutcome) -> Self {
        Self {
            customer: CustomerDigest::from_profile(profile),
            risk_factors: outcome.risk.risk_factors.clone(),
            recommendations: outcome.recommendations.clone(),
        }
    }

    /// Bullet list of risk factors, one per line.
    pub fn risk_factor_lines(&self) -> String {
        self.risk_factors
            .iter()
            .map(|factor| format!("- {factor}"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[derive(Debug, thiserror::Error)]
pub enum NarrativeError {
    #[error("narrative generation is disabled")]
    Disabled,
    #[error("narrative transport failed: {0}")]
    Transport(String),
    #[error("narrative provider returned {status}: {body}")]
    Provider { status: u16, body: String },
    #[error("narrative response malformed: {0}")]
    Malformed(String),
}

/// Narrow interface to a text-generation backend.
pub trait Narrator: Send + Sync {
    fn narrate(
        &self,
        request: NarrativeRequest,
    ) -> impl Future<Output = Result<String, NarrativeError>> + Send;
}

/// Narrator used when no backend is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledNarrator;

impl Narrator for DisabledNarrator {
    async fn narrate(&self, _request: NarrativeRequest) -> Result<String, NarrativeError> {
        Err(NarrativeError::Disabled)
    }
}
