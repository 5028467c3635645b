use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::analysis::domain::{Coverage, CoverageType, CustomerProfile, PolicyInput};
use crate::analysis::narrative::{NarrativeError, NarrativeRequest, Narrator};
use crate::analysis::risk::{self, RiskData};
use crate::analysis::rules::RuleRecommendation;
use crate::analysis::{analysis_router, CoverageAnalysisService, DisabledNarrator};

pub(super) const MIAMI_BEACH: &str = "33139";
pub(super) const SAN_FRANCISCO: &str = "94102";
pub(super) const SEATTLE: &str = "98101";
pub(super) const SALT_LAKE_CITY: &str = "84101";
pub(super) const HOUSTON: &str = "77002";
pub(super) const CHICAGO: &str = "60601";

pub(super) fn customer(zip_code: &str) -> CustomerProfile {
    CustomerProfile {
        name: "Jordan Alvarez".to_string(),
        zip_code: zip_code.to_string(),
        net_worth: None,
        home_value: None,
        additional_properties: None,
        has_watercraft: false,
        has_high_value_items: false,
    }
}

pub(super) fn wealthy_customer(zip_code: &str, net_worth: u64) -> CustomerProfile {
    CustomerProfile {
        net_worth: Some(net_worth),
        home_value: Some(850_000),
        has_high_value_items: true,
        ..customer(zip_code)
    }
}

pub(super) fn coverage(coverage_type: CoverageType) -> Coverage {
    Coverage {
        coverage_type,
        limit: Some(300_000),
        deductible: Some(1_000),
        premium: Some(450.0),
    }
}

pub(super) fn policy(customer_profile: CustomerProfile, existing: Vec<Coverage>) -> PolicyInput {
    PolicyInput {
        policy_number: "POL-2024-00017".to_string(),
        customer_profile,
        existing_coverages: existing,
    }
}

/// Miami Beach is in flood zone AE (High) with Low earthquake risk.
pub(super) fn miami_high_net_worth_policy() -> PolicyInput {
    policy(
        wealthy_customer(MIAMI_BEACH, 3_000_000),
        vec![coverage(CoverageType::Home), coverage(CoverageType::Auto)],
    )
}

pub(super) fn fully_covered_policy() -> PolicyInput {
    policy(
        wealthy_customer(SAN_FRANCISCO, 4_000_000),
        vec![
            coverage(CoverageType::Home),
            coverage(CoverageType::Umbrella),
            coverage(CoverageType::Flood),
            coverage(CoverageType::Earthquake),
            coverage(CoverageType::Jewelry),
        ],
    )
}

pub(super) fn risk_for(zip_code: &str) -> RiskData {
    risk::lookup(zip_code)
}

pub(super) fn external_recommendation(coverage_type: &str) -> RuleRecommendation {
    RuleRecommendation {
        coverage_type: coverage_type.to_string(),
        recommended_limit: Some(100_000),
        estimated_premium: Some(325.5),
        reason: "Customer keeps a boat at a marina".to_string(),
        risk_factors: vec!["Owns watercraft".to_string()],
        severity: None,
        rule_id: None,
        description: None,
    }
}

pub(super) fn disabled_service() -> CoverageAnalysisService<DisabledNarrator> {
    CoverageAnalysisService::new(Arc::new(DisabledNarrator))
}

pub(super) fn router_with_disabled_narrator() -> axum::Router {
    analysis_router(Arc::new(disabled_service()))
}

/// Narrator that records every request and answers with fixed text.
#[derive(Default, Clone)]
pub(super) struct RecordingNarrator {
    requests: Arc<Mutex<Vec<NarrativeRequest>>>,
}

impl RecordingNarrator {
    pub(super) fn requests(&self) -> Vec<NarrativeRequest> {
        self.requests.lock().expect("narrator mutex poisoned").clone()
    }
}

impl Narrator for RecordingNarrator {
    async fn narrate(&self, request: NarrativeRequest) -> Result<String, NarrativeError> {
        let count = request.recommendations.len();
        self.requests
            .lock()
            .expect("narrator mutex poisoned")
            .push(request);
        Ok(format!("Here is why {count} gap(s) matter for you."))
    }
}

pub(super) struct FailingNarrator;

impl Narrator for FailingNarrator {
    async fn narrate(&self, _request: NarrativeRequest) -> Result<String, NarrativeError> {
        Err(NarrativeError::Transport("connection reset".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
