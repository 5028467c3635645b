//! Policy document intake for uploaded files and inline JSON payloads.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::{info, warn};

use super::domain::{whole_number, Coverage, CoverageType, CustomerProfile, PolicyInput};

const UNKNOWN_POLICY_NUMBER: &str = "UNKNOWN";

/// Errors raised while turning a policy document into [`PolicyInput`].
#[derive(Debug, thiserror::Error)]
pub enum PolicyParseError {
    #[error("invalid policy JSON format: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("policy document is missing customer_profile")]
    MissingCustomerProfile,
    #[error("unsupported policy file format: {0}")]
    UnsupportedFormat(String),
    #[error("unable to read policy file: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Deserialize)]
struct RawPolicyDocument {
    #[serde(default)]
    policy_number: Option<String>,
    #[serde(default)]
    customer_profile: Option<CustomerProfile>,
    #[serde(default)]
    existing_coverages: Vec<RawCoverage>,
}

#[derive(Debug, Deserialize)]
struct RawCoverage {
    #[serde(default)]
    coverage_type: String,
    #[serde(default, deserialize_with = "whole_number::optional")]
    limit: Option<u64>,
    #[serde(default, deserialize_with = "whole_number::optional")]
    deductible: Option<u64>,
    #[serde(default)]
    premium: Option<f64>,
}

impl RawCoverage {
    fn into_coverage(self) -> Option<Coverage> {
        match self.coverage_type.parse::<CoverageType>() {
            Ok(coverage_type) => Some(Coverage {
                coverage_type,
                limit: self.limit,
                deductible: self.deductible,
                premium: self.premium,
            }),
            Err(err) => {
                warn!("dropping existing coverage: {err}");
                None
            }
        }
    }
}

/// Parse a JSON policy document. Coverage lines with unknown types are dropped.
pub fn parse_policy_document(content: &str) -> Result<PolicyInput, PolicyParseError> {
    let raw: RawPolicyDocument = serde_json::from_str(content)?;

    let customer_profile = raw
        .customer_profile
        .ok_or(PolicyParseError::MissingCustomerProfile)?;

    let existing_coverages = raw
        .existing_coverages
        .into_iter()
        .filter_map(RawCoverage::into_coverage)
        .collect();

    let policy = PolicyInput {
        policy_number: raw
            .policy_number
            .unwrap_or_else(|| UNKNOWN_POLICY_NUMBER.to_string()),
        customer_profile,
        existing_coverages,
    };

    info!(policy_number = %policy.policy_number, "parsed policy document");
    Ok(policy)
}

/// Load a policy from disk, dispatching on the file extension.
pub fn parse_policy_file(path: impl AsRef<Path>) -> Result<PolicyInput, PolicyParseError> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "json" => {
            let content = fs::read_to_string(path)?;
            parse_policy_document(&content)
        }
        // PDF extraction is not supported.
        "pdf" => Err(PolicyParseError::UnsupportedFormat("pdf".to_string())),
        other => Err(PolicyParseError::UnsupportedFormat(if other.is_empty() {
            "<none>".to_string()
        } else {
            other.to_string()
        })),
    }
}
