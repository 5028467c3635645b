use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Closed set of insurance products a policy line or gap can refer to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoverageType {
    Auto,
    Home,
    Umbrella,
    Flood,
    Earthquake,
    Jewelry,
    Watercraft,
    Renters,
}

impl CoverageType {
    pub const ALL: [CoverageType; 8] = [
        CoverageType::Auto,
        CoverageType::Home,
        CoverageType::Umbrella,
        CoverageType::Flood,
        CoverageType::Earthquake,
        CoverageType::Jewelry,
        CoverageType::Watercraft,
        CoverageType::Renters,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CoverageType::Auto => "auto",
            CoverageType::Home => "home",
            CoverageType::Umbrella => "umbrella",
            CoverageType::Flood => "flood",
            CoverageType::Earthquake => "earthquake",
            CoverageType::Jewelry => "jewelry",
            CoverageType::Watercraft => "watercraft",
            CoverageType::Renters => "renters",
        }
    }

    /// Display label with the first letter capitalized, e.g. `Renters`.
    pub fn label(&self) -> String {
        let raw = self.as_str();
        let mut chars = raw.chars();
        match chars.next() {
            Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
            None => String::new(),
        }
    }
}

impl fmt::Display for CoverageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown coverage type '{0}'")]
pub struct UnknownCoverageType(pub String);

impl FromStr for CoverageType {
    type Err = UnknownCoverageType;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        CoverageType::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| UnknownCoverageType(value.to_string()))
    }
}

/// Priority attached to a surfaced gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown severity '{0}'")]
pub struct UnknownSeverity(pub String);

impl FromStr for Severity {
    type Err = UnknownSeverity;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(Severity::High),
            "medium" => Ok(Severity::Medium),
            "low" => Ok(Severity::Low),
            _ => Err(UnknownSeverity(value.to_string())),
        }
    }
}

/// Ordered hazard scale used by the location risk tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    #[serde(rename = "Very High")]
    VeryHigh,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
            RiskLevel::VeryHigh => "Very High",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One line of existing insurance on the policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coverage {
    pub coverage_type: CoverageType,
    #[serde(default, deserialize_with = "whole_number::optional")]
    pub limit: Option<u64>,
    #[serde(default, deserialize_with = "whole_number::optional")]
    pub deductible: Option<u64>,
    #[serde(default)]
    pub premium: Option<f64>,
}

/// Customer facts the underwriting rules are evaluated against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerProfile {
    pub name: String,
    pub zip_code: String,
    #[serde(default, deserialize_with = "whole_number::optional")]
    pub net_worth: Option<u64>,
    #[serde(default, deserialize_with = "whole_number::optional")]
    pub home_value: Option<u64>,
    #[serde(default, deserialize_with = "whole_number::optional")]
    pub additional_properties: Option<u32>,
    #[serde(default)]
    pub has_watercraft: bool,
    #[serde(default)]
    pub has_high_value_items: bool,
}

/// Policy under review: identifier, customer, and the lines already in force.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyInput {
    pub policy_number: String,
    pub customer_profile: CustomerProfile,
    #[serde(default)]
    pub existing_coverages: Vec<Coverage>,
}

pub(crate) fn has_coverage(coverages: &[Coverage], coverage_type: CoverageType) -> bool {
    coverages
        .iter()
        .any(|coverage| coverage.coverage_type == coverage_type)
}

/// Missing or inadequate coverage surfaced to the customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageGap {
    pub gap_type: CoverageType,
    pub severity: Severity,
    pub title: String,
    pub explanation: String,
    pub recommendation: String,
    pub estimated_annual_premium: Option<f64>,
    #[serde(default)]
    pub risk_factors: Vec<String>,
}

/// Final output of one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub policy_number: String,
    pub customer_name: String,
    pub total_gaps_found: usize,
    pub coverage_gaps: Vec<CoverageGap>,
    pub total_estimated_premium_impact: f64,
    pub analysis_summary: String,
}

impl AnalysisResult {
    pub fn high_severity_count(&self) -> usize {
        self.coverage_gaps
            .iter()
            .filter(|gap| gap.severity == Severity::High)
            .count()
    }
}

/// Amounts and counts arrive from hand-written documents, so `3000000.0` reads as `3000000`.
pub(crate) mod whole_number {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Number {
        Integer(u64),
        Float(f64),
    }

    pub(crate) fn optional<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: TryFrom<u64>,
    {
        let value = match Option::<Number>::deserialize(deserializer)? {
            None => return Ok(None),
            Some(Number::Integer(value)) => value,
            Some(Number::Float(value))
                if value.is_finite()
                    && value >= 0.0
                    && value.fract() == 0.0
                    && value <= u64::MAX as f64 =>
            {
                value as u64
            }
            Some(Number::Float(value)) => {
                return Err(D::Error::custom(format!(
                    "expected a non-negative whole number, found {value}"
                )))
            }
        };

        T::try_from(value)
            .map(Some)
            .map_err(|_| D::Error::custom(format!("number {value} is out of range")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coverage_type_parsing_normalizes_case_and_whitespace() {
        assert_eq!(" Flood ".parse::<CoverageType>(), Ok(CoverageType::Flood));
        assert_eq!("UMBRELLA".parse::<CoverageType>(), Ok(CoverageType::Umbrella));
        assert!("pet".parse::<CoverageType>().is_err());
    }

    #[test]
    fn risk_levels_are_ordered_by_severity() {
        assert!(RiskLevel::Low < RiskLevel::Medium);
        assert!(RiskLevel::High < RiskLevel::VeryHigh);
        assert_eq!(
            serde_json::to_value(RiskLevel::VeryHigh).expect("serializes"),
            serde_json::json!("Very High")
        );
    }

    #[test]
    fn customer_profile_defaults_optional_flags() {
        let profile: CustomerProfile =
            serde_json::from_str(r#"{"name":"Dana Reyes","zip_code":"60601"}"#)
                .expect("profile parses");
        assert_eq!(profile.additional_properties, None);
        assert!(!profile.has_watercraft);
        assert!(!profile.has_high_value_items);
        assert!(profile.net_worth.is_none());
    }

    #[test]
    fn whole_number_floats_are_accepted_for_amounts() {
        let profile: CustomerProfile = serde_json::from_str(
            r#"{"name":"Dana Reyes","zip_code":"60601","net_worth":3000000.0,
                "home_value":850000,"additional_properties":2.0}"#,
        )
        .expect("profile parses");
        assert_eq!(profile.net_worth, Some(3_000_000));
        assert_eq!(profile.home_value, Some(850_000));
        assert_eq!(profile.additional_properties, Some(2));

        let coverage: Coverage = serde_json::from_str(
            r#"{"coverage_type":"home","limit":400000.0,"deductible":null,"premium":1450.5}"#,
        )
        .expect("coverage parses");
        assert_eq!(coverage.limit, Some(400_000));
        assert_eq!(coverage.deductible, None);
    }

    #[test]
    fn fractional_or_negative_amounts_are_rejected() {
        for document in [
            r#"{"name":"Dana Reyes","zip_code":"60601","net_worth":1500000.5}"#,
            r#"{"name":"Dana Reyes","zip_code":"60601","home_value":-1}"#,
            r#"{"name":"Dana Reyes","zip_code":"60601","additional_properties":5000000000}"#,
        ] {
            assert!(serde_json::from_str::<CustomerProfile>(document).is_err(), "{document}");
        }
    }
}
