//! Coverage gap analysis: risk lookup, underwriting rules, gap synthesis, aggregation.
//!
//! The stages run as a strictly linear, synchronous pipeline over value objects built
//! per request. Unknown locations, coverage types, and severities are resolved to
//! documented defaults or skipped rather than surfaced as errors, so an analysis always
//! yields a (possibly empty) result.

pub mod currency;
pub mod domain;
pub mod narrative;
pub mod parser;
pub mod pipeline;
pub mod risk;
pub mod router;
pub mod rules;
pub mod service;
pub mod summary;
pub mod synthesis;

#[cfg(test)]
mod tests;

pub use domain::{
    AnalysisResult, Coverage, CoverageGap, CoverageType, CustomerProfile, PolicyInput, RiskLevel,
    Severity, UnknownCoverageType, UnknownSeverity,
};
pub use narrative::{
    CustomerDigest, DisabledNarrator, NarrativeError, NarrativeRequest, Narrator,
};
pub use parser::{parse_policy_document, parse_policy_file, PolicyParseError};
pub use pipeline::{GapAnalysisPipeline, PipelineOutcome};
pub use risk::{HazardRisk, RiskData, RiskProfile};
pub use router::analysis_router;
pub use rules::{RuleRecommendation, UnderwritingRule, RULE_SET};
pub use service::{AnalysisReport, CoverageAnalysisService};
pub use summary::{finalize, PolicySnapshot, NO_GAPS_SUMMARY};
pub use synthesis::synthesize;
