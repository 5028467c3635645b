use super::common::*;
use crate::analysis::domain::{CoverageType, Severity};
use crate::analysis::summary::{self, finalize, NO_GAPS_SUMMARY};
use crate::analysis::synthesis::{
    explanation_for, recommendation_text, resolve_severity, synthesize, title_for,
};
use crate::analysis::{rules, RuleRecommendation};

#[test]
fn unknown_coverage_types_are_skipped_without_aborting() {
    let recommendations = vec![
        external_recommendation("pet"),
        external_recommendation("Watercraft"),
        external_recommendation(""),
    ];

    let gaps = synthesize(&recommendations);

    assert_eq!(gaps.len(), 1);
    assert_eq!(gaps[0].gap_type, CoverageType::Watercraft);
    assert_eq!(gaps[0].title, "Watercraft Liability Exposure");
    assert_eq!(gaps[0].estimated_annual_premium, Some(325.5));
    assert_eq!(gaps[0].risk_factors, vec!["Owns watercraft".to_string()]);
}

#[test]
fn severity_defaults_to_medium_when_missing_or_unreadable() {
    assert_eq!(resolve_severity(None), Severity::Medium);
    assert_eq!(resolve_severity(Some("critical")), Severity::Medium);
    assert_eq!(resolve_severity(Some("low")), Severity::Low);
    assert_eq!(resolve_severity(Some("High")), Severity::High);

    let mut recommendation = external_recommendation("watercraft");
    recommendation.severity = Some("HIGH".to_string());
    assert_eq!(synthesize(&[recommendation])[0].severity, Severity::High);
}

#[test]
fn titles_cover_every_coverage_type() {
    assert_eq!(
        title_for(CoverageType::Umbrella),
        "Missing Umbrella Liability Protection"
    );
    assert_eq!(title_for(CoverageType::Flood), "Flood Insurance Coverage Gap");
    assert_eq!(
        title_for(CoverageType::Earthquake),
        "Earthquake Coverage Not Included"
    );
    assert_eq!(title_for(CoverageType::Jewelry), "High-Value Items Underinsured");
    assert_eq!(title_for(CoverageType::Renters), "Missing Renters Coverage");
    assert_eq!(title_for(CoverageType::Auto), "Missing Auto Coverage");

    for coverage_type in CoverageType::ALL {
        assert!(!title_for(coverage_type).is_empty());
    }
}

#[test]
fn explanations_embed_the_rule_reason() {
    let flood = explanation_for(CoverageType::Flood, "Property sits in zone AE");
    assert!(flood.starts_with("Standard homeowner policies don't cover flood damage."));
    assert!(flood.contains("Property sits in zone AE."));

    let fallback = explanation_for(CoverageType::Jewelry, "Owns a vintage watch");
    assert_eq!(
        fallback,
        "Owns a vintage watch. This coverage gap could leave you financially exposed."
    );
}

#[test]
fn recommendation_text_varies_with_available_figures() {
    assert_eq!(
        recommendation_text(CoverageType::Flood, Some(250_000), Some(2_500.0)),
        "We recommend adding flood coverage with a $250,000 limit. Estimated annual premium: $2,500.00."
    );
    assert_eq!(
        recommendation_text(CoverageType::Jewelry, Some(50_000), None),
        "We recommend adding jewelry coverage with a $50,000 limit."
    );
    assert_eq!(
        recommendation_text(CoverageType::Umbrella, None, Some(600.0)),
        "We recommend adding umbrella coverage to your policy."
    );
    assert_eq!(
        recommendation_text(CoverageType::Earthquake, Some(0), Some(0.0)),
        "We recommend adding earthquake coverage to your policy."
    );
}

#[test]
fn synthesized_gaps_follow_recommendation_order() {
    let profile = wealthy_customer(MIAMI_BEACH, 3_000_000);
    let recommendations = rules::evaluate(&profile, &[], &risk_for(MIAMI_BEACH));

    let gaps = synthesize(&recommendations);
    let types: Vec<_> = gaps.iter().map(|gap| gap.gap_type).collect();

    assert_eq!(
        types,
        vec![CoverageType::Umbrella, CoverageType::Flood, CoverageType::Jewelry]
    );
    assert_eq!(gaps[0].severity, Severity::High);
    assert_eq!(gaps[1].severity, Severity::High);
    assert_eq!(gaps[2].severity, Severity::Medium);
    assert!(gaps[0].explanation.contains("Net worth of $3,000,000"));
}

#[test]
fn finalize_totals_premiums_and_counts_high_severity() {
    let mut unpriced: RuleRecommendation = external_recommendation("watercraft");
    unpriced.estimated_premium = None;
    unpriced.severity = Some("High".to_string());
    let gaps = synthesize(&[external_recommendation("renters"), unpriced]);

    let result = finalize("POL-9", "Jordan Alvarez", gaps);

    assert_eq!(result.total_gaps_found, 2);
    assert_eq!(result.coverage_gaps.len(), 2);
    assert_eq!(result.total_estimated_premium_impact, 325.5);
    assert_eq!(result.high_severity_count(), 1);
    assert_eq!(
        result.analysis_summary,
        "Analysis identified 2 coverage gap(s), including 1 high-priority item(s). \
         Total estimated premium impact: $325.50/year. \
         Addressing these gaps will significantly improve financial protection."
    );
}

#[test]
fn finalize_without_gaps_uses_reassuring_summary() {
    let result = finalize("POL-10", "Jordan Alvarez", Vec::new());

    assert_eq!(result.total_gaps_found, 0);
    assert_eq!(result.total_estimated_premium_impact, 0.0);
    assert_eq!(result.analysis_summary, NO_GAPS_SUMMARY);
    assert_eq!(summary::high_severity_count(&result.coverage_gaps), 0);
}
