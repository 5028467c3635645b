use crate::infra::analysis_service;
use clap::Args;
use coverage_gap::analysis::currency::dollars;
use coverage_gap::analysis::{
    parse_policy_document, parse_policy_file, AnalysisReport, CoverageAnalysisService,
    DisabledNarrator,
};
use coverage_gap::config::AppConfig;
use coverage_gap::error::AppError;
use std::path::PathBuf;
use std::sync::Arc;

const SAMPLE_POLICIES: &[(&str, &str)] = &[
    (
        "High Net Worth (Miami)",
        include_str!("../../../crates/coverage-gap/sample_policies/high_networth_miami.json"),
    ),
    (
        "San Francisco Home",
        include_str!("../../../crates/coverage-gap/sample_policies/san_francisco_home.json"),
    ),
    (
        "Well Covered (Chicago)",
        include_str!("../../../crates/coverage-gap/sample_policies/well_covered_chicago.json"),
    ),
];

#[derive(Args, Debug)]
pub(crate) struct AnalyzeArgs {
    /// Path to a JSON policy document
    #[arg(long)]
    pub(crate) policy: PathBuf,
    /// Print the full report as pretty JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
    /// Ask the configured chat-completions backend for an advisor narrative
    #[arg(long)]
    pub(crate) narrate: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Print each report as pretty JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) async fn run_analyze(args: AnalyzeArgs) -> Result<(), AppError> {
    let AnalyzeArgs {
        policy,
        json,
        narrate,
    } = args;

    let policy = parse_policy_file(&policy)?;
    let report = if narrate {
        let config = AppConfig::load()?;
        analysis_service(&config.narrative).report(&policy).await
    } else {
        disabled_service().report(&policy).await
    };

    print_report(&report, json)
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    println!("Coverage gap analysis demo");
    let service = disabled_service();

    for (label, document) in SAMPLE_POLICIES {
        println!("\n=== {label} ===");
        let policy = parse_policy_document(document)?;
        let report = service.report(&policy).await;
        print_report(&report, args.json)?;
    }

    Ok(())
}

fn disabled_service() -> CoverageAnalysisService<DisabledNarrator> {
    CoverageAnalysisService::new(Arc::new(DisabledNarrator))
}

fn print_report(report: &AnalysisReport, json: bool) -> Result<(), AppError> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        println!("{}", render_report(report));
    }
    Ok(())
}

pub(crate) fn render_report(report: &AnalysisReport) -> String {
    let result = &report.result;
    let mut lines = vec![
        format!("Policy: {}", result.policy_number),
        format!("Customer: {}", result.customer_name),
        format!(
            "Analyzed: {}",
            report.analyzed_at.format("%Y-%m-%d %H:%M:%S UTC")
        ),
        format!(
            "Existing coverage: {} line(s), {}/year",
            report.existing_coverage.count,
            dollars(report.existing_coverage.total_premium)
        ),
        format!("Gaps found: {}", result.total_gaps_found),
        format!(
            "Total premium impact: {}/year",
            dollars(result.total_estimated_premium_impact)
        ),
        format!("Summary: {}", result.analysis_summary),
    ];

    if !report.risk_factors.is_empty() {
        lines.push("Risk factors:".to_string());
        lines.extend(report.risk_factors.iter().map(|factor| format!("  - {factor}")));
    }

    for (index, gap) in result.coverage_gaps.iter().enumerate() {
        lines.push(String::new());
        lines.push(format!("{}. {} [{}]", index + 1, gap.title, gap.severity));
        lines.push(format!("   Type: {}", gap.gap_type));
        lines.push(format!("   Explanation: {}", gap.explanation));
        lines.push(format!("   Recommendation: {}", gap.recommendation));
        if let Some(premium) = gap.estimated_annual_premium {
            lines.push(format!("   Premium: {}/year", dollars(premium)));
        }
        if !gap.risk_factors.is_empty() {
            lines.push(format!("   Risk factors: {}", gap.risk_factors.join(", ")));
        }
    }

    if let Some(narrative) = &report.advisor_narrative {
        lines.push(String::new());
        lines.push("Advisor narrative:".to_string());
        lines.push(narrative.clone());
    }

    lines.join("\n")
}
