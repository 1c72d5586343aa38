use crate::infra::{parse_seed, AssessmentEnvelope, ScoringService};
use clap::Args;
use loan_risk::config::AppConfig;
use loan_risk::error::AppError;
use loan_risk::intake::ApplicantCsvImporter;
use loan_risk::scoring::{
    ApplicantProfile, ApplicantSubmission, EducationLevel, EmploymentStatus, FieldValue,
    HomeOwnership, Ratio, RiskAssessor, MODEL_ACCURACY,
};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct AssessArgs {
    /// Annual income, e.g. 85000 or "$85,000"
    #[arg(long)]
    pub(crate) income: Option<String>,
    /// Requested loan amount
    #[arg(long)]
    pub(crate) loan_amount: Option<String>,
    /// Applicant age in years
    #[arg(long)]
    pub(crate) age: Option<String>,
    /// full-time, part-time, self-employed or unemployed
    #[arg(long)]
    pub(crate) employment: Option<String>,
    /// Years of credit history
    #[arg(long)]
    pub(crate) credit_history: Option<String>,
    /// Existing monthly debt payments
    #[arg(long)]
    pub(crate) existing_debt: Option<String>,
    /// high-school, bachelor, master or phd
    #[arg(long)]
    pub(crate) education: Option<String>,
    /// own, mortgage or rent
    #[arg(long)]
    pub(crate) home_ownership: Option<String>,
    /// Seed the scoring noise (falls back to LOAN_RISK_SEED)
    #[arg(long, value_parser = parse_seed)]
    pub(crate) seed: Option<u64>,
    /// Print the assessment as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

impl AssessArgs {
    fn submission(&self) -> ApplicantSubmission {
        let text = |value: &Option<String>| value.as_deref().map(FieldValue::from);
        ApplicantSubmission {
            income: text(&self.income),
            loan_amount: text(&self.loan_amount),
            age: text(&self.age),
            employment: text(&self.employment),
            credit_history_years: text(&self.credit_history),
            existing_monthly_debt: text(&self.existing_debt),
            education: text(&self.education),
            home_ownership: text(&self.home_ownership),
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct BatchArgs {
    /// CSV export with one applicant per row
    pub(crate) path: PathBuf,
    /// Seed the scoring noise (falls back to LOAN_RISK_SEED)
    #[arg(long, value_parser = parse_seed)]
    pub(crate) seed: Option<u64>,
    /// Print the assessments as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Seed the scoring noise (falls back to LOAN_RISK_SEED)
    #[arg(long, value_parser = parse_seed)]
    pub(crate) seed: Option<u64>,
}

#[derive(Debug, Serialize)]
struct BatchLine<'a> {
    row: usize,
    #[serde(flatten)]
    assessment: &'a AssessmentEnvelope,
}

pub(crate) fn run_assess(args: AssessArgs) -> Result<(), AppError> {
    let scoring = scoring_service(args.seed)?;
    let profile = args.submission().into_profile();
    let assessment = scoring.assess(&profile);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&assessment)?);
    } else {
        println!("{}", model_banner());
        println!("{}", assessment_report("Applicant", &profile, &assessment));
    }
    Ok(())
}

pub(crate) fn run_batch(args: BatchArgs) -> Result<(), AppError> {
    let scoring = scoring_service(args.seed)?;
    let rows = ApplicantCsvImporter::from_path(&args.path)?;
    let assessments: Vec<(usize, AssessmentEnvelope)> = rows
        .iter()
        .map(|row| (row.row, scoring.assess(&row.profile)))
        .collect();

    if args.json {
        let lines: Vec<BatchLine<'_>> = assessments
            .iter()
            .map(|(row, assessment)| BatchLine {
                row: *row,
                assessment,
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&lines)?);
        return Ok(());
    }

    println!("{}", model_banner());
    println!("Batch: {} ({} applicants)", args.path.display(), assessments.len());
    for (row, assessment) in &assessments {
        println!("{}", batch_line(*row, assessment));
    }
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let scoring = scoring_service(args.seed)?;

    println!("Loan risk demo");
    println!("{}", model_banner());
    for (title, profile) in demo_applicants() {
        let assessment = scoring.assess(&profile);
        println!("\n{}", assessment_report(title, &profile, &assessment));
    }
    Ok(())
}

fn scoring_service(seed: Option<u64>) -> Result<ScoringService, AppError> {
    let seed = match seed {
        Some(seed) => Some(seed),
        None => AppConfig::load()?.scoring.seed,
    };
    Ok(ScoringService::new(RiskAssessor::new(), seed))
}

fn demo_applicants() -> Vec<(&'static str, ApplicantProfile)> {
    vec![
        (
            "Established homeowner",
            ApplicantProfile::builder()
                .income(90_000.0)
                .loan_amount(20_000.0)
                .age(40)
                .employment(EmploymentStatus::FullTime)
                .credit_history_years(12.0)
                .existing_monthly_debt(500.0)
                .education(EducationLevel::Bachelor)
                .home_ownership(HomeOwnership::Mortgage)
                .build(),
        ),
        (
            "First-time borrower",
            ApplicantProfile::builder()
                .income(38_000.0)
                .loan_amount(22_000.0)
                .age(24)
                .employment(EmploymentStatus::PartTime)
                .credit_history_years(1.5)
                .existing_monthly_debt(650.0)
                .education(EducationLevel::HighSchool)
                .home_ownership(HomeOwnership::Rent)
                .build(),
        ),
    ]
}

fn model_banner() -> String {
    format!(
        "Rule-based loan risk model (reported accuracy {:.1}%)",
        MODEL_ACCURACY * 100.0
    )
}

fn format_ratio(ratio: &Ratio) -> String {
    match ratio {
        Ratio::Value(value) => format!("{:.1}%", value * 100.0),
        Ratio::Unbounded => "unbounded (no income)".to_string(),
        Ratio::Undefined => "n/a".to_string(),
    }
}

fn assessment_report(
    title: &str,
    profile: &ApplicantProfile,
    assessment: &AssessmentEnvelope,
) -> String {
    let prediction = &assessment.prediction;
    let mut lines = vec![
        format!(
            "{title}: income ${:.0} | loan ${:.0} | age {} | {}",
            profile.income,
            profile.loan_amount,
            profile.age,
            display_or_unknown(profile.employment.label())
        ),
        format!(
            "- Risk score {} ({} risk) -> {}",
            prediction.risk_score,
            assessment.risk_level.label(),
            assessment.decision.summary()
        ),
        format!(
            "- Confidence {}% | estimated credit score {}",
            prediction.confidence, prediction.estimated_credit_score
        ),
        format!(
            "- Debt-to-income {} | loan-to-income {}",
            format_ratio(&prediction.debt_to_income_ratio),
            format_ratio(&prediction.loan_to_income_ratio)
        ),
        "Insights:".to_string(),
    ];

    lines.extend(
        prediction
            .insights
            .iter()
            .map(|insight| format!("  - [{}] {}", insight.sentiment.label(), insight.text)),
    );

    lines.push("Feature importance:".to_string());
    lines.extend(
        prediction
            .feature_importances
            .ranked()
            .into_iter()
            .map(|(factor, share)| format!("  - {:<15} {:>5.1}%", factor.label(), share)),
    );

    lines.push(format!(
        "Processed in {:.3}s",
        prediction.processing_time_seconds
    ));
    lines.join("\n")
}

fn batch_line(row: usize, assessment: &AssessmentEnvelope) -> String {
    let prediction = &assessment.prediction;
    format!(
        "  row {:>3}: risk {:>2} ({}) -> {} | confidence {}% | credit {}",
        row,
        prediction.risk_score,
        assessment.risk_level.label(),
        assessment.decision.summary(),
        prediction.confidence,
        prediction.estimated_credit_score
    )
}

fn display_or_unknown(label: &str) -> &str {
    if label.is_empty() {
        "employment unknown"
    } else {
        label
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded_assessment(profile: &ApplicantProfile) -> AssessmentEnvelope {
        ScoringService::new(RiskAssessor::new(), Some(5)).assess(profile)
    }

    #[test]
    fn flags_become_a_lenient_submission() {
        let args = AssessArgs {
            income: Some("$72,500".to_string()),
            age: Some("thirty".to_string()),
            employment: Some("Self Employed".to_string()),
            ..AssessArgs::default()
        };

        let profile = args.submission().into_profile();
        assert_eq!(profile.income, 72_500.0);
        assert_eq!(profile.age, 0);
        assert_eq!(profile.employment, EmploymentStatus::SelfEmployed);
        assert_eq!(profile.home_ownership, HomeOwnership::default());
    }

    #[test]
    fn report_lists_insights_and_ranked_importances() {
        let (title, profile) = demo_applicants().remove(0);
        let report = assessment_report(title, &profile, &seeded_assessment(&profile));

        assert!(report.starts_with("Established homeowner: income $90000"));
        assert!(report.contains("[POSITIVE] Stable full-time employment"));
        let importance_section = report
            .split("Feature importance:")
            .nth(1)
            .expect("importance section");
        assert!(importance_section.trim_start().starts_with("- Age Factor"));
    }

    #[test]
    fn zero_income_ratios_render_readably() {
        assert_eq!(format_ratio(&Ratio::Value(0.25)), "25.0%");
        assert_eq!(format_ratio(&Ratio::Unbounded), "unbounded (no income)");
        assert_eq!(format_ratio(&Ratio::Undefined), "n/a");
    }

    #[test]
    fn banner_reports_model_accuracy() {
        assert_eq!(
            model_banner(),
            "Rule-based loan risk model (reported accuracy 94.7%)"
        );
    }
}
