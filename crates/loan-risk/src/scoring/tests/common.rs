use crate::scoring::{
    ApplicantProfile, EducationLevel, EmploymentStatus, HomeOwnership, ProcessingClock,
    RiskAssessor,
};
use std::time::Duration;

/// Applicant from the reference walkthrough: comfortable income, low debt.
pub(super) fn reference_profile() -> ApplicantProfile {
    ApplicantProfile::builder()
        .income(90_000.0)
        .loan_amount(20_000.0)
        .age(40)
        .employment(EmploymentStatus::FullTime)
        .credit_history_years(12.0)
        .existing_monthly_debt(500.0)
        .education(EducationLevel::Bachelor)
        .home_ownership(HomeOwnership::Mortgage)
        .build()
}

/// Applicant stacking every risk-increasing band.
pub(super) fn fragile_profile() -> ApplicantProfile {
    ApplicantProfile::builder()
        .income(18_000.0)
        .loan_amount(25_000.0)
        .age(22)
        .employment(EmploymentStatus::Unemployed)
        .credit_history_years(1.0)
        .existing_monthly_debt(900.0)
        .education(EducationLevel::HighSchool)
        .home_ownership(HomeOwnership::Rent)
        .build()
}

pub(super) fn fixed_clock_assessor() -> RiskAssessor {
    RiskAssessor::with_clock(ProcessingClock::Fixed(Duration::from_millis(1500)))
}

pub(super) fn insight_texts(insights: &[crate::scoring::Insight]) -> Vec<&str> {
    insights.iter().map(|insight| insight.text.as_str()).collect()
}
