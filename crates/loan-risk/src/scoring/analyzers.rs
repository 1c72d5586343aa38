//! The seven feature analyzers.
//!
//! Each analyzer maps one attribute (or pair of ratios) onto a signed score
//! impact plus the insights explaining it. Negative impacts lower the risk
//! score. Bands are checked top-down and the thresholds are fixed.

use super::metrics::{DerivedMetrics, Ratio};
use super::prediction::{Factor, Insight, Sentiment};
use super::profile::{ApplicantProfile, EducationLevel, EmploymentStatus, HomeOwnership};

/// Contribution of a single factor to the risk score.
#[derive(Debug, Clone, PartialEq)]
pub struct FactorImpact {
    pub factor: Factor,
    pub impact: f64,
    pub insights: Vec<Insight>,
}

impl FactorImpact {
    fn single(factor: Factor, impact: f64, text: &str, sentiment: Sentiment) -> Self {
        Self {
            factor,
            impact,
            insights: vec![Insight::new(text, sentiment)],
        }
    }

    /// Categorical rules stay silent when they have nothing to say.
    fn unless_neutral(factor: Factor, impact: f64, text: &str, sentiment: Sentiment) -> Self {
        let insights = if impact == 0.0 {
            Vec::new()
        } else {
            vec![Insight::new(text, sentiment)]
        };
        Self {
            factor,
            impact,
            insights,
        }
    }

    /// Absolute impact rescaled by the factor's importance multiplier.
    pub fn raw_importance(&self) -> f64 {
        self.impact.abs() * self.factor.importance_scale()
    }
}

/// Run every analyzer in evaluation order.
pub fn analyze_all(profile: &ApplicantProfile, metrics: &DerivedMetrics) -> [FactorImpact; 7] {
    [
        analyze_income(profile.income),
        analyze_debt_ratios(metrics.debt_to_income, metrics.loan_to_income),
        analyze_employment(&profile.employment),
        analyze_credit_history(profile.credit_history_years),
        analyze_education(&profile.education),
        analyze_home_ownership(&profile.home_ownership),
        analyze_age(profile.age),
    ]
}

pub fn analyze_income(income: f64) -> FactorImpact {
    let (impact, text, sentiment) = if income > 100_000.0 {
        (-18.0, "High income bracket (top 20%)", Sentiment::Positive)
    } else if income > 75_000.0 {
        (-12.0, "Above-average income", Sentiment::Positive)
    } else if income > 50_000.0 {
        (-5.0, "Median income range", Sentiment::Neutral)
    } else if income > 30_000.0 {
        (8.0, "Below-median income", Sentiment::Negative)
    } else {
        (20.0, "Low income bracket", Sentiment::Negative)
    };
    FactorImpact::single(Factor::Income, impact, text, sentiment)
}

/// Debt-to-income and loan-to-income are banded independently and summed.
pub fn analyze_debt_ratios(debt_to_income: Ratio, loan_to_income: Ratio) -> FactorImpact {
    let mut impact = 0.0;
    let mut insights = Vec::with_capacity(2);

    let debt_band = if debt_to_income.exceeds(0.5) {
        Some((25.0, "Very high existing debt burden", Sentiment::Negative))
    } else if debt_to_income.exceeds(0.3) {
        Some((15.0, "High debt-to-income ratio", Sentiment::Negative))
    } else if debt_to_income.below(0.1) {
        Some((-10.0, "Low debt burden", Sentiment::Positive))
    } else {
        None
    };

    let loan_band = if loan_to_income.exceeds(0.8) {
        Some((20.0, "Loan amount very high vs income", Sentiment::Negative))
    } else if loan_to_income.exceeds(0.5) {
        Some((12.0, "Large loan relative to income", Sentiment::Negative))
    } else if loan_to_income.below(0.2) {
        Some((-8.0, "Conservative loan amount", Sentiment::Positive))
    } else {
        None
    };

    for (delta, text, sentiment) in debt_band.into_iter().chain(loan_band) {
        impact += delta;
        insights.push(Insight::new(text, sentiment));
    }

    FactorImpact {
        factor: Factor::DebtRatios,
        impact,
        insights,
    }
}

pub fn analyze_employment(employment: &EmploymentStatus) -> FactorImpact {
    let (impact, text, sentiment) = match employment {
        EmploymentStatus::FullTime => (-15.0, "Stable full-time employment", Sentiment::Positive),
        EmploymentStatus::PartTime => (5.0, "Part-time employment", Sentiment::Neutral),
        EmploymentStatus::SelfEmployed => (
            12.0,
            "Self-employed (income variability)",
            Sentiment::Negative,
        ),
        EmploymentStatus::Unemployed => (35.0, "Currently unemployed", Sentiment::Negative),
        EmploymentStatus::Unrecognized(_) => (0.0, "Employment status unclear", Sentiment::Neutral),
    };
    FactorImpact::single(Factor::Employment, impact, text, sentiment)
}

pub fn analyze_credit_history(years: f64) -> FactorImpact {
    let (impact, text, sentiment) = if years >= 15.0 {
        (-20.0, "Extensive credit history (15+ years)", Sentiment::Positive)
    } else if years >= 10.0 {
        (-15.0, "Long credit history", Sentiment::Positive)
    } else if years >= 5.0 {
        (-8.0, "Moderate credit history", Sentiment::Positive)
    } else if years >= 2.0 {
        (10.0, "Limited credit history", Sentiment::Negative)
    } else {
        (18.0, "Very limited credit history", Sentiment::Negative)
    };
    FactorImpact::single(Factor::CreditHistory, impact, text, sentiment)
}

pub fn analyze_education(education: &EducationLevel) -> FactorImpact {
    let (impact, text, sentiment) = match education {
        EducationLevel::Phd => (-12.0, "PhD degree (high education)", Sentiment::Positive),
        EducationLevel::Master => (-8.0, "Master's degree", Sentiment::Positive),
        EducationLevel::Bachelor => (-5.0, "Bachelor's degree", Sentiment::Positive),
        EducationLevel::HighSchool => (3.0, "High school education", Sentiment::Neutral),
        EducationLevel::Unrecognized(_) => (0.0, "Education level unclear", Sentiment::Neutral),
    };
    FactorImpact::unless_neutral(Factor::Education, impact, text, sentiment)
}

pub fn analyze_home_ownership(home: &HomeOwnership) -> FactorImpact {
    let (impact, text, sentiment) = match home {
        HomeOwnership::Own => (-12.0, "Homeowner (financial stability)", Sentiment::Positive),
        HomeOwnership::Mortgage => (
            -5.0,
            "Paying mortgage (established credit)",
            Sentiment::Positive,
        ),
        HomeOwnership::Rent => (3.0, "Renting (less asset stability)", Sentiment::Neutral),
        HomeOwnership::Unrecognized(_) => (0.0, "Housing status unclear", Sentiment::Neutral),
    };
    FactorImpact::unless_neutral(Factor::HomeStatus, impact, text, sentiment)
}

pub fn analyze_age(age: u32) -> FactorImpact {
    let (impact, text, sentiment) = match age {
        35..=55 => (-12.0, "Prime earning age demographic", Sentiment::Positive),
        25..=65 => (-6.0, "Stable age demographic", Sentiment::Positive),
        0..=24 => (8.0, "Young applicant (limited experience)", Sentiment::Negative),
        _ => (12.0, "Near/at retirement age", Sentiment::Negative),
    };
    FactorImpact::single(Factor::Age, impact, text, sentiment)
}
