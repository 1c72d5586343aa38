use super::noise::NoiseSource;
use super::profile::{ApplicantProfile, EducationLevel, EmploymentStatus};
use serde::{Serialize, Serializer};

pub const CREDIT_SCORE_BASE: f64 = 650.0;
pub const CREDIT_SCORE_MIN: f64 = 300.0;
pub const CREDIT_SCORE_MAX: f64 = 850.0;
pub const CREDIT_SCORE_NOISE: f64 = 30.0;
const CREDIT_HISTORY_POINTS_PER_YEAR: f64 = 8.0;
const CREDIT_HISTORY_POINTS_CAP: f64 = 120.0;

/// Quotient of an obligation over income that stays meaningful when income is zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Ratio {
    Value(f64),
    /// A positive obligation against zero income.
    Unbounded,
    /// Zero over zero.
    Undefined,
}

impl Ratio {
    pub fn of(numerator: f64, denominator: f64) -> Self {
        if denominator > 0.0 {
            Self::Value(numerator / denominator)
        } else if numerator > 0.0 {
            Self::Unbounded
        } else {
            Self::Undefined
        }
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Value(value) => Some(*value),
            Self::Unbounded | Self::Undefined => None,
        }
    }

    /// Strictly above `threshold`. An unbounded ratio exceeds every threshold.
    pub fn exceeds(&self, threshold: f64) -> bool {
        match self {
            Self::Value(value) => *value > threshold,
            Self::Unbounded => true,
            Self::Undefined => false,
        }
    }

    /// Strictly below `threshold`. Only finite ratios can be below anything.
    pub fn below(&self, threshold: f64) -> bool {
        match self {
            Self::Value(value) => *value < threshold,
            Self::Unbounded | Self::Undefined => false,
        }
    }
}

impl Serialize for Ratio {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.value().serialize(serializer)
    }
}

/// Ratios and the credit score estimate computed ahead of the analyzers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedMetrics {
    pub debt_to_income: Ratio,
    pub loan_to_income: Ratio,
    /// Unrounded, already clamped to the credit score range.
    pub estimated_credit_score: f64,
}

impl DerivedMetrics {
    pub fn compute(profile: &ApplicantProfile, noise: &mut impl NoiseSource) -> Self {
        Self {
            debt_to_income: Ratio::of(profile.existing_monthly_debt * 12.0, profile.income),
            loan_to_income: Ratio::of(profile.loan_amount, profile.income),
            estimated_credit_score: estimate_credit_score(profile, noise),
        }
    }
}

pub fn estimate_credit_score(profile: &ApplicantProfile, noise: &mut impl NoiseSource) -> f64 {
    let history = (profile.credit_history_years * CREDIT_HISTORY_POINTS_PER_YEAR)
        .min(CREDIT_HISTORY_POINTS_CAP);

    let employment = match profile.employment {
        EmploymentStatus::FullTime => 30.0,
        EmploymentStatus::PartTime => 10.0,
        EmploymentStatus::Unemployed => -50.0,
        EmploymentStatus::SelfEmployed | EmploymentStatus::Unrecognized(_) => 0.0,
    };

    let education = match profile.education {
        EducationLevel::Phd | EducationLevel::Master => 20.0,
        EducationLevel::Bachelor => 10.0,
        EducationLevel::HighSchool | EducationLevel::Unrecognized(_) => 0.0,
    };

    let estimate = CREDIT_SCORE_BASE
        + history
        + employment
        + education
        + noise.jitter(CREDIT_SCORE_NOISE);

    estimate.clamp(CREDIT_SCORE_MIN, CREDIT_SCORE_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::noise::{NoNoise, ScriptedNoise};

    #[test]
    fn ratio_handles_zero_income() {
        assert_eq!(Ratio::of(10_000.0, 0.0), Ratio::Unbounded);
        assert_eq!(Ratio::of(0.0, 0.0), Ratio::Undefined);
        assert!(Ratio::Unbounded.exceeds(0.8));
        assert!(!Ratio::Unbounded.below(0.2));
        assert!(!Ratio::Undefined.exceeds(0.0));
        assert!(!Ratio::Undefined.below(1.0));
    }

    #[test]
    fn ratio_serializes_sentinels_as_null() {
        assert_eq!(serde_json::to_string(&Ratio::Value(0.25)).unwrap(), "0.25");
        assert_eq!(serde_json::to_string(&Ratio::Unbounded).unwrap(), "null");
        assert_eq!(serde_json::to_string(&Ratio::Undefined).unwrap(), "null");
    }

    #[test]
    fn credit_history_points_are_capped() {
        let veteran = ApplicantProfile::builder().credit_history_years(40.0).build();
        assert_eq!(estimate_credit_score(&veteran, &mut NoNoise), 770.0);

        let newcomer = ApplicantProfile::builder().credit_history_years(2.5).build();
        assert_eq!(estimate_credit_score(&newcomer, &mut NoNoise), 670.0);
    }

    #[test]
    fn credit_score_applies_category_adjustments() {
        let profile = ApplicantProfile::builder()
            .credit_history_years(5.0)
            .employment(EmploymentStatus::Unemployed)
            .education(EducationLevel::Master)
            .build();
        // 650 + 40 - 50 + 20
        assert_eq!(estimate_credit_score(&profile, &mut NoNoise), 660.0);
    }

    #[test]
    fn credit_score_noise_is_bounded() {
        let profile = ApplicantProfile::builder()
            .credit_history_years(15.0)
            .employment(EmploymentStatus::FullTime)
            .education(EducationLevel::Phd)
            .build();
        let low = estimate_credit_score(&profile, &mut ScriptedNoise::new([0.0]));
        let high = estimate_credit_score(&profile, &mut ScriptedNoise::new([0.999_999]));
        assert_eq!(low, 790.0);
        assert!(high <= CREDIT_SCORE_MAX);
        assert!(high > 849.0);
    }

    #[test]
    fn derived_ratios_match_definitions() {
        let profile = ApplicantProfile::builder()
            .income(90_000.0)
            .loan_amount(20_000.0)
            .existing_monthly_debt(500.0)
            .build();
        let metrics = DerivedMetrics::compute(&profile, &mut NoNoise);
        let dti = metrics.debt_to_income.value().expect("finite dti");
        let lti = metrics.loan_to_income.value().expect("finite lti");
        assert!((dti - 0.066_666).abs() < 1e-4);
        assert!((lti - 0.222_222).abs() < 1e-4);
    }
}
