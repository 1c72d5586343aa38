use serde::{Deserialize, Serialize};
use tracing::trace;

/// Number of applicant fields considered when measuring data completeness.
pub const PROFILE_FIELD_COUNT: usize = 8;

/// Employment situation declared by the applicant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub enum EmploymentStatus {
    FullTime,
    PartTime,
    SelfEmployed,
    Unemployed,
    /// Anything else, carrying the raw text (empty when the field was unset).
    Unrecognized(String),
}

impl EmploymentStatus {
    pub fn parse(raw: &str) -> Self {
        match normalize_category(raw).as_str() {
            "full-time" => Self::FullTime,
            "part-time" => Self::PartTime,
            "self-employed" => Self::SelfEmployed,
            "unemployed" => Self::Unemployed,
            _ => Self::Unrecognized(raw.trim().to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::FullTime => "full-time",
            Self::PartTime => "part-time",
            Self::SelfEmployed => "self-employed",
            Self::Unemployed => "unemployed",
            Self::Unrecognized(raw) => raw.as_str(),
        }
    }

    fn is_provided(&self) -> bool {
        !matches!(self, Self::Unrecognized(raw) if raw.is_empty())
    }
}

/// Highest completed education level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub enum EducationLevel {
    Phd,
    Master,
    Bachelor,
    HighSchool,
    Unrecognized(String),
}

impl EducationLevel {
    pub fn parse(raw: &str) -> Self {
        match normalize_category(raw).as_str() {
            "phd" => Self::Phd,
            "master" => Self::Master,
            "bachelor" => Self::Bachelor,
            "high-school" => Self::HighSchool,
            _ => Self::Unrecognized(raw.trim().to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Phd => "phd",
            Self::Master => "master",
            Self::Bachelor => "bachelor",
            Self::HighSchool => "high-school",
            Self::Unrecognized(raw) => raw.as_str(),
        }
    }

    fn is_provided(&self) -> bool {
        !matches!(self, Self::Unrecognized(raw) if raw.is_empty())
    }
}

/// Housing situation of the applicant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub enum HomeOwnership {
    Own,
    Mortgage,
    Rent,
    Unrecognized(String),
}

impl HomeOwnership {
    pub fn parse(raw: &str) -> Self {
        match normalize_category(raw).as_str() {
            "own" => Self::Own,
            "mortgage" => Self::Mortgage,
            "rent" => Self::Rent,
            _ => Self::Unrecognized(raw.trim().to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Own => "own",
            Self::Mortgage => "mortgage",
            Self::Rent => "rent",
            Self::Unrecognized(raw) => raw.as_str(),
        }
    }

    fn is_provided(&self) -> bool {
        !matches!(self, Self::Unrecognized(raw) if raw.is_empty())
    }
}

macro_rules! category_conversions {
    ($($ty:ty),+) => {
        $(
            impl From<$ty> for String {
                fn from(value: $ty) -> Self {
                    value.label().to_string()
                }
            }

            /// Nothing provided.
            impl Default for $ty {
                fn default() -> Self {
                    Self::Unrecognized(String::new())
                }
            }
        )+
    };
}

category_conversions!(EmploymentStatus, EducationLevel, HomeOwnership);

/// Validated applicant attributes fed to the scoring pipeline.
///
/// Every numeric field is finite and non-negative; construction goes through
/// [`ApplicantProfile::from_submission`] or [`ApplicantProfileBuilder`], both of
/// which replace invalid values with zero instead of failing.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ApplicantProfile {
    pub income: f64,
    pub loan_amount: f64,
    pub age: u32,
    pub employment: EmploymentStatus,
    pub credit_history_years: f64,
    pub existing_monthly_debt: f64,
    pub education: EducationLevel,
    pub home_ownership: HomeOwnership,
}

impl ApplicantProfile {
    pub fn builder() -> ApplicantProfileBuilder {
        ApplicantProfileBuilder::default()
    }

    /// Normalize a loosely-typed submission. Never fails.
    pub fn from_submission(submission: &ApplicantSubmission) -> Self {
        Self {
            income: amount_field("income", submission.income.as_ref()),
            loan_amount: amount_field("loan_amount", submission.loan_amount.as_ref()),
            age: age_field(submission.age.as_ref()),
            employment: EmploymentStatus::parse(&text_field(submission.employment.as_ref())),
            credit_history_years: amount_field(
                "credit_history_years",
                submission.credit_history_years.as_ref(),
            ),
            existing_monthly_debt: amount_field(
                "existing_monthly_debt",
                submission.existing_monthly_debt.as_ref(),
            ),
            education: EducationLevel::parse(&text_field(submission.education.as_ref())),
            home_ownership: HomeOwnership::parse(&text_field(submission.home_ownership.as_ref())),
        }
    }

    /// Share of the eight fields that carry a non-zero or non-empty value.
    pub fn data_completeness(&self) -> f64 {
        let provided = [
            self.income != 0.0,
            self.loan_amount != 0.0,
            self.age != 0,
            self.employment.is_provided(),
            self.credit_history_years != 0.0,
            self.existing_monthly_debt != 0.0,
            self.education.is_provided(),
            self.home_ownership.is_provided(),
        ]
        .iter()
        .filter(|provided| **provided)
        .count();

        provided as f64 / PROFILE_FIELD_COUNT as f64
    }
}

/// Fluent construction for callers that already hold typed values.
#[derive(Debug, Clone, Default)]
pub struct ApplicantProfileBuilder {
    profile: ApplicantProfile,
}

impl ApplicantProfileBuilder {
    pub fn income(mut self, value: f64) -> Self {
        self.profile.income = sanitize_amount(value);
        self
    }

    pub fn loan_amount(mut self, value: f64) -> Self {
        self.profile.loan_amount = sanitize_amount(value);
        self
    }

    pub fn age(mut self, value: u32) -> Self {
        self.profile.age = value;
        self
    }

    pub fn employment(mut self, value: EmploymentStatus) -> Self {
        self.profile.employment = value;
        self
    }

    pub fn credit_history_years(mut self, value: f64) -> Self {
        self.profile.credit_history_years = sanitize_amount(value);
        self
    }

    pub fn existing_monthly_debt(mut self, value: f64) -> Self {
        self.profile.existing_monthly_debt = sanitize_amount(value);
        self
    }

    pub fn education(mut self, value: EducationLevel) -> Self {
        self.profile.education = value;
        self
    }

    pub fn home_ownership(mut self, value: HomeOwnership) -> Self {
        self.profile.home_ownership = value;
        self
    }

    pub fn build(self) -> ApplicantProfile {
        self.profile
    }
}

/// Raw applicant record as it arrives from a form, JSON body, or CSV row.
///
/// Field names accept both snake_case and the camelCase form names.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ApplicantSubmission {
    pub income: Option<FieldValue>,
    #[serde(alias = "loanAmount")]
    pub loan_amount: Option<FieldValue>,
    pub age: Option<FieldValue>,
    #[serde(alias = "employment_status", alias = "employmentStatus")]
    pub employment: Option<FieldValue>,
    #[serde(
        alias = "creditHistory",
        alias = "credit_history",
        alias = "creditHistoryYears"
    )]
    pub credit_history_years: Option<FieldValue>,
    #[serde(
        alias = "existingDebt",
        alias = "existing_debt",
        alias = "existingMonthlyDebt"
    )]
    pub existing_monthly_debt: Option<FieldValue>,
    #[serde(alias = "education_level", alias = "educationLevel")]
    pub education: Option<FieldValue>,
    #[serde(alias = "homeOwnership", alias = "home_ownership_status")]
    pub home_ownership: Option<FieldValue>,
}

impl ApplicantSubmission {
    pub fn into_profile(self) -> ApplicantProfile {
        ApplicantProfile::from_submission(&self)
    }
}

/// A single loosely-typed input value.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl FieldValue {
    fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(value) => Some(*value),
            FieldValue::Text(raw) => parse_number(raw),
            FieldValue::Other(_) => None,
        }
    }

    fn as_text(&self) -> String {
        match self {
            FieldValue::Number(value) => value.to_string(),
            FieldValue::Text(raw) => raw.clone(),
            FieldValue::Other(_) => String::new(),
        }
    }
}

/// Parse a currency-ish number: surrounding whitespace, a leading `$` and
/// thousands separators are tolerated.
pub fn parse_number(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',' && *c != '_')
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|value| value.is_finite())
}

fn sanitize_amount(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

fn amount_field(name: &str, value: Option<&FieldValue>) -> f64 {
    let parsed = value.and_then(FieldValue::as_number);
    match parsed {
        Some(number) if number.is_finite() && number >= 0.0 => number,
        _ => {
            if value.is_some() {
                trace!(field = name, "unusable numeric value replaced with 0");
            }
            0.0
        }
    }
}

fn age_field(value: Option<&FieldValue>) -> u32 {
    match value.and_then(FieldValue::as_number) {
        Some(years) if years >= 0.0 => years.trunc().min(u32::MAX as f64) as u32,
        _ => {
            if value.is_some() {
                trace!(field = "age", "unusable age replaced with 0");
            }
            0
        }
    }
}

fn text_field(value: Option<&FieldValue>) -> String {
    value.map(FieldValue::as_text).unwrap_or_default()
}

fn normalize_category(raw: &str) -> String {
    raw.trim()
        .to_ascii_lowercase()
        .chars()
        .map(|c| if c == '_' || c == ' ' { '-' } else { c })
        .collect()
}
