use super::metrics::Ratio;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Tone of an insight as shown next to its text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    pub fn label(&self) -> &'static str {
        match self {
            Sentiment::Positive => "POSITIVE",
            Sentiment::Neutral => "NEUTRAL",
            Sentiment::Negative => "NEGATIVE",
        }
    }
}

/// Human-readable rationale attached to a prediction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insight {
    pub text: String,
    pub sentiment: Sentiment,
}

impl Insight {
    pub fn new(text: impl Into<String>, sentiment: Sentiment) -> Self {
        Self {
            text: text.into(),
            sentiment,
        }
    }
}

/// The seven scoring factors, declared in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Factor {
    #[serde(rename = "Income Level")]
    Income,
    #[serde(rename = "Debt Ratios")]
    DebtRatios,
    #[serde(rename = "Employment")]
    Employment,
    #[serde(rename = "Credit History")]
    CreditHistory,
    #[serde(rename = "Education")]
    Education,
    #[serde(rename = "Home Status")]
    HomeStatus,
    #[serde(rename = "Age Factor")]
    Age,
}

impl Factor {
    pub const ALL: [Factor; 7] = [
        Factor::Income,
        Factor::DebtRatios,
        Factor::Employment,
        Factor::CreditHistory,
        Factor::Education,
        Factor::HomeStatus,
        Factor::Age,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Factor::Income => "Income Level",
            Factor::DebtRatios => "Debt Ratios",
            Factor::Employment => "Employment",
            Factor::CreditHistory => "Credit History",
            Factor::Education => "Education",
            Factor::HomeStatus => "Home Status",
            Factor::Age => "Age Factor",
        }
    }

    /// Multiplier bringing each factor's largest impact onto a comparable ceiling.
    pub fn importance_scale(&self) -> f64 {
        match self {
            Factor::Income => 4.0,
            Factor::DebtRatios => 3.33,
            Factor::Employment => 5.0,
            Factor::CreditHistory => 6.67,
            Factor::Education => 20.0,
            Factor::HomeStatus => 20.0,
            Factor::Age => 10.0,
        }
    }
}

/// Percentage share of each factor in the final score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureImportances(BTreeMap<Factor, f64>);

impl FeatureImportances {
    pub(crate) fn from_map(shares: BTreeMap<Factor, f64>) -> Self {
        Self(shares)
    }

    pub fn get(&self, factor: Factor) -> f64 {
        self.0.get(&factor).copied().unwrap_or(0.0)
    }

    pub fn total(&self) -> f64 {
        self.0.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Factor, f64)> + '_ {
        self.0.iter().map(|(factor, share)| (*factor, *share))
    }

    /// Largest share first; equal shares keep factor order.
    pub fn ranked(&self) -> Vec<(Factor, f64)> {
        let mut ranked: Vec<_> = self.iter().collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        ranked
    }
}

/// Coarse banding of the risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn from_score(risk_score: u8) -> Self {
        if risk_score <= 35 {
            RiskLevel::Low
        } else if risk_score <= 65 {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW RISK",
            RiskLevel::Medium => "MEDIUM RISK",
            RiskLevel::High => "HIGH RISK",
        }
    }

    pub fn decision(&self) -> LoanDecision {
        match self {
            RiskLevel::Low => LoanDecision::Approved,
            RiskLevel::Medium => LoanDecision::ManualReview,
            RiskLevel::High => LoanDecision::Rejected,
        }
    }
}

/// Recommended handling of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanDecision {
    Approved,
    ManualReview,
    Rejected,
}

impl LoanDecision {
    pub fn summary(&self) -> &'static str {
        match self {
            LoanDecision::Approved => "loan approved",
            LoanDecision::ManualReview => "requires manual review",
            LoanDecision::Rejected => "loan rejected",
        }
    }
}

/// Outcome of one assessment. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionResult {
    pub risk_score: u8,
    pub confidence: u8,
    pub estimated_credit_score: u16,
    pub debt_to_income_ratio: Ratio,
    pub loan_to_income_ratio: Ratio,
    pub insights: Vec<Insight>,
    pub feature_importances: FeatureImportances,
    pub processing_time_seconds: f64,
}

impl PredictionResult {
    pub fn risk_level(&self) -> RiskLevel {
        RiskLevel::from_score(self.risk_score)
    }

    pub fn decision(&self) -> LoanDecision {
        self.risk_level().decision()
    }
}
