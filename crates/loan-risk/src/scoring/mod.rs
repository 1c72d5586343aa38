//! Rule-based loan risk scoring.
//!
//! [`RiskAssessor`] derives ratios and a credit score estimate, runs the seven
//! analyzers, aggregates their impacts into a bounded risk score, and reports
//! normalized feature importances plus a confidence figure. All randomness
//! flows through a [`NoiseSource`] so callers can pin it down.

pub mod aggregate;
pub mod analyzers;
mod assessor;
pub mod confidence;
pub mod importance;
pub mod metrics;
pub mod noise;
mod prediction;
mod profile;

#[cfg(test)]
mod tests;

pub use assessor::{ProcessingClock, RiskAssessor, MODEL_ACCURACY};
pub use metrics::{DerivedMetrics, Ratio};
pub use noise::{NoNoise, NoiseSource, RandomNoise, ScriptedNoise};
pub use prediction::{
    Factor, FeatureImportances, Insight, LoanDecision, PredictionResult, RiskLevel, Sentiment,
};
pub use profile::{
    parse_number, ApplicantProfile, ApplicantProfileBuilder, ApplicantSubmission, EducationLevel,
    EmploymentStatus, FieldValue, HomeOwnership, PROFILE_FIELD_COUNT,
};
