use super::aggregate::aggregate_risk;
use super::analyzers::{analyze_all, FactorImpact};
use super::confidence::estimate_confidence;
use super::importance::normalize_importances;
use super::metrics::DerivedMetrics;
use super::noise::{NoiseSource, RandomNoise};
use super::prediction::{Factor, Insight, PredictionResult};
use super::profile::ApplicantProfile;
use std::time::{Duration, Instant};
use tracing::debug;

/// Advertised accuracy of the rule set, reported alongside predictions.
pub const MODEL_ACCURACY: f64 = 0.947;

/// How the assessor fills in `processing_time_seconds`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ProcessingClock {
    /// Wall-clock time spent inside the assessment.
    #[default]
    Measured,
    /// A fixed duration, for replays and reproducible output.
    Fixed(Duration),
}

/// Analyzer results folded in evaluation order.
#[derive(Debug, Clone, Default, PartialEq)]
struct Assessment {
    total_impact: f64,
    insights: Vec<Insight>,
    raw_importances: Vec<(Factor, f64)>,
}

impl Assessment {
    fn absorb(mut self, factor: FactorImpact) -> Self {
        self.total_impact += factor.impact;
        self.raw_importances.push((factor.factor, factor.raw_importance()));
        self.insights.extend(factor.insights);
        self
    }
}

/// Stateless pipeline turning an applicant profile into a prediction.
#[derive(Debug, Clone, Default)]
pub struct RiskAssessor {
    clock: ProcessingClock,
}

impl RiskAssessor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_clock(clock: ProcessingClock) -> Self {
        Self { clock }
    }

    /// Assess with fresh noise: seeded when `seed` is set, entropy otherwise.
    pub fn assess_with_seed(&self, profile: &ApplicantProfile, seed: Option<u64>) -> PredictionResult {
        let mut noise = RandomNoise::from_seed_option(seed);
        self.assess(profile, &mut noise)
    }

    /// Run the full pipeline.
    ///
    /// Noise is drawn in a fixed order: credit score, risk score, confidence.
    pub fn assess(&self, profile: &ApplicantProfile, noise: &mut impl NoiseSource) -> PredictionResult {
        let started = Instant::now();

        let metrics = DerivedMetrics::compute(profile, noise);
        let assessment = analyze_all(profile, &metrics)
            .into_iter()
            .fold(Assessment::default(), Assessment::absorb);

        let risk_score = aggregate_risk([assessment.total_impact], noise);
        let feature_importances = normalize_importances(assessment.raw_importances);
        let confidence = estimate_confidence(risk_score, profile.data_completeness(), noise);

        let processing_time = match self.clock {
            ProcessingClock::Measured => started.elapsed(),
            ProcessingClock::Fixed(duration) => duration,
        };

        let result = PredictionResult {
            risk_score: risk_score.round() as u8,
            confidence,
            estimated_credit_score: metrics.estimated_credit_score.round() as u16,
            debt_to_income_ratio: metrics.debt_to_income,
            loan_to_income_ratio: metrics.loan_to_income,
            insights: assessment.insights,
            feature_importances,
            processing_time_seconds: processing_time.as_secs_f64(),
        };

        debug!(
            risk_score = result.risk_score,
            confidence = result.confidence,
            estimated_credit_score = result.estimated_credit_score,
            total_impact = assessment.total_impact,
            "loan risk assessed"
        );

        result
    }
}
