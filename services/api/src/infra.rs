use chrono::{DateTime, Utc};
use loan_risk::scoring::{
    ApplicantProfile, LoanDecision, PredictionResult, RiskAssessor, RiskLevel,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) scoring: ScoringService,
}

/// Shared assessor plus the configured seed, if any.
#[derive(Debug, Clone, Default)]
pub(crate) struct ScoringService {
    assessor: RiskAssessor,
    seed: Option<u64>,
}

impl ScoringService {
    pub(crate) fn new(assessor: RiskAssessor, seed: Option<u64>) -> Self {
        Self { assessor, seed }
    }

    pub(crate) fn is_seeded(&self) -> bool {
        self.seed.is_some()
    }

    pub(crate) fn assess(&self, profile: &ApplicantProfile) -> AssessmentEnvelope {
        let prediction = self.assessor.assess_with_seed(profile, self.seed);
        AssessmentEnvelope::new(prediction)
    }
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct AssessmentEnvelope {
    pub(crate) assessed_at: DateTime<Utc>,
    pub(crate) risk_level: RiskLevel,
    pub(crate) decision: LoanDecision,
    pub(crate) prediction: PredictionResult,
}

impl AssessmentEnvelope {
    pub(crate) fn new(prediction: PredictionResult) -> Self {
        Self {
            assessed_at: Utc::now(),
            risk_level: prediction.risk_level(),
            decision: prediction.decision(),
            prediction,
        }
    }
}

pub(crate) fn parse_seed(raw: &str) -> Result<u64, String> {
    raw.trim()
        .parse::<u64>()
        .map_err(|err| format!("failed to parse '{raw}' as an unsigned seed ({err})"))
}
