use crate::infra::{AppState, AssessmentEnvelope};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use loan_risk::error::AppError;
use loan_risk::intake::ApplicantCsvImporter;
use loan_risk::scoring::aggregate::{RISK_SCORE_MAX, RISK_SCORE_MIN};
use loan_risk::scoring::confidence::{CONFIDENCE_MAX, CONFIDENCE_MIN};
use loan_risk::scoring::{ApplicantSubmission, Factor, MODEL_ACCURACY};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::io::Cursor;
use tracing::info;

#[derive(Debug, Deserialize)]
pub(crate) struct BatchAssessmentRequest {
    pub(crate) applicants_csv: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct BatchAssessment {
    pub(crate) row: usize,
    #[serde(flatten)]
    pub(crate) assessment: AssessmentEnvelope,
}

#[derive(Debug, Serialize)]
pub(crate) struct ModelDescription {
    pub(crate) model: &'static str,
    pub(crate) accuracy: f64,
    pub(crate) factors: Vec<&'static str>,
    pub(crate) risk_score_range: [f64; 2],
    pub(crate) confidence_range: [f64; 2],
    pub(crate) seeded: bool,
}

pub(crate) fn loan_risk_routes() -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/model", get(model_endpoint))
        .route("/api/v1/loan/assessments", post(assessment_endpoint))
        .route(
            "/api/v1/loan/assessments/batch",
            post(batch_assessment_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn model_endpoint(
    Extension(state): Extension<AppState>,
) -> Json<ModelDescription> {
    Json(ModelDescription {
        model: "rule-based loan risk",
        accuracy: MODEL_ACCURACY,
        factors: Factor::ALL.iter().map(Factor::label).collect(),
        risk_score_range: [RISK_SCORE_MIN, RISK_SCORE_MAX],
        confidence_range: [CONFIDENCE_MIN, CONFIDENCE_MAX],
        seeded: state.scoring.is_seeded(),
    })
}

pub(crate) async fn assessment_endpoint(
    Extension(state): Extension<AppState>,
    Json(submission): Json<ApplicantSubmission>,
) -> Json<AssessmentEnvelope> {
    let profile = submission.into_profile();
    let assessment = state.scoring.assess(&profile);
    info!(
        risk_score = assessment.prediction.risk_score,
        decision = ?assessment.decision,
        "applicant assessed"
    );
    Json(assessment)
}

pub(crate) async fn batch_assessment_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<BatchAssessmentRequest>,
) -> Result<Json<Vec<BatchAssessment>>, AppError> {
    let reader = Cursor::new(payload.applicants_csv.into_bytes());
    let rows = ApplicantCsvImporter::from_reader(reader)?;

    let assessments: Vec<BatchAssessment> = rows
        .into_iter()
        .map(|row| BatchAssessment {
            row: row.row,
            assessment: state.scoring.assess(&row.profile),
        })
        .collect();

    info!(rows = assessments.len(), "applicant batch assessed");
    Ok(Json(assessments))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::ScoringService;
    use axum::body::Body;
    use axum::http::Request;
    use axum::response::Response;
    use loan_risk::scoring::{ProcessingClock, RiskAssessor};
    use metrics_exporter_prometheus::PrometheusBuilder;
    use serde_json::Value;
    use std::sync::atomic::AtomicBool;
    use std::sync::Arc;
    use std::time::Duration;
    use tower::ServiceExt;

    fn test_state(ready: bool, seed: Option<u64>) -> AppState {
        let assessor = RiskAssessor::with_clock(ProcessingClock::Fixed(Duration::from_millis(1500)));
        AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
            scoring: ScoringService::new(assessor, seed),
        }
    }

    fn test_router(state: AppState) -> Router {
        loan_risk_routes().layer(Extension(state))
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&body).expect("encode body")))
            .expect("request builds")
    }

    async fn read_json_body(response: Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .expect("read body");
        serde_json::from_slice(&body).expect("json payload")
    }

    #[tokio::test]
    async fn readiness_reflects_flag() {
        let response = test_router(test_state(false, None))
            .oneshot(Request::get("/ready").body(Body::empty()).expect("request"))
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let response = test_router(test_state(true, None))
            .oneshot(Request::get("/ready").body(Body::empty()).expect("request"))
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(read_json_body(response).await["status"], "ready");
    }

    #[tokio::test]
    async fn model_endpoint_lists_factors() {
        let response = test_router(test_state(true, Some(7)))
            .oneshot(Request::get("/api/v1/model").body(Body::empty()).expect("request"))
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        let payload = read_json_body(response).await;
        assert_eq!(payload["accuracy"], 0.947);
        assert_eq!(payload["factors"].as_array().map(Vec::len), Some(7));
        assert_eq!(payload["factors"][0], "Income Level");
        assert_eq!(payload["seeded"], true);
    }

    #[tokio::test]
    async fn assessment_route_returns_envelope() {
        let body = json!({
            "income": "90000",
            "loanAmount": 20000,
            "age": 40,
            "employment": "full-time",
            "creditHistory": 12,
            "existingDebt": 500,
            "education": "bachelor",
            "homeOwnership": "mortgage"
        });

        let response = test_router(test_state(true, Some(11)))
            .oneshot(post_json("/api/v1/loan/assessments", body))
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        let payload = read_json_body(response).await;
        assert!(payload["assessed_at"].is_string());
        assert_eq!(payload["risk_level"], "low");
        assert_eq!(payload["decision"], "approved");
        assert_eq!(payload["prediction"]["risk_score"], 5);
        assert_eq!(payload["prediction"]["insights"].as_array().map(Vec::len), Some(7));
    }

    #[tokio::test]
    async fn seeded_service_repeats_predictions() {
        let state = test_state(true, Some(42));
        let body = json!({ "income": 52000, "loan_amount": 30000, "age": 29, "employment": "part-time" });

        let first = read_json_body(
            test_router(state.clone())
                .oneshot(post_json("/api/v1/loan/assessments", body.clone()))
                .await
                .expect("route executes"),
        )
        .await;
        let second = read_json_body(
            test_router(state)
                .oneshot(post_json("/api/v1/loan/assessments", body))
                .await
                .expect("route executes"),
        )
        .await;

        assert_eq!(first["prediction"], second["prediction"]);
    }

    #[tokio::test]
    async fn batch_route_scores_each_row() {
        let body = json!({
            "applicants_csv": "income,loanAmount,age,employment\n90000,20000,40,full-time\n0,10000,19,\n"
        });

        let response = test_router(test_state(true, None))
            .oneshot(post_json("/api/v1/loan/assessments/batch", body))
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        let payload = read_json_body(response).await;
        let rows = payload.as_array().expect("array of assessments");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["row"], 1);
        assert!(rows[1]["prediction"]["loan_to_income_ratio"].is_null());
    }

    #[tokio::test]
    async fn batch_route_rejects_empty_export() {
        let body = json!({ "applicants_csv": "income,age\n" });

        let response = test_router(test_state(true, None))
            .oneshot(post_json("/api/v1/loan/assessments/batch", body))
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let payload = read_json_body(response).await;
        assert!(payload["error"]
            .as_str()
            .is_some_and(|message| message.contains("no rows")));
    }
}
