use crate::infra::{parse_json, AppState};
use aihe::assessment::{
    AssessmentInput, CalculationResult, DimensionAssessmentInput, DimensionScore, Recommendation,
    RecommendationEngine, RecommendationSummary,
};
use aihe::error::AppError;
use axum::body::Bytes;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Calculation result stamped with the time it was produced.
#[derive(Debug, Serialize)]
pub(crate) struct AssessmentResponse {
    pub(crate) calculated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub(crate) result: CalculationResult,
}

impl AssessmentResponse {
    fn now(result: CalculationResult) -> Self {
        Self {
            calculated_at: Utc::now(),
            result,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RecommendationRequest {
    pub(crate) dimension_scores: Vec<DimensionScore>,
}

#[derive(Debug, Serialize)]
pub(crate) struct RecommendationResponse {
    pub(crate) calculated_at: DateTime<Utc>,
    pub(crate) recommendations: Vec<Recommendation>,
    pub(crate) summary: RecommendationSummary,
}

pub(crate) fn assessment_routes() -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/assessments/calculate", post(calculate_endpoint))
        .route("/api/v1/assessments/preview", post(preview_endpoint))
        .route(
            "/api/v1/assessments/recommendations",
            post(recommendations_endpoint),
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

pub(crate) async fn calculate_endpoint(
    Extension(state): Extension<AppState>,
    body: Bytes,
) -> Result<Json<AssessmentResponse>, AppError> {
    let input: AssessmentInput = parse_json(&body)?;
    let result = state.orchestrator.calculate(&input)?;
    Ok(Json(AssessmentResponse::now(result)))
}

pub(crate) async fn preview_endpoint(
    Extension(state): Extension<AppState>,
    body: Bytes,
) -> Result<Json<AssessmentResponse>, AppError> {
    let input: DimensionAssessmentInput = parse_json(&body)?;
    Ok(Json(AssessmentResponse::now(
        state.orchestrator.preview(&input),
    )))
}

pub(crate) async fn recommendations_endpoint(
    body: Bytes,
) -> Result<Json<RecommendationResponse>, AppError> {
    let RecommendationRequest { dimension_scores } = parse_json(&body)?;
    let recommendations = RecommendationEngine::generate(&dimension_scores);
    let summary = RecommendationEngine::summarize(&recommendations);
    Ok(Json(RecommendationResponse {
        calculated_at: Utc::now(),
        recommendations,
        summary,
    }))
}
