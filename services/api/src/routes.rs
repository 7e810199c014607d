use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Extension;
use axum::Json;
use credit_score::bureau::BureauScoreProvider;
use credit_score::scoring::{scoring_router, ScoringService};
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_operational_routes<B>(service: Arc<ScoringService<B>>) -> axum::Router
where
    B: BureauScoreProvider + 'static,
{
    scoring_router(service)
        .route("/", get(service_info))
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn service_info() -> Json<serde_json::Value> {
    Json(json!({
        "service": "SME credit scoring",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": [
            "POST /calculate-risk-score",
            "POST /calculate-interest-rate",
            "POST /calculate-full-score",
            "POST /bureau/company/score",
            "POST /bureau/individual/score",
            "GET /bureau/demo",
        ],
    }))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "healthy" }))
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
