use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::{CompanyFinancials, Grade, PricingRequest};
use super::service::{ScoringService, ScoringServiceError};
use crate::bureau::{BureauError, BureauScoreProvider};

/// Body of `POST /calculate-full-score`: company indicators plus loan parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullScoreRequest {
    #[serde(flatten)]
    pub financials: CompanyFinancials,
    pub term_months: u32,
    pub requested_amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskScoreResponse {
    pub score: f64,
    pub classification: Grade,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterestRateResponse {
    pub annual_interest_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FullScoreResponse {
    pub score: f64,
    pub classification: Grade,
    pub annual_interest_rate: f64,
}

#[derive(Debug, Deserialize)]
pub struct CompanyLookup {
    pub company_id: String,
}

#[derive(Debug, Deserialize)]
pub struct PersonLookup {
    pub person_id: String,
}

/// Router builder exposing scoring, pricing, and bureau endpoints.
pub fn scoring_router<B>(service: Arc<ScoringService<B>>) -> Router
where
    B: BureauScoreProvider + 'static,
{
    Router::new()
        .route("/calculate-risk-score", post(risk_score_handler::<B>))
        .route("/calculate-interest-rate", post(interest_rate_handler::<B>))
        .route("/calculate-full-score", post(full_score_handler::<B>))
        .route("/bureau/company/score", post(company_bureau_handler::<B>))
        .route("/bureau/individual/score", post(individual_bureau_handler::<B>))
        .route("/bureau/demo", get(bureau_demo_handler::<B>))
        .with_state(service)
}

pub(crate) async fn risk_score_handler<B>(
    State(service): State<Arc<ScoringService<B>>>,
    payload: Result<Json<CompanyFinancials>, JsonRejection>,
) -> Response
where
    B: BureauScoreProvider + 'static,
{
    let Json(financials) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return malformed_body(rejection),
    };

    match service.assess(&financials) {
        Ok(assessment) => {
            let body = RiskScoreResponse {
                score: assessment.rounded_score(),
                classification: assessment.grade,
            };
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(error) => service_error(error),
    }
}

pub(crate) async fn interest_rate_handler<B>(
    State(service): State<Arc<ScoringService<B>>>,
    payload: Result<Json<PricingRequest>, JsonRejection>,
) -> Response
where
    B: BureauScoreProvider + 'static,
{
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return malformed_body(rejection),
    };

    match service.price(&request) {
        Ok(rate) => {
            let body = InterestRateResponse {
                annual_interest_rate: rate.rounded_rate(),
            };
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(error) => service_error(error),
    }
}

pub(crate) async fn full_score_handler<B>(
    State(service): State<Arc<ScoringService<B>>>,
    payload: Result<Json<FullScoreRequest>, JsonRejection>,
) -> Response
where
    B: BureauScoreProvider + 'static,
{
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return malformed_body(rejection),
    };

    match service.full_score(
        &request.financials,
        request.term_months,
        request.requested_amount,
    ) {
        Ok(outcome) => {
            let body = FullScoreResponse {
                score: outcome.assessment.rounded_score(),
                classification: outcome.assessment.grade,
                annual_interest_rate: outcome.rate.rounded_rate(),
            };
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(error) => service_error(error),
    }
}

pub(crate) async fn company_bureau_handler<B>(
    State(service): State<Arc<ScoringService<B>>>,
    lookup: Result<Query<CompanyLookup>, QueryRejection>,
) -> Response
where
    B: BureauScoreProvider + 'static,
{
    let Query(lookup) = match lookup {
        Ok(lookup) => lookup,
        Err(rejection) => return bad_query(rejection),
    };

    match service.company_report(&lookup.company_id) {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(error) => service_error(error),
    }
}

pub(crate) async fn individual_bureau_handler<B>(
    State(service): State<Arc<ScoringService<B>>>,
    lookup: Result<Query<PersonLookup>, QueryRejection>,
) -> Response
where
    B: BureauScoreProvider + 'static,
{
    let Query(lookup) = match lookup {
        Ok(lookup) => lookup,
        Err(rejection) => return bad_query(rejection),
    };

    match service.individual_report(&lookup.person_id) {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(error) => service_error(error),
    }
}

pub(crate) async fn bureau_demo_handler<B>(
    State(service): State<Arc<ScoringService<B>>>,
) -> Response
where
    B: BureauScoreProvider + 'static,
{
    match service.bureau_demo() {
        Ok(demo) => (StatusCode::OK, Json(demo)).into_response(),
        Err(error) => service_error(error),
    }
}

fn malformed_body(rejection: JsonRejection) -> Response {
    let payload = json!({
        "error": rejection.body_text(),
    });
    (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
}

fn bad_query(rejection: QueryRejection) -> Response {
    let payload = json!({
        "error": rejection.body_text(),
    });
    (StatusCode::BAD_REQUEST, Json(payload)).into_response()
}

fn service_error(error: ScoringServiceError) -> Response {
    let status = match &error {
        ScoringServiceError::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ScoringServiceError::Bureau(BureauError::InvalidIdentifier { .. }) => {
            StatusCode::BAD_REQUEST
        }
        ScoringServiceError::Bureau(BureauError::Unavailable(_)) => StatusCode::BAD_GATEWAY,
    };
    let payload = json!({
        "error": error.to_string(),
    });
    (status, Json(payload)).into_response()
}
