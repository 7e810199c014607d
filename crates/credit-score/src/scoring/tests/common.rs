use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::bureau::{
    BureauError, BureauReport, BureauScoreProvider, CompanyId, MockBureauProvider, PersonId,
};
use crate::scoring::domain::CompanyFinancials;
use crate::scoring::evaluation::CreditScoringEngine;
use crate::scoring::router::scoring_router;
use crate::scoring::service::ScoringService;

/// Reference company: 3.5 years old, leverage 0.2, liquidity ~0.36, two stress days,
/// concentration ~0.267, bureau score 800.
pub(super) fn reference_financials() -> CompanyFinancials {
    CompanyFinancials {
        company_age_years: 3.5,
        personal_credit_score: 750,
        total_debt: 100_000.0,
        annual_revenue: 500_000.0,
        average_daily_balance: 15_000.0,
        average_monthly_revenue: 41_667.0,
        cash_stress_days: 2,
        largest_client_revenue: 80_000.0,
        period_total_revenue: 300_000.0,
        external_bureau_score: 800,
    }
}

/// A company that lands in the worst bucket of every ladder.
pub(super) fn distressed_financials() -> CompanyFinancials {
    CompanyFinancials {
        company_age_years: 0.5,
        personal_credit_score: 300,
        total_debt: 900_000.0,
        annual_revenue: 400_000.0,
        average_daily_balance: 1_000.0,
        average_monthly_revenue: 40_000.0,
        cash_stress_days: 20,
        largest_client_revenue: 250_000.0,
        period_total_revenue: 300_000.0,
        external_bureau_score: 100,
    }
}

pub(super) fn engine() -> CreditScoringEngine {
    CreditScoringEngine::standard()
}

pub(super) fn build_service() -> ScoringService<MockBureauProvider> {
    ScoringService::new(
        Arc::new(engine()),
        Arc::new(MockBureauProvider::seeded()),
    )
}

pub(super) fn router() -> axum::Router {
    scoring_router(Arc::new(build_service()))
}

pub(super) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 16 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) struct OfflineBureau;

impl BureauScoreProvider for OfflineBureau {
    fn company_score(&self, _id: &CompanyId) -> Result<BureauReport, BureauError> {
        Err(BureauError::Unavailable("bureau offline".to_string()))
    }

    fn individual_score(&self, _id: &PersonId) -> Result<BureauReport, BureauError> {
        Err(BureauError::Unavailable("bureau offline".to_string()))
    }
}
