use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use super::domain::{
    CompanyFinancials, FullScoreOutcome, Grade, PricedRate, PricingRequest, RiskAssessment,
};
use super::evaluation::CreditScoringEngine;
use super::validation::{describe, InputError};
use crate::bureau::{
    BureauError, BureauReport, BureauScoreProvider, CompanyId, PersonId, ScoreComparison,
};

/// Company used by the bureau comparison demo.
pub const DEMO_COMPANY_ID: &str = "12345678000123";

/// Indicators for the demo company.
pub fn demo_financials() -> CompanyFinancials {
    CompanyFinancials {
        company_age_years: 5.0,
        personal_credit_score: 750,
        total_debt: 150_000.0,
        annual_revenue: 800_000.0,
        average_daily_balance: 25_000.0,
        average_monthly_revenue: 66_667.0,
        cash_stress_days: 3,
        largest_client_revenue: 120_000.0,
        period_total_revenue: 600_000.0,
        external_bureau_score: 700,
    }
}

/// Boundary facade: validates requests, runs the engine, and consults the bureau.
pub struct ScoringService<B> {
    engine: Arc<CreditScoringEngine>,
    bureau: Arc<B>,
}

impl<B> ScoringService<B>
where
    B: BureauScoreProvider + 'static,
{
    pub fn new(engine: Arc<CreditScoringEngine>, bureau: Arc<B>) -> Self {
        Self { engine, bureau }
    }

    pub fn engine(&self) -> &CreditScoringEngine {
        &self.engine
    }

    pub fn assess(
        &self,
        financials: &CompanyFinancials,
    ) -> Result<RiskAssessment, ScoringServiceError> {
        financials.validate().map_err(ScoringServiceError::InvalidInput)?;
        let assessment = self.engine.calculate_risk_score(financials);
        debug!(score = assessment.score, grade = %assessment.grade, "risk score calculated");
        Ok(assessment)
    }

    pub fn price(&self, request: &PricingRequest) -> Result<PricedRate, ScoringServiceError> {
        request.validate().map_err(ScoringServiceError::InvalidInput)?;
        let rate = self.engine.calculate_interest_rate(request);
        flag_unbounded_rate(request, &rate);
        Ok(rate)
    }

    pub fn full_score(
        &self,
        financials: &CompanyFinancials,
        term_months: u32,
        requested_amount: f64,
    ) -> Result<FullScoreOutcome, ScoringServiceError> {
        let mut errors = financials.validate().err().unwrap_or_default();
        let pricing_probe = PricingRequest {
            final_score: 0.0,
            term_months,
            requested_amount,
        };
        errors.extend(pricing_probe.validate().err().unwrap_or_default());
        if !errors.is_empty() {
            return Err(ScoringServiceError::InvalidInput(errors));
        }

        let outcome = self
            .engine
            .calculate_full_score(financials, term_months, requested_amount);
        flag_unbounded_rate(&outcome.pricing, &outcome.rate);
        Ok(outcome)
    }

    pub fn company_report(&self, raw_id: &str) -> Result<BureauReport, ScoringServiceError> {
        let id = CompanyId::parse(raw_id)?;
        Ok(self.bureau.company_score(&id)?)
    }

    pub fn individual_report(&self, raw_id: &str) -> Result<BureauReport, ScoringServiceError> {
        let id = PersonId::parse(raw_id)?;
        Ok(self.bureau.individual_score(&id)?)
    }

    /// Scores the demo company internally and compares it with the bureau's answer.
    pub fn bureau_demo(&self) -> Result<BureauDemo, ScoringServiceError> {
        let assessment = self.engine.calculate_risk_score(&demo_financials());
        let report = self.company_report(DEMO_COMPANY_ID)?;
        let comparison = ScoreComparison::between(assessment.score, report.score);

        Ok(BureauDemo {
            internal: InternalScoreView {
                score: assessment.rounded_score(),
                classification: assessment.grade,
            },
            comparison,
            bureau: report,
        })
    }
}

fn flag_unbounded_rate(request: &PricingRequest, rate: &PricedRate) {
    if rate.exceeds_unit_rate() {
        warn!(
            final_score = request.final_score,
            term_months = request.term_months,
            requested_amount = request.requested_amount,
            annual_rate = rate.annual_rate,
            "priced rate exceeds 100% a year; no ceiling is applied"
        );
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct InternalScoreView {
    pub score: f64,
    pub classification: Grade,
}

/// Payload of the bureau comparison demo.
#[derive(Debug, Clone, Serialize)]
pub struct BureauDemo {
    pub internal: InternalScoreView,
    pub bureau: BureauReport,
    pub comparison: ScoreComparison,
}

#[derive(Debug, thiserror::Error)]
pub enum ScoringServiceError {
    #[error("invalid input: {}", describe(.0))]
    InvalidInput(Vec<InputError>),
    #[error(transparent)]
    Bureau(#[from] BureauError),
}
