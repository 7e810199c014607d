//! Credit scoring for small and medium businesses.
//!
//! Raw financial indicators are bucketed into sub-scores, combined into a 0-1000 score with a
//! letter grade, and priced into an annual interest rate. The service facade validates
//! requests and owns the bureau collaborator; the router exposes it over HTTP.

pub mod batch;
pub mod domain;
pub mod evaluation;
pub mod router;
pub mod service;
pub mod validation;

#[cfg(test)]
mod tests;

pub use batch::{score_csv, BatchError, BatchOutcome, BatchRow};
pub use domain::{
    CompanyFinancials, FullScoreOutcome, Grade, PricedRate, PricingRequest, RateBreakdown,
    RiskAssessment, RiskSubScores,
};
pub use evaluation::{CreditScoringEngine, PolicyError, ScoringPolicy};
pub use router::{
    scoring_router, FullScoreRequest, FullScoreResponse, InterestRateResponse, RiskScoreResponse,
};
pub use service::{BureauDemo, ScoringService, ScoringServiceError};
pub use validation::InputError;
