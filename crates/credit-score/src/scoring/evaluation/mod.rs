mod aggregate;
mod config;
mod ladder;
mod pricing;
mod rules;

pub use aggregate::{ScoreAggregator, MAX_SCORE, MIN_SCORE};
pub use config::{
    GradeThresholds, NormalizationPolicy, PolicyError, PricingPolicy, ScoreWeights, ScoringPolicy,
};
pub use ladder::{Comparison, Rung, ThresholdLadder};
pub use pricing::RatePricer;
pub use rules::RiskNormalizer;

use super::domain::{
    CompanyFinancials, FullScoreOutcome, Grade, PricedRate, PricingRequest, RiskAssessment,
};
use tracing::trace;

/// Stateless engine running normalization, aggregation, and pricing against one policy.
///
/// Every method is a pure function of its arguments and the policy captured at construction,
/// so a single instance can be shared across threads.
#[derive(Debug, Clone)]
pub struct CreditScoringEngine {
    normalizer: RiskNormalizer,
    aggregator: ScoreAggregator,
    pricer: RatePricer,
}

impl CreditScoringEngine {
    pub fn new(policy: ScoringPolicy) -> Self {
        let ScoringPolicy {
            normalization,
            weights,
            grades,
            pricing,
        } = policy;

        Self {
            normalizer: RiskNormalizer::new(normalization),
            aggregator: ScoreAggregator::new(weights, grades),
            pricer: RatePricer::new(pricing),
        }
    }

    pub fn standard() -> Self {
        Self::new(ScoringPolicy::standard())
    }

    pub fn calculate_risk_score(&self, financials: &CompanyFinancials) -> RiskAssessment {
        let sub_scores = self.normalizer.normalize(financials);
        let assessment = self
            .aggregator
            .aggregate(sub_scores, financials.external_bureau_score);
        trace!(?sub_scores, score = assessment.score, grade = %assessment.grade, "risk assessed");
        assessment
    }

    pub fn calculate_interest_rate(&self, request: &PricingRequest) -> PricedRate {
        self.pricer.price(request)
    }

    /// Assesses risk, then prices the loan from the score rounded to two decimals.
    pub fn calculate_full_score(
        &self,
        financials: &CompanyFinancials,
        term_months: u32,
        requested_amount: f64,
    ) -> FullScoreOutcome {
        let assessment = self.calculate_risk_score(financials);
        let pricing = PricingRequest {
            final_score: assessment.rounded_score(),
            term_months,
            requested_amount,
        };
        let rate = self.calculate_interest_rate(&pricing);

        FullScoreOutcome {
            assessment,
            pricing,
            rate,
        }
    }

    pub fn grade_for(&self, score: f64) -> Grade {
        self.aggregator.grade_for(score)
    }
}

impl Default for CreditScoringEngine {
    fn default() -> Self {
        Self::standard()
    }
}
