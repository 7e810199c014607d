use super::super::domain::{PricedRate, PricingRequest, RateBreakdown};
use super::config::PricingPolicy;

/// Prices an annual rate as a base rate plus risk, term, and amount premia.
///
/// The result is not clamped. Callers that need a commercial band must apply it themselves;
/// `PricedRate::exceeds_unit_rate` flags the pathological cases.
#[derive(Debug, Clone)]
pub struct RatePricer {
    policy: PricingPolicy,
}

impl RatePricer {
    pub fn new(policy: PricingPolicy) -> Self {
        Self { policy }
    }

    pub fn price(&self, request: &PricingRequest) -> PricedRate {
        let policy = &self.policy;

        let risk_premium = ((policy.score_ceiling - request.final_score) / policy.score_ceiling)
            * policy.risk_premium_span;
        let term_premium = policy.term_premium.lookup(f64::from(request.term_months));
        let amount_premium = policy.amount_premium.lookup(request.requested_amount);

        PricedRate {
            annual_rate: policy.base_rate + (risk_premium + term_premium + amount_premium),
            breakdown: RateBreakdown {
                base_rate: policy.base_rate,
                risk_premium,
                term_premium,
                amount_premium,
            },
        }
    }
}
