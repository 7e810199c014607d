use super::super::domain::{CompanyFinancials, RiskSubScores};
use super::config::NormalizationPolicy;
use super::ladder::ThresholdLadder;

/// Converts raw indicators into sub-scores. Each rule reads one input and no other rule's output.
#[derive(Debug, Clone)]
pub struct RiskNormalizer {
    policy: NormalizationPolicy,
}

impl RiskNormalizer {
    pub fn new(policy: NormalizationPolicy) -> Self {
        Self { policy }
    }

    pub fn normalize(&self, financials: &CompanyFinancials) -> RiskSubScores {
        let policy = &self.policy;

        RiskSubScores {
            age: policy.age.lookup(financials.company_age_years),
            personal_credit: policy
                .personal_credit
                .lookup(f64::from(financials.personal_credit_score)),
            leverage: ratio_score(
                &policy.leverage,
                financials.total_debt,
                financials.annual_revenue,
            ),
            liquidity: ratio_score(
                &policy.liquidity,
                financials.average_daily_balance,
                financials.average_monthly_revenue,
            ),
            cash_stress: policy
                .cash_stress
                .lookup(f64::from(financials.cash_stress_days)),
            concentration: ratio_score(
                &policy.concentration,
                financials.largest_client_revenue,
                financials.period_total_revenue,
            ),
        }
    }
}

/// Undefined ratios (denominator zero, negative, or NaN) score 0 instead of failing.
fn ratio_score(ladder: &ThresholdLadder, numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        ladder.lookup(numerator / denominator)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::super::config::ScoringPolicy;
    use super::*;

    #[test]
    fn undefined_ratio_scores_zero() {
        let ladder = ScoringPolicy::standard().normalization.leverage;
        assert_eq!(ratio_score(&ladder, 10.0, 0.0), 0.0);
        assert_eq!(ratio_score(&ladder, 10.0, -5.0), 0.0);
        assert_eq!(ratio_score(&ladder, 10.0, f64::NAN), 0.0);
        assert_eq!(ratio_score(&ladder, 0.0, 10.0), 1000.0);
    }
}
