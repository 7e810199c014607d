use serde::{Deserialize, Serialize};

/// Financial indicators reported for one company, plus the bureau score fetched for it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompanyFinancials {
    pub company_age_years: f64,
    pub personal_credit_score: u16,
    pub total_debt: f64,
    pub annual_revenue: f64,
    pub average_daily_balance: f64,
    pub average_monthly_revenue: f64,
    pub cash_stress_days: u32,
    pub largest_client_revenue: f64,
    pub period_total_revenue: f64,
    pub external_bureau_score: u16,
}

/// Bucketed risk measurements, each on the 0-1000 scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskSubScores {
    pub age: f64,
    pub personal_credit: f64,
    pub leverage: f64,
    pub liquidity: f64,
    pub cash_stress: f64,
    pub concentration: f64,
}

/// Letter classification derived from the final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    AutomaticallyRejected,
}

impl Grade {
    pub const fn label(self) -> &'static str {
        match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::AutomaticallyRejected => "AutomaticallyRejected",
        }
    }

    pub const fn is_rejected(self) -> bool {
        matches!(self, Grade::AutomaticallyRejected)
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Aggregated score with the sub-scores it was built from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub sub_scores: RiskSubScores,
    /// Weighted sum clamped to the score range. Not rounded.
    pub score: f64,
    pub grade: Grade,
}

impl RiskAssessment {
    /// Score at the two-decimal precision reported to callers and fed into pricing.
    pub fn rounded_score(&self) -> f64 {
        round_to(self.score, 2)
    }
}

/// Loan parameters priced against a final score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingRequest {
    pub final_score: f64,
    pub term_months: u32,
    pub requested_amount: f64,
}

/// Additive components of an annual rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateBreakdown {
    pub base_rate: f64,
    pub risk_premium: f64,
    pub term_premium: f64,
    pub amount_premium: f64,
}

/// Annual rate as a decimal fraction (0.14 = 14%).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricedRate {
    pub annual_rate: f64,
    pub breakdown: RateBreakdown,
}

impl PricedRate {
    pub fn rounded_rate(&self) -> f64 {
        round_to(self.annual_rate, 4)
    }

    /// True when the unclamped rate is above 100% a year. Pricing never caps this.
    pub fn exceeds_unit_rate(&self) -> bool {
        self.annual_rate > 1.0
    }
}

/// Risk assessment and the rate priced from its rounded score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FullScoreOutcome {
    pub assessment: RiskAssessment,
    pub pricing: PricingRequest,
    pub rate: PricedRate,
}

/// Rounds through the decimal expansion of `value`, so a value stored just below a half-way
/// point rounds down instead of being pushed over it by the scaling multiply.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let precision = decimals as usize;
    format!("{value:.precision$}").parse().unwrap_or(value)
}
