use super::domain::{CompanyFinancials, PricingRequest};

/// Boundary validation failure for a single request field.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InputError {
    #[error("{field} must be a finite number (found {value})")]
    NotFinite { field: &'static str, value: f64 },
    #[error("{field} must be non-negative (found {value})")]
    Negative { field: &'static str, value: f64 },
    #[error("term_months must be greater than zero")]
    ZeroTerm,
}

fn check_amount(errors: &mut Vec<InputError>, field: &'static str, value: f64) {
    if !value.is_finite() {
        errors.push(InputError::NotFinite { field, value });
    } else if value < 0.0 {
        errors.push(InputError::Negative { field, value });
    }
}

fn finish(errors: Vec<InputError>) -> Result<(), Vec<InputError>> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

impl CompanyFinancials {
    /// Checks every numeric field and returns all problems at once.
    pub fn validate(&self) -> Result<(), Vec<InputError>> {
        let mut errors = Vec::new();
        check_amount(&mut errors, "company_age_years", self.company_age_years);
        check_amount(&mut errors, "total_debt", self.total_debt);
        check_amount(&mut errors, "annual_revenue", self.annual_revenue);
        check_amount(&mut errors, "average_daily_balance", self.average_daily_balance);
        check_amount(&mut errors, "average_monthly_revenue", self.average_monthly_revenue);
        check_amount(&mut errors, "largest_client_revenue", self.largest_client_revenue);
        check_amount(&mut errors, "period_total_revenue", self.period_total_revenue);
        finish(errors)
    }
}

impl PricingRequest {
    pub fn validate(&self) -> Result<(), Vec<InputError>> {
        let mut errors = Vec::new();
        if !self.final_score.is_finite() {
            errors.push(InputError::NotFinite {
                field: "final_score",
                value: self.final_score,
            });
        }
        if self.term_months == 0 {
            errors.push(InputError::ZeroTerm);
        }
        check_amount(&mut errors, "requested_amount", self.requested_amount);
        finish(errors)
    }
}

/// Joins validation errors into a single message for API and CLI output.
pub fn describe(errors: &[InputError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
