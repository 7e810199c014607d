use std::io::Read;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::domain::{round_to, CompanyFinancials, Grade};
use super::evaluation::CreditScoringEngine;
use super::validation::InputError;

const REQUIRED_COLUMNS: [&str; 10] = [
    "company_age_years",
    "personal_credit_score",
    "total_debt",
    "annual_revenue",
    "average_daily_balance",
    "average_monthly_revenue",
    "cash_stress_days",
    "largest_client_revenue",
    "period_total_revenue",
    "external_bureau_score",
];

#[derive(Debug, Deserialize)]
struct BatchRecord {
    #[serde(default)]
    company: Option<String>,
    company_age_years: f64,
    personal_credit_score: u16,
    total_debt: f64,
    annual_revenue: f64,
    average_daily_balance: f64,
    average_monthly_revenue: f64,
    cash_stress_days: u32,
    largest_client_revenue: f64,
    period_total_revenue: f64,
    external_bureau_score: u16,
}

impl BatchRecord {
    fn split(self) -> (Option<String>, CompanyFinancials) {
        let financials = CompanyFinancials {
            company_age_years: self.company_age_years,
            personal_credit_score: self.personal_credit_score,
            total_debt: self.total_debt,
            annual_revenue: self.annual_revenue,
            average_daily_balance: self.average_daily_balance,
            average_monthly_revenue: self.average_monthly_revenue,
            cash_stress_days: self.cash_stress_days,
            largest_client_revenue: self.largest_client_revenue,
            period_total_revenue: self.period_total_revenue,
            external_bureau_score: self.external_bureau_score,
        };
        (self.company, financials)
    }
}

/// Result for one CSV data row. `line` is the 1-based line in the input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchRow {
    pub line: u64,
    pub company: Option<String>,
    pub outcome: BatchOutcome,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BatchOutcome {
    Scored { score: f64, grade: Grade },
    Rejected { errors: Vec<String> },
}

#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("invalid batch CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("batch CSV is missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<&'static str>),
}

/// Scores every row of a CSV export.
///
/// Rows with unparsable or out-of-domain values are reported as rejected and do not stop the
/// batch; malformed CSV or missing columns do.
pub fn score_csv<R: Read>(
    reader: R,
    engine: &CreditScoringEngine,
) -> Result<Vec<BatchRow>, BatchError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();

    let missing: Vec<&'static str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|column| !headers.iter().any(|header| header == *column))
        .collect();
    if !missing.is_empty() {
        return Err(BatchError::MissingColumns(missing));
    }

    let mut rows = Vec::new();
    for result in csv_reader.records() {
        let record = result?;
        let line = record.position().map(|pos| pos.line()).unwrap_or_default();

        let row = match record.deserialize::<BatchRecord>(Some(&headers)) {
            Ok(parsed) => {
                let (company, financials) = parsed.split();
                let outcome = match financials.validate() {
                    Ok(()) => {
                        let assessment = engine.calculate_risk_score(&financials);
                        BatchOutcome::Scored {
                            score: round_to(assessment.score, 2),
                            grade: assessment.grade,
                        }
                    }
                    Err(errors) => BatchOutcome::Rejected {
                        errors: errors.iter().map(InputError::to_string).collect(),
                    },
                };
                BatchRow {
                    line,
                    company,
                    outcome,
                }
            }
            Err(err) => BatchRow {
                line,
                company: None,
                outcome: BatchOutcome::Rejected {
                    errors: vec![err.to_string()],
                },
            },
        };
        rows.push(row);
    }

    let rejected = rows
        .iter()
        .filter(|row| matches!(row.outcome, BatchOutcome::Rejected { .. }))
        .count();
    info!(rows = rows.len(), rejected, "batch scoring finished");

    Ok(rows)
}
