use crate::infra::{build_scoring_service, LocalScoringService};
use clap::Args;
use credit_score::config::AppConfig;
use credit_score::error::AppError;
use credit_score::scoring::{score_csv, BatchOutcome, CompanyFinancials, RiskAssessment};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct AssessArgs {
    /// Years since the company was founded
    #[arg(long)]
    pub(crate) company_age_years: f64,
    /// Owner's personal credit score
    #[arg(long)]
    pub(crate) personal_credit_score: u16,
    #[arg(long)]
    pub(crate) total_debt: f64,
    #[arg(long)]
    pub(crate) annual_revenue: f64,
    #[arg(long)]
    pub(crate) average_daily_balance: f64,
    #[arg(long)]
    pub(crate) average_monthly_revenue: f64,
    /// Days in the period with a negative or critical balance
    #[arg(long)]
    pub(crate) cash_stress_days: u32,
    /// Revenue from the single largest client over the period
    #[arg(long)]
    pub(crate) largest_client_revenue: f64,
    #[arg(long)]
    pub(crate) period_total_revenue: f64,
    /// Score reported by the external bureau (0-1000)
    #[arg(long)]
    pub(crate) external_bureau_score: u16,
    /// Loan term to price; requires --requested-amount
    #[arg(long, requires = "requested_amount")]
    pub(crate) term_months: Option<u32>,
    /// Loan principal to price; requires --term-months
    #[arg(long, requires = "term_months")]
    pub(crate) requested_amount: Option<f64>,
    /// Print JSON instead of a text summary
    #[arg(long)]
    pub(crate) json: bool,
}

impl AssessArgs {
    fn financials(&self) -> CompanyFinancials {
        CompanyFinancials {
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
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct BatchArgs {
    /// CSV file with one company per row and a header naming the indicator columns
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Print JSON instead of a table
    #[arg(long)]
    pub(crate) json: bool,
}

fn local_service() -> Result<Arc<LocalScoringService>, AppError> {
    let config = AppConfig::load()?;
    build_scoring_service(&config.scoring)
}

pub(crate) fn run_assess(args: AssessArgs) -> Result<(), AppError> {
    let service = local_service()?;
    let financials = args.financials();

    match (args.term_months, args.requested_amount) {
        (Some(term_months), Some(requested_amount)) => {
            let outcome = service.full_score(&financials, term_months, requested_amount)?;
            if args.json {
                print_json(&outcome);
                return Ok(());
            }
            render_assessment(&outcome.assessment);
            println!(
                "Annual rate: {:.2}% over {} months for {:.2}",
                outcome.rate.rounded_rate() * 100.0,
                term_months,
                requested_amount
            );
            let breakdown = outcome.rate.breakdown;
            println!(
                "  base {:.4} + risk {:.4} + term {:.4} + amount {:.4}",
                breakdown.base_rate,
                breakdown.risk_premium,
                breakdown.term_premium,
                breakdown.amount_premium
            );
            if outcome.rate.exceeds_unit_rate() {
                println!("  Warning: rate exceeds 100% a year and is not capped");
            }
        }
        _ => {
            let assessment = service.assess(&financials)?;
            if args.json {
                print_json(&assessment);
            } else {
                render_assessment(&assessment);
            }
        }
    }

    Ok(())
}

pub(crate) fn run_batch(args: BatchArgs) -> Result<(), AppError> {
    let service = local_service()?;
    let reader = BufReader::new(File::open(&args.input)?);
    let rows = score_csv(reader, service.engine())?;

    if args.json {
        print_json(&rows);
        return Ok(());
    }

    println!("Batch scoring: {}", args.input.display());
    for row in &rows {
        let company = row.company.as_deref().unwrap_or("-");
        match &row.outcome {
            BatchOutcome::Scored { score, grade } => {
                println!("  line {:>4}  {:<30} {:>8.2}  {}", row.line, company, score, grade);
            }
            BatchOutcome::Rejected { errors } => {
                println!(
                    "  line {:>4}  {:<30} rejected: {}",
                    row.line,
                    company,
                    errors.join("; ")
                );
            }
        }
    }
    let scored = rows
        .iter()
        .filter(|row| matches!(row.outcome, BatchOutcome::Scored { .. }))
        .count();
    println!("{} of {} rows scored", scored, rows.len());

    Ok(())
}

pub(crate) fn run_demo() -> Result<(), AppError> {
    let service = local_service()?;

    println!("Credit scoring demo");
    let reference = reference_financials();
    let outcome = service.full_score(&reference, 12, 100_000.0)?;
    println!("\nReference company (12 months, 100000.00 requested)");
    render_assessment(&outcome.assessment);
    println!("Annual rate: {:.2}%", outcome.rate.rounded_rate() * 100.0);

    println!("\nBureau comparison");
    let demo = service.bureau_demo()?;
    println!(
        "  Internal score: {:.2} ({})",
        demo.internal.score, demo.internal.classification
    );
    println!(
        "  Bureau score: {} (band {}, default probability {:.1}%)",
        demo.bureau.score,
        demo.bureau.band,
        demo.bureau.default_probability * 100.0
    );
    println!(
        "  Difference: {:.2} -> {}",
        demo.comparison.difference, demo.comparison.recommendation
    );

    Ok(())
}

fn reference_financials() -> CompanyFinancials {
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

fn render_assessment(assessment: &RiskAssessment) {
    println!(
        "Score: {:.2} / 1000  Grade: {}",
        assessment.rounded_score(),
        assessment.grade
    );
    let subs = assessment.sub_scores;
    println!("  Sub-scores:");
    for (name, value) in [
        ("age", subs.age),
        ("personal credit", subs.personal_credit),
        ("leverage", subs.leverage),
        ("liquidity", subs.liquidity),
        ("cash stress", subs.cash_stress),
        ("concentration", subs.concentration),
    ] {
        println!("    {:<16} {:>6.0}", name, value);
    }
    if assessment.grade.is_rejected() {
        println!("  Automatically rejected");
    }
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(err) => println!("JSON output unavailable: {}", err),
    }
}
