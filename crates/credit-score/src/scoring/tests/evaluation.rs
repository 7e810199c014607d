use super::common::*;

use crate::scoring::domain::{CompanyFinancials, Grade, PricingRequest, RiskSubScores};
use crate::scoring::evaluation::{CreditScoringEngine, ScoringPolicy};

#[test]
fn reference_company_scores_780_grade_b() {
    let assessment = engine().calculate_risk_score(&reference_financials());

    let subs = assessment.sub_scores;
    assert_eq!(subs.age, 600.0);
    assert_eq!(subs.personal_credit, 700.0);
    assert_eq!(subs.leverage, 1000.0);
    assert_eq!(subs.liquidity, 500.0);
    assert_eq!(subs.cash_stress, 700.0);
    assert_eq!(subs.concentration, 900.0);
    assert_close(assessment.score, 780.0);
    assert_eq!(assessment.grade, Grade::B);
}

#[test]
fn reference_loan_prices_at_expected_rate() {
    let rate = engine().calculate_interest_rate(&PricingRequest {
        final_score: 650.5,
        term_months: 12,
        requested_amount: 100_000.0,
    });

    assert_close(rate.breakdown.risk_premium, 0.087_375);
    assert_close(rate.breakdown.term_premium, 0.02);
    assert_close(rate.breakdown.amount_premium, 0.01);
    assert_close(rate.annual_rate, 0.237_375);
}

#[test]
fn full_score_composes_assessment_and_pricing() {
    let engine = engine();
    let financials = reference_financials();

    let outcome = engine.calculate_full_score(&financials, 12, 100_000.0);
    let assessment = engine.calculate_risk_score(&financials);
    let rate = engine.calculate_interest_rate(&PricingRequest {
        final_score: assessment.rounded_score(),
        term_months: 12,
        requested_amount: 100_000.0,
    });

    assert_eq!(outcome.assessment, assessment);
    assert_eq!(outcome.pricing.final_score, assessment.rounded_score());
    assert_eq!(outcome.rate, rate);
    assert_close(outcome.rate.annual_rate, 0.205);
}

#[test]
fn zero_revenue_zeroes_leverage_without_failing() {
    let mut financials = reference_financials();
    financials.annual_revenue = 0.0;

    let assessment = engine().calculate_risk_score(&financials);

    assert_eq!(assessment.sub_scores.leverage, 0.0);
    assert_close(assessment.score, 630.0);
    assert_eq!(assessment.grade, Grade::C);
}

#[test]
fn zero_denominators_only_affect_their_own_ratio() {
    let mut financials = reference_financials();
    financials.average_monthly_revenue = 0.0;
    financials.period_total_revenue = 0.0;

    let subs = engine().calculate_risk_score(&financials).sub_scores;

    assert_eq!(subs.liquidity, 0.0);
    assert_eq!(subs.concentration, 0.0);
    assert_eq!(subs.leverage, 1000.0);
}

#[test]
fn distressed_company_is_rejected_and_priced_high() {
    let engine = engine();
    let outcome = engine.calculate_full_score(&distressed_financials(), 36, 500_000.0);

    assert_eq!(outcome.assessment.grade, Grade::AutomaticallyRejected);
    assert!(outcome.assessment.score >= 0.0);
    assert!(outcome.rate.annual_rate > 0.3);
}

#[test]
fn score_stays_in_range_and_grade_matches() {
    let engine = engine();
    for bureau in [0_u16, 250, 500, 750, 1000, 4000] {
        for stress in [0_u32, 3, 7, 30] {
            let mut financials = reference_financials();
            financials.external_bureau_score = bureau;
            financials.cash_stress_days = stress;

            let assessment = engine.calculate_risk_score(&financials);

            assert!((0.0..=1000.0).contains(&assessment.score));
            assert_eq!(assessment.grade, engine.grade_for(assessment.score));
        }
    }
}

#[test]
fn better_bureau_score_never_lowers_the_final_score() {
    let engine = engine();
    let mut previous = f64::MIN;
    for bureau in (0..=1000).step_by(50) {
        let mut financials = reference_financials();
        financials.external_bureau_score = bureau;
        let score = engine.calculate_risk_score(&financials).score;
        assert!(score >= previous);
        previous = score;
    }
}

#[test]
fn rate_rises_as_score_falls() {
    let engine = engine();
    let rate_for = |score: f64| {
        engine
            .calculate_interest_rate(&PricingRequest {
                final_score: score,
                term_months: 24,
                requested_amount: 200_000.0,
            })
            .annual_rate
    };

    assert!(rate_for(200.0) > rate_for(500.0));
    assert!(rate_for(500.0) > rate_for(900.0));
}

#[test]
fn repeated_calls_are_identical() {
    let engine = engine();
    let financials = reference_financials();

    let first = engine.calculate_full_score(&financials, 18, 150_000.0);
    let second = engine.calculate_full_score(&financials, 18, 150_000.0);

    assert_eq!(first, second);
}

#[test]
fn custom_policy_changes_grading() {
    let mut policy = ScoringPolicy::standard();
    policy.grades.b = 790.0;
    let engine = CreditScoringEngine::new(policy);

    let assessment = engine.calculate_risk_score(&reference_financials());

    assert_eq!(assessment.grade, Grade::C);
}

fn sub_scores_for(edit: impl Fn(&mut CompanyFinancials)) -> RiskSubScores {
    let mut financials = reference_financials();
    edit(&mut financials);
    engine().calculate_risk_score(&financials).sub_scores
}

#[test]
fn ratio_ladders_resolve_exact_bounds() {
    for (debt, expected) in [(500_000.0, 300.0), (300_000.0, 700.0), (150_000.0, 1000.0)] {
        let subs = sub_scores_for(|f| {
            f.total_debt = debt;
            f.annual_revenue = 500_000.0;
        });
        assert_eq!(subs.leverage, expected, "leverage at debt {debt}");
    }

    for (balance, expected) in [(10_000.0, 500.0), (40_000.0, 1000.0)] {
        let subs = sub_scores_for(|f| {
            f.average_daily_balance = balance;
            f.average_monthly_revenue = 100_000.0;
        });
        assert_eq!(subs.liquidity, expected, "liquidity at balance {balance}");
    }

    for (largest, expected) in [(60_000.0, 500.0), (30_000.0, 900.0), (20_000.0, 1000.0)] {
        let subs = sub_scores_for(|f| {
            f.largest_client_revenue = largest;
            f.period_total_revenue = 100_000.0;
        });
        assert_eq!(subs.concentration, expected, "concentration at client {largest}");
    }
}

#[test]
fn indicator_ladders_resolve_exact_bounds() {
    for (credit, expected) in [(400_u16, 500.0), (700, 700.0), (900, 1000.0)] {
        let subs = sub_scores_for(|f| f.personal_credit_score = credit);
        assert_eq!(subs.personal_credit, expected, "personal credit {credit}");
    }

    for (age, expected) in [(2.0, 600.0), (5.0, 1000.0)] {
        let subs = sub_scores_for(|f| f.company_age_years = age);
        assert_eq!(subs.age, expected, "age {age}");
    }

    for (days, expected) in [(0_u32, 1000.0), (5, 700.0), (10, 300.0)] {
        let subs = sub_scores_for(|f| f.cash_stress_days = days);
        assert_eq!(subs.cash_stress, expected, "cash stress {days} days");
    }
}

#[test]
fn lower_debt_never_lowers_the_score() {
    let engine = engine();
    let mut previous = f64::MIN;
    for step in (0..=48).rev() {
        let mut financials = reference_financials();
        financials.total_debt = f64::from(step) * 25_000.0;
        let score = engine.calculate_risk_score(&financials).score;
        assert!(score >= previous, "score fell at debt {}", financials.total_debt);
        previous = score;
    }
}

#[test]
fn fewer_stress_days_never_lower_the_sub_score() {
    let mut previous = f64::MIN;
    for days in (0..=30_u32).rev() {
        let subs = sub_scores_for(|f| f.cash_stress_days = days);
        assert!(subs.cash_stress >= previous, "sub-score fell at {days} days");
        previous = subs.cash_stress;
    }
    assert_eq!(previous, 1000.0);
}
