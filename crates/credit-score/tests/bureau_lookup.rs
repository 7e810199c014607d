//! Bureau provider behavior as seen by callers of the public API.

use credit_score::bureau::{
    BureauError, BureauFixture, BureauScoreProvider, CompanyId, ComparisonVerdict,
    MockBureauProvider, PersonId, ScoreComparison,
};
use credit_score::scoring::service::demo_financials;
use credit_score::scoring::CreditScoringEngine;

#[test]
fn seeded_companies_return_fixed_reports() {
    let provider = MockBureauProvider::seeded();
    let id = CompanyId::parse("98765432000198").expect("valid id");

    let report = provider.company_score(&id).expect("report");

    assert_eq!(report.score, 450);
    assert_eq!(report.band, "D");
    assert_eq!(report.default_probability, 0.35);
}

#[test]
fn unknown_subjects_get_stable_synthetic_scores() {
    let provider = MockBureauProvider::seeded();
    let id = PersonId::parse("11122233344").expect("valid id");

    let first = provider.individual_score(&id).expect("report");
    let second = provider.individual_score(&id).expect("report");

    assert_eq!(first.score, second.score);
    assert_eq!(first.band, second.band);
    assert!((200..=950).contains(&first.score));
}

#[test]
fn identifiers_must_have_the_right_length() {
    assert!(matches!(
        CompanyId::parse("12.345.678/0001-23"),
        Err(BureauError::InvalidIdentifier { expected: 14, .. })
    ));
    assert!(matches!(
        PersonId::parse("1234567890"),
        Err(BureauError::InvalidIdentifier { expected: 11, .. })
    ));
}

#[test]
fn custom_fixtures_override_synthetic_answers() {
    let mut provider = MockBureauProvider::default();
    provider.insert_company("11111111000111", BureauFixture::new(910, "A", 0.03));
    let id = CompanyId::parse("11111111000111").expect("valid id");

    let report = provider.company_score(&id).expect("report");

    assert_eq!(report.score, 910);
    assert_eq!(report.band, "A");
}

#[test]
fn demo_company_agrees_with_bureau() {
    let internal = CreditScoringEngine::standard().calculate_risk_score(&demo_financials());
    let provider = MockBureauProvider::seeded();
    let report = provider
        .company_score(&CompanyId::parse("12345678000123").expect("valid id"))
        .expect("report");

    let comparison = ScoreComparison::between(internal.score, report.score);

    assert_eq!(comparison.verdict, ComparisonVerdict::Similar);
    assert_eq!(comparison.difference, 5.0);
}
