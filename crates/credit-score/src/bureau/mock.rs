use std::collections::BTreeMap;

use chrono::Utc;
use serde_json::json;
use tracing::debug;

use super::provider::{
    BureauError, BureauReport, BureauScoreProvider, CompanyId, PersonId, SubjectKind,
};
use crate::scoring::domain::round_to;

/// Canned bureau answer for a known subject.
#[derive(Debug, Clone, PartialEq)]
pub struct BureauFixture {
    pub score: u16,
    pub band: String,
    pub default_probability: f64,
    pub details: serde_json::Value,
}

impl BureauFixture {
    pub fn new(score: u16, band: &str, default_probability: f64) -> Self {
        Self {
            score,
            band: band.to_string(),
            default_probability,
            details: serde_json::Value::Null,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = details;
        self
    }
}

/// In-process stand-in for a credit bureau.
///
/// Known subjects answer from fixtures. Unknown subjects get a synthetic report derived from
/// their identifier digits, so the same identifier always yields the same score.
#[derive(Debug, Clone, Default)]
pub struct MockBureauProvider {
    companies: BTreeMap<CompanyId, BureauFixture>,
    people: BTreeMap<PersonId, BureauFixture>,
}

const COMPANY_SCORE_RANGE: (u16, u16) = (300, 900);
const PERSON_SCORE_RANGE: (u16, u16) = (200, 950);

impl MockBureauProvider {
    /// Provider preloaded with the demo subjects.
    pub fn seeded() -> Self {
        let mut provider = Self::default();
        provider.insert_company(
            "12345678000123",
            BureauFixture::new(750, "B", 0.15).with_details(json!({
                "sector": "retail",
                "size": "medium",
                "years_active": 8
            })),
        );
        provider.insert_company(
            "98765432000198",
            BureauFixture::new(450, "D", 0.35).with_details(json!({
                "sector": "services",
                "size": "small",
                "years_active": 3
            })),
        );
        provider.insert_person(
            "12345678901",
            BureauFixture::new(820, "A", 0.08).with_details(json!({
                "age": 35,
                "monthly_income": 8500
            })),
        );
        provider.insert_person(
            "98765432109",
            BureauFixture::new(380, "D", 0.42).with_details(json!({
                "age": 25,
                "monthly_income": 2200
            })),
        );
        provider
    }

    /// Registers a company fixture. Malformed identifiers are ignored.
    pub fn insert_company(&mut self, id: &str, fixture: BureauFixture) -> &mut Self {
        if let Ok(id) = CompanyId::parse(id) {
            self.companies.insert(id, fixture);
        }
        self
    }

    pub fn insert_person(&mut self, id: &str, fixture: BureauFixture) -> &mut Self {
        if let Ok(id) = PersonId::parse(id) {
            self.people.insert(id, fixture);
        }
        self
    }

    fn report(
        kind: SubjectKind,
        subject: &str,
        fixture: BureauFixture,
        synthetic: bool,
    ) -> BureauReport {
        let queried_at = Utc::now();
        BureauReport {
            score: fixture.score,
            band: fixture.band,
            default_probability: fixture.default_probability,
            raw: json!({
                "subject_kind": kind,
                "subject": subject,
                "details": fixture.details,
                "synthetic": synthetic,
                "source": "mock bureau",
                "timestamp": queried_at.to_rfc3339(),
            }),
            queried_at,
        }
    }
}

impl BureauScoreProvider for MockBureauProvider {
    fn company_score(&self, id: &CompanyId) -> Result<BureauReport, BureauError> {
        let (fixture, synthetic) = match self.companies.get(id) {
            Some(fixture) => (fixture.clone(), false),
            None => (synthetic_fixture(id.as_str(), COMPANY_SCORE_RANGE), true),
        };
        debug!(
            subject = id.as_str(),
            score = fixture.score,
            synthetic,
            "company bureau lookup"
        );
        Ok(Self::report(SubjectKind::Company, id.as_str(), fixture, synthetic))
    }

    fn individual_score(&self, id: &PersonId) -> Result<BureauReport, BureauError> {
        let (fixture, synthetic) = match self.people.get(id) {
            Some(fixture) => (fixture.clone(), false),
            None => (synthetic_fixture(id.as_str(), PERSON_SCORE_RANGE), true),
        };
        debug!(
            subject = id.as_str(),
            score = fixture.score,
            synthetic,
            "individual bureau lookup"
        );
        Ok(Self::report(SubjectKind::Individual, id.as_str(), fixture, synthetic))
    }
}

fn synthetic_fixture(subject: &str, (low, high): (u16, u16)) -> BureauFixture {
    let span = u64::from(high - low) + 1;
    let offset = fnv1a(subject.as_bytes()) % span;
    let score = low + offset as u16;
    let band = band_for(score);
    let default_probability = round_to(0.02 + f64::from(1000 - score) / 1000.0 * 0.48, 3);
    BureauFixture::new(score, band, default_probability)
}

fn band_for(score: u16) -> &'static str {
    match score {
        801..=u16::MAX => "A",
        601..=800 => "B",
        401..=600 => "C",
        _ => "D",
    }
}

fn fnv1a(bytes: &[u8]) -> u64 {
    bytes.iter().fold(0xcbf2_9ce4_8422_2325_u64, |hash, byte| {
        (hash ^ u64::from(*byte)).wrapping_mul(0x0100_0000_01b3)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_company_answers_from_fixture() {
        let provider = MockBureauProvider::seeded();
        let id = CompanyId::parse("12345678000123").expect("valid");
        let report = provider.company_score(&id).expect("lookup succeeds");
        assert_eq!(report.score, 750);
        assert_eq!(report.band, "B");
        assert_eq!(report.default_probability, 0.15);
        assert_eq!(report.raw["synthetic"], json!(false));
        assert_eq!(report.raw["details"]["years_active"], json!(8));
    }

    #[test]
    fn seeded_person_answers_from_fixture() {
        let provider = MockBureauProvider::seeded();
        let id = PersonId::parse("98765432109").expect("valid");
        let report = provider.individual_score(&id).expect("lookup succeeds");
        assert_eq!(report.score, 380);
        assert_eq!(report.band, "D");
    }

    #[test]
    fn unknown_subjects_are_deterministic_and_in_range() {
        let provider = MockBureauProvider::seeded();
        for raw in ["11111111000111", "22222222000122", "33333333000133"] {
            let id = CompanyId::parse(raw).expect("valid");
            let first = provider.company_score(&id).expect("lookup");
            let second = provider.company_score(&id).expect("lookup");
            assert_eq!(first.score, second.score);
            assert!((300..=900).contains(&first.score));
            assert_eq!(first.band, band_for(first.score));
            assert!((0.02..=0.5).contains(&first.default_probability));
            assert_eq!(first.raw["synthetic"], json!(true));
        }

        let person = PersonId::parse("55555555555").expect("valid");
        let report = provider.individual_score(&person).expect("lookup");
        assert!((200..=950).contains(&report.score));
    }

    #[test]
    fn band_boundaries_match_grade_cut_offs() {
        assert_eq!(band_for(801), "A");
        assert_eq!(band_for(800), "B");
        assert_eq!(band_for(600), "C");
        assert_eq!(band_for(400), "D");
    }
}
