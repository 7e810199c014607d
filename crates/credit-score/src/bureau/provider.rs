use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which kind of subject a bureau lookup targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubjectKind {
    Company,
    Individual,
}

impl fmt::Display for SubjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubjectKind::Company => f.write_str("company"),
            SubjectKind::Individual => f.write_str("individual"),
        }
    }
}

/// Company registration number: exactly 14 digits.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CompanyId(String);

impl CompanyId {
    pub const DIGITS: usize = 14;

    pub fn parse(raw: &str) -> Result<Self, BureauError> {
        parse_digits(raw, Self::DIGITS, SubjectKind::Company).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Individual taxpayer number: exactly 11 digits.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PersonId(String);

impl PersonId {
    pub const DIGITS: usize = 11;

    pub fn parse(raw: &str) -> Result<Self, BureauError> {
        parse_digits(raw, Self::DIGITS, SubjectKind::Individual).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn parse_digits(raw: &str, expected: usize, kind: SubjectKind) -> Result<String, BureauError> {
    let trimmed = raw.trim();
    if trimmed.len() == expected && trimmed.bytes().all(|b| b.is_ascii_digit()) {
        Ok(trimmed.to_string())
    } else {
        Err(BureauError::InvalidIdentifier { kind, expected })
    }
}

/// Score report returned by a credit bureau.
///
/// Only `score` feeds the engine; `band`, `default_probability`, and `raw` are passed through
/// to callers untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BureauReport {
    pub score: u16,
    pub band: String,
    pub default_probability: f64,
    pub raw: serde_json::Value,
    pub queried_at: DateTime<Utc>,
}

/// Source of external bureau scores for companies and individuals.
pub trait BureauScoreProvider: Send + Sync {
    fn company_score(&self, id: &CompanyId) -> Result<BureauReport, BureauError>;
    fn individual_score(&self, id: &PersonId) -> Result<BureauReport, BureauError>;
}

#[derive(Debug, thiserror::Error)]
pub enum BureauError {
    #[error("{kind} identifier must have exactly {expected} digits")]
    InvalidIdentifier { kind: SubjectKind, expected: usize },
    #[error("bureau unavailable: {0}")]
    Unavailable(String),
}
