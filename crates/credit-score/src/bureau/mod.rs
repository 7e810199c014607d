//! External credit bureau collaborator.
//!
//! The scoring engine only consumes the numeric bureau score. This module defines the provider
//! contract, identifier parsing, an in-process mock provider, and a helper for comparing the
//! internal score against a bureau answer.

mod comparison;
mod mock;
mod provider;

pub use comparison::{ComparisonVerdict, ScoreComparison, AGREEMENT_BAND};
pub use mock::{BureauFixture, MockBureauProvider};
pub use provider::{
    BureauError, BureauReport, BureauScoreProvider, CompanyId, PersonId, SubjectKind,
};
