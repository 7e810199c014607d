use serde::Serialize;

use crate::scoring::domain::round_to;

/// Scores closer than this are treated as agreeing.
pub const AGREEMENT_BAND: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonVerdict {
    Similar,
    InternalHigher,
    BureauHigher,
}

impl ComparisonVerdict {
    pub const fn recommendation(self) -> &'static str {
        match self {
            ComparisonVerdict::Similar => "scores agree; use a weighted average",
            ComparisonVerdict::InternalHigher => {
                "internal score above bureau; review scoring parameters"
            }
            ComparisonVerdict::BureauHigher => "bureau more optimistic; validate external data",
        }
    }
}

/// Side-by-side view of the internal score and a bureau score for the same company.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreComparison {
    pub internal_score: f64,
    pub bureau_score: u16,
    pub difference: f64,
    pub verdict: ComparisonVerdict,
    pub recommendation: &'static str,
}

impl ScoreComparison {
    pub fn between(internal_score: f64, bureau_score: u16) -> Self {
        let bureau = f64::from(bureau_score);
        let difference = (internal_score - bureau).abs();

        let verdict = if difference < AGREEMENT_BAND {
            ComparisonVerdict::Similar
        } else if internal_score > bureau {
            ComparisonVerdict::InternalHigher
        } else {
            ComparisonVerdict::BureauHigher
        };

        Self {
            internal_score: round_to(internal_score, 2),
            bureau_score,
            difference: round_to(difference, 2),
            verdict,
            recommendation: verdict.recommendation(),
        }
    }
}
