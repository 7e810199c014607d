use super::super::domain::{Grade, RiskAssessment, RiskSubScores};
use super::config::{GradeThresholds, ScoreWeights};

pub const MIN_SCORE: f64 = 0.0;
pub const MAX_SCORE: f64 = 1000.0;

/// Weights sub-scores and the bureau score into one graded score.
#[derive(Debug, Clone)]
pub struct ScoreAggregator {
    weights: ScoreWeights,
    grades: GradeThresholds,
}

impl ScoreAggregator {
    pub fn new(weights: ScoreWeights, grades: GradeThresholds) -> Self {
        Self { weights, grades }
    }

    pub fn aggregate(&self, sub_scores: RiskSubScores, bureau_score: u16) -> RiskAssessment {
        let w = &self.weights;
        let weighted = sub_scores.leverage * w.leverage
            + sub_scores.liquidity * w.liquidity
            + sub_scores.cash_stress * w.cash_stress
            + sub_scores.concentration * w.concentration
            + sub_scores.age * w.age
            + sub_scores.personal_credit * w.personal_credit
            + f64::from(bureau_score) * w.bureau;

        // Only reachable when weights or sub-scores leave the 0-1000 scale.
        let score = weighted.clamp(MIN_SCORE, MAX_SCORE);

        RiskAssessment {
            sub_scores,
            score,
            grade: self.grade_for(score),
        }
    }

    /// Strict comparison: a score equal to a cut-off takes the lower grade.
    pub fn grade_for(&self, score: f64) -> Grade {
        let g = &self.grades;
        if score > g.a {
            Grade::A
        } else if score > g.b {
            Grade::B
        } else if score > g.c {
            Grade::C
        } else if score > g.d {
            Grade::D
        } else {
            Grade::AutomaticallyRejected
        }
    }
}
