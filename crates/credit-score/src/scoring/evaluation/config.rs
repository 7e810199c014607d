use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::ladder::{Comparison, ThresholdLadder};

const WEIGHT_TOLERANCE: f64 = 1e-9;

/// Every coefficient the engine uses: normalization ladders, weights, grade cut-offs, premia.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScoringPolicy {
    pub normalization: NormalizationPolicy,
    pub weights: ScoreWeights,
    pub grades: GradeThresholds,
    pub pricing: PricingPolicy,
}

/// One ladder per sub-score. Ratio ladders take the guarded ratio as input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NormalizationPolicy {
    pub age: ThresholdLadder,
    pub personal_credit: ThresholdLadder,
    pub leverage: ThresholdLadder,
    pub liquidity: ThresholdLadder,
    pub cash_stress: ThresholdLadder,
    pub concentration: ThresholdLadder,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScoreWeights {
    pub age: f64,
    pub personal_credit: f64,
    pub leverage: f64,
    pub liquidity: f64,
    pub cash_stress: f64,
    pub concentration: f64,
    pub bureau: f64,
}

impl ScoreWeights {
    pub fn total(&self) -> f64 {
        self.named().iter().map(|(_, weight)| weight).sum()
    }

    fn named(&self) -> [(&'static str, f64); 7] {
        [
            ("age", self.age),
            ("personal_credit", self.personal_credit),
            ("leverage", self.leverage),
            ("liquidity", self.liquidity),
            ("cash_stress", self.cash_stress),
            ("concentration", self.concentration),
            ("bureau", self.bureau),
        ]
    }
}

/// Exclusive lower bounds: a score must be strictly above a cut-off to earn that grade.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GradeThresholds {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PricingPolicy {
    pub base_rate: f64,
    /// Risk premium charged at a score of zero; scales linearly to nothing at `score_ceiling`.
    pub risk_premium_span: f64,
    pub score_ceiling: f64,
    pub term_premium: ThresholdLadder,
    pub amount_premium: ThresholdLadder,
}

impl ScoringPolicy {
    pub fn standard() -> Self {
        Self {
            normalization: NormalizationPolicy {
                age: ThresholdLadder::new(
                    Comparison::LessThan,
                    &[(2.0, 400.0), (5.0, 600.0)],
                    1000.0,
                ),
                personal_credit: ThresholdLadder::new(
                    Comparison::LessThan,
                    &[(400.0, 100.0), (700.0, 500.0), (900.0, 700.0)],
                    1000.0,
                ),
                leverage: ThresholdLadder::new(
                    Comparison::GreaterThan,
                    &[(1.0, 100.0), (0.6, 300.0), (0.3, 700.0)],
                    1000.0,
                ),
                liquidity: ThresholdLadder::new(
                    Comparison::LessThan,
                    &[(0.1, 100.0), (0.4, 500.0)],
                    1000.0,
                ),
                cash_stress: ThresholdLadder::new(
                    Comparison::GreaterThan,
                    &[(10.0, 0.0), (5.0, 300.0), (0.0, 700.0)],
                    1000.0,
                ),
                concentration: ThresholdLadder::new(
                    Comparison::GreaterThan,
                    &[(0.6, 100.0), (0.3, 500.0), (0.2, 900.0)],
                    1000.0,
                ),
            },
            weights: ScoreWeights {
                age: 0.05,
                personal_credit: 0.05,
                leverage: 0.15,
                liquidity: 0.10,
                cash_stress: 0.10,
                concentration: 0.05,
                bureau: 0.50,
            },
            grades: GradeThresholds {
                a: 800.0,
                b: 600.0,
                c: 400.0,
                d: 200.0,
            },
            pricing: PricingPolicy {
                base_rate: 0.12,
                risk_premium_span: 0.25,
                score_ceiling: 1000.0,
                term_premium: ThresholdLadder::new(
                    Comparison::AtMost,
                    &[(6.0, 0.00), (12.0, 0.02), (18.0, 0.04)],
                    0.06,
                ),
                amount_premium: ThresholdLadder::new(
                    Comparison::LessThan,
                    &[(50_000.0, 0.00), (150_000.0, 0.01), (300_000.0, 0.025)],
                    0.05,
                ),
            },
        }
    }

    /// Reads a JSON policy file and validates it before returning.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, PolicyError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| PolicyError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, PolicyError> {
        let policy: Self = serde_json::from_str(raw)?;
        policy.validate()?;
        Ok(policy)
    }

    /// Returns all problems at once rather than stopping at the first.
    pub fn validate(&self) -> Result<(), PolicyError> {
        let mut problems = Vec::new();

        let ladders = [
            ("normalization.age", &self.normalization.age),
            ("normalization.personal_credit", &self.normalization.personal_credit),
            ("normalization.leverage", &self.normalization.leverage),
            ("normalization.liquidity", &self.normalization.liquidity),
            ("normalization.cash_stress", &self.normalization.cash_stress),
            ("normalization.concentration", &self.normalization.concentration),
            ("pricing.term_premium", &self.pricing.term_premium),
            ("pricing.amount_premium", &self.pricing.amount_premium),
        ];
        for (name, ladder) in ladders {
            problems.extend(ladder.problems(name));
        }

        for (name, weight) in self.weights.named() {
            if !weight.is_finite() || weight < 0.0 {
                problems.push(format!("weights.{name}: must be a non-negative number"));
            }
        }
        let total = self.weights.total();
        if (total - 1.0).abs() > WEIGHT_TOLERANCE {
            problems.push(format!("weights: must sum to 1.0 (found {total})"));
        }

        let cuts = [
            self.grades.a,
            self.grades.b,
            self.grades.c,
            self.grades.d,
        ];
        if cuts.iter().any(|cut| !cut.is_finite()) || cuts.windows(2).any(|w| w[0] <= w[1]) {
            problems.push("grades: thresholds must be finite and strictly descending from a to d".to_string());
        }

        let pricing = &self.pricing;
        if !pricing.score_ceiling.is_finite() || pricing.score_ceiling <= 0.0 {
            problems.push("pricing.score_ceiling: must be positive".to_string());
        }
        for (name, value) in [
            ("base_rate", pricing.base_rate),
            ("risk_premium_span", pricing.risk_premium_span),
        ] {
            if !value.is_finite() || value < 0.0 {
                problems.push(format!("pricing.{name}: must be a non-negative number"));
            }
        }

        for (name, ladder) in [
            ("pricing.term_premium", &pricing.term_premium),
            ("pricing.amount_premium", &pricing.amount_premium),
        ] {
            for (index, rung) in ladder.rungs.iter().enumerate() {
                if rung.value < 0.0 {
                    problems.push(format!("{name}.rungs[{index}]: premium must be non-negative"));
                }
            }
            if ladder.otherwise < 0.0 {
                problems.push(format!("{name}.otherwise: premium must be non-negative"));
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(PolicyError::Invalid(problems))
        }
    }
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self::standard()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PolicyError {
    #[error("failed to read scoring policy {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("scoring policy is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("scoring policy rejected: {}", .0.join("; "))]
    Invalid(Vec<String>),
}
