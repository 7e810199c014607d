use serde::{Deserialize, Serialize};

/// How an input is compared against each rung's bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparison {
    LessThan,
    AtMost,
    GreaterThan,
}

impl Comparison {
    pub fn holds(self, input: f64, bound: f64) -> bool {
        match self {
            Comparison::LessThan => input < bound,
            Comparison::AtMost => input <= bound,
            Comparison::GreaterThan => input > bound,
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            Comparison::LessThan => "<",
            Comparison::AtMost => "<=",
            Comparison::GreaterThan => ">",
        }
    }
}

/// One rung: inputs satisfying the comparison against `bound` map to `value`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rung {
    pub bound: f64,
    pub value: f64,
}

/// Ordered step function evaluated top-down; the first matching rung wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdLadder {
    pub comparison: Comparison,
    pub rungs: Vec<Rung>,
    /// Value used when no rung matches.
    pub otherwise: f64,
}

impl ThresholdLadder {
    pub fn new(comparison: Comparison, rungs: &[(f64, f64)], otherwise: f64) -> Self {
        Self {
            comparison,
            rungs: rungs
                .iter()
                .map(|&(bound, value)| Rung { bound, value })
                .collect(),
            otherwise,
        }
    }

    pub fn lookup(&self, input: f64) -> f64 {
        self.rungs
            .iter()
            .find(|rung| self.comparison.holds(input, rung.bound))
            .map(|rung| rung.value)
            .unwrap_or(self.otherwise)
    }

    /// Problems with this ladder, each prefixed with `name`.
    ///
    /// Bounds must be finite and ordered so every rung is reachable: ascending for
    /// `less_than`/`at_most`, descending for `greater_than`.
    pub fn problems(&self, name: &str) -> Vec<String> {
        let mut problems = Vec::new();

        if self.rungs.is_empty() {
            problems.push(format!("{name}: ladder needs at least one rung"));
        }
        if !self.otherwise.is_finite() {
            problems.push(format!("{name}.otherwise: must be finite"));
        }

        for (index, rung) in self.rungs.iter().enumerate() {
            if !rung.bound.is_finite() || !rung.value.is_finite() {
                problems.push(format!("{name}.rungs[{index}]: bound and value must be finite"));
            }
        }

        for (index, pair) in self.rungs.windows(2).enumerate() {
            let ordered = match self.comparison {
                Comparison::LessThan | Comparison::AtMost => pair[0].bound < pair[1].bound,
                Comparison::GreaterThan => pair[0].bound > pair[1].bound,
            };
            if !ordered {
                problems.push(format!(
                    "{name}.rungs[{}]: bound {} is unreachable after {} {}",
                    index + 1,
                    pair[1].bound,
                    self.comparison.symbol(),
                    pair[0].bound
                ));
            }
        }

        problems
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn less_than_ladder_sends_bounds_to_next_rung() {
        let ladder =
            ThresholdLadder::new(Comparison::LessThan, &[(2.0, 400.0), (5.0, 600.0)], 1000.0);
        assert_eq!(ladder.lookup(1.99), 400.0);
        assert_eq!(ladder.lookup(2.0), 600.0);
        assert_eq!(ladder.lookup(5.0), 1000.0);
    }

    #[test]
    fn greater_than_ladder_sends_bounds_to_next_rung() {
        let ladder = ThresholdLadder::new(
            Comparison::GreaterThan,
            &[(10.0, 0.0), (5.0, 300.0), (0.0, 700.0)],
            1000.0,
        );
        assert_eq!(ladder.lookup(11.0), 0.0);
        assert_eq!(ladder.lookup(10.0), 300.0);
        assert_eq!(ladder.lookup(5.0), 700.0);
        assert_eq!(ladder.lookup(0.0), 1000.0);
    }

    #[test]
    fn at_most_ladder_keeps_bounds_on_their_rung() {
        let ladder = ThresholdLadder::new(Comparison::AtMost, &[(6.0, 0.0), (12.0, 0.02)], 0.06);
        assert_eq!(ladder.lookup(6.0), 0.0);
        assert_eq!(ladder.lookup(12.0), 0.02);
        assert_eq!(ladder.lookup(13.0), 0.06);
    }

    #[test]
    fn flags_unreachable_rungs() {
        let ladder = ThresholdLadder::new(
            Comparison::GreaterThan,
            &[(0.3, 700.0), (0.6, 300.0)],
            1000.0,
        );
        let problems = ladder.problems("leverage");
        assert_eq!(problems.len(), 1);
        assert!(problems[0].starts_with("leverage.rungs[1]"));
    }

    #[test]
    fn flags_empty_and_non_finite_ladders() {
        let ladder = ThresholdLadder {
            comparison: Comparison::LessThan,
            rungs: Vec::new(),
            otherwise: f64::INFINITY,
        };
        assert_eq!(ladder.problems("age").len(), 2);
    }

    #[test]
    fn comparison_uses_snake_case_names() {
        let encoded = serde_json::to_string(&Comparison::GreaterThan).expect("serializes");
        assert_eq!(encoded, "\"greater_than\"");
    }
}
