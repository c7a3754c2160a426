// src/simulation/results.rs

use crate::core::StateVector;
use std::collections::HashMap;
use std::fmt;

/// Holds the outcome of executing an operator flow: the final state and the
/// level observed on every measured register.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionResult {
    final_state: StateVector,
    /// Maps measured register index to the observed level. A register measured
    /// more than once keeps its latest outcome.
    outcomes: HashMap<usize, usize>,
}

impl ExecutionResult {
    pub(crate) fn new(final_state: StateVector, outcomes: HashMap<usize, usize>) -> Self {
        Self { final_state, outcomes }
    }

    /// The state vector after the last moment.
    pub fn final_state(&self) -> &StateVector {
        &self.final_state
    }

    /// Born probabilities of every basis state of the final state.
    pub fn probabilities(&self) -> Vec<f64> {
        self.final_state.vector().iter().map(|c| c.norm_sqr()).collect()
    }

    /// The measured level of `qreg`, `None` if it was never measured.
    pub fn get_outcome(&self, qreg: usize) -> Option<usize> {
        self.outcomes.get(&qreg).copied()
    }

    /// All recorded measurement outcomes.
    pub fn all_outcomes(&self) -> &HashMap<usize, usize> {
        &self.outcomes
    }
}

impl fmt::Display for ExecutionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Execution Results:")?;
        if self.outcomes.is_empty() {
            writeln!(f, "  No registers were measured.")?;
        } else {
            // Sort by register for consistent and readable output
            let mut sorted: Vec<_> = self.outcomes.iter().collect();
            sorted.sort_by_key(|(qreg, _)| **qreg);
            writeln!(f, "  Measured Outcomes:")?;
            for (qreg, level) in sorted {
                writeln!(f, "    q{}: |{}>", qreg, level)?;
            }
        }
        writeln!(f, "  Final {}", self.final_state)
    }
}
