// src/circuits/config.rs

use crate::core::DEFAULT_TOLERANCE;
use crate::simulation::ExecutionOptions;

/// Settings of a [`QuantumCircuit`](super::QuantumCircuit) beyond its
/// register layout.
#[derive(Debug, Clone, PartialEq)]
pub struct CircuitConfig {
    /// Optional display name.
    pub name: String,
    /// Number of classical registers. Stored and reported only.
    pub cregs: usize,
    /// Initial basis level per register; missing entries default to `|0>`.
    pub init_states: Vec<usize>,
    /// Seed for measurement sampling during `run`.
    pub seed: Option<u64>,
    /// Tolerance for the numerical checks during `run`.
    pub tolerance: f64,
}

impl Default for CircuitConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            cregs: 0,
            init_states: Vec::new(),
            seed: None,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl CircuitConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_cregs(mut self, cregs: usize) -> Self {
        self.cregs = cregs;
        self
    }

    pub fn with_init_states(mut self, init_states: impl Into<Vec<usize>>) -> Self {
        self.init_states = init_states.into();
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// The execution options `run` uses.
    pub fn execution_options(&self) -> ExecutionOptions {
        ExecutionOptions { seed: self.seed, tolerance: self.tolerance }
    }
}
