// src/simulation/engine.rs

// src/simulation/engine.rs
use crate::circuits::Moment;
use crate::core::{AMPLITUDE_EPSILON, QuditError, QuditResult, StateVector};
use crate::gates::{Gate, QuditGate};
use crate::simulation::ExecutionOptions;
use crate::validation::{check_normalization, check_unitary};
use num_complex::Complex64;
use num_traits::Zero;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use tracing::{debug, trace};

/// Evolves a mixed-radix state vector moment by moment.
/// (Internal visibility)
pub(crate) struct ExecutionEngine<'a> {
    /// Native dimension of every register, register 0 most significant.
    reg_dims: &'a [usize],
    state: StateVector,
    /// Run-wide generator when a seed is configured. Without one, each
    /// measurement seeds from the state it collapses.
    rng: Option<StdRng>,
    tolerance: f64,
    outcomes: HashMap<usize, usize>,
}

impl<'a> ExecutionEngine<'a> {
    /// Starts from `|0...0>` over `reg_dims`.
    pub(crate) fn init(reg_dims: &'a [usize], options: &ExecutionOptions) -> QuditResult<Self> {
        let zeros = vec![0usize; reg_dims.len()];
        let state = StateVector::basis(reg_dims, &zeros).ok_or_else(|| {
            QuditError::StateSpaceOverflow { dims: reg_dims.to_vec() }
        })?;

        Ok(Self {
            reg_dims,
            state,
            rng: options.seed.map(StdRng::seed_from_u64),
            tolerance: options.tolerance,
            outcomes: HashMap::new(),
        })
    }

    #[cfg(test)]
    pub(crate) fn set_state(&mut self, state: StateVector) -> QuditResult<()> {
        crate::validation::validate_state(&state, self.state.dim(), Some(self.tolerance))?;
        self.state = state;
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn state(&self) -> &StateVector {
        &self.state
    }

    /// Applies every distinct operator of the moment. Identities are skipped
    /// and measurements are sampled.
    pub(crate) fn apply_moment(&mut self, moment: &Moment) -> QuditResult<()> {
        for gate in moment.operators() {
            if gate.is_identity() {
                continue;
            }
            if gate.is_measurement() {
                self.measure(gate.acting_on().start())?;
            } else {
                self.apply_operator(gate)?;
            }
        }
        check_normalization(&self.state, Some(self.tolerance))
    }

    /// Applies one unitary to the contiguous block of registers it covers.
    ///
    /// A single-qudit gate built for fewer levels than its register acts on
    /// the lowest levels and leaves the rest alone.
    pub(crate) fn apply_operator(&mut self, gate: &Gate) -> QuditResult<()> {
        let placement = gate.acting_on();
        let (start, end) = (placement.start(), placement.end());
        if end >= self.reg_dims.len() {
            return Err(QuditError::RegisterOutOfBounds { qreg: end, reg_length: self.reg_dims.len() });
        }

        let block: usize = self.reg_dims[start..=end].iter().product();
        let left: usize = self.reg_dims[..start].iter().product();
        let right: usize = self.reg_dims[end + 1..].iter().product();

        let unitary = gate.unitary();
        let embedded;
        let unitary = if unitary.dim() == block {
            unitary
        } else {
            embedded = match (gate.is_single_qudit(), unitary.embed(block)) {
                (true, Some(m)) => m,
                _ => {
                    return Err(QuditError::SimulationError {
                        message: format!(
                            "{} has a {}x{} unitary but registers {} span {} levels",
                            gate.name(),
                            unitary.dim(),
                            unitary.dim(),
                            placement,
                            block
                        ),
                    });
                }
            };
            &embedded
        };
        check_unitary(unitary, Some(self.tolerance))?;
        trace!(gate = gate.name(), %placement, block, "applying operator");

        let old = self.state.vector().to_vec();
        let amplitudes = self.state.vector_mut();
        for l in 0..left {
            for r in 0..right {
                for i in 0..block {
                    let mut acc = Complex64::zero();
                    for (j, u) in unitary.row(i).iter().enumerate() {
                        if !u.is_zero() {
                            acc += u * old[(l * block + j) * right + r];
                        }
                    }
                    amplitudes[(l * block + i) * right + r] = acc;
                }
            }
        }
        Ok(())
    }

    /// Samples a level of `qreg` from its Born probabilities and collapses
    /// the state onto it.
    pub(crate) fn measure(&mut self, qreg: usize) -> QuditResult<()> {
        let dim = *self.reg_dims.get(qreg).ok_or(QuditError::RegisterOutOfBounds {
            qreg,
            reg_length: self.reg_dims.len(),
        })?;
        let right: usize = self.reg_dims[qreg + 1..].iter().product();
        let level_of = |index: usize| (index / right) % dim;

        let mut probabilities = vec![0.0f64; dim];
        for (index, c) in self.state.vector().iter().enumerate() {
            probabilities[level_of(index)] += c.norm_sqr();
        }
        let total: f64 = probabilities.iter().sum();
        if total < AMPLITUDE_EPSILON {
            return Err(QuditError::SimulationError {
                message: format!("Cannot measure register {}: state has negligible norm", qreg),
            });
        }

        let p_sample = self.next_sample() * total;
        let mut cumulative = 0.0;
        // Fallback for p_sample landing exactly on total: last level with weight.
        let mut outcome = probabilities.iter().rposition(|p| *p > AMPLITUDE_EPSILON).unwrap_or(0);
        for (level, p) in probabilities.iter().enumerate() {
            cumulative += p;
            if p_sample < cumulative && *p > AMPLITUDE_EPSILON {
                outcome = level;
                break;
            }
        }

        let scale = 1.0 / probabilities[outcome].sqrt();
        for (index, c) in self.state.vector_mut().iter_mut().enumerate() {
            if level_of(index) == outcome {
                *c *= scale;
            } else {
                *c = Complex64::zero();
            }
        }
        debug!(qreg, outcome, probability = probabilities[outcome], "measured register");
        self.outcomes.insert(qreg, outcome);
        Ok(())
    }

    fn next_sample(&mut self) -> f64 {
        if let Some(rng) = self.rng.as_mut() {
            return rng.random::<f64>();
        }
        let seed = {
            let mut hasher = DefaultHasher::new();
            for c in self.state.vector() {
                c.re.to_ne_bytes().hash(&mut hasher);
                c.im.to_ne_bytes().hash(&mut hasher);
            }
            hasher.finish()
        };
        StdRng::seed_from_u64(seed).random::<f64>()
    }

    /// Consumes the engine into its final state and recorded outcomes.
    pub(crate) fn finish(self) -> (StateVector, HashMap<usize, usize>) {
        (self.state, self.outcomes)
    }
}
