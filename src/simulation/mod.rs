// src/simulation/mod.rs

//! Sequencing and execution of moments.
//! This module contains the `OperatorFlow`, the append-only log of moments a
//! circuit builds, and the internal `ExecutionEngine` that runs it against a
//! state vector.

mod results;
pub(crate) mod engine;

pub use results::ExecutionResult;

use crate::circuits::Moment;
use crate::core::{DEFAULT_TOLERANCE, QuditError, QuditResult, RegisterModel};
use crate::gates::QuditGate;
use engine::ExecutionEngine;
use std::sync::Arc;
use tracing::{debug, info};

/// Knobs for a single execution run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExecutionOptions {
    /// Seed for measurement sampling. `None` derives a seed from the state
    /// being measured, which keeps runs deterministic.
    pub seed: Option<u64>,
    /// Tolerance for the unitarity and normalisation checks.
    pub tolerance: f64,
}

impl Default for ExecutionOptions {
    fn default() -> Self {
        Self { seed: None, tolerance: DEFAULT_TOLERANCE }
    }
}

/// The ordered sequence of moments making up a circuit program.
///
/// Moments are only ever appended while a circuit is built and only read
/// while it runs.
#[derive(Debug, Clone, PartialEq)]
pub struct OperatorFlow {
    model: RegisterModel,
    moments: Vec<Moment>,
}

impl OperatorFlow {
    /// An empty flow over the given register layout.
    pub fn new(model: RegisterModel) -> Self {
        Self { model, moments: Vec::new() }
    }

    /// Appends a moment.
    ///
    /// # Errors
    /// `QuditError::MalformedMoment` if the moment does not have one slot per
    /// register, a slot holds a gate placed elsewhere, or the slots of a
    /// ranged gate do not all share one instance.
    pub fn populate_opflow(&mut self, moment: Moment) -> QuditResult<bool> {
        let expected = self.model.reg_length();
        let slots = moment.slots();
        // Each slot's gate must cover that slot, and a ranged gate must be
        // the very same value in every slot of its range.
        let well_formed = slots.len() == expected
            && slots.iter().enumerate().all(|(qreg, gate)| {
                let placement = gate.acting_on();
                placement.contains(qreg)
                    && (placement.start()..=placement.end())
                        .all(|q| slots.get(q).is_some_and(|other| Arc::ptr_eq(other, gate)))
            });
        if !well_formed {
            return Err(QuditError::MalformedMoment { expected, got: moment.len() });
        }
        self.append(moment);
        Ok(true)
    }

    /// Appends a moment the caller assembled against this flow's register.
    pub(crate) fn append(&mut self, moment: Moment) {
        debug_assert_eq!(moment.len(), self.model.reg_length());
        debug!(index = self.moments.len(), %moment, "appending moment");
        self.moments.push(moment);
    }

    /// Read-only view of the moments, in time order.
    pub fn peek(&self) -> &[Moment] {
        &self.moments
    }

    /// Number of moments.
    pub fn len(&self) -> usize {
        self.moments.len()
    }

    /// Returns `true` if no moment has been appended.
    pub fn is_empty(&self) -> bool {
        self.moments.is_empty()
    }

    /// The register layout the flow runs on.
    pub fn register(&self) -> &RegisterModel {
        &self.model
    }

    /// Runs every moment in order with default options.
    pub fn exec(&self) -> QuditResult<ExecutionResult> {
        self.exec_with(&ExecutionOptions::default())
    }

    /// Runs every moment in order, starting from `|0...0>`.
    ///
    /// # Errors
    /// * `QuditError::StateSpaceOverflow` if the register is too large to
    ///   simulate.
    /// * `QuditError::SimulationError` if an operator does not fit its
    ///   registers, is not unitary, or the state loses its norm.
    pub fn exec_with(&self, options: &ExecutionOptions) -> QuditResult<ExecutionResult> {
        self.model.state_space_dim()?;
        info!(
            moments = self.moments.len(),
            registers = self.model.reg_length(),
            "executing operator flow"
        );

        let mut engine = ExecutionEngine::init(self.model.reg_dims(), options)?;
        for (t, moment) in self.moments.iter().enumerate() {
            debug!(t, %moment, "executing moment");
            engine.apply_moment(moment)?;
        }

        let (state, outcomes) = engine.finish();
        Ok(ExecutionResult::new(state, outcomes))
    }
}
