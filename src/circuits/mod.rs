// src/circuits/mod.rs

//! Defines the `QuantumCircuit`, which places gates on a register of qudits
//! and records each placement as a full-width `Moment` in its operator flow.

mod config;
mod moment;
pub mod placement;

pub use config::CircuitConfig;
pub use moment::Moment;

use crate::core::{QuditError, QuditResult, RegisterModel, RegisterSpec};
use crate::gates::{CxGate, Gate, HGate, InitState, Measurement, XGate, ZGate};
use crate::simulation::{ExecutionResult, OperatorFlow};
use placement::{assemble_moment, full_width_moment, validate_placement};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// A circuit over qudits of arbitrary, per-register dimension.
///
/// Construction resolves the register layout, pads the initial states with
/// `|0>` and records a first moment preparing them. Every gate call then
/// validates its placement, builds the gate, and appends one moment.
///
/// Analogy: Similar to `qiskit.QuantumCircuit`, with registers that are not
/// limited to two levels.
#[derive(Debug, Clone, PartialEq)]
pub struct QuantumCircuit {
    model: RegisterModel,
    config: CircuitConfig,
    /// One level per register after padding.
    init_states: Vec<usize>,
    op_flow: OperatorFlow,
}

impl QuantumCircuit {
    /// Creates a circuit with the default configuration.
    ///
    /// `QuantumCircuit::new((3, 3))` is three qutrits;
    /// `QuantumCircuit::new(vec![2, 2, 3, 3])` is two qubits and two qutrits.
    ///
    /// # Errors
    /// `QuditError::InvalidRegisterSpec` if the registers are malformed.
    pub fn new(qregs: impl Into<RegisterSpec>) -> QuditResult<Self> {
        Self::with_config(qregs, CircuitConfig::default())
    }

    /// Creates a circuit with an explicit configuration.
    ///
    /// # Errors
    /// * `QuditError::InvalidRegisterSpec` if the registers are malformed.
    /// * `QuditError::InvalidInitialState` if there are more initial states
    ///   than registers or one is outside its register's levels.
    pub fn with_config(qregs: impl Into<RegisterSpec>, config: CircuitConfig) -> QuditResult<Self> {
        let model = RegisterModel::resolve(&qregs.into())?;
        let reg_length = model.reg_length();

        let mut init_states = config.init_states.clone();
        if init_states.len() > reg_length {
            return Err(QuditError::InvalidInitialState {
                qreg: reg_length,
                state: init_states[reg_length],
                dim: 0,
            });
        }
        init_states.resize(reg_length, 0);

        let mut circuit = Self {
            op_flow: OperatorFlow::new(model.clone()),
            model,
            config,
            init_states,
        };
        circuit.initialize_states()?;
        debug!(name = %circuit.config.name, register = %circuit.model, "created circuit");
        Ok(circuit)
    }

    fn initialize_states(&mut self) -> QuditResult<()> {
        let states = &self.init_states;
        let moment = full_width_moment(&self.model, |qreg, dim| {
            Ok(Gate::Init(InitState::new(qreg, dim, states[qreg])?))
        })?;
        self.op_flow.append(moment);
        Ok(())
    }

    fn add_moment_to_opflow(&mut self, gate: Gate) -> QuditResult<&mut Self> {
        let moment = assemble_moment(&self.model, gate);
        self.op_flow.populate_opflow(moment)?;
        Ok(self)
    }

    /// Places a generalised Hadamard on `qreg`.
    ///
    /// `dims` defaults to the register's own dimension; a smaller value makes
    /// the gate act on the lowest `dims` levels only.
    ///
    /// # Errors
    /// `RegisterOutOfBounds`, `DimensionMismatch` or `InvalidDimension`.
    pub fn h(&mut self, qreg: usize, dims: Option<usize>) -> QuditResult<&mut Self> {
        let dims = validate_placement(&self.model, qreg, dims)?;
        self.add_moment_to_opflow(HGate::new(qreg, dims)?.into())
    }

    /// Places a shift gate on `qreg`.
    ///
    /// # Errors
    /// `RegisterOutOfBounds`, `DimensionMismatch` or `InvalidDimension`.
    pub fn x(&mut self, qreg: usize, dims: Option<usize>) -> QuditResult<&mut Self> {
        let dims = validate_placement(&self.model, qreg, dims)?;
        self.add_moment_to_opflow(XGate::new(qreg, dims)?.into())
    }

    /// Places a clock gate on `qreg`.
    ///
    /// # Errors
    /// `RegisterOutOfBounds`, `DimensionMismatch` or `InvalidDimension`.
    pub fn z(&mut self, qreg: usize, dims: Option<usize>) -> QuditResult<&mut Self> {
        let dims = validate_placement(&self.model, qreg, dims)?;
        self.add_moment_to_opflow(ZGate::new(qreg, dims)?.into())
    }

    /// Places a controlled shift over the inclusive range `acting_on`.
    ///
    /// The first register controls, the last is shifted by `plus` when the
    /// control is in its top level. The joint operator uses the native
    /// dimension of every register in the range; `dims_bound`, if given, is only
    /// checked as a bound: at least two and no larger than any of them.
    ///
    /// # Errors
    /// `InvalidPlacement`, `RegisterOutOfBounds`, `DimensionMismatch` or
    /// `InvalidDimension`.
    pub fn cx(&mut self, acting_on: (usize, usize), plus: usize, dims_bound: Option<usize>) -> QuditResult<&mut Self> {
        let (start, end) = acting_on;
        if start >= end {
            return Err(QuditError::InvalidPlacement { start, end });
        }
        if let Some(d) = dims_bound.filter(|d| *d < 2) {
            return Err(QuditError::InvalidDimension { gate: "cx", dims: d });
        }
        let native_dims = (start..=end)
            .map(|qreg| {
                validate_placement(&self.model, qreg, dims_bound)?;
                validate_placement(&self.model, qreg, None)
            })
            .collect::<QuditResult<Vec<_>>>()?;
        self.add_moment_to_opflow(CxGate::new(start, end, native_dims, plus)?.into())
    }

    /// Measurement of a single register.
    ///
    /// # Errors
    /// Always `QuditError::Unimplemented`; use [`measure_all`](Self::measure_all).
    pub fn measure(&mut self, qreg: usize) -> QuditResult<&mut Self> {
        debug!(qreg, "single-register measurement requested");
        Err(QuditError::Unimplemented { operation: "measure" })
    }

    /// Measures every register in one moment.
    pub fn measure_all(&mut self) -> &mut Self {
        let slots = self
            .model
            .reg_dims()
            .iter()
            .enumerate()
            .map(|(qreg, dim)| Arc::new(Gate::Measure(Measurement::new(qreg, *dim))))
            .collect();
        self.op_flow.append(Moment::new(slots));
        self
    }

    /// Executes the operator flow.
    ///
    /// # Errors
    /// Propagates the flow's execution errors.
    pub fn run(&self) -> QuditResult<ExecutionResult> {
        self.op_flow.exec_with(&self.config.execution_options())
    }

    /// Prints every moment of the operator flow to stdout.
    pub fn print_opflow_list(&self) {
        for moment in self.op_flow.peek() {
            println!("{}\n", moment);
        }
    }

    /// The circuit configuration.
    pub fn config(&self) -> &CircuitConfig {
        &self.config
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn cregs(&self) -> usize {
        self.config.cregs
    }

    /// Number of registers.
    pub fn reg_length(&self) -> usize {
        self.model.reg_length()
    }

    /// Native dimension of each register.
    pub fn reg_dims(&self) -> &[usize] {
        self.model.reg_dims()
    }

    /// Initial level of each register, padded to the register length.
    pub fn init_states(&self) -> &[usize] {
        &self.init_states
    }

    /// The recorded moments.
    pub fn op_flow(&self) -> &OperatorFlow {
        &self.op_flow
    }
}

impl fmt::Display for QuantumCircuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = if self.config.name.is_empty() { "circuit" } else { self.config.name.as_str() };
        writeln!(
            f,
            "{}: {} ({} moments, {} cregs)",
            name,
            self.model,
            self.op_flow.len(),
            self.config.cregs
        )?;
        for (t, moment) in self.op_flow.peek().iter().enumerate() {
            writeln!(f, "  t{}: {}", t, moment)?;
        }
        Ok(())
    }
}
