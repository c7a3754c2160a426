// src/lib.rs

//! `qudim` - Quantum circuits over qudits of arbitrary dimension
//!
//! A register mixes qudits of any dimension (qubits, qutrits, ...). Gates
//! derive their unitaries from the dimension they act on alone, and every
//! placement becomes one full-width moment of a circuit's operator flow,
//! which can then be executed against a state vector.
//!
//! # Example: a qutrit controlling a qubit
//!
//! ```
//! use qudim::{QuantumCircuit, QuditError};
//!
//! // One qutrit followed by one qubit.
//! let mut circuit = QuantumCircuit::new(vec![3, 2])?;
//!
//! // Drive the qutrit to its top level |2>, then flip the qubit on it.
//! circuit.x(0, None)?.x(0, None)?;
//! circuit.cx((0, 1), 1, None)?;
//! circuit.measure_all();
//!
//! // Initial moment, three gates and the measurement.
//! assert_eq!(circuit.op_flow().len(), 5);
//!
//! let result = circuit.run()?;
//! assert_eq!(result.get_outcome(0), Some(2));
//! assert_eq!(result.get_outcome(1), Some(1));
//! # Ok::<(), QuditError>(())
//! ```

pub mod circuits;
pub mod core;
pub mod gates;
pub mod simulation;
pub mod validation;

// Re-export the most common types for easier top-level use
pub use circuits::{CircuitConfig, Moment, QuantumCircuit};
pub use crate::core::{QuditError, QuditResult, RegisterModel, RegisterSpec, StateVector};
pub use gates::{ActingOn, Gate, Matrix, QuditGate};
pub use simulation::{ExecutionOptions, ExecutionResult, OperatorFlow};
pub use validation::{check_normalization, check_unitary, validate_state};
