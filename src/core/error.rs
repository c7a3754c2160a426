//! Error handling logic

use thiserror::Error;

/// Errors raised while building or executing a qudit circuit.
///
/// Every variant is raised synchronously by the call that caused it. None of
/// them describe a transient condition: they mark a caller mistake that has
/// to be fixed before the call is made again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum QuditError {
    /// The register specification does not resolve to at least one register
    /// of dimension two or more.
    #[error("Invalid register specification: {message}")]
    InvalidRegisterSpec {
        /// What was wrong with the specification.
        message: String,
    },

    /// A gate was placed on a register index outside `[0, reg_length)`.
    #[error("Illegal placement of gate: register {qreg} is out of circuit bounds (length {reg_length})")]
    RegisterOutOfBounds {
        /// The requested register index.
        qreg: usize,
        /// Number of registers in the circuit.
        reg_length: usize,
    },

    /// The requested gate dimension exceeds the register's native dimension.
    #[error("Gate dimension {requested} is greater than the dimension {native} of register {qreg}")]
    DimensionMismatch {
        /// The register the gate was placed on.
        qreg: usize,
        /// The dimension asked for.
        requested: usize,
        /// The register's own dimension.
        native: usize,
    },

    /// A gate was requested for a dimension below two.
    #[error("Gate '{gate}' cannot act on dimension {dims}; qudits need at least 2 levels")]
    InvalidDimension {
        /// Name of the gate kind.
        gate: &'static str,
        /// The offending dimension.
        dims: usize,
    },

    /// The operation exists in the API but has no implementation yet.
    #[error("Not implemented: {operation}")]
    Unimplemented {
        /// The operation that was called.
        operation: &'static str,
    },

    /// An initial state lies outside its register's levels, or more initial
    /// states were given than there are registers.
    #[error("Invalid initial state |{state}> for register {qreg} of dimension {dim}")]
    InvalidInitialState {
        /// The register index.
        qreg: usize,
        /// The requested basis level.
        state: usize,
        /// Dimension of the register, zero if the register does not exist.
        dim: usize,
    },

    /// A ranged placement whose start does not precede its end.
    #[error("Invalid ranged placement [{start}, {end}]: start must be smaller than end")]
    InvalidPlacement {
        /// First register of the range.
        start: usize,
        /// Last register of the range (inclusive).
        end: usize,
    },

    /// A moment does not cover every register exactly once.
    #[error("Malformed moment: expected {expected} slots, got {got}")]
    MalformedMoment {
        /// Number of registers in the flow.
        expected: usize,
        /// Number of slots in the moment.
        got: usize,
    },

    /// The joint state space of the register does not fit in memory indices.
    #[error("State space of register dims {dims:?} overflows usize")]
    StateSpaceOverflow {
        /// The register dimensions.
        dims: Vec<usize>,
    },

    /// Inconsistency detected while executing the operator flow.
    #[error("Simulation process error: {message}")]
    SimulationError {
        /// Description of the failure.
        message: String,
    },
}

/// Result type for circuit and gate operations.
pub type QuditResult<T> = Result<T, QuditError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_offending_values() {
        let err = QuditError::DimensionMismatch { qreg: 1, requested: 5, native: 3 };
        assert_eq!(
            err.to_string(),
            "Gate dimension 5 is greater than the dimension 3 of register 1"
        );

        let err = QuditError::RegisterOutOfBounds { qreg: 4, reg_length: 4 };
        assert!(err.to_string().contains("register 4"));
    }
}
