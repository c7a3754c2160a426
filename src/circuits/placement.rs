// src/circuits/placement.rs

//! Placement checks and moment assembly.

use super::Moment;
use crate::core::{QuditError, QuditResult, RegisterModel};
use crate::gates::{Gate, IGate, QuditGate};
use std::sync::Arc;

/// Checks a placement on register `qreg` and resolves the gate dimension.
///
/// Returns `dims` if given, otherwise the register's native dimension. Has no
/// side effects and must run before the gate is built.
///
/// # Errors
/// * `QuditError::RegisterOutOfBounds` if `qreg >= reg_length`.
/// * `QuditError::DimensionMismatch` if `dims` exceeds the native dimension.
pub fn validate_placement(model: &RegisterModel, qreg: usize, dims: Option<usize>) -> QuditResult<usize> {
    let native = model.dim(qreg).ok_or(QuditError::RegisterOutOfBounds {
        qreg,
        reg_length: model.reg_length(),
    })?;
    match dims {
        Some(requested) if requested > native => {
            Err(QuditError::DimensionMismatch { qreg, requested, native })
        }
        Some(requested) => Ok(requested),
        None => Ok(native),
    }
}

/// Builds a full-width moment around an already validated gate.
///
/// Registers covered by the gate's placement share the one gate value; every
/// other register gets a fresh identity of its native dimension.
pub fn assemble_moment(model: &RegisterModel, gate: Gate) -> Moment {
    let placement = gate.acting_on();
    let gate = Arc::new(gate);
    let slots = model
        .reg_dims()
        .iter()
        .enumerate()
        .map(|(qreg, dim)| {
            if placement.contains(qreg) {
                Arc::clone(&gate)
            } else {
                Arc::new(Gate::I(IGate::new(qreg, *dim)))
            }
        })
        .collect();
    Moment::new(slots)
}

/// Builds a moment with one independently constructed gate per register.
pub fn full_width_moment<F>(model: &RegisterModel, mut make: F) -> QuditResult<Moment>
where
    F: FnMut(usize, usize) -> QuditResult<Gate>,
{
    let slots = model
        .reg_dims()
        .iter()
        .enumerate()
        .map(|(qreg, dim)| make(qreg, *dim).map(Arc::new))
        .collect::<QuditResult<Vec<_>>>()?;
    Ok(Moment::new(slots))
}
