// src/validation/mod.rs

//! Numerical checks applied to states and operators during execution.

use crate::core::{DEFAULT_TOLERANCE, QuditError, QuditResult, StateVector};
use crate::gates::Matrix;

/// Checks if the state vector is normalized (sum of squared amplitudes ≈ 1.0).
///
/// # Arguments
/// * `state` - The `StateVector` to check.
/// * `tolerance` - Allowed deviation from 1.0. Defaults to `DEFAULT_TOLERANCE`.
///
/// # Returns
/// * `Ok(())` if normalized within tolerance.
/// * `Err(QuditError::SimulationError)` if normalization fails.
pub fn check_normalization(state: &StateVector, tolerance: Option<f64>) -> QuditResult<()> {
    let effective_tolerance = tolerance.unwrap_or(DEFAULT_TOLERANCE);
    let norm_sq = state.norm_sqr();
    if (norm_sq - 1.0).abs() > effective_tolerance {
        Err(QuditError::SimulationError {
            message: format!(
                "State vector normalization failed. Sum(|c_i|^2) = {} (Deviation > {})",
                norm_sq, effective_tolerance
            ),
        })
    } else {
        Ok(())
    }
}

/// Checks that `matrix` is unitary (`U · U† ≈ I`).
///
/// # Returns
/// * `Ok(())` if unitary within tolerance.
/// * `Err(QuditError::SimulationError)` otherwise.
pub fn check_unitary(matrix: &Matrix, tolerance: Option<f64>) -> QuditResult<()> {
    let effective_tolerance = tolerance.unwrap_or(DEFAULT_TOLERANCE);
    if matrix.is_unitary(effective_tolerance) {
        Ok(())
    } else {
        Err(QuditError::SimulationError {
            message: format!(
                "{}x{} operator is not unitary within {}",
                matrix.dim(),
                matrix.dim(),
                effective_tolerance
            ),
        })
    }
}

/// Basic validation of a state of `expected_dim` basis states: the size
/// matches and the state is normalized.
pub fn validate_state(
    state: &StateVector,
    expected_dim: usize,
    norm_tolerance: Option<f64>,
) -> QuditResult<()> {
    if state.dim() != expected_dim {
        return Err(QuditError::SimulationError {
            message: format!(
                "State has {} amplitudes, register needs {}",
                state.dim(),
                expected_dim
            ),
        });
    }
    check_normalization(state, norm_tolerance)
}
