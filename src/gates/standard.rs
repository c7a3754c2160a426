// src/gates/standard.rs

//! The concrete gate kinds. Each one computes its unitary once, from its
//! dimension parameters only, and never changes afterwards.

use super::matrix::{Matrix, roots_of_unity};
use super::{ActingOn, QuditGate};
use crate::core::{QuditError, QuditResult};
use num_complex::Complex64;
use num_traits::{One, Zero};

fn check_dims(gate: &'static str, dims: usize) -> QuditResult<()> {
    if dims < 2 {
        return Err(QuditError::InvalidDimension { gate, dims });
    }
    Ok(())
}

/// The `d × d` cyclic shift `|k> → |k + 1 mod d>`.
///
/// Built as the circulant matrix of the basis column with a single 1 at
/// position 1, so column `k` is `e_{k+1 mod d}`.
fn shift_matrix(dims: usize) -> Matrix {
    let mut column = vec![Complex64::zero(); dims];
    column[1 % dims] = Complex64::one();
    Matrix::circulant(&column)
}

/// Generalised Hadamard (quantum Fourier transform) on one qudit.
///
/// The unitary is `H[j][k] = ω^(jk) / √d` with `ω = e^(2πi/d)`: a uniform
/// first row and column, and the remaining `(d-1) × (d-1)` block filled from
/// the `d`-th roots of unity. For `d = 2` this is the usual Hadamard.
///
/// All `d` roots are used, never `d - 1`. Circuits ported from code that
/// built the matrix from the roots of `z^(d-1) - 1` will see different
/// (now unitary) matrices for `d > 2`.
#[derive(Debug, Clone, PartialEq)]
pub struct HGate {
    qreg: usize,
    dims: usize,
    unitary: Matrix,
}

impl HGate {
    /// # Errors
    /// `QuditError::InvalidDimension` if `dims < 2`.
    pub fn new(qreg: usize, dims: usize) -> QuditResult<Self> {
        check_dims("h", dims)?;
        let roots = roots_of_unity(dims);
        let rows = (0..dims)
            .map(|j| (0..dims).map(|k| roots[(j * k) % dims]).collect())
            .collect();
        let unitary = Matrix::from_rows(rows)
            .ok_or_else(|| QuditError::SimulationError {
                message: format!("Hadamard construction for d={} is not square", dims),
            })?
            .scale(Complex64::new(1.0 / (dims as f64).sqrt(), 0.0));
        Ok(Self { qreg, dims, unitary })
    }

    /// Dimension the gate acts on.
    pub fn dims(&self) -> usize {
        self.dims
    }
}

impl QuditGate for HGate {
    fn name(&self) -> &'static str {
        "h"
    }
    fn is_controlled(&self) -> bool {
        false
    }
    fn is_single_qudit(&self) -> bool {
        true
    }
    fn unitary(&self) -> &Matrix {
        &self.unitary
    }
    fn acting_on(&self) -> ActingOn {
        ActingOn::Single(self.qreg)
    }
}

/// Generalised Pauli-X: the "increment modulo d" shift.
#[derive(Debug, Clone, PartialEq)]
pub struct XGate {
    qreg: usize,
    dims: usize,
    unitary: Matrix,
}

impl XGate {
    /// # Errors
    /// `QuditError::InvalidDimension` if `dims < 2`.
    pub fn new(qreg: usize, dims: usize) -> QuditResult<Self> {
        check_dims("x", dims)?;
        Ok(Self { qreg, dims, unitary: shift_matrix(dims) })
    }

    /// Dimension the gate acts on.
    pub fn dims(&self) -> usize {
        self.dims
    }
}

impl QuditGate for XGate {
    fn name(&self) -> &'static str {
        "x"
    }
    fn is_controlled(&self) -> bool {
        false
    }
    fn is_single_qudit(&self) -> bool {
        true
    }
    fn unitary(&self) -> &Matrix {
        &self.unitary
    }
    fn acting_on(&self) -> ActingOn {
        ActingOn::Single(self.qreg)
    }
}

/// Generalised Pauli-Z, the clock gate `diag(1, ω, ω², ...)`.
#[derive(Debug, Clone, PartialEq)]
pub struct ZGate {
    qreg: usize,
    dims: usize,
    unitary: Matrix,
}

impl ZGate {
    /// # Errors
    /// `QuditError::InvalidDimension` if `dims < 2`.
    pub fn new(qreg: usize, dims: usize) -> QuditResult<Self> {
        check_dims("z", dims)?;
        Ok(Self { qreg, dims, unitary: Matrix::diagonal(&roots_of_unity(dims)) })
    }

    /// Dimension the gate acts on.
    pub fn dims(&self) -> usize {
        self.dims
    }
}

impl QuditGate for ZGate {
    fn name(&self) -> &'static str {
        "z"
    }
    fn is_controlled(&self) -> bool {
        false
    }
    fn is_single_qudit(&self) -> bool {
        true
    }
    fn unitary(&self) -> &Matrix {
        &self.unitary
    }
    fn acting_on(&self) -> ActingOn {
        ActingOn::Single(self.qreg)
    }
}

/// Identity on one register, used to pad moments.
#[derive(Debug, Clone, PartialEq)]
pub struct IGate {
    qreg: usize,
    dims: usize,
    unitary: Matrix,
}

impl IGate {
    pub fn new(qreg: usize, dims: usize) -> Self {
        Self { qreg, dims, unitary: Matrix::identity(dims) }
    }

    /// Dimension the gate acts on.
    pub fn dims(&self) -> usize {
        self.dims
    }
}

impl QuditGate for IGate {
    fn name(&self) -> &'static str {
        "id"
    }
    fn is_controlled(&self) -> bool {
        false
    }
    fn is_single_qudit(&self) -> bool {
        true
    }
    fn unitary(&self) -> &Matrix {
        &self.unitary
    }
    fn acting_on(&self) -> ActingOn {
        ActingOn::Single(self.qreg)
    }
}

/// Controlled shift over an inclusive register range.
///
/// The first register of the range is the control and the last one the
/// target; registers in between are untouched. When the control sits in its
/// top level `|d_c - 1>` the target is shifted by `plus` (mod `d_t`).
/// On two qubits with `plus = 1` this is CNOT.
#[derive(Debug, Clone, PartialEq)]
pub struct CxGate {
    start: usize,
    end: usize,
    dims: Vec<usize>,
    plus: usize,
    unitary: Matrix,
}

impl CxGate {
    /// `dims` holds the dimension of every register in `[start, end]`.
    ///
    /// # Errors
    /// * `QuditError::InvalidPlacement` if `start >= end`.
    /// * `QuditError::InvalidDimension` if any dimension is below two.
    /// * `QuditError::SimulationError` if `dims` does not cover the range.
    pub fn new(start: usize, end: usize, dims: Vec<usize>, plus: usize) -> QuditResult<Self> {
        if start >= end {
            return Err(QuditError::InvalidPlacement { start, end });
        }
        if dims.len() != end - start + 1 {
            return Err(QuditError::SimulationError {
                message: format!(
                    "cx over [{}, {}] needs {} dimensions, got {}",
                    start,
                    end,
                    end - start + 1,
                    dims.len()
                ),
            });
        }
        for d in &dims {
            check_dims("cx", *d)?;
        }

        let size = dims.iter().try_fold(1usize, |acc, d| acc.checked_mul(*d)).ok_or_else(|| {
            QuditError::StateSpaceOverflow { dims: dims.clone() }
        })?;
        let control_top = dims[0] - 1;
        let target_dim = dims[dims.len() - 1];
        let shift = plus % target_dim;

        let mut unitary = Matrix::zeros(size);
        let mut levels = vec![0usize; dims.len()];
        for col in 0..size {
            // Decode `col` into per-register levels, register `start` first.
            let mut rem = col;
            for (slot, d) in levels.iter_mut().zip(&dims).rev() {
                *slot = rem % d;
                rem /= d;
            }
            let mut out = levels.clone();
            if levels[0] == control_top {
                let last = out.len() - 1;
                out[last] = (out[last] + shift) % target_dim;
            }
            let row = out.iter().zip(&dims).fold(0usize, |acc, (l, d)| acc * d + l);
            unitary.set(row, col, Complex64::one());
        }

        Ok(Self { start, end, dims, plus, unitary })
    }

    /// Dimensions of the registers in the range.
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// Shift applied to the target.
    pub fn plus(&self) -> usize {
        self.plus
    }
}

impl QuditGate for CxGate {
    fn name(&self) -> &'static str {
        "cx"
    }
    fn is_controlled(&self) -> bool {
        true
    }
    fn is_single_qudit(&self) -> bool {
        false
    }
    fn unitary(&self) -> &Matrix {
        &self.unitary
    }
    fn acting_on(&self) -> ActingOn {
        ActingOn::Range { start: self.start, end: self.end }
    }
}

/// Prepares register `qreg` in the basis state `|state>`.
///
/// Execution starts from `|0...0>`, so the preparation is the shift raised
/// to the `state`-th power.
#[derive(Debug, Clone, PartialEq)]
pub struct InitState {
    qreg: usize,
    dim: usize,
    state: usize,
    unitary: Matrix,
}

impl InitState {
    /// # Errors
    /// * `QuditError::InvalidDimension` if `dim < 2`.
    /// * `QuditError::InvalidInitialState` if `state >= dim`.
    pub fn new(qreg: usize, dim: usize, state: usize) -> QuditResult<Self> {
        check_dims("init", dim)?;
        if state >= dim {
            return Err(QuditError::InvalidInitialState { qreg, state, dim });
        }
        Ok(Self { qreg, dim, state, unitary: shift_matrix(dim).pow(state) })
    }

    /// The prepared basis level.
    pub fn state(&self) -> usize {
        self.state
    }

    /// Dimension of the prepared register.
    pub fn dim(&self) -> usize {
        self.dim
    }
}

impl QuditGate for InitState {
    fn name(&self) -> &'static str {
        "init"
    }
    fn is_controlled(&self) -> bool {
        false
    }
    fn is_single_qudit(&self) -> bool {
        true
    }
    fn unitary(&self) -> &Matrix {
        &self.unitary
    }
    fn acting_on(&self) -> ActingOn {
        ActingOn::Single(self.qreg)
    }
}

/// Projective measurement of one register in the computational basis.
///
/// Measurement is not unitary; `unitary()` is the identity of the register
/// dimension and the execution engine samples an outcome instead.
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    qreg: usize,
    dims: usize,
    unitary: Matrix,
}

impl Measurement {
    pub fn new(qreg: usize, dims: usize) -> Self {
        Self { qreg, dims, unitary: Matrix::identity(dims) }
    }

    /// Dimension of the measured register.
    pub fn dims(&self) -> usize {
        self.dims
    }
}

impl QuditGate for Measurement {
    fn name(&self) -> &'static str {
        "measure"
    }
    fn is_controlled(&self) -> bool {
        false
    }
    fn is_single_qudit(&self) -> bool {
        true
    }
    fn unitary(&self) -> &Matrix {
        &self.unitary
    }
    fn acting_on(&self) -> ActingOn {
        ActingOn::Single(self.qreg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_1_SQRT_2;

    const TOL: f64 = 1e-9;

    fn c(re: f64) -> Complex64 {
        Complex64::new(re, 0.0)
    }

    #[test]
    fn x_for_qubit_is_bit_flip() -> Result<(), QuditError> {
        let x = XGate::new(0, 2)?;
        let expected = Matrix::from_rows(vec![vec![c(0.0), c(1.0)], vec![c(1.0), c(0.0)]]).unwrap();
        assert!(x.unitary().approx_eq(&expected, TOL));
        Ok(())
    }

    #[test]
    fn x_for_qutrit_increments_levels() -> Result<(), QuditError> {
        let x = XGate::new(0, 3)?;
        // |0> -> |1>, |1> -> |2>, |2> -> |0>
        assert_eq!(x.unitary().get(1, 0), c(1.0));
        assert_eq!(x.unitary().get(2, 1), c(1.0));
        assert_eq!(x.unitary().get(0, 2), c(1.0));
        assert!(x.unitary().pow(3).approx_eq(&Matrix::identity(3), TOL));
        Ok(())
    }

    #[test]
    fn h_for_qubit_is_standard_hadamard() -> Result<(), QuditError> {
        let h = HGate::new(0, 2)?;
        let s = FRAC_1_SQRT_2;
        let expected = Matrix::from_rows(vec![vec![c(s), c(s)], vec![c(s), c(-s)]]).unwrap();
        assert!(h.unitary().approx_eq(&expected, TOL));
        Ok(())
    }

    #[test]
    fn h_is_unitary_beyond_qubits() -> Result<(), QuditError> {
        for d in 3..9 {
            let h = HGate::new(0, d)?;
            assert_eq!(h.unitary().dim(), d);
            assert!(h.unitary().is_unitary(TOL), "H({}) is not unitary", d);
            let uniform = 1.0 / (d as f64).sqrt();
            for k in 0..d {
                assert!((h.unitary().get(0, k) - c(uniform)).norm() < TOL);
                assert!((h.unitary().get(k, 0) - c(uniform)).norm() < TOL);
            }
        }
        Ok(())
    }

    #[test]
    fn z_is_clock_phase() -> Result<(), QuditError> {
        let z = ZGate::new(0, 2)?;
        let expected = Matrix::diagonal(&[c(1.0), c(-1.0)]);
        assert!(z.unitary().approx_eq(&expected, TOL));
        assert!(ZGate::new(0, 5)?.unitary().pow(5).approx_eq(&Matrix::identity(5), TOL));
        Ok(())
    }

    #[test]
    fn degenerate_dimensions_are_rejected() {
        for d in [0, 1] {
            assert!(matches!(HGate::new(0, d), Err(QuditError::InvalidDimension { gate: "h", .. })));
            assert!(matches!(XGate::new(0, d), Err(QuditError::InvalidDimension { gate: "x", .. })));
            assert!(matches!(ZGate::new(0, d), Err(QuditError::InvalidDimension { gate: "z", .. })));
        }
    }

    #[test]
    fn cx_on_two_qubits_is_cnot() -> Result<(), QuditError> {
        let cx = CxGate::new(0, 1, vec![2, 2], 1)?;
        let rows = vec![
            vec![c(1.0), c(0.0), c(0.0), c(0.0)],
            vec![c(0.0), c(1.0), c(0.0), c(0.0)],
            vec![c(0.0), c(0.0), c(0.0), c(1.0)],
            vec![c(0.0), c(0.0), c(1.0), c(0.0)],
        ];
        assert!(cx.unitary().approx_eq(&Matrix::from_rows(rows).unwrap(), TOL));
        assert!(cx.is_controlled());
        assert!(!cx.is_single_qudit());
        assert_eq!(cx.acting_on(), ActingOn::Range { start: 0, end: 1 });
        Ok(())
    }

    #[test]
    fn cx_leaves_spectators_alone() -> Result<(), QuditError> {
        let cx = CxGate::new(0, 2, vec![3, 2, 3], 2)?;
        assert_eq!(cx.unitary().dim(), 18);
        assert!(cx.unitary().is_unitary(TOL));
        // |2, 1, 0> -> |2, 1, 2>: col 2*6 + 1*3 + 0 = 15, row 17.
        assert_eq!(cx.unitary().get(17, 15), c(1.0));
        // Control below its top level: identity.
        assert_eq!(cx.unitary().get(4, 4), c(1.0));
        Ok(())
    }

    #[test]
    fn cx_reduces_large_shifts_modulo_target() -> Result<(), QuditError> {
        for plus in [usize::MAX, usize::MAX - 1, 7] {
            let big = CxGate::new(0, 1, vec![2, 3], plus)?;
            let reduced = CxGate::new(0, 1, vec![2, 3], plus % 3)?;
            assert!(big.unitary().approx_eq(reduced.unitary(), TOL), "plus = {}", plus);
            assert_eq!(big.plus(), plus);
        }
        Ok(())
    }

    #[test]
    fn cx_rejects_bad_ranges() {
        assert!(matches!(
            CxGate::new(2, 2, vec![2], 1),
            Err(QuditError::InvalidPlacement { start: 2, end: 2 })
        ));
        assert!(matches!(
            CxGate::new(0, 1, vec![2, 2, 2], 1),
            Err(QuditError::SimulationError { .. })
        ));
    }

    #[test]
    fn init_state_prepares_level() -> Result<(), QuditError> {
        let init = InitState::new(0, 4, 3)?;
        assert_eq!(init.unitary().get(3, 0), c(1.0));
        assert!(matches!(
            InitState::new(1, 3, 3),
            Err(QuditError::InvalidInitialState { qreg: 1, state: 3, dim: 3 })
        ));
        Ok(())
    }
}
