// src/core/state.rs

use num_complex::Complex64;
use num_traits::{One, Zero};
use std::fmt;

/// Amplitudes of the joint state of a mixed-radix register.
///
/// Basis states are ordered with register 0 as the most significant digit,
/// so for dims `[2, 3]` the index of `|a, b>` is `a * 3 + b`.
#[derive(Debug, Clone, PartialEq)] // Avoid Eq for floating-point complex numbers
pub struct StateVector {
    amplitudes: Vec<Complex64>,
}

impl StateVector {
    /// Wraps an amplitude vector as is. Validation happens during execution.
    pub fn new(amplitudes: Vec<Complex64>) -> Self {
        Self { amplitudes }
    }

    /// The computational basis state `|levels[0], levels[1], ...>` over `dims`.
    ///
    /// Returns `None` if the lengths differ or a level is out of range.
    pub fn basis(dims: &[usize], levels: &[usize]) -> Option<Self> {
        if dims.len() != levels.len() || levels.iter().zip(dims).any(|(l, d)| l >= d) {
            return None;
        }
        let size = dims.iter().try_fold(1usize, |acc, d| acc.checked_mul(*d))?;
        let index = levels.iter().zip(dims).fold(0usize, |acc, (l, d)| acc * d + l);

        let mut amplitudes = vec![Complex64::zero(); size];
        amplitudes[index] = Complex64::one();
        Some(Self { amplitudes })
    }

    /// Read-only access to the amplitudes.
    pub fn vector(&self) -> &[Complex64] {
        &self.amplitudes
    }

    pub(crate) fn vector_mut(&mut self) -> &mut [Complex64] {
        &mut self.amplitudes
    }

    /// Number of basis states.
    pub fn dim(&self) -> usize {
        self.amplitudes.len()
    }

    /// Born probability of basis state `index`, zero if out of range.
    pub fn probability(&self, index: usize) -> f64 {
        self.amplitudes.get(index).map_or(0.0, |c| c.norm_sqr())
    }

    /// Sum of squared amplitude magnitudes.
    pub fn norm_sqr(&self) -> f64 {
        self.amplitudes.iter().map(|c| c.norm_sqr()).sum()
    }
}

impl fmt::Display for StateVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "State[")?;
        for (i, c) in self.amplitudes.iter().enumerate() {
            write!(f, "{}{:.4}", if i > 0 { ", " } else { "" }, c)?;
        }
        write!(f, "]")
    }
}
