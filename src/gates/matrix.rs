// src/gates/matrix.rs

//! Small dense complex matrices backing gate unitaries.

use crate::core::TAU;
use num_complex::Complex64;
use num_traits::{One, Zero};
use std::fmt;

/// A square matrix of complex amplitudes stored row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    dim: usize,
    data: Vec<Complex64>,
}

impl Matrix {
    /// The `dim × dim` zero matrix.
    pub fn zeros(dim: usize) -> Self {
        Self { dim, data: vec![Complex64::zero(); dim * dim] }
    }

    /// The `dim × dim` identity.
    pub fn identity(dim: usize) -> Self {
        let mut m = Self::zeros(dim);
        for i in 0..dim {
            m.data[i * dim + i] = Complex64::one();
        }
        m
    }

    /// Builds a matrix from rows. Returns `None` unless every row has one
    /// entry per row.
    pub fn from_rows(rows: Vec<Vec<Complex64>>) -> Option<Self> {
        let dim = rows.len();
        if rows.iter().any(|r| r.len() != dim) {
            return None;
        }
        Some(Self { dim, data: rows.into_iter().flatten().collect() })
    }

    /// The circulant matrix whose first column is `column`; column `k` is
    /// `column` rotated down by `k`, i.e. `C[i][k] = column[(i - k) mod n]`.
    pub fn circulant(column: &[Complex64]) -> Self {
        let n = column.len();
        let mut m = Self::zeros(n);
        for i in 0..n {
            for k in 0..n {
                m.data[i * n + k] = column[(i + n - k) % n];
            }
        }
        m
    }

    /// A diagonal matrix.
    pub fn diagonal(entries: &[Complex64]) -> Self {
        let mut m = Self::zeros(entries.len());
        for (i, e) in entries.iter().enumerate() {
            m.data[i * m.dim + i] = *e;
        }
        m
    }

    /// Number of rows (and columns).
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Entry at `(row, col)`. Panics on out-of-range indices like slice
    /// indexing does.
    pub fn get(&self, row: usize, col: usize) -> Complex64 {
        self.data[row * self.dim + col]
    }

    pub(crate) fn set(&mut self, row: usize, col: usize, value: Complex64) {
        self.data[row * self.dim + col] = value;
    }

    /// Row `row` as a slice.
    pub fn row(&self, row: usize) -> &[Complex64] {
        &self.data[row * self.dim..(row + 1) * self.dim]
    }

    /// Every entry multiplied by `factor`.
    pub fn scale(mut self, factor: Complex64) -> Self {
        for c in &mut self.data {
            *c *= factor;
        }
        self
    }

    /// Matrix product `self · rhs`. Returns `None` on a size mismatch.
    pub fn mul(&self, rhs: &Matrix) -> Option<Matrix> {
        if self.dim != rhs.dim {
            return None;
        }
        let n = self.dim;
        let mut out = Self::zeros(n);
        for i in 0..n {
            for k in 0..n {
                let a = self.data[i * n + k];
                if a.is_zero() {
                    continue;
                }
                for j in 0..n {
                    out.data[i * n + j] += a * rhs.data[k * n + j];
                }
            }
        }
        Some(out)
    }

    /// `self` raised to a non-negative integer power.
    pub fn pow(&self, exp: usize) -> Matrix {
        let mut acc = Self::identity(self.dim);
        for _ in 0..exp {
            // Sizes always agree here.
            if let Some(next) = acc.mul(self) {
                acc = next;
            }
        }
        acc
    }

    /// Tensor product `self ⊗ rhs`.
    pub fn kron(&self, rhs: &Matrix) -> Matrix {
        let (a, b) = (self.dim, rhs.dim);
        let n = a * b;
        let mut out = Self::zeros(n);
        for i in 0..a {
            for j in 0..a {
                let s = self.data[i * a + j];
                if s.is_zero() {
                    continue;
                }
                for k in 0..b {
                    for l in 0..b {
                        out.data[(i * b + k) * n + (j * b + l)] = s * rhs.data[k * b + l];
                    }
                }
            }
        }
        out
    }

    /// Conjugate transpose.
    pub fn adjoint(&self) -> Matrix {
        let n = self.dim;
        let mut out = Self::zeros(n);
        for i in 0..n {
            for j in 0..n {
                out.data[j * n + i] = self.data[i * n + j].conj();
            }
        }
        out
    }

    /// Entry-wise comparison within an absolute tolerance.
    pub fn approx_eq(&self, other: &Matrix, tolerance: f64) -> bool {
        self.dim == other.dim
            && self.data.iter().zip(&other.data).all(|(a, b)| (a - b).norm() <= tolerance)
    }

    /// `U · U† ≈ I` within `tolerance`.
    pub fn is_unitary(&self, tolerance: f64) -> bool {
        self.mul(&self.adjoint())
            .is_some_and(|p| p.approx_eq(&Self::identity(self.dim), tolerance))
    }

    /// Embeds this matrix into a `native_dim` space: it acts on levels
    /// `0..self.dim()` and leaves the levels above untouched.
    ///
    /// Returns `None` if `native_dim` is smaller than the matrix.
    pub fn embed(&self, native_dim: usize) -> Option<Matrix> {
        if native_dim < self.dim {
            return None;
        }
        if native_dim == self.dim {
            return Some(self.clone());
        }
        let mut out = Self::identity(native_dim);
        for i in 0..self.dim {
            for j in 0..self.dim {
                out.data[i * native_dim + j] = self.data[i * self.dim + j];
            }
        }
        Some(out)
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.dim {
            write!(f, "[")?;
            for (j, c) in self.row(i).iter().enumerate() {
                write!(f, "{}{:.4}", if j > 0 { ", " } else { "" }, c)?;
            }
            writeln!(f, "]")?;
        }
        Ok(())
    }
}

/// The `n` complex `n`-th roots of unity `e^(2πi k/n)` for `k = 0..n`.
pub fn roots_of_unity(n: usize) -> Vec<Complex64> {
    (0..n)
        .map(|k| Complex64::from_polar(1.0, TAU * k as f64 / n as f64))
        .collect()
}
