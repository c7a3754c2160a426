// src/core/register.rs

use super::error::{QuditError, QuditResult};
use std::fmt;

/// How the qudits of a circuit are declared.
///
/// `(3, 3)` converts to `Uniform { length: 3, dim: 3 }`, three qutrits.
/// `vec![2, 2, 3, 3]` converts to `Explicit`, two qubits followed by two
/// qutrits.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RegisterSpec {
    /// `length` registers sharing the same dimension.
    Uniform {
        /// Number of registers.
        length: usize,
        /// Dimension of every register.
        dim: usize,
    },
    /// One dimension per register, in register order.
    Explicit(Vec<usize>),
}

impl From<(usize, usize)> for RegisterSpec {
    fn from((length, dim): (usize, usize)) -> Self {
        RegisterSpec::Uniform { length, dim }
    }
}

impl From<Vec<usize>> for RegisterSpec {
    fn from(dims: Vec<usize>) -> Self {
        RegisterSpec::Explicit(dims)
    }
}

impl From<&[usize]> for RegisterSpec {
    fn from(dims: &[usize]) -> Self {
        RegisterSpec::Explicit(dims.to_vec())
    }
}

impl<const N: usize> From<[usize; N]> for RegisterSpec {
    fn from(dims: [usize; N]) -> Self {
        RegisterSpec::Explicit(dims.to_vec())
    }
}

/// The resolved register layout of a circuit: one native dimension per qudit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RegisterModel {
    reg_dims: Vec<usize>,
}

impl RegisterModel {
    /// Resolves a specification into per-register dimensions.
    ///
    /// # Errors
    /// `QuditError::InvalidRegisterSpec` if the specification has no
    /// registers or any register has fewer than two levels.
    pub fn resolve(spec: &RegisterSpec) -> QuditResult<Self> {
        let reg_dims = match spec {
            RegisterSpec::Uniform { length, dim } => vec![*dim; *length],
            RegisterSpec::Explicit(dims) => dims.clone(),
        };

        if reg_dims.is_empty() {
            return Err(QuditError::InvalidRegisterSpec {
                message: "a circuit needs at least one register".to_string(),
            });
        }
        if let Some((qreg, dim)) = reg_dims.iter().enumerate().find(|(_, d)| **d < 2) {
            return Err(QuditError::InvalidRegisterSpec {
                message: format!("register {} has dimension {}, expected at least 2", qreg, dim),
            });
        }

        Ok(Self { reg_dims })
    }

    /// Number of registers.
    pub fn reg_length(&self) -> usize {
        self.reg_dims.len()
    }

    /// Native dimension of each register.
    pub fn reg_dims(&self) -> &[usize] {
        &self.reg_dims
    }

    /// Native dimension of a single register, `None` if out of bounds.
    pub fn dim(&self, qreg: usize) -> Option<usize> {
        self.reg_dims.get(qreg).copied()
    }

    /// Size of the joint state space, the product of all register dimensions.
    ///
    /// # Errors
    /// `QuditError::StateSpaceOverflow` if the product does not fit in `usize`.
    pub fn state_space_dim(&self) -> QuditResult<usize> {
        self.reg_dims
            .iter()
            .try_fold(1usize, |acc, d| acc.checked_mul(*d))
            .ok_or_else(|| QuditError::StateSpaceOverflow { dims: self.reg_dims.clone() })
    }
}

impl fmt::Display for RegisterModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Register[")?;
        for (i, d) in self.reg_dims.iter().enumerate() {
            write!(f, "{}q{}:d{}", if i > 0 { ", " } else { "" }, i, d)?;
        }
        write!(f, "]")
    }
}
