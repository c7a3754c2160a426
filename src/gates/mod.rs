// src/gates/mod.rs

//! Qudit gates and the algebra behind their unitaries.
//!
//! Every gate kind implements [`QuditGate`], a four-operation contract
//! (`is_controlled`, `is_single_qudit`, `unitary`, `acting_on`). The closed
//! set of kinds a circuit can hold is the [`Gate`] enum, which dispatches the
//! contract to the concrete type it wraps.

pub mod matrix;
pub mod standard;

pub use matrix::{Matrix, roots_of_unity};
pub use standard::{CxGate, HGate, IGate, InitState, Measurement, XGate, ZGate};

use std::fmt;

/// Where a gate sits on the register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActingOn {
    /// A single register index.
    Single(usize),
    /// An inclusive range of register indices covered by one joint operator.
    Range {
        /// First register of the range.
        start: usize,
        /// Last register of the range, inclusive.
        end: usize,
    },
}

impl ActingOn {
    /// First register covered.
    pub fn start(&self) -> usize {
        match self {
            ActingOn::Single(q) => *q,
            ActingOn::Range { start, .. } => *start,
        }
    }

    /// Last register covered (inclusive).
    pub fn end(&self) -> usize {
        match self {
            ActingOn::Single(q) => *q,
            ActingOn::Range { end, .. } => *end,
        }
    }

    /// Whether `qreg` lies inside the placement.
    pub fn contains(&self, qreg: usize) -> bool {
        (self.start()..=self.end()).contains(&qreg)
    }

    /// Number of registers covered.
    pub fn len(&self) -> usize {
        self.end().saturating_sub(self.start()) + 1
    }

    /// Never empty; kept for symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl fmt::Display for ActingOn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActingOn::Single(q) => write!(f, "q{}", q),
            ActingOn::Range { start, end } => write!(f, "q{}..q{}", start, end),
        }
    }
}

/// The capability set every gate kind provides.
pub trait QuditGate {
    /// Short lowercase name of the kind, e.g. `"h"`.
    fn name(&self) -> &'static str;
    /// Whether the gate is conditioned on a control register.
    fn is_controlled(&self) -> bool;
    /// Whether the gate acts on exactly one register.
    fn is_single_qudit(&self) -> bool;
    /// The gate's unitary, square with side equal to the product of the
    /// dimensions it acts on.
    fn unitary(&self) -> &Matrix;
    /// The register index or range the gate is placed on.
    fn acting_on(&self) -> ActingOn;
}

/// One operator in a moment.
#[derive(Debug, Clone, PartialEq)]
pub enum Gate {
    /// Generalised Hadamard.
    H(HGate),
    /// Shift.
    X(XGate),
    /// Clock.
    Z(ZGate),
    /// Identity padding.
    I(IGate),
    /// Controlled shift over a range.
    Cx(CxGate),
    /// Basis-state preparation.
    Init(InitState),
    /// Computational-basis measurement.
    Measure(Measurement),
}

impl Gate {
    fn inner(&self) -> &dyn QuditGate {
        match self {
            Gate::H(g) => g,
            Gate::X(g) => g,
            Gate::Z(g) => g,
            Gate::I(g) => g,
            Gate::Cx(g) => g,
            Gate::Init(g) => g,
            Gate::Measure(g) => g,
        }
    }

    /// Identity padding does nothing during execution.
    pub fn is_identity(&self) -> bool {
        matches!(self, Gate::I(_))
    }

    /// Measurements are sampled rather than applied.
    pub fn is_measurement(&self) -> bool {
        matches!(self, Gate::Measure(_))
    }

    /// Compact label used when printing moments.
    pub fn label(&self) -> String {
        match self {
            Gate::H(g) => format!("H({})", g.dims()),
            Gate::X(g) => format!("X({})", g.dims()),
            Gate::Z(g) => format!("Z({})", g.dims()),
            Gate::I(g) => format!("I({})", g.dims()),
            Gate::Cx(g) => format!("CX+{}[{}]", g.plus(), g.acting_on()),
            Gate::Init(g) => format!("|{}>", g.state()),
            Gate::Measure(_) => "M".to_string(),
        }
    }
}

impl QuditGate for Gate {
    fn name(&self) -> &'static str {
        self.inner().name()
    }
    fn is_controlled(&self) -> bool {
        self.inner().is_controlled()
    }
    fn is_single_qudit(&self) -> bool {
        self.inner().is_single_qudit()
    }
    fn unitary(&self) -> &Matrix {
        self.inner().unitary()
    }
    fn acting_on(&self) -> ActingOn {
        self.inner().acting_on()
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl From<HGate> for Gate {
    fn from(g: HGate) -> Self {
        Gate::H(g)
    }
}

impl From<XGate> for Gate {
    fn from(g: XGate) -> Self {
        Gate::X(g)
    }
}

impl From<ZGate> for Gate {
    fn from(g: ZGate) -> Self {
        Gate::Z(g)
    }
}

impl From<IGate> for Gate {
    fn from(g: IGate) -> Self {
        Gate::I(g)
    }
}

impl From<CxGate> for Gate {
    fn from(g: CxGate) -> Self {
        Gate::Cx(g)
    }
}

impl From<InitState> for Gate {
    fn from(g: InitState) -> Self {
        Gate::Init(g)
    }
}

impl From<Measurement> for Gate {
    fn from(g: Measurement) -> Self {
        Gate::Measure(g)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::QuditError;

    #[test]
    fn enum_dispatches_contract() -> Result<(), QuditError> {
        let h: Gate = HGate::new(1, 3)?.into();
        assert_eq!(h.name(), "h");
        assert!(!h.is_controlled());
        assert!(h.is_single_qudit());
        assert_eq!(h.unitary().dim(), 3);
        assert_eq!(h.acting_on(), ActingOn::Single(1));
        assert_eq!(h.label(), "H(3)");

        let cx: Gate = CxGate::new(0, 2, vec![2, 2, 2], 1)?.into();
        assert!(cx.is_controlled());
        assert_eq!(cx.acting_on().len(), 3);
        assert!(cx.acting_on().contains(1));
        assert!(!cx.acting_on().contains(3));
        assert_eq!(cx.label(), "CX+1[q0..q2]");
        Ok(())
    }

    #[test]
    fn hand_built_reversed_range_has_no_underflow() {
        let reversed = ActingOn::Range { start: 3, end: 1 };
        assert_eq!(reversed.len(), 1);
        assert!(!reversed.contains(2));
        assert_eq!(ActingOn::Range { start: 1, end: 3 }.len(), 3);
        assert_eq!(ActingOn::Single(4).len(), 1);
    }
}
