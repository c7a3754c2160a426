// src/circuits/moment.rs

use crate::gates::{Gate, QuditGate};
use std::fmt;
use std::sync::Arc;

/// One time step: exactly one operator per register, applied in parallel.
///
/// A gate spanning a register range sits in every slot of that range as the
/// same shared value, so the moment holds one joint operator, not copies.
#[derive(Debug, Clone, PartialEq)]
pub struct Moment {
    slots: Vec<Arc<Gate>>,
}

impl Moment {
    /// Wraps one slot per register, in register order.
    pub fn new(slots: Vec<Arc<Gate>>) -> Self {
        Self { slots }
    }

    /// Number of slots, equal to the register length of a well-formed moment.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if the moment has no slots.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Every slot in register order. Ranged gates appear once per covered
    /// register.
    pub fn slots(&self) -> &[Arc<Gate>] {
        &self.slots
    }

    /// The operator occupying register `qreg`.
    pub fn gate_at(&self, qreg: usize) -> Option<&Gate> {
        self.slots.get(qreg).map(Arc::as_ref)
    }

    /// The distinct operators of the moment in register order; a ranged gate
    /// is yielded once.
    pub fn operators(&self) -> impl Iterator<Item = &Gate> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(i, g)| *i == 0 || !Arc::ptr_eq(g, &self.slots[i - 1]))
            .map(|(_, g)| g.as_ref())
    }
}

impl fmt::Display for Moment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, gate) in self.slots.iter().enumerate() {
            write!(f, "{}{}", if i > 0 { ", " } else { "" }, gate)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::QuditError;
    use crate::gates::{CxGate, IGate};

    #[test]
    fn ranged_gate_is_one_operator() -> Result<(), QuditError> {
        let cx = Arc::new(Gate::from(CxGate::new(0, 1, vec![2, 2], 1)?));
        let moment = Moment::new(vec![
            Arc::clone(&cx),
            Arc::clone(&cx),
            Arc::new(IGate::new(2, 3).into()),
        ]);

        assert_eq!(moment.len(), 3);
        assert_eq!(moment.operators().count(), 2);
        assert!(Arc::ptr_eq(&moment.slots()[0], &moment.slots()[1]));
        assert_eq!(moment.gate_at(2).map(|g| g.name()), Some("id"));
        assert_eq!(moment.to_string(), "[CX+1[q0..q1], CX+1[q0..q1], I(3)]");
        Ok(())
    }
}
