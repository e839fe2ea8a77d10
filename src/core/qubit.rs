// src/core/qubit.rs

use std::fmt;

/// Index of a qubit inside a register.
///
/// Qubit `q` maps to bit `q` of a basis-state index, so `QubitId(0)` is the
/// least significant bit. The first 8 amplitudes of a state vector are
/// therefore the states in which every qubit above `q2` is `|0>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QubitId(pub usize);

impl QubitId {
    /// Bit mask selecting this qubit in a basis-state index.
    pub fn mask(&self) -> usize {
        1 << self.0
    }

    /// Position of the qubit in its register.
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}
