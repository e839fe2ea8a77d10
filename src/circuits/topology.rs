// src/circuits/topology.rs

//! The fixed emotional topology: qubits grouped into cells, entangled inside
//! each cell, swapped around a ring of cells, and rotated by one parameter
//! per cell.

use super::{Circuit, CircuitBuilder};
use crate::core::{AuraError, QubitId};
use crate::core::aura_constants::{DEFAULT_CELLS, DEFAULT_QUBITS_PER_CELL, DEFAULT_ROTATION_ANGLE};
use crate::operations::{Angle, Operation};
use serde::Serialize;

/// Shape of the register: `n_cells` groups of `qubits_per_cell` qubits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CellLayout {
    /// Number of cells, and therefore of circuit parameters.
    pub n_cells: usize,
    /// Qubits in each cell.
    pub qubits_per_cell: usize,
    /// Angle of the intra-cell controlled rotations.
    pub rotation_angle: f64,
}

impl Default for CellLayout {
    fn default() -> Self {
        Self {
            n_cells: DEFAULT_CELLS,
            qubits_per_cell: DEFAULT_QUBITS_PER_CELL,
            rotation_angle: DEFAULT_ROTATION_ANGLE,
        }
    }
}

impl CellLayout {
    /// Total register width.
    pub fn total_qubits(&self) -> usize {
        self.n_cells.saturating_mul(self.qubits_per_cell)
    }

    /// First qubit of every cell.
    pub fn cell_heads(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.n_cells).map(move |cell| cell * self.qubits_per_cell)
    }

    /// Names of the parameter slots, `θ[0]`, `θ[1]`, ...
    pub fn parameter_names(&self) -> Vec<String> {
        (0..self.n_cells).map(|i| format!("θ[{}]", i)).collect()
    }

    /// Rejects empty layouts and non-finite angles.
    pub fn validate(&self) -> Result<(), AuraError> {
        if self.n_cells == 0 {
            return Err(AuraError::config("a layout needs at least one cell"));
        }
        if self.qubits_per_cell == 0 {
            return Err(AuraError::config("a cell needs at least one qubit"));
        }
        if self.n_cells.checked_mul(self.qubits_per_cell).is_none() {
            return Err(AuraError::config("cell count times qubits per cell overflows"));
        }
        if !self.rotation_angle.is_finite() {
            return Err(AuraError::config("rotation angle must be finite"));
        }
        Ok(())
    }
}

/// Builds the parametrized emotional circuit for `layout`.
///
/// Layers, in order: `H` on every qubit; per cell `CRy(i → i+1)`, then
/// `Cz(i+1, i+2)` for cells of three or more qubits and `CRy(i+2 → i+3)`
/// for cells of four or more;
/// a `Swap` from every cell head to the next cell head around the ring;
/// finally `Ry(θ[cell])` on each cell head.
pub fn build_emotion_circuit(layout: &CellLayout) -> Result<Circuit, AuraError> {
    layout.validate()?;
    let total = layout.total_qubits();
    let per_cell = layout.qubits_per_cell;
    let theta = Angle::Fixed(layout.rotation_angle);
    let q = QubitId;

    let mut ops = Vec::new();

    ops.extend((0..total).map(|i| Operation::Hadamard { target: q(i) }));

    for i in layout.cell_heads() {
        if per_cell >= 2 {
            ops.push(Operation::ControlledRotateY { control: q(i), target: q(i + 1), angle: theta });
        }
        if per_cell >= 4 {
            ops.push(Operation::ControlledRotateY {
                control: q(i + 2),
                target: q(i + 3),
                angle: theta,
            });
        }
        if per_cell >= 3 {
            ops.push(Operation::ControlledPhase { qubit1: q(i + 1), qubit2: q(i + 2) });
        }
    }

    for i in layout.cell_heads() {
        let j = (i + per_cell) % total;
        if j != i {
            ops.push(Operation::Swap { qubit1: q(i), qubit2: q(j) });
        }
    }

    for (cell, i) in layout.cell_heads().enumerate() {
        ops.push(Operation::RotateY { target: q(i), angle: Angle::Param(cell) });
    }

    CircuitBuilder::new(total).add_ops(ops).build()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(n_cells: usize, qubits_per_cell: usize) -> CellLayout {
        CellLayout { n_cells, qubits_per_cell, ..CellLayout::default() }
    }

    #[test]
    fn test_gate_counts_for_two_cells_of_four() -> Result<(), AuraError> {
        let circuit = build_emotion_circuit(&layout(2, 4))?;
        // 8 H + 2*(2 CRy + 1 Cz) + 2 Swap + 2 Ry
        assert_eq!(circuit.len(), 8 + 6 + 2 + 2);
        assert_eq!(circuit.num_qubits(), 8);
        assert_eq!(circuit.num_params(), 2);
        Ok(())
    }

    #[test]
    fn test_single_cell_ring_has_no_swap() -> Result<(), AuraError> {
        let circuit = build_emotion_circuit(&layout(1, 4))?;
        assert!(!circuit.operations().iter().any(|op| matches!(op, Operation::Swap { .. })));
        Ok(())
    }

    #[test]
    fn test_ring_wraps_last_cell_to_first() -> Result<(), AuraError> {
        let circuit = build_emotion_circuit(&layout(3, 2))?;
        let swaps: Vec<_> = circuit
            .operations()
            .iter()
            .filter_map(|op| match op {
                Operation::Swap { qubit1, qubit2 } => Some((qubit1.index(), qubit2.index())),
                _ => None,
            })
            .collect();
        assert_eq!(swaps, vec![(0, 2), (2, 4), (4, 0)]);
        Ok(())
    }

    #[test]
    fn test_small_cells_skip_inner_gates() -> Result<(), AuraError> {
        let circuit = build_emotion_circuit(&layout(2, 1))?;
        assert!(!circuit.operations().iter().any(|op| matches!(
            op,
            Operation::ControlledRotateY { .. } | Operation::ControlledPhase { .. }
        )));
        Ok(())
    }

    #[test]
    fn test_three_qubit_cells_keep_the_phase_link() -> Result<(), AuraError> {
        let circuit = build_emotion_circuit(&layout(2, 3))?;
        let inner: Vec<_> = circuit
            .operations()
            .iter()
            .filter_map(|op| match op {
                Operation::ControlledRotateY { control, target, .. } => {
                    Some(("cry", control.index(), target.index()))
                }
                Operation::ControlledPhase { qubit1, qubit2 } => Some(("cz", qubit1.index(), qubit2.index())),
                _ => None,
            })
            .collect();
        assert_eq!(inner, vec![("cry", 0, 1), ("cz", 1, 2), ("cry", 3, 4), ("cz", 4, 5)]);
        // 6 H + 2*(1 CRy + 1 Cz) + 2 Swap + 2 Ry
        assert_eq!(circuit.len(), 6 + 4 + 2 + 2);
        Ok(())
    }

    #[test]
    fn test_empty_layout_is_rejected() {
        assert!(matches!(build_emotion_circuit(&layout(0, 4)), Err(AuraError::Config { .. })));
    }
}
