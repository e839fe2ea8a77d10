// src/operations/mod.rs

//! Gate operations applied to a statevector register.
//!
//! The set is exactly what the emotional topology needs: Hadamard, `Ry`
//! rotations (fixed or parametrized), controlled `Ry`, controlled phase and
//! swap.

use crate::core::{AuraError, QubitId};
use std::fmt;

/// Rotation angle of a gate: either known at build time or taken from a
/// parameter slot when the circuit is bound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Angle {
    /// A fixed angle in radians.
    Fixed(f64),
    /// Slot `i` of the parameter vector supplied to [`Circuit::bind`](crate::Circuit::bind).
    Param(usize),
}

impl Angle {
    /// Returns the angle in radians, or an error for an unbound parameter.
    pub fn value(&self) -> Result<f64, AuraError> {
        match self {
            Angle::Fixed(theta) => Ok(*theta),
            Angle::Param(slot) => Err(AuraError::simulation(format!(
                "parameter θ[{}] is not bound",
                slot
            ))),
        }
    }

    /// Replaces a parameter slot with its value from `values`.
    pub(crate) fn bind(&self, values: &[f64]) -> Result<Angle, AuraError> {
        match self {
            Angle::Fixed(_) => Ok(*self),
            Angle::Param(slot) => values.get(*slot).map(|v| Angle::Fixed(*v)).ok_or_else(|| {
                AuraError::invalid_operation(format!("no value supplied for parameter θ[{}]", slot))
            }),
        }
    }

    /// Parameter slot referenced by this angle, if any.
    pub fn param_slot(&self) -> Option<usize> {
        match self {
            Angle::Fixed(_) => None,
            Angle::Param(slot) => Some(*slot),
        }
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Angle::Fixed(theta) => write!(f, "{:.3}", theta),
            Angle::Param(slot) => write!(f, "θ{}", slot),
        }
    }
}

/// A gate in a circuit.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Hadamard: equal superposition of `|0>` and `|1>`.
    Hadamard {
        /// Qubit the gate acts on.
        target: QubitId,
    },

    /// Rotation about the Y axis: `Ry(θ)|0> = cos(θ/2)|0> + sin(θ/2)|1>`.
    RotateY {
        /// Qubit the gate acts on.
        target: QubitId,
        /// Rotation angle.
        angle: Angle,
    },

    /// `Ry(θ)` on `target`, applied only in the subspace where `control` is `|1>`.
    ControlledRotateY {
        /// Qubit whose `|1>` component enables the rotation.
        control: QubitId,
        /// Qubit that is rotated.
        target: QubitId,
        /// Rotation angle.
        angle: Angle,
    },

    /// Controlled phase: negates the `|11>` amplitude of the pair. Symmetric.
    ControlledPhase {
        /// First qubit of the pair.
        qubit1: QubitId,
        /// Second qubit of the pair.
        qubit2: QubitId,
    },

    /// Exchanges the states of two qubits.
    Swap {
        /// First qubit of the pair.
        qubit1: QubitId,
        /// Second qubit of the pair.
        qubit2: QubitId,
    },
}

impl Operation {
    /// Returns every qubit the operation touches.
    pub fn involved_qubits(&self) -> Vec<QubitId> {
        match self {
            Operation::Hadamard { target } => vec![*target],
            Operation::RotateY { target, .. } => vec![*target],
            Operation::ControlledRotateY { control, target, .. } => vec![*control, *target],
            Operation::ControlledPhase { qubit1, qubit2 } => vec![*qubit1, *qubit2],
            Operation::Swap { qubit1, qubit2 } => vec![*qubit1, *qubit2],
        }
    }

    /// Parameter slot referenced by the operation, if any.
    pub fn param_slot(&self) -> Option<usize> {
        match self {
            Operation::RotateY { angle, .. } | Operation::ControlledRotateY { angle, .. } => {
                angle.param_slot()
            }
            _ => None,
        }
    }

    /// Copy of the operation with parameter slots replaced by `values`.
    pub(crate) fn bind(&self, values: &[f64]) -> Result<Operation, AuraError> {
        Ok(match self {
            Operation::RotateY { target, angle } => Operation::RotateY {
                target: *target,
                angle: angle.bind(values)?,
            },
            Operation::ControlledRotateY { control, target, angle } => {
                Operation::ControlledRotateY {
                    control: *control,
                    target: *target,
                    angle: angle.bind(values)?,
                }
            }
            other => other.clone(),
        })
    }
}
