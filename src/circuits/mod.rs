// src/circuits/mod.rs

//! Ordered sequences of gate operations over a fixed-width register.
//!
//! A [`Circuit`] may contain parametrized rotations; [`Circuit::bind`]
//! produces a concrete copy from a parameter vector. The emotional topology
//! itself lives in [`topology`].

pub mod topology;

use crate::core::{AuraError, QubitId};
use crate::operations::Operation;
use std::fmt;

pub use topology::CellLayout;

/// An ordered list of operations on `num_qubits` qubits.
///
/// Analogy: a `QuantumCircuit` whose parameters are plain slot indices.
#[derive(Clone, PartialEq)]
pub struct Circuit {
    /// Register width. Qubits without operations still count.
    num_qubits: usize,

    /// The gates, in application order.
    operations: Vec<Operation>,

    /// One more than the highest parameter slot referenced.
    num_params: usize,
}

impl Circuit {
    /// Creates an empty circuit on `num_qubits` qubits.
    pub fn new(num_qubits: usize) -> Self {
        Self {
            num_qubits,
            operations: Vec::new(),
            num_params: 0,
        }
    }

    /// Adds a single operation to the end of the circuit's sequence.
    pub fn add_operation(&mut self, op: Operation) {
        if let Some(slot) = op.param_slot() {
            self.num_params = self.num_params.max(slot + 1);
        }
        self.operations.push(op);
    }

    /// Adds multiple operations from an iterator, in order.
    pub fn add_operations<I>(&mut self, ops: I)
    where
        I: IntoIterator<Item = Operation>,
    {
        for op in ops {
            self.add_operation(op);
        }
    }

    /// Register width.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Number of parameter slots the circuit expects when bound.
    pub fn num_params(&self) -> usize {
        self.num_params
    }

    /// Returns `true` if any operation still refers to a parameter slot.
    pub fn is_parametrized(&self) -> bool {
        self.operations.iter().any(|op| op.param_slot().is_some())
    }

    /// Returns a slice containing the ordered sequence of operations.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Returns the total number of operations.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Returns `true` if the circuit contains no operations.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Produces a concrete copy with every parameter slot replaced.
    ///
    /// # Errors
    /// [`AuraError::InvalidOperation`] when `values.len()` differs from
    /// [`num_params`](Self::num_params).
    pub fn bind(&self, values: &[f64]) -> Result<Circuit, AuraError> {
        if values.len() != self.num_params {
            return Err(AuraError::invalid_operation(format!(
                "expected {} parameters, got {}",
                self.num_params,
                values.len()
            )));
        }
        let operations = self
            .operations
            .iter()
            .map(|op| op.bind(values))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Circuit {
            num_qubits: self.num_qubits,
            operations,
            num_params: 0,
        })
    }

    /// Checks every operation against the register width.
    ///
    /// Two-qubit operations must name two distinct qubits.
    pub fn validate(&self) -> Result<(), AuraError> {
        for (position, op) in self.operations.iter().enumerate() {
            let qubits = op.involved_qubits();
            if let Some(q) = qubits.iter().find(|q| q.index() >= self.num_qubits) {
                return Err(AuraError::invalid_operation(format!(
                    "operation {} targets {} outside a {}-qubit register",
                    position, q, self.num_qubits
                )));
            }
            if qubits.len() == 2 && qubits[0] == qubits[1] {
                return Err(AuraError::invalid_operation(format!(
                    "operation {} uses {} twice",
                    position, qubits[0]
                )));
            }
        }
        Ok(())
    }
}

//-------------------------------------------------------------------------
// Circuit Builder
//-------------------------------------------------------------------------

/// A helper struct for constructing `Circuit` instances using method chaining.
pub struct CircuitBuilder {
    circuit: Circuit,
}

impl CircuitBuilder {
    /// Creates a builder for a register of `num_qubits` qubits.
    pub fn new(num_qubits: usize) -> Self {
        Self {
            circuit: Circuit::new(num_qubits),
        }
    }

    /// Adds a single operation to the circuit being built.
    pub fn add_op(mut self, op: Operation) -> Self {
        self.circuit.add_operation(op);
        self
    }

    /// Adds multiple operations from an iterator to the circuit being built.
    pub fn add_ops<I>(mut self, ops: I) -> Self
    where
        I: IntoIterator<Item = Operation>,
    {
        self.circuit.add_operations(ops);
        self
    }

    /// Finalizes construction, validating qubit references.
    pub fn build(self) -> Result<Circuit, AuraError> {
        self.circuit.validate()?;
        Ok(self.circuit)
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.operations.is_empty() || self.num_qubits == 0 {
            return writeln!(f, "aura::Circuit[0 operations on {} qubits]", self.num_qubits);
        }

        let ops = &self.operations;
        let num_ops = ops.len();
        let num_rows = self.num_qubits;

        let max_label_width = format!("{}", QubitId(num_rows - 1)).len();
        let label_padding = " ".repeat(max_label_width + 2); // Label + ": "

        const GATE_WIDTH: usize = 7; // e.g., "───H───"
        const WIRE: &str = "───────";
        const V_WIRE: char = '│';
        const H_WIRE: char = '─';

        // op_grid[row][time] holds the gate or wire segment
        let mut op_grid: Vec<Vec<String>> = vec![vec![WIRE.to_string(); num_ops]; num_rows];
        // v_connect[row][time] holds the connector drawn below this row
        let mut v_connect: Vec<Vec<char>> = vec![vec![' '; num_ops]; num_rows];

        fn format_gate(symbol: &str) -> String {
            let slen = symbol.chars().count();
            if slen >= GATE_WIDTH {
                symbol.chars().take(GATE_WIDTH).collect()
            } else {
                let total_dashes = GATE_WIDTH - slen;
                let pre_dashes = total_dashes / 2;
                let post_dashes = total_dashes - pre_dashes;
                format!(
                    "{}{}{}",
                    H_WIRE.to_string().repeat(pre_dashes),
                    symbol,
                    H_WIRE.to_string().repeat(post_dashes)
                )
            }
        }

        fn connect(v_connect: &mut [Vec<char>], a: usize, b: usize, t: usize) {
            let (r_min, r_max) = (a.min(b), a.max(b));
            for row_vec in v_connect.iter_mut().take(r_max).skip(r_min) {
                row_vec[t] = V_WIRE;
            }
        }

        for (t, op) in ops.iter().enumerate() {
            if op.involved_qubits().iter().any(|q| q.index() >= num_rows) {
                continue; // unvalidated circuit, leave the wires bare
            }
            match op {
                Operation::Hadamard { target } => {
                    op_grid[target.index()][t] = format_gate("H");
                }
                Operation::RotateY { target, angle } => {
                    op_grid[target.index()][t] = format_gate(&format!("Ry({})", angle));
                }
                Operation::ControlledRotateY { control, target, angle } => {
                    op_grid[control.index()][t] = format_gate("@");
                    op_grid[target.index()][t] = format_gate(&format!("Ry({})", angle));
                    connect(&mut v_connect, control.index(), target.index(), t);
                }
                Operation::ControlledPhase { qubit1, qubit2 } => {
                    op_grid[qubit1.index()][t] = format_gate("@");
                    op_grid[qubit2.index()][t] = format_gate("●");
                    connect(&mut v_connect, qubit1.index(), qubit2.index(), t);
                }
                Operation::Swap { qubit1, qubit2 } => {
                    op_grid[qubit1.index()][t] = format_gate("x");
                    op_grid[qubit2.index()][t] = format_gate("x");
                    connect(&mut v_connect, qubit1.index(), qubit2.index(), t);
                }
            }
        }

        writeln!(f, "aura::Circuit[{} operations on {} qubits]", num_ops, num_rows)?;
        for r in 0..num_rows {
            let label = format!("{}: ", QubitId(r));
            write!(f, "{:<width$}", label, width = max_label_width + 2)?;
            writeln!(f, "{}", op_grid[r].join(""))?;

            if r < num_rows - 1 {
                write!(f, "{}", label_padding)?;
                for t in 0..num_ops {
                    let connector = v_connect[r][t];
                    let padding_needed = GATE_WIDTH.saturating_sub(1);
                    let pre_pad = padding_needed / 2;
                    let post_pad = padding_needed - pre_pad;
                    write!(f, "{}{}{}", " ".repeat(pre_pad), connector, " ".repeat(post_pad))?;
                }
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

