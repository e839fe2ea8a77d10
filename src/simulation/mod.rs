// src/simulation/mod.rs

//! Runs bound circuits. The [`Backend`] trait is the seam between the
//! evaluator and whatever executes a circuit; [`Simulator`] is the in-crate
//! statevector implementation.

mod results;
pub(crate) mod engine;

pub use results::SimulationResult;

use crate::circuits::Circuit;
use crate::core::AuraError;
use crate::core::aura_constants::DEFAULT_MAX_QUBITS;
use engine::SimulationEngine;
use tracing::debug;

/// Something that can execute a fully bound circuit.
pub trait Backend {
    /// Name reported in health checks and metrics.
    fn name(&self) -> &str;

    /// Widest register the backend can run.
    fn max_qubits(&self) -> usize;

    /// Executes `circuit` and samples `shots` outcomes.
    ///
    /// # Errors
    /// Any failure is reported as [`AuraError::Simulation`] or
    /// [`AuraError::InvalidOperation`]; the evaluator recovers from both.
    fn run(&mut self, circuit: &Circuit, shots: u32) -> Result<SimulationResult, AuraError>;
}

/// Statevector backend. Keeps the full `2^n` amplitude vector in memory, so
/// registers wider than `max_qubits` are refused.
#[derive(Debug, Clone)]
pub struct Simulator {
    max_qubits: usize,
}

impl Default for Simulator {
    fn default() -> Self {
        Self { max_qubits: DEFAULT_MAX_QUBITS }
    }
}

impl Simulator {
    /// Name reported by this backend.
    pub const NAME: &'static str = "statevector_simulator";

    /// Creates a simulator with the default register limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a simulator accepting registers up to `max_qubits` wide.
    pub fn with_max_qubits(max_qubits: usize) -> Self {
        Self { max_qubits }
    }

    /// Runs a bound circuit from `|0...0>`.
    ///
    /// # Returns
    /// * `Ok(SimulationResult)` with the final state vector and counts.
    /// * `Err(AuraError)` if the circuit still has parameter slots, is empty
    ///   of qubits, exceeds the register limit or references a missing qubit.
    pub fn run(&self, circuit: &Circuit, shots: u32) -> Result<SimulationResult, AuraError> {
        if circuit.is_parametrized() {
            return Err(AuraError::simulation(format!(
                "circuit has {} unbound parameters",
                circuit.num_params()
            )));
        }

        let mut engine = SimulationEngine::init(circuit.num_qubits(), self.max_qubits)?;
        for op in circuit.operations() {
            engine.apply_operation(op)?;
        }

        let counts = engine.sample_counts(shots);
        debug!(
            qubits = circuit.num_qubits(),
            operations = circuit.len(),
            shots,
            "statevector run finished"
        );
        Ok(SimulationResult::new(engine.into_state(), counts, shots, Self::NAME))
    }
}

impl Backend for Simulator {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn max_qubits(&self) -> usize {
        self.max_qubits
    }

    fn run(&mut self, circuit: &Circuit, shots: u32) -> Result<SimulationResult, AuraError> {
        Simulator::run(self, circuit, shots)
    }
}
