// src/simulation/results.rs
use crate::core::StateVector;
use std::collections::BTreeMap;
use std::fmt;

/// Outcome of running a bound circuit on a backend.
///
/// Holds the final state vector and the sampled measurement counts.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationResult {
    state: StateVector,
    counts: BTreeMap<String, u64>,
    shots: u32,
    backend: String,
}

impl SimulationResult {
    /// Assembles a result. Backends outside this crate use this to report
    /// their own state vectors.
    pub fn new(
        state: StateVector,
        counts: BTreeMap<String, u64>,
        shots: u32,
        backend: impl Into<String>,
    ) -> Self {
        Self {
            state,
            counts,
            shots,
            backend: backend.into(),
        }
    }

    /// The final state vector.
    pub fn state_vector(&self) -> &StateVector {
        &self.state
    }

    /// Measurement counts keyed by bitstring (qubit 0 rightmost).
    pub fn counts(&self) -> &BTreeMap<String, u64> {
        &self.counts
    }

    /// Number of repetitions requested.
    pub fn shots(&self) -> u32 {
        self.shots
    }

    /// Name of the backend that produced the result.
    pub fn backend(&self) -> &str {
        &self.backend
    }
}

impl fmt::Display for SimulationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Simulation Results ({} shots on {}, {} qubits):",
            self.shots,
            self.backend,
            self.state.num_qubits()
        )?;
        if self.counts.is_empty() {
            writeln!(f, "  No measurements recorded.")?;
        } else {
            writeln!(f, "  Counts:")?;
            for (bits, count) in &self.counts {
                writeln!(f, "    {}: {}", bits, count)?;
            }
        }
        Ok(())
    }
}
