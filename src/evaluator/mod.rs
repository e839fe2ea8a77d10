// src/evaluator/mod.rs

//! Turns a parameter vector into observables, either by simulating the
//! emotional circuit or, when that is not possible, from the classical
//! approximation in [`fallback`].

pub mod fallback;

use crate::analysis::StateStatistics;
use crate::circuits::topology::{CellLayout, build_emotion_circuit};
use crate::circuits::Circuit;
use crate::core::AuraError;
use crate::simulation::Backend;
use fallback::Clock;
use serde::Serialize;
use std::fmt;
use tracing::{debug, info, warn};

/// How cycles are evaluated. Chosen at construction, revisited only on
/// [`Evaluator::reinitialize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Simulation,
    Fallback,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Simulation => write!(f, "simulation"),
            Mode::Fallback => write!(f, "fallback"),
        }
    }
}

/// The four statistics reported per cycle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Observables {
    /// `None` when the cycle was not simulated.
    pub fidelity: Option<f64>,
    pub intensity: f64,
    pub coherence: f64,
    pub entanglement: f64,
}

impl Observables {
    /// Whether every present value is finite.
    pub fn is_finite(&self) -> bool {
        self.fidelity.is_none_or(f64::is_finite)
            && self.intensity.is_finite()
            && self.coherence.is_finite()
            && self.entanglement.is_finite()
    }
}

impl From<StateStatistics> for Observables {
    fn from(stats: StateStatistics) -> Self {
        Self {
            fidelity: Some(stats.fidelity),
            intensity: stats.intensity,
            coherence: stats.coherence,
            entanglement: stats.entanglement,
        }
    }
}

/// Why a cycle used the classical approximation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackReason {
    /// The evaluator is in fallback mode.
    Unavailable,
    /// Binding or simulation failed this cycle.
    SimulationFailed(String),
}

/// Outcome of one evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Evaluation {
    Simulated(Observables),
    FellBack {
        observables: Observables,
        reason: FallbackReason,
    },
}

impl Evaluation {
    pub fn observables(&self) -> &Observables {
        match self {
            Evaluation::Simulated(observables) => observables,
            Evaluation::FellBack { observables, .. } => observables,
        }
    }

    /// True when the cycle meant to simulate but could not.
    pub fn simulation_failed(&self) -> bool {
        matches!(
            self,
            Evaluation::FellBack { reason: FallbackReason::SimulationFailed(_), .. }
        )
    }
}

/// Evaluates parameter vectors against the cached emotional circuit.
pub struct Evaluator {
    layout: CellLayout,
    backend: Box<dyn Backend + Send>,
    clock: Box<dyn Clock + Send>,
    prefer_classical: bool,
    template: Option<Circuit>,
    mode: Mode,
}

impl fmt::Debug for Evaluator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Evaluator")
            .field("layout", &self.layout)
            .field("backend", &self.backend.name())
            .field("mode", &self.mode)
            .finish()
    }
}

impl Evaluator {
    /// Creates an evaluator and selects its mode.
    ///
    /// Simulation mode needs `prefer_classical == false`, a layout that
    /// builds, and a backend wide enough for the whole register.
    pub fn new(
        layout: CellLayout,
        backend: Box<dyn Backend + Send>,
        clock: Box<dyn Clock + Send>,
        prefer_classical: bool,
    ) -> Self {
        let mut evaluator = Self {
            layout,
            backend,
            clock,
            prefer_classical,
            template: None,
            mode: Mode::Fallback,
        };
        evaluator.reinitialize();
        evaluator
    }

    /// Reselects the mode and rebuilds the cached template.
    pub fn reinitialize(&mut self) {
        self.template = None;
        self.mode = Mode::Fallback;

        if self.prefer_classical {
            info!(backend = self.backend.name(), "classical backend configured, using fallback mode");
            return;
        }

        let total = self.layout.total_qubits();
        let limit = self.backend.max_qubits();
        if total > limit {
            warn!(
                qubits = total,
                max_qubits = limit,
                backend = self.backend.name(),
                "register too wide for the backend, using fallback mode"
            );
            return;
        }

        match build_emotion_circuit(&self.layout) {
            Ok(circuit) => {
                info!(
                    qubits = total,
                    operations = circuit.len(),
                    parameters = circuit.num_params(),
                    backend = self.backend.name(),
                    "emotional circuit ready, using simulation mode"
                );
                self.template = Some(circuit);
                self.mode = Mode::Simulation;
            }
            Err(e) => {
                warn!(error = %e, "emotional circuit could not be built, using fallback mode");
            }
        }
    }

    /// Evaluates one parameter vector. Never fails: simulation errors are
    /// logged and reported as [`FallbackReason::SimulationFailed`].
    pub fn evaluate(&mut self, params: &[f64], shots: u32) -> Evaluation {
        let template = match (self.mode, &self.template) {
            (Mode::Simulation, Some(template)) => template,
            _ => {
                return Evaluation::FellBack {
                    observables: fallback::observe(self.clock.now_secs()),
                    reason: FallbackReason::Unavailable,
                };
            }
        };

        match simulate(template, &mut *self.backend, params, shots) {
            Ok(observables) => {
                debug!(
                    intensity = observables.intensity,
                    entanglement = observables.entanglement,
                    "cycle simulated"
                );
                Evaluation::Simulated(observables)
            }
            Err(e) => {
                warn!(error = %e, backend = self.backend.name(), "simulation failed, using classical observables");
                Evaluation::FellBack {
                    observables: fallback::observe(self.clock.now_secs()),
                    reason: FallbackReason::SimulationFailed(e.to_string()),
                }
            }
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn layout(&self) -> &CellLayout {
        &self.layout
    }

    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// The cached parametrized circuit, present in simulation mode only.
    pub fn template(&self) -> Option<&Circuit> {
        self.template.as_ref()
    }

    /// Current wall-clock reading.
    pub fn now_secs(&self) -> f64 {
        self.clock.now_secs()
    }
}

fn simulate(
    template: &Circuit,
    backend: &mut dyn Backend,
    params: &[f64],
    shots: u32,
) -> Result<Observables, AuraError> {
    let bound = template.bind(params)?;
    let result = backend.run(&bound, shots)?;
    Ok(StateStatistics::from_state(result.state_vector()).into())
}

#[cfg(test)]
mod tests {
    use super::fallback::FixedClock;
    use super::*;
    use crate::simulation::{SimulationResult, Simulator};

    struct Broken;

    impl Backend for Broken {
        fn name(&self) -> &str {
            "broken"
        }

        fn max_qubits(&self) -> usize {
            64
        }

        fn run(&mut self, _circuit: &Circuit, _shots: u32) -> Result<SimulationResult, AuraError> {
            Err(AuraError::simulation("device offline"))
        }
    }

    fn small() -> CellLayout {
        CellLayout { n_cells: 2, qubits_per_cell: 2, ..CellLayout::default() }
    }

    #[test]
    fn test_default_layout_falls_back() {
        let mut evaluator =
            Evaluator::new(CellLayout::default(), Box::new(Simulator::new()), Box::new(FixedClock(0.0)), false);
        assert_eq!(evaluator.mode(), Mode::Fallback);
        assert!(evaluator.template().is_none());
        let evaluation = evaluator.evaluate(&[0.5; 100], 16);
        assert_eq!(
            evaluation,
            Evaluation::FellBack { observables: fallback::observe(0.0), reason: FallbackReason::Unavailable }
        );
    }

    #[test]
    fn test_small_layout_simulates() {
        let mut evaluator = Evaluator::new(small(), Box::new(Simulator::new()), Box::new(FixedClock(0.0)), false);
        assert_eq!(evaluator.mode(), Mode::Simulation);
        match evaluator.evaluate(&[0.2, 0.7], 64) {
            Evaluation::Simulated(obs) => {
                assert!(obs.fidelity.is_some());
                assert!((obs.coherence - 1.0).abs() < 1e-9);
                // a 4-qubit register has 16 amplitudes, intensity covers half of them
                assert!(obs.intensity > 0.0 && obs.intensity <= 1.0 + 1e-9);
                assert!(obs.entanglement >= 0.0 && obs.entanglement <= 2.0 + 1e-9);
            }
            other => panic!("expected a simulated cycle, got {:?}", other),
        }
    }

    #[test]
    fn test_classical_preference_skips_simulation() {
        let evaluator = Evaluator::new(small(), Box::new(Simulator::new()), Box::new(FixedClock(0.0)), true);
        assert_eq!(evaluator.mode(), Mode::Fallback);
    }

    #[test]
    fn test_backend_failure_is_recovered() {
        let mut evaluator = Evaluator::new(small(), Box::new(Broken), Box::new(FixedClock(12.0)), false);
        assert_eq!(evaluator.mode(), Mode::Simulation);
        let evaluation = evaluator.evaluate(&[0.1, 0.2], 8);
        assert!(evaluation.simulation_failed());
        assert_eq!(evaluation.observables(), &fallback::observe(12.0));
    }

    #[test]
    fn test_wrong_parameter_count_is_recovered() {
        let mut evaluator = Evaluator::new(small(), Box::new(Simulator::new()), Box::new(FixedClock(1.0)), false);
        assert!(evaluator.evaluate(&[0.1], 8).simulation_failed());
    }
}
