// src/lib.rs

//! `aura400` - A quantum emotional core
//!
//! Emotions are encoded as noisy parameter vectors, bound into a fixed
//! cell-structured circuit and evaluated on a statevector simulator. When the
//! register is too wide to simulate, a deterministic classical approximation
//! stands in. Every cycle updates a probability distribution over eight
//! emotions and a set of running metrics.

pub mod core;
pub mod operations;
pub mod circuits;
pub mod simulation;
pub mod analysis;
pub mod emotion;
pub mod evaluator;
pub mod metrics;
pub mod config;
pub mod runtime;

// Re-export the most common types for easier top-level use
pub use core::{AuraError, QubitId, StateVector};
pub use operations::{Angle, Operation};
pub use circuits::{CellLayout, Circuit, CircuitBuilder};
pub use simulation::{Backend, SimulationResult, Simulator};
pub use analysis::StateStatistics;
pub use emotion::{Emotion, EmotionState, Encoder, ParameterVector};
pub use evaluator::{Evaluation, FallbackReason, Mode, Observables};
pub use evaluator::fallback::{Clock, FixedClock, SystemClock};
pub use metrics::{Aggregator, MetricsSnapshot};
pub use config::{BackendKind, CoreConfig};
pub use runtime::{
    CircuitInfo, CycleReport, EmotionalCore, FeelRequest, FeelResult, Health, ResetAck, SessionId,
    SharedCore,
};

// Example 1: Entangling two qubits with a controlled rotation
// Builds a small circuit by hand, simulates it and derives its statistics.
/// ```
/// use aura400::{Angle, AuraError, CircuitBuilder, Operation, QubitId, Simulator, StateStatistics};
/// use std::f64::consts::PI;
///
/// let circuit = CircuitBuilder::new(2)
///     .add_op(Operation::Hadamard { target: QubitId(0) })
///     .add_op(Operation::ControlledRotateY {
///         control: QubitId(0),
///         target: QubitId(1),
///         angle: Angle::Fixed(PI),
///     })
///     .build()?;
///
/// let result = Simulator::new().run(&circuit, 256)?;
/// println!("Circuit:\n{}", circuit);
/// println!("Result:\n{}", result);
///
/// // Ry(pi) acts as a flip, so the pair ends in (|00> + |11>)/sqrt(2)
/// let stats = StateStatistics::from_state(result.state_vector());
/// assert!((stats.fidelity - 0.5).abs() < 1e-9);
/// assert!((stats.coherence - 1.0).abs() < 1e-9);
/// assert!(result.counts().keys().all(|k| k == "00" || k == "11"));
/// # Ok::<(), AuraError>(())
/// ```
#[doc(hidden)]
const _: () = (); // Attaches the preceding doc comment block to a hidden item

// Example 2: Feeling an emotion
// A single four-qubit cell fits the statevector limit, so the cycle is simulated.
/// ```
/// use aura400::{AuraError, CellLayout, CoreConfig, EmotionalCore, Evaluation, FeelRequest, Mode};
///
/// let layout = CellLayout { n_cells: 1, qubits_per_cell: 4, ..CellLayout::default() };
/// let mut core = EmotionalCore::new(CoreConfig::default().with_layout(layout).with_seed(7))?;
/// assert_eq!(core.mode(), Mode::Simulation);
///
/// let result = core.feel(&FeelRequest::new("joy", 0.8).with_shots(128))?;
/// assert!(matches!(result.evaluation, Evaluation::Simulated(_)));
/// assert_eq!(result.metrics.executions, 1);
/// assert_eq!(result.metrics.success_rate, 100.0);
/// # Ok::<(), AuraError>(())
/// ```
#[doc(hidden)]
const _: () = (); // Attaches the preceding doc comment block to a hidden item

// Example 3: Fallback mode
// The default layout needs 400 qubits, far past the statevector limit.
/// ```
/// use aura400::{AuraError, CoreConfig, EmotionalCore, FallbackReason, Evaluation, Mode};
///
/// let mut core = EmotionalCore::new(CoreConfig::default().with_seed(1))?;
/// assert_eq!(core.mode(), Mode::Fallback);
///
/// let report = core.tick()?;
/// match report.evaluation {
///     Evaluation::FellBack { observables, reason } => {
///         assert_eq!(reason, FallbackReason::Unavailable);
///         assert!(observables.fidelity.is_none());
///     }
///     other => panic!("unexpected evaluation {:?}", other),
/// }
/// println!("{}", core.metrics().to_prometheus());
/// # Ok::<(), AuraError>(())
/// ```
#[doc(hidden)]
const _: () = (); // Attaches the preceding doc comment block to a hidden item
