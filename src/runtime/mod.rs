// src/runtime/mod.rs

//! The emotional core: owns the encoder, evaluator, metrics, emotion state
//! and random source, and runs one cycle per request.

mod request;
mod session;
mod shared;

pub use request::{CircuitInfo, CycleReport, FeelRequest, FeelResult, Health, ResetAck};
pub use session::SessionId;
pub use shared::SharedCore;

use crate::circuits::topology::build_emotion_circuit;
use crate::config::{BackendKind, CoreConfig};
use crate::core::AuraError;
use crate::emotion::state::dominant_of;
use crate::emotion::{EMOTION_COUNT, EmotionInfo, EmotionState, Encoder, catalogue};
use crate::evaluator::fallback::{Clock, SystemClock};
use crate::evaluator::{Evaluation, Evaluator, Mode};
use crate::metrics::{Aggregator, MetricsSnapshot, SnapshotContext};
use crate::simulation::{Backend, Simulator};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Instant;
use tracing::{debug, error, info};

/// Context object for the emotional core.
///
/// Construction selects the evaluation mode, draws the first emotion state
/// and session id. [`EmotionalCore::reset`] repeats all of that and clears
/// the metrics.
#[derive(Debug)]
pub struct EmotionalCore {
    config: CoreConfig,
    encoder: Encoder,
    evaluator: Evaluator,
    aggregator: Aggregator,
    drive: [f64; EMOTION_COUNT],
    state: EmotionState,
    session: SessionId,
    rng: StdRng,
}

impl EmotionalCore {
    /// Builds a core with the statevector backend and the system clock.
    ///
    /// The random source is seeded from `config.seed`, or from the OS when
    /// no seed is set.
    pub fn new(config: CoreConfig) -> Result<Self, AuraError> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let backend = Box::new(Simulator::with_max_qubits(config.max_qubits));
        Self::with_parts(config, backend, Box::new(SystemClock), rng)
    }

    /// Builds a core around caller-supplied seams.
    pub fn with_parts(
        config: CoreConfig,
        backend: Box<dyn Backend + Send>,
        clock: Box<dyn Clock + Send>,
        mut rng: StdRng,
    ) -> Result<Self, AuraError> {
        config.validate()?;

        let prefer_classical = config.backend == BackendKind::Classical;
        let evaluator = Evaluator::new(config.layout, backend, clock, prefer_classical);
        let aggregator = Aggregator::new(evaluator.now_secs());
        let drive = random_drive(&mut rng);
        let state = EmotionState::random(&mut rng)?;
        let session = SessionId::generate(&mut rng);

        info!(
            session = %session,
            mode = %evaluator.mode(),
            backend = evaluator.backend_name(),
            cells = config.layout.n_cells,
            qubits = config.layout.total_qubits(),
            "emotional core initialized"
        );

        Ok(Self {
            encoder: Encoder::new(config.layout.n_cells),
            config,
            evaluator,
            aggregator,
            drive,
            state,
            session,
            rng,
        })
    }

    /// Feels an emotion: encodes it, points the emotional vector at it and
    /// runs one cycle.
    ///
    /// # Errors
    /// [`AuraError::InvalidInput`] for an unknown emotion, an intensity
    /// outside `[0, 1]` or a shot count outside `1..=max_shots`, with the
    /// counters left untouched.
    /// [`AuraError::Internal`] if the cycle produced unusable values.
    pub fn feel(&mut self, request: &FeelRequest) -> Result<FeelResult, AuraError> {
        let (emotion, intensity, shots) =
            request.validate(self.config.default_shots, self.config.max_shots)?;

        let params = self.encoder.encode_emotion(emotion, intensity, &mut self.rng);
        let mut drive = [0.0; EMOTION_COUNT];
        drive[emotion.index()] = intensity;
        self.drive = drive;

        let (evaluation, execution_time) = self.run_cycle(&params, shots)?;
        info!(
            session = %self.session,
            emotion = %emotion,
            intensity,
            shots,
            "emotion felt"
        );
        Ok(FeelResult {
            emotion,
            intensity,
            shots,
            evaluation,
            state: self.state,
            metrics: self.metrics(),
            execution_time,
        })
    }

    /// Runs one cycle on an explicit parameter vector.
    ///
    /// The vector must have one finite entry per cell and the shot count
    /// must lie in `1..=max_shots`.
    pub fn execute(&mut self, params: &[f64], shots: u32) -> Result<CycleReport, AuraError> {
        let cells = self.config.layout.n_cells;
        if params.len() != cells {
            return Err(AuraError::invalid_input(format!(
                "expected {} parameters, got {}",
                cells,
                params.len()
            )));
        }
        if let Some(bad) = params.iter().find(|p| !p.is_finite()) {
            return Err(AuraError::invalid_input(format!("parameter {} is not finite", bad)));
        }
        request::check_shots(shots, self.config.max_shots)?;
        self.cycle_report(params, shots)
    }

    /// One dashboard polling cycle, driven by the dominant emotion of the
    /// emotional vector at full intensity.
    pub fn tick(&mut self) -> Result<CycleReport, AuraError> {
        let emotion = dominant_of(&self.drive);
        let params = self.encoder.encode_emotion(emotion, 1.0, &mut self.rng);
        self.cycle_report(&params, self.config.default_shots)
    }

    /// Current metrics.
    pub fn metrics(&self) -> MetricsSnapshot {
        self.aggregator.snapshot(SnapshotContext {
            session_id: &self.session.short(),
            backend: self.evaluator.backend_name(),
            mode: self.evaluator.mode(),
            state: self.state,
        })
    }

    /// Clears the metrics, reselects the mode, and draws a new emotion state
    /// and session.
    pub fn reset(&mut self) -> Result<ResetAck, AuraError> {
        self.evaluator.reinitialize();
        let state = EmotionState::random(&mut self.rng)?;
        self.drive = random_drive(&mut self.rng);
        self.state = state;
        self.session = SessionId::generate(&mut self.rng);
        self.aggregator.reset(self.evaluator.now_secs());

        info!(session = %self.session, mode = %self.evaluator.mode(), "emotional core reset");
        Ok(ResetAck { status: "reset", session: self.session.short() })
    }

    pub fn health(&self) -> Health {
        Health {
            status: "ok",
            backend: self.evaluator.backend_name().to_string(),
            mode: self.evaluator.mode(),
            session: self.session.short(),
        }
    }

    pub fn circuit_info(&self) -> CircuitInfo {
        let layout = *self.evaluator.layout();
        CircuitInfo {
            mode: self.evaluator.mode(),
            backend: self.evaluator.backend_name().to_string(),
            total_qubits: layout.total_qubits(),
            max_qubits: self.config.max_qubits,
            operations: self.evaluator.template().map(|c| c.len()),
            parameters: layout.parameter_names(),
            layout,
        }
    }

    /// Text diagram of the emotional circuit. In fallback mode the circuit
    /// is built on demand.
    pub fn circuit_diagram(&self) -> Result<String, AuraError> {
        match self.evaluator.template() {
            Some(template) => Ok(template.to_string()),
            None => Ok(build_emotion_circuit(self.evaluator.layout())?.to_string()),
        }
    }

    /// Supported emotions and their base values.
    pub fn emotions(&self) -> Vec<EmotionInfo> {
        catalogue()
    }

    pub fn mode(&self) -> Mode {
        self.evaluator.mode()
    }

    pub fn session(&self) -> SessionId {
        self.session
    }

    pub fn state(&self) -> &EmotionState {
        &self.state
    }

    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    fn cycle_report(&mut self, params: &[f64], shots: u32) -> Result<CycleReport, AuraError> {
        let (evaluation, execution_time) = self.run_cycle(params, shots)?;
        Ok(CycleReport {
            shots,
            evaluation,
            state: self.state,
            metrics: self.metrics(),
            execution_time,
        })
    }

    /// Evaluates, updates the emotion state and records the cycle.
    ///
    /// Unusable observables or a failed state update count as an execution
    /// and an error, leave the state untouched and are returned as
    /// [`AuraError::Internal`].
    fn run_cycle(&mut self, params: &[f64], shots: u32) -> Result<(Evaluation, f64), AuraError> {
        let started = Instant::now();
        let evaluation = self.evaluator.evaluate(params, shots);

        if !evaluation.observables().is_finite() {
            let elapsed = started.elapsed().as_secs_f64();
            self.aggregator.record_internal_failure(elapsed);
            error!(session = %self.session, observables = ?evaluation.observables(), "cycle produced non-finite observables");
            return Err(AuraError::internal("cycle produced non-finite observables"));
        }

        let mut next = self.state;
        if let Err(e) = next.update(&self.drive, &mut self.rng) {
            let elapsed = started.elapsed().as_secs_f64();
            self.aggregator.record_internal_failure(elapsed);
            error!(session = %self.session, error = %e, "emotion state update failed");
            return Err(AuraError::internal(e.to_string()));
        }
        self.state = next;

        let elapsed = started.elapsed().as_secs_f64();
        self.aggregator.record_cycle(&evaluation, elapsed);
        debug!(
            session = %self.session,
            executions = self.aggregator.executions(),
            errors = self.aggregator.errors(),
            intensity = evaluation.observables().intensity,
            fell_back = matches!(evaluation, Evaluation::FellBack { .. }),
            elapsed,
            "cycle recorded"
        );
        Ok((evaluation, elapsed))
    }
}

fn random_drive<R: Rng + ?Sized>(rng: &mut R) -> [f64; EMOTION_COUNT] {
    let mut drive = [0.0; EMOTION_COUNT];
    for entry in drive.iter_mut() {
        *entry = rng.random::<f64>();
    }
    drive
}
