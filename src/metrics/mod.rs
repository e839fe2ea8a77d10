// src/metrics/mod.rs

//! Running counters over evaluation cycles and their exported snapshot.

use crate::emotion::EmotionState;
use crate::evaluator::{Evaluation, Mode, Observables};
use serde::Serialize;

/// Counters accumulated across cycles since construction or the last reset.
///
/// `errors <= executions` holds after every call.
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregator {
    executions: u64,
    errors: u64,
    avg_intensity: f64,
    last_execution_time: Option<f64>,
    start_time: f64,
    latest: Option<Observables>,
}

impl Aggregator {
    /// Empty counters starting at `start_time` (unix seconds).
    pub fn new(start_time: f64) -> Self {
        Self {
            executions: 0,
            errors: 0,
            avg_intensity: 0.0,
            last_execution_time: None,
            start_time,
            latest: None,
        }
    }

    /// Folds one completed cycle in. A cycle that fell back because the
    /// simulation failed also counts as an error.
    pub fn record_cycle(&mut self, evaluation: &Evaluation, elapsed_secs: f64) {
        self.executions += 1;
        if evaluation.simulation_failed() {
            self.errors += 1;
        }
        let observables = *evaluation.observables();
        let n = self.executions as f64;
        self.avg_intensity = (self.avg_intensity * (n - 1.0) + observables.intensity) / n;
        self.last_execution_time = Some(elapsed_secs);
        self.latest = Some(observables);
    }

    /// Counts a cycle that failed outside the evaluator. The running mean
    /// and the latest observables are left as they were.
    pub fn record_internal_failure(&mut self, elapsed_secs: f64) {
        self.executions += 1;
        self.errors += 1;
        self.last_execution_time = Some(elapsed_secs);
    }

    /// Restores every counter and restarts the clock at `start_time`.
    pub fn reset(&mut self, start_time: f64) {
        *self = Self::new(start_time);
    }

    pub fn executions(&self) -> u64 {
        self.executions
    }

    pub fn errors(&self) -> u64 {
        self.errors
    }

    pub fn avg_intensity(&self) -> f64 {
        self.avg_intensity
    }

    /// Percentage of executions that did not error; 100 before any run.
    pub fn success_rate(&self) -> f64 {
        if self.executions == 0 {
            100.0
        } else {
            100.0 * (self.executions - self.errors) as f64 / self.executions as f64
        }
    }

    pub fn latest(&self) -> Option<&Observables> {
        self.latest.as_ref()
    }

    /// Freezes the counters together with the session context.
    pub fn snapshot(&self, context: SnapshotContext<'_>) -> MetricsSnapshot {
        let latest = self.latest.unwrap_or(Observables {
            fidelity: None,
            intensity: 0.0,
            coherence: 0.0,
            entanglement: 0.0,
        });
        MetricsSnapshot {
            executions: self.executions,
            errors: self.errors,
            avg_intensity: self.avg_intensity,
            last_execution_time: self.last_execution_time,
            success_rate: self.success_rate(),
            start_time: self.start_time,
            quantum_intensity: latest.intensity,
            phase_coherence: latest.coherence,
            entanglement_measure: latest.entanglement,
            fidelity: latest.fidelity,
            session_id: context.session_id.to_string(),
            backend: context.backend.to_string(),
            mode: context.mode,
            state: context.state,
        }
    }
}

/// Session details stamped onto a snapshot.
#[derive(Debug, Clone, Copy)]
pub struct SnapshotContext<'a> {
    pub session_id: &'a str,
    pub backend: &'a str,
    pub mode: Mode,
    pub state: EmotionState,
}

/// Point-in-time view of the metrics. The serialized field layout is stable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsSnapshot {
    pub executions: u64,
    pub errors: u64,
    pub avg_intensity: f64,
    pub last_execution_time: Option<f64>,
    pub success_rate: f64,
    pub start_time: f64,
    pub quantum_intensity: f64,
    pub phase_coherence: f64,
    pub entanglement_measure: f64,
    pub fidelity: Option<f64>,
    pub session_id: String,
    pub backend: String,
    pub mode: Mode,
    pub state: EmotionState,
}

impl MetricsSnapshot {
    /// Prometheus text exposition. `aura400_fidelity` is only emitted when a
    /// fidelity is known.
    pub fn to_prometheus(&self) -> String {
        let mut out = String::new();
        let mut metric = |name: &str, kind: &str, value: f64| {
            out.push_str(&format!("# TYPE {name} {kind}\n{name} {value}\n"));
        };
        metric("aura400_executions_total", "counter", self.executions as f64);
        metric("aura400_errors_total", "counter", self.errors as f64);
        metric("aura400_avg_intensity", "gauge", self.avg_intensity);
        metric("aura400_quantum_intensity", "gauge", self.quantum_intensity);
        metric("aura400_phase_coherence", "gauge", self.phase_coherence);
        metric("aura400_entanglement_measure", "gauge", self.entanglement_measure);
        metric("aura400_success_rate", "gauge", self.success_rate);
        if let Some(fidelity) = self.fidelity {
            metric("aura400_fidelity", "gauge", fidelity);
        }
        out
    }
}
