// src/runtime/request.rs

//! Request and response types of the emotional core.

use crate::circuits::CellLayout;
use crate::core::AuraError;
use crate::emotion::{Emotion, EmotionState};
use crate::evaluator::{Evaluation, Mode, Observables};
use crate::metrics::MetricsSnapshot;
use serde::{Deserialize, Serialize};

/// A request to feel an emotion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeelRequest {
    /// Emotion label, case-insensitive.
    pub emotion: String,
    /// Strength in `[0, 1]`.
    pub intensity: f64,
    /// Shot count; the configured default when absent.
    #[serde(default)]
    pub shots: Option<u32>,
}

impl FeelRequest {
    pub fn new(emotion: impl Into<String>, intensity: f64) -> Self {
        Self { emotion: emotion.into(), intensity, shots: None }
    }

    pub fn with_shots(mut self, shots: u32) -> Self {
        self.shots = Some(shots);
        self
    }

    /// Resolves the emotion, intensity and shot count, or rejects the request.
    ///
    /// The shot count must lie in `1..=max_shots`.
    pub fn validate(&self, default_shots: u32, max_shots: u32) -> Result<(Emotion, f64, u32), AuraError> {
        let emotion: Emotion = self.emotion.parse()?;
        if !self.intensity.is_finite() || !(0.0..=1.0).contains(&self.intensity) {
            return Err(AuraError::invalid_input(format!(
                "intensity must be within [0, 1], got {}",
                self.intensity
            )));
        }
        let shots = self.shots.unwrap_or(default_shots);
        check_shots(shots, max_shots)?;
        Ok((emotion, self.intensity, shots))
    }
}

/// Rejects a zero shot count or one above `max_shots`.
pub(crate) fn check_shots(shots: u32, max_shots: u32) -> Result<(), AuraError> {
    if shots == 0 {
        return Err(AuraError::invalid_input("shot count must be positive"));
    }
    if shots > max_shots {
        return Err(AuraError::invalid_input(format!(
            "shot count {} exceeds the maximum of {}",
            shots, max_shots
        )));
    }
    Ok(())
}

/// Result of a `feel` call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeelResult {
    pub emotion: Emotion,
    pub intensity: f64,
    pub shots: u32,
    pub evaluation: Evaluation,
    pub state: EmotionState,
    pub metrics: MetricsSnapshot,
    pub execution_time: f64,
}

impl FeelResult {
    pub fn observables(&self) -> &Observables {
        self.evaluation.observables()
    }
}

/// Result of one `execute` or `tick` cycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CycleReport {
    pub shots: u32,
    pub evaluation: Evaluation,
    pub state: EmotionState,
    pub metrics: MetricsSnapshot,
    pub execution_time: f64,
}

impl CycleReport {
    pub fn observables(&self) -> &Observables {
        self.evaluation.observables()
    }
}

/// Confirmation of a reset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResetAck {
    pub status: &'static str,
    pub session: String,
}

/// Liveness report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub backend: String,
    pub mode: Mode,
    pub session: String,
}

/// Description of the circuit the core evaluates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CircuitInfo {
    pub mode: Mode,
    pub backend: String,
    pub layout: CellLayout,
    pub total_qubits: usize,
    pub max_qubits: usize,
    /// Gate count of the cached template; `None` in fallback mode.
    pub operations: Option<usize>,
    pub parameters: Vec<String>,
}
