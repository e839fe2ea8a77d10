// src/evaluator/fallback.rs

//! Classical observables used when no statevector run is available.

use super::Observables;
use num_complex::Complex;
use std::time::{SystemTime, UNIX_EPOCH};

/// Base angular frequency of the classical approximation.
pub const BASE_FREQUENCY: f64 = 0.1;

/// Source of wall-clock seconds.
pub trait Clock {
    /// Seconds since the unix epoch.
    fn now_secs(&self) -> f64;
}

/// The system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_secs(&self) -> f64 {
        // A clock before the epoch reads as 0.
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs_f64())
            .unwrap_or(0.0)
    }
}

/// A clock frozen at a given instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedClock(pub f64);

impl Clock for FixedClock {
    fn now_secs(&self) -> f64 {
        self.0
    }
}

/// Deterministic observables at time `t` seconds.
///
/// Fidelity is not defined classically and is left empty.
pub fn observe(t: f64) -> Observables {
    let f = BASE_FREQUENCY;
    let intensity = ((f * t).sin() * (1.3 * f * t).cos() + 1.0) / 2.0 * (1.0 + 0.3 * (0.5 * f * t).sin());
    let coherence = Complex::from_polar(1.0, f * t).arg();
    let entanglement = 0.3 + 0.1 * (0.2 * f * t).sin();
    Observables {
        fidelity: None,
        intensity,
        coherence,
        entanglement,
    }
}
