// tests/core_tests.rs

use aura400::{
    AuraError, Backend, BackendKind, CellLayout, Circuit, CoreConfig, EmotionalCore, Evaluation,
    FallbackReason, FeelRequest, FixedClock, Mode, SharedCore, SimulationResult, Simulator, StateVector,
};
use num_complex::Complex;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::{BTreeMap, HashSet};
use std::thread;

// One cell of four qubits fits any statevector limit
fn small_layout() -> CellLayout {
    CellLayout { n_cells: 1, qubits_per_cell: 4, ..CellLayout::default() }
}

// Delegates to the simulator but fails on the chosen (1-based) runs
struct FlakyBackend {
    inner: Simulator,
    fail_on: HashSet<usize>,
    runs: usize,
}

impl FlakyBackend {
    fn new(fail_on: &[usize]) -> Self {
        Self { inner: Simulator::new(), fail_on: fail_on.iter().copied().collect(), runs: 0 }
    }
}

impl Backend for FlakyBackend {
    fn name(&self) -> &str {
        "flaky"
    }

    fn max_qubits(&self) -> usize {
        self.inner.max_qubits()
    }

    fn run(&mut self, circuit: &Circuit, shots: u32) -> Result<SimulationResult, AuraError> {
        self.runs += 1;
        if self.fail_on.contains(&self.runs) {
            return Err(AuraError::Simulation { message: format!("injected failure on run {}", self.runs) });
        }
        self.inner.run(circuit, shots)
    }
}

// Simulates normally on the first run, then reports an all-NaN state
struct NanBackend {
    inner: Simulator,
    runs: usize,
}

impl Backend for NanBackend {
    fn name(&self) -> &str {
        "nan"
    }

    fn max_qubits(&self) -> usize {
        self.inner.max_qubits()
    }

    fn run(&mut self, circuit: &Circuit, shots: u32) -> Result<SimulationResult, AuraError> {
        self.runs += 1;
        if self.runs == 1 {
            return self.inner.run(circuit, shots);
        }
        let dim = 1usize << circuit.num_qubits();
        let state = StateVector::new(vec![Complex::new(f64::NAN, 0.0); dim])
            .ok_or_else(|| AuraError::Internal { message: "bad dimension".to_string() })?;
        Ok(SimulationResult::new(state, BTreeMap::new(), shots, "nan"))
    }
}

fn core_with(backend: impl Backend + Send + 'static, layout: CellLayout) -> Result<EmotionalCore, AuraError> {
    EmotionalCore::with_parts(
        CoreConfig::default().with_layout(layout),
        Box::new(backend),
        Box::new(FixedClock(1_000.0)),
        StdRng::seed_from_u64(2024),
    )
}

#[test]
fn test_failures_on_cycles_three_and_seven() -> Result<(), AuraError> {
    let mut core = core_with(FlakyBackend::new(&[3, 7]), small_layout())?;
    assert_eq!(core.mode(), Mode::Simulation);

    for cycle in 1..=10 {
        let result = core.feel(&FeelRequest::new("joy", 0.7).with_shots(64))?;
        match (&result.evaluation, cycle) {
            (Evaluation::FellBack { reason: FallbackReason::SimulationFailed(message), observables }, 3 | 7) => {
                assert!(message.contains("injected failure"));
                assert!(observables.fidelity.is_none());
            }
            (Evaluation::Simulated(observables), _) => assert!(observables.fidelity.is_some()),
            (other, _) => panic!("unexpected evaluation on cycle {}: {:?}", cycle, other),
        }
    }

    let metrics = core.metrics();
    assert_eq!(metrics.executions, 10);
    assert_eq!(metrics.errors, 2);
    assert!((metrics.success_rate - 80.0).abs() < 1e-12);
    Ok(())
}

#[test]
fn test_running_average_matches_observed_intensities() -> Result<(), AuraError> {
    let mut core = core_with(Simulator::new(), small_layout())?;
    let mut observed = Vec::new();
    for emotion in ["fear", "trust", "anger", "surprise"] {
        observed.push(core.feel(&FeelRequest::new(emotion, 0.5))?.observables().intensity);
    }
    let mean = observed.iter().sum::<f64>() / observed.len() as f64;
    assert!((core.metrics().avg_intensity - mean).abs() < 1e-9);
    Ok(())
}

#[test]
fn test_invalid_requests_leave_counters_untouched() -> Result<(), AuraError> {
    let mut core = core_with(Simulator::new(), small_layout())?;
    let before = core.metrics();
    for request in [
        FeelRequest::new("nostalgia", 0.5),
        FeelRequest::new("joy", 2.0),
        FeelRequest::new("joy", 0.5).with_shots(0),
    ] {
        assert!(matches!(core.feel(&request), Err(AuraError::InvalidInput { .. })));
    }
    assert!(matches!(core.execute(&[0.1, 0.2], 16), Err(AuraError::InvalidInput { .. })));
    assert_eq!(core.metrics(), before);
    Ok(())
}

#[test]
fn test_reset_clears_counters_and_changes_session() -> Result<(), AuraError> {
    let mut core = core_with(FlakyBackend::new(&[1]), small_layout())?;
    core.feel(&FeelRequest::new("sadness", 0.9))?;
    core.tick()?;
    let old_session = core.session().to_string();
    assert_eq!(core.metrics().errors, 1);

    let ack = core.reset()?;
    assert_eq!(ack.status, "reset");
    assert_ne!(ack.session, old_session);
    assert_eq!(ack.session, core.health().session);

    let metrics = core.metrics();
    assert_eq!((metrics.executions, metrics.errors), (0, 0));
    assert_eq!(metrics.avg_intensity, 0.0);
    assert_eq!(metrics.success_rate, 100.0);
    assert_eq!(metrics.last_execution_time, None);
    assert_eq!(metrics.start_time, 1_000.0);
    Ok(())
}

#[test]
fn test_mode_selection() -> Result<(), AuraError> {
    let default_core = EmotionalCore::new(CoreConfig::default().with_seed(5))?;
    assert_eq!(default_core.mode(), Mode::Fallback);
    assert_eq!(default_core.circuit_info().total_qubits, 400);

    let small = EmotionalCore::new(CoreConfig::default().with_layout(small_layout()).with_seed(5))?;
    assert_eq!(small.mode(), Mode::Simulation);
    assert_eq!(small.circuit_info().operations, Some(4 + 3 + 1));

    let classical = EmotionalCore::new(
        CoreConfig::default().with_layout(small_layout()).with_backend(BackendKind::Classical).with_seed(5),
    )?;
    assert_eq!(classical.mode(), Mode::Fallback);
    Ok(())
}

#[test]
fn test_fallback_cycles_are_not_errors() -> Result<(), AuraError> {
    let mut core = core_with(Simulator::new(), CellLayout::default())?;
    for _ in 0..3 {
        let report = core.tick()?;
        assert!(matches!(
            report.evaluation,
            Evaluation::FellBack { reason: FallbackReason::Unavailable, .. }
        ));
    }
    let metrics = core.metrics();
    assert_eq!((metrics.executions, metrics.errors), (3, 0));
    assert_eq!(metrics.fidelity, None);
    assert!(!metrics.to_prometheus().contains("aura400_fidelity"));
    Ok(())
}

#[test]
fn test_emotion_state_stays_a_distribution() -> Result<(), AuraError> {
    let mut core = core_with(Simulator::new(), small_layout())?;
    let emotions = core.emotions();
    for (i, emotion) in emotions.iter().enumerate() {
        let result = core.feel(&FeelRequest::new(emotion.name, (i as f64) / 8.0))?;
        let probabilities = result.state.probabilities();
        assert!(probabilities.iter().all(|p| *p >= 0.0));
        assert!((probabilities.iter().sum::<f64>() - 1.0).abs() < 1e-9);
    }
    Ok(())
}

#[test]
fn test_snapshot_json_layout() -> Result<(), AuraError> {
    let mut core = core_with(Simulator::new(), small_layout())?;
    core.feel(&FeelRequest::new("trust", 0.6))?;
    let json = serde_json::to_value(core.metrics()).map_err(|e| AuraError::Internal { message: e.to_string() })?;

    let keys: Vec<&str> = json.as_object().map(|m| m.keys().map(String::as_str).collect()).unwrap_or_default();
    for field in [
        "executions",
        "errors",
        "avg_intensity",
        "last_execution_time",
        "success_rate",
        "start_time",
        "quantum_intensity",
        "phase_coherence",
        "entanglement_measure",
        "fidelity",
        "session_id",
        "backend",
        "mode",
        "state",
    ] {
        assert!(keys.contains(&field), "missing {} in {}", field, json);
    }
    assert_eq!(json["mode"], "simulation");
    assert_eq!(json["backend"], "statevector_simulator");
    assert_eq!(json["session_id"].as_str().map(str::len), Some(8));
    assert!(json["state"]["trust"].is_number());
    Ok(())
}

#[test]
fn test_prometheus_exposition() -> Result<(), AuraError> {
    let mut core = core_with(Simulator::new(), small_layout())?;
    core.feel(&FeelRequest::new("joy", 1.0))?;
    let text = core.metrics().to_prometheus();
    for name in [
        "aura400_executions_total 1",
        "aura400_errors_total 0",
        "aura400_avg_intensity ",
        "aura400_quantum_intensity ",
        "aura400_phase_coherence ",
        "aura400_entanglement_measure ",
        "aura400_success_rate 100",
        "aura400_fidelity ",
    ] {
        assert!(text.lines().any(|l| l.starts_with(name)), "missing {:?} in\n{}", name, text);
    }
    Ok(())
}

#[test]
fn test_shared_core_serializes_callers() -> Result<(), AuraError> {
    let shared = SharedCore::new(core_with(Simulator::new(), small_layout())?);
    let handles: Vec<_> = (0..4)
        .map(|t| {
            let shared = shared.clone();
            thread::spawn(move || -> Result<(), AuraError> {
                for i in 0..5 {
                    if (t + i) % 2 == 0 {
                        shared.feel(&FeelRequest::new("anticipation", 0.4))?;
                    } else {
                        shared.tick()?;
                    }
                }
                Ok(())
            })
        })
        .collect();
    for handle in handles {
        handle.join().map_err(|_| AuraError::Internal { message: "worker panicked".into() })??;
    }

    let metrics = shared.metrics()?;
    assert_eq!(metrics.executions, 20);
    assert_eq!(metrics.errors, 0);
    assert_eq!(shared.health()?.status, "ok");
    Ok(())
}

#[test]
fn test_nan_state_is_an_internal_failure() -> Result<(), AuraError> {
    let mut core = core_with(NanBackend { inner: Simulator::new(), runs: 0 }, small_layout())?;
    assert_eq!(core.mode(), Mode::Simulation);

    core.feel(&FeelRequest::new("joy", 0.6).with_shots(32))?;
    let state_before = *core.state();
    let avg_before = core.metrics().avg_intensity;

    let outcome = core.feel(&FeelRequest::new("sadness", 0.9).with_shots(32));
    assert!(matches!(outcome, Err(AuraError::Internal { .. })), "{:?}", outcome);

    let metrics = core.metrics();
    assert_eq!(metrics.executions, 2);
    assert_eq!(metrics.errors, 1);
    assert_eq!(metrics.avg_intensity, avg_before);
    assert!(metrics.avg_intensity.is_finite());
    assert_eq!(*core.state(), state_before);
    assert!((metrics.success_rate - 50.0).abs() < 1e-12);
    Ok(())
}

#[test]
fn test_oversized_shot_counts_are_rejected() -> Result<(), AuraError> {
    let mut core = EmotionalCore::with_parts(
        CoreConfig { default_shots: 128, max_shots: 256, ..CoreConfig::default().with_layout(small_layout()) },
        Box::new(Simulator::new()),
        Box::new(FixedClock(1_000.0)),
        StdRng::seed_from_u64(7),
    )?;
    assert!(matches!(
        core.feel(&FeelRequest::new("joy", 0.5).with_shots(257)),
        Err(AuraError::InvalidInput { .. })
    ));
    assert!(matches!(core.execute(&[0.5], u32::MAX), Err(AuraError::InvalidInput { .. })));
    assert_eq!(core.metrics().executions, 0);

    assert_eq!(core.feel(&FeelRequest::new("joy", 0.5).with_shots(256))?.shots, 256);
    Ok(())
}
