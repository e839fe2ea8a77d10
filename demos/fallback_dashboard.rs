//! Polls the core the way a live dashboard would and prints one line per
//! tick. With the default 400-qubit layout every tick uses the classical
//! approximation.

use aura400::{AuraError, CoreConfig, EmotionalCore, FeelRequest, SharedCore};
use std::thread;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const TICKS: usize = 10;
const INTERVAL: Duration = Duration::from_millis(250);

fn main() -> Result<(), AuraError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(true)
        .init();

    let shared = SharedCore::new(EmotionalCore::new(CoreConfig::from_env()?)?);
    println!("health: {:?}", shared.health()?);

    // A second caller feels an emotion halfway through
    let feeler = {
        let shared = shared.clone();
        thread::spawn(move || {
            thread::sleep(INTERVAL * (TICKS as u32) / 2);
            shared.feel(&FeelRequest::new("anticipation", 0.9))
        })
    };

    for _ in 0..TICKS {
        let report = shared.tick()?;
        let obs = report.observables();
        println!(
            "dominant={:<12} intensity={:.3} coherence={:+.3} entanglement={:.3} executions={}",
            report.state.dominant(),
            obs.intensity,
            obs.coherence,
            obs.entanglement,
            report.metrics.executions
        );
        thread::sleep(INTERVAL);
    }

    feeler
        .join()
        .map_err(|_| AuraError::Internal { message: "feeler thread panicked".into() })??;

    print!("{}", shared.metrics()?.to_prometheus());
    println!("{:?}", shared.reset()?);
    Ok(())
}
