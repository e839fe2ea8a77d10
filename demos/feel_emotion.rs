//! Feels one emotion and prints the result as JSON.
//!
//! Usage:
//!   cargo run --example feel_emotion -- <emotion> [intensity] [shots]
//!   cargo run --example feel_emotion -- --list
//!   cargo run --example feel_emotion -- --info
//!   cargo run --example feel_emotion -- <emotion> --prometheus
//!
//! Layout and backend come from the environment (`N_BLOCKS`,
//! `QUBITS_PER_BLOCK`, `QUANTUM_BACKEND`, ...). Try `N_BLOCKS=2
//! QUBITS_PER_BLOCK=4` for a simulated run.

use aura400::{AuraError, CoreConfig, EmotionalCore, FeelRequest};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), AuraError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(true)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let prometheus = args.iter().any(|a| a == "--prometheus");
    let positional: Vec<&str> = args.iter().filter(|a| !a.starts_with("--")).map(String::as_str).collect();

    let mut core = EmotionalCore::new(CoreConfig::from_env()?)?;

    if args.iter().any(|a| a == "--list") {
        println!("Available emotions:");
        for emotion in core.emotions() {
            println!("- {:<13} base {:.2}", emotion.name, emotion.base);
        }
        return Ok(());
    }

    if args.iter().any(|a| a == "--info") {
        println!("{}", to_json(&core.circuit_info())?);
        return Ok(());
    }

    let Some(emotion) = positional.first() else {
        eprintln!("usage: feel_emotion <emotion> [intensity] [shots] | --list | --info");
        return Err(AuraError::InvalidInput { message: "no emotion given".into() });
    };
    let intensity = match positional.get(1) {
        Some(raw) => raw
            .parse()
            .map_err(|e| AuraError::InvalidInput { message: format!("invalid intensity '{}': {}", raw, e) })?,
        None => 1.0,
    };
    let mut request = FeelRequest::new(*emotion, intensity);
    if let Some(raw) = positional.get(2) {
        let shots = raw
            .parse()
            .map_err(|e| AuraError::InvalidInput { message: format!("invalid shots '{}': {}", raw, e) })?;
        request = request.with_shots(shots);
    }

    let result = core.feel(&request)?;
    if prometheus {
        print!("{}", result.metrics.to_prometheus());
    } else {
        println!("{}", to_json(&result)?);
    }
    Ok(())
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, AuraError> {
    serde_json::to_string_pretty(value).map_err(|e| AuraError::Internal { message: e.to_string() })
}
