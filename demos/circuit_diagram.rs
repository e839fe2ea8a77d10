//! Prints the emotional circuit for a small layout and the statistics of one
//! bound run.

use aura400::circuits::topology::build_emotion_circuit;
use aura400::{AuraError, CellLayout, Simulator, StateStatistics};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), AuraError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(true)
        .init();

    let layout = CellLayout { n_cells: 2, qubits_per_cell: 4, ..CellLayout::default() };
    let template = build_emotion_circuit(&layout)?;
    println!("Parameters: {:?}", layout.parameter_names());
    println!("\nTemplate:\n{}", template);

    let bound = template.bind(&[0.9, 0.2])?;
    let result = Simulator::new().run(&bound, 1024)?;
    println!("{}", result);

    let stats = StateStatistics::from_state(result.state_vector());
    println!("fidelity     {:.4}", stats.fidelity);
    println!("intensity    {:.4}", stats.intensity);
    println!("coherence    {:.4}", stats.coherence);
    println!("entanglement {:.4}", stats.entanglement);
    Ok(())
}
