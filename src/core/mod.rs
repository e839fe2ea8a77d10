// src/core/mod.rs

//! Core data structures and types

pub mod error;
pub mod qubit;
pub mod state;

pub use error::AuraError;
pub use qubit::QubitId;
pub use state::StateVector;

pub mod constants;
pub use constants::aura_constants;
