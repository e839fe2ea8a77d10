//! Configuration for the emotional core.
//!
//! Every value has a default; [`CoreConfig::from_env`] overrides them from
//! environment variables.

use std::str::FromStr;

use serde::Serialize;

use crate::circuits::CellLayout;
use crate::core::AuraError;
use crate::core::aura_constants::{
    DEFAULT_MAX_QUBITS, DEFAULT_MAX_SHOTS, DEFAULT_SHOTS, MAX_SUPPORTED_QUBITS,
};

/// Which kind of backend evaluates cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// In-crate statevector simulation, subject to `max_qubits`.
    #[default]
    Statevector,
    /// Always use the classical approximation.
    Classical,
}

impl FromStr for BackendKind {
    type Err = AuraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "statevector" | "statevector_simulator" | "aer_simulator" | "quantum_simulator" => {
                Ok(Self::Statevector)
            }
            "classical" | "fallback" => Ok(Self::Classical),
            other => Err(AuraError::config(format!("unknown backend: {other}"))),
        }
    }
}

/// Complete core configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoreConfig {
    /// Register shape and intra-cell rotation angle.
    pub layout: CellLayout,
    /// Backend selection.
    pub backend: BackendKind,
    /// Widest register the statevector backend will simulate, at most
    /// [`MAX_SUPPORTED_QUBITS`].
    pub max_qubits: usize,
    /// Shots used by `tick` and by requests that give none.
    pub default_shots: u32,
    /// Largest shot count a request may ask for.
    pub max_shots: u32,
    /// Seed for the core's random source; the OS is used when absent.
    pub seed: Option<u64>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            layout: CellLayout::default(),
            backend: BackendKind::default(),
            max_qubits: DEFAULT_MAX_QUBITS,
            default_shots: DEFAULT_SHOTS,
            max_shots: DEFAULT_MAX_SHOTS,
            seed: None,
        }
    }
}

impl CoreConfig {
    /// Load configuration from environment variables.
    ///
    /// Optional variables:
    /// - `N_BLOCKS` -- number of cells (default 100)
    /// - `QUBITS_PER_BLOCK` -- qubits per cell (default 4)
    /// - `ROTATION_ANGLE` -- intra-cell rotation in radians (default π/3)
    /// - `QUANTUM_BACKEND` -- `statevector` or `classical` (default `statevector`)
    /// - `AURA_MAX_QUBITS` -- statevector register limit (default 20, at most 30)
    /// - `AURA_SHOTS` -- default shot count (default 1024)
    /// - `AURA_MAX_SHOTS` -- largest shot count per request (default 1048576)
    /// - `AURA_SEED` -- seed for the random source (default: from the OS)
    pub fn from_env() -> Result<Self, AuraError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AuraError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let n_cells = parse_or(&lookup, "N_BLOCKS", defaults.layout.n_cells)?;
        let qubits_per_cell = parse_or(&lookup, "QUBITS_PER_BLOCK", defaults.layout.qubits_per_cell)?;
        let rotation_angle = parse_or(&lookup, "ROTATION_ANGLE", defaults.layout.rotation_angle)?;
        let backend = parse_or(&lookup, "QUANTUM_BACKEND", defaults.backend)?;
        let max_qubits = parse_or(&lookup, "AURA_MAX_QUBITS", defaults.max_qubits)?;
        let default_shots = parse_or(&lookup, "AURA_SHOTS", defaults.default_shots)?;
        let max_shots = parse_or(&lookup, "AURA_MAX_SHOTS", defaults.max_shots)?;
        let seed = match lookup("AURA_SEED") {
            Some(raw) => Some(
                raw.trim()
                    .parse()
                    .map_err(|e| AuraError::config(format!("invalid AURA_SEED: {e}")))?,
            ),
            None => None,
        };

        let config = Self {
            layout: CellLayout { n_cells, qubits_per_cell, rotation_angle },
            backend,
            max_qubits,
            default_shots,
            max_shots,
            seed,
        };
        config.validate()?;
        Ok(config)
    }

    /// Rejects empty layouts, non-finite angles, a register limit above
    /// [`MAX_SUPPORTED_QUBITS`] and shot counts outside `1..=max_shots`.
    pub fn validate(&self) -> Result<(), AuraError> {
        self.layout.validate()?;
        if self.max_qubits > MAX_SUPPORTED_QUBITS {
            return Err(AuraError::config(format!(
                "max_qubits {} exceeds the supported maximum of {MAX_SUPPORTED_QUBITS}",
                self.max_qubits
            )));
        }
        if self.default_shots == 0 {
            return Err(AuraError::config("default shot count must be positive"));
        }
        if self.default_shots > self.max_shots {
            return Err(AuraError::config(format!(
                "default shot count {} exceeds max_shots {}",
                self.default_shots, self.max_shots
            )));
        }
        Ok(())
    }

    pub fn with_layout(mut self, layout: CellLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_backend(mut self, backend: BackendKind) -> Self {
        self.backend = backend;
        self
    }
}

/// Parse an optional variable, falling back to `default` when unset.
fn parse_or<F, T>(lookup: &F, name: &str, default: T) -> Result<T, AuraError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AuraError::config(format!("invalid {name}: {e}"))),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() -> Result<(), AuraError> {
        let config = CoreConfig::from_lookup(|_| None)?;
        assert_eq!(config, CoreConfig::default());
        assert_eq!(config.layout.total_qubits(), 400);
        Ok(())
    }

    #[test]
    fn overrides_are_applied() -> Result<(), AuraError> {
        let config = CoreConfig::from_lookup(lookup_from(&[
            ("N_BLOCKS", "3"),
            ("QUBITS_PER_BLOCK", " 2 "),
            ("ROTATION_ANGLE", "0.5"),
            ("QUANTUM_BACKEND", "Classical"),
            ("AURA_MAX_QUBITS", "12"),
            ("AURA_SHOTS", "64"),
            ("AURA_MAX_SHOTS", "128"),
            ("AURA_SEED", "7"),
        ]))?;
        assert_eq!(config.layout, CellLayout { n_cells: 3, qubits_per_cell: 2, rotation_angle: 0.5 });
        assert_eq!(config.backend, BackendKind::Classical);
        assert_eq!(config.max_qubits, 12);
        assert_eq!(config.default_shots, 64);
        assert_eq!(config.max_shots, 128);
        assert_eq!(config.seed, Some(7));
        Ok(())
    }

    #[test]
    fn bad_values_are_rejected() {
        for pairs in [
            [("N_BLOCKS", "many")],
            [("N_BLOCKS", "0")],
            [("QUBITS_PER_BLOCK", "-1")],
            [("ROTATION_ANGLE", "NaN")],
            [("QUANTUM_BACKEND", "ibmq")],
            [("AURA_SHOTS", "0")],
            [("AURA_MAX_SHOTS", "10")],
            [("AURA_SEED", "x")],
        ] {
            let result = CoreConfig::from_lookup(lookup_from(&pairs));
            assert!(matches!(result, Err(AuraError::Config { .. })), "{:?} accepted", pairs);
        }
    }

    #[test]
    fn register_limit_above_supported_ceiling_is_rejected() {
        let result = CoreConfig::from_lookup(lookup_from(&[
            ("N_BLOCKS", "10"),
            ("QUBITS_PER_BLOCK", "4"),
            ("AURA_MAX_QUBITS", "40"),
        ]));
        assert!(matches!(result, Err(AuraError::Config { .. })), "{:?}", result);

        let at_ceiling = CoreConfig::from_lookup(lookup_from(&[("AURA_MAX_QUBITS", "30")]));
        assert!(at_ceiling.is_ok());

        let hand_built = CoreConfig { max_qubits: MAX_SUPPORTED_QUBITS + 1, ..CoreConfig::default() };
        assert!(matches!(hand_built.validate(), Err(AuraError::Config { .. })));
    }

    #[test]
    fn aer_name_maps_to_statevector() {
        assert_eq!("aer_simulator".parse::<BackendKind>(), Ok(BackendKind::Statevector));
    }
}
