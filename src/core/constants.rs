//! Constants shared by the circuit, the encoder and the fallback model.

/// Default layout and numerical constants.
pub mod aura_constants {
    /// Number of cells (one parameter each) in the default layout.
    pub const DEFAULT_CELLS: usize = 100;
    /// Qubits grouped into every cell.
    pub const DEFAULT_QUBITS_PER_CELL: usize = 4;
    /// Angle of the intra-cell controlled rotations.
    pub const DEFAULT_ROTATION_ANGLE: f64 = std::f64::consts::FRAC_PI_3;
    /// Repetitions requested from the backend when the caller gives none.
    pub const DEFAULT_SHOTS: u32 = 1024;
    /// Widest register the statevector backend accepts by default.
    pub const DEFAULT_MAX_QUBITS: usize = 20;
    /// Hard ceiling on any statevector register: `2^30` amplitudes is 16 GiB.
    pub const MAX_SUPPORTED_QUBITS: usize = 30;
    /// Largest shot count a single cycle accepts by default.
    pub const DEFAULT_MAX_SHOTS: u32 = 1 << 20;
    /// Standard deviation of the encoder noise.
    pub const ENCODER_SPREAD: f64 = 0.05;
    /// Base value used for unrecognized emotion labels.
    pub const NEUTRAL_BASE: f64 = 0.5;
    /// Scale of the uniform noise blended into the emotion state every cycle.
    pub const STATE_NOISE_SCALE: f64 = 0.1;
    /// Eigenvalues at or below this are dropped from the entropy sum.
    pub const EIGENVALUE_CUTOFF: f64 = 1e-12;
    /// Number of leading amplitudes summed into the intensity statistic.
    pub const INTENSITY_AMPLITUDES: usize = 8;
    /// Qubits kept when reducing the state for the entanglement measure.
    pub const ENTANGLEMENT_QUBITS: usize = 2;
}
