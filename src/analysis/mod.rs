// src/analysis/mod.rs

//! Summary statistics extracted from a state vector: fidelity, intensity,
//! purity and the von Neumann entropy of a reduced subsystem.

use crate::core::aura_constants::{EIGENVALUE_CUTOFF, ENTANGLEMENT_QUBITS, INTENSITY_AMPLITUDES};
use crate::core::{AuraError, StateVector};
use num_complex::Complex;
use num_traits::Zero;

const DEFAULT_NORM_TOLERANCE: f64 = 1e-9;
const JACOBI_MAX_SWEEPS: usize = 64;
const JACOBI_OFF_DIAGONAL_TOLERANCE: f64 = 1e-24;

/// The four statistics derived from a simulated state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateStatistics {
    /// `|c_0|^2`.
    pub fidelity: f64,
    /// Probability mass of the first 8 basis states.
    pub intensity: f64,
    /// `Tr(rho^2)` of the full density matrix.
    pub coherence: f64,
    /// Entropy of the reduced state over qubits 0 and 1, in bits.
    pub entanglement: f64,
}

impl StateStatistics {
    /// Computes every statistic for `state`.
    pub fn from_state(state: &StateVector) -> Self {
        Self {
            fidelity: fidelity(state),
            intensity: intensity(state),
            coherence: purity(state),
            entanglement: entanglement_entropy(state, ENTANGLEMENT_QUBITS),
        }
    }
}

/// Squared magnitude of the first amplitude.
pub fn fidelity(state: &StateVector) -> f64 {
    state.vector().first().map(|c| c.norm_sqr()).unwrap_or(0.0)
}

/// Sum of the squared magnitudes of the first 8 amplitudes.
pub fn intensity(state: &StateVector) -> f64 {
    state.vector().iter().take(INTENSITY_AMPLITUDES).map(|c| c.norm_sqr()).sum()
}

/// Purity `Tr(rho^2)` of `rho = |psi><psi|`.
///
/// For a pure state `Tr(rho^2) = (<psi|psi>)^2`, which avoids building the
/// `2^n x 2^n` outer product.
pub fn purity(state: &StateVector) -> f64 {
    let norm_sq: f64 = state.vector().iter().map(|c| c.norm_sqr()).sum();
    norm_sq * norm_sq
}

/// Reduced density matrix over the lowest `keep` qubits (the rest traced out).
///
/// The result is `2^keep x 2^keep`, indexed little-endian like the state.
/// `keep` is capped at the register width.
pub fn reduced_density_matrix(state: &StateVector, keep: usize) -> Vec<Vec<Complex<f64>>> {
    let keep = keep.min(state.num_qubits());
    let keep_dim = 1usize << keep;
    let rest_dim = state.dim() / keep_dim;
    let psi = state.vector();

    let mut rho = vec![vec![Complex::zero(); keep_dim]; keep_dim];
    for rest in 0..rest_dim {
        let offset = rest * keep_dim;
        for a in 0..keep_dim {
            let amp_a = psi[offset + a];
            for b in 0..keep_dim {
                rho[a][b] += amp_a * psi[offset + b].conj();
            }
        }
    }
    rho
}

/// Von Neumann entropy (base 2) of the reduced state over the lowest `keep`
/// qubits. Eigenvalues at or below `1e-12` are excluded from the sum.
pub fn entanglement_entropy(state: &StateVector, keep: usize) -> f64 {
    let rho = reduced_density_matrix(state, keep);
    let entropy: f64 = hermitian_eigenvalues(&rho)
        .into_iter()
        .filter(|lambda| *lambda > EIGENVALUE_CUTOFF)
        .map(|lambda| -lambda * lambda.log2())
        .sum();
    entropy.max(0.0)
}

/// Eigenvalues of a Hermitian matrix, ascending.
///
/// `H = A + iB` is embedded as the real symmetric `[[A, -B], [B, A]]`, whose
/// spectrum is that of `H` with every eigenvalue doubled.
pub fn hermitian_eigenvalues(matrix: &[Vec<Complex<f64>>]) -> Vec<f64> {
    let n = matrix.len();
    let mut embedded = vec![vec![0.0; 2 * n]; 2 * n];
    for (i, row) in matrix.iter().enumerate() {
        for (j, value) in row.iter().enumerate().take(n) {
            embedded[i][j] = value.re;
            embedded[i + n][j + n] = value.re;
            embedded[i][j + n] = -value.im;
            embedded[i + n][j] = value.im;
        }
    }
    let mut doubled = symmetric_eigenvalues(embedded);
    doubled.sort_by(|a, b| a.total_cmp(b));
    doubled.into_iter().step_by(2).collect()
}

/// Cyclic Jacobi rotation for a real symmetric matrix.
fn symmetric_eigenvalues(mut a: Vec<Vec<f64>>) -> Vec<f64> {
    let n = a.len();
    for _ in 0..JACOBI_MAX_SWEEPS {
        let off_diagonal: f64 = (0..n)
            .flat_map(|p| (0..n).filter(move |q| *q != p).map(move |q| (p, q)))
            .map(|(p, q)| a[p][q] * a[p][q])
            .sum();
        if off_diagonal < JACOBI_OFF_DIAGONAL_TOLERANCE {
            break;
        }

        for p in 0..n {
            for q in (p + 1)..n {
                let apq = a[p][q];
                if apq == 0.0 {
                    continue;
                }
                let theta = (a[q][q] - a[p][p]) / (2.0 * apq);
                let t = theta.signum() / (theta.abs() + (theta * theta + 1.0).sqrt());
                let c = 1.0 / (t * t + 1.0).sqrt();
                let s = t * c;

                for row in a.iter_mut() {
                    let (akp, akq) = (row[p], row[q]);
                    row[p] = c * akp - s * akq;
                    row[q] = s * akp + c * akq;
                }
                for k in 0..n {
                    let (apk, aqk) = (a[p][k], a[q][k]);
                    a[p][k] = c * apk - s * aqk;
                    a[q][k] = s * apk + c * aqk;
                }
            }
        }
    }
    (0..n).map(|i| a[i][i]).collect()
}

/// Checks that the squared amplitudes sum to 1 within `tolerance`
/// (default `1e-9`).
///
/// # Returns
/// * `Ok(())` if normalized within tolerance.
/// * `Err(AuraError::Simulation)` otherwise.
pub fn check_normalization(state: &StateVector, tolerance: Option<f64>) -> Result<(), AuraError> {
    let effective_tolerance = tolerance.unwrap_or(DEFAULT_NORM_TOLERANCE);
    let norm_sq: f64 = state.vector().iter().map(|c| c.norm_sqr()).sum();
    if (norm_sq - 1.0).abs() > effective_tolerance {
        Err(AuraError::simulation(format!(
            "state vector normalization failed: sum(|c_i|^2) = {} (deviation > {})",
            norm_sq, effective_tolerance
        )))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_1_SQRT_2;

    const TOLERANCE: f64 = 1e-9;

    fn state(amplitudes: Vec<Complex<f64>>) -> StateVector {
        StateVector::new(amplitudes).expect("power-of-two length")
    }

    fn real(values: &[f64]) -> Vec<Complex<f64>> {
        values.iter().map(|v| Complex::new(*v, 0.0)).collect()
    }

    #[test]
    fn test_product_state_has_zero_entropy_and_unit_purity() {
        let s = state(real(&[1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]));
        let stats = StateStatistics::from_state(&s);
        assert!((stats.fidelity - 1.0).abs() < TOLERANCE);
        assert!((stats.intensity - 1.0).abs() < TOLERANCE);
        assert!((stats.coherence - 1.0).abs() < TOLERANCE);
        assert!(stats.entanglement.abs() < TOLERANCE);
    }

    #[test]
    fn test_qubit0_entangled_with_qubit2_gives_one_bit() {
        // (|000> + |101>)/sqrt(2): q0 and q2 correlated, q1 idle
        let mut amps = vec![Complex::zero(); 8];
        amps[0] = Complex::new(FRAC_1_SQRT_2, 0.0);
        amps[5] = Complex::new(FRAC_1_SQRT_2, 0.0);
        let entropy = entanglement_entropy(&state(amps), 2);
        assert!((entropy - 1.0).abs() < 1e-6, "entropy was {}", entropy);
    }

    #[test]
    fn test_two_qubit_register_keeps_whole_pure_state() {
        // Bell state on a 2-qubit register: the reduced state is the full pure state
        let s = state(real(&[FRAC_1_SQRT_2, 0.0, 0.0, FRAC_1_SQRT_2]));
        assert!(entanglement_entropy(&s, 2).abs() < 1e-6);
        // Keeping only q0 of the Bell pair is maximally mixed
        assert!((entanglement_entropy(&s, 1) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_complex_hermitian_spectrum() {
        // [[2, i], [-i, 2]] has eigenvalues 1 and 3
        let m = vec![
            vec![Complex::new(2.0, 0.0), Complex::new(0.0, 1.0)],
            vec![Complex::new(0.0, -1.0), Complex::new(2.0, 0.0)],
        ];
        let eig = hermitian_eigenvalues(&m);
        assert_eq!(eig.len(), 2);
        assert!((eig[0] - 1.0).abs() < 1e-9);
        assert!((eig[1] - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_intensity_only_counts_first_eight_amplitudes() {
        let mut amps = vec![Complex::zero(); 16];
        amps[0] = Complex::new(FRAC_1_SQRT_2, 0.0);
        amps[8] = Complex::new(FRAC_1_SQRT_2, 0.0);
        assert!((intensity(&state(amps)) - 0.5).abs() < TOLERANCE);
    }

    #[test]
    fn test_normalization_check() {
        assert!(check_normalization(&state(real(&[FRAC_1_SQRT_2, FRAC_1_SQRT_2])), None).is_ok());
        assert!(check_normalization(&state(real(&[1.0, 1.0])), None).is_err());
    }
}
