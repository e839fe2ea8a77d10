// src/simulation/engine.rs
use crate::core::aura_constants::MAX_SUPPORTED_QUBITS;
use crate::core::{AuraError, QubitId, StateVector};
use crate::operations::Operation;
use num_complex::Complex;
use num_traits::Zero;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Statevector engine: holds the `2^n` amplitudes of a register and applies
/// gates to them in place.
/// (Internal visibility)
pub(crate) struct SimulationEngine {
    state: StateVector,
    num_qubits: usize,
}

impl SimulationEngine {
    /// Initializes the register to `|0...0>`.
    ///
    /// Fails for an empty register, or one wider than `max_qubits` or
    /// [`MAX_SUPPORTED_QUBITS`], before anything is allocated.
    pub(crate) fn init(num_qubits: usize, max_qubits: usize) -> Result<Self, AuraError> {
        if num_qubits == 0 {
            return Err(AuraError::simulation("cannot initialize a register of zero qubits"));
        }
        if num_qubits > MAX_SUPPORTED_QUBITS {
            return Err(AuraError::simulation(format!(
                "register of {} qubits exceeds the supported maximum of {}",
                num_qubits, MAX_SUPPORTED_QUBITS
            )));
        }
        if num_qubits > max_qubits {
            return Err(AuraError::simulation(format!(
                "register of {} qubits exceeds the statevector limit of {}",
                num_qubits, max_qubits
            )));
        }
        let dim = 1usize.checked_shl(num_qubits as u32).ok_or_else(|| {
            AuraError::simulation("register too wide, state vector dimension overflows usize")
        })?;

        Ok(Self {
            state: StateVector::zero_state(num_qubits, dim),
            num_qubits,
        })
    }

    #[cfg(test)]
    pub(crate) fn set_state(&mut self, state: StateVector) -> Result<(), AuraError> {
        if state.dim() != self.state.dim() {
            Err(AuraError::simulation(format!(
                "cannot set state: provided dimension {} does not match engine dimension {}",
                state.dim(),
                self.state.dim()
            )))
        } else {
            self.state = state;
            Ok(())
        }
    }

    #[cfg(test)]
    pub(crate) fn state(&self) -> &StateVector {
        &self.state
    }

    pub(crate) fn into_state(self) -> StateVector {
        self.state
    }

    /// Applies one gate to the register.
    pub(crate) fn apply_operation(&mut self, op: &Operation) -> Result<(), AuraError> {
        match op {
            Operation::Hadamard { target } => {
                let t = self.check_qubit(target)?;
                self.apply_single_qubit_gate(t, &hadamard_matrix())
            }
            Operation::RotateY { target, angle } => {
                let t = self.check_qubit(target)?;
                self.apply_single_qubit_gate(t, &ry_matrix(angle.value()?))
            }
            Operation::ControlledRotateY { control, target, angle } => {
                let c = self.check_qubit(control)?;
                let t = self.check_qubit(target)?;
                let u = ry_matrix(angle.value()?);
                // Basis order |control, target>: |00>, |01>, |10>, |11>
                let one = Complex::new(1.0, 0.0);
                let zero = Complex::zero();
                let controlled_u = [
                    [one, zero, zero, zero],
                    [zero, one, zero, zero],
                    [zero, zero, u[0][0], u[0][1]],
                    [zero, zero, u[1][0], u[1][1]],
                ];
                self.apply_two_qubit_gate(c, t, &controlled_u)
            }
            Operation::ControlledPhase { qubit1, qubit2 } => {
                let a = self.check_qubit(qubit1)?;
                let b = self.check_qubit(qubit2)?;
                let one = Complex::new(1.0, 0.0);
                let zero = Complex::zero();
                let cz = [
                    [one, zero, zero, zero],
                    [zero, one, zero, zero],
                    [zero, zero, one, zero],
                    [zero, zero, zero, -one],
                ];
                self.apply_two_qubit_gate(a, b, &cz)
            }
            Operation::Swap { qubit1, qubit2 } => {
                let a = self.check_qubit(qubit1)?;
                let b = self.check_qubit(qubit2)?;
                let one = Complex::new(1.0, 0.0);
                let zero = Complex::zero();
                let swap = [
                    [one, zero, zero, zero],
                    [zero, zero, one, zero],
                    [zero, one, zero, zero],
                    [zero, zero, zero, one],
                ];
                self.apply_two_qubit_gate(a, b, &swap)
            }
        }
    }

    /// Samples `shots` measurement outcomes of the whole register.
    ///
    /// The generator is seeded from the amplitudes, so the same state always
    /// yields the same counts. Keys are bitstrings with qubit 0 rightmost.
    pub(crate) fn sample_counts(&self, shots: u32) -> BTreeMap<String, u64> {
        let mut counts = BTreeMap::new();
        if shots == 0 {
            return counts;
        }

        let mut cumulative = Vec::with_capacity(self.state.dim());
        let mut running = 0.0;
        for p in self.state.probabilities() {
            running += p;
            cumulative.push(running);
        }
        if running <= 0.0 || !running.is_finite() {
            return counts;
        }

        let seed = {
            let mut hasher = DefaultHasher::new();
            for amplitude in self.state.vector() {
                amplitude.re.to_ne_bytes().hash(&mut hasher);
                amplitude.im.to_ne_bytes().hash(&mut hasher);
            }
            hasher.finish()
        };
        let mut rng = StdRng::seed_from_u64(seed);

        let width = self.num_qubits;
        let last = cumulative.len() - 1;
        for _ in 0..shots {
            let p_sample: f64 = rng.random::<f64>() * running;
            let outcome = cumulative.partition_point(|c| *c <= p_sample).min(last);
            *counts.entry(format!("{:0width$b}", outcome, width = width)).or_insert(0) += 1;
        }
        counts
    }

    fn check_qubit(&self, qubit: &QubitId) -> Result<usize, AuraError> {
        if qubit.index() < self.num_qubits {
            Ok(qubit.index())
        } else {
            Err(AuraError::invalid_operation(format!(
                "{} not found in a {}-qubit register",
                qubit, self.num_qubits
            )))
        }
    }

    /// Applies a 2x2 matrix to qubit `target`.
    fn apply_single_qubit_gate(
        &mut self,
        target: usize,
        matrix: &[[Complex<f64>; 2]; 2],
    ) -> Result<(), AuraError> {
        let k_mask = 1usize << target;
        let lower_mask = k_mask - 1;
        let dim = self.state.dim();
        let amplitudes = self.state.vector_mut();

        // Pairs of basis states differing only at the target bit
        for i in 0..dim / 2 {
            let i0 = ((i & !lower_mask) << 1) | (i & lower_mask);
            let i1 = i0 | k_mask;
            if i1 >= dim {
                return Err(AuraError::simulation(format!(
                    "index out of bounds in single-qubit gate: i0={}, i1={}, dim={}",
                    i0, i1, dim
                )));
            }
            let psi_0 = amplitudes[i0];
            let psi_1 = amplitudes[i1];
            amplitudes[i0] = matrix[0][0] * psi_0 + matrix[0][1] * psi_1;
            amplitudes[i1] = matrix[1][0] * psi_0 + matrix[1][1] * psi_1;
        }
        Ok(())
    }

    /// Applies a 4x4 matrix to the pair (`first`, `second`).
    ///
    /// Matrix rows and columns are ordered `|first, second>`:
    /// `|00>, |01>, |10>, |11>`.
    fn apply_two_qubit_gate(
        &mut self,
        first: usize,
        second: usize,
        matrix: &[[Complex<f64>; 4]; 4],
    ) -> Result<(), AuraError> {
        if first == second {
            return Err(AuraError::invalid_operation(
                "a two-qubit gate needs two distinct qubits",
            ));
        }
        let first_mask = 1usize << first;
        let second_mask = 1usize << second;
        let dim = self.state.dim();
        let amplitudes = self.state.vector_mut();

        for base in (0..dim).filter(|i| i & (first_mask | second_mask) == 0) {
            let indices = [
                base,
                base | second_mask,
                base | first_mask,
                base | first_mask | second_mask,
            ];
            let psi = indices.map(|idx| amplitudes[idx]);

            let mut psi_prime = [Complex::zero(); 4];
            for (row, out) in psi_prime.iter_mut().enumerate() {
                for (col, amp) in psi.iter().enumerate() {
                    *out += matrix[row][col] * *amp;
                }
            }

            for (idx, value) in indices.iter().zip(psi_prime) {
                amplitudes[*idx] = value;
            }
        }
        Ok(())
    }
}

fn hadamard_matrix() -> [[Complex<f64>; 2]; 2] {
    let h = std::f64::consts::FRAC_1_SQRT_2;
    [
        [Complex::new(h, 0.0), Complex::new(h, 0.0)],
        [Complex::new(h, 0.0), Complex::new(-h, 0.0)],
    ]
}

/// `Ry(θ) = [[cos(θ/2), -sin(θ/2)], [sin(θ/2), cos(θ/2)]]`
fn ry_matrix(theta: f64) -> [[Complex<f64>; 2]; 2] {
    let (sin_a, cos_a) = (theta / 2.0).sin_cos();
    [
        [Complex::new(cos_a, 0.0), Complex::new(-sin_a, 0.0)],
        [Complex::new(sin_a, 0.0), Complex::new(cos_a, 0.0)],
    ]
}
