//! Sparse quantum state representation
//!
//! Maps basis-state indices to nonzero complex amplitudes, so memory stays
//! `O(#nonzero)` rather than `O(2^n)`. Gate application rebuilds the map
//! from the affected amplitudes only; absent keys denote amplitude zero.
//!
//! Bit convention: qubit `q` is bit `q` of the basis index (qubit 0 = LSB).

use num_complex::Complex64;
use rand::rngs::StdRng;
use rand::Rng;
use sparq_core::constants::limits::MAX_QUBITS;
use sparq_core::constants::tolerance::{MEASURE_FLOOR, PRUNE_NORM_SQR};
use sparq_core::{BasisIndex, Gate, QubitId, SparqError, SparqResult};
use std::collections::HashMap;
use std::fmt;

const ZERO: Complex64 = Complex64::new(0.0, 0.0);

/// Sparse state vector over `n` qubits
///
/// Between operations every stored key is in `[0, 2^n)` and, when
/// per-step normalization is enabled, the squared norm is 1 within
/// numerical tolerance.
#[derive(Clone)]
pub struct SparseState {
    num_qubits: usize,
    amps: HashMap<BasisIndex, Complex64>,
    normalize_each_step: bool,
}

impl SparseState {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create a state concentrated on a single basis state
    pub fn new(
        num_qubits: usize,
        initial: BasisIndex,
        normalize_each_step: bool,
    ) -> SparqResult<Self> {
        if num_qubits == 0 || num_qubits > MAX_QUBITS {
            return Err(SparqError::InvalidQubitCount {
                requested: num_qubits,
                max: MAX_QUBITS,
            });
        }
        let dimension = 1usize << num_qubits;
        if initial >= dimension {
            return Err(SparqError::BasisStateOutOfRange {
                index: initial,
                dimension,
            });
        }
        let mut amps = HashMap::new();
        amps.insert(initial, Complex64::new(1.0, 0.0));
        Ok(Self {
            num_qubits,
            amps,
            normalize_each_step,
        })
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Number of qubits
    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// State-space dimension (`2^n`)
    #[inline]
    pub fn dimension(&self) -> usize {
        1usize << self.num_qubits
    }

    /// Number of stored (nonzero) amplitudes
    #[inline]
    pub fn num_amplitudes(&self) -> usize {
        self.amps.len()
    }

    /// Amplitude at a basis index (zero if absent)
    pub fn amplitude(&self, index: BasisIndex) -> SparqResult<Complex64> {
        if index >= self.dimension() {
            return Err(SparqError::BasisStateOutOfRange {
                index,
                dimension: self.dimension(),
            });
        }
        Ok(self.amp(index))
    }

    /// Unchecked amplitude lookup for in-crate derivations
    #[inline]
    pub(crate) fn amp(&self, index: BasisIndex) -> Complex64 {
        self.amps.get(&index).copied().unwrap_or(ZERO)
    }

    /// Iterate over stored (index, amplitude) pairs
    pub fn iter(&self) -> impl Iterator<Item = (BasisIndex, Complex64)> + '_ {
        self.amps.iter().map(|(&index, &amp)| (index, amp))
    }

    /// Materialize the full `2^n` amplitude vector
    pub fn to_dense(&self) -> Vec<Complex64> {
        let mut dense = vec![ZERO; self.dimension()];
        for (&index, &amp) in &self.amps {
            dense[index] = amp;
        }
        dense
    }

    /// Overwrite one amplitude (removing it when negligible)
    ///
    /// Intended for hosts seeding a prepared state; does not renormalize.
    pub fn set_amplitude(&mut self, index: BasisIndex, amplitude: Complex64) -> SparqResult<()> {
        if index >= self.dimension() {
            return Err(SparqError::BasisStateOutOfRange {
                index,
                dimension: self.dimension(),
            });
        }
        if amplitude.norm_sqr() > PRUNE_NORM_SQR {
            self.amps.insert(index, amplitude);
        } else {
            self.amps.remove(&index);
        }
        Ok(())
    }

    // ========================================================================
    // Norm
    // ========================================================================

    /// L2 norm of the state vector
    pub fn norm(&self) -> f64 {
        self.amps
            .values()
            .map(|amp| amp.norm_sqr())
            .sum::<f64>()
            .sqrt()
    }

    /// Rescale every amplitude to unit norm
    pub fn normalize(&mut self) -> SparqResult<()> {
        let norm = self.norm();
        if !norm.is_finite() {
            return Err(SparqError::NonFiniteAmplitude);
        }
        if norm < MEASURE_FLOOR {
            return Err(SparqError::DegenerateState { norm });
        }
        for amp in self.amps.values_mut() {
            *amp /= norm;
        }
        Ok(())
    }

    // ========================================================================
    // Gate Application
    // ========================================================================

    /// Apply a k-qubit gate to the listed target qubits
    ///
    /// Target `qubits[j]` is local bit `j` of the gate's basis. Arity and
    /// distinctness are guaranteed by circuit validation and only
    /// debug-asserted here; qubit range is still checked.
    pub fn apply_gate(&mut self, gate: &Gate, qubits: &[QubitId]) -> SparqResult<()> {
        debug_assert_eq!(qubits.len(), gate.arity());
        for &qubit in qubits {
            if qubit >= self.num_qubits {
                return Err(SparqError::QubitOutOfRange {
                    qubit,
                    num_qubits: self.num_qubits,
                });
            }
        }

        let dim = gate.size();
        let mut new_amps: HashMap<BasisIndex, Complex64> =
            HashMap::with_capacity(self.amps.len());

        for (&state_index, &amp) in &self.amps {
            // local column index gathered from the target bits
            let mut column = 0usize;
            let mut cleared = state_index;
            for (j, &target) in qubits.iter().enumerate() {
                column |= ((state_index >> target) & 1) << j;
                cleared &= !(1usize << target);
            }

            for row in 0..dim {
                let element = gate.element(row, column);
                if element == ZERO {
                    // structural zero: permutation and diagonal gates stay sparse
                    continue;
                }
                let mut next = cleared;
                for (j, &target) in qubits.iter().enumerate() {
                    next |= ((row >> j) & 1) << target;
                }
                *new_amps.entry(next).or_insert(ZERO) += amp * element;
            }
        }

        new_amps.retain(|_, amp| amp.norm_sqr() > PRUNE_NORM_SQR);
        self.amps = new_amps;

        if self.normalize_each_step {
            self.normalize()?;
        }
        Ok(())
    }

    // ========================================================================
    // Measurement
    // ========================================================================

    /// Probabilities of observing 0 and 1 on a qubit
    pub fn bit_probabilities(&self, qubit: QubitId) -> SparqResult<(f64, f64)> {
        if qubit >= self.num_qubits {
            return Err(SparqError::QubitOutOfRange {
                qubit,
                num_qubits: self.num_qubits,
            });
        }
        let mut p0 = 0.0;
        let mut p1 = 0.0;
        for (&index, &amp) in &self.amps {
            if (index >> qubit) & 1 == 0 {
                p0 += amp.norm_sqr();
            } else {
                p1 += amp.norm_sqr();
            }
        }
        Ok((p0, p1))
    }

    /// Projectively measure one qubit, collapsing and renormalizing
    pub fn measure(&mut self, qubit: QubitId, rng: &mut StdRng) -> SparqResult<u8> {
        let (p0, _) = self.bit_probabilities(qubit)?;
        let u: f64 = rng.gen();
        let outcome: u8 = if u < p0 { 0 } else { 1 };

        self.amps
            .retain(|&index, _| ((index >> qubit) & 1) as u8 == outcome);
        self.normalize()?;
        Ok(outcome)
    }

    /// Measure qubits `0..n-1` in order
    pub fn measure_all(&mut self, rng: &mut StdRng) -> SparqResult<Vec<u8>> {
        (0..self.num_qubits)
            .map(|qubit| self.measure(qubit, rng))
            .collect()
    }
}

impl fmt::Debug for SparseState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SparseState")
            .field("num_qubits", &self.num_qubits)
            .field("num_amplitudes", &self.amps.len())
            .field("normalize_each_step", &self.normalize_each_step)
            .finish()
    }
}

impl fmt::Display for SparseState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SparseState({} qubits, {} nonzero amplitudes)",
            self.num_qubits,
            self.amps.len()
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::SeedableRng;
    use std::f64::consts::{FRAC_1_SQRT_2, PI};

    fn rng(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }

    #[test]
    fn test_new_state() {
        let state = SparseState::new(3, 5, true).unwrap();
        assert_eq!(state.num_qubits(), 3);
        assert_eq!(state.dimension(), 8);
        assert_eq!(state.num_amplitudes(), 1);
        assert_eq!(state.amplitude(5).unwrap(), Complex64::new(1.0, 0.0));
        assert_eq!(state.amplitude(0).unwrap(), ZERO);
    }

    #[test]
    fn test_new_rejects_bad_args() {
        assert!(matches!(
            SparseState::new(0, 0, true),
            Err(SparqError::InvalidQubitCount { .. })
        ));
        assert_eq!(
            SparseState::new(2, 4, true).unwrap_err(),
            SparqError::BasisStateOutOfRange {
                index: 4,
                dimension: 4
            }
        );
    }

    #[test]
    fn test_amplitude_out_of_range() {
        let state = SparseState::new(2, 0, true).unwrap();
        assert!(matches!(
            state.amplitude(4),
            Err(SparqError::BasisStateOutOfRange { index: 4, .. })
        ));
    }

    #[test]
    fn test_hadamard_creates_superposition() {
        let mut state = SparseState::new(2, 0, true).unwrap();
        state.apply_gate(&Gate::hadamard(), &[0]).unwrap();

        assert_eq!(state.num_amplitudes(), 2);
        assert_relative_eq!(state.amp(0).re, FRAC_1_SQRT_2, max_relative = 1e-12);
        assert_relative_eq!(state.amp(1).re, FRAC_1_SQRT_2, max_relative = 1e-12);
    }

    #[test]
    fn test_hadamard_twice_is_identity() {
        let mut state = SparseState::new(1, 0, true).unwrap();
        state.apply_gate(&Gate::hadamard(), &[0]).unwrap();
        state.apply_gate(&Gate::hadamard(), &[0]).unwrap();

        // destructive interference leaves |0> only
        assert_relative_eq!(state.amp(0).re, 1.0, max_relative = 1e-12);
        assert!(state.amp(1).norm() < 1e-12);
    }

    #[test]
    fn test_pauli_x_twice_is_identity() {
        let mut state = SparseState::new(2, 0, true).unwrap();
        state.apply_gate(&Gate::hadamard(), &[0]).unwrap();
        let before = state.to_dense();

        state.apply_gate(&Gate::pauli_x(), &[1]).unwrap();
        state.apply_gate(&Gate::pauli_x(), &[1]).unwrap();

        for (a, b) in before.iter().zip(state.to_dense()) {
            assert!((a - b).norm() < 1e-12);
        }
    }

    #[test]
    fn test_rotation_round_trip() {
        let mut state = SparseState::new(1, 0, true).unwrap();
        state.apply_gate(&Gate::hadamard(), &[0]).unwrap();
        let before = state.to_dense();

        for theta in [0.3, -1.1, PI / 5.0] {
            state.apply_gate(&Gate::rx(theta), &[0]).unwrap();
            state.apply_gate(&Gate::rx(-theta), &[0]).unwrap();
            state.apply_gate(&Gate::ry(theta), &[0]).unwrap();
            state.apply_gate(&Gate::ry(-theta), &[0]).unwrap();
            state.apply_gate(&Gate::rz(theta), &[0]).unwrap();
            state.apply_gate(&Gate::rz(-theta), &[0]).unwrap();
        }

        for (a, b) in before.iter().zip(state.to_dense()) {
            assert!((a - b).norm() < 1e-10);
        }
    }

    #[test]
    fn test_rx_pi_amplitudes() {
        let mut state = SparseState::new(1, 0, true).unwrap();
        state.apply_gate(&Gate::rx(PI), &[0]).unwrap();

        assert!(state.amp(0).norm() < 1e-12);
        let a1 = state.amp(1);
        assert!(a1.re.abs() < 1e-12);
        assert_relative_eq!(a1.im, -1.0, max_relative = 1e-12);
    }

    #[test]
    fn test_cnot_on_listed_order() {
        // control = qubit 2, target = qubit 0: |100> -> |101>
        let mut state = SparseState::new(3, 0b100, true).unwrap();
        state.apply_gate(&Gate::cnot(), &[2, 0]).unwrap();
        assert_relative_eq!(state.amp(0b101).re, 1.0, max_relative = 1e-12);

        // control clear: nothing happens
        let mut state = SparseState::new(3, 0b001, true).unwrap();
        state.apply_gate(&Gate::cnot(), &[2, 0]).unwrap();
        assert_relative_eq!(state.amp(0b001).re, 1.0, max_relative = 1e-12);
    }

    #[test]
    fn test_swap_moves_excitation() {
        // |01> (qubit 0 set), swap qubits 0 and 1 -> |10>
        let mut state = SparseState::new(2, 1, true).unwrap();
        state.apply_gate(&Gate::swap(), &[0, 1]).unwrap();
        assert_relative_eq!(state.amp(2).re, 1.0, max_relative = 1e-12);
        assert_eq!(state.num_amplitudes(), 1);
    }

    #[test]
    fn test_toffoli_needs_both_controls() {
        let mut state = SparseState::new(3, 0b011, true).unwrap();
        state.apply_gate(&Gate::toffoli(), &[0, 1, 2]).unwrap();
        assert_relative_eq!(state.amp(0b111).re, 1.0, max_relative = 1e-12);

        let mut state = SparseState::new(3, 0b010, true).unwrap();
        state.apply_gate(&Gate::toffoli(), &[0, 1, 2]).unwrap();
        assert_relative_eq!(state.amp(0b010).re, 1.0, max_relative = 1e-12);
    }

    #[test]
    fn test_permutation_gates_stay_sparse() {
        let mut state = SparseState::new(3, 0b011, true).unwrap();
        state.apply_gate(&Gate::cnot(), &[0, 1]).unwrap();
        state.apply_gate(&Gate::pauli_x(), &[2]).unwrap();
        state.apply_gate(&Gate::swap(), &[0, 2]).unwrap();
        assert_eq!(state.num_amplitudes(), 1);
    }

    #[test]
    fn test_apply_gate_out_of_range() {
        let mut state = SparseState::new(2, 0, true).unwrap();
        assert!(matches!(
            state.apply_gate(&Gate::hadamard(), &[2]),
            Err(SparqError::QubitOutOfRange { qubit: 2, .. })
        ));
    }

    #[test]
    fn test_single_qubit_register_supports_all_1q_gates() {
        for gate in [
            Gate::hadamard(),
            Gate::pauli_x(),
            Gate::pauli_y(),
            Gate::pauli_z(),
            Gate::rx(0.4),
            Gate::ry(0.4),
            Gate::rz(0.4),
            Gate::oracle(1, 0).unwrap(),
            Gate::diffusion(1).unwrap(),
        ] {
            let mut state = SparseState::new(1, 0, true).unwrap();
            state.apply_gate(&gate, &[0]).unwrap();
            assert_relative_eq!(state.norm(), 1.0, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_norm_drift_without_step_normalization() {
        let mut state = SparseState::new(2, 0, false).unwrap();
        for _ in 0..2_500 {
            state.apply_gate(&Gate::hadamard(), &[0]).unwrap();
            state.apply_gate(&Gate::rx(0.37), &[1]).unwrap();
            state.apply_gate(&Gate::hadamard(), &[0]).unwrap();
            state.apply_gate(&Gate::rx(-0.37), &[1]).unwrap();
        }
        // 10^4 gates of accumulated floating-point drift
        assert!((state.norm() - 1.0).abs() < 1e-8);
    }

    #[test]
    fn test_measure_collapses_and_renormalizes() {
        let mut state = SparseState::new(2, 0, true).unwrap();
        state.apply_gate(&Gate::hadamard(), &[0]).unwrap();
        state.apply_gate(&Gate::cnot(), &[0, 1]).unwrap();

        let mut r = rng(7);
        let outcome = state.measure(0, &mut r).unwrap();

        let (p0, p1) = state.bit_probabilities(0).unwrap();
        if outcome == 0 {
            assert_relative_eq!(p0, 1.0, max_relative = 1e-12);
            assert!(p1 < 1e-12);
        } else {
            assert_relative_eq!(p1, 1.0, max_relative = 1e-12);
            assert!(p0 < 1e-12);
        }

        // Bell correlations: the partner qubit collapsed with it
        let (q1_p0, q1_p1) = state.bit_probabilities(1).unwrap();
        if outcome == 0 {
            assert_relative_eq!(q1_p0, 1.0, max_relative = 1e-12);
        } else {
            assert_relative_eq!(q1_p1, 1.0, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_repeated_measurement_is_deterministic() {
        let mut state = SparseState::new(1, 0, true).unwrap();
        state.apply_gate(&Gate::hadamard(), &[0]).unwrap();

        let mut r = rng(21);
        let first = state.measure(0, &mut r).unwrap();
        for _ in 0..10 {
            assert_eq!(state.measure(0, &mut r).unwrap(), first);
        }
    }

    #[test]
    fn test_measure_all_in_order() {
        let mut state = SparseState::new(3, 0b101, true).unwrap();
        let mut r = rng(0);
        let outcomes = state.measure_all(&mut r).unwrap();
        assert_eq!(outcomes, vec![1, 0, 1]);
    }

    #[test]
    fn test_normalize_degenerate() {
        let mut state = SparseState::new(1, 0, true).unwrap();
        state.set_amplitude(0, ZERO).unwrap();
        assert!(matches!(
            state.normalize(),
            Err(SparqError::DegenerateState { .. })
        ));
    }

    #[test]
    fn test_normalize_non_finite() {
        let mut state = SparseState::new(1, 0, true).unwrap();
        state
            .set_amplitude(0, Complex64::new(f64::INFINITY, 0.0))
            .unwrap();
        assert_eq!(state.normalize(), Err(SparqError::NonFiniteAmplitude));
    }

    #[test]
    fn test_normalize_rescales() {
        let mut state = SparseState::new(2, 0, false).unwrap();
        state.set_amplitude(0, Complex64::new(2.0, 0.0)).unwrap();
        state.set_amplitude(3, Complex64::new(0.0, 1.0)).unwrap();
        state.normalize().unwrap();
        assert_relative_eq!(state.norm(), 1.0, max_relative = 1e-12);
    }
}
