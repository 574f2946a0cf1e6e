//! Observable derivation from a final state
//!
//! Probability vectors, shot sampling, and per-qubit Bloch parameters.
//! These are dense derivations: they allocate `2^n` entries and are meant
//! for reading out a finished run, not for driving simulation.

use crate::state::SparseState;
use num_complex::Complex64;
use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};
use sparq_core::constants::tolerance::NORM_DRIFT;
use sparq_core::{Counts, QubitId, SparqError, SparqResult};

// ============================================================================
// Probabilities
// ============================================================================

/// Per-basis probability vector `P[i] = |a_i|^2`
///
/// Compensates cumulative numerical error: if the sum drifts from 1 by
/// more than the tolerance, the vector is renormalized by its sum.
pub fn probabilities(state: &SparseState) -> Vec<f64> {
    let mut probs = vec![0.0; state.dimension()];
    for (index, amp) in state.iter() {
        probs[index] = amp.norm_sqr();
    }
    let sum: f64 = probs.iter().sum();
    if sum > 0.0 && (sum - 1.0).abs() > NORM_DRIFT {
        for p in &mut probs {
            *p /= sum;
        }
    }
    probs
}

// ============================================================================
// Shot Sampling
// ============================================================================

/// Sample `shots` projective register measurements from a probability
/// vector, returning per-index counts
///
/// Each shot draws `u` uniform in `[0, 1)` and takes the smallest index
/// whose cumulative probability exceeds `u`. If rounding leaves `u` past
/// the final cumulative value, the shot is attributed to the last index —
/// no shot is lost.
pub fn sample_shots(probs: &[f64], shots: u64, rng: &mut StdRng) -> Vec<u64> {
    let mut counts = vec![0u64; probs.len()];
    if probs.is_empty() {
        return counts;
    }
    for _ in 0..shots {
        let u: f64 = rng.gen();
        let mut cumulative = 0.0;
        let mut outcome = probs.len() - 1;
        for (index, &p) in probs.iter().enumerate() {
            cumulative += p;
            if u < cumulative {
                outcome = index;
                break;
            }
        }
        counts[outcome] += 1;
    }
    counts
}

/// Render per-index shot counts as bit-label keyed counts
///
/// Labels follow the little-endian-by-qubit convention (character `q` of
/// the label is qubit `q`); zero-count indices are omitted.
pub fn counts_map(counts: &[u64], num_qubits: usize) -> Counts {
    let mut map = Counts::new();
    for (index, &count) in counts.iter().enumerate() {
        if count > 0 {
            map.insert(crate::export::basis_label(index, num_qubits), count);
        }
    }
    map
}

// ============================================================================
// Bloch Parameters
// ============================================================================

/// Reduced single-qubit Bloch parameters
///
/// `(theta, phi)` are the spherical angles of the Bloch vector, `r` its
/// length (1 for a pure reduced state, 0 at the maximally mixed center),
/// and `(ex, ey, ez)` the Pauli expectations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bloch {
    /// X expectation
    pub ex: f64,
    /// Y expectation
    pub ey: f64,
    /// Z expectation
    pub ez: f64,
    /// Bloch vector length, clamped to [0, 1]
    pub r: f64,
    /// Polar angle in [0, pi]; 0 when `r` is 0
    pub theta: f64,
    /// Azimuthal angle in (-pi, pi]; 0 when `r` is 0
    pub phi: f64,
}

/// Bloch parameters of one qubit, reduced from the full state
pub fn bloch(state: &SparseState, qubit: QubitId) -> SparqResult<Bloch> {
    if qubit >= state.num_qubits() {
        return Err(SparqError::QubitOutOfRange {
            qubit,
            num_qubits: state.num_qubits(),
        });
    }

    let mask = 1usize << qubit;
    let mut ez = 0.0;
    let mut coherence = Complex64::new(0.0, 0.0);
    for (index, amp) in state.iter() {
        if index & mask == 0 {
            ez += amp.norm_sqr();
            coherence += amp.conj() * state.amp(index | mask);
        } else {
            ez -= amp.norm_sqr();
        }
    }

    // off-diagonal coherence doubled: <X> + i<Y> = 2 * sum conj(a_i) a_{i^m}
    let ex = 2.0 * coherence.re;
    let ey = 2.0 * coherence.im;
    let r = (ex * ex + ey * ey + ez * ez).sqrt().min(1.0);

    let (theta, phi) = if r > 0.0 {
        ((ez / r).clamp(-1.0, 1.0).acos(), ey.atan2(ex))
    } else {
        (0.0, 0.0)
    };

    Ok(Bloch {
        ex,
        ey,
        ez,
        r,
        theta,
        phi,
    })
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::SeedableRng;
    use sparq_core::Gate;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn rng(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }

    #[test]
    fn test_probabilities_dense_vector() {
        let mut state = SparseState::new(2, 0, true).unwrap();
        state.apply_gate(&Gate::hadamard(), &[0]).unwrap();
        state.apply_gate(&Gate::cnot(), &[0, 1]).unwrap();

        let probs = probabilities(&state);
        assert_eq!(probs.len(), 4);
        assert_relative_eq!(probs[0], 0.5, max_relative = 1e-12);
        assert_relative_eq!(probs[3], 0.5, max_relative = 1e-12);
        assert_eq!(probs[1], 0.0);
        assert_eq!(probs[2], 0.0);
    }

    #[test]
    fn test_probabilities_renormalize_drift() {
        let mut state = SparseState::new(1, 0, false).unwrap();
        state
            .set_amplitude(0, Complex64::new(0.7, 0.0))
            .unwrap();
        state
            .set_amplitude(1, Complex64::new(0.7, 0.0))
            .unwrap();

        let probs = probabilities(&state);
        assert_relative_eq!(probs.iter().sum::<f64>(), 1.0, max_relative = 1e-12);
        assert_relative_eq!(probs[0], 0.5, max_relative = 1e-12);
    }

    #[test]
    fn test_sample_shots_conserved_and_distributed() {
        let probs = vec![0.25; 4];
        let mut r = rng(42);
        let counts = sample_shots(&probs, 10_000, &mut r);

        assert_eq!(counts.iter().sum::<u64>(), 10_000);
        for &count in &counts {
            assert!(
                (1_800..=3_200).contains(&(count as usize)),
                "count {} far from uniform",
                count
            );
        }
    }

    #[test]
    fn test_sample_shots_impossible_outcomes_excluded() {
        let probs = vec![0.5, 0.0, 0.0, 0.5];
        let mut r = rng(7);
        let counts = sample_shots(&probs, 1_000, &mut r);

        assert_eq!(counts[1], 0);
        assert_eq!(counts[2], 0);
        assert_eq!(counts[0] + counts[3], 1_000);
    }

    #[test]
    fn test_sample_shots_rounding_attributes_to_last() {
        // sums to slightly less than 1; every shot must still land
        let probs = vec![0.5, 0.5 - 1e-13];
        let mut r = rng(11);
        let counts = sample_shots(&probs, 5_000, &mut r);
        assert_eq!(counts.iter().sum::<u64>(), 5_000);
    }

    #[test]
    fn test_counts_map_labels() {
        let counts = vec![3, 0, 0, 7];
        let map = counts_map(&counts, 2);
        assert_eq!(map.len(), 2);
        assert_eq!(map["00"], 3);
        assert_eq!(map["11"], 7);
    }

    #[test]
    fn test_bloch_basis_states() {
        let state = SparseState::new(1, 0, true).unwrap();
        let b = bloch(&state, 0).unwrap();
        assert_relative_eq!(b.ez, 1.0, max_relative = 1e-12);
        assert_relative_eq!(b.r, 1.0, max_relative = 1e-12);
        assert_relative_eq!(b.theta, 0.0, epsilon = 1e-12);

        let state = SparseState::new(1, 1, true).unwrap();
        let b = bloch(&state, 0).unwrap();
        assert_relative_eq!(b.ez, -1.0, max_relative = 1e-12);
        assert_relative_eq!(b.theta, PI, max_relative = 1e-12);
    }

    #[test]
    fn test_bloch_plus_state() {
        let mut state = SparseState::new(1, 0, true).unwrap();
        state.apply_gate(&Gate::hadamard(), &[0]).unwrap();

        let b = bloch(&state, 0).unwrap();
        assert_relative_eq!(b.ex, 1.0, max_relative = 1e-12);
        assert!(b.ey.abs() < 1e-12);
        assert!(b.ez.abs() < 1e-12);
        assert_relative_eq!(b.r, 1.0, max_relative = 1e-12);
        assert_relative_eq!(b.theta, FRAC_PI_2, max_relative = 1e-12);
        assert!(b.phi.abs() < 1e-12);
    }

    #[test]
    fn test_bloch_plus_i_state() {
        // RX(-pi/2)|0> = (|0> + i|1>)/sqrt(2)
        let mut state = SparseState::new(1, 0, true).unwrap();
        state.apply_gate(&Gate::rx(-FRAC_PI_2), &[0]).unwrap();

        let b = bloch(&state, 0).unwrap();
        assert_relative_eq!(b.ey, 1.0, max_relative = 1e-12);
        assert_relative_eq!(b.phi, FRAC_PI_2, max_relative = 1e-12);
    }

    #[test]
    fn test_bloch_entangled_qubit_is_mixed() {
        let mut state = SparseState::new(2, 0, true).unwrap();
        state.apply_gate(&Gate::hadamard(), &[0]).unwrap();
        state.apply_gate(&Gate::cnot(), &[0, 1]).unwrap();

        for qubit in 0..2 {
            let b = bloch(&state, qubit).unwrap();
            assert!(b.r < 1e-12, "Bell qubit {} should be maximally mixed", qubit);
            assert_eq!(b.theta, 0.0);
            assert_eq!(b.phi, 0.0);
        }
    }

    #[test]
    fn test_bloch_ranges() {
        let mut state = SparseState::new(2, 0, true).unwrap();
        state.apply_gate(&Gate::ry(1.234), &[0]).unwrap();
        state.apply_gate(&Gate::rz(-2.5), &[0]).unwrap();
        state.apply_gate(&Gate::hadamard(), &[1]).unwrap();

        for qubit in 0..2 {
            let b = bloch(&state, qubit).unwrap();
            assert!(b.r <= 1.0 + 1e-12);
            assert!((0.0..=PI).contains(&b.theta));
            assert!(b.phi > -PI && b.phi <= PI);
        }
    }

    #[test]
    fn test_bloch_out_of_range() {
        let state = SparseState::new(1, 0, true).unwrap();
        assert!(matches!(
            bloch(&state, 1),
            Err(SparqError::QubitOutOfRange { qubit: 1, .. })
        ));
    }
}
