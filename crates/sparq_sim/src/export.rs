//! Host export of final-state amplitudes
//!
//! CSV rendering consumed by the surrounding tooling. One row per basis
//! index in ascending order — this is a dense `2^n` enumeration, meant
//! for readout, not simulation.

use crate::state::SparseState;
use sparq_core::BasisIndex;
use std::fmt::Write;

/// Bit label of a basis index in little-endian-by-qubit order
///
/// Character `q` of the label is the value of qubit `q`, so index 1 on a
/// 2-qubit register renders as `"10"`.
pub fn basis_label(index: BasisIndex, num_qubits: usize) -> String {
    (0..num_qubits)
        .map(|q| if (index >> q) & 1 == 1 { '1' } else { '0' })
        .collect()
}

/// Render every amplitude of a state as CSV
///
/// Header `index,state,real,imag,phase,prob`; `phase` is the complex
/// argument in `(-pi, pi]` and `prob` the squared magnitude.
pub fn amplitudes_csv(state: &SparseState) -> String {
    let mut out = String::from("index,state,real,imag,phase,prob\n");
    for index in 0..state.dimension() {
        let amp = state.amp(index);
        // write! into a String cannot fail
        let _ = writeln!(
            out,
            "{},{},{},{},{},{}",
            index,
            basis_label(index, state.num_qubits()),
            amp.re,
            amp.im,
            amp.arg(),
            amp.norm_sqr()
        );
    }
    out
}

// ============================================================================
// Tests
// ============================================================================
