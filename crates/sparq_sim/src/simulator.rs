//! Circuit executor for sparq
//!
//! Drives a [`Circuit`] into a final [`SparseState`]. Conditional
//! operations projectively measure their condition qubit — the collapse
//! is the specified semantics, so two conditions on the same untouched
//! qubit agree deterministically.

use crate::state::SparseState;
use rand::rngs::StdRng;
use rand::SeedableRng;
use sparq_core::{Circuit, SparqResult};

const LOG_TARGET: &str = "sparq_sim::simulator";

/// Circuit executor
///
/// A run is a pure function of `(circuit, seed)` when seeded; without a
/// seed the RNG is drawn from entropy. Conditional-free circuits are
/// fully deterministic either way.
#[derive(Debug, Clone)]
pub struct Simulator {
    normalize_each_step: bool,
    debug: bool,
    seed: Option<u64>,
}

impl Simulator {
    // ========================================================================
    // Construction
    // ========================================================================

    /// Executor with default configuration (per-step normalization on,
    /// tracing off, entropy-seeded)
    pub fn new() -> Self {
        Self {
            normalize_each_step: true,
            debug: false,
            seed: None,
        }
    }

    /// Fix the RNG seed for reproducible measurement outcomes
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enable per-operation execution tracing
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Toggle renormalization after every gate (on by default; measurement
    /// always renormalizes regardless)
    pub fn with_step_normalization(mut self, normalize_each_step: bool) -> Self {
        self.normalize_each_step = normalize_each_step;
        self
    }

    // ========================================================================
    // Execution
    // ========================================================================

    /// Run a circuit to its final state
    pub fn run(&self, circuit: &Circuit) -> SparqResult<SparseState> {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.run_with_rng(circuit, &mut rng)
    }

    /// Run a circuit using a caller-provided RNG stream
    pub fn run_with_rng(&self, circuit: &Circuit, rng: &mut StdRng) -> SparqResult<SparseState> {
        log::trace!(
            target: LOG_TARGET,
            "running circuit: {} qubits, initial |{}>, {} operations",
            circuit.num_qubits(),
            circuit.initial_state(),
            circuit.op_count()
        );

        let mut state = SparseState::new(
            circuit.num_qubits(),
            circuit.initial_state(),
            self.normalize_each_step,
        )?;

        for (index, op) in circuit.operations().iter().enumerate() {
            if let Some(cond) = op.condition() {
                let outcome = state.measure(cond.qubit, rng)?;
                let take = outcome == cond.value;
                if self.debug {
                    log::debug!(
                        target: LOG_TARGET,
                        "op {}: measured q[{}] -> {}, {} {}",
                        index,
                        cond.qubit,
                        outcome,
                        if take { "applying" } else { "skipping" },
                        op.gate()
                    );
                }
                if !take {
                    continue;
                }
            } else if self.debug {
                log::debug!(target: LOG_TARGET, "op {}: {}", index, op);
            }
            state.apply_gate(op.gate(), op.qubits())?;
        }

        Ok(state)
    }
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================
