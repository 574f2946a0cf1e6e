//! # sparq sim
//!
//! Sparse state-vector execution for the sparq quantum circuit
//! simulator: the amplitude store, the circuit executor with
//! measurement-conditional semantics, and the observable derivation layer
//! (probabilities, shot sampling, Bloch parameters, CSV export).
//!
//! ## Quick Start
//!
//! ```rust
//! use sparq_core::prelude::*;
//! use sparq_sim::prelude::*;
//!
//! // Bell pair
//! let circuit = CircuitBuilder::new(2)
//!     .h(0)
//!     .cnot(0, 1)
//!     .build()
//!     .unwrap();
//!
//! let state = Simulator::new().with_seed(42).run(&circuit).unwrap();
//! let probs = probabilities(&state);
//!
//! assert!((probs[0] - 0.5).abs() < 1e-12);
//! assert!((probs[3] - 0.5).abs() < 1e-12);
//! ```
//!
//! ## Sampling
//!
//! ```rust
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use sparq_core::prelude::*;
//! use sparq_sim::prelude::*;
//!
//! let circuit = CircuitBuilder::new(2).h(0).cnot(0, 1).build().unwrap();
//! let state = Simulator::new().run(&circuit).unwrap();
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let counts = sample_shots(&probabilities(&state), 1000, &mut rng);
//! assert_eq!(counts.iter().sum::<u64>(), 1000);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Sparse amplitude store
pub mod state;

/// Circuit executor
pub mod simulator;

/// Probability, sampling, and Bloch derivations
pub mod observables;

/// CSV export of final-state amplitudes
pub mod export;

// ============================================================================
// Re-exports
// ============================================================================

pub use export::{amplitudes_csv, basis_label};
pub use observables::{bloch, counts_map, probabilities, sample_shots, Bloch};
pub use simulator::Simulator;
pub use state::SparseState;

// ============================================================================
// Prelude
// ============================================================================

pub mod prelude {
    //! Convenient imports for common use cases
    //!
    //! ```rust
    //! use sparq_sim::prelude::*;
    //! ```

    pub use crate::export::{amplitudes_csv, basis_label};
    pub use crate::observables::{bloch, counts_map, probabilities, sample_shots, Bloch};
    pub use crate::simulator::Simulator;
    pub use crate::state::SparseState;
}

// ============================================================================
// Integration Tests
// ============================================================================
