//! # sparq core
//!
//! Core types, gates, and circuits for the sparq quantum circuit
//! simulator: gate-matrix factories, validated circuit construction with
//! classically conditioned operations, and the host JSON interchange
//! format. Execution lives in the companion `sparq_sim` crate.
//!
//! ## Quick Start
//!
//! ```rust
//! use sparq_core::prelude::*;
//!
//! // Build a Bell-pair circuit
//! let circuit = CircuitBuilder::new(2)
//!     .h(0)
//!     .cnot(0, 1)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(circuit.op_count(), 2);
//! println!("{}", circuit.to_json().unwrap());
//! ```
//!
//! ## Conditional Operations
//!
//! ```rust
//! use sparq_core::prelude::*;
//!
//! // Apply X on qubit 1 iff measuring qubit 0 yields 1
//! let circuit = CircuitBuilder::new(2)
//!     .h(0)
//!     .when(Condition { qubit: 0, value: 1 }, Gate::pauli_x(), &[1])
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(circuit.count_conditional(), 1);
//! ```
//!
//! ## Bit Conventions
//!
//! Global basis-state indices place qubit 0 at the least significant bit.
//! Gate matrices index their local bits the same way, with local bit `j`
//! bound to the j-th listed target qubit; `CNOT` on `[c, t]` therefore
//! flips the bit at `t` iff the bit at `c` is set, for any `c` and `t`.

#![warn(missing_docs)]
#![warn(clippy::all)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Core type aliases and the classical condition type
pub mod types;

/// Numerical tolerances and structural limits
pub mod constants;

/// Error types
pub mod error;

/// Gate matrices and factories
pub mod gate;

/// Circuit structure and validation
pub mod circuit;

/// Fluent circuit builder
pub mod builder;

/// Circuit JSON interchange
pub mod json;

// ============================================================================
// Re-exports
// ============================================================================

pub use builder::CircuitBuilder;
pub use circuit::{Circuit, Operation};
pub use constants::{limits, tolerance};
pub use error::{SparqError, SparqResult};
pub use gate::{Gate, GateKind};
pub use types::{Angle, BasisIndex, Condition, Counts, QubitId};

// ============================================================================
// Prelude
// ============================================================================

pub mod prelude {
    //! Convenient imports for common use cases
    //!
    //! ```rust
    //! use sparq_core::prelude::*;
    //! ```

    pub use crate::builder::CircuitBuilder;
    pub use crate::circuit::{Circuit, Operation};
    pub use crate::error::{SparqError, SparqResult};
    pub use crate::gate::{Gate, GateKind};
    pub use crate::types::{Angle, BasisIndex, Condition, Counts, QubitId};
}

// ============================================================================
// Version Information
// ============================================================================

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

// ============================================================================
// Integration Tests
// ============================================================================
