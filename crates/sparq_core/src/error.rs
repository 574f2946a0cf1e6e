//! Error types for sparq
//!
//! Comprehensive error handling for circuit construction, state
//! manipulation, and host interchange.

// Error variant fields are self-documenting via error messages
#![allow(missing_docs)]

use thiserror::Error;

/// Main error type for sparq
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SparqError {
    // ========================================================================
    // Argument Validation Errors
    // ========================================================================
    /// Qubit count outside the supported range
    #[error("Invalid qubit count {requested}: must be in range [1, {max}]")]
    InvalidQubitCount { requested: usize, max: usize },

    /// Gate arity does not match the number of target qubits
    #[error("Operation {op_index}: gate acts on {expected} qubit(s) but {actual} target(s) given")]
    ArityMismatch {
        expected: usize,
        actual: usize,
        op_index: usize,
    },

    /// Qubit index out of range
    #[error("Qubit {qubit} out of range: circuit has {num_qubits} qubit(s)")]
    QubitOutOfRange { qubit: usize, num_qubits: usize },

    /// A qubit appears more than once in a target list
    #[error("Duplicate target qubit {qubit}")]
    DuplicateQubit { qubit: usize },

    /// Oracle mark outside the gate's subspace
    #[error("Oracle mark {mark} out of range: subspace dimension is {dimension}")]
    InvalidOracleMark { mark: usize, dimension: usize },

    /// Gate width below 1
    #[error("Invalid gate width {width}: must be at least 1")]
    InvalidWidth { width: usize },

    /// Condition qubit is also a gate target
    #[error("Condition qubit {qubit} is also a target of the conditioned gate")]
    ConditionOnTarget { qubit: usize },

    /// Condition value other than 0 or 1
    #[error("Invalid condition value {value}: must be 0 or 1")]
    InvalidConditionValue { value: u8 },

    // ========================================================================
    // Range Errors
    // ========================================================================
    /// Basis-state index outside [0, 2^n)
    #[error("Basis state {index} out of range: state space dimension is {dimension}")]
    BasisStateOutOfRange { index: usize, dimension: usize },

    // ========================================================================
    // State Errors
    // ========================================================================
    /// Normalization or measurement on a zero-norm state
    #[error("Degenerate state: norm {norm} is too small to normalize")]
    DegenerateState { norm: f64 },

    /// A non-finite amplitude was produced
    #[error("Non-finite amplitude encountered during state update")]
    NonFiniteAmplitude,

    // ========================================================================
    // Interchange Errors
    // ========================================================================
    /// Unknown gate name in a circuit document
    #[error("Unknown gate name '{name}'")]
    UnknownGate { name: String },

    /// Wrong number of parameters for a named gate
    #[error("Gate '{gate}' expects {expected} parameter(s), got {actual}")]
    ParamCountMismatch {
        gate: String,
        expected: usize,
        actual: usize,
    },

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(String),

    /// File I/O error
    #[error("File error: {0}")]
    FileError(String),
}

/// Result type alias for sparq operations
pub type SparqResult<T> = Result<T, SparqError>;

// ============================================================================
// Error Conversion Helpers
// ============================================================================

impl From<serde_json::Error> for SparqError {
    fn from(err: serde_json::Error) -> Self {
        SparqError::JsonError(err.to_string())
    }
}

impl From<std::io::Error> for SparqError {
    fn from(err: std::io::Error) -> Self {
        SparqError::FileError(err.to_string())
    }
}

// ============================================================================
// Error Helpers
// ============================================================================

impl SparqError {
    /// Check if error is an argument-validation error
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            SparqError::InvalidQubitCount { .. }
                | SparqError::ArityMismatch { .. }
                | SparqError::QubitOutOfRange { .. }
                | SparqError::DuplicateQubit { .. }
                | SparqError::InvalidOracleMark { .. }
                | SparqError::InvalidWidth { .. }
                | SparqError::ConditionOnTarget { .. }
                | SparqError::InvalidConditionValue { .. }
        )
    }

    /// Check if error is a state-internal error surfaced by a run
    pub fn is_state_error(&self) -> bool {
        matches!(
            self,
            SparqError::DegenerateState { .. } | SparqError::NonFiniteAmplitude
        )
    }

    /// Check if error came from the interchange layer
    pub fn is_interchange_error(&self) -> bool {
        matches!(
            self,
            SparqError::UnknownGate { .. }
                | SparqError::ParamCountMismatch { .. }
                | SparqError::JsonError(_)
                | SparqError::FileError(_)
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
