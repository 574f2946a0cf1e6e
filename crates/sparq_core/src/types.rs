//! Core types for sparq
//!
//! Fundamental type aliases and small validated value types used
//! throughout the simulator.

use crate::error::{SparqError, SparqResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

// ============================================================================
// Type Aliases
// ============================================================================

/// Qubit identifier (0-indexed; qubit 0 is the least significant bit of a
/// basis-state index)
pub type QubitId = usize;

/// Rotation angle in radians
pub type Angle = f64;

/// Computational-basis state index in `[0, 2^n)`
pub type BasisIndex = usize;

/// Shot counts: bit label -> count
pub type Counts = HashMap<String, u64>;

// ============================================================================
// Condition
// ============================================================================

/// Classical condition attached to an operation
///
/// The condition qubit is projectively measured at execution time; the
/// conditioned gate is applied iff the outcome equals `value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    /// Qubit whose measurement outcome gates the operation
    pub qubit: QubitId,
    /// Required outcome (0 or 1)
    pub value: u8,
}

impl Condition {
    /// Create a condition, validating the outcome value
    pub fn new(qubit: QubitId, value: u8) -> SparqResult<Self> {
        if value > 1 {
            return Err(SparqError::InvalidConditionValue { value });
        }
        Ok(Self { qubit, value })
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "if q[{}]=={}", self.qubit, self.value)
    }
}

// ============================================================================
// Tests
// ============================================================================
