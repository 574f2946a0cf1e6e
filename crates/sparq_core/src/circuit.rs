//! Quantum circuit structure for sparq
//!
//! A [`Circuit`] is an ordered list of operations over a fixed qubit
//! register, starting from a chosen basis state. All argument validation
//! happens eagerly at `add_*` time so execution can treat violations as
//! programmer defects.

use crate::constants::limits::MAX_QUBITS;
use crate::error::{SparqError, SparqResult};
use crate::gate::Gate;
use crate::types::{BasisIndex, Condition, QubitId};
use std::collections::HashSet;
use std::fmt;

// ============================================================================
// Operation
// ============================================================================

/// One step of a circuit: a gate bound to target qubits, optionally gated
/// by a classical condition
#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    gate: Gate,
    qubits: Vec<QubitId>,
    condition: Option<Condition>,
}

impl Operation {
    /// The gate applied by this operation
    #[inline]
    pub fn gate(&self) -> &Gate {
        &self.gate
    }

    /// Target qubits, in local-bit order (first = local bit 0)
    #[inline]
    pub fn qubits(&self) -> &[QubitId] {
        &self.qubits
    }

    /// Classical condition, if any
    #[inline]
    pub fn condition(&self) -> Option<Condition> {
        self.condition
    }

    /// True when this operation carries a condition
    #[inline]
    pub fn is_conditional(&self) -> bool {
        self.condition.is_some()
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let targets: Vec<String> = self.qubits.iter().map(|q| format!("q[{}]", q)).collect();
        match self.condition {
            Some(cond) => write!(f, "{} {} {}", cond, self.gate, targets.join(",")),
            None => write!(f, "{} {}", self.gate, targets.join(",")),
        }
    }
}

// ============================================================================
// Circuit
// ============================================================================

/// Quantum circuit: qubit count, initial basis state, operation sequence
#[derive(Debug, Clone, PartialEq)]
pub struct Circuit {
    num_qubits: usize,
    initial: BasisIndex,
    ops: Vec<Operation>,
    name: Option<String>,
}

impl Circuit {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create a circuit starting from |0...0>
    pub fn new(num_qubits: usize) -> SparqResult<Self> {
        Self::with_initial(num_qubits, 0)
    }

    /// Create a circuit starting from an arbitrary basis state
    pub fn with_initial(num_qubits: usize, initial: BasisIndex) -> SparqResult<Self> {
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
        Ok(Self {
            num_qubits,
            initial,
            ops: Vec::new(),
            name: None,
        })
    }

    // ========================================================================
    // Building
    // ========================================================================

    /// Append an unconditional gate application
    pub fn add_gate(&mut self, gate: Gate, qubits: &[QubitId]) -> SparqResult<()> {
        self.validate_targets(&gate, qubits)?;
        self.ops.push(Operation {
            gate,
            qubits: qubits.to_vec(),
            condition: None,
        });
        Ok(())
    }

    /// Append a gate application gated by a measurement condition
    ///
    /// The condition qubit must be in range, distinct from every target,
    /// and carry a 0/1 value.
    pub fn add_conditional_gate(
        &mut self,
        gate: Gate,
        qubits: &[QubitId],
        condition: Condition,
    ) -> SparqResult<()> {
        self.validate_targets(&gate, qubits)?;
        if condition.qubit >= self.num_qubits {
            return Err(SparqError::QubitOutOfRange {
                qubit: condition.qubit,
                num_qubits: self.num_qubits,
            });
        }
        if qubits.contains(&condition.qubit) {
            return Err(SparqError::ConditionOnTarget {
                qubit: condition.qubit,
            });
        }
        if condition.value > 1 {
            return Err(SparqError::InvalidConditionValue {
                value: condition.value,
            });
        }
        self.ops.push(Operation {
            gate,
            qubits: qubits.to_vec(),
            condition: Some(condition),
        });
        Ok(())
    }

    fn validate_targets(&self, gate: &Gate, qubits: &[QubitId]) -> SparqResult<()> {
        if qubits.len() != gate.arity() {
            return Err(SparqError::ArityMismatch {
                expected: gate.arity(),
                actual: qubits.len(),
                op_index: self.ops.len(),
            });
        }
        let mut seen = HashSet::new();
        for &qubit in qubits {
            if qubit >= self.num_qubits {
                return Err(SparqError::QubitOutOfRange {
                    qubit,
                    num_qubits: self.num_qubits,
                });
            }
            if !seen.insert(qubit) {
                return Err(SparqError::DuplicateQubit { qubit });
            }
        }
        Ok(())
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

    /// Initial basis state
    #[inline]
    pub fn initial_state(&self) -> BasisIndex {
        self.initial
    }

    /// Operations in insertion order
    #[inline]
    pub fn operations(&self) -> &[Operation] {
        &self.ops
    }

    /// Number of operations
    #[inline]
    pub fn op_count(&self) -> usize {
        self.ops.len()
    }

    /// True when no operations have been added
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Circuit name
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Set circuit name
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    // ========================================================================
    // Analysis
    // ========================================================================

    /// Count conditional operations
    pub fn count_conditional(&self) -> usize {
        self.ops.iter().filter(|op| op.is_conditional()).count()
    }

    /// Largest gate arity appearing in the circuit
    pub fn max_arity(&self) -> usize {
        self.ops.iter().map(|op| op.gate().arity()).max().unwrap_or(0)
    }

    /// Qubits touched by any operation (targets and condition qubits)
    pub fn used_qubits(&self) -> HashSet<QubitId> {
        let mut used = HashSet::new();
        for op in &self.ops {
            used.extend(op.qubits().iter().copied());
            if let Some(cond) = op.condition() {
                used.insert(cond.qubit);
            }
        }
        used
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Circuit({} qubits, initial |{}>, {} operations)",
            self.num_qubits,
            self.initial,
            self.ops.len()
        )?;
        for (index, op) in self.ops.iter().enumerate() {
            writeln!(f, "  {:3}: {}", index, op)?;
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
