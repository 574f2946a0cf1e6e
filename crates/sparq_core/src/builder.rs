//! Circuit builder for sparq
//!
//! Fluent consuming-self builder over [`Circuit`]. Validation errors do
//! not interrupt chaining; the first one is held and returned by
//! [`CircuitBuilder::build`].

use crate::circuit::Circuit;
use crate::error::SparqResult;
use crate::gate::Gate;
use crate::types::{Angle, BasisIndex, Condition, QubitId};

/// Fluent circuit builder (consuming self pattern)
pub struct CircuitBuilder {
    circuit: SparqResult<Circuit>,
}

impl CircuitBuilder {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Start a circuit from |0...0>
    pub fn new(num_qubits: usize) -> Self {
        Self {
            circuit: Circuit::new(num_qubits),
        }
    }

    /// Start a circuit from an arbitrary basis state
    pub fn with_initial(num_qubits: usize, initial: BasisIndex) -> Self {
        Self {
            circuit: Circuit::with_initial(num_qubits, initial),
        }
    }

    fn push(mut self, gate: Gate, qubits: &[QubitId]) -> Self {
        if let Ok(circuit) = self.circuit.as_mut() {
            if let Err(err) = circuit.add_gate(gate, qubits) {
                self.circuit = Err(err);
            }
        }
        self
    }

    // ========================================================================
    // Single-Qubit Gates
    // ========================================================================

    /// Add Hadamard
    pub fn h(self, qubit: QubitId) -> Self {
        self.push(Gate::hadamard(), &[qubit])
    }

    /// Add Pauli-X
    pub fn x(self, qubit: QubitId) -> Self {
        self.push(Gate::pauli_x(), &[qubit])
    }

    /// Add Pauli-Y
    pub fn y(self, qubit: QubitId) -> Self {
        self.push(Gate::pauli_y(), &[qubit])
    }

    /// Add Pauli-Z
    pub fn z(self, qubit: QubitId) -> Self {
        self.push(Gate::pauli_z(), &[qubit])
    }

    /// Add an X rotation
    pub fn rx(self, qubit: QubitId, theta: Angle) -> Self {
        self.push(Gate::rx(theta), &[qubit])
    }

    /// Add a Y rotation
    pub fn ry(self, qubit: QubitId, theta: Angle) -> Self {
        self.push(Gate::ry(theta), &[qubit])
    }

    /// Add a Z rotation
    pub fn rz(self, qubit: QubitId, theta: Angle) -> Self {
        self.push(Gate::rz(theta), &[qubit])
    }

    // ========================================================================
    // Multi-Qubit Gates
    // ========================================================================

    /// Add CNOT (control, target)
    pub fn cnot(self, control: QubitId, target: QubitId) -> Self {
        self.push(Gate::cnot(), &[control, target])
    }

    /// Add SWAP
    pub fn swap(self, a: QubitId, b: QubitId) -> Self {
        self.push(Gate::swap(), &[a, b])
    }

    /// Add a controlled phase shift (control, target)
    pub fn cps(self, control: QubitId, target: QubitId, theta: Angle) -> Self {
        self.push(Gate::controlled_phase_shift(theta), &[control, target])
    }

    /// Add Toffoli (control, control, target)
    pub fn toffoli(self, c1: QubitId, c2: QubitId, target: QubitId) -> Self {
        self.push(Gate::toffoli(), &[c1, c2, target])
    }

    /// Add a Grover oracle over the listed qubits, marking `mark`
    pub fn oracle(mut self, qubits: &[QubitId], mark: usize) -> Self {
        match Gate::oracle(qubits.len(), mark) {
            Ok(gate) => self.push(gate, qubits),
            Err(err) => {
                if self.circuit.is_ok() {
                    self.circuit = Err(err);
                }
                self
            }
        }
    }

    /// Add a Grover diffusion operator over the listed qubits
    pub fn diffusion(mut self, qubits: &[QubitId]) -> Self {
        match Gate::diffusion(qubits.len()) {
            Ok(gate) => self.push(gate, qubits),
            Err(err) => {
                if self.circuit.is_ok() {
                    self.circuit = Err(err);
                }
                self
            }
        }
    }

    // ========================================================================
    // General Forms
    // ========================================================================

    /// Add an arbitrary gate
    pub fn gate(self, gate: Gate, qubits: &[QubitId]) -> Self {
        self.push(gate, qubits)
    }

    /// Add a conditionally applied gate
    pub fn when(mut self, condition: Condition, gate: Gate, qubits: &[QubitId]) -> Self {
        if let Ok(circuit) = self.circuit.as_mut() {
            if let Err(err) = circuit.add_conditional_gate(gate, qubits, condition) {
                self.circuit = Err(err);
            }
        }
        self
    }

    /// Finish building, surfacing the first validation error if any
    pub fn build(self) -> SparqResult<Circuit> {
        self.circuit
    }
}

// ============================================================================
// Tests
// ============================================================================
