//! Circuit JSON interchange
//!
//! Host format consumed by editors and persistence layers:
//!
//! ```json
//! {
//!   "numQubits": 2,
//!   "initialBasisState": 0,
//!   "operations": [
//!     { "gateName": "Hadamard", "qubits": [0] },
//!     { "gateName": "CNOT", "qubits": [0, 1] },
//!     { "gateName": "RX", "qubits": [1], "params": [1.5707963267948966],
//!       "condition": { "qubit": 0, "value": 1 } }
//!   ]
//! }
//! ```
//!
//! Parsing goes through the same `add_*` paths as programmatic
//! construction, so every circuit invariant is enforced on load.

use crate::circuit::Circuit;
use crate::error::{SparqError, SparqResult};
use crate::gate::Gate;
use crate::types::Condition;
use serde::{Deserialize, Serialize};

// ============================================================================
// Documents
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CircuitDoc {
    num_qubits: usize,
    initial_basis_state: usize,
    operations: Vec<OperationDoc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OperationDoc {
    gate_name: String,
    qubits: Vec<usize>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    params: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    condition: Option<Condition>,
}

// ============================================================================
// Gate Name Dispatch
// ============================================================================

fn gate_from_name(name: &str, params: &[f64]) -> SparqResult<Gate> {
    let expect = |expected: usize| -> SparqResult<()> {
        if params.len() != expected {
            return Err(SparqError::ParamCountMismatch {
                gate: name.to_string(),
                expected,
                actual: params.len(),
            });
        }
        Ok(())
    };

    match name {
        "Hadamard" => {
            expect(0)?;
            Ok(Gate::hadamard())
        }
        "PauliX" => {
            expect(0)?;
            Ok(Gate::pauli_x())
        }
        "PauliY" => {
            expect(0)?;
            Ok(Gate::pauli_y())
        }
        "PauliZ" => {
            expect(0)?;
            Ok(Gate::pauli_z())
        }
        "RX" => {
            expect(1)?;
            Ok(Gate::rx(params[0]))
        }
        "RY" => {
            expect(1)?;
            Ok(Gate::ry(params[0]))
        }
        "RZ" => {
            expect(1)?;
            Ok(Gate::rz(params[0]))
        }
        "CNOT" => {
            expect(0)?;
            Ok(Gate::cnot())
        }
        "Swap" => {
            expect(0)?;
            Ok(Gate::swap())
        }
        "Toffoli" => {
            expect(0)?;
            Ok(Gate::toffoli())
        }
        "ControlledPhaseShift" => {
            expect(1)?;
            Ok(Gate::controlled_phase_shift(params[0]))
        }
        "Oracle" => {
            expect(2)?;
            Gate::oracle(params[0] as usize, params[1] as usize)
        }
        "Diffusion" => {
            expect(1)?;
            Gate::diffusion(params[0] as usize)
        }
        _ => Err(SparqError::UnknownGate {
            name: name.to_string(),
        }),
    }
}

// ============================================================================
// Circuit <-> JSON
// ============================================================================

impl Circuit {
    /// Serialize to the host JSON interchange format
    pub fn to_json(&self) -> SparqResult<String> {
        let doc = CircuitDoc {
            num_qubits: self.num_qubits(),
            initial_basis_state: self.initial_state(),
            operations: self
                .operations()
                .iter()
                .map(|op| OperationDoc {
                    gate_name: op.gate().kind().name().to_string(),
                    qubits: op.qubits().to_vec(),
                    params: op.gate().params().to_vec(),
                    condition: op.condition(),
                })
                .collect(),
        };
        Ok(serde_json::to_string_pretty(&doc)?)
    }

    /// Parse from the host JSON interchange format
    pub fn from_json(json: &str) -> SparqResult<Self> {
        let doc: CircuitDoc = serde_json::from_str(json)?;
        let mut circuit = Circuit::with_initial(doc.num_qubits, doc.initial_basis_state)?;
        for op in &doc.operations {
            let gate = gate_from_name(&op.gate_name, &op.params)?;
            match op.condition {
                Some(condition) => circuit.add_conditional_gate(gate, &op.qubits, condition)?,
                None => circuit.add_gate(gate, &op.qubits)?,
            }
        }
        Ok(circuit)
    }
}

// ============================================================================
// Tests
// ============================================================================
