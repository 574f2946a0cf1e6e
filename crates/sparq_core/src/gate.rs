//! Quantum gate definitions for sparq
//!
//! A [`Gate`] is an immutable `2^k x 2^k` unitary matrix produced by a
//! named factory. Gates carry no qubit indices; an operation binds a gate
//! to its targets.
//!
//! Bit convention: matrix row/column indices enumerate the gate's local
//! bits with bit 0 at the least significant position, and local bit `j`
//! maps to the j-th listed target qubit. CNOT therefore flips local bit 1
//! iff local bit 0 is set, regardless of which global qubits are bound.

use crate::error::{SparqError, SparqResult};
use crate::types::Angle;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::fmt;

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);
const I: Complex64 = Complex64::new(0.0, 1.0);
const NEG_I: Complex64 = Complex64::new(0.0, -1.0);
const NEG_ONE: Complex64 = Complex64::new(-1.0, 0.0);

// ============================================================================
// Gate Kind
// ============================================================================

/// Named gate families
///
/// The names double as the `gateName` vocabulary of the circuit JSON
/// interchange format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GateKind {
    /// Hadamard
    Hadamard,
    /// Pauli-X (NOT)
    PauliX,
    /// Pauli-Y
    PauliY,
    /// Pauli-Z
    PauliZ,
    /// Rotation around X
    Rx,
    /// Rotation around Y
    Ry,
    /// Rotation around Z
    Rz,
    /// Controlled-NOT
    Cnot,
    /// SWAP
    Swap,
    /// Toffoli (CCX)
    Toffoli,
    /// Controlled phase shift
    ControlledPhaseShift,
    /// Grover oracle (sign flip on one marked state)
    Oracle,
    /// Grover diffusion (inversion about the mean)
    Diffusion,
}

impl GateKind {
    /// Interchange name of this gate family
    pub fn name(&self) -> &'static str {
        match self {
            GateKind::Hadamard => "Hadamard",
            GateKind::PauliX => "PauliX",
            GateKind::PauliY => "PauliY",
            GateKind::PauliZ => "PauliZ",
            GateKind::Rx => "RX",
            GateKind::Ry => "RY",
            GateKind::Rz => "RZ",
            GateKind::Cnot => "CNOT",
            GateKind::Swap => "Swap",
            GateKind::Toffoli => "Toffoli",
            GateKind::ControlledPhaseShift => "ControlledPhaseShift",
            GateKind::Oracle => "Oracle",
            GateKind::Diffusion => "Diffusion",
        }
    }

    /// Number of numeric parameters this family takes in the interchange
    /// format (RX/RY/RZ/ControlledPhaseShift: angle; Oracle: width, mark;
    /// Diffusion: width)
    pub fn param_count(&self) -> usize {
        match self {
            GateKind::Rx | GateKind::Ry | GateKind::Rz | GateKind::ControlledPhaseShift => 1,
            GateKind::Oracle => 2,
            GateKind::Diffusion => 1,
            _ => 0,
        }
    }
}

impl fmt::Display for GateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ============================================================================
// Gate
// ============================================================================

/// Immutable unitary gate matrix
///
/// `size` is `2^arity`; the matrix is stored row-major. Construction goes
/// through the named factories only, so every instance is unitary by
/// construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Gate {
    kind: GateKind,
    params: Vec<f64>,
    size: usize,
    matrix: Vec<Complex64>,
}

impl Gate {
    // ========================================================================
    // Single-Qubit Factories
    // ========================================================================

    /// Hadamard gate
    pub fn hadamard() -> Self {
        let s = Complex64::new(std::f64::consts::FRAC_1_SQRT_2, 0.0);
        Self::from_matrix(GateKind::Hadamard, vec![], 2, vec![s, s, s, -s])
    }

    /// Pauli-X gate
    pub fn pauli_x() -> Self {
        Self::from_matrix(GateKind::PauliX, vec![], 2, vec![ZERO, ONE, ONE, ZERO])
    }

    /// Pauli-Y gate
    pub fn pauli_y() -> Self {
        Self::from_matrix(GateKind::PauliY, vec![], 2, vec![ZERO, NEG_I, I, ZERO])
    }

    /// Pauli-Z gate
    pub fn pauli_z() -> Self {
        Self::from_matrix(GateKind::PauliZ, vec![], 2, vec![ONE, ZERO, ZERO, NEG_ONE])
    }

    /// Rotation around the X axis:
    /// `[[cos(θ/2), -i sin(θ/2)], [-i sin(θ/2), cos(θ/2)]]`
    pub fn rx(theta: Angle) -> Self {
        let c = Complex64::new((theta / 2.0).cos(), 0.0);
        let s = Complex64::new(0.0, -(theta / 2.0).sin());
        Self::from_matrix(GateKind::Rx, vec![theta], 2, vec![c, s, s, c])
    }

    /// Rotation around the Y axis:
    /// `[[cos(θ/2), -sin(θ/2)], [sin(θ/2), cos(θ/2)]]`
    pub fn ry(theta: Angle) -> Self {
        let c = Complex64::new((theta / 2.0).cos(), 0.0);
        let s = Complex64::new((theta / 2.0).sin(), 0.0);
        Self::from_matrix(GateKind::Ry, vec![theta], 2, vec![c, -s, s, c])
    }

    /// Rotation around the Z axis: `diag(e^{-iθ/2}, e^{+iθ/2})`
    pub fn rz(theta: Angle) -> Self {
        let neg = Complex64::from_polar(1.0, -theta / 2.0);
        let pos = Complex64::from_polar(1.0, theta / 2.0);
        Self::from_matrix(GateKind::Rz, vec![theta], 2, vec![neg, ZERO, ZERO, pos])
    }

    // ========================================================================
    // Two-Qubit Factories
    // ========================================================================

    /// Controlled-NOT: flips local bit 1 iff local bit 0 is set
    pub fn cnot() -> Self {
        let mut m = vec![ZERO; 16];
        for col in 0..4usize {
            let row = if col & 1 == 1 { col ^ 2 } else { col };
            m[row * 4 + col] = ONE;
        }
        Self::from_matrix(GateKind::Cnot, vec![], 4, m)
    }

    /// SWAP: exchanges local bits 0 and 1
    pub fn swap() -> Self {
        let mut m = vec![ZERO; 16];
        for col in 0..4usize {
            let row = ((col & 1) << 1) | ((col >> 1) & 1);
            m[row * 4 + col] = ONE;
        }
        Self::from_matrix(GateKind::Swap, vec![], 4, m)
    }

    /// Controlled phase shift: multiplies the all-ones basis state by
    /// `e^{iθ}`
    pub fn controlled_phase_shift(theta: Angle) -> Self {
        let mut m = vec![ZERO; 16];
        for d in 0..4usize {
            m[d * 4 + d] = ONE;
        }
        m[3 * 4 + 3] = Complex64::from_polar(1.0, theta);
        Self::from_matrix(GateKind::ControlledPhaseShift, vec![theta], 4, m)
    }

    // ========================================================================
    // Three-Qubit Factories
    // ========================================================================

    /// Toffoli: flips local bit 2 iff local bits 0 and 1 are both set
    pub fn toffoli() -> Self {
        let mut m = vec![ZERO; 64];
        for col in 0..8usize {
            let row = if col & 3 == 3 { col ^ 4 } else { col };
            m[row * 8 + col] = ONE;
        }
        Self::from_matrix(GateKind::Toffoli, vec![], 8, m)
    }

    // ========================================================================
    // Wide Factories
    // ========================================================================

    /// Grover oracle over a `width`-qubit subspace: diagonal `+1` with
    /// `-1` at index `mark`
    pub fn oracle(width: usize, mark: usize) -> SparqResult<Self> {
        if width < 1 {
            return Err(SparqError::InvalidWidth { width });
        }
        let size = 1usize << width;
        if mark >= size {
            return Err(SparqError::InvalidOracleMark {
                mark,
                dimension: size,
            });
        }
        let mut m = vec![ZERO; size * size];
        for d in 0..size {
            m[d * size + d] = if d == mark { NEG_ONE } else { ONE };
        }
        Ok(Self::from_matrix(
            GateKind::Oracle,
            vec![width as f64, mark as f64],
            size,
            m,
        ))
    }

    /// Grover diffusion over a `width`-qubit subspace:
    /// `2/2^width * J - I` (inversion about the mean)
    pub fn diffusion(width: usize) -> SparqResult<Self> {
        if width < 1 {
            return Err(SparqError::InvalidWidth { width });
        }
        let size = 1usize << width;
        let off = Complex64::new(2.0 / size as f64, 0.0);
        let mut m = vec![off; size * size];
        for d in 0..size {
            m[d * size + d] = off - ONE;
        }
        Ok(Self::from_matrix(
            GateKind::Diffusion,
            vec![width as f64],
            size,
            m,
        ))
    }

    fn from_matrix(kind: GateKind, params: Vec<f64>, size: usize, matrix: Vec<Complex64>) -> Self {
        debug_assert!(size.is_power_of_two());
        debug_assert_eq!(matrix.len(), size * size);
        Self {
            kind,
            params,
            size,
            matrix,
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Matrix dimension (`2^arity`)
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of qubits this gate acts on
    #[inline]
    pub fn arity(&self) -> usize {
        self.size.trailing_zeros() as usize
    }

    /// Matrix element at (row, col)
    #[inline]
    pub fn element(&self, row: usize, col: usize) -> Complex64 {
        self.matrix[row * self.size + col]
    }

    /// Gate family
    #[inline]
    pub fn kind(&self) -> GateKind {
        self.kind
    }

    /// Numeric parameters the factory was called with
    #[inline]
    pub fn params(&self) -> &[f64] {
        &self.params
    }

    /// Row-major matrix contents
    #[inline]
    pub fn matrix(&self) -> &[Complex64] {
        &self.matrix
    }

    // ========================================================================
    // Structure Queries
    // ========================================================================

    /// Check `G * G^dagger == I` within `tol` per element
    pub fn is_unitary(&self, tol: f64) -> bool {
        let n = self.size;
        for i in 0..n {
            for j in 0..n {
                let mut acc = ZERO;
                for k in 0..n {
                    acc += self.element(i, k) * self.element(j, k).conj();
                }
                let expected = if i == j { ONE } else { ZERO };
                if (acc - expected).norm() > tol {
                    return false;
                }
            }
        }
        true
    }

    /// True when every off-diagonal element is exactly zero
    pub fn is_diagonal(&self) -> bool {
        let n = self.size;
        for i in 0..n {
            for j in 0..n {
                if i != j && self.matrix[i * n + j] != ZERO {
                    return false;
                }
            }
        }
        true
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.params.is_empty() {
            write!(f, "{}", self.kind.name())
        } else {
            let params: Vec<String> = self.params.iter().map(|p| format!("{}", p)).collect();
            write!(f, "{}({})", self.kind.name(), params.join(","))
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
