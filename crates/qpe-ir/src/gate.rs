//! Quantum gate types.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::instruction::{Instruction, InstructionKind};

/// Standard gates with known semantics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StandardGate {
    // Single-qubit Pauli gates
    /// Identity gate.
    I,
    /// Pauli-X gate.
    X,
    /// Pauli-Y gate.
    Y,
    /// Pauli-Z gate.
    Z,

    // Single-qubit Clifford+T gates
    /// Hadamard gate.
    H,
    /// S gate (sqrt(Z)).
    S,
    /// S-dagger gate.
    Sdg,
    /// T gate (fourth root of Z), a phase rotation of π/4.
    T,
    /// T-dagger gate.
    Tdg,

    /// Phase gate P(λ) = diag(1, e^{iλ}).
    P(f64),

    // Two-qubit gates
    /// Controlled-X (CNOT) gate.
    CX,
    /// Controlled-Z gate.
    CZ,
    /// Controlled phase gate.
    CP(f64),
    /// SWAP gate.
    Swap,
}

impl StandardGate {
    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            StandardGate::I => "id",
            StandardGate::X => "x",
            StandardGate::Y => "y",
            StandardGate::Z => "z",
            StandardGate::H => "h",
            StandardGate::S => "s",
            StandardGate::Sdg => "sdg",
            StandardGate::T => "t",
            StandardGate::Tdg => "tdg",
            StandardGate::P(_) => "p",
            StandardGate::CX => "cx",
            StandardGate::CZ => "cz",
            StandardGate::CP(_) => "cp",
            StandardGate::Swap => "swap",
        }
    }

    /// Get the number of qubits this gate operates on.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            StandardGate::I
            | StandardGate::X
            | StandardGate::Y
            | StandardGate::Z
            | StandardGate::H
            | StandardGate::S
            | StandardGate::Sdg
            | StandardGate::T
            | StandardGate::Tdg
            | StandardGate::P(_) => 1,

            StandardGate::CX | StandardGate::CZ | StandardGate::CP(_) | StandardGate::Swap => 2,
        }
    }

    /// Number of leading operands that act as controls.
    #[inline]
    pub fn num_ctrl_qubits(&self) -> u32 {
        match self {
            StandardGate::CX | StandardGate::CZ | StandardGate::CP(_) => 1,
            _ => 0,
        }
    }

    /// Get the angle parameters of this gate.
    pub fn parameters(&self) -> Vec<f64> {
        match self {
            StandardGate::P(theta) | StandardGate::CP(theta) => vec![*theta],
            _ => vec![],
        }
    }

    /// The adjoint of this gate.
    pub fn inverse(&self) -> StandardGate {
        match self {
            StandardGate::S => StandardGate::Sdg,
            StandardGate::Sdg => StandardGate::S,
            StandardGate::T => StandardGate::Tdg,
            StandardGate::Tdg => StandardGate::T,
            StandardGate::P(theta) => StandardGate::P(-theta),
            StandardGate::CP(theta) => StandardGate::CP(-theta),
            // Self-inverse
            other => other.clone(),
        }
    }
}

/// An arbitrary unitary given by its matrix.
///
/// The matrix is stored row-major with dimension `2^num_qubits`. Unitarity
/// itself is not checked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitaryGate {
    /// Matrix dimension (rows == columns).
    pub dim: usize,
    /// Row-major entries, `dim * dim` long.
    pub matrix: Vec<Complex64>,
}

impl UnitaryGate {
    /// Create a unitary gate from row-major entries of a `dim × dim` matrix.
    pub fn new(matrix: Vec<Complex64>, dim: usize) -> IrResult<Self> {
        if dim < 2 || !dim.is_power_of_two() {
            return Err(IrError::InvalidMatrix(format!(
                "dimension {dim} is not a power of two >= 2"
            )));
        }
        if matrix.len() != dim * dim {
            return Err(IrError::InvalidMatrix(format!(
                "{} entries for a {dim}x{dim} matrix",
                matrix.len()
            )));
        }
        Ok(Self { dim, matrix })
    }

    /// Number of qubits the matrix acts on.
    pub fn num_qubits(&self) -> u32 {
        self.dim.trailing_zeros()
    }

    /// Entry at `(row, col)`.
    pub fn entry(&self, row: usize, col: usize) -> Complex64 {
        self.matrix[row * self.dim + col]
    }

    /// Conjugate transpose.
    #[must_use]
    pub fn adjoint(&self) -> Self {
        let dim = self.dim;
        let matrix = (0..dim * dim)
            .map(|i| self.entry(i % dim, i / dim).conj())
            .collect();
        Self { dim, matrix }
    }
}

/// A gate applied only when all of its control qubits are |1⟩.
///
/// Operands are the controls first, then the base gate's targets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlledGate {
    name: String,
    /// The controlled operation.
    pub base: Box<Gate>,
    /// Number of control qubits.
    pub num_ctrl_qubits: u32,
}

impl ControlledGate {
    /// Wrap `base` with `num_ctrl_qubits` controls.
    pub fn new(base: Gate, num_ctrl_qubits: u32) -> IrResult<Self> {
        if num_ctrl_qubits == 0 {
            return Err(IrError::InvalidControl {
                gate_name: base.name().to_string(),
            });
        }
        let name = match num_ctrl_qubits {
            1 => format!("c{}", base.name()),
            n => format!("c{n}{}", base.name()),
        };
        Ok(Self {
            name,
            base: Box::new(base),
            num_ctrl_qubits,
        })
    }

    /// Number of target qubits (those of the base gate).
    pub fn num_target_qubits(&self) -> u32 {
        self.base.num_qubits()
    }
}

/// A named sub-circuit used as a single gate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockGate {
    /// The name of the block.
    pub name: String,
    /// The number of qubits it operates on.
    pub num_qubits: u32,
    /// Body over local qubits `0..num_qubits`.
    pub body: Vec<Instruction>,
}

/// The kind of a quantum gate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GateKind {
    /// A standard gate with known semantics.
    Standard(StandardGate),
    /// A gate given by an explicit matrix.
    Unitary(UnitaryGate),
    /// A multi-controlled version of another gate.
    Controlled(ControlledGate),
    /// A sub-circuit block.
    Block(BlockGate),
}

impl GateKind {
    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &str {
        match self {
            GateKind::Standard(g) => g.name(),
            GateKind::Unitary(_) => "unitary",
            GateKind::Controlled(g) => &g.name,
            GateKind::Block(g) => &g.name,
        }
    }

    /// Get the number of qubits.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            GateKind::Standard(g) => g.num_qubits(),
            GateKind::Unitary(g) => g.num_qubits(),
            GateKind::Controlled(g) => g.num_ctrl_qubits + g.base.num_qubits(),
            GateKind::Block(g) => g.num_qubits,
        }
    }
}

/// A gate with associated metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gate {
    /// The kind of gate.
    pub kind: GateKind,
    /// Optional label for the gate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Gate {
    /// Create a new gate from a standard gate.
    pub fn standard(gate: StandardGate) -> Self {
        Self {
            kind: GateKind::Standard(gate),
            label: None,
        }
    }

    /// Create a gate from the row-major entries of a `dim × dim` matrix.
    pub fn unitary(matrix: Vec<Complex64>, dim: usize) -> IrResult<Self> {
        Ok(Self {
            kind: GateKind::Unitary(UnitaryGate::new(matrix, dim)?),
            label: None,
        })
    }

    /// Create a block gate from a gate body over local qubits.
    pub fn block(name: impl Into<String>, num_qubits: u32, body: Vec<Instruction>) -> Self {
        Self {
            kind: GateKind::Block(BlockGate {
                name: name.into(),
                num_qubits,
                body,
            }),
            label: None,
        }
    }

    /// Add a label to the gate.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Return this gate controlled on `num_ctrl_qubits` additional qubits.
    pub fn control(self, num_ctrl_qubits: u32) -> IrResult<Gate> {
        Ok(Gate {
            kind: GateKind::Controlled(ControlledGate::new(self, num_ctrl_qubits)?),
            label: None,
        })
    }

    /// The adjoint of this gate.
    ///
    /// Blocks are inverted instruction by instruction in reverse order.
    pub fn inverse(&self) -> IrResult<Gate> {
        let kind = match &self.kind {
            GateKind::Standard(g) => GateKind::Standard(g.inverse()),
            GateKind::Unitary(g) => GateKind::Unitary(g.adjoint()),
            GateKind::Controlled(g) => {
                GateKind::Controlled(ControlledGate::new(g.base.inverse()?, g.num_ctrl_qubits)?)
            }
            GateKind::Block(g) => {
                let body = g
                    .body
                    .iter()
                    .rev()
                    .map(|inst| match &inst.kind {
                        InstructionKind::Gate(gate) => {
                            Ok(Instruction::gate(gate.inverse()?, inst.qubits.iter().copied()))
                        }
                        InstructionKind::Barrier => Ok(inst.clone()),
                        InstructionKind::Measure => Err(IrError::NonUnitaryBlock(g.name.clone())),
                    })
                    .collect::<IrResult<Vec<_>>>()?;
                GateKind::Block(BlockGate {
                    name: format!("{}_dg", g.name),
                    num_qubits: g.num_qubits,
                    body,
                })
            }
        };
        Ok(Gate {
            kind,
            label: self.label.clone(),
        })
    }

    /// Get the name of this gate.
    pub fn name(&self) -> &str {
        self.kind.name()
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> u32 {
        self.kind.num_qubits()
    }

    /// Number of leading operands that act as controls.
    pub fn num_ctrl_qubits(&self) -> u32 {
        match &self.kind {
            GateKind::Standard(g) => g.num_ctrl_qubits(),
            GateKind::Controlled(g) => g.num_ctrl_qubits,
            GateKind::Unitary(_) | GateKind::Block(_) => 0,
        }
    }

    /// Get the controlled-gate view, if this is a controlled gate.
    pub fn as_controlled(&self) -> Option<&ControlledGate> {
        match &self.kind {
            GateKind::Controlled(g) => Some(g),
            _ => None,
        }
    }

    /// Get the block view, if this is a block gate.
    pub fn as_block(&self) -> Option<&BlockGate> {
        match &self.kind {
            GateKind::Block(g) => Some(g),
            _ => None,
        }
    }
}

impl From<StandardGate> for Gate {
    fn from(gate: StandardGate) -> Self {
        Gate::standard(gate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qubit::QubitId;
    use std::f64::consts::PI;

    fn identity(dim: usize) -> Vec<Complex64> {
        (0..dim * dim)
            .map(|i| {
                if i / dim == i % dim {
                    Complex64::new(1.0, 0.0)
                } else {
                    Complex64::new(0.0, 0.0)
                }
            })
            .collect()
    }

    #[test]
    fn test_standard_gate_properties() {
        assert_eq!(StandardGate::H.num_qubits(), 1);
        assert_eq!(StandardGate::CP(PI).num_qubits(), 2);
        assert_eq!(StandardGate::CP(PI).num_ctrl_qubits(), 1);
        assert_eq!(StandardGate::Swap.num_ctrl_qubits(), 0);
        assert_eq!(StandardGate::CP(0.5).parameters(), vec![0.5]);
    }

    #[test]
    fn test_standard_inverse() {
        assert_eq!(StandardGate::T.inverse(), StandardGate::Tdg);
        assert_eq!(StandardGate::CP(0.25).inverse(), StandardGate::CP(-0.25));
        assert_eq!(StandardGate::H.inverse(), StandardGate::H);
    }

    #[test]
    fn test_unitary_dimension_checks() {
        assert!(Gate::unitary(identity(4), 4).is_ok());
        assert!(matches!(
            Gate::unitary(identity(3), 3),
            Err(IrError::InvalidMatrix(_))
        ));
        assert!(matches!(
            Gate::unitary(identity(2), 4),
            Err(IrError::InvalidMatrix(_))
        ));
        assert!(matches!(
            Gate::unitary(vec![Complex64::new(1.0, 0.0)], 1),
            Err(IrError::InvalidMatrix(_))
        ));
    }

    #[test]
    fn test_unitary_adjoint() {
        let i = Complex64::new(0.0, 1.0);
        let zero = Complex64::new(0.0, 0.0);
        // [[0, i], [0, 0]] -> [[0, 0], [-i, 0]]
        let g = UnitaryGate::new(vec![zero, i, zero, zero], 2).unwrap();
        let adj = g.adjoint();
        assert_eq!(adj.entry(1, 0), -i);
        assert_eq!(adj.entry(0, 1), zero);
    }

    #[test]
    fn test_controlled_gate() {
        let ct = Gate::standard(StandardGate::T).control(3).unwrap();
        assert_eq!(ct.name(), "c3t");
        assert_eq!(ct.num_qubits(), 4);
        assert_eq!(ct.num_ctrl_qubits(), 3);
        assert_eq!(ct.as_controlled().unwrap().num_target_qubits(), 1);

        let cu = Gate::unitary(identity(4), 4).unwrap().control(1).unwrap();
        assert_eq!(cu.name(), "cunitary");
        assert_eq!(cu.num_qubits(), 3);
    }

    #[test]
    fn test_zero_controls_rejected() {
        let err = Gate::standard(StandardGate::T).control(0).unwrap_err();
        assert!(matches!(err, IrError::InvalidControl { .. }));
    }

    #[test]
    fn test_block_inverse_reverses_body() {
        let body = vec![
            Instruction::gate(StandardGate::H, [QubitId(0)]),
            Instruction::gate(StandardGate::CP(0.5), [QubitId(1), QubitId(0)]),
        ];
        let block = Gate::block("blk", 2, body);
        let inv = block.inverse().unwrap();
        let inv_body = &inv.as_block().unwrap().body;
        assert_eq!(inv.name(), "blk_dg");
        assert_eq!(inv_body[0].name(), "cp");
        assert_eq!(
            inv_body[0].as_gate().unwrap().kind,
            GateKind::Standard(StandardGate::CP(-0.5))
        );
        assert_eq!(inv_body[1].name(), "h");
    }

    #[test]
    fn test_block_with_measure_has_no_inverse() {
        use crate::qubit::ClbitId;
        let block = Gate::block("m", 1, vec![Instruction::measure(QubitId(0), ClbitId(0))]);
        assert!(matches!(block.inverse(), Err(IrError::NonUnitaryBlock(_))));
    }
}
