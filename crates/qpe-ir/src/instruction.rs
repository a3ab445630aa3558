//! Circuit instructions combining gates with operands.

use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::gate::{Gate, StandardGate};
use crate::qubit::{ClbitId, QubitId};

/// The kind of instruction in a circuit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InstructionKind {
    /// A quantum gate operation.
    Gate(Gate),
    /// Measurement operation.
    Measure,
    /// Barrier (synchronization point).
    Barrier,
}

/// A complete instruction with operands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    /// The kind of instruction.
    pub kind: InstructionKind,
    /// Qubits this instruction operates on.
    pub qubits: Vec<QubitId>,
    /// Classical bits this instruction operates on (for measure).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub clbits: Vec<ClbitId>,
}

impl Instruction {
    /// Create a gate instruction.
    pub fn gate(gate: impl Into<Gate>, qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            kind: InstructionKind::Gate(gate.into()),
            qubits: qubits.into_iter().collect(),
            clbits: vec![],
        }
    }

    /// Create a single-qubit gate instruction.
    pub fn single_qubit_gate(gate: StandardGate, qubit: QubitId) -> Self {
        Self::gate(gate, [qubit])
    }

    /// Create a two-qubit gate instruction.
    pub fn two_qubit_gate(gate: StandardGate, q1: QubitId, q2: QubitId) -> Self {
        Self::gate(gate, [q1, q2])
    }

    /// Create a measurement instruction.
    pub fn measure(qubit: QubitId, clbit: ClbitId) -> Self {
        Self {
            kind: InstructionKind::Measure,
            qubits: vec![qubit],
            clbits: vec![clbit],
        }
    }

    /// Create a barrier instruction.
    pub fn barrier(qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            kind: InstructionKind::Barrier,
            qubits: qubits.into_iter().collect(),
            clbits: vec![],
        }
    }

    /// Rewrite operands through a qubit and clbit mapping.
    ///
    /// Local qubit `i` becomes `qubit_map[i]`, likewise for clbits.
    pub(crate) fn remapped(&self, qubit_map: &[QubitId], clbit_map: &[ClbitId]) -> IrResult<Self> {
        let qubits = self
            .qubits
            .iter()
            .map(|q| {
                qubit_map
                    .get(q.0 as usize)
                    .copied()
                    .ok_or_else(|| IrError::QubitNotFound {
                        qubit: *q,
                        gate_name: Some(self.name().to_string()),
                    })
            })
            .collect::<IrResult<Vec<_>>>()?;
        let clbits = self
            .clbits
            .iter()
            .map(|c| {
                clbit_map
                    .get(c.0 as usize)
                    .copied()
                    .ok_or_else(|| IrError::ClbitNotFound {
                        clbit: *c,
                        gate_name: Some(self.name().to_string()),
                    })
            })
            .collect::<IrResult<Vec<_>>>()?;
        Ok(Self {
            kind: self.kind.clone(),
            qubits,
            clbits,
        })
    }

    /// Check if this is a gate instruction.
    pub fn is_gate(&self) -> bool {
        matches!(self.kind, InstructionKind::Gate(_))
    }

    /// Check if this is a measurement.
    pub fn is_measure(&self) -> bool {
        matches!(self.kind, InstructionKind::Measure)
    }

    /// Check if this is a barrier.
    pub fn is_barrier(&self) -> bool {
        matches!(self.kind, InstructionKind::Barrier)
    }

    /// Get the gate if this is a gate instruction.
    pub fn as_gate(&self) -> Option<&Gate> {
        match &self.kind {
            InstructionKind::Gate(g) => Some(g),
            _ => None,
        }
    }

    /// Control operands of a gate instruction (empty otherwise).
    pub fn control_qubits(&self) -> &[QubitId] {
        let n = self.as_gate().map_or(0, |g| g.num_ctrl_qubits() as usize);
        &self.qubits[..n.min(self.qubits.len())]
    }

    /// Target operands of a gate instruction (all operands otherwise).
    pub fn target_qubits(&self) -> &[QubitId] {
        &self.qubits[self.control_qubits().len()..]
    }

    /// Get the name of the instruction.
    pub fn name(&self) -> &str {
        match &self.kind {
            InstructionKind::Gate(g) => g.name(),
            InstructionKind::Measure => "measure",
            InstructionKind::Barrier => "barrier",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_instruction() {
        let inst = Instruction::single_qubit_gate(StandardGate::H, QubitId(0));
        assert!(inst.is_gate());
        assert_eq!(inst.qubits.len(), 1);
        assert_eq!(inst.name(), "h");
        assert!(inst.control_qubits().is_empty());
    }

    #[test]
    fn test_control_and_target_split() {
        let inst = Instruction::two_qubit_gate(StandardGate::CP(1.0), QubitId(2), QubitId(5));
        assert_eq!(inst.control_qubits(), &[QubitId(2)]);
        assert_eq!(inst.target_qubits(), &[QubitId(5)]);
    }

    #[test]
    fn test_measure_instruction() {
        let inst = Instruction::measure(QubitId(0), ClbitId(0));
        assert!(inst.is_measure());
        assert_eq!(inst.qubits.len(), 1);
        assert_eq!(inst.clbits.len(), 1);
    }

    #[test]
    fn test_barrier_instruction() {
        let inst = Instruction::barrier([QubitId(0), QubitId(1), QubitId(2)]);
        assert!(inst.is_barrier());
        assert_eq!(inst.qubits.len(), 3);
    }

    #[test]
    fn test_remap() {
        let inst = Instruction::two_qubit_gate(StandardGate::Swap, QubitId(0), QubitId(1));
        let mapped = inst.remapped(&[QubitId(7), QubitId(4)], &[]).unwrap();
        assert_eq!(mapped.qubits, vec![QubitId(7), QubitId(4)]);

        assert!(inst.remapped(&[QubitId(7)], &[]).is_err());
    }
}
