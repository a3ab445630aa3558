//! High-level circuit builder API.

use std::collections::BTreeMap;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::gate::{Gate, StandardGate};
use crate::instruction::{Instruction, InstructionKind};
use crate::qubit::{Clbit, ClbitId, Qubit, QubitId};

/// A quantum circuit.
///
/// An ordered, append-only list of instructions over a fixed set of qubits and
/// classical bits. Qubit and clbit ids are dense: the `i`-th wire added has
/// id `i`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    /// Name of the circuit.
    name: String,
    /// Qubits in the circuit.
    qubits: Vec<Qubit>,
    /// Classical bits in the circuit.
    clbits: Vec<Clbit>,
    /// Operations in program order.
    instructions: Vec<Instruction>,
}

impl Circuit {
    /// Create a new empty circuit.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            qubits: vec![],
            clbits: vec![],
            instructions: vec![],
        }
    }

    /// Create a circuit with a given number of qubits and classical bits.
    pub fn with_size(name: impl Into<String>, num_qubits: u32, num_clbits: u32) -> Self {
        let mut circuit = Self::new(name);
        for _ in 0..num_qubits {
            circuit.add_qubit();
        }
        for _ in 0..num_clbits {
            circuit.add_clbit();
        }
        circuit
    }

    /// Add a single qubit to the circuit.
    pub fn add_qubit(&mut self) -> QubitId {
        let id = self.next_qubit_id();
        self.qubits.push(Qubit::new(id));
        id
    }

    /// Add a quantum register with multiple qubits.
    pub fn add_qreg(&mut self, name: impl Into<String>, size: u32) -> Vec<QubitId> {
        let name = name.into();
        (0..size)
            .map(|i| {
                let id = self.next_qubit_id();
                self.qubits.push(Qubit::with_register(id, &name, i));
                id
            })
            .collect()
    }

    /// Add a single classical bit to the circuit.
    pub fn add_clbit(&mut self) -> ClbitId {
        let id = self.next_clbit_id();
        self.clbits.push(Clbit::new(id));
        id
    }

    /// Add a classical register with multiple bits.
    pub fn add_creg(&mut self, name: impl Into<String>, size: u32) -> Vec<ClbitId> {
        let name = name.into();
        (0..size)
            .map(|i| {
                let id = self.next_clbit_id();
                self.clbits.push(Clbit::with_register(id, &name, i));
                id
            })
            .collect()
    }

    #[allow(clippy::cast_possible_truncation)]
    fn next_qubit_id(&self) -> QubitId {
        QubitId(self.qubits.len() as u32)
    }

    #[allow(clippy::cast_possible_truncation)]
    fn next_clbit_id(&self) -> ClbitId {
        ClbitId(self.clbits.len() as u32)
    }

    // =========================================================================
    // Single-qubit gates
    // =========================================================================

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::H, qubit))?;
        Ok(self)
    }

    /// Apply Pauli-X gate.
    pub fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::X, qubit))?;
        Ok(self)
    }

    // =========================================================================
    // Two-qubit gates
    // =========================================================================

    /// Apply controlled-phase gate.
    pub fn cp(&mut self, theta: f64, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::two_qubit_gate(
            StandardGate::CP(theta),
            control,
            target,
        ))?;
        Ok(self)
    }

    /// Apply SWAP gate.
    pub fn swap(&mut self, q1: QubitId, q2: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::two_qubit_gate(StandardGate::Swap, q1, q2))?;
        Ok(self)
    }

    // =========================================================================
    // Other operations
    // =========================================================================

    /// Append an arbitrary gate (controlled, unitary, block, ...).
    ///
    /// For controlled gates the control qubits come first in `qubits`.
    pub fn append(
        &mut self,
        gate: impl Into<Gate>,
        qubits: impl IntoIterator<Item = QubitId>,
    ) -> IrResult<&mut Self> {
        self.apply(Instruction::gate(gate, qubits))?;
        Ok(self)
    }

    /// Measure a qubit to a classical bit.
    pub fn measure(&mut self, qubit: QubitId, clbit: ClbitId) -> IrResult<&mut Self> {
        self.apply(Instruction::measure(qubit, clbit))?;
        Ok(self)
    }

    /// Apply a barrier to all qubits.
    pub fn barrier_all(&mut self) -> IrResult<&mut Self> {
        let qubits: Vec<_> = self.qubits.iter().map(|q| q.id).collect();
        self.apply(Instruction::barrier(qubits))?;
        Ok(self)
    }

    /// Append every instruction of `other`, with its qubit `i` mapped to
    /// `qubits[i]` and its clbit `i` mapped to this circuit's clbit `i`.
    ///
    /// Nothing is appended if any remapped instruction is invalid.
    #[allow(clippy::cast_possible_truncation)]
    pub fn compose(&mut self, other: &Circuit, qubits: &[QubitId]) -> IrResult<&mut Self> {
        if qubits.len() != other.num_qubits() {
            return Err(IrError::QubitCountMismatch {
                gate_name: other.name.clone(),
                expected: other.qubits.len() as u32,
                got: qubits.len() as u32,
            });
        }
        let clbit_map: Vec<_> = self.clbits.iter().map(|c| c.id).collect();
        let mapped = other
            .instructions
            .iter()
            .map(|inst| {
                let inst = inst.remapped(qubits, &clbit_map)?;
                self.validate(&inst)?;
                Ok(inst)
            })
            .collect::<IrResult<Vec<_>>>()?;
        self.instructions.extend(mapped);
        Ok(self)
    }

    /// Wrap this circuit as a single block gate named after it.
    ///
    /// Fails if the circuit measures anything.
    #[allow(clippy::cast_possible_truncation)]
    pub fn to_gate(&self) -> IrResult<Gate> {
        if self.instructions.iter().any(Instruction::is_measure) {
            return Err(IrError::NonUnitaryBlock(self.name.clone()));
        }
        Ok(Gate::block(
            self.name.clone(),
            self.qubits.len() as u32,
            self.instructions.clone(),
        ))
    }

    /// The adjoint circuit: instructions reversed and individually inverted.
    pub fn inverse(&self) -> IrResult<Circuit> {
        let instructions = self
            .instructions
            .iter()
            .rev()
            .map(|inst| match &inst.kind {
                InstructionKind::Gate(gate) => Ok(Instruction {
                    kind: InstructionKind::Gate(gate.inverse()?),
                    qubits: inst.qubits.clone(),
                    clbits: vec![],
                }),
                InstructionKind::Barrier => Ok(inst.clone()),
                InstructionKind::Measure => Err(IrError::NonUnitaryBlock(self.name.clone())),
            })
            .collect::<IrResult<Vec<_>>>()?;
        Ok(Circuit {
            name: format!("{}_dg", self.name),
            qubits: self.qubits.clone(),
            clbits: self.clbits.clone(),
            instructions,
        })
    }

    /// Rename the circuit.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Validate and append an instruction.
    pub fn apply(&mut self, instruction: Instruction) -> IrResult<()> {
        self.validate(&instruction)?;
        self.instructions.push(instruction);
        Ok(())
    }

    #[allow(clippy::cast_possible_truncation)]
    fn validate(&self, instruction: &Instruction) -> IrResult<()> {
        let gate_name = match &instruction.kind {
            InstructionKind::Gate(gate) => Some(gate.name().to_string()),
            _ => None,
        };

        // Validate gate arity matches qubit count
        if let InstructionKind::Gate(gate) = &instruction.kind {
            let expected = gate.num_qubits();
            let got = instruction.qubits.len() as u32;
            if expected != got {
                return Err(IrError::QubitCountMismatch {
                    gate_name: gate.name().to_string(),
                    expected,
                    got,
                });
            }
        }
        if instruction.is_measure() && instruction.qubits.len() != instruction.clbits.len() {
            return Err(IrError::MeasureArity {
                qubits: instruction.qubits.len(),
                clbits: instruction.clbits.len(),
            });
        }

        let mut seen = FxHashSet::default();
        for &qubit in &instruction.qubits {
            if qubit.0 as usize >= self.qubits.len() {
                return Err(IrError::QubitNotFound {
                    qubit,
                    gate_name: gate_name.clone(),
                });
            }
            if !seen.insert(qubit) {
                return Err(IrError::DuplicateQubit {
                    qubit,
                    gate_name: gate_name.clone(),
                });
            }
        }
        for &clbit in &instruction.clbits {
            if clbit.0 as usize >= self.clbits.len() {
                return Err(IrError::ClbitNotFound {
                    clbit,
                    gate_name: gate_name.clone(),
                });
            }
        }
        Ok(())
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.qubits.len()
    }

    /// Get the number of classical bits.
    pub fn num_clbits(&self) -> usize {
        self.clbits.len()
    }

    /// Get the qubits in the circuit.
    pub fn qubits(&self) -> &[Qubit] {
        &self.qubits
    }

    /// Get the classical bits in the circuit.
    pub fn clbits(&self) -> &[Clbit] {
        &self.clbits
    }

    /// Instructions in program order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Number of instructions, barriers included.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Whether the circuit has no instructions.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Number of non-barrier operations.
    pub fn num_ops(&self) -> usize {
        self.instructions.iter().filter(|i| !i.is_barrier()).count()
    }

    /// Count instructions by name.
    pub fn count_ops(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for inst in &self.instructions {
            *counts.entry(inst.name().to_string()).or_insert(0) += 1;
        }
        counts
    }

    /// Get the circuit depth.
    ///
    /// Barriers synchronise their qubits but do not add a layer.
    pub fn depth(&self) -> usize {
        let mut qubit_level = vec![0usize; self.qubits.len()];
        let mut clbit_level = vec![0usize; self.clbits.len()];
        for inst in &self.instructions {
            let front = inst
                .qubits
                .iter()
                .map(|q| qubit_level[q.0 as usize])
                .chain(inst.clbits.iter().map(|c| clbit_level[c.0 as usize]))
                .max()
                .unwrap_or(0);
            let level = if inst.is_barrier() { front } else { front + 1 };
            for q in &inst.qubits {
                qubit_level[q.0 as usize] = level;
            }
            for c in &inst.clbits {
                clbit_level[c.0 as usize] = level;
            }
        }
        qubit_level
            .into_iter()
            .chain(clbit_level)
            .max()
            .unwrap_or(0)
    }

    /// Serialize the circuit to pretty-printed JSON.
    pub fn to_json(&self) -> IrResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize a circuit from JSON.
    pub fn from_json(json: &str) -> IrResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_new_circuit() {
        let circuit = Circuit::new("test");
        assert_eq!(circuit.name(), "test");
        assert_eq!(circuit.num_qubits(), 0);
        assert_eq!(circuit.num_clbits(), 0);
        assert!(circuit.is_empty());
    }

    #[test]
    fn test_circuit_with_size() {
        let circuit = Circuit::with_size("test", 3, 2);
        assert_eq!(circuit.num_qubits(), 3);
        assert_eq!(circuit.num_clbits(), 2);
    }

    #[test]
    fn test_add_registers() {
        let mut circuit = Circuit::new("test");
        let counting = circuit.add_qreg("counting", 3);
        let ancilla = circuit.add_qreg("ancilla", 2);
        let creg = circuit.add_creg("c", 3);

        assert_eq!(counting, vec![QubitId(0), QubitId(1), QubitId(2)]);
        assert_eq!(ancilla, vec![QubitId(3), QubitId(4)]);
        assert_eq!(creg.len(), 3);
        assert_eq!(circuit.num_qubits(), 5);
        assert_eq!(format!("{}", circuit.qubits()[4]), "ancilla[1]");
    }

    #[test]
    fn test_fluent_api_and_depth() {
        let mut circuit = Circuit::with_size("test", 2, 2);
        circuit
            .h(QubitId(0))
            .unwrap()
            .cp(PI / 4.0, QubitId(0), QubitId(1))
            .unwrap()
            .measure(QubitId(0), ClbitId(0))
            .unwrap()
            .measure(QubitId(1), ClbitId(1))
            .unwrap();

        assert_eq!(circuit.len(), 4);
        assert_eq!(circuit.depth(), 3); // H, CP, parallel measures
    }

    #[test]
    fn test_barrier_adds_no_depth() {
        let mut circuit = Circuit::with_size("test", 2, 0);
        circuit.h(QubitId(0)).unwrap();
        circuit.barrier_all().unwrap();
        circuit.h(QubitId(1)).unwrap();
        // The barrier forces H(q1) after H(q0).
        assert_eq!(circuit.depth(), 2);
        assert_eq!(circuit.num_ops(), 2);
    }

    #[test]
    fn test_invalid_operands() {
        let mut circuit = Circuit::with_size("test", 2, 1);
        assert!(matches!(
            circuit.h(QubitId(2)),
            Err(IrError::QubitNotFound { .. })
        ));
        assert!(matches!(
            circuit.cp(PI, QubitId(1), QubitId(1)),
            Err(IrError::DuplicateQubit { .. })
        ));
        assert!(matches!(
            circuit.measure(QubitId(0), ClbitId(1)),
            Err(IrError::ClbitNotFound { .. })
        ));
        assert!(matches!(
            circuit.append(StandardGate::Swap, [QubitId(0)]),
            Err(IrError::QubitCountMismatch { expected: 2, got: 1, .. })
        ));
        assert!(circuit.is_empty());
    }

    #[test]
    fn test_unpaired_measure_rejected() {
        let mut circuit = Circuit::with_size("test", 2, 2);
        let inst = Instruction {
            kind: InstructionKind::Measure,
            qubits: vec![QubitId(0), QubitId(1)],
            clbits: vec![ClbitId(0)],
        };
        assert!(matches!(
            circuit.apply(inst),
            Err(IrError::MeasureArity { qubits: 2, clbits: 1 })
        ));
        assert!(circuit.is_empty());
    }

    #[test]
    fn test_count_ops() {
        let mut circuit = Circuit::with_size("test", 2, 0);
        circuit.h(QubitId(0)).unwrap().h(QubitId(1)).unwrap();
        circuit.cp(PI / 2.0, QubitId(0), QubitId(1)).unwrap();
        let counts = circuit.count_ops();
        assert_eq!(counts["h"], 2);
        assert_eq!(counts["cp"], 1);
    }

    #[test]
    fn test_compose_on_subset() {
        let mut inner = Circuit::with_size("inner", 2, 0);
        inner.h(QubitId(0)).unwrap().swap(QubitId(0), QubitId(1)).unwrap();

        let mut outer = Circuit::with_size("outer", 4, 0);
        outer.x(QubitId(0)).unwrap();
        outer.compose(&inner, &[QubitId(3), QubitId(1)]).unwrap();

        let ops = outer.instructions();
        assert_eq!(ops.len(), 3);
        assert_eq!(ops[0].name(), "x");
        assert_eq!(ops[1].qubits, vec![QubitId(3)]);
        assert_eq!(ops[2].qubits, vec![QubitId(3), QubitId(1)]);
    }

    #[test]
    fn test_compose_is_all_or_nothing() {
        let mut inner = Circuit::with_size("inner", 2, 0);
        inner.h(QubitId(0)).unwrap().h(QubitId(1)).unwrap();

        let mut outer = Circuit::with_size("outer", 2, 0);
        assert!(outer.compose(&inner, &[QubitId(0), QubitId(5)]).is_err());
        assert!(outer.compose(&inner, &[QubitId(0)]).is_err());
        assert!(outer.is_empty());
    }

    #[test]
    fn test_to_gate_and_inverse() {
        let mut inner = Circuit::with_size("blk", 2, 0);
        inner.h(QubitId(0)).unwrap().cp(PI / 4.0, QubitId(1), QubitId(0)).unwrap();

        let gate = inner.to_gate().unwrap();
        assert_eq!(gate.name(), "blk");
        assert_eq!(gate.num_qubits(), 2);

        let inv = inner.inverse().unwrap();
        assert_eq!(inv.name(), "blk_dg");
        assert_eq!(inv.instructions()[0].name(), "cp");
        assert_eq!(inv.instructions()[1].name(), "h");
    }

    #[test]
    fn test_measuring_circuit_is_not_a_gate() {
        let mut circuit = Circuit::with_size("m", 1, 1);
        circuit.measure(QubitId(0), ClbitId(0)).unwrap();
        assert!(matches!(circuit.to_gate(), Err(IrError::NonUnitaryBlock(_))));
        assert!(matches!(circuit.inverse(), Err(IrError::NonUnitaryBlock(_))));
    }

    #[test]
    fn test_json_roundtrip_preserves_order() {
        let mut circuit = Circuit::with_size("json", 2, 1);
        circuit.h(QubitId(0)).unwrap();
        circuit
            .append(
                Gate::standard(StandardGate::T).control(1).unwrap(),
                [QubitId(0), QubitId(1)],
            )
            .unwrap();
        circuit.measure(QubitId(0), ClbitId(0)).unwrap();

        let json = circuit.to_json().unwrap();
        let back = Circuit::from_json(&json).unwrap();
        assert_eq!(back, circuit);
    }
}
