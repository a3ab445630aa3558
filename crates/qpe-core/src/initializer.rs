//! System initialisation: superposition, ancilla preparation and the
//! controlled-phase repetition ladder.
//!
//! For counting-register size `cq`, counting qubit `k` controls `2^k`
//! successive applications of the phase operation on the ancilla register,
//! so qubit `k` picks up the `k`-th binary digit of the phase:
//!
//! ```text
//! q0 ─H─■──────────────── ...
//! q1 ─H─┼──■──■────────── ...
//! q2 ─H─┼──┼──┼──■──■──■──■ ...
//! a  ─X─U──U──U──U──U──U──U ...
//! ```

use qpe_ir::{Circuit, Gate, QubitId, StandardGate};
use tracing::{debug, warn};

use crate::error::QpeResult;
use crate::layout::RegisterLayout;
use crate::source::PhaseSource;

/// Number of times the phase operation is applied for loop index `x`.
///
/// Loop index `x` (running `cq-1` down to `0`) drives counting qubit
/// `cq-1-x`, which receives `2^(cq-1-x)` applications.
///
/// # Panics
///
/// Panics if `x >= counting_qubits`.
pub fn repetitions(counting_qubits: u32, x: u32) -> u64 {
    assert!(x < counting_qubits, "loop index {x} outside counting register");
    1u64 << (counting_qubits - 1 - x)
}

/// The repetition ladder in application order as `(control, repetitions)`.
pub fn ladder_schedule(counting_qubits: u32) -> Vec<(QubitId, u64)> {
    (0..counting_qubits)
        .rev()
        .map(|x| {
            (
                QubitId(counting_qubits - 1 - x),
                repetitions(counting_qubits, x),
            )
        })
        .collect()
}

/// The controlled operation applied at every rung of the ladder.
///
/// Resolved once per build from the phase source and the layout.
#[derive(Debug, Clone, PartialEq)]
pub enum LadderStep {
    /// A prebuilt controlled gate spanning `[control, ancillas...]`.
    Controlled(Gate),
    /// A direct `cp(angle)` from the control onto the single ancilla.
    PhaseRotation {
        /// Rotation angle in radians.
        angle: f64,
        /// The sole ancilla.
        target: QubitId,
    },
}

impl LadderStep {
    /// Choose the controlled operation for `source` on `layout`.
    ///
    /// - unitary: the matrix as a gate, controlled by the counting qubit;
    /// - angle with one ancilla: `cp(angle)`;
    /// - angle with several ancillas: T controlled on the counting qubit and
    ///   all but the last ancilla (`aq` controls in total).
    pub fn resolve(source: &PhaseSource, layout: &RegisterLayout) -> QpeResult<Self> {
        let aq = layout.num_ancillary();
        let step = match source {
            PhaseSource::Unitary(matrix) => {
                LadderStep::Controlled(matrix.to_gate()?.control(1)?)
            }
            PhaseSource::Angle(angle) if aq > 1 => {
                warn!(
                    angle,
                    ancillary_qubits = aq,
                    "angle mode with several ancillas uses a controlled-T stand-in, angle is not encoded"
                );
                LadderStep::Controlled(Gate::standard(StandardGate::T).control(aq)?)
            }
            PhaseSource::Angle(angle) => LadderStep::PhaseRotation {
                angle: *angle,
                target: QubitId(layout.num_counting()),
            },
        };
        Ok(step)
    }

    /// Apply one rung with `control` as the counting-qubit control.
    pub fn apply(
        &self,
        circuit: &mut Circuit,
        control: QubitId,
        layout: &RegisterLayout,
    ) -> QpeResult<()> {
        match self {
            LadderStep::Controlled(gate) => {
                circuit.append(
                    gate.clone(),
                    std::iter::once(control).chain(layout.ancilla_qubits()),
                )?;
            }
            LadderStep::PhaseRotation { angle, target } => {
                circuit.cp(*angle, control, *target)?;
            }
        }
        Ok(())
    }
}

/// Prepare the registers and append the repetition ladder.
///
/// 1. `H` on every counting qubit.
/// 2. `X` on every ancilla.
/// 3. For `x` from `cq-1` down to `0`, apply the resolved [`LadderStep`]
///    `2^(cq-1-x)` times controlled on counting qubit `cq-1-x`.
pub fn initialize<'c>(
    circuit: &'c mut Circuit,
    layout: &RegisterLayout,
    source: &PhaseSource,
) -> QpeResult<&'c mut Circuit> {
    for q in layout.counting_qubits() {
        circuit.h(q)?;
    }
    for q in layout.ancilla_qubits() {
        circuit.x(q)?;
    }

    let step = LadderStep::resolve(source, layout)?;
    debug!(
        mode = source.mode(),
        counting_qubits = layout.num_counting(),
        ancillary_qubits = layout.num_ancillary(),
        "appending controlled-phase ladder"
    );

    for (control, reps) in ladder_schedule(layout.num_counting()) {
        for _ in 0..reps {
            step.apply(circuit, control, layout)?;
        }
    }

    Ok(circuit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::UnitaryMatrix;
    use std::f64::consts::PI;

    fn fresh(layout: &RegisterLayout) -> Circuit {
        Circuit::with_size("init", layout.num_qubits(), layout.num_counting())
    }

    #[test]
    fn test_repetitions() {
        assert_eq!(repetitions(3, 2), 1);
        assert_eq!(repetitions(3, 1), 2);
        assert_eq!(repetitions(3, 0), 4);
    }

    #[test]
    fn test_schedule_order() {
        let schedule = ladder_schedule(3);
        assert_eq!(
            schedule,
            vec![(QubitId(0), 1), (QubitId(1), 2), (QubitId(2), 4)]
        );
    }

    #[test]
    fn test_resolve_strategies() {
        let single = RegisterLayout::new(2, 1).unwrap();
        let multi = RegisterLayout::new(2, 3).unwrap();

        let step = LadderStep::resolve(&PhaseSource::Angle(PI), &single).unwrap();
        assert_eq!(
            step,
            LadderStep::PhaseRotation {
                angle: PI,
                target: QubitId(2)
            }
        );

        let step = LadderStep::resolve(&PhaseSource::Angle(PI), &multi).unwrap();
        match step {
            LadderStep::Controlled(gate) => {
                assert_eq!(gate.name(), "c3t");
                assert_eq!(gate.num_ctrl_qubits(), 3);
            }
            other => panic!("expected controlled T, got {other:?}"),
        }

        let source = PhaseSource::Unitary(UnitaryMatrix::identity(8));
        match LadderStep::resolve(&source, &multi).unwrap() {
            LadderStep::Controlled(gate) => {
                assert_eq!(gate.num_qubits(), 4);
                assert_eq!(gate.num_ctrl_qubits(), 1);
            }
            other => panic!("expected controlled unitary, got {other:?}"),
        }
    }

    #[test]
    fn test_initialize_prefix() {
        let layout = RegisterLayout::new(2, 1).unwrap();
        let mut circuit = fresh(&layout);
        initialize(&mut circuit, &layout, &PhaseSource::Angle(0.3)).unwrap();

        let names: Vec<_> = circuit.instructions().iter().map(|i| i.name()).collect();
        assert_eq!(names, vec!["h", "h", "x", "cp", "cp", "cp"]);
        assert_eq!(circuit.instructions()[3].qubits, vec![QubitId(0), QubitId(2)]);
        assert_eq!(circuit.instructions()[5].qubits, vec![QubitId(1), QubitId(2)]);
    }

    #[test]
    fn test_initialize_rejects_wrong_matrix_width() {
        // 2x2 matrix but two ancillas: the controlled gate spans 2 qubits,
        // the ladder offers 3.
        let layout = RegisterLayout::new(1, 2).unwrap();
        let mut circuit = fresh(&layout);
        let source = PhaseSource::Unitary(UnitaryMatrix::identity(2));
        assert!(initialize(&mut circuit, &layout, &source).is_err());
    }
}
