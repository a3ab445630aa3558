//! Phase-estimation circuit construction.

use qpe_ir::library::{inverse_qft, inverse_qft_gate};
use qpe_ir::Circuit;
use tracing::debug;

use crate::config::{EstimationConfig, FourierMode};
use crate::error::{QpeError, QpeResult};
use crate::initializer::initialize;
use crate::layout::RegisterLayout;
use crate::source::{PhaseSource, UnitaryMatrix};

/// Builds a QPE circuit for one phase source.
///
/// ```
/// use qpe_core::{EstimationConfig, PhaseEstimation, PhaseSource};
/// use std::f64::consts::FRAC_PI_2;
///
/// let circuit = PhaseEstimation::new(EstimationConfig::new(3, 1), PhaseSource::Angle(FRAC_PI_2))
///     .build()
///     .unwrap();
/// assert_eq!(circuit.num_qubits(), 4);
/// assert_eq!(circuit.count_ops()["cp"], 7);
/// ```
#[derive(Debug, Clone)]
pub struct PhaseEstimation {
    config: EstimationConfig,
    source: PhaseSource,
}

impl PhaseEstimation {
    /// Create a builder from settings and a phase source.
    pub fn new(config: EstimationConfig, source: impl Into<PhaseSource>) -> Self {
        Self {
            config,
            source: source.into(),
        }
    }

    /// The settings in use.
    pub fn config(&self) -> &EstimationConfig {
        &self.config
    }

    /// The phase source in use.
    pub fn source(&self) -> &PhaseSource {
        &self.source
    }

    /// Validate the inputs and build the circuit.
    ///
    /// Layout:
    /// 1. `H` on the counting register, `X` on the ancillas, then the
    ///    controlled-phase ladder (see [`crate::initializer`]).
    /// 2. A barrier over every qubit.
    /// 3. The inverse QFT on the counting register.
    /// 4. Counting qubit `i` measured into classical bit `i`.
    pub fn build(&self) -> QpeResult<Circuit> {
        let layout = self.validate()?;
        let cq = layout.num_counting();

        let mut circuit = Circuit::new(self.config.circuit_name.clone());
        let counting = circuit.add_qreg("counting", cq);
        circuit.add_qreg("ancilla", layout.num_ancillary());
        let clbits = circuit.add_creg("c", cq);

        debug!(
            counting_qubits = cq,
            ancillary_qubits = layout.num_ancillary(),
            mode = self.source.mode(),
            fourier = %self.config.fourier_mode,
            "building phase-estimation circuit"
        );

        initialize(&mut circuit, &layout, &self.source)?;
        circuit.barrier_all()?;

        match self.config.fourier_mode {
            FourierMode::Block => {
                circuit.append(inverse_qft_gate(cq)?, counting.iter().copied())?;
            }
            FourierMode::Inline => {
                circuit.compose(&inverse_qft(cq)?, &counting)?;
            }
        }

        for (&qubit, &clbit) in counting.iter().zip(&clbits) {
            circuit.measure(qubit, clbit)?;
        }

        debug!(
            instructions = circuit.len(),
            depth = circuit.depth(),
            "phase-estimation circuit ready"
        );
        Ok(circuit)
    }

    /// Check sizes and the phase source against each other.
    fn validate(&self) -> QpeResult<RegisterLayout> {
        let layout = self.config.layout()?;
        match &self.source {
            PhaseSource::Unitary(matrix) => {
                let expected = 1usize
                    .checked_shl(layout.num_ancillary())
                    .ok_or_else(|| {
                        QpeError::illegal(format!(
                            "ancillary_qubits = {} is too large for a unitary matrix",
                            layout.num_ancillary()
                        ))
                    })?;
                if matrix.dim() != expected {
                    return Err(QpeError::illegal(format!(
                        "unitary matrix is {0}x{0} but {1} ancillary qubits need {2}x{2}",
                        matrix.dim(),
                        layout.num_ancillary(),
                        expected
                    )));
                }
            }
            PhaseSource::Angle(angle) => {
                if !angle.is_finite() {
                    return Err(QpeError::illegal(format!(
                        "phase angle must be finite, got {angle}"
                    )));
                }
            }
        }
        Ok(layout)
    }
}

/// Build a QPE circuit from two optional phase sources.
///
/// Exactly one of `unitary_matrix` and `phase_angle` must be given; both or
/// neither is an [`QpeError::IllegalArgument`] and nothing is allocated.
pub fn build(
    counting_qubits: u32,
    ancillary_qubits: u32,
    unitary_matrix: Option<UnitaryMatrix>,
    phase_angle: Option<f64>,
) -> QpeResult<Circuit> {
    let source = PhaseSource::from_options(unitary_matrix, phase_angle)?;
    PhaseEstimation::new(
        EstimationConfig::new(counting_qubits, ancillary_qubits),
        source,
    )
    .build()
}
