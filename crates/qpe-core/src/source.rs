//! Where the phase to estimate comes from.

use ndarray::Array2;
use num_complex::Complex64;
use qpe_ir::Gate;

use crate::error::{QpeError, QpeResult};

/// Label attached to the gate built from a [`UnitaryMatrix`].
pub const UNITARY_LABEL: &str = "U";

/// A square complex matrix whose eigenphase is estimated.
///
/// Only the shape is checked; unitarity is the caller's responsibility.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitaryMatrix(Array2<Complex64>);

impl UnitaryMatrix {
    /// Wrap a square matrix.
    pub fn new(matrix: Array2<Complex64>) -> QpeResult<Self> {
        let (rows, cols) = matrix.dim();
        if rows != cols || rows == 0 {
            return Err(QpeError::illegal(format!(
                "unitary matrix must be square and non-empty, got {rows}x{cols}"
            )));
        }
        Ok(Self(matrix))
    }

    /// Build from row vectors.
    pub fn from_rows(rows: Vec<Vec<Complex64>>) -> QpeResult<Self> {
        let n = rows.len();
        if rows.iter().any(|r| r.len() != n) {
            return Err(QpeError::illegal(format!(
                "unitary matrix rows must all have length {n}"
            )));
        }
        let flat: Vec<Complex64> = rows.into_iter().flatten().collect();
        let matrix = Array2::from_shape_vec((n, n), flat)
            .map_err(|e| QpeError::illegal(format!("malformed unitary matrix: {e}")))?;
        Self::new(matrix)
    }

    /// The `dim × dim` identity.
    pub fn identity(dim: usize) -> Self {
        Self(Array2::eye(dim))
    }

    /// A diagonal matrix `diag(e^{iφ_0}, e^{iφ_1}, ...)`.
    pub fn diagonal_phases(phases: &[f64]) -> QpeResult<Self> {
        let mut matrix = Array2::zeros((phases.len(), phases.len()));
        for (i, &phi) in phases.iter().enumerate() {
            matrix[[i, i]] = Complex64::from_polar(1.0, phi);
        }
        Self::new(matrix)
    }

    /// Matrix dimension.
    pub fn dim(&self) -> usize {
        self.0.nrows()
    }

    /// Borrow the underlying matrix.
    pub fn as_array(&self) -> &Array2<Complex64> {
        &self.0
    }

    /// Convert into an (uncontrolled) gate labelled `U`.
    pub fn to_gate(&self) -> QpeResult<Gate> {
        let entries = self.0.iter().copied().collect();
        Ok(Gate::unitary(entries, self.dim())?.with_label(UNITARY_LABEL))
    }
}

impl From<UnitaryMatrix> for Array2<Complex64> {
    fn from(matrix: UnitaryMatrix) -> Self {
        matrix.0
    }
}

/// The phase to estimate: an operator or a known angle, never both.
#[derive(Debug, Clone, PartialEq)]
pub enum PhaseSource {
    /// Estimate the eigenphase of this operator on the ancilla register.
    Unitary(UnitaryMatrix),
    /// Recover this angle (radians).
    Angle(f64),
}

impl PhaseSource {
    /// Select a source from two optional inputs.
    ///
    /// Exactly one of `unitary` and `angle` must be present; anything else is
    /// an [`QpeError::IllegalArgument`].
    pub fn from_options(unitary: Option<UnitaryMatrix>, angle: Option<f64>) -> QpeResult<Self> {
        match (unitary, angle) {
            (Some(matrix), None) => Ok(PhaseSource::Unitary(matrix)),
            (None, Some(theta)) => Ok(PhaseSource::Angle(theta)),
            _ => Err(QpeError::illegal(
                "exactly one of phase or a unitary matrix must be provided",
            )),
        }
    }

    /// Short name for logs.
    pub fn mode(&self) -> &'static str {
        match self {
            PhaseSource::Unitary(_) => "unitary",
            PhaseSource::Angle(_) => "angle",
        }
    }
}

impl From<UnitaryMatrix> for PhaseSource {
    fn from(matrix: UnitaryMatrix) -> Self {
        PhaseSource::Unitary(matrix)
    }
}

impl From<f64> for PhaseSource {
    fn from(angle: f64) -> Self {
        PhaseSource::Angle(angle)
    }
}
