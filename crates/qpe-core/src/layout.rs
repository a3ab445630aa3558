//! Counting / ancilla register partition.

use qpe_ir::{ClbitId, QubitId};

use crate::error::{QpeError, QpeResult};

/// Largest supported counting register.
///
/// The ladder applies `2^cq - 1` controlled operations.
pub const MAX_COUNTING_QUBITS: u32 = 24;

/// Largest supported ancilla register.
///
/// Every ancilla is a circuit qubit and, in angle mode with several
/// ancillas, a control of each ladder gate.
pub const MAX_ANCILLARY_QUBITS: u32 = 32;

/// Qubit partition: counting qubits `[0, cq)`, ancillas `[cq, cq + aq)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterLayout {
    counting: u32,
    ancillary: u32,
}

impl RegisterLayout {
    /// Validate and create a layout.
    pub fn new(counting: u32, ancillary: u32) -> QpeResult<Self> {
        if counting == 0 {
            return Err(QpeError::illegal("counting_qubits must be at least 1"));
        }
        if ancillary == 0 {
            return Err(QpeError::illegal("ancillary_qubits must be at least 1"));
        }
        if counting > MAX_COUNTING_QUBITS {
            return Err(QpeError::illegal(format!(
                "counting_qubits must be at most {MAX_COUNTING_QUBITS}, got {counting}"
            )));
        }
        if ancillary > MAX_ANCILLARY_QUBITS {
            return Err(QpeError::illegal(format!(
                "ancillary_qubits must be at most {MAX_ANCILLARY_QUBITS}, got {ancillary}"
            )));
        }
        Ok(Self {
            counting,
            ancillary,
        })
    }

    /// Number of counting qubits.
    pub fn num_counting(&self) -> u32 {
        self.counting
    }

    /// Number of ancillary qubits.
    pub fn num_ancillary(&self) -> u32 {
        self.ancillary
    }

    /// Total qubit count.
    pub fn num_qubits(&self) -> u32 {
        self.counting + self.ancillary
    }

    /// Counting qubits in index order.
    pub fn counting_qubits(&self) -> impl Iterator<Item = QubitId> + use<> {
        (0..self.counting).map(QubitId)
    }

    /// Ancillary qubits in index order.
    pub fn ancilla_qubits(&self) -> impl Iterator<Item = QubitId> + use<> {
        (self.counting..self.num_qubits()).map(QubitId)
    }

    /// One classical bit per counting qubit.
    pub fn clbits(&self) -> impl Iterator<Item = ClbitId> + use<> {
        (0..self.counting).map(ClbitId)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partition() {
        let layout = RegisterLayout::new(3, 2).unwrap();
        assert_eq!(layout.num_qubits(), 5);
        assert_eq!(
            layout.counting_qubits().collect::<Vec<_>>(),
            vec![QubitId(0), QubitId(1), QubitId(2)]
        );
        assert_eq!(
            layout.ancilla_qubits().collect::<Vec<_>>(),
            vec![QubitId(3), QubitId(4)]
        );
        assert_eq!(layout.clbits().count(), 3);
    }

    #[test]
    fn test_rejects_empty_registers() {
        assert!(matches!(
            RegisterLayout::new(0, 1),
            Err(QpeError::IllegalArgument(_))
        ));
        assert!(matches!(
            RegisterLayout::new(1, 0),
            Err(QpeError::IllegalArgument(_))
        ));
    }

    #[test]
    fn test_rejects_oversized_counting_register() {
        assert!(RegisterLayout::new(MAX_COUNTING_QUBITS, 1).is_ok());
        assert!(RegisterLayout::new(MAX_COUNTING_QUBITS + 1, 1).is_err());
    }

    #[test]
    fn test_rejects_oversized_ancilla_register() {
        assert!(RegisterLayout::new(1, MAX_ANCILLARY_QUBITS).is_ok());
        assert!(matches!(
            RegisterLayout::new(1, MAX_ANCILLARY_QUBITS + 1),
            Err(QpeError::IllegalArgument(_))
        ));
        assert!(RegisterLayout::new(MAX_COUNTING_QUBITS, MAX_ANCILLARY_QUBITS).is_ok());
    }
}
