//! Error types for the phase-estimation crate.

use thiserror::Error;

/// Errors produced while building a phase-estimation circuit.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QpeError {
    /// Caller supplied an invalid combination or value of arguments.
    ///
    /// Raised before any register is allocated; no circuit is produced.
    #[error("Illegal argument: {0}")]
    IllegalArgument(String),

    /// Circuit builder returned an error.
    #[error("Circuit IR error: {0}")]
    Ir(#[from] qpe_ir::IrError),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl QpeError {
    pub(crate) fn illegal(message: impl Into<String>) -> Self {
        QpeError::IllegalArgument(message.into())
    }
}

/// Result type for phase-estimation operations.
pub type QpeResult<T> = Result<T, QpeError>;
