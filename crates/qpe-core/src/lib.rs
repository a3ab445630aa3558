//! `qpe-core`: Quantum Phase Estimation circuit construction.
//!
//! Builds a `qpe_ir::Circuit` whose measured counting register, read as a
//! binary fraction, estimates the eigenphase of an operator:
//!
//! - a **counting register** of `cq` qubits put into uniform superposition;
//! - an **ancilla register** of `aq` qubits prepared with `X`;
//! - a ladder of `2^cq − 1` controlled phase operations, counting qubit `k`
//!   controlling `2^k` of them;
//! - a barrier, the inverse QFT on the counting register, and one measurement
//!   per counting qubit.
//!
//! The phase comes either from an explicit [`UnitaryMatrix`] acting on the
//! ancillas or from a known angle.
//!
//! # Quick start
//!
//! ```rust
//! use qpe_core::{build, UnitaryMatrix};
//! use std::f64::consts::FRAC_PI_2;
//!
//! // Recover a known angle.
//! let circuit = build(3, 1, None, Some(FRAC_PI_2)).unwrap();
//! assert_eq!(circuit.num_qubits(), 4);
//! assert_eq!(circuit.num_clbits(), 3);
//!
//! // Estimate the eigenphase of a two-qubit operator.
//! let circuit = build(2, 2, Some(UnitaryMatrix::identity(4)), None).unwrap();
//! assert_eq!(circuit.count_ops()["cunitary"], 3);
//!
//! // Both sources at once is rejected.
//! assert!(build(2, 1, Some(UnitaryMatrix::identity(2)), Some(0.5)).is_err());
//! ```

pub mod config;
pub mod error;
pub mod estimation;
pub mod initializer;
pub mod layout;
pub mod source;

pub use config::{EstimationConfig, FourierMode};
pub use error::{QpeError, QpeResult};
pub use estimation::{PhaseEstimation, build};
pub use initializer::{LadderStep, initialize, ladder_schedule, repetitions};
pub use layout::{MAX_ANCILLARY_QUBITS, MAX_COUNTING_QUBITS, RegisterLayout};
pub use source::{PhaseSource, UnitaryMatrix};
