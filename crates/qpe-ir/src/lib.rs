//! QPE Circuit Intermediate Representation
//!
//! This crate provides the circuit data structures the phase-estimation
//! builder targets: wires, gates, instructions and an append-only
//! [`Circuit`].
//!
//! # Core Components
//!
//! - **Qubits and Classical Bits**: [`QubitId`], [`ClbitId`] for addressing quantum
//!   and classical registers
//! - **Gates**: [`StandardGate`] for built-in gates, [`UnitaryGate`] for explicit
//!   matrices, [`ControlledGate`] for multi-controlled operations and
//!   [`BlockGate`] for sub-circuits used as one gate
//! - **Instructions**: [`Instruction`] combining gates with their operands
//! - **Circuit**: [`Circuit`] high-level builder API
//! - **Library**: [`library::qft`] and [`library::inverse_qft`]
//!
//! # Example: Controlled T on a three-qubit register
//!
//! ```rust
//! use qpe_ir::{Circuit, Gate, QubitId, StandardGate};
//!
//! let mut circuit = Circuit::with_size("ct", 3, 0);
//! let ct = Gate::standard(StandardGate::T).control(2).unwrap();
//!
//! // Controls first, then the target.
//! circuit.append(ct, [QubitId(0), QubitId(1), QubitId(2)]).unwrap();
//!
//! assert_eq!(circuit.instructions()[0].control_qubits().len(), 2);
//! ```
//!
//! # Example: Composing the inverse QFT on a subset
//!
//! ```rust
//! use qpe_ir::{library, Circuit, QubitId};
//!
//! let mut circuit = Circuit::with_size("host", 4, 0);
//! let iqft = library::inverse_qft(3).unwrap();
//! circuit
//!     .compose(&iqft, &[QubitId(0), QubitId(1), QubitId(2)])
//!     .unwrap();
//!
//! assert_eq!(circuit.len(), iqft.len());
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Description |
//! |------|--------|-------------|
//! | `H` | 1 | Hadamard gate |
//! | `X`, `Y`, `Z` | 1 | Pauli gates |
//! | `S`, `Sdg` | 1 | S and S-dagger gates |
//! | `T`, `Tdg` | 1 | T and T-dagger gates |
//! | `P` | 1 | Phase gate |
//! | `CX`, `CZ` | 2 | Controlled-X and Controlled-Z |
//! | `CP` | 2 | Controlled phase |
//! | `Swap` | 2 | SWAP gate |

pub mod circuit;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod library;
pub mod qubit;

pub use circuit::Circuit;
pub use error::{IrError, IrResult};
pub use gate::{BlockGate, ControlledGate, Gate, GateKind, StandardGate, UnitaryGate};
pub use instruction::{Instruction, InstructionKind};
pub use qubit::{Clbit, ClbitId, Qubit, QubitId, Wire};
