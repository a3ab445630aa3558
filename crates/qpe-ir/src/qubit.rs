//! Qubit and classical bit types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a qubit within a circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct QubitId(pub u32);

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl From<u32> for QubitId {
    fn from(id: u32) -> Self {
        QubitId(id)
    }
}

/// Unique identifier for a classical bit within a circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ClbitId(pub u32);

impl fmt::Display for ClbitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

impl From<u32> for ClbitId {
    fn from(id: u32) -> Self {
        ClbitId(id)
    }
}

/// A wire in a circuit, optionally belonging to a named register.
///
/// Used for both quantum and classical wires; the id type tells them apart.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Wire<Id> {
    /// The unique identifier.
    pub id: Id,
    /// The name of the register this wire belongs to, if any.
    pub register: Option<String>,
    /// The index within the register, if any.
    pub index: Option<u32>,
}

/// A quantum bit with optional register membership.
pub type Qubit = Wire<QubitId>;

/// A classical bit with optional register membership.
pub type Clbit = Wire<ClbitId>;

impl<Id> Wire<Id> {
    /// Create a wire with just an id.
    pub fn new(id: Id) -> Self {
        Self {
            id,
            register: None,
            index: None,
        }
    }

    /// Create a wire that is the `index`-th member of `register`.
    pub fn with_register(id: Id, register: impl Into<String>, index: u32) -> Self {
        Self {
            id,
            register: Some(register.into()),
            index: Some(index),
        }
    }
}

impl<Id: fmt::Display> fmt::Display for Wire<Id> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.register, self.index) {
            (Some(reg), Some(idx)) => write!(f, "{reg}[{idx}]"),
            _ => write!(f, "{}", self.id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qubit_display() {
        let q = Qubit::new(QubitId(0));
        assert_eq!(format!("{q}"), "q0");

        let q_reg = Qubit::with_register(QubitId(3), "counting", 1);
        assert_eq!(format!("{q_reg}"), "counting[1]");
    }

    #[test]
    fn test_clbit_display() {
        let c = Clbit::new(ClbitId(2));
        assert_eq!(format!("{c}"), "c2");

        let c_reg = Clbit::with_register(ClbitId(1), "meas", 0);
        assert_eq!(format!("{c_reg}"), "meas[0]");
    }
}
