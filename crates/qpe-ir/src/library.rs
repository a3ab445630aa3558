//! Pre-built circuits.

use std::f64::consts::PI;

use crate::circuit::Circuit;
use crate::error::IrResult;
use crate::gate::Gate;
use crate::qubit::QubitId;

/// Create a QFT circuit (without measurements).
///
/// Qubit 0 is the least significant bit. The trailing swaps restore the
/// input bit order.
pub fn qft(n: u32) -> IrResult<Circuit> {
    if n == 0 {
        return Ok(Circuit::new("qft_0"));
    }

    let mut circuit = Circuit::with_size("qft", n, 0);

    for j in (0..n).rev() {
        circuit.h(QubitId(j))?;
        for k in (0..j).rev() {
            let angle = PI / f64::from(j - k).exp2();
            circuit.cp(angle, QubitId(j), QubitId(k))?;
        }
    }

    for i in 0..n / 2 {
        circuit.swap(QubitId(i), QubitId(n - 1 - i))?;
    }

    Ok(circuit)
}

/// Create the inverse QFT circuit, named `iqft`.
pub fn inverse_qft(n: u32) -> IrResult<Circuit> {
    Ok(qft(n)?.inverse()?.with_name("iqft"))
}

/// The inverse QFT as a single composable block gate over `n` qubits.
pub fn inverse_qft_gate(n: u32) -> IrResult<Gate> {
    inverse_qft(n)?.to_gate()
}
