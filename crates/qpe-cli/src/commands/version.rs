//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - Quantum Phase Estimation circuit builder",
        style("qpe").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  qpe-ir    Circuit intermediate representation and QFT library");
    println!("  qpe-core  Phase-estimation construction");
    println!("  qpe-cli   Command-line interface");
    println!();
    println!(
        "Max counting qubits:  {}",
        style(qpe_core::MAX_COUNTING_QUBITS).yellow()
    );
    println!(
        "Max ancillary qubits: {}",
        style(qpe_core::MAX_ANCILLARY_QUBITS).yellow()
    );
    println!("License:              {}", style(env!("CARGO_PKG_LICENSE")).dim());
}
