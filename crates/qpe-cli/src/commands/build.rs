//! Build command implementation.

use anyhow::Result;
use clap::{Args, ValueEnum};
use console::style;
use tracing::info;

use qpe_core::{EstimationConfig, FourierMode, PhaseEstimation, PhaseSource};
use qpe_ir::Circuit;

use super::common::{load_unitary, write_output};

/// How the built circuit is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Sizes, depth and per-gate counts.
    Summary,
    /// The full circuit as JSON.
    Json,
}

/// Arguments of `qpe build`.
#[derive(Debug, Args)]
pub struct BuildArgs {
    /// Number of counting qubits (precision)
    #[arg(short, long, env = "QPE_COUNTING_QUBITS")]
    pub counting: Option<u32>,

    /// Number of ancillary qubits the operator acts on
    #[arg(short, long, env = "QPE_ANCILLARY_QUBITS")]
    pub ancillary: Option<u32>,

    /// Phase angle in radians
    #[arg(long, allow_hyphen_values = true)]
    pub angle: Option<f64>,

    /// JSON file with the unitary matrix as rows of [re, im] pairs
    #[arg(short, long)]
    pub unitary: Option<String>,

    /// Compose the inverse QFT gate by gate instead of as one block
    #[arg(long)]
    pub inline_fourier: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Summary)]
    pub format: OutputFormat,

    /// Output file (stdout if omitted)
    #[arg(short, long)]
    pub output: Option<String>,

    /// YAML configuration file
    #[arg(long)]
    pub config: Option<String>,

    /// Circuit name
    #[arg(long)]
    pub name: Option<String>,
}

/// Execute the build command.
pub fn execute(args: &BuildArgs) -> Result<()> {
    let config = resolve_config(args)?;
    let unitary = args.unitary.as_deref().map(load_unitary).transpose()?;
    let source = PhaseSource::from_options(unitary, args.angle)?;

    info!(
        counting_qubits = config.counting_qubits,
        ancillary_qubits = config.ancillary_qubits,
        mode = source.mode(),
        "building circuit"
    );
    let circuit = PhaseEstimation::new(config.clone(), source).build()?;

    let rendered = match args.format {
        OutputFormat::Summary => render_summary(&circuit, &config),
        OutputFormat::Json => circuit.to_json()?,
    };
    write_output(&rendered, args.output.as_deref())?;

    if let Some(path) = &args.output {
        println!(
            "{} Wrote {} ({} qubits, {} instructions)",
            style("✓").green().bold(),
            style(path).green(),
            circuit.num_qubits(),
            circuit.len()
        );
    }
    Ok(())
}

/// Settings from the config file and environment, overridden by flags.
///
/// Register sizes are validated once, after every override.
pub fn resolve_config(args: &BuildArgs) -> Result<EstimationConfig> {
    let mut config = EstimationConfig::load(args.config.as_deref())?;
    if let Some(n) = args.counting {
        config.counting_qubits = n;
    }
    if let Some(n) = args.ancillary {
        config.ancillary_qubits = n;
    }
    if args.inline_fourier {
        config.fourier_mode = FourierMode::Inline;
    }
    if let Some(name) = &args.name {
        config.circuit_name.clone_from(name);
    }
    config.validate()?;
    Ok(config)
}

/// Plain-text description of a built circuit.
pub fn render_summary(circuit: &Circuit, config: &EstimationConfig) -> String {
    let mut lines = vec![
        format!("circuit:      {}", circuit.name()),
        format!(
            "qubits:       {} ({} counting, {} ancillary)",
            circuit.num_qubits(),
            config.counting_qubits,
            config.ancillary_qubits
        ),
        format!("clbits:       {}", circuit.num_clbits()),
        format!("fourier:      {}", config.fourier_mode),
        format!("depth:        {}", circuit.depth()),
        format!("instructions: {}", circuit.len()),
    ];
    lines.extend(
        circuit
            .count_ops()
            .into_iter()
            .map(|(name, count)| format!("  {name:<12}{count}")),
    );
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn args(config: Option<String>) -> BuildArgs {
        BuildArgs {
            counting: None,
            ancillary: None,
            angle: Some(0.5),
            unitary: None,
            inline_fourier: false,
            format: OutputFormat::Summary,
            output: None,
            config,
            name: None,
        }
    }

    #[test]
    fn test_flags_replace_out_of_range_file_value() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("qpe.yaml");
        fs::write(&path, "counting_qubits: 30\n").unwrap();

        let mut build_args = args(Some(path.to_string_lossy().into_owned()));
        assert!(resolve_config(&build_args).is_err());

        build_args.counting = Some(3);
        let config = resolve_config(&build_args).unwrap();
        assert_eq!(config.counting_qubits, 3);
        assert!(PhaseEstimation::new(config, 0.5).build().is_ok());
    }

    #[test]
    fn test_render_summary() {
        let config = EstimationConfig::new(2, 1).with_circuit_name("demo");
        let circuit = PhaseEstimation::new(config.clone(), 0.5).build().unwrap();
        let summary = render_summary(&circuit, &config);
        let lines: Vec<&str> = summary.lines().collect();

        assert_eq!(lines[0], "circuit:      demo");
        assert_eq!(lines[1], "qubits:       3 (2 counting, 1 ancillary)");
        assert_eq!(lines[3], "fourier:      block");
        assert!(lines.contains(&"  cp          3"));
        assert!(lines.contains(&"  measure     2"));
        assert!(!summary.ends_with('\n'));
    }
}
