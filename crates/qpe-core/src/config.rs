//! Estimation settings.
//!
//! Settings come from, highest precedence first:
//! 1. Environment variables (`QPE_` prefix)
//! 2. A YAML configuration file
//! 3. Default values

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{QpeError, QpeResult};
use crate::layout::RegisterLayout;

/// Environment variable overriding [`EstimationConfig::counting_qubits`].
pub const ENV_COUNTING_QUBITS: &str = "QPE_COUNTING_QUBITS";
/// Environment variable overriding [`EstimationConfig::ancillary_qubits`].
pub const ENV_ANCILLARY_QUBITS: &str = "QPE_ANCILLARY_QUBITS";
/// Environment variable overriding [`EstimationConfig::fourier_mode`].
pub const ENV_FOURIER_MODE: &str = "QPE_FOURIER_MODE";

/// How the inverse Fourier stage is attached to the circuit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FourierMode {
    /// One `iqft` block instruction over the counting register.
    #[default]
    Block,
    /// The block's gates composed directly into the circuit.
    Inline,
}

impl fmt::Display for FourierMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FourierMode::Block => write!(f, "block"),
            FourierMode::Inline => write!(f, "inline"),
        }
    }
}

impl FromStr for FourierMode {
    type Err = QpeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "block" => Ok(FourierMode::Block),
            "inline" => Ok(FourierMode::Inline),
            other => Err(QpeError::Config(format!(
                "unknown fourier mode '{other}' (expected 'block' or 'inline')"
            ))),
        }
    }
}

/// Register sizes and construction options for one circuit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimationConfig {
    /// Size of the counting register; sets the precision.
    #[serde(default = "default_counting_qubits")]
    pub counting_qubits: u32,

    /// Size of the register the operator acts on.
    #[serde(default = "default_ancillary_qubits")]
    pub ancillary_qubits: u32,

    /// Inverse Fourier attachment.
    #[serde(default)]
    pub fourier_mode: FourierMode,

    /// Name given to the built circuit.
    #[serde(default = "default_circuit_name")]
    pub circuit_name: String,
}

fn default_counting_qubits() -> u32 {
    3
}

fn default_ancillary_qubits() -> u32 {
    1
}

fn default_circuit_name() -> String {
    "qpe".to_string()
}

impl Default for EstimationConfig {
    fn default() -> Self {
        Self {
            counting_qubits: default_counting_qubits(),
            ancillary_qubits: default_ancillary_qubits(),
            fourier_mode: FourierMode::default(),
            circuit_name: default_circuit_name(),
        }
    }
}

impl EstimationConfig {
    /// Config with the given register sizes and default options.
    pub fn new(counting_qubits: u32, ancillary_qubits: u32) -> Self {
        Self {
            counting_qubits,
            ancillary_qubits,
            ..Self::default()
        }
    }

    /// Set the inverse Fourier attachment.
    #[must_use]
    pub fn with_fourier_mode(mut self, mode: FourierMode) -> Self {
        self.fourier_mode = mode;
        self
    }

    /// Set the circuit name.
    #[must_use]
    pub fn with_circuit_name(mut self, name: impl Into<String>) -> Self {
        self.circuit_name = name.into();
        self
    }

    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> QpeResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| QpeError::Config(format!("{}: {e}", path.display())))?;
        Self::from_yaml(&contents)
    }

    /// Parse configuration from YAML text.
    ///
    /// Register sizes are not checked here; later overrides may replace them.
    pub fn from_yaml(contents: &str) -> QpeResult<Self> {
        serde_yaml_ng::from_str(contents).map_err(|e| QpeError::Config(e.to_string()))
    }

    /// Load the file (if any), then apply environment overrides.
    ///
    /// Call [`EstimationConfig::validate`] once every override is applied.
    pub fn load(config_file: Option<&str>) -> QpeResult<Self> {
        let config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.merge_env(|key| std::env::var(key).ok())
    }

    /// Override fields from variables that `lookup` finds.
    ///
    /// Absent variables leave fields unchanged; present but unparsable ones
    /// are a [`QpeError::Config`].
    pub fn merge_env<F>(mut self, lookup: F) -> QpeResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup(ENV_COUNTING_QUBITS) {
            self.counting_qubits = parse_var(ENV_COUNTING_QUBITS, &v)?;
        }
        if let Some(v) = lookup(ENV_ANCILLARY_QUBITS) {
            self.ancillary_qubits = parse_var(ENV_ANCILLARY_QUBITS, &v)?;
        }
        if let Some(v) = lookup(ENV_FOURIER_MODE) {
            self.fourier_mode = v.parse()?;
        }
        Ok(self)
    }

    /// Check the register sizes.
    pub fn validate(&self) -> QpeResult<()> {
        self.layout().map(|_| ())
    }

    /// The validated register partition.
    pub fn layout(&self) -> QpeResult<RegisterLayout> {
        RegisterLayout::new(self.counting_qubits, self.ancillary_qubits)
    }
}

fn parse_var(key: &str, value: &str) -> QpeResult<u32> {
    value
        .trim()
        .parse()
        .map_err(|e| QpeError::Config(format!("{key}={value}: {e}")))
}
