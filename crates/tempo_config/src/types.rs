//! Configuration types deserialized from `tempo.toml`.

use serde::Deserialize;
use std::path::PathBuf;

/// The top-level project configuration parsed from `tempo.toml`.
#[derive(Debug, Deserialize)]
pub struct ProjectConfig {
    /// Design metadata.
    pub design: DesignMeta,
    /// Input file locations, relative to the project root.
    #[serde(default)]
    pub inputs: InputFiles,
    /// Analysis settings.
    #[serde(default)]
    pub analysis: AnalysisConfig,
    /// Report settings.
    #[serde(default)]
    pub report: ReportConfig,
}

/// Design metadata required in every `tempo.toml`.
#[derive(Debug, Deserialize)]
pub struct DesignMeta {
    /// The design name, used in report headers.
    pub name: String,
    /// A brief description of the design.
    #[serde(default)]
    pub description: String,
}

/// Paths to the three analyzer inputs.
///
/// Any of them may be left out and supplied on the command line instead.
#[derive(Debug, Default, Deserialize)]
pub struct InputFiles {
    /// Clock definition file.
    #[serde(default)]
    pub clock: Option<PathBuf>,
    /// Cell library file.
    #[serde(default)]
    pub library: Option<PathBuf>,
    /// Netlist file.
    #[serde(default)]
    pub netlist: Option<PathBuf>,
}

/// Analysis knobs.
#[derive(Debug, Deserialize)]
pub struct AnalysisConfig {
    /// Overrides the period read from the clock file.
    #[serde(default)]
    pub clock_period: Option<f64>,
    /// Maximum number of critical paths to report.
    #[serde(default = "default_max_paths")]
    pub max_paths: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            clock_period: None,
            max_paths: default_max_paths(),
        }
    }
}

fn default_max_paths() -> usize {
    10
}

/// Report settings.
#[derive(Debug, Default, Deserialize)]
pub struct ReportConfig {
    /// Output format.
    #[serde(default)]
    pub format: ReportFormat,
    /// Include the per-vertex timing table in text reports.
    #[serde(default)]
    pub show_vertices: bool,
}

/// Output format for timing reports.
#[derive(Debug, Default, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Human-readable text (default).
    #[default]
    Text,
    /// Serialized JSON.
    Json,
}
