//! Tempo CLI: static timing analysis from the command line.
//!
//! Provides `tempo analyze` to compute arrival, required and slack times and
//! report timing violations, and `tempo check` to validate the inputs without
//! running the analysis.

#![warn(missing_docs)]

mod analyze;
mod check;
mod pipeline;
mod report;

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Tempo, a static timing analyzer for combinational netlists.
#[derive(Parser, Debug)]
#[command(name = "tempo", version, about = "Tempo Static Timing Analyzer")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose (debug-level) output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Control colored output.
    #[arg(long, global = true, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Path to a custom `tempo.toml` configuration file.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run timing analysis and print a report.
    Analyze(AnalyzeArgs),
    /// Read the inputs and build the timing graph without analyzing it.
    Check(InputArgs),
}

/// Input file locations; each overrides `[inputs]` in `tempo.toml`.
#[derive(Args, Debug, Default)]
pub struct InputArgs {
    /// Clock definition file.
    #[arg(long)]
    pub clock: Option<PathBuf>,

    /// Cell library file.
    #[arg(long)]
    pub library: Option<PathBuf>,

    /// Netlist file.
    #[arg(long)]
    pub netlist: Option<PathBuf>,

    /// Clock period, overriding the clock file.
    #[arg(long)]
    pub period: Option<f64>,
}

/// Arguments for the `tempo analyze` subcommand.
#[derive(Parser, Debug)]
pub struct AnalyzeArgs {
    /// Input files.
    #[command(flatten)]
    pub inputs: InputArgs,

    /// Output format for the report.
    #[arg(short, long, value_enum)]
    pub format: Option<ReportFormat>,

    /// Maximum number of critical paths to report.
    #[arg(long)]
    pub max_paths: Option<usize>,

    /// Include the per-vertex timing table.
    #[arg(long)]
    pub all: bool,
}

/// Controls whether colored output is produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Detect from terminal capabilities.
    Auto,
    /// Always produce colored output.
    Always,
    /// Never produce colored output.
    Never,
}

/// Timing report format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable terminal output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

impl From<tempo_config::ReportFormat> for ReportFormat {
    fn from(format: tempo_config::ReportFormat) -> Self {
        match format {
            tempo_config::ReportFormat::Text => ReportFormat::Text,
            tempo_config::ReportFormat::Json => ReportFormat::Json,
        }
    }
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Whether to print verbose/debug information.
    pub verbose: bool,
    /// Whether to use colored output.
    pub color: bool,
    /// Optional path to a custom config file.
    pub config: Option<String>,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.quiet, cli.verbose);

    let color = match cli.color {
        ColorChoice::Auto => atty_is_terminal(),
        ColorChoice::Always => true,
        ColorChoice::Never => false,
    };

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        color,
        config: cli.config,
    };

    let result = match cli.command {
        Command::Analyze(ref args) => analyze::run(args, &global),
        Command::Check(ref args) => check::run(args, &global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

/// Installs the `env_logger` backend; `RUST_LOG` takes precedence over the flags.
fn init_logging(quiet: bool, verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else if quiet {
        log::LevelFilter::Error
    } else {
        log::LevelFilter::Warn
    };
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .try_init();
}

/// Rough terminal detection from the `TERM` variable.
fn atty_is_terminal() -> bool {
    std::env::var("TERM").is_ok_and(|term| term != "dumb")
}
