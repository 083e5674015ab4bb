//! Shared pipeline helpers for CLI commands.
//!
//! Project discovery, merging `tempo.toml` with command-line flags, reading
//! the three input files through a [`SourceMap`] and building the timing
//! graph. `analyze` and `check` differ only in what they do with the graph.

use std::path::{Path, PathBuf};

use tempo_config::{ProjectConfig, CONFIG_FILE_NAME};
use tempo_diagnostics::{
    Diagnostic, DiagnosticRenderer, DiagnosticSink, FileId, SourceMap, TerminalRenderer,
};
use tempo_formats::{parse_clock, parse_library, parse_netlist};
use tempo_timing::TimingGraph;

use crate::{GlobalArgs, InputArgs};

/// Walks up from `start` looking for the nearest directory containing `tempo.toml`.
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        if current.join(CONFIG_FILE_NAME).is_file() {
            return Some(current);
        }
        if !current.pop() {
            return None;
        }
    }
}

/// A project directory and its configuration, if one was found.
///
/// Without a `tempo.toml` every input must come from the command line and
/// relative paths resolve against the working directory.
pub struct Project {
    /// Directory that relative input paths resolve against.
    pub root: PathBuf,
    /// Parsed configuration.
    pub config: Option<ProjectConfig>,
}

impl Project {
    /// Design name from the configuration, or `design`.
    pub fn design_name(&self) -> &str {
        self.config
            .as_ref()
            .map_or("design", |c| c.design.name.as_str())
    }

    /// Merges input paths from the command line and configuration.
    ///
    /// Flags win over `[inputs]`. Flag paths are taken as given; configured
    /// paths resolve against the project root. The clock file may be left
    /// out when `period` is known.
    pub fn input_paths(
        &self,
        args: &InputArgs,
        period: Option<f64>,
    ) -> Result<InputPaths, Box<dyn std::error::Error>> {
        let inputs = self.config.as_ref().map(|c| &c.inputs);
        let pick = |flag: &Option<PathBuf>, configured: Option<&PathBuf>| {
            flag.clone().or_else(|| configured.map(|p| self.root.join(p)))
        };

        let clock = pick(&args.clock, inputs.and_then(|i| i.clock.as_ref()));
        let library = pick(&args.library, inputs.and_then(|i| i.library.as_ref()))
            .ok_or_else(|| missing_input("library"))?;
        let netlist = pick(&args.netlist, inputs.and_then(|i| i.netlist.as_ref()))
            .ok_or_else(|| missing_input("netlist"))?;
        if clock.is_none() && period.is_none() {
            return Err(format!(
                "no clock given (use --clock, --period, or set `clock` under [inputs] in {CONFIG_FILE_NAME})"
            )
            .into());
        }
        Ok(InputPaths {
            clock,
            library,
            netlist,
        })
    }

    /// Clock period override from `[analysis]`.
    pub fn clock_period(&self) -> Option<f64> {
        self.config.as_ref().and_then(|c| c.analysis.clock_period)
    }
}

fn missing_input(kind: &str) -> Box<dyn std::error::Error> {
    format!(
        "no {kind} file given (use --{kind} or set `{kind}` under [inputs] in {CONFIG_FILE_NAME})"
    )
    .into()
}

/// Loads the project from `--config` or by walking up from the working directory.
///
/// `--config` may name the file or its directory. A missing `tempo.toml`
/// is not an error unless `--config` asked for one.
pub fn load_project(global: &GlobalArgs) -> Result<Project, Box<dyn std::error::Error>> {
    if let Some(ref config_path) = global.config {
        let p = PathBuf::from(config_path);
        let (root, file) = if p.is_dir() {
            let file = p.join(CONFIG_FILE_NAME);
            (p, file)
        } else {
            let root = p
                .parent()
                .map(|d| d.to_path_buf())
                .unwrap_or_else(|| PathBuf::from("."));
            (root, p)
        };
        let config = tempo_config::load_config_from_path(&file)?;
        log::debug!("loaded configuration from {}", file.display());
        return Ok(Project {
            root,
            config: Some(config),
        });
    }

    let cwd = std::env::current_dir()?;
    match find_project_root(&cwd) {
        Some(root) => {
            let config = tempo_config::load_config(&root)?;
            log::debug!("found project root {}", root.display());
            Ok(Project {
                root,
                config: Some(config),
            })
        }
        None => Ok(Project {
            root: cwd,
            config: None,
        }),
    }
}

/// Resolved locations of the analyzer inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct InputPaths {
    /// Clock definition file; `None` when the period is given directly.
    pub clock: Option<PathBuf>,
    /// Cell library file.
    pub library: PathBuf,
    /// Netlist file.
    pub netlist: PathBuf,
}

/// Everything read from the inputs.
pub struct LoadedDesign {
    /// Input file contents, for rendering diagnostics.
    pub sources: SourceMap,
    /// Diagnostics from reading and building.
    pub sink: DiagnosticSink,
    /// The timing graph, or `None` if any input had errors.
    pub graph: Option<TimingGraph>,
}

/// Reads the inputs and builds the timing graph.
///
/// Malformed input and graph construction failures are reported to the
/// returned sink and leave `graph` empty. Only unreadable files are errors.
/// `period`, when set, replaces the clock file's period.
pub fn load_design(
    paths: &InputPaths,
    period: Option<f64>,
) -> Result<LoadedDesign, Box<dyn std::error::Error>> {
    let mut sources = SourceMap::new();
    let sink = DiagnosticSink::new();

    let clock_period = match &paths.clock {
        Some(path) => {
            let file = load(&mut sources, path)?;
            let text = source_text(&sources, file);
            parse_clock(text, file, &sink)
        }
        None => None,
    };
    let library_file = load(&mut sources, &paths.library)?;
    let cells = parse_library(source_text(&sources, library_file), library_file, &sink);
    let netlist_file = load(&mut sources, &paths.netlist)?;
    let netlist = parse_netlist(source_text(&sources, netlist_file), netlist_file, &sink);

    let period = period.or(clock_period);
    let graph = match period {
        Some(period) if !sink.has_errors() => {
            match TimingGraph::build(
                period,
                cells,
                netlist.vertices.clone(),
                netlist.edges.clone(),
            ) {
                Ok(graph) => Some(graph),
                Err(e) => {
                    let mut diag = e.to_diagnostic();
                    diag.span = netlist.span_for(&e);
                    sink.emit(diag);
                    None
                }
            }
        }
        _ => None,
    };

    Ok(LoadedDesign {
        sources,
        sink,
        graph,
    })
}

fn load(sources: &mut SourceMap, path: &Path) -> Result<FileId, Box<dyn std::error::Error>> {
    sources
        .load_file(path)
        .map_err(|e| format!("failed to read {}: {e}", path.display()).into())
}

fn source_text(sources: &SourceMap, file: FileId) -> &str {
    sources.get(file).map_or("", |f| f.content.as_str())
}

/// Prints diagnostics to stderr; `--quiet` keeps only errors.
pub fn render_diagnostics(diagnostics: &[Diagnostic], sources: &SourceMap, global: &GlobalArgs) {
    let renderer = TerminalRenderer::new(global.color);
    for diag in diagnostics {
        if global.quiet && !diag.severity.is_error() {
            continue;
        }
        eprintln!("{}", renderer.render(diag, sources));
    }
}
