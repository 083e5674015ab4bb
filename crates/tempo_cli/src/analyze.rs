//! `tempo analyze`: timing analysis pipeline.
//!
//! 1. Load `tempo.toml` if there is one
//! 2. Merge input paths and settings with the command-line flags
//! 3. Read the clock, library and netlist files
//! 4. Build the timing graph and compute arrival, required and slack
//! 5. Render diagnostics to stderr and the report to stdout

use tempo_timing::{analyze_timing, AnalysisOptions, DEFAULT_MAX_PATHS};

use crate::pipeline::{load_design, load_project, render_diagnostics};
use crate::report::{render_json, render_text};
use crate::{AnalyzeArgs, GlobalArgs, ReportFormat};

/// Runs the `tempo analyze` command.
///
/// Returns exit code 0 when timing is met, 1 on violations or input errors.
pub fn run(args: &AnalyzeArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let project = load_project(global)?;
    let period = args.inputs.period.or(project.clock_period());
    let paths = project.input_paths(&args.inputs, period)?;

    let config = project.config.as_ref();
    let format = args
        .format
        .or(config.map(|c| c.report.format.into()))
        .unwrap_or(ReportFormat::Text);
    let max_paths = args
        .max_paths
        .or(config.map(|c| c.analysis.max_paths))
        .unwrap_or(DEFAULT_MAX_PATHS);
    let show_vertices = args.all || config.is_some_and(|c| c.report.show_vertices);

    if !global.quiet {
        eprintln!("   Analyzing {}", project.design_name());
    }
    if global.verbose {
        eprintln!("     netlist {}", paths.netlist.display());
        eprintln!("     library {}", paths.library.display());
        if let Some(ref clock) = paths.clock {
            eprintln!("       clock {}", clock.display());
        }
    }

    let mut design = load_design(&paths, period)?;
    let Some(graph) = design.graph.as_mut() else {
        render_diagnostics(&design.sink.diagnostics(), &design.sources, global);
        return Ok(1);
    };

    let options = AnalysisOptions { max_paths };
    let report = match analyze_timing(graph, &options, &design.sink) {
        Ok(report) => report,
        Err(e) => {
            design.sink.emit(e.to_diagnostic());
            render_diagnostics(&design.sink.diagnostics(), &design.sources, global);
            return Ok(1);
        }
    };

    render_diagnostics(&design.sink.diagnostics(), &design.sources, global);
    match format {
        ReportFormat::Text => print!(
            "{}",
            render_text(&report, project.design_name(), show_vertices)
        ),
        ReportFormat::Json => println!("{}", render_json(&report)?),
    }

    Ok(if report.met { 0 } else { 1 })
}
