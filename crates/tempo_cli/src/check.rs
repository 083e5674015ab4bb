//! `tempo check`: read the inputs and build the graph, without analysis.

use crate::pipeline::{load_design, load_project, render_diagnostics};
use crate::{GlobalArgs, InputArgs};

/// Runs the `tempo check` command.
///
/// Returns exit code 0 if the timing graph could be built, 1 otherwise.
pub fn run(args: &InputArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let project = load_project(global)?;
    let period = args.period.or(project.clock_period());
    let paths = project.input_paths(args, period)?;

    let design = load_design(&paths, period)?;
    render_diagnostics(&design.sink.diagnostics(), &design.sources, global);

    let Some(graph) = design.graph else {
        if !global.quiet {
            eprintln!(
                "   Result: {} error(s) in {}",
                design.sink.error_count(),
                project.design_name()
            );
        }
        return Ok(1);
    };

    if !global.quiet {
        eprintln!(
            "   Checked {}: {} vertices, {} edges, {} sources, {} sinks, clock period {}",
            project.design_name(),
            graph.vertex_count(),
            graph.edge_count(),
            graph.source_ids().len(),
            graph.sink_ids().len(),
            graph.clock_period()
        );
    }
    Ok(0)
}
