//! Errors raised while building or analyzing a timing graph.

use tempo_diagnostics::{Category, Diagnostic, DiagnosticCode, Span};

/// A fatal problem with the analyzer's input.
///
/// All variants are deterministic properties of the input; none is retried.
/// Negative slack is not an error and never appears here.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StaError {
    /// Two vertices share a name.
    #[error("duplicate vertex `{0}`")]
    DuplicateVertex(String),

    /// Two library cells share a name.
    #[error("duplicate cell `{0}` in library")]
    DuplicateCell(String),

    /// An edge names a vertex that was never declared.
    #[error("edge `{from}` -> `{to}` references unknown vertex `{missing}`")]
    UnknownVertex {
        /// Source vertex name as written on the edge.
        from: String,
        /// Destination vertex name as written on the edge.
        to: String,
        /// The name that did not resolve.
        missing: String,
    },

    /// A pin delay was requested for a cell type the library does not define.
    #[error("unknown cell type `{0}`")]
    UnknownCellType(String),

    /// The clock period is NaN or infinite.
    #[error("clock period must be finite, got {0}")]
    InvalidClockPeriod(f64),

    /// The graph contains a directed cycle through the listed vertices.
    #[error("combinational loop detected: {}", format_loop(.vertices))]
    CombinationalLoop {
        /// Vertices on the loop, in signal-flow order.
        vertices: Vec<String>,
    },
}

fn format_loop(vertices: &[String]) -> String {
    match vertices.first() {
        Some(first) => format!("{} -> {first}", vertices.join(" -> ")),
        None => String::new(),
    }
}

impl StaError {
    /// Returns the diagnostic code for this error.
    pub fn code(&self) -> DiagnosticCode {
        let number = match self {
            StaError::DuplicateVertex(_) => 201,
            StaError::DuplicateCell(_) => 202,
            StaError::UnknownVertex { .. } => 203,
            StaError::UnknownCellType(_) => 204,
            StaError::InvalidClockPeriod(_) => 205,
            StaError::CombinationalLoop { .. } => 210,
        };
        DiagnosticCode::new(Category::Error, number)
    }

    /// Converts this error into a renderable diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.code(), self.to_string(), Span::DUMMY);
        match self {
            StaError::UnknownCellType(cell) => {
                diag.with_help(format!("add a `{cell}` entry to the cell library"))
            }
            StaError::UnknownVertex { missing, .. } => {
                diag.with_help(format!("declare `{missing}` in the netlist vertex list"))
            }
            StaError::CombinationalLoop { .. } => {
                diag.with_note("arrival and required times are undefined on cyclic graphs")
            }
            _ => diag,
        }
    }
}
