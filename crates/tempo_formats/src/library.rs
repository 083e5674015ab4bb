//! Cell library reader.
//!
//! ```text
//! 2
//! INV 1
//! A Y 2.0
//! MUX2 3
//! A Y 1.5
//! B Y 1.5
//! S Y INF
//! ```
//!
//! A cell count, then for each cell its name and arc count followed by that
//! many `input_pin output_pin delay` triples. `INF` marks a disabled arc.

use crate::lexer::{parse_number, TokenStream};
use tempo_diagnostics::{DiagnosticSink, FileId};
use tempo_timing::{CellSpec, PinArc};

/// Delay token for an arc with no timing relation.
pub const DISABLED_DELAY: &str = "INF";

/// Reads a cell library.
///
/// Stops at the first malformed token and returns the cells completed
/// before it; the error is in `sink`.
pub fn parse_library(source: &str, file: FileId, sink: &DiagnosticSink) -> Vec<CellSpec> {
    let mut stream = TokenStream::new(source, file);
    let mut cells = Vec::new();

    let Some(count) = stream.expect_count("cell count", sink) else {
        return cells;
    };
    for _ in 0..count {
        match parse_cell(&mut stream, sink) {
            Some(cell) => cells.push(cell),
            None => return cells,
        }
    }
    stream.finish(sink);

    log::debug!("read {} library cells", cells.len());
    cells
}

fn parse_cell(stream: &mut TokenStream<'_>, sink: &DiagnosticSink) -> Option<CellSpec> {
    let name = stream.expect("cell name", sink)?.text;
    let arc_count = stream.expect_count("arc count", sink)?;
    // The count is untrusted; arcs grow as they are read.
    let mut arcs = Vec::new();
    for _ in 0..arc_count {
        let input = stream.expect("input pin", sink)?.text;
        let output = stream.expect("output pin", sink)?.text;
        let delay = stream.expect("arc delay", sink)?;
        let arc = if delay.text == DISABLED_DELAY {
            PinArc::disabled(input, output)
        } else {
            PinArc::new(input, output, parse_number(delay, "arc delay", sink)?)
        };
        arcs.push(arc);
    }
    Some(CellSpec::new(name, arcs))
}
