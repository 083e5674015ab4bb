//! Netlist reader.
//!
//! ```text
//! 3
//! IN PORT
//! G1 INV
//! OUT PORT
//! 2
//! IN G1/A
//! G1/Y OUT
//! ```
//!
//! A vertex count and that many `name cell_type` pairs, then an edge count
//! and that many `from to` pairs. An edge endpoint is `instance/pin` or a
//! bare port name, which has an empty pin.

use crate::lexer::{self, Token, TokenStream};
use tempo_diagnostics::{DiagnosticSink, FileId, Span};
use tempo_timing::{EdgeSpec, StaError, VertexSpec};

/// Vertices and edges read from a netlist file, with their source spans.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Netlist {
    /// Vertex declarations in file order.
    pub vertices: Vec<VertexSpec>,
    /// Edge declarations in file order.
    pub edges: Vec<EdgeSpec>,
    vertex_spans: Vec<Span>,
    edge_spans: Vec<Span>,
}

impl Netlist {
    /// Best source location for a graph construction error.
    ///
    /// A duplicate vertex points at its second declaration and an unknown
    /// vertex at the first edge naming it; anything else has no location.
    pub fn span_for(&self, err: &StaError) -> Span {
        match err {
            StaError::DuplicateVertex(name) => self
                .vertices
                .iter()
                .zip(&self.vertex_spans)
                .filter(|(v, _)| &v.name == name)
                .nth(1)
                .map_or(Span::DUMMY, |(_, &span)| span),
            StaError::UnknownVertex { from, to, .. } => self
                .edges
                .iter()
                .zip(&self.edge_spans)
                .find(|(e, _)| &e.from == from && &e.to == to)
                .map_or(Span::DUMMY, |(_, &span)| span),
            _ => Span::DUMMY,
        }
    }
}

/// Splits an edge endpoint at its first `/` into instance and pin.
///
/// `G1/A` gives `("G1", "A")`; a bare `IN` gives `("IN", "")`.
pub fn split_ref(reference: &str) -> (&str, &str) {
    reference.split_once('/').unwrap_or((reference, ""))
}

/// Reads a netlist.
///
/// Stops at the first malformed token; everything declared before it is
/// returned and the error is in `sink`.
pub fn parse_netlist(source: &str, file: FileId, sink: &DiagnosticSink) -> Netlist {
    let mut stream = TokenStream::new(source, file);
    let mut netlist = Netlist::default();
    if read_body(&mut stream, &mut netlist, sink).is_some() {
        stream.finish(sink);
    }
    log::debug!(
        "read netlist: {} vertices, {} edges",
        netlist.vertices.len(),
        netlist.edges.len()
    );
    netlist
}

fn read_body(
    stream: &mut TokenStream<'_>,
    netlist: &mut Netlist,
    sink: &DiagnosticSink,
) -> Option<()> {
    let vertex_count = stream.expect_count("vertex count", sink)?;
    for _ in 0..vertex_count {
        let name = stream.expect("vertex name", sink)?;
        let cell_type = stream.expect("cell type", sink)?;
        netlist.vertices.push(VertexSpec::new(name.text, cell_type.text));
        netlist.vertex_spans.push(name.span);
    }

    let edge_count = stream.expect_count("edge count", sink)?;
    for _ in 0..edge_count {
        let from = stream.expect("edge source", sink)?;
        let to = stream.expect("edge destination", sink)?;
        let (from_vertex, from_pin) = checked_ref(from, sink)?;
        let (to_vertex, to_pin) = checked_ref(to, sink)?;
        netlist
            .edges
            .push(EdgeSpec::new(from_vertex, to_vertex, from_pin, to_pin));
        netlist
            .edge_spans
            .push(Span::new(from.span.file, from.span.start, to.span.end));
    }
    Some(())
}

fn checked_ref<'a>(token: Token<'a>, sink: &DiagnosticSink) -> Option<(&'a str, &'a str)> {
    let (vertex, pin) = split_ref(token.text);
    if vertex.is_empty() {
        sink.emit(
            lexer::error(
                lexer::MALFORMED_REF,
                format!("pin reference `{}` has no instance name", token.text),
                token.span,
            )
            .with_help("write `instance/pin`, or a bare port name"),
        );
        return None;
    }
    Some((vertex, pin))
}
