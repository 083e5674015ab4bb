//! Timing graph: vertices, edges and adjacency.
//!
//! A [`TimingGraph`] is built once from flat lists handed over by the
//! readers: library cells, `(vertex, cell type)` records and
//! `(from, to, from_pin, to_pin)` connections. Vertices live in an arena
//! indexed by [`VertexId`]; adjacency entries store ids, so every reference
//! resolves through the graph that owns it.

use crate::error::StaError;
use crate::ids::{EdgeId, VertexId};
use crate::library::{CellLibrary, CellSpec};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A vertex as declared by the netlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VertexSpec {
    /// Unique vertex name.
    pub name: String,
    /// Cell type name, looked up in the library when a delay is needed.
    pub cell_type: String,
}

impl VertexSpec {
    /// Creates a vertex spec.
    pub fn new(name: impl Into<String>, cell_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cell_type: cell_type.into(),
        }
    }
}

/// A connection as declared by the netlist.
///
/// An empty pin means the endpoint is a port referenced directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeSpec {
    /// Driving vertex name.
    pub from: String,
    /// Driven vertex name.
    pub to: String,
    /// Pin on the driving vertex.
    pub from_pin: String,
    /// Pin on the driven vertex; the delay lookup key.
    pub to_pin: String,
}

impl EdgeSpec {
    /// Creates an edge spec.
    pub fn new(
        from: impl Into<String>,
        to: impl Into<String>,
        from_pin: impl Into<String>,
        to_pin: impl Into<String>,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            from_pin: from_pin.into(),
            to_pin: to_pin.into(),
        }
    }
}

/// One adjacency entry: a neighbouring vertex and the pin the delay is
/// evaluated at.
///
/// In [`TimingVertex::fanin`] the pin belongs to the vertex holding the
/// entry; in [`TimingVertex::fanout`] it belongs to the neighbour. Either
/// way it is the destination pin of the underlying edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinRef {
    /// Neighbouring vertex.
    pub vertex: VertexId,
    /// Destination pin of the edge.
    pub pin: String,
}

/// A gate instance or port in the timing graph.
#[derive(Debug, Clone)]
pub struct TimingVertex {
    /// Arena index of this vertex.
    pub id: VertexId,
    /// Unique name.
    pub name: String,
    /// Cell type name.
    pub cell_type: String,
    /// Predecessors, in edge order.
    pub fanin: Vec<PinRef>,
    /// Successors, in edge order.
    pub fanout: Vec<PinRef>,
    /// Arrival time, set by the forward pass.
    pub arrival: Option<f64>,
    /// Required time, set by the backward pass.
    pub required: Option<f64>,
    /// `required - arrival`, set by [`TimingGraph::calc_slack`].
    pub slack: Option<f64>,
}

impl TimingVertex {
    /// Returns `true` if the vertex has no predecessors.
    pub fn is_source(&self) -> bool {
        self.fanin.is_empty()
    }

    /// Returns `true` if the vertex has no successors.
    pub fn is_sink(&self) -> bool {
        self.fanout.is_empty()
    }

    /// Computed timing, once all three attributes are known.
    pub fn timing(&self) -> Option<VertexTiming> {
        Some(VertexTiming {
            arrival: self.arrival?,
            required: self.required?,
            slack: self.slack?,
        })
    }
}

/// The timing attributes of one vertex after analysis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VertexTiming {
    /// Latest signal arrival.
    pub arrival: f64,
    /// Latest permissible arrival.
    pub required: f64,
    /// `required - arrival`; negative means a violation.
    pub slack: f64,
}

/// A directed connection between two vertices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimingEdge {
    /// Index in the edge list.
    pub id: EdgeId,
    /// Driving vertex.
    pub from: VertexId,
    /// Driven vertex.
    pub to: VertexId,
    /// Pin on the driving vertex.
    pub from_pin: String,
    /// Pin on the driven vertex.
    pub to_pin: String,
}

/// The timing graph of one analysis run.
#[derive(Debug, Clone)]
pub struct TimingGraph {
    pub(crate) clock_period: f64,
    pub(crate) library: CellLibrary,
    pub(crate) vertices: Vec<TimingVertex>,
    index: HashMap<String, VertexId>,
    edges: Vec<TimingEdge>,
    sources: Vec<VertexId>,
    sinks: Vec<VertexId>,
}

impl TimingGraph {
    /// Builds the graph and its adjacency from flat lists.
    ///
    /// Fails on duplicate cell or vertex names, on edges naming undeclared
    /// vertices, and on a non-finite clock period. Cell types of vertices are
    /// not checked here: ports commonly use types absent from the library and
    /// are only looked up when a non-empty pin needs a delay.
    pub fn build(
        clock_period: f64,
        cells: Vec<CellSpec>,
        vertices: Vec<VertexSpec>,
        edges: Vec<EdgeSpec>,
    ) -> Result<Self, StaError> {
        if !clock_period.is_finite() {
            return Err(StaError::InvalidClockPeriod(clock_period));
        }
        let library = CellLibrary::new(cells)?;

        let mut index = HashMap::with_capacity(vertices.len());
        let mut arena = Vec::with_capacity(vertices.len());
        for spec in vertices {
            let id = VertexId::from_raw(arena.len() as u32);
            if index.insert(spec.name.clone(), id).is_some() {
                return Err(StaError::DuplicateVertex(spec.name));
            }
            arena.push(TimingVertex {
                id,
                name: spec.name,
                cell_type: spec.cell_type,
                fanin: Vec::new(),
                fanout: Vec::new(),
                arrival: None,
                required: None,
                slack: None,
            });
        }

        let mut timing_edges = Vec::with_capacity(edges.len());
        for spec in edges {
            let resolve = |name: &str| {
                index
                    .get(name)
                    .copied()
                    .ok_or_else(|| StaError::UnknownVertex {
                        from: spec.from.clone(),
                        to: spec.to.clone(),
                        missing: name.to_string(),
                    })
            };
            let from = resolve(&spec.from)?;
            let to = resolve(&spec.to)?;

            arena[from.index()].fanout.push(PinRef {
                vertex: to,
                pin: spec.to_pin.clone(),
            });
            arena[to.index()].fanin.push(PinRef {
                vertex: from,
                pin: spec.to_pin.clone(),
            });
            timing_edges.push(TimingEdge {
                id: EdgeId::from_raw(timing_edges.len() as u32),
                from,
                to,
                from_pin: spec.from_pin,
                to_pin: spec.to_pin,
            });
        }

        let sources: Vec<VertexId> = arena.iter().filter(|v| v.is_source()).map(|v| v.id).collect();
        let sinks: Vec<VertexId> = arena.iter().filter(|v| v.is_sink()).map(|v| v.id).collect();

        log::debug!(
            "built timing graph: {} vertices, {} edges, {} sources, {} sinks, {} cells",
            arena.len(),
            timing_edges.len(),
            sources.len(),
            sinks.len(),
            library.len()
        );

        Ok(Self {
            clock_period,
            library,
            vertices: arena,
            index,
            edges: timing_edges,
            sources,
            sinks,
        })
    }

    /// The clock period this graph is analyzed against.
    pub fn clock_period(&self) -> f64 {
        self.clock_period
    }

    /// The cell library.
    pub fn library(&self) -> &CellLibrary {
        &self.library
    }

    /// Names of source vertices (no predecessors), in declaration order.
    pub fn sources(&self) -> Vec<&str> {
        self.names(&self.sources)
    }

    /// Names of sink vertices (no successors), in declaration order.
    pub fn sinks(&self) -> Vec<&str> {
        self.names(&self.sinks)
    }

    /// Ids of source vertices.
    pub fn source_ids(&self) -> &[VertexId] {
        &self.sources
    }

    /// Ids of sink vertices.
    pub fn sink_ids(&self) -> &[VertexId] {
        &self.sinks
    }

    fn names(&self, ids: &[VertexId]) -> Vec<&str> {
        ids.iter().map(|&id| self.node(id).name.as_str()).collect()
    }

    /// Looks up a vertex by name.
    pub fn vertex(&self, name: &str) -> Option<&TimingVertex> {
        self.vertex_id(name).map(|id| self.node(id))
    }

    /// Resolves a vertex name to its id.
    pub fn vertex_id(&self, name: &str) -> Option<VertexId> {
        self.index.get(name).copied()
    }

    /// Returns the vertex with the given id.
    ///
    /// Ids handed out by this graph always resolve.
    pub fn node(&self, id: VertexId) -> &TimingVertex {
        &self.vertices[id.index()]
    }

    /// Computed timing of the named vertex, if it exists and has been analyzed.
    pub fn timing(&self, name: &str) -> Option<VertexTiming> {
        self.vertex(name)?.timing()
    }

    /// All vertices in declaration order.
    pub fn vertices(&self) -> impl Iterator<Item = &TimingVertex> {
        self.vertices.iter()
    }

    /// All edges in declaration order.
    pub fn edges(&self) -> &[TimingEdge] {
        &self.edges
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Delay through `pin` of the vertex `id`, per its cell type.
    pub fn pin_delay(&self, id: VertexId, pin: &str) -> Result<f64, StaError> {
        self.library.delay_for(&self.node(id).cell_type, pin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::PinArc;

    fn inverter_chain() -> TimingGraph {
        TimingGraph::build(
            10.0,
            vec![CellSpec::new("INV", vec![PinArc::new("A", "Y", 2.0)])],
            vec![
                VertexSpec::new("IN", "PORT"),
                VertexSpec::new("G1", "INV"),
                VertexSpec::new("OUT", "PORT"),
            ],
            vec![
                EdgeSpec::new("IN", "G1", "", "A"),
                EdgeSpec::new("G1", "OUT", "Y", ""),
            ],
        )
        .unwrap()
    }

    #[test]
    fn adjacency_records_destination_pin() {
        let g = inverter_chain();
        let in_id = g.vertex_id("IN").unwrap();
        let g1 = g.vertex("G1").unwrap();
        assert_eq!(
            g1.fanin,
            vec![PinRef {
                vertex: in_id,
                pin: "A".into()
            }]
        );
        let input = g.vertex("IN").unwrap();
        assert_eq!(
            input.fanout,
            vec![PinRef {
                vertex: g1.id,
                pin: "A".into()
            }]
        );
        assert_eq!(g.edges()[1].from_pin, "Y");
        assert_eq!(g.edges()[1].to_pin, "");
    }

    #[test]
    fn sources_and_sinks() {
        let g = inverter_chain();
        assert_eq!(g.sources(), vec!["IN"]);
        assert_eq!(g.sinks(), vec!["OUT"]);
        assert_eq!(g.vertex_count(), 3);
        assert_eq!(g.edge_count(), 2);
        assert_eq!(g.clock_period(), 10.0);
    }

    #[test]
    fn isolated_vertex_is_source_and_sink() {
        let g = TimingGraph::build(
            5.0,
            vec![],
            vec![VertexSpec::new("LONE", "PORT")],
            vec![],
        )
        .unwrap();
        assert_eq!(g.sources(), vec!["LONE"]);
        assert_eq!(g.sinks(), vec!["LONE"]);
    }

    #[test]
    fn timing_unset_before_analysis() {
        let g = inverter_chain();
        assert!(g.timing("G1").is_none());
        assert!(g.timing("NOPE").is_none());
        assert!(g.vertex("G1").unwrap().arrival.is_none());
    }

    #[test]
    fn duplicate_vertex_rejected() {
        let err = TimingGraph::build(
            1.0,
            vec![],
            vec![VertexSpec::new("A", "PORT"), VertexSpec::new("A", "INV")],
            vec![],
        )
        .unwrap_err();
        assert_eq!(err, StaError::DuplicateVertex("A".into()));
    }

    #[test]
    fn duplicate_cell_rejected() {
        let err = TimingGraph::build(
            1.0,
            vec![CellSpec::new("INV", vec![]), CellSpec::new("INV", vec![])],
            vec![],
            vec![],
        )
        .unwrap_err();
        assert_eq!(err, StaError::DuplicateCell("INV".into()));
    }

    #[test]
    fn dangling_edge_rejected() {
        let err = TimingGraph::build(
            1.0,
            vec![],
            vec![VertexSpec::new("A", "PORT")],
            vec![EdgeSpec::new("A", "B", "", "")],
        )
        .unwrap_err();
        assert_eq!(
            err,
            StaError::UnknownVertex {
                from: "A".into(),
                to: "B".into(),
                missing: "B".into()
            }
        );
    }

    #[test]
    fn non_finite_period_rejected() {
        let err = TimingGraph::build(f64::NAN, vec![], vec![], vec![]).unwrap_err();
        assert!(matches!(err, StaError::InvalidClockPeriod(_)));
        assert!(TimingGraph::build(f64::INFINITY, vec![], vec![], vec![]).is_err());
    }

    #[test]
    fn pin_delay_uses_vertex_cell_type() {
        let g = inverter_chain();
        let g1 = g.vertex_id("G1").unwrap();
        let out = g.vertex_id("OUT").unwrap();
        assert_eq!(g.pin_delay(g1, "A").unwrap(), 2.0);
        assert_eq!(g.pin_delay(out, "").unwrap(), 0.0);
        assert_eq!(
            g.pin_delay(out, "A"),
            Err(StaError::UnknownCellType("PORT".into()))
        );
    }

    #[test]
    fn parallel_edges_are_kept() {
        let g = TimingGraph::build(
            1.0,
            vec![],
            vec![VertexSpec::new("A", "PORT"), VertexSpec::new("B", "AND2")],
            vec![EdgeSpec::new("A", "B", "", "A"), EdgeSpec::new("A", "B", "", "B")],
        )
        .unwrap();
        assert_eq!(g.vertex("A").unwrap().fanout.len(), 2);
        assert_eq!(g.vertex("B").unwrap().fanin.len(), 2);
    }
}
