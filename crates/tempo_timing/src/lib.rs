//! Static timing analysis of combinational netlists.
//!
//! Given a cell-delay library, a graph of gate instances connected pin to
//! pin, and a clock period, this crate computes for every vertex the
//! arrival time, the required time and the slack, and flags vertices whose
//! slack is negative.
//!
//! # Usage
//!
//! ```
//! use tempo_timing::{CellSpec, EdgeSpec, PinArc, TimingGraph, VertexSpec};
//!
//! let mut graph = TimingGraph::build(
//!     10.0,
//!     vec![CellSpec::new("INV", vec![PinArc::new("A", "Y", 2.0)])],
//!     vec![
//!         VertexSpec::new("IN", "PORT"),
//!         VertexSpec::new("G1", "INV"),
//!         VertexSpec::new("OUT", "PORT"),
//!     ],
//!     vec![
//!         EdgeSpec::new("IN", "G1", "", "A"),
//!         EdgeSpec::new("G1", "OUT", "Y", ""),
//!     ],
//! )?;
//! graph.calc_slack()?;
//! assert_eq!(graph.timing("IN").unwrap().slack, 8.0);
//! # Ok::<(), tempo_timing::StaError>(())
//! ```
//!
//! # Architecture
//!
//! - [`library`]: cell pin-arc tables and delay lookup
//! - [`graph`]: vertex arena, edges, adjacency, sources and sinks
//! - [`sta`]: arrival/required/slack propagation and report building
//! - [`report`]: serializable analysis summary
//! - [`error`]: configuration and structural errors

#![warn(missing_docs)]

pub mod error;
pub mod graph;
pub mod ids;
pub mod library;
pub mod report;
pub mod sta;

pub use error::StaError;
pub use graph::{EdgeSpec, PinRef, TimingEdge, TimingGraph, TimingVertex, VertexSpec, VertexTiming};
pub use ids::{EdgeId, VertexId};
pub use library::{ArcDelay, CellLibrary, CellSpec, PinArc};
pub use report::{CriticalPath, PathElement, TimingReport, VertexReport};
pub use sta::{analyze_timing, AnalysisOptions, DEFAULT_MAX_PATHS};

#[cfg(test)]
mod tests {
    use super::*;
    use tempo_diagnostics::DiagnosticSink;

    /// Two-level circuit: a, b -> n1 (NAND2); n1 -> n2 (INV); n2 -> y.
    fn small_circuit(period: f64) -> TimingGraph {
        TimingGraph::build(
            period,
            vec![
                CellSpec::new(
                    "NAND2",
                    vec![PinArc::new("A", "Y", 1.5), PinArc::new("B", "Y", 2.5)],
                ),
                CellSpec::new("INV", vec![PinArc::new("A", "Y", 1.0)]),
            ],
            vec![
                VertexSpec::new("a", "PORT"),
                VertexSpec::new("b", "PORT"),
                VertexSpec::new("n1", "NAND2"),
                VertexSpec::new("n2", "INV"),
                VertexSpec::new("y", "PORT"),
            ],
            vec![
                EdgeSpec::new("a", "n1", "", "A"),
                EdgeSpec::new("b", "n1", "", "B"),
                EdgeSpec::new("n1", "n2", "Y", "A"),
                EdgeSpec::new("n2", "y", "Y", ""),
            ],
        )
        .unwrap()
    }

    #[test]
    fn boundary_and_slack_properties() {
        let mut g = small_circuit(5.0);
        g.calc_slack().unwrap();
        for v in g.vertices() {
            let t = v.timing().unwrap();
            if v.is_source() {
                assert_eq!(t.arrival, 0.0);
            }
            if v.is_sink() {
                assert_eq!(t.required, g.clock_period());
            }
            assert_eq!(t.slack, t.required - t.arrival);
        }
    }

    #[test]
    fn arrival_and_required_bound_every_edge() {
        let mut g = small_circuit(5.0);
        g.calc_slack().unwrap();
        for edge in g.edges() {
            let from = g.node(edge.from);
            let to = g.node(edge.to);
            let delay = g.pin_delay(edge.to, &edge.to_pin).unwrap();
            assert!(to.arrival.unwrap() >= from.arrival.unwrap() + delay);
            assert!(from.required.unwrap() <= to.required.unwrap() - delay);
        }
    }

    #[test]
    fn full_pipeline_met() {
        let mut g = small_circuit(5.0);
        let sink = DiagnosticSink::new();
        let report = analyze_timing(&mut g, &AnalysisOptions::default(), &sink).unwrap();
        assert!(report.met);
        assert_eq!(report.vertex("y").unwrap().arrival, 3.5);
        assert_eq!(report.vertex("b").unwrap().required, 1.5);
        assert_eq!(report.worst_slack, Some(1.5));
        assert_eq!(report.critical_paths[0].startpoint, "b");
    }

    #[test]
    fn full_pipeline_violated() {
        let mut g = small_circuit(3.0);
        let sink = DiagnosticSink::new();
        let report = analyze_timing(&mut g, &AnalysisOptions::default(), &sink).unwrap();
        assert!(!report.met);
        assert_eq!(report.worst_slack, Some(-0.5));
        assert!(report.violations.contains(&"n1".to_string()));
        assert!(!report.violations.contains(&"a".to_string()));
        assert_eq!(sink.diagnostics().len(), 1);
    }
}
