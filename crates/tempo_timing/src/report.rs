//! Timing report types produced by [`analyze_timing`](crate::analyze_timing).

use serde::{Deserialize, Serialize};

/// Summary of one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingReport {
    /// Clock period the design was analyzed against.
    pub clock_period: f64,
    /// Vertices without predecessors.
    pub sources: Vec<String>,
    /// Vertices without successors.
    pub sinks: Vec<String>,
    /// Per-vertex timing in declaration order.
    pub vertices: Vec<VertexReport>,
    /// Smallest slack in the design, `None` for an empty graph.
    pub worst_slack: Option<f64>,
    /// Vertices with negative slack.
    pub violations: Vec<String>,
    /// Paths into the worst sinks, worst first.
    pub critical_paths: Vec<CriticalPath>,
    /// `true` when no vertex has negative slack.
    pub met: bool,
}

impl TimingReport {
    /// A report for a design with no vertices.
    pub fn empty(clock_period: f64) -> Self {
        Self {
            clock_period,
            sources: Vec::new(),
            sinks: Vec::new(),
            vertices: Vec::new(),
            worst_slack: None,
            violations: Vec::new(),
            critical_paths: Vec::new(),
            met: true,
        }
    }

    /// Timing of the named vertex.
    pub fn vertex(&self, name: &str) -> Option<&VertexReport> {
        self.vertices.iter().find(|v| v.name == name)
    }
}

/// Timing of a single vertex.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VertexReport {
    /// Vertex name.
    pub name: String,
    /// Cell type.
    pub cell_type: String,
    /// Arrival time.
    pub arrival: f64,
    /// Required time.
    pub required: f64,
    /// Slack.
    pub slack: f64,
}

/// The path that sets the arrival time at one endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriticalPath {
    /// First vertex of the path (a source).
    pub startpoint: String,
    /// Last vertex of the path.
    pub endpoint: String,
    /// Arrival time at the endpoint.
    pub arrival: f64,
    /// Required time at the endpoint.
    pub required: f64,
    /// Slack at the endpoint.
    pub slack: f64,
    /// Vertices from startpoint to endpoint.
    pub elements: Vec<PathElement>,
}

/// One vertex along a critical path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathElement {
    /// Vertex name.
    pub vertex: String,
    /// Cell type.
    pub cell_type: String,
    /// Pin through which the path enters the vertex; empty at the startpoint
    /// and at ports.
    pub pin: String,
    /// Delay added at this vertex.
    pub delay: f64,
    /// Arrival time at this vertex.
    pub arrival: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_report_is_met() {
        let report = TimingReport::empty(10.0);
        assert!(report.met);
        assert!(report.worst_slack.is_none());
        assert!(report.vertex("IN").is_none());
    }

    #[test]
    fn json_shape() {
        let mut report = TimingReport::empty(10.0);
        report.vertices.push(VertexReport {
            name: "G1".into(),
            cell_type: "INV".into(),
            arrival: 2.0,
            required: 10.0,
            slack: 8.0,
        });
        let json: serde_json::Value = serde_json::to_value(&report).unwrap();
        assert_eq!(json["clock_period"], 10.0);
        assert_eq!(json["vertices"][0]["name"], "G1");
        assert_eq!(json["vertices"][0]["slack"], 8.0);
        assert_eq!(json["worst_slack"], serde_json::Value::Null);
        assert_eq!(json["met"], true);
    }
}
