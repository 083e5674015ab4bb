//! Static timing analysis: arrival, required and slack propagation.
//!
//! Arrival times are resolved by a depth-first walk over fan-in started at
//! every sink; required times by the mirrored walk over fan-out started at
//! every source. Both walks memoize on an explicit per-vertex visit state
//! and run on a heap-allocated work stack, so deep graphs cannot overflow
//! the thread stack and a vertex met again while still on the stack is
//! reported as a combinational loop.

use crate::error::StaError;
use crate::graph::{PinRef, TimingGraph};
use crate::ids::VertexId;
use crate::report::{CriticalPath, PathElement, TimingReport, VertexReport};
use tempo_diagnostics::{Category, Diagnostic, DiagnosticCode, DiagnosticSink, Span};

/// Default number of critical paths reported.
pub const DEFAULT_MAX_PATHS: usize = 10;

/// Knobs for [`analyze_timing`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisOptions {
    /// Maximum number of critical paths in the report.
    pub max_paths: usize,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            max_paths: DEFAULT_MAX_PATHS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VisitState {
    Unvisited,
    InProgress,
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pass {
    Arrival,
    Required,
}

impl TimingGraph {
    /// Computes the arrival time of every vertex.
    ///
    /// A vertex without predecessors arrives at `0`; any other vertex at the
    /// maximum over its fan-in of `arrival(pred) + delay(pin)`, where the
    /// delay is looked up on the vertex's own cell type.
    pub fn calc_arrival(&mut self) -> Result<(), StaError> {
        let arrival = self.propagate(Pass::Arrival)?;
        for (vertex, value) in self.vertices.iter_mut().zip(arrival) {
            vertex.arrival = Some(value);
        }
        Ok(())
    }

    /// Computes the required time of every vertex.
    ///
    /// A vertex without successors is required at the clock period; any
    /// other vertex at the minimum over its fan-out of
    /// `required(succ) - delay(pin)`, looked up on the successor's cell type.
    pub fn calc_required(&mut self) -> Result<(), StaError> {
        let required = self.propagate(Pass::Required)?;
        for (vertex, value) in self.vertices.iter_mut().zip(required) {
            vertex.required = Some(value);
        }
        Ok(())
    }

    /// Runs both passes and sets `slack = required - arrival` everywhere.
    ///
    /// Every call recomputes from scratch, so repeated calls on an unchanged
    /// graph produce identical results. On error no vertex attribute from
    /// the failed pass is written.
    pub fn calc_slack(&mut self) -> Result<(), StaError> {
        self.calc_arrival()?;
        self.calc_required()?;
        for vertex in &mut self.vertices {
            vertex.slack = match (vertex.arrival, vertex.required) {
                (Some(arrival), Some(required)) => Some(required - arrival),
                _ => None,
            };
        }
        Ok(())
    }

    fn propagate(&self, pass: Pass) -> Result<Vec<f64>, StaError> {
        let n = self.vertices.len();
        let mut state = vec![VisitState::Unvisited; n];
        let mut value = vec![0.0_f64; n];

        let roots = match pass {
            Pass::Arrival => self.sink_ids(),
            Pass::Required => self.source_ids(),
        };
        // Loops with no way out are unreachable from the roots; sweep the
        // rest so they are still reported.
        let sweep = (0..n as u32).map(VertexId::from_raw);
        for root in roots.iter().copied().chain(sweep) {
            if state[root.index()] == VisitState::Unvisited {
                self.resolve_from(pass, root, &mut state, &mut value)?;
            }
        }

        log::debug!("{pass:?} pass resolved {n} vertices");
        Ok(value)
    }

    fn dependencies(&self, pass: Pass, id: VertexId) -> &[PinRef] {
        let vertex = self.node(id);
        match pass {
            Pass::Arrival => &vertex.fanin,
            Pass::Required => &vertex.fanout,
        }
    }

    fn resolve_from(
        &self,
        pass: Pass,
        root: VertexId,
        state: &mut [VisitState],
        value: &mut [f64],
    ) -> Result<(), StaError> {
        // Each frame is a vertex and the next dependency to visit.
        let mut stack: Vec<(VertexId, usize)> = vec![(root, 0)];
        state[root.index()] = VisitState::InProgress;

        while let Some(frame) = stack.last_mut() {
            let (id, next) = *frame;
            let deps = self.dependencies(pass, id);
            if next < deps.len() {
                frame.1 += 1;
                let dep = deps[next].vertex;
                match state[dep.index()] {
                    VisitState::Done => {}
                    VisitState::Unvisited => {
                        state[dep.index()] = VisitState::InProgress;
                        stack.push((dep, 0));
                    }
                    VisitState::InProgress => return Err(self.loop_error(pass, &stack, dep)),
                }
            } else {
                let resolved = self.combine(pass, id, value)?;
                value[id.index()] = resolved;
                state[id.index()] = VisitState::Done;
                stack.pop();
            }
        }
        Ok(())
    }

    fn combine(&self, pass: Pass, id: VertexId, value: &[f64]) -> Result<f64, StaError> {
        let deps = self.dependencies(pass, id);
        match pass {
            Pass::Arrival if deps.is_empty() => Ok(0.0),
            Pass::Required if deps.is_empty() => Ok(self.clock_period),
            Pass::Arrival => deps.iter().try_fold(f64::NEG_INFINITY, |latest, dep| {
                let candidate = value[dep.vertex.index()] + self.pin_delay(id, &dep.pin)?;
                Ok(latest.max(candidate))
            }),
            Pass::Required => deps.iter().try_fold(f64::INFINITY, |tightest, dep| {
                let candidate = value[dep.vertex.index()] - self.pin_delay(dep.vertex, &dep.pin)?;
                Ok(tightest.min(candidate))
            }),
        }
    }

    fn loop_error(&self, pass: Pass, stack: &[(VertexId, usize)], reentered: VertexId) -> StaError {
        let start = stack
            .iter()
            .position(|&(id, _)| id == reentered)
            .unwrap_or(0);
        let mut ids: Vec<VertexId> = stack[start..].iter().map(|&(id, _)| id).collect();
        // The arrival walk follows fan-in, i.e. against the signal.
        if pass == Pass::Arrival {
            ids.reverse();
        }
        StaError::CombinationalLoop {
            vertices: ids.into_iter().map(|id| self.node(id).name.clone()).collect(),
        }
    }

    /// Traces the path that determines the arrival time at `endpoint`.
    ///
    /// At each step the fan-in entry with the largest `arrival + delay` is
    /// followed (the first one on ties). Requires a successful
    /// [`calc_slack`](Self::calc_slack).
    pub fn critical_path(&self, endpoint: VertexId) -> Result<CriticalPath, StaError> {
        let mut elements = Vec::new();
        let mut current = endpoint;
        // Bounded by the vertex count: arrival strictly follows an acyclic walk.
        for _ in 0..=self.vertices.len() {
            let vertex = self.node(current);
            let mut best: Option<(&PinRef, f64, f64)> = None;
            for entry in &vertex.fanin {
                let delay = self.pin_delay(current, &entry.pin)?;
                let candidate = self.node(entry.vertex).arrival.unwrap_or(0.0) + delay;
                if best.map_or(true, |(_, _, top)| candidate > top) {
                    best = Some((entry, delay, candidate));
                }
            }
            elements.push(PathElement {
                vertex: vertex.name.clone(),
                cell_type: vertex.cell_type.clone(),
                pin: best.map(|(entry, _, _)| entry.pin.clone()).unwrap_or_default(),
                delay: best.map_or(0.0, |(_, delay, _)| delay),
                arrival: vertex.arrival.unwrap_or(0.0),
            });
            match best {
                Some((entry, _, _)) => current = entry.vertex,
                None => break,
            }
        }
        elements.reverse();

        let end = self.node(endpoint);
        Ok(CriticalPath {
            startpoint: elements
                .first()
                .map(|e| e.vertex.clone())
                .unwrap_or_default(),
            endpoint: end.name.clone(),
            arrival: end.arrival.unwrap_or(0.0),
            required: end.required.unwrap_or(self.clock_period),
            slack: end.slack.unwrap_or(0.0),
            elements,
        })
    }
}

/// Analyzes `graph` and summarizes the result.
///
/// Runs [`TimingGraph::calc_slack`], collects per-vertex timing, the
/// vertices with negative slack and the critical paths of the worst sinks.
/// A `T001` warning is emitted to `sink` when timing is not met; negative
/// slack is never returned as an error.
pub fn analyze_timing(
    graph: &mut TimingGraph,
    options: &AnalysisOptions,
    sink: &DiagnosticSink,
) -> Result<TimingReport, StaError> {
    graph.calc_slack()?;
    if graph.vertex_count() == 0 {
        return Ok(TimingReport::empty(graph.clock_period()));
    }

    let vertices: Vec<VertexReport> = graph
        .vertices()
        .filter_map(|v| {
            let timing = v.timing()?;
            Some(VertexReport {
                name: v.name.clone(),
                cell_type: v.cell_type.clone(),
                arrival: timing.arrival,
                required: timing.required,
                slack: timing.slack,
            })
        })
        .collect();

    let worst_slack = vertices.iter().map(|v| v.slack).min_by(f64::total_cmp);
    let violations: Vec<String> = vertices
        .iter()
        .filter(|v| v.slack < 0.0)
        .map(|v| v.name.clone())
        .collect();

    let mut endpoints: Vec<VertexId> = graph.sink_ids().to_vec();
    endpoints.sort_by(|&a, &b| {
        let slack = |id| graph.node(id).slack.unwrap_or(0.0);
        slack(a).total_cmp(&slack(b))
    });
    let critical_paths = endpoints
        .into_iter()
        .take(options.max_paths)
        .map(|id| graph.critical_path(id))
        .collect::<Result<Vec<_>, _>>()?;

    let met = violations.is_empty();
    if !met {
        let worst = worst_slack.unwrap_or(0.0);
        sink.emit(
            Diagnostic::warning(
                DiagnosticCode::new(Category::Timing, 1),
                format!("timing not met: worst slack = {worst:.3}"),
                Span::DUMMY,
            )
            .with_note(format!(
                "{} of {} vertices have negative slack at clock period {}",
                violations.len(),
                vertices.len(),
                graph.clock_period()
            )),
        );
    }
    log::info!(
        "timing analysis finished: {} vertices, {} violations",
        vertices.len(),
        violations.len()
    );

    Ok(TimingReport {
        clock_period: graph.clock_period(),
        sources: graph.sources().into_iter().map(String::from).collect(),
        sinks: graph.sinks().into_iter().map(String::from).collect(),
        vertices,
        worst_slack,
        violations,
        critical_paths,
        met,
    })
}
