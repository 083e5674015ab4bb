//! Text and JSON rendering of [`TimingReport`]s.

use std::fmt::Write;

use tempo_timing::{CriticalPath, TimingReport};

/// Renders a human-readable report.
///
/// The per-vertex table is included only when `show_vertices` is set; the
/// last line is always `TIMING MET` or `TIMING VIOLATED (n vertices)`.
pub fn render_text(report: &TimingReport, design: &str, show_vertices: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Timing report for `{design}`");
    let _ = writeln!(out, "Clock period: {}", report.clock_period);
    let _ = writeln!(out, "Sources: {}", report.sources.join(" "));
    let _ = writeln!(out, "Sinks: {}", report.sinks.join(" "));

    if show_vertices {
        let name_width = column_width(report.vertices.iter().map(|v| v.name.as_str()), "vertex");
        let cell_width = column_width(report.vertices.iter().map(|v| v.cell_type.as_str()), "cell");
        let _ = writeln!(out);
        let _ = writeln!(out, "=== Vertex Timing ===");
        let _ = writeln!(
            out,
            "{:<name_width$}  {:<cell_width$}  {:>10}  {:>10}  {:>10}",
            "vertex", "cell", "arrival", "required", "slack"
        );
        for v in &report.vertices {
            let _ = writeln!(
                out,
                "{:<name_width$}  {:<cell_width$}  {:>10.3}  {:>10.3}  {:>10.3}{}",
                v.name,
                v.cell_type,
                v.arrival,
                v.required,
                v.slack,
                if v.slack < 0.0 { "  (VIOLATED)" } else { "" }
            );
        }
    }

    if !report.critical_paths.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "=== Critical Paths (Top {}) ===",
            report.critical_paths.len()
        );
        for (i, path) in report.critical_paths.iter().enumerate() {
            write_path(&mut out, i + 1, path);
        }
    }

    let _ = writeln!(out);
    if let Some(worst) = report.worst_slack {
        let _ = writeln!(out, "Worst slack: {worst:.3}");
    }
    if report.met {
        let _ = writeln!(out, "TIMING MET");
    } else {
        let _ = writeln!(out, "Violations: {}", report.violations.join(" "));
        let _ = writeln!(
            out,
            "TIMING VIOLATED ({} vertices)",
            report.violations.len()
        );
    }
    out
}

fn write_path(out: &mut String, index: usize, path: &CriticalPath) {
    let status = if path.slack < 0.0 { "VIOLATED" } else { "MET" };
    let _ = writeln!(
        out,
        "Path {index}: {} -> {}  slack {:.3} ({status})",
        path.startpoint, path.endpoint, path.slack
    );
    let _ = writeln!(
        out,
        "    arrival {:.3}, required {:.3}",
        path.arrival, path.required
    );
    let width = column_width(path.elements.iter().map(|e| e.vertex.as_str()), "");
    for element in &path.elements {
        let pin = if element.pin.is_empty() {
            String::new()
        } else {
            format!("/{}", element.pin)
        };
        let _ = writeln!(
            out,
            "      {:<width$}  {:<12}  +{:.3}  @ {:.3}",
            element.vertex,
            format!("{}{pin}", element.cell_type),
            element.delay,
            element.arrival
        );
    }
}

fn column_width<'a>(values: impl Iterator<Item = &'a str>, header: &str) -> usize {
    values.map(str::len).max().unwrap_or(0).max(header.len())
}

/// Renders the report as pretty-printed JSON.
pub fn render_json(report: &TimingReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempo_timing::{PathElement, VertexReport};

    fn report(met: bool) -> TimingReport {
        let slack = if met { 8.0 } else { -1.0 };
        let mut report = TimingReport::empty(10.0);
        report.sources = vec!["IN".into()];
        report.sinks = vec!["OUT".into()];
        for name in ["IN", "OUT"] {
            report.vertices.push(VertexReport {
                name: name.into(),
                cell_type: "PORT".into(),
                arrival: 0.0,
                required: slack,
                slack,
            });
        }
        report.worst_slack = Some(slack);
        report.met = met;
        if !met {
            report.violations = vec!["IN".into(), "OUT".into()];
        }
        report.critical_paths.push(CriticalPath {
            startpoint: "IN".into(),
            endpoint: "OUT".into(),
            arrival: 2.0,
            required: 10.0,
            slack,
            elements: vec![
                PathElement {
                    vertex: "IN".into(),
                    cell_type: "PORT".into(),
                    pin: String::new(),
                    delay: 0.0,
                    arrival: 0.0,
                },
                PathElement {
                    vertex: "OUT".into(),
                    cell_type: "INV".into(),
                    pin: "A".into(),
                    delay: 2.0,
                    arrival: 2.0,
                },
            ],
        });
        report
    }

    #[test]
    fn met_report() {
        let text = render_text(&report(true), "adder", false);
        assert!(text.starts_with("Timing report for `adder`\nClock period: 10\n"));
        assert!(text.contains("Sources: IN\n"));
        assert!(text.contains("Path 1: IN -> OUT  slack 8.000 (MET)"));
        assert!(text.contains("INV/A"));
        assert!(!text.contains("=== Vertex Timing ==="));
        assert!(text.ends_with("Worst slack: 8.000\nTIMING MET\n"));
    }

    #[test]
    fn violated_report_with_vertices() {
        let text = render_text(&report(false), "adder", true);
        assert!(text.contains("=== Vertex Timing ==="));
        assert!(text.contains("(VIOLATED)"));
        assert!(text.contains("Violations: IN OUT\n"));
        assert!(text.ends_with("TIMING VIOLATED (2 vertices)\n"));
    }

    #[test]
    fn json_is_the_serialized_report() {
        let json = render_json(&report(true)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["met"], true);
        assert_eq!(value["critical_paths"][0]["elements"][1]["pin"], "A");
    }
}
