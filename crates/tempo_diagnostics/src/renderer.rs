//! Rendering of diagnostics for the terminal.

use crate::diagnostic::Diagnostic;
use crate::severity::Severity;
use crate::source::SourceMap;

/// Formats a diagnostic as a string.
pub trait DiagnosticRenderer {
    /// Renders `diag`, resolving its span through `sources`.
    fn render(&self, diag: &Diagnostic, sources: &SourceMap) -> String;
}

/// rustc-style terminal output:
///
/// ```text
/// error[E103]: invalid arc delay `fast`
///  --> lib/tsmc65.fakelib:3:5
///   |
/// 3 | A Y fast
///   |     ^^^^
/// ```
pub struct TerminalRenderer {
    /// Whether to emit ANSI colors.
    pub color: bool,
}

impl TerminalRenderer {
    /// Creates a renderer.
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn paint(&self, text: &str, ansi: &str) -> String {
        if self.color {
            format!("\x1b[{ansi}m{text}\x1b[0m")
        } else {
            text.to_string()
        }
    }
}

impl DiagnosticRenderer for TerminalRenderer {
    fn render(&self, diag: &Diagnostic, sources: &SourceMap) -> String {
        let color = match diag.severity {
            Severity::Error => "1;31",
            Severity::Warning => "1;33",
            Severity::Note => "1;36",
        };
        let header = format!("{}[{}]", diag.severity, diag.code);
        let mut out = format!("{}: {}\n", self.paint(&header, color), diag.message);

        if let (Some(loc), Some(file)) = (sources.locate(diag.span), sources.get(diag.span.file)) {
            let line_num = loc.line.to_string();
            let gutter = " ".repeat(line_num.len());
            out.push_str(&format!("{gutter}--> {loc}\n"));
            out.push_str(&format!("{gutter} |\n"));
            out.push_str(&format!(
                "{line_num} | {}\n",
                file.line_text(diag.span.start)
            ));
            let pad = " ".repeat(loc.col as usize - 1);
            let carets = "^".repeat(diag.span.len().max(1) as usize);
            out.push_str(&format!("{gutter} | {pad}{}\n", self.paint(&carets, color)));
        }

        for note in &diag.notes {
            out.push_str(&format!("   = note: {note}\n"));
        }
        for help in &diag.help {
            out.push_str(&format!("   = help: {help}\n"));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::{Category, DiagnosticCode};
    use crate::source::Span;

    #[test]
    fn renders_location_and_carets() {
        let mut sources = SourceMap::new();
        let file = sources.add_source("tsmc65.fakelib", "1\nINV 1\nA Y fast\n".to_string());
        let diag = Diagnostic::error(
            DiagnosticCode::new(Category::Error, 103),
            "invalid arc delay `fast`",
            Span::new(file, 12, 16),
        )
        .with_help("use a number or `INF`");

        let out = TerminalRenderer::new(false).render(&diag, &sources);
        assert!(out.starts_with("error[E103]: invalid arc delay `fast`\n"));
        assert!(out.contains("--> tsmc65.fakelib:3:5"));
        assert!(out.contains("3 | A Y fast"));
        assert!(out.contains("  |     ^^^^"));
        assert!(out.contains("= help: use a number or `INF`"));
    }

    #[test]
    fn dummy_span_has_no_location() {
        let sources = SourceMap::new();
        let diag = Diagnostic::warning(
            DiagnosticCode::new(Category::Timing, 1),
            "timing not met",
            Span::DUMMY,
        )
        .with_note("worst slack -1.000");
        let out = TerminalRenderer::new(false).render(&diag, &sources);
        assert!(out.starts_with("warning[T001]: timing not met"));
        assert!(!out.contains("-->"));
        assert!(out.contains("= note: worst slack -1.000"));
    }

    #[test]
    fn color_wraps_header() {
        let sources = SourceMap::new();
        let diag = Diagnostic::error(
            DiagnosticCode::new(Category::Error, 210),
            "combinational loop",
            Span::DUMMY,
        );
        let out = TerminalRenderer::new(true).render(&diag, &sources);
        assert!(out.starts_with("\x1b[1;31merror[E210]\x1b[0m"));
    }
}
