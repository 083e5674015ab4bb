//! Clock definition reader.
//!
//! A clock definition is `<keyword> <period>`, for example `clock 10`. The
//! keyword is free-form and the two tokens may sit on separate lines.
//! Analysis is single-clock: the first definition is used, and each later
//! line that starts a definition is reported and ignored.

use crate::lexer::{self, tokenize, Token};
use tempo_diagnostics::{Diagnostic, DiagnosticSink, FileId, Span};

/// Reads the clock period from a clock file.
///
/// Returns `None` after reporting an error if there is no definition or its
/// period is missing or not a finite number.
pub fn parse_clock(source: &str, file: FileId, sink: &DiagnosticSink) -> Option<f64> {
    let tokens = tokenize(source, file);

    let Some(&keyword) = tokens.first() else {
        sink.emit(
            lexer::error(
                lexer::UNEXPECTED_EOF,
                "no clock definition found",
                Span::new(file, 0, 0),
            )
            .with_help("add a line such as `clock 10`"),
        );
        return None;
    };
    let Some(&period_token) = tokens.get(1) else {
        sink.emit(missing_period(keyword));
        return None;
    };
    let period = lexer::parse_number(period_token, "clock period", sink)?;

    let rest = &tokens[2..];
    let trailing = rest
        .iter()
        .take_while(|t| t.line == period_token.line)
        .count();
    if let Some(extra) = rest.first().filter(|_| trailing > 0) {
        sink.emit(lexer::warning(
            lexer::TRAILING_INPUT,
            "unexpected tokens after clock period",
            extra.span,
        ));
    }
    for line in rest[trailing..].chunk_by(|a, b| a.line == b.line) {
        sink.emit(
            lexer::warning(
                lexer::EXTRA_CLOCK,
                format!("additional clock definition `{}` ignored", line[0].text),
                line[0].span,
            )
            .with_note("only single-clock analysis is supported; the first definition is used"),
        );
    }

    log::debug!("clock `{}` period {period}", keyword.text);
    Some(period)
}

fn missing_period(keyword: Token<'_>) -> Diagnostic {
    lexer::error(
        lexer::UNEXPECTED_EOF,
        format!("clock definition `{}` has no period", keyword.text),
        keyword.span,
    )
    .with_help("write the period after the clock name, e.g. `clock 10`")
}
