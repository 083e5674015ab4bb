//! Whitespace tokenizer shared by the input readers.
//!
//! All three input formats are flat streams of whitespace-separated words.
//! A `#` starts a comment that runs to the end of the line. Every token keeps
//! its byte span and line index so readers can point diagnostics at it.

use tempo_diagnostics::{Category, Diagnostic, DiagnosticCode, DiagnosticSink, FileId, Span};

/// Unexpected end of input.
pub const UNEXPECTED_EOF: u16 = 101;
/// A count was not a non-negative integer.
pub const INVALID_COUNT: u16 = 102;
/// A delay or period was not a finite number.
pub const INVALID_NUMBER: u16 = 103;
/// A pin reference has no instance name.
pub const MALFORMED_REF: u16 = 104;
/// More than one clock definition.
pub const EXTRA_CLOCK: u16 = 101;
/// Input left over after the last expected token.
pub const TRAILING_INPUT: u16 = 102;

/// A single word of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    /// The word itself.
    pub text: &'a str,
    /// Byte range in the source file.
    pub span: Span,
    /// Zero-based line index.
    pub line: u32,
}

/// Splits `source` into tokens, dropping comments.
pub fn tokenize(source: &str, file: FileId) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut line_start = 0usize;
    for (line, raw) in source.split('\n').enumerate() {
        let code = raw.split('#').next().unwrap_or("");
        let mut rest = code;
        let mut offset = line_start;
        while let Some(begin) = rest.find(|c: char| !c.is_whitespace()) {
            let word = &rest[begin..];
            let len = word.find(char::is_whitespace).unwrap_or(word.len());
            let start = offset + begin;
            tokens.push(Token {
                text: &word[..len],
                span: Span::new(file, start as u32, (start + len) as u32),
                line: line as u32,
            });
            rest = &word[len..];
            offset = start + len;
        }
        line_start += raw.len() + 1;
    }
    tokens
}

/// Builds an `E1xx` error.
pub fn error(number: u16, message: impl Into<String>, span: Span) -> Diagnostic {
    Diagnostic::error(DiagnosticCode::new(Category::Error, number), message, span)
}

/// Builds a `W1xx` warning.
pub fn warning(number: u16, message: impl Into<String>, span: Span) -> Diagnostic {
    Diagnostic::warning(DiagnosticCode::new(Category::Warning, number), message, span)
}

/// Cursor over a token list with diagnostic-reporting accessors.
///
/// Each `expect_*` method emits one error and returns `None` on failure;
/// readers stop at the first `None`.
pub struct TokenStream<'a> {
    tokens: Vec<Token<'a>>,
    pos: usize,
    eof: Span,
}

impl<'a> TokenStream<'a> {
    /// Tokenizes `source`.
    pub fn new(source: &'a str, file: FileId) -> Self {
        let end = source.len() as u32;
        Self {
            tokens: tokenize(source, file),
            pos: 0,
            eof: Span::new(file, end, end),
        }
    }

    /// Consumes the next token.
    pub fn bump(&mut self) -> Option<Token<'a>> {
        let token = self.tokens.get(self.pos).copied();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    /// Returns `true` when every token has been consumed.
    pub fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Consumes the next token, or reports that `what` was expected.
    pub fn expect(&mut self, what: &str, sink: &DiagnosticSink) -> Option<Token<'a>> {
        let token = self.bump();
        if token.is_none() {
            sink.emit(error(
                UNEXPECTED_EOF,
                format!("unexpected end of input, expected {what}"),
                self.eof,
            ));
        }
        token
    }

    /// Consumes a non-negative integer.
    pub fn expect_count(&mut self, what: &str, sink: &DiagnosticSink) -> Option<usize> {
        let token = self.expect(what, sink)?;
        match token.text.parse::<usize>() {
            Ok(n) => Some(n),
            Err(_) => {
                sink.emit(
                    error(
                        INVALID_COUNT,
                        format!("expected {what}, found `{}`", token.text),
                        token.span,
                    )
                    .with_help("counts are non-negative integers"),
                );
                None
            }
        }
    }

    /// Consumes a finite number.
    pub fn expect_number(&mut self, what: &str, sink: &DiagnosticSink) -> Option<f64> {
        let token = self.expect(what, sink)?;
        parse_number(token, what, sink)
    }

    /// Warns about anything left after the last expected token.
    pub fn finish(self, sink: &DiagnosticSink) {
        if let Some(first) = self.tokens.get(self.pos) {
            let left = self.tokens.len() - self.pos;
            sink.emit(warning(
                TRAILING_INPUT,
                format!("{left} trailing token(s) ignored"),
                first.span,
            ));
        }
    }
}

/// Parses `token` as a finite number, reporting failures.
pub fn parse_number(token: Token<'_>, what: &str, sink: &DiagnosticSink) -> Option<f64> {
    match token.text.parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value),
        _ => {
            sink.emit(error(
                INVALID_NUMBER,
                format!("invalid {what} `{}`", token.text),
                token.span,
            ));
            None
        }
    }
}
