//! Structured diagnostics for the Tempo timing analyzer.
//!
//! Readers and the timing engine report problems with their inputs as
//! [`Diagnostic`]s carrying a severity, a short code (`E101`, `W101`, `T001`),
//! a message and an optional [`Span`] into one of the files held by a
//! [`SourceMap`]. Diagnostics are collected in a thread-safe
//! [`DiagnosticSink`] and rendered with a [`DiagnosticRenderer`].

#![warn(missing_docs)]

pub mod code;
pub mod diagnostic;
pub mod renderer;
pub mod severity;
pub mod sink;
pub mod source;

pub use code::{Category, DiagnosticCode};
pub use diagnostic::Diagnostic;
pub use renderer::{DiagnosticRenderer, TerminalRenderer};
pub use severity::Severity;
pub use sink::DiagnosticSink;
pub use source::{FileId, Location, SourceFile, SourceMap, Span};
