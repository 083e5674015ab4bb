//! Readers for the analyzer's three input files.
//!
//! - [`parse_clock`]: the clock definition (`clock 10`)
//! - [`parse_library`]: cell pin-to-pin delay tables
//! - [`parse_netlist`]: gate instances and their connections
//!
//! Every reader takes the file text and its [`FileId`](tempo_diagnostics::FileId),
//! reports malformed input to a [`DiagnosticSink`](tempo_diagnostics::DiagnosticSink)
//! as `E1xx` errors (or `W1xx` warnings) with source spans, and returns what
//! it could read. Callers check the sink for errors before using the result.

#![warn(missing_docs)]

pub mod clock;
pub mod lexer;
pub mod library;
pub mod netlist;

pub use clock::parse_clock;
pub use library::parse_library;
pub use netlist::{parse_netlist, split_ref, Netlist};
