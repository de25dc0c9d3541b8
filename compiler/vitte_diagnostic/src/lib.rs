//! Diagnostic reporting for every Vitte compiler stage.
//!
//! Stages never print. They build a [`Diagnostic`] at the point of
//! detection and hand it to a [`DiagnosticSink`]; the caller decides
//! whether to collect ([`DiagnosticQueue`]) or print ([`StderrSink`]).
//!
//! Only [`Severity::Error`] counts toward a stage failing.

mod diagnostic;
mod error_code;
pub mod queue;
mod sink;

pub use diagnostic::{Diagnostic, Label, Severity};
pub use error_code::ErrorCode;
pub use queue::DiagnosticQueue;
pub use sink::{format_line, DiagnosticSink, StderrSink};
