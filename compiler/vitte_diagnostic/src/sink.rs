//! Diagnostic sinks.

use crate::Diagnostic;

/// Receiver of diagnostics, called synchronously where a problem is found.
pub trait DiagnosticSink {
    fn emit(&mut self, diag: Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn emit(&mut self, diag: Diagnostic) {
        self.push(diag);
    }
}

/// Render one diagnostic as
/// `[stage:severity] file=F span=[s..e] line=L col=C: message`.
pub fn format_line(stage: &str, diag: &Diagnostic) -> String {
    let mut line = format!(
        "[{stage}:{}] {}: {}",
        diag.severity, diag.span, diag.message
    );
    for note in &diag.notes {
        line.push_str("\n  note: ");
        line.push_str(note);
    }
    line
}

/// Prints every diagnostic to stderr as it arrives.
#[derive(Clone, Debug)]
pub struct StderrSink {
    stage: &'static str,
    errors: usize,
}

impl StderrSink {
    pub fn new(stage: &'static str) -> Self {
        StderrSink { stage, errors: 0 }
    }

    /// Switch the stage tag printed in front of later diagnostics.
    pub fn set_stage(&mut self, stage: &'static str) {
        self.stage = stage;
    }

    pub fn error_count(&self) -> usize {
        self.errors
    }
}

impl DiagnosticSink for StderrSink {
    fn emit(&mut self, diag: Diagnostic) {
        if diag.is_error() {
            self.errors += 1;
        }
        eprintln!("{}", format_line(self.stage, &diag));
    }
}
