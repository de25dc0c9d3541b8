//! Collecting sink with error accounting.
//!
//! The pipeline gives every stage the same queue, marking the stage
//! boundary with [`DiagnosticQueue::begin_stage`] so it can tell which
//! stage produced which diagnostic and whether that stage failed.

use crate::{Diagnostic, DiagnosticSink, Severity};

/// A diagnostic together with the stage that emitted it.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct StagedDiagnostic {
    pub stage: &'static str,
    pub diagnostic: Diagnostic,
}

/// Queue for collecting diagnostics across stages.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct DiagnosticQueue {
    diagnostics: Vec<StagedDiagnostic>,
    stage: &'static str,
    error_count: usize,
    warning_count: usize,
    /// Error count when the current stage began.
    stage_start_errors: usize,
}

impl DiagnosticQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tag subsequent diagnostics with `stage`.
    pub fn begin_stage(&mut self, stage: &'static str) {
        self.stage = stage;
        self.stage_start_errors = self.error_count;
    }

    /// Errors emitted since the last [`begin_stage`](Self::begin_stage).
    pub fn stage_errors(&self) -> usize {
        self.error_count - self.stage_start_errors
    }

    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }

    pub fn warning_count(&self) -> usize {
        self.warning_count
    }

    /// Consume the queue, keeping emission order and stage tags.
    pub fn into_staged(self) -> Vec<StagedDiagnostic> {
        self.diagnostics
    }
}

impl DiagnosticSink for DiagnosticQueue {
    fn emit(&mut self, diag: Diagnostic) {
        match diag.severity {
            Severity::Error => self.error_count += 1,
            Severity::Warning => self.warning_count += 1,
            Severity::Info => {}
        }
        self.diagnostics.push(StagedDiagnostic {
            stage: self.stage,
            diagnostic: diag,
        });
    }
}

#[cfg(test)]
mod tests;
