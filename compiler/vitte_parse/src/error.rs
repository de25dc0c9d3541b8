//! Parse error type.

use std::fmt;

use vitte_diagnostic::{Diagnostic, ErrorCode};
use vitte_ir::{Span, TokenKind};

/// One syntax (or lexical) problem found while parsing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    pub code: ErrorCode,
    pub message: String,
    pub span: Span,
    /// What was being parsed, e.g. "a function declaration".
    pub context: Option<&'static str>,
}

impl ParseError {
    #[cold]
    pub fn new(code: ErrorCode, message: impl Into<String>, span: Span) -> Self {
        ParseError {
            code,
            message: message.into(),
            span,
            context: None,
        }
    }

    #[cold]
    pub fn expected(expected: TokenKind, found: TokenKind, span: Span) -> Self {
        let code = if expected == TokenKind::Ident {
            ErrorCode::E1003
        } else {
            ErrorCode::E1001
        };
        ParseError::new(
            code,
            format!("expected {}, found {}", expected.display_name(), found.display_name()),
            span,
        )
    }

    #[must_use]
    pub fn with_context(mut self, context: Option<&'static str>) -> Self {
        self.context = context;
        self
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.code)
            .with_message(&self.message)
            .with_span(self.span);
        match self.context {
            Some(ctx) => diag.with_note(format!("while parsing {ctx}")),
            None => diag,
        }
    }

    /// Warning-severity rendering, used for non-fatal lexical findings.
    pub fn to_warning(&self) -> Diagnostic {
        Diagnostic::warning(self.code)
            .with_message(&self.message)
            .with_span(self.span)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} at {}", self.code, self.message, self.span)
    }
}

impl std::error::Error for ParseError {}

#[cfg(test)]
mod tests;
