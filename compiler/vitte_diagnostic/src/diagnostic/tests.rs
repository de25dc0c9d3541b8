use pretty_assertions::assert_eq;
use vitte_ir::FileId;

use super::*;

#[test]
fn test_builder_sets_every_field() {
    let span = Span::new(FileId(2), 4, 9, 1, 5);
    let prev = Span::new(FileId(2), 0, 3, 1, 1);
    let diag = Diagnostic::error(ErrorCode::E2006)
        .with_message("duplicate definition of `x`")
        .with_span(span)
        .with_label(prev, "first defined here")
        .with_note("names must be unique within a scope");

    assert_eq!(diag.severity, Severity::Error);
    assert_eq!(diag.code, ErrorCode::E2006);
    assert_eq!(diag.span, span);
    assert_eq!(diag.labels.len(), 1);
    assert_eq!(diag.labels[0].span, prev);
    assert_eq!(diag.notes, vec!["names must be unique within a scope"]);
    assert!(diag.is_error());
}

#[test]
fn test_warning_is_not_error() {
    let diag = Diagnostic::warning(ErrorCode::W2001).with_message("equality");
    assert!(diag.is_warning());
    assert!(!diag.is_error());
}

#[test]
fn test_severity_ordering() {
    assert!(Severity::Info < Severity::Warning);
    assert!(Severity::Warning < Severity::Error);
}

#[test]
fn test_display() {
    let diag = Diagnostic::error(ErrorCode::E1002).with_message("expected expression");
    assert_eq!(diag.to_string(), "error[E1002]: expected expression");
}
