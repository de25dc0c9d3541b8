use pretty_assertions::assert_eq;
use vitte_ir::{FileId, Span};

use super::*;
use crate::ErrorCode;

fn at(start: u32) -> Span {
    Span::new(FileId(0), start, start + 1, 1, start + 1)
}

#[test]
fn test_counts_by_severity() {
    let mut queue = DiagnosticQueue::new();
    queue.emit(Diagnostic::error(ErrorCode::E2001).with_span(at(0)));
    queue.emit(Diagnostic::warning(ErrorCode::W2001).with_span(at(1)));
    queue.emit(Diagnostic::info(ErrorCode::E2001).with_span(at(2)));

    assert!(queue.has_errors());
    assert_eq!(queue.error_count(), 1);
    assert_eq!(queue.warning_count(), 1);
    assert_eq!(queue.into_staged().len(), 3);
}

#[test]
fn test_warnings_alone_are_not_errors() {
    let mut queue = DiagnosticQueue::new();
    queue.emit(Diagnostic::warning(ErrorCode::W2001));
    assert!(!queue.has_errors());
}

#[test]
fn test_stage_accounting() {
    let mut queue = DiagnosticQueue::new();
    queue.begin_stage("parse");
    queue.emit(Diagnostic::error(ErrorCode::E1001));
    assert_eq!(queue.stage_errors(), 1);

    queue.begin_stage("resolve");
    assert_eq!(queue.stage_errors(), 0);
    queue.emit(Diagnostic::error(ErrorCode::E2003));
    queue.emit(Diagnostic::error(ErrorCode::E2006));
    assert_eq!(queue.stage_errors(), 2);
    assert_eq!(queue.error_count(), 3);

    let stages: Vec<_> = queue.into_staged().iter().map(|d| d.stage).collect();
    assert_eq!(stages, vec!["parse", "resolve", "resolve"]);
}

#[test]
fn test_into_staged_keeps_emission_order() {
    let mut queue = DiagnosticQueue::new();
    queue.begin_stage("typeck");
    queue.emit(Diagnostic::error(ErrorCode::E2001).with_message("late").with_span(at(9)));
    queue.emit(Diagnostic::error(ErrorCode::E2001).with_message("early").with_span(at(2)));

    let staged = queue.into_staged();
    let messages: Vec<_> = staged.iter().map(|d| d.diagnostic.message.as_str()).collect();
    assert_eq!(messages, vec!["late", "early"]);
    assert!(staged.iter().all(|d| d.stage == "typeck"));
}
