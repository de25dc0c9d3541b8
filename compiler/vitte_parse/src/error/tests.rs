use pretty_assertions::assert_eq;
use vitte_diagnostic::Severity;
use vitte_ir::FileId;

use super::*;

fn span() -> Span {
    Span::new(FileId(0), 3, 4, 1, 4)
}

#[test]
fn test_expected_identifier_uses_identifier_code() {
    let err = ParseError::expected(TokenKind::Ident, TokenKind::Int, span());
    assert_eq!(err.code, ErrorCode::E1003);
    assert_eq!(err.message, "expected identifier, found integer");

    let err = ParseError::expected(TokenKind::RParen, TokenKind::Eof, span());
    assert_eq!(err.code, ErrorCode::E1001);
    assert_eq!(err.message, "expected ')', found end of file");
}

#[test]
fn test_to_diagnostic_carries_context_as_note() {
    let err = ParseError::new(ErrorCode::E1002, "expected expression", span())
        .with_context(Some("a let statement"));
    let diag = err.to_diagnostic();
    assert_eq!(diag.severity, Severity::Error);
    assert_eq!(diag.span, span());
    assert_eq!(diag.notes, vec!["while parsing a let statement".to_string()]);
}

#[test]
fn test_to_warning() {
    let err = ParseError::new(ErrorCode::E0003, "invalid UTF-8 in literal", span());
    assert_eq!(err.to_warning().severity, Severity::Warning);
}

#[test]
fn test_display() {
    let err = ParseError::new(ErrorCode::E1001, "unexpected token", span());
    assert_eq!(
        err.to_string(),
        "[E1001] unexpected token at file=0 span=[3..4] line=1 col=4"
    );
}
