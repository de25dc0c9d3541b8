use super::*;
use crate::FileId;
use pretty_assertions::assert_eq;

#[test]
fn test_kind_count_fits_token_set() {
    assert!(TokenKind::COUNT <= 128);
    assert_eq!(TokenKind::Eof.index(), 0);
}

#[test]
fn test_keyword_classification() {
    assert!(TokenKind::Mod.is_keyword());
    assert!(TokenKind::Null.is_keyword());
    assert!(!TokenKind::Ident.is_keyword());
    assert!(!TokenKind::Dot.is_keyword());

    assert!(TokenKind::Pipeline.is_entry_keyword());
    assert!(TokenKind::Fn.is_toplevel_keyword());
    assert!(!TokenKind::Let.is_toplevel_keyword());
    assert!(TokenKind::Ret.starts_statement());
    assert!(!TokenKind::Fn.starts_statement());
}

#[test]
fn test_error_token_carries_message() {
    let span = Span::new(FileId(0), 0, 1, 1, 1);
    let tok = Token::error(span, b"@", "unexpected character");
    assert_eq!(tok.kind, TokenKind::Error);
    assert_eq!(tok.error_message(), Some("unexpected character"));
    assert_eq!(Token::new(TokenKind::Ident, span, b"x").error_message(), None);
}

#[test]
fn test_flags_accumulate() {
    let span = Span::new(FileId(0), 0, 4, 1, 1);
    let tok = Token::new(TokenKind::String, span, b"\"\xff\"")
        .with_flags(TokenFlags::INVALID_UTF8)
        .with_flags(TokenFlags::UNTERMINATED);
    assert!(tok.flags.contains(TokenFlags::INVALID_UTF8 | TokenFlags::UNTERMINATED));
    assert_eq!(tok.text_str(), "\"\u{fffd}\"");
}

#[test]
fn test_display_names() {
    assert_eq!(TokenKind::DotEnd.to_string(), "'.end'");
    assert_eq!(TokenKind::Ident.to_string(), "identifier");
    assert_eq!(TokenKind::Scn.to_string(), "scn");
}
