#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;
use vitte_ir::{FileId, TokenFlags, TokenKind};

use super::*;

fn kinds(src: &str) -> Vec<TokenKind> {
    let mut lexer = Lexer::new(src.as_bytes(), FileId(0));
    let mut out = Vec::new();
    loop {
        let tok = lexer.next();
        if tok.kind == TokenKind::Eof {
            return out;
        }
        out.push(tok.kind);
    }
}

#[test]
fn test_function_header() {
    use TokenKind::*;
    assert_eq!(
        kinds("fn add(a, b) -> int { ret a + b }"),
        vec![
            Fn, Ident, LParen, Ident, Comma, Ident, RParen, Arrow, Ident, LBrace, Ret, Ident,
            Plus, Ident, RBrace
        ]
    );
}

#[test]
fn test_maximal_munch_operators() {
    use TokenKind::*;
    assert_eq!(
        kinds("<<= >>= << >> <= >= == => != && || :: -> += -= *= /= %= &= |= ^= ?"),
        vec![
            ShlEq, ShrEq, Shl, Shr, LtEq, GtEq, EqEq, FatArrow, BangEq, AmpAmp, PipePipe,
            ColonColon, Arrow, PlusEq, MinusEq, StarEq, SlashEq, PercentEq, AmpEq, PipeEq,
            CaretEq, Question
        ]
    );
}

#[test]
fn test_dot_end() {
    use TokenKind::*;
    assert_eq!(kinds("say x .end"), vec![Say, Ident, DotEnd]);
    assert_eq!(kinds(".end"), vec![DotEnd]);
    assert_eq!(kinds(".end;"), vec![DotEnd, Semi]);
    // `.ending` is a member access, not a terminator.
    assert_eq!(kinds("a.ending"), vec![Ident, Dot, Ident]);
    assert_eq!(kinds("a.b"), vec![Ident, Dot, Ident]);
}

#[test]
fn test_numbers() {
    use TokenKind::*;
    assert_eq!(
        kinds("0x2A 0b1010 0o755 1_000 3.14 1e10 2E-3 7e"),
        vec![Int, Int, Int, Int, Float, Float, Float, Int, Ident]
    );
    // A dot not followed by a digit is a member access.
    assert_eq!(kinds("1.x"), vec![Int, Dot, Ident]);
}

#[test]
fn test_in_is_an_identifier() {
    assert_eq!(
        kinds("for x in xs"),
        vec![TokenKind::For, TokenKind::Ident, TokenKind::Ident, TokenKind::Ident]
    );
}

#[test]
fn test_comments_are_skipped() {
    use TokenKind::*;
    assert_eq!(
        kinds("a # one\nb // two\nc /* three\n four */ d"),
        vec![Ident, Ident, Ident, Ident]
    );
}

#[test]
fn test_unterminated_block_comment_reaches_eof() {
    assert_eq!(kinds("a /* never closed"), vec![TokenKind::Ident]);
}

#[test]
fn test_string_with_escape() {
    let mut lexer = Lexer::new(br#""a\"b" 'c'"#, FileId(0));
    let s = lexer.next();
    assert_eq!(s.kind, TokenKind::String);
    assert_eq!(s.text, br#""a\"b""#);
    let c = lexer.next();
    assert_eq!(c.kind, TokenKind::Char);
    assert_eq!(c.text, b"'c'");
}

#[test]
fn test_unterminated_string_at_newline() {
    let mut lexer = Lexer::new(b"\"abc\nx", FileId(0));
    let tok = lexer.next();
    assert_eq!(tok.kind, TokenKind::Error);
    assert_eq!(tok.error_message(), Some("unterminated string literal"));
    assert!(tok.flags.contains(TokenFlags::UNTERMINATED));
    assert_eq!(tok.text, b"\"abc");
    // Lexing continues on the next line.
    let next = lexer.next();
    assert_eq!(next.kind, TokenKind::Ident);
    assert_eq!(next.span.line, 2);
    assert_eq!(lexer.first_error().unwrap().message, "unterminated string literal");
}

#[test]
fn test_unterminated_char_at_eof() {
    let mut lexer = Lexer::new(b"'a", FileId(0));
    let tok = lexer.next();
    assert_eq!(tok.error_message(), Some("unterminated char literal"));
    assert_eq!(lexer.next().kind, TokenKind::Eof);
}

#[test]
fn test_invalid_utf8_in_literal_is_flagged_not_fatal() {
    let mut lexer = Lexer::new(b"\"a\xFFb\"", FileId(0));
    let tok = lexer.next();
    assert_eq!(tok.kind, TokenKind::String);
    assert!(tok.flags.contains(TokenFlags::INVALID_UTF8));
    assert!(lexer.first_error().is_none());
}

#[test]
fn test_unexpected_character_covers_one_utf8_char() {
    let mut lexer = Lexer::new("é@x".as_bytes(), FileId(0));
    let first = lexer.next();
    assert_eq!(first.kind, TokenKind::Error);
    assert_eq!(first.span.len(), 2);
    let second = lexer.next();
    assert_eq!(second.kind, TokenKind::Error);
    assert_eq!(second.span.len(), 1);
    assert_eq!(lexer.next().kind, TokenKind::Ident);
    let err = lexer.first_error().unwrap();
    assert_eq!(err.message, "unexpected character");
    assert_eq!(err.span.start, 0);
}

#[test]
fn test_line_and_column() {
    let mut lexer = Lexer::new(b"let x\n  = 1", FileId(3));
    let spans: Vec<_> = (0..4)
        .map(|_| {
            let t = lexer.next();
            (t.span.line, t.span.col)
        })
        .collect();
    assert_eq!(spans, vec![(1, 1), (1, 5), (2, 3), (2, 5)]);
}

#[test]
fn test_peek_is_cached_and_consume_is_conditional() {
    let mut lexer = Lexer::new(b"let x", FileId(0));
    assert_eq!(lexer.peek().kind, TokenKind::Let);
    assert_eq!(lexer.peek().kind, TokenKind::Let);
    assert!(!lexer.consume(TokenKind::Ident));
    assert!(lexer.consume(TokenKind::Let));
    assert_eq!(lexer.next().kind, TokenKind::Ident);
}

#[test]
fn test_eof_is_sticky() {
    let mut lexer = Lexer::new(b"", FileId(0));
    for _ in 0..3 {
        assert_eq!(lexer.next().kind, TokenKind::Eof);
    }
}

#[test]
fn test_trivia_mode_emits_whitespace_and_comments() {
    use TokenKind::*;
    let mut lexer = Lexer::with_config(
        b"a # c\n b",
        FileId(0),
        LexerConfig { trivia: true },
    );
    let mut got = Vec::new();
    loop {
        let t = lexer.next();
        if t.kind == Eof {
            break;
        }
        got.push(t.kind);
    }
    assert_eq!(got, vec![Ident, Whitespace, Comment, Whitespace, Ident]);
}
