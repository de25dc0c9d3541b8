//! Keyword table.
//!
//! Lookup buckets by length first, then compares the exact bytes. `in` is
//! deliberately absent: the `for` parser accepts it as an identifier.

use vitte_ir::TokenKind;

/// Keyword kind for an identifier's bytes, if any.
#[inline]
pub(crate) fn lookup(text: &[u8]) -> Option<TokenKind> {
    match text.len() {
        2 => match text {
            b"as" => Some(TokenKind::As),
            b"do" => Some(TokenKind::Do),
            b"fn" => Some(TokenKind::Fn),
            b"if" => Some(TokenKind::If),
            _ => None,
        },
        3 => match text {
            b"for" => Some(TokenKind::For),
            b"let" => Some(TokenKind::Let),
            b"mod" => Some(TokenKind::Mod),
            b"ret" => Some(TokenKind::Ret),
            b"say" => Some(TokenKind::Say),
            b"scn" => Some(TokenKind::Scn),
            b"set" => Some(TokenKind::Set),
            b"use" => Some(TokenKind::Use),
            _ => None,
        },
        4 => match text {
            b"elif" => Some(TokenKind::Elif),
            b"else" => Some(TokenKind::Else),
            b"enum" => Some(TokenKind::Enum),
            b"from" => Some(TokenKind::From),
            b"loop" => Some(TokenKind::Loop),
            b"null" => Some(TokenKind::Null),
            b"prog" => Some(TokenKind::Prog),
            b"tool" => Some(TokenKind::Tool),
            b"true" => Some(TokenKind::True),
            b"type" => Some(TokenKind::Type),
            b"when" => Some(TokenKind::When),
            _ => None,
        },
        5 => match text {
            b"break" => Some(TokenKind::Break),
            b"const" => Some(TokenKind::Const),
            b"false" => Some(TokenKind::False),
            b"match" => Some(TokenKind::Match),
            b"union" => Some(TokenKind::Union),
            b"while" => Some(TokenKind::While),
            _ => None,
        },
        6 => match text {
            b"driver" => Some(TokenKind::Driver),
            b"export" => Some(TokenKind::Export),
            b"kernel" => Some(TokenKind::Kernel),
            b"return" => Some(TokenKind::Return),
            b"struct" => Some(TokenKind::Struct),
            _ => None,
        },
        7 => match text {
            b"program" => Some(TokenKind::Program),
            b"service" => Some(TokenKind::Service),
            _ => None,
        },
        8 => match text {
            b"continue" => Some(TokenKind::Continue),
            b"pipeline" => Some(TokenKind::Pipeline),
            _ => None,
        },
        _ => None,
    }
}
