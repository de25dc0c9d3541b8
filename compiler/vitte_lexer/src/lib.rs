//! Lexer for Vitte source.
//!
//! Input is raw bytes and may be invalid UTF-8; tokens borrow their text
//! from it. The parser pulls tokens one at a time through
//! [`Lexer::next`] / [`Lexer::peek`]. [`lex`] and [`lex_with_trivia`]
//! collect a whole file for tests and tools.
//!
//! Comment styles are compile-time features, all on by default:
//! `hash-comments` (`# ...`), `line-comments` (`// ...`) and
//! `block-comments` (`/* ... */`).

mod cursor;
mod keywords;
mod lexer;

use tracing::debug;
use vitte_ir::{FileId, Token, TokenKind};

pub use lexer::{LexError, Lexer, LexerConfig};

/// Lex all of `src`, skipping trivia. The last token is `Eof`.
#[tracing::instrument(level = "debug", skip_all, fields(bytes = src.len()))]
pub fn lex(src: &[u8], file: FileId) -> Vec<Token<'_>> {
    collect(Lexer::new(src, file))
}

/// Lex all of `src`, keeping whitespace and comment tokens so that the
/// concatenated token texts reproduce the input.
#[tracing::instrument(level = "debug", skip_all, fields(bytes = src.len()))]
pub fn lex_with_trivia(src: &[u8], file: FileId) -> Vec<Token<'_>> {
    collect(Lexer::with_config(src, file, LexerConfig { trivia: true }))
}

fn collect(mut lexer: Lexer<'_>) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    loop {
        let tok = lexer.next();
        tokens.push(tok);
        if tok.kind == TokenKind::Eof {
            break;
        }
    }
    debug!(tokens = tokens.len(), "lexed");
    tokens
}
