//! On-demand token production with one token of lookahead.

use tracing::trace;
use vitte_ir::{FileId, Span, Token, TokenFlags, TokenKind};

use crate::cursor::{Cursor, Mark};
use crate::keywords;

/// Lexer behavior switches.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct LexerConfig {
    /// Emit `Whitespace` and `Comment` tokens instead of skipping them.
    pub trivia: bool,
}

/// First lexical error seen by a lexer.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct LexError {
    pub message: &'static str,
    pub span: Span,
}

pub(crate) const UNEXPECTED_CHAR: &str = "unexpected character";
pub(crate) const UNTERMINATED_STRING: &str = "unterminated string literal";
pub(crate) const UNTERMINATED_CHAR: &str = "unterminated char literal";

/// Byte-oriented lexer over one source buffer.
///
/// Lexing never fails: bad input becomes [`TokenKind::Error`] tokens and
/// the lexer carries on. After the end of input every call yields `Eof`.
pub struct Lexer<'src> {
    cursor: Cursor<'src>,
    file: FileId,
    config: LexerConfig,
    peeked: Option<Token<'src>>,
    first_error: Option<LexError>,
}

impl<'src> Lexer<'src> {
    pub fn new(src: &'src [u8], file: FileId) -> Self {
        Self::with_config(src, file, LexerConfig::default())
    }

    pub fn with_config(src: &'src [u8], file: FileId, config: LexerConfig) -> Self {
        Lexer {
            cursor: Cursor::new(src),
            file,
            config,
            peeked: None,
            first_error: None,
        }
    }

    pub fn file(&self) -> FileId {
        self.file
    }

    /// Next token, advancing past it.
    #[allow(
        clippy::should_implement_trait,
        reason = "never exhausts: yields Eof forever instead of None"
    )]
    pub fn next(&mut self) -> Token<'src> {
        match self.peeked.take() {
            Some(tok) => tok,
            None => self.scan(),
        }
    }

    /// Next token without advancing. Repeated peeks return the cached token.
    pub fn peek(&mut self) -> Token<'src> {
        match self.peeked {
            Some(tok) => tok,
            None => {
                let tok = self.scan();
                self.peeked = Some(tok);
                tok
            }
        }
    }

    /// Advance only if the next token has kind `kind`.
    pub fn consume(&mut self, kind: TokenKind) -> bool {
        if self.peek().kind == kind {
            self.peeked = None;
            true
        } else {
            false
        }
    }

    /// First lexical error produced so far.
    pub fn first_error(&self) -> Option<LexError> {
        self.first_error
    }

    fn span_from(&self, start: Mark) -> Span {
        Span::new(self.file, start.pos, self.cursor.pos(), start.line, start.col)
    }

    fn token(&self, kind: TokenKind, start: Mark) -> Token<'src> {
        Token::new(
            kind,
            self.span_from(start),
            self.cursor.slice(start.pos, self.cursor.pos()),
        )
    }

    fn error(&mut self, start: Mark, message: &'static str) -> Token<'src> {
        let span = self.span_from(start);
        if self.first_error.is_none() {
            self.first_error = Some(LexError { message, span });
        }
        Token::error(
            span,
            self.cursor.slice(start.pos, self.cursor.pos()),
            message,
        )
    }

    fn scan(&mut self) -> Token<'src> {
        let tok = self.scan_inner();
        trace!(
            kind = ?tok.kind,
            start = tok.span.start,
            end = tok.span.end,
            "token"
        );
        tok
    }

    fn scan_inner(&mut self) -> Token<'src> {
        loop {
            let start = self.cursor.mark();
            if self.cursor.is_eof() {
                return self.token(TokenKind::Eof, start);
            }

            let trivia = match self.cursor.current() {
                b' ' | b'\t' | b'\r' | b'\n' => {
                    self.cursor
                        .eat_while(|b| matches!(b, b' ' | b'\t' | b'\r' | b'\n'));
                    TokenKind::Whitespace
                }
                b'#' if cfg!(feature = "hash-comments") => {
                    self.cursor.eat_until_newline_or_eof();
                    TokenKind::Comment
                }
                b'/' if cfg!(feature = "line-comments") && self.cursor.peek() == b'/' => {
                    self.cursor.eat_until_newline_or_eof();
                    TokenKind::Comment
                }
                b'/' if cfg!(feature = "block-comments") && self.cursor.peek() == b'*' => {
                    self.cursor.advance_n(2);
                    self.cursor.eat_block_comment_body();
                    TokenKind::Comment
                }
                _ => return self.scan_token(start),
            };

            if self.config.trivia {
                return self.token(trivia, start);
            }
        }
    }

    fn scan_token(&mut self, start: Mark) -> Token<'src> {
        let b = self.cursor.current();
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'_' => self.ident(start),
            b'0'..=b'9' => self.number(start),
            b'"' | b'\'' => self.literal(start, b),
            b'.' => self.dot(start),
            _ => match self.operator(b) {
                Some((kind, len)) => {
                    self.cursor.advance_n(len);
                    self.token(kind, start)
                }
                None => {
                    let width = self.cursor.char_width();
                    self.cursor.advance_n(width);
                    self.error(start, UNEXPECTED_CHAR)
                }
            },
        }
    }

    fn ident(&mut self, start: Mark) -> Token<'src> {
        self.cursor.eat_while(is_ident_continue);
        let text = self.cursor.slice(start.pos, self.cursor.pos());
        let kind = keywords::lookup(text).unwrap_or(TokenKind::Ident);
        self.token(kind, start)
    }

    fn number(&mut self, start: Mark) -> Token<'src> {
        if self.cursor.current() == b'0' {
            let digits: Option<fn(u8) -> bool> = match self.cursor.peek() {
                b'x' | b'X' => Some(|b| b.is_ascii_hexdigit() || b == b'_'),
                b'b' | b'B' => Some(|b| matches!(b, b'0' | b'1' | b'_')),
                b'o' | b'O' => Some(|b| matches!(b, b'0'..=b'7' | b'_')),
                _ => None,
            };
            if let Some(digits) = digits {
                self.cursor.advance_n(2);
                self.cursor.eat_while(digits);
                return self.token(TokenKind::Int, start);
            }
        }

        let mut kind = TokenKind::Int;
        self.cursor.eat_while(is_digit_or_underscore);
        if self.cursor.current() == b'.' && self.cursor.peek().is_ascii_digit() {
            self.cursor.advance();
            self.cursor.eat_while(is_digit_or_underscore);
            kind = TokenKind::Float;
        }
        if matches!(self.cursor.current(), b'e' | b'E') {
            let sign = u32::from(matches!(self.cursor.peek(), b'+' | b'-'));
            if self.cursor.nth(1 + sign).is_ascii_digit() {
                self.cursor.advance_n(1 + sign);
                self.cursor.eat_while(is_digit_or_underscore);
                kind = TokenKind::Float;
            }
        }
        self.token(kind, start)
    }

    /// String (`"`) or char (`'`) literal. Escapes are kept verbatim.
    fn literal(&mut self, start: Mark, quote: u8) -> Token<'src> {
        self.cursor.advance();
        let terminated = loop {
            match self.cursor.skip_to_literal_delim(quote) {
                None | Some(b'\n') => break false,
                Some(b'\\') => {
                    self.cursor.advance();
                    self.cursor.advance();
                }
                Some(_) => {
                    self.cursor.advance();
                    break true;
                }
            }
        };

        let text = self.cursor.slice(start.pos, self.cursor.pos());
        let mut flags = TokenFlags::empty();
        if std::str::from_utf8(text).is_err() {
            flags |= TokenFlags::INVALID_UTF8;
        }

        if terminated {
            let kind = if quote == b'"' {
                TokenKind::String
            } else {
                TokenKind::Char
            };
            self.token(kind, start).with_flags(flags)
        } else {
            let message = if quote == b'"' {
                UNTERMINATED_STRING
            } else {
                UNTERMINATED_CHAR
            };
            self.error(start, message)
                .with_flags(flags | TokenFlags::UNTERMINATED)
        }
    }

    /// `.end` followed by a non-identifier byte is the block terminator.
    fn dot(&mut self, start: Mark) -> Token<'src> {
        let is_end = self.cursor.nth(1) == b'e'
            && self.cursor.nth(2) == b'n'
            && self.cursor.nth(3) == b'd'
            && !is_ident_continue(self.cursor.nth(4));
        if is_end {
            self.cursor.advance_n(4);
            self.token(TokenKind::DotEnd, start)
        } else {
            self.cursor.advance();
            self.token(TokenKind::Dot, start)
        }
    }

    /// Longest operator starting at the current byte, with its length.
    fn operator(&self, b: u8) -> Option<(TokenKind, u32)> {
        let next = self.cursor.peek();
        let third = self.cursor.nth(2);
        let op = match (b, next) {
            (b',', _) => (TokenKind::Comma, 1),
            (b':', b':') => (TokenKind::ColonColon, 2),
            (b':', _) => (TokenKind::Colon, 1),
            (b';', _) => (TokenKind::Semi, 1),
            (b'(', _) => (TokenKind::LParen, 1),
            (b')', _) => (TokenKind::RParen, 1),
            (b'[', _) => (TokenKind::LBracket, 1),
            (b']', _) => (TokenKind::RBracket, 1),
            (b'{', _) => (TokenKind::LBrace, 1),
            (b'}', _) => (TokenKind::RBrace, 1),
            (b'+', b'=') => (TokenKind::PlusEq, 2),
            (b'+', _) => (TokenKind::Plus, 1),
            (b'-', b'>') => (TokenKind::Arrow, 2),
            (b'-', b'=') => (TokenKind::MinusEq, 2),
            (b'-', _) => (TokenKind::Minus, 1),
            (b'*', b'=') => (TokenKind::StarEq, 2),
            (b'*', _) => (TokenKind::Star, 1),
            (b'/', b'=') => (TokenKind::SlashEq, 2),
            (b'/', _) => (TokenKind::Slash, 1),
            (b'%', b'=') => (TokenKind::PercentEq, 2),
            (b'%', _) => (TokenKind::Percent, 1),
            (b'=', b'=') => (TokenKind::EqEq, 2),
            (b'=', b'>') => (TokenKind::FatArrow, 2),
            (b'=', _) => (TokenKind::Eq, 1),
            (b'!', b'=') => (TokenKind::BangEq, 2),
            (b'!', _) => (TokenKind::Bang, 1),
            (b'<', b'<') if third == b'=' => (TokenKind::ShlEq, 3),
            (b'<', b'<') => (TokenKind::Shl, 2),
            (b'<', b'=') => (TokenKind::LtEq, 2),
            (b'<', _) => (TokenKind::Lt, 1),
            (b'>', b'>') if third == b'=' => (TokenKind::ShrEq, 3),
            (b'>', b'>') => (TokenKind::Shr, 2),
            (b'>', b'=') => (TokenKind::GtEq, 2),
            (b'>', _) => (TokenKind::Gt, 1),
            (b'&', b'&') => (TokenKind::AmpAmp, 2),
            (b'&', b'=') => (TokenKind::AmpEq, 2),
            (b'&', _) => (TokenKind::Amp, 1),
            (b'|', b'|') => (TokenKind::PipePipe, 2),
            (b'|', b'=') => (TokenKind::PipeEq, 2),
            (b'|', _) => (TokenKind::Pipe, 1),
            (b'^', b'=') => (TokenKind::CaretEq, 2),
            (b'^', _) => (TokenKind::Caret, 1),
            (b'?', _) => (TokenKind::Question, 1),
            _ => return None,
        };
        Some(op)
    }
}

#[inline]
fn is_ident_continue(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

#[inline]
fn is_digit_or_underscore(b: u8) -> bool {
    b.is_ascii_digit() || b == b'_'
}

#[cfg(test)]
mod tests;
