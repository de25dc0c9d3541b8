//! Token cursor over the on-demand lexer.
//!
//! Holds the current token and the span of the previous one, and counts
//! advances so loops can check that an iteration made progress.

use vitte_ir::{Span, Token, TokenKind};
use vitte_lexer::Lexer;

use crate::recovery::TokenSet;

pub(crate) struct Cursor<'src> {
    lexer: Lexer<'src>,
    current: Token<'src>,
    previous_span: Span,
    advanced: u32,
}

impl<'src> Cursor<'src> {
    pub fn new(mut lexer: Lexer<'src>) -> Self {
        let current = lexer.next();
        let previous_span = Span {
            end: current.span.start,
            ..current.span
        };
        Cursor {
            lexer,
            current,
            previous_span,
            advanced: 0,
        }
    }

    #[inline]
    pub fn current(&self) -> Token<'src> {
        self.current
    }

    #[inline]
    pub fn kind(&self) -> TokenKind {
        self.current.kind
    }

    #[inline]
    pub fn span(&self) -> Span {
        self.current.span
    }

    /// Span of the last consumed token.
    #[inline]
    pub fn previous_span(&self) -> Span {
        self.previous_span
    }

    #[inline]
    pub fn check(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    #[inline]
    pub fn check_set(&self, set: TokenSet) -> bool {
        set.contains(self.current.kind)
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.current.kind == TokenKind::Eof
    }

    /// Kind of the token after the current one.
    pub fn peek_kind(&mut self) -> TokenKind {
        self.lexer.peek().kind
    }

    /// Number of tokens consumed so far.
    #[inline]
    pub fn position(&self) -> u32 {
        self.advanced
    }

    /// Consume the current token and return it. At `Eof` nothing moves.
    pub fn advance(&mut self) -> Token<'src> {
        let tok = self.current;
        if tok.kind != TokenKind::Eof {
            self.previous_span = tok.span;
            self.current = self.lexer.next();
            self.advanced += 1;
        }
        tok
    }
}
