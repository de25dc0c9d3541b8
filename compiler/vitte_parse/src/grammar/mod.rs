//! Grammar productions, split by syntactic category.
//!
//! Shared pieces live here: paths, type annotations and blocks.

mod expr;
mod item;
mod pattern;
mod stmt;

use vitte_diagnostic::ErrorCode;
use vitte_ir::{NodeId, NodeKind, TokenKind};
use vitte_stack::ensure_sufficient_stack;

use crate::recovery::{PHRASE_BLOCK_END, STMT_END, TOPLEVEL_START};
use crate::{ParseError, Parser};

/// Separators accepted between path segments.
fn is_path_separator(kind: TokenKind) -> bool {
    matches!(kind, TokenKind::Dot | TokenKind::ColonColon | TokenKind::Slash)
}

impl Parser<'_, '_> {
    /// `ident ((. | :: | /) ident)*`, producing a node of `kind` whose
    /// children are the segments and whose name is the dotted spelling.
    ///
    /// A separator is only taken when an identifier follows it, so
    /// `a.b .end` stops cleanly after `b`.
    pub(crate) fn parse_path_node(&mut self, kind: NodeKind) -> NodeId {
        let start = self.cursor.span();
        if !self.check(TokenKind::Ident) {
            self.expect(TokenKind::Ident);
            return self.error_node("expected a path");
        }

        let first = self.advance();
        let mut spelled = first.text_str().into_owned();
        let mut segments = vec![self.ident_leaf(first)];
        while is_path_separator(self.cursor.kind()) && self.cursor.peek_kind() == TokenKind::Ident {
            self.advance();
            let tok = self.advance();
            spelled.push('.');
            spelled.push_str(&tok.text_str());
            segments.push(self.ident_leaf(tok));
        }

        let name = self.interner.intern(&spelled);
        self.named_node(kind, start, Some(name), &segments)
    }

    /// Type annotation. Types are plain paths.
    pub(crate) fn parse_type(&mut self) -> NodeId {
        self.in_context("a type", |p| p.parse_path_node(NodeKind::Path))
    }

    /// `{ stmts }` or `stmts .end`.
    pub(crate) fn parse_block(&mut self) -> NodeId {
        ensure_sufficient_stack(|| {
            if self.check(TokenKind::LBrace) {
                self.parse_braced_block()
            } else {
                self.parse_phrase_block()
            }
        })
    }

    fn parse_braced_block(&mut self) -> NodeId {
        let start = self.cursor.span();
        self.advance();
        let mut stmts = Vec::new();
        while !self.check(TokenKind::RBrace)
            && !self.cursor.is_at_end()
            && !self.cursor.check_set(TOPLEVEL_START)
        {
            self.block_statement(&mut stmts, TokenKind::RBrace);
        }
        self.expect(TokenKind::RBrace);
        self.node(NodeKind::Block, start, &stmts)
    }

    fn parse_phrase_block(&mut self) -> NodeId {
        let start = self.cursor.span();
        let mut stmts = Vec::new();
        loop {
            if self.eat(TokenKind::DotEnd) || self.cursor.check_set(PHRASE_BLOCK_END) {
                break;
            }
            if self.cursor.is_at_end() {
                let span = self.cursor.span();
                self.report(ParseError::new(
                    ErrorCode::E1001,
                    "expected '.end' before end of file",
                    span,
                ));
                break;
            }
            self.block_statement(&mut stmts, TokenKind::DotEnd);
        }
        self.node(NodeKind::Block, start, &stmts)
    }

    /// One iteration of a block loop: skip stray `;`, parse a statement,
    /// then recover if it failed.
    fn block_statement(&mut self, stmts: &mut Vec<NodeId>, closer: TokenKind) {
        if self.eat(TokenKind::Semi) {
            return;
        }
        let before = self.cursor.position();
        stmts.push(self.parse_stmt());
        self.recover_in_block(closer);
        if self.cursor.position() == before {
            self.advance();
        }
    }

    /// After a failed statement, leave the closer of the enclosing block
    /// for its loop; otherwise synchronize.
    pub(crate) fn recover_in_block(&mut self, closer: TokenKind) {
        if !self.had_error {
            return;
        }
        if self.check(closer) {
            self.had_error = false;
        } else {
            self.synchronize();
        }
    }

    /// Whether the current token ends an expression-less `return`.
    pub(crate) fn at_statement_boundary(&self) -> bool {
        let kind = self.cursor.kind();
        self.cursor.check_set(STMT_END)
            || self.cursor.check_set(PHRASE_BLOCK_END)
            || kind == TokenKind::Eof
            || kind.starts_statement()
    }
}
