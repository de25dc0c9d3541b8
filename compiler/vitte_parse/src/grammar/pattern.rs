//! Match patterns.

use vitte_diagnostic::ErrorCode;
use vitte_ir::{NodeId, NodeKind, TokenKind};
use vitte_stack::ensure_sufficient_stack;

use crate::{ParseError, Parser};

impl Parser<'_, '_> {
    /// `_`, a literal, a path, or `( pattern, ... )`.
    pub(crate) fn parse_pattern(&mut self) -> NodeId {
        ensure_sufficient_stack(|| self.in_context("a pattern", Self::parse_pattern_inner))
    }

    fn parse_pattern_inner(&mut self) -> NodeId {
        let tok = self.cursor.current();
        match tok.kind {
            TokenKind::Ident if tok.text == b"_" => {
                self.advance();
                let id = self.ast.add(NodeKind::PatWildcard, tok.span, &[]);
                let name = self.intern(tok);
                self.ast.set_name(id, name);
                id
            }
            TokenKind::Ident => self.parse_path_node(NodeKind::PatPath),
            TokenKind::Int
            | TokenKind::Float
            | TokenKind::String
            | TokenKind::Char
            | TokenKind::True
            | TokenKind::False
            | TokenKind::Null => {
                let literal = self.parse_primary();
                self.ast.add(NodeKind::PatLiteral, tok.span, &[literal])
            }
            TokenKind::LParen => {
                self.advance();
                let mut elems = Vec::new();
                while !self.check(TokenKind::RParen) && !self.cursor.is_at_end() {
                    elems.push(self.parse_pattern());
                    if !self.eat(TokenKind::Comma) {
                        break;
                    }
                }
                self.expect(TokenKind::RParen);
                self.node(NodeKind::PatTuple, tok.span, &elems)
            }
            found => {
                let message = format!("expected pattern, found {}", found.display_name());
                self.report_at_current(ParseError::new(ErrorCode::E1004, message.clone(), tok.span));
                self.error_node(&message)
            }
        }
    }
}
