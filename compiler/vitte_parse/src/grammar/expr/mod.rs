//! Expressions.
//!
//! Binary operators use precedence climbing over
//! [`BinaryOp::precedence`]; unary operators bind tighter than any binary
//! operator, and postfix call/index/member bind tighter still.

mod operators;

use vitte_diagnostic::ErrorCode;
use vitte_ir::{BinaryOp, NodeId, NodeKind, Payload, Token, TokenKind};
use vitte_stack::ensure_sufficient_stack;

use crate::recovery::{STMT_END, TOPLEVEL_START};
use crate::{ParseError, Parser};

use operators::{match_binary_op, match_unary_op};

impl Parser<'_, '_> {
    pub(crate) fn parse_expr(&mut self) -> NodeId {
        ensure_sufficient_stack(|| self.parse_binary(1))
    }

    /// Left-associative: the right operand is parsed one level tighter.
    fn parse_binary(&mut self, min_prec: u8) -> NodeId {
        let mut lhs = self.parse_unary();
        while let Some(op) = match_binary_op(self.cursor.kind()) {
            let prec = op.precedence();
            if prec < min_prec {
                break;
            }
            self.advance();
            let rhs = self.parse_binary(prec + 1);
            lhs = self.binary_node(op, lhs, rhs);
        }
        lhs
    }

    fn binary_node(&mut self, op: BinaryOp, lhs: NodeId, rhs: NodeId) -> NodeId {
        let start = self.ast.span(lhs);
        let id = self.node(NodeKind::Binary, start, &[lhs, rhs]);
        self.ast.set_payload(id, Payload::Binary(op));
        id
    }

    fn parse_unary(&mut self) -> NodeId {
        let Some(op) = match_unary_op(self.cursor.kind()) else {
            return self.parse_postfix();
        };
        let start = self.cursor.span();
        self.advance();
        let operand = ensure_sufficient_stack(|| self.parse_unary());
        let id = self.node(NodeKind::Unary, start, &[operand]);
        self.ast.set_payload(id, Payload::Unary(op));
        id
    }

    /// Primary followed by any chain of `(args)`, `[index]` and `.field`.
    pub(crate) fn parse_postfix(&mut self) -> NodeId {
        let mut expr = self.parse_primary();
        loop {
            let start = self.ast.span(expr);
            match self.cursor.kind() {
                TokenKind::LParen => {
                    self.advance();
                    let mut children = vec![expr];
                    while !self.check(TokenKind::RParen) && !self.cursor.is_at_end() {
                        children.push(self.parse_expr());
                        if !self.eat(TokenKind::Comma) {
                            break;
                        }
                    }
                    self.expect(TokenKind::RParen);
                    expr = self.node(NodeKind::Call, start, &children);
                }
                TokenKind::LBracket => {
                    self.advance();
                    let index = self.parse_expr();
                    self.expect(TokenKind::RBracket);
                    expr = self.node(NodeKind::Index, start, &[expr, index]);
                }
                TokenKind::Dot => {
                    self.advance();
                    let field = self.cursor.current();
                    if !self.expect(TokenKind::Ident) {
                        break;
                    }
                    let name = Some(self.intern(field));
                    expr = self.named_node(NodeKind::Member, start, name, &[expr]);
                }
                _ => break,
            }
        }
        expr
    }

    pub(super) fn parse_primary(&mut self) -> NodeId {
        let tok = self.cursor.current();
        match tok.kind {
            TokenKind::Ident => {
                self.advance();
                self.ident_leaf(tok)
            }
            TokenKind::Int => self.int_literal(tok),
            TokenKind::Float => self.float_literal(tok),
            TokenKind::String | TokenKind::Char => {
                self.advance();
                let kind = if tok.kind == TokenKind::String {
                    NodeKind::String
                } else {
                    NodeKind::Char
                };
                self.text_leaf(kind, tok, Payload::None)
            }
            TokenKind::True | TokenKind::False => {
                self.advance();
                self.text_leaf(NodeKind::Bool, tok, Payload::Bool(tok.kind == TokenKind::True))
            }
            TokenKind::Null => {
                self.advance();
                self.ast.add(NodeKind::Null, tok.span, &[])
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_expr();
                self.expect(TokenKind::RParen);
                inner
            }
            found => {
                let message = match tok.error_message() {
                    Some(lexer_message) => lexer_message.to_owned(),
                    None => format!("expected expression, found {}", found.display_name()),
                };
                self.report_at_current(ParseError::new(ErrorCode::E1002, message.clone(), tok.span));
                let node = self.error_node(&message);
                if !(STMT_END.contains(found) || TOPLEVEL_START.contains(found) || found == TokenKind::Eof) {
                    self.advance();
                }
                node
            }
        }
    }

    /// Literal leaf keeping its source text.
    fn text_leaf(&mut self, kind: NodeKind, tok: Token<'_>, payload: Payload) -> NodeId {
        let id = self.ast.add(kind, tok.span, &[]);
        let text = self.intern(tok);
        self.ast.set_text(id, text);
        self.ast.set_payload(id, payload);
        id
    }

    /// Integer literal in decimal, `0x`, `0b` or `0o`, with `_` separators.
    /// Out-of-range values are reported and stored as 0.
    fn int_literal(&mut self, tok: Token<'_>) -> NodeId {
        self.advance();
        let value = match parse_int(tok.text) {
            Ok(value) => value,
            Err(message) => {
                self.report(ParseError::new(ErrorCode::E1005, message, tok.span));
                0
            }
        };
        self.text_leaf(NodeKind::Int, tok, Payload::Int(value))
    }

    fn float_literal(&mut self, tok: Token<'_>) -> NodeId {
        self.advance();
        let cleaned: String = tok.text_str().chars().filter(|&c| c != '_').collect();
        let value = match cleaned.parse::<f64>() {
            Ok(value) => value,
            Err(_) => {
                self.report(ParseError::new(ErrorCode::E1005, "malformed float literal", tok.span));
                0.0
            }
        };
        self.text_leaf(NodeKind::Float, tok, Payload::Float(value))
    }
}

/// Value of an integer literal's source text.
fn parse_int(text: &[u8]) -> Result<i64, &'static str> {
    let (radix, digits) = match text {
        [b'0', b'x' | b'X', rest @ ..] => (16, rest),
        [b'0', b'b' | b'B', rest @ ..] => (2, rest),
        [b'0', b'o' | b'O', rest @ ..] => (8, rest),
        _ => (10, text),
    };
    let cleaned: String = digits
        .iter()
        .filter(|&&b| b != b'_')
        .map(|&b| char::from(b))
        .collect();
    if cleaned.is_empty() {
        return Err("malformed integer literal");
    }
    i64::from_str_radix(&cleaned, radix).map_err(|err| match err.kind() {
        std::num::IntErrorKind::PosOverflow | std::num::IntErrorKind::NegOverflow => {
            "integer literal too large"
        }
        _ => "malformed integer literal",
    })
}

#[cfg(test)]
mod tests;
