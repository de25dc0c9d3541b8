//! Statements.

use vitte_ir::{NodeId, NodeKind, TokenKind};

use crate::Parser;

impl Parser<'_, '_> {
    pub(crate) fn parse_stmt(&mut self) -> NodeId {
        match self.cursor.kind() {
            TokenKind::Let => self.parse_binding(NodeKind::Let),
            TokenKind::Const => self.parse_binding(NodeKind::Const),
            TokenKind::Set => self.parse_set(),
            TokenKind::Say => self.parse_keyword_expr(NodeKind::Say),
            TokenKind::Do => self.parse_keyword_expr(NodeKind::Do),
            TokenKind::If => self.in_context("an if statement", Self::parse_if),
            TokenKind::While => self.in_context("a while loop", Self::parse_while),
            TokenKind::For => self.in_context("a for loop", Self::parse_for),
            TokenKind::Match => self.in_context("a match statement", Self::parse_match),
            TokenKind::Break => self.parse_jump(NodeKind::Break),
            TokenKind::Continue => self.parse_jump(NodeKind::Continue),
            TokenKind::Return | TokenKind::Ret => self.parse_return(),
            _ => {
                let start = self.cursor.span();
                let expr = self.parse_expr();
                self.node(NodeKind::ExprStmt, start, &[expr])
            }
        }
    }

    /// `let|const name [: Type] [= expr]`
    fn parse_binding(&mut self, kind: NodeKind) -> NodeId {
        let start = self.cursor.span();
        self.advance();
        let ident = self.expect_ident_leaf();
        let mut children = vec![ident];
        if self.eat(TokenKind::Colon) {
            children.push(self.parse_type());
        }
        if self.eat(TokenKind::Eq) {
            children.push(self.parse_expr());
        }
        let name = self.ast.get(ident).and_then(|n| n.name);
        self.named_node(kind, start, name, &children)
    }

    /// `set lhs [=] rhs`
    fn parse_set(&mut self) -> NodeId {
        let start = self.cursor.span();
        self.advance();
        let lhs = self.parse_postfix();
        self.eat(TokenKind::Eq);
        let rhs = self.parse_expr();
        self.node(NodeKind::Set, start, &[lhs, rhs])
    }

    /// `say expr`, `do expr`
    fn parse_keyword_expr(&mut self, kind: NodeKind) -> NodeId {
        let start = self.cursor.span();
        self.advance();
        let expr = self.parse_expr();
        self.node(kind, start, &[expr])
    }

    /// `if cond block (elif cond block)* [else block]`
    fn parse_if(&mut self) -> NodeId {
        let start = self.cursor.span();
        self.advance();
        let cond = self.parse_expr();
        let then_block = self.parse_block();
        let mut children = vec![cond, then_block];

        while self.check(TokenKind::Elif) {
            let elif_start = self.cursor.span();
            self.advance();
            let cond = self.parse_expr();
            let block = self.parse_block();
            children.push(self.node(NodeKind::Elif, elif_start, &[cond, block]));
        }
        if self.check(TokenKind::Else) {
            let else_start = self.cursor.span();
            self.advance();
            let block = self.parse_block();
            children.push(self.node(NodeKind::Else, else_start, &[block]));
        }

        self.node(NodeKind::If, start, &children)
    }

    /// `while cond block`
    fn parse_while(&mut self) -> NodeId {
        let start = self.cursor.span();
        self.advance();
        let cond = self.parse_expr();
        let body = self.parse_block();
        self.node(NodeKind::While, start, &[cond, body])
    }

    /// `for name [in] expr block`. `in` is an ordinary identifier.
    fn parse_for(&mut self) -> NodeId {
        let start = self.cursor.span();
        self.advance();
        let var = self.expect_ident_leaf();
        if self.check_word("in") {
            self.advance();
        }
        let iter = self.parse_expr();
        let body = self.parse_block();
        let name = self.ast.get(var).and_then(|n| n.name);
        self.named_node(NodeKind::For, start, name, &[var, iter, body])
    }

    /// `match expr [{] (pattern => body [,|;])* (} | .end)`
    ///
    /// The arm list closes with `}` when it opened with `{`, else `.end`.
    fn parse_match(&mut self) -> NodeId {
        let start = self.cursor.span();
        self.advance();
        let scrutinee = self.parse_expr();
        let closer = if self.eat(TokenKind::LBrace) {
            TokenKind::RBrace
        } else {
            TokenKind::DotEnd
        };

        let mut children = vec![scrutinee];
        while !self.check(closer) && !self.cursor.is_at_end() {
            let before = self.cursor.position();
            children.push(self.parse_match_arm());
            if !self.eat(TokenKind::Comma) {
                self.eat(TokenKind::Semi);
            }
            self.recover_in_block(closer);
            if self.cursor.position() == before {
                self.advance();
            }
        }
        self.expect(closer);
        self.node(NodeKind::Match, start, &children)
    }

    /// `pattern => body`. A body not opening with `{` is one statement.
    fn parse_match_arm(&mut self) -> NodeId {
        let start = self.cursor.span();
        let pattern = self.parse_pattern();
        self.expect(TokenKind::FatArrow);
        let body = if self.check(TokenKind::LBrace) {
            self.parse_block()
        } else {
            let body_start = self.cursor.span();
            let stmt = self.parse_stmt();
            self.node(NodeKind::Block, body_start, &[stmt])
        };
        self.node(NodeKind::MatchArm, start, &[pattern, body])
    }

    fn parse_jump(&mut self, kind: NodeKind) -> NodeId {
        let start = self.cursor.span();
        self.advance();
        self.node(kind, start, &[])
    }

    /// `return|ret [expr]`
    fn parse_return(&mut self) -> NodeId {
        let start = self.cursor.span();
        self.advance();
        if self.at_statement_boundary() {
            return self.node(NodeKind::Return, start, &[]);
        }
        let value = self.parse_expr();
        self.node(NodeKind::Return, start, &[value])
    }
}
