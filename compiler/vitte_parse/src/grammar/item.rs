//! Toplevel declarations.

use vitte_ir::{Name, NodeId, NodeKind, Span, TokenKind};

use crate::Parser;

impl Parser<'_, '_> {
    /// The whole file: declarations and stray statements until `Eof`.
    pub(crate) fn parse_file(&mut self) -> NodeId {
        let mut items = Vec::new();
        while !self.cursor.is_at_end() {
            if self.eat(TokenKind::Semi) {
                continue;
            }
            let before = self.cursor.position();
            let item = if self.cursor.kind().is_toplevel_keyword() {
                self.parse_item()
            } else {
                self.parse_stmt()
            };
            items.push(item);
            if self.had_error {
                self.synchronize();
            }
            if self.cursor.position() == before {
                self.advance();
            }
        }

        let span = self.whole_file_span();
        self.ast.add(NodeKind::File, span, &items)
    }

    fn parse_item(&mut self) -> NodeId {
        match self.cursor.kind() {
            TokenKind::Mod => self.in_context("a module declaration", Self::parse_mod),
            TokenKind::Use => self.in_context("a use declaration", Self::parse_use),
            TokenKind::Export => self.in_context("an export list", Self::parse_export),
            TokenKind::Type => self.in_context("a type declaration", Self::parse_type_decl),
            TokenKind::Struct | TokenKind::Union | TokenKind::Enum => {
                self.in_context("a type declaration", |p| {
                    let start = p.cursor.span();
                    let keyword = p.advance().kind;
                    p.parse_aggregate(keyword, start)
                })
            }
            TokenKind::Fn | TokenKind::Scn => self.in_context("a function declaration", Self::parse_fn),
            _ => self.in_context("an entry declaration", Self::parse_entry),
        }
    }

    /// `mod a.b.c`
    fn parse_mod(&mut self) -> NodeId {
        let start = self.cursor.span();
        self.advance();
        let path = self.parse_path_node(NodeKind::Path);
        let name = self.last_segment_name(path);
        self.named_node(NodeKind::Mod, start, name, &[path])
    }

    /// `use a.b [as c]`
    fn parse_use(&mut self) -> NodeId {
        let start = self.cursor.span();
        self.advance();
        let path = self.parse_path_node(NodeKind::Path);
        if self.eat(TokenKind::As) {
            let alias = self.expect_ident_leaf();
            let name = self.ast.name(alias);
            return self.named_node(NodeKind::Use, start, name, &[path, alias]);
        }
        let name = self.last_segment_name(path);
        self.named_node(NodeKind::Use, start, name, &[path])
    }

    /// `export a, b [from path]`
    fn parse_export(&mut self) -> NodeId {
        let start = self.cursor.span();
        self.advance();
        let mut children = vec![self.expect_ident_leaf()];
        while self.eat(TokenKind::Comma) {
            children.push(self.expect_ident_leaf());
        }
        if self.eat(TokenKind::From) {
            children.push(self.parse_path_node(NodeKind::Path));
        }
        self.node(NodeKind::Export, start, &children)
    }

    /// `type N = T`, `type N T`, or `type N struct|union|enum body`.
    fn parse_type_decl(&mut self) -> NodeId {
        let start = self.cursor.span();
        self.advance();
        let name_tok = self.cursor.current();
        if !self.expect(TokenKind::Ident) {
            return self.error_node("expected a type name");
        }
        let name = Some(self.intern(name_tok));

        if matches!(
            self.cursor.kind(),
            TokenKind::Struct | TokenKind::Union | TokenKind::Enum
        ) {
            let keyword = self.advance().kind;
            let body = self.parse_aggregate_body(keyword);
            return self.named_node(aggregate_kind(keyword), start, name, &[body]);
        }

        self.eat(TokenKind::Eq);
        let target = self.parse_type();
        self.named_node(NodeKind::TypeAlias, start, name, &[target])
    }

    /// `struct N body`, `union N body`, `enum N body` after the keyword.
    fn parse_aggregate(&mut self, keyword: TokenKind, start: Span) -> NodeId {
        let name_tok = self.cursor.current();
        let name = if self.expect(TokenKind::Ident) {
            Some(self.intern(name_tok))
        } else {
            None
        };
        let body = self.parse_aggregate_body(keyword);
        self.named_node(aggregate_kind(keyword), start, name, &[body])
    }

    fn parse_aggregate_body(&mut self, keyword: TokenKind) -> NodeId {
        if keyword == TokenKind::Enum {
            self.parse_enum_body()
        } else {
            self.parse_fields()
        }
    }

    /// `[{] (name: Type [,|;])* (.end | })`
    fn parse_fields(&mut self) -> NodeId {
        let start = self.cursor.span();
        self.eat(TokenKind::LBrace);
        let mut fields = Vec::new();
        while !self.at_body_end() {
            let before = self.cursor.position();
            if self.check(TokenKind::Ident) {
                let field_start = self.cursor.span();
                let tok = self.advance();
                let name = Some(self.intern(tok));
                let ty = if self.expect(TokenKind::Colon) {
                    self.parse_type()
                } else {
                    self.error_node("expected field type")
                };
                fields.push(self.named_node(NodeKind::Field, field_start, name, &[ty]));
            } else {
                self.expect(TokenKind::Ident);
            }
            self.body_separator(before);
        }
        self.close_body();
        self.node(NodeKind::Fields, start, &fields)
    }

    /// `[{] (Name [(Type)] [,|;])* (.end | })`
    fn parse_enum_body(&mut self) -> NodeId {
        let start = self.cursor.span();
        self.eat(TokenKind::LBrace);
        let mut entries = Vec::new();
        while !self.at_body_end() {
            let before = self.cursor.position();
            if self.check(TokenKind::Ident) {
                let entry_start = self.cursor.span();
                let tok = self.advance();
                let name = Some(self.intern(tok));
                let mut children = Vec::new();
                if self.eat(TokenKind::LParen) {
                    children.push(self.parse_type());
                    self.expect(TokenKind::RParen);
                }
                entries.push(self.named_node(NodeKind::EnumEntry, entry_start, name, &children));
            } else {
                self.expect(TokenKind::Ident);
            }
            self.body_separator(before);
        }
        self.close_body();
        self.node(NodeKind::EnumBody, start, &entries)
    }

    fn at_body_end(&self) -> bool {
        matches!(
            self.cursor.kind(),
            TokenKind::DotEnd | TokenKind::RBrace | TokenKind::Eof
        ) || self.cursor.kind().is_toplevel_keyword()
    }

    /// Optional `,`/`;` between body entries. A failed entry skips one
    /// token so the loop always moves.
    fn body_separator(&mut self, before: u32) {
        if !self.eat(TokenKind::Comma) {
            self.eat(TokenKind::Semi);
        }
        if self.cursor.position() == before {
            self.advance();
        }
        self.had_error = false;
    }

    fn close_body(&mut self) {
        if !self.eat(TokenKind::DotEnd) {
            self.expect(TokenKind::RBrace);
        }
    }

    /// `fn|scn name (params) [-> Type] block`
    fn parse_fn(&mut self) -> NodeId {
        let start = self.cursor.span();
        let kind = if self.advance().kind == TokenKind::Scn {
            NodeKind::Scn
        } else {
            NodeKind::Fn
        };

        let name_tok = self.cursor.current();
        let name = if self.expect(TokenKind::Ident) {
            Some(self.intern(name_tok))
        } else {
            None
        };

        let params = self.parse_params();
        let mut children = vec![params];
        if self.eat(TokenKind::Arrow) {
            children.push(self.parse_type());
        }
        children.push(self.parse_block());
        self.named_node(kind, start, name, &children)
    }

    /// `( [name [: Type] (, name [: Type])* [,]] )`
    fn parse_params(&mut self) -> NodeId {
        let start = self.cursor.span();
        let mut params = Vec::new();
        if !self.expect(TokenKind::LParen) {
            return self.node(NodeKind::Params, start, &params);
        }
        while self.check(TokenKind::Ident) {
            let param_start = self.cursor.span();
            let tok = self.advance();
            let name = Some(self.intern(tok));
            let mut children = Vec::new();
            if self.eat(TokenKind::Colon) {
                children.push(self.parse_type());
            }
            params.push(self.named_node(NodeKind::Param, param_start, name, &children));
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RParen);
        self.node(NodeKind::Params, start, &params)
    }

    /// `prog|program|service|kernel|driver|tool|pipeline [path] block`
    ///
    /// Named after the path when there is one, else after the keyword.
    fn parse_entry(&mut self) -> NodeId {
        let start = self.cursor.span();
        let keyword_tok = self.advance();
        let keyword = self.intern(keyword_tok);

        let mut children = Vec::new();
        let mut name = keyword;
        if self.check(TokenKind::Ident) {
            let path = self.parse_path_node(NodeKind::Path);
            name = self.ast.name(path).unwrap_or(keyword);
            children.push(path);
        }
        children.push(self.parse_block());

        let id = self.named_node(NodeKind::Entry, start, Some(name), &children);
        self.ast.set_text(id, keyword);
        id
    }

    fn last_segment_name(&self, path: NodeId) -> Option<Name> {
        let segments = self.ast.children(path);
        segments.last().and_then(|&seg| self.ast.name(seg))
    }
}

fn aggregate_kind(keyword: TokenKind) -> NodeKind {
    match keyword {
        TokenKind::Union => NodeKind::Union,
        TokenKind::Enum => NodeKind::Enum,
        _ => NodeKind::Struct,
    }
}
