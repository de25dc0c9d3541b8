//! Recursive descent parser for Vitte.
//!
//! Pulls tokens from the lexer on demand and builds a flat [`Ast`].
//! Parsing never fails: malformed input produces `Error` nodes plus a
//! [`ParseError`], and the parser resynchronizes at the next statement
//! boundary or toplevel keyword.

mod cursor;
mod error;
mod grammar;
mod recovery;

#[cfg(test)]
mod tests;

use tracing::debug;
use vitte_diagnostic::{Diagnostic, DiagnosticSink, ErrorCode};
use vitte_ir::{Ast, FileId, Name, NodeId, NodeKind, Span, StringInterner, Token, TokenFlags, TokenKind};
use vitte_lexer::Lexer;

use crate::cursor::Cursor;

pub use error::ParseError;
pub use recovery::TokenSet;

/// Result of parsing one file.
#[derive(Debug)]
pub struct ParseOutput {
    pub ast: Ast,
    /// The `File` node.
    pub root: NodeId,
    /// Errors in the order they were found.
    pub errors: Vec<ParseError>,
    /// Non-fatal lexical findings (malformed UTF-8 in literals).
    pub warnings: Vec<ParseError>,
    /// Message of the first error, if any.
    pub first_error: Option<String>,
}

impl ParseOutput {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Send every error and warning to `sink`, in source order per kind.
    pub fn emit_to(&self, sink: &mut dyn DiagnosticSink) {
        for err in &self.errors {
            sink.emit(err.to_diagnostic());
        }
        for warn in &self.warnings {
            sink.emit(warn.to_warning());
        }
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        let mut out = Vec::new();
        self.emit_to(&mut out);
        out
    }
}

/// Parse `src` into an AST. Never panics on malformed input.
#[tracing::instrument(level = "debug", skip_all, fields(file = file.0, bytes = src.len()))]
pub fn parse(src: &[u8], file: FileId, interner: &StringInterner) -> ParseOutput {
    let mut parser = Parser::new(src, file, interner);
    let root = parser.parse_file();
    let output = parser.finish(root);
    debug!(
        nodes = output.ast.len(),
        errors = output.errors.len(),
        "parsed"
    );
    output
}

/// Parser state.
pub(crate) struct Parser<'src, 'i> {
    cursor: Cursor<'src>,
    ast: Ast,
    interner: &'i StringInterner,
    file: FileId,
    src_len: u32,
    errors: Vec<ParseError>,
    warnings: Vec<ParseError>,
    /// Set by any error in the current statement; cleared by
    /// [`Parser::synchronize`].
    had_error: bool,
    context: Option<&'static str>,
}

impl<'src, 'i> Parser<'src, 'i> {
    pub(crate) fn new(src: &'src [u8], file: FileId, interner: &'i StringInterner) -> Self {
        let mut parser = Parser {
            cursor: Cursor::new(Lexer::new(src, file)),
            // Roughly one node per four source bytes.
            ast: Ast::with_capacity(src.len() / 4),
            interner,
            file,
            src_len: u32::try_from(src.len()).unwrap_or(u32::MAX),
            errors: Vec::new(),
            warnings: Vec::new(),
            had_error: false,
            context: None,
        };
        parser.note_current_token();
        parser
    }

    fn finish(self, root: NodeId) -> ParseOutput {
        let first_error = self.errors.first().map(|e| e.message.clone());
        ParseOutput {
            ast: self.ast,
            root,
            errors: self.errors,
            warnings: self.warnings,
            first_error,
        }
    }

    // ── Token navigation ──────────────────────────────────────────────

    /// Consume the current token.
    fn advance(&mut self) -> Token<'src> {
        let tok = self.cursor.advance();
        self.note_current_token();
        tok
    }

    #[inline]
    fn check(&self, kind: TokenKind) -> bool {
        self.cursor.check(kind)
    }

    /// Consume the current token if it has kind `kind`.
    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume `kind` or report it missing. Does not consume on failure.
    fn expect(&mut self, kind: TokenKind) -> bool {
        if self.eat(kind) {
            return true;
        }
        let found = self.cursor.current();
        self.report_at_current(ParseError::expected(kind, found.kind, found.span));
        false
    }

    /// Current token is an identifier spelled `word`.
    fn check_word(&self, word: &str) -> bool {
        let tok = self.cursor.current();
        tok.kind == TokenKind::Ident && tok.text == word.as_bytes()
    }

    /// Lexer error tokens are reported once, when they become current.
    fn note_current_token(&mut self) {
        let tok = self.cursor.current();
        if tok.kind == TokenKind::Error {
            let code = if tok.flags.contains(TokenFlags::UNTERMINATED) {
                ErrorCode::E0002
            } else {
                ErrorCode::E0001
            };
            let message = tok.error_message().unwrap_or("invalid token");
            self.errors
                .push(ParseError::new(code, message, tok.span).with_context(self.context));
        }
        if tok.flags.contains(TokenFlags::INVALID_UTF8) {
            self.warnings.push(ParseError::new(
                ErrorCode::E0003,
                "invalid UTF-8 in literal",
                tok.span,
            ));
        }
    }

    // ── Errors ────────────────────────────────────────────────────────

    fn report(&mut self, err: ParseError) {
        self.had_error = true;
        self.errors.push(err.with_context(self.context));
    }

    /// Report at the current token, unless the lexer already reported it.
    fn report_at_current(&mut self, err: ParseError) {
        if self.check(TokenKind::Error) {
            self.had_error = true;
        } else {
            self.report(err);
        }
    }

    /// Build an `Error` node carrying `message`, at the current token.
    fn error_node(&mut self, message: &str) -> NodeId {
        let id = self.ast.add(NodeKind::Error, self.cursor.span(), &[]);
        let text = self.interner.intern(message);
        self.ast.set_text(id, text);
        id
    }

    /// Run `f` with `context` attached to any error it reports.
    fn in_context<T>(&mut self, context: &'static str, f: impl FnOnce(&mut Self) -> T) -> T {
        let saved = self.context.replace(context);
        let result = f(self);
        self.context = saved;
        result
    }

    // ── Node building ─────────────────────────────────────────────────

    fn intern(&self, tok: Token<'_>) -> Name {
        self.interner.intern_bytes(tok.text)
    }

    /// Span from `start` through the last consumed token.
    fn span_from(&self, start: Span) -> Span {
        let prev = self.cursor.previous_span();
        if prev.end > start.start {
            start.merge(prev)
        } else {
            Span { end: start.start, ..start }
        }
    }

    fn node(&mut self, kind: NodeKind, start: Span, children: &[NodeId]) -> NodeId {
        let span = self.span_from(start);
        self.ast.add(kind, span, children)
    }

    fn named_node(&mut self, kind: NodeKind, start: Span, name: Option<Name>, children: &[NodeId]) -> NodeId {
        let id = self.node(kind, start, children);
        if let Some(name) = name {
            self.ast.set_name(id, name);
        }
        id
    }

    /// Identifier leaf from an already consumed token.
    fn ident_leaf(&mut self, tok: Token<'_>) -> NodeId {
        let id = self.ast.add(NodeKind::Ident, tok.span, &[]);
        let name = self.intern(tok);
        self.ast.set_name(id, name);
        id
    }

    /// Consume an identifier and return its leaf. Otherwise report and
    /// return an `Error` node, so the parent keeps its child positions.
    fn expect_ident_leaf(&mut self) -> NodeId {
        if self.check(TokenKind::Ident) {
            let tok = self.advance();
            self.ident_leaf(tok)
        } else {
            let placeholder = self.error_node("expected identifier");
            self.expect(TokenKind::Ident);
            placeholder
        }
    }

    fn whole_file_span(&self) -> Span {
        Span::new(self.file, 0, self.src_len, 1, 1)
    }
}
