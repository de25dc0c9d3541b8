//! The two resolution passes.

use rustc_hash::FxHashMap;
use tracing::{debug, trace};
use vitte_diagnostic::{Diagnostic, DiagnosticSink, ErrorCode};
use vitte_ir::{Ast, Name, NodeId, NodeKind, Span, StringInterner};
use vitte_stack::ensure_sufficient_stack;

use crate::scope::{ScopeKind, ScopeStack};
use crate::suggest::suggest_similar;
use crate::{is_builtin_type_name, ResolveResult, Symbol, SymbolId, SymbolKind};

pub(crate) struct Resolver<'a> {
    ast: &'a Ast,
    interner: &'a StringInterner,
    sink: &'a mut dyn DiagnosticSink,
    scopes: ScopeStack,
    symbols: Vec<Symbol>,
    node_to_symbol: FxHashMap<NodeId, SymbolId>,
    errors: usize,
}

/// A name about to be defined.
struct Decl {
    kind: SymbolKind,
    name: Name,
    decl: NodeId,
    span: Span,
    ty_node: NodeId,
    init: NodeId,
}

impl Decl {
    fn new(kind: SymbolKind, name: Name, decl: NodeId, span: Span) -> Self {
        Decl {
            kind,
            name,
            decl,
            span,
            ty_node: NodeId::INVALID,
            init: NodeId::INVALID,
        }
    }
}

impl<'a> Resolver<'a> {
    pub fn new(ast: &'a Ast, interner: &'a StringInterner, sink: &'a mut dyn DiagnosticSink) -> Self {
        Resolver {
            ast,
            interner,
            sink,
            scopes: ScopeStack::new(),
            symbols: Vec::new(),
            node_to_symbol: FxHashMap::default(),
            errors: 0,
        }
    }

    pub fn run(mut self, root: NodeId) -> ResolveResult {
        let ast = self.ast;
        let items = ast.children(root);
        for &item in items {
            self.collect_item(item);
        }
        for &item in items {
            self.resolve_item(item);
        }
        debug_assert_eq!(self.scopes.depth(), 1, "unbalanced scopes");
        debug!(
            symbols = self.symbols.len(),
            bindings = self.node_to_symbol.len(),
            errors = self.errors,
            "resolved"
        );
        ResolveResult {
            ok: self.errors == 0,
            symbols: self.symbols,
            node_to_symbol: self.node_to_symbol,
        }
    }

    // ── Symbols ───────────────────────────────────────────────────────

    /// Create a symbol and define it in the innermost scope. A clash in
    /// that scope is reported and the new symbol stays unreachable by name.
    fn define(&mut self, decl: Decl) -> SymbolId {
        let raw = u32::try_from(self.symbols.len() + 1).unwrap_or(u32::MAX);
        let id = SymbolId::from_raw(raw);
        let (name, span) = (decl.name, decl.span);
        self.symbols.push(Symbol {
            kind: decl.kind,
            name,
            decl: decl.decl,
            span,
            ty_node: decl.ty_node,
            init: decl.init,
        });
        trace!(?id, name = self.interner.lookup(name), kind = decl.kind.as_str(), "define");

        if let Err(existing) = self.scopes.define(name, id) {
            let previous = self.symbols.get(existing.index()).map_or(span, |s| s.span);
            self.error(
                Diagnostic::error(ErrorCode::E2006)
                    .with_message(format!("duplicate definition of `{}`", self.interner.lookup(name)))
                    .with_span(span)
                    .with_label(previous, "previous definition here"),
            );
        }
        id
    }

    fn bind(&mut self, node: NodeId, id: SymbolId) {
        self.node_to_symbol.insert(node, id);
    }

    fn error(&mut self, diag: Diagnostic) {
        self.errors += 1;
        self.sink.emit(diag);
    }

    fn symbol_kind(&self, id: SymbolId) -> Option<SymbolKind> {
        self.symbols.get(id.index()).map(|s| s.kind)
    }

    fn undefined(&mut self, node: NodeId, name: Name) {
        let spelled = self.interner.lookup(name);
        let interner = self.interner;
        let suggestion =
            suggest_similar(spelled, self.scopes.visible_names().map(|n| interner.lookup(n)));
        let mut diag = Diagnostic::error(ErrorCode::E2003)
            .with_message(format!("undefined identifier `{spelled}`"))
            .with_span(self.ast.span(node));
        if let Some(similar) = suggestion {
            diag = diag.with_note(format!("did you mean `{similar}`?"));
        }
        self.error(diag);
    }

    // ── Pass 1 ────────────────────────────────────────────────────────

    fn collect_item(&mut self, item: NodeId) {
        let kind = match self.ast.kind(item) {
            NodeKind::TypeAlias | NodeKind::Struct | NodeKind::Union | NodeKind::Enum => SymbolKind::Type,
            NodeKind::Fn | NodeKind::Scn | NodeKind::Entry => SymbolKind::Function,
            NodeKind::Mod => SymbolKind::Module,
            NodeKind::Use => SymbolKind::UseAlias,
            _ => return,
        };
        let Some(name) = self.ast.name(item) else {
            return;
        };
        let id = self.define(Decl::new(kind, name, item, self.ast.span(item)));
        self.bind(item, id);
    }

    // ── Pass 2 ────────────────────────────────────────────────────────

    fn resolve_item(&mut self, item: NodeId) {
        let ast = self.ast;
        match ast.kind(item) {
            NodeKind::Fn | NodeKind::Scn | NodeKind::Entry => self.resolve_fn_like(item),
            NodeKind::TypeAlias => self.resolve_type_path(ast.child(item, 0)),
            NodeKind::Struct | NodeKind::Union | NodeKind::Enum => {
                // Field types and enum payloads.
                for &member in ast.children(ast.child(item, 0)) {
                    self.resolve_type_path(ast.child(member, 0));
                }
            }
            // Module paths name files, not symbols.
            NodeKind::Mod | NodeKind::Use | NodeKind::Export => {}
            _ => self.resolve_stmt(item),
        }
    }

    /// Params live in the function scope. The body opens a block scope
    /// of its own, so a `let` may shadow a param.
    fn resolve_fn_like(&mut self, item: NodeId) {
        let ast = self.ast;
        self.scopes.push(ScopeKind::Function);
        for &child in ast.children(item) {
            match ast.kind(child) {
                NodeKind::Params => {
                    for &param in ast.children(child) {
                        self.define_param(param);
                    }
                }
                // The return type. An entry's path is its name.
                NodeKind::Path if ast.kind(item) != NodeKind::Entry => self.resolve_type_path(child),
                NodeKind::Block => self.resolve_block(child),
                _ => {}
            }
        }
        self.scopes.pop();
    }

    fn define_param(&mut self, param: NodeId) {
        let ty_node = self.ast.find_child(param, NodeKind::Path).unwrap_or(NodeId::INVALID);
        self.resolve_type_path(ty_node);
        let Some(name) = self.ast.name(param) else {
            return;
        };
        let mut decl = Decl::new(SymbolKind::Param, name, param, self.ast.span(param));
        decl.ty_node = ty_node;
        let id = self.define(decl);
        self.bind(param, id);
    }

    fn resolve_block(&mut self, block: NodeId) {
        self.scopes.push(ScopeKind::Block);
        self.resolve_stmts(block);
        self.scopes.pop();
    }

    fn resolve_stmts(&mut self, block: NodeId) {
        let ast = self.ast;
        for &stmt in ast.children(block) {
            self.resolve_stmt(stmt);
        }
    }

    fn resolve_stmt(&mut self, stmt: NodeId) {
        ensure_sufficient_stack(|| self.resolve_stmt_inner(stmt));
    }

    fn resolve_stmt_inner(&mut self, stmt: NodeId) {
        let ast = self.ast;
        match ast.kind(stmt) {
            NodeKind::Let | NodeKind::Const => self.resolve_binding(stmt),
            NodeKind::If | NodeKind::Elif | NodeKind::Else | NodeKind::While => {
                for &child in ast.children(stmt) {
                    match ast.kind(child) {
                        NodeKind::Block => self.resolve_block(child),
                        NodeKind::Elif | NodeKind::Else => self.resolve_stmt(child),
                        _ => self.resolve_expr(child),
                    }
                }
            }
            NodeKind::For => self.resolve_for(stmt),
            NodeKind::Match => {
                let children = ast.children(stmt);
                if let Some((&scrutinee, arms)) = children.split_first() {
                    self.resolve_expr(scrutinee);
                    for &arm in arms {
                        self.resolve_arm(arm);
                    }
                }
            }
            NodeKind::Block => self.resolve_block(stmt),
            NodeKind::Set | NodeKind::Say | NodeKind::Do | NodeKind::ExprStmt | NodeKind::Return => {
                for &child in ast.children(stmt) {
                    self.resolve_expr(child);
                }
            }
            _ => {}
        }
    }

    /// The initializer is resolved before the name exists, so
    /// `let x = x` reads an outer `x`.
    fn resolve_binding(&mut self, stmt: NodeId) {
        let ast = self.ast;
        let ident = ast.child(stmt, 0);
        let mut ty_node = NodeId::INVALID;
        let mut init = NodeId::INVALID;
        for &child in ast.children(stmt).iter().skip(1) {
            if ast.kind(child) == NodeKind::Path {
                ty_node = child;
                self.resolve_type_path(child);
            } else {
                init = child;
                self.resolve_expr(child);
            }
        }

        let Some(name) = ast.name(stmt) else {
            return;
        };
        let kind = if self.scopes.current_kind() == ScopeKind::Global {
            SymbolKind::Global
        } else {
            SymbolKind::Local
        };
        let mut decl = Decl::new(kind, name, stmt, ast.span(ident));
        decl.ty_node = ty_node;
        decl.init = init;
        let id = self.define(decl);
        self.bind(ident, id);
    }

    /// The iterable sees only outer names; the loop variable is scoped
    /// to the body.
    fn resolve_for(&mut self, stmt: NodeId) {
        let ast = self.ast;
        let var = ast.child(stmt, 0);
        self.resolve_expr(ast.child(stmt, 1));

        self.scopes.push(ScopeKind::Loop);
        if let Some(name) = ast.name(stmt) {
            let id = self.define(Decl::new(SymbolKind::Local, name, stmt, ast.span(var)));
            self.bind(var, id);
        }
        let body = ast.child(stmt, 2);
        if body.is_valid() {
            self.resolve_block(body);
        }
        self.scopes.pop();
    }

    fn resolve_arm(&mut self, arm: NodeId) {
        let ast = self.ast;
        self.scopes.push(ScopeKind::MatchArm);
        self.resolve_pattern(ast.child(arm, 0));
        let body = ast.child(arm, 1);
        if body.is_valid() {
            self.resolve_block(body);
        }
        self.scopes.pop();
    }

    /// A lone name binds when nothing visible has that name and refers
    /// otherwise; dotted paths always refer.
    fn resolve_pattern(&mut self, pat: NodeId) {
        let ast = self.ast;
        match ast.kind(pat) {
            NodeKind::PatIdent => {
                if let Some(name) = ast.name(pat) {
                    let id = self.define(Decl::new(SymbolKind::Local, name, pat, ast.span(pat)));
                    self.bind(pat, id);
                }
            }
            NodeKind::PatPath => {
                let segments = ast.children(pat);
                let Some(&first) = segments.first() else {
                    return;
                };
                let Some(name) = ast.name(first) else {
                    return;
                };
                match self.scopes.lookup(name) {
                    Some(id) => {
                        self.bind(pat, id);
                        self.bind(first, id);
                    }
                    None if segments.len() == 1 => {
                        let id = self.define(Decl::new(SymbolKind::Local, name, pat, ast.span(pat)));
                        self.bind(pat, id);
                        self.bind(first, id);
                    }
                    None => self.undefined(first, name),
                }
            }
            NodeKind::PatTuple => {
                for &elem in ast.children(pat) {
                    ensure_sufficient_stack(|| self.resolve_pattern(elem));
                }
            }
            _ => {}
        }
    }

    fn resolve_expr(&mut self, expr: NodeId) {
        ensure_sufficient_stack(|| self.resolve_expr_inner(expr));
    }

    fn resolve_expr_inner(&mut self, expr: NodeId) {
        let ast = self.ast;
        match ast.kind(expr) {
            NodeKind::Ident => {
                let Some(name) = ast.name(expr) else {
                    return;
                };
                match self.scopes.lookup(name) {
                    Some(id) => self.bind(expr, id),
                    None => self.undefined(expr, name),
                }
            }
            // Field names are not looked up.
            NodeKind::Member => self.resolve_expr(ast.child(expr, 0)),
            NodeKind::Call | NodeKind::Index | NodeKind::Binary | NodeKind::Unary => {
                for &child in ast.children(expr) {
                    self.resolve_expr(child);
                }
            }
            _ => {}
        }
    }

    /// Types are builtins or names of Type, Module or `use` symbols.
    /// Dotted paths check only their first segment.
    fn resolve_type_path(&mut self, path: NodeId) {
        let ast = self.ast;
        if !path.is_valid() || ast.kind(path) != NodeKind::Path {
            return;
        }
        let segments = ast.children(path);
        let Some(&first) = segments.first() else {
            return;
        };
        let Some(name) = ast.name(first) else {
            return;
        };
        if segments.len() == 1 && is_builtin_type_name(self.interner.lookup(name)) {
            return;
        }

        let found = self
            .scopes
            .lookup(name)
            .filter(|&id| self.symbol_kind(id).is_some_and(SymbolKind::names_type));
        match found {
            Some(id) => {
                self.bind(path, id);
                self.bind(first, id);
            }
            None => {
                let spelled = self.interner.lookup(name);
                self.error(
                    Diagnostic::error(ErrorCode::E2004)
                        .with_message(format!("undefined type `{spelled}`"))
                        .with_span(ast.span(path)),
                );
            }
        }
    }
}
