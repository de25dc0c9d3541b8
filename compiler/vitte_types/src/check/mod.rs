//! The checker: shared state, annotations and function signatures.
//!
//! Expression typing lives in `expr`, statements and items in `stmt`.

mod expr;
mod stmt;

use rustc_hash::FxHashMap;
use tracing::debug;
use vitte_diagnostic::{Diagnostic, DiagnosticSink, ErrorCode};
use vitte_ir::{Ast, NodeId, NodeKind, StringInterner};
use vitte_resolve::ResolveResult;

use crate::{TypeId, TypePool, TypeckResult};

pub(crate) struct Checker<'a> {
    ast: &'a Ast,
    interner: &'a StringInterner,
    resolved: Option<&'a ResolveResult>,
    sink: &'a mut dyn DiagnosticSink,
    pool: TypePool,
    /// Memo of every typed node, expressions included.
    node_types: FxHashMap<NodeId, TypeId>,
    /// Declared return type of each enclosing function, innermost last.
    return_types: Vec<TypeId>,
    errors: usize,
}

impl<'a> Checker<'a> {
    pub fn new(
        ast: &'a Ast,
        interner: &'a StringInterner,
        resolved: Option<&'a ResolveResult>,
        sink: &'a mut dyn DiagnosticSink,
    ) -> Self {
        Checker {
            ast,
            interner,
            resolved,
            sink,
            pool: TypePool::new(),
            node_types: FxHashMap::default(),
            return_types: Vec::new(),
            errors: 0,
        }
    }

    pub fn run(mut self, root: NodeId) -> TypeckResult {
        let ast = self.ast;
        for &item in ast.children(root) {
            self.check_item(item);
        }
        debug!(
            typed = self.node_types.len(),
            types = self.pool.len(),
            errors = self.errors,
            "typechecked"
        );
        TypeckResult {
            ok: self.errors == 0,
            node_types: self.node_types,
            pool: self.pool,
        }
    }

    // ── Reporting ─────────────────────────────────────────────────────

    fn error(&mut self, code: ErrorCode, node: NodeId, message: String) {
        self.errors += 1;
        self.sink.emit(
            Diagnostic::error(code)
                .with_message(message)
                .with_span(self.ast.span(node)),
        );
    }

    fn warning(&mut self, code: ErrorCode, node: NodeId, message: String) {
        self.sink.emit(
            Diagnostic::warning(code)
                .with_message(message)
                .with_span(self.ast.span(node)),
        );
    }

    /// Report `found` where `expected` is required, unless either is lenient.
    fn expect_type(&mut self, node: NodeId, expected: TypeId, found: TypeId, what: &str) {
        if !compatible(expected, found) {
            let message = format!(
                "{what}: expected {}, found {}",
                self.pool.display(expected),
                self.pool.display(found)
            );
            self.error(ErrorCode::E2001, node, message);
        }
    }

    fn record(&mut self, node: NodeId, ty: TypeId) -> TypeId {
        if node.is_valid() {
            self.node_types.insert(node, ty);
        }
        ty
    }

    // ── Annotations and signatures ────────────────────────────────────

    /// Type named by an annotation `Path`. Builtin names map to builtins,
    /// every other name is nominal. No annotation is `unknown`.
    fn annotation(&mut self, path: NodeId) -> TypeId {
        if !path.is_valid() || self.ast.kind(path) != NodeKind::Path {
            return TypeId::UNKNOWN;
        }
        let Some(name) = self.ast.name(path) else {
            return TypeId::ERROR;
        };
        let ty = TypeId::from_builtin_name(self.interner.lookup(name))
            .unwrap_or_else(|| self.pool.nominal(name, self.interner));
        self.record(path, ty)
    }

    /// `fn(params) -> ret` of a function-like declaration. Unannotated
    /// params are `unknown`; a missing return type is `unit`.
    fn signature_of(&mut self, decl: NodeId) -> TypeId {
        if let Some(&ty) = self.node_types.get(&decl) {
            return ty;
        }
        let ast = self.ast;
        let mut params = Vec::new();
        let mut ret = TypeId::UNIT;
        for &child in ast.children(decl) {
            match ast.kind(child) {
                NodeKind::Params => {
                    for &param in ast.children(child) {
                        let ann = ast.find_child(param, NodeKind::Path).unwrap_or(NodeId::INVALID);
                        let ty = self.annotation(ann);
                        params.push(self.record(param, ty));
                    }
                }
                NodeKind::Path if ast.kind(decl) != NodeKind::Entry => ret = self.annotation(child),
                _ => {}
            }
        }
        let ty = self.pool.function(params, ret);
        self.record(decl, ty)
    }
}

/// Equal, or either side lenient.
pub(crate) fn compatible(a: TypeId, b: TypeId) -> bool {
    a == b || a.is_lenient() || b.is_lenient()
}
