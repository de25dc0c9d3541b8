//! Type checking for Vitte.
//!
//! A single forward pass over the AST that assigns a [`TypeId`] to every
//! expression and statement and reports mismatches. Types are interned
//! in a [`TypePool`] owned by the run; nothing is global.
//!
//! `unknown` and `error` are accepted wherever a type is expected, so
//! code the checker cannot see into (unannotated parameters, calls to
//! unknown callees) and code that already failed never cascade into
//! further errors.

mod check;
mod idx;
mod pool;

use rustc_hash::FxHashMap;
use vitte_diagnostic::DiagnosticSink;
use vitte_ir::{Ast, NodeId, StringInterner};
use vitte_resolve::ResolveResult;

pub use idx::TypeId;
pub use pool::{TypeKind, TypePool};

/// Types of one file.
#[derive(Clone, Debug)]
pub struct TypeckResult {
    /// False iff at least one error (not warning) was reported.
    pub ok: bool,
    pub node_types: FxHashMap<NodeId, TypeId>,
    pub pool: TypePool,
}

impl TypeckResult {
    pub fn type_of(&self, node: NodeId) -> Option<TypeId> {
        self.node_types.get(&node).copied()
    }

    pub fn pool(&self) -> &TypePool {
        &self.pool
    }

    pub fn display(&self, ty: TypeId) -> String {
        self.pool.display(ty)
    }
}

/// Check the file rooted at `root`.
///
/// With `resolved`, identifiers take the types of the symbols they bind
/// to; without it every identifier is `unknown`.
#[tracing::instrument(level = "debug", skip_all)]
pub fn typecheck(
    ast: &Ast,
    root: NodeId,
    interner: &StringInterner,
    resolved: Option<&ResolveResult>,
    sink: &mut dyn DiagnosticSink,
) -> TypeckResult {
    check::Checker::new(ast, interner, resolved, sink).run(root)
}
