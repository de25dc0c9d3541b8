//! Name resolution for Vitte.
//!
//! Binds every identifier use to the declaration it refers to. The
//! result is a symbol table plus a side table from AST node to symbol;
//! later stages key on [`NodeId`] and never hold references into the AST.
//!
//! Resolution runs in two passes over one file:
//! 1. collect toplevel declarations into the global scope, so functions
//!    and types may be used before they are declared;
//! 2. walk bodies with a scope stack, binding uses and defining locals.

mod resolver;
mod scope;
mod suggest;
mod symbol;

use rustc_hash::FxHashMap;
use vitte_diagnostic::DiagnosticSink;
use vitte_ir::{Ast, NodeId, StringInterner};

pub use scope::ScopeKind;
pub use symbol::{is_builtin_type_name, Symbol, SymbolId, SymbolKind};

/// Symbols and bindings for one file.
#[derive(Clone, Debug, Default)]
pub struct ResolveResult {
    /// False iff at least one error was reported.
    pub ok: bool,
    /// Every symbol, indexed by `SymbolId::index`.
    pub symbols: Vec<Symbol>,
    /// Identifier uses, declaration names and type paths that resolved.
    pub node_to_symbol: FxHashMap<NodeId, SymbolId>,
}

impl ResolveResult {
    pub fn lookup_node(&self, node: NodeId) -> Option<SymbolId> {
        self.node_to_symbol.get(&node).copied()
    }

    pub fn symbol(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get(id.index())
    }

    /// The symbol `node` is bound to, if any.
    pub fn symbol_of(&self, node: NodeId) -> Option<&Symbol> {
        self.lookup_node(node).and_then(|id| self.symbol(id))
    }
}

/// Resolve the file rooted at `root`, reporting problems to `sink`.
#[tracing::instrument(level = "debug", skip_all)]
pub fn resolve(
    ast: &Ast,
    root: NodeId,
    interner: &StringInterner,
    sink: &mut dyn DiagnosticSink,
) -> ResolveResult {
    resolver::Resolver::new(ast, interner, sink).run(root)
}
