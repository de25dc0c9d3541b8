//! Lexical scope stack.

use rustc_hash::FxHashMap;
use vitte_ir::Name;

use crate::SymbolId;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ScopeKind {
    Global,
    Function,
    Block,
    Loop,
    MatchArm,
}

#[derive(Debug)]
struct Scope {
    kind: ScopeKind,
    names: FxHashMap<Name, SymbolId>,
}

/// Innermost scope last. The global scope is never popped.
#[derive(Debug)]
pub(crate) struct ScopeStack {
    scopes: Vec<Scope>,
}

impl ScopeStack {
    pub fn new() -> Self {
        ScopeStack {
            scopes: vec![Scope {
                kind: ScopeKind::Global,
                names: FxHashMap::default(),
            }],
        }
    }

    pub fn push(&mut self, kind: ScopeKind) {
        self.scopes.push(Scope {
            kind,
            names: FxHashMap::default(),
        });
    }

    pub fn pop(&mut self) {
        debug_assert!(self.scopes.len() > 1, "popped the global scope");
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    pub fn current_kind(&self) -> ScopeKind {
        self.scopes.last().map_or(ScopeKind::Global, |s| s.kind)
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Define `name` in the innermost scope. On a clash within that scope
    /// nothing changes and the earlier symbol is returned.
    pub fn define(&mut self, name: Name, id: SymbolId) -> Result<(), SymbolId> {
        let Some(scope) = self.scopes.last_mut() else {
            return Ok(());
        };
        match scope.names.get(&name) {
            Some(&existing) => Err(existing),
            None => {
                scope.names.insert(name, id);
                Ok(())
            }
        }
    }

    /// Innermost binding of `name`.
    pub fn lookup(&self, name: Name) -> Option<SymbolId> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.names.get(&name).copied())
    }

    /// Every name visible from the innermost scope.
    pub fn visible_names(&self) -> impl Iterator<Item = Name> + '_ {
        self.scopes.iter().flat_map(|scope| scope.names.keys().copied())
    }
}
