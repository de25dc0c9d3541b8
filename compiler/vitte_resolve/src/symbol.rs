//! Symbols: one per declared name.

use std::fmt;

use vitte_ir::{Name, NodeId, Span};

/// Index into [`ResolveResult::symbols`](crate::ResolveResult), starting at 1.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct SymbolId(u32);

impl SymbolId {
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        SymbolId(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Position in the symbol vector. The zero id maps past any table.
    #[inline]
    pub const fn index(self) -> usize {
        self.0.wrapping_sub(1) as usize
    }
}

impl fmt::Debug for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SymbolId({})", self.0)
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum SymbolKind {
    /// `let`/`const` at file scope.
    Global,
    Type,
    Function,
    Param,
    Local,
    Module,
    UseAlias,
}

impl SymbolKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            SymbolKind::Global => "global",
            SymbolKind::Type => "type",
            SymbolKind::Function => "function",
            SymbolKind::Param => "parameter",
            SymbolKind::Local => "local",
            SymbolKind::Module => "module",
            SymbolKind::UseAlias => "use alias",
        }
    }

    /// Kinds a type path may name.
    pub const fn names_type(self) -> bool {
        matches!(self, SymbolKind::Type | SymbolKind::Module | SymbolKind::UseAlias)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Symbol {
    pub kind: SymbolKind,
    pub name: Name,
    /// Declaring node: the item, `Param`, `Let`/`Const`, `For`, or pattern.
    pub decl: NodeId,
    /// Where the name was written.
    pub span: Span,
    /// Annotation `Path`, or `NodeId::INVALID`.
    pub ty_node: NodeId,
    /// Initializer expression of a binding, or `NodeId::INVALID`.
    pub init: NodeId,
}

/// Type names every file can use without declaring them.
pub fn is_builtin_type_name(name: &str) -> bool {
    matches!(
        name,
        "int" | "i32" | "i64" | "float" | "f32" | "f64" | "bool" | "char" | "string" | "str"
            | "null" | "unit" | "void"
    )
}
