//! Type interning.
//!
//! One pool per checker run. The builtins are interned first, in id
//! order, so their ids match the constants on [`TypeId`].

use rustc_hash::FxHashMap;
use vitte_ir::{Name, StringInterner};

use crate::TypeId;

/// Structure of a type.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum TypeKind {
    Error,
    Unknown,
    Unit,
    Null,
    Bool,
    Int,
    Float,
    Char,
    String,
    /// A declared type, by name.
    Nominal(Name),
    Fn { params: Vec<TypeId>, ret: TypeId },
}

const BUILTINS: [TypeKind; 9] = [
    TypeKind::Error,
    TypeKind::Unknown,
    TypeKind::Unit,
    TypeKind::Null,
    TypeKind::Bool,
    TypeKind::Int,
    TypeKind::Float,
    TypeKind::Char,
    TypeKind::String,
];

#[derive(Clone, Debug)]
pub struct TypePool {
    /// `kinds[i]` is the type with id `i + 1`.
    kinds: Vec<TypeKind>,
    map: FxHashMap<TypeKind, TypeId>,
    /// Spelling of each nominal name, captured at intern time.
    spellings: FxHashMap<Name, &'static str>,
}

impl TypePool {
    pub fn new() -> Self {
        let mut pool = TypePool {
            kinds: Vec::with_capacity(BUILTINS.len() * 2),
            map: FxHashMap::default(),
            spellings: FxHashMap::default(),
        };
        for kind in BUILTINS {
            pool.intern(kind);
        }
        debug_assert_eq!(pool.kinds.len() + 1, TypeId::FIRST_DYNAMIC as usize);
        pool
    }

    /// Id of `kind`, adding it on first sight.
    pub fn intern(&mut self, kind: TypeKind) -> TypeId {
        if let Some(&id) = self.map.get(&kind) {
            return id;
        }
        let raw = u32::try_from(self.kinds.len() + 1).unwrap_or_else(|_| {
            panic!("type pool exceeded u32::MAX entries")
        });
        let id = TypeId::from_raw(raw);
        self.kinds.push(kind.clone());
        self.map.insert(kind, id);
        id
    }

    pub fn nominal(&mut self, name: Name, interner: &StringInterner) -> TypeId {
        self.spellings.entry(name).or_insert_with(|| interner.lookup(name));
        self.intern(TypeKind::Nominal(name))
    }

    pub fn function(&mut self, params: Vec<TypeId>, ret: TypeId) -> TypeId {
        self.intern(TypeKind::Fn { params, ret })
    }

    pub fn kind(&self, id: TypeId) -> Option<&TypeKind> {
        let index = usize::try_from(id.raw()).ok()?.checked_sub(1)?;
        self.kinds.get(index)
    }

    /// Parameter and return types of a function type.
    pub fn signature(&self, id: TypeId) -> Option<(&[TypeId], TypeId)> {
        match self.kind(id)? {
            TypeKind::Fn { params, ret } => Some((params, *ret)),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Render as written in source: `int`, `Point`, `fn(int, int) -> int`.
    pub fn display(&self, id: TypeId) -> String {
        let mut buf = String::new();
        self.display_into(id, &mut buf);
        buf
    }

    fn display_into(&self, id: TypeId, buf: &mut String) {
        if let Some(name) = id.name() {
            buf.push_str(name);
            return;
        }
        match self.kind(id) {
            Some(TypeKind::Nominal(name)) => {
                buf.push_str(self.spellings.get(name).copied().unwrap_or("<nominal>"));
            }
            Some(TypeKind::Fn { params, ret }) => {
                buf.push_str("fn(");
                for (i, &param) in params.iter().enumerate() {
                    if i > 0 {
                        buf.push_str(", ");
                    }
                    self.display_into(param, buf);
                }
                buf.push_str(") -> ");
                self.display_into(*ret, buf);
            }
            _ => buf.push_str("<invalid>"),
        }
    }
}

impl Default for TypePool {
    fn default() -> Self {
        Self::new()
    }
}
