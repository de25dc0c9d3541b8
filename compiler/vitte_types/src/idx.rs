//! Type handles.
//!
//! Builtins have fixed ids so that comparing against them needs no pool.
//! Every other type is interned, so equal types share one id and type
//! equality is an integer compare.

use std::fmt;

#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct TypeId(u32);

impl TypeId {
    /// Not a type. Never handed out by a pool.
    pub const INVALID: Self = Self(0);
    /// A type error already reported; compatible with everything.
    pub const ERROR: Self = Self(1);
    /// Not known without more information; compatible with everything.
    pub const UNKNOWN: Self = Self(2);
    pub const UNIT: Self = Self(3);
    pub const NULL: Self = Self(4);
    pub const BOOL: Self = Self(5);
    pub const INT: Self = Self(6);
    pub const FLOAT: Self = Self(7);
    pub const CHAR: Self = Self(8);
    pub const STRING: Self = Self(9);

    /// First id handed out for nominal and function types.
    pub const FIRST_DYNAMIC: u32 = 10;

    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn is_builtin(self) -> bool {
        self.0 > 0 && self.0 < Self::FIRST_DYNAMIC
    }

    /// `error` or `unknown`: accepted wherever a type is expected.
    #[inline]
    pub const fn is_lenient(self) -> bool {
        self.0 == Self::ERROR.0 || self.0 == Self::UNKNOWN.0
    }

    #[inline]
    pub const fn is_numeric(self) -> bool {
        self.0 == Self::INT.0 || self.0 == Self::FLOAT.0
    }

    /// Display name of a builtin.
    pub const fn name(self) -> Option<&'static str> {
        match self.0 {
            1 => Some("<error>"),
            2 => Some("<unknown>"),
            3 => Some("unit"),
            4 => Some("null"),
            5 => Some("bool"),
            6 => Some("int"),
            7 => Some("float"),
            8 => Some("char"),
            9 => Some("string"),
            _ => None,
        }
    }

    /// Builtin named by a type annotation, with aliases folded.
    pub fn from_builtin_name(name: &str) -> Option<Self> {
        Some(match name {
            "int" | "i32" | "i64" => Self::INT,
            "float" | "f32" | "f64" => Self::FLOAT,
            "bool" => Self::BOOL,
            "char" => Self::CHAR,
            "string" | "str" => Self::STRING,
            "null" => Self::NULL,
            "unit" | "void" => Self::UNIT,
            _ => return None,
        })
    }
}

impl fmt::Debug for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "TypeId({name})"),
            None => write!(f, "TypeId({})", self.0),
        }
    }
}
