//! AST node kinds.

/// Kind tag of an AST node.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeKind {
    // Declarations
    File,
    Mod,
    Use,
    Export,
    TypeAlias,
    Struct,
    Union,
    Enum,
    Fn,
    Scn,
    Entry,

    // Declaration parts
    Path,
    Params,
    Param,
    Fields,
    Field,
    EnumBody,
    EnumEntry,
    Block,

    // Statements
    Let,
    Const,
    Set,
    Say,
    Do,
    If,
    Elif,
    Else,
    While,
    For,
    Match,
    MatchArm,
    Break,
    Continue,
    Return,
    ExprStmt,

    // Expressions
    Ident,
    Int,
    Float,
    String,
    Char,
    Bool,
    Null,
    Unary,
    Binary,
    Call,
    Member,
    Index,

    // Patterns
    PatWildcard,
    PatIdent,
    PatLiteral,
    PatPath,
    PatTuple,

    Error,
}

impl NodeKind {
    /// Type declarations (aliases and aggregate bodies).
    pub const fn is_type_decl(self) -> bool {
        matches!(
            self,
            NodeKind::TypeAlias | NodeKind::Struct | NodeKind::Union | NodeKind::Enum
        )
    }

    /// Declarations with a parameter list and a body block.
    pub const fn is_fn_like(self) -> bool {
        matches!(self, NodeKind::Fn | NodeKind::Scn | NodeKind::Entry)
    }

    pub const fn is_literal(self) -> bool {
        matches!(
            self,
            NodeKind::Int
                | NodeKind::Float
                | NodeKind::String
                | NodeKind::Char
                | NodeKind::Bool
                | NodeKind::Null
        )
    }

    pub const fn is_expr(self) -> bool {
        self.is_literal()
            || matches!(
                self,
                NodeKind::Ident
                    | NodeKind::Unary
                    | NodeKind::Binary
                    | NodeKind::Call
                    | NodeKind::Member
                    | NodeKind::Index
            )
    }

    pub const fn is_pattern(self) -> bool {
        matches!(
            self,
            NodeKind::PatWildcard
                | NodeKind::PatIdent
                | NodeKind::PatLiteral
                | NodeKind::PatPath
                | NodeKind::PatTuple
        )
    }

    /// Name used by the tree dump.
    pub const fn as_str(self) -> &'static str {
        match self {
            NodeKind::File => "File",
            NodeKind::Mod => "Mod",
            NodeKind::Use => "Use",
            NodeKind::Export => "Export",
            NodeKind::TypeAlias => "TypeAlias",
            NodeKind::Struct => "Struct",
            NodeKind::Union => "Union",
            NodeKind::Enum => "Enum",
            NodeKind::Fn => "Fn",
            NodeKind::Scn => "Scn",
            NodeKind::Entry => "Entry",
            NodeKind::Path => "Path",
            NodeKind::Params => "Params",
            NodeKind::Param => "Param",
            NodeKind::Fields => "Fields",
            NodeKind::Field => "Field",
            NodeKind::EnumBody => "EnumBody",
            NodeKind::EnumEntry => "EnumEntry",
            NodeKind::Block => "Block",
            NodeKind::Let => "Let",
            NodeKind::Const => "Const",
            NodeKind::Set => "Set",
            NodeKind::Say => "Say",
            NodeKind::Do => "Do",
            NodeKind::If => "If",
            NodeKind::Elif => "Elif",
            NodeKind::Else => "Else",
            NodeKind::While => "While",
            NodeKind::For => "For",
            NodeKind::Match => "Match",
            NodeKind::MatchArm => "MatchArm",
            NodeKind::Break => "Break",
            NodeKind::Continue => "Continue",
            NodeKind::Return => "Return",
            NodeKind::ExprStmt => "ExprStmt",
            NodeKind::Ident => "Ident",
            NodeKind::Int => "Int",
            NodeKind::Float => "Float",
            NodeKind::String => "String",
            NodeKind::Char => "Char",
            NodeKind::Bool => "Bool",
            NodeKind::Null => "Null",
            NodeKind::Unary => "Unary",
            NodeKind::Binary => "Binary",
            NodeKind::Call => "Call",
            NodeKind::Member => "Member",
            NodeKind::Index => "Index",
            NodeKind::PatWildcard => "PatWildcard",
            NodeKind::PatIdent => "PatIdent",
            NodeKind::PatLiteral => "PatLiteral",
            NodeKind::PatPath => "PatPath",
            NodeKind::PatTuple => "PatTuple",
            NodeKind::Error => "Error",
        }
    }
}
