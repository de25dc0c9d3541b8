//! HIR data model: one flat instruction stream per function.
//!
//! Values live in virtual registers ([`Reg`]), named variables in local
//! slots ([`LocalId`]). Control flow is expressed with jumps to
//! instruction indices ([`InstIdx`]); the IR builder later cuts the stream
//! into basic blocks at those targets.

use std::fmt;

use smallvec::SmallVec;
use vitte_ir::{BinaryOp, Name, NodeId, Span, UnaryOp};

// ── ID newtypes ─────────────────────────────────────────────────────

/// Virtual register. Registers are allocated from 1; [`Reg::NONE`] marks
/// an instruction that produces no value.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct Reg(u32);

impl Reg {
    pub const NONE: Reg = Reg(0);

    #[inline]
    pub const fn new(raw: u32) -> Self {
        Reg(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Debug for Reg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            write!(f, "Reg::NONE")
        } else {
            write!(f, "r{}", self.0)
        }
    }
}

impl fmt::Display for Reg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}", self.0)
    }
}

/// Index into [`HirFunction::locals`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct LocalId(u32);

impl LocalId {
    #[inline]
    pub const fn new(raw: u32) -> Self {
        LocalId(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Position of an instruction in [`HirFunction::insts`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct InstIdx(u32);

impl InstIdx {
    #[inline]
    pub const fn new(raw: u32) -> Self {
        InstIdx(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for InstIdx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.0)
    }
}

// ── Instructions ────────────────────────────────────────────────────

/// Call target.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Callee {
    /// A function declared in this module, by name.
    Direct(Name),
    /// Any other callee, evaluated into a register first.
    Indirect(Reg),
}

#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HirOp {
    Nop,
    ConstInt(i64),
    /// Bit pattern of the `f64` value.
    ConstFloat(u64),
    /// Raw literal text, quotes included.
    ConstStr(Name),
    ConstBool(bool),
    ConstNull,
    LocalGet(LocalId),
    LocalSet(LocalId, Reg),
    Call {
        callee: Callee,
        args: SmallVec<[Reg; 4]>,
    },
    Jmp(InstIdx),
    JmpIf {
        cond: Reg,
        target: InstIdx,
    },
    /// Return `Reg::NONE` for a bare `return`.
    Ret(Reg),
    Binary(BinaryOp, Reg, Reg),
    Unary(UnaryOp, Reg),
}

impl HirOp {
    pub fn const_float(value: f64) -> Self {
        HirOp::ConstFloat(value.to_bits())
    }

    /// `Jmp`, `JmpIf` and `Ret` end a basic block.
    pub const fn is_terminator(&self) -> bool {
        matches!(self, HirOp::Jmp(_) | HirOp::JmpIf { .. } | HirOp::Ret(_))
    }

    /// Target of a `Jmp` or `JmpIf`.
    pub const fn jump_target(&self) -> Option<InstIdx> {
        match self {
            HirOp::Jmp(target) | HirOp::JmpIf { target, .. } => Some(*target),
            _ => None,
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HirInst {
    pub op: HirOp,
    /// Register written, or `Reg::NONE`.
    pub dst: Reg,
    pub span: Span,
}

// ── Functions and modules ───────────────────────────────────────────

#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HirFunction {
    pub name: Name,
    pub span: Span,
    /// Highest register number allocated.
    pub reg_count: u32,
    /// Slot names; parameters come first, in declaration order.
    pub locals: Vec<Name>,
    pub insts: Vec<HirInst>,
}

impl HirFunction {
    pub fn local_name(&self, local: LocalId) -> Option<Name> {
        self.locals.get(local.index()).copied()
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HirSymbolKind {
    Function,
    Type,
    Global,
    Module,
}

impl HirSymbolKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            HirSymbolKind::Function => "function",
            HirSymbolKind::Type => "type",
            HirSymbolKind::Global => "global",
            HirSymbolKind::Module => "module",
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HirSymbol {
    pub name: Name,
    pub kind: HirSymbolKind,
    pub decl: NodeId,
}

#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HirModule {
    pub name: Name,
    /// Module-level symbols, one per name.
    pub symbols: Vec<HirSymbol>,
    pub functions: Vec<HirFunction>,
}

impl HirModule {
    pub fn function(&self, name: Name) -> Option<&HirFunction> {
        self.functions.iter().find(|f| f.name == name)
    }
}
