//! Block IR data model.

use std::fmt;

use vitte_hir::{HirInst, Reg};
use vitte_ir::Name;

/// Index of a block in [`LirFunction::blocks`]. Block 0 is the entry.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct BlockId(u32);

impl BlockId {
    pub const ENTRY: BlockId = BlockId(0);

    #[inline]
    pub const fn new(raw: u32) -> Self {
        BlockId(raw)
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

impl fmt::Debug for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "bb{}", self.0)
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "bb{}", self.0)
    }
}

/// How control leaves a block.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Terminator {
    /// Not yet assigned. Never present in a validated module.
    None,
    Jump(BlockId),
    /// Go to `then_bb` when `cond` holds, else to `else_bb`.
    Branch {
        cond: Reg,
        then_bb: BlockId,
        else_bb: BlockId,
    },
    Return(Reg),
}

impl Terminator {
    /// Successor blocks, in `then`/`else` order for branches.
    pub fn successors(&self) -> impl Iterator<Item = BlockId> {
        let pair = match *self {
            Terminator::Jump(target) => [Some(target), None],
            Terminator::Branch {
                then_bb, else_bb, ..
            } => [Some(then_bb), Some(else_bb)],
            Terminator::None | Terminator::Return(_) => [None, None],
        };
        pair.into_iter().flatten()
    }
}

/// Block body instruction. Same opcodes as HIR, minus `Jmp`, `JmpIf` and
/// `Ret`, which only appear as a [`Terminator`].
pub type LirInst = HirInst;

#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BasicBlock {
    pub id: BlockId,
    pub insts: Vec<LirInst>,
    pub term: Terminator,
}

#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LirFunction {
    pub name: Name,
    pub reg_count: u32,
    pub locals: Vec<Name>,
    pub blocks: Vec<BasicBlock>,
}

impl LirFunction {
    pub fn block(&self, id: BlockId) -> Option<&BasicBlock> {
        self.blocks.get(id.index())
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LirModule {
    pub name: Name,
    pub functions: Vec<LirFunction>,
}

impl LirModule {
    pub fn function(&self, name: Name) -> Option<&LirFunction> {
        self.functions.iter().find(|f| f.name == name)
    }

    pub fn block_count(&self) -> usize {
        self.functions.iter().map(|f| f.blocks.len()).sum()
    }
}
