//! HIR → LIR block construction.
//!
//! 1. Leaders: index 0, every jump target, and every index that follows a
//!    `Jmp`, `JmpIf` or `Ret` inside the stream.
//! 2. One block per distinct leader, covering `[leader_i, leader_{i+1})`.
//! 3. The jump or return ending a range becomes the block terminator;
//!    `JmpIf` falls through to the lexically next block.
//! 4. A range without one jumps to the next block, or returns from the
//!    last block.

use tracing::{debug, trace};
use vitte_hir::{HirFunction, HirModule, HirOp, Reg};

use crate::{BasicBlock, BlockId, LirError, LirFunction, LirModule, Terminator};

/// Build the block form of every function in `hir`.
#[tracing::instrument(level = "debug", skip_all)]
pub fn build_from_hir(hir: &HirModule) -> Result<LirModule, LirError> {
    let functions = hir
        .functions
        .iter()
        .enumerate()
        .map(|(index, func)| build_function(index, func))
        .collect::<Result<Vec<_>, _>>()?;
    let module = LirModule {
        name: hir.name,
        functions,
    };
    debug!(
        functions = module.functions.len(),
        blocks = module.block_count(),
        "built LIR"
    );
    Ok(module)
}

/// Sorted, distinct leader indices of `func`.
fn leaders(index: usize, func: &HirFunction) -> Result<Vec<usize>, LirError> {
    let len = func.insts.len();
    let mut leaders = vec![0];
    for (at, inst) in func.insts.iter().enumerate() {
        if let Some(target) = inst.op.jump_target() {
            let target = target.index();
            if target >= len {
                return Err(LirError::TargetOutOfRange {
                    function: index,
                    at,
                    target,
                    len,
                });
            }
            leaders.push(target);
        }
        if inst.op.is_terminator() && at + 1 < len {
            leaders.push(at + 1);
        }
    }
    leaders.sort_unstable();
    leaders.dedup();
    Ok(leaders)
}

/// The block whose range contains instruction `at`.
#[expect(
    clippy::cast_possible_truncation,
    reason = "block count bounded by instruction count"
)]
fn block_of(leaders: &[usize], at: usize) -> BlockId {
    let block = leaders.partition_point(|&leader| leader <= at).saturating_sub(1);
    BlockId::new(block as u32)
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "block count bounded by instruction count"
)]
fn build_function(index: usize, func: &HirFunction) -> Result<LirFunction, LirError> {
    let leaders = leaders(index, func)?;
    let len = func.insts.len();
    let block_count = leaders.len();
    let mut reg_count = func.reg_count;
    let mut blocks = Vec::with_capacity(block_count);

    for (b, &start) in leaders.iter().enumerate() {
        let end = leaders.get(b + 1).copied().unwrap_or(len);
        let next = (b + 1 < block_count).then_some(BlockId::new((b + 1) as u32));
        let mut insts = Vec::with_capacity(end - start);
        let mut term = Terminator::None;

        for (at, inst) in func.insts[start..end].iter().enumerate() {
            reg_count = reg_count.max(inst.dst.raw());
            term = match inst.op {
                HirOp::Jmp(target) => Terminator::Jump(block_of(&leaders, target.index())),
                HirOp::JmpIf { cond, target } => {
                    let Some(else_bb) = next else {
                        return Err(LirError::MissingFallthrough {
                            function: index,
                            at: start + at,
                        });
                    };
                    Terminator::Branch {
                        cond,
                        then_bb: block_of(&leaders, target.index()),
                        else_bb,
                    }
                }
                HirOp::Ret(value) => Terminator::Return(value),
                _ => {
                    insts.push(inst.clone());
                    continue;
                }
            };
            break;
        }

        if term == Terminator::None {
            term = next.map_or(Terminator::Return(Reg::NONE), Terminator::Jump);
        }
        trace!(block = b, start, end, ?term, "block");
        blocks.push(BasicBlock {
            id: BlockId::new(b as u32),
            insts,
            term,
        });
    }

    Ok(LirFunction {
        name: func.name,
        reg_count,
        locals: func.locals.clone(),
        blocks,
    })
}
