//! Text dumps of LIR modules.
//!
//! ```text
//! module root
//!
//! fn add (regs=3 locals=2 blocks=1)
//!   bb0:
//!     r1 = load a
//!     r2 = load b
//!     r3 = r1 + r2
//!     ret r3
//! ```

use std::fmt;

use vitte_ir::StringInterner;

use crate::{LirModule, Terminator};

/// [`LirModule`] paired with the interner its names live in.
pub struct LirDisplay<'a> {
    module: &'a LirModule,
    interner: &'a StringInterner,
}

impl LirModule {
    pub fn display<'a>(&'a self, interner: &'a StringInterner) -> LirDisplay<'a> {
        LirDisplay {
            module: self,
            interner,
        }
    }
}

impl fmt::Display for Terminator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Terminator::None => write!(f, "<no terminator>"),
            Terminator::Jump(target) => write!(f, "jmp {target}"),
            Terminator::Branch {
                cond,
                then_bb,
                else_bb,
            } => write!(f, "br {cond}, {then_bb}, {else_bb}"),
            Terminator::Return(value) if value.is_none() => write!(f, "ret"),
            Terminator::Return(value) => write!(f, "ret {value}"),
        }
    }
}

impl fmt::Display for LirDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let interner = self.interner;
        writeln!(f, "module {}", interner.lookup(self.module.name))?;
        for func in &self.module.functions {
            writeln!(f)?;
            writeln!(
                f,
                "fn {} (regs={} locals={} blocks={})",
                interner.lookup(func.name),
                func.reg_count,
                func.locals.len(),
                func.blocks.len()
            )?;
            for block in &func.blocks {
                writeln!(f, "  {}:", block.id)?;
                for inst in &block.insts {
                    writeln!(f, "    {}", inst.display(&func.locals, interner))?;
                }
                writeln!(f, "    {}", block.term)?;
            }
        }
        Ok(())
    }
}
