//! Text dumps of HIR modules and instructions.
//!
//! ```text
//! module root
//!   function add
//!
//! fn add (regs=3 locals=2 insts=4)
//!      0: r1 = load a
//!      1: r2 = load b
//!      2: r3 = r1 + r2
//!      3: ret r3
//! ```

use std::fmt;

use vitte_ir::{Name, StringInterner};

use crate::{Callee, HirInst, HirModule, HirOp, LocalId};

/// [`HirModule`] paired with the interner its names live in.
pub struct ModuleDisplay<'a> {
    module: &'a HirModule,
    interner: &'a StringInterner,
}

/// One instruction, with local slots shown by name.
pub struct InstDisplay<'a> {
    inst: &'a HirInst,
    locals: &'a [Name],
    interner: &'a StringInterner,
}

impl HirModule {
    pub fn display<'a>(&'a self, interner: &'a StringInterner) -> ModuleDisplay<'a> {
        ModuleDisplay {
            module: self,
            interner,
        }
    }
}

impl HirInst {
    /// `locals` are the slot names of the enclosing function.
    pub fn display<'a>(
        &'a self,
        locals: &'a [Name],
        interner: &'a StringInterner,
    ) -> InstDisplay<'a> {
        InstDisplay {
            inst: self,
            locals,
            interner,
        }
    }
}

impl fmt::Display for ModuleDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let interner = self.interner;
        writeln!(f, "module {}", interner.lookup(self.module.name))?;
        for symbol in &self.module.symbols {
            writeln!(f, "  {} {}", symbol.kind.as_str(), interner.lookup(symbol.name))?;
        }
        for func in &self.module.functions {
            writeln!(f)?;
            writeln!(
                f,
                "fn {} (regs={} locals={} insts={})",
                interner.lookup(func.name),
                func.reg_count,
                func.locals.len(),
                func.insts.len()
            )?;
            for (i, inst) in func.insts.iter().enumerate() {
                writeln!(f, "  {i:>4}: {}", inst.display(&func.locals, interner))?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for InstDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let interner = self.interner;
        let local = |id: LocalId| {
            self.locals
                .get(id.index())
                .map_or("<slot?>", |&name| interner.lookup(name))
        };

        if !self.inst.dst.is_none() {
            write!(f, "{} = ", self.inst.dst)?;
        }
        match &self.inst.op {
            HirOp::Nop => write!(f, "nop"),
            HirOp::ConstInt(v) => write!(f, "const {v}"),
            HirOp::ConstFloat(bits) => write!(f, "const {:?}", f64::from_bits(*bits)),
            HirOp::ConstStr(text) => write!(f, "const {}", interner.lookup(*text)),
            HirOp::ConstBool(b) => write!(f, "const {b}"),
            HirOp::ConstNull => write!(f, "const null"),
            HirOp::LocalGet(id) => write!(f, "load {}", local(*id)),
            HirOp::LocalSet(id, value) => write!(f, "store {}, {value}", local(*id)),
            HirOp::Call { callee, args } => {
                match callee {
                    Callee::Direct(name) => write!(f, "call {}(", interner.lookup(*name))?,
                    Callee::Indirect(reg) => write!(f, "call {reg}(")?,
                }
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                write!(f, ")")
            }
            HirOp::Jmp(target) => write!(f, "jmp @{}", target.raw()),
            HirOp::JmpIf { cond, target } => write!(f, "jmpif {cond}, @{}", target.raw()),
            HirOp::Ret(value) if value.is_none() => write!(f, "ret"),
            HirOp::Ret(value) => write!(f, "ret {value}"),
            HirOp::Binary(op, lhs, rhs) => write!(f, "{lhs} {} {rhs}", op.as_symbol()),
            HirOp::Unary(op, operand) => write!(f, "{}{operand}", op.as_symbol()),
        }
    }
}
