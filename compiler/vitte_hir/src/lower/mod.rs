//! AST → HIR lowering.
//!
//! - [`FnBuilder`] owns the in-progress instruction stream of one function:
//!   register and slot allocation, emission, and jump patching.
//! - [`Lowerer`] walks one function body and drives the builder. Statements
//!   and control flow live here and in `control_flow.rs`, expressions in
//!   `expr.rs`.

mod control_flow;
mod expr;

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, trace};
use vitte_ir::{Ast, Name, NodeId, NodeKind, Span, StringInterner};
use vitte_resolve::{ResolveResult, SymbolKind};
use vitte_stack::ensure_sufficient_stack;

use crate::{
    HirFunction, HirInst, HirModule, HirOp, HirSymbol, HirSymbolKind, InstIdx, LocalId, Reg,
};

use self::control_flow::LoopFrame;

pub(crate) fn lower_module(
    ast: &Ast,
    root: NodeId,
    interner: &StringInterner,
    resolved: &ResolveResult,
    name: &str,
) -> HirModule {
    let symbols = module_symbols(resolved);

    let mut functions = Vec::new();
    for &item in ast.children(root) {
        let Some(symbol) = resolved.symbol_of(item) else {
            continue;
        };
        if symbol.kind != SymbolKind::Function {
            continue;
        }
        let lowerer = Lowerer::new(ast, interner, resolved);
        functions.push(lowerer.lower_function(item, symbol.name));
    }

    debug!(
        functions = functions.len(),
        symbols = symbols.len(),
        insts = functions.iter().map(|f| f.insts.len()).sum::<usize>(),
        "built HIR"
    );
    HirModule {
        name: interner.intern(name),
        symbols,
        functions,
    }
}

/// Functions, types, globals and modules, first declaration per name.
fn module_symbols(resolved: &ResolveResult) -> Vec<HirSymbol> {
    let mut seen = FxHashSet::default();
    resolved
        .symbols
        .iter()
        .filter_map(|symbol| {
            let kind = match symbol.kind {
                SymbolKind::Function => HirSymbolKind::Function,
                SymbolKind::Type => HirSymbolKind::Type,
                SymbolKind::Global => HirSymbolKind::Global,
                SymbolKind::Module => HirSymbolKind::Module,
                SymbolKind::Param | SymbolKind::Local | SymbolKind::UseAlias => return None,
            };
            seen.insert(symbol.name).then_some(HirSymbol {
                name: symbol.name,
                kind,
                decl: symbol.decl,
            })
        })
        .collect()
}

// ── FnBuilder ───────────────────────────────────────────────────────

/// Instruction stream of one function under construction.
#[derive(Default)]
struct FnBuilder {
    insts: Vec<HirInst>,
    locals: Vec<Name>,
    slots: FxHashMap<Name, LocalId>,
    last_reg: u32,
}

impl FnBuilder {
    fn fresh_reg(&mut self) -> Reg {
        self.last_reg += 1;
        Reg::new(self.last_reg)
    }

    /// The slot for `name`, allocated on first use.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "slot count bounded by AST node ids"
    )]
    fn slot(&mut self, name: Name) -> LocalId {
        if let Some(&local) = self.slots.get(&name) {
            return local;
        }
        let local = LocalId::new(self.locals.len() as u32);
        self.locals.push(name);
        self.slots.insert(name, local);
        local
    }

    #[expect(
        clippy::cast_possible_truncation,
        reason = "instruction count bounded by AST node ids"
    )]
    fn next_index(&self) -> InstIdx {
        InstIdx::new(self.insts.len() as u32)
    }

    /// Emit a value-producing instruction into a fresh register.
    fn emit(&mut self, op: HirOp, span: Span) -> Reg {
        let dst = self.fresh_reg();
        trace!(at = self.insts.len(), ?dst, ?op, "emit");
        self.insts.push(HirInst { op, dst, span });
        dst
    }

    /// Emit an instruction with no result.
    fn emit_void(&mut self, op: HirOp, span: Span) -> InstIdx {
        let at = self.next_index();
        trace!(at = at.raw(), ?op, "emit");
        self.insts.push(HirInst {
            op,
            dst: Reg::NONE,
            span,
        });
        at
    }

    /// Point the `Jmp`/`JmpIf` at `at` to `target`.
    fn patch(&mut self, at: InstIdx, target: InstIdx) {
        let Some(inst) = self.insts.get_mut(at.index()) else {
            return;
        };
        debug_assert!(inst.op.jump_target().is_some(), "patching a non-jump at {at:?}");
        match &mut inst.op {
            HirOp::Jmp(t) | HirOp::JmpIf { target: t, .. } => *t = target,
            _ => {}
        }
    }

    /// Seal the stream. A final `Ret` is added when the stream does not end
    /// in one, or when some jump lands one past the last instruction.
    fn finish(mut self, name: Name, span: Span) -> HirFunction {
        let end = self.next_index();
        let ends_in_ret = matches!(self.insts.last(), Some(HirInst { op: HirOp::Ret(_), .. }));
        let targets_end = self.insts.iter().any(|i| i.op.jump_target() == Some(end));
        if !ends_in_ret || targets_end {
            self.emit_void(HirOp::Ret(Reg::NONE), span.shrink_to_end());
        }
        HirFunction {
            name,
            span,
            reg_count: self.last_reg,
            locals: self.locals,
            insts: self.insts,
        }
    }
}

// ── Lowerer ─────────────────────────────────────────────────────────

struct Lowerer<'a> {
    ast: &'a Ast,
    interner: &'a StringInterner,
    resolved: &'a ResolveResult,
    fb: FnBuilder,
    loops: Vec<LoopFrame>,
}

impl<'a> Lowerer<'a> {
    fn new(ast: &'a Ast, interner: &'a StringInterner, resolved: &'a ResolveResult) -> Self {
        Lowerer {
            ast,
            interner,
            resolved,
            fb: FnBuilder::default(),
            loops: Vec::new(),
        }
    }

    /// Parameters take the first slots, in order; the body follows.
    fn lower_function(mut self, item: NodeId, name: Name) -> HirFunction {
        let ast = self.ast;
        for &child in ast.children(item) {
            match ast.kind(child) {
                NodeKind::Params => {
                    for &param in ast.children(child) {
                        if let Some(param_name) = ast.name(param) {
                            self.fb.slot(param_name);
                        }
                    }
                }
                NodeKind::Block => self.lower_block(child),
                _ => {}
            }
        }
        debug_assert!(self.loops.is_empty(), "unbalanced loop stack");

        let func = self.fb.finish(name, ast.span(item));
        trace!(
            name = self.interner.lookup(name),
            insts = func.insts.len(),
            regs = func.reg_count,
            locals = func.locals.len(),
            "lowered function"
        );
        func
    }

    fn lower_block(&mut self, block: NodeId) {
        let ast = self.ast;
        for &stmt in ast.children(block) {
            self.lower_stmt(stmt);
        }
    }

    fn lower_stmt(&mut self, stmt: NodeId) {
        ensure_sufficient_stack(|| self.lower_stmt_inner(stmt));
    }

    fn lower_stmt_inner(&mut self, stmt: NodeId) {
        let ast = self.ast;
        let Some(node) = ast.get(stmt) else {
            return;
        };
        match node.kind {
            NodeKind::Let | NodeKind::Const => self.lower_binding(stmt),
            NodeKind::Set => self.lower_set(stmt),
            NodeKind::Say | NodeKind::Do | NodeKind::ExprStmt => {
                self.lower_expr(ast.child(stmt, 0));
            }
            NodeKind::If => self.lower_if(stmt),
            NodeKind::While => self.lower_while(stmt),
            NodeKind::For => self.lower_for(stmt),
            NodeKind::Match => self.lower_match(stmt),
            NodeKind::Break => self.lower_break(node.span),
            NodeKind::Continue => self.lower_continue(node.span),
            NodeKind::Return => {
                let value = ast.child(stmt, 0);
                let reg = if value.is_valid() {
                    self.lower_expr(value)
                } else {
                    Reg::NONE
                };
                self.fb.emit_void(HirOp::Ret(reg), node.span);
            }
            NodeKind::Block => self.lower_block(stmt),
            _ => {}
        }
    }

    /// `let`/`const`: slot first, then the initializer, then the store.
    fn lower_binding(&mut self, stmt: NodeId) {
        let ast = self.ast;
        let slot = ast.name(stmt).map(|name| self.fb.slot(name));

        // Child 0 is the name leaf, or an `Error` node in its place.
        let rest = ast.children(stmt).get(1..).unwrap_or_default();
        let Some(&init) = rest.iter().find(|&&c| ast.kind(c) != NodeKind::Path) else {
            return;
        };
        let value = self.lower_expr(init);
        if let Some(slot) = slot {
            self.fb.emit_void(HirOp::LocalSet(slot, value), ast.span(stmt));
        }
    }

    /// `set target value`. Only plain identifiers name a slot; member and
    /// index targets store into `_tmp`.
    fn lower_set(&mut self, stmt: NodeId) {
        let ast = self.ast;
        let value = self.lower_expr(ast.child(stmt, 1));
        let target = match ast.get(ast.child(stmt, 0)) {
            Some(node) if node.kind == NodeKind::Ident => node.name,
            _ => None,
        };
        let name = target.unwrap_or_else(|| self.interner.intern("_tmp"));
        let slot = self.fb.slot(name);
        self.fb.emit_void(HirOp::LocalSet(slot, value), ast.span(stmt));
    }
}

#[cfg(test)]
mod tests;
