//! Control flow lowering: if/elif/else, while, for, match, break and
//! continue.
//!
//! Forward jumps are emitted with a placeholder target and patched in
//! place once the target index is known. `break` jumps are collected on
//! the loop stack and patched when the loop closes.
//!
//! ```text
//! if c { A } else { B }          while c { A }
//!
//!     r1 = c                     head:
//!     r2 = !r1                       r1 = c
//!     jmpif r2, @else                r2 = !r1
//!     A                              jmpif r2, @exit
//!     jmp @end                       A
//! else:                              jmp @head
//!     B                          exit:
//! end:
//! ```

use vitte_ir::{NodeId, NodeKind, Span, UnaryOp};
use vitte_stack::ensure_sufficient_stack;

use crate::{HirOp, InstIdx, Reg};

use super::Lowerer;

/// One enclosing loop.
pub(super) struct LoopFrame {
    /// Where `continue` jumps.
    continue_to: InstIdx,
    /// `break` jumps waiting for the loop exit.
    breaks: Vec<InstIdx>,
}

impl Lowerer<'_> {
    /// Children: condition, then block, then any `Elif`s and one `Else`.
    pub(super) fn lower_if(&mut self, stmt: NodeId) {
        let ast = self.ast;
        let children = ast.children(stmt);
        let rest = children.get(2..).unwrap_or_default();
        self.lower_conditional(ast.child(stmt, 0), ast.child(stmt, 1), rest, ast.span(stmt));
    }

    /// One `cond block` arm; `rest` is what follows it in the chain. An
    /// `elif` lowers as a nested conditional in the else position.
    fn lower_conditional(&mut self, cond: NodeId, then_block: NodeId, rest: &[NodeId], span: Span) {
        let ast = self.ast;
        let not_cond = self.lower_negated(cond, span);
        let skip_then = self.fb.emit_void(
            HirOp::JmpIf {
                cond: not_cond,
                target: InstIdx::default(),
            },
            span,
        );
        self.lower_block(then_block);
        let skip_else = self.fb.emit_void(HirOp::Jmp(InstIdx::default()), span);

        let else_start = self.fb.next_index();
        self.fb.patch(skip_then, else_start);
        if let Some((&next, tail)) = rest.split_first() {
            match ast.kind(next) {
                NodeKind::Elif => ensure_sufficient_stack(|| {
                    self.lower_conditional(ast.child(next, 0), ast.child(next, 1), tail, ast.span(next));
                }),
                NodeKind::Else => self.lower_block(ast.child(next, 0)),
                _ => {}
            }
        }

        let end = self.fb.next_index();
        self.fb.patch(skip_else, end);
    }

    fn lower_negated(&mut self, cond: NodeId, span: Span) -> Reg {
        let value = self.lower_expr(cond);
        self.fb.emit(HirOp::Unary(UnaryOp::Not, value), span)
    }

    pub(super) fn lower_while(&mut self, stmt: NodeId) {
        let ast = self.ast;
        let span = ast.span(stmt);
        let head = self.fb.next_index();
        let not_cond = self.lower_negated(ast.child(stmt, 0), span);
        let exit_jump = self.fb.emit_void(
            HirOp::JmpIf {
                cond: not_cond,
                target: InstIdx::default(),
            },
            span,
        );

        self.loops.push(LoopFrame {
            continue_to: head,
            breaks: Vec::new(),
        });
        self.lower_block(ast.child(stmt, 1));
        self.fb.emit_void(HirOp::Jmp(head), span);

        let exit = self.fb.next_index();
        self.fb.patch(exit_jump, exit);
        self.close_loop(exit);
    }

    /// `for x [in] e body`: store `e` into `x`, then one pass over the
    /// body. There is no iteration protocol yet, so no back edge is emitted.
    pub(super) fn lower_for(&mut self, stmt: NodeId) {
        let ast = self.ast;
        let span = ast.span(stmt);
        let var = ast.name(stmt);
        let iter = ast.child(stmt, 1);

        let value = self.lower_expr(iter);
        if let Some(name) = var {
            let slot = self.fb.slot(name);
            self.fb.emit_void(HirOp::LocalSet(slot, value), span);
        }

        let head = self.fb.next_index();
        self.loops.push(LoopFrame {
            continue_to: head,
            breaks: Vec::new(),
        });
        if let Some(body) = ast.find_child(stmt, NodeKind::Block) {
            self.lower_block(body);
        }
        let exit = self.fb.next_index();
        self.close_loop(exit);
    }

    fn close_loop(&mut self, exit: InstIdx) {
        let Some(frame) = self.loops.pop() else {
            return;
        };
        for at in frame.breaks {
            self.fb.patch(at, exit);
        }
    }

    /// Scrutinee, then every arm body in order.
    pub(super) fn lower_match(&mut self, stmt: NodeId) {
        let ast = self.ast;
        self.lower_expr(ast.child(stmt, 0));
        for &arm in ast.children(stmt).iter().skip(1) {
            if ast.kind(arm) == NodeKind::MatchArm {
                self.lower_block(ast.child(arm, 1));
            }
        }
    }

    /// Outside a loop this is a `Nop`.
    pub(super) fn lower_break(&mut self, span: Span) {
        match self.loops.last_mut() {
            Some(frame) => {
                let at = self.fb.emit_void(HirOp::Jmp(InstIdx::default()), span);
                frame.breaks.push(at);
            }
            None => {
                self.fb.emit_void(HirOp::Nop, span);
            }
        }
    }

    pub(super) fn lower_continue(&mut self, span: Span) {
        let op = match self.loops.last() {
            Some(frame) => HirOp::Jmp(frame.continue_to),
            None => HirOp::Nop,
        };
        self.fb.emit_void(op, span);
    }
}
