//! Expression lowering. Every expression node emits exactly one
//! value-producing instruction after its operands.

use smallvec::SmallVec;
use vitte_ir::{NodeId, NodeKind, Span};
use vitte_resolve::SymbolKind;
use vitte_stack::ensure_sufficient_stack;

use crate::{Callee, HirOp, Reg};

use super::Lowerer;

impl Lowerer<'_> {
    pub(super) fn lower_expr(&mut self, expr: NodeId) -> Reg {
        ensure_sufficient_stack(|| self.lower_expr_inner(expr))
    }

    fn lower_expr_inner(&mut self, expr: NodeId) -> Reg {
        let ast = self.ast;
        let Some(node) = ast.get(expr) else {
            return self.fb.emit(HirOp::Nop, Span::DUMMY);
        };

        let op = match node.kind {
            NodeKind::Int => HirOp::ConstInt(node.int_value().unwrap_or(0)),
            NodeKind::Float => HirOp::const_float(node.float_value().unwrap_or(0.0)),
            NodeKind::String | NodeKind::Char => node.text.map_or(HirOp::Nop, HirOp::ConstStr),
            NodeKind::Bool => HirOp::ConstBool(node.bool_value().unwrap_or(false)),
            NodeKind::Null => HirOp::ConstNull,
            NodeKind::Ident => match node.name {
                Some(name) => HirOp::LocalGet(self.fb.slot(name)),
                None => HirOp::Nop,
            },
            NodeKind::Binary => {
                let lhs = self.lower_expr(ast.child(expr, 0));
                let rhs = self.lower_expr(ast.child(expr, 1));
                node.binary_op()
                    .map_or(HirOp::Nop, |op| HirOp::Binary(op, lhs, rhs))
            }
            NodeKind::Unary => {
                let operand = self.lower_expr(ast.child(expr, 0));
                node.unary_op()
                    .map_or(HirOp::Nop, |op| HirOp::Unary(op, operand))
            }
            NodeKind::Call => self.lower_call(expr),
            // Field and element access have no HIR form yet.
            NodeKind::Member | NodeKind::Index => {
                for &child in ast.children(expr) {
                    self.lower_expr(child);
                }
                HirOp::Nop
            }
            _ => HirOp::Nop,
        };
        self.fb.emit(op, node.span)
    }

    /// Callee first, then the arguments left to right. A callee bound to a
    /// function symbol is called by name and emits nothing itself.
    fn lower_call(&mut self, call: NodeId) -> HirOp {
        let (ast, resolved) = (self.ast, self.resolved);
        let Some((&callee, args)) = ast.children(call).split_first() else {
            return HirOp::Nop;
        };

        let callee = match resolved.symbol_of(callee) {
            Some(symbol) if symbol.kind == SymbolKind::Function => Callee::Direct(symbol.name),
            _ => Callee::Indirect(self.lower_expr(callee)),
        };
        let args: SmallVec<[Reg; 4]> = args.iter().map(|&arg| self.lower_expr(arg)).collect();
        HirOp::Call { callee, args }
    }
}
