//! Expression typing.

use vitte_diagnostic::ErrorCode;
use vitte_ir::{BinaryOp, NodeId, NodeKind, UnaryOp};
use vitte_resolve::SymbolKind;
use vitte_stack::ensure_sufficient_stack;

use super::{compatible, Checker};
use crate::TypeId;

/// Which side of a binary operator, for messages.
#[derive(Copy, Clone)]
enum Side {
    Lhs,
    Rhs,
}

impl Side {
    fn as_str(self) -> &'static str {
        match self {
            Side::Lhs => "lhs",
            Side::Rhs => "rhs",
        }
    }
}

impl Checker<'_> {
    /// Type of `expr`, memoized by node id. A missing expression is `error`.
    pub(super) fn infer_expr(&mut self, expr: NodeId) -> TypeId {
        if !expr.is_valid() {
            return TypeId::ERROR;
        }
        if let Some(&ty) = self.node_types.get(&expr) {
            return ty;
        }
        let ty = ensure_sufficient_stack(|| self.infer_expr_inner(expr));
        self.record(expr, ty)
    }

    fn infer_expr_inner(&mut self, expr: NodeId) -> TypeId {
        let ast = self.ast;
        let node = ast.node(expr);
        match node.kind {
            NodeKind::Int => TypeId::INT,
            NodeKind::Float => TypeId::FLOAT,
            NodeKind::String => TypeId::STRING,
            NodeKind::Char => TypeId::CHAR,
            NodeKind::Bool => TypeId::BOOL,
            NodeKind::Null => TypeId::NULL,
            NodeKind::Ident => self.infer_ident(expr),
            NodeKind::Binary => match node.binary_op() {
                Some(op) => self.infer_binary(expr, op),
                None => TypeId::ERROR,
            },
            NodeKind::Unary => match node.unary_op() {
                Some(op) => self.infer_unary(expr, op),
                None => TypeId::ERROR,
            },
            NodeKind::Call => self.infer_call(expr),
            NodeKind::Member | NodeKind::Index => {
                for &child in ast.children(expr) {
                    self.infer_expr(child);
                }
                TypeId::UNKNOWN
            }
            _ => TypeId::ERROR,
        }
    }

    fn infer_ident(&mut self, expr: NodeId) -> TypeId {
        let Some(symbol) = self.resolved.and_then(|r| r.symbol_of(expr)) else {
            return TypeId::UNKNOWN;
        };
        match symbol.kind {
            SymbolKind::Function => self.signature_of(symbol.decl),
            SymbolKind::Param => self.annotation(symbol.ty_node),
            SymbolKind::Local | SymbolKind::Global => {
                if symbol.ty_node.is_valid() {
                    self.annotation(symbol.ty_node)
                } else {
                    self.node_types
                        .get(&symbol.init)
                        .copied()
                        .unwrap_or(TypeId::UNKNOWN)
                }
            }
            SymbolKind::Type => self.pool.nominal(symbol.name, self.interner),
            SymbolKind::Module | SymbolKind::UseAlias => TypeId::UNKNOWN,
        }
    }

    fn infer_binary(&mut self, expr: NodeId, op: BinaryOp) -> TypeId {
        let lhs_node = self.ast.child(expr, 0);
        let rhs_node = self.ast.child(expr, 1);
        let lhs = self.infer_expr(lhs_node);
        let rhs = self.infer_expr(rhs_node);
        if !lhs_node.is_valid() || !rhs_node.is_valid() {
            return TypeId::ERROR;
        }

        if op.is_logical() {
            self.require_bool(lhs_node, lhs, Side::Lhs);
            self.require_bool(rhs_node, rhs, Side::Rhs);
            return TypeId::BOOL;
        }
        if op.is_equality() {
            if lhs != rhs && !lhs.is_lenient() && !rhs.is_lenient() {
                let message = format!(
                    "equality compare between different types: {} and {}",
                    self.pool.display(lhs),
                    self.pool.display(rhs)
                );
                self.warning(ErrorCode::W2001, expr, message);
            }
            return TypeId::BOOL;
        }
        if op.is_relational() {
            self.require_numeric(lhs_node, lhs, op);
            self.require_numeric(rhs_node, rhs, op);
            return TypeId::BOOL;
        }

        if op == BinaryOp::Add && (lhs == TypeId::STRING || rhs == TypeId::STRING) {
            for (node, ty, side) in [(lhs_node, lhs, Side::Lhs), (rhs_node, rhs, Side::Rhs)] {
                if !compatible(TypeId::STRING, ty) {
                    let message = format!(
                        "string concatenation requires string {}, found {}",
                        side.as_str(),
                        self.pool.display(ty)
                    );
                    self.error(ErrorCode::E2103, node, message);
                }
            }
            return TypeId::STRING;
        }

        // A bad operand is reported and the promotion still applies.
        self.require_numeric(lhs_node, lhs, op);
        self.require_numeric(rhs_node, rhs, op);
        if lhs == TypeId::FLOAT || rhs == TypeId::FLOAT {
            TypeId::FLOAT
        } else {
            TypeId::INT
        }
    }

    fn require_bool(&mut self, node: NodeId, ty: TypeId, side: Side) {
        if !compatible(TypeId::BOOL, ty) {
            let message = format!(
                "{} of logical op must be bool, found {}",
                side.as_str(),
                self.pool.display(ty)
            );
            self.error(ErrorCode::E2101, node, message);
        }
    }

    fn require_numeric(&mut self, node: NodeId, ty: TypeId, op: BinaryOp) {
        if ty.is_numeric() || ty.is_lenient() {
            return;
        }
        let message = format!(
            "operand of `{}` must be numeric, found {}",
            op.as_symbol(),
            self.pool.display(ty)
        );
        self.error(ErrorCode::E2102, node, message);
    }

    fn infer_unary(&mut self, expr: NodeId, op: UnaryOp) -> TypeId {
        let operand_node = self.ast.child(expr, 0);
        let operand = self.infer_expr(operand_node);
        if !operand_node.is_valid() {
            return TypeId::ERROR;
        }
        match op {
            UnaryOp::Not => {
                if !compatible(TypeId::BOOL, operand) {
                    let message = format!("operand of `!` must be bool, found {}", self.pool.display(operand));
                    self.error(ErrorCode::E2101, operand_node, message);
                }
                TypeId::BOOL
            }
            UnaryOp::Neg => {
                if !operand.is_numeric() && !operand.is_lenient() {
                    let message = format!("operand of `-` must be numeric, found {}", self.pool.display(operand));
                    self.error(ErrorCode::E2102, operand_node, message);
                }
                operand
            }
        }
    }

    /// A call through a function type yields its return type after the
    /// arguments are checked against the parameters. Anything else is
    /// `unknown`.
    fn infer_call(&mut self, expr: NodeId) -> TypeId {
        let ast = self.ast;
        let Some((&callee, args)) = ast.children(expr).split_first() else {
            return TypeId::ERROR;
        };
        let callee_ty = self.infer_expr(callee);
        let arg_types: Vec<TypeId> = args.iter().map(|&arg| self.infer_expr(arg)).collect();

        let Some((params, ret)) = self.pool.signature(callee_ty) else {
            return TypeId::UNKNOWN;
        };
        let params = params.to_vec();
        if params.len() != args.len() {
            let message = format!(
                "wrong number of arguments: expected {}, found {}",
                params.len(),
                args.len()
            );
            self.error(ErrorCode::E2104, expr, message);
            return ret;
        }
        for ((&arg, &found), &expected) in args.iter().zip(&arg_types).zip(&params) {
            self.expect_type(arg, expected, found, "argument type mismatch");
        }
        ret
    }
}
