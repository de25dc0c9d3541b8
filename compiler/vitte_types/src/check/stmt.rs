//! Statements and toplevel items. Every statement is typed `unit`.

use vitte_diagnostic::ErrorCode;
use vitte_ir::{NodeId, NodeKind};
use vitte_stack::ensure_sufficient_stack;

use super::{compatible, Checker};
use crate::TypeId;

impl Checker<'_> {
    pub(super) fn check_item(&mut self, item: NodeId) {
        let ast = self.ast;
        match ast.kind(item) {
            NodeKind::Fn | NodeKind::Scn | NodeKind::Entry => self.check_fn_like(item),
            NodeKind::TypeAlias | NodeKind::Struct | NodeKind::Union | NodeKind::Enum => {
                if let Some(name) = ast.name(item) {
                    let ty = self.pool.nominal(name, self.interner);
                    self.record(item, ty);
                }
                self.check_type_decl(item);
            }
            NodeKind::Mod | NodeKind::Use | NodeKind::Export => {}
            _ => self.check_stmt(item),
        }
    }

    /// Annotation paths inside a type declaration.
    fn check_type_decl(&mut self, item: NodeId) {
        let ast = self.ast;
        let body = ast.child(item, 0);
        if ast.kind(body) == NodeKind::Path {
            self.annotation(body);
            return;
        }
        for &member in ast.children(body) {
            let ty = self.annotation(ast.child(member, 0));
            self.record(member, ty);
        }
    }

    fn check_fn_like(&mut self, item: NodeId) {
        let signature = self.signature_of(item);
        let ret = self.pool.signature(signature).map_or(TypeId::UNIT, |(_, ret)| ret);
        self.return_types.push(ret);
        if let Some(body) = self.ast.find_child(item, NodeKind::Block) {
            self.check_block(body);
        }
        self.return_types.pop();
    }

    fn check_block(&mut self, block: NodeId) {
        let ast = self.ast;
        for &stmt in ast.children(block) {
            self.check_stmt(stmt);
        }
        self.record(block, TypeId::UNIT);
    }

    fn check_stmt(&mut self, stmt: NodeId) {
        ensure_sufficient_stack(|| self.check_stmt_inner(stmt));
        self.record(stmt, TypeId::UNIT);
    }

    fn check_stmt_inner(&mut self, stmt: NodeId) {
        let ast = self.ast;
        match ast.kind(stmt) {
            NodeKind::Let | NodeKind::Const => self.check_binding(stmt),
            NodeKind::Set | NodeKind::Say | NodeKind::Do | NodeKind::ExprStmt => {
                for &child in ast.children(stmt) {
                    self.infer_expr(child);
                }
            }
            NodeKind::If | NodeKind::Elif | NodeKind::While => {
                for &child in ast.children(stmt) {
                    match ast.kind(child) {
                        NodeKind::Block => self.check_block(child),
                        NodeKind::Elif | NodeKind::Else => self.check_stmt(child),
                        _ => self.check_condition(child),
                    }
                }
            }
            NodeKind::Else => {
                for &child in ast.children(stmt) {
                    self.check_block(child);
                }
            }
            NodeKind::For => {
                self.infer_expr(ast.child(stmt, 1));
                let body = ast.child(stmt, 2);
                if body.is_valid() {
                    self.check_block(body);
                }
            }
            NodeKind::Match => self.check_match(stmt),
            NodeKind::Return => self.check_return(stmt),
            NodeKind::Block => self.check_block(stmt),
            _ => {}
        }
    }

    fn check_condition(&mut self, cond: NodeId) {
        let ty = self.infer_expr(cond);
        if !compatible(TypeId::BOOL, ty) {
            let message = format!("condition must be bool, found {}", self.pool.display(ty));
            self.error(ErrorCode::E2101, cond, message);
        }
    }

    /// `let name [: T] [= init]`. The name takes the annotation when
    /// present, else the initializer's type.
    fn check_binding(&mut self, stmt: NodeId) {
        let ast = self.ast;
        let mut annotated = None;
        let mut init = None;
        for &child in ast.children(stmt).iter().skip(1) {
            if ast.kind(child) == NodeKind::Path {
                annotated = Some(self.annotation(child));
            } else {
                init = Some((child, self.infer_expr(child)));
            }
        }
        if let (Some(expected), Some((node, found))) = (annotated, init) {
            self.expect_type(node, expected, found, "initializer type does not match annotation");
        }
        let ty = annotated
            .or_else(|| init.map(|(_, ty)| ty))
            .unwrap_or(TypeId::UNKNOWN);
        self.record(ast.child(stmt, 0), ty);
    }

    fn check_match(&mut self, stmt: NodeId) {
        let ast = self.ast;
        let Some((&scrutinee, arms)) = ast.children(stmt).split_first() else {
            return;
        };
        self.infer_expr(scrutinee);
        for &arm in arms {
            self.check_pattern(ast.child(arm, 0));
            let body = ast.child(arm, 1);
            if body.is_valid() {
                self.check_block(body);
            }
        }
    }

    fn check_pattern(&mut self, pat: NodeId) {
        let ast = self.ast;
        match ast.kind(pat) {
            NodeKind::PatLiteral => {
                let ty = self.infer_expr(ast.child(pat, 0));
                self.record(pat, ty);
            }
            NodeKind::PatTuple => {
                for &elem in ast.children(pat) {
                    self.check_pattern(elem);
                }
            }
            _ => {}
        }
    }

    fn check_return(&mut self, stmt: NodeId) {
        let value = self.ast.child(stmt, 0);
        let found = if value.is_valid() {
            self.infer_expr(value)
        } else {
            TypeId::UNIT
        };
        let Some(&expected) = self.return_types.last() else {
            return;
        };
        let at = if value.is_valid() { value } else { stmt };
        self.expect_type(at, expected, found, "return type does not match function signature");
    }
}
