#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;

use super::*;
use crate::{FileId, StringInterner};

fn sp(start: u32, end: u32) -> Span {
    Span::new(FileId(0), start, end, 1, start + 1)
}

#[test]
fn test_slot_zero_is_reserved() {
    let mut ast = Ast::new();
    assert!(ast.is_empty());
    assert!(ast.get(NodeId::INVALID).is_none());

    let id = ast.add(NodeKind::Int, sp(0, 1), &[]);
    assert_eq!(id, NodeId::new(1));
    assert!(id.is_valid());
    assert_eq!(ast.len(), 1);
}

#[test]
fn test_alloc_then_finish_keeps_children_contiguous() {
    let mut ast = Ast::new();
    let parent = ast.alloc(NodeKind::Binary, sp(0, 5));
    let lhs = ast.add(NodeKind::Int, sp(0, 1), &[]);
    // A nested node finished between the parent's alloc and finish.
    let inner = ast.alloc(NodeKind::Unary, sp(4, 5));
    let operand = ast.add(NodeKind::Int, sp(4, 5), &[]);
    ast.finish(inner, &[operand]);
    ast.finish(parent, &[lhs, inner]);

    assert_eq!(ast.children(parent), &[lhs, inner]);
    assert_eq!(ast.children(inner), &[operand]);
    assert_eq!(ast.children(lhs), &[] as &[NodeId]);
    assert_eq!(ast.node(parent).child_count(), 2);
}

#[test]
fn test_finish_drops_invalid_children() {
    let mut ast = Ast::new();
    let a = ast.add(NodeKind::Ident, sp(0, 1), &[]);
    let list = ast.add(NodeKind::Params, sp(0, 3), &[a, NodeId::INVALID]);
    assert_eq!(ast.children(list), &[a]);
}

#[test]
fn test_child_out_of_range_is_invalid() {
    let mut ast = Ast::new();
    let a = ast.add(NodeKind::Ident, sp(0, 1), &[]);
    let b = ast.add(NodeKind::Block, sp(0, 1), &[a]);
    assert_eq!(ast.child(b, 0), a);
    assert_eq!(ast.child(b, 1), NodeId::INVALID);
    assert_eq!(ast.find_child(b, NodeKind::Ident), Some(a));
    assert_eq!(ast.find_child(b, NodeKind::Path), None);
}

#[test]
fn test_payload_accessors() {
    let mut ast = Ast::new();
    let int = ast.add(NodeKind::Int, sp(0, 2), &[]);
    ast.set_payload(int, Payload::Int(42));
    let bin = ast.add(NodeKind::Binary, sp(0, 2), &[]);
    ast.set_payload(bin, Payload::Binary(BinaryOp::Add));

    assert_eq!(ast.node(int).int_value(), Some(42));
    assert_eq!(ast.node(int).float_value(), None);
    assert_eq!(ast.node(bin).binary_op(), Some(BinaryOp::Add));
    assert_eq!(ast.node(bin).unary_op(), None);
}

#[test]
fn test_every_iterated_id_is_live() {
    let mut ast = Ast::new();
    for i in 0..10 {
        ast.add(NodeKind::Int, sp(i, i + 1), &[]);
    }
    let ids: Vec<_> = ast.iter().map(|(id, _)| id).collect();
    assert_eq!(ids.len(), 10);
    assert!(ids.iter().all(|&id| id.is_valid() && ast.get(id).is_some()));
}

#[test]
fn test_binary_precedence_groups() {
    assert!(BinaryOp::Or.precedence() < BinaryOp::And.precedence());
    assert!(BinaryOp::And.precedence() < BinaryOp::Eq.precedence());
    assert!(BinaryOp::Eq.precedence() < BinaryOp::Lt.precedence());
    assert!(BinaryOp::Lt.precedence() < BinaryOp::Add.precedence());
    assert!(BinaryOp::Add.precedence() < BinaryOp::Mul.precedence());
    assert_eq!(BinaryOp::Mul.precedence(), BinaryOp::Mod.precedence());
}

#[test]
fn test_dump_format() {
    let interner = StringInterner::new();
    let mut ast = Ast::new();
    let root = ast.alloc(NodeKind::File, sp(0, 5));
    let x = ast.add(NodeKind::Ident, sp(0, 1), &[]);
    ast.set_name(x, interner.intern("x"));
    let one = ast.add(NodeKind::Int, sp(4, 5), &[]);
    ast.set_text(one, interner.intern("1"));
    ast.set_payload(one, Payload::Int(1));
    let add = ast.add(NodeKind::Binary, sp(0, 5), &[x, one]);
    ast.set_payload(add, Payload::Binary(BinaryOp::Add));
    ast.finish(root, &[add]);

    let expected = "\
[1] File @0:0-5
  [4] Binary op=+ @0:0-5
    [2] Ident name='x' @0:0-1
    [3] Int text='1' value=1 @0:4-5
";
    assert_eq!(dump(&ast, root, &interner), expected);
}

#[test]
fn test_dump_of_sentinel_is_empty() {
    let interner = StringInterner::new();
    let ast = Ast::new();
    assert_eq!(dump(&ast, NodeId::INVALID, &interner), "");
}
