//! Indented text rendering of an AST, for debugging and golden tests.

use std::fmt::Write;

use super::{Ast, NodeId, Payload};
use crate::StringInterner;

/// Render the subtree at `root`, one node per line, two spaces per level.
///
/// Each line reads `[id] Kind name='..' text='..' op=.. @file:start-end`;
/// absent fields are omitted.
pub fn dump(ast: &Ast, root: NodeId, interner: &StringInterner) -> String {
    let mut out = String::new();
    if ast.get(root).is_none() {
        return out;
    }

    // Explicit stack: dumps are used on pathological inputs too.
    let mut stack = vec![(root, 0usize)];
    while let Some((id, depth)) = stack.pop() {
        let node = ast.node(id);
        for _ in 0..depth {
            out.push_str("  ");
        }
        let _ = write!(out, "[{}] {}", id.raw(), node.kind.as_str());
        if let Some(name) = node.name {
            let _ = write!(out, " name='{}'", interner.lookup(name));
        }
        if let Some(text) = node.text {
            let _ = write!(out, " text='{}'", interner.lookup(text));
        }
        match node.payload {
            Payload::None => {}
            Payload::Binary(op) => {
                let _ = write!(out, " op={}", op.as_symbol());
            }
            Payload::Unary(op) => {
                let _ = write!(out, " op={}", op.as_symbol());
            }
            Payload::Int(v) => {
                let _ = write!(out, " value={v}");
            }
            Payload::Float(v) => {
                let _ = write!(out, " value={v}");
            }
            Payload::Bool(v) => {
                let _ = write!(out, " value={v}");
            }
        }
        let _ = writeln!(
            out,
            " @{}:{}-{}",
            node.span.file.0, node.span.start, node.span.end
        );

        for &child in ast.children(id).iter().rev() {
            stack.push((child, depth + 1));
        }
    }
    out
}
