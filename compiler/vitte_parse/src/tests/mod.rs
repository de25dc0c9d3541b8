//! Parser unit tests: tree shapes, operator structure, and recovery.

#![allow(clippy::unwrap_used, clippy::expect_used)]


use vitte_ir::{FileId, NodeId, NodeKind, StringInterner};

use crate::{parse, ParseOutput};

struct Parsed {
    out: ParseOutput,
    interner: StringInterner,
}

impl Parsed {
    fn new(src: &str) -> Self {
        let interner = StringInterner::new();
        let out = parse(src.as_bytes(), FileId(0), &interner);
        Parsed { out, interner }
    }

    /// Parse and require a clean result.
    fn ok(src: &str) -> Self {
        let parsed = Parsed::new(src);
        assert!(
            parsed.out.errors.is_empty(),
            "unexpected errors for {src:?}: {:?}",
            parsed.out.errors
        );
        parsed
    }

    fn items(&self) -> &[NodeId] {
        self.out.ast.children(self.out.root)
    }

    fn item(&self, i: usize) -> NodeId {
        self.items()[i]
    }

    fn kind(&self, id: NodeId) -> NodeKind {
        self.out.ast.kind(id)
    }

    fn child(&self, id: NodeId, i: usize) -> NodeId {
        self.out.ast.child(id, i)
    }

    fn child_kinds(&self, id: NodeId) -> Vec<NodeKind> {
        self.out
            .ast
            .children(id)
            .iter()
            .map(|&c| self.out.ast.kind(c))
            .collect()
    }

    fn name(&self, id: NodeId) -> &str {
        self.out
            .ast
            .name(id)
            .map_or("", |n| self.interner.lookup(n))
    }

    fn text(&self, id: NodeId) -> &str {
        self.out
            .ast
            .text(id)
            .map_or("", |n| self.interner.lookup(n))
    }

    /// Compact rendering of an expression: `(op lhs rhs)` for operators,
    /// bare names and literal text for leaves.
    fn sexpr(&self, id: NodeId) -> String {
        let ast = &self.out.ast;
        let node = ast.node(id);
        let kids: Vec<String> = ast.children(id).iter().map(|&c| self.sexpr(c)).collect();
        match node.kind {
            NodeKind::Ident => self.name(id).to_owned(),
            NodeKind::Int | NodeKind::Float | NodeKind::String | NodeKind::Char | NodeKind::Bool => {
                self.text(id).to_owned()
            }
            NodeKind::Null => "null".to_owned(),
            NodeKind::Binary => format!(
                "({} {})",
                node.binary_op().unwrap().as_symbol(),
                kids.join(" ")
            ),
            NodeKind::Unary => format!(
                "({} {})",
                node.unary_op().unwrap().as_symbol(),
                kids.join(" ")
            ),
            NodeKind::Member => format!("(member {} {})", kids.join(" "), self.name(id)),
            NodeKind::Call => format!("(call {})", kids.join(" ")),
            NodeKind::Index => format!("(index {})", kids.join(" ")),
            other => format!("<{}>", other.as_str()),
        }
    }

    /// The expression of `say <expr>` at toplevel item `i`.
    fn said(&self, i: usize) -> String {
        let say = self.item(i);
        assert_eq!(self.kind(say), NodeKind::Say);
        self.sexpr(self.child(say, 0))
    }
}

// Expressions

#[test]
fn test_precedence_mul_over_add() {
    let p = Parsed::ok("say 1 + 2 * 3");
    assert_eq!(p.said(0), "(+ 1 (* 2 3))");
}

#[test]
fn test_left_associative() {
    let p = Parsed::ok("say a - b - c\nsay a % b / c");
    assert_eq!(p.said(0), "(- (- a b) c)");
    assert_eq!(p.said(1), "(/ (% a b) c)");
}

#[test]
fn test_full_precedence_ladder() {
    let p = Parsed::ok("say a || b && c == d < e + f * g");
    assert_eq!(p.said(0), "(|| a (&& b (== c (< d (+ e (* f g))))))");
}

#[test]
fn test_comparison_below_equality() {
    let p = Parsed::ok("say a < b == c > d");
    assert_eq!(p.said(0), "(== (< a b) (> c d))");
}

#[test]
fn test_unary_binds_tighter() {
    let p = Parsed::ok("say -a * b\nsay !a && b || c\nsay --x");
    assert_eq!(p.said(0), "(* (- a) b)");
    assert_eq!(p.said(1), "(|| (&& (! a) b) c)");
    assert_eq!(p.said(2), "(- (- x))");
}

#[test]
fn test_parentheses_group() {
    let p = Parsed::ok("say (1 + 2) * 3");
    assert_eq!(p.said(0), "(* (+ 1 2) 3)");
}

#[test]
fn test_postfix_chain() {
    let p = Parsed::ok("say a.b(c, 1)[d].e()");
    assert_eq!(p.said(0), "(call (member (index (call (member a b) c 1) d) e))");
}

#[test]
fn test_call_trailing_comma() {
    let p = Parsed::ok("say f(1, 2,)");
    assert_eq!(p.said(0), "(call f 1 2)");
}

#[test]
fn test_literal_payloads() {
    let p = Parsed::ok("say 0x1F\nsay 1_000\nsay 2.5\nsay true\nsay null\nsay 'c'");
    let ast = &p.out.ast;
    let value = |i: usize| ast.node(p.child(p.item(i), 0));
    assert_eq!(value(0).int_value(), Some(31));
    assert_eq!(value(1).int_value(), Some(1000));
    assert_eq!(value(2).float_value(), Some(2.5));
    assert_eq!(value(3).bool_value(), Some(true));
    assert_eq!(value(4).kind, NodeKind::Null);
    assert_eq!(value(5).kind, NodeKind::Char);
    assert_eq!(p.text(p.child(p.item(5), 0)), "'c'");
}

#[test]
fn test_string_keeps_raw_text() {
    let p = Parsed::ok(r#"say "a\"b""#);
    assert_eq!(p.said(0), r#""a\"b""#);
}

#[test]
fn test_spans_cover_operands() {
    let src = "say foo + bar";
    let p = Parsed::ok(src);
    let binary = p.child(p.item(0), 0);
    let span = p.out.ast.span(binary);
    assert_eq!(&src[span.to_range()], "foo + bar");
    let root = p.out.ast.span(p.out.root);
    assert_eq!(root.to_range(), 0..src.len());
}
