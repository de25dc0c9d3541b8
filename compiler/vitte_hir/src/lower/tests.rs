#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;
use smallvec::smallvec;
use vitte_diagnostic::Diagnostic;
use vitte_ir::{BinaryOp, FileId, StringInterner, UnaryOp};
use vitte_parse::parse;
use vitte_resolve::resolve;

use crate::{
    build_module, build_module_named, Callee, HirFunction, HirModule, HirOp, HirSymbolKind,
    InstIdx, LocalId, Reg,
};

struct Built {
    interner: StringInterner,
    hir: HirModule,
}

impl Built {
    fn new(src: &str) -> Self {
        Self::run(src, true)
    }

    /// Builds even when resolution reports errors.
    fn lenient(src: &str) -> Self {
        Self::run(src, false)
    }

    fn run(src: &str, strict: bool) -> Self {
        let interner = StringInterner::new();
        let parsed = parse(src.as_bytes(), FileId(0), &interner);
        assert!(parsed.errors.is_empty(), "{:?}", parsed.errors);
        let mut diags: Vec<Diagnostic> = Vec::new();
        let resolved = resolve(&parsed.ast, parsed.root, &interner, &mut diags);
        if strict {
            assert!(resolved.ok, "{diags:?}");
        }
        let hir = build_module(&parsed.ast, parsed.root, &interner, &resolved);
        Built { interner, hir }
    }

    fn func(&self, name: &str) -> &HirFunction {
        let name = self.interner.get(name).expect("name never interned");
        self.hir.function(name).expect("no such function")
    }

    fn ops(&self, name: &str) -> Vec<HirOp> {
        self.func(name).insts.iter().map(|i| i.op.clone()).collect()
    }

    fn locals(&self, name: &str) -> Vec<&str> {
        self.func(name)
            .locals
            .iter()
            .map(|&n| self.interner.lookup(n))
            .collect()
    }
}

fn r(n: u32) -> Reg {
    Reg::new(n)
}

fn slot(n: u32) -> LocalId {
    LocalId::new(n)
}

fn at(n: u32) -> InstIdx {
    InstIdx::new(n)
}

/// Every function ends in `Ret` and every jump lands inside the stream.
fn assert_well_formed(func: &HirFunction) {
    assert!(
        matches!(func.insts.last().map(|i| &i.op), Some(HirOp::Ret(_))),
        "missing final ret"
    );
    for inst in &func.insts {
        if let Some(target) = inst.op.jump_target() {
            assert!(target.index() < func.insts.len(), "{target:?} out of range");
        }
    }
}

#[test]
fn test_add_function() {
    let b = Built::new("fn add(a, b) -> int { ret a + b }");
    assert_eq!(b.hir.functions.len(), 1);
    assert_eq!(
        b.ops("add"),
        vec![
            HirOp::LocalGet(slot(0)),
            HirOp::LocalGet(slot(1)),
            HirOp::Binary(BinaryOp::Add, r(1), r(2)),
            HirOp::Ret(r(3)),
        ]
    );
    let func = b.func("add");
    assert_eq!(func.reg_count, 3);
    assert_eq!(b.locals("add"), vec!["a", "b"]);
}

#[test]
fn test_module_display() {
    let b = Built::new("fn add(a, b) -> int { ret a + b }");
    let expected = "\
module root
  function add

fn add (regs=3 locals=2 insts=4)
     0: r1 = load a
     1: r2 = load b
     2: r3 = r1 + r2
     3: ret r3
";
    assert_eq!(b.hir.display(&b.interner).to_string(), expected);
}

#[test]
fn test_literals() {
    let b = Built::new("fn f() { say 7\nsay 1.5\nsay \"hi\"\nsay true\nsay null\nsay -2 }");
    let hi = b.interner.get("\"hi\"").unwrap();
    assert_eq!(
        b.ops("f"),
        vec![
            HirOp::ConstInt(7),
            HirOp::const_float(1.5),
            HirOp::ConstStr(hi),
            HirOp::ConstBool(true),
            HirOp::ConstNull,
            HirOp::ConstInt(2),
            HirOp::Unary(UnaryOp::Neg, r(6)),
            HirOp::Ret(Reg::NONE),
        ]
    );
}

#[test]
fn test_let_and_set() {
    let b = Built::new("fn f() {\n  let x = 1\n  set x = x + 2\n}");
    assert_eq!(
        b.ops("f"),
        vec![
            HirOp::ConstInt(1),
            HirOp::LocalSet(slot(0), r(1)),
            HirOp::LocalGet(slot(0)),
            HirOp::ConstInt(2),
            HirOp::Binary(BinaryOp::Add, r(2), r(3)),
            HirOp::LocalSet(slot(0), r(4)),
            HirOp::Ret(Reg::NONE),
        ]
    );
    assert_eq!(b.locals("f"), vec!["x"]);
}

#[test]
fn test_let_without_initializer_only_allocates() {
    let b = Built::new("fn f() { let x: int }");
    assert_eq!(b.ops("f"), vec![HirOp::Ret(Reg::NONE)]);
    assert_eq!(b.locals("f"), vec!["x"]);
}

#[test]
fn test_set_member_uses_tmp_slot() {
    let b = Built::new("fn f(p) { set p.x = 1 }");
    assert_eq!(
        b.ops("f"),
        vec![
            HirOp::ConstInt(1),
            HirOp::LocalSet(slot(1), r(1)),
            HirOp::Ret(Reg::NONE),
        ]
    );
    assert_eq!(b.locals("f"), vec!["p", "_tmp"]);
}

#[test]
fn test_if_else_patches_both_jumps() {
    let b = Built::new("fn f(x) { if x { say 1 } else { say 2 } }");
    assert_eq!(
        b.ops("f"),
        vec![
            HirOp::LocalGet(slot(0)),
            HirOp::Unary(UnaryOp::Not, r(1)),
            HirOp::JmpIf {
                cond: r(2),
                target: at(5)
            },
            HirOp::ConstInt(1),
            HirOp::Jmp(at(6)),
            HirOp::ConstInt(2),
            HirOp::Ret(Reg::NONE),
        ]
    );
}

#[test]
fn test_elif_lowers_as_nested_if() {
    let b = Built::new("fn f(x) { if x { say 1 } elif x { say 2 } }");
    assert_eq!(
        b.ops("f"),
        vec![
            HirOp::LocalGet(slot(0)),
            HirOp::Unary(UnaryOp::Not, r(1)),
            HirOp::JmpIf {
                cond: r(2),
                target: at(5)
            },
            HirOp::ConstInt(1),
            HirOp::Jmp(at(10)),
            HirOp::LocalGet(slot(0)),
            HirOp::Unary(UnaryOp::Not, r(4)),
            HirOp::JmpIf {
                cond: r(5),
                target: at(10)
            },
            HirOp::ConstInt(2),
            HirOp::Jmp(at(10)),
            HirOp::Ret(Reg::NONE),
        ]
    );
}

#[test]
fn test_while_with_break_and_continue() {
    let b = Built::new("fn f(x) {\n  while x {\n    if x { break }\n    continue\n  }\n}");
    assert_eq!(
        b.ops("f"),
        vec![
            HirOp::LocalGet(slot(0)),
            HirOp::Unary(UnaryOp::Not, r(1)),
            HirOp::JmpIf {
                cond: r(2),
                target: at(10)
            },
            HirOp::LocalGet(slot(0)),
            HirOp::Unary(UnaryOp::Not, r(3)),
            HirOp::JmpIf {
                cond: r(4),
                target: at(8)
            },
            HirOp::Jmp(at(10)),
            HirOp::Jmp(at(8)),
            HirOp::Jmp(at(0)),
            HirOp::Jmp(at(0)),
            HirOp::Ret(Reg::NONE),
        ]
    );
}

#[test]
fn test_break_outside_loop_is_nop() {
    let b = Built::new("fn f() { break\ncontinue }");
    assert_eq!(
        b.ops("f"),
        vec![HirOp::Nop, HirOp::Nop, HirOp::Ret(Reg::NONE)]
    );
    assert!(b.func("f").insts[0].dst.is_none());
}

#[test]
fn test_for_stores_iterable_then_runs_body_once() {
    let b = Built::new("fn f(xs) { for x in xs { say x } }");
    assert_eq!(
        b.ops("f"),
        vec![
            HirOp::LocalGet(slot(0)),
            HirOp::LocalSet(slot(1), r(1)),
            HirOp::LocalGet(slot(1)),
            HirOp::Ret(Reg::NONE),
        ]
    );
    assert_eq!(b.locals("f"), vec!["xs", "x"]);
}

#[test]
fn test_break_in_for_targets_appended_ret() {
    let b = Built::new("fn f(xs) { for x in xs { break } }");
    assert_eq!(
        b.ops("f"),
        vec![
            HirOp::LocalGet(slot(0)),
            HirOp::LocalSet(slot(1), r(1)),
            HirOp::Jmp(at(3)),
            HirOp::Ret(Reg::NONE),
        ]
    );
}

#[test]
fn test_jump_to_end_appends_ret_after_ret() {
    // The `if` skips over a `ret`; its target is one past the stream.
    let b = Built::new("fn f(x) { if x { ret 1 } }");
    let ops = b.ops("f");
    assert_eq!(ops.len(), 7);
    assert_eq!(ops[4], HirOp::Ret(r(3)));
    assert_eq!(ops[5], HirOp::Jmp(at(6)));
    assert_eq!(ops[6], HirOp::Ret(Reg::NONE));
    assert_well_formed(b.func("f"));
}

#[test]
fn test_match_lowers_scrutinee_then_arms() {
    let b = Built::new("fn f(x) { match x { 1 => say 10, _ => say 20 } }");
    assert_eq!(
        b.ops("f"),
        vec![
            HirOp::LocalGet(slot(0)),
            HirOp::ConstInt(10),
            HirOp::ConstInt(20),
            HirOp::Ret(Reg::NONE),
        ]
    );
}

#[test]
fn test_direct_and_indirect_calls() {
    let b = Built::new("fn g(a) { ret a }\nfn f(h) {\n  g(1)\n  h(2)\n}");
    let g = b.interner.get("g").unwrap();
    assert_eq!(
        b.ops("f"),
        vec![
            HirOp::ConstInt(1),
            HirOp::Call {
                callee: Callee::Direct(g),
                args: smallvec![r(1)],
            },
            HirOp::LocalGet(slot(0)),
            HirOp::ConstInt(2),
            HirOp::Call {
                callee: Callee::Indirect(r(3)),
                args: smallvec![r(4)],
            },
            HirOp::Ret(Reg::NONE),
        ]
    );
    assert_eq!(b.ops("g"), vec![HirOp::LocalGet(slot(0)), HirOp::Ret(r(1))]);
}

#[test]
fn test_call_display() {
    let b = Built::new("fn g(a, b) { }\nfn f() { g(1, 2) }");
    let f = b.func("f");
    let lines: Vec<String> = f
        .insts
        .iter()
        .map(|i| i.display(&f.locals, &b.interner).to_string())
        .collect();
    assert_eq!(
        lines,
        vec!["r1 = const 1", "r2 = const 2", "r3 = call g(r1, r2)", "ret"]
    );
}

#[test]
fn test_member_and_index_emit_nop_with_value() {
    let b = Built::new("fn f(p) { say p.x\nsay p[0] }");
    assert_eq!(
        b.ops("f"),
        vec![
            HirOp::LocalGet(slot(0)),
            HirOp::Nop,
            HirOp::LocalGet(slot(0)),
            HirOp::ConstInt(0),
            HirOp::Nop,
            HirOp::Ret(Reg::NONE),
        ]
    );
    assert_eq!(b.func("f").insts[1].dst, r(2));
}

#[test]
fn test_bare_return_is_not_doubled() {
    let b = Built::new("fn f() { return }");
    assert_eq!(b.ops("f"), vec![HirOp::Ret(Reg::NONE)]);
}

#[test]
fn test_entry_becomes_function() {
    let b = Built::new("prog main { say \"hi\" }");
    assert_eq!(b.hir.functions.len(), 1);
    let text = match &b.ops("main")[0] {
        HirOp::ConstStr(text) => b.interner.lookup(*text),
        other => panic!("expected a string constant, got {other:?}"),
    };
    assert_eq!(text, "\"hi\"");
}

#[test]
fn test_module_symbols() {
    let b = Built::new(
        "mod net\ntype Point struct { x: int }\nlet limit = 3\nfn main() { let y = 1 }",
    );
    let symbols: Vec<(&str, HirSymbolKind)> = b
        .hir
        .symbols
        .iter()
        .map(|s| (b.interner.lookup(s.name), s.kind))
        .collect();
    assert_eq!(
        symbols,
        vec![
            ("net", HirSymbolKind::Module),
            ("Point", HirSymbolKind::Type),
            ("main", HirSymbolKind::Function),
            ("limit", HirSymbolKind::Global),
        ]
    );
    // Toplevel statements are not part of any function.
    assert_eq!(b.hir.functions.len(), 1);
}

#[test]
fn test_duplicate_names_listed_once() {
    let b = Built::lenient("fn a() { }\nfn a() { say 1 }");
    assert_eq!(b.hir.symbols.len(), 1);
    assert_eq!(b.hir.functions.len(), 2);
}

#[test]
fn test_module_names() {
    let b = Built::new("fn f() { }");
    assert_eq!(b.interner.lookup(b.hir.name), "root");

    let interner = StringInterner::new();
    let parsed = parse(b"fn f() { }", FileId(0), &interner);
    let mut diags: Vec<Diagnostic> = Vec::new();
    let resolved = resolve(&parsed.ast, parsed.root, &interner, &mut diags);
    let hir = build_module_named(&parsed.ast, parsed.root, &interner, &resolved, "demo");
    assert_eq!(interner.lookup(hir.name), "demo");
}

#[test]
fn test_nested_control_flow_is_well_formed() {
    let b = Built::new(
        "fn f(a, b) {
           while a {
             if b { break } elif a { continue } else { set a = a - 1 }
             for i in b { if i { break } }
             match a { 1 => { while b { break } }, _ => ret a }
           }
         }",
    );
    assert_well_formed(b.func("f"));
}
