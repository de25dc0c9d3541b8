//! Whole-pipeline scenarios on small programs.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;
use vitte_diagnostic::ErrorCode;
use vitte_hir::HirOp;
use vitte_ir::{NodeId, NodeKind};
use vitte_lir::Terminator;
use vitte_resolve::SymbolKind;
use vitte_types::TypeId;
use vittec::{compile_unit, CompileOutput, DumpKind, PipelineConfig, Stage};

fn compile(src: &str) -> CompileOutput {
    compile_unit("test.vit", src.as_bytes(), &PipelineConfig::default())
}

fn nodes_of(out: &CompileOutput, kind: NodeKind) -> Vec<NodeId> {
    let parsed = out.ast.as_ref().unwrap();
    parsed
        .ast
        .iter()
        .filter(|(_, node)| node.kind == kind)
        .map(|(id, _)| id)
        .collect()
}

fn codes(out: &CompileOutput) -> Vec<ErrorCode> {
    out.errors().map(|d| d.code).collect()
}

#[test]
fn add_function_goes_all_the_way_down() {
    let out = compile("fn add(a, b) -> int { ret a + b }");
    assert!(out.ok, "{:?}", codes(&out));

    // Parse: one Fn with two params and a body holding one return.
    let parsed = out.ast.as_ref().unwrap();
    let ast = &parsed.ast;
    let items = ast.children(parsed.root);
    assert_eq!(items.len(), 1);
    let func = items[0];
    assert_eq!(ast.kind(func), NodeKind::Fn);
    let params = ast.find_child(func, NodeKind::Params).unwrap();
    assert_eq!(ast.children(params).len(), 2);
    let body = ast.find_child(func, NodeKind::Block).unwrap();
    let stmts = ast.children(body);
    assert_eq!(stmts.len(), 1);
    assert_eq!(ast.kind(stmts[0]), NodeKind::Return);

    // Resolve: no errors.
    let resolved = out.resolve.as_ref().unwrap();
    assert!(resolved.ok);
    assert_eq!(out.stage_diagnostics(Stage::Resolve).count(), 0);

    // Typeck: no errors, returns int.
    let typeck = out.typeck.as_ref().unwrap();
    assert!(typeck.ok);
    let signature = typeck.type_of(func).unwrap();
    let (params, ret) = typeck.pool().signature(signature).unwrap();
    assert_eq!(params.len(), 2);
    assert_eq!(ret, TypeId::INT);
    assert_eq!(typeck.display(ret), "int");

    // HIR: one function ending in a valued return.
    let hir = out.hir.as_ref().unwrap();
    assert_eq!(hir.functions.len(), 1);
    let last = hir.functions[0].insts.last().unwrap();
    assert!(matches!(last.op, HirOp::Ret(reg) if !reg.is_none()));

    // IR: one function, one block, terminated by ret.
    let lir = out.lir.as_ref().unwrap();
    assert_eq!(lir.functions.len(), 1);
    let blocks = &lir.functions[0].blocks;
    assert_eq!(blocks.len(), 1);
    assert!(matches!(blocks[0].term, Terminator::Return(reg) if !reg.is_none()));
}

#[test]
fn add_function_dumps() {
    let out = compile("fn add(a, b) -> int { ret a + b }");
    assert_eq!(
        out.dump(DumpKind::Lir).unwrap(),
        "module test\n\
         \n\
         fn add (regs=3 locals=2 blocks=1)\n\
         \x20 bb0:\n\
         \x20   r1 = load a\n\
         \x20   r2 = load b\n\
         \x20   r3 = r1 + r2\n\
         \x20   ret r3\n"
    );
}

#[test]
fn inner_let_shadows_outer() {
    let out = compile("let x = 1 if true { let x = 2; say x }");
    assert!(out.ok, "{:?}", codes(&out));

    let lets = nodes_of(&out, NodeKind::Let);
    assert_eq!(lets.len(), 2);
    let say = nodes_of(&out, NodeKind::Say)[0];
    let used = out.ast.as_ref().unwrap().ast.child(say, 0);

    let symbol = out.resolve.as_ref().unwrap().symbol_of(used).unwrap();
    assert_eq!(symbol.decl, lets[1]);
    assert_eq!(symbol.kind, SymbolKind::Local);
}

#[test]
fn body_let_may_shadow_a_param() {
    let out = compile("fn f(a) -> int { let a = 1; ret a }");
    assert!(out.ok, "{:?}", codes(&out));
    let ret = nodes_of(&out, NodeKind::Return)[0];
    let used = out.ast.as_ref().unwrap().ast.child(ret, 0);
    let symbol = out.resolve.as_ref().unwrap().symbol_of(used).unwrap();
    assert_eq!(symbol.kind, SymbolKind::Local);
    assert_eq!(symbol.decl, nodes_of(&out, NodeKind::Let)[0]);
}

#[test]
fn duplicate_let_in_one_block_is_reported_once() {
    let out = compile("fn f() { let x = 1 let x = 2 }");
    assert_eq!(codes(&out), vec![ErrorCode::E2006]);
    assert_eq!(out.stage_ok(Stage::Resolve), Some(false));
    // Later stages still run.
    assert!(out.lir.is_some());
}

#[test]
fn numeric_promotion() {
    let out = compile("say 1 + 2\nsay 1 + 2.0\nsay \"a\" + \"b\"\nsay 1 + \"b\"");
    let typeck = out.typeck.as_ref().unwrap();
    let types: Vec<String> = nodes_of(&out, NodeKind::Binary)
        .into_iter()
        .map(|bin| typeck.display(typeck.type_of(bin).unwrap()))
        .collect();
    assert_eq!(types, vec!["int", "float", "string", "string"]);
    assert_eq!(codes(&out), vec![ErrorCode::E2103]);
    assert!(!out.ok);
}

#[test]
fn resolver_symbols_can_be_withheld_from_typeck() {
    let src = "fn f() -> int { let s = \"a\" ret s }";
    let with = compile(src);
    assert_eq!(codes(&with), vec![ErrorCode::E2001]);

    let config = PipelineConfig {
        resolve_types: false,
        ..PipelineConfig::default()
    };
    let without = compile_unit("test.vit", src.as_bytes(), &config);
    assert!(without.ok, "{:?}", codes(&without));
}

#[test]
fn control_flow_builds_valid_blocks() {
    let src = "fn f(n) -> int {\n\
               \x20 let i = 0\n\
               \x20 while i < n {\n\
               \x20   if i == 3 { break } elif i == 1 { continue } else { say i }\n\
               \x20   set i = i + 1\n\
               \x20 }\n\
               \x20 ret i\n\
               }";
    let out = compile(src);
    assert!(out.ok, "{:?}", codes(&out));
    let lir = out.lir.as_ref().unwrap();
    vitte_lir::validate(lir).unwrap();
    let blocks = &lir.functions[0].blocks;
    assert!(blocks.len() > 4);
    assert!(blocks
        .iter()
        .any(|b| matches!(b.term, Terminator::Branch { .. })));
}

#[test]
fn entry_declarations_are_functions() {
    let out = compile("prog main { say \"hi\" }");
    assert!(out.ok, "{:?}", codes(&out));
    let hir = out.hir.as_ref().unwrap();
    assert_eq!(hir.functions.len(), 1);
    assert_eq!(out.interner.lookup(hir.functions[0].name), "main");
}

#[test]
fn init_tracing_is_idempotent() {
    vittec::init_tracing();
    vittec::init_tracing();
    assert!(compile("fn f() { }").ok);
}
