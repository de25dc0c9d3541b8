#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;
use vitte_diagnostic::{Diagnostic, ErrorCode, Severity};
use vitte_hir::{HirFunction, HirInst, HirModule, HirOp, InstIdx, Reg};
use vitte_ir::{FileId, Span, StringInterner};

use super::{lower_to_lir, module_name, report_lexical_errors};
use crate::{compile_unit, DumpKind, PipelineConfig, Stage};

fn stop_after(stage: Stage) -> PipelineConfig {
    PipelineConfig {
        stop_after: stage,
        ..PipelineConfig::default()
    }
}

#[test]
fn module_names_come_from_the_file_stem() {
    assert_eq!(module_name("src/net/http.vit"), "http");
    assert_eq!(module_name("main"), "main");
    assert_eq!(module_name(""), "root");
}

#[test]
fn lexical_errors_become_diagnostics() {
    let src = b"let s = \"open\nlet c = $";
    let tokens = vitte_lexer::lex(src, FileId(0));
    let mut diags: Vec<Diagnostic> = Vec::new();
    report_lexical_errors(&tokens, &mut diags);

    let codes: Vec<_> = diags.iter().map(|d| d.code).collect();
    assert_eq!(codes, vec![ErrorCode::E0002, ErrorCode::E0001]);
    assert!(diags.iter().all(Diagnostic::is_error));
}

#[test]
fn invalid_utf8_in_a_literal_is_a_warning() {
    let src = b"say \"\xff\"";
    let tokens = vitte_lexer::lex(src, FileId(0));
    let mut diags: Vec<Diagnostic> = Vec::new();
    report_lexical_errors(&tokens, &mut diags);

    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].code, ErrorCode::E0003);
    assert_eq!(diags[0].severity, Severity::Warning);
}

#[test]
fn lex_only_run_reports_lexical_errors_once() {
    let out = compile_unit("t.vit", b"say $", &stop_after(Stage::Lex));
    assert!(!out.ok);
    assert_eq!(out.error_count(), 1);
    assert_eq!(out.stage_diagnostics(Stage::Lex).count(), 1);
    assert!(out.ast.is_none());
    assert_eq!(out.token_count, 3);
    assert_eq!(out.source_text(), "say $");
}

#[test]
fn lexical_errors_are_reported_by_the_parser_on_full_runs() {
    let out = compile_unit("t.vit", b"say $", &PipelineConfig::default());
    assert_eq!(out.stage_diagnostics(Stage::Lex).count(), 0);
    let parse: Vec<_> = out.stage_diagnostics(Stage::Parse).map(|d| d.code).collect();
    assert!(parse.contains(&ErrorCode::E0001), "{parse:?}");
    assert_eq!(out.stage_ok(Stage::Lex), Some(true));
    assert_eq!(out.stage_ok(Stage::Parse), Some(false));
}

#[test]
fn broken_jump_is_an_internal_error() {
    let interner = StringInterner::new();
    let span = Span::new(FileId(0), 4, 20, 1, 5);
    let hir = HirModule {
        name: interner.intern("root"),
        symbols: Vec::new(),
        functions: vec![HirFunction {
            name: interner.intern("f"),
            span,
            reg_count: 0,
            locals: Vec::new(),
            insts: vec![HirInst {
                op: HirOp::Jmp(InstIdx::new(7)),
                dst: Reg::NONE,
                span,
            }],
        }],
    };

    let mut diags: Vec<Diagnostic> = Vec::new();
    assert!(lower_to_lir(&hir, &mut diags).is_none());
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].code, ErrorCode::E9001);
    assert_eq!(diags[0].span, span);
    assert_eq!(
        diags[0].message,
        "function #0: jump at 0 targets 7, past the end of 1 instructions"
    );
}

#[test]
fn passes_are_timed_in_order() {
    let out = compile_unit("t.vit", b"fn f() { }", &PipelineConfig::default());
    let stages: Vec<_> = out.timings.iter().map(|t| t.stage).collect();
    assert_eq!(stages, Stage::ALL.to_vec());
    assert!(out.timings.iter().all(|t| t.ok));
}

#[test]
fn trace_passes_does_not_change_results() {
    let config = PipelineConfig {
        trace_passes: true,
        ..PipelineConfig::default()
    };
    let traced = compile_unit("t.vit", b"fn f() -> int { ret 1 }", &config);
    let plain = compile_unit("t.vit", b"fn f() -> int { ret 1 }", &PipelineConfig::default());
    assert_eq!(traced.ok, plain.ok);
    assert_eq!(traced.dump(DumpKind::Lir), plain.dump(DumpKind::Lir));
}

#[test]
fn dumps_need_their_stage() {
    let out = compile_unit("t.vit", b"fn f() { }", &stop_after(Stage::Resolve));
    assert!(out.dump(DumpKind::Ast).is_some());
    assert_eq!(out.dump(DumpKind::Hir), None);
    assert_eq!(out.dump(DumpKind::Lir), None);
    assert_eq!(DumpKind::Hir.stage(), Stage::Hir);
}

#[test]
fn hir_dump_uses_the_unit_module_name() {
    let out = compile_unit("demo.vit", b"fn f() { }", &PipelineConfig::default());
    let hir = out.dump(DumpKind::Hir).unwrap();
    assert!(hir.starts_with("module demo\n  function f\n"), "{hir}");
}
