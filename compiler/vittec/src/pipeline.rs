//! Running the stages over compilation units.

use std::borrow::Cow;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use rayon::prelude::*;
use tracing::{debug, info};
use vitte_diagnostic::queue::StagedDiagnostic;
use vitte_diagnostic::{Diagnostic, DiagnosticQueue, DiagnosticSink, ErrorCode};
use vitte_hir::HirModule;
use vitte_ir::{FileId, Span, StringInterner, Token, TokenFlags, TokenKind};
use vitte_lir::{LirError, LirModule};
use vitte_parse::ParseOutput;
use vitte_resolve::ResolveResult;
use vitte_types::TypeckResult;

use crate::{PipelineConfig, PipelineError, Stage};

/// Wall time and outcome of one pass.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PassTiming {
    pub stage: Stage,
    /// No error diagnostics were reported by this pass.
    pub ok: bool,
    pub elapsed: Duration,
}

/// Text dumps a caller can ask a [`CompileOutput`] for.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DumpKind {
    Ast,
    Hir,
    Lir,
}

impl DumpKind {
    /// Stage whose artifact the dump shows.
    pub const fn stage(self) -> Stage {
        match self {
            DumpKind::Ast => Stage::Parse,
            DumpKind::Hir => Stage::Hir,
            DumpKind::Lir => Stage::Lir,
        }
    }
}

/// Everything one unit produced. Artifacts of stages that did not run are
/// `None`.
pub struct CompileOutput {
    /// Unit name, usually the path it was read from.
    pub name: String,
    pub source: Vec<u8>,
    pub interner: StringInterner,
    /// Tokens produced by the lexer, `Eof` included.
    pub token_count: usize,
    pub ast: Option<ParseOutput>,
    pub resolve: Option<ResolveResult>,
    pub typeck: Option<TypeckResult>,
    pub hir: Option<HirModule>,
    pub lir: Option<LirModule>,
    /// Every diagnostic, tagged with the stage that reported it.
    pub diagnostics: Vec<StagedDiagnostic>,
    /// One entry per pass that ran, in order.
    pub timings: Vec<PassTiming>,
    /// Zero error diagnostics across the stages that ran.
    pub ok: bool,
}

impl CompileOutput {
    fn new(name: &str, src: &[u8]) -> Self {
        CompileOutput {
            name: name.to_owned(),
            source: src.to_vec(),
            interner: StringInterner::new(),
            token_count: 0,
            ast: None,
            resolve: None,
            typeck: None,
            hir: None,
            lir: None,
            diagnostics: Vec::new(),
            timings: Vec::new(),
            ok: true,
        }
    }

    /// Source as text, with invalid UTF-8 replaced.
    pub fn source_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.source)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .map(|staged| &staged.diagnostic)
            .filter(|diag| diag.is_error())
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|staged| staged.diagnostic.is_warning())
            .count()
    }

    /// Diagnostics reported by `stage`.
    pub fn stage_diagnostics(&self, stage: Stage) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(move |staged| staged.stage == stage.as_str())
            .map(|staged| &staged.diagnostic)
    }

    /// Whether `stage` ran and reported no errors.
    pub fn stage_ok(&self, stage: Stage) -> Option<bool> {
        self.timings
            .iter()
            .find(|timing| timing.stage == stage)
            .map(|timing| timing.ok)
    }

    /// Text dump of an artifact, or `None` when its stage did not run.
    pub fn dump(&self, kind: DumpKind) -> Option<String> {
        let interner = &self.interner;
        match kind {
            DumpKind::Ast => self
                .ast
                .as_ref()
                .map(|parsed| vitte_ir::ast::dump(&parsed.ast, parsed.root, interner)),
            DumpKind::Hir => self
                .hir
                .as_ref()
                .map(|hir| hir.display(interner).to_string()),
            DumpKind::Lir => self
                .lir
                .as_ref()
                .map(|lir| lir.display(interner).to_string()),
        }
    }
}

/// A configured pipeline. Cheap to copy; holds no per-unit state.
#[derive(Copy, Clone, Debug, Default)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Pipeline { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run every configured stage over `src`. Never fails: problems in the
    /// source end up in [`CompileOutput::diagnostics`].
    #[tracing::instrument(level = "debug", skip(self, src), fields(bytes = src.len()))]
    pub fn compile(&self, name: &str, src: &[u8]) -> CompileOutput {
        let mut out = CompileOutput::new(name, src);
        let mut passes = Passes::new(self.config);
        run_stages(&mut out, &mut passes, src);

        out.ok = !passes.queue.has_errors();
        debug!(
            ok = out.ok,
            errors = passes.queue.error_count(),
            warnings = passes.queue.warning_count(),
            passes = passes.timings.len(),
            "compiled unit"
        );
        out.timings = passes.timings;
        out.diagnostics = passes.queue.into_staged();
        out
    }

    pub fn compile_file(&self, path: &Path) -> Result<CompileOutput, PipelineError> {
        let src = std::fs::read(path).map_err(|source| PipelineError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(self.compile(&path.display().to_string(), &src))
    }

    /// Compile independent files in parallel. Results keep the order of
    /// `paths`.
    pub fn check_files(&self, paths: &[PathBuf]) -> Vec<Result<CompileOutput, PipelineError>> {
        paths
            .par_iter()
            .map(|path| self.compile_file(path))
            .collect()
    }
}

/// Compile one in-memory unit.
pub fn compile_unit(name: &str, src: &[u8], config: &PipelineConfig) -> CompileOutput {
    Pipeline::new(*config).compile(name, src)
}

pub fn compile_file(path: &Path, config: &PipelineConfig) -> Result<CompileOutput, PipelineError> {
    Pipeline::new(*config).compile_file(path)
}

pub fn check_files(
    paths: &[PathBuf],
    config: &PipelineConfig,
) -> Vec<Result<CompileOutput, PipelineError>> {
    Pipeline::new(*config).check_files(paths)
}

// ── Passes ──────────────────────────────────────────────────────────

/// Diagnostic queue and timings shared by the passes of one unit.
struct Passes {
    config: PipelineConfig,
    queue: DiagnosticQueue,
    timings: Vec<PassTiming>,
}

impl Passes {
    fn new(config: PipelineConfig) -> Self {
        Passes {
            config,
            queue: DiagnosticQueue::new(),
            timings: Vec::with_capacity(Stage::ALL.len()),
        }
    }

    /// Run one pass with diagnostics attributed to `stage`.
    fn run<T>(&mut self, stage: Stage, pass: impl FnOnce(&mut dyn DiagnosticSink) -> T) -> T {
        self.queue.begin_stage(stage.as_str());
        let start = Instant::now();
        let artifact = pass(&mut self.queue);
        let elapsed = start.elapsed();

        let ok = self.queue.stage_errors() == 0;
        if self.config.trace_passes {
            info!(
                stage = stage.as_str(),
                status = if ok { "OK" } else { "FAIL" },
                ms = elapsed.as_secs_f64() * 1000.0,
                "pass"
            );
        }
        self.timings.push(PassTiming { stage, ok, elapsed });
        artifact
    }
}

fn run_stages(out: &mut CompileOutput, passes: &mut Passes, src: &[u8]) {
    let config = passes.config;
    let file = FileId(0);

    // The parser reports lexical errors itself; the lexer pass only does
    // when it is the last one.
    let report_lexical = !config.runs(Stage::Parse);
    out.token_count = passes.run(Stage::Lex, |sink| {
        let tokens = vitte_lexer::lex(src, file);
        if report_lexical {
            report_lexical_errors(&tokens, sink);
        }
        tokens.len()
    });
    if !config.runs(Stage::Parse) {
        return;
    }

    let interner = &out.interner;
    let parsed: &ParseOutput = out.ast.insert(passes.run(Stage::Parse, |sink| {
        let parsed = vitte_parse::parse(src, file, interner);
        parsed.emit_to(sink);
        parsed
    }));
    if !config.runs(Stage::Resolve) {
        return;
    }

    let (ast, root) = (&parsed.ast, parsed.root);
    let resolved: &ResolveResult = out.resolve.insert(passes.run(Stage::Resolve, |sink| {
        vitte_resolve::resolve(ast, root, interner, sink)
    }));
    if !config.runs(Stage::Typeck) {
        return;
    }

    let symbols = config.resolve_types.then_some(resolved);
    out.typeck = Some(passes.run(Stage::Typeck, |sink| {
        vitte_types::typecheck(ast, root, interner, symbols, sink)
    }));
    if !config.runs(Stage::Hir) {
        return;
    }

    let module = module_name(&out.name);
    let hir: &HirModule = out.hir.insert(passes.run(Stage::Hir, |_| {
        vitte_hir::build_module_named(ast, root, interner, resolved, module)
    }));
    if !config.runs(Stage::Lir) {
        return;
    }

    out.lir = passes.run(Stage::Lir, |sink| lower_to_lir(hir, sink));
}

/// Module name for a unit: the file stem of its name.
fn module_name(unit: &str) -> &str {
    Path::new(unit)
        .file_stem()
        .and_then(OsStr::to_str)
        .filter(|stem| !stem.is_empty())
        .unwrap_or(vitte_hir::DEFAULT_MODULE_NAME)
}

fn report_lexical_errors(tokens: &[Token<'_>], sink: &mut dyn DiagnosticSink) {
    for tok in tokens {
        if tok.kind == TokenKind::Error {
            let code = if tok.flags.contains(TokenFlags::UNTERMINATED) {
                ErrorCode::E0002
            } else {
                ErrorCode::E0001
            };
            sink.emit(
                Diagnostic::error(code)
                    .with_message(tok.error_message().unwrap_or("invalid token"))
                    .with_span(tok.span),
            );
        }
        if tok.flags.contains(TokenFlags::INVALID_UTF8) {
            sink.emit(
                Diagnostic::warning(ErrorCode::E0003)
                    .with_message("invalid UTF-8 in literal")
                    .with_span(tok.span),
            );
        }
    }
}

/// Build and validate the block IR. Failures are internal errors, reported
/// at the offending function.
fn lower_to_lir(hir: &HirModule, sink: &mut dyn DiagnosticSink) -> Option<LirModule> {
    let built = vitte_lir::build_from_hir(hir)
        .map_err(|err| (ErrorCode::E9001, err))
        .and_then(|lir| {
            vitte_lir::validate(&lir)
                .map(|()| lir)
                .map_err(|err| (ErrorCode::E9002, err))
        });
    match built {
        Ok(lir) => Some(lir),
        Err((code, err)) => {
            sink.emit(internal_error(code, &err, hir));
            None
        }
    }
}

fn internal_error(code: ErrorCode, err: &LirError, hir: &HirModule) -> Diagnostic {
    let span = hir
        .functions
        .get(err.function())
        .map_or(Span::DUMMY, |func| func.span);
    Diagnostic::error(code)
        .with_message(err.to_string())
        .with_span(span)
        .with_note(code.description())
}

#[cfg(test)]
mod tests;
