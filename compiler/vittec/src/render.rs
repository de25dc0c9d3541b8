//! Source-snippet rendering of diagnostics with `ariadne`.

use std::io::{self, Write};
use std::ops::Range;

use ariadne::{Color, Config, Label, Report, ReportKind, Source};
use vitte_diagnostic::{Diagnostic, Severity};
use vitte_ir::Span;

use crate::{CompileOutput, DumpKind, PipelineError};

/// Write everything the driver shows for one unit: rendered diagnostics
/// and a count summary to `diag_w`, and the requested dump to `dump_w`.
pub fn write_report(
    out: &CompileOutput,
    dump: Option<DumpKind>,
    color: bool,
    diag_w: &mut dyn Write,
    dump_w: &mut dyn Write,
) -> Result<(), PipelineError> {
    render_diagnostics(out, color, diag_w)?;
    let (errors, warnings) = (out.error_count(), out.warning_count());
    if errors + warnings > 0 {
        writeln!(diag_w, "{}: {errors} error(s), {warnings} warning(s)", out.name)?;
    }

    let Some(kind) = dump else {
        return Ok(());
    };
    match out.dump(kind) {
        Some(text) => dump_w.write_all(text.as_bytes())?,
        None => writeln!(
            diag_w,
            "note: {}: nothing to dump, stopped before the {} stage",
            out.name,
            kind.stage()
        )?,
    }
    Ok(())
}

/// Render every diagnostic of `out` against its source, in report order.
pub fn render_diagnostics(out: &CompileOutput, color: bool, w: &mut dyn Write) -> io::Result<()> {
    for staged in &out.diagnostics {
        render_diagnostic(&out.name, &out.source, &staged.diagnostic, color, w)?;
    }
    Ok(())
}

/// Render one diagnostic with a labelled snippet of `src`.
pub fn render_diagnostic(
    name: &str,
    src: &[u8],
    diag: &Diagnostic,
    color: bool,
    w: &mut dyn Write,
) -> io::Result<()> {
    let (kind, accent) = match diag.severity {
        Severity::Error => (ReportKind::Error, Color::Red),
        Severity::Warning => (ReportKind::Warning, Color::Yellow),
        Severity::Info => (ReportKind::Advice, Color::Cyan),
    };
    let primary = char_range(src, diag.span);

    let mut report = Report::build(kind, name, primary.start)
        .with_config(Config::default().with_color(color))
        .with_code(diag.code.as_str())
        .with_message(&diag.message)
        .with_label(
            Label::new((name, primary))
                .with_message(diag.code.description())
                .with_color(accent),
        );
    for label in &diag.labels {
        report = report.with_label(
            Label::new((name, char_range(src, label.span)))
                .with_message(&label.message)
                .with_color(Color::Blue),
        );
    }
    if !diag.notes.is_empty() {
        report = report.with_note(diag.notes.join("\n"));
    }

    let text = String::from_utf8_lossy(src);
    report
        .finish()
        .write((name, Source::from(text.into_owned())), w)
}

/// `ariadne` counts characters; spans count bytes.
fn char_range(src: &[u8], span: Span) -> Range<usize> {
    let start = char_offset(src, span.start);
    let end = char_offset(src, span.end).max(start);
    start..end
}

/// Characters before byte `byte` of the lossily decoded source. Each
/// invalid sequence counts as one replacement character.
fn char_offset(src: &[u8], byte: u32) -> usize {
    let byte = usize::try_from(byte).map_or(src.len(), |b| b.min(src.len()));
    String::from_utf8_lossy(&src[..byte]).chars().count()
}
