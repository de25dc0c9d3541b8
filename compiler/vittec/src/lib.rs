//! Vitte compiler driver.
//!
//! Wires the stages together over one compilation unit:
//!
//! ```text
//! bytes → lex → parse → resolve → typeck → HIR → block IR
//! ```
//!
//! Each unit gets its own [`StringInterner`](vitte_ir::StringInterner) and
//! diagnostic queue, so [`check_files`] can run units in parallel. Stages
//! never print; the caller renders [`CompileOutput::diagnostics`] with
//! [`render_diagnostics`].

mod config;
mod error;
mod pipeline;
mod render;

use std::sync::Once;

pub use config::{PipelineConfig, Stage, UnknownStage};
pub use error::PipelineError;
pub use pipeline::{
    check_files, compile_file, compile_unit, CompileOutput, DumpKind, PassTiming, Pipeline,
};
pub use render::{render_diagnostic, render_diagnostics, write_report};

static TRACING_INIT: Once = Once::new();

/// Install the tracing subscriber, once per process.
///
/// Filters come from `VITTE_LOG`, or `RUST_LOG` when that is unset. With
/// neither set nothing is installed and spans cost nothing. Output is an
/// indented tree on stderr, one level per stage span.
pub fn init_tracing() {
    init_tracing_with(None);
}

/// Like [`init_tracing`], using `fallback` directives when neither
/// variable is set.
pub fn init_tracing_with(fallback: Option<&str>) {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};
        use tracing_tree::HierarchicalLayer;

        let Some(directives) = ["VITTE_LOG", "RUST_LOG"]
            .into_iter()
            .find_map(|var| std::env::var(var).ok())
            .or_else(|| fallback.map(str::to_owned))
        else {
            return;
        };
        let filter = EnvFilter::try_new(&directives).unwrap_or_else(|err| {
            eprintln!("warning: ignoring log filter `{directives}`: {err}");
            EnvFilter::new("warn")
        });
        let tree = HierarchicalLayer::new(2)
            .with_targets(true)
            .with_writer(std::io::stderr);
        // A subscriber installed by the embedding program wins.
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(tree)
            .try_init();
    });
}
