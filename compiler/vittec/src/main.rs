//! Vitte compiler CLI.

use std::io::{self, IsTerminal};
use std::path::PathBuf;

use vittec::{init_tracing_with, write_report, DumpKind, Pipeline, PipelineConfig};

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() || args.iter().any(|arg| arg == "-h" || arg == "--help") {
        print_usage();
        return;
    }

    let mut config = PipelineConfig::from_env();
    let mut dump = None;
    let mut paths = Vec::new();
    for arg in &args {
        if let Some(stage) = arg.strip_prefix("--stop-after=") {
            match stage.parse() {
                Ok(stage) => config.stop_after = stage,
                Err(err) => fail(&err.to_string()),
            }
        } else if let Some(kind) = arg.strip_prefix("--dump=") {
            dump = Some(match kind {
                "ast" => DumpKind::Ast,
                "hir" => DumpKind::Hir,
                "lir" | "ir" => DumpKind::Lir,
                other => fail(&format!("unknown dump `{other}` (expected ast, hir or lir)")),
            });
        } else if arg == "--trace-passes" {
            config.trace_passes = true;
        } else if arg == "--no-resolve-types" {
            config.resolve_types = false;
        } else if arg.starts_with('-') {
            fail(&format!("unknown option `{arg}`"));
        } else {
            paths.push(PathBuf::from(arg));
        }
    }
    if paths.is_empty() {
        fail("no input files");
    }

    init_tracing_with(config.trace_passes.then_some("vittec=info"));

    let color = io::stderr().is_terminal();
    let mut failed = false;
    for result in Pipeline::new(config).check_files(&paths) {
        match result {
            Ok(out) => {
                let written = write_report(
                    &out,
                    dump,
                    color,
                    &mut io::stderr().lock(),
                    &mut io::stdout().lock(),
                );
                if let Err(err) = written {
                    eprintln!("error: {err}");
                    failed = true;
                }
                failed |= !out.ok;
            }
            Err(err) => {
                eprintln!("error: {err}");
                failed = true;
            }
        }
    }

    if failed {
        std::process::exit(1);
    }
}

fn fail(message: &str) -> ! {
    eprintln!("error: {message}");
    eprintln!("Run `vittec --help` for usage.");
    std::process::exit(1);
}

fn print_usage() {
    eprintln!("Vitte compiler");
    eprintln!();
    eprintln!("Usage: vittec [options] <file.vit>...");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --stop-after=<stage>  Last stage to run: lex, parse, resolve, typeck, hir, lir");
    eprintln!("  --dump=<what>         Print an artifact to stdout: ast, hir, lir");
    eprintln!("  --no-resolve-types    Type-check without resolver symbols");
    eprintln!("  --trace-passes        Log each pass with its status and duration");
    eprintln!("  -h, --help            Show this message");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  VITTE_STOP_AFTER      Same as --stop-after");
    eprintln!("  VITTE_TRACE_PASSES    Same as --trace-passes (1/0)");
    eprintln!("  VITTE_LOG, RUST_LOG   Tracing filter, e.g. `vitte_hir=trace`");
}
