//! Pipeline configuration.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use tracing::warn;

/// Compiler stages, in execution order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    Lex,
    Parse,
    Resolve,
    Typeck,
    Hir,
    Lir,
}

impl Stage {
    pub const ALL: [Stage; 6] = [
        Stage::Lex,
        Stage::Parse,
        Stage::Resolve,
        Stage::Typeck,
        Stage::Hir,
        Stage::Lir,
    ];

    /// Name used in diagnostics and on the command line.
    pub const fn as_str(self) -> &'static str {
        match self {
            Stage::Lex => "lex",
            Stage::Parse => "parse",
            Stage::Resolve => "resolve",
            Stage::Typeck => "typeck",
            Stage::Hir => "hir",
            Stage::Lir => "lir",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown stage `{0}` (expected lex, parse, resolve, typeck, hir or lir)")]
pub struct UnknownStage(pub String);

impl FromStr for Stage {
    type Err = UnknownStage;

    /// Case-insensitive. `ir` is accepted for [`Stage::Lir`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        if wanted == "ir" {
            return Ok(Stage::Lir);
        }
        Stage::ALL
            .into_iter()
            .find(|stage| stage.as_str() == wanted)
            .ok_or_else(|| UnknownStage(s.to_owned()))
    }
}

/// How far to run and what to report.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Last stage to run; later artifacts stay `None`.
    pub stop_after: Stage,
    /// Feed the resolver's symbols to the type checker. Without them every
    /// identifier checks as `unknown`.
    pub resolve_types: bool,
    /// Log one `info!` line per pass with its status and duration.
    pub trace_passes: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            stop_after: Stage::Lir,
            resolve_types: true,
            trace_passes: false,
        }
    }
}

impl PipelineConfig {
    pub const STOP_AFTER_VAR: &'static str = "VITTE_STOP_AFTER";
    pub const TRACE_PASSES_VAR: &'static str = "VITTE_TRACE_PASSES";

    /// Defaults overridden by `VITTE_STOP_AFTER` and `VITTE_TRACE_PASSES`.
    pub fn from_env() -> Self {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Like [`from_env`](Self::from_env), reading variables through
    /// `lookup`. Invalid values are logged and ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(value) = lookup(Self::STOP_AFTER_VAR) {
            match value.parse() {
                Ok(stage) => config.stop_after = stage,
                Err(err) => warn!(var = Self::STOP_AFTER_VAR, %err, "ignoring invalid value"),
            }
        }
        if let Some(value) = lookup(Self::TRACE_PASSES_VAR) {
            match parse_flag(&value) {
                Some(on) => config.trace_passes = on,
                None => warn!(var = Self::TRACE_PASSES_VAR, value = %value, "ignoring invalid flag"),
            }
        }
        config
    }

    /// Whether `stage` runs under this configuration.
    pub fn runs(&self, stage: Stage) -> bool {
        stage <= self.stop_after
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "" | "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
