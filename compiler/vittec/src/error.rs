use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Driver failures outside the compiler proper. Problems in the source are
/// diagnostics, never errors.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("cannot read `{}`: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot write output: {0}")]
    Write(#[from] io::Error),
}
