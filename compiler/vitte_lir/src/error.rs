//! Internal errors of block construction and validation.

use thiserror::Error;

/// A malformed instruction stream or block graph.
///
/// `function` is the position of the function in its module.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LirError {
    #[error("function #{function}: jump at {at} targets {target}, past the end of {len} instructions")]
    TargetOutOfRange {
        function: usize,
        at: usize,
        target: usize,
        len: usize,
    },

    #[error("function #{function}: conditional jump at {at} has no fallthrough block")]
    MissingFallthrough { function: usize, at: usize },

    #[error("function #{function} has no blocks")]
    EmptyFunction { function: usize },

    #[error("function #{function}: block bb{block} has no terminator")]
    MissingTerminator { function: usize, block: usize },

    #[error("function #{function}: block bb{block} jumps to bb{target}, but there are {count} blocks")]
    BlockOutOfRange {
        function: usize,
        block: usize,
        target: usize,
        count: usize,
    },
}

impl LirError {
    /// Position of the offending function in its module.
    pub fn function(&self) -> usize {
        match *self {
            LirError::TargetOutOfRange { function, .. }
            | LirError::MissingFallthrough { function, .. }
            | LirError::EmptyFunction { function }
            | LirError::MissingTerminator { function, .. }
            | LirError::BlockOutOfRange { function, .. } => function,
        }
    }
}
