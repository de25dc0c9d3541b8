//! Structural checks on a built module.

use crate::{LirError, LirModule, Terminator};

/// Check that every function has an entry block, every block a
/// terminator, and every successor an existing block. Def-use is not
/// checked.
pub fn validate(module: &LirModule) -> Result<(), LirError> {
    for (function, func) in module.functions.iter().enumerate() {
        let count = func.blocks.len();
        if count == 0 {
            return Err(LirError::EmptyFunction { function });
        }
        for (block, bb) in func.blocks.iter().enumerate() {
            if bb.term == Terminator::None {
                return Err(LirError::MissingTerminator { function, block });
            }
            if let Some(target) = bb.term.successors().find(|t| t.index() >= count) {
                return Err(LirError::BlockOutOfRange {
                    function,
                    block,
                    target: target.index(),
                    count,
                });
            }
        }
    }
    Ok(())
}
