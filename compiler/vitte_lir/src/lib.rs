//! Vitte LIR - basic blocks over the HIR instruction set.
//!
//! [`build_from_hir`] cuts each HIR instruction stream into basic blocks
//! at its leaders (the entry, every jump target, and every instruction
//! after a jump or return) and turns the jump that ends each range into a
//! [`Terminator`]. [`validate`] re-checks the block graph.
//!
//! Failures here are internal inconsistencies in the HIR, never user
//! errors, so they come back as [`LirError`] instead of diagnostics.

mod build;
mod display;
mod error;
mod model;
mod validate;

pub use build::build_from_hir;
pub use display::LirDisplay;
pub use error::LirError;
pub use model::{BasicBlock, BlockId, LirFunction, LirInst, LirModule, Terminator};
pub use validate::validate;
