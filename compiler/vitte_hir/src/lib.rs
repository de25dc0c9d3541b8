//! Vitte HIR - linear, register-based lowering of the AST.
//!
//! Each function becomes one flat stream of [`HirInst`]s over virtual
//! registers and named local slots. Structured control flow is lowered to
//! forward jumps whose targets are patched in place once known, plus
//! backward jumps for loops.
//!
//! The resolver result is required: it decides which toplevel items are
//! functions and which calls are direct.

mod display;
mod lower;
mod model;

use vitte_ir::{Ast, NodeId, StringInterner};
use vitte_resolve::ResolveResult;

pub use display::{InstDisplay, ModuleDisplay};
pub use model::{
    Callee, HirFunction, HirInst, HirModule, HirOp, HirSymbol, HirSymbolKind, InstIdx, LocalId,
    Reg,
};

/// Module name used when the caller has no file name.
pub const DEFAULT_MODULE_NAME: &str = "root";

/// Lower the file rooted at `root` into a module named `"root"`.
pub fn build_module(
    ast: &Ast,
    root: NodeId,
    interner: &StringInterner,
    resolved: &ResolveResult,
) -> HirModule {
    build_module_named(ast, root, interner, resolved, DEFAULT_MODULE_NAME)
}

/// Lower the file rooted at `root` into a module called `name`.
#[tracing::instrument(level = "debug", skip(ast, root, interner, resolved))]
pub fn build_module_named(
    ast: &Ast,
    root: NodeId,
    interner: &StringInterner,
    resolved: &ResolveResult,
    name: &str,
) -> HirModule {
    lower::lower_module(ast, root, interner, resolved, name)
}
