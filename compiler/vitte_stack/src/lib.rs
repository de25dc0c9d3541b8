//! Stack growth for deeply nested source.
//!
//! The parser, resolver and type checker all recurse over the tree. A long
//! chain like `((((((x))))))` or a deeply nested `if` ladder would blow the
//! native stack, so every recursive entry point goes through
//! [`ensure_sufficient_stack`].
//!
//! On native targets the closure runs on a freshly grown segment when less
//! than [`RED_ZONE`] bytes remain. On `wasm32` it is a plain call.

/// Remaining stack below which a new segment is allocated.
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment.
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, growing the stack first if it is nearly exhausted.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

/// Run `f` directly; the wasm runtime owns its stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
