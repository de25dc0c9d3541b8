//! Vitte IR - shared front-end vocabulary
//!
//! Every stage of the compiler speaks in terms of the types defined here:
//! - [`Span`] and [`FileId`] for source locations
//! - [`Name`] and [`StringInterner`] for identifiers
//! - [`Token`], [`TokenKind`] and [`TokenFlags`] for lexer output
//! - [`ast::Ast`] for the parsed tree, addressed by [`NodeId`]
//!
//! # Design
//!
//! - **Intern names**: identifiers and literal text become `Name(u32)`
//! - **Flatten trees**: nodes live in one arena, children in one side array
//! - **Ids, not pointers**: side tables in later stages key on `NodeId`

/// Compile-time assertion that a type has a specific size.
///
/// Guards the hot, frequently allocated records against accidental growth.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

pub mod ast;
mod interner;
mod name;
mod span;
mod token;

pub use ast::{Ast, BinaryOp, Node, NodeId, NodeKind, Payload, UnaryOp};
pub use interner::{InternOverflow, StringInterner};
pub use name::Name;
pub use span::{FileId, Span};
pub use token::{Token, TokenFlags, TokenKind};
