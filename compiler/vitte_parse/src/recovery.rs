//! Error recovery for the parser.
//!
//! Token sets are `u128` bitsets over `TokenKind` discriminants, so
//! membership is one AND. [`Parser::synchronize`] skips to the next point
//! where parsing can sensibly resume.

use vitte_ir::TokenKind;

use crate::Parser;

const _: () = assert!(
    TokenKind::COUNT <= 128,
    "TokenSet uses a u128 bitset; every discriminant must be < 128"
);

/// A set of token kinds with O(1) membership.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct TokenSet(u128);

impl TokenSet {
    #[inline]
    pub const fn new() -> Self {
        Self(0)
    }

    #[inline]
    #[must_use]
    pub const fn with(self, kind: TokenKind) -> Self {
        Self(self.0 | (1u128 << kind.index()))
    }

    #[inline]
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    #[inline]
    pub const fn contains(&self, kind: TokenKind) -> bool {
        (self.0 & (1u128 << kind.index())) != 0
    }
}

/// Statement terminators. Synchronization consumes them.
pub(crate) const STMT_END: TokenSet = TokenSet::new()
    .with(TokenKind::Semi)
    .with(TokenKind::DotEnd)
    .with(TokenKind::RBrace);

/// Keywords that can only begin a toplevel declaration. Synchronization
/// stops in front of them.
pub(crate) const TOPLEVEL_START: TokenSet = TokenSet::new()
    .with(TokenKind::Mod)
    .with(TokenKind::Use)
    .with(TokenKind::Export)
    .with(TokenKind::Type)
    .with(TokenKind::Struct)
    .with(TokenKind::Union)
    .with(TokenKind::Enum)
    .with(TokenKind::Fn)
    .with(TokenKind::Scn)
    .with(TokenKind::Prog)
    .with(TokenKind::Program)
    .with(TokenKind::Service)
    .with(TokenKind::Kernel)
    .with(TokenKind::Driver)
    .with(TokenKind::Tool)
    .with(TokenKind::Pipeline);

/// Tokens that end an unbraced block without being part of it.
pub(crate) const PHRASE_BLOCK_END: TokenSet = TOPLEVEL_START
    .with(TokenKind::Elif)
    .with(TokenKind::Else);

impl Parser<'_, '_> {
    /// Skip to just after a statement terminator, or to just before a
    /// toplevel keyword, whichever comes first. Always stops at `Eof`.
    ///
    /// Returns the number of tokens skipped.
    pub(crate) fn synchronize(&mut self) -> usize {
        let mut skipped = 0;
        loop {
            let kind = self.cursor.kind();
            if kind == TokenKind::Eof || TOPLEVEL_START.contains(kind) {
                break;
            }
            self.advance();
            skipped += 1;
            if STMT_END.contains(kind) {
                break;
            }
        }
        self.had_error = false;
        skipped
    }
}
