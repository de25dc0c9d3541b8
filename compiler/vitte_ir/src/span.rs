//! Source location spans.
//!
//! A span records both the byte range of a token or node and the 1-based
//! line/column of its first byte, so diagnostics never have to rescan the
//! source to report a position.

use std::fmt;

/// Identifies one compilation unit (one source file).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default, Debug, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct FileId(pub u32);

/// Source location span.
///
/// Layout: 20 bytes
/// - file: u32 - compilation unit
/// - start/end: u32 - byte offsets, end exclusive
/// - line/col: u32 - 1-based position of `start`
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    pub file: FileId,
    pub start: u32,
    pub end: u32,
    pub line: u32,
    pub col: u32,
}

crate::static_assert_size!(Span, 20);

impl Span {
    /// Placeholder span for synthesized code.
    pub const DUMMY: Span = Span {
        file: FileId(0),
        start: 0,
        end: 0,
        line: 0,
        col: 0,
    };

    #[inline]
    pub const fn new(file: FileId, start: u32, end: u32, line: u32, col: u32) -> Self {
        Span {
            file,
            start,
            end,
            line,
            col,
        }
    }

    /// Length of the span in bytes.
    #[inline]
    pub const fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Smallest span covering both. Line and column come from whichever
    /// span starts first.
    #[inline]
    #[must_use]
    pub fn merge(self, other: Span) -> Span {
        let first = if other.start < self.start { other } else { self };
        Span {
            file: self.file,
            start: first.start,
            end: self.end.max(other.end),
            line: first.line,
            col: first.col,
        }
    }

    /// Zero-length span at the end of this one.
    #[inline]
    #[must_use]
    pub fn shrink_to_end(self) -> Span {
        Span {
            start: self.end,
            ..self
        }
    }

    #[inline]
    pub fn to_range(&self) -> std::ops::Range<usize> {
        self.start as usize..self.end as usize
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}@{}:{}", self.start, self.end, self.line, self.col)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "file={} span=[{}..{}] line={} col={}",
            self.file.0, self.start, self.end, self.line, self.col
        )
    }
}

#[cfg(test)]
mod tests;
