//! Byte cursor with line/column tracking.
//!
//! The cursor never looks past the end of the source: reads beyond it
//! return `0x00`, and [`Cursor::is_eof`] compares the position against the
//! source length so that a stray NUL byte is still distinguishable.

/// Position snapshot taken at the start of a token.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Mark {
    pub pos: u32,
    pub line: u32,
    pub col: u32,
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct Cursor<'a> {
    buf: &'a [u8],
    pos: u32,
    line: u32,
    col: u32,
}

impl<'a> Cursor<'a> {
    /// # Panics
    /// Panics if the source is 4 GiB or larger.
    pub fn new(buf: &'a [u8]) -> Self {
        assert!(
            u32::try_from(buf.len()).is_ok(),
            "source larger than 4 GiB is not supported"
        );
        Cursor {
            buf,
            pos: 0,
            line: 1,
            col: 1,
        }
    }

    /// Byte at the current position, `0x00` at EOF.
    #[inline]
    pub fn current(&self) -> u8 {
        self.nth(0)
    }

    #[inline]
    pub fn peek(&self) -> u8 {
        self.nth(1)
    }

    /// Byte `n` positions ahead, `0x00` past the end.
    #[inline]
    pub fn nth(&self, n: u32) -> u8 {
        self.buf
            .get((self.pos + n) as usize)
            .copied()
            .unwrap_or(0)
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos as usize >= self.buf.len()
    }

    #[inline]
    pub fn mark(&self) -> Mark {
        Mark {
            pos: self.pos,
            line: self.line,
            col: self.col,
        }
    }

    #[inline]
    pub fn pos(&self) -> u32 {
        self.pos
    }

    /// Advance one byte. `\n` starts a new line; every other byte moves
    /// one column.
    #[inline]
    pub fn advance(&mut self) {
        if self.is_eof() {
            return;
        }
        if self.buf[self.pos as usize] == b'\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        self.pos += 1;
    }

    pub fn advance_n(&mut self, n: u32) {
        for _ in 0..n {
            self.advance();
        }
    }

    #[inline]
    pub fn eat_while(&mut self, pred: impl Fn(u8) -> bool) {
        while !self.is_eof() && pred(self.current()) {
            self.advance();
        }
    }

    fn remaining(&self) -> &'a [u8] {
        &self.buf[(self.pos as usize).min(self.buf.len())..]
    }

    /// Jump forward over `n` bytes known to contain no `\n`.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "offsets are bounded by the source length, checked in new()"
    )]
    fn skip_line_bytes(&mut self, n: usize) {
        self.pos += n as u32;
        self.col += n as u32;
    }

    /// Advance to the next `\n` (not consumed) or EOF.
    pub fn eat_until_newline_or_eof(&mut self) {
        let remaining = self.remaining();
        let offset = memchr::memchr(b'\n', remaining).unwrap_or(remaining.len());
        self.skip_line_bytes(offset);
    }

    /// Advance past the next `*/`, or to EOF when there is none.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "offsets are bounded by the source length, checked in new()"
    )]
    pub fn eat_block_comment_body(&mut self) {
        let remaining = self.remaining();
        let len = memchr::memmem::find(remaining, b"*/").map_or(remaining.len(), |off| off + 2);
        let body = &remaining[..len];
        match memchr::memrchr(b'\n', body) {
            Some(last_nl) => {
                self.line += memchr::memchr_iter(b'\n', body).count() as u32;
                self.pos += len as u32;
                self.col = (len - last_nl) as u32;
            }
            None => self.skip_line_bytes(len),
        }
    }

    /// Advance over literal content to the next `quote`, `\` or `\n`.
    /// Returns the byte found, or `None` at EOF.
    pub fn skip_to_literal_delim(&mut self, quote: u8) -> Option<u8> {
        let remaining = self.remaining();
        match memchr::memchr3(quote, b'\\', b'\n', remaining) {
            Some(off) => {
                self.skip_line_bytes(off);
                Some(self.current())
            }
            None => {
                self.skip_line_bytes(remaining.len());
                None
            }
        }
    }

    /// Source bytes in `start..end`.
    #[inline]
    pub fn slice(&self, start: u32, end: u32) -> &'a [u8] {
        &self.buf[start as usize..end as usize]
    }

    /// Width in bytes of the UTF-8 sequence led by the current byte,
    /// clamped to what is left of the source.
    pub fn char_width(&self) -> u32 {
        let width: u32 = match self.current() {
            0xC0..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF7 => 4,
            _ => 1,
        };
        #[allow(
            clippy::cast_possible_truncation,
            reason = "remaining length is bounded by the source length"
        )]
        let left = self.remaining().len() as u32;
        width.min(left.max(1))
    }
}
