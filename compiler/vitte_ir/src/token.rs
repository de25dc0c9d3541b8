//! Tokens produced by the lexer.
//!
//! Tokens are ephemeral: the lexer hands them out one at a time and they
//! borrow their text straight from the source buffer.

use std::borrow::Cow;
use std::fmt;

use bitflags::bitflags;

use crate::Span;

/// Token kinds for Vitte.
///
/// Payload-free so that a kind fits in one byte and token sets can be
/// bitmasks; the literal text lives in [`Token::text`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum TokenKind {
    Eof,
    Error,
    Ident,
    Int,
    Float,
    String,
    Char,

    // Keywords
    Mod,
    Use,
    Export,
    From,
    As,
    Type,
    Struct,
    Union,
    Enum,
    Fn,
    Scn,
    Prog,
    Program,
    Service,
    Kernel,
    Driver,
    Tool,
    Pipeline,
    Let,
    Const,
    If,
    Elif,
    Else,
    While,
    For,
    Match,
    Break,
    Continue,
    Return,
    Set,
    Say,
    Do,
    When,
    Loop,
    Ret,
    True,
    False,
    Null,

    // Punctuation
    Dot,
    Comma,
    Colon,
    ColonColon,
    Semi,
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,

    // Operators
    Plus,
    PlusEq,
    Minus,
    Arrow,
    MinusEq,
    Star,
    StarEq,
    Slash,
    SlashEq,
    Percent,
    PercentEq,
    Eq,
    EqEq,
    FatArrow,
    Bang,
    BangEq,
    Lt,
    LtEq,
    Shl,
    ShlEq,
    Gt,
    GtEq,
    Shr,
    ShrEq,
    Amp,
    AmpAmp,
    AmpEq,
    Pipe,
    PipePipe,
    PipeEq,
    Caret,
    CaretEq,
    Question,

    /// Block terminator `.end`.
    DotEnd,

    // Trivia, only produced when the lexer runs in trivia mode.
    Whitespace,
    Comment,
}

impl TokenKind {
    /// Number of token kinds; every discriminant is below this.
    pub const COUNT: usize = TokenKind::Comment as usize + 1;

    /// Dense discriminant, used as a bit index by token sets.
    #[inline]
    pub const fn index(self) -> u8 {
        self as u8
    }

    pub const fn is_keyword(self) -> bool {
        (self as u8) >= (TokenKind::Mod as u8) && (self as u8) <= (TokenKind::Null as u8)
    }

    pub const fn is_trivia(self) -> bool {
        matches!(self, TokenKind::Whitespace | TokenKind::Comment)
    }

    pub const fn is_literal(self) -> bool {
        matches!(
            self,
            TokenKind::Int | TokenKind::Float | TokenKind::String | TokenKind::Char
        )
    }

    /// Keywords that introduce an entry-point declaration.
    pub const fn is_entry_keyword(self) -> bool {
        matches!(
            self,
            TokenKind::Prog
                | TokenKind::Program
                | TokenKind::Service
                | TokenKind::Kernel
                | TokenKind::Driver
                | TokenKind::Tool
                | TokenKind::Pipeline
        )
    }

    /// Keywords that may only start a toplevel declaration.
    pub const fn is_toplevel_keyword(self) -> bool {
        self.is_entry_keyword()
            || matches!(
                self,
                TokenKind::Mod
                    | TokenKind::Use
                    | TokenKind::Export
                    | TokenKind::Type
                    | TokenKind::Struct
                    | TokenKind::Union
                    | TokenKind::Enum
                    | TokenKind::Fn
                    | TokenKind::Scn
            )
    }

    /// Keywords that start a statement.
    pub const fn starts_statement(self) -> bool {
        matches!(
            self,
            TokenKind::Let
                | TokenKind::Const
                | TokenKind::Set
                | TokenKind::Say
                | TokenKind::Do
                | TokenKind::If
                | TokenKind::While
                | TokenKind::For
                | TokenKind::Match
                | TokenKind::Break
                | TokenKind::Continue
                | TokenKind::Return
                | TokenKind::Ret
        )
    }

    /// Human-readable name used in "expected X" messages.
    pub const fn display_name(self) -> &'static str {
        match self {
            TokenKind::Eof => "end of file",
            TokenKind::Error => "invalid token",
            TokenKind::Ident => "identifier",
            TokenKind::Int => "integer",
            TokenKind::Float => "float",
            TokenKind::String => "string",
            TokenKind::Char => "char",
            TokenKind::Mod => "mod",
            TokenKind::Use => "use",
            TokenKind::Export => "export",
            TokenKind::From => "from",
            TokenKind::As => "as",
            TokenKind::Type => "type",
            TokenKind::Struct => "struct",
            TokenKind::Union => "union",
            TokenKind::Enum => "enum",
            TokenKind::Fn => "fn",
            TokenKind::Scn => "scn",
            TokenKind::Prog => "prog",
            TokenKind::Program => "program",
            TokenKind::Service => "service",
            TokenKind::Kernel => "kernel",
            TokenKind::Driver => "driver",
            TokenKind::Tool => "tool",
            TokenKind::Pipeline => "pipeline",
            TokenKind::Let => "let",
            TokenKind::Const => "const",
            TokenKind::If => "if",
            TokenKind::Elif => "elif",
            TokenKind::Else => "else",
            TokenKind::While => "while",
            TokenKind::For => "for",
            TokenKind::Match => "match",
            TokenKind::Break => "break",
            TokenKind::Continue => "continue",
            TokenKind::Return => "return",
            TokenKind::Set => "set",
            TokenKind::Say => "say",
            TokenKind::Do => "do",
            TokenKind::When => "when",
            TokenKind::Loop => "loop",
            TokenKind::Ret => "ret",
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::Null => "null",
            TokenKind::Dot => "'.'",
            TokenKind::Comma => "','",
            TokenKind::Colon => "':'",
            TokenKind::ColonColon => "'::'",
            TokenKind::Semi => "';'",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::LBracket => "'['",
            TokenKind::RBracket => "']'",
            TokenKind::LBrace => "'{'",
            TokenKind::RBrace => "'}'",
            TokenKind::Plus => "'+'",
            TokenKind::PlusEq => "'+='",
            TokenKind::Minus => "'-'",
            TokenKind::Arrow => "'->'",
            TokenKind::MinusEq => "'-='",
            TokenKind::Star => "'*'",
            TokenKind::StarEq => "'*='",
            TokenKind::Slash => "'/'",
            TokenKind::SlashEq => "'/='",
            TokenKind::Percent => "'%'",
            TokenKind::PercentEq => "'%='",
            TokenKind::Eq => "'='",
            TokenKind::EqEq => "'=='",
            TokenKind::FatArrow => "'=>'",
            TokenKind::Bang => "'!'",
            TokenKind::BangEq => "'!='",
            TokenKind::Lt => "'<'",
            TokenKind::LtEq => "'<='",
            TokenKind::Shl => "'<<'",
            TokenKind::ShlEq => "'<<='",
            TokenKind::Gt => "'>'",
            TokenKind::GtEq => "'>='",
            TokenKind::Shr => "'>>'",
            TokenKind::ShrEq => "'>>='",
            TokenKind::Amp => "'&'",
            TokenKind::AmpAmp => "'&&'",
            TokenKind::AmpEq => "'&='",
            TokenKind::Pipe => "'|'",
            TokenKind::PipePipe => "'||'",
            TokenKind::PipeEq => "'|='",
            TokenKind::Caret => "'^'",
            TokenKind::CaretEq => "'^='",
            TokenKind::Question => "'?'",
            TokenKind::DotEnd => "'.end'",
            TokenKind::Whitespace => "whitespace",
            TokenKind::Comment => "comment",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

bitflags! {
    /// Per-token properties found while scanning.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct TokenFlags: u8 {
        /// A string or char literal contains a malformed UTF-8 sequence.
        const INVALID_UTF8 = 1 << 0;
        /// A string or char literal ran into a newline or EOF.
        const UNTERMINATED = 1 << 1;
    }
}

/// One lexed token borrowing its text from the source.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Token<'src> {
    pub kind: TokenKind,
    pub span: Span,
    pub text: &'src [u8],
    pub flags: TokenFlags,
    /// Static message for `TokenKind::Error`.
    message: Option<&'static str>,
}

impl<'src> Token<'src> {
    pub fn new(kind: TokenKind, span: Span, text: &'src [u8]) -> Self {
        Token {
            kind,
            span,
            text,
            flags: TokenFlags::empty(),
            message: None,
        }
    }

    /// An error token covering `text`, carrying a static message.
    pub fn error(span: Span, text: &'src [u8], message: &'static str) -> Self {
        Token {
            kind: TokenKind::Error,
            span,
            text,
            flags: TokenFlags::empty(),
            message: Some(message),
        }
    }

    #[must_use]
    pub fn with_flags(mut self, flags: TokenFlags) -> Self {
        self.flags |= flags;
        self
    }

    /// Message attached to an error token.
    pub fn error_message(&self) -> Option<&'static str> {
        self.message
    }

    /// Token text as UTF-8, lossily converted when the source is malformed.
    pub fn text_str(&self) -> Cow<'src, str> {
        String::from_utf8_lossy(self.text)
    }

    #[inline]
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

#[cfg(test)]
mod tests;
