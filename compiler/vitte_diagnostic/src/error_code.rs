//! Error codes for all compiler diagnostics.
//!
//! The first digit names the phase that raised the diagnostic, which keeps
//! codes greppable and stable across message rewording.

use std::fmt;

/// Error codes for all compiler diagnostics.
///
/// Format: E#### where first digit indicates phase:
/// - E0xxx: Lexer errors
/// - E1xxx: Parser errors
/// - E2xxx: Resolution and type errors
/// - E9xxx: Internal compiler errors
/// - Wxxxx: Warnings
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Lexer Errors (E0xxx)
    /// Unexpected character in source
    E0001,
    /// Unterminated string or char literal
    E0002,
    /// Malformed UTF-8 inside a literal
    E0003,

    // Parser Errors (E1xxx)
    /// Unexpected token
    E1001,
    /// Expected expression
    E1002,
    /// Expected identifier
    E1003,
    /// Expected pattern
    E1004,
    /// Malformed or out-of-range numeric literal
    E1005,

    // Resolution and Type Errors (E2xxx)
    /// Type mismatch
    E2001,
    /// Undefined identifier
    E2003,
    /// Undefined type
    E2004,
    /// Duplicate definition
    E2006,
    /// Operand must be bool
    E2101,
    /// Operand must be numeric
    E2102,
    /// Invalid string concatenation
    E2103,
    /// Wrong number of arguments
    E2104,

    // Internal Errors (E9xxx)
    /// Block IR construction failed
    E9001,
    /// Block IR validation failed
    E9002,

    // Warnings
    /// Equality between different types
    W2001,
}

impl ErrorCode {
    /// Every code, in declaration order.
    pub const ALL: &'static [ErrorCode] = &[
        ErrorCode::E0001,
        ErrorCode::E0002,
        ErrorCode::E0003,
        ErrorCode::E1001,
        ErrorCode::E1002,
        ErrorCode::E1003,
        ErrorCode::E1004,
        ErrorCode::E1005,
        ErrorCode::E2001,
        ErrorCode::E2003,
        ErrorCode::E2004,
        ErrorCode::E2006,
        ErrorCode::E2101,
        ErrorCode::E2102,
        ErrorCode::E2103,
        ErrorCode::E2104,
        ErrorCode::E9001,
        ErrorCode::E9002,
        ErrorCode::W2001,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "E0001",
            ErrorCode::E0002 => "E0002",
            ErrorCode::E0003 => "E0003",
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E1004 => "E1004",
            ErrorCode::E1005 => "E1005",
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E2004 => "E2004",
            ErrorCode::E2006 => "E2006",
            ErrorCode::E2101 => "E2101",
            ErrorCode::E2102 => "E2102",
            ErrorCode::E2103 => "E2103",
            ErrorCode::E2104 => "E2104",
            ErrorCode::E9001 => "E9001",
            ErrorCode::E9002 => "E9002",
            ErrorCode::W2001 => "W2001",
        }
    }

    /// One-line summary of what the code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "unexpected character",
            ErrorCode::E0002 => "unterminated literal",
            ErrorCode::E0003 => "invalid UTF-8 in literal",
            ErrorCode::E1001 => "unexpected token",
            ErrorCode::E1002 => "expected expression",
            ErrorCode::E1003 => "expected identifier",
            ErrorCode::E1004 => "expected pattern",
            ErrorCode::E1005 => "invalid numeric literal",
            ErrorCode::E2001 => "type mismatch",
            ErrorCode::E2003 => "undefined identifier",
            ErrorCode::E2004 => "undefined type",
            ErrorCode::E2006 => "duplicate definition",
            ErrorCode::E2101 => "operand must be bool",
            ErrorCode::E2102 => "operand must be numeric",
            ErrorCode::E2103 => "invalid string concatenation",
            ErrorCode::E2104 => "wrong number of arguments",
            ErrorCode::E9001 => "IR construction failed",
            ErrorCode::E9002 => "IR validation failed",
            ErrorCode::W2001 => "equality compare between different types",
        }
    }

    /// Check if this is a lexer error (E0xxx range).
    pub fn is_lexer_error(&self) -> bool {
        matches!(self, ErrorCode::E0001 | ErrorCode::E0002 | ErrorCode::E0003)
    }

    /// Check if this is a parser/syntax error (E1xxx range).
    pub fn is_parser_error(&self) -> bool {
        matches!(
            self,
            ErrorCode::E1001
                | ErrorCode::E1002
                | ErrorCode::E1003
                | ErrorCode::E1004
                | ErrorCode::E1005
        )
    }

    /// Check if this is a resolution or type error (E2xxx range).
    pub fn is_type_error(&self) -> bool {
        matches!(
            self,
            ErrorCode::E2001
                | ErrorCode::E2003
                | ErrorCode::E2004
                | ErrorCode::E2006
                | ErrorCode::E2101
                | ErrorCode::E2102
                | ErrorCode::E2103
                | ErrorCode::E2104
        )
    }

    pub fn is_internal_error(&self) -> bool {
        matches!(self, ErrorCode::E9001 | ErrorCode::E9002)
    }

    pub fn is_warning(&self) -> bool {
        matches!(self, ErrorCode::W2001)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parse an error code string like `"E2001"` or `"w2001"`.
impl std::str::FromStr for ErrorCode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_uppercase();
        Self::ALL
            .iter()
            .find(|code| code.as_str() == upper)
            .copied()
            .ok_or(())
    }
}
