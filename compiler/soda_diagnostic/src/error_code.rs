//! Error codes for all compiler diagnostics.

use std::fmt;

/// Error codes for compiler diagnostics.
///
/// Format: E#### where the first digit is the compiler phase:
/// - E3xxx: Name resolution errors
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Name Resolution Errors (E3xxx)
    /// A name is declared twice in the same scope
    E3001,
    /// A name does not resolve in any enclosing scope
    E3002,
    /// A lookup of an empty name or a name with an empty segment
    E3003,
}

impl ErrorCode {
    pub const ALL: &'static [ErrorCode] = &[
        ErrorCode::E3001,
        ErrorCode::E3002,
        ErrorCode::E3003,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E3001 => "E3001",
            ErrorCode::E3002 => "E3002",
            ErrorCode::E3003 => "E3003",
        }
    }

    /// One-line explanation, for `--explain` style output.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E3001 => "multiple definitions of the same name in one scope",
            ErrorCode::E3002 => "reference to a name that is not declared",
            ErrorCode::E3003 => "lookup of an empty name",
        }
    }

    /// Whether this code belongs to the name resolution phase.
    pub fn is_resolution_error(&self) -> bool {
        self.as_str().starts_with("E3")
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
