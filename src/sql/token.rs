//! Token model tying a `TokenKind` to its source position.
//!
//! Positions are 1-based `(line, column)` pairs. Fragments are scanned line by
//! line, so a line/column pair is what error messages and callers want to see,
//! and it stays meaningful after the fragment is re-indented inside a larger
//! statement.
use crate::*;

/// A lexical token and where it starts in the original fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub location: Location,
}

impl Token {
    pub const fn new(kind: TokenKind, location: Location) -> Self {
        Self { kind, location }
    }

    pub const fn line(&self) -> usize {
        self.location.line
    }

    pub const fn column(&self) -> usize {
        self.location.column
    }

    /// Returns the identifier if this token is an identifier.
    pub fn ident(&self) -> Option<&Identifier> {
        self.kind.ident()
    }

    /// Returns true if this token represents a given keyword.
    pub fn is_keyword(&self, kw: Keyword) -> bool {
        self.kind.is_keyword(kw)
    }

    pub fn is_symbol(&self, symbol: Symbol) -> bool {
        self.kind.is_symbol(symbol)
    }

    pub fn bind_name(&self) -> Option<&str> {
        self.kind.bind_name()
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.kind, f)
    }
}
