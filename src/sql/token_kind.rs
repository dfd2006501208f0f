//! Token kind definitions for the SQL tokenizer.
//!
//! Each `TokenKind` variant carries enough payload to re-render itself: the
//! `Display` impl produces the canonical text used by `normalize` (keywords
//! and ordinary identifiers lower-cased, literals re-escaped).
//!
//! See `keyword.rs` for the `Keyword` enum, `symbol.rs` for operators and
//! `tokenizer.rs` for scanning.

use crate::*;
use chrono::NaiveDate;
use std::fmt;

/// Spacing preference on one side of a token when fragments are normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spacing {
    /// Never separated from the neighbour (`.`, inside of parentheses).
    None,
    /// Separated only when the neighbour forces it (outside of `(`).
    Weak,
    /// Separated from other normal tokens (identifiers, literals).
    Normal,
    /// Always separated unless the neighbour says `None` (keywords, operators).
    Force,
}

impl Spacing {
    /// Whether a single space goes between a token whose trailing spacing is
    /// `self` and one whose leading spacing is `next`.
    pub fn space_before(self, next: Spacing) -> bool {
        match (self, next) {
            (Spacing::None, _) | (_, Spacing::None) => false,
            (Spacing::Force, _) | (_, Spacing::Force) => true,
            (Spacing::Normal, Spacing::Normal) => true,
            _ => false,
        }
    }
}

/// Classification for a token produced by the tokenizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// Ordinary or delimited identifier.
    Ident(Identifier),
    /// Reserved SQL keyword.
    Keyword(Keyword),
    /// Operator or punctuation.
    Symbol(Symbol),
    /// String literal content, quotes removed and `''` unescaped.
    String(String),
    /// Numeric literal exactly as written.
    Number(String),
    /// `DATE 'YYYY-MM-DD'` literal.
    Date(NaiveDate),
    /// Parameter reference `:name`, normalized name.
    Bind(String),
    /// `--` comment text up to the end of the line.
    LineComment(String),
    /// `/* */` comment text, may span lines.
    BlockComment(String),
}

impl TokenKind {
    /// True if this token is the given keyword.
    pub fn is_keyword(&self, kw: Keyword) -> bool {
        matches!(self, TokenKind::Keyword(k) if *k == kw)
    }

    /// True if this token is the given symbol.
    pub fn is_symbol(&self, symbol: Symbol) -> bool {
        matches!(self, TokenKind::Symbol(s) if *s == symbol)
    }

    /// Returns the identifier if this token is an `Ident`.
    pub fn ident(&self) -> Option<&Identifier> {
        match self {
            TokenKind::Ident(id) => Some(id),
            _ => None,
        }
    }

    pub fn is_ident(&self) -> bool {
        matches!(self, TokenKind::Ident(_))
    }

    /// Normalized parameter name if this token is a `Bind`.
    pub fn bind_name(&self) -> Option<&str> {
        match self {
            TokenKind::Bind(name) => Some(name),
            _ => None,
        }
    }

    pub fn is_comment(&self) -> bool {
        matches!(self, TokenKind::LineComment(_) | TokenKind::BlockComment(_))
    }

    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            TokenKind::String(_) | TokenKind::Number(_) | TokenKind::Date(_)
        )
    }

    /// (before, after) spacing used when normalizing.
    pub fn spacing(&self) -> (Spacing, Spacing) {
        match self {
            TokenKind::Keyword(_) | TokenKind::LineComment(_) | TokenKind::BlockComment(_) => {
                (Spacing::Force, Spacing::Force)
            }
            TokenKind::Symbol(symbol) => symbol.spacing(),
            TokenKind::Ident(_)
            | TokenKind::String(_)
            | TokenKind::Number(_)
            | TokenKind::Date(_)
            | TokenKind::Bind(_) => (Spacing::Normal, Spacing::Normal),
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Ident(id) => write!(f, "{id}"),
            TokenKind::Keyword(kw) => write!(f, "{kw}"),
            TokenKind::Symbol(symbol) => write!(f, "{symbol}"),
            TokenKind::String(s) => write!(f, "'{}'", s.replace('\'', "''")),
            TokenKind::Number(text) => f.write_str(text),
            TokenKind::Date(date) => write!(f, "date '{}'", date.format("%Y-%m-%d")),
            TokenKind::Bind(name) => write!(f, ":{}", name.to_ascii_lowercase()),
            TokenKind::LineComment(text) => write!(f, "--{text}"),
            TokenKind::BlockComment(text) => write!(f, "/*{text}*/"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn keyword_detection() {
        let tk = TokenKind::Keyword(Keyword::Select);
        assert!(tk.is_keyword(Keyword::Select));
        assert!(!tk.is_keyword(Keyword::From));
        assert!(tk.ident().is_none());
    }

    #[test]
    fn ident_access() {
        let tk = TokenKind::Ident(Identifier::parse("MyTable").unwrap());
        assert!(tk.is_ident());
        assert_eq!(tk.ident().map(Identifier::db_name), Some("MYTABLE"));
        assert!(!tk.is_comment());
    }

    #[rstest]
    #[case(TokenKind::String("it's".into()), "'it''s'")]
    #[case(TokenKind::Number(".50".into()), ".50")]
    #[case(TokenKind::Bind("CUSTOMER_ID".into()), ":customer_id")]
    #[case(TokenKind::Keyword(Keyword::Where), "where")]
    #[case(TokenKind::Symbol(Symbol::NotEqual), "<>")]
    #[case(TokenKind::LineComment(" note".into()), "-- note")]
    #[case(TokenKind::BlockComment(" a\n b ".into()), "/* a\n b */")]
    #[case(TokenKind::Date(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()), "date '2024-02-29'")]
    #[case(TokenKind::Ident(Identifier::parse("\"Odd\"\"Name\"").unwrap()), "\"Odd\"\"Name\"")]
    fn renders_losslessly(#[case] kind: TokenKind, #[case] expected: &str) {
        assert_eq!(kind.to_string(), expected);
    }

    #[rstest]
    #[case(Spacing::Normal, Spacing::Normal, true)]
    #[case(Spacing::Force, Spacing::Weak, true)]
    #[case(Spacing::Normal, Spacing::Weak, false)]
    #[case(Spacing::Force, Spacing::None, false)]
    #[case(Spacing::None, Spacing::Force, false)]
    #[case(Spacing::Weak, Spacing::Normal, false)]
    fn spacing_rules(#[case] after: Spacing, #[case] before: Spacing, #[case] expected: bool) {
        assert_eq!(after.space_before(before), expected);
    }
}
