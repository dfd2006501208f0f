//! Reserved SQL words recognized by the tokenizer.
//!
//! Words in this list become `TokenKind::Keyword` and are forced apart from
//! neighbouring tokens when a fragment is normalized. Anything else made of
//! name characters is an ordinary identifier. `DATE` is deliberately absent:
//! it introduces a date literal only when a quoted string follows and is a
//! plain identifier otherwise.
//!
//! Keywords are matched case-insensitively via `from_lower` on a lower-cased
//! word; `as_str` gives the canonical lower-case spelling used for output.

macro_rules! keywords {
    ($($variant:ident => $text:literal),* $(,)?) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum Keyword {
            $($variant),*
        }

        impl Keyword {
            /// Every keyword, in declaration order.
            pub const ALL: &'static [Keyword] = &[$(Keyword::$variant),*];

            /// Attempt to classify a *lower-cased* word.
            pub fn from_lower(word: &str) -> Option<Self> {
                match word {
                    $($text => Some(Keyword::$variant),)*
                    _ => None,
                }
            }

            /// Canonical lowercase string form of the keyword.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Keyword::$variant => $text),*
                }
            }
        }
    };
}

keywords! {
    All => "all",
    And => "and",
    Any => "any",
    As => "as",
    Asc => "asc",
    Between => "between",
    By => "by",
    Case => "case",
    Cross => "cross",
    Delete => "delete",
    Desc => "desc",
    Distinct => "distinct",
    Else => "else",
    End => "end",
    Escape => "escape",
    Except => "except",
    Exists => "exists",
    False => "false",
    Fetch => "fetch",
    For => "for",
    From => "from",
    Full => "full",
    Group => "group",
    Having => "having",
    In => "in",
    Inner => "inner",
    Insert => "insert",
    Intersect => "intersect",
    Into => "into",
    Is => "is",
    Join => "join",
    Left => "left",
    Like => "like",
    Limit => "limit",
    Minus => "minus",
    Natural => "natural",
    Not => "not",
    Null => "null",
    Offset => "offset",
    On => "on",
    Or => "or",
    Order => "order",
    Outer => "outer",
    Right => "right",
    Select => "select",
    Set => "set",
    Some => "some",
    Then => "then",
    True => "true",
    Union => "union",
    Update => "update",
    Using => "using",
    Values => "values",
    When => "when",
    Where => "where",
    With => "with",
}

impl Keyword {
    /// Case-insensitive lookup for a word as it appears in source text.
    pub fn lookup(word: &str) -> Option<Self> {
        Self::from_lower(&word.to_ascii_lowercase())
    }
}

impl std::fmt::Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_known_keywords() {
        for w in ["select", "from", "where", "and", "or", "join", "null", "values"] {
            assert!(Keyword::from_lower(w).is_some(), "{w} should be recognized");
        }
    }

    #[test]
    fn rejects_unknown_words() {
        for w in ["foo", "date", "dual", "rownum", "SELECT"] {
            assert!(
                Keyword::from_lower(w).is_none(),
                "{w} should NOT be recognized"
            );
        }
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(Keyword::lookup("SeLeCt"), Some(Keyword::Select));
        assert_eq!(Keyword::lookup("Date"), None);
    }

    #[test]
    fn display_matches_as_str() {
        for kw in Keyword::ALL {
            assert_eq!(kw.to_string(), kw.as_str());
            assert_eq!(Keyword::from_lower(kw.as_str()), Some(*kw));
        }
    }
}
