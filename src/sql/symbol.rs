use crate::sql::Spacing;

/// Operators and punctuation recognized by the tokenizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    LeftParen,
    RightParen,
    LeftBracket,
    RightBracket,
    Comma,
    Semicolon,
    Dot,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Equal,
    NotEqual,
    BangEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    Arrow,
    Assign,
    Concat,
}

impl Symbol {
    /// Symbol table, two character entries first so they win over their
    /// one character prefixes.
    const TABLE: &'static [(&'static str, Symbol)] = &[
        ("<=", Symbol::LessEqual),
        (">=", Symbol::GreaterEqual),
        ("<>", Symbol::NotEqual),
        ("!=", Symbol::BangEqual),
        ("=>", Symbol::Arrow),
        (":=", Symbol::Assign),
        ("||", Symbol::Concat),
        ("(", Symbol::LeftParen),
        (")", Symbol::RightParen),
        ("[", Symbol::LeftBracket),
        ("]", Symbol::RightBracket),
        (",", Symbol::Comma),
        (";", Symbol::Semicolon),
        (".", Symbol::Dot),
        ("+", Symbol::Plus),
        ("-", Symbol::Minus),
        ("*", Symbol::Star),
        ("/", Symbol::Slash),
        ("%", Symbol::Percent),
        ("=", Symbol::Equal),
        ("<", Symbol::Less),
        (">", Symbol::Greater),
    ];

    /// Longest table entry starting with `first` (and `second`, if present).
    pub fn longest_match(first: char, second: Option<char>) -> Option<Self> {
        Self::TABLE.iter().find_map(|(text, symbol)| {
            let mut chars = text.chars();
            let head = chars.next()?;
            let matched = match chars.next() {
                Some(tail) => head == first && second == Some(tail),
                None => head == first,
            };
            matched.then_some(*symbol)
        })
    }

    pub fn as_str(self) -> &'static str {
        Self::TABLE
            .iter()
            .find(|(_, symbol)| *symbol == self)
            .map_or("", |(text, _)| *text)
    }

    /// Number of source characters this symbol spans.
    pub fn char_count(self) -> usize {
        self.as_str().chars().count()
    }

    /// (before, after) spacing used when normalizing.
    pub const fn spacing(self) -> (Spacing, Spacing) {
        use Symbol::*;
        match self {
            LeftParen | LeftBracket => (Spacing::Weak, Spacing::None),
            RightParen | RightBracket => (Spacing::None, Spacing::Normal),
            Comma | Semicolon => (Spacing::None, Spacing::Force),
            Dot => (Spacing::None, Spacing::None),
            Plus | Minus | Star | Slash | Percent | Equal | NotEqual | BangEqual | Less
            | LessEqual | Greater | GreaterEqual | Arrow | Assign | Concat => {
                (Spacing::Force, Spacing::Force)
            }
        }
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case('<', Some('='), Some(Symbol::LessEqual))]
    #[case('<', Some('>'), Some(Symbol::NotEqual))]
    #[case('<', Some(' '), Some(Symbol::Less))]
    #[case('<', None, Some(Symbol::Less))]
    #[case('!', Some('='), Some(Symbol::BangEqual))]
    #[case('!', Some('x'), None)]
    #[case('|', Some('|'), Some(Symbol::Concat))]
    #[case('|', None, None)]
    #[case('=', Some('>'), Some(Symbol::Arrow))]
    #[case('?', None, None)]
    fn longest_match(#[case] first: char, #[case] second: Option<char>, #[case] expected: Option<Symbol>) {
        assert_eq!(Symbol::longest_match(first, second), expected);
    }

    #[test]
    fn every_symbol_has_text() {
        for (text, symbol) in Symbol::TABLE {
            assert_eq!(symbol.as_str(), *text);
            assert_eq!(symbol.char_count(), text.chars().count());
        }
    }
}
