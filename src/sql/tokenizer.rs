use crate::ident::is_name_char;
use crate::sql::Source;
use crate::*;
use chrono::NaiveDate;

/// SQL tokenizer producing a validated stream of `Token`s.
///
/// Scope / Intent:
/// - Turns hand written SQL fragments into tokens so parameter references
///   (`:name`) can be discovered and the text re-rendered consistently.
/// - Does not check grammar; any sequence of valid tokens is accepted.
///
/// Behavior:
/// - Scans one character at a time over a line-buffered source; each line
///   break counts as a single whitespace character.
/// - Dispatches on the next character: letters start words (keywords,
///   identifiers, `DATE '…'` literals), digits and `.digit` start numbers,
///   `'` strings, `"` delimited identifiers, `:` parameter references or `:=`,
///   `--` and `/*` comments, anything else goes through the symbol table.
/// - Fails on the first malformed token and on more than `limit` tokens.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    source: Source,
    limit: usize,
    emitted: usize,
    failed: bool,
}

impl Tokenizer {
    /// Tokenizer bounded by the configured `max_tokens`.
    pub fn new(sql: &str) -> Self {
        Self {
            source: Source::new(sql),
            limit: config().max_tokens,
            emitted: 0,
            failed: false,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Number of tokens produced so far.
    pub fn emitted(&self) -> usize {
        self.emitted
    }

    /// Scan the next token, `Ok(None)` at end of input.
    pub fn next_token(&mut self) -> Result<Option<Token>> {
        self.source.skip_whitespace();
        let location = self.source.location();
        let Some(c) = self.source.peek() else {
            return Ok(None);
        };
        let second = self.source.peek_second();

        let kind = match c {
            c if c.is_ascii_alphabetic() => self.word(location)?,
            c if c.is_ascii_digit() => self.number()?,
            '.' if second.is_some_and(|d| d.is_ascii_digit()) => self.number()?,
            '\'' => TokenKind::String(self.quoted(location)?),
            '"' => self.delimited(location)?,
            ':' if second != Some('=') => self.bind(location)?,
            '-' if second == Some('-') => {
                self.source.advance();
                self.source.advance();
                TokenKind::LineComment(self.source.rest_of_line())
            }
            '/' if second == Some('*') => self.block_comment(location)?,
            c => {
                let symbol = Symbol::longest_match(c, second)
                    .ok_or(Error::InvalidCharacter { location, found: c })?;
                for _ in 0..symbol.char_count() {
                    self.source.advance();
                }
                TokenKind::Symbol(symbol)
            }
        };

        if self.emitted >= self.limit {
            return Err(Error::TooManyTokens { limit: self.limit });
        }
        self.emitted += 1;
        Ok(Some(Token::new(kind, location)))
    }

    fn word(&mut self, location: Location) -> Result<TokenKind> {
        let mut word = String::new();
        while let Some(c) = self.source.advance_if(is_name_char) {
            word.push(c);
        }
        if word.eq_ignore_ascii_case("date") && self.source.peek_past_whitespace() == Some('\'') {
            self.source.skip_whitespace();
            return self.date(location);
        }
        Ok(match Keyword::lookup(&word) {
            Some(kw) => TokenKind::Keyword(kw),
            None => TokenKind::Ident(Identifier::ordinary(&word)?),
        })
    }

    fn number(&mut self) -> Result<TokenKind> {
        let mut text = String::new();
        let mut seen_dot = false;
        while let Some(c) = self.source.peek() {
            match c {
                '0'..='9' => text.push(c),
                '.' if seen_dot => {
                    return Err(Error::MalformedLiteral {
                        location: self.source.location(),
                        reason: "second decimal point in numeric literal",
                    });
                }
                '.' => {
                    seen_dot = true;
                    text.push(c);
                }
                _ => break,
            }
            self.source.advance();
        }
        Ok(TokenKind::Number(text))
    }

    /// Content of a `'…'` literal with `''` unescaped.
    fn quoted(&mut self, location: Location) -> Result<String> {
        self.source.advance();
        let mut content = String::new();
        loop {
            match self.source.advance() {
                None => {
                    return Err(Error::MalformedLiteral {
                        location,
                        reason: "unterminated string literal",
                    });
                }
                Some('\'') if self.source.peek() == Some('\'') => {
                    self.source.advance();
                    content.push('\'');
                }
                Some('\'') => return Ok(content),
                Some(c) => content.push(c),
            }
        }
    }

    fn date(&mut self, location: Location) -> Result<TokenKind> {
        let text = self.quoted(location)?;
        NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d")
            .map(TokenKind::Date)
            .map_err(|_| Error::MalformedLiteral {
                location,
                reason: "date literal is not YYYY-MM-DD",
            })
    }

    fn delimited(&mut self, location: Location) -> Result<TokenKind> {
        self.source.advance();
        let mut content = String::new();
        loop {
            match self.source.advance() {
                None => {
                    return Err(Error::MalformedLiteral {
                        location,
                        reason: "unterminated delimited identifier",
                    });
                }
                Some('\n') if self.source.is_at_end() => {
                    return Err(Error::MalformedLiteral {
                        location,
                        reason: "unterminated delimited identifier",
                    });
                }
                Some('\n') => {
                    return Err(Error::InvalidNameAt {
                        location,
                        reason: "delimited identifier spans multiple lines",
                    });
                }
                Some('"') if self.source.peek() == Some('"') => {
                    self.source.advance();
                    content.push('"');
                }
                Some('"') => break,
                Some(c) => content.push(c),
            }
        }
        Identifier::delimited(content)
            .map(TokenKind::Ident)
            .map_err(|err| match err {
                Error::InvalidName { reason, .. } => Error::InvalidNameAt { location, reason },
                other => other,
            })
    }

    fn bind(&mut self, location: Location) -> Result<TokenKind> {
        self.source.advance();
        let mut name = String::new();
        while let Some(c) = self
            .source
            .advance_if(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            name.push(c);
        }
        normalize_parameter_name(&name)
            .map(TokenKind::Bind)
            .map_err(|_| Error::InvalidNameAt {
                location,
                reason: "expected a parameter name after ':'",
            })
    }

    fn block_comment(&mut self, location: Location) -> Result<TokenKind> {
        self.source.advance();
        self.source.advance();
        let mut content = String::new();
        loop {
            match self.source.advance() {
                None => {
                    return Err(Error::MalformedLiteral {
                        location,
                        reason: "unterminated comment",
                    });
                }
                Some('*') if self.source.peek() == Some('/') => {
                    self.source.advance();
                    return Ok(TokenKind::BlockComment(content));
                }
                Some(c) => content.push(c),
            }
        }
    }
}

impl Iterator for Tokenizer {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let next = self.next_token().transpose();
        self.failed = matches!(next, Some(Err(_)));
        next
    }
}

/// Tokenize a whole fragment.
///
/// Guarantees:
/// - Either every token is returned or the first error is; never a prefix.
/// - Token count is bounded by the configured `max_tokens`.
pub fn tokenize(sql: &str) -> Result<Vec<Token>> {
    let tokens = Tokenizer::new(sql).collect::<Result<Vec<_>>>()?;
    trace!("Tokenized {} characters into {} tokens", sql.len(), tokens.len());
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn kinds(sql: &str) -> Vec<TokenKind> {
        tokenize(sql).unwrap().into_iter().map(|t| t.kind).collect()
    }

    fn ident(text: &str) -> TokenKind {
        TokenKind::Ident(Identifier::parse(text).unwrap())
    }

    #[test]
    fn basic_select_sequence() {
        assert_eq!(
            kinds("SELECT a, b FROM t"),
            vec![
                TokenKind::Keyword(Keyword::Select),
                ident("a"),
                TokenKind::Symbol(Symbol::Comma),
                ident("b"),
                TokenKind::Keyword(Keyword::From),
                ident("t"),
            ]
        );
    }

    #[test]
    fn comment_then_statement_on_next_line() {
        let toks = tokenize("-- comment\nselect 1").unwrap();
        assert_eq!(toks.len(), 3);
        assert_eq!(toks[0].kind, TokenKind::LineComment(" comment".into()));
        assert_eq!(toks[0].location, Location::new(1, 1));
        assert!(toks[1].is_keyword(Keyword::Select));
        assert_eq!(toks[1].location, Location::new(2, 1));
        assert_eq!(toks[2].kind, TokenKind::Number("1".into()));
        assert_eq!(toks[2].location, Location::new(2, 8));
    }

    #[test]
    fn identifier_characters() {
        assert_eq!(kinds("a_1#$x"), vec![ident("a_1#$x")]);
        assert_eq!(kinds("\"Mixed Case\""), vec![ident("\"Mixed Case\"")]);
        assert_eq!(kinds("\"a\"\"b\""), vec![ident("\"a\"\"b\"")]);
        assert_eq!(kinds("\"ABC\""), vec![ident("abc")]);
    }

    #[rstest]
    #[case("42", "42")]
    #[case("3.14", "3.14")]
    #[case(".5", ".5")]
    #[case("7.", "7.")]
    #[case("0012", "0012")]
    #[case("123456789012345678901234567890", "123456789012345678901234567890")]
    fn numbers_keep_their_text(#[case] sql: &str, #[case] expected: &str) {
        assert_eq!(kinds(sql), vec![TokenKind::Number(expected.into())]);
    }

    #[test]
    fn second_decimal_point_is_malformed() {
        let err = tokenize("select 1.2.3").unwrap_err();
        assert_eq!(
            err,
            Error::MalformedLiteral {
                location: Location::new(1, 11),
                reason: "second decimal point in numeric literal",
            }
        );
    }

    #[test]
    fn strings_unescape_doubled_quotes() {
        assert_eq!(kinds("'it''s'"), vec![TokenKind::String("it's".into())]);
        assert_eq!(kinds("''"), vec![TokenKind::String(String::new())]);
        assert_eq!(
            kinds("'two\nlines'"),
            vec![TokenKind::String("two\nlines".into())]
        );
    }

    #[test]
    fn unterminated_string_is_malformed() {
        let err = tokenize("select 'abc").unwrap_err();
        assert_eq!(
            err,
            Error::MalformedLiteral {
                location: Location::new(1, 8),
                reason: "unterminated string literal",
            }
        );
    }

    #[test]
    fn delimited_identifier_errors() {
        assert!(matches!(
            tokenize("select \"abc"),
            Err(Error::MalformedLiteral { .. })
        ));
        assert_eq!(
            tokenize("select \"a\nb\" from t").unwrap_err(),
            Error::InvalidNameAt {
                location: Location::new(1, 8),
                reason: "delimited identifier spans multiple lines",
            }
        );
        assert!(matches!(
            tokenize("\"\""),
            Err(Error::InvalidNameAt { .. })
        ));
    }

    #[test]
    fn parameter_references() {
        assert_eq!(
            kinds("x = :Customer_Id"),
            vec![
                ident("x"),
                TokenKind::Symbol(Symbol::Equal),
                TokenKind::Bind("CUSTOMER_ID".into()),
            ]
        );
        assert_eq!(
            kinds("x := 1"),
            vec![
                ident("x"),
                TokenKind::Symbol(Symbol::Assign),
                TokenKind::Number("1".into()),
            ]
        );
    }

    #[rstest]
    #[case(":")]
    #[case(": a")]
    #[case(":1a")]
    #[case(":_a")]
    fn bad_parameter_names(#[case] sql: &str) {
        assert!(matches!(
            tokenize(sql),
            Err(Error::InvalidNameAt { .. })
        ));
    }

    #[test]
    fn comments() {
        assert_eq!(
            kinds("a /* x\n * y */ - b"),
            vec![
                ident("a"),
                TokenKind::BlockComment(" x\n * y ".into()),
                TokenKind::Symbol(Symbol::Minus),
                ident("b"),
            ]
        );
        assert_eq!(
            kinds("a/b"),
            vec![ident("a"), TokenKind::Symbol(Symbol::Slash), ident("b")]
        );
        assert_eq!(kinds("/**/"), vec![TokenKind::BlockComment(String::new())]);
    }

    #[test]
    fn unterminated_comment_is_malformed() {
        assert_eq!(
            tokenize("select 1 /* open").unwrap_err(),
            Error::MalformedLiteral {
                location: Location::new(1, 10),
                reason: "unterminated comment",
            }
        );
    }

    #[rstest]
    #[case("<=", Symbol::LessEqual)]
    #[case(">=", Symbol::GreaterEqual)]
    #[case("<>", Symbol::NotEqual)]
    #[case("!=", Symbol::BangEqual)]
    #[case("=>", Symbol::Arrow)]
    #[case("||", Symbol::Concat)]
    #[case("<", Symbol::Less)]
    fn two_character_symbols_win(#[case] sql: &str, #[case] expected: Symbol) {
        assert_eq!(kinds(sql), vec![TokenKind::Symbol(expected)]);
    }

    #[test]
    fn dot_between_names_is_a_symbol() {
        assert_eq!(
            kinds("s.t"),
            vec![ident("s"), TokenKind::Symbol(Symbol::Dot), ident("t")]
        );
    }

    #[test]
    fn date_literals() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        assert_eq!(kinds("DATE '2024-01-31'"), vec![TokenKind::Date(date)]);
        assert_eq!(kinds("date\n'2024-01-31'"), vec![TokenKind::Date(date)]);
        assert_eq!(
            kinds("order by date"),
            vec![
                TokenKind::Keyword(Keyword::Order),
                TokenKind::Keyword(Keyword::By),
                ident("date"),
            ]
        );
        assert!(matches!(
            tokenize("date '2024-13-01'"),
            Err(Error::MalformedLiteral { .. })
        ));
    }

    #[rstest]
    #[case("select ?", '?', Location::new(1, 8))]
    #[case("a & b", '&', Location::new(1, 3))]
    #[case("x\n  @y", '@', Location::new(2, 3))]
    #[case("é", 'é', Location::new(1, 1))]
    fn invalid_characters(#[case] sql: &str, #[case] found: char, #[case] location: Location) {
        assert_eq!(
            tokenize(sql).unwrap_err(),
            Error::InvalidCharacter { location, found }
        );
    }

    #[test]
    fn token_ceiling() {
        let ok: Result<Vec<_>> = Tokenizer::new("a b c").with_limit(3).collect();
        assert_eq!(ok.unwrap().len(), 3);

        let err: Result<Vec<_>> = Tokenizer::new("a b c d").with_limit(3).collect();
        assert_eq!(err.unwrap_err(), Error::TooManyTokens { limit: 3 });
    }

    #[test]
    fn iterator_stops_after_error() {
        let mut tokenizer = Tokenizer::new("a & b");
        assert!(tokenizer.next().unwrap().is_ok());
        assert!(tokenizer.next().unwrap().is_err());
        assert!(tokenizer.next().is_none());
        assert_eq!(tokenizer.emitted(), 1);
    }

    #[test]
    fn empty_and_blank_input() {
        assert!(tokenize("").unwrap().is_empty());
        assert!(tokenize(" \n\t\n").unwrap().is_empty());
    }
}
