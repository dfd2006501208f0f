//! SQL tokenization and fragment handling.
//!
//! Raw SQL text handed in by callers is scanned into tokens so parameter
//! references (`:name`) can be found and the text re-emitted in a canonical
//! shape through the [`CodeBuilder`](crate::CodeBuilder).
//!
//! Modules:
//! - `keyword`    : Reserved words; anything else is an identifier.
//! - `symbol`     : Operators and punctuation, longest match first.
//! - `token_kind` : Token classification and the spacing policy used when
//!   re-emitting.
//! - `token`      : Token paired with its line/column.
//! - `tokenizer`  : Line-buffered scanner; fails on the first malformed token.
//! - `normalize`  : Replays tokens with collapsed whitespace.
//! - `fragment`   : Parsed or pre-rendered SQL plus bound parameters.
//!
//! Example:
//! ```rust
//! use sqlfrag::*;
//!
//! let tokens = tokenize("SELECT a, b FROM my_table WHERE id = :id")?;
//! assert!(tokens.iter().any(|t| t.is_keyword(Keyword::Select)));
//! assert!(tokens.iter().any(|t| t.bind_name() == Some("ID")));
//! assert_eq!(
//!     normalize("SELECT a,b FROM my_table")?,
//!     "select a, b from my_table"
//! );
//! # Ok::<(), sqlfrag::Error>(())
//! ```
//!
//! NOTE: This is **not** a SQL parser. Any sequence of valid tokens is
//! accepted; grammar is left to the database.

pub mod fragment;
pub mod keyword;
pub mod normalize;
mod source;
pub mod symbol;
pub mod token;
pub mod token_kind;
pub mod tokenizer;

pub use fragment::Fragment;
pub use keyword::Keyword;
pub use normalize::normalize;
pub(crate) use normalize::write_tokens;
pub(crate) use source::Source;
pub use symbol::Symbol;
pub use token::Token;
pub use token_kind::{Spacing, TokenKind};
pub use tokenizer::{Tokenizer, tokenize};

/// Convenience prelude re-exporting the most commonly used items.
///
/// Import with:
/// `use crate::sql::prelude::*;`
pub mod prelude {
    pub use super::{Fragment, Keyword, Symbol, Token, TokenKind, normalize, tokenize};
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::common_init;

    #[test]
    fn tokenize_and_access() {
        common_init();
        let tokens = tokenize("SELECT col FROM tbl").unwrap();
        assert!(tokens.iter().any(|t| t.is_keyword(Keyword::Select)));
        assert!(tokens.iter().any(|t| t.is_keyword(Keyword::From)));
        assert!(tokens.iter().any(|t| t.ident().map(|i| i.db_name()) == Some("COL")));
        assert!(tokens.iter().any(|t| t.ident().map(|i| i.db_name()) == Some("TBL")));
    }

    #[test]
    fn prelude_import_works() {
        use super::prelude::*;
        let toks = tokenize("FROM X").unwrap();
        assert!(toks.iter().any(|t| t.is_keyword(Keyword::From)));
        assert_eq!(normalize("FROM X").unwrap(), "from x");
    }
}
