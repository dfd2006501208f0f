//! SQL name model.
//!
//! Two shapes of name are supported:
//! - [`Identifier`]: a single name, either *ordinary* (case-folded to upper case,
//!   rendered lower case) or *delimited* (double quoted, case preserved).
//! - [`SegmentedName`]: a dot separated chain such as `schema.table.column`.
//!
//! A delimited spelling whose content is already a valid ordinary name is
//! folded back into an ordinary name, so `"ABC"` and `abc` compare equal while
//! `"abc"` stays distinct.

mod identifier;
mod segmented;

pub use identifier::Identifier;
pub use segmented::SegmentedName;

/// True for characters allowed after the first one in an ordinary name.
pub(crate) fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '#' | '$')
}

/// True when `text` is already in canonical ordinary form: an upper case
/// letter followed by upper case letters, digits, `_`, `#` or `$`.
pub(crate) fn is_canonical_ordinary(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) if first.is_ascii_uppercase() => {
            chars.all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || matches!(c, '_' | '#' | '$'))
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("A", true)]
    #[case("ABC_1#$", true)]
    #[case("abc", false)]
    #[case("1ABC", false)]
    #[case("_A", false)]
    #[case("A B", false)]
    #[case("", false)]
    fn canonical_ordinary(#[case] text: &str, #[case] expected: bool) {
        assert_eq!(is_canonical_ordinary(text), expected);
    }
}
