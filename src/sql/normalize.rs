use crate::*;
use indexmap::IndexMap;

/// Re-emit a raw SQL fragment with canonical spacing and casing.
///
/// Parameter references are kept as `:name`; whitespace runs collapse to the
/// single spaces the token spacing rules ask for and keywords render
/// lower-case.
pub fn normalize(sql: &str) -> Result<String> {
    let tokens = tokenize(sql)?;
    let mut builder = CodeBuilder::new().with_placeholder(PlaceholderStyle::Named);
    write_tokens(&tokens, &IndexMap::new(), &mut builder)?;
    Ok(builder.build())
}

/// Replay `tokens` into `builder`.
///
/// Parameter references resolve against `bindings` (keyed by normalized
/// name); unbound references register as untyped.
pub(crate) fn write_tokens(
    tokens: &[Token],
    bindings: &IndexMap<String, Parameter>,
    builder: &mut CodeBuilder,
) -> Result {
    let mut previous: Option<&TokenKind> = None;
    let mut unary_minus = false;

    for token in tokens {
        let (before, _) = token.kind.spacing();
        if let Some(prev) = previous
            && !builder.is_at_line_start()
            && !unary_minus
            && prev.spacing().1.space_before(before)
        {
            builder.append(' ');
        }

        match &token.kind {
            TokenKind::Bind(name) => {
                let parameter = match bindings.get(name) {
                    Some(bound) => bound.clone(),
                    None => Parameter::typed(name, DataType::Any)?,
                };
                builder.append_parameter(&parameter)?;
            }
            TokenKind::BlockComment(_) => {
                builder.append_wrapped(&token.kind.to_string(), 0);
            }
            TokenKind::LineComment(_) => {
                builder.append_line_with(&token.kind);
            }
            kind => {
                builder.append(kind);
            }
        }

        unary_minus = token.kind.is_symbol(Symbol::Minus) && starts_operand(previous);
        previous = Some(&token.kind);
    }
    Ok(())
}

/// Whether a token following `previous` begins an operand, making a `-`
/// there a sign rather than subtraction.
fn starts_operand(previous: Option<&TokenKind>) -> bool {
    match previous {
        None => true,
        Some(TokenKind::Keyword(_)) => true,
        Some(TokenKind::Symbol(symbol)) => {
            !matches!(symbol, Symbol::RightParen | Symbol::RightBracket)
        }
        Some(kind) => kind.is_comment(),
    }
}
