//! Free-form SQL fragments carried through statement rendering.
//!
//! A fragment is either raw text that has been tokenized (its `:name`
//! references discovered) or text rendered elsewhere that already uses `?`
//! markers and comes with its parameter list. Both render into a
//! [`CodeBuilder`] and contribute to its parameter registry.
use crate::sql::write_tokens;
use crate::*;
use indexmap::{IndexMap, map::Entry};
use itertools::Itertools;

#[derive(Debug, Clone, PartialEq)]
enum Body {
    Tokens(Vec<Token>),
    Rendered {
        text: String,
        parameters: Vec<Parameter>,
    },
}

/// Immutable SQL fragment plus the typed information bound to its parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    body: Body,
    bindings: IndexMap<String, Parameter>,
}

impl Fragment {
    /// Tokenize `sql`, discovering its parameter references.
    pub fn parse(sql: &str) -> Result<Self> {
        let fragment = Self::from_tokens(tokenize(sql)?);
        trace!("Fragment references {:?}", fragment.parameter_names());
        Ok(fragment)
    }

    pub fn from_tokens(tokens: Vec<Token>) -> Self {
        Self {
            body: Body::Tokens(tokens),
            bindings: IndexMap::new(),
        }
    }

    /// Pre-rendered text using `?` markers, with one parameter per marker in
    /// order of appearance. A `?` inside a quoted literal, a delimited name or
    /// a comment is text, not a marker.
    pub fn rendered(text: impl Into<String>, parameters: Vec<Parameter>) -> Result<Self> {
        let text = text.into();
        let markers = marker_offsets(&text).len();
        if markers != parameters.len() {
            return Err(Error::InvalidPositions {
                reason: format!(
                    "{markers} markers but {} parameters",
                    parameters.len()
                ),
            });
        }
        Ok(Self {
            body: Body::Rendered { text, parameters },
            bindings: IndexMap::new(),
        })
    }

    /// Attach type and value information to the parameter of the same name.
    ///
    /// Binding a name twice merges both with [`Parameter::combine`]; a name
    /// the fragment never references is an error.
    pub fn bind(mut self, parameter: Parameter) -> Result<Self> {
        if !self.parameter_names().contains(&parameter.name()) {
            return Err(Error::UnreferencedParameter {
                name: parameter.name().to_string(),
            });
        }
        match self.bindings.entry(parameter.name().to_string()) {
            Entry::Occupied(mut entry) => {
                let merged = entry.get().combine(&parameter)?;
                entry.insert(merged);
            }
            Entry::Vacant(entry) => {
                entry.insert(parameter);
            }
        }
        Ok(self)
    }

    /// Tokens of a parsed fragment; `None` for pre-rendered text.
    pub fn tokens(&self) -> Option<&[Token]> {
        match &self.body {
            Body::Tokens(tokens) => Some(tokens),
            Body::Rendered { .. } => None,
        }
    }

    /// Distinct parameter names in order of first reference.
    pub fn parameter_names(&self) -> Vec<&str> {
        match &self.body {
            Body::Tokens(tokens) => tokens
                .iter()
                .filter_map(Token::bind_name)
                .unique()
                .collect(),
            Body::Rendered { parameters, .. } => {
                parameters.iter().map(Parameter::name).unique().collect()
            }
        }
    }

    /// Parameters the fragment contributes when rendered, merged across
    /// repeated references.
    pub fn parameters(&self) -> Result<Vec<Parameter>> {
        let mut merged: IndexMap<String, Parameter> = IndexMap::new();
        for parameter in self.occurrences()? {
            match merged.entry(parameter.name().to_string()) {
                Entry::Occupied(mut entry) => {
                    let next = entry.get().combine(&parameter)?;
                    entry.insert(next);
                }
                Entry::Vacant(entry) => {
                    entry.insert(parameter);
                }
            }
        }
        Ok(merged.into_values().collect())
    }

    /// One parameter per reference, in order of appearance.
    fn occurrences(&self) -> Result<Vec<Parameter>> {
        match &self.body {
            Body::Tokens(tokens) => tokens
                .iter()
                .filter_map(Token::bind_name)
                .map(|name| match self.bindings.get(name) {
                    Some(bound) => Ok(bound.clone()),
                    None => Parameter::typed(name, DataType::Any),
                })
                .collect(),
            Body::Rendered { parameters, .. } => parameters
                .iter()
                .map(|parameter| match self.bindings.get(parameter.name()) {
                    Some(bound) => parameter.combine(bound),
                    None => Ok(parameter.clone()),
                })
                .collect(),
        }
    }

    /// Append the fragment at the builder's current position.
    ///
    /// Multi-line fragments are re-indented to the current frame; the
    /// indentation stack is left as it was found. On error the builder is
    /// left unchanged.
    pub fn render(&self, builder: &mut CodeBuilder) -> Result {
        builder.atomically(|builder| self.render_into(builder))
    }

    fn render_into(&self, builder: &mut CodeBuilder) -> Result {
        match &self.body {
            Body::Tokens(tokens) => write_tokens(tokens, &self.bindings, builder),
            Body::Rendered { text, .. } => {
                let occurrences = self.occurrences()?;
                let base = builder.occurrence_count();
                let mut grouped: IndexMap<&str, ParameterWithPositions> = IndexMap::new();
                for (i, parameter) in occurrences.iter().enumerate() {
                    match grouped.entry(parameter.name()) {
                        Entry::Occupied(mut entry) => {
                            let entry = entry.get_mut();
                            entry.parameter = entry.parameter.combine(parameter)?;
                            entry.positions.push(i + 1);
                        }
                        Entry::Vacant(entry) => {
                            entry.insert(ParameterWithPositions::new(parameter.clone(), vec![i + 1]));
                        }
                    }
                }
                let list = grouped.into_values().collect_vec();
                builder.add_parameters_with_positions(&list)?;
                let text = substitute_markers(text, &occurrences, base, builder.placeholder());
                builder.append_wrapped(&text, 0);
                Ok(())
            }
        }
    }

    /// Render into a fresh builder.
    pub fn to_statement(&self, placeholder: PlaceholderStyle) -> Result<Statement> {
        let mut builder = CodeBuilder::new().with_placeholder(placeholder);
        self.render(&mut builder)?;
        Ok(builder.finish())
    }
}

/// Byte offsets of the `?` markers in pre-rendered text, skipping `'…'`
/// literals, `"…"` names and comments the same way the tokenizer delimits
/// them. Doubled quotes close and reopen the span, which leaves it unchanged.
fn marker_offsets(text: &str) -> Vec<usize> {
    let mut offsets = Vec::new();
    let mut chars = text.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        match c {
            '?' => offsets.push(i),
            '\'' | '"' => {
                for (_, d) in chars.by_ref() {
                    if d == c {
                        break;
                    }
                }
            }
            '-' if chars.next_if(|&(_, d)| d == '-').is_some() => {
                for (_, d) in chars.by_ref() {
                    if d == '\n' {
                        break;
                    }
                }
            }
            '/' if chars.next_if(|&(_, d)| d == '*').is_some() => {
                let mut star = false;
                for (_, d) in chars.by_ref() {
                    if star && d == '/' {
                        break;
                    }
                    star = d == '*';
                }
            }
            _ => {}
        }
    }
    offsets
}

/// Rewrite `?` markers for the builder's placeholder style. `base` is the
/// number of occurrences registered before this fragment.
fn substitute_markers(
    text: &str,
    occurrences: &[Parameter],
    base: usize,
    placeholder: PlaceholderStyle,
) -> String {
    if placeholder == PlaceholderStyle::Question {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len());
    let mut copied = 0;
    for ((i, parameter), offset) in occurrences.iter().enumerate().zip(marker_offsets(text)) {
        out.push_str(&text[copied..offset]);
        match placeholder {
            PlaceholderStyle::Numbered => out.push_str(&format!("${}", base + i + 1)),
            _ => out.push_str(&parameter.to_string()),
        }
        copied = offset + '?'.len_utf8();
    }
    out.push_str(&text[copied..]);
    out
}
