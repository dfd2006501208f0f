use crate::ident::is_canonical_ordinary;
use crate::*;
use std::{fmt, str::FromStr};

/// A single SQL name.
///
/// Equality is structural on the canonical database form and the delimited
/// flag; both are fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identifier {
    db_name: String,
    delimited: bool,
}

impl Identifier {
    /// Parse either an ordinary name (`abc`) or a delimited one (`"a""b"`).
    ///
    /// Leading and trailing whitespace is ignored. Delimited input has its
    /// doubled quotes unescaped; if the resulting content is already a valid
    /// upper case ordinary name it is stored as an ordinary name.
    pub fn parse(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        let Some(rest) = trimmed.strip_prefix('"') else {
            return Self::ordinary(trimmed);
        };
        let Some(inner) = rest.strip_suffix('"') else {
            return Err(Error::InvalidName {
                name: text.to_string(),
                reason: "missing closing quote",
            });
        };

        let mut content = String::with_capacity(inner.len());
        let mut chars = inner.chars().peekable();
        while let Some(c) = chars.next() {
            if c == '"' && chars.next_if_eq(&'"').is_none() {
                return Err(Error::InvalidName {
                    name: text.to_string(),
                    reason: "unescaped quote inside delimited name",
                });
            }
            content.push(c);
        }
        Self::delimited(content)
    }

    /// Build an ordinary name. The text is upper-cased and must match
    /// `letter (letter | digit | _ | # | $)*`.
    pub fn ordinary(text: &str) -> Result<Self> {
        if text.is_empty() {
            return Err(Error::InvalidName {
                name: String::new(),
                reason: "empty name",
            });
        }
        let db_name = text.to_ascii_uppercase();
        if !is_canonical_ordinary(&db_name) {
            return Err(Error::InvalidName {
                name: text.to_string(),
                reason: "expected a letter followed by letters, digits, '_', '#' or '$'",
            });
        }
        Ok(Self {
            db_name,
            delimited: false,
        })
    }

    /// Build a name from already unescaped delimited content.
    pub fn delimited(content: impl Into<String>) -> Result<Self> {
        let content = content.into();
        if content.is_empty() {
            return Err(Error::InvalidName {
                name: content,
                reason: "empty delimited name",
            });
        }
        if content.contains(['\n', '\r']) {
            return Err(Error::InvalidName {
                name: content,
                reason: "delimited name spans multiple lines",
            });
        }
        if content.chars().any(char::is_control) {
            return Err(Error::InvalidName {
                name: content,
                reason: "non-printable character in delimited name",
            });
        }
        let delimited = !is_canonical_ordinary(&content);
        Ok(Self {
            db_name: content,
            delimited,
        })
    }

    /// Canonical form as stored by the database.
    pub fn db_name(&self) -> &str {
        &self.db_name
    }

    pub fn is_delimited(&self) -> bool {
        self.delimited
    }

    /// SQL text for this name: lower case when ordinary, quoted otherwise.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.delimited {
            write!(f, "\"{}\"", self.db_name.replace('"', "\"\""))
        } else {
            f.write_str(&self.db_name.to_ascii_lowercase())
        }
    }
}

impl FromStr for Identifier {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
