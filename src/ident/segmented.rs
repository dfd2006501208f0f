use crate::*;
use itertools::Itertools as _;
use std::{fmt, str::FromStr};

/// A dot separated chain of identifiers, e.g. `schema.table.column`.
///
/// Invariant: never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SegmentedName {
    segments: Vec<Identifier>,
}

impl SegmentedName {
    pub fn new(segments: Vec<Identifier>) -> Result<Self> {
        if segments.is_empty() {
            return Err(Error::InvalidName {
                name: String::new(),
                reason: "segmented name needs at least one segment",
            });
        }
        Ok(Self { segments })
    }

    /// Split `text` on dots that are not inside a delimited segment and parse
    /// each piece as an [`Identifier`].
    pub fn parse(text: &str) -> Result<Self> {
        let mut segments = Vec::new();
        let mut start = 0;
        let mut quoted = false;
        for (i, c) in text.char_indices() {
            match c {
                // A doubled quote toggles twice and leaves the state unchanged.
                '"' => quoted = !quoted,
                '.' if !quoted => {
                    segments.push(Self::segment(text, &text[start..i])?);
                    start = i + 1;
                }
                _ => {}
            }
        }
        if text[start..].trim().is_empty() && !segments.is_empty() {
            return Err(Error::InvalidName {
                name: text.to_string(),
                reason: "trailing separator",
            });
        }
        segments.push(Self::segment(text, &text[start..])?);
        Self::new(segments)
    }

    fn segment(whole: &str, piece: &str) -> Result<Identifier> {
        if piece.trim().is_empty() {
            return Err(Error::InvalidName {
                name: whole.to_string(),
                reason: "empty segment",
            });
        }
        Identifier::parse(piece)
    }

    pub fn segments(&self) -> &[Identifier] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// The unqualified part, e.g. `column` in `table.column`.
    pub fn last(&self) -> &Identifier {
        &self.segments[self.segments.len() - 1]
    }

    /// Everything but the last segment, if there is more than one.
    pub fn parent(&self) -> Option<Self> {
        (self.segments.len() > 1).then(|| Self {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        })
    }

    /// A new name with `segment` appended.
    pub fn child(&self, segment: Identifier) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment);
        Self { segments }
    }

    /// True when `other`'s segments equal the trailing segments of `self`.
    ///
    /// Used to resolve a short reference (`table.col`) against a fully
    /// qualified name (`schema.table.col`).
    pub fn matches(&self, other: &SegmentedName) -> bool {
        if other.len() > self.len() {
            return false;
        }
        self.segments
            .iter()
            .rev()
            .zip(other.segments.iter().rev())
            .all(|(a, b)| a == b)
    }

    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl From<Identifier> for SegmentedName {
    fn from(value: Identifier) -> Self {
        Self {
            segments: vec![value],
        }
    }
}

impl fmt::Display for SegmentedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.iter().join("."))
    }
}

impl FromStr for SegmentedName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
