use crate::{DataType, Value};

/// A 1-based position in a source fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
#[display("line {line}, column {column}")]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl Location {
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("Invalid name {name:?}: {reason}")]
    InvalidName { name: String, reason: &'static str },

    #[error("Invalid name at {location}: {reason}")]
    InvalidNameAt {
        location: Location,
        reason: &'static str,
    },

    #[error("Parameter name conflict: {left} vs {right}")]
    NameConflict { left: String, right: String },

    #[error("Parameter {name} has conflicting types {left} and {right}")]
    TypeConflict {
        name: String,
        left: DataType,
        right: DataType,
    },

    #[error("Parameter {name} has conflicting values {left} and {right}")]
    ValueConflict {
        name: String,
        left: Value,
        right: Value,
    },

    #[error("Parameter {name} declared as {declared} cannot hold a {actual} value")]
    TypeMismatch {
        name: String,
        declared: DataType,
        actual: DataType,
    },

    #[error("Parameter {name} has no value to render")]
    MissingValue { name: String },

    #[error("Parameter {name} is not referenced by the fragment")]
    UnreferencedParameter { name: String },

    #[error("Malformed literal at {location}: {reason}")]
    MalformedLiteral {
        location: Location,
        reason: &'static str,
    },

    #[error("Invalid character {found:?} at {location}")]
    InvalidCharacter { location: Location, found: char },

    #[error("Token limit of {limit} exceeded")]
    TooManyTokens { limit: usize },

    #[error("Invalid parameter positions: {reason}")]
    InvalidPositions { reason: String },
}

pub type Result<T = ()> = std::result::Result<T, Error>;

impl Error {
    /// Source location of tokenizer errors.
    pub fn location(&self) -> Option<Location> {
        match self {
            Error::InvalidNameAt { location, .. }
            | Error::MalformedLiteral { location, .. }
            | Error::InvalidCharacter { location, .. } => Some(*location),
            _ => None,
        }
    }
}
