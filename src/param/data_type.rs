use derive_more::Display;

/// Declared type of a parameter.
///
/// The set is closed and forms a small tree rooted at [`DataType::Any`]:
///
/// ```text
/// ANY
/// ├── TEXT
/// ├── NUMERIC
/// │   ├── INTEGER
/// │   ├── DECIMAL
/// │   └── FLOAT
/// ├── BOOLEAN
/// ├── DATE
/// ├── TIMESTAMP
/// └── BINARY
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
pub enum DataType {
    #[display("ANY")]
    Any,
    #[display("TEXT")]
    Text,
    #[display("NUMERIC")]
    Numeric,
    #[display("INTEGER")]
    Integer,
    #[display("DECIMAL")]
    Decimal,
    #[display("FLOAT")]
    Float,
    #[display("BOOLEAN")]
    Boolean,
    #[display("DATE")]
    Date,
    #[display("TIMESTAMP")]
    Timestamp,
    #[display("BINARY")]
    Binary,
}

impl DataType {
    /// Immediate supertype, `None` for [`DataType::Any`].
    pub const fn parent(self) -> Option<Self> {
        use DataType::*;
        match self {
            Any => None,
            Integer | Decimal | Float => Some(Numeric),
            Text | Numeric | Boolean | Date | Timestamp | Binary => Some(Any),
        }
    }

    /// `self` followed by each of its supertypes up to [`DataType::Any`].
    pub fn ancestors(self) -> impl Iterator<Item = Self> {
        std::iter::successors(Some(self), |t| t.parent())
    }

    /// Reflexive: every type is a supertype of itself.
    pub fn is_supertype_of(self, other: Self) -> bool {
        other.ancestors().any(|t| t == self)
    }

    /// The narrower of two related types, `None` when neither contains the other.
    pub fn more_specific(self, other: Self) -> Option<Self> {
        if self.is_supertype_of(other) {
            Some(other)
        } else if other.is_supertype_of(self) {
            Some(self)
        } else {
            None
        }
    }
}
