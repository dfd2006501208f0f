use crate::*;
use std::{fmt, sync::Arc};

/// A named, typed, optionally valued bind variable.
///
/// Parameters are immutable value objects behind an [`Arc`]; cloning is cheap
/// and the same instance is shared by every statement tree referencing it.
/// Operations that would change a parameter return a new one, or the existing
/// instance when nothing changes (see [`Parameter::ptr_eq`]).
#[derive(Clone)]
pub struct Parameter(Arc<Inner>);

#[derive(Debug, PartialEq)]
struct Inner {
    name: String,
    data_type: DataType,
    value: Option<Value>,
}

impl Parameter {
    /// Create a parameter, failing if `value` does not conform to `data_type`.
    pub fn new(name: &str, data_type: DataType, value: Option<Value>) -> Result<Self> {
        let name = normalize_parameter_name(name)?;
        Self::checked(name, data_type, value)
    }

    /// Shorthand for a parameter without a value.
    pub fn typed(name: &str, data_type: DataType) -> Result<Self> {
        Self::new(name, data_type, None)
    }

    /// Shorthand for a valued parameter typed by its value.
    pub fn valued(name: &str, value: impl Into<Value>) -> Result<Self> {
        let value = value.into();
        Self::new(name, value.data_type(), Some(value))
    }

    fn checked(name: String, data_type: DataType, value: Option<Value>) -> Result<Self> {
        if let Some(v) = &value
            && !v.conforms_to(data_type)
        {
            return Err(Error::TypeMismatch {
                name,
                declared: data_type,
                actual: v.data_type(),
            });
        }
        Ok(Self(Arc::new(Inner {
            name,
            data_type,
            value,
        })))
    }

    /// Normalized (upper case) name.
    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn data_type(&self) -> DataType {
        self.0.data_type
    }

    pub fn value(&self) -> Option<&Value> {
        self.0.value.as_ref()
    }

    /// True when both handles point at the same instance.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// A copy carrying `value`; returns `self` when the value is unchanged.
    pub fn with_value(&self, value: impl Into<Value>) -> Result<Self> {
        let value = value.into();
        if self.0.value.as_ref() == Some(&value) {
            return Ok(self.clone());
        }
        Self::checked(self.0.name.clone(), self.0.data_type, Some(value))
    }

    /// Merge two references to the same logical parameter.
    ///
    /// Returns one of the operands unchanged whenever the other contributes no
    /// new information, so sharing survives repeated merges. Fails when the
    /// names differ, the types are unrelated, or both carry different values.
    pub fn combine(&self, other: &Parameter) -> Result<Parameter> {
        if self == other {
            return Ok(self.clone());
        }
        if self.0.name != other.0.name {
            return Err(Error::NameConflict {
                left: self.0.name.clone(),
                right: other.0.name.clone(),
            });
        }

        let (left, right) = (&self.0, &other.0);
        if right.data_type.is_supertype_of(left.data_type)
            && (right.value.is_none() || right.value == left.value)
        {
            return Ok(self.clone());
        }
        if left.data_type.is_supertype_of(right.data_type)
            && (left.value.is_none() || left.value == right.value)
        {
            return Ok(other.clone());
        }

        let data_type =
            left.data_type
                .more_specific(right.data_type)
                .ok_or_else(|| Error::TypeConflict {
                    name: left.name.clone(),
                    left: left.data_type,
                    right: right.data_type,
                })?;
        let value = match (&left.value, &right.value) {
            (Some(l), Some(r)) if l != r => {
                return Err(Error::ValueConflict {
                    name: left.name.clone(),
                    left: l.clone(),
                    right: r.clone(),
                });
            }
            (Some(v), _) | (None, Some(v)) => Some(v.clone()),
            (None, None) => None,
        };
        Self::checked(left.name.clone(), data_type, value)
    }
}

impl PartialEq for Parameter {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.0 == other.0
    }
}

impl fmt::Debug for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parameter")
            .field("name", &self.0.name)
            .field("data_type", &self.0.data_type)
            .field("value", &self.0.value)
            .finish()
    }
}

/// Renders as a named reference, e.g. `:customer_id`.
impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ":{}", self.0.name.to_ascii_lowercase())
    }
}

/// Validate and case-fold a parameter name: a letter followed by letters,
/// digits or `_`.
pub fn normalize_parameter_name(name: &str) -> Result<String> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) => {
            first.is_ascii_alphabetic() && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        None => false,
    };
    if !valid {
        return Err(Error::InvalidName {
            name: name.to_string(),
            reason: "parameter names are a letter followed by letters, digits or '_'",
        });
    }
    Ok(name.to_ascii_uppercase())
}
