use crate::*;
use chrono::{NaiveDate, NaiveDateTime};
use itertools::Itertools as _;
use rust_decimal::Decimal;
use std::fmt;

/// A parameter value drawn from the closed set of supported kinds.
///
/// `Display` renders the value as a SQL literal.
#[derive(Debug, Clone, PartialEq, derive_more::From, derive_more::IsVariant)]
pub enum Value {
    Text(String),
    Integer(i64),
    Decimal(Decimal),
    Float(f64),
    Boolean(bool),
    Date(NaiveDate),
    Timestamp(NaiveDateTime),
    Binary(Vec<u8>),
}

impl Value {
    /// Narrowest [`DataType`] holding this value.
    pub const fn data_type(&self) -> DataType {
        match self {
            Value::Text(_) => DataType::Text,
            Value::Integer(_) => DataType::Integer,
            Value::Decimal(_) => DataType::Decimal,
            Value::Float(_) => DataType::Float,
            Value::Boolean(_) => DataType::Boolean,
            Value::Date(_) => DataType::Date,
            Value::Timestamp(_) => DataType::Timestamp,
            Value::Binary(_) => DataType::Binary,
        }
    }

    /// True when this value may be stored under the declared type.
    pub fn conforms_to(&self, declared: DataType) -> bool {
        declared.is_supertype_of(self.data_type())
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Integer(i64::from(value))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => write!(f, "'{}'", s.replace('\'', "''")),
            Value::Integer(n) => write!(f, "{n}"),
            Value::Decimal(d) => write!(f, "{d}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Boolean(true) => f.write_str("TRUE"),
            Value::Boolean(false) => f.write_str("FALSE"),
            Value::Date(d) => write!(f, "DATE '{}'", d.format("%Y-%m-%d")),
            Value::Timestamp(t) => write!(f, "TIMESTAMP '{}'", t.format("%Y-%m-%d %H:%M:%S%.f")),
            Value::Binary(bytes) => write!(f, "X'{:02X}'", bytes.iter().format("")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::str::FromStr as _;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[rstest]
    #[case(Value::from("it's"), "'it''s'")]
    #[case(Value::from(42), "42")]
    #[case(Value::from(Decimal::from_str("1.50").unwrap()), "1.50")]
    #[case(Value::from(2.5), "2.5")]
    #[case(Value::from(true), "TRUE")]
    #[case(Value::from(date(2024, 1, 31)), "DATE '2024-01-31'")]
    #[case(Value::from(date(2024, 1, 31).and_hms_opt(8, 5, 0).unwrap()), "TIMESTAMP '2024-01-31 08:05:00'")]
    #[case(Value::from(vec![0x0a_u8, 0xff]), "X'0AFF'")]
    fn renders_sql_literal(#[case] value: Value, #[case] expected: &str) {
        assert_eq!(value.to_string(), expected);
    }

    #[rstest]
    #[case(Value::from(1), DataType::Integer, true)]
    #[case(Value::from(1), DataType::Numeric, true)]
    #[case(Value::from(1), DataType::Any, true)]
    #[case(Value::from(1), DataType::Decimal, false)]
    #[case(Value::from("x"), DataType::Numeric, false)]
    #[case(Value::from(1.0), DataType::Float, true)]
    fn conformance(#[case] value: Value, #[case] declared: DataType, #[case] expected: bool) {
        assert_eq!(value.conforms_to(declared), expected);
    }
}
