use crate::*;
use std::{collections::HashMap, fmt, sync::Arc};

/// Renders values of a declared type as SQL literal text.
///
/// Mapping application values to wire types belongs to the execution layer;
/// this seam only covers the text side used when a value is inlined.
pub trait TypeAdapter: Send + Sync {
    fn literal(&self, data_type: DataType, value: &Value) -> String;
}

/// Standard SQL literal syntax, see the `Display` impl of [`Value`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SqlLiterals;

impl TypeAdapter for SqlLiterals {
    fn literal(&self, _data_type: DataType, value: &Value) -> String {
        value.to_string()
    }
}

static DEFAULT_ADAPTER: SqlLiterals = SqlLiterals;

/// Adapters keyed by declared type.
///
/// Lookup walks from the declared type up its supertypes and falls back to
/// [`SqlLiterals`] when nothing is registered along the way.
#[derive(Clone, Default)]
pub struct TypeAdapters {
    adapters: HashMap<DataType, Arc<dyn TypeAdapter>>,
}

impl TypeAdapters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(mut self, data_type: DataType, adapter: impl TypeAdapter + 'static) -> Self {
        self.adapters.insert(data_type, Arc::new(adapter));
        self
    }

    pub fn adapter_for(&self, data_type: DataType) -> &dyn TypeAdapter {
        data_type
            .ancestors()
            .find_map(|t| self.adapters.get(&t))
            .map(|adapter| &**adapter)
            .unwrap_or(&DEFAULT_ADAPTER)
    }

    /// Literal text for a valued parameter.
    pub fn literal(&self, parameter: &Parameter) -> Result<String> {
        let value = parameter.value().ok_or_else(|| Error::MissingValue {
            name: parameter.name().to_string(),
        })?;
        Ok(self
            .adapter_for(parameter.data_type())
            .literal(parameter.data_type(), value))
    }
}

impl fmt::Debug for TypeAdapters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut registered: Vec<_> = self.adapters.keys().collect();
        registered.sort();
        f.debug_struct("TypeAdapters")
            .field("registered", &registered)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BitBooleans;

    impl TypeAdapter for BitBooleans {
        fn literal(&self, _data_type: DataType, value: &Value) -> String {
            match value {
                Value::Boolean(true) => "1".into(),
                Value::Boolean(false) => "0".into(),
                other => other.to_string(),
            }
        }
    }

    struct Tagged;

    impl TypeAdapter for Tagged {
        fn literal(&self, data_type: DataType, value: &Value) -> String {
            format!("CAST({value} AS {data_type})")
        }
    }

    #[test]
    fn falls_back_to_sql_literals() {
        let adapters = TypeAdapters::new();
        let p = Parameter::valued("name", "O'Brien").unwrap();
        assert_eq!(adapters.literal(&p).unwrap(), "'O''Brien'");
    }

    #[test]
    fn uses_registered_adapter() {
        let adapters = TypeAdapters::new().register(DataType::Boolean, BitBooleans);
        let p = Parameter::valued("flag", true).unwrap();
        assert_eq!(adapters.literal(&p).unwrap(), "1");
    }

    #[test]
    fn walks_up_the_supertype_chain() {
        let adapters = TypeAdapters::new().register(DataType::Numeric, Tagged);
        let p = Parameter::valued("n", 7).unwrap();
        assert_eq!(adapters.literal(&p).unwrap(), "CAST(7 AS INTEGER)");
        let text = Parameter::valued("t", "x").unwrap();
        assert_eq!(adapters.literal(&text).unwrap(), "'x'");
    }

    #[test]
    fn missing_value_is_an_error() {
        let adapters = TypeAdapters::new();
        let p = Parameter::typed("n", DataType::Integer).unwrap();
        assert_eq!(
            adapters.literal(&p),
            Err(Error::MissingValue { name: "N".into() })
        );
    }
}
