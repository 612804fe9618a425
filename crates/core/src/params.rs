//! Scalar parameter model
//!
//! Caller options arrive as loosely typed JSON values. Before anything goes
//! on the wire they are narrowed to [`ParamValue`]: text, a number, or a flat
//! list of those. Everything else is rejected with
//! [`QuickBaseError::InvalidParameterType`].

use std::fmt;

use qbase_domain::{QuickBaseError, Result};
use serde_json::{Number, Value};

/// Encodable parameter value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Text(String),
    Number(Number),
    /// Encoded as one repeated element (or query key) per entry
    List(Vec<ParamValue>),
}

impl ParamValue {
    /// Narrow a JSON value to an encodable parameter.
    ///
    /// # Errors
    ///
    /// Returns [`QuickBaseError::InvalidParameterType`] for objects, booleans,
    /// null and nested lists.
    pub fn from_json(name: &str, value: &Value) -> Result<Self> {
        match value {
            Value::String(text) => Ok(Self::Text(text.clone())),
            Value::Number(number) => Ok(Self::Number(number.clone())),
            Value::Array(items) => items
                .iter()
                .map(|item| match item {
                    Value::String(text) => Ok(Self::Text(text.clone())),
                    Value::Number(number) => Ok(Self::Number(number.clone())),
                    other => Err(invalid(name, other)),
                })
                .collect::<Result<Vec<_>>>()
                .map(Self::List),
            other => Err(invalid(name, other)),
        }
    }

    /// Entries to encode, one per element or query pair.
    pub fn entries(&self) -> Vec<String> {
        match self {
            Self::List(items) => items.iter().map(ToString::to_string).collect(),
            scalar => vec![scalar.to_string()],
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Number(number) => write!(f, "{number}"),
            Self::List(items) => {
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
        }
    }
}

/// JSON type name used in construction errors.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn invalid(name: &str, value: &Value) -> QuickBaseError {
    QuickBaseError::InvalidParameterType {
        param: name.to_string(),
        found: json_type_name(value).to_string(),
    }
}
