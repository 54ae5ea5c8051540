use serde_json::Value;
use thiserror::Error;

/// Errors produced by type conversions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("expected a number, got {found}")]
    NotANumber { found: &'static str },

    #[error("expected an object, got {found}")]
    NotAnObject { found: &'static str },

    #[error("amount out of range: {0}")]
    OutOfRange(String),
}

/// Human-readable JSON type name, used in error messages.
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
