//! Trait abstraction for database values.
//!
//! `DatabaseValue` abstracts the value type returned by a backend so that row
//! decoding in the store does not match on `cozo::DataValue` directly.

use std::fmt::Debug;
use cozo::{DataValue, Num};

/// Trait for database values that can be extracted to Rust types.
pub trait DatabaseValue: Clone + Debug {
    /// Extract as String if the value is string-like.
    ///
    /// Returns `None` if the value is null or not a string.
    fn as_string(&self) -> Option<String>;

    /// Extract as i64 if the value is numeric.
    ///
    /// Floats are truncated.
    fn as_i64(&self) -> Option<i64>;

    /// True if the value is an explicit null.
    fn is_null(&self) -> bool;

    /// Get type name for error messages.
    fn type_name(&self) -> &'static str;

    /// Extract as i64 with a default value.
    fn as_i64_or(&self, default: i64) -> i64 {
        self.as_i64().unwrap_or(default)
    }

    /// Extract as String with a default value.
    fn as_string_or(&self, default: &str) -> String {
        self.as_string().unwrap_or_else(|| default.to_string())
    }
}

/// Implementation of `DatabaseValue` for `cozo::DataValue`.
impl DatabaseValue for DataValue {
    fn as_string(&self) -> Option<String> {
        match self {
            DataValue::Str(s) => Some(s.to_string()),
            _ => None,
        }
    }

    fn as_i64(&self) -> Option<i64> {
        match self {
            DataValue::Num(Num::Int(i)) => Some(*i),
            DataValue::Num(Num::Float(f)) => Some(*f as i64),
            _ => None,
        }
    }

    fn is_null(&self) -> bool {
        matches!(self, DataValue::Null)
    }

    fn type_name(&self) -> &'static str {
        match self {
            DataValue::Null => "null",
            DataValue::Bool(_) => "bool",
            DataValue::Num(_) => "number",
            DataValue::Str(_) => "string",
            DataValue::Bytes(_) => "bytes",
            DataValue::List(_) => "list",
            DataValue::Set(_) => "set",
            DataValue::Vec(_) => "vec",
            DataValue::Json(_) => "json",
            DataValue::Uuid(_) => "uuid",
            DataValue::Regex(_) => "regex",
            DataValue::Bot => "bot",
            DataValue::Validity(_) => "validity",
        }
    }
}

/// Build a string value.
pub fn str_value(s: &str) -> DataValue {
    DataValue::Str(s.into())
}

/// Build an integer value.
pub fn int_value(i: i64) -> DataValue {
    DataValue::Num(Num::Int(i))
}

/// Build a string value, or null for `None`.
pub fn opt_str_value(s: Option<&str>) -> DataValue {
    s.map(str_value).unwrap_or(DataValue::Null)
}
