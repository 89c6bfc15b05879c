//! Conversions from Rust values to the JSON values predicates carry.
//!
//! Filters accept `impl IntoSqlValue` so call sites can pass ordinary Rust
//! types. Timestamps render as ISO 8601 strings, which PostgreSQL accepts as
//! timestamp literals.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;
use uuid::Uuid;

/// A value that can appear on the right-hand side of a predicate.
pub trait IntoSqlValue {
    fn into_sql_value(self) -> Value;
}

impl IntoSqlValue for Value {
    fn into_sql_value(self) -> Value {
        self
    }
}

impl IntoSqlValue for bool {
    fn into_sql_value(self) -> Value {
        Value::Bool(self)
    }
}

impl IntoSqlValue for i16 {
    fn into_sql_value(self) -> Value {
        Value::from(self)
    }
}

impl IntoSqlValue for i32 {
    fn into_sql_value(self) -> Value {
        Value::from(self)
    }
}

impl IntoSqlValue for i64 {
    fn into_sql_value(self) -> Value {
        Value::from(self)
    }
}

impl IntoSqlValue for u32 {
    fn into_sql_value(self) -> Value {
        Value::from(self)
    }
}

impl IntoSqlValue for f64 {
    fn into_sql_value(self) -> Value {
        // Non-finite floats have no JSON representation
        serde_json::Number::from_f64(self).map_or(Value::Null, Value::Number)
    }
}

impl IntoSqlValue for &str {
    fn into_sql_value(self) -> Value {
        Value::String(self.to_string())
    }
}

impl IntoSqlValue for String {
    fn into_sql_value(self) -> Value {
        Value::String(self)
    }
}

impl IntoSqlValue for Uuid {
    fn into_sql_value(self) -> Value {
        Value::String(self.to_string())
    }
}

impl IntoSqlValue for DateTime<Utc> {
    fn into_sql_value(self) -> Value {
        Value::String(self.to_rfc3339())
    }
}

impl IntoSqlValue for NaiveDateTime {
    fn into_sql_value(self) -> Value {
        Value::String(self.format("%Y-%m-%dT%H:%M:%S%.f").to_string())
    }
}

impl IntoSqlValue for NaiveDate {
    fn into_sql_value(self) -> Value {
        Value::String(self.to_string())
    }
}

impl<T: IntoSqlValue> IntoSqlValue for Option<T> {
    fn into_sql_value(self) -> Value {
        self.map_or(Value::Null, IntoSqlValue::into_sql_value)
    }
}
