//! Bindable statement parameters
//!
//! Values are always bound as parameters rather than interpolated into SQL
//! text. This enum is the engine-neutral set of bindable values; each
//! adapter maps it onto its driver's placeholder binding.

use chrono::{DateTime, Utc};

/// A value bound into a parameterized statement
#[derive(Debug, Clone, PartialEq)]
pub enum Param {
    /// Text value
    Text(String),

    /// 64-bit integer value
    Int(i64),

    /// 64-bit float value
    Float(f64),

    /// Boolean value
    Bool(bool),

    /// UTC timestamp value
    Timestamp(DateTime<Utc>),

    /// Structured JSON value
    Json(serde_json::Value),

    /// SQL NULL
    Null,
}

impl From<String> for Param {
    fn from(value: String) -> Self {
        Param::Text(value)
    }
}

impl From<&str> for Param {
    fn from(value: &str) -> Self {
        Param::Text(value.to_string())
    }
}

impl From<i64> for Param {
    fn from(value: i64) -> Self {
        Param::Int(value)
    }
}

impl From<f64> for Param {
    fn from(value: f64) -> Self {
        Param::Float(value)
    }
}

impl From<bool> for Param {
    fn from(value: bool) -> Self {
        Param::Bool(value)
    }
}

impl From<DateTime<Utc>> for Param {
    fn from(value: DateTime<Utc>) -> Self {
        Param::Timestamp(value)
    }
}

impl From<serde_json::Value> for Param {
    fn from(value: serde_json::Value) -> Self {
        Param::Json(value)
    }
}

impl<T> From<Option<T>> for Param
where
    T: Into<Param>,
{
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => Param::Null,
        }
    }
}
