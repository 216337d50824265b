//! Result rows
//!
//! Warehouses disagree on the casing of result column names, so rows
//! normalize every column to lowercase at construction. Callers read values
//! through typed getters and never see the driver's native row type.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::{Error, Result};

/// One result row as a column -> value mapping
#[derive(Debug, Clone, Default)]
pub struct Row {
    values: HashMap<String, Value>,
}

impl Row {
    /// Build a row from column/value pairs, lowercasing the column names
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, Value)>) -> Self {
        let values = pairs
            .into_iter()
            .map(|(k, v)| (k.to_lowercase(), v))
            .collect();
        Self { values }
    }

    /// Number of columns in the row
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the row has no columns
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Raw value lookup, case-insensitive on the column name
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.values.get(&column.to_lowercase())
    }

    /// Returns true if the row contains the column
    pub fn contains(&self, column: &str) -> bool {
        self.values.contains_key(&column.to_lowercase())
    }

    fn require(&self, column: &str) -> Result<&Value> {
        self.get(column)
            .ok_or_else(|| Error::MissingColumn(column.to_string()))
    }

    fn type_error(&self, column: &str, expected: &str) -> Error {
        Error::ColumnType {
            column: column.to_string(),
            expected: expected.to_string(),
        }
    }

    /// String value, or None when the column is null
    pub fn str_opt(&self, column: &str) -> Result<Option<String>> {
        match self.require(column)? {
            Value::Null => Ok(None),
            Value::String(s) => Ok(Some(s.clone())),
            other => Ok(Some(other.to_string())),
        }
    }

    /// Non-null string value
    pub fn str_req(&self, column: &str) -> Result<String> {
        self.str_opt(column)?
            .ok_or_else(|| self.type_error(column, "non-null string"))
    }

    /// Integer value, or None when the column is null
    pub fn i64_opt(&self, column: &str) -> Result<Option<i64>> {
        match self.require(column)? {
            Value::Null => Ok(None),
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().map(|f| f as i64))
                .map(Some)
                .ok_or_else(|| self.type_error(column, "integer")),
            Value::String(s) => s
                .parse::<i64>()
                .map(Some)
                .map_err(|_| self.type_error(column, "integer")),
            _ => Err(self.type_error(column, "integer")),
        }
    }

    /// Non-null integer value
    pub fn i64_req(&self, column: &str) -> Result<i64> {
        self.i64_opt(column)?
            .ok_or_else(|| self.type_error(column, "non-null integer"))
    }

    /// Float value, or None when the column is null
    pub fn f64_opt(&self, column: &str) -> Result<Option<f64>> {
        match self.require(column)? {
            Value::Null => Ok(None),
            Value::Number(n) => n
                .as_f64()
                .map(Some)
                .ok_or_else(|| self.type_error(column, "float")),
            Value::String(s) => s
                .parse::<f64>()
                .map(Some)
                .map_err(|_| self.type_error(column, "float")),
            _ => Err(self.type_error(column, "float")),
        }
    }

    /// Non-null float value
    pub fn f64_req(&self, column: &str) -> Result<f64> {
        self.f64_opt(column)?
            .ok_or_else(|| self.type_error(column, "non-null float"))
    }

    /// Boolean value, or None when the column is null
    pub fn bool_opt(&self, column: &str) -> Result<Option<bool>> {
        match self.require(column)? {
            Value::Null => Ok(None),
            Value::Bool(b) => Ok(Some(*b)),
            Value::String(s) => match s.to_lowercase().as_str() {
                "true" | "t" | "yes" | "y" => Ok(Some(true)),
                "false" | "f" | "no" | "n" => Ok(Some(false)),
                _ => Err(self.type_error(column, "boolean")),
            },
            _ => Err(self.type_error(column, "boolean")),
        }
    }

    /// Non-null boolean value
    pub fn bool_req(&self, column: &str) -> Result<bool> {
        self.bool_opt(column)?
            .ok_or_else(|| self.type_error(column, "non-null boolean"))
    }

    /// Timestamp value, or None when the column is null
    ///
    /// Accepts RFC 3339 strings, the form they take after JSON conversion.
    pub fn datetime_opt(&self, column: &str) -> Result<Option<DateTime<Utc>>> {
        match self.require(column)? {
            Value::Null => Ok(None),
            Value::String(s) => DateTime::parse_from_rfc3339(s)
                .map(|dt| Some(dt.with_timezone(&Utc)))
                .map_err(|_| self.type_error(column, "timestamp")),
            _ => Err(self.type_error(column, "timestamp")),
        }
    }

    /// Non-null timestamp value
    pub fn datetime_req(&self, column: &str) -> Result<DateTime<Utc>> {
        self.datetime_opt(column)?
            .ok_or_else(|| self.type_error(column, "non-null timestamp"))
    }
}
