//! Warehouse object naming
//!
//! Tables and views are addressed by fully qualified three-part names
//! (`database.schema.name`). This module provides the canonical name type
//! used as the natural key for catalog entries, lineage nodes, and quality
//! results.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Fully qualified name of a warehouse object
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectName {
    /// Database containing the object
    pub database: String,

    /// Schema within the database
    pub schema: String,

    /// Object name (table or view)
    pub name: String,
}

impl ObjectName {
    /// Create an object name from its three parts
    pub fn new(
        database: impl Into<String>,
        schema: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            database: database.into(),
            schema: schema.into(),
            name: name.into(),
        }
    }

    /// Parse a dotted `database.schema.name` string
    pub fn parse(qualified: &str) -> Result<Self> {
        let parts: Vec<&str> = qualified.split('.').collect();
        if parts.len() != 3 || parts.iter().any(|p| p.is_empty()) {
            return Err(Error::InvalidObjectName(qualified.to_string()));
        }
        Ok(Self::new(parts[0], parts[1], parts[2]))
    }

    /// Render the canonical dotted form
    pub fn qualified(&self) -> String {
        format!("{}.{}.{}", self.database, self.schema, self.name)
    }
}

impl std::fmt::Display for ObjectName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.database, self.schema, self.name)
    }
}

impl std::str::FromStr for ObjectName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
