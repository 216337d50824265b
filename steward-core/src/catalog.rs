//! Metadata catalog records
//!
//! Typed records for extracted warehouse metadata. Each record carries the
//! timestamp of its extraction; catalog history is append-only and
//! `extracted_at` is part of every persisted natural key.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of a persisted catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CatalogEntryKind {
    /// Database-level entry
    Database,

    /// Schema-level entry
    Schema,

    /// Table or view entry
    Table,

    /// Column entry
    Column,
}

impl CatalogEntryKind {
    /// String form used in the persisted `entry_kind` column
    pub fn as_str(&self) -> &'static str {
        match self {
            CatalogEntryKind::Database => "DATABASE",
            CatalogEntryKind::Schema => "SCHEMA",
            CatalogEntryKind::Table => "TABLE",
            CatalogEntryKind::Column => "COLUMN",
        }
    }
}

impl std::fmt::Display for CatalogEntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Metadata for a single database
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseRecord {
    /// Database name
    pub name: String,

    /// Owning role, if the warehouse reports one
    pub owner: Option<String>,

    /// Database comment
    pub comment: Option<String>,

    /// Data retention window in days, if the warehouse reports one
    pub retention_days: Option<i64>,

    /// Creation timestamp, if the warehouse reports one
    pub created_on: Option<DateTime<Utc>>,

    /// When this record was extracted
    pub extracted_at: DateTime<Utc>,
}

/// Metadata for a schema within a database
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaRecord {
    /// Database containing the schema
    pub database: String,

    /// Schema name
    pub name: String,

    /// Owning role
    pub owner: Option<String>,

    /// Schema comment
    pub comment: Option<String>,

    /// Creation timestamp, if the warehouse reports one
    pub created_on: Option<DateTime<Utc>>,

    /// When this record was extracted
    pub extracted_at: DateTime<Utc>,
}

/// Metadata for a table or view
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableRecord {
    /// Database containing the table
    pub database: String,

    /// Schema containing the table
    pub schema: String,

    /// Table name
    pub name: String,

    /// Object kind as reported by the warehouse (table, view, ...)
    pub table_kind: Option<String>,

    /// Approximate row count, if the warehouse tracks one
    pub row_count: Option<i64>,

    /// Approximate on-disk size in bytes
    pub size_bytes: Option<i64>,

    /// Owning role
    pub owner: Option<String>,

    /// Table comment
    pub comment: Option<String>,

    /// Clustering or partitioning key expression, if any
    pub clustering_key: Option<String>,

    /// Creation timestamp, if the warehouse reports one
    pub created_on: Option<DateTime<Utc>>,

    /// When this record was extracted
    pub extracted_at: DateTime<Utc>,
}

/// Metadata for a single column
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnRecord {
    /// Database containing the column's table
    pub database: String,

    /// Schema containing the column's table
    pub schema: String,

    /// Table containing the column
    pub table: String,

    /// Column name
    pub name: String,

    /// Declared data type
    pub data_type: String,

    /// Whether the column accepts nulls
    pub nullable: bool,

    /// Default expression, if any
    pub default_value: Option<String>,

    /// Whether the column is part of a primary key
    pub primary_key: bool,

    /// Whether the column carries a unique constraint
    pub unique_key: bool,

    /// Column comment
    pub comment: Option<String>,

    /// When this record was extracted
    pub extracted_at: DateTime<Utc>,
}

impl ColumnRecord {
    /// Entry name used in the persisted catalog (`table.column`)
    pub fn entry_name(&self) -> String {
        format!("{}.{}", self.table, self.name)
    }
}

/// Row-level statistics for a table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableStatistics {
    /// Database containing the table
    pub database: String,

    /// Schema containing the table
    pub schema: String,

    /// Table name
    pub table: String,

    /// Exact row count at extraction time
    pub row_count: i64,

    /// Count of distinct rows, when the warehouse can compute it
    pub distinct_rows: Option<i64>,

    /// When these statistics were extracted
    pub extracted_at: DateTime<Utc>,
}

/// Complete metadata catalog assembled from one extraction pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetadataCatalog {
    /// Database records, one per successfully extracted database
    pub databases: Vec<DatabaseRecord>,

    /// Schema records across all extracted databases
    pub schemas: Vec<SchemaRecord>,

    /// Table records across all extracted databases
    pub tables: Vec<TableRecord>,

    /// Column records across all extracted tables
    pub columns: Vec<ColumnRecord>,

    /// When the extraction pass started
    pub extracted_at: DateTime<Utc>,
}

impl MetadataCatalog {
    /// Create an empty catalog stamped with the current time
    pub fn new() -> Self {
        Self {
            databases: Vec::new(),
            schemas: Vec::new(),
            tables: Vec::new(),
            columns: Vec::new(),
            extracted_at: Utc::now(),
        }
    }

    /// Total number of entries across all sections
    pub fn entry_count(&self) -> usize {
        self.databases.len() + self.schemas.len() + self.tables.len() + self.columns.len()
    }

    /// Returns true if no entries were extracted
    pub fn is_empty(&self) -> bool {
        self.entry_count() == 0
    }

    /// Per-section counts for run summaries
    pub fn summary(&self) -> CatalogSummary {
        CatalogSummary {
            databases: self.databases.len(),
            schemas: self.schemas.len(),
            tables: self.tables.len(),
            columns: self.columns.len(),
        }
    }
}

impl Default for MetadataCatalog {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-section entry counts for a catalog
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSummary {
    /// Number of database entries
    pub databases: usize,

    /// Number of schema entries
    pub schemas: usize,

    /// Number of table entries
    pub tables: usize,

    /// Number of column entries
    pub columns: usize,
}

impl CatalogSummary {
    /// Total number of entries
    pub fn total(&self) -> usize {
        self.databases + self.schemas + self.tables + self.columns
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_column() -> ColumnRecord {
        ColumnRecord {
            database: "analytics".to_string(),
            schema: "public".to_string(),
            table: "orders".to_string(),
            name: "order_id".to_string(),
            data_type: "bigint".to_string(),
            nullable: false,
            default_value: None,
            primary_key: true,
            unique_key: false,
            comment: None,
            extracted_at: Utc::now(),
        }
    }

    #[test]
    fn test_entry_kind_strings() {
        assert_eq!(CatalogEntryKind::Database.as_str(), "DATABASE");
        assert_eq!(CatalogEntryKind::Schema.as_str(), "SCHEMA");
        assert_eq!(CatalogEntryKind::Table.as_str(), "TABLE");
        assert_eq!(CatalogEntryKind::Column.as_str(), "COLUMN");
    }

    #[test]
    fn test_entry_kind_serializes_screaming() {
        let json = serde_json::to_string(&CatalogEntryKind::Column).unwrap();
        assert_eq!(json, "\"COLUMN\"");
    }

    #[test]
    fn test_column_entry_name() {
        let column = sample_column();
        assert_eq!(column.entry_name(), "orders.order_id");
    }

    #[test]
    fn test_catalog_entry_count() {
        let mut catalog = MetadataCatalog::new();
        assert!(catalog.is_empty());

        catalog.columns.push(sample_column());
        catalog.tables.push(TableRecord {
            database: "analytics".to_string(),
            schema: "public".to_string(),
            name: "orders".to_string(),
            table_kind: Some("BASE TABLE".to_string()),
            row_count: Some(100),
            size_bytes: None,
            owner: None,
            comment: None,
            clustering_key: None,
            created_on: None,
            extracted_at: Utc::now(),
        });

        assert_eq!(catalog.entry_count(), 2);
        let summary = catalog.summary();
        assert_eq!(summary.tables, 1);
        assert_eq!(summary.columns, 1);
        assert_eq!(summary.total(), 2);
    }

    #[test]
    fn test_catalog_serialization_round_trip() {
        let mut catalog = MetadataCatalog::new();
        catalog.columns.push(sample_column());

        let json = serde_json::to_string(&catalog).unwrap();
        let back: MetadataCatalog = serde_json::from_str(&json).unwrap();

        assert_eq!(back.columns.len(), 1);
        assert_eq!(back.columns[0].name, "order_id");
        assert!(back.columns[0].primary_key);
    }
}
