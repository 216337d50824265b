//! # Steward Catalog
//!
//! Metadata catalog extraction: walks warehouse introspection views into
//! typed records and persists the assembled catalog back to a governed
//! output table.

pub mod extractor;

pub use extractor::MetadataExtractor;

/// Result type for catalog operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for catalog operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Warehouse error: {0}")]
    Warehouse(#[from] steward_warehouse::Error),

    #[error("Database not found: {0}")]
    DatabaseNotFound(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
