//! # Steward Quality
//!
//! Data quality validation against warehouse tables:
//!
//! - Completeness, uniqueness, validity, consistency, and timeliness checks
//! - Config-driven validation runs over declared target tables
//! - Fail-soft execution: a broken check records an error result and the
//!   batch keeps going
//! - Persistence of check results to a governed warehouse table

pub mod validator;

pub use validator::{ConsistencyCheck, QualityValidator, ValidityRule};

/// Convenience alias for quality operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors from quality validation
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Warehouse error: {0}")]
    Warehouse(#[from] steward_warehouse::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Query returned no rows")]
    EmptyResult,

    #[error("No non-null values in column {column} of {table}")]
    NoTimestamps { table: String, column: String },
}
