//! # Steward Runtime
//!
//! Pipeline orchestration for the Steward governance suite: runs the
//! catalog, lineage, and quality stages in order against one warehouse
//! connection, records a run summary, and writes optional JSON exports.

pub mod export;
pub mod pipeline;

pub use pipeline::{GovernancePipeline, LineageOutcome};

/// Result type for runtime operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for runtime operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Warehouse error: {0}")]
    Warehouse(#[from] steward_warehouse::Error),

    #[error("Catalog stage failed: {0}")]
    Catalog(#[from] steward_catalog::Error),

    #[error("Lineage stage failed: {0}")]
    Lineage(#[from] steward_lineage::Error),

    #[error("Quality stage failed: {0}")]
    Quality(#[from] steward_quality::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Export error: {0}")]
    Io(#[from] std::io::Error),
}
