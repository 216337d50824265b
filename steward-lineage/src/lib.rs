//! # Steward Lineage
//!
//! Data lineage tracking: a directed multigraph over qualified object
//! names, fed by declared view dependencies and by a keyword scan of the
//! query log, with persistence and JSON export.

pub mod graph;
pub mod scan;
pub mod tracker;

pub use graph::{EdgeExport, EdgeInfo, EdgeKind, GraphExport, LineageGraph};
pub use scan::{classify_statement, scan_sources, scan_targets, QueryKind};
pub use tracker::{
    DownstreamLineage, FullLineage, LineageNeighbor, LineageRecord, LineageTracker, Relationship,
    UpstreamLineage,
};

/// Result type for lineage operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for lineage operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Warehouse error: {0}")]
    Warehouse(#[from] steward_warehouse::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Export error: {0}")]
    Export(#[from] std::io::Error),
}
