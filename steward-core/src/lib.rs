//! # Steward Core
//!
//! Shared types for the Steward data-governance suite: warehouse object
//! names, catalog records, quality check results, pipeline run records,
//! and configuration.

pub mod catalog;
pub mod config;
pub mod object;
pub mod quality;
pub mod run;

// Re-export commonly used types
pub use catalog::{
    CatalogEntryKind, CatalogSummary, ColumnRecord, DatabaseRecord, MetadataCatalog, SchemaRecord,
    TableRecord, TableStatistics,
};
pub use config::{
    CatalogConfig, LineageConfig, OutputConfig, PoolSettings, QualityConfig, QualityRules,
    StewardConfig, TableTarget, WarehouseConfig,
};
pub use object::ObjectName;
pub use quality::{
    CheckError, CheckKind, CheckResult, CheckStatus, CheckSummaryLine, ColumnCompleteness,
    ColumnUniqueness, CompletenessResult, ConsistencyOutcome, ConsistencyResult, RuleValidity,
    TableValidation, TimelinessResult, UniquenessResult, ValidationReport, ValidityResult,
};
pub use run::{LineageSummary, PipelineRun, RunStatus};

/// Result type for core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid object name: {0} (expected database.schema.name)")]
    InvalidObjectName(String),

    #[error("Configuration error: {0}")]
    Config(String),
}
