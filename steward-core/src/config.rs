//! Configuration loading and validation
//!
//! Configuration is read from a YAML file, then overridden by environment
//! variables, then validated. A missing config file is a warning, not an
//! error: defaults plus environment variables are enough to run against a
//! single warehouse.

use std::env;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{Error, Result};

/// Top-level configuration for the governance suite
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StewardConfig {
    /// Warehouse connection settings
    pub warehouse: WarehouseConfig,

    /// Catalog extraction settings
    pub catalog: CatalogConfig,

    /// Lineage extraction settings
    pub lineage: LineageConfig,

    /// Quality validation settings
    pub quality: QualityConfig,

    /// Output table names and export settings
    pub output: OutputConfig,
}

impl StewardConfig {
    /// Load configuration from a YAML file, apply environment overrides,
    /// and validate the result
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(path)
                .map_err(|e| Error::Config(format!("failed to read {}: {}", path.display(), e)))?;
            serde_yaml::from_str(&contents)
                .map_err(|e| Error::Config(format!("failed to parse {}: {}", path.display(), e)))?
        } else {
            warn!(path = %path.display(), "config file not found, using defaults");
            Self::default()
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Override warehouse credentials from the environment
    ///
    /// Environment variables take precedence over file values:
    /// `STEWARD_ACCOUNT`, `STEWARD_USER`, `STEWARD_PASSWORD`,
    /// `STEWARD_WAREHOUSE`, `STEWARD_DATABASE`, `STEWARD_SCHEMA`,
    /// `STEWARD_ROLE`.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(v) = env::var("STEWARD_ACCOUNT") {
            self.warehouse.account = v;
        }
        if let Ok(v) = env::var("STEWARD_USER") {
            self.warehouse.user = v;
        }
        if let Ok(v) = env::var("STEWARD_PASSWORD") {
            self.warehouse.password = v;
        }
        if let Ok(v) = env::var("STEWARD_WAREHOUSE") {
            self.warehouse.warehouse = Some(v);
        }
        if let Ok(v) = env::var("STEWARD_DATABASE") {
            self.warehouse.database = v;
        }
        if let Ok(v) = env::var("STEWARD_SCHEMA") {
            self.warehouse.schema = Some(v);
        }
        if let Ok(v) = env::var("STEWARD_ROLE") {
            self.warehouse.role = Some(v);
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.warehouse.account.is_empty() {
            return Err(Error::Config("warehouse.account cannot be empty".into()));
        }
        if self.warehouse.user.is_empty() {
            return Err(Error::Config("warehouse.user cannot be empty".into()));
        }
        if self.warehouse.database.is_empty() {
            return Err(Error::Config("warehouse.database cannot be empty".into()));
        }
        if self.warehouse.pool.max_connections == 0 {
            return Err(Error::Config(
                "warehouse.pool.max_connections must be at least 1".into(),
            ));
        }
        let threshold = self.quality.rules.completeness.threshold;
        if !(0.0..=1.0).contains(&threshold) {
            return Err(Error::Config(format!(
                "quality.rules.completeness.threshold must be within [0, 1], got {}",
                threshold
            )));
        }
        if self.lineage.query_history_days <= 0 {
            return Err(Error::Config(
                "lineage.query_history_days must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// Warehouse connection settings
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WarehouseConfig {
    /// Warehouse account or host name
    pub account: String,

    /// Port the warehouse listens on
    pub port: u16,

    /// User to authenticate as
    pub user: String,

    /// Password for the user
    pub password: String,

    /// Compute warehouse to use, for engines that have one
    pub warehouse: Option<String>,

    /// Database to connect to
    pub database: String,

    /// Default schema for the session
    pub schema: Option<String>,

    /// Role to assume for the session
    pub role: Option<String>,

    /// Connection pool settings
    pub pool: PoolSettings,
}

impl WarehouseConfig {
    /// Build the driver connection URL
    pub fn connection_url(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.user, self.password, self.account, self.port, self.database
        )
    }
}

impl Default for WarehouseConfig {
    fn default() -> Self {
        Self {
            account: "localhost".to_string(),
            port: 5432,
            user: String::new(),
            password: String::new(),
            warehouse: None,
            database: String::new(),
            schema: None,
            role: None,
            pool: PoolSettings::default(),
        }
    }
}

// Manual Debug keeps the password out of logs.
impl std::fmt::Debug for WarehouseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WarehouseConfig")
            .field("account", &self.account)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("warehouse", &self.warehouse)
            .field("database", &self.database)
            .field("schema", &self.schema)
            .field("role", &self.role)
            .field("pool", &self.pool)
            .finish()
    }
}

/// Connection pool settings
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolSettings {
    /// Maximum number of pooled connections
    pub max_connections: u32,

    /// Minimum number of idle connections to keep open
    pub min_connections: u32,

    /// Seconds to wait when acquiring a connection
    pub acquire_timeout_secs: u64,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: 5,
            min_connections: 1,
            acquire_timeout_secs: 30,
        }
    }
}

/// Catalog extraction settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Databases to include in catalog extraction
    pub tracked_databases: Vec<String>,
}

/// Lineage extraction settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LineageConfig {
    /// Days of query history to scan
    pub query_history_days: i64,

    /// Maximum number of history rows to scan per extraction
    pub query_history_limit: i64,

    /// Relation holding the warehouse's statement log
    pub query_history_source: String,

    /// Relation holding declared object dependencies
    pub dependency_source: String,
}

impl Default for LineageConfig {
    fn default() -> Self {
        Self {
            query_history_days: 7,
            query_history_limit: 10_000,
            query_history_source: "governance.query_history".to_string(),
            dependency_source: "information_schema.view_table_usage".to_string(),
        }
    }
}

/// Quality validation settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityConfig {
    /// Which check families run and their parameters
    pub rules: QualityRules,

    /// Tables to validate
    pub tables: Vec<TableTarget>,
}

/// Per-family check switches
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityRules {
    /// Completeness check settings
    pub completeness: CompletenessRule,

    /// Uniqueness check settings
    pub uniqueness: UniquenessRule,

    /// Timeliness check settings
    pub timeliness: TimelinessRule,
}

/// Completeness check settings
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct CompletenessRule {
    /// Whether the completeness check runs (on by default)
    pub enabled: bool,

    /// Minimum acceptable completeness per column
    pub threshold: f64,
}

impl Default for CompletenessRule {
    fn default() -> Self {
        Self {
            enabled: true,
            threshold: 0.95,
        }
    }
}

/// Uniqueness check settings
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UniquenessRule {
    /// Whether the uniqueness check runs (off by default)
    pub enabled: bool,
}

/// Timeliness check settings
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelinessRule {
    /// Whether the timeliness check runs (off by default)
    pub enabled: bool,

    /// Maximum acceptable data age in hours
    pub max_age_hours: i64,
}

impl Default for TimelinessRule {
    fn default() -> Self {
        Self {
            enabled: false,
            max_age_hours: 24,
        }
    }
}

/// One table selected for quality validation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableTarget {
    /// Database containing the table
    pub database: String,

    /// Schema containing the table
    pub schema: String,

    /// Table name
    pub table: String,

    /// Key column for the uniqueness check, defaults to `id`
    #[serde(default)]
    pub primary_key: Option<String>,

    /// Timestamp column for the timeliness check, defaults to `created_at`
    #[serde(default)]
    pub timestamp_column: Option<String>,
}

/// Output table names and export settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Destination table for catalog snapshots
    pub catalog_table: String,

    /// Destination table for lineage records
    pub lineage_table: String,

    /// Destination table for validation results
    pub results_table: String,

    /// Whether to also write JSON exports to disk
    pub export_json: bool,

    /// Directory receiving JSON exports
    pub export_dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            catalog_table: "metadata_catalog".to_string(),
            lineage_table: "lineage_graph".to_string(),
            results_table: "dq_validation_results".to_string(),
            export_json: false,
            export_dir: PathBuf::from("output"),
        }
    }
}
