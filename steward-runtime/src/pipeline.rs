//! Governance pipeline orchestration
//!
//! Runs the three governance stages in a fixed order against one warehouse
//! connection: metadata extraction, then lineage extraction, then quality
//! validation. The connection is closed on both the success and the failure
//! path. A stage error marks the run FAILED, is logged, and propagates;
//! JSON export failures are warnings only.

use std::sync::Arc;

use serde::Serialize;
use steward_catalog::MetadataExtractor;
use steward_core::config::StewardConfig;
use steward_core::quality::ValidationReport;
use steward_core::run::{LineageSummary, PipelineRun};
use steward_core::CatalogSummary;
use steward_lineage::LineageTracker;
use steward_quality::QualityValidator;
use steward_warehouse::{PgWarehouse, Warehouse};
use tracing::{error, info, instrument, warn};

use crate::export;
use crate::Result;

/// Output of the lineage entry point
///
/// Carries the persisted record counts together with the populated tracker,
/// so callers can run upstream/downstream lookups after extraction.
pub struct LineageOutcome {
    /// Record counts persisted by the stage
    pub summary: LineageSummary,

    /// Tracker holding the populated lineage graph
    pub tracker: LineageTracker,
}

/// Orchestrates governance runs over one configured warehouse
///
/// The pipeline is stateless between runs; each entry point opens its own
/// connection unless one was injected at construction time.
pub struct GovernancePipeline {
    config: StewardConfig,
    warehouse: Option<Arc<dyn Warehouse>>,
}

impl GovernancePipeline {
    /// Create a pipeline that connects using the warehouse configuration
    pub fn new(config: StewardConfig) -> Self {
        Self {
            config,
            warehouse: None,
        }
    }

    /// Create a pipeline over an injected warehouse adapter
    pub fn with_warehouse(config: StewardConfig, warehouse: Arc<dyn Warehouse>) -> Self {
        Self {
            config,
            warehouse: Some(warehouse),
        }
    }

    /// The configuration this pipeline runs with
    pub fn config(&self) -> &StewardConfig {
        &self.config
    }

    async fn open(&self) -> Result<Arc<dyn Warehouse>> {
        match &self.warehouse {
            Some(warehouse) => Ok(Arc::clone(warehouse)),
            None => {
                let warehouse = PgWarehouse::connect(&self.config.warehouse).await?;
                Ok(Arc::new(warehouse))
            }
        }
    }

    /// Run the full pipeline: catalog, then lineage, then quality
    #[instrument(skip(self))]
    pub async fn run(&self) -> Result<PipelineRun> {
        let warehouse = self.open().await?;
        self.run_with(warehouse).await
    }

    /// Run the full pipeline against an explicit warehouse adapter
    ///
    /// The adapter is closed whether the stages succeed or fail.
    #[instrument(skip(self, warehouse))]
    pub async fn run_with(&self, warehouse: Arc<dyn Warehouse>) -> Result<PipelineRun> {
        let mut run = PipelineRun::started();
        info!("governance pipeline started");

        let outcome = self.run_stages(&warehouse, &mut run).await;
        warehouse.close().await;

        match outcome {
            Ok(()) => {
                run.complete();
                info!(
                    duration_seconds = run.duration_seconds.unwrap_or_default(),
                    "governance pipeline completed"
                );
                Ok(run)
            }
            Err(e) => {
                run.fail(e.to_string());
                error!(error = %e, "governance pipeline failed");
                Err(e)
            }
        }
    }

    async fn run_stages(
        &self,
        warehouse: &Arc<dyn Warehouse>,
        run: &mut PipelineRun,
    ) -> Result<()> {
        let summary = self.catalog_stage(warehouse).await?;
        run.metadata = Some(summary);

        let (summary, _tracker) = self.lineage_stage(warehouse).await?;
        run.lineage = Some(summary);

        let report = self.quality_stage(warehouse).await?;
        run.quality = Some(report);

        Ok(())
    }

    /// Extract and persist the metadata catalog only
    pub async fn run_catalog(&self) -> Result<CatalogSummary> {
        let warehouse = self.open().await?;
        let outcome = self.catalog_stage(&warehouse).await;
        warehouse.close().await;
        outcome
    }

    /// Extract and persist lineage only
    pub async fn run_lineage(&self) -> Result<LineageOutcome> {
        let warehouse = self.open().await?;
        let outcome = self.lineage_stage(&warehouse).await;
        warehouse.close().await;
        let (summary, tracker) = outcome?;
        Ok(LineageOutcome { summary, tracker })
    }

    /// Run and persist quality validations only
    pub async fn run_quality(&self) -> Result<ValidationReport> {
        let warehouse = self.open().await?;
        let outcome = self.quality_stage(&warehouse).await;
        warehouse.close().await;
        outcome
    }

    async fn catalog_stage(&self, warehouse: &Arc<dyn Warehouse>) -> Result<CatalogSummary> {
        info!("pipeline step 1 of 3: metadata extraction");
        let extractor = MetadataExtractor::new(Arc::clone(warehouse));

        // With no tracked databases configured, catalog the connection's own.
        let databases = if self.config.catalog.tracked_databases.is_empty() {
            vec![self.config.warehouse.database.clone()]
        } else {
            self.config.catalog.tracked_databases.clone()
        };

        let catalog = extractor.extract_full(&databases).await;
        extractor
            .save_catalog(&catalog, &self.config.output.catalog_table)
            .await?;

        if self.config.output.export_json {
            if let Err(e) = self.export_json("metadata_catalog", &catalog) {
                warn!(error = %e, "catalog export failed");
            }
        }

        Ok(catalog.summary())
    }

    async fn lineage_stage(
        &self,
        warehouse: &Arc<dyn Warehouse>,
    ) -> Result<(LineageSummary, LineageTracker)> {
        info!("pipeline step 2 of 3: lineage extraction");
        let mut tracker = LineageTracker::new(Arc::clone(warehouse), self.config.lineage.clone());

        let database = &self.config.warehouse.database;
        let schema = self.config.warehouse.schema.as_deref();
        let mut records = tracker.extract_table_dependencies(database, schema).await?;
        let dependency_records = records.len();

        let from_history = tracker
            .extract_query_history(
                self.config.lineage.query_history_days,
                self.config.lineage.query_history_limit,
            )
            .await?;
        let query_records = from_history.len();
        records.extend(from_history);

        tracker
            .save_lineage(&records, &self.config.output.lineage_table)
            .await?;

        if self.config.output.export_json {
            if let Err(e) = self.export_graph(&tracker) {
                warn!(error = %e, "lineage graph export failed");
            }
        }

        let summary = LineageSummary {
            dependency_records,
            query_records,
            total_records: records.len(),
        };
        Ok((summary, tracker))
    }

    async fn quality_stage(&self, warehouse: &Arc<dyn Warehouse>) -> Result<ValidationReport> {
        info!("pipeline step 3 of 3: quality validation");
        let validator = QualityValidator::new(Arc::clone(warehouse), self.config.quality.clone());

        let mut results = Vec::new();
        for target in &self.config.quality.tables {
            let validation = validator.run_validation(target).await;
            results.extend(validation.checks);
        }

        validator
            .save_results(&results, &self.config.output.results_table)
            .await?;

        let report = ValidationReport::from_results(&results);
        info!(
            total = report.total_checks,
            passed = report.passed_checks,
            failed = report.failed_checks,
            errors = report.error_checks,
            "quality validation completed"
        );

        if self.config.output.export_json {
            if let Err(e) = self.export_json("dq_report", &report) {
                warn!(error = %e, "quality report export failed");
            }
        }

        Ok(report)
    }

    fn export_json<T: Serialize>(&self, prefix: &str, value: &T) -> Result<()> {
        let path = export::timestamped_path(&self.config.output.export_dir, prefix)?;
        export::write_json(&path, value)
    }

    fn export_graph(&self, tracker: &LineageTracker) -> Result<()> {
        let path = export::timestamped_path(&self.config.output.export_dir, "lineage_graph")?;
        tracker.export_graph(&path)?;
        Ok(())
    }
}
