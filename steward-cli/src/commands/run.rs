//! Run command

use anyhow::Result;
use steward_core::StewardConfig;
use steward_runtime::GovernancePipeline;

/// Run the full governance pipeline and print the run summary.
pub async fn execute(config: StewardConfig) -> Result<()> {
    let pipeline = GovernancePipeline::new(config);
    let run = pipeline.run().await?;

    println!("Pipeline: {}", run.status);
    if let Some(duration) = run.duration_seconds {
        println!("Duration: {:.2}s", duration);
    }
    println!();

    if let Some(metadata) = &run.metadata {
        println!(
            "Catalog:  {} databases, {} schemas, {} tables, {} columns",
            metadata.databases, metadata.schemas, metadata.tables, metadata.columns
        );
    }
    if let Some(lineage) = &run.lineage {
        println!(
            "Lineage:  {} records ({} declared, {} from query history)",
            lineage.total_records, lineage.dependency_records, lineage.query_records
        );
    }
    if let Some(quality) = &run.quality {
        println!(
            "Quality:  {} checks ({} passed, {} failed, {} errored)",
            quality.total_checks,
            quality.passed_checks,
            quality.failed_checks,
            quality.error_checks
        );
    }

    Ok(())
}
