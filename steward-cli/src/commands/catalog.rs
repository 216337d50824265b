//! Catalog command

use anyhow::Result;
use steward_core::StewardConfig;
use steward_runtime::GovernancePipeline;

/// Extract the metadata catalog and print per-section entry counts.
pub async fn execute(config: StewardConfig) -> Result<()> {
    let output_table = config.output.catalog_table.clone();
    let pipeline = GovernancePipeline::new(config);
    let summary = pipeline.run_catalog().await?;

    println!("Catalog extraction complete");
    println!();
    println!("{:<12} {:>8}", "SECTION", "ENTRIES");
    println!("{}", "-".repeat(21));
    println!("{:<12} {:>8}", "Databases", summary.databases);
    println!("{:<12} {:>8}", "Schemas", summary.schemas);
    println!("{:<12} {:>8}", "Tables", summary.tables);
    println!("{:<12} {:>8}", "Columns", summary.columns);
    println!("{}", "-".repeat(21));
    println!("{:<12} {:>8}", "Total", summary.total());
    println!();
    println!("Saved to: {}", output_table);

    Ok(())
}
