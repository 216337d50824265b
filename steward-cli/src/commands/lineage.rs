//! Lineage command

use anyhow::Result;
use steward_core::StewardConfig;
use steward_runtime::GovernancePipeline;

/// Extract lineage, then optionally print one table's immediate neighbors.
pub async fn execute(
    config: StewardConfig,
    table: Option<&str>,
    upstream: bool,
    downstream: bool,
) -> Result<()> {
    let pipeline = GovernancePipeline::new(config);
    let outcome = pipeline.run_lineage().await?;

    println!("Lineage extraction complete");
    println!();
    println!("{:<22} {:>8}", "RECORDS", "COUNT");
    println!("{}", "-".repeat(31));
    println!(
        "{:<22} {:>8}",
        "Declared dependencies", outcome.summary.dependency_records
    );
    println!(
        "{:<22} {:>8}",
        "From query history", outcome.summary.query_records
    );
    println!(
        "{:<22} {:>8}",
        "Total persisted", outcome.summary.total_records
    );
    println!();
    println!(
        "Graph: {} tables, {} edges",
        outcome.tracker.graph().node_count(),
        outcome.tracker.graph().edge_count()
    );

    if let Some(table) = table {
        // Neither direction flag means both directions.
        let both = !upstream && !downstream;
        println!();
        println!("Lineage for {}", table);

        if upstream || both {
            let listing = outcome.tracker.upstream_lineage(table);
            println!();
            println!("Upstream ({}):", listing.ancestors.len());
            if listing.ancestors.is_empty() {
                println!("  (none)");
            }
            for neighbor in &listing.ancestors {
                println!("  {}", neighbor.table);
            }
        }

        if downstream || both {
            let listing = outcome.tracker.downstream_lineage(table);
            println!();
            println!("Downstream ({}):", listing.descendants.len());
            if listing.descendants.is_empty() {
                println!("  (none)");
            }
            for neighbor in &listing.descendants {
                println!("  {}", neighbor.table);
            }
        }
    }

    Ok(())
}
