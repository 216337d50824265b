//! Quality command

use anyhow::Result;
use steward_core::StewardConfig;
use steward_runtime::GovernancePipeline;

/// Run quality validations and print the per-check summary.
///
/// Exits with code 1 when any check failed, so the command can gate
/// scheduled jobs.
pub async fn execute(config: StewardConfig) -> Result<()> {
    let pipeline = GovernancePipeline::new(config);
    let report = pipeline.run_quality().await?;

    if report.total_checks == 0 {
        println!("No quality checks configured.");
        return Ok(());
    }

    println!(
        "Summary: {} passed, {} failed, {} errored ({:.0}% success)",
        report.passed_checks,
        report.failed_checks,
        report.error_checks,
        report.success_rate * 100.0
    );
    println!();

    println!("{:<42} {:<14} {:<8}", "TABLE", "CHECK", "STATUS");
    println!("{}", "-".repeat(66));
    for line in &report.check_summary {
        println!(
            "{:<42} {:<14} {:<8}",
            truncate(&line.table, 40),
            line.check_type.as_str(),
            line.status.as_str()
        );
    }

    if report.failed_checks > 0 {
        std::process::exit(1);
    }

    Ok(())
}

/// Helper to truncate strings for display.
fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("{}...", &s[..max_len - 3])
    }
}
