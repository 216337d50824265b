//! Pipeline run records
//!
//! A governance run walks three stages in a fixed order (catalog, lineage,
//! quality). The run record accumulates per-stage summaries and transitions
//! RUNNING -> COMPLETED or RUNNING -> FAILED exactly once.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::CatalogSummary;
use crate::quality::ValidationReport;

/// Lifecycle status of a pipeline run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RunStatus {
    /// Run is in progress
    Running,

    /// All stages finished successfully
    Completed,

    /// A stage failed and the run was aborted
    Failed,
}

impl RunStatus {
    /// String form used in logs and exports
    pub fn as_str(&self) -> &'static str {
        match self {
            RunStatus::Running => "RUNNING",
            RunStatus::Completed => "COMPLETED",
            RunStatus::Failed => "FAILED",
        }
    }
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Counts produced by the lineage stage
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineageSummary {
    /// Edges from the declared-dependency catalog
    pub dependency_records: usize,

    /// Edges recovered from query history
    pub query_records: usize,

    /// Total lineage records persisted
    pub total_records: usize,
}

/// Record of one governance pipeline run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineRun {
    /// Current lifecycle status
    pub status: RunStatus,

    /// When the run started
    pub started_at: DateTime<Utc>,

    /// When the run finished, once it has
    pub finished_at: Option<DateTime<Utc>>,

    /// Wall-clock duration in seconds, once finished
    pub duration_seconds: Option<f64>,

    /// Catalog stage summary, once the stage has run
    pub metadata: Option<CatalogSummary>,

    /// Lineage stage summary, once the stage has run
    pub lineage: Option<LineageSummary>,

    /// Quality stage report, once the stage has run
    pub quality: Option<ValidationReport>,

    /// Error message when the run failed
    pub error: Option<String>,
}

impl PipelineRun {
    /// Start a new run in the RUNNING state
    pub fn started() -> Self {
        Self {
            status: RunStatus::Running,
            started_at: Utc::now(),
            finished_at: None,
            duration_seconds: None,
            metadata: None,
            lineage: None,
            quality: None,
            error: None,
        }
    }

    /// Mark the run COMPLETED and stamp its duration
    pub fn complete(&mut self) {
        let now = Utc::now();
        self.status = RunStatus::Completed;
        self.finished_at = Some(now);
        self.duration_seconds = Some(Self::elapsed_seconds(self.started_at, now));
    }

    /// Mark the run FAILED with the given error message
    pub fn fail(&mut self, error: impl Into<String>) {
        let now = Utc::now();
        self.status = RunStatus::Failed;
        self.error = Some(error.into());
        self.finished_at = Some(now);
        self.duration_seconds = Some(Self::elapsed_seconds(self.started_at, now));
    }

    fn elapsed_seconds(start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
        (end - start).num_milliseconds().max(0) as f64 / 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_status_strings() {
        assert_eq!(RunStatus::Running.as_str(), "RUNNING");
        assert_eq!(RunStatus::Completed.as_str(), "COMPLETED");
        assert_eq!(RunStatus::Failed.as_str(), "FAILED");
    }

    #[test]
    fn test_run_lifecycle_completed() {
        let mut run = PipelineRun::started();
        assert_eq!(run.status, RunStatus::Running);
        assert!(run.finished_at.is_none());

        run.complete();
        assert_eq!(run.status, RunStatus::Completed);
        assert!(run.finished_at.is_some());
        assert!(run.duration_seconds.unwrap() >= 0.0);
        assert!(run.error.is_none());
    }

    #[test]
    fn test_run_lifecycle_failed() {
        let mut run = PipelineRun::started();
        run.fail("catalog stage failed");

        assert_eq!(run.status, RunStatus::Failed);
        assert_eq!(run.error.as_deref(), Some("catalog stage failed"));
        assert!(run.duration_seconds.unwrap() >= 0.0);
    }

    #[test]
    fn test_run_serialization() {
        let mut run = PipelineRun::started();
        run.complete();

        let json = serde_json::to_value(&run).unwrap();
        assert_eq!(json["status"], "COMPLETED");
        assert!(json["duration_seconds"].as_f64().unwrap() >= 0.0);
    }
}
