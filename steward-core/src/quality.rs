//! Data quality check results
//!
//! Typed results for the five quality check families. Each check produces
//! per-column or per-rule sub-results with counts and a status; the table
//! level status is FAILED as soon as any sub-result fails. A check whose
//! underlying query throws is captured as an `Error` result instead of
//! propagating, so batches of checks keep running.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Status of a check or sub-check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CheckStatus {
    /// Data meets the quality criteria
    Passed,

    /// Data does not meet the quality criteria
    Failed,

    /// The check itself could not be executed
    Error,
}

impl CheckStatus {
    /// Returns true if the check passed
    pub fn is_passed(&self) -> bool {
        matches!(self, CheckStatus::Passed)
    }

    /// String form used in the persisted `check_status` column
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckStatus::Passed => "PASSED",
            CheckStatus::Failed => "FAILED",
            CheckStatus::Error => "ERROR",
        }
    }
}

impl std::fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Family of a quality check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CheckKind {
    /// Null-rate check against a completeness threshold
    Completeness,

    /// Duplicate detection over key columns
    Uniqueness,

    /// Custom SQL predicate violations
    Validity,

    /// Caller-defined cross-table or business-rule queries
    Consistency,

    /// Freshness of the latest timestamp
    Timeliness,
}

impl CheckKind {
    /// String form used in the persisted `check_type` column
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckKind::Completeness => "COMPLETENESS",
            CheckKind::Uniqueness => "UNIQUENESS",
            CheckKind::Validity => "VALIDITY",
            CheckKind::Consistency => "CONSISTENCY",
            CheckKind::Timeliness => "TIMELINESS",
        }
    }
}

impl std::fmt::Display for CheckKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Completeness measured for one column
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnCompleteness {
    /// Column that was checked
    pub column: String,

    /// Number of null values found
    pub null_count: i64,

    /// Nulls as a percentage of total rows
    pub null_percentage: f64,

    /// Fraction of non-null values (1 - null_count / total_rows)
    pub completeness: f64,

    /// Threshold the completeness was compared against
    pub threshold: f64,

    /// Pass/fail for this column
    pub status: CheckStatus,
}

/// Result of a completeness check over one table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletenessResult {
    /// Fully qualified table name
    pub table: String,

    /// Total rows in the table at check time
    pub total_rows: i64,

    /// Per-column completeness measurements
    pub columns: Vec<ColumnCompleteness>,

    /// FAILED if any column fell below its threshold
    pub overall_status: CheckStatus,

    /// When the check ran
    pub checked_at: DateTime<Utc>,
}

/// Uniqueness measured for one column
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnUniqueness {
    /// Column that was checked
    pub column: String,

    /// Total non-aggregated row count
    pub total_count: i64,

    /// Number of distinct values
    pub distinct_count: i64,

    /// total_count - distinct_count
    pub duplicate_count: i64,

    /// distinct_count / total_count (0 for an empty table)
    pub uniqueness_ratio: f64,

    /// Pass/fail for this column
    pub status: CheckStatus,
}

/// Result of a uniqueness check over one table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UniquenessResult {
    /// Fully qualified table name
    pub table: String,

    /// Per-column uniqueness measurements
    pub columns: Vec<ColumnUniqueness>,

    /// FAILED if any column had duplicates
    pub overall_status: CheckStatus,

    /// When the check ran
    pub checked_at: DateTime<Utc>,
}

/// Validity measured for one column/rule pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleValidity {
    /// Column the rule applies to
    pub column: String,

    /// SQL predicate the non-null values were tested against
    pub rule: String,

    /// Number of non-null rows evaluated
    pub total_count: i64,

    /// Rows where the predicate evaluated false
    pub invalid_count: i64,

    /// (total_count - invalid_count) / total_count (0 for no rows)
    pub validity_ratio: f64,

    /// Pass/fail for this rule
    pub status: CheckStatus,
}

/// Result of a validity check over one table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidityResult {
    /// Fully qualified table name
    pub table: String,

    /// Per-rule validity measurements
    pub rules: Vec<RuleValidity>,

    /// FAILED if any rule found invalid rows
    pub overall_status: CheckStatus,

    /// When the check ran
    pub checked_at: DateTime<Utc>,
}

/// Outcome of one named consistency query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsistencyOutcome {
    /// Name of the consistency check
    pub name: String,

    /// Value of the query's `inconsistent_count` column (0 if absent)
    pub inconsistent_count: i64,

    /// Pass/fail for this check
    pub status: CheckStatus,
}

/// Result of a consistency check over one table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsistencyResult {
    /// Fully qualified table name
    pub table: String,

    /// Per-query outcomes
    pub checks: Vec<ConsistencyOutcome>,

    /// FAILED if any query reported inconsistent rows
    pub overall_status: CheckStatus,

    /// When the check ran
    pub checked_at: DateTime<Utc>,
}

/// Result of a timeliness check over one table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelinessResult {
    /// Fully qualified table name
    pub table: String,

    /// Column the freshness was measured on
    pub timestamp_column: String,

    /// Most recent timestamp found
    pub latest_timestamp: DateTime<Utc>,

    /// Age of the latest timestamp in hours
    pub age_hours: f64,

    /// Maximum acceptable age in hours
    pub max_age_hours: i64,

    /// FAILED if the data is older than the maximum age
    pub status: CheckStatus,

    /// When the check ran
    pub checked_at: DateTime<Utc>,
}

/// One executed quality check, including the fail-soft error capture
///
/// Serialized form is self-describing through the `check_type` tag; an
/// errored check tags as `ERROR` and names the intended check in `check`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "check_type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CheckResult {
    /// Completed completeness check
    Completeness(CompletenessResult),

    /// Completed uniqueness check
    Uniqueness(UniquenessResult),

    /// Completed validity check
    Validity(ValidityResult),

    /// Completed consistency check
    Consistency(ConsistencyResult),

    /// Completed timeliness check
    Timeliness(TimelinessResult),

    /// A check whose underlying query failed
    Error(CheckError),
}

/// Fail-soft capture of a check that could not execute
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckError {
    /// Which check was being attempted
    pub check: CheckKind,

    /// Fully qualified table name
    pub table: String,

    /// Error message from the underlying query
    pub error: String,

    /// When the check ran
    pub checked_at: DateTime<Utc>,
}

impl CheckResult {
    /// The check family this result belongs to
    pub fn kind(&self) -> CheckKind {
        match self {
            CheckResult::Completeness(_) => CheckKind::Completeness,
            CheckResult::Uniqueness(_) => CheckKind::Uniqueness,
            CheckResult::Validity(_) => CheckKind::Validity,
            CheckResult::Consistency(_) => CheckKind::Consistency,
            CheckResult::Timeliness(_) => CheckKind::Timeliness,
            CheckResult::Error(e) => e.check,
        }
    }

    /// Fully qualified name of the checked table
    pub fn table(&self) -> &str {
        match self {
            CheckResult::Completeness(r) => &r.table,
            CheckResult::Uniqueness(r) => &r.table,
            CheckResult::Validity(r) => &r.table,
            CheckResult::Consistency(r) => &r.table,
            CheckResult::Timeliness(r) => &r.table,
            CheckResult::Error(e) => &e.table,
        }
    }

    /// Table-level status of this result
    pub fn status(&self) -> CheckStatus {
        match self {
            CheckResult::Completeness(r) => r.overall_status,
            CheckResult::Uniqueness(r) => r.overall_status,
            CheckResult::Validity(r) => r.overall_status,
            CheckResult::Consistency(r) => r.overall_status,
            CheckResult::Timeliness(r) => r.status,
            CheckResult::Error(_) => CheckStatus::Error,
        }
    }

    /// When the check ran
    pub fn checked_at(&self) -> DateTime<Utc> {
        match self {
            CheckResult::Completeness(r) => r.checked_at,
            CheckResult::Uniqueness(r) => r.checked_at,
            CheckResult::Validity(r) => r.checked_at,
            CheckResult::Consistency(r) => r.checked_at,
            CheckResult::Timeliness(r) => r.checked_at,
            CheckResult::Error(e) => e.checked_at,
        }
    }
}

/// All checks executed against one table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableValidation {
    /// Fully qualified table name
    pub table: String,

    /// Results of the checks that ran
    pub checks: Vec<CheckResult>,

    /// FAILED if any check failed
    pub overall_status: CheckStatus,

    /// When the validation ran
    pub checked_at: DateTime<Utc>,
}

impl TableValidation {
    /// Fold a list of check results into a per-table validation
    pub fn from_checks(table: impl Into<String>, checks: Vec<CheckResult>) -> Self {
        let failed = checks
            .iter()
            .any(|c| matches!(c.status(), CheckStatus::Failed));
        Self {
            table: table.into(),
            overall_status: if failed {
                CheckStatus::Failed
            } else {
                CheckStatus::Passed
            },
            checks,
            checked_at: Utc::now(),
        }
    }
}

/// One line in a validation report's per-check summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckSummaryLine {
    /// Fully qualified table name
    pub table: String,

    /// Check family
    pub check_type: CheckKind,

    /// Table-level status
    pub status: CheckStatus,
}

/// Summary report over a batch of check results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    /// When the report was generated
    pub generated_at: DateTime<Utc>,

    /// Total number of checks
    pub total_checks: usize,

    /// Checks that passed
    pub passed_checks: usize,

    /// Checks that failed
    pub failed_checks: usize,

    /// Checks that could not execute
    pub error_checks: usize,

    /// passed_checks / total_checks, 0 when total is 0
    pub success_rate: f64,

    /// One summary line per check
    pub check_summary: Vec<CheckSummaryLine>,
}

impl ValidationReport {
    /// Tally statuses across a batch of results
    pub fn from_results(results: &[CheckResult]) -> Self {
        let mut passed = 0usize;
        let mut failed = 0usize;
        let mut errors = 0usize;
        let mut summary = Vec::with_capacity(results.len());

        for result in results {
            let status = result.status();
            match status {
                CheckStatus::Passed => passed += 1,
                CheckStatus::Failed => failed += 1,
                CheckStatus::Error => errors += 1,
            }
            summary.push(CheckSummaryLine {
                table: result.table().to_string(),
                check_type: result.kind(),
                status,
            });
        }

        let total = results.len();
        let success_rate = if total > 0 {
            passed as f64 / total as f64
        } else {
            0.0
        };

        Self {
            generated_at: Utc::now(),
            total_checks: total,
            passed_checks: passed,
            failed_checks: failed,
            error_checks: errors,
            success_rate,
            check_summary: summary,
        }
    }

    /// An empty report, used when the quality stage runs no checks
    pub fn empty() -> Self {
        Self::from_results(&[])
    }
}
