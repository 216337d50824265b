//! Data quality checks
//!
//! Every public check is fail-soft: a failing query becomes a
//! `CheckResult::Error` carrying the message instead of propagating, so a
//! batch of checks always runs to completion. Column and table names pass
//! through the identifier layer; validity predicates and consistency
//! queries are caller-owned SQL and run as written.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use steward_core::config::{QualityConfig, TableTarget};
use steward_core::quality::{
    CheckError, CheckKind, CheckResult, CheckStatus, ColumnCompleteness, ColumnUniqueness,
    CompletenessResult, ConsistencyOutcome, ConsistencyResult, RuleValidity, TableValidation,
    TimelinessResult, UniquenessResult, ValidityResult,
};
use steward_core::ObjectName;
use steward_warehouse::{quote_ident, quote_path, quote_relation, Param, Warehouse};
use tracing::{error, info, instrument};
use uuid::Uuid;

use crate::{Error, Result};

const TABLE_COLUMNS_QUERY: &str = r"
SELECT c.column_name::text AS column_name
  FROM information_schema.columns c
 WHERE c.table_catalog = $1
   AND c.table_schema = $2
   AND c.table_name = $3
 ORDER BY c.ordinal_position";

/// One validity rule, a SQL predicate over the non-null values of a column
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidityRule {
    /// Column the rule applies to
    pub column: String,

    /// SQL boolean expression the values must satisfy
    pub rule: String,
}

/// One named consistency query
///
/// The query is expected to return an `inconsistent_count` column; a check
/// without a query is skipped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsistencyCheck {
    /// Display name of the check
    pub name: Option<String>,

    /// Query returning the number of inconsistent rows
    pub query: Option<String>,
}

/// Runs data quality validations against warehouse tables
pub struct QualityValidator {
    warehouse: Arc<dyn Warehouse>,
    config: QualityConfig,
}

impl QualityValidator {
    /// Create a new validator over a warehouse connection
    pub fn new(warehouse: Arc<dyn Warehouse>, config: QualityConfig) -> Self {
        Self { warehouse, config }
    }

    /// Check for null values, per column
    ///
    /// With no explicit column list, every column of the table is checked.
    #[instrument(skip(self, columns), fields(table = %table))]
    pub async fn check_completeness(
        &self,
        table: &ObjectName,
        columns: Option<&[String]>,
        threshold: f64,
    ) -> CheckResult {
        match self.completeness_inner(table, columns, threshold).await {
            Ok(result) => {
                info!(status = %result.overall_status, "completeness check completed");
                CheckResult::Completeness(result)
            }
            Err(e) => check_error(CheckKind::Completeness, table, e),
        }
    }

    async fn completeness_inner(
        &self,
        table: &ObjectName,
        columns: Option<&[String]>,
        threshold: f64,
    ) -> Result<CompletenessResult> {
        let relation = quote_path(&[&table.schema, &table.name])?;
        let columns = match columns {
            Some(columns) if !columns.is_empty() => columns.to_vec(),
            _ => self.table_columns(table).await?,
        };

        let count_sql = format!("SELECT COUNT(*) AS total_rows FROM {relation}");
        let rows = self.warehouse.execute_query(&count_sql, &[]).await?;
        let total_rows = required_row(&rows)?.i64_req("total_rows")?;

        let mut column_results = Vec::with_capacity(columns.len());
        let mut overall_status = CheckStatus::Passed;

        for column in &columns {
            let ident = quote_ident(column)?;
            let null_sql =
                format!("SELECT COUNT(*) AS null_count FROM {relation} WHERE {ident} IS NULL");
            let rows = self.warehouse.execute_query(&null_sql, &[]).await?;
            let null_count = required_row(&rows)?.i64_req("null_count")?;

            // An empty table counts as fully complete.
            let (null_percentage, completeness) = if total_rows > 0 {
                let percentage = null_count as f64 * 100.0 / total_rows as f64;
                (round2(percentage), round4(1.0 - percentage / 100.0))
            } else {
                (0.0, 1.0)
            };

            let status = if completeness >= threshold {
                CheckStatus::Passed
            } else {
                CheckStatus::Failed
            };
            if status == CheckStatus::Failed {
                overall_status = CheckStatus::Failed;
            }

            column_results.push(ColumnCompleteness {
                column: column.clone(),
                null_count,
                null_percentage,
                completeness,
                threshold,
                status,
            });
        }

        Ok(CompletenessResult {
            table: table.qualified(),
            total_rows,
            columns: column_results,
            overall_status,
            checked_at: Utc::now(),
        })
    }

    async fn table_columns(&self, table: &ObjectName) -> Result<Vec<String>> {
        let rows = self
            .warehouse
            .execute_query(
                TABLE_COLUMNS_QUERY,
                &[
                    table.database.as_str().into(),
                    table.schema.as_str().into(),
                    table.name.as_str().into(),
                ],
            )
            .await?;
        rows.iter()
            .map(|row| Ok(row.str_req("column_name")?))
            .collect()
    }

    /// Check for duplicate values, per column
    #[instrument(skip(self, columns), fields(table = %table))]
    pub async fn check_uniqueness(&self, table: &ObjectName, columns: &[String]) -> CheckResult {
        match self.uniqueness_inner(table, columns).await {
            Ok(result) => {
                info!(status = %result.overall_status, "uniqueness check completed");
                CheckResult::Uniqueness(result)
            }
            Err(e) => check_error(CheckKind::Uniqueness, table, e),
        }
    }

    async fn uniqueness_inner(
        &self,
        table: &ObjectName,
        columns: &[String],
    ) -> Result<UniquenessResult> {
        let relation = quote_path(&[&table.schema, &table.name])?;

        let mut column_results = Vec::with_capacity(columns.len());
        let mut overall_status = CheckStatus::Passed;

        for column in columns {
            let ident = quote_ident(column)?;
            let sql = format!(
                "SELECT COUNT(*) AS total_count, COUNT(DISTINCT {ident}) AS distinct_count \
                 FROM {relation}"
            );
            let rows = self.warehouse.execute_query(&sql, &[]).await?;
            let row = required_row(&rows)?;

            let total_count = row.i64_req("total_count")?;
            let distinct_count = row.i64_req("distinct_count")?;
            let duplicate_count = total_count - distinct_count;
            let uniqueness_ratio = if total_count > 0 {
                round4(distinct_count as f64 / total_count as f64)
            } else {
                0.0
            };

            let status = if duplicate_count == 0 {
                CheckStatus::Passed
            } else {
                CheckStatus::Failed
            };
            if status == CheckStatus::Failed {
                overall_status = CheckStatus::Failed;
            }

            column_results.push(ColumnUniqueness {
                column: column.clone(),
                total_count,
                distinct_count,
                duplicate_count,
                uniqueness_ratio,
                status,
            });
        }

        Ok(UniquenessResult {
            table: table.qualified(),
            columns: column_results,
            overall_status,
            checked_at: Utc::now(),
        })
    }

    /// Check values against caller-supplied SQL predicates
    #[instrument(skip(self, rules), fields(table = %table, rules = rules.len()))]
    pub async fn check_validity(&self, table: &ObjectName, rules: &[ValidityRule]) -> CheckResult {
        match self.validity_inner(table, rules).await {
            Ok(result) => {
                info!(status = %result.overall_status, "validity check completed");
                CheckResult::Validity(result)
            }
            Err(e) => check_error(CheckKind::Validity, table, e),
        }
    }

    async fn validity_inner(
        &self,
        table: &ObjectName,
        rules: &[ValidityRule],
    ) -> Result<ValidityResult> {
        let relation = quote_path(&[&table.schema, &table.name])?;

        let mut rule_results = Vec::with_capacity(rules.len());
        let mut overall_status = CheckStatus::Passed;

        for rule in rules {
            let ident = quote_ident(&rule.column)?;
            let sql = format!(
                "SELECT COUNT(*) AS total_count, \
                 COALESCE(SUM(CASE WHEN NOT ({predicate}) THEN 1 ELSE 0 END), 0) AS invalid_count \
                 FROM {relation} WHERE {ident} IS NOT NULL",
                predicate = rule.rule
            );
            let rows = self.warehouse.execute_query(&sql, &[]).await?;
            let row = required_row(&rows)?;

            let total_count = row.i64_req("total_count")?;
            let invalid_count = row.i64_req("invalid_count")?;
            let validity_ratio = if total_count > 0 {
                round4((total_count - invalid_count) as f64 / total_count as f64)
            } else {
                0.0
            };

            let status = if invalid_count == 0 {
                CheckStatus::Passed
            } else {
                CheckStatus::Failed
            };
            if status == CheckStatus::Failed {
                overall_status = CheckStatus::Failed;
            }

            rule_results.push(RuleValidity {
                column: rule.column.clone(),
                rule: rule.rule.clone(),
                total_count,
                invalid_count,
                validity_ratio,
                status,
            });
        }

        Ok(ValidityResult {
            table: table.qualified(),
            rules: rule_results,
            overall_status,
            checked_at: Utc::now(),
        })
    }

    /// Run caller-supplied consistency queries
    #[instrument(skip(self, checks), fields(table = %table, checks = checks.len()))]
    pub async fn check_consistency(
        &self,
        table: &ObjectName,
        checks: &[ConsistencyCheck],
    ) -> CheckResult {
        match self.consistency_inner(table, checks).await {
            Ok(result) => {
                info!(status = %result.overall_status, "consistency check completed");
                CheckResult::Consistency(result)
            }
            Err(e) => check_error(CheckKind::Consistency, table, e),
        }
    }

    async fn consistency_inner(
        &self,
        table: &ObjectName,
        checks: &[ConsistencyCheck],
    ) -> Result<ConsistencyResult> {
        let mut outcomes = Vec::with_capacity(checks.len());
        let mut overall_status = CheckStatus::Passed;

        for check in checks {
            let query = match &check.query {
                Some(query) => query,
                None => continue,
            };
            let name = check
                .name
                .clone()
                .unwrap_or_else(|| "unnamed_check".to_string());

            let rows = self.warehouse.execute_query(query, &[]).await?;
            let inconsistent_count = match rows.first() {
                Some(row) if row.contains("inconsistent_count") => {
                    row.i64_opt("inconsistent_count")?.unwrap_or(0)
                }
                _ => 0,
            };

            let status = if inconsistent_count == 0 {
                CheckStatus::Passed
            } else {
                CheckStatus::Failed
            };
            if status == CheckStatus::Failed {
                overall_status = CheckStatus::Failed;
            }

            outcomes.push(ConsistencyOutcome {
                name,
                inconsistent_count,
                status,
            });
        }

        Ok(ConsistencyResult {
            table: table.qualified(),
            checks: outcomes,
            overall_status,
            checked_at: Utc::now(),
        })
    }

    /// Check data freshness against a maximum age
    #[instrument(skip(self), fields(table = %table, column = %timestamp_column))]
    pub async fn check_timeliness(
        &self,
        table: &ObjectName,
        timestamp_column: &str,
        max_age_hours: i64,
    ) -> CheckResult {
        match self
            .timeliness_inner(table, timestamp_column, max_age_hours)
            .await
        {
            Ok(result) => {
                info!(status = %result.status, "timeliness check completed");
                CheckResult::Timeliness(result)
            }
            Err(e) => check_error(CheckKind::Timeliness, table, e),
        }
    }

    async fn timeliness_inner(
        &self,
        table: &ObjectName,
        timestamp_column: &str,
        max_age_hours: i64,
    ) -> Result<TimelinessResult> {
        let relation = quote_path(&[&table.schema, &table.name])?;
        let ident = quote_ident(timestamp_column)?;
        let sql = format!(
            "SELECT MAX({ident}) AS latest_timestamp, \
             (EXTRACT(EPOCH FROM (NOW() - MAX({ident}))) / 3600.0)::double precision AS age_hours \
             FROM {relation}"
        );

        let rows = self.warehouse.execute_query(&sql, &[]).await?;
        let row = required_row(&rows)?;

        let latest_timestamp = match row.datetime_opt("latest_timestamp")? {
            Some(ts) => ts,
            None => {
                return Err(Error::NoTimestamps {
                    table: table.qualified(),
                    column: timestamp_column.to_string(),
                })
            }
        };
        let age_hours = row.f64_req("age_hours")?;

        let status = if age_hours <= max_age_hours as f64 {
            CheckStatus::Passed
        } else {
            CheckStatus::Failed
        };

        Ok(TimelinessResult {
            table: table.qualified(),
            timestamp_column: timestamp_column.to_string(),
            latest_timestamp,
            age_hours,
            max_age_hours,
            status,
            checked_at: Utc::now(),
        })
    }

    /// Run the checks enabled in the configuration against one target table
    #[instrument(skip(self, target), fields(table = %target.table))]
    pub async fn run_validation(&self, target: &TableTarget) -> TableValidation {
        let table = ObjectName::new(&target.database, &target.schema, &target.table);
        let rules = &self.config.rules;
        let mut checks = Vec::new();

        if rules.completeness.enabled {
            checks.push(
                self.check_completeness(&table, None, rules.completeness.threshold)
                    .await,
            );
        }
        if rules.uniqueness.enabled {
            let key = target
                .primary_key
                .clone()
                .unwrap_or_else(|| "id".to_string());
            checks.push(self.check_uniqueness(&table, &[key]).await);
        }
        if rules.timeliness.enabled {
            let column = target
                .timestamp_column
                .clone()
                .unwrap_or_else(|| "created_at".to_string());
            checks.push(
                self.check_timeliness(&table, &column, rules.timeliness.max_age_hours)
                    .await,
            );
        }

        info!(checks = checks.len(), "validation completed");
        TableValidation::from_checks(table.qualified(), checks)
    }

    /// Persist check results, one batched insert
    #[instrument(skip(self, results), fields(results = results.len(), table = %table))]
    pub async fn save_results(&self, results: &[CheckResult], table: &str) -> Result<u64> {
        let relation = quote_relation(table)?;
        self.warehouse
            .ensure_table(table, &results_ddl(&relation))
            .await?;

        let insert = format!(
            r"INSERT INTO {relation}
    (validation_id, table_name, check_type, check_status, validation_json, validation_timestamp)
VALUES ($1, $2, $3, $4, $5, $6)"
        );

        let batches = results.iter().map(result_row).collect::<Result<Vec<_>>>()?;
        let saved = self.warehouse.execute_batch(&insert, batches).await?;

        info!(results = saved, "saved validation results");
        Ok(saved)
    }
}

fn check_error(check: CheckKind, table: &ObjectName, e: Error) -> CheckResult {
    error!(table = %table, check = %check, error = %e, "quality check failed");
    CheckResult::Error(CheckError {
        check,
        table: table.qualified(),
        error: e.to_string(),
        checked_at: Utc::now(),
    })
}

fn required_row(rows: &[steward_warehouse::Row]) -> Result<&steward_warehouse::Row> {
    rows.first().ok_or(Error::EmptyResult)
}

fn results_ddl(relation: &str) -> String {
    format!(
        r"CREATE TABLE IF NOT EXISTS {relation} (
    validation_id VARCHAR NOT NULL,
    table_name VARCHAR NOT NULL,
    check_type VARCHAR NOT NULL,
    check_status VARCHAR NOT NULL,
    validation_json JSONB NOT NULL,
    validation_timestamp TIMESTAMPTZ NOT NULL,
    PRIMARY KEY (validation_id)
)"
    )
}

fn result_row(result: &CheckResult) -> Result<Vec<Param>> {
    Ok(vec![
        Uuid::new_v4().to_string().into(),
        result.table().into(),
        result.kind().as_str().into(),
        result.status().as_str().into(),
        serde_json::to_value(result)?.into(),
        result.checked_at().into(),
    ])
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use serde_json::json;
    use steward_warehouse::Row;

    #[derive(Default)]
    struct ScriptedWarehouse {
        responses: Mutex<VecDeque<steward_warehouse::Result<Vec<Row>>>>,
        queries: Mutex<Vec<(String, Vec<Param>)>>,
        batches: Mutex<Vec<(String, Vec<Vec<Param>>)>>,
        tables: Mutex<Vec<String>>,
    }

    impl ScriptedWarehouse {
        fn respond(self, response: steward_warehouse::Result<Vec<Row>>) -> Self {
            self.responses.lock().unwrap().push_back(response);
            self
        }

        fn respond_row(self, pairs: Vec<(&str, serde_json::Value)>) -> Self {
            let row = Row::from_pairs(
                pairs
                    .into_iter()
                    .map(|(k, v)| (k.to_string(), v))
                    .collect::<Vec<_>>(),
            );
            self.respond(Ok(vec![row]))
        }
    }

    #[async_trait::async_trait]
    impl Warehouse for ScriptedWarehouse {
        async fn execute_query(
            &self,
            sql: &str,
            params: &[Param],
        ) -> steward_warehouse::Result<Vec<Row>> {
            self.queries
                .lock()
                .unwrap()
                .push((sql.to_string(), params.to_vec()));
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(Vec::new()))
        }

        async fn execute_batch(
            &self,
            sql: &str,
            batches: Vec<Vec<Param>>,
        ) -> steward_warehouse::Result<u64> {
            let rows = batches.len() as u64;
            self.batches.lock().unwrap().push((sql.to_string(), batches));
            Ok(rows)
        }

        async fn ensure_table(&self, table: &str, _ddl: &str) -> steward_warehouse::Result<()> {
            self.tables.lock().unwrap().push(table.to_string());
            Ok(())
        }

        async fn close(&self) {}
    }

    fn validator_with(warehouse: Arc<ScriptedWarehouse>) -> QualityValidator {
        QualityValidator::new(warehouse, QualityConfig::default())
    }

    fn orders() -> ObjectName {
        ObjectName::new("analytics", "public", "orders")
    }

    #[tokio::test]
    async fn test_completeness_passes_above_threshold() {
        let warehouse = Arc::new(
            ScriptedWarehouse::default()
                .respond_row(vec![("total_rows", json!(100))])
                .respond_row(vec![("null_count", json!(0))])
                .respond_row(vec![("null_count", json!(3))]),
        );
        let validator = validator_with(warehouse);

        let columns = vec!["id".to_string(), "email".to_string()];
        let result = validator
            .check_completeness(&orders(), Some(&columns), 0.95)
            .await;

        assert_eq!(result.status(), CheckStatus::Passed);
        match result {
            CheckResult::Completeness(r) => {
                assert_eq!(r.total_rows, 100);
                assert_eq!(r.columns.len(), 2);
                assert_eq!(r.columns[1].null_count, 3);
                assert_eq!(r.columns[1].null_percentage, 3.0);
                assert_eq!(r.columns[1].completeness, 0.97);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_completeness_fails_below_threshold() {
        let warehouse = Arc::new(
            ScriptedWarehouse::default()
                .respond_row(vec![("total_rows", json!(100))])
                .respond_row(vec![("null_count", json!(10))]),
        );
        let validator = validator_with(warehouse);

        let columns = vec!["email".to_string()];
        let result = validator
            .check_completeness(&orders(), Some(&columns), 0.95)
            .await;

        assert_eq!(result.status(), CheckStatus::Failed);
    }

    #[tokio::test]
    async fn test_completeness_empty_table_is_complete() {
        let warehouse = Arc::new(
            ScriptedWarehouse::default()
                .respond_row(vec![("total_rows", json!(0))])
                .respond_row(vec![("null_count", json!(0))]),
        );
        let validator = validator_with(warehouse);

        let columns = vec!["email".to_string()];
        let result = validator
            .check_completeness(&orders(), Some(&columns), 0.95)
            .await;

        assert_eq!(result.status(), CheckStatus::Passed);
        match result {
            CheckResult::Completeness(r) => {
                assert_eq!(r.columns[0].completeness, 1.0);
                assert_eq!(r.columns[0].null_percentage, 0.0);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_completeness_introspects_columns() {
        let warehouse = Arc::new(
            ScriptedWarehouse::default()
                .respond_row(vec![("column_name", json!("id"))])
                .respond_row(vec![("total_rows", json!(5))])
                .respond_row(vec![("null_count", json!(0))]),
        );
        let validator = validator_with(warehouse.clone());

        let result = validator.check_completeness(&orders(), None, 0.95).await;
        assert_eq!(result.status(), CheckStatus::Passed);

        let queries = warehouse.queries.lock().unwrap();
        assert!(queries[0].0.contains("information_schema.columns"));
        assert_eq!(queries[0].1.len(), 3);
    }

    #[tokio::test]
    async fn test_completeness_error_is_fail_soft() {
        let warehouse = Arc::new(ScriptedWarehouse::default().respond(Err(
            steward_warehouse::Error::Connection("refused".to_string()),
        )));
        let validator = validator_with(warehouse);

        let columns = vec!["id".to_string()];
        let result = validator
            .check_completeness(&orders(), Some(&columns), 0.95)
            .await;

        assert_eq!(result.status(), CheckStatus::Error);
        assert_eq!(result.kind(), CheckKind::Completeness);
        match result {
            CheckResult::Error(e) => assert!(e.error.contains("refused")),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_uniqueness_duplicates_fail() {
        let warehouse = Arc::new(ScriptedWarehouse::default().respond_row(vec![
            ("total_count", json!(100)),
            ("distinct_count", json!(97)),
        ]));
        let validator = validator_with(warehouse.clone());

        let columns = vec!["id".to_string()];
        let result = validator.check_uniqueness(&orders(), &columns).await;

        assert_eq!(result.status(), CheckStatus::Failed);
        match result {
            CheckResult::Uniqueness(r) => {
                assert_eq!(r.columns[0].duplicate_count, 3);
                assert_eq!(r.columns[0].uniqueness_ratio, 0.97);
            }
            other => panic!("unexpected result: {other:?}"),
        }

        let queries = warehouse.queries.lock().unwrap();
        assert!(queries[0].0.contains("COUNT(DISTINCT id)"));
        assert!(queries[0].0.contains("FROM public.orders"));
    }

    #[tokio::test]
    async fn test_uniqueness_empty_table_passes() {
        let warehouse = Arc::new(ScriptedWarehouse::default().respond_row(vec![
            ("total_count", json!(0)),
            ("distinct_count", json!(0)),
        ]));
        let validator = validator_with(warehouse);

        let columns = vec!["id".to_string()];
        let result = validator.check_uniqueness(&orders(), &columns).await;

        assert_eq!(result.status(), CheckStatus::Passed);
        match result {
            CheckResult::Uniqueness(r) => {
                assert_eq!(r.columns[0].uniqueness_ratio, 0.0);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_validity_counts_invalid_rows() {
        let warehouse = Arc::new(ScriptedWarehouse::default().respond_row(vec![
            ("total_count", json!(50)),
            ("invalid_count", json!(2)),
        ]));
        let validator = validator_with(warehouse.clone());

        let rules = vec![ValidityRule {
            column: "amount".to_string(),
            rule: "amount >= 0".to_string(),
        }];
        let result = validator.check_validity(&orders(), &rules).await;

        assert_eq!(result.status(), CheckStatus::Failed);
        match result {
            CheckResult::Validity(r) => {
                assert_eq!(r.rules[0].invalid_count, 2);
                assert_eq!(r.rules[0].validity_ratio, 0.96);
            }
            other => panic!("unexpected result: {other:?}"),
        }

        let queries = warehouse.queries.lock().unwrap();
        assert!(queries[0].0.contains("NOT (amount >= 0)"));
        assert!(queries[0].0.contains("WHERE amount IS NOT NULL"));
    }

    #[tokio::test]
    async fn test_consistency_skips_checks_without_query() {
        let warehouse = Arc::new(
            ScriptedWarehouse::default()
                .respond_row(vec![("inconsistent_count", json!(5))]),
        );
        let validator = validator_with(warehouse);

        let checks = vec![
            ConsistencyCheck {
                name: Some("orphaned_orders".to_string()),
                query: None,
            },
            ConsistencyCheck {
                name: None,
                query: Some("SELECT COUNT(*) AS inconsistent_count FROM x".to_string()),
            },
        ];
        let result = validator.check_consistency(&orders(), &checks).await;

        assert_eq!(result.status(), CheckStatus::Failed);
        match result {
            CheckResult::Consistency(r) => {
                assert_eq!(r.checks.len(), 1);
                assert_eq!(r.checks[0].name, "unnamed_check");
                assert_eq!(r.checks[0].inconsistent_count, 5);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_consistency_missing_column_counts_zero() {
        let warehouse =
            Arc::new(ScriptedWarehouse::default().respond_row(vec![("rows", json!(9))]));
        let validator = validator_with(warehouse);

        let checks = vec![ConsistencyCheck {
            name: Some("totals_match".to_string()),
            query: Some("SELECT 9 AS rows".to_string()),
        }];
        let result = validator.check_consistency(&orders(), &checks).await;

        assert_eq!(result.status(), CheckStatus::Passed);
    }

    #[tokio::test]
    async fn test_timeliness_fresh_data_passes() {
        let warehouse = Arc::new(ScriptedWarehouse::default().respond_row(vec![
            ("latest_timestamp", json!("2026-08-25T06:00:00Z")),
            ("age_hours", json!(2.5)),
        ]));
        let validator = validator_with(warehouse);

        let result = validator.check_timeliness(&orders(), "created_at", 24).await;

        assert_eq!(result.status(), CheckStatus::Passed);
        match result {
            CheckResult::Timeliness(r) => {
                assert_eq!(r.age_hours, 2.5);
                assert_eq!(r.max_age_hours, 24);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_timeliness_stale_data_fails() {
        let warehouse = Arc::new(ScriptedWarehouse::default().respond_row(vec![
            ("latest_timestamp", json!("2026-08-20T00:00:00Z")),
            ("age_hours", json!(126.0)),
        ]));
        let validator = validator_with(warehouse);

        let result = validator.check_timeliness(&orders(), "created_at", 24).await;
        assert_eq!(result.status(), CheckStatus::Failed);
    }

    #[tokio::test]
    async fn test_timeliness_empty_table_is_error() {
        let warehouse = Arc::new(ScriptedWarehouse::default().respond_row(vec![
            ("latest_timestamp", json!(null)),
            ("age_hours", json!(null)),
        ]));
        let validator = validator_with(warehouse);

        let result = validator.check_timeliness(&orders(), "created_at", 24).await;

        assert_eq!(result.status(), CheckStatus::Error);
        assert_eq!(result.kind(), CheckKind::Timeliness);
    }

    #[tokio::test]
    async fn test_run_validation_wires_enabled_checks() {
        let warehouse = Arc::new(
            ScriptedWarehouse::default()
                // Completeness: introspection, row count, one null count.
                .respond_row(vec![("column_name", json!("id"))])
                .respond_row(vec![("total_rows", json!(10))])
                .respond_row(vec![("null_count", json!(0))])
                // Uniqueness over the default key.
                .respond_row(vec![
                    ("total_count", json!(10)),
                    ("distinct_count", json!(10)),
                ])
                // Timeliness over the default timestamp column.
                .respond_row(vec![
                    ("latest_timestamp", json!("2026-08-25T06:00:00Z")),
                    ("age_hours", json!(1.0)),
                ]),
        );

        let mut config = QualityConfig::default();
        config.rules.uniqueness.enabled = true;
        config.rules.timeliness.enabled = true;
        let validator = QualityValidator::new(warehouse.clone(), config);

        let target = TableTarget {
            database: "analytics".to_string(),
            schema: "public".to_string(),
            table: "orders".to_string(),
            primary_key: None,
            timestamp_column: None,
        };
        let validation = validator.run_validation(&target).await;

        assert_eq!(validation.table, "analytics.public.orders");
        assert_eq!(validation.checks.len(), 3);
        assert_eq!(validation.overall_status, CheckStatus::Passed);

        let queries = warehouse.queries.lock().unwrap();
        let all_sql: Vec<&str> = queries.iter().map(|(sql, _)| sql.as_str()).collect();
        assert!(all_sql.iter().any(|sql| sql.contains("COUNT(DISTINCT id)")));
        assert!(all_sql.iter().any(|sql| sql.contains("MAX(created_at)")));
    }

    #[tokio::test]
    async fn test_save_results_binds_rows() {
        let warehouse = Arc::new(ScriptedWarehouse::default());
        let validator = validator_with(warehouse.clone());

        let result = CheckResult::Completeness(CompletenessResult {
            table: "analytics.public.orders".to_string(),
            total_rows: 10,
            columns: Vec::new(),
            overall_status: CheckStatus::Passed,
            checked_at: Utc::now(),
        });

        let saved = validator
            .save_results(&[result], "governance.dq_validation_results")
            .await
            .unwrap();
        assert_eq!(saved, 1);

        let tables = warehouse.tables.lock().unwrap();
        assert_eq!(tables.as_slice(), ["governance.dq_validation_results"]);

        let batches = warehouse.batches.lock().unwrap();
        let row = &batches[0].1[0];
        assert_eq!(row.len(), 6);
        match &row[0] {
            Param::Text(id) => {
                Uuid::parse_str(id).unwrap();
            }
            other => panic!("unexpected validation_id param: {other:?}"),
        }
        assert_eq!(row[1], Param::Text("analytics.public.orders".to_string()));
        assert_eq!(row[2], Param::Text("COMPLETENESS".to_string()));
        assert_eq!(row[3], Param::Text("PASSED".to_string()));
    }
}
