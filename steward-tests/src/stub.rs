//! Scriptable warehouse stub
//!
//! Canned responses are keyed by SQL substring: the first statement that
//! contains a registered pattern pops the next reply from that pattern's
//! queue. When several patterns match the same statement, the longest one
//! wins, so broad patterns like `pg_namespace` do not shadow more specific
//! ones like `information_schema.tables`. Every statement, batch, and DDL
//! call is recorded for assertions.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use steward_warehouse::{Param, Row, Warehouse};

struct Script {
    pattern: String,
    replies: VecDeque<Vec<Row>>,
}

/// One recorded `execute_query` call.
#[derive(Debug, Clone)]
pub struct RecordedQuery {
    pub sql: String,
    pub params: Vec<Param>,
}

/// One recorded `execute_batch` call.
#[derive(Debug, Clone)]
pub struct RecordedBatch {
    pub sql: String,
    pub rows: Vec<Vec<Param>>,
}

/// In-memory `Warehouse` for tests.
#[derive(Default)]
pub struct StubWarehouse {
    scripts: Mutex<Vec<Script>>,
    query_failures: Mutex<Vec<(String, String)>>,
    batch_failures: Mutex<Vec<(String, String)>>,
    queries: Mutex<Vec<RecordedQuery>>,
    batches: Mutex<Vec<RecordedBatch>>,
    ddl: Mutex<Vec<(String, String)>>,
    closed: Mutex<u32>,
}

impl StubWarehouse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a reply for statements containing `pattern`. Registering the
    /// same pattern again appends to its queue, so repeated statements can
    /// see different rows.
    pub fn on_query(self, pattern: &str, rows: Vec<Row>) -> Self {
        {
            let mut scripts = self.scripts.lock().unwrap();
            match scripts.iter_mut().find(|s| s.pattern == pattern) {
                Some(script) => script.replies.push_back(rows),
                None => scripts.push(Script {
                    pattern: pattern.to_string(),
                    replies: VecDeque::from([rows]),
                }),
            }
        }
        self
    }

    /// Fail every query whose statement contains `pattern`.
    pub fn fail_query(self, pattern: &str, message: &str) -> Self {
        self.query_failures
            .lock()
            .unwrap()
            .push((pattern.to_string(), message.to_string()));
        self
    }

    /// Fail every batched insert whose statement contains `pattern`.
    pub fn fail_batch(self, pattern: &str, message: &str) -> Self {
        self.batch_failures
            .lock()
            .unwrap()
            .push((pattern.to_string(), message.to_string()));
        self
    }

    /// SQL of every query executed so far, in order.
    pub fn executed_sql(&self) -> Vec<String> {
        self.queries
            .lock()
            .unwrap()
            .iter()
            .map(|q| q.sql.clone())
            .collect()
    }

    /// Every recorded query with its bound parameters.
    pub fn recorded_queries(&self) -> Vec<RecordedQuery> {
        self.queries.lock().unwrap().clone()
    }

    /// Every recorded batch, including ones that were then failed.
    pub fn recorded_batches(&self) -> Vec<RecordedBatch> {
        self.batches.lock().unwrap().clone()
    }

    /// `(table, ddl)` for every `ensure_table` call, in order.
    pub fn ddl_log(&self) -> Vec<(String, String)> {
        self.ddl.lock().unwrap().clone()
    }

    pub fn close_count(&self) -> u32 {
        *self.closed.lock().unwrap()
    }
}

#[async_trait]
impl Warehouse for StubWarehouse {
    async fn execute_query(&self, sql: &str, params: &[Param]) -> steward_warehouse::Result<Vec<Row>> {
        self.queries.lock().unwrap().push(RecordedQuery {
            sql: sql.to_string(),
            params: params.to_vec(),
        });

        {
            let failures = self.query_failures.lock().unwrap();
            if let Some((_, message)) = failures.iter().find(|(p, _)| sql.contains(p.as_str())) {
                return Err(steward_warehouse::Error::Connection(message.clone()));
            }
        }

        let mut scripts = self.scripts.lock().unwrap();
        let matched = scripts
            .iter_mut()
            .filter(|script| sql.contains(script.pattern.as_str()))
            .max_by_key(|script| script.pattern.len());
        match matched {
            Some(script) => Ok(script.replies.pop_front().unwrap_or_default()),
            None => Ok(Vec::new()),
        }
    }

    async fn execute_batch(&self, sql: &str, rows: Vec<Vec<Param>>) -> steward_warehouse::Result<u64> {
        let affected = rows.len() as u64;
        self.batches.lock().unwrap().push(RecordedBatch {
            sql: sql.to_string(),
            rows,
        });

        let failures = self.batch_failures.lock().unwrap();
        if let Some((_, message)) = failures.iter().find(|(p, _)| sql.contains(p.as_str())) {
            return Err(steward_warehouse::Error::Connection(message.clone()));
        }
        Ok(affected)
    }

    async fn ensure_table(&self, table: &str, ddl: &str) -> steward_warehouse::Result<()> {
        self.ddl
            .lock()
            .unwrap()
            .push((table.to_string(), ddl.to_string()));
        Ok(())
    }

    async fn close(&self) {
        *self.closed.lock().unwrap() += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::row;
    use serde_json::json;

    #[tokio::test]
    async fn test_longest_matching_pattern_wins() {
        let stub = StubWarehouse::new()
            .on_query("pg_namespace", vec![row(vec![("which", json!("broad"))])])
            .on_query(
                "information_schema.tables JOIN pg_namespace",
                vec![row(vec![("which", json!("specific"))])],
            );

        let rows = stub
            .execute_query("SELECT * FROM information_schema.tables JOIN pg_namespace n ON true", &[])
            .await
            .unwrap();

        assert_eq!(rows[0].str_opt("which").unwrap().unwrap(), "specific");
    }

    #[tokio::test]
    async fn test_replies_pop_in_registration_order() {
        let stub = StubWarehouse::new()
            .on_query("orders", vec![row(vec![("n", json!(1))])])
            .on_query("orders", vec![row(vec![("n", json!(2))])]);

        let first = stub.execute_query("SELECT n FROM orders", &[]).await.unwrap();
        let second = stub.execute_query("SELECT n FROM orders", &[]).await.unwrap();
        let third = stub.execute_query("SELECT n FROM orders", &[]).await.unwrap();

        assert_eq!(first[0].i64_opt("n").unwrap(), Some(1));
        assert_eq!(second[0].i64_opt("n").unwrap(), Some(2));
        assert!(third.is_empty());
    }

    #[tokio::test]
    async fn test_unmatched_query_returns_no_rows() {
        let stub = StubWarehouse::new();
        let rows = stub.execute_query("SELECT 1", &[]).await.unwrap();
        assert!(rows.is_empty());
        assert_eq!(stub.executed_sql(), vec!["SELECT 1".to_string()]);
    }

    #[tokio::test]
    async fn test_query_failure_injection() {
        let stub = StubWarehouse::new().fail_query("forbidden_table", "permission denied");

        let result = stub
            .execute_query("SELECT * FROM forbidden_table", &[])
            .await;

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("permission denied"));
    }

    #[tokio::test]
    async fn test_batch_is_recorded_even_when_failed() {
        let stub = StubWarehouse::new().fail_batch("INSERT INTO catalog", "disk full");

        let result = stub
            .execute_batch(
                "INSERT INTO catalog VALUES ($1)",
                vec![vec![Param::Text("a".to_string())]],
            )
            .await;

        assert!(result.is_err());
        assert_eq!(stub.recorded_batches().len(), 1);
    }

    #[tokio::test]
    async fn test_ddl_and_close_are_tracked() {
        let stub = StubWarehouse::new();
        stub.ensure_table("catalog", "CREATE TABLE IF NOT EXISTS catalog ()")
            .await
            .unwrap();
        stub.close().await;
        stub.close().await;

        assert_eq!(stub.ddl_log().len(), 1);
        assert_eq!(stub.ddl_log()[0].0, "catalog");
        assert_eq!(stub.close_count(), 2);
    }
}
