//! Warehouse adapter trait
//!
//! The seam between the governance components and a concrete warehouse
//! driver. Extraction and validation code is written against this trait;
//! tests substitute a scripted stub.

use async_trait::async_trait;

use crate::{Param, Result, Row};

/// Async interface to an analytic warehouse
#[async_trait]
pub trait Warehouse: Send + Sync {
    /// Execute one statement and return its result rows
    async fn execute_query(&self, sql: &str, params: &[Param]) -> Result<Vec<Row>>;

    /// Execute one statement repeatedly with many parameter tuples
    ///
    /// The whole batch runs in a single transaction: committed once on
    /// success, rolled back as a unit on failure. Returns the number of
    /// affected rows.
    async fn execute_batch(&self, sql: &str, batches: Vec<Vec<Param>>) -> Result<u64>;

    /// Idempotently create a table from its DDL
    ///
    /// The DDL is expected to be of the CREATE TABLE IF NOT EXISTS form;
    /// running it against an existing table is not an error.
    async fn ensure_table(&self, table: &str, ddl: &str) -> Result<()>;

    /// Release the underlying connections
    async fn close(&self);
}
