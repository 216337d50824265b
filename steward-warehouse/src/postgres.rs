//! PostgreSQL-family warehouse adapter

use std::time::{Duration, Instant};

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde_json::Value;
use sqlx::postgres::{PgArguments, PgPoolOptions, PgRow};
use sqlx::query::Query;
use sqlx::{Column, PgPool, Postgres, Row as _, TypeInfo};
use steward_core::config::{PoolSettings, WarehouseConfig};
use tracing::{debug, error, info, instrument, warn};

use crate::ident::quote_ident;
use crate::warehouse::Warehouse;
use crate::{Error, Param, Result, Row};

/// Warehouse adapter backed by a PostgreSQL-wire connection pool
#[derive(Debug)]
pub struct PgWarehouse {
    pool: PgPool,
}

impl PgWarehouse {
    /// Connect using the pool settings from the configuration
    pub async fn connect(config: &WarehouseConfig) -> Result<Self> {
        Self::connect_with_pool(config, config.pool).await
    }

    /// Connect with explicit pool settings
    pub async fn connect_with_pool(config: &WarehouseConfig, pool: PoolSettings) -> Result<Self> {
        if pool.min_connections == 0 {
            return Err(Error::Connection("min_connections must be > 0".to_string()));
        }
        if pool.max_connections < pool.min_connections {
            return Err(Error::Connection(
                "max_connections must be >= min_connections".to_string(),
            ));
        }

        let mut opts = PgPoolOptions::new()
            .max_connections(pool.max_connections)
            .min_connections(pool.min_connections)
            .acquire_timeout(Duration::from_secs(pool.acquire_timeout_secs));

        // Apply session role and search path on every pooled connection.
        let statements = session_statements(config)?;
        if !statements.is_empty() {
            opts = opts.after_connect(move |conn, _meta| {
                let statements = statements.clone();
                Box::pin(async move {
                    for stmt in &statements {
                        sqlx::query(stmt).execute(&mut *conn).await?;
                    }
                    Ok(())
                })
            });
        }

        let pool = opts.connect(&config.connection_url()).await?;
        info!(
            host = %config.account,
            database = %config.database,
            "connected to warehouse"
        );
        Ok(Self { pool })
    }

    /// Wrap an existing pool, used by tests with their own setup
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait::async_trait]
impl Warehouse for PgWarehouse {
    #[instrument(skip(self, sql, params), fields(db.system = "postgresql"))]
    async fn execute_query(&self, sql: &str, params: &[Param]) -> Result<Vec<Row>> {
        let start = Instant::now();

        let mut query = sqlx::query(sql);
        for param in params {
            query = bind_param(query, param);
        }

        let pg_rows = match query.fetch_all(&self.pool).await {
            Ok(rows) => rows,
            Err(e) => {
                error!(error = %e, "query execution failed");
                return Err(e.into());
            }
        };

        let rows: Result<Vec<Row>> = pg_rows.iter().map(decode_row).collect();
        let rows = rows?;

        debug!(rows = rows.len(), "query executed");
        let elapsed = start.elapsed();
        if elapsed.as_millis() > 100 {
            warn!(duration_ms = elapsed.as_millis() as u64, "slow warehouse query");
        }

        Ok(rows)
    }

    #[instrument(skip(self, sql, batches), fields(db.system = "postgresql", rows = batches.len()))]
    async fn execute_batch(&self, sql: &str, batches: Vec<Vec<Param>>) -> Result<u64> {
        if batches.is_empty() {
            return Ok(0);
        }

        let mut tx = self.pool.begin().await?;
        let mut affected = 0u64;

        for params in &batches {
            let mut query = sqlx::query(sql);
            for param in params {
                query = bind_param(query, param);
            }
            match query.execute(&mut *tx).await {
                Ok(result) => affected += result.rows_affected(),
                Err(e) => {
                    error!(error = %e, "batch execution failed, rolling back");
                    tx.rollback().await?;
                    return Err(e.into());
                }
            }
        }

        tx.commit().await?;
        info!(rows = affected, "batch insert completed");
        Ok(affected)
    }

    #[instrument(skip(self, ddl), fields(db.system = "postgresql", table = %table))]
    async fn ensure_table(&self, table: &str, ddl: &str) -> Result<()> {
        match sqlx::query(ddl).execute(&self.pool).await {
            Ok(_) => {
                info!("table created or already exists");
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "failed to create table");
                Err(e.into())
            }
        }
    }

    async fn close(&self) {
        self.pool.close().await;
        info!("warehouse connection closed");
    }
}

/// Session statements applied to each pooled connection
fn session_statements(config: &WarehouseConfig) -> Result<Vec<String>> {
    let mut statements = Vec::new();
    if let Some(role) = &config.role {
        statements.push(format!("SET ROLE {}", quote_ident(role)?));
    }
    if let Some(schema) = &config.schema {
        statements.push(format!("SET search_path TO {}", quote_ident(schema)?));
    }
    Ok(statements)
}

fn bind_param<'q>(
    query: Query<'q, Postgres, PgArguments>,
    param: &Param,
) -> Query<'q, Postgres, PgArguments> {
    match param {
        Param::Text(v) => query.bind(v.clone()),
        Param::Int(v) => query.bind(*v),
        Param::Float(v) => query.bind(*v),
        Param::Bool(v) => query.bind(*v),
        Param::Timestamp(v) => query.bind(*v),
        Param::Json(v) => query.bind(v.clone()),
        Param::Null => query.bind(Option::<String>::None),
    }
}

fn decode_row(row: &PgRow) -> Result<Row> {
    let mut pairs = Vec::with_capacity(row.len());
    for (index, column) in row.columns().iter().enumerate() {
        let name = column.name().to_string();
        let value = decode_value(row, index, &name, column.type_info().name())?;
        pairs.push((name, value));
    }
    Ok(Row::from_pairs(pairs))
}

fn decode_value(row: &PgRow, index: usize, name: &str, type_name: &str) -> Result<Value> {
    let value = match type_name {
        "BOOL" => row.try_get::<Option<bool>, _>(index)?.map(Value::Bool),
        "INT2" => row
            .try_get::<Option<i16>, _>(index)?
            .map(|v| Value::from(v as i64)),
        "INT4" => row
            .try_get::<Option<i32>, _>(index)?
            .map(|v| Value::from(v as i64)),
        "INT8" => row.try_get::<Option<i64>, _>(index)?.map(Value::from),
        "FLOAT4" => row
            .try_get::<Option<f32>, _>(index)?
            .and_then(|v| float_value(v as f64)),
        "FLOAT8" => row
            .try_get::<Option<f64>, _>(index)?
            .and_then(float_value),
        "TEXT" | "VARCHAR" | "BPCHAR" | "CHAR" | "NAME" => row
            .try_get::<Option<String>, _>(index)?
            .map(Value::String),
        "TIMESTAMPTZ" => row
            .try_get::<Option<DateTime<Utc>>, _>(index)?
            .map(|v| Value::String(v.to_rfc3339())),
        "TIMESTAMP" => row
            .try_get::<Option<NaiveDateTime>, _>(index)?
            .map(|v| Value::String(Utc.from_utc_datetime(&v).to_rfc3339())),
        "DATE" => row
            .try_get::<Option<NaiveDate>, _>(index)?
            .map(|v| Value::String(v.format("%Y-%m-%d").to_string())),
        "UUID" => row
            .try_get::<Option<sqlx::types::Uuid>, _>(index)?
            .map(|v| Value::String(v.to_string())),
        "JSON" | "JSONB" => row.try_get::<Option<Value>, _>(index)?,
        _ => {
            // Unhandled types (NUMERIC, intervals, arrays) fall back to a
            // text read; anything undecodable becomes NULL rather than
            // failing the whole row.
            match row.try_get::<Option<String>, _>(index) {
                Ok(v) => v.map(Value::String),
                Err(_) => {
                    warn!(
                        column = %name,
                        column_type = %type_name,
                        "cannot decode column type, substituting NULL"
                    );
                    None
                }
            }
        }
    };
    Ok(value.unwrap_or(Value::Null))
}

fn float_value(v: f64) -> Option<Value> {
    serde_json::Number::from_f64(v).map(Value::Number)
}
