//! Metadata extraction from warehouse system catalogs
//!
//! Walks databases, schemas, tables and columns through the introspection
//! views of a PostgreSQL-family warehouse and assembles typed records.
//! Extraction of a full catalog tolerates per-database failures; everything
//! inside one database is all-or-nothing.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use steward_core::catalog::{
    CatalogEntryKind, ColumnRecord, DatabaseRecord, MetadataCatalog, SchemaRecord, TableRecord,
    TableStatistics,
};
use steward_warehouse::{quote_path, quote_relation, Param, Row, Warehouse};
use tracing::{error, info, instrument, warn};

use crate::{Error, Result};

const DATABASE_QUERY: &str = r"
SELECT d.datname::text AS database_name,
       pg_catalog.pg_get_userbyid(d.datdba)::text AS owner,
       pg_catalog.shobj_description(d.oid, 'pg_database') AS comment
  FROM pg_catalog.pg_database d
 WHERE d.datname = $1";

const SCHEMAS_QUERY: &str = r"
SELECT current_database()::text AS database_name,
       n.nspname::text AS schema_name,
       pg_catalog.pg_get_userbyid(n.nspowner)::text AS owner,
       pg_catalog.obj_description(n.oid, 'pg_namespace') AS comment
  FROM pg_catalog.pg_namespace n
 WHERE current_database() = $1
   AND n.nspname NOT LIKE 'pg\_%'
   AND n.nspname <> 'information_schema'
   AND ($2::text IS NULL OR n.nspname = $2)
 ORDER BY n.nspname";

const TABLES_QUERY: &str = r"
SELECT t.table_catalog::text AS database_name,
       t.table_schema::text AS schema_name,
       t.table_name::text AS table_name,
       t.table_type::text AS table_kind,
       CASE WHEN c.reltuples >= 0 THEN c.reltuples::bigint END AS row_count,
       CASE WHEN c.relkind IN ('r', 'm', 'p', 't')
            THEN pg_total_relation_size(c.oid) END AS size_bytes,
       pg_catalog.pg_get_userbyid(c.relowner)::text AS owner,
       pg_catalog.obj_description(c.oid, 'pg_class') AS comment,
       (SELECT i.relname::text
          FROM pg_catalog.pg_index x
          JOIN pg_catalog.pg_class i ON i.oid = x.indexrelid
         WHERE x.indrelid = c.oid
           AND x.indisclustered) AS clustering_key
  FROM information_schema.tables t
  JOIN pg_catalog.pg_namespace n ON n.nspname = t.table_schema
  JOIN pg_catalog.pg_class c ON c.relnamespace = n.oid AND c.relname = t.table_name
 WHERE t.table_catalog = $1
   AND t.table_schema NOT IN ('pg_catalog', 'information_schema')
   AND ($2::text IS NULL OR t.table_schema = $2)
 ORDER BY t.table_schema, t.table_name";

const COLUMNS_QUERY: &str = r"
SELECT c.column_name::text AS column_name,
       c.data_type::text AS data_type,
       c.is_nullable::text AS is_nullable,
       c.column_default::text AS default_value,
       pg_catalog.col_description(cl.oid, c.ordinal_position::int) AS comment,
       EXISTS (SELECT 1
                 FROM information_schema.table_constraints tc
                 JOIN information_schema.key_column_usage kcu
                   ON kcu.constraint_name = tc.constraint_name
                  AND kcu.constraint_schema = tc.constraint_schema
                WHERE tc.table_schema = c.table_schema
                  AND tc.table_name = c.table_name
                  AND kcu.column_name = c.column_name
                  AND tc.constraint_type = 'PRIMARY KEY') AS primary_key,
       EXISTS (SELECT 1
                 FROM information_schema.table_constraints tc
                 JOIN information_schema.key_column_usage kcu
                   ON kcu.constraint_name = tc.constraint_name
                  AND kcu.constraint_schema = tc.constraint_schema
                WHERE tc.table_schema = c.table_schema
                  AND tc.table_name = c.table_name
                  AND kcu.column_name = c.column_name
                  AND tc.constraint_type = 'UNIQUE') AS unique_key
  FROM information_schema.columns c
  JOIN pg_catalog.pg_namespace n ON n.nspname = c.table_schema
  JOIN pg_catalog.pg_class cl ON cl.relnamespace = n.oid AND cl.relname = c.table_name
 WHERE c.table_catalog = $1
   AND c.table_schema = $2
   AND c.table_name = $3
 ORDER BY c.ordinal_position";

/// Extracts metadata from warehouse objects
pub struct MetadataExtractor {
    warehouse: Arc<dyn Warehouse>,
}

impl MetadataExtractor {
    /// Create a new extractor over a warehouse connection
    pub fn new(warehouse: Arc<dyn Warehouse>) -> Self {
        Self { warehouse }
    }

    /// Extract metadata for a single database
    #[instrument(skip(self), fields(database = %database))]
    pub async fn extract_database(&self, database: &str) -> Result<DatabaseRecord> {
        let rows = self
            .warehouse
            .execute_query(DATABASE_QUERY, &[database.into()])
            .await?;

        let row = rows
            .first()
            .ok_or_else(|| Error::DatabaseNotFound(database.to_string()))?;
        let record = database_from_row(row, Utc::now())?;

        info!("extracted database metadata");
        Ok(record)
    }

    /// Extract metadata for schemas in a database, optionally one schema
    #[instrument(skip(self), fields(database = %database))]
    pub async fn extract_schemas(
        &self,
        database: &str,
        schema: Option<&str>,
    ) -> Result<Vec<SchemaRecord>> {
        let rows = self
            .warehouse
            .execute_query(SCHEMAS_QUERY, &[database.into(), schema.into()])
            .await?;

        let extracted_at = Utc::now();
        let schemas = rows
            .iter()
            .map(|row| schema_from_row(row, extracted_at))
            .collect::<Result<Vec<_>>>()?;

        info!(schemas = schemas.len(), "extracted schema metadata");
        Ok(schemas)
    }

    /// Extract metadata for tables in a database, optionally one schema
    #[instrument(skip(self), fields(database = %database))]
    pub async fn extract_tables(
        &self,
        database: &str,
        schema: Option<&str>,
    ) -> Result<Vec<TableRecord>> {
        let rows = self
            .warehouse
            .execute_query(TABLES_QUERY, &[database.into(), schema.into()])
            .await?;

        let extracted_at = Utc::now();
        let tables = rows
            .iter()
            .map(|row| table_from_row(row, extracted_at))
            .collect::<Result<Vec<_>>>()?;

        info!(tables = tables.len(), "extracted table metadata");
        Ok(tables)
    }

    /// Extract metadata for the columns of a table
    #[instrument(skip(self), fields(database = %database, table = %table))]
    pub async fn extract_columns(
        &self,
        database: &str,
        schema: &str,
        table: &str,
    ) -> Result<Vec<ColumnRecord>> {
        let rows = self
            .warehouse
            .execute_query(
                COLUMNS_QUERY,
                &[database.into(), schema.into(), table.into()],
            )
            .await?;

        let extracted_at = Utc::now();
        let columns = rows
            .iter()
            .map(|row| column_from_row(row, database, schema, table, extracted_at))
            .collect::<Result<Vec<_>>>()?;

        info!(columns = columns.len(), "extracted column metadata");
        Ok(columns)
    }

    /// Extract row-level statistics for a table
    ///
    /// Statistics are best-effort: a failing count query (for instance over
    /// a row type with no equality operator) logs a warning and yields
    /// `None` instead of aborting the catalog pass.
    #[instrument(skip(self), fields(database = %database, table = %table))]
    pub async fn extract_table_statistics(
        &self,
        database: &str,
        schema: &str,
        table: &str,
    ) -> Result<Option<TableStatistics>> {
        let relation = quote_path(&[schema, table])?;
        let sql = format!(
            "SELECT COUNT(*) AS row_count, COUNT(DISTINCT t) AS distinct_rows FROM {relation} t"
        );

        let rows = match self.warehouse.execute_query(&sql, &[]).await {
            Ok(rows) => rows,
            Err(e) => {
                warn!(error = %e, "failed to extract table statistics");
                return Ok(None);
            }
        };

        let row = match rows.first() {
            Some(row) => row,
            None => return Ok(None),
        };

        let statistics = TableStatistics {
            database: database.to_string(),
            schema: schema.to_string(),
            table: table.to_string(),
            row_count: row.i64_req("row_count")?,
            distinct_rows: row.i64_opt("distinct_rows")?,
            extracted_at: Utc::now(),
        };

        info!("extracted table statistics");
        Ok(Some(statistics))
    }

    /// Extract the complete catalog for the given databases
    ///
    /// A database that fails to extract is logged and skipped; the remaining
    /// databases are still processed.
    #[instrument(skip(self, databases), fields(databases = databases.len()))]
    pub async fn extract_full(&self, databases: &[String]) -> MetadataCatalog {
        let mut catalog = MetadataCatalog::new();

        for database in databases {
            match self.collect_database(database, &mut catalog).await {
                Ok(()) => {
                    info!(database = %database, "completed metadata extraction");
                }
                Err(e) => {
                    error!(database = %database, error = %e, "metadata extraction failed, skipping database");
                }
            }
        }

        catalog
    }

    async fn collect_database(&self, database: &str, catalog: &mut MetadataCatalog) -> Result<()> {
        let record = self.extract_database(database).await?;
        catalog.databases.push(record);

        let schemas = self.extract_schemas(database, None).await?;
        catalog.schemas.extend(schemas);

        let tables = self.extract_tables(database, None).await?;
        for table in &tables {
            let columns = self
                .extract_columns(database, &table.schema, &table.name)
                .await?;
            catalog.columns.extend(columns);
        }
        catalog.tables.extend(tables);

        Ok(())
    }

    /// Persist a catalog to the warehouse, one batched insert per section
    #[instrument(skip(self, catalog), fields(entries = catalog.entry_count(), table = %table))]
    pub async fn save_catalog(&self, catalog: &MetadataCatalog, table: &str) -> Result<u64> {
        let relation = quote_relation(table)?;
        self.warehouse
            .ensure_table(table, &catalog_ddl(&relation))
            .await?;

        let insert = insert_sql(&relation);
        let mut saved = 0;
        saved += self
            .warehouse
            .execute_batch(&insert, database_rows(&catalog.databases)?)
            .await?;
        saved += self
            .warehouse
            .execute_batch(&insert, schema_rows(&catalog.schemas)?)
            .await?;
        saved += self
            .warehouse
            .execute_batch(&insert, table_rows(&catalog.tables)?)
            .await?;
        saved += self
            .warehouse
            .execute_batch(&insert, column_rows(&catalog.columns)?)
            .await?;

        info!(records = saved, "saved metadata catalog");
        Ok(saved)
    }
}

fn catalog_ddl(relation: &str) -> String {
    format!(
        r"CREATE TABLE IF NOT EXISTS {relation} (
    entry_kind VARCHAR NOT NULL,
    database_name VARCHAR NOT NULL,
    schema_name VARCHAR NOT NULL DEFAULT '',
    object_name VARCHAR NOT NULL,
    entry_json JSONB NOT NULL,
    extracted_at TIMESTAMPTZ NOT NULL,
    PRIMARY KEY (entry_kind, database_name, schema_name, object_name, extracted_at)
)"
    )
}

fn insert_sql(relation: &str) -> String {
    format!(
        r"INSERT INTO {relation}
    (entry_kind, database_name, schema_name, object_name, entry_json, extracted_at)
VALUES ($1, $2, $3, $4, $5, $6)"
    )
}

fn database_rows(records: &[DatabaseRecord]) -> Result<Vec<Vec<Param>>> {
    records
        .iter()
        .map(|record| {
            Ok(vec![
                CatalogEntryKind::Database.as_str().into(),
                record.name.as_str().into(),
                // Database entries sit above any schema; the key column is
                // non-null, so they store an empty schema name.
                Param::Text(String::new()),
                record.name.as_str().into(),
                serde_json::to_value(record)?.into(),
                record.extracted_at.into(),
            ])
        })
        .collect()
}

fn schema_rows(records: &[SchemaRecord]) -> Result<Vec<Vec<Param>>> {
    records
        .iter()
        .map(|record| {
            Ok(vec![
                CatalogEntryKind::Schema.as_str().into(),
                record.database.as_str().into(),
                record.name.as_str().into(),
                record.name.as_str().into(),
                serde_json::to_value(record)?.into(),
                record.extracted_at.into(),
            ])
        })
        .collect()
}

fn table_rows(records: &[TableRecord]) -> Result<Vec<Vec<Param>>> {
    records
        .iter()
        .map(|record| {
            Ok(vec![
                CatalogEntryKind::Table.as_str().into(),
                record.database.as_str().into(),
                record.schema.as_str().into(),
                record.name.as_str().into(),
                serde_json::to_value(record)?.into(),
                record.extracted_at.into(),
            ])
        })
        .collect()
}

fn column_rows(records: &[ColumnRecord]) -> Result<Vec<Vec<Param>>> {
    records
        .iter()
        .map(|record| {
            Ok(vec![
                CatalogEntryKind::Column.as_str().into(),
                record.database.as_str().into(),
                record.schema.as_str().into(),
                record.entry_name().into(),
                serde_json::to_value(record)?.into(),
                record.extracted_at.into(),
            ])
        })
        .collect()
}

fn opt_i64(row: &Row, column: &str) -> Result<Option<i64>> {
    if row.contains(column) {
        Ok(row.i64_opt(column)?)
    } else {
        Ok(None)
    }
}

fn opt_datetime(row: &Row, column: &str) -> Result<Option<DateTime<Utc>>> {
    if row.contains(column) {
        Ok(row.datetime_opt(column)?)
    } else {
        Ok(None)
    }
}

fn database_from_row(row: &Row, extracted_at: DateTime<Utc>) -> Result<DatabaseRecord> {
    Ok(DatabaseRecord {
        name: row.str_req("database_name")?,
        owner: row.str_opt("owner")?,
        comment: row.str_opt("comment")?,
        retention_days: opt_i64(row, "retention_days")?,
        created_on: opt_datetime(row, "created_on")?,
        extracted_at,
    })
}

fn schema_from_row(row: &Row, extracted_at: DateTime<Utc>) -> Result<SchemaRecord> {
    Ok(SchemaRecord {
        database: row.str_req("database_name")?,
        name: row.str_req("schema_name")?,
        owner: row.str_opt("owner")?,
        comment: row.str_opt("comment")?,
        created_on: opt_datetime(row, "created_on")?,
        extracted_at,
    })
}

fn table_from_row(row: &Row, extracted_at: DateTime<Utc>) -> Result<TableRecord> {
    Ok(TableRecord {
        database: row.str_req("database_name")?,
        schema: row.str_req("schema_name")?,
        name: row.str_req("table_name")?,
        table_kind: row.str_opt("table_kind")?,
        row_count: row.i64_opt("row_count")?,
        size_bytes: row.i64_opt("size_bytes")?,
        owner: row.str_opt("owner")?,
        comment: row.str_opt("comment")?,
        clustering_key: row.str_opt("clustering_key")?,
        created_on: opt_datetime(row, "created_on")?,
        extracted_at,
    })
}

fn column_from_row(
    row: &Row,
    database: &str,
    schema: &str,
    table: &str,
    extracted_at: DateTime<Utc>,
) -> Result<ColumnRecord> {
    Ok(ColumnRecord {
        database: database.to_string(),
        schema: schema.to_string(),
        table: table.to_string(),
        name: row.str_req("column_name")?,
        data_type: row.str_req("data_type")?,
        nullable: row.str_req("is_nullable")? == "YES",
        default_value: row.str_opt("default_value")?,
        primary_key: row.bool_req("primary_key")?,
        unique_key: row.bool_req("unique_key")?,
        comment: row.str_opt("comment")?,
        extracted_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use serde_json::json;

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

    fn database_row() -> Row {
        Row::from_pairs(vec![
            ("database_name".to_string(), json!("analytics")),
            ("owner".to_string(), json!("dba")),
            ("comment".to_string(), json!(null)),
        ])
    }

    #[tokio::test]
    async fn test_extract_database_maps_fields() {
        let warehouse = Arc::new(ScriptedWarehouse::default().respond(Ok(vec![database_row()])));
        let extractor = MetadataExtractor::new(warehouse.clone());

        let record = extractor.extract_database("analytics").await.unwrap();
        assert_eq!(record.name, "analytics");
        assert_eq!(record.owner.as_deref(), Some("dba"));
        assert!(record.comment.is_none());
        assert!(record.created_on.is_none());

        let queries = warehouse.queries.lock().unwrap();
        assert_eq!(queries.len(), 1);
        assert_eq!(queries[0].1, vec![Param::Text("analytics".to_string())]);
    }

    #[tokio::test]
    async fn test_extract_database_missing_is_error() {
        let warehouse = Arc::new(ScriptedWarehouse::default().respond(Ok(Vec::new())));
        let extractor = MetadataExtractor::new(warehouse);

        let err = extractor.extract_database("absent").await.unwrap_err();
        assert!(matches!(err, Error::DatabaseNotFound(name) if name == "absent"));
    }

    #[tokio::test]
    async fn test_extract_schemas_binds_filter() {
        let row = Row::from_pairs(vec![
            ("database_name".to_string(), json!("analytics")),
            ("schema_name".to_string(), json!("public")),
            ("owner".to_string(), json!("dba")),
            ("comment".to_string(), json!("main schema")),
        ]);
        let warehouse = Arc::new(ScriptedWarehouse::default().respond(Ok(vec![row])));
        let extractor = MetadataExtractor::new(warehouse.clone());

        let schemas = extractor
            .extract_schemas("analytics", Some("public"))
            .await
            .unwrap();
        assert_eq!(schemas.len(), 1);
        assert_eq!(schemas[0].name, "public");
        assert_eq!(schemas[0].comment.as_deref(), Some("main schema"));

        let queries = warehouse.queries.lock().unwrap();
        assert_eq!(
            queries[0].1,
            vec![
                Param::Text("analytics".to_string()),
                Param::Text("public".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_extract_columns_maps_flags() {
        let row = Row::from_pairs(vec![
            ("column_name".to_string(), json!("order_id")),
            ("data_type".to_string(), json!("bigint")),
            ("is_nullable".to_string(), json!("NO")),
            ("default_value".to_string(), json!(null)),
            ("comment".to_string(), json!(null)),
            ("primary_key".to_string(), json!(true)),
            ("unique_key".to_string(), json!(false)),
        ]);
        let warehouse = Arc::new(ScriptedWarehouse::default().respond(Ok(vec![row])));
        let extractor = MetadataExtractor::new(warehouse);

        let columns = extractor
            .extract_columns("analytics", "public", "orders")
            .await
            .unwrap();
        assert_eq!(columns.len(), 1);
        let column = &columns[0];
        assert_eq!(column.name, "order_id");
        assert!(!column.nullable);
        assert!(column.primary_key);
        assert!(!column.unique_key);
        assert_eq!(column.entry_name(), "orders.order_id");
    }

    #[tokio::test]
    async fn test_extract_statistics_failure_yields_none() {
        let warehouse = Arc::new(ScriptedWarehouse::default().respond(Err(
            steward_warehouse::Error::Connection("timeout".to_string()),
        )));
        let extractor = MetadataExtractor::new(warehouse);

        let statistics = extractor
            .extract_table_statistics("analytics", "public", "orders")
            .await
            .unwrap();
        assert!(statistics.is_none());
    }

    #[tokio::test]
    async fn test_extract_statistics_maps_counts() {
        let row = Row::from_pairs(vec![
            ("row_count".to_string(), json!(100)),
            ("distinct_rows".to_string(), json!(97)),
        ]);
        let warehouse = Arc::new(ScriptedWarehouse::default().respond(Ok(vec![row])));
        let extractor = MetadataExtractor::new(warehouse.clone());

        let statistics = extractor
            .extract_table_statistics("analytics", "public", "orders")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(statistics.row_count, 100);
        assert_eq!(statistics.distinct_rows, Some(97));

        let queries = warehouse.queries.lock().unwrap();
        assert!(queries[0].0.contains("FROM public.orders"));
    }

    #[tokio::test]
    async fn test_extract_full_skips_failed_database() {
        let warehouse = Arc::new(
            ScriptedWarehouse::default()
                .respond(Err(steward_warehouse::Error::Connection(
                    "refused".to_string(),
                )))
                .respond(Ok(vec![database_row()]))
                .respond(Ok(Vec::new()))
                .respond(Ok(Vec::new())),
        );
        let extractor = MetadataExtractor::new(warehouse);

        let catalog = extractor
            .extract_full(&["broken".to_string(), "analytics".to_string()])
            .await;

        assert_eq!(catalog.databases.len(), 1);
        assert_eq!(catalog.databases[0].name, "analytics");
        assert!(catalog.schemas.is_empty());
        assert!(catalog.tables.is_empty());
    }

    #[tokio::test]
    async fn test_save_catalog_sections_in_order() {
        let now = Utc::now();
        let mut catalog = MetadataCatalog::new();
        catalog.databases.push(DatabaseRecord {
            name: "analytics".to_string(),
            owner: None,
            comment: None,
            retention_days: None,
            created_on: None,
            extracted_at: now,
        });
        catalog.schemas.push(SchemaRecord {
            database: "analytics".to_string(),
            name: "public".to_string(),
            owner: None,
            comment: None,
            created_on: None,
            extracted_at: now,
        });
        catalog.tables.push(TableRecord {
            database: "analytics".to_string(),
            schema: "public".to_string(),
            name: "orders".to_string(),
            table_kind: Some("BASE TABLE".to_string()),
            row_count: Some(10),
            size_bytes: None,
            owner: None,
            comment: None,
            clustering_key: None,
            created_on: None,
            extracted_at: now,
        });
        catalog.columns.push(ColumnRecord {
            database: "analytics".to_string(),
            schema: "public".to_string(),
            table: "orders".to_string(),
            name: "order_id".to_string(),
            data_type: "bigint".to_string(),
            nullable: false,
            default_value: None,
            primary_key: true,
            unique_key: false,
            comment: None,
            extracted_at: now,
        });

        let warehouse = Arc::new(ScriptedWarehouse::default());
        let extractor = MetadataExtractor::new(warehouse.clone());

        let saved = extractor
            .save_catalog(&catalog, "governance.metadata_catalog")
            .await
            .unwrap();
        assert_eq!(saved, 4);

        let tables = warehouse.tables.lock().unwrap();
        assert_eq!(tables.as_slice(), ["governance.metadata_catalog"]);

        let batches = warehouse.batches.lock().unwrap();
        assert_eq!(batches.len(), 4);
        assert!(batches[0].0.contains("INSERT INTO governance.metadata_catalog"));
        assert_eq!(batches[0].1[0][0], Param::Text("DATABASE".to_string()));
        assert_eq!(batches[1].1[0][0], Param::Text("SCHEMA".to_string()));
        assert_eq!(batches[2].1[0][0], Param::Text("TABLE".to_string()));
        assert_eq!(batches[3].1[0][0], Param::Text("COLUMN".to_string()));
        assert_eq!(
            batches[3].1[0][3],
            Param::Text("orders.order_id".to_string())
        );
    }
}
