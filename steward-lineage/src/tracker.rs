//! Lineage tracking over warehouse metadata
//!
//! Builds the lineage graph from two observation channels: declared view
//! dependencies out of the dependency catalog, and reconstructed edges out
//! of the query log. Both relations are configurable; the query log is
//! expected to expose `query_id`, `query_text`, `user_name`, `role_name`,
//! `status`, `query_kind`, `started_at` and `elapsed_ms`.

use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use steward_core::config::LineageConfig;
use steward_warehouse::{quote_relation, Param, Row, Warehouse};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::graph::{EdgeInfo, EdgeKind, LineageGraph};
use crate::scan::{classify_statement, scan_sources, scan_targets, QueryKind};
use crate::Result;

/// One persisted lineage observation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineageRecord {
    /// Qualified source object
    pub source: String,

    /// Qualified target object
    pub target: String,

    /// How the edge was observed
    pub kind: EdgeKind,

    /// Statement classification, for query-based edges
    pub query_kind: Option<QueryKind>,

    /// Identifier of the originating statement
    pub query_id: Option<String>,

    /// User that ran the originating statement
    pub user_name: Option<String>,

    /// Role the statement ran under
    pub role_name: Option<String>,

    /// When the originating statement started
    pub executed_at: Option<DateTime<Utc>>,

    /// Statement duration in milliseconds
    pub elapsed_ms: Option<i64>,

    /// Object domain of the source, for declared dependencies
    pub source_domain: Option<String>,

    /// When this record was extracted
    pub extracted_at: DateTime<Utc>,
}

/// Relationship of a neighbor to the queried table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Relationship {
    /// Immediate ancestor
    DirectUpstream,

    /// Immediate descendant
    DirectDownstream,
}

/// One neighbor in a lineage listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineageNeighbor {
    /// Qualified neighbor name
    pub table: String,

    /// Direction of the relationship
    pub relationship: Relationship,
}

/// Immediate ancestors of a table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamLineage {
    /// The queried table
    pub table: String,

    /// Immediate upstream neighbors
    pub ancestors: Vec<LineageNeighbor>,
}

/// Immediate descendants of a table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownstreamLineage {
    /// The queried table
    pub table: String,

    /// Immediate downstream neighbors
    pub descendants: Vec<LineageNeighbor>,
}

/// Both lineage directions for a table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullLineage {
    /// The queried table
    pub table: String,

    /// Immediate ancestors
    pub upstream: UpstreamLineage,

    /// Immediate descendants
    pub downstream: DownstreamLineage,

    /// When the lineage was read
    pub extracted_at: DateTime<Utc>,
}

/// Tracks data lineage across a warehouse
pub struct LineageTracker {
    warehouse: Arc<dyn Warehouse>,
    config: LineageConfig,
    graph: LineageGraph,
}

impl LineageTracker {
    /// Create a new tracker over a warehouse connection
    pub fn new(warehouse: Arc<dyn Warehouse>, config: LineageConfig) -> Self {
        Self {
            warehouse,
            config,
            graph: LineageGraph::new(),
        }
    }

    /// The graph accumulated so far
    pub fn graph(&self) -> &LineageGraph {
        &self.graph
    }

    /// Extract declared dependencies between views and the relations they
    /// read
    #[instrument(skip(self), fields(database = %database))]
    pub async fn extract_table_dependencies(
        &mut self,
        database: &str,
        schema: Option<&str>,
    ) -> Result<Vec<LineageRecord>> {
        let relation = quote_relation(&self.config.dependency_source)?;
        let sql = format!(
            r"SELECT vtu.table_catalog::text AS source_database,
       vtu.table_schema::text AS source_schema,
       vtu.table_name::text AS source_object,
       CASE c.relkind
            WHEN 'v' THEN 'VIEW'
            WHEN 'm' THEN 'MATERIALIZED VIEW'
            ELSE 'TABLE'
       END AS source_domain,
       vtu.view_catalog::text AS target_database,
       vtu.view_schema::text AS target_schema,
       vtu.view_name::text AS target_object
  FROM {relation} vtu
  JOIN pg_catalog.pg_namespace sn ON sn.nspname = vtu.table_schema
  JOIN pg_catalog.pg_class c ON c.relnamespace = sn.oid AND c.relname = vtu.table_name
 WHERE vtu.view_catalog = $1
   AND ($2::text IS NULL OR vtu.view_schema = $2)
 ORDER BY vtu.view_schema, vtu.view_name"
        );

        let rows = self
            .warehouse
            .execute_query(&sql, &[database.into(), schema.into()])
            .await?;

        let extracted_at = Utc::now();
        let mut records = Vec::with_capacity(rows.len());
        for row in &rows {
            let record = dependency_from_row(row, extracted_at)?;
            self.graph.add_edge(
                &record.source,
                &record.target,
                EdgeInfo {
                    kind: EdgeKind::Direct,
                    query_id: None,
                },
            );
            records.push(record);
        }

        info!(dependencies = records.len(), "extracted table dependencies");
        Ok(records)
    }

    /// Reconstruct lineage from recent successful mutating statements
    ///
    /// Each statement contributes the full cross-product of its scanned
    /// source and target candidates, one record and one edge per pair.
    #[instrument(skip(self), fields(days = days, limit = limit))]
    pub async fn extract_query_history(
        &mut self,
        days: i64,
        limit: i64,
    ) -> Result<Vec<LineageRecord>> {
        let end_time = Utc::now();
        let start_time = end_time - Duration::days(days);

        let relation = quote_relation(&self.config.query_history_source)?;
        let sql = format!(
            r"SELECT query_id::text AS query_id,
       query_text,
       user_name::text AS user_name,
       role_name::text AS role_name,
       started_at,
       elapsed_ms
  FROM {relation}
 WHERE started_at >= $1
   AND started_at <= $2
   AND status = 'SUCCESS'
   AND query_kind IN ('INSERT', 'CREATE_TABLE_AS_SELECT', 'MERGE', 'UPDATE')
 ORDER BY started_at DESC
 LIMIT $3"
        );

        let rows = self
            .warehouse
            .execute_query(&sql, &[start_time.into(), end_time.into(), limit.into()])
            .await?;

        let extracted_at = Utc::now();
        let mut records = Vec::new();
        for row in &rows {
            let text = row.str_opt("query_text")?.unwrap_or_default();
            let sources = scan_sources(&text);
            let targets = scan_targets(&text);
            let query_kind = classify_statement(&text);

            let query_id = row.str_opt("query_id")?;
            let user_name = row.str_opt("user_name")?;
            let role_name = row.str_opt("role_name")?;
            let executed_at = row.datetime_opt("started_at")?;
            let elapsed_ms = row.i64_opt("elapsed_ms")?;

            for target in &targets {
                for source in &sources {
                    self.graph.add_edge(
                        source,
                        target,
                        EdgeInfo {
                            kind: EdgeKind::QueryBased,
                            query_id: query_id.clone(),
                        },
                    );
                    records.push(LineageRecord {
                        source: source.clone(),
                        target: target.clone(),
                        kind: EdgeKind::QueryBased,
                        query_kind: Some(query_kind),
                        query_id: query_id.clone(),
                        user_name: user_name.clone(),
                        role_name: role_name.clone(),
                        executed_at,
                        elapsed_ms,
                        source_domain: None,
                        extracted_at,
                    });
                }
            }
        }

        info!(records = records.len(), statements = rows.len(), "extracted query history lineage");
        Ok(records)
    }

    /// Immediate ancestors of a table
    pub fn upstream_lineage(&self, table: &str) -> UpstreamLineage {
        let ancestors = self
            .graph
            .upstream(table)
            .into_iter()
            .map(|table| LineageNeighbor {
                table,
                relationship: Relationship::DirectUpstream,
            })
            .collect();
        UpstreamLineage {
            table: table.to_string(),
            ancestors,
        }
    }

    /// Immediate descendants of a table
    pub fn downstream_lineage(&self, table: &str) -> DownstreamLineage {
        let descendants = self
            .graph
            .downstream(table)
            .into_iter()
            .map(|table| LineageNeighbor {
                table,
                relationship: Relationship::DirectDownstream,
            })
            .collect();
        DownstreamLineage {
            table: table.to_string(),
            descendants,
        }
    }

    /// Both lineage directions for a table
    pub fn full_lineage(&self, table: &str) -> FullLineage {
        FullLineage {
            table: table.to_string(),
            upstream: self.upstream_lineage(table),
            downstream: self.downstream_lineage(table),
            extracted_at: Utc::now(),
        }
    }

    /// Persist lineage records, one batched insert
    #[instrument(skip(self, records), fields(records = records.len(), table = %table))]
    pub async fn save_lineage(&self, records: &[LineageRecord], table: &str) -> Result<u64> {
        let relation = quote_relation(table)?;
        self.warehouse
            .ensure_table(table, &lineage_ddl(&relation))
            .await?;

        let insert = format!(
            r"INSERT INTO {relation}
    (lineage_id, source_table, target_table, lineage_type, query_id, user_name, executed_at, lineage_json, extracted_at)
VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)"
        );

        let batches = records
            .iter()
            .map(lineage_row)
            .collect::<Result<Vec<_>>>()?;
        let saved = self.warehouse.execute_batch(&insert, batches).await?;

        info!(records = saved, "saved lineage records");
        Ok(saved)
    }

    /// Write the graph snapshot to a JSON file
    #[instrument(skip(self), fields(path = %path.display()))]
    pub fn export_graph(&self, path: &Path) -> Result<()> {
        let export = self.graph.export();
        let json = serde_json::to_string_pretty(&export)?;
        std::fs::write(path, json)?;

        info!(
            nodes = export.nodes.len(),
            edges = export.edges.len(),
            "exported lineage graph"
        );
        Ok(())
    }
}

fn dependency_from_row(row: &Row, extracted_at: DateTime<Utc>) -> Result<LineageRecord> {
    let source = format!(
        "{}.{}.{}",
        row.str_req("source_database")?,
        row.str_req("source_schema")?,
        row.str_req("source_object")?
    );
    let target = format!(
        "{}.{}.{}",
        row.str_req("target_database")?,
        row.str_req("target_schema")?,
        row.str_req("target_object")?
    );

    Ok(LineageRecord {
        source,
        target,
        kind: EdgeKind::Direct,
        query_kind: None,
        query_id: None,
        user_name: None,
        role_name: None,
        executed_at: None,
        elapsed_ms: None,
        source_domain: row.str_opt("source_domain")?,
        extracted_at,
    })
}

fn lineage_ddl(relation: &str) -> String {
    format!(
        r"CREATE TABLE IF NOT EXISTS {relation} (
    lineage_id VARCHAR NOT NULL,
    source_table VARCHAR NOT NULL,
    target_table VARCHAR NOT NULL,
    lineage_type VARCHAR NOT NULL,
    query_id VARCHAR,
    user_name VARCHAR,
    executed_at TIMESTAMPTZ,
    lineage_json JSONB NOT NULL,
    extracted_at TIMESTAMPTZ NOT NULL,
    PRIMARY KEY (lineage_id)
)"
    )
}

fn lineage_row(record: &LineageRecord) -> Result<Vec<Param>> {
    Ok(vec![
        Uuid::new_v4().to_string().into(),
        record.source.as_str().into(),
        record.target.as_str().into(),
        record.kind.as_str().into(),
        record.query_id.clone().into(),
        record.user_name.clone().into(),
        record.executed_at.into(),
        serde_json::to_value(record)?.into(),
        record.extracted_at.into(),
    ])
}
