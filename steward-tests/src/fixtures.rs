//! Canned warehouse rows
//!
//! Factories shaped like the introspection queries the extractors run, so
//! pipeline tests can script a small but structurally faithful warehouse.

use serde_json::Value;
use steward_warehouse::Row;

/// Build a [`Row`] from `(column, value)` pairs.
pub fn row(pairs: Vec<(&str, Value)>) -> Row {
    Row::from_pairs(pairs.into_iter().map(|(k, v)| (k.to_string(), v)))
}

pub mod rows {
    use serde_json::json;
    use steward_warehouse::Row;

    use super::row;

    /// One database introspection row.
    pub fn database(name: &str) -> Row {
        row(vec![
            ("database_name", json!(name)),
            ("owner", json!("governor")),
            ("comment", json!(null)),
            ("retention_days", json!(null)),
            ("created_on", json!("2026-01-15T09:00:00Z")),
        ])
    }

    /// One schema introspection row.
    pub fn schema(database: &str, name: &str) -> Row {
        row(vec![
            ("database_name", json!(database)),
            ("schema_name", json!(name)),
            ("owner", json!("governor")),
            ("comment", json!(null)),
            ("created_on", json!("2026-01-15T09:00:00Z")),
        ])
    }

    /// One table introspection row.
    pub fn table(database: &str, schema: &str, name: &str) -> Row {
        row(vec![
            ("database_name", json!(database)),
            ("schema_name", json!(schema)),
            ("table_name", json!(name)),
            ("table_kind", json!("BASE TABLE")),
            ("row_count", json!(1000)),
            ("size_bytes", json!(65536)),
            ("owner", json!("governor")),
            ("comment", json!(null)),
            ("clustering_key", json!(null)),
            ("created_on", json!("2026-02-01T12:30:00Z")),
        ])
    }

    /// One column introspection row.
    pub fn column(name: &str, data_type: &str) -> Row {
        row(vec![
            ("column_name", json!(name)),
            ("data_type", json!(data_type)),
            ("is_nullable", json!("NO")),
            ("default_value", json!(null)),
            ("primary_key", json!(false)),
            ("unique_key", json!(false)),
            ("comment", json!(null)),
        ])
    }

    /// One declared view-to-table dependency row, `(database, schema, object)`
    /// tuples for source and target.
    pub fn dependency(source: (&str, &str, &str), target: (&str, &str, &str)) -> Row {
        row(vec![
            ("source_database", json!(source.0)),
            ("source_schema", json!(source.1)),
            ("source_object", json!(source.2)),
            ("source_domain", json!("TABLE")),
            ("target_database", json!(target.0)),
            ("target_schema", json!(target.1)),
            ("target_object", json!(target.2)),
        ])
    }

    /// One query-log row.
    pub fn query_history(query_id: &str, query_text: &str) -> Row {
        row(vec![
            ("query_id", json!(query_id)),
            ("query_text", json!(query_text)),
            ("user_name", json!("etl_service")),
            ("role_name", json!("TRANSFORMER")),
            ("started_at", json!("2026-08-20T04:15:00Z")),
            ("elapsed_ms", json!(1520)),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::rows;

    #[test]
    fn test_database_row_shape() {
        let row = rows::database("analytics");
        assert_eq!(
            row.str_opt("database_name").unwrap(),
            Some("analytics".to_string())
        );
        assert!(row.datetime_opt("created_on").unwrap().is_some());
    }

    #[test]
    fn test_dependency_row_covers_both_sides() {
        let row = rows::dependency(("db", "public", "orders"), ("db", "mart", "daily"));
        assert_eq!(row.str_opt("source_object").unwrap(), Some("orders".to_string()));
        assert_eq!(row.str_opt("target_schema").unwrap(), Some("mart".to_string()));
    }

    #[test]
    fn test_query_history_row_parses_timestamp() {
        let row = rows::query_history("q-1", "SELECT 1");
        assert!(row.datetime_opt("started_at").unwrap().is_some());
        assert_eq!(row.i64_opt("elapsed_ms").unwrap(), Some(1520));
    }
}
