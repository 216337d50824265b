//! # Steward Warehouse
//!
//! Warehouse access layer for the governance pipeline:
//! - `Warehouse` trait abstracting query execution and batch loads
//! - PostgreSQL-family adapter built on a connection pool
//! - Dynamically-typed result rows with case-insensitive access
//! - Identifier quoting for names interpolated into SQL

pub mod ident;
pub mod param;
pub mod postgres;
pub mod row;
pub mod warehouse;

pub use ident::{quote_ident, quote_object, quote_path, quote_relation};
pub use param::Param;
pub use postgres::PgWarehouse;
pub use row::Row;
pub use warehouse::Warehouse;

/// Result type for warehouse operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during warehouse operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Missing column: {0}")]
    MissingColumn(String),

    #[error("Column {column} has unexpected type, expected {expected}")]
    ColumnType { column: String, expected: String },

    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),
}
