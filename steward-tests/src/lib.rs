//! # Steward Tests
//!
//! Shared test utilities for the Steward workspace:
//!
//! - **stub**: a scriptable in-memory `Warehouse` with substring-keyed
//!   canned responses, induced failures, and a full execution ledger
//! - **fixtures**: canned introspection rows shaped like the queries the
//!   metadata and lineage extractors run
//!
//! Everything runs without a live database, so the end-to-end tests under
//! `tests/` exercise the real pipeline stages against scripted data.

pub mod fixtures;
pub mod stub;

pub use stub::{RecordedBatch, RecordedQuery, StubWarehouse};
