//! CLI command implementations

pub mod catalog;
pub mod lineage;
pub mod quality;
pub mod run;
