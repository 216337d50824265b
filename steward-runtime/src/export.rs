//! Timestamped JSON exports
//!
//! Each pipeline stage can dump its output as a pretty-printed JSON file
//! named `<prefix>_<YYYYmmdd_HHMMSS>.json` under the configured export
//! directory.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::Serialize;
use tracing::info;

use crate::Result;

/// Build the export file path for a stage, creating the directory
pub fn timestamped_path(dir: &Path, prefix: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let stamp = Utc::now().format("%Y%m%d_%H%M%S");
    Ok(dir.join(format!("{prefix}_{stamp}.json")))
}

/// Write a value as pretty-printed JSON
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    info!(path = %path.display(), "wrote json export");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_timestamped_path_shape() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("exports");

        let path = timestamped_path(&nested, "dq_report").unwrap();
        assert!(nested.is_dir());

        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("dq_report_"));
        assert!(name.ends_with(".json"));
    }

    #[test]
    fn test_write_json_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");

        write_json(&path, &json!({"edges": 2})).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&contents).unwrap();
        assert_eq!(value["edges"], 2);
    }
}
