//! JSONL loading shared by the file-backed stores

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::warn;

use crate::error::RelationResult;

/// Read one record per line from `path`.
///
/// A missing file reads as empty; blank lines are ignored and unreadable
/// lines are skipped with a warning.
pub fn read_jsonl<T: DeserializeOwned>(path: &Path) -> RelationResult<Vec<T>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let content = fs::read_to_string(path)?;
    let mut records = Vec::new();

    for (line_no, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match serde_json::from_str::<T>(line) {
            Ok(record) => records.push(record),
            Err(e) => warn!(
                path = %path.display(),
                line = line_no + 1,
                error = %e,
                "Skipping unreadable record"
            ),
        }
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_reads_empty() {
        let dir = TempDir::new().unwrap();
        let records: Vec<serde_json::Value> = read_jsonl(&dir.path().join("none.jsonl")).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_skips_blank_and_bad_lines() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("records.jsonl");
        fs::write(&path, "{\"a\":1}\n\n{oops\n{\"a\":2}\n").unwrap();

        let records: Vec<serde_json::Value> = read_jsonl(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1]["a"], 2);
    }
}
