//! Atomic file operations
//!
//! Writes go to a `.tmp` sibling first, are synced, then renamed over the
//! destination, so a reader sees either the old file or the new one.

use std::fs::{self, File};
use std::io;
use std::path::Path;

/// Atomically write content using a writer function
///
/// # Example
///
/// ```ignore
/// atomic_write_with("data/relations.jsonl", |file| {
///     writeln!(file, "line1")?;
///     Ok(())
/// })?;
/// ```
pub fn atomic_write_with<P, F>(path: P, write_fn: F) -> io::Result<()>
where
    P: AsRef<Path>,
    F: FnOnce(&mut File) -> io::Result<()>,
{
    let path = path.as_ref();
    let temp_path = path.with_extension("tmp");

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut file = File::create(&temp_path)?;
    write_fn(&mut file)?;
    file.sync_all()?;

    fs::rename(&temp_path, path)?;

    Ok(())
}

/// Remove `.tmp` files left behind by an interrupted write.
///
/// Call this on startup before loading data files.
pub fn cleanup_temp_files<P: AsRef<Path>>(dir: P) -> io::Result<usize> {
    let dir = dir.as_ref();
    let mut cleaned = 0;

    if !dir.exists() {
        return Ok(0);
    }

    for entry in fs::read_dir(dir)? {
        let path = entry?.path();

        if path.extension().map(|e| e == "tmp").unwrap_or(false) {
            fs::remove_file(&path)?;
            cleaned += 1;
        }
    }

    Ok(cleaned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_atomic_write_with() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("relations.jsonl");

        atomic_write_with(&path, |file| {
            writeln!(file, "Line 1")?;
            writeln!(file, "Line 2")?;
            Ok(())
        })
        .unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "Line 1\nLine 2\n");
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn test_atomic_write_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("relations.jsonl");

        atomic_write_with(&path, |file| file.write_all(b"{}\n")).unwrap();

        assert!(path.exists());
    }

    #[test]
    fn test_failed_write_keeps_old_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("relations.jsonl");
        fs::write(&path, "old\n").unwrap();

        let result = atomic_write_with(&path, |_| Err(io::Error::other("disk full")));

        assert!(result.is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "old\n");
    }

    #[test]
    fn test_cleanup_temp_files() {
        let temp_dir = TempDir::new().unwrap();

        fs::write(temp_dir.path().join("relations.tmp"), "partial").unwrap();
        fs::write(temp_dir.path().join("relations.jsonl"), "keep").unwrap();

        let cleaned = cleanup_temp_files(temp_dir.path()).unwrap();
        assert_eq!(cleaned, 1);
        assert!(temp_dir.path().join("relations.jsonl").exists());
    }
}
