//! Loading record snapshots from disk.
//!
//! The snapshot file stands in for the kennel's record store: a single JSON
//! document with `dogs`, `litters` and `studJobs` arrays.

use std::path::Path;

use anyhow::{Context, Result};
use kennel_core::KennelSnapshot;

/// Reads and parses a snapshot file.
pub fn load_snapshot(path: &Path) -> Result<KennelSnapshot> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read snapshot {}", path.display()))?;
    let snapshot: KennelSnapshot = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse snapshot {}", path.display()))?;

    tracing::debug!(
        path = %path.display(),
        dogs = snapshot.dogs.len(),
        litters = snapshot.litters.len(),
        stud_jobs = snapshot.stud_jobs.len(),
        "loaded snapshot"
    );

    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn loads_valid_snapshot() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"dogs": [{{"id": "luna", "name": "Luna", "sex": "female"}}]}}"#
        )
        .unwrap();

        let snapshot = load_snapshot(file.path()).unwrap();
        assert_eq!(snapshot.dogs.len(), 1);
        assert!(snapshot.litters.is_empty());
    }

    #[test]
    fn missing_file_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.json");
        let err = load_snapshot(&path).unwrap_err();
        assert!(err.to_string().contains("failed to read snapshot"));
        assert!(err.to_string().contains("nope.json"));
    }

    #[test]
    fn malformed_snapshot_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"dogs": [{{"id": "", "name": "x", "sex": "female"}}]}}"#).unwrap();
        let err = load_snapshot(file.path()).unwrap_err();
        assert!(err.to_string().contains("failed to parse snapshot"));
    }
}
