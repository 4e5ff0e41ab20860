//! Persistence layer for the load-shedding planner.
//!
//! The planner's canonical state is a single JSON document holding the line
//! fleet and the ordered shedding history. History order is preserved on
//! save and load; the usage ledger is always recomputed from it rather than
//! persisted.
//!
//! # Load contract
//!
//! - Missing document: recoverable. [`load_or_bootstrap`] falls back to the
//!   fixed default fleet with empty history.
//! - Present but unparseable or inconsistent: fatal for that load attempt.
//!   The error is distinguishable and no partial state is produced.
//!
//! # Save contract
//!
//! Documents are written to a temp file in the target directory and renamed
//! over the destination, so a reader never observes a half-written file and
//! a crash mid-save leaves the previous document intact.

mod export;

use std::collections::HashSet;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use shed_core::{Line, SheddingRecord};

pub use export::export_report;

/// Persistence errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The data file does not exist. Recoverable by bootstrapping.
    #[error("data file not found: {0}")]
    NotFound(PathBuf),

    /// An I/O failure while reading or writing the data file.
    #[error("failed to access {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The data file exists but is not valid JSON for the expected shape.
    #[error("malformed data file {path}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The data file parsed but violates an internal invariant.
    #[error("inconsistent data file {path}: {reason}")]
    Inconsistent { path: PathBuf, reason: String },
}

/// The persisted document: line fleet plus ordered shedding history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub lines: Vec<Line>,
    pub shedding_history: Vec<SheddingRecord>,
}

impl Document {
    /// Snapshots planner state into a saveable document.
    pub fn new(lines: &[Line], history: &[SheddingRecord]) -> Self {
        Self {
            lines: lines.to_vec(),
            shedding_history: history.to_vec(),
        }
    }
}

/// The fixed default document: 20 lines split evenly into two groups, no
/// history.
#[must_use]
pub fn bootstrap() -> Document {
    Document {
        lines: Line::default_fleet(),
        shedding_history: Vec::new(),
    }
}

/// Loads the document at `path`.
pub fn load(path: &Path) -> Result<Document, StoreError> {
    let contents = std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            StoreError::NotFound(path.to_path_buf())
        } else {
            StoreError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    let document: Document =
        serde_json::from_str(&contents).map_err(|source| StoreError::Malformed {
            path: path.to_path_buf(),
            source,
        })?;
    validate(&document).map_err(|reason| StoreError::Inconsistent {
        path: path.to_path_buf(),
        reason,
    })?;
    tracing::debug!(
        path = %path.display(),
        lines = document.lines.len(),
        records = document.shedding_history.len(),
        "loaded data file"
    );
    Ok(document)
}

/// Loads the document at `path`, bootstrapping the default fleet when the
/// file does not exist. Malformed or inconsistent files still fail.
pub fn load_or_bootstrap(path: &Path) -> Result<Document, StoreError> {
    match load(path) {
        Ok(document) => Ok(document),
        Err(StoreError::NotFound(_)) => {
            tracing::debug!(path = %path.display(), "data file missing, using default fleet");
            Ok(bootstrap())
        }
        Err(err) => Err(err),
    }
}

/// Saves the document to `path`, replacing any previous file atomically.
pub fn save(path: &Path, document: &Document) -> Result<(), StoreError> {
    write_json_atomic(path, document)?;
    tracing::debug!(
        path = %path.display(),
        records = document.shedding_history.len(),
        "saved data file"
    );
    Ok(())
}

/// Serializes `value` to a temp file next to `path` and renames it over the
/// destination.
pub(crate) fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    let io_err = |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = tempfile::NamedTempFile::new_in(dir).map_err(io_err)?;
    serde_json::to_writer_pretty(&mut file, value).map_err(|source| StoreError::Malformed {
        path: path.to_path_buf(),
        source,
    })?;
    file.write_all(b"\n").map_err(io_err)?;
    file.persist(path).map_err(|err| io_err(err.error))?;
    Ok(())
}

/// Checks the document's internal invariants.
fn validate(document: &Document) -> Result<(), String> {
    let mut ids = HashSet::new();
    for line in &document.lines {
        if !ids.insert(line.id) {
            return Err(format!("duplicate line id {}", line.id));
        }
        if !line.capacity_mw.is_finite() || line.capacity_mw <= 0.0 {
            return Err(format!(
                "line {} has non-positive capacity {}",
                line.id, line.capacity_mw
            ));
        }
    }
    for (index, record) in document.shedding_history.iter().enumerate() {
        if !ids.contains(&record.line_id) {
            return Err(format!(
                "history record {index} references unknown line {}",
                record.line_id
            ));
        }
        if !record.duration_hours.is_finite() || record.duration_hours < 0.0 {
            return Err(format!(
                "history record {index} has invalid duration {}",
                record.duration_hours
            ));
        }
        if !record.load_reduced_mw.is_finite() || record.load_reduced_mw < 0.0 {
            return Err(format!(
                "history record {index} has invalid reduction {}",
                record.load_reduced_mw
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use shed_core::TimeSlot;
    use tempfile::TempDir;

    fn record(line_id: u32, hours: f64) -> SheddingRecord {
        SheddingRecord {
            line_id,
            date: NaiveDate::from_ymd_opt(2025, 6, 10).unwrap(),
            time_slot: TimeSlot::Morning,
            duration_hours: hours,
            load_reduced_mw: 10.0,
        }
    }

    #[test]
    fn save_then_load_round_trips_with_history_order() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("loadshed.json");

        let mut document = bootstrap();
        document.shedding_history = vec![record(5, 2.0), record(1, 1.0), record(5, 0.5)];
        save(&path, &document).unwrap();

        let loaded = load(&path).unwrap();
        assert_eq!(loaded, document);
        let ids: Vec<u32> = loaded.shedding_history.iter().map(|r| r.line_id).collect();
        assert_eq!(ids, vec![5, 1, 5]);
    }

    #[test]
    fn load_missing_file_is_not_found() {
        let temp = TempDir::new().unwrap();
        let err = load(&temp.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[test]
    fn load_or_bootstrap_falls_back_to_default_fleet() {
        let temp = TempDir::new().unwrap();
        let document = load_or_bootstrap(&temp.path().join("nope.json")).unwrap();
        assert_eq!(document.lines.len(), 20);
        assert!(document.shedding_history.is_empty());
    }

    #[test]
    fn load_or_bootstrap_still_fails_on_malformed_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("loadshed.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = load_or_bootstrap(&path).unwrap_err();
        assert!(matches!(err, StoreError::Malformed { .. }));
    }

    #[test]
    fn duplicate_line_ids_are_inconsistent() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("loadshed.json");

        let mut document = bootstrap();
        document.lines[1].id = 1;
        std::fs::write(&path, serde_json::to_string(&document).unwrap()).unwrap();

        let err = load(&path).unwrap_err();
        assert!(matches!(err, StoreError::Inconsistent { .. }));
    }

    #[test]
    fn history_referencing_unknown_line_is_inconsistent() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("loadshed.json");

        let mut document = bootstrap();
        document.shedding_history.push(record(99, 1.0));
        std::fs::write(&path, serde_json::to_string(&document).unwrap()).unwrap();

        let err = load(&path).unwrap_err();
        assert!(matches!(err, StoreError::Inconsistent { .. }));
    }

    #[test]
    fn negative_duration_is_inconsistent() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("loadshed.json");

        let mut document = bootstrap();
        document.shedding_history.push(record(1, -1.0));
        std::fs::write(&path, serde_json::to_string(&document).unwrap()).unwrap();

        let err = load(&path).unwrap_err();
        assert!(matches!(err, StoreError::Inconsistent { .. }));
    }

    #[test]
    fn save_replaces_previous_document() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("loadshed.json");

        let mut document = bootstrap();
        save(&path, &document).unwrap();
        document.shedding_history.push(record(1, 1.0));
        save(&path, &document).unwrap();

        let loaded = load(&path).unwrap();
        assert_eq!(loaded.shedding_history.len(), 1);
        // No stray temp files left behind.
        assert_eq!(std::fs::read_dir(temp.path()).unwrap().count(), 1);
    }

    #[test]
    fn document_uses_camel_case_top_level_keys() {
        let document = bootstrap();
        let json = serde_json::to_string(&document).unwrap();
        assert!(json.contains("\"sheddingHistory\""));
        assert!(json.contains("\"lines\""));
    }
}
