//! Run directory file contract
//!
//! One directory per pipeline run holds:
//! - `<feature_type>_features.json`: raw records per feature type (review id -> record)
//! - `final_features.json`: the consolidated table
//! - `correlations.json`: the correlation table
//!
//! Artifacts are written to a temporary file in the same directory and renamed
//! into place, so a failed run never leaves a partial artifact behind.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::correlate::CorrelationTable;
use crate::error::{Result, RevfeatError};
use crate::feature::{ConsolidatedTable, ReviewId};

pub const FINAL_FEATURES_FILE: &str = "final_features.json";
pub const CORRELATIONS_FILE: &str = "correlations.json";

/// File name of a feature type's raw records
pub fn feature_file_name(feature_type: &str) -> String {
    format!("{feature_type}_features.json")
}

/// A pipeline run directory
#[derive(Debug, Clone)]
pub struct RunDirectory {
    root: PathBuf,
}

impl RunDirectory {
    /// Open an existing run directory
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(RevfeatError::MissingInput(root));
        }
        Ok(Self { root })
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    pub fn feature_path(&self, feature_type: &str) -> PathBuf {
        self.root.join(feature_file_name(feature_type))
    }

    pub fn final_features_path(&self) -> PathBuf {
        self.root.join(FINAL_FEATURES_FILE)
    }

    pub fn correlations_path(&self) -> PathBuf {
        self.root.join(CORRELATIONS_FILE)
    }

    /// Load one feature type's raw records
    pub fn read_feature_records(
        &self,
        feature_type: &str,
    ) -> Result<BTreeMap<ReviewId, serde_json::Value>> {
        read_json(&self.feature_path(feature_type))
    }

    /// Load the consolidated feature table
    pub fn read_final_features(&self) -> Result<ConsolidatedTable> {
        read_json(&self.final_features_path())
    }

    /// Persist the consolidated feature table, replacing any previous one
    pub fn write_final_features(&self, table: &ConsolidatedTable) -> Result<PathBuf> {
        let path = self.final_features_path();
        write_json_atomic(&path, table)?;
        Ok(path)
    }

    /// Persist the correlation table, replacing any previous one
    pub fn write_correlations(&self, table: &CorrelationTable) -> Result<PathBuf> {
        let path = self.correlations_path();
        write_json_atomic(&path, table)?;
        Ok(path)
    }
}

/// Read a JSON file, mapping absence to `MissingInput`
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => RevfeatError::MissingInput(path.to_path_buf()),
        _ => RevfeatError::from(e),
    })?;

    debug!(path = %path.display(), "reading");
    serde_json::from_reader(BufReader::new(file)).map_err(|e| RevfeatError::InvalidFile {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Write JSON to `path` via a temporary sibling file and an atomic rename
pub fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)?;
    {
        let mut writer = BufWriter::new(&mut tmp);
        serde_json::to_writer_pretty(&mut writer, value)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
    }
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| RevfeatError::from(e.error))?;

    debug!(path = %path.display(), "wrote");
    Ok(())
}
