//! Durable result log: every persisting evaluation appends one record, and
//! the full table is flushed to a single JSON file.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use tracing::debug;

use ranklab_core::errors::RanklabResult;
use ranklab_core::models::EvaluationRecord;

/// Append-only log of evaluation records, backed by one JSON file.
///
/// Loaded eagerly at construction and owned by the harness — no hidden
/// process-wide state. One log instance drives one sequential experiment;
/// there is no concurrent-writer protocol.
#[derive(Debug)]
pub struct ResultLog {
    path: PathBuf,
    records: Vec<EvaluationRecord>,
}

impl ResultLog {
    /// Open the log at `path`, loading prior records when the file exists
    /// and creating the parent directory otherwise.
    pub fn open(path: impl Into<PathBuf>) -> RanklabResult<Self> {
        let path = path.into();
        let records = if path.exists() {
            let file = File::open(&path)?;
            serde_json::from_reader(file)?
        } else {
            if let Some(dir) = path.parent() {
                if !dir.as_os_str().is_empty() {
                    fs::create_dir_all(dir)?;
                }
            }
            Vec::new()
        };
        debug!(path = %path.display(), records = records.len(), "result log opened");
        Ok(Self { path, records })
    }

    /// Append one record. Becomes durable on the next [`flush`](Self::flush).
    pub fn append(&mut self, record: EvaluationRecord) {
        self.records.push(record);
    }

    /// Rewrite the full historical table to disk.
    pub fn flush(&self) -> RanklabResult<()> {
        let file = File::create(&self.path)?;
        serde_json::to_writer_pretty(BufWriter::new(file), &self.records)?;
        debug!(path = %self.path.display(), records = self.records.len(), "result log flushed");
        Ok(())
    }

    pub fn records(&self) -> &[EvaluationRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
