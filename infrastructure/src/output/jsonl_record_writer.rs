//! JSONL file writer for finished test records.
//!
//! Each [`TestRecord`] is serialized as a single JSON line and appended to the
//! file, so one file can collect every run on a station.

use htf_application::ports::record_sink::{RecordSinkError, TestRecordSink};
use htf_domain::TestRecord;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use tracing::debug;

/// JSONL record writer that appends one JSON object per test run.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Flushes after every record.
pub struct JsonlRecordWriter {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlRecordWriter {
    /// Open (or create) `path` for appending.
    ///
    /// Creates parent directories if they don't exist.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, RecordSinkError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new().create(true).append(true).open(path)?;

        Ok(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    /// Get the path to the record file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TestRecordSink for JsonlRecordWriter {
    fn name(&self) -> &str {
        "jsonl"
    }

    fn write(&self, record: &TestRecord) -> Result<(), RecordSinkError> {
        let line = serde_json::to_string(record)
            .map_err(|e| RecordSinkError::Serialization(e.to_string()))?;

        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        writeln!(writer, "{}", line)?;
        writer.flush()?;
        debug!("Wrote test record to {}", self.path.display());
        Ok(())
    }
}
