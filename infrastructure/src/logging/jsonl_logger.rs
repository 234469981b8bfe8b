//! JSONL file writer for deliberation audit records.
//!
//! Each completed deliberation is serialized as a single JSON line with a
//! `timestamp`, appended to the file via a buffered writer.

use council_application::RunDeliberationError;
use council_domain::{DeliberationOutcome, Query};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// JSONL deliberation logger that writes one JSON object per line.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Flushes on `Drop`.
pub struct JsonlDeliberationLogger {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlDeliberationLogger {
    /// Create a new logger appending to the given path.
    ///
    /// Creates the file (and parent directories) if they don't exist.
    /// Returns `None` if the file cannot be opened.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create deliberation log directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!(
                    "Could not open deliberation log file {}: {}",
                    path.display(),
                    e
                );
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    /// Get the path to the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Record a completed deliberation.
    pub fn log_outcome(&self, query: &Query, outcome: &DeliberationOutcome) {
        self.write_record(serde_json::json!({
            "result": "completed",
            "query": query.text(),
            "mode": outcome.mode,
            "short_circuited": outcome.short_circuited,
            "final_answer": outcome.final_answer,
            "transcript": outcome.transcript.entries(),
        }));
    }

    /// Record a deliberation that terminated with an error.
    pub fn log_failure(&self, query: &Query, error: &RunDeliberationError) {
        let transcript = match error {
            RunDeliberationError::DeliberationFailed { transcript, .. } => transcript.entries(),
            _ => &[],
        };
        self.write_record(serde_json::json!({
            "result": "failed",
            "query": query.text(),
            "error": error.to_string(),
            "transcript": transcript,
        }));
    }

    fn write_record(&self, mut record: serde_json::Value) {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);
        if let serde_json::Value::Object(map) = &mut record {
            map.insert(
                "timestamp".to_string(),
                serde_json::Value::String(timestamp),
            );
        }

        let Ok(line) = serde_json::to_string(&record) else {
            return;
        };

        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
            // Flush per record for crash safety — JSONL is append-only
            let _ = writer.flush();
        }
    }
}

impl Drop for JsonlDeliberationLogger {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}
