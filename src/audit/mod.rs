//! Operation log — JSON lines appended to the configured log file.
//!
//! One line per vault operation, never any secret material. Designed
//! for graceful degradation: if the file can't be opened or written,
//! operations silently continue without logging.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::Serialize;

/// A single log line.
#[derive(Debug, Serialize)]
struct LogEntry<'a> {
    timestamp: String,
    operation: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<&'a str>,
}

/// Append-only operation log.
pub struct AuditLog {
    path: PathBuf,
}

impl AuditLog {
    /// Point the log at the configured file; nothing is opened until
    /// the first write.
    pub fn open(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    /// Record an operation. Fire-and-forget — errors are silently
    /// ignored so a broken log never blocks a vault operation.
    pub fn log(&self, operation: &str, details: Option<&str>) {
        let entry = LogEntry {
            timestamp: Utc::now().to_rfc3339(),
            operation,
            details,
        };

        let Ok(line) = serde_json::to_string(&entry) else {
            return;
        };

        if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(&self.path) {
            let _ = writeln!(file, "{line}");
        }
    }
}
