//! Append-only diagnostic log.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};

/// Free-text diagnostic sink: one line per event, appended, never rotated.
///
/// The log is advisory; write failures are swallowed so a full disk or a
/// read-only directory cannot take down the command that produced the event.
pub struct EventLog {
    path: PathBuf,
}

impl EventLog {
    /// Create a log writing to the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The log file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one event line with a UTC timestamp prefix.
    pub fn record(&self, message: &str) {
        if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(&self.path) {
            let stamp = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
            let _ = writeln!(file, "{} {}", stamp, message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let log = EventLog::new(dir.path().join("events.log"));

        log.record("first");
        log.record("second");

        let contents = std::fs::read_to_string(log.path()).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("first"));
        assert!(lines[1].ends_with("second"));
    }

    #[test]
    fn test_unwritable_path_is_silent() {
        let log = EventLog::new("/nonexistent-dir/events.log");
        log.record("dropped");
    }
}
