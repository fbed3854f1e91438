//! Append-only JSON Lines writer for the event log.
//!
//! Each call appends one batch with a single `write_all` while holding the
//! writer lock, so lines from concurrent batches never interleave. The file
//! is opened in append mode per batch: it is created (with its parent
//! directories) when missing, and a file moved away by an external tool is
//! simply recreated on the next batch.

use moblog_core::error::MoblogError;
use moblog_core::event::LogEvent;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::debug;

pub struct JsonlWriter {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonlWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serialize `events` and append them as one batch.
    ///
    /// Returns the number of lines written.
    pub fn append_events(&self, events: &[LogEvent]) -> Result<usize, MoblogError> {
        let lines = events
            .iter()
            .map(LogEvent::to_json_line)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self.append_lines(&lines)?)
    }

    /// Append pre-serialized lines, each terminated by `\n`.
    ///
    /// An empty slice leaves the file untouched.
    pub fn append_lines<S: AsRef<str>>(&self, lines: &[S]) -> io::Result<usize> {
        if lines.is_empty() {
            return Ok(0);
        }

        let mut buf = String::with_capacity(lines.iter().map(|l| l.as_ref().len() + 1).sum());
        for line in lines {
            buf.push_str(line.as_ref());
            buf.push('\n');
        }

        let _guard = self
            .lock
            .lock()
            .map_err(|_| io::Error::other("jsonl writer lock poisoned"))?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(buf.as_bytes())?;

        debug!(path = %self.path.display(), lines = lines.len(), "jsonl: batch appended");
        Ok(lines.len())
    }
}
