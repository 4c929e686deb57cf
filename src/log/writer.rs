//! Log Writer
//!
//! Appends records to the log file and forces each one to stable storage.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::SyncMode;
use crate::error::{QuillError, Result};

use super::record::encode_record;

/// Appends records to the log file
pub struct LogWriter {
    /// Log file, opened in append mode
    file: File,

    /// Path of the log file
    path: PathBuf,

    /// Length in bytes of the durable, well-formed prefix of the file
    len: u64,

    /// Flush strategy applied after every record
    sync_mode: SyncMode,

    /// Set when a failed append could not be rolled back
    poisoned: bool,
}

impl LogWriter {
    /// Open or create the log file, creating missing parent directories
    pub fn open(path: &Path, sync_mode: SyncMode) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .read(true)
            .open(path)?;
        let len = file.metadata()?.len();

        tracing::debug!(path = %path.display(), len, "Opened log for append");

        Ok(Self {
            file,
            path: path.to_path_buf(),
            len,
            sync_mode,
            poisoned: false,
        })
    }

    /// Append one record and force it to stable storage.
    ///
    /// Returns the byte offset at which the record starts. On failure the
    /// file is cut back to its previous length; if even that fails the
    /// writer refuses every later append.
    pub fn append(&mut self, key: &str, value: &str) -> Result<u64> {
        if self.poisoned {
            return Err(QuillError::LogPoisoned);
        }

        let bytes = encode_record(key, value);
        let position = self.len;

        if let Err(e) = self.write_durably(&bytes) {
            tracing::error!(path = %self.path.display(), error = %e, "Log append failed");
            self.rollback(position);
            return Err(e.into());
        }

        self.len += bytes.len() as u64;
        tracing::trace!(position, bytes = bytes.len(), "Appended log record");
        Ok(position)
    }

    fn write_durably(&mut self, bytes: &[u8]) -> std::io::Result<()> {
        self.file.write_all(bytes)?;
        self.sync_file()
    }

    fn sync_file(&self) -> std::io::Result<()> {
        match self.sync_mode {
            SyncMode::Data => self.file.sync_data(),
            SyncMode::All => self.file.sync_all(),
        }
    }

    /// Drop whatever a failed append left past `position`
    fn rollback(&mut self, position: u64) {
        match self.file.set_len(position).and_then(|_| self.sync_file()) {
            Ok(()) => {
                tracing::warn!(position, "Rolled back partially written log record");
            }
            Err(e) => {
                tracing::error!(position, error = %e, "Log rollback failed, writer poisoned");
                self.poisoned = true;
            }
        }
    }

    /// Cut the file back to `valid_len`, discarding a torn or malformed
    /// trailing record found during replay.
    ///
    /// Returns the number of bytes removed.
    pub fn truncate_to(&mut self, valid_len: u64) -> Result<u64> {
        let current = self.file.metadata()?.len();
        if valid_len >= current {
            self.len = current;
            return Ok(0);
        }

        self.file.set_len(valid_len)?;
        self.sync_file()?;
        self.len = valid_len;

        let removed = current - valid_len;
        tracing::warn!(
            path = %self.path.display(),
            removed,
            valid_len,
            "Truncated incomplete tail of log"
        );
        Ok(removed)
    }

    /// Force sync to disk
    pub fn sync(&mut self) -> Result<()> {
        self.sync_file()?;
        Ok(())
    }

    /// Length of the log in bytes
    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn sync_mode(&self) -> SyncMode {
        self.sync_mode
    }

    pub fn is_poisoned(&self) -> bool {
        self.poisoned
    }
}
