//! Configuration for QuillKV
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

use crate::error::{QuillError, Result};
use crate::index::{DEFAULT_ORDER, MIN_ORDER};

/// Default location of the log file, relative to the working directory
pub const DEFAULT_LOG_PATH: &str = "data.db";

/// Main configuration for a QuillKV instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Log Configuration
    // -------------------------------------------------------------------------
    /// Path of the append-only log file (created if absent)
    pub log_path: PathBuf,

    /// How each append is forced to stable storage
    pub sync_mode: SyncMode,

    // -------------------------------------------------------------------------
    // Index Configuration
    // -------------------------------------------------------------------------
    /// Branching order `M` of the B+Tree: max entries per leaf and max
    /// children per internal node
    pub index_order: usize,
}

/// How the log writer flushes each record.
///
/// Both modes complete before `append` returns; neither batches writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncMode {
    /// `fdatasync`: file contents plus the metadata needed to read them back
    Data,

    /// `fsync`: file contents and all metadata
    All,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_path: PathBuf::from(DEFAULT_LOG_PATH),
            sync_mode: SyncMode::Data,
            index_order: DEFAULT_ORDER,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Check values that would otherwise break engine invariants
    pub fn validate(&self) -> Result<()> {
        if self.index_order < MIN_ORDER {
            return Err(QuillError::Config(format!(
                "index order must be at least {}, got {}",
                MIN_ORDER, self.index_order
            )));
        }
        if self.log_path.as_os_str().is_empty() {
            return Err(QuillError::Config("log path is empty".to_string()));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the log file path
    pub fn log_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.log_path = path.into();
        self
    }

    /// Set the sync mode used after every append
    pub fn sync_mode(mut self, mode: SyncMode) -> Self {
        self.config.sync_mode = mode;
        self
    }

    /// Set the B+Tree branching order
    pub fn index_order(mut self, order: usize) -> Self {
        self.config.index_order = order;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
