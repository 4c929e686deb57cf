//! Engine Module
//!
//! The storage engine that coordinates the log and the index.
//!
//! ## Responsibilities
//! - Replay the log into the index on startup
//! - Append to the log before every index mutation
//! - Answer reads from the index alone

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::{QuillError, Result};
use crate::index::BPlusTree;
use crate::log::{LogReader, LogWriter, ReplayStats};
use crate::protocol::{Command, Response};

/// The main storage engine
///
/// ## Lifecycle: Recovering → Ready
///
/// [`Engine::open`] is the recovering phase: it replays the whole log and
/// returns only once the index reflects every durable record. Any value of
/// type `Engine` is therefore ready to serve requests.
///
/// ## Ownership
///
/// The engine exclusively owns the log writer and the index. `set` needs
/// `&mut self` and `get` needs `&self`, so a caller cannot interleave a read
/// with a half-applied write.
pub struct Engine {
    /// Engine configuration
    config: Config,

    /// Append-only log (held open for the engine's lifetime)
    log: LogWriter,

    /// In-memory index rebuilt from the log
    index: BPlusTree,

    /// What startup replay found
    replay_stats: ReplayStats,
}

impl Engine {
    /// Open or create an engine with the given config
    ///
    /// On startup:
    /// 1. Open/create the log file
    /// 2. Replay every record into a fresh index, in file order
    /// 3. Cut off a torn final record so appends start on a record boundary
    /// 4. Ready to serve requests
    pub fn open(config: Config) -> Result<Self> {
        config.validate()?;

        // Step 1: Open the log (creates it and its directory if needed)
        let mut log = LogWriter::open(&config.log_path, config.sync_mode)?;

        // Step 2: Replay; upsert order is file order, so the last write wins
        let mut index = BPlusTree::new(config.index_order);
        let mut reader = LogReader::open(&config.log_path)?;
        for record in reader.by_ref() {
            let record = match record {
                Ok(record) => record,
                Err(e) => {
                    tracing::error!(path = %config.log_path.display(), error = %e, "Log replay aborted");
                    return Err(e);
                }
            };
            index.upsert(record.key, record.value);
        }
        let replay_stats = reader.finish();

        // Step 3: Drop the discarded tail from disk
        if replay_stats.discarded_tail_bytes > 0 {
            log.truncate_to(replay_stats.valid_len)?;
        }

        tracing::info!(
            path = %config.log_path.display(),
            records = replay_stats.records_replayed,
            keys = index.len(),
            height = index.height(),
            discarded_tail_bytes = replay_stats.discarded_tail_bytes,
            "Log replay complete"
        );

        Ok(Self {
            config,
            log,
            index,
            replay_stats,
        })
    }

    /// Open with a log path (convenience method)
    ///
    /// Uses default config with the specified log file
    pub fn open_path(path: impl Into<PathBuf>) -> Result<Self> {
        Self::open(Config::builder().log_path(path).build())
    }

    /// Execute a command
    ///
    /// Routes commands to appropriate handlers
    pub fn execute(&mut self, command: Command) -> Result<Response> {
        match command {
            Command::Set { key, value } => {
                self.set(&key, &value)?;
                Ok(Response::Ok)
            }
            Command::Get { key } => Ok(Response::from_lookup(self.get(&key))),
            // Every acknowledged write is already durable; nothing to flush
            Command::Exit => Ok(Response::Ok),
        }
    }

    /// Store `value` under `key`
    ///
    /// Steps:
    /// 1. Append to the log and sync (durability)
    /// 2. Upsert into the index
    ///
    /// If step 1 fails the index is left untouched and the error is returned.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if key.is_empty() {
            return Err(QuillError::InvalidKey("key must not be empty".to_string()));
        }

        let position = self.log.append(key, value)?;
        let previous = self.index.upsert(key.to_string(), value.to_string());

        tracing::debug!(key, position, replaced = previous.is_some(), "SET applied");
        Ok(())
    }

    /// Get the value stored for `key`; never touches the log
    pub fn get(&self, key: &str) -> Option<&str> {
        self.index.lookup(key)
    }

    // =========================================================================
    // Accessors (for testing and debugging)
    // =========================================================================

    /// Get the log file path
    pub fn log_path(&self) -> &Path {
        self.log.path()
    }

    /// Get the current log length in bytes
    pub fn log_len(&self) -> u64 {
        self.log.len()
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Read-only view of the index
    pub fn index(&self) -> &BPlusTree {
        &self.index
    }

    /// What replay found at startup
    pub fn replay_stats(&self) -> &ReplayStats {
        &self.replay_stats
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}
