//! Durability Log Module
//!
//! Append-only record log; the single source of truth for recovery.
//!
//! ## Responsibilities
//! - Append a record and fsync it before any in-memory mutation
//! - Replay every record in file order at startup
//! - Skip a torn final record, reject corruption anywhere else
//!
//! ## File Format
//! ```text
//! ┌─────────────────────────────────────────┐
//! │ SET <key> <value>\n                     │  record 1
//! ├─────────────────────────────────────────┤
//! │ SET <key> <value>\n                     │  record 2
//! ├─────────────────────────────────────────┤
//! │ SET <key> <val                          │  torn tail (no '\n'), dropped
//! └─────────────────────────────────────────┘
//! ```
//!
//! Escapes: `\\` backslash, `\n` newline, `\r` carriage return, and in keys
//! only `\s` space and `\t` tab. A line is complete only once its `\n`
//! terminator is on disk.

mod reader;
mod record;
mod writer;

pub use reader::{LogReader, ReplayStats};
pub use record::{encode_record, LogRecord, RecordError, SET_TAG, TERMINATOR};
pub use writer::LogWriter;
