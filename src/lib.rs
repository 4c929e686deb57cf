//! # QuillKV
//!
//! A single-user persistent key-value store with:
//! - An append-only log, fsync'd on every write, as the source of truth
//! - An in-memory B+Tree index rebuilt from the log at startup
//! - Last-write-wins semantics and tolerance for a torn final record
//! - A line-oriented command shell (`SET`, `GET`, `EXIT`)
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Command Shell                            │
//! │               (stdin lines → responses)                      │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                        Engine                                │
//! │         (append first, then index; replay on open)           │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │     Log     │          │    Index    │
//!   │  (Append,   │          │  (B+Tree,   │
//!   │   fsync)    │          │   arena)    │
//!   └─────────────┘          └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod log;
pub mod index;
pub mod protocol;
pub mod shell;
pub mod engine;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{QuillError, Result};
pub use config::{Config, SyncMode};
pub use engine::Engine;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of QuillKV
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
