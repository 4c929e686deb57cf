//! QuillKV Shell Binary
//!
//! Opens the store and reads commands from stdin, one per line.

use std::io;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use quillkv::index::DEFAULT_ORDER;
use quillkv::shell::Shell;
use quillkv::{Config, Engine, SyncMode};
use tracing_subscriber::{fmt, EnvFilter};

/// QuillKV
#[derive(Parser, Debug)]
#[command(name = "quillkv")]
#[command(about = "Persistent key-value store with a line-oriented shell")]
#[command(version)]
struct Args {
    /// Log file path
    #[arg(default_value = quillkv::config::DEFAULT_LOG_PATH)]
    db_path: PathBuf,

    /// B+Tree branching order
    #[arg(short, long, default_value_t = DEFAULT_ORDER)]
    order: usize,

    /// How each write is forced to disk
    #[arg(short, long, value_enum, default_value_t = SyncArg::Data)]
    sync: SyncArg,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SyncArg {
    /// fdatasync after every write
    Data,
    /// fsync after every write
    All,
}

impl From<SyncArg> for SyncMode {
    fn from(arg: SyncArg) -> Self {
        match arg {
            SyncArg::Data => SyncMode::Data,
            SyncArg::All => SyncMode::All,
        }
    }
}

fn main() {
    // Diagnostics go to stderr; stdout carries only responses
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,quillkv=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    tracing::info!("QuillKV v{}", quillkv::VERSION);
    tracing::info!("Log file: {}", args.db_path.display());

    let config = Config::builder()
        .log_path(&args.db_path)
        .index_order(args.order)
        .sync_mode(args.sync.into())
        .build();

    let mut engine = match Engine::open(config) {
        Ok(e) => e,
        Err(e) => {
            tracing::error!("Failed to open engine: {}", e);
            std::process::exit(1);
        }
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut shell = Shell::new(&mut engine, stdin.lock(), stdout.lock());

    match shell.run() {
        Ok(end) => tracing::debug!(?end, "Session ended"),
        Err(e) => {
            tracing::error!("Shell error: {}", e);
            std::process::exit(1);
        }
    }
}
