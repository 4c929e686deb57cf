//! Tests for the Shell
//!
//! These tests drive whole sessions through in-memory input and output and
//! compare the response transcript line by line.

use std::io::Cursor;
use std::path::Path;

use quillkv::config::Config;
use quillkv::engine::Engine;
use quillkv::shell::{SessionEnd, Shell};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn open(path: &Path) -> Engine {
    Engine::open(Config::builder().log_path(path).build()).unwrap()
}

/// Run `input` through a shell and return the session end and response lines
fn run_session(engine: &mut Engine, input: &str) -> (SessionEnd, Vec<String>) {
    let mut output = Vec::new();
    let end = Shell::new(engine, Cursor::new(input.as_bytes()), &mut output)
        .run()
        .unwrap();
    let transcript = String::from_utf8(output).unwrap();
    (end, transcript.lines().map(str::to_string).collect())
}

// =============================================================================
// Session Tests
// =============================================================================

#[test]
fn test_set_get_transcript() {
    let temp_dir = TempDir::new().unwrap();
    let mut engine = open(&temp_dir.path().join("data.db"));

    let (end, lines) = run_session(&mut engine, "SET a 1\nGET a\nGET b\nSET a 2\nGET a\n");

    assert_eq!(end, SessionEnd::Eof);
    assert_eq!(lines, vec!["OK", "1", "NULL", "OK", "2"]);
}

#[test]
fn test_exit_stops_reading() {
    let temp_dir = TempDir::new().unwrap();
    let mut engine = open(&temp_dir.path().join("data.db"));

    let (end, lines) = run_session(&mut engine, "SET a 1\nEXIT\nSET a 2\n");

    assert_eq!(end, SessionEnd::Exit);
    assert_eq!(lines, vec!["OK"]);
    assert_eq!(engine.get("a"), Some("1"));
}

#[test]
fn test_error_responses_keep_session_alive() {
    let temp_dir = TempDir::new().unwrap();
    let mut engine = open(&temp_dir.path().join("data.db"));

    let input = "FROB\nSET a\nGET\nSET k \"unterminated\nSET \"\" v\nGET a\n";
    let (_, lines) = run_session(&mut engine, input);

    assert_eq!(
        lines,
        vec![
            "ERR unknown command",
            "ERR usage: SET <key> <value>",
            "ERR usage: GET <key>",
            "ERR syntax",
            "ERR invalid key",
            "NULL",
        ]
    );
}

#[test]
fn test_blank_lines_produce_no_output() {
    let temp_dir = TempDir::new().unwrap();
    let mut engine = open(&temp_dir.path().join("data.db"));

    let (_, lines) = run_session(&mut engine, "\n   \nSET a 1\n\nGET a\n");

    assert_eq!(lines, vec!["OK", "1"]);
}

#[test]
fn test_quoted_values() {
    let temp_dir = TempDir::new().unwrap();
    let mut engine = open(&temp_dir.path().join("data.db"));

    let (_, lines) = run_session(
        &mut engine,
        "SET greeting \"hello   world\"\nGET greeting\nSET plain hello   world\nGET plain\n",
    );

    assert_eq!(lines, vec!["OK", "hello   world", "OK", "hello world"]);
}

#[test]
fn test_last_line_without_newline_is_handled() {
    let temp_dir = TempDir::new().unwrap();
    let mut engine = open(&temp_dir.path().join("data.db"));

    let (end, lines) = run_session(&mut engine, "SET a 1\nGET a");

    assert_eq!(end, SessionEnd::Eof);
    assert_eq!(lines, vec!["OK", "1"]);
}

#[test]
fn test_session_survives_restart() {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("data.db");

    {
        let mut engine = open(&log_path);
        run_session(&mut engine, "SET user Alice\nSET user Bob\nEXIT\n");
    }

    let mut engine = open(&log_path);
    let (_, lines) = run_session(&mut engine, "GET user\n");
    assert_eq!(lines, vec!["Bob"]);
}

#[test]
fn test_shell_counts_commands() {
    let temp_dir = TempDir::new().unwrap();
    let mut engine = open(&temp_dir.path().join("data.db"));
    let mut output = Vec::new();

    let mut shell = Shell::new(
        &mut engine,
        Cursor::new("SET a 1\n\nBOGUS\nGET a\n".as_bytes()),
        &mut output,
    );
    shell.run().unwrap();

    // Blank and unparseable lines are not commands
    assert_eq!(shell.commands(), 2);
}
