//! Log Reader
//!
//! Lazily replays records from the start of the log file.

use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::Path;

use crate::error::{QuillError, Result};

use super::record::{LogRecord, TERMINATOR};

/// Summary of a replay pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplayStats {
    /// Records yielded in file order
    pub records_replayed: u64,

    /// Length of the well-formed prefix; appends resume here
    pub valid_len: u64,

    /// Bytes of a torn or malformed final record that were skipped
    pub discarded_tail_bytes: u64,
}

/// Reads records from the log file, oldest first.
///
/// Yields `Err(LogCorruption)` once and then stops if a record that is not
/// the last one fails to decode. A last record that is unterminated or
/// malformed is silently skipped and reported in [`ReplayStats`].
pub struct LogReader {
    /// `None` when the file does not exist yet
    reader: Option<BufReader<File>>,

    /// Byte offset of the next unread line
    offset: u64,

    /// Number of lines consumed so far
    line: u64,

    /// Reusable line buffer
    buf: Vec<u8>,

    stats: ReplayStats,

    done: bool,
}

impl LogReader {
    /// Open the log for replay from the beginning.
    ///
    /// A missing file replays as an empty log.
    pub fn open(path: &Path) -> Result<Self> {
        let reader = match File::open(path) {
            Ok(file) => Some(BufReader::new(file)),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            reader,
            offset: 0,
            line: 0,
            buf: Vec::new(),
            stats: ReplayStats::default(),
            done: false,
        })
    }

    /// Statistics gathered so far
    pub fn stats(&self) -> &ReplayStats {
        &self.stats
    }

    /// Consume the reader and return its statistics
    pub fn finish(self) -> ReplayStats {
        self.stats
    }

    /// Read the next raw line into `self.buf`, terminator included.
    ///
    /// Returns the number of bytes read, 0 at end of file.
    fn read_line(&mut self) -> std::io::Result<usize> {
        self.buf.clear();
        let n = match self.reader.as_mut() {
            Some(reader) => reader.read_until(TERMINATOR, &mut self.buf)?,
            None => 0,
        };
        self.offset += n as u64;
        if n > 0 {
            self.line += 1;
        }
        Ok(n)
    }

    /// True when nothing but blank lines follows the current position
    fn only_blank_lines_remain(&mut self) -> std::io::Result<bool> {
        loop {
            match self.read_line()? {
                0 => return Ok(true),
                n if self.buf[n - 1] == TERMINATOR && line_body(&self.buf).is_empty() => continue,
                _ => return Ok(false),
            }
        }
    }

    /// Skip everything after the well-formed prefix and stop
    fn discard_tail(&mut self, reason: &str) {
        self.stats.discarded_tail_bytes = self.offset - self.stats.valid_len;
        self.done = true;
        tracing::warn!(
            line = self.line,
            offset = self.stats.valid_len,
            bytes = self.stats.discarded_tail_bytes,
            reason,
            "Discarding incomplete final log record"
        );
    }

    fn fail<T>(&mut self, e: QuillError) -> Option<Result<T>> {
        self.done = true;
        Some(Err(e))
    }
}

impl Iterator for LogReader {
    type Item = Result<LogRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            let start = self.offset;
            let n = match self.read_line() {
                Ok(n) => n,
                Err(e) => return self.fail(e.into()),
            };

            if n == 0 {
                self.done = true;
                return None;
            }

            if self.buf[n - 1] != TERMINATOR {
                self.discard_tail("missing terminator");
                return None;
            }

            let body = line_body(&self.buf);
            if body.is_empty() {
                // Blank line
                self.stats.valid_len = self.offset;
                continue;
            }

            match LogRecord::decode(body) {
                Ok(record) => {
                    self.stats.records_replayed += 1;
                    self.stats.valid_len = self.offset;
                    return Some(Ok(record));
                }
                Err(reason) => {
                    let line = self.line;
                    match self.only_blank_lines_remain() {
                        Ok(true) => {
                            self.discard_tail(&reason.to_string());
                            return None;
                        }
                        Ok(false) => {
                            return self.fail(QuillError::LogCorruption {
                                line,
                                offset: start,
                                reason: reason.to_string(),
                            });
                        }
                        Err(e) => return self.fail(e.into()),
                    }
                }
            }
        }
    }
}

impl std::iter::FusedIterator for LogReader {}

/// A terminated line without its `\n` or `\r\n` ending.
///
/// Writers escape carriage returns, so a raw `\r` before the terminator can
/// only come from a CRLF line ending.
fn line_body(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(&[TERMINATOR]).unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}
