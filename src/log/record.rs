//! Log record definitions
//!
//! Defines a single log record and its one-line text encoding.

use thiserror::Error;

/// Operation tag of an upsert record
pub const SET_TAG: &str = "SET";

/// Byte that terminates every complete record
pub const TERMINATOR: u8 = b'\n';

/// A single upsert in the log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub key: String,
    pub value: String,
}

/// Why a line could not be decoded as a record
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("record is not valid UTF-8")]
    NotUtf8,

    #[error("unknown operation tag {0:?}")]
    UnknownTag(String),

    #[error("missing {0} field")]
    MissingField(&'static str),

    #[error("empty key")]
    EmptyKey,

    #[error("invalid escape sequence at byte {0}")]
    BadEscape(usize),
}

impl LogRecord {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Encode as `SET <key> <value>\n`
    pub fn encode(&self) -> Vec<u8> {
        encode_record(&self.key, &self.value)
    }

    /// Decode one line, without its terminator
    pub fn decode(line: &[u8]) -> std::result::Result<Self, RecordError> {
        let line = std::str::from_utf8(line).map_err(|_| RecordError::NotUtf8)?;

        let (tag, rest) = line
            .split_once(' ')
            .ok_or(RecordError::MissingField("key"))?;
        if tag != SET_TAG {
            return Err(RecordError::UnknownTag(tag.to_string()));
        }

        // Keys never contain a raw space, so the first one ends the key
        let (key, value) = rest
            .split_once(' ')
            .ok_or(RecordError::MissingField("value"))?;
        if key.is_empty() {
            return Err(RecordError::EmptyKey);
        }

        let value_start = tag.len() + 1 + key.len() + 1;
        Ok(Self {
            key: unescape(key, tag.len() + 1)?,
            value: unescape(value, value_start)?,
        })
    }
}

/// Encode a record without building a `LogRecord` first
pub fn encode_record(key: &str, value: &str) -> Vec<u8> {
    let mut line = String::with_capacity(SET_TAG.len() + key.len() + value.len() + 3);
    line.push_str(SET_TAG);
    line.push(' ');
    escape_into(&mut line, key, true);
    line.push(' ');
    escape_into(&mut line, value, false);
    line.push(TERMINATOR as char);
    line.into_bytes()
}

/// Escape backslashes and line breaks; keys also escape field separators.
///
/// Values without backslashes or line breaks are written verbatim.
fn escape_into(out: &mut String, field: &str, is_key: bool) {
    for c in field.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            ' ' if is_key => out.push_str("\\s"),
            '\t' if is_key => out.push_str("\\t"),
            c => out.push(c),
        }
    }
}

/// Reverse `escape_into`. `base` is the field's byte offset in the line,
/// used only for error positions.
fn unescape(field: &str, base: usize) -> std::result::Result<String, RecordError> {
    if !field.contains('\\') {
        return Ok(field.to_string());
    }

    let mut out = String::with_capacity(field.len());
    let mut chars = field.char_indices();
    while let Some((i, c)) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some((_, '\\')) => out.push('\\'),
            Some((_, 'n')) => out.push('\n'),
            Some((_, 'r')) => out.push('\r'),
            Some((_, 's')) => out.push(' '),
            Some((_, 't')) => out.push('\t'),
            _ => return Err(RecordError::BadEscape(base + i)),
        }
    }
    Ok(out)
}
