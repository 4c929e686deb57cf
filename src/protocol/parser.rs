//! Command line parser
//!
//! Splits a line into shell-style tokens and turns them into a [`Command`].
//!
//! ## Quoting Rules
//! - Unquoted ASCII space, tab, CR and LF separate tokens; other Unicode
//!   whitespace is ordinary token text
//! - `'...'` is taken literally
//! - `"..."` allows `\"` and `\\`; any other backslash is kept as-is
//! - Outside quotes, `\x` yields `x`
//! - Adjacent pieces join into one token: `a"b c"` is `ab c`

use thiserror::Error;

use super::{Command, CommandType, Response};

/// Characters that separate unquoted tokens
const SEPARATORS: &[char] = &[' ', '\t', '\r', '\n'];

/// Why a line could not be parsed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unclosed {0} quote")]
    UnclosedQuote(char),

    #[error("no character after escape")]
    DanglingEscape,

    #[error("wrong number of arguments for {}", .0.usage())]
    Usage(CommandType),

    #[error("unknown command {0:?}")]
    UnknownCommand(String),
}

impl From<ParseError> for Response {
    fn from(e: ParseError) -> Self {
        match e {
            ParseError::UnclosedQuote(_) | ParseError::DanglingEscape => Response::error("syntax"),
            ParseError::Usage(cmd) => Response::error(format!("usage: {}", cmd.usage())),
            ParseError::UnknownCommand(_) => Response::error("unknown command"),
        }
    }
}

/// Parse one input line.
///
/// Returns `Ok(None)` for a blank line. For `SET`, every token after the key
/// is joined with single spaces to form the value.
pub fn parse_line(line: &str) -> std::result::Result<Option<Command>, ParseError> {
    let tokens = tokenize(line.trim_matches(SEPARATORS))?;
    let Some(name) = tokens.first() else {
        return Ok(None);
    };

    let command_type =
        CommandType::from_name(name).ok_or_else(|| ParseError::UnknownCommand(name.clone()))?;

    let command = match command_type {
        CommandType::Set => {
            if tokens.len() < 3 {
                return Err(ParseError::Usage(command_type));
            }
            Command::Set {
                key: tokens[1].clone(),
                value: tokens[2..].join(" "),
            }
        }
        CommandType::Get => {
            if tokens.len() != 2 {
                return Err(ParseError::Usage(command_type));
            }
            Command::Get {
                key: tokens[1].clone(),
            }
        }
        CommandType::Exit => Command::Exit,
    };

    Ok(Some(command))
}

/// Split a line into tokens using the quoting rules above
pub fn tokenize(line: &str) -> std::result::Result<Vec<String>, ParseError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match c {
            ' ' | '\t' | '\r' | '\n' => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            '\\' => {
                current.push(chars.next().ok_or(ParseError::DanglingEscape)?);
                in_token = true;
            }
            '\'' => {
                in_token = true;
                loop {
                    match chars.next() {
                        Some('\'') => break,
                        Some(c) => current.push(c),
                        None => return Err(ParseError::UnclosedQuote('\'')),
                    }
                }
            }
            '"' => {
                in_token = true;
                loop {
                    match chars.next() {
                        Some('"') => break,
                        Some('\\') => match chars.next() {
                            Some(c @ ('"' | '\\')) => current.push(c),
                            Some(c) => {
                                current.push('\\');
                                current.push(c);
                            }
                            None => return Err(ParseError::UnclosedQuote('"')),
                        },
                        Some(c) => current.push(c),
                        None => return Err(ParseError::UnclosedQuote('"')),
                    }
                }
            }
            c => {
                current.push(c);
                in_token = true;
            }
        }
    }

    if in_token {
        tokens.push(current);
    }
    Ok(tokens)
}
