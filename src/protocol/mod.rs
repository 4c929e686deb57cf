//! Protocol Module
//!
//! Defines the line-oriented text protocol spoken by the shell.
//!
//! ## Request Format
//! One command per line; names are case-insensitive:
//! ```text
//! SET <key> <value...>     value = remaining tokens joined by one space
//! GET <key>
//! EXIT
//! ```
//! Values containing whitespace may be quoted: `SET greeting "hello world"`.
//!
//! ## Responses
//! One line per command:
//! - `OK` — write is durable and indexed
//! - `<value>` — GET hit
//! - `NULL` — GET miss
//! - `ERR <reason>` — syntax, usage, unknown command or internal failure

mod command;
mod parser;
mod response;

pub use command::{Command, CommandType};
pub use parser::{parse_line, tokenize, ParseError};
pub use response::Response;
