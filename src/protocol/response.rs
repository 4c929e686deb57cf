//! Response definitions
//!
//! Represents the single-line replies written back to the shell.

use std::fmt;

/// A response to print for one command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// Write acknowledged (durable and indexed)
    Ok,

    /// Value found by GET
    Value(String),

    /// GET on a key that was never set
    Null,

    /// Command rejected or failed
    Error(String),
}

impl Response {
    /// Create an ERROR response
    pub fn error(message: impl Into<String>) -> Self {
        Response::Error(message.into())
    }

    /// Build a GET response from a lookup result
    pub fn from_lookup(value: Option<&str>) -> Self {
        match value {
            Some(v) => Response::Value(v.to_string()),
            None => Response::Null,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Response::Error(_))
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Response::Ok => f.write_str("OK"),
            Response::Value(v) => f.write_str(v),
            Response::Null => f.write_str("NULL"),
            Response::Error(msg) => write!(f, "ERR {}", msg),
        }
    }
}
