//! Command definitions
//!
//! Represents commands read from the shell.

/// Command types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandType {
    Set,
    Get,
    Exit,
}

impl CommandType {
    /// Match a command name, ignoring ASCII case
    pub fn from_name(name: &str) -> Option<Self> {
        if name.eq_ignore_ascii_case("SET") {
            Some(CommandType::Set)
        } else if name.eq_ignore_ascii_case("GET") {
            Some(CommandType::Get)
        } else if name.eq_ignore_ascii_case("EXIT") {
            Some(CommandType::Exit)
        } else {
            None
        }
    }

    /// Usage line shown when the argument count is wrong
    pub fn usage(self) -> &'static str {
        match self {
            CommandType::Set => "SET <key> <value>",
            CommandType::Get => "GET <key>",
            CommandType::Exit => "EXIT",
        }
    }
}

/// A parsed command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Store a value under a key
    Set { key: String, value: String },

    /// Look up a key
    Get { key: String },

    /// End the session
    Exit,
}

impl Command {
    /// Get the command type
    pub fn command_type(&self) -> CommandType {
        match self {
            Command::Set { .. } => CommandType::Set,
            Command::Get { .. } => CommandType::Get,
            Command::Exit => CommandType::Exit,
        }
    }
}
