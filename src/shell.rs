//! Shell Module
//!
//! Runs the read → parse → execute → respond loop over any line source.
//! The binary wires it to stdin/stdout; tests drive it with in-memory
//! buffers.

use std::io::{BufRead, Write};

use crate::engine::Engine;
use crate::error::{QuillError, Result};
use crate::protocol::{parse_line, Command, Response};

/// How a shell session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// Input reached end of file
    Eof,

    /// An `EXIT` command was read
    Exit,
}

/// Handles one interactive session against an engine
pub struct Shell<'e, R, W> {
    /// Engine receiving the commands
    engine: &'e mut Engine,

    /// Line source
    input: R,

    /// Response sink
    output: W,

    /// Commands handled so far
    commands: u64,
}

impl<'e, R: BufRead, W: Write> Shell<'e, R, W> {
    pub fn new(engine: &'e mut Engine, input: R, output: W) -> Self {
        Self {
            engine,
            input,
            output,
            commands: 0,
        }
    }

    /// Handle the session (blocking until EXIT or end of input)
    ///
    /// Only failures to read input or write responses end the session with
    /// an error; engine failures are reported to the client as `ERR` lines.
    pub fn run(&mut self) -> Result<SessionEnd> {
        let mut line = String::new();

        loop {
            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                tracing::debug!(commands = self.commands, "Input closed");
                return Ok(SessionEnd::Eof);
            }

            let command = match parse_line(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(e) => {
                    tracing::debug!(error = %e, "Rejected input line");
                    self.send_response(e.into())?;
                    continue;
                }
            };

            self.commands += 1;
            tracing::trace!(?command, "Received command");

            if command == Command::Exit {
                tracing::debug!(commands = self.commands, "EXIT received");
                return Ok(SessionEnd::Exit);
            }

            let response = self.execute_command(command);
            self.send_response(response)?;
        }
    }

    /// Execute a command against the engine
    fn execute_command(&mut self, command: Command) -> Response {
        match self.engine.execute(command) {
            Ok(response) => response,
            Err(QuillError::InvalidKey(reason)) => {
                tracing::debug!(%reason, "Rejected key");
                Response::error("invalid key")
            }
            Err(e) => {
                tracing::error!(error = %e, "Command failed");
                Response::error("internal")
            }
        }
    }

    /// Send a response line
    fn send_response(&mut self, response: Response) -> Result<()> {
        writeln!(self.output, "{}", response)?;
        self.output.flush()?;
        Ok(())
    }

    /// Number of commands handled so far
    pub fn commands(&self) -> u64 {
        self.commands
    }
}
