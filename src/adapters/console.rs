//! Console-backed human opponent
//!
//! A blocking request/response adapter: each move request renders the
//! board, prompts for a cell index, and re-prompts on invalid input
//! (non-numeric, out of range, or occupied cell). Illegal input never
//! reaches the environment.

use std::io::{BufRead, StdinLock, Stdout, Write};

use crate::{
    Result,
    game::Board,
    ports::MoveSource,
};

/// Human move source reading from any buffered reader.
///
/// Generic over reader and writer so tests can drive it with in-memory
/// buffers while the play command uses stdin/stdout.
pub struct ConsoleInput<R, W> {
    reader: R,
    writer: W,
    name: String,
}

impl ConsoleInput<StdinLock<'static>, Stdout> {
    /// Console input over stdin/stdout
    pub fn stdin() -> Self {
        ConsoleInput::new(std::io::stdin().lock(), std::io::stdout())
    }
}

impl<R: BufRead, W: Write> ConsoleInput<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            name: "Human".to_string(),
        }
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        let bytes = self.reader.read_line(&mut line).map_err(|e| crate::Error::Io {
            operation: "read move from console".to_string(),
            source: e,
        })?;
        if bytes == 0 {
            return Ok(None); // input stream closed
        }
        Ok(Some(line.trim().to_string()))
    }
}

impl<R: BufRead, W: Write> MoveSource for ConsoleInput<R, W> {
    fn next_move(&mut self, board: &Board, legal: &[usize]) -> Result<usize> {
        let io_err = |e: std::io::Error| crate::Error::Io {
            operation: "write console prompt".to_string(),
            source: e,
        };

        writeln!(self.writer, "\n{board}").map_err(io_err)?;

        loop {
            write!(self.writer, "Your move (0-8): ").map_err(io_err)?;
            self.writer.flush().map_err(io_err)?;

            let Some(input) = self.read_line()? else {
                return Err(crate::Error::Io {
                    operation: "read move from console".to_string(),
                    source: std::io::Error::new(
                        std::io::ErrorKind::UnexpectedEof,
                        "input stream closed",
                    ),
                });
            };

            let error = match input.parse::<usize>() {
                Ok(pos) if legal.contains(&pos) => return Ok(pos),
                Ok(pos) if pos > 8 => crate::Error::InvalidUserInput {
                    input,
                    reason: "cell index must be between 0 and 8".to_string(),
                },
                Ok(_) => crate::Error::InvalidUserInput {
                    input,
                    reason: "that cell is already occupied".to_string(),
                },
                Err(_) => crate::Error::InvalidUserInput {
                    input,
                    reason: "enter a number between 0 and 8".to_string(),
                },
            };
            writeln!(self.writer, "{error}").map_err(io_err)?;
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
