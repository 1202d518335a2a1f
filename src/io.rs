use std::io::{BufRead, Write};

use crate::fault::Fault;

/// The three byte streams the interpreted program talks to.
///
/// Input is line-oriented; output and error are append-only sinks. The
/// caller decides what backs them: process stdio in the CLI, in-memory
/// buffers in tests.
pub struct Io<'a> {
    pub input: &'a mut dyn BufRead,
    pub output: &'a mut dyn Write,
    pub error: &'a mut dyn Write,
}

impl<'a> Io<'a> {
    /// Reads one line from program input. End of stream yields `None`;
    /// otherwise the line is returned with a single trailing newline
    /// (and a carriage return preceding it) removed.
    pub fn read_line(&mut self) -> Result<Option<String>, Fault> {
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => Ok(None),
            Ok(_) => {
                if line.ends_with('\n') {
                    line.pop();
                    if line.ends_with('\r') {
                        line.pop();
                    }
                }
                Ok(Some(line))
            }
            Err(_) => Err(Fault::InputFile),
        }
    }

    pub fn write(&mut self, text: &str) -> Result<(), Fault> {
        self.output
            .write_all(text.as_bytes())
            .map_err(|_| Fault::Internal)
    }

    pub fn write_error(&mut self, text: &str) -> Result<(), Fault> {
        self.error
            .write_all(text.as_bytes())
            .map_err(|_| Fault::Internal)
    }
}
