//! Console prompting and printing
//!
//! Wraps an input reader and an output writer so the interactive session can
//! run against stdin/stdout or against in-memory buffers in tests.

use crate::error::{BikeshareError, Result};
use std::fmt::Display;
use std::io::{self, BufRead, Write};
use tracing::debug;

/// Line-oriented console over any reader and writer
#[derive(Debug)]
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl Console<io::StdinLock<'static>, io::Stdout> {
    /// Console bound to the process's stdin and stdout
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print `prompt` and read one line of input.
    ///
    /// Only the line terminator is stripped; surrounding spaces are kept.
    pub fn ask(&mut self, prompt: &str) -> Result<String> {
        self.write(prompt)?;
        self.output.flush().map_err(BikeshareError::console)?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .map_err(BikeshareError::console)?;
        if read == 0 {
            return Err(BikeshareError::InputClosed);
        }

        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        debug!("Answer: {:?}", line);
        Ok(line)
    }

    /// Ask a yes/no question; only a case-insensitive "yes" counts as yes
    pub fn confirm(&mut self, prompt: &str) -> Result<bool> {
        let answer = self.ask(prompt)?;
        Ok(answer.to_lowercase() == "yes")
    }

    /// Print a value followed by a newline
    pub fn say(&mut self, text: impl Display) -> Result<()> {
        writeln!(self.output, "{text}").map_err(BikeshareError::console)
    }

    /// Print a value as-is
    pub fn write(&mut self, text: impl Display) -> Result<()> {
        write!(self.output, "{text}").map_err(BikeshareError::console)
    }

    /// Consume the console and hand back its writer
    pub fn into_output(self) -> W {
        self.output
    }
}
