use crate::wrap::{wrap_with, WrapOptions};
use std::io::{self, Write};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum SinkError {
    #[error("Failed to write line to output device: {0}")]
    Write(#[from] io::Error),
}

/// A line-oriented output device such as a printer driver or a terminal.
pub trait LineSink {
    fn print_line(&mut self, line: &str) -> Result<(), SinkError>;

    /// Called once after the last line of a message.
    fn finish(&mut self) -> Result<(), SinkError> {
        Ok(())
    }
}

/// Writes each line, newline-terminated, to any [`Write`] implementation.
pub struct WriterSink<W: Write> {
    writer: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> LineSink for WriterSink<W> {
    fn print_line(&mut self, line: &str) -> Result<(), SinkError> {
        writeln!(self.writer, "{}", line)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), SinkError> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Collects printed lines in memory.
#[derive(Debug, Default, Clone)]
pub struct VecSink {
    pub lines: Vec<String>,
    pub finished: bool,
}

impl LineSink for VecSink {
    fn print_line(&mut self, line: &str) -> Result<(), SinkError> {
        self.lines.push(line.to_string());
        Ok(())
    }

    fn finish(&mut self) -> Result<(), SinkError> {
        self.finished = true;
        Ok(())
    }
}

/// Wraps `message` and hands every resulting line to `sink` in order.
///
/// A message that is empty after trimming prints nothing. Returns the
/// number of lines printed.
pub fn print_message<S: LineSink + ?Sized>(
    sink: &mut S,
    message: &str,
    options: &WrapOptions,
) -> Result<usize, SinkError> {
    let message = message.trim();
    if message.is_empty() {
        debug!("empty message, nothing to print");
        return Ok(0);
    }

    let lines = wrap_with(message, options);
    for line in &lines {
        sink.print_line(line)?;
    }
    sink.finish()?;
    Ok(lines.len())
}
