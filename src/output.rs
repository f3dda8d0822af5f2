//! Output management module
//!
//! Writes permutations to stdout (or any `Write`) one per line, with
//! buffering, an optional line cap, and broken-pipe detection.

use std::io::{self, BufWriter, Write};

/// Default buffer size for output (64KB)
pub const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;

/// True if the error means the reading end of the pipe went away
pub fn is_broken_pipe(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::BrokenPipe
}

/// Maximum number of lines to emit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputLimit {
    #[default]
    Unlimited,
    AtMost(usize),
}

impl OutputLimit {
    /// Build from the `--max` value, where 0 means no limit
    pub fn from_max(max: usize) -> Self {
        if max == 0 {
            Self::Unlimited
        } else {
            Self::AtMost(max)
        }
    }

    /// Whether `written` lines already reach the cap
    #[inline]
    pub fn reached(&self, written: u64) -> bool {
        match *self {
            Self::Unlimited => false,
            Self::AtMost(max) => written >= max as u64,
        }
    }

    pub fn as_option(&self) -> Option<usize> {
        match *self {
            Self::Unlimited => None,
            Self::AtMost(max) => Some(max),
        }
    }
}

/// How a write loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The generator ran out
    Exhausted,
    /// The line cap was reached
    LimitReached,
    /// The consumer closed the pipe
    BrokenPipe,
}

/// Line writer with buffering
pub struct OutputWriter<W: Write> {
    writer: BufWriter<W>,
    lines_written: u64,
    bytes_written: u64,
}

impl<W: Write> OutputWriter<W> {
    /// Create a new output writer
    pub fn new(inner: W, buffer_size: usize) -> Self {
        Self {
            writer: BufWriter::with_capacity(buffer_size, inner),
            lines_written: 0,
            bytes_written: 0,
        }
    }

    /// Write a line to the output
    pub fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.lines_written += 1;
        self.bytes_written += line.len() as u64 + 1; // +1 for newline
        Ok(())
    }

    /// Flush the buffer
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    /// Write every item until the iterator ends, the limit is hit, or the
    /// pipe closes. Any other I/O error is returned.
    pub fn write_all_lines<I>(&mut self, lines: I, limit: OutputLimit) -> io::Result<StopReason>
    where
        I: IntoIterator<Item = String>,
    {
        self.write_all_lines_with(lines, limit, |_| {})
    }

    /// Same as [`write_all_lines`](Self::write_all_lines), calling `on_line`
    /// after each line is written.
    pub fn write_all_lines_with<I, F>(
        &mut self,
        lines: I,
        limit: OutputLimit,
        mut on_line: F,
    ) -> io::Result<StopReason>
    where
        I: IntoIterator<Item = String>,
        F: FnMut(u64),
    {
        if limit.reached(self.lines_written) {
            return self.finish(StopReason::LimitReached);
        }

        for line in lines {
            match self.write_line(&line) {
                Ok(()) => on_line(self.lines_written),
                Err(e) if is_broken_pipe(&e) => return Ok(StopReason::BrokenPipe),
                Err(e) => return Err(e),
            }

            if limit.reached(self.lines_written) {
                return self.finish(StopReason::LimitReached);
            }
        }

        self.finish(StopReason::Exhausted)
    }

    fn finish(&mut self, reason: StopReason) -> io::Result<StopReason> {
        match self.flush() {
            Ok(()) => Ok(reason),
            Err(e) if is_broken_pipe(&e) => Ok(StopReason::BrokenPipe),
            Err(e) => Err(e),
        }
    }

    /// Get number of lines written
    pub fn lines_written(&self) -> u64 {
        self.lines_written
    }

    /// Get bytes written
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Unwrap the inner writer, flushing first
    pub fn into_inner(self) -> io::Result<W> {
        self.writer.into_inner().map_err(|e| e.into_error())
    }
}
