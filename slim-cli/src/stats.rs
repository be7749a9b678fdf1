//! Byte counting for `--stats`.

use std::fmt;
use std::io::{self, Read, Write};

/// Wraps a reader or writer and counts the bytes that pass through it.
#[derive(Debug)]
pub struct Counter<T> {
    inner: T,
    count: u64,
}

impl<T> Counter<T> {
    /// Start counting at zero.
    #[must_use]
    pub const fn new(inner: T) -> Self {
        Self { inner, count: 0 }
    }

    /// Bytes read or written so far.
    #[must_use]
    pub const fn count(&self) -> u64 {
        self.count
    }
}

impl<R: Read> Read for Counter<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.count += n as u64;
        Ok(n)
    }
}

impl<W: Write> Write for Counter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.count += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Sizes of one reduction, displayed as `ratio<TAB>read<TAB>written`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    /// Bytes read from the input.
    pub read: u64,
    /// Bytes written to the output.
    pub written: u64,
}

impl Stats {
    /// Output size relative to input size; 0 for empty input.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn ratio(&self) -> f64 {
        if self.read == 0 {
            return 0.0;
        }
        self.written as f64 / self.read as f64
    }
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}\t{}\t{}", self.ratio(), self.read, self.written)
    }
}
