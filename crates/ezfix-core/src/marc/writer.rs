//! ISO 2709 writer.

use std::io::Write;

use super::{MarcError, Record};

/// Writes encoded records to any byte sink.
pub struct MarcWriter<W: Write> {
    inner: W,
    records_written: u64,
}

impl<W: Write> MarcWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            records_written: 0,
        }
    }

    pub fn write(&mut self, record: &Record) -> Result<(), MarcError> {
        let bytes = record.to_bytes()?;
        self.inner.write_all(&bytes)?;
        self.records_written += 1;
        Ok(())
    }

    pub fn records_written(&self) -> u64 {
        self.records_written
    }

    pub fn flush(&mut self) -> Result<(), MarcError> {
        self.inner.flush()?;
        Ok(())
    }

    /// Flushes and returns the underlying sink.
    pub fn into_inner(mut self) -> Result<W, MarcError> {
        self.flush()?;
        Ok(self.inner)
    }
}
