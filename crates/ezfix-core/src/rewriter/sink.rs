//! Destination for rewritten records.

use std::io::Write;

use crate::marc::{MarcError, MarcWriter, Record};

/// Accepts records in the order the rewriter produces them.
pub trait RecordSink {
    fn write_record(&mut self, record: &Record) -> Result<(), MarcError>;
}

impl<W: Write> RecordSink for MarcWriter<W> {
    fn write_record(&mut self, record: &Record) -> Result<(), MarcError> {
        self.write(record)
    }
}

/// Collects records in memory.
impl RecordSink for Vec<Record> {
    fn write_record(&mut self, record: &Record) -> Result<(), MarcError> {
        self.push(record.clone());
        Ok(())
    }
}
