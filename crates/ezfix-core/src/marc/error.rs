//! Errors raised while decoding or encoding ISO 2709 records.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MarcError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Input ended inside a record.
    #[error("truncated record: expected {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },

    #[error("invalid record length {0:?}")]
    InvalidLength(String),

    #[error("invalid base address of data {0:?}")]
    InvalidBaseAddress(String),

    #[error("invalid directory entry {index}: {reason}")]
    InvalidDirectory { index: usize, reason: String },

    #[error("field {tag} at offset {start} with length {length} runs past the data area ({available} bytes)")]
    FieldOutOfBounds {
        tag: String,
        start: usize,
        length: usize,
        available: usize,
    },

    #[error("record does not end with a record terminator")]
    MissingRecordTerminator,

    #[error("invalid tag {0:?}: tags are three ASCII alphanumerics")]
    InvalidTag(String),

    #[error("field {tag} is {length} bytes; at most 9999 fit in a directory entry")]
    FieldTooLong { tag: String, length: usize },

    #[error("record is {0} bytes; at most 99999 fit in the leader")]
    RecordTooLong(usize),
}
