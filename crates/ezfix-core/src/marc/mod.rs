//! MARC 21 records in ISO 2709 transmission format.
//!
//! A record is a 24-byte leader, a directory of 12-byte entries (tag, length,
//! start offset) and the variable fields. Fields keep their raw bytes so that
//! anything this crate does not rewrite goes back out exactly as it came in.

mod error;
mod reader;
mod record;
mod writer;

pub use error::MarcError;
pub use reader::MarcReader;
pub use record::{Field, Record, Subfield};
pub use writer::MarcWriter;

pub const LEADER_LEN: usize = 24;
pub const DIRECTORY_ENTRY_LEN: usize = 12;
pub const FIELD_TERMINATOR: u8 = 0x1E;
pub const RECORD_TERMINATOR: u8 = 0x1D;
pub const SUBFIELD_DELIMITER: u8 = 0x1F;
/// Indicator count for MARC 21 data fields.
pub const INDICATOR_LEN: usize = 2;

/// Largest record length expressible in the 5-digit leader field.
pub const MAX_RECORD_LEN: usize = 99_999;
/// Largest field length expressible in the 4-digit directory field.
pub const MAX_FIELD_LEN: usize = 9_999;
