//! Streaming ISO 2709 reader.

use std::io::{ErrorKind, Read};

use super::record::parse_digits;
use super::{MarcError, Record, LEADER_LEN};

/// Bytes that may trail the last record (editors and FTP transfers add them).
fn is_trailer_byte(b: u8) -> bool {
    matches!(b, b'\n' | b'\r' | b' ' | 0x1A)
}

/// Reads records one at a time from any byte source.
///
/// Iteration stops at a clean end of input. The first error is yielded once
/// and iteration ends after it.
pub struct MarcReader<R> {
    inner: R,
    done: bool,
    records_read: u64,
}

impl<R: Read> MarcReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            done: false,
            records_read: 0,
        }
    }

    /// Number of records decoded so far.
    pub fn records_read(&self) -> u64 {
        self.records_read
    }

    fn read_record(&mut self) -> Result<Option<Record>, MarcError> {
        let mut len_buf = [0u8; 5];
        let got = read_full(&mut self.inner, &mut len_buf)?;
        if got == 0 {
            return Ok(None);
        }
        if got < len_buf.len() {
            if len_buf[..got].iter().all(|b| is_trailer_byte(*b)) {
                return Ok(None);
            }
            return Err(MarcError::Truncated {
                expected: len_buf.len(),
                actual: got,
            });
        }

        let record_len = parse_digits(&len_buf)
            .filter(|len| *len > LEADER_LEN)
            .ok_or_else(|| MarcError::InvalidLength(String::from_utf8_lossy(&len_buf).into_owned()))?;

        let mut buf = vec![0u8; record_len];
        buf[..len_buf.len()].copy_from_slice(&len_buf);
        let rest = read_full(&mut self.inner, &mut buf[len_buf.len()..])?;
        if rest < record_len - len_buf.len() {
            return Err(MarcError::Truncated {
                expected: record_len,
                actual: len_buf.len() + rest,
            });
        }

        let record = Record::from_bytes(&buf)?;
        self.records_read += 1;
        Ok(Some(record))
    }
}

impl<R: Read> Iterator for MarcReader<R> {
    type Item = Result<Record, MarcError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.read_record() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

/// Fills `buf` as far as the source allows; returns the byte count (short only at EOF).
fn read_full<R: Read>(reader: &mut R, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
