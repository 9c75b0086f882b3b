//! Record and field model with ISO 2709 encode/decode.

use super::{
    MarcError, DIRECTORY_ENTRY_LEN, FIELD_TERMINATOR, INDICATOR_LEN, LEADER_LEN,
    MAX_FIELD_LEN, MAX_RECORD_LEN, RECORD_TERMINATOR, SUBFIELD_DELIMITER,
};

/// Leader used for records built in memory; lengths are filled in on encode.
const DEFAULT_LEADER: &[u8; LEADER_LEN] = b"00000nam a2200000 a 4500";

/// One subfield of a data field, borrowed from the field's bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subfield<'a> {
    pub code: u8,
    pub value: &'a [u8],
}

impl Subfield<'_> {
    pub fn value_lossy(&self) -> String {
        String::from_utf8_lossy(self.value).into_owned()
    }
}

/// A variable field. `data` holds everything between the directory offset and
/// the field terminator (indicators and subfield delimiters included).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    tag: String,
    data: Vec<u8>,
}

impl Field {
    pub fn from_raw(tag: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            tag: tag.into(),
            data,
        }
    }

    pub fn control(tag: impl Into<String>, value: &str) -> Self {
        Self::from_raw(tag, value.as_bytes().to_vec())
    }

    /// Builds a data field from indicators and `(code, value)` subfields.
    pub fn data(tag: impl Into<String>, indicators: [u8; 2], subfields: &[(u8, &str)]) -> Self {
        let mut data = indicators.to_vec();
        for (code, value) in subfields {
            data.push(SUBFIELD_DELIMITER);
            data.push(*code);
            data.extend_from_slice(value.as_bytes());
        }
        Self::from_raw(tag, data)
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn raw(&self) -> &[u8] {
        &self.data
    }

    /// Control fields are `001`–`009`.
    pub fn is_control(&self) -> bool {
        self.tag.len() == 3 && self.tag.bytes().all(|b| b.is_ascii_digit()) && self.tag.as_str() < "010"
    }

    /// Field content as text (meaningful for control fields).
    pub fn value(&self) -> String {
        String::from_utf8_lossy(&self.data).into_owned()
    }

    pub fn indicators(&self) -> Option<[u8; 2]> {
        if self.is_control() || self.data.len() < INDICATOR_LEN {
            return None;
        }
        Some([self.data[0], self.data[1]])
    }

    fn split_indicators(&self) -> (&[u8], &[u8]) {
        self.data.split_at(self.data.len().min(INDICATOR_LEN))
    }

    /// Subfields in field order. Control fields have none.
    pub fn subfields(&self) -> Vec<Subfield<'_>> {
        if self.is_control() {
            return Vec::new();
        }
        let (_, body) = self.split_indicators();
        body.split(|b| *b == SUBFIELD_DELIMITER)
            .skip(1)
            .filter_map(|chunk| {
                chunk
                    .split_first()
                    .map(|(code, value)| Subfield { code: *code, value })
            })
            .collect()
    }

    /// Values of every subfield with `code`, in order.
    pub fn subfield_values(&self, code: u8) -> Vec<String> {
        self.subfields()
            .into_iter()
            .filter(|s| s.code == code)
            .map(|s| s.value_lossy())
            .collect()
    }

    /// Replaces the values of the `code` subfields in place.
    ///
    /// The n-th `code` subfield receives `values[n]`. Surplus subfields are
    /// removed and surplus values appended at the end of the field. All other
    /// bytes (indicators, other subfields) are kept as they were.
    pub fn replace_subfield_values(&mut self, code: u8, values: &[String]) {
        if self.is_control() {
            return;
        }
        let mut replacements = values.iter();
        let (indicators, body) = self.split_indicators();
        let mut chunks = body.split(|b| *b == SUBFIELD_DELIMITER);

        let mut out = Vec::with_capacity(self.data.len());
        out.extend_from_slice(indicators);
        if let Some(lead) = chunks.next() {
            out.extend_from_slice(lead);
        }
        for chunk in chunks {
            if chunk.first() == Some(&code) {
                if let Some(value) = replacements.next() {
                    out.push(SUBFIELD_DELIMITER);
                    out.push(code);
                    out.extend_from_slice(value.as_bytes());
                }
            } else {
                out.push(SUBFIELD_DELIMITER);
                out.extend_from_slice(chunk);
            }
        }
        for value in replacements {
            out.push(SUBFIELD_DELIMITER);
            out.push(code);
            out.extend_from_slice(value.as_bytes());
        }
        self.data = out;
    }
}

/// A bibliographic record: leader plus ordered fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    leader: [u8; LEADER_LEN],
    fields: Vec<Field>,
}

impl Default for Record {
    fn default() -> Self {
        Self::new(*DEFAULT_LEADER)
    }
}

impl Record {
    pub fn new(leader: [u8; LEADER_LEN]) -> Self {
        Self {
            leader,
            fields: Vec::new(),
        }
    }

    pub fn leader(&self) -> &[u8; LEADER_LEN] {
        &self.leader
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn push(&mut self, field: Field) {
        self.fields.push(field);
    }

    pub fn with_field(mut self, field: Field) -> Self {
        self.push(field);
        self
    }

    pub fn fields_by_tag<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Field> + 'a {
        self.fields.iter().filter(move |f| f.tag == tag)
    }

    pub fn fields_by_tag_mut<'a>(
        &'a mut self,
        tag: &'a str,
    ) -> impl Iterator<Item = &'a mut Field> + 'a {
        self.fields.iter_mut().filter(move |f| f.tag == tag)
    }

    /// Value of the first field with `tag`, if present.
    pub fn control_value(&self, tag: &str) -> Option<String> {
        self.fields_by_tag(tag).next().map(Field::value)
    }

    /// Decodes one complete record (leader through record terminator).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, MarcError> {
        if bytes.len() < LEADER_LEN {
            return Err(MarcError::Truncated {
                expected: LEADER_LEN,
                actual: bytes.len(),
            });
        }
        let mut leader = [0u8; LEADER_LEN];
        leader.copy_from_slice(&bytes[..LEADER_LEN]);

        let record_len = parse_digits(&leader[0..5])
            .filter(|len| *len > LEADER_LEN)
            .ok_or_else(|| MarcError::InvalidLength(lossy(&leader[0..5])))?;
        if bytes.len() < record_len {
            return Err(MarcError::Truncated {
                expected: record_len,
                actual: bytes.len(),
            });
        }
        let bytes = &bytes[..record_len];
        if bytes[record_len - 1] != RECORD_TERMINATOR {
            return Err(MarcError::MissingRecordTerminator);
        }

        let base = parse_digits(&leader[12..17])
            .filter(|base| *base > LEADER_LEN && *base < record_len)
            .ok_or_else(|| MarcError::InvalidBaseAddress(lossy(&leader[12..17])))?;

        let directory = match bytes[LEADER_LEN..base].split_last() {
            Some((&FIELD_TERMINATOR, entries)) => entries,
            _ => {
                return Err(MarcError::InvalidDirectory {
                    index: 0,
                    reason: "directory is not terminated".to_string(),
                })
            }
        };
        if directory.len() % DIRECTORY_ENTRY_LEN != 0 {
            return Err(MarcError::InvalidDirectory {
                index: directory.len() / DIRECTORY_ENTRY_LEN,
                reason: format!("trailing {} bytes", directory.len() % DIRECTORY_ENTRY_LEN),
            });
        }

        let data = &bytes[base..record_len - 1];
        let mut fields = Vec::with_capacity(directory.len() / DIRECTORY_ENTRY_LEN);
        for (index, entry) in directory.chunks(DIRECTORY_ENTRY_LEN).enumerate() {
            let tag = std::str::from_utf8(&entry[0..3])
                .ok()
                .filter(|t| t.bytes().all(|b| b.is_ascii_alphanumeric()))
                .ok_or_else(|| MarcError::InvalidDirectory {
                    index,
                    reason: format!("bad tag {:?}", lossy(&entry[0..3])),
                })?;
            let length = parse_digits(&entry[3..7]).ok_or_else(|| MarcError::InvalidDirectory {
                index,
                reason: format!("bad length {:?}", lossy(&entry[3..7])),
            })?;
            let start = parse_digits(&entry[7..12]).ok_or_else(|| MarcError::InvalidDirectory {
                index,
                reason: format!("bad start {:?}", lossy(&entry[7..12])),
            })?;
            let end = start + length;
            if end > data.len() {
                return Err(MarcError::FieldOutOfBounds {
                    tag: tag.to_string(),
                    start,
                    length,
                    available: data.len(),
                });
            }
            let raw = &data[start..end];
            let raw = raw.strip_suffix(&[FIELD_TERMINATOR]).unwrap_or(raw);
            fields.push(Field::from_raw(tag, raw.to_vec()));
        }

        Ok(Self { leader, fields })
    }

    /// Encodes the record. Record length and base address in the leader are
    /// recomputed; the rest of the leader is written as stored.
    pub fn to_bytes(&self) -> Result<Vec<u8>, MarcError> {
        let mut directory = Vec::with_capacity(self.fields.len() * DIRECTORY_ENTRY_LEN + 1);
        let mut body = Vec::new();
        for field in &self.fields {
            if field.tag.len() != 3 || !field.tag.bytes().all(|b| b.is_ascii_alphanumeric()) {
                return Err(MarcError::InvalidTag(field.tag.clone()));
            }
            let length = field.data.len() + 1;
            if length > MAX_FIELD_LEN {
                return Err(MarcError::FieldTooLong {
                    tag: field.tag.clone(),
                    length,
                });
            }
            let start = body.len();
            if start > MAX_RECORD_LEN {
                return Err(MarcError::RecordTooLong(start));
            }
            directory.extend_from_slice(format!("{}{:04}{:05}", field.tag, length, start).as_bytes());
            body.extend_from_slice(&field.data);
            body.push(FIELD_TERMINATOR);
        }
        directory.push(FIELD_TERMINATOR);

        let base = LEADER_LEN + directory.len();
        let total = base + body.len() + 1;
        if total > MAX_RECORD_LEN {
            return Err(MarcError::RecordTooLong(total));
        }

        let mut leader = self.leader;
        leader[0..5].copy_from_slice(format!("{:05}", total).as_bytes());
        leader[12..17].copy_from_slice(format!("{:05}", base).as_bytes());

        let mut out = Vec::with_capacity(total);
        out.extend_from_slice(&leader);
        out.extend_from_slice(&directory);
        out.extend_from_slice(&body);
        out.push(RECORD_TERMINATOR);
        Ok(out)
    }
}

/// Parses an all-ASCII-digit slice.
pub(super) fn parse_digits(bytes: &[u8]) -> Option<usize> {
    if bytes.is_empty() || !bytes.iter().all(u8::is_ascii_digit) {
        return None;
    }
    std::str::from_utf8(bytes).ok()?.parse().ok()
}

fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}
