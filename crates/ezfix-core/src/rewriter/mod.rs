//! Record rewriter: drives URL normalization over the 856$u links of every
//! record in a stream.
//!
//! Records are handled strictly in source order. Each record is rewritten in
//! place, committed to a [`RecordSink`], and counted in a [`RunSummary`]; every
//! individual URL that changed yields one [`ChangeRecord`].

mod error;
mod event;
mod sink;
mod summary;

pub use error::RewriteError;
pub use event::RunEvent;
pub use sink::RecordSink;
pub use summary::{ChangeRecord, RunOutcome, RunSummary};

use crate::ezproxy::{self, Normalized};
use crate::marc::{MarcError, Record};

/// Control field holding the record identifier.
pub const RECORD_ID_TAG: &str = "001";
/// Electronic location and access.
pub const LINK_FIELD_TAG: &str = "856";
/// Uniform resource identifier subfield of [`LINK_FIELD_TAG`].
pub const URL_SUBFIELD: u8 = b'u';
/// A progress event is emitted every this many records.
pub const PROGRESS_INTERVAL: u64 = 1000;

/// Normalizes every 856$u value of `record` in place.
///
/// Returns one change per URL that changed; an empty vector means the record
/// was left untouched.
pub fn rewrite_record(record: &mut Record) -> Vec<ChangeRecord> {
    let record_id = record
        .control_value(RECORD_ID_TAG)
        .unwrap_or_default()
        .trim()
        .to_string();

    let mut changes = Vec::new();
    for field in record.fields_by_tag_mut(LINK_FIELD_TAG) {
        let urls = field.subfield_values(URL_SUBFIELD);
        if urls.is_empty() {
            continue;
        }

        let mut any_changed = false;
        let mut rewritten = Vec::with_capacity(urls.len());
        for original in urls {
            let Normalized { url, changed } = ezproxy::normalize(&original);
            if changed {
                any_changed = true;
                changes.push(ChangeRecord {
                    record_id: record_id.clone(),
                    original,
                    updated: url.clone(),
                });
            }
            rewritten.push(url);
        }

        if any_changed {
            field.replace_subfield_values(URL_SUBFIELD, &rewritten);
        }
    }
    changes
}

/// Runs one pass over `records`, writing every record (changed or not) to `sink`.
///
/// `emit` receives a [`RunEvent::Progress`] every [`PROGRESS_INTERVAL`]
/// records. A read or write failure stops the pass; records already handed to
/// the sink stay there.
pub fn process<I, S, F>(records: I, sink: &mut S, mut emit: F) -> Result<RunOutcome, RewriteError>
where
    I: IntoIterator<Item = Result<Record, MarcError>>,
    S: RecordSink + ?Sized,
    F: FnMut(RunEvent),
{
    let mut summary = RunSummary::default();
    let mut changes = Vec::new();

    for item in records {
        let position = summary.records + 1;
        let mut record = item.map_err(|source| RewriteError::Read { position, source })?;
        summary.records = position;

        let record_changes = rewrite_record(&mut record);
        if !record_changes.is_empty() {
            summary.touched_records += 1;
            summary.changed_links += record_changes.len() as u64;
            tracing::debug!(
                position,
                record_id = %record_changes[0].record_id,
                links = record_changes.len(),
                "rewrote record"
            );
            changes.extend(record_changes);
        }

        sink.write_record(&record)
            .map_err(|source| RewriteError::Write { position, source })?;

        if position % PROGRESS_INTERVAL == 0 {
            emit(RunEvent::Progress { records: position });
        }
    }

    tracing::info!(
        records = summary.records,
        touched = summary.touched_records,
        changed = summary.changed_links,
        "rewrite pass complete"
    );
    Ok(RunOutcome { summary, changes })
}
