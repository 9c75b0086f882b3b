//! Counters and change rows produced by a rewrite pass.

use serde::Serialize;

/// Totals for one pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Records read.
    pub records: u64,
    /// Records with at least one changed link.
    pub touched_records: u64,
    /// Individual 856$u values changed.
    pub changed_links: u64,
}

/// One changed URL. Rows of the CSV change log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeRecord {
    pub record_id: String,
    pub original: String,
    pub updated: String,
}

#[derive(Debug, Clone, Default)]
pub struct RunOutcome {
    pub summary: RunSummary,
    pub changes: Vec<ChangeRecord>,
}
