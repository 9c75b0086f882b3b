//! Log and progress notifications sent from a run to whoever is watching it.

use std::fmt;
use std::path::PathBuf;

use super::RunSummary;

/// One notification. `Display` renders the single log line shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunEvent {
    Reading { input: PathBuf },
    Progress { records: u64 },
    ChangeLogWritten { path: PathBuf },
    /// Change log could not be written; the rewritten records are still valid.
    ChangeLogFailed { path: PathBuf, error: String },
    ProcessingFailed { error: String },
    Finished(RunSummary),
}

/// `1234567` -> `1,234,567`.
fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

impl fmt::Display for RunEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunEvent::Reading { input } => write!(f, "Reading: {}", input.display()),
            RunEvent::Progress { records } => {
                write!(f, "Processed {} records...", group_thousands(*records))
            }
            RunEvent::ChangeLogWritten { path } => {
                write!(f, "CSV change log written: {}", path.display())
            }
            RunEvent::ChangeLogFailed { path, error } => {
                write!(f, "Could not write CSV {}: {}", path.display(), error)
            }
            RunEvent::ProcessingFailed { error } => write!(f, "Error during processing: {}", error),
            RunEvent::Finished(summary) => write!(
                f,
                "Done. Records read: {}; records updated: {}; 856$u links changed: {}",
                summary.records, summary.touched_records, summary.changed_links
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousands_grouping() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }

    #[test]
    fn event_lines() {
        assert_eq!(
            RunEvent::Progress { records: 12000 }.to_string(),
            "Processed 12,000 records..."
        );
        assert_eq!(
            RunEvent::Finished(RunSummary {
                records: 3,
                touched_records: 2,
                changed_links: 4,
            })
            .to_string(),
            "Done. Records read: 3; records updated: 2; 856$u links changed: 4"
        );
        assert_eq!(
            RunEvent::Reading {
                input: PathBuf::from("in.mrc")
            }
            .to_string(),
            "Reading: in.mrc"
        );
    }
}
