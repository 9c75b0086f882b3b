//! CSV change log: one row per rewritten 856$u value.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::rewriter::ChangeRecord;

pub const CHANGE_LOG_HEADER: [&str; 3] = ["record_001", "original_856u", "updated_856u"];

/// Writes `changes` to `path` as UTF-8 CSV with a header row, replacing any existing file.
pub fn write_change_log(path: &Path, changes: &[ChangeRecord]) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create change log {}", path.display()))?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(BufWriter::new(file));

    writer.write_record(CHANGE_LOG_HEADER)?;
    for change in changes {
        writer.serialize(change)?;
    }
    writer
        .flush()
        .with_context(|| format!("failed to flush change log {}", path.display()))?;
    tracing::debug!(path = %path.display(), rows = changes.len(), "change log written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn change(id: &str, original: &str, updated: &str) -> ChangeRecord {
        ChangeRecord {
            record_id: id.to_string(),
            original: original.to_string(),
            updated: updated.to_string(),
        }
    }

    #[test]
    fn writes_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("changes.csv");
        write_change_log(
            &path,
            &[
                change("1", "http://p/login?url=a", "http://p/login?qurl=a"),
                change("2", "http://p/login?url=b", "http://p/login?qurl=b"),
            ],
        )
        .unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            text,
            "record_001,original_856u,updated_856u\n\
             1,http://p/login?url=a,http://p/login?qurl=a\n\
             2,http://p/login?url=b,http://p/login?qurl=b\n"
        );
    }

    #[test]
    fn quotes_values_with_commas() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("changes.csv");
        write_change_log(&path, &[change("a,b", "x", "y\"z")]).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.ends_with("\"a,b\",x,\"y\"\"z\"\n"));
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope").join("changes.csv");
        let err = write_change_log(&path, &[change("1", "a", "b")]).unwrap_err();
        assert!(format!("{err:#}").contains("failed to create change log"));
    }
}
