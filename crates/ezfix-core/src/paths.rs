//! Output path defaults and pre-run checks.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_OUTPUT_SUFFIX: &str = "_fixed.mrc";
pub const DEFAULT_CHANGE_LOG_SUFFIX: &str = "_changes.csv";

/// Files involved in one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunPaths {
    pub input: PathBuf,
    pub output: PathBuf,
    /// `None` disables the change log.
    pub change_log: Option<PathBuf>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PathError {
    #[error("input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("output folder does not exist: {}", .0.display())]
    OutputDirMissing(PathBuf),

    #[error("output file exists (pass --force to overwrite): {}", .0.display())]
    OutputExists(PathBuf),

    #[error("output file would overwrite the input file: {}", .0.display())]
    OutputIsInput(PathBuf),

    #[error("change log folder does not exist: {}", .0.display())]
    ChangeLogDirMissing(PathBuf),
}

/// `dir/records.mrc` + `_fixed.mrc` -> `dir/records_fixed.mrc`.
pub fn sibling_with_suffix(input: &Path, suffix: &str) -> PathBuf {
    let mut name: OsString = input.with_extension("").into_os_string();
    name.push(suffix);
    PathBuf::from(name)
}

/// Directory a file would be created in; `.` for bare file names.
fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Checks that a run can start without clobbering anything unexpectedly.
pub fn validate(paths: &RunPaths, overwrite: bool) -> Result<(), PathError> {
    if !paths.input.exists() {
        return Err(PathError::InputNotFound(paths.input.clone()));
    }

    let out_dir = parent_dir(&paths.output);
    if !out_dir.is_dir() {
        return Err(PathError::OutputDirMissing(out_dir));
    }
    if paths.output.exists() {
        let same = match (paths.input.canonicalize(), paths.output.canonicalize()) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        };
        if same {
            return Err(PathError::OutputIsInput(paths.output.clone()));
        }
        if !overwrite {
            return Err(PathError::OutputExists(paths.output.clone()));
        }
    }

    if let Some(change_log) = &paths.change_log {
        let csv_dir = parent_dir(change_log);
        if !csv_dir.is_dir() {
            return Err(PathError::ChangeLogDirMissing(csv_dir));
        }
    }
    Ok(())
}
