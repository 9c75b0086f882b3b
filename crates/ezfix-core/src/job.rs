//! File-level run: MARC file in, rewritten MARC file and optional CSV out.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;

use crate::changelog;
use crate::marc::{MarcReader, MarcWriter};
use crate::paths::RunPaths;
use crate::rewriter::{self, RunEvent, RunOutcome, RunSummary};

/// What happened to the change log at the end of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeLogStatus {
    NotRequested,
    /// Requested, but nothing changed so no file was written.
    NoChanges,
    Written(PathBuf),
    Failed { path: PathBuf, error: String },
}

#[derive(Debug, Clone)]
pub struct RunReport {
    pub summary: RunSummary,
    pub change_log: ChangeLogStatus,
}

/// Rewrites `paths.input` into `paths.output`, then writes the change log.
///
/// Events are passed to `emit` as they happen. Failing to read or write
/// records is an error (the partial output file is left in place); failing to
/// write the change log is only reported.
pub fn run_file<F>(paths: &RunPaths, mut emit: F) -> Result<RunReport>
where
    F: FnMut(RunEvent),
{
    emit(RunEvent::Reading {
        input: paths.input.clone(),
    });

    let outcome = match rewrite_file(paths, &mut emit) {
        Ok(outcome) => outcome,
        Err(err) => {
            let error = format!("{err:#}");
            tracing::error!(%error, "rewrite failed");
            emit(RunEvent::ProcessingFailed { error });
            return Err(err);
        }
    };

    let change_log = match &paths.change_log {
        None => ChangeLogStatus::NotRequested,
        Some(_) if outcome.changes.is_empty() => ChangeLogStatus::NoChanges,
        Some(path) => match changelog::write_change_log(path, &outcome.changes) {
            Ok(()) => {
                emit(RunEvent::ChangeLogWritten { path: path.clone() });
                ChangeLogStatus::Written(path.clone())
            }
            Err(err) => {
                let error = format!("{err:#}");
                tracing::warn!(path = %path.display(), %error, "could not write change log");
                emit(RunEvent::ChangeLogFailed {
                    path: path.clone(),
                    error: error.clone(),
                });
                ChangeLogStatus::Failed {
                    path: path.clone(),
                    error,
                }
            }
        },
    };

    emit(RunEvent::Finished(outcome.summary));
    Ok(RunReport {
        summary: outcome.summary,
        change_log,
    })
}

fn rewrite_file<F>(paths: &RunPaths, emit: &mut F) -> Result<RunOutcome>
where
    F: FnMut(RunEvent),
{
    let input = File::open(&paths.input)
        .with_context(|| format!("failed to open input {}", paths.input.display()))?;
    let output = File::create(&paths.output)
        .with_context(|| format!("failed to create output {}", paths.output.display()))?;

    let reader = MarcReader::new(BufReader::new(input));
    let mut writer = MarcWriter::new(BufWriter::new(output));
    let outcome = rewriter::process(reader, &mut writer, &mut *emit)?;
    writer
        .flush()
        .with_context(|| format!("failed to flush output {}", paths.output.display()))?;

    tracing::info!(
        input = %paths.input.display(),
        output = %paths.output.display(),
        records = outcome.summary.records,
        "output written"
    );
    Ok(outcome)
}
