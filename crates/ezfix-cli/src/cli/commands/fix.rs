//! `ezfix fix <input>` – rewrite a MARC file on a worker thread.
//!
//! The rewrite pass runs under `spawn_blocking`; its events come back over an
//! unbounded channel and are printed here as they arrive.

use anyhow::{Context, Result};
use ezfix_core::config::EzfixConfig;
use ezfix_core::job::{self, ChangeLogStatus, RunReport};
use ezfix_core::paths::{self, RunPaths};
use ezfix_core::rewriter::RunEvent;
use std::path::PathBuf;

#[derive(Debug, Clone, Default)]
pub struct FixArgs {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub changes: Option<PathBuf>,
    pub no_changes: bool,
    pub force: bool,
}

/// Fills in default output and change-log paths next to the input.
pub fn resolve_paths(cfg: &EzfixConfig, args: &FixArgs) -> RunPaths {
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| paths::sibling_with_suffix(&args.input, &cfg.output_suffix));
    let change_log = if args.no_changes {
        None
    } else {
        args.changes.clone().or_else(|| {
            cfg.write_change_log
                .then(|| paths::sibling_with_suffix(&args.input, &cfg.change_log_suffix))
        })
    };
    RunPaths {
        input: args.input.clone(),
        output,
        change_log,
    }
}

/// Runs `job::run_file` on a blocking worker, printing each event as it arrives.
pub async fn run_paths(paths: RunPaths) -> Result<RunReport> {
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel::<RunEvent>();
    let worker = tokio::task::spawn_blocking(move || {
        job::run_file(&paths, move |event| {
            // Nobody listening is fine; the run itself must finish.
            let _ = tx.send(event);
        })
    });

    while let Some(event) = rx.recv().await {
        println!("{event}");
    }

    worker.await.context("rewrite worker panicked")?
}

pub async fn run_fix(cfg: &EzfixConfig, args: FixArgs) -> Result<()> {
    let targets = resolve_paths(cfg, &args);
    paths::validate(&targets, args.force)?;

    println!("Input:  {}", targets.input.display());
    println!("Output: {}", targets.output.display());
    if let Some(csv) = &targets.change_log {
        println!("CSV:    {}", csv.display());
    }
    println!("Starting...");

    let report = run_paths(targets).await?;
    if let ChangeLogStatus::Failed { path, .. } = &report.change_log {
        tracing::warn!(path = %path.display(), "finished without a change log");
    }
    println!("All done.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ezfix_core::marc::{Field, Record};
    use std::path::Path;

    fn args(input: &str) -> FixArgs {
        FixArgs {
            input: PathBuf::from(input),
            ..FixArgs::default()
        }
    }

    #[test]
    fn defaults_sit_next_to_input() {
        let paths = resolve_paths(&EzfixConfig::default(), &args("/data/batch.mrc"));
        assert_eq!(paths.output, PathBuf::from("/data/batch_fixed.mrc"));
        assert_eq!(paths.change_log, Some(PathBuf::from("/data/batch_changes.csv")));
    }

    #[test]
    fn explicit_paths_win() {
        let mut a = args("/data/batch.mrc");
        a.output = Some(PathBuf::from("/out/x.mrc"));
        a.changes = Some(PathBuf::from("/out/x.csv"));
        let paths = resolve_paths(&EzfixConfig::default(), &a);
        assert_eq!(paths.output, PathBuf::from("/out/x.mrc"));
        assert_eq!(paths.change_log, Some(PathBuf::from("/out/x.csv")));
    }

    #[test]
    fn change_log_can_be_disabled() {
        let mut a = args("batch.mrc");
        a.no_changes = true;
        assert_eq!(resolve_paths(&EzfixConfig::default(), &a).change_log, None);

        let cfg = EzfixConfig {
            write_change_log: false,
            ..EzfixConfig::default()
        };
        assert_eq!(resolve_paths(&cfg, &args("batch.mrc")).change_log, None);
    }

    fn write_fixture(path: &Path) {
        let rec = Record::default()
            .with_field(Field::control("001", "r1"))
            .with_field(Field::data("856", *b"40", &[(b'u', "http://p/login?url=http://a.com")]));
        std::fs::write(path, rec.to_bytes().unwrap()).unwrap();
    }

    #[tokio::test]
    async fn run_paths_drives_worker_to_completion() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.mrc");
        write_fixture(&input);
        let paths = RunPaths {
            input,
            output: dir.path().join("out.mrc"),
            change_log: Some(dir.path().join("out.csv")),
        };

        let report = run_paths(paths.clone()).await.unwrap();
        assert_eq!(report.summary.changed_links, 1);
        assert!(paths.output.exists());
        assert!(paths.change_log.unwrap().exists());
    }

    #[tokio::test]
    async fn run_fix_refuses_to_overwrite_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.mrc");
        write_fixture(&input);
        std::fs::write(dir.path().join("in_fixed.mrc"), b"keep me").unwrap();

        let a = FixArgs {
            input: input.clone(),
            ..FixArgs::default()
        };
        let err = run_fix(&EzfixConfig::default(), a).await.unwrap_err();
        assert!(err.to_string().contains("output file exists"));
        assert_eq!(std::fs::read(dir.path().join("in_fixed.mrc")).unwrap(), b"keep me");

        let forced = FixArgs {
            input,
            force: true,
            ..FixArgs::default()
        };
        run_fix(&EzfixConfig::default(), forced).await.unwrap();
        assert_ne!(std::fs::read(dir.path().join("in_fixed.mrc")).unwrap(), b"keep me");
    }
}
