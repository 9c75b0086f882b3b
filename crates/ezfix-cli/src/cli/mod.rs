//! CLI for ezfix.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use ezfix_core::config;
use std::path::PathBuf;

use commands::{run_fix, run_normalize, FixArgs};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "ezfix")]
#[command(about = "Repair EZproxy login URLs in MARC 856$u links", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Rewrite a MARC file, writing fixed records and a CSV change log.
    Fix {
        /// Input MARC (.mrc) file.
        input: PathBuf,

        /// Output MARC file (default: <input>_fixed.mrc).
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,

        /// CSV change log path (default: <input>_changes.csv).
        #[arg(long, value_name = "PATH", conflicts_with = "no_changes")]
        changes: Option<PathBuf>,

        /// Do not write a CSV change log.
        #[arg(long)]
        no_changes: bool,

        /// Overwrite the output file if it exists.
        #[arg(short, long)]
        force: bool,
    },

    /// Normalize URLs given on the command line and print the result.
    Normalize {
        /// One or more URLs.
        #[arg(required = true)]
        urls: Vec<String>,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        match cli.command {
            CliCommand::Fix {
                input,
                output,
                changes,
                no_changes,
                force,
            } => {
                let cfg = config::load_or_init()?;
                tracing::debug!("loaded config: {:?}", cfg);
                let args = FixArgs {
                    input,
                    output,
                    changes,
                    no_changes,
                    force,
                };
                run_fix(&cfg, args).await?;
            }
            CliCommand::Normalize { urls } => run_normalize(&urls),
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
