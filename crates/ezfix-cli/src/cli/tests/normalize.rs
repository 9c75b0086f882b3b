use super::{parse, Cli};
use crate::cli::CliCommand;
use clap::Parser;

#[test]
fn cli_parse_normalize_many() {
    match parse(&["ezfix", "normalize", "http://a/login?url=x", "http://b/"]) {
        CliCommand::Normalize { urls } => {
            assert_eq!(urls, vec!["http://a/login?url=x", "http://b/"]);
        }
        _ => panic!("expected Normalize"),
    }
}

#[test]
fn cli_normalize_needs_a_url() {
    assert!(Cli::try_parse_from(["ezfix", "normalize"]).is_err());
}
