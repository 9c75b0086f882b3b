//! End-to-end: MARC file on disk through `job::run_file`.

mod common;

use ezfix_core::job::{run_file, ChangeLogStatus};
use ezfix_core::marc::{MarcReader, Record};
use ezfix_core::paths::{self, RunPaths};
use ezfix_core::rewriter::RunEvent;
use tempfile::tempdir;

fn read_all(path: &std::path::Path) -> Vec<Record> {
    let bytes = std::fs::read(path).unwrap();
    MarcReader::new(bytes.as_slice())
        .collect::<Result<_, _>>()
        .unwrap()
}

#[test]
fn fixes_links_and_logs_changes() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("batch.mrc");
    let records = vec![
        common::catalog_record(
            " ocm0001 ",
            &[&[
                "https://ezproxy.example.edu/login?url=https://journals.example.com/a b",
                "https://journals.example.com/open",
            ]],
        ),
        common::catalog_record("ocm0002", &[&["https://journals.example.com/direct"]]),
        common::catalog_record(
            "ocm0003",
            &[
                &["https://ezproxy.example.edu/login?qurl=https%3A%2F%2Fx.example.com"],
                &["https://ezproxy.example.edu/login?auth=sso&url=https://y.example.com&url=https://z.example.com"],
            ],
        ),
    ];
    std::fs::write(&input, common::encode(&records)).unwrap();

    let run_paths = RunPaths {
        output: paths::sibling_with_suffix(&input, paths::DEFAULT_OUTPUT_SUFFIX),
        change_log: Some(paths::sibling_with_suffix(&input, paths::DEFAULT_CHANGE_LOG_SUFFIX)),
        input,
    };
    paths::validate(&run_paths, false).unwrap();

    let mut events = Vec::new();
    let report = run_file(&run_paths, |e| events.push(e)).unwrap();

    assert_eq!(report.summary.records, 3);
    assert_eq!(report.summary.touched_records, 2);
    assert_eq!(report.summary.changed_links, 2);
    assert!(matches!(report.change_log, ChangeLogStatus::Written(_)));
    assert!(events.iter().any(|e| matches!(e, RunEvent::ChangeLogWritten { .. })));

    let out = read_all(&run_paths.output);
    assert_eq!(out.len(), 3);
    let urls: Vec<Vec<String>> = out
        .iter()
        .map(|r| {
            r.fields_by_tag("856")
                .flat_map(|f| f.subfield_values(b'u'))
                .collect()
        })
        .collect();
    assert_eq!(
        urls[0],
        vec![
            "https://ezproxy.example.edu/login?qurl=https%3A%2F%2Fjournals.example.com%2Fa%20b",
            "https://journals.example.com/open",
        ]
    );
    assert_eq!(urls[1], vec!["https://journals.example.com/direct"]);
    assert_eq!(
        urls[2],
        vec![
            "https://ezproxy.example.edu/login?qurl=https%3A%2F%2Fx.example.com",
            "https://ezproxy.example.edu/login?auth=sso&qurl=https%3A%2F%2Fy.example.com",
        ]
    );

    // Untouched record passes through byte for byte.
    assert_eq!(out[1].to_bytes().unwrap(), records[1].to_bytes().unwrap());

    let csv = std::fs::read_to_string(run_paths.change_log.as_ref().unwrap()).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "record_001,original_856u,updated_856u");
    assert_eq!(
        lines[1],
        "ocm0001,https://ezproxy.example.edu/login?url=https://journals.example.com/a b,\
         https://ezproxy.example.edu/login?qurl=https%3A%2F%2Fjournals.example.com%2Fa%20b"
    );
    assert!(lines[2].starts_with("ocm0003,"));
    assert_eq!(lines.len(), 3);
}

#[test]
fn second_run_over_fixed_output_changes_nothing() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in.mrc");
    std::fs::write(
        &input,
        common::encode(&[common::catalog_record(
            "1",
            &[&["http://p.example.edu/login?url=http://a.com/?x=1&y=2"]],
        )]),
    )
    .unwrap();

    let first = RunPaths {
        input: input.clone(),
        output: dir.path().join("once.mrc"),
        change_log: None,
    };
    run_file(&first, |_| {}).unwrap();

    let second = RunPaths {
        input: first.output.clone(),
        output: dir.path().join("twice.mrc"),
        change_log: Some(dir.path().join("twice.csv")),
    };
    let report = run_file(&second, |_| {}).unwrap();
    assert_eq!(report.summary.changed_links, 0);
    assert_eq!(report.change_log, ChangeLogStatus::NoChanges);
    assert_eq!(
        std::fs::read(&first.output).unwrap(),
        std::fs::read(&second.output).unwrap()
    );
}
