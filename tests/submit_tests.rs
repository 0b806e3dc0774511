use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::io::Write;
use std::process::Command;

mod common;

fn submit(path: &std::path::Path) -> Command {
    let mut cmd = Command::new(cargo_bin!("raceledger"));
    cmd.env_remove("RACELEDGER_PEERS")
        .env_remove("RACELEDGER_DB_PATH")
        .arg("submit")
        .arg(path);
    cmd
}

#[test]
fn test_bad_rows_do_not_stop_submission() {
    let mut csv = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        csv,
        "challengeName,challengeYear,plc,gpic,bib,name,time,gender,partyName"
    )
    .unwrap();
    // unreadable time
    writeln!(csv, "Corporate Challenge,2018,1,1,42,Alice,fast,F,\"{}\"", common::PARTY_B).unwrap();
    // rejected by validation
    writeln!(csv, "Corporate Challenge,2018,2,2,43,Bob,0,M,\"{}\"", common::PARTY_B).unwrap();
    // unknown counterparty
    writeln!(csv, "Corporate Challenge,2018,3,3,44,Carol,40.1,F,\"O=Nobody,L=Nowhere,C=XX\"").unwrap();
    writeln!(csv, "Corporate Challenge,2018,4,4,45,Dave,41.7,M,\"{}\"", common::PARTY_C).unwrap();

    let output = submit(csv.path()).output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stdout.lines().count(), 2);
    assert!(stdout.contains(",Dave,41.7,M,"));
    assert!(!stdout.contains("Bob"));
    assert!(stderr.contains("Error reading result"));
    assert!(stderr.contains("time must be positive"));
    assert!(stderr.contains("Party named O=Nobody,L=Nowhere,C=XX cannot be found."));
}

#[test]
fn test_many_submissions_keep_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("many.csv");
    common::generate_csv(&path, 50).unwrap();

    let output = submit(&path).output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let names: Vec<&str> = stdout
        .lines()
        .skip(1)
        .map(|line| line.split(',').nth(7).unwrap())
        .collect();
    assert_eq!(names.len(), 50);
    assert_eq!(names[0], "Runner 1");
    assert_eq!(names[49], "Runner 50");
}

#[test]
fn test_empty_submission_file() {
    let mut csv = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        csv,
        "challengeName,challengeYear,plc,gpic,bib,name,time,gender,partyName"
    )
    .unwrap();

    submit(csv.path())
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Error").not());
}
