use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

fn raceledger() -> Command {
    let mut cmd = Command::new(cargo_bin!("raceledger"));
    cmd.env_remove("RACELEDGER_ME")
        .env_remove("RACELEDGER_PEERS")
        .env_remove("RACELEDGER_DB_PATH");
    cmd
}

fn add_result<'a>(cmd: &'a mut Command, time: &str) -> &'a mut Command {
    cmd.arg("add-result")
        .args(["--challenge-name", "Corporate Challenge"])
        .args(["--challenge-year", "2018"])
        .args(["--plc", "1"])
        .args(["--gpic", "1"])
        .args(["--bib", "42"])
        .args(["--name", "Alice"])
        .args(["--time", time])
        .args(["--gender", "F"])
}

#[test]
fn test_cli_me() {
    raceledger()
        .arg("me")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"{"me":"O=PartyA,L=London,C=GB"}"#));
}

#[test]
fn test_cli_peers_exclude_self() {
    raceledger()
        .args(["--me", "O=PartyB,L=New York,C=US"])
        .args(["--peer", "O=PartyA,L=London,C=GB"])
        .args(["--peer", "O=PartyB,L=New York,C=US"])
        .arg("peers")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            r#"{"peers":["O=PartyA,L=London,C=GB"]}"#,
        ));
}

#[test]
fn test_cli_add_result_commits() {
    let mut cmd = raceledger();
    add_result(&mut cmd, "35.2")
        .args(["--party-name", "O=PartyB,L=New York,C=US"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Transaction id "))
        .stdout(predicate::str::contains("committed to ledger."));
}

#[test]
fn test_cli_add_result_zero_time_fails() {
    let mut cmd = raceledger();
    add_result(&mut cmd, "0")
        .args(["--party-name", "O=PartyB,L=New York,C=US"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("time must be positive"));
}

#[test]
fn test_cli_add_result_unknown_party_fails() {
    let mut cmd = raceledger();
    add_result(&mut cmd, "35.2")
        .args(["--party-name", "O=Nobody,L=Nowhere,C=XX"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Party named O=Nobody,L=Nowhere,C=XX cannot be found.",
        ));
}

#[test]
fn test_cli_add_result_with_self_fails() {
    let mut cmd = raceledger();
    add_result(&mut cmd, "35.2")
        .args(["--party-name", "O=PartyA,L=London,C=GB"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains(
            "proposer and counterparty cannot be the same entity",
        ));
}

#[test]
fn test_cli_add_result_missing_party_fails() {
    let mut cmd = raceledger();
    add_result(&mut cmd, "35.2")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Query parameter 'partyName' missing or has wrong format.",
        ));
}

#[test]
fn test_cli_submit_end_to_end() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = raceledger();
    cmd.arg("submit").arg("tests/fixtures/results.csv");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "transactionId,linearId,challengeName,challengeYear,plc,gpic,bib,name,time,gender,proposer,counterparty",
        ))
        // Alice agreed with PartyB
        .stdout(predicate::str::contains(
            ",Corporate Challenge,2018,1,1,42,Alice,35.2,F,\"O=PartyA,L=London,C=GB\",\"O=PartyB,L=New York,C=US\"",
        ))
        // Bob agreed with PartyC
        .stdout(predicate::str::contains(
            ",Bob,36.05,M,\"O=PartyA,L=London,C=GB\",\"O=PartyC,L=Paris,C=FR\"",
        ));

    Ok(())
}
