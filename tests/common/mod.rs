#![allow(dead_code)]

use raceledger::domain::result::ResultEntry;
use rust_decimal_macros::dec;
use std::fs::File;
use std::io::Error;
use std::path::Path;

pub const PARTY_B: &str = "O=PartyB,L=New York,C=US";
pub const PARTY_C: &str = "O=PartyC,L=Paris,C=FR";

pub fn corporate_challenge() -> ResultEntry {
    ResultEntry {
        challenge_name: "Corporate Challenge".to_string(),
        challenge_year: "2018".to_string(),
        plc: "1".to_string(),
        gpic: "1".to_string(),
        bib: "42".to_string(),
        name: "Alice".to_string(),
        time: dec!(35.2),
        gender: "F".to_string(),
    }
}

/// Writes `rows` valid submissions alternating between the two default peers.
pub fn generate_csv(path: &Path, rows: usize) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);

    wtr.write_record([
        "challengeName",
        "challengeYear",
        "plc",
        "gpic",
        "bib",
        "name",
        "time",
        "gender",
        "partyName",
    ])?;

    for i in 1..=rows {
        let party = if i % 2 == 0 { PARTY_C } else { PARTY_B };
        wtr.write_record([
            "Corporate Challenge",
            "2018",
            &i.to_string(),
            &i.to_string(),
            &(100 + i).to_string(),
            &format!("Runner {}", i),
            &format!("{}.5", 30 + i),
            "F",
            party,
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
