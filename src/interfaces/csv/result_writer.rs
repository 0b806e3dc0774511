use crate::domain::transaction::CommittedRecord;
use crate::error::Result;
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ResultRow<'a> {
    transaction_id: &'a str,
    linear_id: &'a str,
    challenge_name: &'a str,
    challenge_year: &'a str,
    plc: &'a str,
    gpic: &'a str,
    bib: &'a str,
    name: &'a str,
    time: Decimal,
    gender: &'a str,
    proposer: &'a str,
    counterparty: &'a str,
}

impl<'a> From<&'a CommittedRecord> for ResultRow<'a> {
    fn from(committed: &'a CommittedRecord) -> Self {
        let record = committed.record();
        Self {
            transaction_id: committed.id.as_str(),
            linear_id: record.linear_id.as_str(),
            challenge_name: &record.challenge_name,
            challenge_year: &record.challenge_year,
            plc: &record.plc,
            gpic: &record.gpic,
            bib: &record.bib,
            name: &record.name,
            time: record.time,
            gender: &record.gender,
            proposer: &record.proposer.name,
            counterparty: &record.counterparty.name,
        }
    }
}

/// Writes committed race results as CSV, one row per ledger entry.
pub struct ResultWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> ResultWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_results(&mut self, results: &[CommittedRecord]) -> Result<()> {
        for committed in results {
            self.writer.serialize(ResultRow::from(committed))?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
