//! Field-level rules every race result must satisfy.
//!
//! The proposer and the counterparty each run these checks on their own;
//! a counterparty never relies on the proposer having done so.

use super::result::RaceResult;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Violation {
    #[error("proposer and counterparty cannot be the same entity")]
    SameParty,
    #[error("challenge name must be non-blank")]
    BlankChallengeName,
    #[error("challenge year must be non-blank")]
    BlankChallengeYear,
    #[error("placement code must be non-blank")]
    BlankPlc,
    #[error("gender placement code must be non-blank")]
    BlankGpic,
    #[error("bib must be non-blank")]
    BlankBib,
    #[error("participant name must be non-blank")]
    BlankName,
    #[error("time must be positive")]
    NonPositiveTime,
    #[error("gender must be non-blank")]
    BlankGender,
}

/// Checks a record, reporting the first rule it breaks.
pub fn validate(record: &RaceResult) -> Result<(), Violation> {
    match violations(record).into_iter().next() {
        Some(violation) => Err(violation),
        None => Ok(()),
    }
}

/// Every rule the record breaks, in checking order.
pub fn violations(record: &RaceResult) -> Vec<Violation> {
    let checks = [
        (
            record.proposer.is_same_entity(&record.counterparty),
            Violation::SameParty,
        ),
        (
            is_blank(&record.challenge_name),
            Violation::BlankChallengeName,
        ),
        (
            is_blank(&record.challenge_year),
            Violation::BlankChallengeYear,
        ),
        (is_blank(&record.plc), Violation::BlankPlc),
        (is_blank(&record.gpic), Violation::BlankGpic),
        (is_blank(&record.bib), Violation::BlankBib),
        (is_blank(&record.name), Violation::BlankName),
        (record.time <= Decimal::ZERO, Violation::NonPositiveTime),
        (is_blank(&record.gender), Violation::BlankGender),
    ];

    checks
        .into_iter()
        .filter_map(|(failed, violation)| failed.then_some(violation))
        .collect()
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
