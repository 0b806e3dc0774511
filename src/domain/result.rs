use super::party::Party;
use crate::error::Result;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier of a race result, fixed when the result is drafted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LinearId(String);

impl LinearId {
    /// Generates a fresh 128-bit random identifier.
    pub fn new() -> Self {
        Self(hex::encode(rand::random::<[u8; 16]>()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for LinearId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<String> for LinearId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for LinearId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The user-supplied part of a race result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultEntry {
    pub challenge_name: String,
    pub challenge_year: String,
    /// Overall placement.
    pub plc: String,
    /// Placement within gender.
    pub gpic: String,
    pub bib: String,
    pub name: String,
    /// Elapsed time.
    pub time: Decimal,
    pub gender: String,
}

/// A race result agreed between a proposer and a counterparty.
///
/// Once drafted a result is never modified; any change in its fields
/// invalidates the signatures collected over it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RaceResult {
    pub challenge_name: String,
    pub challenge_year: String,
    pub plc: String,
    pub gpic: String,
    pub bib: String,
    pub name: String,
    pub time: Decimal,
    pub gender: String,
    /// The party registering the result.
    pub proposer: Party,
    /// The party receiving and approving the result.
    pub counterparty: Party,
    pub linear_id: LinearId,
}

impl RaceResult {
    pub fn draft(entry: ResultEntry, proposer: Party, counterparty: Party) -> Self {
        Self {
            challenge_name: entry.challenge_name,
            challenge_year: entry.challenge_year,
            plc: entry.plc,
            gpic: entry.gpic,
            bib: entry.bib,
            name: entry.name,
            time: entry.time,
            gender: entry.gender,
            proposer,
            counterparty,
            linear_id: LinearId::new(),
        }
    }

    pub fn participants(&self) -> [&Party; 2] {
        [&self.proposer, &self.counterparty]
    }

    /// The bytes both parties sign.
    pub fn canonical_bytes(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::party::PublicKey;
    use rust_decimal_macros::dec;

    fn entry() -> ResultEntry {
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

    #[test]
    fn test_draft_assigns_fresh_linear_ids() {
        let a = Party::new("O=PartyA,L=London,C=GB", PublicKey([1; 32]));
        let b = Party::new("O=PartyB,L=New York,C=US", PublicKey([2; 32]));

        let first = RaceResult::draft(entry(), a.clone(), b.clone());
        let second = RaceResult::draft(entry(), a, b);

        assert_eq!(first.linear_id.as_str().len(), 32);
        assert_ne!(first.linear_id, second.linear_id);
        assert_eq!(first.time, dec!(35.2));
    }

    #[test]
    fn test_entry_deserializes_from_camel_case_csv() {
        let csv = "challengeName,challengeYear,plc,gpic,bib,name,time,gender\n\
                   Corporate Challenge,2018,1,1,42,Alice,35.2,F";
        let mut reader = csv::Reader::from_reader(csv.as_bytes());
        let parsed: ResultEntry = reader.deserialize().next().unwrap().unwrap();
        assert_eq!(parsed, entry());
    }

    #[test]
    fn test_canonical_bytes_are_stable_across_json_round_trip() {
        let a = Party::new("O=PartyA,L=London,C=GB", PublicKey([1; 32]));
        let b = Party::new("O=PartyB,L=New York,C=US", PublicKey([2; 32]));
        let record = RaceResult::draft(entry(), a, b);

        let bytes = record.canonical_bytes().unwrap();
        let back: RaceResult = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(back, record);
        assert_eq!(back.canonical_bytes().unwrap(), bytes);
    }
}
