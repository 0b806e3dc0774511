use super::party::Party;
use super::result::RaceResult;
use super::signature::Signature;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Identifier of a transaction on the ledger: the SHA-256 of the signed record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(String);

impl TransactionId {
    pub fn of(bytes: &[u8]) -> Self {
        let digest = Sha256::digest(bytes);
        Self(hex::encode_upper(digest))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for TransactionId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A race result with the signatures collected for it so far.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignedRecord {
    pub record: RaceResult,
    pub signatures: Vec<Signature>,
}

impl SignedRecord {
    pub fn new(record: RaceResult) -> Self {
        Self {
            record,
            signatures: Vec::new(),
        }
    }

    pub fn with_signature(mut self, signature: Signature) -> Self {
        self.signatures.push(signature);
        self
    }

    pub fn signature_of(&self, party: &Party) -> Option<&Signature> {
        self.signatures.iter().find(|s| s.is_by(party))
    }

    /// True if `party` has a signature that verifies against the record.
    pub fn is_signed_by(&self, party: &Party) -> bool {
        self.signature_of(party)
            .is_some_and(|signature| signature.verify(&self.record))
    }

    pub fn id(&self) -> Result<TransactionId> {
        let bytes = serde_json::to_vec(self)?;
        Ok(TransactionId::of(&bytes))
    }
}

/// A fully signed record as it sits on the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommittedRecord {
    pub id: TransactionId,
    pub signed: SignedRecord,
}

impl CommittedRecord {
    pub fn record(&self) -> &RaceResult {
        &self.signed.record
    }
}
