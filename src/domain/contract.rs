//! Rules a signed record must meet before it may be recorded on the ledger.

use super::transaction::SignedRecord;
use super::validation::{self, Violation};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContractViolation {
    #[error(transparent)]
    Field(#[from] Violation),
    #[error("all of the participants must be signers, {0} has not signed")]
    MissingSigner(String),
    #[error("only participants may sign, found signer {0}")]
    UnexpectedSigner(String),
}

pub fn verify(tx: &SignedRecord) -> Result<(), ContractViolation> {
    validation::validate(&tx.record)?;

    let participants = tx.record.participants();
    for party in participants {
        if !tx.is_signed_by(party) {
            return Err(ContractViolation::MissingSigner(party.name.clone()));
        }
    }

    if let Some(stranger) = tx
        .signatures
        .iter()
        .find(|signature| !participants.iter().any(|party| signature.is_by(party)))
    {
        return Err(ContractViolation::UnexpectedSigner(
            stranger.signer.to_string(),
        ));
    }

    Ok(())
}
