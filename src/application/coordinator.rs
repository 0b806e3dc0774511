use crate::domain::agreement::{Agreement, CounterpartyReply, Rejection, Stage};
use crate::domain::contract;
use crate::domain::party::Party;
use crate::domain::ports::{Counterparty, LedgerBox};
use crate::domain::result::{RaceResult, ResultEntry};
use crate::domain::signature::SigningIdentity;
use crate::domain::transaction::{CommittedRecord, SignedRecord};
use crate::domain::validation;
use crate::error::{AgreementError, Result};
use tracing::{info, warn};

/// Drives an agreement from the proposer's side.
///
/// The coordinator owns the proposer's signing identity and the ledger the
/// mutually signed record is committed to. Every agreement runs strictly
/// sequentially; a rejection at any point ends it and is returned to the
/// caller, never retried.
pub struct AgreementCoordinator {
    identity: SigningIdentity,
    ledger: LedgerBox,
}

impl AgreementCoordinator {
    /// Creates a new `AgreementCoordinator`.
    ///
    /// # Arguments
    ///
    /// * `identity` - The proposer's party and signing key.
    /// * `ledger` - Where fully signed records are committed.
    pub fn new(identity: SigningIdentity, ledger: LedgerBox) -> Self {
        Self { identity, ledger }
    }

    pub fn party(&self) -> &Party {
        self.identity.party()
    }

    /// Builds the unsigned record for `entry`, addressed to `counterparty`.
    pub fn draft(&self, entry: ResultEntry, counterparty: &Party) -> Agreement {
        Agreement::Drafting(RaceResult::draft(
            entry,
            self.identity.party().clone(),
            counterparty.clone(),
        ))
    }

    /// Runs a full agreement and returns the committed record.
    ///
    /// A rejection by either side is surfaced as [`AgreementError::Rejected`].
    pub async fn propose(
        &self,
        entry: ResultEntry,
        counterparty: &dyn Counterparty,
    ) -> Result<CommittedRecord> {
        let agreement = self.draft(entry, counterparty.party());
        match self.run(agreement, counterparty).await? {
            Agreement::Committed(committed) => Ok(committed),
            Agreement::Rejected(rejection) => Err(AgreementError::Rejected(rejection)),
            other => Err(AgreementError::InternalError(
                format!("agreement stopped in non-terminal phase {}", other.phase()).into(),
            )),
        }
    }

    /// Advances `agreement` until it is committed or rejected.
    pub async fn run(
        &self,
        mut agreement: Agreement,
        counterparty: &dyn Counterparty,
    ) -> Result<Agreement> {
        while !agreement.is_terminal() {
            let from = agreement.phase();
            agreement = self.step(agreement, counterparty).await?;
            let to = agreement.phase();
            match &agreement {
                Agreement::Rejected(rejection) => {
                    warn!(%from, %to, reason = %rejection.reason, "{}", to.label())
                }
                _ => info!(%from, %to, "{}", to.label()),
            }
        }
        Ok(agreement)
    }

    /// Performs a single transition.
    pub async fn step(
        &self,
        agreement: Agreement,
        counterparty: &dyn Counterparty,
    ) -> Result<Agreement> {
        let next = match agreement {
            Agreement::Drafting(record) => Agreement::Validating(record),
            Agreement::Validating(record) => match validation::validate(&record) {
                Err(violation) => {
                    Agreement::Rejected(Rejection::new(Stage::Validating, violation))
                }
                Ok(()) => {
                    let signature = self.identity.sign(&record)?;
                    Agreement::SignedByProposer(SignedRecord::new(record).with_signature(signature))
                }
            },
            Agreement::SignedByProposer(signed) => {
                let expected = &signed.record.counterparty;
                if counterparty.party() != expected {
                    return Err(AgreementError::CounterpartyMismatch {
                        expected: expected.name.clone(),
                        actual: counterparty.party().name.clone(),
                    });
                }
                Agreement::AwaitingCounterparty(signed)
            }
            Agreement::AwaitingCounterparty(signed) => {
                match counterparty.request_signature(signed.clone()).await? {
                    CounterpartyReply::Signed(signature) => {
                        let expected = &signed.record.counterparty;
                        if !signature.is_by(expected) || !signature.verify(&signed.record) {
                            return Err(AgreementError::InvalidSignature(expected.name.clone()));
                        }
                        Agreement::SignedByBoth(signed.with_signature(signature))
                    }
                    CounterpartyReply::Rejected(reason) => {
                        Agreement::Rejected(Rejection::new(Stage::AwaitingCounterparty, reason))
                    }
                }
            }
            Agreement::SignedByBoth(signed) => {
                contract::verify(&signed)?;
                let id = self.ledger.commit(signed.clone()).await?;
                info!(%id, linear_id = %signed.record.linear_id, "committed to ledger");
                Agreement::Committed(CommittedRecord { id, signed })
            }
            terminal @ (Agreement::Committed(_) | Agreement::Rejected(_)) => terminal,
        };
        Ok(next)
    }
}
