use super::coordinator::AgreementCoordinator;
use crate::config::SERVICE_NAMES;
use crate::domain::agreement::{Rejection, Stage};
use crate::domain::party::Party;
use crate::domain::ports::{CounterpartyBox, LedgerBox, PartyDirectoryBox};
use crate::domain::result::ResultEntry;
use crate::domain::transaction::{CommittedRecord, TransactionId};
use crate::domain::validation::Violation;
use crate::error::{AgreementError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::error;

/// A request to record a race result with a counterparty.
///
/// Field names match the `add-result` query parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddResultRequest {
    pub challenge_name: String,
    pub challenge_year: String,
    pub plc: String,
    pub gpic: String,
    pub bib: String,
    pub name: String,
    pub time: Decimal,
    pub gender: String,
    pub party_name: Option<String>,
}

impl AddResultRequest {
    fn into_parts(self) -> (ResultEntry, Option<String>) {
        let entry = ResultEntry {
            challenge_name: self.challenge_name,
            challenge_year: self.challenge_year,
            plc: self.plc,
            gpic: self.gpic,
            bib: self.bib,
            name: self.name,
            time: self.time,
            gender: self.gender,
        };
        (entry, self.party_name)
    }
}

/// The operations a node offers to its clients.
pub struct Node {
    directory: PartyDirectoryBox,
    coordinator: AgreementCoordinator,
    ledger: LedgerBox,
    counterparties: HashMap<String, CounterpartyBox>,
}

impl Node {
    pub fn new(
        directory: PartyDirectoryBox,
        coordinator: AgreementCoordinator,
        ledger: LedgerBox,
    ) -> Self {
        Self {
            directory,
            coordinator,
            ledger,
            counterparties: HashMap::new(),
        }
    }

    /// Makes `counterparty` available for agreements, keyed by its legal name.
    pub fn connect(&mut self, counterparty: CounterpartyBox) {
        let name = counterparty.party().name.clone();
        self.counterparties.insert(name, counterparty);
    }

    pub async fn me(&self) -> Result<Party> {
        self.directory.me().await
    }

    /// Known parties other than this node and the network's service nodes.
    pub async fn peers(&self) -> Result<Vec<Party>> {
        let me = self.me().await?;
        let parties = self.directory.parties().await?;
        Ok(parties
            .into_iter()
            .filter(|party| {
                party.name != me.name && !SERVICE_NAMES.contains(&party.organisation())
            })
            .collect())
    }

    pub async fn results(&self) -> Result<Vec<CommittedRecord>> {
        self.ledger.all_results().await
    }

    /// Agrees a race result with the named counterparty and commits it.
    pub async fn add_result(&self, request: AddResultRequest) -> Result<TransactionId> {
        let outcome = self.try_add_result(request).await;
        if let Err(e) = &outcome {
            error!(error = %e, client_error = e.is_client_error(), "failed to add result");
        }
        outcome
    }

    async fn try_add_result(&self, request: AddResultRequest) -> Result<TransactionId> {
        let (entry, party_name) = request.into_parts();
        let party_name = party_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .ok_or(AgreementError::MissingPartyName)?;

        let party = self
            .directory
            .lookup(party_name)
            .await?
            .ok_or_else(|| AgreementError::PartyNotFound(party_name.to_string()))?;
        if party.is_same_entity(self.coordinator.party()) {
            return Err(AgreementError::Rejected(Rejection::new(
                Stage::Validating,
                Violation::SameParty,
            )));
        }
        let counterparty = self
            .counterparties
            .get(&party.name)
            .ok_or_else(|| AgreementError::CounterpartyUnavailable(party.name.clone()))?;

        let committed = self
            .coordinator
            .propose(entry, counterparty.as_ref())
            .await?;
        Ok(committed.id)
    }
}
