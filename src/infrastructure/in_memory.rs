use crate::domain::party::Party;
use crate::domain::ports::{Ledger, PartyDirectory};
use crate::domain::transaction::{CommittedRecord, SignedRecord, TransactionId};
use crate::error::{AgreementError, Result};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory ledger.
///
/// Uses `Arc<RwLock<Vec<CommittedRecord>>>` so clones share the same records,
/// kept in commit order. Ideal for testing or single-process runs where
/// persistence is not required.
#[derive(Default, Clone)]
pub struct InMemoryLedger {
    results: Arc<RwLock<Vec<CommittedRecord>>>,
}

impl InMemoryLedger {
    /// Creates a new, empty in-memory ledger.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Ledger for InMemoryLedger {
    async fn commit(&self, record: SignedRecord) -> Result<TransactionId> {
        let id = record.id()?;
        let mut results = self.results.write().await;
        let linear_id = &record.record.linear_id;
        if results.iter().any(|c| &c.record().linear_id == linear_id) {
            return Err(AgreementError::DuplicateRecord(linear_id.clone()));
        }
        results.push(CommittedRecord {
            id: id.clone(),
            signed: record,
        });
        Ok(id)
    }

    async fn get(&self, id: &TransactionId) -> Result<Option<CommittedRecord>> {
        let results = self.results.read().await;
        Ok(results.iter().find(|c| &c.id == id).cloned())
    }

    async fn all_results(&self) -> Result<Vec<CommittedRecord>> {
        let results = self.results.read().await;
        Ok(results.clone())
    }
}

/// A fixed directory of parties known to this node, itself included.
#[derive(Clone)]
pub struct InMemoryDirectory {
    me: Party,
    parties: Vec<Party>,
}

impl InMemoryDirectory {
    pub fn new(me: Party) -> Self {
        Self {
            parties: vec![me.clone()],
            me,
        }
    }

    /// Adds `party` unless a party with the same name is already known.
    pub fn with_party(mut self, party: Party) -> Self {
        if !self.parties.iter().any(|p| p.name == party.name) {
            self.parties.push(party);
        }
        self
    }
}

#[async_trait]
impl PartyDirectory for InMemoryDirectory {
    async fn me(&self) -> Result<Party> {
        Ok(self.me.clone())
    }

    async fn lookup(&self, name: &str) -> Result<Option<Party>> {
        let name = name.trim();
        Ok(self.parties.iter().find(|p| p.name == name).cloned())
    }

    async fn parties(&self) -> Result<Vec<Party>> {
        Ok(self.parties.clone())
    }
}
