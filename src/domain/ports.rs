use super::agreement::CounterpartyReply;
use super::party::Party;
use super::transaction::{CommittedRecord, SignedRecord, TransactionId};
use crate::error::Result;
use async_trait::async_trait;

/// The append-only store mutually signed records are committed to.
#[async_trait]
pub trait Ledger: Send + Sync {
    /// Appends a fully signed record. Fails if its linear id is already present.
    async fn commit(&self, record: SignedRecord) -> Result<TransactionId>;
    async fn get(&self, id: &TransactionId) -> Result<Option<CommittedRecord>>;
    /// All committed records, oldest first.
    async fn all_results(&self) -> Result<Vec<CommittedRecord>>;
}

/// The other side of an agreement, reached by message passing.
#[async_trait]
pub trait Counterparty: Send + Sync {
    fn party(&self) -> &Party;
    async fn request_signature(&self, proposal: SignedRecord) -> Result<CounterpartyReply>;
}

#[async_trait]
pub trait PartyDirectory: Send + Sync {
    async fn me(&self) -> Result<Party>;
    async fn lookup(&self, name: &str) -> Result<Option<Party>>;
    async fn parties(&self) -> Result<Vec<Party>>;
}

pub type LedgerBox = Box<dyn Ledger>;
pub type CounterpartyBox = Box<dyn Counterparty>;
pub type PartyDirectoryBox = Box<dyn PartyDirectory>;
