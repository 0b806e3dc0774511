use crate::domain::agreement::Rejection;
use crate::domain::contract::ContractViolation;
use crate::domain::result::LinearId;
use crate::domain::validation::Violation;
use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum AgreementError {
    #[error("{0}")]
    #[diagnostic(code(raceledger::validation))]
    Validation(#[from] Violation),

    #[error("{0}")]
    #[diagnostic(code(raceledger::rejected))]
    Rejected(Rejection),

    #[error("Contract verification failed: {0}")]
    #[diagnostic(code(raceledger::contract))]
    Contract(#[from] ContractViolation),

    #[error("Query parameter 'partyName' missing or has wrong format.")]
    #[diagnostic(code(raceledger::missing_party_name))]
    MissingPartyName,

    #[error("Party named {0} cannot be found.")]
    #[diagnostic(code(raceledger::party_not_found))]
    PartyNotFound(String),

    #[error("Counterparty {0} is unavailable")]
    #[diagnostic(code(raceledger::counterparty_unavailable))]
    CounterpartyUnavailable(String),

    #[error("Counterparty handle is for {actual}, but the record names {expected}")]
    #[diagnostic(code(raceledger::counterparty_mismatch))]
    CounterpartyMismatch { expected: String, actual: String },

    #[error("Invalid signature from {0}")]
    #[diagnostic(code(raceledger::invalid_signature))]
    InvalidSignature(String),

    #[error("Record {0} is already on the ledger")]
    #[diagnostic(code(raceledger::duplicate_record))]
    DuplicateRecord(LinearId),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[cfg(feature = "storage-rocksdb")]
    #[error("RocksDB error: {0}")]
    RocksDBError(#[from] rocksdb::Error),

    #[error("Internal error: {0}")]
    InternalError(Box<dyn std::error::Error + Send + Sync>),
}

impl AgreementError {
    /// Errors caused by the submitted data rather than the node itself.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Validation(_)
                | Self::Rejected(_)
                | Self::Contract(_)
                | Self::MissingPartyName
                | Self::PartyNotFound(_)
                | Self::DuplicateRecord(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, AgreementError>;
