//! The two-party agreement state machine.
//!
//! Each variant carries exactly the data that exists at that point of the
//! agreement. The proposer's coordinator moves a value of [`Agreement`]
//! forward one step at a time until it reaches [`Agreement::Committed`] or
//! [`Agreement::Rejected`].

use super::result::RaceResult;
use super::signature::Signature;
use super::transaction::{CommittedRecord, SignedRecord};
use super::validation::Violation;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum Agreement {
    /// Unsigned record built by the proposer.
    Drafting(RaceResult),
    Validating(RaceResult),
    SignedByProposer(SignedRecord),
    /// Sent to the counterparty, waiting for its signature.
    AwaitingCounterparty(SignedRecord),
    SignedByBoth(SignedRecord),
    Committed(CommittedRecord),
    Rejected(Rejection),
}

impl Agreement {
    pub fn phase(&self) -> Phase {
        match self {
            Self::Drafting(_) => Phase::Drafting,
            Self::Validating(_) => Phase::Validating,
            Self::SignedByProposer(_) => Phase::SignedByProposer,
            Self::AwaitingCounterparty(_) => Phase::AwaitingCounterparty,
            Self::SignedByBoth(_) => Phase::SignedByBoth,
            Self::Committed(_) => Phase::Committed,
            Self::Rejected(_) => Phase::Rejected,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Committed(_) | Self::Rejected(_))
    }

    /// The record under negotiation, if the agreement has not been rejected.
    pub fn record(&self) -> Option<&RaceResult> {
        match self {
            Self::Drafting(record) | Self::Validating(record) => Some(record),
            Self::SignedByProposer(signed)
            | Self::AwaitingCounterparty(signed)
            | Self::SignedByBoth(signed) => Some(&signed.record),
            Self::Committed(committed) => Some(committed.record()),
            Self::Rejected(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    Drafting,
    Validating,
    SignedByProposer,
    AwaitingCounterparty,
    SignedByBoth,
    Committed,
    Rejected,
}

impl Phase {
    /// Progress message reported when the agreement enters this phase.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Drafting => "Generating transaction based on new result.",
            Self::Validating => "Verifying contract constraints.",
            Self::SignedByProposer => "Signing transaction with our private key.",
            Self::AwaitingCounterparty => "Gathering the counterparty's signature.",
            Self::SignedByBoth => "Counterparty signature collected.",
            Self::Committed => "Recording transaction.",
            Self::Rejected => "Transaction rejected.",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Drafting => "DRAFTING",
            Self::Validating => "VALIDATING",
            Self::SignedByProposer => "SIGNED_BY_PROPOSER",
            Self::AwaitingCounterparty => "AWAITING_COUNTERPARTY",
            Self::SignedByBoth => "SIGNED_BY_BOTH",
            Self::Committed => "COMMITTED",
            Self::Rejected => "REJECTED",
        };
        f.write_str(name)
    }
}

/// Where in the agreement a rejection happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Validating,
    AwaitingCounterparty,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validating => f.write_str("validation"),
            Self::AwaitingCounterparty => f.write_str("counterparty review"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    #[error("{0}")]
    Invalid(Violation),
    #[error("record is not addressed to this party")]
    NotAddressedToMe,
    #[error("record does not carry a valid proposer signature")]
    MissingProposerSignature,
}

impl From<Violation> for RejectReason {
    fn from(violation: Violation) -> Self {
        Self::Invalid(violation)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rejection {
    pub stage: Stage,
    pub reason: RejectReason,
}

impl Rejection {
    pub fn new(stage: Stage, reason: impl Into<RejectReason>) -> Self {
        Self {
            stage,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rejected during {}: {}", self.stage, self.reason)
    }
}

/// What the counterparty sends back for a proposal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CounterpartyReply {
    Signed(Signature),
    Rejected(RejectReason),
}
