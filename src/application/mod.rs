//! Application layer orchestrating agreements between two parties.
//!
//! The proposer side is the `AgreementCoordinator`; the counterparty side is
//! the `Acceptor`, which can run on its own task and be reached through
//! channels. `Node` ties both to a party directory and a ledger.

pub mod acceptor;
pub mod coordinator;
pub mod node;
