//! Domain model: race results, parties, signatures, the validation and
//! contract rules, the agreement state machine and the ports the
//! application layer depends on.

pub mod agreement;
pub mod contract;
pub mod party;
pub mod ports;
pub mod result;
pub mod signature;
pub mod transaction;
pub mod validation;
