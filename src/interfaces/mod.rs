//! Inbound and outbound data formats.

pub mod csv;
