//! Outbound adapters implementing driven ports.

pub mod twitter;
