//! Built-in rule families.
//!
//! A family is a rule set shared by every chain that speaks the same message
//! dialect, e.g. Terra mainnet and its testnets.

pub mod terra;
