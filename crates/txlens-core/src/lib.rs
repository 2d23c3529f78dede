//! Classification engine: compiled matchers and canonical extraction.
//!
//! The engine is a pure function of a transaction and a compiled rule set.
//! It performs no I/O and keeps no mutable state apart from the per-chain
//! [`MatcherCache`], whose entries are immutable once built and can be
//! shared across threads without locking.

pub mod cache;
pub mod extractor;
pub mod matcher;

pub use cache::MatcherCache;
pub use extractor::{extract, pairs, project, MessagePair};
pub use matcher::{compile, CompiledMatcher};
