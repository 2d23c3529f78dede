//! Common types for the txlens classification engine.
//!
//! This crate holds the data model shared by every stage of the pipeline:
//! raw transactions as received from a chain indexer, the canonical actions
//! produced by classification, and the view models handed to a frontend.

pub mod action;
pub mod coin;
mod de;
pub mod log;
pub mod message;
pub mod transaction;
pub mod view;

pub use action::*;
pub use coin::*;
pub use log::*;
pub use message::*;
pub use transaction::*;
pub use view::*;
