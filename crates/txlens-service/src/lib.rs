//! Transaction list service for txlens.
//!
//! This crate turns pages of raw account history into display-ready view
//! models and hosts the `txlens` command-line tool.
//!
//! # Components
//!
//! - `adapter`: classification and view model construction per transaction
//! - `history`: accumulation of history pages in arrival order
//! - `sources`: providers of history pages
//! - `cli`: command-line interface definitions

pub mod adapter;
pub mod cli;
pub mod history;
pub mod sources;

pub use adapter::TxListAdapter;
pub use history::{HistoryError, HistoryUi, TxHistory};
pub use sources::{FilePageSource, SourceError, TxPageSource};
