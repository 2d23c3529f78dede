//! Sources of transaction history pages.
//!
//! Paging is driven by the offset a page reports as `next`; the first page
//! is requested with no offset.

use async_trait::async_trait;
use thiserror::Error;
use txlens_types::TxPage;

pub mod fcd;
pub mod file;

pub use file::FilePageSource;

/// Errors that can occur while reading transaction pages.
#[derive(Debug, Error)]
pub enum SourceError {
	/// The page could not be read.
	#[error("Failed to read {path}: {source}")]
	Io {
		path: String,
		#[source]
		source: std::io::Error,
	},
	/// The page was read but is not a valid transaction page.
	#[error("Failed to decode {path}: {reason}")]
	Decode { path: String, reason: String },
}

/// Trait defining the interface for transaction page providers.
#[async_trait]
pub trait TxPageSource: Send + Sync {
	/// Returns the page starting at `offset`, or `None` when there is no
	/// such page.
	async fn next_page(&self, offset: Option<u64>) -> Result<Option<TxPage>, SourceError>;
}
