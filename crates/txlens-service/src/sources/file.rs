//! File-backed page source.

use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;
use tracing::{debug, info};
use txlens_types::TxPage;

use super::{fcd, SourceError, TxPageSource};

/// Serves FCD history pages saved as JSON files.
///
/// Files are read once, in the order given. The first request returns the
/// first page; a request for offset `n` returns the page following the one
/// whose `next` was `n`.
pub struct FilePageSource {
	pages: Vec<TxPage>,
}

impl FilePageSource {
	/// Reads and decodes every page file.
	pub async fn open(paths: &[PathBuf]) -> Result<Self, SourceError> {
		let mut pages = Vec::with_capacity(paths.len());
		for path in paths {
			let path_str = path.display().to_string();
			let bytes = fs::read(path).await.map_err(|source| SourceError::Io {
				path: path_str.clone(),
				source,
			})?;
			let page = fcd::decode_page(&bytes).map_err(|e| SourceError::Decode {
				path: path_str.clone(),
				reason: e.to_string(),
			})?;
			debug!(path = %path_str, txs = page.txs.len(), next = ?page.next, "Read page");
			pages.push(page);
		}

		info!("Loaded {} transaction page(s)", pages.len());
		Ok(Self { pages })
	}

	/// Serves already decoded pages.
	pub fn from_pages(pages: Vec<TxPage>) -> Self {
		Self { pages }
	}

	pub fn len(&self) -> usize {
		self.pages.len()
	}

	pub fn is_empty(&self) -> bool {
		self.pages.is_empty()
	}
}

#[async_trait]
impl TxPageSource for FilePageSource {
	async fn next_page(&self, offset: Option<u64>) -> Result<Option<TxPage>, SourceError> {
		let index = match offset {
			None => 0,
			Some(offset) => match self.pages.iter().position(|page| page.next == Some(offset)) {
				Some(position) => position + 1,
				None => return Ok(None),
			},
		};
		Ok(self.pages.get(index).cloned())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;
	use std::io::Write;
	use tempfile::NamedTempFile;

	fn page_file(next: Option<u64>, hashes: &[&str]) -> NamedTempFile {
		let txs: Vec<_> = hashes
			.iter()
			.map(|hash| {
				json!({
					"chainId": "columbus-5",
					"txhash": hash,
					"timestamp": "2021-10-01T12:00:00Z",
					"tx": { "value": { "msg": [] } }
				})
			})
			.collect();
		let mut file = NamedTempFile::new().unwrap();
		write!(file, "{}", json!({ "txs": txs, "limit": 2, "next": next })).unwrap();
		file
	}

	#[tokio::test]
	async fn test_pages_follow_next_offsets() {
		let first = page_file(Some(90), &["A", "B"]);
		let second = page_file(None, &["C"]);
		let source = FilePageSource::open(&[first.path().to_path_buf(), second.path().to_path_buf()])
			.await
			.unwrap();
		assert_eq!(source.len(), 2);

		let page = source.next_page(None).await.unwrap().unwrap();
		assert_eq!(page.txs[0].hash, "A");
		assert_eq!(page.next, Some(90));

		let page = source.next_page(Some(90)).await.unwrap().unwrap();
		assert_eq!(page.txs[0].hash, "C");

		assert!(source.next_page(Some(12)).await.unwrap().is_none());
	}

	#[tokio::test]
	async fn test_open_reports_bad_files() {
		let mut garbage = NamedTempFile::new().unwrap();
		write!(garbage, "not json").unwrap();

		let err = FilePageSource::open(&[garbage.path().to_path_buf()])
			.await
			.err()
			.unwrap();
		assert!(matches!(err, SourceError::Decode { .. }));

		let err = FilePageSource::open(&[PathBuf::from("/nonexistent/page.json")])
			.await
			.err()
			.unwrap();
		assert!(matches!(err, SourceError::Io { .. }));
	}
}
