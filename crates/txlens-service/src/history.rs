//! Paged transaction history.

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};
use txlens_rules::RuleSetError;
use txlens_types::{EmptyCard, RawTransaction, TxPage, TxViewModel};

use crate::adapter::TxListAdapter;
use crate::sources::{SourceError, TxPageSource};

const EMPTY_TITLE_KEY: &str = "Page:Txs:No transaction history";
const EMPTY_CONTENT_KEY: &str = "Page:Txs:Looks like you haven't made any transaction yet";

#[derive(Debug, Error)]
pub enum HistoryError {
	#[error(transparent)]
	Source(#[from] SourceError),
	#[error(transparent)]
	Rules(#[from] RuleSetError),
}

/// What the history list should show.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryUi<'a> {
	/// Nothing has been accumulated.
	Card(EmptyCard),
	/// Accumulated view models, and the offset of the next page if any.
	List {
		list: &'a [TxViewModel],
		more: Option<u64>,
	},
}

/// Accumulates history pages in arrival order.
///
/// Each appended page is classified on its own; view models built for
/// earlier pages are never rebuilt or reordered.
pub struct TxHistory {
	adapter: TxListAdapter,
	txs: Vec<RawTransaction>,
	list: Vec<TxViewModel>,
	next: Option<u64>,
	done: bool,
}

impl TxHistory {
	pub fn new(adapter: TxListAdapter) -> Self {
		Self {
			adapter,
			txs: Vec::new(),
			list: Vec::new(),
			next: None,
			done: false,
		}
	}

	/// Appends a page and returns the view models built for it.
	///
	/// The history is done once a page holds fewer transactions than its
	/// limit. Nothing is appended if any transaction fails to classify.
	pub fn append_page(&mut self, page: TxPage) -> Result<&[TxViewModel], RuleSetError> {
		let views = page
			.txs
			.iter()
			.map(|tx| self.adapter.view_model(tx))
			.collect::<Result<Vec<_>, _>>()?;

		let start = self.list.len();
		self.done = page.txs.len() < page.limit;
		self.next = page.next;
		debug!(
			txs = page.txs.len(),
			limit = page.limit,
			next = ?page.next,
			done = self.done,
			"Appended page"
		);
		self.txs.extend(page.txs);
		self.list.extend(views);

		Ok(&self.list[start..])
	}

	/// Offset of the next page, while more pages may exist.
	pub fn more(&self) -> Option<u64> {
		if self.txs.is_empty() || self.done {
			None
		} else {
			self.next
		}
	}

	pub fn is_done(&self) -> bool {
		self.done
	}

	pub fn transactions(&self) -> &[RawTransaction] {
		&self.txs
	}

	pub fn list(&self) -> &[TxViewModel] {
		&self.list
	}

	pub fn ui(&self) -> HistoryUi<'_> {
		if self.txs.is_empty() {
			let formatters = self.adapter.formatters();
			return HistoryUi::Card(EmptyCard {
				title: formatters.translate(EMPTY_TITLE_KEY),
				content: formatters.translate(EMPTY_CONTENT_KEY),
			});
		}

		HistoryUi::List {
			list: &self.list,
			more: self.more(),
		}
	}

	/// Pulls pages from a source until the history is done or the source
	/// runs out.
	pub async fn load_all(&mut self, source: &dyn TxPageSource) -> Result<(), HistoryError> {
		let mut offset = None;
		loop {
			let Some(page) = source.next_page(offset).await? else {
				break;
			};
			self.append_page(page)?;

			match self.more() {
				Some(next) => offset = Some(next),
				None => break,
			}
		}

		info!(txs = self.txs.len(), done = self.done, "History loaded");
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::sources::FilePageSource;
	use serde_json::json;
	use std::sync::Arc;
	use txlens_config::ViewConfig;
	use txlens_core::MatcherCache;
	use txlens_render::Formatters;

	fn history() -> TxHistory {
		let adapter = TxListAdapter::new(
			Arc::new(MatcherCache::default()),
			Formatters::default(),
			ViewConfig::default(),
		);
		TxHistory::new(adapter)
	}

	fn page(hashes: &[&str], limit: usize, next: Option<u64>) -> TxPage {
		let txs = hashes
			.iter()
			.map(|hash| {
				serde_json::from_value(json!({
					"hash": hash,
					"chain_id": "columbus-5",
					"timestamp": "2021-10-01T12:00:00Z",
					"success": true
				}))
				.unwrap()
			})
			.collect();
		TxPage { txs, limit, next }
	}

	#[test]
	fn test_empty_history_shows_card() {
		let history = history();
		assert_eq!(
			history.ui(),
			HistoryUi::Card(EmptyCard {
				title: "No transaction history".into(),
				content: "Looks like you haven't made any transaction yet".into(),
			})
		);
		assert_eq!(history.more(), None);
	}

	#[test]
	fn test_pages_append_in_order() {
		let mut history = history();

		let added = history.append_page(page(&["A", "B"], 2, Some(10))).unwrap();
		assert_eq!(added.len(), 2);
		assert_eq!(history.more(), Some(10));

		let added = history.append_page(page(&["C"], 2, Some(5))).unwrap();
		assert_eq!(added[0].hash, "C");
		assert!(history.is_done());
		assert_eq!(history.more(), None);

		let hashes: Vec<_> = history.list().iter().map(|v| v.hash.as_str()).collect();
		assert_eq!(hashes, vec!["A", "B", "C"]);
		assert!(matches!(history.ui(), HistoryUi::List { list, more: None } if list.len() == 3));
	}

	#[test]
	fn test_failed_page_is_not_appended() {
		let mut history = history();
		let mut bad = page(&["A"], 1, Some(3));
		bad.txs[0].chain_id = "unknown-1".into();

		assert!(history.append_page(bad).is_err());
		assert!(history.transactions().is_empty());
		assert!(history.list().is_empty());
	}

	#[tokio::test]
	async fn test_load_all_follows_source() {
		let source = FilePageSource::from_pages(vec![
			page(&["A", "B"], 2, Some(7)),
			page(&["C", "D"], 2, Some(3)),
			page(&["E"], 2, None),
		]);
		let mut history = history();
		history.load_all(&source).await.unwrap();

		assert_eq!(history.list().len(), 5);
		assert!(history.is_done());
	}
}
