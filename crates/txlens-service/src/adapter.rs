//! Builds display view models from raw transactions.

use chrono::{DateTime, Local, NaiveDateTime};
use std::sync::Arc;
use tracing::{debug, instrument};
use txlens_config::ViewConfig;
use txlens_core::{extract, MatcherCache};
use txlens_render::{render_group, Formatters};
use txlens_rules::RuleSetError;
use txlens_types::{
	CanonicalAction, Detail, MessageGroup, RawTransaction, TxViewModel, UNKNOWN_SUMMARY, UNKNOWN_TAG,
};

const FEE_TITLE_KEY: &str = "Common:Tx:Tx fee";
const MEMO_TITLE_KEY: &str = "Common:Tx:Memo";

/// Classifies transactions and turns them into [`TxViewModel`]s.
///
/// Cheap to clone; the matcher cache is shared between clones.
#[derive(Clone)]
pub struct TxListAdapter {
	cache: Arc<MatcherCache>,
	formatters: Formatters,
	view: ViewConfig,
	default_chain: Option<String>,
	chain_override: Option<String>,
}

impl TxListAdapter {
	pub fn new(cache: Arc<MatcherCache>, formatters: Formatters, view: ViewConfig) -> Self {
		Self {
			cache,
			formatters,
			view,
			default_chain: None,
			chain_override: None,
		}
	}

	/// Chain whose rules apply to transactions that carry no chain id.
	pub fn with_default_chain(mut self, chain_id: impl Into<String>) -> Self {
		self.default_chain = Some(chain_id.into());
		self
	}

	/// Classifies every transaction with this chain's rules regardless of
	/// the chain id it carries.
	pub fn with_chain_override(mut self, chain_id: impl Into<String>) -> Self {
		self.chain_override = Some(chain_id.into());
		self
	}

	pub fn formatters(&self) -> &Formatters {
		&self.formatters
	}

	fn rules_chain<'a>(&'a self, tx: &'a RawTransaction) -> &'a str {
		if let Some(chain) = &self.chain_override {
			return chain;
		}
		match &self.default_chain {
			Some(chain) if tx.chain_id.is_empty() => chain,
			_ => &tx.chain_id,
		}
	}

	/// Runs the classification engine on one transaction.
	pub fn classify(&self, tx: &RawTransaction) -> Result<Vec<CanonicalAction>, RuleSetError> {
		let matcher = self.cache.get(self.rules_chain(tx))?;
		Ok(extract(tx, &matcher))
	}

	/// Builds the view model for one transaction.
	///
	/// Fails only when the transaction's chain has no rule set.
	#[instrument(skip_all, fields(tx = %tx.hash))]
	pub fn view_model(&self, tx: &RawTransaction) -> Result<TxViewModel, RuleSetError> {
		let actions = self.classify(tx)?;
		let messages = self.message_groups(tx, &actions);
		debug!(actions = actions.len(), groups = messages.len(), "Built view model");

		Ok(TxViewModel {
			hash: tx.hash.clone(),
			link: self.link(&tx.chain_id, &tx.hash),
			date: self.format_date(&tx.timestamp),
			messages,
			details: self.details(tx),
		})
	}

	fn message_groups(&self, tx: &RawTransaction, actions: &[CanonicalAction]) -> Vec<MessageGroup> {
		if tx.success && actions.is_empty() {
			return vec![MessageGroup {
				tag: UNKNOWN_TAG.to_string(),
				summary: vec![UNKNOWN_SUMMARY.to_string()],
				success: true,
			}];
		}

		actions
			.iter()
			.map(|action| render_group(action, &self.formatters, tx.success))
			.collect()
	}

	/// Explorer link for a transaction.
	pub fn link(&self, chain_id: &str, hash: &str) -> String {
		format!(
			"{}/{}/tx/{}",
			self.view.finder_url.trim_end_matches('/'),
			chain_id,
			hash
		)
	}

	/// Formats an indexer timestamp in local time. Timestamps that do not
	/// parse are returned unchanged.
	pub fn format_date(&self, timestamp: &str) -> String {
		let parsed = DateTime::parse_from_rfc3339(timestamp)
			.map(|date| date.with_timezone(&Local))
			.ok()
			.or_else(|| {
				NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M:%S")
					.ok()
					.map(|naive| naive.and_utc().with_timezone(&Local))
			});

		match parsed {
			Some(date) => date.format(&self.view.date_format).to_string(),
			None => {
				debug!(timestamp, "Unparseable timestamp, showing it verbatim");
				timestamp.to_string()
			}
		}
	}

	/// Fee and memo rows, without the ones that would be empty.
	pub fn details(&self, tx: &RawTransaction) -> Vec<Detail> {
		[
			(FEE_TITLE_KEY, self.formatters.coins(&tx.fee.amount)),
			(MEMO_TITLE_KEY, tx.memo.clone()),
		]
		.into_iter()
		.filter(|(_, content)| !content.is_empty())
		.map(|(key, content)| Detail {
			title: self.formatters.translate(key),
			content,
		})
		.collect()
	}
}
