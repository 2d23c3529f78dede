//! Raw transaction records as received from a chain indexer.

use serde::{Deserialize, Serialize};

use crate::{Coin, RawMessage, TxLog};

/// Fee paid for a transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Fee {
	pub amount: Vec<Coin>,
	pub gas: String,
}

/// A transaction record.
///
/// Immutable once received: the engine only ever borrows it. `logs[i]`
/// belongs to `messages[i]` unless the log carries an explicit `msg_index`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTransaction {
	pub hash: String,
	pub chain_id: String,
	/// Block time as reported by the indexer, kept verbatim.
	pub timestamp: String,
	#[serde(default)]
	pub messages: Vec<RawMessage>,
	#[serde(default)]
	pub logs: Vec<TxLog>,
	pub success: bool,
	/// Raw error text, meaningful when `success` is false.
	#[serde(default)]
	pub raw_log: String,
	#[serde(default)]
	pub fee: Fee,
	#[serde(default)]
	pub memo: String,
}

impl RawTransaction {
	/// Returns the log correlated with the message at `index`.
	///
	/// A log whose `msg_index` equals `index` wins; otherwise the log at the
	/// same position is used, provided it does not claim another message.
	pub fn log_for(&self, index: usize) -> Option<(usize, &TxLog)> {
		if let Some(found) = self
			.logs
			.iter()
			.enumerate()
			.find(|(_, log)| log.msg_index.map(|i| i as usize) == Some(index))
		{
			return Some(found);
		}

		self.logs
			.get(index)
			.filter(|log| log.msg_index.is_none())
			.map(|log| (index, log))
	}
}

/// One page of an account's transaction history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TxPage {
	pub txs: Vec<RawTransaction>,
	pub limit: usize,
	/// Offset to request the following page with.
	#[serde(default)]
	pub next: Option<u64>,
}
