//! Wire format of the FCD `/v1/txs` account history endpoint.

use serde::Deserialize;
use txlens_types::{Fee, RawMessage, RawTransaction, TxLog, TxPage};

#[derive(Debug, Clone, Deserialize)]
pub struct FcdPage {
	#[serde(default)]
	pub txs: Vec<FcdTx>,
	#[serde(default)]
	pub limit: usize,
	#[serde(default)]
	pub next: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FcdTx {
	pub txhash: String,
	#[serde(rename = "chainId", default)]
	pub chain_id: String,
	#[serde(default)]
	pub timestamp: String,
	#[serde(default)]
	pub raw_log: Option<String>,
	/// `null` for failed transactions.
	#[serde(default)]
	pub logs: Option<Vec<TxLog>>,
	/// Non-zero when the transaction failed; absent on success.
	#[serde(default)]
	pub code: Option<u32>,
	pub tx: FcdStdTx,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FcdStdTx {
	#[serde(default)]
	pub value: FcdTxValue,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FcdTxValue {
	#[serde(default)]
	pub msg: Option<Vec<RawMessage>>,
	#[serde(default)]
	pub fee: Option<Fee>,
	#[serde(default)]
	pub memo: Option<String>,
}

impl From<FcdTx> for RawTransaction {
	fn from(tx: FcdTx) -> Self {
		let FcdTxValue { msg, fee, memo } = tx.tx.value;
		Self {
			hash: tx.txhash,
			chain_id: tx.chain_id,
			timestamp: tx.timestamp,
			messages: msg.unwrap_or_default(),
			logs: tx.logs.unwrap_or_default(),
			success: tx.code.unwrap_or(0) == 0,
			raw_log: tx.raw_log.unwrap_or_default(),
			fee: fee.unwrap_or_default(),
			memo: memo.unwrap_or_default(),
		}
	}
}

impl From<FcdPage> for TxPage {
	fn from(page: FcdPage) -> Self {
		Self {
			txs: page.txs.into_iter().map(RawTransaction::from).collect(),
			limit: page.limit,
			next: page.next,
		}
	}
}

/// Decodes an FCD history page.
pub fn decode_page(bytes: &[u8]) -> Result<TxPage, serde_json::Error> {
	serde_json::from_slice::<FcdPage>(bytes).map(TxPage::from)
}
